use criterion::{black_box, criterion_group, criterion_main, Criterion};

use labquiz_core::grading::grade;
use labquiz_core::model::{AnswerPattern, Question};

fn question(patterns: &[(&str, &str)]) -> Question {
    Question {
        id: 1,
        title: "Bench".into(),
        text: "Bench".into(),
        placeholder: String::new(),
        multiline: false,
        rows: None,
        answers: patterns
            .iter()
            .map(|(pattern, flags)| AnswerPattern {
                pattern: pattern.to_string(),
                flags: flags.parse().expect("valid flags"),
            })
            .collect(),
        correct_message: "ok".into(),
        hint: "no".into(),
    }
}

fn bench_grade(c: &mut Criterion) {
    let mut group = c.benchmark_group("grade");

    let ip = question(&[(r"^\d{1,3}(\.\d{1,3}){3}$", "")]);
    let alternatives = question(&[
        ("^ipconfig$", "i"),
        ("^ifconfig$", "i"),
        ("^ip a(ddr)?( show)?$", "i"),
        ("^nmcli device show$", "i"),
    ]);
    let script = question(&[(r"^#!/bin/(ba)?sh.*for .* in .*done", "ms")]);
    let script_answer = {
        let mut s = String::from("#!/bin/bash\n");
        for i in 0..100 {
            s.push_str(&format!("echo line {i}\n"));
        }
        s.push_str("for f in *; do echo $f; done\n");
        s
    };

    group.bench_function("ip_hit", |b| {
        b.iter(|| grade(black_box(&ip), black_box("192.168.1.1")))
    });

    group.bench_function("ip_miss", |b| {
        b.iter(|| grade(black_box(&ip), black_box("192.168.1")))
    });

    group.bench_function("four_alternatives_last", |b| {
        b.iter(|| grade(black_box(&alternatives), black_box("NMCLI device show")))
    });

    group.bench_function("multiline_script", |b| {
        b.iter(|| grade(black_box(&script), black_box(&script_answer)))
    });

    group.finish();
}

criterion_group!(benches, bench_grade);
criterion_main!(benches);
