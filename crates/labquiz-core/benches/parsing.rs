use std::path::Path;

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use labquiz_core::parser::parse_course_str;

/// Generate a course document with `labs` labs of `per_lab` questions each.
fn generate_course_yaml(labs: usize, per_lab: usize) -> String {
    let mut yaml = String::new();
    for lab in 1..=labs {
        yaml.push_str(&format!("lab{lab}:\n  title: \"Lab {lab}\"\n  questions:\n"));
        for q in 1..=per_lab {
            yaml.push_str(&format!(
                r#"    - id: {q}
      title: "Question {q}"
      text: "Enter the value for question <code>{q}</code>."
      placeholder: "answer"
      answers:
        - pattern: '^answer-{q}$'
          flags: i
        - pattern: 'alt-{q}'
      correct_message: "Correct."
      hint: "Try answer-{q}."
"#
            ));
        }
    }
    yaml
}

fn bench_yaml_parsing(c: &mut Criterion) {
    let mut group = c.benchmark_group("yaml_parsing");

    let small = generate_course_yaml(1, 5);
    let medium = generate_course_yaml(5, 10);
    let large = generate_course_yaml(20, 25);

    for (name, yaml) in [("1x5", &small), ("5x10", &medium), ("20x25", &large)] {
        group.bench_function(name, |b| {
            b.iter(|| {
                parse_course_str(
                    black_box("bench"),
                    black_box(yaml),
                    Path::new("bench.yaml"),
                )
            })
        });
    }

    group.finish();
}

criterion_group!(benches, bench_yaml_parsing);
criterion_main!(benches);
