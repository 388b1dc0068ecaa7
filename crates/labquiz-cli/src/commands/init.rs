//! The `labquiz init` command.

use anyhow::Result;

pub fn execute() -> Result<()> {
    // Create labquiz.toml
    if std::path::Path::new("labquiz.toml").exists() {
        println!("labquiz.toml already exists, skipping.");
    } else {
        std::fs::write("labquiz.toml", SAMPLE_CONFIG)?;
        println!("Created labquiz.toml");
    }

    // Create example question set
    std::fs::create_dir_all("questions")?;
    let example_path = std::path::Path::new("questions/example.yaml");
    if example_path.exists() {
        println!("questions/example.yaml already exists, skipping.");
    } else {
        std::fs::write(example_path, EXAMPLE_QUESTIONS)?;
        println!("Created questions/example.yaml");
    }

    println!("\nNext steps:");
    println!("  1. Edit questions/example.yaml or add <course>.yaml files");
    println!("  2. Run: labquiz validate --questions questions");
    println!("  3. Run: labquiz serve, then open http://localhost:8010/example/lab1");

    Ok(())
}

const SAMPLE_CONFIG: &str = r#"# labquiz configuration

host = "0.0.0.0"
port = 8010
questions_dir = "./questions"
# Completion markers (quiz_complete_<course>_<lab>.txt) are written here.
marker_dir = "${HOME}"
"#;

const EXAMPLE_QUESTIONS: &str = r#"lab1:
  title: "Example Lab: Getting Started"
  questions:
    - id: 1
      title: Current directory
      text: "Which command prints the current working directory?"
      placeholder: "command"
      answers:
        - pattern: '^pwd$'
      correct_message: "<code>pwd</code> prints the working directory."
      hint: "It is a three-letter abbreviation of 'print working directory'."
    - id: 2
      title: Greeting
      text: "Type a greeting. Any capitalisation works."
      answers:
        - pattern: 'hello|hi'
          flags: i
      correct_message: "Hello to you too."
      hint: "Try saying hello."
    - id: 3
      title: A small script
      text: "Write a bash script that echoes <code>done</code>."
      multiline: true
      rows: 6
      answers:
        - pattern: '^#!/bin/(ba)?sh.*echo\s+"?done"?'
          flags: s
      correct_message: "Nice script."
      hint: "Start with a shebang line, then use echo."
"#;
