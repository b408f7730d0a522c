use regex::Regex;
use std::fs;
use std::io::Write;
use std::process::{Command, Output};
use tempfile::{NamedTempFile, TempDir};

const BIN: &str = env!("CARGO_BIN_EXE_quizforge");

// Answer positions for the built-in personality quiz (12 questions)
const ALL_FIRST: &str = "1,1,1,1,1,1,1,1,1,1,1,1";
const ALL_SECOND: &str = "2,2,2,2,2,2,2,2,2,2,2,2";

fn run(args: &[&str]) -> Output {
    Command::new(BIN)
        .args(args)
        .output()
        .expect("Failed to execute binary")
}

fn stdout_of(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).to_string()
}

fn quiz_file(body: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    write!(file, "{}", body).unwrap();
    file
}

const UNDECLARED: &str = r#"{
  "title": "Ghosts",
  "questions": [
    { "id": 1, "text": "Boo?", "options": [
      { "text": "yes", "type": "a" },
      { "text": "no", "type": "ghost" }
    ]}
  ],
  "results": {
    "a": { "title": "Ant", "emoji": "🐜", "description": "march" }
  }
}"#;

// --- SIMULATE ---

#[test]
fn test_cli_simulate_json_tie_goes_to_first_declared() {
    let output = run(&["simulate", "--answers", ALL_FIRST, "--json"]);
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_str(&stdout_of(&output)).unwrap();
    assert_eq!(json["result"]["kind"], "leader");
    for kind in ["leader", "creative", "thinker", "connector"] {
        assert_eq!(json["scores"][kind], 3);
    }
    let percents: Vec<u64> = json["result"]["breakdown"]
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["percent"].as_u64().unwrap())
        .collect();
    assert_eq!(percents, vec![25, 25, 25, 25]);
    assert!(json["share"].is_null());
}

#[test]
fn test_cli_simulate_table_and_share() {
    let output = run(&["simulate", "--answers", ALL_SECOND, "--share"]);
    assert!(output.status.success());
    let stdout = stdout_of(&output);

    assert!(stdout.contains("The Analytical Thinker"));
    let share = Regex::new(r"Share: I just found out I am \S+ The Analytical Thinker! .* https://quizforge\.example/quizzes/personality/ #QuizForge").unwrap();
    assert!(share.is_match(&stdout), "STDOUT:\n{}", stdout);

    let pct = Regex::new(r"\|\s*1\s*\|[^|]*Analytical Thinker[^|]*\|\s*4\s*\|\s*33%\s*\|").unwrap();
    assert!(pct.is_match(&stdout), "STDOUT:\n{}", stdout);
}

#[test]
fn test_cli_simulate_writes_csv() {
    let dir = TempDir::new().unwrap();
    let csv_path = dir.path().join("scores.csv");
    let output = run(&[
        "simulate",
        "--answers",
        ALL_SECOND,
        "--csv",
        csv_path.to_str().unwrap(),
    ]);
    assert!(output.status.success());

    let content = fs::read_to_string(&csv_path).unwrap();
    let lines: Vec<&str> = content.lines().collect();
    assert_eq!(
        lines,
        vec![
            "type,score,percent",
            "leader,3,25",
            "creative,2,17",
            "thinker,4,33",
            "connector,3,25",
        ]
    );
}

#[test]
fn test_cli_simulate_partial_run_stops_early() {
    let output = run(&["simulate", "--answers", "1,2,3"]);
    assert!(output.status.success());
    let stdout = stdout_of(&output);
    assert!(!stdout.contains("Your personality type is"));
}

#[test]
fn test_cli_simulate_rejects_zero_position() {
    let output = run(&["simulate", "--answers", "0"]);
    assert!(!output.status.success());
}

#[test]
fn test_cli_shuffle_seed_is_reproducible() {
    let a = run(&["simulate", "--shuffle-seed", "7", "--answers", ALL_SECOND, "--json"]);
    let b = run(&["simulate", "--shuffle-seed", "7", "--answers", ALL_SECOND, "--json"]);
    assert!(a.status.success());
    assert_eq!(stdout_of(&a), stdout_of(&b));
}

// --- VALIDATE ---

#[test]
fn test_cli_validate_builtin_passes() {
    let output = run(&["validate", "--verbose"]);
    assert!(output.status.success());
    let stdout = stdout_of(&output);
    assert!(stdout.contains("No problems found"));
    assert!(stdout.contains("A) "));
}

#[test]
fn test_cli_validate_policy_controls_undeclared_types() {
    let file = quiz_file(UNDECLARED);
    let path = file.path().to_str().unwrap();

    let strict = run(&["validate", "--quiz", path]);
    assert_eq!(strict.status.code(), Some(1));
    assert!(stdout_of(&strict).contains("ghost"));

    let lenient = run(&["validate", "--quiz", path, "--policy", "lenient"]);
    assert!(lenient.status.success());
}

#[test]
fn test_cli_strict_refuses_to_simulate_undeclared_quiz() {
    let file = quiz_file(UNDECLARED);
    let path = file.path().to_str().unwrap();

    let strict = run(&["simulate", "--quiz", path, "--answers", "2"]);
    assert!(!strict.status.success());

    let lenient = run(&["simulate", "--quiz", path, "--policy", "lenient", "--answers", "2", "--json"]);
    assert!(lenient.status.success());
    let json: serde_json::Value = serde_json::from_str(&stdout_of(&lenient)).unwrap();
    assert_eq!(json["result"]["kind"], "a");
    assert_eq!(json["scores"]["ghost"], 1);
}

#[test]
fn test_cli_missing_quiz_file_fails() {
    let output = run(&["simulate", "--quiz", "/no/such/quiz.json"]);
    assert_eq!(output.status.code(), Some(1));
}
