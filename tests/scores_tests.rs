use indexmap::IndexMap;
use quizforge::engine::scores::{percent_of, ScoreBoard};
use quizforge::quiz::{QuizConfig, ResultProfile};
use rstest::rstest;

fn config_with(types: &[&str]) -> QuizConfig {
    let results: IndexMap<String, ResultProfile> = types
        .iter()
        .map(|t| {
            (
                t.to_string(),
                ResultProfile {
                    title: t.to_string(),
                    emoji: String::new(),
                    color: String::new(),
                    description: String::new(),
                },
            )
        })
        .collect();
    QuizConfig {
        title: "scores".to_string(),
        subtitle: String::new(),
        category: String::new(),
        share_text: String::new(),
        share_url: String::new(),
        question_count: None,
        estimated_minutes: None,
        result_label: None,
        questions: Vec::new(),
        results,
    }
}

fn board_from(config: &QuizConfig, answers: &[&str]) -> ScoreBoard {
    let mut board = ScoreBoard::for_config(config);
    for a in answers {
        board.record(a);
    }
    board
}

#[rstest]
#[case(0, 0, 0)]
#[case(0, 5, 0)]
#[case(5, 5, 100)]
#[case(1, 3, 33)]
#[case(2, 3, 67)]
#[case(1, 8, 13)]
#[case(3, 8, 38)]
#[case(1, 201, 0)]
fn test_percent_of(#[case] score: u32, #[case] total: u32, #[case] expected: u32) {
    assert_eq!(percent_of(score, total), expected);
}

#[rstest]
#[case(&["a", "b", "c"], &["b", "c"], "b")]
#[case(&["a", "b", "c"], &["c", "b"], "b")]
#[case(&["a", "b", "c"], &[], "a")]
#[case(&["c", "b", "a"], &["a", "b", "c"], "c")]
#[case(&["a", "b"], &["b", "a", "b"], "b")]
fn test_leader_tie_break(#[case] types: &[&str], #[case] answers: &[&str], #[case] expected: &str) {
    let config = config_with(types);
    let board = board_from(&config, answers);
    assert_eq!(board.leader(), Some(expected));
}

#[test]
fn test_board_starts_at_zero_in_declaration_order() {
    let config = config_with(&["leader", "creative", "thinker"]);
    let board = ScoreBoard::for_config(&config);
    let keys: Vec<&str> = board.iter().map(|(k, _)| k).collect();
    assert_eq!(keys, vec!["leader", "creative", "thinker"]);
    assert_eq!(board.total(), 0);
    assert_eq!(board.len(), 3);
}

#[test]
fn test_undeclared_kind_appended_after_declared() {
    let config = config_with(&["a", "b"]);
    let mut board = ScoreBoard::for_config(&config);
    assert_eq!(board.record("z"), 1);
    assert_eq!(board.record("z"), 2);

    let keys: Vec<&str> = board.iter().map(|(k, _)| k).collect();
    assert_eq!(keys, vec!["a", "b", "z"]);
    assert_eq!(board.leader(), Some("z"));
    assert_eq!(board.declared_leader(&config), Some("a"));
}

#[test]
fn test_reset_keeps_keys() {
    let config = config_with(&["a", "b"]);
    let mut board = board_from(&config, &["a", "b", "b"]);
    board.reset();
    assert_eq!(board.total(), 0);
    assert_eq!(board.len(), 2);
    assert_eq!(board.get("b"), 0);
}

#[test]
fn test_breakdown_sorted_with_stable_ties() {
    let config = config_with(&["a", "b", "c", "d"]);
    let board = board_from(&config, &["c", "b", "c", "d"]);
    let rows = board.breakdown(&config, "c");

    let summary: Vec<(&str, u32, u32, bool)> = rows
        .iter()
        .map(|r| (r.kind.as_str(), r.score, r.percent, r.is_winner))
        .collect();
    assert_eq!(
        summary,
        vec![
            ("c", 2, 50, true),
            ("b", 1, 25, false),
            ("d", 1, 25, false),
            ("a", 0, 0, false),
        ]
    );
}

#[test]
fn test_breakdown_with_no_points_is_all_zero() {
    let config = config_with(&["a", "b"]);
    let board = ScoreBoard::for_config(&config);
    let rows = board.breakdown(&config, "a");
    assert!(rows.iter().all(|r| r.percent == 0));
    assert_eq!(rows[0].kind, "a");
}
