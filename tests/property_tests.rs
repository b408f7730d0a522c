use indexmap::IndexMap;
use proptest::prelude::*;
use quizforge::config::{EngineOptions, EngineTimings};
use quizforge::engine::scores::percent_of;
use quizforge::quiz::{AnswerOption, Question, QuizConfig, ResultProfile};
use quizforge::surface::RecordingSurface;
use quizforge::{QuizEngine, Selection};

const KINDS: [&str; 5] = ["leader", "creative", "thinker", "connector", "dreamer"];

// --- STRATEGIES ---

// A quiz with 1..=5 declared types and options drawn only from those types,
// plus one chosen position per question.
prop_compose! {
    fn arb_quiz()(type_count in 1usize..=5)(
        type_count in Just(type_count),
        questions in proptest::collection::vec(
            proptest::collection::vec(0..type_count, 2..=5),
            0..16
        ),
        picks in proptest::collection::vec(0usize..5, 16)
    ) -> (QuizConfig, Vec<usize>) {
        let results: IndexMap<String, ResultProfile> = KINDS[..type_count]
            .iter()
            .map(|k| (k.to_string(), ResultProfile {
                title: k.to_string(),
                emoji: "*".to_string(),
                color: String::new(),
                description: String::new(),
            }))
            .collect();

        let answers: Vec<usize> = questions
            .iter()
            .zip(picks.iter())
            .map(|(opts, pick)| pick % opts.len())
            .collect();

        let questions = questions
            .into_iter()
            .enumerate()
            .map(|(i, opts)| Question {
                id: i as u32,
                text: format!("q{}", i),
                options: opts
                    .into_iter()
                    .map(|t| AnswerOption { text: String::new(), kind: KINDS[t].to_string() })
                    .collect(),
            })
            .collect();

        let quiz = QuizConfig {
            title: "prop".to_string(),
            subtitle: String::new(),
            category: String::new(),
            share_text: String::new(),
            share_url: String::new(),
            question_count: None,
            estimated_minutes: None,
            result_label: None,
            questions,
            results,
        };
        (quiz, answers)
    }
}

fn instant() -> EngineOptions {
    EngineOptions {
        timings: EngineTimings::instant(),
        site_name: None,
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(300))]

    #[test]
    fn test_scores_sum_to_answer_count((quiz, answers) in arb_quiz()) {
        let expected: Vec<String> = quiz
            .questions
            .iter()
            .zip(answers.iter())
            .map(|(q, &p)| q.options[p].kind.clone())
            .collect();

        let mut engine = QuizEngine::start(quiz, RecordingSurface::new(), instant());
        for (&p, kind) in answers.iter().zip(expected.iter()) {
            match engine.select_option(p) {
                Selection::Accepted { kind: got, .. } => prop_assert_eq!(&got, kind),
                other => prop_assert!(false, "answer refused: {:?}", other),
            }
            engine.settle();
        }

        prop_assert!(engine.is_finished());
        let scores = engine.scores();
        prop_assert_eq!(scores.values().sum::<u32>() as usize, answers.len());
        for (kind, score) in scores.iter() {
            let picked = expected.iter().filter(|k| *k == kind).count();
            prop_assert_eq!(*score as usize, picked);
        }
    }

    #[test]
    fn test_winner_is_earliest_declared_maximum((quiz, answers) in arb_quiz()) {
        let mut engine = QuizEngine::start(quiz, RecordingSurface::new(), instant());
        for &p in &answers {
            engine.select_option(p);
            engine.settle();
        }

        let scores = engine.scores();
        let max = scores.values().copied().max().unwrap_or(0);
        let first_max = engine
            .config()
            .results
            .keys()
            .find(|k| scores.get(k.as_str()).copied().unwrap_or(0) == max)
            .cloned();
        prop_assert_eq!(engine.winner().map(str::to_string), first_max);
    }

    #[test]
    fn test_breakdown_percentages_and_order((quiz, answers) in arb_quiz()) {
        let mut engine = QuizEngine::start(quiz, RecordingSurface::new(), instant());
        for &p in &answers {
            engine.select_option(p);
            engine.settle();
        }

        let total = answers.len() as u32;
        let result = engine.result().cloned().unwrap();
        let declared: Vec<String> = engine.config().results.keys().cloned().collect();
        prop_assert_eq!(result.breakdown.len(), declared.len());

        for row in &result.breakdown {
            if total == 0 {
                prop_assert_eq!(row.percent, 0);
            } else {
                prop_assert_eq!(row.percent, percent_of(row.score, total));
            }
            prop_assert_eq!(row.is_winner, row.kind == result.kind);
        }

        for pair in result.breakdown.windows(2) {
            prop_assert!(pair[0].score >= pair[1].score);
            if pair[0].score == pair[1].score {
                let a = declared.iter().position(|k| *k == pair[0].kind);
                let b = declared.iter().position(|k| *k == pair[1].kind);
                prop_assert!(a < b, "tie not in declaration order");
            }
        }
    }
}
