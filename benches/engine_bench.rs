use criterion::{criterion_group, criterion_main, Criterion};
use quizforge::config::{EngineOptions, EngineTimings};
use quizforge::engine::scores::ScoreBoard;
use quizforge::quizzes::KnownQuiz;
use quizforge::surface::RecordingSurface;
use quizforge::QuizEngine;
use std::hint::black_box;

fn bench_breakdown(c: &mut Criterion) {
    let quiz = KnownQuiz::Personality.load().unwrap();
    let kinds: Vec<String> = quiz.results.keys().cloned().collect();
    let mut board = ScoreBoard::for_config(&quiz);
    for i in 0..quiz.total_questions() {
        board.record(&kinds[i % kinds.len()]);
    }

    c.bench_function("breakdown_personality", |b| {
        b.iter(|| {
            let winner = board.leader().unwrap_or_default();
            black_box(board.breakdown(black_box(&quiz), winner))
        })
    });
}

fn bench_full_run(c: &mut Criterion) {
    let quiz = KnownQuiz::Personality.load().unwrap();
    let options = EngineOptions {
        timings: EngineTimings::instant(),
        site_name: None,
    };

    c.bench_function("full_run_personality", |b| {
        b.iter(|| {
            let mut engine =
                QuizEngine::start(quiz.clone(), RecordingSurface::new(), options.clone());
            for i in 0..engine.total_questions() {
                engine.select_option(i % 4);
                engine.settle();
            }
            black_box(engine.winner().map(str::len))
        })
    });
}

criterion_group!(benches, bench_breakdown, bench_full_run);
criterion_main!(benches);
