use crate::reports;
use clap::Args;
use quizforge::config::{EngineOptions, EngineTimings};
use quizforge::quiz::QuizConfig;
use quizforge::surface::{ClipboardMode, RecordingSurface};
use quizforge::{QfResult, QuizEngine, QuizError, Selection};
use std::path::PathBuf;
use tracing::{info, warn};

#[derive(Args, Debug, Clone)]
pub struct SimulateArgs {
    #[command(flatten)]
    pub timings: EngineTimings,

    /// 1-based option positions, one per question, e.g. "1,3,2".
    #[arg(short, long, value_delimiter = ',')]
    pub answers: Vec<usize>,

    /// Build the share text once the results are showing.
    #[arg(long, default_value_t = false)]
    pub share: bool,

    /// Print the result as JSON instead of tables.
    #[arg(long, default_value_t = false)]
    pub json: bool,

    /// Write the score snapshot to a CSV file.
    #[arg(long)]
    pub csv: Option<PathBuf>,
}

pub fn run(args: &SimulateArgs, quiz: QuizConfig, timings: EngineTimings) -> QfResult<()> {
    let options = EngineOptions {
        timings,
        site_name: None,
    };
    let surface = RecordingSurface::with_clipboard(ClipboardMode::Works);
    let mut engine = QuizEngine::start(quiz, surface, options);

    for (i, &answer) in args.answers.iter().enumerate() {
        if engine.is_finished() {
            warn!("Ignoring {} answers past the last question", args.answers.len() - i);
            break;
        }
        let position = answer.checked_sub(1).ok_or_else(|| {
            QuizError::Config(format!("answer #{} must be 1-based, got 0", i + 1))
        })?;
        match engine.select_option(position) {
            Selection::Accepted { .. } => {}
            other => {
                return Err(QuizError::Config(format!(
                    "answer #{} ({}) was not accepted: {:?}",
                    i + 1,
                    answer,
                    other
                )))
            }
        }
        engine.settle();
    }
    engine.settle();

    if let Some(path) = &args.csv {
        reports::write_scores_csv(path, engine.score_board())?;
        info!("💾 Scores written to {}", path.display());
    }

    let Some(result) = engine.result().cloned() else {
        info!(
            "Stopped at question {} of {}",
            engine.current_index() + 1,
            engine.total_questions()
        );
        reports::print_scores(engine.score_board());
        return Ok(());
    };

    let share = if args.share { engine.share() } else { None };

    if args.json {
        let payload = serde_json::json!({
            "result": result,
            "scores": engine.scores(),
            "share": share.as_ref().map(|s| s.text.clone()),
        });
        println!("{}", serde_json::to_string_pretty(&payload)?);
    } else {
        reports::print_result(&result);
        if let Some(s) = share {
            println!("\nShare: {}", s.text);
        }
    }
    Ok(())
}
