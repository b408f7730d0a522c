use crate::terminal::{TerminalGuard, TerminalSurface};
use clap::Args;
use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use quizforge::config::{EngineOptions, EngineTimings};
use quizforge::engine::keyboard::KeyInput;
use quizforge::quiz::QuizConfig;
use quizforge::{QfResult, QuizEngine};
use std::time::{Duration, Instant};
use tracing::info;

const IDLE_POLL: Duration = Duration::from_millis(250);

#[derive(Args, Debug, Clone)]
pub struct PlayArgs {
    #[command(flatten)]
    pub timings: EngineTimings,

    /// Shown in the window title after the quiz title.
    #[arg(long, default_value = "QuizForge")]
    pub site_name: String,
}

pub fn run(args: &PlayArgs, quiz: QuizConfig, timings: EngineTimings) -> QfResult<()> {
    let share_url = Some(quiz.share_url.clone()).filter(|u| !u.is_empty());
    let options = EngineOptions {
        timings,
        site_name: Some(args.site_name.clone()),
    };

    let guard = TerminalGuard::enter()?;
    let mut engine = QuizEngine::start(quiz, TerminalSurface::new(share_url), options);
    let mut last = Instant::now();

    loop {
        if engine.surface().is_dirty() {
            engine.surface_mut().draw()?;
        }

        let wait = engine.next_deadline().unwrap_or(IDLE_POLL).min(IDLE_POLL);
        if event::poll(wait)? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                match key.code {
                    KeyCode::Char('q') | KeyCode::Esc => break,
                    KeyCode::Char('r') => engine.reset(),
                    KeyCode::Char('s') => {
                        engine.share();
                    }
                    KeyCode::Char(c) => {
                        engine.handle_key(KeyInput::Char(c));
                    }
                    _ => {
                        engine.handle_key(KeyInput::Other);
                    }
                }
            }
        }

        let now = Instant::now();
        engine.tick(now - last);
        last = now;
    }

    drop(guard);
    let scores = engine.scores();
    info!("Final scores: {:?}", scores);
    Ok(())
}
