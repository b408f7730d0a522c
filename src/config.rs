use crate::error::{QfResult, QuizError};
use clap::{parser::ValueSource, ArgMatches, Args, ValueEnum};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;

/// Durations of every timed phase, in milliseconds.
#[derive(Args, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineTimings {
    // Selection highlight before the card leaves
    #[arg(long, default_value_t = 500)]
    pub feedback_delay_ms: u64,
    #[arg(long, default_value_t = 320)]
    pub exit_ms: u64,
    #[arg(long, default_value_t = 420)]
    pub enter_ms: u64,
    #[arg(long, default_value_t = 380)]
    pub focus_delay_ms: u64,

    // === RESULTS ===
    #[arg(long, default_value_t = 200)]
    pub scroll_delay_ms: u64,
    #[arg(long, default_value_t = 700)]
    pub reveal_delay_ms: u64,
    #[arg(long, default_value_t = 120)]
    pub reveal_stagger_ms: u64,

    #[arg(long, default_value_t = 2600)]
    pub share_confirm_ms: u64,
}

impl Default for EngineTimings {
    fn default() -> Self {
        Self {
            feedback_delay_ms: 500,
            exit_ms: 320,
            enter_ms: 420,
            focus_delay_ms: 380,
            scroll_delay_ms: 200,
            reveal_delay_ms: 700,
            reveal_stagger_ms: 120,
            share_confirm_ms: 2600,
        }
    }
}

impl EngineTimings {
    /// All phases fire on the next tick. Handy for headless runs.
    pub fn instant() -> Self {
        Self {
            feedback_delay_ms: 0,
            exit_ms: 0,
            enter_ms: 0,
            focus_delay_ms: 0,
            scroll_delay_ms: 0,
            reveal_delay_ms: 0,
            reveal_stagger_ms: 0,
            share_confirm_ms: 0,
        }
    }

    pub fn feedback(&self) -> Duration {
        Duration::from_millis(self.feedback_delay_ms)
    }

    pub fn exit(&self) -> Duration {
        Duration::from_millis(self.exit_ms)
    }

    pub fn enter(&self) -> Duration {
        Duration::from_millis(self.enter_ms)
    }

    pub fn focus(&self) -> Duration {
        Duration::from_millis(self.focus_delay_ms)
    }

    pub fn scroll(&self) -> Duration {
        Duration::from_millis(self.scroll_delay_ms)
    }

    pub fn reveal(&self) -> Duration {
        Duration::from_millis(self.reveal_delay_ms)
    }

    /// Delay of the compatibility bar at `rank`, relative to the reveal start.
    pub fn stagger(&self, rank: usize) -> Duration {
        Duration::from_millis(self.reveal_stagger_ms.saturating_mul(rank as u64))
    }

    pub fn share_confirm(&self) -> Duration {
        Duration::from_millis(self.share_confirm_ms)
    }

    pub fn load_from_file<P: AsRef<Path>>(path: P) -> QfResult<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            QuizError::Config(format!(
                "Failed to read timings file '{}': {}",
                path.display(),
                e
            ))
        })?;
        Ok(serde_json::from_str(&content)?)
    }

    /// Copies onto `self` only the values the user typed on the command line.
    pub fn merge_from_cli(&mut self, cli: &EngineTimings, matches: &ArgMatches) {
        macro_rules! update_if_present {
            ($field:ident, $arg_name:expr) => {
                if matches.value_source($arg_name) == Some(ValueSource::CommandLine) {
                    self.$field = cli.$field;
                }
            };
        }

        update_if_present!(feedback_delay_ms, "feedback_delay_ms");
        update_if_present!(exit_ms, "exit_ms");
        update_if_present!(enter_ms, "enter_ms");
        update_if_present!(focus_delay_ms, "focus_delay_ms");
        update_if_present!(scroll_delay_ms, "scroll_delay_ms");
        update_if_present!(reveal_delay_ms, "reveal_delay_ms");
        update_if_present!(reveal_stagger_ms, "reveal_stagger_ms");
        update_if_present!(share_confirm_ms, "share_confirm_ms");
    }
}

/// What to do with options whose type has no declared result.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LoadPolicy {
    /// Reject the configuration at load time.
    #[default]
    Strict,
    /// Accept it; such answers still score but never show up as a result.
    Lenient,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineOptions {
    pub timings: EngineTimings,
    /// Suffix for the window title, `"{quiz title} | {site_name}"`.
    pub site_name: Option<String>,
}

impl Default for EngineOptions {
    fn default() -> Self {
        Self {
            timings: EngineTimings::default(),
            site_name: Some("QuizForge".to_string()),
        }
    }
}
