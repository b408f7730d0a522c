use super::types::QuizConfig;
use crate::config::LoadPolicy;
use crate::error::{QfResult, QuizError};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use tracing::{debug, info, warn};

pub const MIN_OPTIONS: usize = 2;
pub const MAX_OPTIONS: usize = 5;

/// Parses a quiz file without validating it.
pub fn read_from_file<P: AsRef<Path>>(path: P) -> QfResult<QuizConfig> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(QuizError::MissingConfig(path.display().to_string()));
    }
    info!("📂 Loading quiz from {}", path.display());
    let file = File::open(path)?;
    Ok(serde_json::from_reader(BufReader::new(file))?)
}

pub fn load_from_file<P: AsRef<Path>>(path: P, policy: LoadPolicy) -> QfResult<QuizConfig> {
    let config = read_from_file(path)?;
    validate(&config, policy)?;
    Ok(config)
}

pub fn load_from_reader<R: Read>(reader: R, policy: LoadPolicy) -> QfResult<QuizConfig> {
    let config: QuizConfig = serde_json::from_reader(reader)?;
    validate(&config, policy)?;
    Ok(config)
}

pub fn load_from_str(content: &str, policy: LoadPolicy) -> QfResult<QuizConfig> {
    let config: QuizConfig = serde_json::from_str(content)?;
    validate(&config, policy)?;
    Ok(config)
}

/// Lists everything wrong with a configuration without failing.
///
/// Undeclared option types are only a problem under [`LoadPolicy::Strict`].
pub fn problems(config: &QuizConfig, policy: LoadPolicy) -> Vec<String> {
    let mut out = Vec::new();

    if config.results.is_empty() {
        out.push("no result types declared".to_string());
    }

    for (i, q) in config.questions.iter().enumerate() {
        let n = q.options.len();
        if !(MIN_OPTIONS..=MAX_OPTIONS).contains(&n) {
            out.push(format!(
                "question #{} (id {}) has {} options, expected {}..={}",
                i + 1,
                q.id,
                n,
                MIN_OPTIONS,
                MAX_OPTIONS
            ));
        }
    }

    if policy == LoadPolicy::Strict {
        for kind in config.undeclared_types() {
            out.push(format!("option type '{}' has no declared result", kind));
        }
    }

    out
}

pub fn validate(config: &QuizConfig, policy: LoadPolicy) -> QfResult<()> {
    let found = problems(config, policy);
    if !found.is_empty() {
        return Err(QuizError::Validation(found.join("; ")));
    }

    let undeclared = config.undeclared_types();
    if !undeclared.is_empty() {
        warn!(
            "Accepting undeclared option types {:?}; they score but never win a profile",
            undeclared
        );
    }

    debug!(
        "Validated '{}': {} questions, {} result types",
        config.title,
        config.total_questions(),
        config.results.len()
    );
    Ok(())
}

/// Reorders the questions deterministically for a given seed.
pub fn shuffle_questions(config: &mut QuizConfig, seed: u64) {
    let mut rng = fastrand::Rng::with_seed(seed);
    rng.shuffle(&mut config.questions);
    debug!("Shuffled {} questions with seed {}", config.questions.len(), seed);
}
