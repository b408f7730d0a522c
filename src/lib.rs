pub mod config;
pub mod engine;
pub mod error;
pub mod quiz;
pub mod quizzes;
pub mod surface;
// cmd, reports and the terminal surface live in the binary (main.rs).

pub use engine::{QuizEngine, Selection, ShareOutcome, Stage};
pub use error::{QfResult, QuizError};
