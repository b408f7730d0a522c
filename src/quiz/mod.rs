pub mod loader;
pub mod types;

pub use self::types::{AnswerOption, Question, QuizConfig, ResultProfile};
