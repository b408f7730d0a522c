use crate::config::LoadPolicy;
use crate::error::QfResult;
use crate::quiz::{loader, QuizConfig};
use strum::IntoEnumIterator;
use strum_macros::{Display, EnumIter, EnumString};

/// Quizzes shipped inside the binary.
#[derive(Debug, Clone, Copy, EnumIter, EnumString, Display, PartialEq, Eq, Hash)]
#[strum(serialize_all = "snake_case")]
pub enum KnownQuiz {
    Personality,
}

impl KnownQuiz {
    pub fn get_str(&self) -> &'static str {
        match self {
            Self::Personality => include_str!("../data/quizzes/personality.json"),
        }
    }

    pub fn load(&self) -> QfResult<QuizConfig> {
        loader::load_from_str(self.get_str(), LoadPolicy::Strict)
    }
}

pub fn get_all_quizzes() -> Vec<KnownQuiz> {
    KnownQuiz::iter().collect()
}
