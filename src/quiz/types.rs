use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

pub const DEFAULT_SHARE_TEXT: &str = "I just found out I am {emoji} {result}! Find your type at {url}";
pub const DEFAULT_RESULT_LABEL: &str = "Your personality type is";

/// Declarative description of a quiz. Read-only once loaded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizConfig {
    pub title: String,
    #[serde(default)]
    pub subtitle: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub share_text: String,
    #[serde(default)]
    pub share_url: String,

    // Display-only metadata
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub question_count: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub estimated_minutes: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result_label: Option<String>,

    pub questions: Vec<Question>,
    /// Declaration order is significant: it breaks score ties.
    pub results: IndexMap<String, ResultProfile>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Question {
    pub id: u32,
    pub text: String,
    pub options: Vec<AnswerOption>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnswerOption {
    pub text: String,
    #[serde(rename = "type")]
    pub kind: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultProfile {
    pub title: String,
    pub emoji: String,
    #[serde(default)]
    pub color: String,
    pub description: String,
}

impl QuizConfig {
    pub fn total_questions(&self) -> usize {
        self.questions.len()
    }

    pub fn result_label(&self) -> &str {
        self.result_label.as_deref().unwrap_or(DEFAULT_RESULT_LABEL)
    }

    pub fn share_template(&self) -> &str {
        if self.share_text.trim().is_empty() {
            DEFAULT_SHARE_TEXT
        } else {
            &self.share_text
        }
    }

    /// Option types that no declared result answers to, in first-seen order.
    pub fn undeclared_types(&self) -> Vec<&str> {
        let mut seen: Vec<&str> = Vec::new();
        for option in self.questions.iter().flat_map(|q| q.options.iter()) {
            let kind = option.kind.as_str();
            if !self.results.contains_key(kind) && !seen.contains(&kind) {
                seen.push(kind);
            }
        }
        seen
    }

    /// How many options across all questions point at each declared type.
    pub fn type_coverage(&self) -> IndexMap<&str, usize> {
        let mut coverage: IndexMap<&str, usize> =
            self.results.keys().map(|k| (k.as_str(), 0)).collect();
        for option in self.questions.iter().flat_map(|q| q.options.iter()) {
            if let Some(count) = coverage.get_mut(option.kind.as_str()) {
                *count += 1;
            }
        }
        coverage
    }
}
