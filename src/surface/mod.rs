//! Presentation surface seen by the engine.
//!
//! Required methods cover the question and result areas. Everything with a
//! default body is an optional element: a surface that lacks it simply keeps
//! the default and the dependent feature is skipped.

pub mod recording;

use crate::error::ClipboardError;
use serde::Serialize;

pub use self::recording::{ClipboardMode, RecordingSurface, SurfaceEvent};

/// Labels by position; options past the fifth get none.
pub const OPTION_LABELS: [char; 5] = ['A', 'B', 'C', 'D', 'E'];

pub fn option_label(position: usize) -> Option<char> {
    OPTION_LABELS.get(position).copied()
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OptionView {
    pub position: usize,
    pub label: Option<char>,
    pub text: String,
    pub kind: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QuestionView {
    pub index: usize,
    pub total: usize,
    pub id: u32,
    pub text: String,
    pub options: Vec<OptionView>,
}

impl QuestionView {
    /// 1-based step, as narrated to the user.
    pub fn number(&self) -> usize {
        self.index + 1
    }

    pub fn heading(&self) -> String {
        format!("Question {} of {}", self.number(), self.total)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Progress {
    /// Share of the bar that is filled, `0.0..=1.0`.
    pub fraction: f64,
    /// 1-based step for accessibility narration.
    pub step: usize,
    pub total: usize,
}

impl Progress {
    /// Progress shown while question `index` is on screen: questions done so far.
    pub fn before_question(index: usize, total: usize) -> Self {
        let fraction = if total == 0 {
            0.0
        } else {
            index as f64 / total as f64
        };
        Self {
            fraction,
            step: index + 1,
            total,
        }
    }

    pub fn complete(total: usize) -> Self {
        Self {
            fraction: 1.0,
            step: total,
            total,
        }
    }

    pub fn percent(&self) -> f64 {
        self.fraction * 100.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum CardMotion {
    Still,
    Entering,
    Exiting,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum AuxSection {
    /// Placement between questions, every fourth question after the first.
    MidBanner,
    /// "More quizzes" block shown next to the results.
    MoreQuizzes,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CompatRow {
    pub kind: String,
    pub emoji: String,
    pub title: String,
    pub score: u32,
    pub percent: u32,
    pub is_winner: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResultView {
    pub kind: String,
    pub label: String,
    pub emoji: String,
    pub title: String,
    pub description: String,
    pub breakdown: Vec<CompatRow>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ScratchId(pub u64);

pub trait Surface {
    fn render_question(&mut self, view: &QuestionView);
    fn set_progress(&mut self, progress: &Progress);
    fn set_card_motion(&mut self, motion: CardMotion);
    fn mark_selected(&mut self, position: usize);
    fn disable_controls(&mut self);
    /// Question area visible, result area hidden.
    fn show_question_area(&mut self);
    /// Question area hidden, result area visible and filled.
    fn show_results(&mut self, view: &ResultView);

    fn set_title(&mut self, _title: &str) {}
    fn focus_control(&mut self, _position: usize) {}
    fn set_aux_visible(&mut self, _section: AuxSection, _visible: bool) {}
    fn reveal_bar(&mut self, _rank: usize, _percent: u32) {}
    fn scroll_to_results(&mut self) {}
    fn scroll_to_top(&mut self) {}
    fn set_share_confirmed(&mut self, _confirmed: bool) {}

    /// Address of the page the quiz runs on, used when no share URL is configured.
    fn current_url(&self) -> Option<String> {
        None
    }

    /// Primary clipboard path.
    fn write_clipboard(&mut self, _text: &str) -> Result<(), ClipboardError> {
        Err(ClipboardError::Unavailable)
    }

    /// Legacy path: stage the text in an offscreen, unfocusable scratch element...
    fn mount_scratch(&mut self, _text: &str) -> Result<ScratchId, ClipboardError> {
        Err(ClipboardError::Unavailable)
    }

    /// ...select its content and copy it...
    fn copy_scratch(&mut self, _id: ScratchId) -> Result<(), ClipboardError> {
        Err(ClipboardError::Unavailable)
    }

    /// ...and remove it again. Always called once a mount succeeded.
    fn unmount_scratch(&mut self, _id: ScratchId) {}
}
