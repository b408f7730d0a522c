use super::{
    AuxSection, CardMotion, Progress, QuestionView, ResultView, ScratchId, Surface,
};
use crate::error::ClipboardError;
use std::collections::HashMap;

/// How the recording surface's clipboard paths behave.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ClipboardMode {
    #[default]
    Works,
    /// Primary path fails, the scratch fallback works.
    PrimaryFails,
    /// Neither path works.
    Broken,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SurfaceEvent {
    Title(String),
    Question(usize),
    Progress(Progress),
    Motion(CardMotion),
    Selected(usize),
    ControlsDisabled,
    Focus(usize),
    Aux(AuxSection, bool),
    QuestionArea,
    Results(String),
    RevealBar(usize, u32),
    ScrollToResults,
    ScrollToTop,
    ShareConfirmed(bool),
    Clipboard(String),
    ScratchMounted(ScratchId),
    ScratchUnmounted(ScratchId),
}

/// Headless surface that keeps the latest visible state and a log of calls.
#[derive(Debug, Default)]
pub struct RecordingSurface {
    pub events: Vec<SurfaceEvent>,
    pub title: Option<String>,
    pub question: Option<QuestionView>,
    pub progress: Option<Progress>,
    pub motion: Option<CardMotion>,
    pub selected: Option<usize>,
    pub controls_disabled: bool,
    pub focused: Option<usize>,
    pub aux: HashMap<AuxSection, bool>,
    pub question_area_visible: bool,
    pub result: Option<ResultView>,
    pub revealed_bars: Vec<(usize, u32)>,
    pub share_confirmed: bool,
    pub clipboard: Option<String>,
    pub clipboard_mode: ClipboardMode,
    pub url: Option<String>,
    pub live_scratches: Vec<(ScratchId, String)>,
    next_scratch: u64,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_clipboard(mode: ClipboardMode) -> Self {
        Self {
            clipboard_mode: mode,
            ..Self::default()
        }
    }

    pub fn with_url(mut self, url: &str) -> Self {
        self.url = Some(url.to_string());
        self
    }

    pub fn results_visible(&self) -> bool {
        self.result.is_some() && !self.question_area_visible
    }

    pub fn aux_visible(&self, section: AuxSection) -> bool {
        self.aux.get(&section).copied().unwrap_or(false)
    }

    pub fn count(&self, pred: impl Fn(&SurfaceEvent) -> bool) -> usize {
        self.events.iter().filter(|e| pred(*e)).count()
    }
}

impl Surface for RecordingSurface {
    fn render_question(&mut self, view: &QuestionView) {
        self.events.push(SurfaceEvent::Question(view.index));
        self.question = Some(view.clone());
        self.selected = None;
        self.controls_disabled = false;
        self.focused = None;
    }

    fn set_progress(&mut self, progress: &Progress) {
        self.events.push(SurfaceEvent::Progress(*progress));
        self.progress = Some(*progress);
    }

    fn set_card_motion(&mut self, motion: CardMotion) {
        self.events.push(SurfaceEvent::Motion(motion));
        self.motion = Some(motion);
    }

    fn mark_selected(&mut self, position: usize) {
        self.events.push(SurfaceEvent::Selected(position));
        self.selected = Some(position);
    }

    fn disable_controls(&mut self) {
        self.events.push(SurfaceEvent::ControlsDisabled);
        self.controls_disabled = true;
    }

    fn show_question_area(&mut self) {
        self.events.push(SurfaceEvent::QuestionArea);
        self.question_area_visible = true;
        self.result = None;
        self.revealed_bars.clear();
    }

    fn show_results(&mut self, view: &ResultView) {
        self.events.push(SurfaceEvent::Results(view.kind.clone()));
        self.question_area_visible = false;
        self.result = Some(view.clone());
        self.revealed_bars.clear();
    }

    fn set_title(&mut self, title: &str) {
        self.events.push(SurfaceEvent::Title(title.to_string()));
        self.title = Some(title.to_string());
    }

    fn focus_control(&mut self, position: usize) {
        self.events.push(SurfaceEvent::Focus(position));
        self.focused = Some(position);
    }

    fn set_aux_visible(&mut self, section: AuxSection, visible: bool) {
        self.events.push(SurfaceEvent::Aux(section, visible));
        self.aux.insert(section, visible);
    }

    fn reveal_bar(&mut self, rank: usize, percent: u32) {
        self.events.push(SurfaceEvent::RevealBar(rank, percent));
        self.revealed_bars.push((rank, percent));
    }

    fn scroll_to_results(&mut self) {
        self.events.push(SurfaceEvent::ScrollToResults);
    }

    fn scroll_to_top(&mut self) {
        self.events.push(SurfaceEvent::ScrollToTop);
    }

    fn set_share_confirmed(&mut self, confirmed: bool) {
        self.events.push(SurfaceEvent::ShareConfirmed(confirmed));
        self.share_confirmed = confirmed;
    }

    fn current_url(&self) -> Option<String> {
        self.url.clone()
    }

    fn write_clipboard(&mut self, text: &str) -> Result<(), ClipboardError> {
        match self.clipboard_mode {
            ClipboardMode::Works => {
                self.events.push(SurfaceEvent::Clipboard(text.to_string()));
                self.clipboard = Some(text.to_string());
                Ok(())
            }
            ClipboardMode::PrimaryFails | ClipboardMode::Broken => {
                Err(ClipboardError::Rejected("permission denied".to_string()))
            }
        }
    }

    fn mount_scratch(&mut self, text: &str) -> Result<ScratchId, ClipboardError> {
        let id = ScratchId(self.next_scratch);
        self.next_scratch += 1;
        self.events.push(SurfaceEvent::ScratchMounted(id));
        self.live_scratches.push((id, text.to_string()));
        Ok(id)
    }

    fn copy_scratch(&mut self, id: ScratchId) -> Result<(), ClipboardError> {
        if self.clipboard_mode == ClipboardMode::Broken {
            return Err(ClipboardError::Rejected("copy command refused".to_string()));
        }
        let text = self
            .live_scratches
            .iter()
            .find(|(s, _)| *s == id)
            .map(|(_, t)| t.clone())
            .ok_or(ClipboardError::Unavailable)?;
        self.events.push(SurfaceEvent::Clipboard(text.clone()));
        self.clipboard = Some(text);
        Ok(())
    }

    fn unmount_scratch(&mut self, id: ScratchId) {
        self.events.push(SurfaceEvent::ScratchUnmounted(id));
        self.live_scratches.retain(|(s, _)| *s != id);
    }
}
