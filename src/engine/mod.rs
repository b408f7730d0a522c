pub mod keyboard;
pub mod schedule;
pub mod scores;
pub mod share;

use self::keyboard::{answer_ordinal, nth_enabled, KeyInput};
use self::schedule::{Scheduler, TaskHandle};
use self::scores::ScoreBoard;
use self::share::{copy_to_clipboard, fill_template, CopyMethod};
use crate::config::{EngineOptions, EngineTimings};
use crate::quiz::QuizConfig;
use crate::surface::{
    option_label, AuxSection, CardMotion, CompatRow, OptionView, Progress, QuestionView,
    ResultView, Surface,
};
use indexmap::IndexMap;
use std::time::Duration;
use tracing::{debug, error, info, warn};

pub use self::scores::CompatEntry;

/// Where the engine is in the answer cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// A question is on screen and accepts input.
    Question,
    /// An answer was registered; the selection highlight is showing.
    Feedback,
    /// The card is playing its exit animation.
    Exiting,
    /// The result area is showing.
    Results,
}

/// Timed steps, queued on the engine's scheduler.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    EnterSettled,
    FocusFirst,
    BeginExit,
    Advance,
    ScrollToResults,
    RevealBars,
    RevealBar { rank: usize, percent: u32 },
    RevertShare,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection {
    Accepted { kind: String, score: u32 },
    /// A transition is in flight; the input was dropped.
    Locked,
    /// No question to answer, or no such control.
    Ignored,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShareOutcome {
    pub text: String,
    /// `None` when neither clipboard path worked.
    pub copied: Option<CopyMethod>,
}

pub struct QuizEngine<S: Surface> {
    config: QuizConfig,
    surface: S,
    timings: EngineTimings,

    current: usize,
    scores: ScoreBoard,
    stage: Stage,
    // Per-control disabled flags for the question on screen
    disabled: Vec<bool>,

    scheduler: Scheduler<Phase>,
    winner: Option<String>,
    result: Option<ResultView>,
    share_revert: Option<TaskHandle>,
}

impl<S: Surface> QuizEngine<S> {
    /// Builds the engine and renders the first question without animation.
    pub fn start(config: QuizConfig, mut surface: S, options: EngineOptions) -> Self {
        let title = match &options.site_name {
            Some(site) if !config.title.is_empty() => format!("{} | {}", config.title, site),
            _ => config.title.clone(),
        };
        if !title.is_empty() {
            surface.set_title(&title);
        }

        info!(
            "🚀 Starting quiz '{}' ({} questions, {} result types)",
            config.title,
            config.total_questions(),
            config.results.len()
        );

        let scores = ScoreBoard::for_config(&config);
        let mut engine = Self {
            config,
            surface,
            timings: options.timings,
            current: 0,
            scores,
            stage: Stage::Question,
            disabled: Vec::new(),
            scheduler: Scheduler::new(),
            winner: None,
            result: None,
            share_revert: None,
        };
        engine.surface.show_question_area();
        engine.render(0, false);
        engine
    }

    // --- Read-only accessors ---

    pub fn config(&self) -> &QuizConfig {
        &self.config
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn into_surface(self) -> S {
        self.surface
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn total_questions(&self) -> usize {
        self.config.total_questions()
    }

    /// Copy of the current scores, for callers that feed analytics.
    pub fn scores(&self) -> IndexMap<String, u32> {
        self.scores.snapshot()
    }

    pub fn score_board(&self) -> &ScoreBoard {
        &self.scores
    }

    pub fn stage(&self) -> Stage {
        self.stage
    }

    pub fn is_transitioning(&self) -> bool {
        matches!(self.stage, Stage::Feedback | Stage::Exiting)
    }

    pub fn is_finished(&self) -> bool {
        self.stage == Stage::Results
    }

    pub fn winner(&self) -> Option<&str> {
        self.winner.as_deref()
    }

    pub fn result(&self) -> Option<&ResultView> {
        self.result.as_ref()
    }

    pub fn pending_phases(&self) -> usize {
        self.scheduler.len()
    }

    /// Time until the next timed phase is due.
    pub fn next_deadline(&self) -> Option<Duration> {
        self.scheduler.next_deadline()
    }

    // --- Input ---

    /// Registers the answer at `position` of the question on screen.
    pub fn select_option(&mut self, position: usize) -> Selection {
        match self.stage {
            Stage::Feedback | Stage::Exiting => {
                debug!("Answer at position {} dropped: transition in flight", position);
                return Selection::Locked;
            }
            Stage::Results => return Selection::Ignored,
            Stage::Question => {}
        }

        let Some(question) = self.config.questions.get(self.current) else {
            return Selection::Ignored;
        };
        let Some(option) = question.options.get(position) else {
            return Selection::Ignored;
        };
        if self.disabled.get(position).copied().unwrap_or(true) {
            return Selection::Ignored;
        }
        let kind = option.kind.clone();

        self.stage = Stage::Feedback;
        self.surface.mark_selected(position);
        self.disabled.iter_mut().for_each(|d| *d = true);
        self.surface.disable_controls();

        if !self.config.results.contains_key(&kind) {
            warn!("Option type '{}' has no declared result; scoring it anyway", kind);
        }
        let score = self.scores.record(&kind);
        debug!(
            "Q{} answered with '{}' (now {})",
            self.current + 1,
            kind,
            score
        );

        self.scheduler.schedule(self.timings.feedback(), Phase::BeginExit);
        Selection::Accepted { kind, score }
    }

    /// Digit keys 1-4 pick the matching enabled control.
    pub fn handle_key(&mut self, key: KeyInput) -> Selection {
        if self.is_transitioning() {
            return Selection::Locked;
        }
        if self.stage != Stage::Question {
            return Selection::Ignored;
        }
        let Some(ordinal) = answer_ordinal(key) else {
            return Selection::Ignored;
        };
        match nth_enabled(&self.disabled, ordinal) {
            Some(position) => self.select_option(position),
            None => Selection::Ignored,
        }
    }

    /// Builds the share text for the winner and copies it to the clipboard.
    ///
    /// Returns `None` before the results are showing.
    pub fn share(&mut self) -> Option<ShareOutcome> {
        if self.stage != Stage::Results {
            return None;
        }
        let winner = self.winner.as_deref()?;
        let profile = self.config.results.get(winner)?;

        let url = if self.config.share_url.is_empty() {
            self.surface.current_url().unwrap_or_default()
        } else {
            self.config.share_url.clone()
        };
        let text = fill_template(
            self.config.share_template(),
            &profile.title,
            &profile.emoji,
            &url,
        );

        let copied = copy_to_clipboard(&mut self.surface, &text);
        if copied.is_some() {
            if let Some(h) = self.share_revert.take() {
                self.scheduler.cancel(h);
            }
            self.surface.set_share_confirmed(true);
            self.share_revert = Some(
                self.scheduler
                    .schedule(self.timings.share_confirm(), Phase::RevertShare),
            );
        }

        Some(ShareOutcome { text, copied })
    }

    /// Back to the first question with all scores at zero.
    ///
    /// Every pending phase is cancelled, so a transition that was in flight
    /// never lands on the fresh state.
    pub fn reset(&mut self) {
        let dropped = self.scheduler.cancel_all();
        if dropped > 0 {
            debug!("Reset cancelled {} pending phases", dropped);
        }
        if self.share_revert.take().is_some() {
            self.surface.set_share_confirmed(false);
        }

        self.current = 0;
        self.stage = Stage::Question;
        self.scores.reset();
        self.winner = None;
        self.result = None;

        // Cancelled phases carried the motion cleanup
        self.surface.set_card_motion(CardMotion::Still);
        self.surface.show_question_area();
        self.surface.set_aux_visible(AuxSection::MoreQuizzes, false);
        self.render(0, false);
        self.surface.scroll_to_top();
        info!("🔄 Quiz reset");
    }

    // --- Time ---

    /// Advances the clock by `dt`, running every phase that comes due.
    pub fn tick(&mut self, dt: Duration) {
        let target = self.scheduler.now() + dt;
        while let Some(phase) = self.scheduler.advance_to(target) {
            self.run_phase(phase);
        }
    }

    /// Runs the clock until nothing is pending.
    pub fn settle(&mut self) {
        while let Some(wait) = self.scheduler.next_deadline() {
            self.tick(wait);
        }
    }

    fn run_phase(&mut self, phase: Phase) {
        match phase {
            Phase::EnterSettled => {
                if self.stage == Stage::Question {
                    self.surface.set_card_motion(CardMotion::Still);
                }
            }
            Phase::FocusFirst => {
                if self.stage == Stage::Question {
                    if let Some(first) = nth_enabled(&self.disabled, 0) {
                        self.surface.focus_control(first);
                    }
                }
            }
            Phase::BeginExit => {
                self.stage = Stage::Exiting;
                self.surface.set_card_motion(CardMotion::Exiting);
                self.scheduler.schedule(self.timings.exit(), Phase::Advance);
            }
            Phase::Advance => {
                self.surface.set_card_motion(CardMotion::Still);
                self.current += 1;
                self.stage = Stage::Question;
                if self.current >= self.total_questions() {
                    self.show_results();
                } else {
                    self.render(self.current, true);
                }
            }
            Phase::ScrollToResults => self.surface.scroll_to_results(),
            Phase::RevealBars => {
                let bars: Vec<u32> = self
                    .result
                    .as_ref()
                    .map(|r| r.breakdown.iter().map(|row| row.percent).collect())
                    .unwrap_or_default();
                for (rank, percent) in bars.into_iter().enumerate() {
                    self.scheduler
                        .schedule(self.timings.stagger(rank), Phase::RevealBar { rank, percent });
                }
            }
            Phase::RevealBar { rank, percent } => self.surface.reveal_bar(rank, percent),
            Phase::RevertShare => {
                self.share_revert = None;
                self.surface.set_share_confirmed(false);
            }
        }
    }

    // --- Rendering ---

    fn render(&mut self, index: usize, animate: bool) {
        let total = self.total_questions();
        let Some(question) = self.config.questions.get(index) else {
            self.show_results();
            return;
        };

        let view = QuestionView {
            index,
            total,
            id: question.id,
            text: question.text.clone(),
            options: question
                .options
                .iter()
                .enumerate()
                .map(|(position, opt)| OptionView {
                    position,
                    label: option_label(position),
                    text: opt.text.clone(),
                    kind: opt.kind.clone(),
                })
                .collect(),
        };
        self.disabled = vec![false; view.options.len()];

        self.surface
            .set_progress(&Progress::before_question(index, total));
        self.surface.render_question(&view);

        if animate {
            self.surface.set_card_motion(CardMotion::Entering);
            self.scheduler
                .schedule(self.timings.enter(), Phase::EnterSettled);
        }
        self.scheduler
            .schedule(self.timings.focus(), Phase::FocusFirst);

        self.surface
            .set_aux_visible(AuxSection::MidBanner, index > 0 && index % 4 == 0);
    }

    fn resolve_winner(&self) -> Option<String> {
        let leader = self.scores.leader()?;
        if self.config.results.contains_key(leader) {
            return Some(leader.to_string());
        }
        let fallback = self.scores.declared_leader(&self.config)?;
        warn!(
            "Top score belongs to undeclared type '{}'; showing '{}' instead",
            leader, fallback
        );
        Some(fallback.to_string())
    }

    fn show_results(&mut self) {
        let Some(winner) = self.resolve_winner() else {
            error!("No result types declared; cannot show results");
            return;
        };
        let Some(profile) = self.config.results.get(&winner) else {
            return;
        };

        let breakdown: Vec<CompatRow> = self
            .scores
            .breakdown(&self.config, &winner)
            .into_iter()
            .filter_map(|entry| {
                let p = self.config.results.get(&entry.kind)?;
                Some(CompatRow {
                    emoji: p.emoji.clone(),
                    title: p.title.clone(),
                    kind: entry.kind,
                    score: entry.score,
                    percent: entry.percent,
                    is_winner: entry.is_winner,
                })
            })
            .collect();

        let view = ResultView {
            kind: winner.clone(),
            label: self.config.result_label().to_string(),
            emoji: profile.emoji.clone(),
            title: profile.title.clone(),
            description: profile.description.clone(),
            breakdown,
        };

        self.stage = Stage::Results;
        self.surface.show_results(&view);
        self.surface
            .set_progress(&Progress::complete(self.total_questions()));
        self.surface.set_aux_visible(AuxSection::MoreQuizzes, true);

        self.scheduler
            .schedule(self.timings.scroll(), Phase::ScrollToResults);
        self.scheduler
            .schedule(self.timings.reveal(), Phase::RevealBars);

        info!(
            "🏁 Finished: {} {} ({} of {} points)",
            view.emoji,
            view.title,
            self.scores.get(&winner),
            self.scores.total()
        );
        self.winner = Some(winner);
        self.result = Some(view);
    }
}
