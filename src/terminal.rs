//! Terminal surface for `quizforge play`.
//!
//! The surface keeps a small model of what should be on screen and redraws
//! everything when it changes. Clipboard goes through the platform copy
//! command first and falls back to an OSC 52 escape sequence.

use base64::{engine::general_purpose::STANDARD, Engine as _};
use crossterm::{
    cursor,
    style::{Attribute, Color, Print, ResetColor, SetAttribute, SetForegroundColor},
    terminal::{self, ClearType},
    QueueableCommand,
};
use quizforge::error::ClipboardError;
use quizforge::surface::{
    AuxSection, CardMotion, Progress, QuestionView, ResultView, ScratchId, Surface,
};
use std::collections::HashMap;
use std::io::{self, Stdout, Write};
use std::process::{Child, Command, ExitStatus, Stdio};
use tracing::debug;

const BAR_WIDTH: usize = 30;

/// Raw mode plus alternate screen, restored on drop.
pub struct TerminalGuard;

impl TerminalGuard {
    pub fn enter() -> io::Result<Self> {
        terminal::enable_raw_mode()?;
        let mut out = io::stdout();
        out.queue(terminal::EnterAlternateScreen)?
            .queue(cursor::Hide)?;
        out.flush()?;
        Ok(Self)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let mut out = io::stdout();
        let _ = out
            .queue(cursor::Show)
            .and_then(|o| o.queue(terminal::LeaveAlternateScreen))
            .and_then(|o| o.flush());
        let _ = terminal::disable_raw_mode();
    }
}

pub struct TerminalSurface {
    out: Stdout,
    dirty: bool,
    title: String,
    question: Option<QuestionView>,
    progress: Option<Progress>,
    motion: CardMotion,
    selected: Option<usize>,
    disabled: bool,
    focused: Option<usize>,
    aux: HashMap<AuxSection, bool>,
    result: Option<ResultView>,
    bars: Vec<Option<u32>>,
    share_confirmed: bool,
    share_url: Option<String>,
    scratch: HashMap<u64, String>,
    next_scratch: u64,
}

impl TerminalSurface {
    pub fn new(share_url: Option<String>) -> Self {
        Self {
            out: io::stdout(),
            dirty: true,
            title: String::new(),
            question: None,
            progress: None,
            motion: CardMotion::Still,
            selected: None,
            disabled: false,
            focused: None,
            aux: HashMap::new(),
            result: None,
            bars: Vec::new(),
            share_confirmed: false,
            share_url,
            scratch: HashMap::new(),
            next_scratch: 0,
        }
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn draw(&mut self) -> io::Result<()> {
        self.dirty = false;
        self.out
            .queue(terminal::Clear(ClearType::All))?
            .queue(cursor::MoveTo(0, 0))?;

        let title = self.title.clone();
        self.line(&title, Some(Color::Cyan), true)?;
        self.line("", None, false)?;

        if let Some(result) = self.result.clone() {
            self.draw_result(&result)?;
        } else if let Some(question) = self.question.clone() {
            self.draw_question(&question)?;
        }

        self.line("", None, false)?;
        let help = if self.result.is_some() {
            "[s] share   [r] restart   [q] quit"
        } else {
            "[1-4] answer   [r] restart   [q] quit"
        };
        self.line(help, Some(Color::DarkGrey), false)?;
        self.out.flush()
    }

    fn line(&mut self, text: &str, color: Option<Color>, bold: bool) -> io::Result<()> {
        if let Some(c) = color {
            self.out.queue(SetForegroundColor(c))?;
        }
        if bold {
            self.out.queue(SetAttribute(Attribute::Bold))?;
        }
        self.out
            .queue(Print(text))?
            .queue(SetAttribute(Attribute::Reset))?
            .queue(ResetColor)?
            .queue(Print("\r\n"))?;
        Ok(())
    }

    fn draw_question(&mut self, q: &QuestionView) -> io::Result<()> {
        if let Some(p) = self.progress {
            let bar = render_bar(p.fraction, BAR_WIDTH);
            self.line(&format!("{} {}/{}", bar, p.step, p.total), Some(Color::Green), false)?;
        }
        let heading_color = match self.motion {
            CardMotion::Exiting => Color::DarkGrey,
            CardMotion::Entering => Color::Yellow,
            CardMotion::Still => Color::White,
        };
        self.line(&q.heading(), Some(heading_color), false)?;
        self.line(&q.text, None, true)?;
        self.line("", None, false)?;

        for opt in &q.options {
            let label = opt.label.map(|c| c.to_string()).unwrap_or_else(|| " ".into());
            let marker = if self.focused == Some(opt.position) && !self.disabled {
                '>'
            } else {
                ' '
            };
            let text = format!("{} {}) {}", marker, label, opt.text);
            let (color, bold) = if self.selected == Some(opt.position) {
                (Some(Color::Green), true)
            } else if self.disabled {
                (Some(Color::DarkGrey), false)
            } else {
                (None, false)
            };
            self.line(&text, color, bold)?;
        }

        if self.aux.get(&AuxSection::MidBanner).copied().unwrap_or(false) {
            self.line("", None, false)?;
            self.line("-- take a breath, you are doing great --", Some(Color::Magenta), false)?;
        }
        Ok(())
    }

    fn draw_result(&mut self, r: &ResultView) -> io::Result<()> {
        self.line(&r.label, Some(Color::DarkGrey), false)?;
        self.line(&format!("{} {}", r.emoji, r.title), Some(Color::Cyan), true)?;
        self.line("", None, false)?;
        for chunk in wrap(&r.description, 72) {
            self.line(&chunk, None, false)?;
        }
        self.line("", None, false)?;

        for (rank, row) in r.breakdown.iter().enumerate() {
            let shown = self.bars.get(rank).copied().flatten().unwrap_or(0);
            let bar = render_bar(shown as f64 / 100.0, BAR_WIDTH);
            let star = if row.is_winner { " ✦" } else { "" };
            let text = format!("{} {:<28} {} {:>3}%", row.emoji, format!("{}{}", row.title, star), bar, row.percent);
            let color = if row.is_winner { Some(Color::Green) } else { None };
            self.line(&text, color, row.is_winner)?;
        }

        if self.share_confirmed {
            self.line("", None, false)?;
            self.line("✓ Copied to clipboard!", Some(Color::Green), true)?;
        }
        if self.aux.get(&AuxSection::MoreQuizzes).copied().unwrap_or(false) {
            self.line("", None, false)?;
            self.line("More quizzes: quizforge play --builtin <name>", Some(Color::DarkGrey), false)?;
        }
        Ok(())
    }
}

fn render_bar(fraction: f64, width: usize) -> String {
    let filled = ((fraction.clamp(0.0, 1.0)) * width as f64).round() as usize;
    format!("[{}{}]", "#".repeat(filled), "-".repeat(width - filled))
}

fn wrap(text: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();
    for word in text.split_whitespace() {
        if !current.is_empty() && current.len() + word.len() + 1 > width {
            lines.push(std::mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(word);
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

/// Writes `text` to the child's stdin and reaps it, even when the write fails.
fn feed_and_wait(mut child: Child, text: &str) -> Result<ExitStatus, ClipboardError> {
    // stdin must close before wait, or the copy tool never sees EOF
    let written = match child.stdin.take() {
        Some(mut stdin) => stdin.write_all(text.as_bytes()),
        None => Ok(()),
    };
    if let Err(e) = written {
        debug!("Copy command stopped reading: {}", e);
        // Fails only when the child already exited; wait reaps it either way
        let _ = child.kill();
        child.wait()?;
        return Err(e.into());
    }
    Ok(child.wait()?)
}

const NO_ARGS: &[&str] = &[];
const XCLIP_ARGS: &[&str] = &["-selection", "clipboard"];

fn system_copy_command() -> Option<(&'static str, &'static [&'static str])> {
    if cfg!(target_os = "macos") {
        Some(("pbcopy", NO_ARGS))
    } else if cfg!(target_os = "windows") {
        Some(("clip", NO_ARGS))
    } else if std::env::var_os("WAYLAND_DISPLAY").is_some() {
        Some(("wl-copy", NO_ARGS))
    } else if std::env::var_os("DISPLAY").is_some() {
        Some(("xclip", XCLIP_ARGS))
    } else {
        None
    }
}

impl Surface for TerminalSurface {
    fn render_question(&mut self, view: &QuestionView) {
        self.question = Some(view.clone());
        self.selected = None;
        self.disabled = false;
        self.focused = None;
        self.dirty = true;
    }

    fn set_progress(&mut self, progress: &Progress) {
        self.progress = Some(*progress);
        self.dirty = true;
    }

    fn set_card_motion(&mut self, motion: CardMotion) {
        self.motion = motion;
        self.dirty = true;
    }

    fn mark_selected(&mut self, position: usize) {
        self.selected = Some(position);
        self.dirty = true;
    }

    fn disable_controls(&mut self) {
        self.disabled = true;
        self.dirty = true;
    }

    fn show_question_area(&mut self) {
        self.result = None;
        self.bars.clear();
        self.dirty = true;
    }

    fn show_results(&mut self, view: &ResultView) {
        self.bars = vec![None; view.breakdown.len()];
        self.result = Some(view.clone());
        self.dirty = true;
    }

    fn set_title(&mut self, title: &str) {
        self.title = title.to_string();
        if let Err(e) = self.out.queue(terminal::SetTitle(title)) {
            debug!("Could not set terminal title: {}", e);
        }
        self.dirty = true;
    }

    fn focus_control(&mut self, position: usize) {
        self.focused = Some(position);
        self.dirty = true;
    }

    fn set_aux_visible(&mut self, section: AuxSection, visible: bool) {
        self.aux.insert(section, visible);
        self.dirty = true;
    }

    fn reveal_bar(&mut self, rank: usize, percent: u32) {
        if let Some(slot) = self.bars.get_mut(rank) {
            *slot = Some(percent);
            self.dirty = true;
        }
    }

    fn set_share_confirmed(&mut self, confirmed: bool) {
        self.share_confirmed = confirmed;
        self.dirty = true;
    }

    fn current_url(&self) -> Option<String> {
        self.share_url.clone()
    }

    fn write_clipboard(&mut self, text: &str) -> Result<(), ClipboardError> {
        let (program, args) = system_copy_command().ok_or(ClipboardError::Unavailable)?;
        let mut child = Command::new(program)
            .args(args)
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()?;
        let status = feed_and_wait(child, text)?;
        if status.success() {
            Ok(())
        } else {
            Err(ClipboardError::Rejected(format!("{} exited with {}", program, status)))
        }
    }

    fn mount_scratch(&mut self, text: &str) -> Result<ScratchId, ClipboardError> {
        let id = self.next_scratch;
        self.next_scratch += 1;
        self.scratch.insert(id, text.to_string());
        Ok(ScratchId(id))
    }

    fn copy_scratch(&mut self, id: ScratchId) -> Result<(), ClipboardError> {
        let text = self.scratch.get(&id.0).ok_or(ClipboardError::Unavailable)?;
        let seq = format!("\x1b]52;c;{}\x07", STANDARD.encode(text.as_bytes()));
        self.out.write_all(seq.as_bytes())?;
        self.out.flush()?;
        Ok(())
    }

    fn unmount_scratch(&mut self, id: ScratchId) {
        self.scratch.remove(&id.0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bar_is_fixed_width() {
        assert_eq!(render_bar(0.0, 4), "[----]");
        assert_eq!(render_bar(0.5, 4), "[##--]");
        assert_eq!(render_bar(2.0, 4), "[####]");
    }

    #[cfg(unix)]
    #[test]
    fn feed_and_wait_pipes_text() {
        let child = Command::new("cat")
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .spawn()
            .unwrap();
        let status = feed_and_wait(child, "hello").unwrap();
        assert!(status.success());
    }

    #[cfg(unix)]
    #[test]
    fn feed_and_wait_reaps_child_on_broken_pipe() {
        // `true` exits without reading; a payload larger than the pipe buffer
        // makes the write fail
        let child = Command::new("true").stdin(Stdio::piped()).spawn().unwrap();
        let pid = child.id();
        let payload = "x".repeat(1 << 20);
        let err = feed_and_wait(child, &payload).unwrap_err();
        assert!(matches!(err, ClipboardError::Io(_)));
        if cfg!(target_os = "linux") {
            // A zombie would still have its /proc entry
            assert!(!std::path::Path::new(&format!("/proc/{}", pid)).exists());
        }
    }

    #[test]
    fn wrap_respects_width() {
        let lines = wrap("aa bb cc dd", 5);
        assert_eq!(lines, vec!["aa bb", "cc dd"]);
    }
}
