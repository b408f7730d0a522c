use crate::error::ClipboardError;
use crate::surface::{ScratchId, Surface};
use tracing::{debug, warn};

pub const RESULT_PLACEHOLDER: &str = "{result}";
pub const EMOJI_PLACEHOLDER: &str = "{emoji}";
pub const URL_PLACEHOLDER: &str = "{url}";

/// Substitutes the first occurrence of each placeholder, in the order
/// result, emoji, url. Later occurrences stay literal.
pub fn fill_template(template: &str, title: &str, emoji: &str, url: &str) -> String {
    template
        .replacen(RESULT_PLACEHOLDER, title, 1)
        .replacen(EMOJI_PLACEHOLDER, emoji, 1)
        .replacen(URL_PLACEHOLDER, url, 1)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CopyMethod {
    Primary,
    Fallback,
}

/// Scratch element mounted on a surface; unmounted when dropped.
struct ScratchGuard<'a, S: Surface + ?Sized> {
    surface: &'a mut S,
    id: ScratchId,
}

impl<'a, S: Surface + ?Sized> ScratchGuard<'a, S> {
    fn mount(surface: &'a mut S, text: &str) -> Result<Self, ClipboardError> {
        let id = surface.mount_scratch(text)?;
        Ok(Self { surface, id })
    }

    fn copy(&mut self) -> Result<(), ClipboardError> {
        self.surface.copy_scratch(self.id)
    }
}

impl<S: Surface + ?Sized> Drop for ScratchGuard<'_, S> {
    fn drop(&mut self) {
        self.surface.unmount_scratch(self.id);
    }
}

fn fallback_copy<S: Surface + ?Sized>(surface: &mut S, text: &str) -> Result<(), ClipboardError> {
    let mut scratch = ScratchGuard::mount(surface, text)?;
    scratch.copy()
}

/// Puts `text` on the clipboard, primary path first.
///
/// Returns `None` when both paths failed; the failure is logged only.
pub fn copy_to_clipboard<S: Surface + ?Sized>(surface: &mut S, text: &str) -> Option<CopyMethod> {
    match surface.write_clipboard(text) {
        Ok(()) => return Some(CopyMethod::Primary),
        Err(e) => debug!("Primary clipboard failed ({}), trying fallback", e),
    }

    match fallback_copy(surface, text) {
        Ok(()) => Some(CopyMethod::Fallback),
        Err(e) => {
            warn!("Could not copy share text to the clipboard: {}", e);
            None
        }
    }
}
