/// Keys the engine reacts to. Anything else is `Other` and ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyInput {
    Char(char),
    Other,
}

/// Digit keys that pick an answer.
pub const ANSWER_KEYS: [char; 4] = ['1', '2', '3', '4'];

/// Zero-based ordinal among the enabled controls for a pressed key.
pub fn answer_ordinal(key: KeyInput) -> Option<usize> {
    match key {
        KeyInput::Char(c) => ANSWER_KEYS.iter().position(|k| *k == c),
        KeyInput::Other => None,
    }
}

/// Position of the `ordinal`-th control that is still enabled.
pub fn nth_enabled(disabled: &[bool], ordinal: usize) -> Option<usize> {
    disabled
        .iter()
        .enumerate()
        .filter(|(_, off)| !**off)
        .map(|(pos, _)| pos)
        .nth(ordinal)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn digits_map_to_ordinals() {
        assert_eq!(answer_ordinal(KeyInput::Char('1')), Some(0));
        assert_eq!(answer_ordinal(KeyInput::Char('4')), Some(3));
        assert_eq!(answer_ordinal(KeyInput::Char('5')), None);
        assert_eq!(answer_ordinal(KeyInput::Other), None);
    }

    #[test]
    fn skips_disabled_controls() {
        let disabled = [true, false, false, true];
        assert_eq!(nth_enabled(&disabled, 0), Some(1));
        assert_eq!(nth_enabled(&disabled, 1), Some(2));
        assert_eq!(nth_enabled(&disabled, 2), None);
    }
}
