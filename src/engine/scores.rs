use crate::quiz::QuizConfig;
use indexmap::IndexMap;
use serde::Serialize;

/// Per-type answer counts, in declaration order.
///
/// Types that show up in answers without having been declared are appended
/// after the declared ones the first time they score.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ScoreBoard {
    counts: IndexMap<String, u32>,
}

/// One row of the compatibility breakdown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CompatEntry {
    pub kind: String,
    pub score: u32,
    pub percent: u32,
    pub is_winner: bool,
}

impl ScoreBoard {
    pub fn for_config(config: &QuizConfig) -> Self {
        Self {
            counts: config.results.keys().map(|k| (k.clone(), 0)).collect(),
        }
    }

    pub fn record(&mut self, kind: &str) -> u32 {
        let slot = self.counts.entry(kind.to_string()).or_insert(0);
        *slot += 1;
        *slot
    }

    /// Zeroes every entry, keeping the keys.
    pub fn reset(&mut self) {
        for v in self.counts.values_mut() {
            *v = 0;
        }
    }

    pub fn get(&self, kind: &str) -> u32 {
        self.counts.get(kind).copied().unwrap_or(0)
    }

    pub fn total(&self) -> u32 {
        self.counts.values().sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, u32)> {
        self.counts.iter().map(|(k, v)| (k.as_str(), *v))
    }

    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    pub fn snapshot(&self) -> IndexMap<String, u32> {
        self.counts.clone()
    }

    /// First entry holding the maximum. Later entries only win on strict improvement.
    pub fn leader(&self) -> Option<&str> {
        let mut best: Option<(&str, u32)> = None;
        for (kind, score) in self.iter() {
            match best {
                Some((_, top)) if score <= top => {}
                _ => best = Some((kind, score)),
            }
        }
        best.map(|(k, _)| k)
    }

    /// Leader restricted to the types declared in `config`.
    pub fn declared_leader<'c>(&self, config: &'c QuizConfig) -> Option<&'c str> {
        let mut best: Option<(&str, u32)> = None;
        for kind in config.results.keys() {
            let score = self.get(kind);
            match best {
                Some((_, top)) if score <= top => {}
                _ => best = Some((kind.as_str(), score)),
            }
        }
        best.map(|(k, _)| k)
    }

    /// Every declared type ranked by descending score, ties kept in declaration order.
    pub fn breakdown(&self, config: &QuizConfig, winner: &str) -> Vec<CompatEntry> {
        let total = self.total();
        let mut rows: Vec<CompatEntry> = config
            .results
            .keys()
            .map(|kind| {
                let score = self.get(kind);
                CompatEntry {
                    kind: kind.clone(),
                    score,
                    percent: percent_of(score, total),
                    is_winner: kind == winner,
                }
            })
            .collect();
        rows.sort_by(|a, b| b.score.cmp(&a.score));
        rows
    }
}

/// `round(score / total * 100)`, or 0 when nothing has been scored.
pub fn percent_of(score: u32, total: u32) -> u32 {
    if total == 0 {
        return 0;
    }
    ((score as f64 / total as f64) * 100.0).round() as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn percent_rounds_half_up() {
        assert_eq!(percent_of(1, 8), 13);
        assert_eq!(percent_of(2, 3), 67);
        assert_eq!(percent_of(1, 3), 33);
        assert_eq!(percent_of(0, 0), 0);
    }

    #[test]
    fn leader_keeps_first_on_tie() {
        let mut board = ScoreBoard::default();
        board.record("x");
        board.record("y");
        assert_eq!(board.leader(), Some("x"));
        board.record("y");
        assert_eq!(board.leader(), Some("y"));
    }
}
