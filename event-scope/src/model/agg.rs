use time::OffsetDateTime;

use crate::{model::taxonomy::Ruleset, source::ReadError};

/// Totals produced by one full pass over the log.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Tally {
    /// One count per category, in ruleset order.
    pub counts: Vec<u64>,
    /// Every line seen, classified or not.
    pub lines: u64,
}

impl Tally {
    pub fn zeroed(ruleset: Ruleset) -> Self {
        Self {
            counts: vec![0; ruleset.len()],
            lines: 0,
        }
    }

    pub fn classified(&self) -> u64 {
        self.counts.iter().sum()
    }

    pub fn unclassified(&self) -> u64 {
        self.lines.saturating_sub(self.classified())
    }
}

/// Result of a single reduction (one tick).
#[derive(Debug)]
pub struct Snapshot {
    pub tally: Tally,
    /// Set when the log could not be read; the tally is then all zeros.
    pub issue: Option<ReadError>,
    pub taken_at: OffsetDateTime,
}

impl Snapshot {
    pub fn counts(&self) -> &[u64] {
        &self.tally.counts
    }
}
