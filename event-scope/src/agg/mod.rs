use std::path::Path;

use time::OffsetDateTime;
use tracing::{debug, warn};

use crate::{
    agg::counts::CountAggregator,
    model::{
        agg::{Snapshot, Tally},
        taxonomy::Ruleset,
    },
    source::{LineSource, file::FileSource},
};

pub mod counts;

pub trait Aggregator {
    type Output;

    fn on_start(&mut self);
    fn on_line(&mut self, line: &str);
    fn on_end(&mut self) {}
    fn finalize(self) -> Self::Output;
}

/// Count every line of `path` from the beginning.
///
/// Never fails: an unreadable log (missing, permission denied, read error)
/// yields an all-zero tally with the cause attached and logged as a warning.
pub fn reduce(path: &Path, ruleset: Ruleset) -> Snapshot {
    let taken_at = OffsetDateTime::now_utc();
    let mut source = FileSource::new(path);
    let mut agg = CountAggregator::new(ruleset);

    match source.run(&mut agg) {
        Ok(()) => {
            let tally = agg.finalize();
            debug!(
                path = %source.path().display(),
                lines = tally.lines,
                counts = ?tally.counts,
                "reduced log"
            );
            Snapshot {
                tally,
                issue: None,
                taken_at,
            }
        }
        Err(err) => {
            warn!("{err}");
            Snapshot {
                tally: Tally::zeroed(ruleset),
                issue: Some(err),
                taken_at,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::{fs::OpenOptions, io::Write};

    use tempfile::NamedTempFile;

    use super::*;
    use crate::source::ReadError;

    fn log_with(lines: &[&str]) -> NamedTempFile {
        let mut f = NamedTempFile::new().unwrap();
        for line in lines {
            writeln!(f, "{line}").unwrap();
        }
        f.flush().unwrap();
        f
    }

    #[test]
    fn empty_file_gives_zero_counts() {
        let f = log_with(&[]);
        let snap = reduce(f.path(), Ruleset::Proxy);
        assert_eq!(snap.counts(), [0; 6]);
        assert!(snap.issue.is_none());
    }

    #[test]
    fn server_log_counts_one_of_each() {
        let f = log_with(&[
            "Sent packet 1",
            "Received packet 1",
            "Failed to receive ACK for packet 2",
        ]);
        let snap = reduce(f.path(), Ruleset::Default);
        assert_eq!(snap.counts(), [1, 1, 1]);
    }

    #[test]
    fn missing_file_gives_zeros_and_issue() {
        let dir = tempfile::tempdir().unwrap();
        for ruleset in [Ruleset::Default, Ruleset::Proxy, Ruleset::Combined] {
            let snap = reduce(&dir.path().join("proxy.log"), ruleset);
            assert_eq!(snap.counts().len(), ruleset.len());
            assert!(snap.counts().iter().all(|&c| c == 0));
            assert!(matches!(snap.issue, Some(ReadError::Missing { .. })));
        }
    }

    #[test]
    fn other_io_errors_also_degrade_to_zero() {
        let dir = tempfile::tempdir().unwrap();
        let snap = reduce(dir.path(), Ruleset::Default);
        assert_eq!(snap.counts(), [0, 0, 0]);
        assert!(matches!(snap.issue, Some(ReadError::Io { .. })));
    }

    #[test]
    fn rereading_is_idempotent() {
        let f = log_with(&["Sent 1", "Sent 2", "Received 1", "noise"]);
        let first = reduce(f.path(), Ruleset::Default);
        let second = reduce(f.path(), Ruleset::Default);
        assert_eq!(first.tally, second.tally);
    }

    #[test]
    fn appended_lines_never_decrease_counts() {
        let f = log_with(&["Sent 1", "Delayed Server to Client 1"]);
        let before = reduce(f.path(), Ruleset::Proxy);

        let mut append = OpenOptions::new().append(true).open(f.path()).unwrap();
        writeln!(append, "Sent 2").unwrap();
        writeln!(append, "Dropped Server to Client 2").unwrap();
        writeln!(append, "unrelated").unwrap();
        drop(append);

        let after = reduce(f.path(), Ruleset::Proxy);
        assert!(before.counts().iter().zip(after.counts()).all(|(b, a)| a >= b));
        assert_eq!(after.counts(), [2, 0, 0, 1, 0, 1]);
        assert_eq!(after.tally.lines, 5);
    }

    #[test]
    fn file_appearing_later_is_picked_up() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("client.log");

        assert!(reduce(&path, Ruleset::Default).issue.is_some());

        std::fs::write(&path, "Sent packet 1\nSent packet 2\n").unwrap();
        let snap = reduce(&path, Ruleset::Default);
        assert!(snap.issue.is_none());
        assert_eq!(snap.counts(), [2, 0, 0]);
    }
}
