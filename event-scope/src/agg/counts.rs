use crate::{
    agg::Aggregator,
    model::{agg::Tally, taxonomy::Ruleset},
};

/// Counts lines per category. Each line lands in at most one category, the
/// first one in ruleset order whose needle it contains.
pub struct CountAggregator {
    ruleset: Ruleset,
    tally: Tally,
}

impl CountAggregator {
    pub fn new(ruleset: Ruleset) -> Self {
        Self {
            ruleset,
            tally: Tally::zeroed(ruleset),
        }
    }
}

impl Aggregator for CountAggregator {
    type Output = Tally;

    fn on_start(&mut self) {
        self.tally = Tally::zeroed(self.ruleset);
    }

    fn on_line(&mut self, line: &str) {
        self.tally.lines += 1;
        if let Some(idx) = self.ruleset.classify(line) {
            self.tally.counts[idx] += 1;
        }
    }

    fn finalize(self) -> Self::Output {
        self.tally
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn count(ruleset: Ruleset, lines: &[&str]) -> Tally {
        let mut agg = CountAggregator::new(ruleset);
        agg.on_start();
        for line in lines {
            agg.on_line(line);
        }
        agg.on_end();
        agg.finalize()
    }

    #[test]
    fn server_scenario() {
        let tally = count(
            Ruleset::Default,
            &[
                "Sent packet 1",
                "Received packet 1",
                "Failed to receive ACK for packet 2",
            ],
        );
        assert_eq!(tally.counts, [1, 1, 1]);
        assert_eq!(tally.unclassified(), 0);
    }

    #[test]
    fn proxy_drop_scenario() {
        let tally = count(Ruleset::Proxy, &["Dropped Client to Server packet 5"]);
        assert_eq!(tally.counts, [0, 0, 0, 0, 1, 0]);
    }

    #[test]
    fn no_lines_means_zeros_of_ruleset_length() {
        for ruleset in [Ruleset::Default, Ruleset::Proxy, Ruleset::Combined] {
            let tally = count(ruleset, &[]);
            assert_eq!(tally.counts.len(), ruleset.len());
            assert!(tally.counts.iter().all(|&c| c == 0));
            assert_eq!(tally.lines, 0);
        }
    }

    #[test]
    fn multi_match_goes_to_earliest_category_only() {
        let tally = count(
            Ruleset::Combined,
            &["Sent and Delayed", "Received then Dropped", "Delayed and Dropped"],
        );
        assert_eq!(tally.counts, [1, 1, 0, 1, 0]);
        assert_eq!(tally.classified(), 3);
    }

    #[test]
    fn unmatched_lines_are_counted_but_not_classified() {
        let tally = count(
            Ruleset::Default,
            &["1700000000 CLIENT Sent Packet 1", "", "startup complete"],
        );
        assert_eq!(tally.counts, [1, 0, 0]);
        assert_eq!(tally.lines, 3);
        assert_eq!(tally.unclassified(), 2);
    }

    #[test]
    fn on_start_resets_previous_pass() {
        let mut agg = CountAggregator::new(Ruleset::Default);
        agg.on_start();
        agg.on_line("Sent");
        agg.on_start();
        agg.on_line("Received");
        assert_eq!(agg.finalize().counts, [0, 1, 0]);
    }
}
