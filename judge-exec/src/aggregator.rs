use judge_model::Verdict;

/// Folds a sequence of per-case verdicts into a single phase verdict (spec
/// §4.4): starts at `AC`, and `update` only ever raises the stored verdict.
pub struct Aggregator {
    verdict: Verdict,
}

impl Default for Aggregator {
    fn default() -> Aggregator {
        Aggregator { verdict: Verdict::AC }
    }
}

impl Aggregator {
    /// A fresh aggregator, starting at `AC` (spec §4.4, and the "zero test
    /// cases in a phase -> AC" boundary case in spec §8).
    pub fn new() -> Aggregator {
        Aggregator::default()
    }

    /// Raise the stored verdict to `v` iff `v` is strictly more severe.
    pub fn update(&mut self, v: Verdict) {
        if v > self.verdict {
            self.verdict = v;
        }
    }

    /// The aggregated verdict so far.
    pub fn result(&self) -> Verdict {
        self.verdict
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn starts_at_ac_with_no_updates() {
        assert_eq!(Aggregator::new().result(), Verdict::AC);
    }

    #[test]
    fn only_raises_never_lowers() {
        let mut agg = Aggregator::new();
        agg.update(Verdict::WA);
        agg.update(Verdict::AC);
        assert_eq!(agg.result(), Verdict::WA);
    }

    #[test]
    fn ce_dominates_re_within_a_phase() {
        let mut agg = Aggregator::new();
        agg.update(Verdict::RE);
        agg.update(Verdict::CE);
        assert_eq!(agg.result(), Verdict::CE);
    }

    #[test]
    fn ie_dominates_everything() {
        let mut agg = Aggregator::new();
        for v in [Verdict::WA, Verdict::TLE, Verdict::MLE, Verdict::RE, Verdict::CE, Verdict::OLE] {
            agg.update(v);
        }
        agg.update(Verdict::IE);
        assert_eq!(agg.result(), Verdict::IE);
    }

    #[test]
    fn monotonic_under_any_sequence_extension() {
        let mut agg = Aggregator::new();
        let before = agg.result();
        agg.update(Verdict::TLE);
        assert!(agg.result() >= before);
    }
}
