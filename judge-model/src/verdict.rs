use serde::{Deserialize, Serialize};

/// Outcome of a single test case, or the aggregation of a phase.
///
/// `Ord` is derived from the declaration order below, which is the severity
/// order from least to most severe: `Unprocessed < AC < WA < TLE < MLE < RE
/// < CE < OLE < IE`. This lets the aggregator compute a phase verdict with a
/// plain `max` over the per-case verdicts.
///
/// Note that `CE` outranks `RE`: if a phase somehow produces both (e.g. a
/// case-level compile step inside a post-build check fails to build *and*
/// another case in the same phase crashes), the reported verdict is `CE`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Verdict {
    /// No case of this kind has run yet.
    Unprocessed,
    /// Accepted: the case ran, matched expected exit code, stdout and stderr.
    AC,
    /// Wrong Answer: the case ran to completion but the output didn't match.
    WA,
    /// Time Limit Exceeded.
    TLE,
    /// Memory Limit Exceeded.
    MLE,
    /// Runtime Error: the process exited with an unexpected code.
    RE,
    /// Compile Error.
    CE,
    /// Output Limit Exceeded.
    OLE,
    /// Internal Error: the judge itself failed to run this case.
    IE,
}

impl Verdict {
    /// `true` for the verdict an aggregator starts from.
    pub fn is_initial(self) -> bool {
        self == Verdict::AC
    }
}

impl std::fmt::Display for Verdict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Verdict::Unprocessed => "Unprocessed",
            Verdict::AC => "AC",
            Verdict::WA => "WA",
            Verdict::TLE => "TLE",
            Verdict::MLE => "MLE",
            Verdict::RE => "RE",
            Verdict::CE => "CE",
            Verdict::OLE => "OLE",
            Verdict::IE => "IE",
        };
        f.write_str(s)
    }
}

impl std::str::FromStr for Verdict {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "Unprocessed" => Verdict::Unprocessed,
            "AC" => Verdict::AC,
            "WA" => Verdict::WA,
            "TLE" => Verdict::TLE,
            "MLE" => Verdict::MLE,
            "RE" => Verdict::RE,
            "CE" => Verdict::CE,
            "OLE" => Verdict::OLE,
            "IE" => Verdict::IE,
            other => return Err(format!("unknown verdict: {other}")),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn severity_order() {
        assert!(Verdict::Unprocessed < Verdict::AC);
        assert!(Verdict::AC < Verdict::WA);
        assert!(Verdict::WA < Verdict::TLE);
        assert!(Verdict::TLE < Verdict::MLE);
        assert!(Verdict::MLE < Verdict::RE);
        assert!(Verdict::RE < Verdict::CE);
        assert!(Verdict::CE < Verdict::OLE);
        assert!(Verdict::OLE < Verdict::IE);
    }

    #[test]
    fn ce_dominates_re() {
        assert!(Verdict::CE > Verdict::RE, "CE must outrank RE (spec §9-ii)");
    }

    #[test]
    fn display_and_parse_round_trip() {
        for v in [
            Verdict::Unprocessed,
            Verdict::AC,
            Verdict::WA,
            Verdict::TLE,
            Verdict::MLE,
            Verdict::RE,
            Verdict::CE,
            Verdict::OLE,
            Verdict::IE,
        ] {
            let parsed: Verdict = v.to_string().parse().unwrap();
            assert_eq!(parsed, v);
        }
    }
}
