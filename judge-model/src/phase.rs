use serde::{Deserialize, Serialize};

/// The stage of a [`Submission`](crate::Submission) pipeline a
/// [`TestCase`](crate::TestCase) belongs to.
///
/// Phases run in this order; `PostBuild` and `Judge` only run if the
/// preceding phase (and, for `Judge`, the compile step) succeeded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub enum Phase {
    /// Runs before compilation, e.g. static checks on the submitted source.
    PreBuild,
    /// Runs right after a successful compile, against the compiler's output.
    PostBuild,
    /// The scored test cases, run against the compiled executable.
    Judge,
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Phase::PreBuild => "PreBuild",
            Phase::PostBuild => "PostBuild",
            Phase::Judge => "Judge",
        };
        f.write_str(s)
    }
}

impl std::str::FromStr for Phase {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "PreBuild" => Phase::PreBuild,
            "PostBuild" => Phase::PostBuild,
            "Judge" => Phase::Judge,
            other => return Err(format!("unknown phase: {other}")),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_and_parse_round_trip() {
        for p in [Phase::PreBuild, Phase::PostBuild, Phase::Judge] {
            let parsed: Phase = p.to_string().parse().unwrap();
            assert_eq!(parsed, p);
        }
    }
}
