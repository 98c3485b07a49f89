use std::str::FromStr;

use serde::Deserialize;

/// How the analyzer treats a dependency cycle among valid requirements.
///
/// - `Reject`: analysis fails with [`AnalysisError::CyclicDependency`]
///   naming one activity on the cycle (default behaviour).
/// - `Truncate`: analysis always succeeds. Acyclic projects are evaluated
///   exactly as with `Reject`; on cyclic input the traversal stops when it
///   reaches an activity already on the current path and counts that branch
///   as zero, so durations inside the cycle are under-counted.
///
/// [`AnalysisError::CyclicDependency`]: crate::dag::AnalysisError::CyclicDependency
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CyclePolicy {
    Reject,
    Truncate,
}

impl Default for CyclePolicy {
    fn default() -> Self {
        CyclePolicy::Reject
    }
}

impl FromStr for CyclePolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "reject" => Ok(CyclePolicy::Reject),
            "truncate" => Ok(CyclePolicy::Truncate),
            other => Err(format!(
                "invalid cycle_policy: {other} (expected \"reject\" or \"truncate\")"
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_policy_case_insensitively() {
        assert_eq!("Reject".parse::<CyclePolicy>(), Ok(CyclePolicy::Reject));
        assert_eq!(" truncate ".parse::<CyclePolicy>(), Ok(CyclePolicy::Truncate));
        assert!("ignore".parse::<CyclePolicy>().is_err());
    }

    #[test]
    fn default_policy_rejects_cycles() {
        assert_eq!(CyclePolicy::default(), CyclePolicy::Reject);
    }
}
