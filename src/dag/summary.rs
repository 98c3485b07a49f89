// src/dag/summary.rs

use serde::Serialize;

use crate::dag::{ActivityGraph, Analysis};
use crate::project::ActivityCode;

/// Project-level totals.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ProjectSummary {
    pub total_cost: f64,
    pub total_duration: u64,
    pub critical_path: Vec<ActivityCode>,
}

pub fn aggregate(graph: &ActivityGraph<'_>, analysis: &Analysis) -> ProjectSummary {
    let total_cost: f64 = (0..graph.len()).map(|i| graph.activity(i).cost).sum();

    ProjectSummary {
        total_cost,
        total_duration: analysis.total_duration(),
        critical_path: analysis.critical_path().codes.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dag::analyze;
    use crate::project::Activity;
    use crate::types::CyclePolicy;

    #[test]
    fn sums_cost_of_every_activity() {
        let acts = vec![
            Activity {
                code: "A".into(),
                description: String::new(),
                duration: 2,
                cost: 100.5,
                requirements: vec![],
            },
            Activity {
                code: "B".into(),
                description: String::new(),
                duration: 1,
                cost: 0.25,
                requirements: vec!["A".into(), "ghost".into()],
            },
        ];
        let graph = ActivityGraph::new(&acts);
        let analysis = analyze(&graph, CyclePolicy::Reject).unwrap();
        let summary = aggregate(&graph, &analysis);

        assert_eq!(summary.total_cost, 100.75);
        assert_eq!(summary.total_duration, 3);
        assert_eq!(summary.critical_path, vec!["A", "B"]);
    }
}
