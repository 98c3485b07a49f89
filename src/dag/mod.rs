// src/dag/mod.rs

//! Dependency-graph analysis over a snapshot of activities.
//!
//! - [`graph`] indexes the activities and keeps only requirements that name
//!   an existing activity.
//! - [`analyzer`] computes levels, cumulative durations and the critical path.
//! - [`layout`] turns levels into 2D node positions plus an edge list.
//! - [`summary`] aggregates project-level totals.
//!
//! Everything here is a pure function of the slice it is given. Nothing is
//! cached between calls; callers recompute after every mutation.

pub mod analyzer;
pub mod graph;
pub mod layout;
pub mod summary;

pub use analyzer::{ActivityMetrics, Analysis, AnalysisError, CriticalPath, analyze};
pub use graph::ActivityGraph;
pub use layout::{Layout, LayoutConfig, LayoutEdge, LayoutNode, derive_layout};
pub use summary::{ProjectSummary, aggregate};

use serde::Serialize;

use crate::project::Activity;
use crate::types::CyclePolicy;

/// All derived views of a project, computed from one analysis pass.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProjectViews {
    pub metrics: Vec<ActivityMetrics>,
    pub layout: Layout,
    pub summary: ProjectSummary,
}

/// Node positions and edges for rendering.
pub fn compute_layout(
    activities: &[Activity],
    config: &LayoutConfig,
    policy: CyclePolicy,
) -> Result<Layout, AnalysisError> {
    let graph = ActivityGraph::new(activities);
    let analysis = analyze(&graph, policy)?;
    Ok(derive_layout(&graph, &analysis, config))
}

/// Total cost, total duration and critical path.
pub fn compute_summary(
    activities: &[Activity],
    policy: CyclePolicy,
) -> Result<ProjectSummary, AnalysisError> {
    let graph = ActivityGraph::new(activities);
    let analysis = analyze(&graph, policy)?;
    Ok(aggregate(&graph, &analysis))
}

/// Metrics, layout and summary in one go.
pub fn compute_views(
    activities: &[Activity],
    config: &LayoutConfig,
    policy: CyclePolicy,
) -> Result<ProjectViews, AnalysisError> {
    let graph = ActivityGraph::new(activities);
    let analysis = analyze(&graph, policy)?;
    Ok(ProjectViews {
        metrics: analysis.metrics().to_vec(),
        layout: derive_layout(&graph, &analysis, config),
        summary: aggregate(&graph, &analysis),
    })
}
