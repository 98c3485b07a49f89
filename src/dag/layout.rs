// src/dag/layout.rs

//! Level-based 2D layout for diagram rendering.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::dag::{ActivityGraph, Analysis};
use crate::project::ActivityCode;

/// Spacing and offsets for node placement.
///
/// Read from the `[layout]` section of a project file.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LayoutConfig {
    /// Distance between consecutive levels (columns).
    #[serde(default = "default_horizontal_spacing")]
    pub horizontal_spacing: f64,

    /// Distance between consecutive slots within a level (rows).
    #[serde(default = "default_vertical_spacing")]
    pub vertical_spacing: f64,

    #[serde(default = "default_offset")]
    pub x_offset: f64,

    #[serde(default = "default_offset")]
    pub y_offset: f64,
}

fn default_horizontal_spacing() -> f64 {
    250.0
}

fn default_vertical_spacing() -> f64 {
    150.0
}

fn default_offset() -> f64 {
    50.0
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            horizontal_spacing: default_horizontal_spacing(),
            vertical_spacing: default_vertical_spacing(),
            x_offset: default_offset(),
            y_offset: default_offset(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LayoutNode {
    pub code: ActivityCode,
    pub level: usize,
    /// Position within the level, in snapshot order.
    pub slot: usize,
    pub x: f64,
    pub y: f64,
}

/// A rendered dependency: `from` must finish before `to` starts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LayoutEdge {
    pub from: ActivityCode,
    pub to: ActivityCode,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Layout {
    pub nodes: Vec<LayoutNode>,
    pub edges: Vec<LayoutEdge>,
}

/// Place each activity at `(level, slot)` and list one edge per valid
/// requirement. Nodes keep snapshot order.
pub fn derive_layout(graph: &ActivityGraph<'_>, analysis: &Analysis, config: &LayoutConfig) -> Layout {
    let mut next_slot: HashMap<usize, usize> = HashMap::new();

    let nodes = analysis
        .metrics()
        .iter()
        .map(|m| {
            let slot = next_slot.entry(m.level).or_insert(0);
            let node = LayoutNode {
                code: m.code.clone(),
                level: m.level,
                slot: *slot,
                x: m.level as f64 * config.horizontal_spacing + config.x_offset,
                y: *slot as f64 * config.vertical_spacing + config.y_offset,
            };
            *slot += 1;
            node
        })
        .collect();

    let edges = graph
        .edges()
        .map(|(from, to)| LayoutEdge {
            from: graph.code(from).to_string(),
            to: graph.code(to).to_string(),
        })
        .collect();

    Layout { nodes, edges }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dag::analyze;
    use crate::project::Activity;
    use crate::types::CyclePolicy;

    fn act(code: &str, reqs: &[&str]) -> Activity {
        Activity {
            code: code.to_string(),
            description: String::new(),
            duration: 1,
            cost: 0.0,
            requirements: reqs.iter().map(|s| s.to_string()).collect(),
        }
    }

    fn layout_of(acts: &[Activity], config: &LayoutConfig) -> Layout {
        let graph = ActivityGraph::new(acts);
        let analysis = analyze(&graph, CyclePolicy::Reject).unwrap();
        derive_layout(&graph, &analysis, config)
    }

    #[test]
    fn slots_follow_snapshot_order_within_level() {
        let acts = vec![
            act("A", &[]),
            act("B", &["A"]),
            act("X", &[]),
            act("C", &["A"]),
        ];
        let layout = layout_of(&acts, &LayoutConfig::default());

        let placed: Vec<(&str, usize, usize, f64, f64)> = layout
            .nodes
            .iter()
            .map(|n| (n.code.as_str(), n.level, n.slot, n.x, n.y))
            .collect();
        assert_eq!(
            placed,
            vec![
                ("A", 0, 0, 50.0, 50.0),
                ("B", 1, 0, 300.0, 50.0),
                ("X", 0, 1, 50.0, 200.0),
                ("C", 1, 1, 300.0, 200.0),
            ]
        );
    }

    #[test]
    fn custom_spacing_is_applied() {
        let acts = vec![act("A", &[]), act("B", &["A"])];
        let config = LayoutConfig {
            horizontal_spacing: 10.0,
            vertical_spacing: 5.0,
            x_offset: 0.0,
            y_offset: 1.0,
        };
        let layout = layout_of(&acts, &config);
        assert_eq!((layout.nodes[1].x, layout.nodes[1].y), (10.0, 1.0));
    }

    #[test]
    fn no_edge_for_dangling_requirement() {
        let acts = vec![act("A", &[]), act("E", &["X"]), act("F", &["A", "X"])];
        let layout = layout_of(&acts, &LayoutConfig::default());
        assert_eq!(
            layout.edges,
            vec![LayoutEdge {
                from: "A".into(),
                to: "F".into()
            }]
        );
    }
}
