// src/dag/graph.rs

use std::collections::HashMap;

use petgraph::algo::{tarjan_scc, toposort};
use petgraph::graphmap::DiGraphMap;

use crate::project::Activity;

/// Internal node structure: stores immediate requirements and dependents as
/// indices into the activity slice.
#[derive(Debug, Clone, Default)]
struct GraphNode {
    /// Valid requirements, in the order the activity lists them.
    requirements: Vec<usize>,
    /// Activities that list this one as a requirement, in slice order.
    dependents: Vec<usize>,
}

/// Index-based dependency graph over a borrowed activity snapshot.
///
/// Requirements naming a code that is not in the snapshot are dropped here,
/// so every consumer treats a dangling reference exactly like no reference.
/// Repeated requirements collapse to one edge. If the snapshot contains the
/// same code twice, the first occurrence wins.
#[derive(Debug, Clone)]
pub struct ActivityGraph<'a> {
    activities: &'a [Activity],
    index: HashMap<&'a str, usize>,
    nodes: Vec<GraphNode>,
}

impl<'a> ActivityGraph<'a> {
    pub fn new(activities: &'a [Activity]) -> Self {
        let mut index: HashMap<&'a str, usize> = HashMap::with_capacity(activities.len());
        for (i, activity) in activities.iter().enumerate() {
            index.entry(activity.code.as_str()).or_insert(i);
        }

        let mut nodes = vec![GraphNode::default(); activities.len()];

        // First pass: resolve requirement codes to indices.
        for (i, activity) in activities.iter().enumerate() {
            for req in activity.requirements.iter() {
                if let Some(&r) = index.get(req.as_str()) {
                    if !nodes[i].requirements.contains(&r) {
                        nodes[i].requirements.push(r);
                    }
                }
            }
        }

        // Second pass: populate dependents from requirements.
        for i in 0..nodes.len() {
            for r in nodes[i].requirements.clone() {
                nodes[r].dependents.push(i);
            }
        }

        Self {
            activities,
            index,
            nodes,
        }
    }

    pub fn len(&self) -> usize {
        self.activities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.activities.is_empty()
    }

    pub fn activity(&self, i: usize) -> &'a Activity {
        &self.activities[i]
    }

    pub fn code(&self, i: usize) -> &'a str {
        self.activities[i].code.as_str()
    }

    pub fn index_of(&self, code: &str) -> Option<usize> {
        self.index.get(code).copied()
    }

    /// Valid requirements of node `i`.
    pub fn requirements(&self, i: usize) -> &[usize] {
        &self.nodes[i].requirements
    }

    /// Nodes that require node `i`.
    pub fn dependents(&self, i: usize) -> &[usize] {
        &self.nodes[i].dependents
    }

    /// Codes of activities that list `code` as a (valid) requirement.
    pub fn dependents_of(&self, code: &str) -> Vec<&'a str> {
        self.index_of(code)
            .map(|i| self.dependents(i).iter().map(|&d| self.code(d)).collect())
            .unwrap_or_default()
    }

    /// Activities without valid requirements, in snapshot order.
    pub fn roots(&self) -> impl Iterator<Item = usize> + '_ {
        (0..self.len()).filter(|&i| self.nodes[i].requirements.is_empty())
    }

    /// Every `(requirement, dependent)` edge, ordered by dependent and then
    /// by the dependent's requirement order.
    pub fn edges(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.nodes
            .iter()
            .enumerate()
            .flat_map(|(to, node)| node.requirements.iter().map(move |&from| (from, to)))
    }

    /// Topological order (requirements before dependents).
    ///
    /// On a cycle, returns the index of one node that lies on it.
    pub fn topological_order(&self) -> Result<Vec<usize>, usize> {
        toposort(&self.to_digraph(), None).map_err(|cycle| cycle.node_id())
    }

    /// For every node, whether it lies on a dependency cycle: it shares a
    /// strongly connected component with another node, or requires itself.
    pub fn cycle_members(&self) -> Vec<bool> {
        let mut on_cycle = vec![false; self.len()];
        for component in tarjan_scc(&self.to_digraph()) {
            if component.len() > 1 {
                for i in component {
                    on_cycle[i] = true;
                }
            }
        }
        for (i, node) in self.nodes.iter().enumerate() {
            if node.requirements.contains(&i) {
                on_cycle[i] = true;
            }
        }
        on_cycle
    }

    /// Edge direction: requirement -> dependent.
    fn to_digraph(&self) -> DiGraphMap<usize, ()> {
        let mut graph: DiGraphMap<usize, ()> = DiGraphMap::new();

        for i in 0..self.len() {
            graph.add_node(i);
        }
        for (from, to) in self.edges() {
            graph.add_edge(from, to, ());
        }
        graph
    }
}
