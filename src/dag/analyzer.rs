// src/dag/analyzer.rs

//! Level, cumulative-duration and critical-path computation.
//!
//! Definitions, for an activity `a` with valid requirements `R(a)`:
//!
//! - `level(a) = 0` if `R(a)` is empty, else `1 + max(level(r))`.
//! - `cumulative(a) = duration(a)` if `R(a)` is empty, else
//!   `duration(a) + max(cumulative(r))`.
//! - the critical path ending at `a` extends the path of the first `r` in
//!   `R(a)` (in listing order) whose cumulative duration is maximal.
//!
//! The project critical path is the path of the first activity (in snapshot
//! order) with the largest cumulative duration.
//!
//! Acyclic input is evaluated bottom-up in topological order. Cyclic input
//! is either rejected or, under [`CyclePolicy::Truncate`], evaluated by a
//! guarded depth-first traversal that counts a revisited in-progress node as
//! zero. Only levels of nodes lying on a cycle depend on the path the walk
//! took to reach them; every other node is evaluated once.
//!
//! Cumulative durations use checked addition; a sum past `u64::MAX` is
//! reported as [`AnalysisError::DurationOverflow`].

use std::collections::HashSet;

use serde::Serialize;
use thiserror::Error;
use tracing::{debug, warn};

use crate::dag::ActivityGraph;
use crate::project::ActivityCode;
use crate::types::CyclePolicy;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AnalysisError {
    #[error("cycle detected in activity dependencies involving '{code}'")]
    CyclicDependency { code: ActivityCode },

    #[error("cumulative duration overflows at activity '{code}'")]
    DurationOverflow { code: ActivityCode },
}

/// Per-activity analysis result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ActivityMetrics {
    pub code: ActivityCode,
    pub level: usize,
    pub cumulative_duration: u64,
}

/// Longest requirement chain through the project.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CriticalPath {
    /// Activity codes from the first activity to the last.
    pub codes: Vec<ActivityCode>,
    pub duration: u64,
}

/// Result of analysing one snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Analysis {
    metrics: Vec<ActivityMetrics>,
    critical_path: CriticalPath,
    cyclic: bool,
}

impl Analysis {
    /// Metrics for every activity, in snapshot order.
    pub fn metrics(&self) -> &[ActivityMetrics] {
        &self.metrics
    }

    pub fn metrics_of(&self, code: &str) -> Option<&ActivityMetrics> {
        self.metrics.iter().find(|m| m.code == code)
    }

    pub fn critical_path(&self) -> &CriticalPath {
        &self.critical_path
    }

    /// Largest cumulative duration (0 for an empty project).
    pub fn total_duration(&self) -> u64 {
        self.metrics
            .iter()
            .map(|m| m.cumulative_duration)
            .max()
            .unwrap_or(0)
    }

    /// Whether the numbers came from the cycle-truncating traversal.
    pub fn is_truncated(&self) -> bool {
        self.cyclic
    }
}

/// Per-node evaluation shared by both strategies.
#[derive(Debug, Clone, Copy, Default)]
struct NodeEval {
    level: usize,
    cumulative: u64,
    /// Requirement the critical path arrives through.
    via: Option<usize>,
}

/// Analyse the graph.
pub fn analyze(graph: &ActivityGraph<'_>, policy: CyclePolicy) -> Result<Analysis, AnalysisError> {
    let (evals, cyclic) = match graph.topological_order() {
        Ok(order) => (evaluate_in_order(graph, &order)?, false),
        Err(member) => match policy {
            CyclePolicy::Reject => {
                return Err(AnalysisError::CyclicDependency {
                    code: graph.code(member).to_string(),
                });
            }
            CyclePolicy::Truncate => {
                warn!(
                    code = graph.code(member),
                    "dependency cycle detected; results are truncated at the cycle"
                );
                (evaluate_guarded(graph)?, true)
            }
        },
    };

    let metrics = evals
        .iter()
        .enumerate()
        .map(|(i, e)| ActivityMetrics {
            code: graph.code(i).to_string(),
            level: e.level,
            cumulative_duration: e.cumulative,
        })
        .collect();

    let critical_path = extract_critical_path(graph, &evals);
    debug!(
        path = ?critical_path.codes,
        duration = critical_path.duration,
        "critical path computed"
    );

    Ok(Analysis {
        metrics,
        critical_path,
        cyclic,
    })
}

/// `best + duration(i)`, or the overflow error naming activity `i`.
fn add_duration(graph: &ActivityGraph<'_>, i: usize, best: u64) -> Result<u64, AnalysisError> {
    best.checked_add(graph.activity(i).duration)
        .ok_or_else(|| AnalysisError::DurationOverflow {
            code: graph.code(i).to_string(),
        })
}

/// Bottom-up evaluation; `order` must list requirements before dependents.
fn evaluate_in_order(
    graph: &ActivityGraph<'_>,
    order: &[usize],
) -> Result<Vec<NodeEval>, AnalysisError> {
    let mut evals = vec![NodeEval::default(); graph.len()];

    for &i in order {
        let mut eval = NodeEval::default();
        let mut best = 0u64;

        for &r in graph.requirements(i) {
            eval.level = eval.level.max(evals[r].level + 1);
            if evals[r].cumulative > best {
                best = evals[r].cumulative;
                eval.via = Some(r);
            }
        }

        eval.cumulative = add_duration(graph, i, best)?;
        evals[i] = eval;
    }

    Ok(evals)
}

/// Depth-first evaluation that terminates on cyclic input.
fn evaluate_guarded(graph: &ActivityGraph<'_>) -> Result<Vec<NodeEval>, AnalysisError> {
    let mut walker = GuardedWalk {
        graph,
        memo: vec![None; graph.len()],
        in_progress: HashSet::new(),
    };
    let mut levels = LevelWalk {
        graph,
        on_cycle: graph.cycle_members(),
        memo: vec![None; graph.len()],
        path: HashSet::new(),
    };

    let mut evals = Vec::with_capacity(graph.len());
    for i in 0..graph.len() {
        let (cumulative, via) = walker.cumulative(i)?;
        evals.push(NodeEval {
            level: levels.level(i),
            cumulative,
            via,
        });
    }
    Ok(evals)
}

/// Level with a per-path guard: a node already on the current path
/// contributes level 0 to its caller's branch.
///
/// On a cycle member the result depends on where the walk entered the
/// cycle, so only nodes off every cycle are memoized. Their requirement
/// closure cannot reach back into the current path.
struct LevelWalk<'g, 'a> {
    graph: &'g ActivityGraph<'a>,
    on_cycle: Vec<bool>,
    memo: Vec<Option<usize>>,
    path: HashSet<usize>,
}

impl LevelWalk<'_, '_> {
    fn level(&mut self, i: usize) -> usize {
        if let Some(done) = self.memo[i] {
            return done;
        }
        if !self.path.insert(i) {
            return 0;
        }

        let graph = self.graph;
        let reqs = graph.requirements(i);
        let level = if reqs.is_empty() {
            0
        } else {
            reqs.iter().map(|&r| self.level(r)).max().unwrap_or(0) + 1
        };

        self.path.remove(&i);
        if !self.on_cycle[i] {
            self.memo[i] = Some(level);
        }
        level
    }
}

struct GuardedWalk<'g, 'a> {
    graph: &'g ActivityGraph<'a>,
    memo: Vec<Option<(u64, Option<usize>)>>,
    in_progress: HashSet<usize>,
}

impl GuardedWalk<'_, '_> {
    /// Memoized cumulative duration plus the chosen predecessor.
    fn cumulative(&mut self, i: usize) -> Result<(u64, Option<usize>), AnalysisError> {
        if let Some(done) = self.memo[i] {
            return Ok(done);
        }
        if !self.in_progress.insert(i) {
            return Ok((0, None));
        }

        let graph = self.graph;
        let mut best = 0u64;
        let mut via = None;
        for &r in graph.requirements(i) {
            let (d, _) = self.cumulative(r)?;
            if d > best {
                best = d;
                via = Some(r);
            }
        }

        let result = (add_duration(graph, i, best)?, via);
        self.in_progress.remove(&i);
        self.memo[i] = Some(result);
        Ok(result)
    }
}

fn extract_critical_path(graph: &ActivityGraph<'_>, evals: &[NodeEval]) -> CriticalPath {
    let mut best: Option<usize> = None;
    let mut best_duration = 0u64;

    for (i, eval) in evals.iter().enumerate() {
        if eval.cumulative > best_duration {
            best_duration = eval.cumulative;
            best = Some(i);
        }
    }

    let mut codes = Vec::new();
    let mut seen = HashSet::new();
    let mut cursor = best;
    while let Some(i) = cursor {
        // `via` chains only point at finished nodes, so this cannot loop;
        // the guard keeps it that way if that ever changes.
        if !seen.insert(i) {
            break;
        }
        codes.push(graph.code(i).to_string());
        cursor = evals[i].via;
    }
    codes.reverse();

    CriticalPath {
        codes,
        duration: best_duration,
    }
}
