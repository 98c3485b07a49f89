// src/report.rs

//! Plain-text and JSON rendering of the analysis snapshots.

use serde::Serialize;

use crate::cli::OutputFormat;
use crate::dag::{ActivityMetrics, Layout, ProjectSummary};
use crate::project::{Activity, ActivityCode};

/// Human-readable rendering; JSON comes from `Serialize`.
pub trait TextReport {
    fn to_text(&self) -> String;
}

pub fn render<T>(value: &T, format: OutputFormat) -> serde_json::Result<String>
where
    T: Serialize + TextReport,
{
    match format {
        OutputFormat::Text => Ok(value.to_text()),
        OutputFormat::Json => serde_json::to_string_pretty(value),
    }
}

impl TextReport for ProjectSummary {
    fn to_text(&self) -> String {
        let path = if self.critical_path.is_empty() {
            "(none)".to_string()
        } else {
            self.critical_path.join(" -> ")
        };
        format!(
            "Critical path:  {path}\nTotal duration: {}\nTotal cost:     {:.2}",
            self.total_duration, self.total_cost
        )
    }
}

impl TextReport for Layout {
    fn to_text(&self) -> String {
        let mut lines = vec!["nodes:".to_string()];
        lines.extend(self.nodes.iter().map(|n| {
            format!(
                "  {:<10} level={} slot={} x={} y={}",
                n.code, n.level, n.slot, n.x, n.y
            )
        }));
        lines.push("edges:".to_string());
        lines.extend(self.edges.iter().map(|e| format!("  {} -> {}", e.from, e.to)));
        lines.join("\n")
    }
}

/// One line of the activity table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TableRow {
    pub code: ActivityCode,
    pub description: String,
    pub duration: u64,
    pub cost: f64,
    pub requirements: Vec<ActivityCode>,
    pub level: usize,
    pub cumulative_duration: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ActivityTable {
    pub rows: Vec<TableRow>,
}

impl ActivityTable {
    /// Zip activities with their metrics; both are in snapshot order.
    pub fn new(activities: &[Activity], metrics: &[ActivityMetrics]) -> Self {
        let rows = activities
            .iter()
            .zip(metrics)
            .map(|(a, m)| TableRow {
                code: a.code.clone(),
                description: a.description.clone(),
                duration: a.duration,
                cost: a.cost,
                requirements: a.requirements.clone(),
                level: m.level,
                cumulative_duration: m.cumulative_duration,
            })
            .collect();
        Self { rows }
    }
}

impl TextReport for ActivityTable {
    fn to_text(&self) -> String {
        if self.rows.is_empty() {
            return "no activities".to_string();
        }

        let mut out = format!(
            "{:<10} {:<24} {:>8} {:>12} {:>5} {:>10}  requirements",
            "code", "description", "duration", "cost", "level", "cumulative"
        );
        for r in &self.rows {
            let reqs = if r.requirements.is_empty() {
                "-".to_string()
            } else {
                r.requirements.join(", ")
            };
            out.push_str(&format!(
                "\n{:<10} {:<24} {:>8} {:>12.2} {:>5} {:>10}  {}",
                r.code, r.description, r.duration, r.cost, r.level, r.cumulative_duration, reqs
            ));
        }
        out
    }
}

/// Read-only answer to "what depends on this activity?".
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Impact {
    pub code: ActivityCode,
    pub dependents: Vec<ActivityCode>,
}

impl TextReport for Impact {
    fn to_text(&self) -> String {
        if self.dependents.is_empty() {
            format!("{}: no dependents; can be deleted directly", self.code)
        } else {
            format!(
                "{}: required by {}; deleting it needs confirmation",
                self.code,
                self.dependents.join(", ")
            )
        }
    }
}

/// Project state after a simulated delete.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RemovalPreview {
    pub removed: ActivityCode,
    pub cascaded: Vec<ActivityCode>,
    pub summary: ProjectSummary,
}

impl TextReport for RemovalPreview {
    fn to_text(&self) -> String {
        let mut out = format!("removed {}", self.removed);
        if !self.cascaded.is_empty() {
            out.push_str(&format!(
                " (requirement dropped from {})",
                self.cascaded.join(", ")
            ));
        }
        out.push('\n');
        out.push_str(&self.summary.to_text());
        out
    }
}
