// src/config/model.rs

use serde::Deserialize;

use crate::dag::LayoutConfig;
use crate::project::{ActivityDraft, ActivityRepository};
use crate::types::CyclePolicy;

/// Project file as read from TOML, before validation.
///
/// ```toml
/// [layout]
/// horizontal_spacing = 250.0
///
/// [analysis]
/// cycle_policy = "reject"
///
/// [[activity]]
/// code = "A"
/// description = "Design"
/// duration = 3
/// cost = 1200.0
///
/// [[activity]]
/// code = "B"
/// description = "Build"
/// duration = 5
/// cost = 800.0
/// requirements = ["A"]
/// ```
///
/// All sections are optional. Activity order in the file is the project's
/// insertion order.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawProjectFile {
    #[serde(default)]
    pub layout: LayoutConfig,

    #[serde(default)]
    pub analysis: AnalysisSection,

    #[serde(default, rename = "activity")]
    pub activities: Vec<RawActivity>,
}

/// `[analysis]` section.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct AnalysisSection {
    /// `"reject"` (default) or `"truncate"`.
    #[serde(default)]
    pub cycle_policy: CyclePolicy,
}

/// One `[[activity]]` entry.
///
/// Numbers are typed here but still range-checked by the validator, so a
/// `duration = 0` or `cost = -1.0` is reported the same way form input is.
#[derive(Debug, Clone, Deserialize)]
pub struct RawActivity {
    pub code: String,

    #[serde(default)]
    pub description: String,

    pub duration: i64,

    pub cost: f64,

    #[serde(default)]
    pub requirements: Vec<String>,
}

impl From<&RawActivity> for ActivityDraft {
    fn from(raw: &RawActivity) -> Self {
        ActivityDraft::new(
            raw.code.clone(),
            raw.description.clone(),
            raw.duration.to_string(),
            raw.cost.to_string(),
        )
        .with_requirements(raw.requirements.iter().cloned())
    }
}

/// Validated project: settings plus a repository holding the activities.
#[derive(Debug, Clone)]
pub struct ProjectFile {
    pub layout: LayoutConfig,
    pub analysis: AnalysisSection,
    pub repository: ActivityRepository,
}

impl ProjectFile {
    pub(crate) fn new_unchecked(
        layout: LayoutConfig,
        analysis: AnalysisSection,
        repository: ActivityRepository,
    ) -> Self {
        Self {
            layout,
            analysis,
            repository,
        }
    }
}
