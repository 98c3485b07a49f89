// src/project/activity.rs

use std::fmt;

use serde::Serialize;

use crate::project::ActivityCode;

/// A unit of project work.
///
/// Activities are only ever constructed by the validator (or by the project
/// loader, which runs the same checks), so every stored activity has a
/// positive duration, a finite non-negative cost and no self-reference.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Activity {
    pub code: ActivityCode,
    pub description: String,
    pub duration: u64,
    pub cost: f64,
    /// Codes of the activities that must finish before this one starts.
    pub requirements: Vec<ActivityCode>,
}

impl Activity {
    /// Whether `code` is listed in this activity's requirements.
    pub fn requires(&self, code: &str) -> bool {
        self.requirements.iter().any(|r| r == code)
    }
}

/// Unvalidated activity input, exactly as a form would collect it.
///
/// Numeric fields stay textual so that "abc" or "" can be reported as a
/// validation failure instead of being rejected at the type level.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActivityDraft {
    pub code: String,
    pub description: String,
    pub duration: String,
    pub cost: String,
    pub requirements: Vec<String>,
}

impl ActivityDraft {
    pub fn new(
        code: impl Into<String>,
        description: impl Into<String>,
        duration: impl Into<String>,
        cost: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            description: description.into(),
            duration: duration.into(),
            cost: cost.into(),
            requirements: Vec::new(),
        }
    }

    pub fn with_requirement(mut self, code: impl Into<String>) -> Self {
        self.requirements.push(code.into());
        self
    }

    pub fn with_requirements<I, S>(mut self, codes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.requirements.extend(codes.into_iter().map(Into::into));
        self
    }
}

/// Prefill a draft from a stored activity (editing keeps the code).
impl From<&Activity> for ActivityDraft {
    fn from(activity: &Activity) -> Self {
        Self {
            code: activity.code.clone(),
            description: activity.description.clone(),
            duration: activity.duration.to_string(),
            cost: activity.cost.to_string(),
            requirements: activity.requirements.clone(),
        }
    }
}

/// Required draft fields, used to report which one is missing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Code,
    Description,
    Duration,
    Cost,
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Field::Code => "code",
            Field::Description => "description",
            Field::Duration => "duration",
            Field::Cost => "cost",
        };
        f.write_str(name)
    }
}
