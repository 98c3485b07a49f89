#![allow(dead_code)]

use pertdag::project::{Activity, ActivityDraft, ActivityRepository};

/// Builder for `ActivityDraft` with sensible defaults (duration 1, cost 0).
pub struct ActivityBuilder {
    draft: ActivityDraft,
}

impl ActivityBuilder {
    pub fn new(code: &str) -> Self {
        Self {
            draft: ActivityDraft::new(code, format!("activity {code}"), "1", "0"),
        }
    }

    pub fn description(mut self, description: &str) -> Self {
        self.draft.description = description.to_string();
        self
    }

    pub fn duration(mut self, duration: u64) -> Self {
        self.draft.duration = duration.to_string();
        self
    }

    pub fn cost(mut self, cost: f64) -> Self {
        self.draft.cost = cost.to_string();
        self
    }

    pub fn after(mut self, requirement: &str) -> Self {
        self.draft.requirements.push(requirement.to_string());
        self
    }

    pub fn build(self) -> ActivityDraft {
        self.draft
    }

    /// Bypass validation; used to construct snapshots with dangling
    /// references or cycles.
    pub fn build_unchecked(self) -> Activity {
        Activity {
            code: self.draft.code,
            description: self.draft.description,
            duration: self.draft.duration.parse().unwrap_or(1),
            cost: self.draft.cost.parse().unwrap_or(0.0),
            requirements: self.draft.requirements,
        }
    }
}

/// Builder for a populated `ActivityRepository`.
///
/// Activities are added through the validating API, in call order.
pub struct RepositoryBuilder {
    drafts: Vec<ActivityDraft>,
}

impl RepositoryBuilder {
    pub fn new() -> Self {
        Self { drafts: Vec::new() }
    }

    pub fn with(mut self, activity: ActivityBuilder) -> Self {
        self.drafts.push(activity.build());
        self
    }

    pub fn build(self) -> ActivityRepository {
        let mut repo = ActivityRepository::new();
        for draft in &self.drafts {
            repo.add(draft)
                .expect("Failed to add activity from builder");
        }
        repo
    }
}

impl Default for RepositoryBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// The four-activity example project: A(3), B(2) and C(4) after A, D(1)
/// after B and C.
pub fn diamond() -> ActivityRepository {
    RepositoryBuilder::new()
        .with(ActivityBuilder::new("A").duration(3).cost(100.0))
        .with(ActivityBuilder::new("B").duration(2).cost(50.0).after("A"))
        .with(ActivityBuilder::new("C").duration(4).cost(75.0).after("A"))
        .with(
            ActivityBuilder::new("D")
                .duration(1)
                .cost(25.0)
                .after("B")
                .after("C"),
        )
        .build()
}
