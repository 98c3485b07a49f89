// src/engine/session.rs

//! Pure edit-session state machine.

use tracing::{debug, warn};

use crate::dag::{AnalysisError, LayoutConfig, ProjectViews, compute_views};
use crate::engine::{EditOutcome, ProjectEdit, SessionStep};
use crate::project::{ActivityRepository, DeleteOutcome};
use crate::types::CyclePolicy;

/// Owns the repository and the analysis settings for one editing session.
#[derive(Debug, Clone)]
pub struct Session {
    repository: ActivityRepository,
    layout: LayoutConfig,
    policy: CyclePolicy,
}

impl Session {
    pub fn new(repository: ActivityRepository, layout: LayoutConfig, policy: CyclePolicy) -> Self {
        Self {
            repository,
            layout,
            policy,
        }
    }

    pub fn repository(&self) -> &ActivityRepository {
        &self.repository
    }

    /// Recompute all views from the current repository snapshot.
    pub fn views(&self) -> Result<ProjectViews, AnalysisError> {
        compute_views(self.repository.activities(), &self.layout, self.policy)
    }

    /// Apply one edit and report what happened.
    pub fn step(&mut self, edit: ProjectEdit) -> SessionStep {
        let outcome = self.apply(edit);

        let views = if outcome.changed() {
            match self.views() {
                Ok(views) => Some(views),
                Err(err) => {
                    warn!(error = %err, "edit applied but project cannot be analysed");
                    None
                }
            }
        } else {
            None
        };

        SessionStep { outcome, views }
    }

    fn apply(&mut self, edit: ProjectEdit) -> EditOutcome {
        let result = match edit {
            ProjectEdit::Add(draft) => self.repository.add(&draft).map(EditOutcome::Added),
            ProjectEdit::Update(draft) => self.repository.update(&draft).map(EditOutcome::Updated),
            ProjectEdit::Delete(code) => {
                self.repository.delete(&code).map(|outcome| match outcome {
                    DeleteOutcome::RemovedDirectly(activity) => EditOutcome::Removed {
                        activity,
                        cascaded: Vec::new(),
                    },
                    DeleteOutcome::RequiresConfirmation { dependents } => {
                        EditOutcome::NeedsConfirmation { code, dependents }
                    }
                })
            }
            ProjectEdit::ConfirmDelete(code) => {
                self.repository
                    .confirm_delete(&code)
                    .map(|removal| EditOutcome::Removed {
                        activity: removal.activity,
                        cascaded: removal.cascaded,
                    })
            }
        };

        result.unwrap_or_else(|err| {
            debug!(error = %err, "edit rejected");
            EditOutcome::Rejected(err)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::project::{ActivityDraft, ValidationError};

    fn session() -> Session {
        Session::new(
            ActivityRepository::new(),
            LayoutConfig::default(),
            CyclePolicy::Reject,
        )
    }

    #[test]
    fn add_recomputes_views() {
        let mut s = session();
        let step = s.step(ProjectEdit::Add(ActivityDraft::new("A", "a", "3", "10")));
        assert!(matches!(step.outcome, EditOutcome::Added(_)));

        let views = step.views.expect("views after add");
        assert_eq!(views.summary.total_duration, 3);
        assert_eq!(views.layout.nodes.len(), 1);
    }

    #[test]
    fn rejected_edit_has_no_views() {
        let mut s = session();
        let step = s.step(ProjectEdit::Add(ActivityDraft::new("A", "a", "0", "10")));
        assert_eq!(
            step.outcome,
            EditOutcome::Rejected(ValidationError::InvalidDuration("0".into()))
        );
        assert!(step.views.is_none());
    }

    #[test]
    fn delete_with_dependents_then_confirm() {
        let mut s = session();
        s.step(ProjectEdit::Add(ActivityDraft::new("A", "a", "3", "1")));
        s.step(ProjectEdit::Add(
            ActivityDraft::new("B", "b", "2", "1").with_requirement("A"),
        ));

        let step = s.step(ProjectEdit::Delete("A".into()));
        assert_eq!(
            step.outcome,
            EditOutcome::NeedsConfirmation {
                code: "A".into(),
                dependents: vec!["B".into()]
            }
        );
        assert!(step.views.is_none());
        assert!(s.repository().contains("A"));

        let step = s.step(ProjectEdit::ConfirmDelete("A".into()));
        match step.outcome {
            EditOutcome::Removed { activity, cascaded } => {
                assert_eq!(activity.code, "A");
                assert_eq!(cascaded, vec!["B".to_string()]);
            }
            other => panic!("expected Removed, got {other:?}"),
        }
        let views = step.views.expect("views after delete");
        assert_eq!(views.summary.critical_path, vec!["B"]);
    }

    #[test]
    fn update_that_creates_cycle_yields_no_views() {
        let mut s = session();
        s.step(ProjectEdit::Add(ActivityDraft::new("A", "a", "3", "1")));
        s.step(ProjectEdit::Add(
            ActivityDraft::new("B", "b", "2", "1").with_requirement("A"),
        ));

        let step = s.step(ProjectEdit::Update(
            ActivityDraft::new("A", "a", "3", "1").with_requirement("B"),
        ));
        assert!(matches!(step.outcome, EditOutcome::Updated(_)));
        assert!(step.views.is_none());
        assert!(s.views().is_err());
    }
}
