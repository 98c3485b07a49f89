// src/engine/mod.rs

//! Edit session for an interactive front end.
//!
//! The session is a synchronous, deterministic state machine: it consumes one
//! [`ProjectEdit`] at a time, routes it through validation and the
//! repository, and answers with a [`SessionStep`] carrying the outcome plus
//! freshly recomputed views. It never performs IO and never caches derived
//! data between steps.

use crate::dag::ProjectViews;
use crate::project::{Activity, ActivityCode, ActivityDraft, ValidationError};

/// An edit requested by the user.
#[derive(Debug, Clone)]
pub enum ProjectEdit {
    Add(ActivityDraft),
    Update(ActivityDraft),
    /// Delete, asking for confirmation first if anything depends on it.
    Delete(ActivityCode),
    /// Delete and strip the code from every dependent's requirements.
    ConfirmDelete(ActivityCode),
}

/// What an edit did to the repository.
#[derive(Debug, Clone, PartialEq)]
pub enum EditOutcome {
    Added(Activity),
    Updated(Activity),
    Removed {
        activity: Activity,
        /// Activities that lost the deleted code from their requirements.
        cascaded: Vec<ActivityCode>,
    },
    /// Nothing changed; the caller must confirm a cascading delete.
    NeedsConfirmation {
        code: ActivityCode,
        dependents: Vec<ActivityCode>,
    },
    /// Nothing changed; the edit failed validation.
    Rejected(ValidationError),
}

impl EditOutcome {
    /// Whether the repository was modified.
    pub fn changed(&self) -> bool {
        matches!(
            self,
            EditOutcome::Added(_) | EditOutcome::Updated(_) | EditOutcome::Removed { .. }
        )
    }
}

/// Result of a single [`Session::step`].
#[derive(Debug, Clone)]
pub struct SessionStep {
    pub outcome: EditOutcome,
    /// Recomputed views when the repository changed and analysis succeeded.
    pub views: Option<ProjectViews>,
}

pub mod session;

pub use session::Session;
