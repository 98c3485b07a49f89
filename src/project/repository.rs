// src/project/repository.rs

//! In-memory activity repository.

use tracing::{debug, info};

use crate::project::validator::{validate_add, validate_update};
use crate::project::{Activity, ActivityCode, ActivityDraft, ValidationError};

/// Result of a delete request.
#[derive(Debug, Clone, PartialEq)]
pub enum DeleteOutcome {
    /// Nothing depended on the activity; it has been removed.
    RemovedDirectly(Activity),
    /// Other activities list the code as a requirement. Nothing was removed;
    /// call [`ActivityRepository::confirm_delete`] to proceed with the
    /// cascading delete.
    RequiresConfirmation { dependents: Vec<ActivityCode> },
}

/// What a confirmed delete changed.
#[derive(Debug, Clone, PartialEq)]
pub struct Removal {
    pub activity: Activity,
    /// Activities whose requirements had the deleted code stripped.
    pub cascaded: Vec<ActivityCode>,
}

/// Owns all activities, in insertion order.
///
/// Iteration order is significant: layout slots and critical-path tie
/// breaking both follow it.
#[derive(Debug, Clone, Default)]
pub struct ActivityRepository {
    activities: Vec<Activity>,
}

impl ActivityRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap activities that were already validated elsewhere (project loader).
    pub(crate) fn new_unchecked(activities: Vec<Activity>) -> Self {
        Self { activities }
    }

    /// Linear snapshot of the activities, in insertion order.
    pub fn activities(&self) -> &[Activity] {
        &self.activities
    }

    pub fn len(&self) -> usize {
        self.activities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.activities.is_empty()
    }

    pub fn get(&self, code: &str) -> Option<&Activity> {
        self.activities.iter().find(|a| a.code == code)
    }

    pub fn contains(&self, code: &str) -> bool {
        self.get(code).is_some()
    }

    /// Validate `draft` and append it.
    pub fn add(&mut self, draft: &ActivityDraft) -> Result<Activity, ValidationError> {
        let activity = validate_add(draft, &self.activities)?;
        info!(code = %activity.code, duration = activity.duration, "activity added");
        self.activities.push(activity.clone());
        Ok(activity)
    }

    /// Validate `draft` and replace the stored activity with the same code,
    /// keeping its position.
    pub fn update(&mut self, draft: &ActivityDraft) -> Result<Activity, ValidationError> {
        let activity = validate_update(draft, &self.activities)?;
        let slot = self
            .activities
            .iter_mut()
            .find(|a| a.code == activity.code)
            .ok_or_else(|| ValidationError::UnknownActivity(activity.code.clone()))?;
        *slot = activity.clone();
        info!(code = %activity.code, "activity updated");
        Ok(activity)
    }

    /// Codes of the activities that list `code` as a requirement.
    ///
    /// This is the read-only impact query behind [`Self::delete`].
    pub fn dependents_of(&self, code: &str) -> Vec<ActivityCode> {
        self.activities
            .iter()
            .filter(|a| a.requires(code))
            .map(|a| a.code.clone())
            .collect()
    }

    /// Delete `code` if nothing depends on it; otherwise report the
    /// dependents and leave the repository untouched.
    pub fn delete(&mut self, code: &str) -> Result<DeleteOutcome, ValidationError> {
        if !self.contains(code) {
            return Err(ValidationError::UnknownActivity(code.to_string()));
        }

        let dependents = self.dependents_of(code);
        if !dependents.is_empty() {
            debug!(code = %code, ?dependents, "delete needs confirmation");
            return Ok(DeleteOutcome::RequiresConfirmation { dependents });
        }

        let removal = self.confirm_delete(code)?;
        Ok(DeleteOutcome::RemovedDirectly(removal.activity))
    }

    /// Remove `code` and strip it from every remaining activity's
    /// requirements.
    pub fn confirm_delete(&mut self, code: &str) -> Result<Removal, ValidationError> {
        let index = self
            .activities
            .iter()
            .position(|a| a.code == code)
            .ok_or_else(|| ValidationError::UnknownActivity(code.to_string()))?;

        let activity = self.activities.remove(index);

        let mut cascaded = Vec::new();
        for other in self.activities.iter_mut() {
            let before = other.requirements.len();
            other.requirements.retain(|r| r != code);
            if other.requirements.len() != before {
                cascaded.push(other.code.clone());
            }
        }

        info!(code = %code, ?cascaded, "activity deleted");
        Ok(Removal { activity, cascaded })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn repo_abcd() -> ActivityRepository {
        let mut repo = ActivityRepository::new();
        repo.add(&ActivityDraft::new("A", "a", "3", "1")).unwrap();
        repo.add(&ActivityDraft::new("B", "b", "2", "1").with_requirement("A"))
            .unwrap();
        repo.add(&ActivityDraft::new("C", "c", "4", "1").with_requirement("A"))
            .unwrap();
        repo.add(&ActivityDraft::new("D", "d", "1", "1").with_requirements(["B", "C"]))
            .unwrap();
        repo
    }

    #[test]
    fn delete_leaf_removes_directly() {
        let mut repo = repo_abcd();
        match repo.delete("D").unwrap() {
            DeleteOutcome::RemovedDirectly(a) => assert_eq!(a.code, "D"),
            other => panic!("expected direct removal, got {other:?}"),
        }
        assert_eq!(repo.len(), 3);
    }

    #[test]
    fn delete_with_dependents_needs_confirmation_and_keeps_state() {
        let mut repo = repo_abcd();
        let outcome = repo.delete("A").unwrap();
        assert_eq!(
            outcome,
            DeleteOutcome::RequiresConfirmation {
                dependents: vec!["B".into(), "C".into()]
            }
        );
        assert!(repo.contains("A"));
    }

    #[test]
    fn confirmed_delete_cascades_requirement_cleanup() {
        let mut repo = repo_abcd();
        let removal = repo.confirm_delete("A").unwrap();
        assert_eq!(removal.cascaded, vec!["B".to_string(), "C".to_string()]);
        assert!(!repo.contains("A"));
        assert!(repo.activities().iter().all(|a| !a.requires("A")));
    }

    #[test]
    fn update_keeps_position() {
        let mut repo = repo_abcd();
        repo.update(&ActivityDraft::new("B", "b2", "9", "1")).unwrap();
        let codes: Vec<&str> = repo.activities().iter().map(|a| a.code.as_str()).collect();
        assert_eq!(codes, vec!["A", "B", "C", "D"]);
        assert_eq!(repo.get("B").unwrap().duration, 9);
        assert!(repo.get("B").unwrap().requirements.is_empty());
    }

    #[test]
    fn unknown_codes_are_reported() {
        let mut repo = repo_abcd();
        assert_eq!(
            repo.delete("Z"),
            Err(ValidationError::UnknownActivity("Z".into()))
        );
        assert_eq!(
            repo.confirm_delete("Z"),
            Err(ValidationError::UnknownActivity("Z".into()))
        );
    }
}
