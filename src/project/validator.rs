// src/project/validator.rs

//! Mutation validation for activities.
//!
//! Every mutation of the repository goes through here first. The checks run
//! in a fixed order and the first failing check is reported:
//!
//! 1. required fields are present (after trimming),
//! 2. duration parses as a positive integer no larger than [`MAX_DURATION`],
//! 3. cost parses as a finite, non-negative number,
//! 4. the code is not taken (add only),
//! 5. every requirement names an existing activity.
//!
//! A requirement equal to the activity's own code is never an error; it is
//! silently stripped from the admitted activity.

use std::collections::HashSet;

use thiserror::Error;

use crate::project::{Activity, ActivityCode, ActivityDraft, Field};

/// Largest accepted duration. A chain of up to `u32::MAX` such activities
/// still sums within `u64`.
pub const MAX_DURATION: u64 = u32::MAX as u64;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("missing required field: {0}")]
    MissingField(Field),

    #[error("duration must be a positive integer up to 4294967295 (got '{0}')")]
    InvalidDuration(String),

    #[error("cost must be a non-negative number (got '{0}')")]
    InvalidCost(String),

    #[error("an activity with code '{0}' already exists")]
    DuplicateCode(ActivityCode),

    #[error("unknown requirement(s): {}", .0.join(", "))]
    UnknownRequirement(Vec<ActivityCode>),

    #[error("no activity with code '{0}'")]
    UnknownActivity(ActivityCode),
}

/// A draft whose scalar fields have been checked and parsed, but whose
/// requirements have not yet been resolved against a set of known codes.
#[derive(Debug, Clone)]
pub(crate) struct CheckedDraft {
    pub(crate) code: ActivityCode,
    description: String,
    duration: u64,
    cost: f64,
    requirements: Vec<ActivityCode>,
}

impl CheckedDraft {
    /// Resolve requirements with `is_known` and build the final activity.
    ///
    /// All unknown codes are reported together, in the order they appear.
    pub(crate) fn admit<F>(self, is_known: F) -> Result<Activity, ValidationError>
    where
        F: Fn(&str) -> bool,
    {
        let unknown: Vec<ActivityCode> = self
            .requirements
            .iter()
            .filter(|req| **req != self.code && !is_known(req.as_str()))
            .cloned()
            .collect();

        if !unknown.is_empty() {
            return Err(ValidationError::UnknownRequirement(unknown));
        }

        let code = self.code;
        let requirements = self
            .requirements
            .into_iter()
            .filter(|req| *req != code)
            .collect();

        Ok(Activity {
            code,
            description: self.description,
            duration: self.duration,
            cost: self.cost,
            requirements,
        })
    }
}

/// Validate a draft for insertion into `existing`.
pub fn validate_add(draft: &ActivityDraft, existing: &[Activity]) -> Result<Activity, ValidationError> {
    let checked = check_fields(draft)?;

    if existing.iter().any(|a| a.code == checked.code) {
        return Err(ValidationError::DuplicateCode(checked.code));
    }

    checked.admit(|code| existing.iter().any(|a| a.code == code))
}

/// Validate a draft that replaces the activity with the same code.
///
/// The code itself is never re-validated against the stored copy; it must
/// simply exist. Requirements are resolved against every *other* activity.
pub fn validate_update(
    draft: &ActivityDraft,
    existing: &[Activity],
) -> Result<Activity, ValidationError> {
    let checked = check_fields(draft)?;

    if !existing.iter().any(|a| a.code == checked.code) {
        return Err(ValidationError::UnknownActivity(checked.code));
    }

    let own = checked.code.clone();
    checked.admit(|code| code != own && existing.iter().any(|a| a.code == code))
}

/// Check and parse the scalar fields of a draft.
///
/// Requirements are trimmed, blank entries dropped and duplicates collapsed
/// (first occurrence wins).
pub(crate) fn check_fields(draft: &ActivityDraft) -> Result<CheckedDraft, ValidationError> {
    let code = required(&draft.code, Field::Code)?;
    let description = required(&draft.description, Field::Description)?;
    let duration_raw = required(&draft.duration, Field::Duration)?;
    let cost_raw = required(&draft.cost, Field::Cost)?;

    let duration = parse_duration(duration_raw)?;
    let cost = parse_cost(cost_raw)?;

    let mut seen = HashSet::new();
    let requirements = draft
        .requirements
        .iter()
        .map(|r| r.trim())
        .filter(|r| !r.is_empty())
        .filter(|r| seen.insert(*r))
        .map(str::to_string)
        .collect();

    Ok(CheckedDraft {
        code: code.to_string(),
        description: description.to_string(),
        duration,
        cost,
        requirements,
    })
}

fn required(value: &str, field: Field) -> Result<&str, ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        Err(ValidationError::MissingField(field))
    } else {
        Ok(trimmed)
    }
}

fn parse_duration(raw: &str) -> Result<u64, ValidationError> {
    match raw.parse::<u64>() {
        Ok(d) if (1..=MAX_DURATION).contains(&d) => Ok(d),
        _ => Err(ValidationError::InvalidDuration(raw.to_string())),
    }
}

fn parse_cost(raw: &str) -> Result<f64, ValidationError> {
    match raw.parse::<f64>() {
        Ok(c) if c.is_finite() && c >= 0.0 => Ok(c),
        _ => Err(ValidationError::InvalidCost(raw.to_string())),
    }
}
