// src/project/mod.rs

//! Activity model and the mutable project aggregate.
//!
//! - [`activity`] defines [`Activity`] and the raw [`ActivityDraft`] form input.
//! - [`validator`] gatekeeps every mutation against the domain invariants.
//! - [`repository`] owns the activities in insertion order and applies
//!   validated mutations, including cascading deletes.

pub mod activity;
pub mod repository;
pub mod validator;

/// Canonical activity identifier type used throughout the crate.
pub type ActivityCode = String;

pub use activity::{Activity, ActivityDraft, Field};
pub use repository::{ActivityRepository, DeleteOutcome, Removal};
pub use validator::{MAX_DURATION, ValidationError, validate_add, validate_update};
