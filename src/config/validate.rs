// src/config/validate.rs

use std::collections::HashSet;

use crate::config::model::{ProjectFile, RawProjectFile};
use crate::dag::LayoutConfig;
use crate::errors::{PertError, Result};
use crate::project::validator::check_fields;
use crate::project::{Activity, ActivityDraft, ActivityRepository, ValidationError};

impl TryFrom<RawProjectFile> for ProjectFile {
    type Error = PertError;

    fn try_from(raw: RawProjectFile) -> std::result::Result<Self, Self::Error> {
        validate_layout(&raw.layout)?;
        let activities = validate_activities(&raw)?;
        Ok(ProjectFile::new_unchecked(
            raw.layout,
            raw.analysis,
            ActivityRepository::new_unchecked(activities),
        ))
    }
}

fn validate_layout(layout: &LayoutConfig) -> Result<()> {
    let spacings = [
        ("horizontal_spacing", layout.horizontal_spacing),
        ("vertical_spacing", layout.vertical_spacing),
    ];
    for (name, value) in spacings {
        if !value.is_finite() || value <= 0.0 {
            return Err(PertError::ConfigError(format!(
                "[layout].{name} must be a positive number (got {value})"
            )));
        }
    }

    let offsets = [("x_offset", layout.x_offset), ("y_offset", layout.y_offset)];
    for (name, value) in offsets {
        if !value.is_finite() {
            return Err(PertError::ConfigError(format!(
                "[layout].{name} must be finite (got {value})"
            )));
        }
    }

    Ok(())
}

/// Validate every activity as if it were added through the repository,
/// except that requirements may point forward to activities defined later
/// in the file.
fn validate_activities(raw: &RawProjectFile) -> Result<Vec<Activity>> {
    let all_codes: HashSet<&str> = raw.activities.iter().map(|a| a.code.trim()).collect();

    let mut seen: HashSet<String> = HashSet::new();
    let mut activities = Vec::with_capacity(raw.activities.len());

    for (index, entry) in raw.activities.iter().enumerate() {
        let draft = ActivityDraft::from(entry);
        let fail = |source: ValidationError| PertError::InvalidActivity { index, source };

        let checked = check_fields(&draft).map_err(fail)?;
        if !seen.insert(checked.code.clone()) {
            return Err(fail(ValidationError::DuplicateCode(checked.code)));
        }

        let activity = checked
            .admit(|code| all_codes.contains(code))
            .map_err(fail)?;
        activities.push(activity);
    }

    Ok(activities)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::model::RawActivity;
    use crate::project::Field;

    fn raw(code: &str, duration: i64, reqs: &[&str]) -> RawActivity {
        RawActivity {
            code: code.to_string(),
            description: format!("{code} work"),
            duration,
            cost: 1.0,
            requirements: reqs.iter().map(|s| s.to_string()).collect(),
        }
    }

    fn file(activities: Vec<RawActivity>) -> RawProjectFile {
        RawProjectFile {
            activities,
            ..RawProjectFile::default()
        }
    }

    #[test]
    fn forward_references_are_allowed() {
        let project = ProjectFile::try_from(file(vec![raw("B", 1, &["A"]), raw("A", 1, &[])])).unwrap();
        let codes: Vec<&str> = project
            .repository
            .activities()
            .iter()
            .map(|a| a.code.as_str())
            .collect();
        assert_eq!(codes, vec!["B", "A"]);
    }

    #[test]
    fn duplicate_codes_are_rejected_with_position() {
        let err = ProjectFile::try_from(file(vec![raw("A", 1, &[]), raw("A", 2, &[])])).unwrap_err();
        match err {
            PertError::InvalidActivity { index, source } => {
                assert_eq!(index, 1);
                assert_eq!(source, ValidationError::DuplicateCode("A".into()));
            }
            other => panic!("expected InvalidActivity, got {other:?}"),
        }
    }

    #[test]
    fn zero_duration_is_rejected() {
        let err = ProjectFile::try_from(file(vec![raw("A", 0, &[])])).unwrap_err();
        assert!(matches!(
            err,
            PertError::InvalidActivity {
                source: ValidationError::InvalidDuration(_),
                ..
            }
        ));
    }

    #[test]
    fn blank_description_is_missing() {
        let mut entry = raw("A", 1, &[]);
        entry.description = String::new();
        let err = ProjectFile::try_from(file(vec![entry])).unwrap_err();
        assert!(matches!(
            err,
            PertError::InvalidActivity {
                source: ValidationError::MissingField(Field::Description),
                ..
            }
        ));
    }

    #[test]
    fn non_positive_spacing_is_rejected() {
        let mut raw_file = file(vec![]);
        raw_file.layout.vertical_spacing = 0.0;
        let err = ProjectFile::try_from(raw_file).unwrap_err();
        match err {
            PertError::ConfigError(msg) => assert!(msg.contains("vertical_spacing")),
            other => panic!("expected ConfigError, got {other:?}"),
        }
    }
}
