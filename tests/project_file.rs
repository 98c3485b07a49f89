// tests/project_file.rs

use std::io::Write;

use tempfile::NamedTempFile;

use pertdag::config::load_and_validate;
use pertdag::dag::compute_summary;
use pertdag::errors::PertError;
use pertdag::project::ValidationError;
use pertdag::types::CyclePolicy;

fn project_file(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    write!(file, "{contents}").unwrap();
    file
}

#[test]
fn loads_activities_in_file_order_with_defaults() {
    let file = project_file(
        r#"
[[activity]]
code = "D"
description = "Deploy"
duration = 1
cost = 25.0
requirements = ["B", "C"]

[[activity]]
code = "A"
description = "Design"
duration = 3
cost = 100.0

[[activity]]
code = "B"
description = "Backend"
duration = 2
cost = 50.0
requirements = ["A"]

[[activity]]
code = "C"
description = "Client"
duration = 4
cost = 75.5
requirements = ["A", "C"]
"#,
    );

    let project = load_and_validate(file.path()).unwrap();
    assert_eq!(project.analysis.cycle_policy, CyclePolicy::Reject);
    assert_eq!(project.layout.horizontal_spacing, 250.0);

    let codes: Vec<&str> = project
        .repository
        .activities()
        .iter()
        .map(|a| a.code.as_str())
        .collect();
    assert_eq!(codes, vec!["D", "A", "B", "C"]);
    assert_eq!(
        project.repository.get("C").unwrap().requirements,
        vec!["A".to_string()],
        "self-reference stripped on load"
    );

    let summary = compute_summary(project.repository.activities(), CyclePolicy::Reject).unwrap();
    assert_eq!(summary.critical_path, vec!["A", "C", "D"]);
    assert_eq!(summary.total_duration, 8);
}

#[test]
fn reads_layout_and_analysis_sections() {
    let file = project_file(
        r#"
[layout]
horizontal_spacing = 100.0
y_offset = 0.0

[analysis]
cycle_policy = "truncate"
"#,
    );

    let project = load_and_validate(file.path()).unwrap();
    assert_eq!(project.analysis.cycle_policy, CyclePolicy::Truncate);
    assert_eq!(project.layout.horizontal_spacing, 100.0);
    assert_eq!(project.layout.vertical_spacing, 150.0);
    assert_eq!(project.layout.y_offset, 0.0);
    assert!(project.repository.is_empty());
}

#[test]
fn unknown_requirement_returns_structured_error() {
    let file = project_file(
        r#"
[[activity]]
code = "A"
description = "a"
duration = 1
cost = 0.0
requirements = ["Z", "Y"]
"#,
    );

    match load_and_validate(file.path()) {
        Err(PertError::InvalidActivity { index, source }) => {
            assert_eq!(index, 0);
            assert_eq!(
                source,
                ValidationError::UnknownRequirement(vec!["Z".into(), "Y".into()])
            );
        }
        Err(e) => panic!("Expected InvalidActivity, got: {:?}", e),
        Ok(_) => panic!("Expected error, got Ok"),
    }
}

#[test]
fn negative_cost_is_rejected() {
    let file = project_file(
        r#"
[[activity]]
code = "A"
description = "a"
duration = 1
cost = -5.0
"#,
    );

    let err = load_and_validate(file.path()).unwrap_err();
    assert!(
        matches!(
            err,
            PertError::InvalidActivity {
                source: ValidationError::InvalidCost(_),
                ..
            }
        ),
        "got {err:?}"
    );
}

#[test]
fn unknown_cycle_policy_is_a_toml_error() {
    let file = project_file(
        r#"
[analysis]
cycle_policy = "ignore"
"#,
    );

    assert!(matches!(
        load_and_validate(file.path()),
        Err(PertError::TomlError(_))
    ));
}

#[test]
fn missing_file_is_an_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("Project.toml");
    assert!(matches!(load_and_validate(&path), Err(PertError::IoError(_))));
}
