// src/config/loader.rs

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::config::model::{ProjectFile, RawProjectFile};
use crate::errors::Result;

/// Load a project file from a given path and return the raw `RawProjectFile`.
///
/// This only performs TOML deserialization; it does **not** validate
/// activities. Use [`load_and_validate`] for that.
pub fn load_from_path(path: impl AsRef<Path>) -> Result<RawProjectFile> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path)?;

    let raw: RawProjectFile = toml::from_str(&contents)?;
    debug!(path = %path.display(), activities = raw.activities.len(), "project file parsed");

    Ok(raw)
}

/// Load a project file from path and validate it.
///
/// - Reads TOML.
/// - Applies defaults for `[layout]` and `[analysis]`.
/// - Runs every activity through the mutation validator and checks that
///   requirements name activities defined somewhere in the file.
pub fn load_and_validate(path: impl AsRef<Path>) -> Result<ProjectFile> {
    let raw = load_from_path(&path)?;
    let project = ProjectFile::try_from(raw)?;
    Ok(project)
}

/// Default project file location: `Project.toml` in the working directory.
pub fn default_project_path() -> PathBuf {
    PathBuf::from("Project.toml")
}
