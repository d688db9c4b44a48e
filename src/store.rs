//! Whole-document persistence for the workout collection.
//!
//! The document is a single JSON object keyed by workout name. Saves go to a
//! sibling `*.tmp` file first and are renamed over the real document, so a
//! failed write never leaves a truncated file behind.

use std::collections::HashSet;
use std::fs::{self, File};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use serde::de::Error as _;
use serde::Serialize;
use tracing::{debug, error, info, warn};

use crate::error::{Result, WorkoutError};
use crate::models::WorkoutMap;

#[derive(Clone, Debug)]
pub struct Store {
    path: PathBuf,
}

impl Store {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Store { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the document. A missing file is an empty collection; anything
    /// else that goes wrong is reported.
    pub fn load(&self) -> Result<WorkoutMap> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                info!(path = %self.path.display(), "no workout document yet, starting empty");
                return Ok(WorkoutMap::new());
            }
            Err(source) => {
                error!(path = %self.path.display(), %source, "failed to read workout document");
                return Err(WorkoutError::Io {
                    path: self.path.clone(),
                    source,
                });
            }
        };

        let workouts: WorkoutMap = serde_json::from_str(&contents).map_err(|source| {
            error!(path = %self.path.display(), %source, "failed to parse workout document");
            WorkoutError::Parse {
                path: self.path.clone(),
                source,
            }
        })?;

        if let Err(message) = check_document(&workouts) {
            error!(path = %self.path.display(), %message, "workout document holds invalid data");
            return Err(WorkoutError::Parse {
                path: self.path.clone(),
                source: serde_json::Error::custom(message),
            });
        }

        info!(
            path = %self.path.display(),
            workouts = workouts.len(),
            "loaded workout document"
        );
        Ok(workouts)
    }

    /// Overwrites the document with `workouts`.
    pub fn save(&self, workouts: &WorkoutMap) -> Result<()> {
        let bytes = to_document_bytes(workouts).map_err(|source| WorkoutError::Serialize {
            path: self.path.clone(),
            source,
        })?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|source| self.io_error(parent, source))?;
        }

        let temp_path = self.temp_path();
        if let Err(source) = write_synced(&temp_path, &bytes) {
            let _ = fs::remove_file(&temp_path);
            return Err(self.io_error(&temp_path, source));
        }

        fs::rename(&temp_path, &self.path).map_err(|source| {
            let _ = fs::remove_file(&temp_path);
            self.io_error(&self.path, source)
        })?;
        // The new document is already in place; a failed directory flush only
        // weakens durability, so it is logged rather than reported.
        if let Some(dir) = self.path.parent() {
            if let Err(source) = sync_dir(dir) {
                warn!(path = %dir.display(), %source, "failed to flush directory after save");
            }
        }

        debug!(
            path = %self.path.display(),
            workouts = workouts.len(),
            bytes = bytes.len(),
            "saved workout document"
        );
        Ok(())
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_else(|| "workouts.json".into());
        name.push(".tmp");
        self.path.with_file_name(name)
    }

    fn io_error(&self, path: &Path, source: std::io::Error) -> WorkoutError {
        error!(path = %path.display(), %source, "failed to write workout document");
        WorkoutError::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

// Four-space indentation, matching documents written by earlier versions.
fn to_document_bytes(workouts: &WorkoutMap) -> serde_json::Result<Vec<u8>> {
    let mut bytes = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut serializer = serde_json::Serializer::with_formatter(&mut bytes, formatter);
    workouts.serialize(&mut serializer)?;
    Ok(bytes)
}

/// Rejects documents that parse but break the collection's rules: exercise
/// names repeated within a workout, targets below 1, and weights that are
/// negative or not finite.
fn check_document(workouts: &WorkoutMap) -> std::result::Result<(), String> {
    for (workout, exercises) in workouts {
        let mut seen = HashSet::new();
        for ex in exercises {
            if !seen.insert(ex.name.as_str()) {
                return Err(format!("'{workout}' lists '{}' more than once", ex.name));
            }
            if ex.target_sets < 1 || ex.target_reps < 1 {
                return Err(format!(
                    "'{}' in '{workout}' has {} sets x {} reps; both must be at least 1",
                    ex.name, ex.target_sets, ex.target_reps
                ));
            }
            let bad_weight = ex
                .tracking_history
                .iter()
                .flat_map(|session| &session.sets)
                .any(|set| !set.weight.is_finite() || set.weight < 0.0);
            if bad_weight {
                return Err(format!(
                    "'{}' in '{workout}' has a negative or invalid weight",
                    ex.name
                ));
            }
        }
    }
    Ok(())
}

// Flushes the directory entry so the rename itself survives a power loss.
#[cfg(unix)]
fn sync_dir(dir: &Path) -> std::io::Result<()> {
    let dir = if dir.as_os_str().is_empty() {
        Path::new(".")
    } else {
        dir
    };
    File::open(dir)?.sync_all()
}

#[cfg(not(unix))]
fn sync_dir(_dir: &Path) -> std::io::Result<()> {
    Ok(())
}

fn write_synced(path: &Path, bytes: &[u8]) -> std::io::Result<()> {
    let mut file = File::create(path)?;
    file.write_all(bytes)?;
    file.sync_all()
}
