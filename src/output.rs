//! Rendered documents and writing them to the output directory.

use std::fs;

use camino::{Utf8Path, Utf8PathBuf};

use crate::error::OutputError;

/// A single rendered document to be written under the output directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Output {
    /// Destination path, relative to the output directory.
    pub path: Utf8PathBuf,
    pub data: String,
}

impl Output {
    pub fn html(path: impl Into<Utf8PathBuf>, data: impl Into<String>) -> Self {
        let mut path = path.into();
        if path.extension().is_none() {
            path.set_extension("html");
        }

        Self {
            path,
            data: data.into(),
        }
    }
}

/// Delete the output directory if it exists and create it anew.
pub fn clear_dir(dir: &Utf8Path) -> Result<(), OutputError> {
    if fs::metadata(dir).is_ok() {
        fs::remove_dir_all(dir).map_err(OutputError::Clear)?;
    }

    fs::create_dir_all(dir).map_err(OutputError::Clear)?;

    Ok(())
}

/// Writes every output under `dir`, creating parent directories as needed.
pub fn save_outputs(dir: &Utf8Path, outputs: &[Output]) -> Result<(), OutputError> {
    for output in outputs {
        let path = dir.join(&output.path);
        let write = |err| OutputError::Write(path.to_string(), err);

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(write)?;
        }

        fs::write(&path, &output.data).map_err(write)?;
    }

    Ok(())
}
