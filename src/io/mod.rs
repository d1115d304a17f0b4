//! File output helpers and CSV exports.

pub mod export;

use std::fs::{self, File};
use std::io::BufWriter;
use std::path::Path;

use crate::error::{PipelineError, Result};

/// Creates `path` for buffered writing, creating missing parent directories.
///
/// # Errors
///
/// Returns [`PipelineError::Write`] if a directory or the file cannot be
/// created.
pub fn create_file(path: &Path) -> Result<BufWriter<File>> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|source| PipelineError::Write {
            path: parent.to_path_buf(),
            source,
        })?;
    }
    let file = File::create(path).map_err(|source| PipelineError::Write {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(BufWriter::new(file))
}
