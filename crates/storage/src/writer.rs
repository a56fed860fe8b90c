use std::io::Write;
use std::path::{Path, PathBuf};

use drawsheet_core::{OutputConfig, OutputFormat, ResultSet};
use tempfile::NamedTempFile;
use thiserror::Error;
use tracing::info;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Failed to move output into place: {0}")]
    Persist(#[from] tempfile::PersistError),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WriteOutcome {
    Written { path: PathBuf, rows: usize },
    /// Nothing to write for this session; no file was touched.
    Skipped { path: PathBuf },
}

/// Write one session's results to `path`.
///
/// The file is assembled next to its destination and renamed into place, so a
/// failure never leaves a truncated file behind.
pub fn write_result_set(
    set: &ResultSet,
    path: &Path,
    format: OutputFormat,
) -> Result<WriteOutcome, StorageError> {
    if set.is_empty() {
        return Ok(WriteOutcome::Skipped { path: path.to_path_buf() });
    }

    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    std::fs::create_dir_all(dir)?;
    let mut tmp = NamedTempFile::new_in(dir)?;

    match format {
        OutputFormat::Csv => {
            let mut wtr = csv::Writer::from_writer(tmp.as_file_mut());
            for row in set {
                wtr.serialize(row)?;
            }
            wtr.flush()?;
        }
        OutputFormat::Json => {
            serde_json::to_writer_pretty(tmp.as_file_mut(), &set.rows)?;
            tmp.as_file_mut().write_all(b"\n")?;
        }
    }

    tmp.persist(path)?;
    info!(session = %set.session, rows = set.len(), path = %path.display(), "results saved");
    Ok(WriteOutcome::Written { path: path.to_path_buf(), rows: set.len() })
}

/// Write every set to its configured file.
pub fn write_results<'a>(
    sets: impl IntoIterator<Item = &'a ResultSet>,
    output: &OutputConfig,
) -> Result<Vec<WriteOutcome>, StorageError> {
    sets.into_iter()
        .map(|set| write_result_set(set, &output.path_for(set.session), output.format))
        .collect()
}
