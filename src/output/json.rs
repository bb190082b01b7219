//! JSON persistence
//!
//! Files are written as UTF-8 with two-space indentation and non-ASCII
//! characters left unescaped. Each write goes to a sibling temporary file
//! that is then renamed over the target, so an interrupted write never
//! leaves a truncated file behind.

use crate::output::traits::{OutputError, OutputResult, OutputSink};
use crate::record::{CaseRecord, PlaylistResult};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Serializes a value to pretty JSON at `path`
///
/// Missing parent directories are created. An existing file is replaced.
///
/// # Arguments
///
/// * `value` - The value to serialize
/// * `path` - Destination file path
///
/// # Returns
///
/// * `Ok(())` - File written
/// * `Err(OutputError)` - Directory creation, serialization, or write failed
pub fn save_json<T: Serialize + ?Sized>(value: &T, path: &Path) -> OutputResult<()> {
    let io_error = |source| OutputError::Io {
        path: path.display().to_string(),
        source,
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(io_error)?;
    }

    let mut json = serde_json::to_vec_pretty(value).map_err(|source| OutputError::Json {
        path: path.display().to_string(),
        source,
    })?;
    json.push(b'\n');

    let tmp_path = temp_path_for(path);
    let written = fs::File::create(&tmp_path)
        .and_then(|mut file| {
            file.write_all(&json)?;
            file.sync_all()
        })
        .and_then(|()| fs::rename(&tmp_path, path));

    if let Err(e) = written {
        let _ = fs::remove_file(&tmp_path);
        return Err(io_error(e));
    }

    tracing::debug!("Wrote {} bytes to {}", json.len(), path.display());
    Ok(())
}

/// Reads and deserializes a JSON file
pub fn load_json<T: DeserializeOwned>(path: &Path) -> OutputResult<T> {
    let content = fs::read_to_string(path).map_err(|source| OutputError::Io {
        path: path.display().to_string(),
        source,
    })?;

    serde_json::from_str(&content).map_err(|source| OutputError::Json {
        path: path.display().to_string(),
        source,
    })
}

/// `cases.json` -> `.cases.json.tmp` in the same directory
fn temp_path_for(path: &Path) -> PathBuf {
    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| "output".to_string());
    path.with_file_name(format!(".{}.tmp", file_name))
}

/// Sink writing the playlist and case records to two JSON files
#[derive(Debug, Clone)]
pub struct JsonSink {
    playlist_path: PathBuf,
    cases_path: PathBuf,
}

impl JsonSink {
    pub fn new(playlist_path: impl Into<PathBuf>, cases_path: impl Into<PathBuf>) -> Self {
        Self {
            playlist_path: playlist_path.into(),
            cases_path: cases_path.into(),
        }
    }

    pub fn playlist_path(&self) -> &Path {
        &self.playlist_path
    }

    pub fn cases_path(&self) -> &Path {
        &self.cases_path
    }
}

impl OutputSink for JsonSink {
    fn save_playlist(&self, playlist: &PlaylistResult) -> OutputResult<()> {
        save_json(playlist, &self.playlist_path)?;
        tracing::info!("Playlist saved to {}", self.playlist_path.display());
        Ok(())
    }

    fn save_cases(&self, records: &[CaseRecord]) -> OutputResult<()> {
        save_json(records, &self.cases_path)?;
        tracing::info!(
            "{} case records saved to {}",
            records.len(),
            self.cases_path.display()
        );
        Ok(())
    }
}
