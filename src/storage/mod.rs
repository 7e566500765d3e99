//! JSON snapshot storage
//!
//! One document per UTC calendar date (`YYYY-MM-DD.json`) plus a
//! `history.json` timeline that is rebuilt from every snapshot on each save.
//! Files are replaced whole: documents are written to a temporary file in the
//! same directory and renamed over the target.

mod error;
mod staging;
mod types;

pub use error::{StorageError, StorageResult};
pub use staging::stage_dashboard_data;
pub use types::{
    DateRange, HistoricalTimeline, Snapshot, SnapshotInput, SnapshotMetadata, TimelineEntry,
    VisualizationExport,
};

use chrono::{NaiveDate, Utc};
use lazy_static::lazy_static;
use log::{info, warn};
use regex::Regex;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// Filename of the historical timeline inside the data directory
pub const HISTORY_FILENAME: &str = "history.json";

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Mode of newly written documents; the dashboard server must be able to read them
#[cfg(unix)]
const DOCUMENT_FILE_MODE: u32 = 0o644;

lazy_static! {
    static ref SNAPSHOT_FILE_RE: Result<Regex, regex::Error> =
        Regex::new(r"^[0-9]{4}-[0-9]{2}-[0-9]{2}\.json$");
}

/// Whether `file_name` follows the `YYYY-MM-DD.json` snapshot naming
#[must_use]
pub fn is_snapshot_file_name(file_name: &str) -> bool {
    SNAPSHOT_FILE_RE.as_ref().is_ok_and(|re| re.is_match(file_name))
}

/// Date-keyed snapshot store rooted at one directory
#[derive(Debug, Clone)]
pub struct DataStorage {
    data_dir: PathBuf,
}

impl DataStorage {
    /// Open the store, creating the directory if it does not exist
    pub fn new(data_dir: impl Into<PathBuf>) -> StorageResult<Self> {
        let data_dir = data_dir.into();
        if !data_dir.exists() {
            fs::create_dir_all(&data_dir).map_err(StorageError::io(&data_dir))?;
            info!("Created data directory: {}", data_dir.display());
        }
        Ok(Self { data_dir })
    }

    #[must_use]
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Snapshot path for the current UTC date
    #[must_use]
    pub fn today_filename(&self) -> PathBuf {
        self.filename_for_date(Utc::now().date_naive())
    }

    #[must_use]
    pub fn filename_for_date(&self, date: NaiveDate) -> PathBuf {
        self.data_dir.join(format!("{}.json", date.format(DATE_FORMAT)))
    }

    /// Write a snapshot stamped with the current time.
    ///
    /// Goes to today's file unless `target` names another path. An existing
    /// file is replaced without warning.
    pub fn save_snapshot(
        &self,
        input: SnapshotInput,
        target: Option<&Path>,
    ) -> StorageResult<PathBuf> {
        let target = target.map_or_else(|| self.today_filename(), Path::to_path_buf);
        let snapshot = Snapshot::from_input(input, Utc::now());

        write_json_atomic(&target, &snapshot)?;
        info!("Saved snapshot to: {}", target.display());

        Ok(target)
    }

    /// Load a snapshot; `Ok(None)` when the file does not exist
    pub fn load_snapshot(&self, path: &Path) -> StorageResult<Option<Snapshot>> {
        read_json(path)
    }

    /// Snapshot files in the data directory, oldest first.
    ///
    /// Only `YYYY-MM-DD.json` names qualify, so name order is date order.
    pub fn list_snapshot_files(&self) -> StorageResult<Vec<PathBuf>> {
        let entries = fs::read_dir(&self.data_dir).map_err(StorageError::io(&self.data_dir))?;

        let mut files = Vec::new();
        for entry in entries {
            let entry = entry.map_err(StorageError::io(&self.data_dir))?;
            let name = entry.file_name();
            if name.to_str().is_some_and(is_snapshot_file_name) {
                files.push(entry.path());
            }
        }
        files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));

        Ok(files)
    }

    /// Every snapshot as `(date, raw document)`, oldest first.
    ///
    /// A file removed between listing and reading yields `Value::Null`.
    pub fn load_all_snapshots(&self) -> StorageResult<Vec<(String, Value)>> {
        self.list_snapshot_files()?
            .into_iter()
            .map(|path| {
                let document = read_json::<Value>(&path)?.unwrap_or(Value::Null);
                Ok((snapshot_date(&path), document))
            })
            .collect()
    }

    /// Rebuild the timeline from all snapshots; `None` when there are none
    pub fn generate_historical_summary(&self) -> StorageResult<Option<HistoricalTimeline>> {
        let snapshots = self.load_all_snapshots()?;

        let (Some((start, _)), Some((end, _))) = (snapshots.first(), snapshots.last()) else {
            warn!("No snapshots found for historical summary");
            return Ok(None);
        };
        let date_range = DateRange {
            start: start.clone(),
            end: end.clone(),
        };

        let timeline: Vec<TimelineEntry> = snapshots
            .iter()
            .map(|(date, document)| TimelineEntry::from_document(date.as_str(), document))
            .collect();

        Ok(Some(HistoricalTimeline {
            generated_at: Utc::now(),
            snapshot_count: timeline.len(),
            date_range,
            timeline,
        }))
    }

    /// Write `history.json`; `None` and nothing written when there are no snapshots
    pub fn save_historical_summary(&self) -> StorageResult<Option<PathBuf>> {
        let Some(history) = self.generate_historical_summary()? else {
            return Ok(None);
        };

        let path = self.data_dir.join(HISTORY_FILENAME);
        write_json_atomic(&path, &history)?;
        info!("Saved historical summary to: {}", path.display());

        Ok(Some(path))
    }

    /// The chronologically last snapshot
    pub fn get_latest_snapshot(&self) -> StorageResult<Option<Snapshot>> {
        match self.list_snapshot_files()?.last() {
            Some(path) => self.load_snapshot(path),
            None => Ok(None),
        }
    }

    /// Latest snapshot and history in one document
    pub fn export_for_visualization(&self) -> StorageResult<VisualizationExport> {
        Ok(VisualizationExport {
            current: self.get_latest_snapshot()?,
            historical: self.generate_historical_summary()?,
            exported_at: Utc::now(),
        })
    }
}

fn snapshot_date(path: &Path) -> String {
    path.file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default()
}

fn read_json<T: DeserializeOwned>(path: &Path) -> StorageResult<Option<T>> {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            warn!("Snapshot file not found: {}", path.display());
            return Ok(None);
        }
        Err(e) => return Err(StorageError::io(path)(e)),
    };

    serde_json::from_str(&content)
        .map(Some)
        .map_err(|source| StorageError::Malformed {
            path: path.to_path_buf(),
            source,
        })
}

fn write_json_atomic<T: Serialize>(path: &Path, value: &T) -> StorageResult<()> {
    let json = serde_json::to_string_pretty(value)?;

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut file = NamedTempFile::new_in(dir).map_err(StorageError::io(dir))?;
    file.write_all(json.as_bytes())
        .map_err(StorageError::io(file.path()))?;
    #[cfg(unix)]
    publish_permissions(&file, path)?;
    file.persist(path).map_err(|source| StorageError::Persist {
        path: path.to_path_buf(),
        source,
    })?;

    Ok(())
}

/// Temp files are created owner-only. Give the document the mode of the file
/// it replaces, or a world-readable default for a new file.
#[cfg(unix)]
fn publish_permissions(file: &NamedTempFile, target: &Path) -> StorageResult<()> {
    use std::os::unix::fs::PermissionsExt;

    let mode = fs::metadata(target)
        .map(|metadata| metadata.permissions().mode() & 0o7777)
        .unwrap_or(DOCUMENT_FILE_MODE);

    file.as_file()
        .set_permissions(fs::Permissions::from_mode(mode))
        .map_err(StorageError::io(file.path()))
}
