//! Stage snapshot documents next to the dashboard's static assets

use log::{info, warn};
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use super::error::{StorageError, StorageResult};

/// Copy every `*.json` file of `data_dir` into `<dist_dir>/data`.
///
/// Returns the staged paths. A missing `data_dir` stages nothing.
pub fn stage_dashboard_data(data_dir: &Path, dist_dir: &Path) -> StorageResult<Vec<PathBuf>> {
    if !data_dir.is_dir() {
        warn!(
            "Data directory {} not found, dashboard will have no data",
            data_dir.display()
        );
        return Ok(Vec::new());
    }

    let target_dir = dist_dir.join("data");
    fs::create_dir_all(&target_dir).map_err(StorageError::io(&target_dir))?;

    let mut staged = Vec::new();
    for entry in WalkDir::new(data_dir)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
    {
        let entry = entry.map_err(|e| StorageError::Io {
            path: data_dir.to_path_buf(),
            source: e.into(),
        })?;
        let path = entry.path();
        if !entry.file_type().is_file()
            || path.extension().and_then(|ext| ext.to_str()) != Some("json")
        {
            continue;
        }

        let dest = target_dir.join(entry.file_name());
        fs::copy(path, &dest).map_err(StorageError::io(&dest))?;
        info!("Copied {} to {}", path.display(), dest.display());
        staged.push(dest);
    }

    Ok(staged)
}
