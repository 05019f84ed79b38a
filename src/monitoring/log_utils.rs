use std::fs;
use std::path::{Path, PathBuf};
use std::time::UNIX_EPOCH;
use tracing::{info, warn};

use super::LOG_FILE_NAME;

/// Maximum log directory size in bytes before a warning is logged (50MB)
const MAX_LOG_SIZE: u64 = 50 * 1024 * 1024;

/// Maximum number of log files to keep (7 days of daily rotation)
pub const MAX_LOG_FILES: usize = 7;

fn is_log_file(path: &Path) -> bool {
    path.is_file()
        && (path.extension().map_or(false, |ext| ext == "log")
            || path.to_string_lossy().contains(LOG_FILE_NAME))
}

fn list_log_files(log_path: &Path) -> anyhow::Result<Vec<(PathBuf, fs::Metadata)>> {
    let mut log_files = Vec::new();
    for entry in fs::read_dir(log_path)? {
        let path = entry?.path();
        if is_log_file(&path) {
            if let Ok(metadata) = fs::metadata(&path) {
                log_files.push((path, metadata));
            }
        }
    }
    Ok(log_files)
}

/// Checks log directory and reports on file sizes
pub fn check_log_directory(log_dir: &str) -> anyhow::Result<u64> {
    let log_path = Path::new(log_dir);
    if !log_path.exists() {
        fs::create_dir_all(log_path)?;
        info!(target: "log_management", "Created log directory: {}", log_dir);
        return Ok(0);
    }

    let log_files = list_log_files(log_path)?;
    let total_size: u64 = log_files.iter().map(|(_, meta)| meta.len()).sum();

    if total_size > MAX_LOG_SIZE {
        warn!(
            target: "log_management",
            total_size_mb = total_size / (1024 * 1024),
            max_size_mb = MAX_LOG_SIZE / (1024 * 1024),
            "Log directory size exceeds recommended maximum"
        );
    } else {
        info!(
            target: "log_management",
            total_size_mb = total_size / (1024 * 1024),
            log_count = log_files.len(),
            "Log directory size within limits"
        );
    }

    Ok(total_size)
}

/// Rotate logs by removing the oldest files beyond `MAX_LOG_FILES`.
/// Returns how many files were removed.
pub fn rotate_logs(log_dir: &str) -> anyhow::Result<usize> {
    let log_path = Path::new(log_dir);
    if !log_path.exists() {
        return Ok(0);
    }

    let mut log_files: Vec<(PathBuf, u64)> = list_log_files(log_path)?
        .into_iter()
        .map(|(path, meta)| {
            let modified = meta
                .modified()
                .ok()
                .and_then(|m| m.duration_since(UNIX_EPOCH).ok())
                .map(|d| d.as_nanos() as u64)
                .unwrap_or_default();
            (path, modified)
        })
        .collect();

    // Newest first
    log_files.sort_by(|a, b| b.1.cmp(&a.1));

    let mut removed = 0;
    for (path, _) in log_files.iter().skip(MAX_LOG_FILES) {
        info!(target: "log_management", path = %path.display(), "Removing old log file");
        match fs::remove_file(path) {
            Ok(()) => removed += 1,
            Err(e) => {
                warn!(
                    target: "log_management",
                    path = %path.display(),
                    error = %e,
                    "Failed to remove old log file"
                )
            }
        }
    }

    Ok(removed)
}
