//! Log retention: deletes per-project log files past the retention window

use std::path::Path;
use std::time::{Duration, SystemTime};

/// Delete regular files in `dir` whose modification time is strictly older
/// than `max_age_days`. Per-file failures are reported and skipped; an
/// unreadable directory ends the sweep. Returns the number of files
/// deleted.
pub fn sweep_old_logs(dir: &Path, max_age_days: u64) -> usize {
    let cutoff = SystemTime::now() - Duration::from_secs(max_age_days * 24 * 60 * 60);

    let entries = match std::fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) => {
            tracing::warn!("Cannot sweep log directory {:?}: {}", dir, e);
            return 0;
        }
    };

    let mut deleted = 0;
    for entry in entries {
        let path = match entry {
            Ok(entry) => entry.path(),
            Err(e) => {
                tracing::warn!("Cannot read log directory entry: {}", e);
                continue;
            }
        };

        let modified = match path.metadata().and_then(|m| {
            if m.is_file() {
                m.modified().map(Some)
            } else {
                Ok(None)
            }
        }) {
            Ok(Some(modified)) => modified,
            Ok(None) => continue,
            Err(e) => {
                tracing::warn!("Cannot stat {:?}: {}", path, e);
                continue;
            }
        };

        if modified < cutoff {
            match std::fs::remove_file(&path) {
                Ok(()) => {
                    tracing::info!("Deleted old log file {:?}", path);
                    deleted += 1;
                }
                Err(e) => tracing::warn!("Cannot delete {:?}: {}", path, e),
            }
        }
    }
    deleted
}
