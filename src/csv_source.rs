//! Loads endpoint check records from the semicolon-delimited CSV file

use std::path::Path;

use crate::record::{EndpointCheckRecord, RawRow};

/// Read all check records from `path`.
///
/// The file must carry a header row. An unreadable file or a structurally
/// malformed row aborts the load; a row that decodes but fails validation
/// is reported and skipped.
pub fn load_records(path: &Path) -> crate::Result<Vec<EndpointCheckRecord>> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(b';')
        .from_path(path)
        .map_err(|e| {
            crate::WatchpostError::Config(format!(
                "Failed to read checks file {:?}: {}",
                path, e
            ))
        })?;

    let mut records = Vec::new();
    for (index, row) in reader.deserialize::<RawRow>().enumerate() {
        // +2: 1-based, after the header line
        let line = index + 2;
        let row = row?;
        match EndpointCheckRecord::from_row(row) {
            Ok(record) => records.push(record),
            Err(e) => tracing::warn!("Skipping row {} of {:?}: {}", line, path, e),
        }
    }
    Ok(records)
}
