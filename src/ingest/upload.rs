use log::info;
use std::path::Path;

use super::archive::{IngestError, IngestOutcome, dispatch_archive};
use crate::tabular::{TABULAR_EXTENSIONS, load_table};

/// Handle one uploaded file.
///
/// Delimited/spreadsheet files load directly into tabular mode; ZIP
/// bundles go through [`dispatch_archive`]. Anything else is rejected.
/// Direct data files are left in place; cleanup obligations apply to
/// archives only, whose working files are always removed.
pub fn ingest_upload(path: &Path) -> Result<IngestOutcome, IngestError> {
    let ext = path
        .extension()
        .map(|e| e.to_string_lossy().to_lowercase())
        .unwrap_or_default();

    if TABULAR_EXTENSIONS.contains(&ext.as_str()) {
        info!("data file upload detected: {}", path.display());
        let dataset = load_table(path)?;
        return Ok(IngestOutcome::Tabular(dataset));
    }

    if ext == "zip" {
        info!("compressed bundle upload detected: {}", path.display());
        return dispatch_archive(path);
    }

    Err(IngestError::UnsupportedUpload(path.display().to_string()))
}
