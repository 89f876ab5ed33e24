use log::{debug, info, warn};
use std::fs::File;
use std::path::{Path, PathBuf};
use thiserror::Error;
use zip::ZipArchive;

use crate::core::{LedgerEntry, map_invoices};
use crate::nfe::{BatchReport, parse_batch};
use crate::tabular::{TABULAR_EXTENSIONS, TabularDataset, TabularError, load_table};

/// Terminal outcome of one upload. The two modes are mutually exclusive
/// per upload; there is no partial state.
#[derive(Debug, Clone)]
pub enum IngestOutcome {
    /// The upload contained usable fiscal XML.
    Fiscal {
        /// Derived ledger postings, one per parsed document.
        entries: Vec<LedgerEntry>,
        /// Aggregate parse counts for the batch.
        report: BatchReport,
    },
    /// The upload contained a tabular data file.
    Tabular(TabularDataset),
}

/// Errors from upload ingestion.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum IngestError {
    /// Underlying I/O failure.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The bundle is not a readable ZIP archive.
    #[error("invalid or corrupt archive: {0}")]
    BadArchive(#[from] zip::result::ZipError),

    /// Neither fiscal XML nor tabular content was usable.
    #[error("archive contained no usable fiscal XML documents or tabular data files")]
    NothingUsable,

    /// Direct upload with an extension no loader handles.
    #[error("unsupported upload: {0}")]
    UnsupportedUpload(String),

    /// Direct tabular upload failed to load.
    #[error(transparent)]
    Tabular(#[from] TabularError),
}

/// Dispatch a compressed bundle.
///
/// State machine, one terminal outcome per upload:
///
/// - attempt fiscal: extract every `.xml` entry, parse the batch, map to
///   ledger entries; at least one entry commits fiscal mode;
/// - fallback tabular: otherwise extract and load the *first* entry (by
///   archive listing order) with a tabular extension; multi-file tabular
///   archives are not supported;
/// - failure: neither usable.
///
/// On every terminal path the original bundle file and all extracted
/// working files are removed; removal failures are swallowed so a
/// lingering locked file never blocks the workflow.
pub fn dispatch_archive(bundle: &Path) -> Result<IngestOutcome, IngestError> {
    let result = dispatch_inner(bundle);
    remove_best_effort(bundle);
    result
}

fn dispatch_inner(bundle: &Path) -> Result<IngestOutcome, IngestError> {
    let file = File::open(bundle)?;
    let mut archive = ZipArchive::new(file)?;
    // Extracted files live under the workspace and are removed with it
    // when this function returns, on success and failure alike.
    let workdir = tempfile::tempdir()?;

    // Attempt fiscal mode first.
    let xml_paths = extract_matching(&mut archive, workdir.path(), &["xml"], usize::MAX)?;
    if !xml_paths.is_empty() {
        let (invoices, report) = parse_batch(&xml_paths);
        if !invoices.is_empty() {
            info!(
                "fiscal mode committed: {} ledger entries from {} XML entries",
                invoices.len(),
                xml_paths.len()
            );
            return Ok(IngestOutcome::Fiscal {
                entries: map_invoices(invoices),
                report,
            });
        }
        warn!(
            "{} XML entries yielded no usable fiscal records; attempting tabular fallback",
            xml_paths.len()
        );
    }

    // Fallback: first tabular entry only.
    let data_paths = extract_matching(&mut archive, workdir.path(), TABULAR_EXTENSIONS, 1)?;
    if let Some(path) = data_paths.first() {
        match load_table(path) {
            Ok(dataset) => {
                info!(
                    "tabular mode committed: {} rows x {} columns",
                    dataset.n_rows(),
                    dataset.n_cols()
                );
                return Ok(IngestOutcome::Tabular(dataset));
            }
            Err(e) => warn!("tabular fallback entry failed to load: {e}"),
        }
    }

    Err(IngestError::NothingUsable)
}

/// Extract up to `limit` entries whose extension matches, in archive
/// listing order. Directory entries are skipped; extracted files keep
/// their basename, disambiguated by entry index on collision.
fn extract_matching(
    archive: &mut ZipArchive<File>,
    workdir: &Path,
    extensions: &[&str],
    limit: usize,
) -> Result<Vec<PathBuf>, IngestError> {
    let mut extracted = Vec::new();
    for i in 0..archive.len() {
        if extracted.len() >= limit {
            break;
        }
        let mut entry = archive.by_index(i)?;
        if entry.is_dir() || !has_extension(entry.name(), extensions) {
            continue;
        }
        let Some(basename) = Path::new(entry.name())
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
        else {
            continue;
        };
        let mut target = workdir.join(&basename);
        if target.exists() {
            target = workdir.join(format!("{i}_{basename}"));
        }
        let mut out = File::create(&target)?;
        std::io::copy(&mut entry, &mut out)?;
        extracted.push(target);
    }
    Ok(extracted)
}

fn has_extension(name: &str, extensions: &[&str]) -> bool {
    Path::new(name)
        .extension()
        .map(|e| e.to_string_lossy().to_lowercase())
        .is_some_and(|ext| extensions.contains(&ext.as_str()))
}

fn remove_best_effort(path: &Path) {
    if let Err(e) = std::fs::remove_file(path) {
        // A file still held open elsewhere must not block the workflow
        debug!("could not remove {}: {e}", path.display());
    }
}
