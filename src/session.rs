//! Explicit per-session context.
//!
//! Holds the current dataset or ledger, the active mode, and the cached
//! initial summary, passed by reference to each handler instead of
//! living in ambient globals. All state is transient: rebuilt per
//! upload, discarded on [`Session::reset`]. At most one upload is in
//! flight per session; sessions share no mutable state with each other.

use log::info;
use std::path::Path;

use crate::core::{LancamentoError, LedgerEntry, unmapped_count};
use crate::export::{dataset_csv, ledger_csv};
use crate::ingest::{IngestError, IngestOutcome, ingest_upload};
use crate::nfe::BatchReport;
use crate::tabular::TabularDataset;

/// Which kind of data the session currently holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionMode {
    /// Nothing loaded yet, or last upload failed.
    #[default]
    Idle,
    /// Ledger entries derived from fiscal XML.
    Fiscal,
    /// A raw tabular dataset.
    Tabular,
}

/// Per-session state for the upload/question/export workflow.
#[derive(Debug, Default)]
pub struct Session {
    mode: SessionMode,
    entries: Vec<LedgerEntry>,
    report: Option<BatchReport>,
    dataset: Option<TabularDataset>,
    initial_summary: Option<String>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mode(&self) -> SessionMode {
        self.mode
    }

    /// Ledger entries of the current fiscal upload; empty otherwise.
    pub fn entries(&self) -> &[LedgerEntry] {
        &self.entries
    }

    /// Parse report of the current fiscal upload.
    pub fn report(&self) -> Option<&BatchReport> {
        self.report.as_ref()
    }

    /// Dataset of the current tabular upload.
    pub fn dataset(&self) -> Option<&TabularDataset> {
        self.dataset.as_ref()
    }

    /// Cached first-question summary, if one was stored.
    pub fn initial_summary(&self) -> Option<&str> {
        self.initial_summary.as_deref()
    }

    /// Cache the agent's initial summary for redisplay.
    pub fn set_initial_summary(&mut self, summary: String) {
        self.initial_summary = Some(summary);
    }

    /// Drop all session state and return to [`SessionMode::Idle`].
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Process one uploaded file, replacing any previous state.
    ///
    /// The session is reset first, so a failed upload leaves it idle
    /// rather than holding stale data from the previous one.
    pub fn ingest(&mut self, path: &Path) -> Result<SessionMode, IngestError> {
        self.reset();
        match ingest_upload(path)? {
            IngestOutcome::Fiscal { entries, report } => {
                info!(
                    "session: fiscal mode, {} entries ({} unmapped)",
                    entries.len(),
                    unmapped_count(&entries)
                );
                self.entries = entries;
                self.report = Some(report);
                self.mode = SessionMode::Fiscal;
            }
            IngestOutcome::Tabular(dataset) => {
                info!(
                    "session: tabular mode, {} rows x {} columns",
                    dataset.n_rows(),
                    dataset.n_cols()
                );
                self.dataset = Some(dataset);
                self.mode = SessionMode::Tabular;
            }
        }
        Ok(self.mode)
    }

    /// Entries whose CFOP had no rule-table match.
    pub fn unmapped(&self) -> usize {
        unmapped_count(&self.entries)
    }

    /// Human-readable table of the active data, for the query agent.
    /// `None` while idle.
    pub fn snapshot(&self) -> Option<String> {
        match self.mode {
            SessionMode::Idle => None,
            SessionMode::Fiscal => Some(render_ledger(&self.entries)),
            SessionMode::Tabular => self.dataset.as_ref().map(render_dataset),
        }
    }

    /// Export the active data as integration CSV. `None` while idle.
    pub fn export_csv(&self) -> Result<Option<String>, LancamentoError> {
        match self.mode {
            SessionMode::Idle => Ok(None),
            SessionMode::Fiscal => ledger_csv(&self.entries).map(Some),
            SessionMode::Tabular => match self.dataset.as_ref() {
                Some(dataset) => dataset_csv(dataset).map(Some),
                None => Ok(None),
            },
        }
    }
}

/// Render ledger entries as a markdown table.
pub fn render_ledger(entries: &[LedgerEntry]) -> String {
    let header = [
        "NFe_Chave",
        "Emissor",
        "CFOP_Principal",
        "Conta_Debito",
        "Conta_Credito",
        "Valor_Lancamento",
    ];
    let rows = entries.iter().map(|e| {
        vec![
            e.invoice.access_key.clone(),
            e.invoice.issuer.clone(),
            e.invoice.cfop.to_string(),
            e.debit_account.clone(),
            e.credit_account.clone(),
            e.amount.to_string(),
        ]
    });
    render_markdown_table(&header, rows)
}

/// Render a tabular dataset as a markdown table.
pub fn render_dataset(dataset: &TabularDataset) -> String {
    let header: Vec<&str> = dataset.column_names().collect();
    render_markdown_table(&header, dataset.rows.iter().cloned())
}

fn render_markdown_table(header: &[&str], rows: impl Iterator<Item = Vec<String>>) -> String {
    let mut out = String::new();
    out.push_str("| ");
    out.push_str(&header.join(" | "));
    out.push_str(" |\n|");
    for _ in header {
        out.push_str(" --- |");
    }
    out.push('\n');
    for row in rows {
        out.push_str("| ");
        out.push_str(&row.join(" | "));
        out.push_str(" |\n");
    }
    out
}
