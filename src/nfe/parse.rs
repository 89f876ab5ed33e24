use log::info;
use quick_xml::Reader;
use quick_xml::events::Event;
use rust_decimal::Decimal;
use std::path::Path;

use crate::core::{Cfop, ParsedInvoice, UNKNOWN_ISSUER};

/// Namespace of the standard NF-e schema.
pub const NFE_NAMESPACE: &str = "http://www.portalfiscal.inf.br/nfe";

/// Outcome of parsing a single fiscal document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NfeOutcome {
    /// The document matched the NF-e schema and yielded a record.
    Parsed(ParsedInvoice),
    /// The document was skipped, with the reason tagged for reporting.
    Unparseable(UnparseableReason),
}

impl NfeOutcome {
    /// The parsed record, if any.
    pub fn into_invoice(self) -> Option<ParsedInvoice> {
        match self {
            Self::Parsed(invoice) => Some(invoice),
            Self::Unparseable(_) => None,
        }
    }
}

/// Why a document yielded no record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum UnparseableReason {
    /// The bytes are not well-formed XML.
    CorruptXml,
    /// Well-formed XML, but no `infNFe` element — not an NF-e document.
    WrongSchema,
    /// The file could not be read at all.
    UnreadableFile,
}

/// Aggregate counts for one parse batch. Per-document detail is
/// deliberately not retained.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchReport {
    /// Documents that yielded a record.
    pub parsed: usize,
    /// Documents rejected as malformed XML.
    pub corrupt_xml: usize,
    /// Well-formed documents that were not NF-e.
    pub wrong_schema: usize,
    /// Files that could not be read.
    pub unreadable: usize,
}

impl BatchReport {
    /// Total documents skipped, across all reasons.
    pub fn skipped(&self) -> usize {
        self.corrupt_xml + self.wrong_schema + self.unreadable
    }

    fn record(&mut self, reason: UnparseableReason) {
        match reason {
            UnparseableReason::CorruptXml => self.corrupt_xml += 1,
            UnparseableReason::WrongSchema => self.wrong_schema += 1,
            UnparseableReason::UnreadableFile => self.unreadable += 1,
        }
    }
}

/// Parse one NF-e XML file.
pub fn parse_file(path: &Path) -> NfeOutcome {
    let xml = match std::fs::read_to_string(path) {
        Ok(xml) => xml,
        Err(_) => return NfeOutcome::Unparseable(UnparseableReason::UnreadableFile),
    };
    let source_file = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    parse_xml(&xml, &source_file)
}

/// Parse one NF-e document from an XML string.
///
/// Extraction rules, in document order:
///
/// 1. access key — the `Id` attribute of `infNFe`, `NFe` prefix stripped;
///    a missing attribute leaves the key empty;
/// 2. CFOP — the first `det/prod/CFOP` only; multi-item invoices are
///    classified by their first item;
/// 3. total value — `ICMSTot/vNF`, zero when absent or unparsable;
/// 4. issuer — `emit/xNome`, [`UNKNOWN_ISSUER`] when absent.
///
/// Element names are matched by local name, so both default-namespace and
/// prefixed NF-e serializations are accepted; schema membership is
/// enforced by requiring `infNFe`.
pub fn parse_xml(xml: &str, source_file: &str) -> NfeOutcome {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut path: Vec<String> = Vec::new();
    let mut found_inf_nfe = false;
    let mut access_key: Option<String> = None;
    let mut cfop: Option<String> = None;
    let mut total_value: Option<Decimal> = None;
    let mut issuer: Option<String> = None;

    loop {
        match reader.read_event() {
            Ok(Event::Start(ref e)) => {
                let name = local_name(e.name().as_ref());
                if name == "infNFe" {
                    found_inf_nfe = true;
                    for attr in e.attributes().flatten() {
                        if local_name(attr.key.as_ref()) == "Id" {
                            let raw = String::from_utf8_lossy(&attr.value).into_owned();
                            let key = raw.strip_prefix("NFe").unwrap_or(&raw).to_string();
                            access_key = Some(key);
                        }
                    }
                }
                path.push(name);
            }
            Ok(Event::Text(ref e)) => {
                let text = e.unescape().unwrap_or_default();
                let text = text.trim();
                if text.is_empty() {
                    continue;
                }
                if cfop.is_none() && path_ends_with(&path, &["det", "prod", "CFOP"]) {
                    cfop = Some(text.to_string());
                } else if total_value.is_none() && path_ends_with(&path, &["ICMSTot", "vNF"]) {
                    total_value = Some(text.parse().unwrap_or(Decimal::ZERO));
                } else if issuer.is_none() && path_ends_with(&path, &["emit", "xNome"]) {
                    issuer = Some(text.to_string());
                }
            }
            Ok(Event::End(_)) => {
                path.pop();
            }
            Ok(Event::Eof) => break,
            Err(_) => return NfeOutcome::Unparseable(UnparseableReason::CorruptXml),
            _ => {}
        }
    }

    if !found_inf_nfe {
        return NfeOutcome::Unparseable(UnparseableReason::WrongSchema);
    }

    NfeOutcome::Parsed(ParsedInvoice {
        access_key: access_key.unwrap_or_default(),
        issuer: issuer.unwrap_or_else(|| UNKNOWN_ISSUER.to_string()),
        cfop: Cfop::new(cfop.unwrap_or_else(|| Cfop::UNSPECIFIED.to_string())),
        total_value: total_value.unwrap_or(Decimal::ZERO),
        source_file: source_file.to_string(),
    })
}

/// Parse a batch of files, collecting records and aggregate counts.
///
/// Skippable per-document failures never abort the batch. The aggregate
/// is logged once; no per-document detail is emitted.
pub fn parse_batch<I, P>(paths: I) -> (Vec<ParsedInvoice>, BatchReport)
where
    I: IntoIterator<Item = P>,
    P: AsRef<Path>,
{
    let mut invoices = Vec::new();
    let mut report = BatchReport::default();

    for path in paths {
        match parse_file(path.as_ref()) {
            NfeOutcome::Parsed(invoice) => {
                report.parsed += 1;
                invoices.push(invoice);
            }
            NfeOutcome::Unparseable(reason) => report.record(reason),
        }
    }

    info!(
        "NF-e batch: {} parsed, {} skipped ({} corrupt XML, {} wrong schema, {} unreadable)",
        report.parsed,
        report.skipped(),
        report.corrupt_xml,
        report.wrong_schema,
        report.unreadable
    );

    (invoices, report)
}

fn local_name(qname: &[u8]) -> String {
    let local = qname
        .iter()
        .rposition(|&b| b == b':')
        .map(|i| &qname[i + 1..])
        .unwrap_or(qname);
    String::from_utf8_lossy(local).into_owned()
}

fn path_ends_with(path: &[String], suffix: &[&str]) -> bool {
    path.len() >= suffix.len()
        && path[path.len() - suffix.len()..]
            .iter()
            .zip(suffix)
            .all(|(a, b)| a == b)
}
