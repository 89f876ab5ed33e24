#![cfg(feature = "ingest")]

use lancamento::ingest::*;
use lancamento::session::{Session, SessionMode};
use std::io::Write;
use std::path::{Path, PathBuf};
use zip::write::SimpleFileOptions;

fn nfe_doc(key: &str, cfop: &str, total: &str) -> String {
    format!(
        r#"<NFe xmlns="http://www.portalfiscal.inf.br/nfe">
  <infNFe Id="NFe{key}" versao="4.00">
    <emit><xNome>Metalurgica Exemplo Ltda</xNome></emit>
    <det nItem="1"><prod><CFOP>{cfop}</CFOP></prod></det>
    <total><ICMSTot><vNF>{total}</vNF></ICMSTot></total>
  </infNFe>
</NFe>"#
    )
}

/// Write a ZIP bundle with the given (name, bytes) entries.
fn write_bundle(dir: &Path, entries: &[(&str, &[u8])]) -> PathBuf {
    let path = dir.join("envio.zip");
    let file = std::fs::File::create(&path).unwrap();
    let mut zip = zip::ZipWriter::new(file);
    let options = SimpleFileOptions::default();
    for (name, bytes) in entries {
        zip.start_file(*name, options).unwrap();
        zip.write_all(bytes).unwrap();
    }
    zip.finish().unwrap();
    path
}

#[test]
fn fiscal_bundle_with_one_bad_document_yields_the_good_three() {
    let dir = tempfile::tempdir().unwrap();
    let a = nfe_doc("chave1", "5102", "100.00");
    let b = nfe_doc("chave2", "1101", "200.00");
    let c = nfe_doc("chave3", "9999", "300.00");
    let bundle = write_bundle(
        dir.path(),
        &[
            ("nota1.xml", a.as_bytes()),
            ("nota2.xml", b.as_bytes()),
            ("nota3.xml", c.as_bytes()),
            ("quebrada.xml", b"<NFe><inf"),
        ],
    );

    let outcome = dispatch_archive(&bundle).unwrap();
    let IngestOutcome::Fiscal { entries, report } = outcome else {
        panic!("expected fiscal mode");
    };
    assert_eq!(entries.len(), 3);
    assert_eq!(report.parsed, 3);
    assert_eq!(report.corrupt_xml, 1);
    // The original bundle no longer exists afterward
    assert!(!bundle.exists());
}

#[test]
fn bundle_without_xml_falls_back_to_first_tabular_entry() {
    let dir = tempfile::tempdir().unwrap();
    let bundle = write_bundle(
        dir.path(),
        &[
            ("leia-me.txt", b"instrucoes"),
            ("primeiro.csv", b"a,b\n1,2\n3,4\n"),
            ("segundo.csv", b"x,y,z\n9,9,9\n"),
        ],
    );

    let outcome = dispatch_archive(&bundle).unwrap();
    let IngestOutcome::Tabular(ds) = outcome else {
        panic!("expected tabular mode");
    };
    // First match by archive listing order, and only that one
    assert_eq!(ds.n_cols(), 2);
    assert_eq!(ds.n_rows(), 2);
    assert!(!bundle.exists());
}

#[test]
fn unusable_xml_entries_fall_back_to_tabular() {
    let dir = tempfile::tempdir().unwrap();
    let bundle = write_bundle(
        dir.path(),
        &[
            ("nao_fiscal.xml", b"<catalogo><item/></catalogo>"),
            ("dados.csv", b"a,b\n1,2\n"),
        ],
    );

    let outcome = dispatch_archive(&bundle).unwrap();
    assert!(matches!(outcome, IngestOutcome::Tabular(_)));
    assert!(!bundle.exists());
}

#[test]
fn bundle_with_nothing_usable_fails_and_cleans_up() {
    let dir = tempfile::tempdir().unwrap();
    let bundle = write_bundle(
        dir.path(),
        &[("leia-me.txt", b"sem dados"), ("foto.png", b"\x89PNG")],
    );

    let err = dispatch_archive(&bundle).unwrap_err();
    assert!(matches!(err, IngestError::NothingUsable));
    // No partial state: bundle removed, nothing extracted alongside it
    assert!(!bundle.exists());
    assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
}

#[test]
fn corrupt_bundle_is_rejected_and_removed() {
    let dir = tempfile::tempdir().unwrap();
    let bundle = dir.path().join("envio.zip");
    std::fs::write(&bundle, b"not a zip archive").unwrap();

    let err = dispatch_archive(&bundle).unwrap_err();
    assert!(matches!(err, IngestError::BadArchive(_)));
    assert!(!bundle.exists());
}

#[test]
fn nested_entry_names_extract_by_basename() {
    let dir = tempfile::tempdir().unwrap();
    let doc = nfe_doc("chave9", "5102", "50.00");
    let bundle = write_bundle(
        dir.path(),
        &[("2024/janeiro/nota.xml", doc.as_bytes())],
    );

    let IngestOutcome::Fiscal { entries, .. } = dispatch_archive(&bundle).unwrap() else {
        panic!("expected fiscal mode");
    };
    assert_eq!(entries[0].invoice.source_file, "nota.xml");
}

#[test]
fn session_ingest_commits_fiscal_mode() {
    let dir = tempfile::tempdir().unwrap();
    let a = nfe_doc("chave1", "5102", "100.00");
    let b = nfe_doc("chave2", "4040", "25.00");
    let bundle = write_bundle(
        dir.path(),
        &[("n1.xml", a.as_bytes()), ("n2.xml", b.as_bytes())],
    );

    let mut session = Session::new();
    assert_eq!(session.ingest(&bundle).unwrap(), SessionMode::Fiscal);
    assert_eq!(session.entries().len(), 2);
    assert_eq!(session.unmapped(), 1);

    let csv = session.export_csv().unwrap().unwrap();
    assert!(csv.starts_with("NFe_Chave,"));
    assert!(csv.contains("Regra Não Mapeada"));

    let snapshot = session.snapshot().unwrap();
    assert!(snapshot.contains("chave1"));
}

#[test]
fn session_failed_upload_resets_state() {
    let dir = tempfile::tempdir().unwrap();
    let doc = nfe_doc("chave1", "5102", "100.00");
    let good = write_bundle(dir.path(), &[("n1.xml", doc.as_bytes())]);

    let mut session = Session::new();
    session.ingest(&good).unwrap();
    assert_eq!(session.mode(), SessionMode::Fiscal);

    let bad = write_bundle(dir.path(), &[("leia-me.txt", b"nada")]);
    assert!(session.ingest(&bad).is_err());
    assert_eq!(session.mode(), SessionMode::Idle);
    assert!(session.snapshot().is_none());
}
