use std::io::Write;

use dart_aptamers::{AptamerDatabase, LoadError};
use pretty_assertions::assert_eq;

fn table_file(suffix: &str, content: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

#[test]
fn test_load_csv_and_search() {
    let file = table_file(
        ".csv",
        " Target ,Sequence (5'-3'),Buffer\n\
         Ochratoxin A,GATCGGGTGTGGGTGGCGTAAAGGGAGCATCGGACA,\"10 mM Tris, 120 mM NaCl, 5 mM KCl, 20 mM CaCl2\"\n\
         Cocaine,GGGAGACAAGGATAAATCCTTCAATGAAGTGGGTCTCCC,PBS\n",
    );
    let db = AptamerDatabase::load(file.path()).unwrap();

    assert_eq!(db.len(), 2);
    assert_eq!(db.columns(), ["target", "sequence_5'-3'", "buffer"]);

    let hits = db.search_by_target("ochratoxin-a");
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].target_key, "ochratoxina");
    assert_eq!(
        hits[0].aptamer().unwrap().sequence,
        "GATCGGGTGTGGGTGGCGTAAAGGGAGCATCGGACA"
    );
    assert_eq!(
        hits[0].buffer(),
        Some("10 mM Tris, 120 mM NaCl, 5 mM KCl, 20 mM CaCl2")
    );
}

#[test]
fn test_load_tsv() {
    let file = table_file(".tsv", "TARGET\tAptamer Sequence\nLysozyme\tATCAGGGCTAAAGAGTGCAGAGTTACTTAG\n");
    let db = AptamerDatabase::load(file.path()).unwrap();
    assert_eq!(db.search_by_target("LYSO").len(), 1);
}

#[test]
fn test_load_missing_file() {
    assert!(matches!(
        AptamerDatabase::load("/nonexistent/aptamers.csv"),
        Err(LoadError::Io(_))
    ));
}

#[test]
fn test_load_corrupt_workbook() {
    let file = table_file(".xlsx", "not a zip archive");
    assert!(matches!(
        AptamerDatabase::load(file.path()),
        Err(LoadError::Workbook(_))
    ));
}

#[test]
fn test_load_workbook_first_sheet() {
    let path = std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/aptamers.xlsx");
    let db = AptamerDatabase::load(&path).unwrap();

    assert_eq!(db.columns(), ["target", "sequence_5'-3'", "kd_nm", "buffer"]);
    assert_eq!(db.len(), 2);

    let thrombin = db.search_by_target("Thrombin");
    assert_eq!(thrombin.len(), 1);
    assert_eq!(thrombin[0].row, 1);
    assert_eq!(thrombin[0].sequence(), Some("GGTTGGTGTGGTTGG"));
    assert_eq!(thrombin[0].get("kd_nm"), Some("25"));
    assert_eq!(
        thrombin[0].buffer(),
        Some("HEPES 20 mM, NaCl 150 mM, KCl 5 mM")
    );

    // the sheet's third row is empty
    let atp = db.search_by_target("atp");
    assert_eq!(atp.len(), 1);
    assert_eq!(atp[0].row, 3);
    assert_eq!(atp[0].get("kd_nm"), Some("0.5"));
    assert_eq!(atp[0].buffer(), None);
}
