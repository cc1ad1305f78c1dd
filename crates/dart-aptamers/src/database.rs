use std::collections::BTreeMap;
use std::io::Read;
use std::path::Path;

use calamine::{open_workbook_auto, Reader};
use dart_formats::detect::detect_table_format;
use dart_formats::TableFormat;

use crate::record::{normalize_header, normalize_key, AptamerRecord};
use crate::LoadError;

/// In-memory aptamer table loaded from the first sheet of a spreadsheet.
#[derive(Debug, Clone, Default)]
pub struct AptamerDatabase {
    columns: Vec<String>,
    records: Vec<AptamerRecord>,
}

impl AptamerDatabase {
    /// Load a CSV, TSV, or workbook file (first worksheet only).
    pub fn load(path: impl AsRef<Path>) -> Result<Self, LoadError> {
        let path = path.as_ref();
        match detect_table_format(&path.to_string_lossy()) {
            TableFormat::Workbook => Self::from_workbook(path),
            format @ (TableFormat::Csv | TableFormat::Tsv) => {
                let file = std::fs::File::open(path)?;
                // delimited formats always carry a delimiter
                Self::from_delimited(file, format.delimiter().unwrap_or(b','))
            }
            TableFormat::Unknown => Err(LoadError::UnsupportedFormat(
                path.display().to_string(),
            )),
        }
    }

    /// Read delimited text with a header row.
    pub fn from_delimited<R: Read>(reader: R, delimiter: u8) -> Result<Self, LoadError> {
        let mut rdr = csv::ReaderBuilder::new()
            .delimiter(delimiter)
            .flexible(true)
            .from_reader(reader);

        let headers: Vec<String> = rdr.headers()?.iter().map(String::from).collect();
        let mut rows = Vec::new();
        for result in rdr.records() {
            let record = result?;
            rows.push(record.iter().map(String::from).collect());
        }
        Self::from_rows(headers, rows)
    }

    fn from_workbook(path: &Path) -> Result<Self, LoadError> {
        let mut workbook = open_workbook_auto(path)?;
        let range = workbook
            .worksheet_range_at(0)
            .ok_or(LoadError::EmptyWorkbook)??;

        let mut rows = range
            .rows()
            .map(|row| row.iter().map(|cell| cell.to_string()).collect::<Vec<_>>());
        let headers = rows.next().ok_or(LoadError::EmptyWorkbook)?;
        Self::from_rows(headers, rows.collect())
    }

    /// Build the table from raw header and row cells.
    pub fn from_rows(headers: Vec<String>, rows: Vec<Vec<String>>) -> Result<Self, LoadError> {
        let columns: Vec<String> = headers.iter().map(|h| normalize_header(h)).collect();
        if !columns.iter().any(|c| c == "target") {
            return Err(LoadError::MissingColumn("target".to_string()));
        }

        let records = rows
            .into_iter()
            .enumerate()
            .filter(|(_, cells)| cells.iter().any(|c| !c.trim().is_empty()))
            .map(|(index, cells)| {
                let mut fields = BTreeMap::new();
                for (column, value) in columns.iter().zip(cells) {
                    // first occurrence wins for duplicated headers
                    fields.entry(column.clone()).or_insert(value);
                }
                AptamerRecord::new(index + 1, fields)
            })
            .collect();

        Ok(Self { columns, records })
    }

    /// Rows whose normalized target contains the normalized query.
    pub fn search_by_target(&self, target: &str) -> Vec<&AptamerRecord> {
        let key = normalize_key(target);
        self.records.iter().filter(|r| r.matches(&key)).collect()
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn records(&self) -> &[AptamerRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TABLE: &str = "\
Target,Aptamer Sequence,Kd (nM),Buffer/Conditions
Thrombin,GGTTGGTGTGGTTGG,25,\"PBS, 1 mM MgCl2\"
ATP,ACCTGGGGGAGTATTGCGGAGGAAGGT,6000,\"20 mM Tris, 300 mM NaCl, 5 mM MgCl2\"
Human alpha-Thrombin,AGTCCGTGGTAGGGCAGGTTGGGGTGACT,0.5,
,GGGG,,
";

    fn db() -> AptamerDatabase {
        AptamerDatabase::from_delimited(TABLE.as_bytes(), b',').unwrap()
    }

    #[test]
    fn test_columns_are_normalized() {
        assert_eq!(
            db().columns(),
            ["target", "aptamer_sequence", "kd_nm", "buffer_conditions"]
        );
    }

    #[test]
    fn test_search_by_target() {
        let db = db();
        let hits = db.search_by_target("thrombin");
        assert_eq!(hits.len(), 2);
        assert_eq!(hits[0].target, "Thrombin");
        assert_eq!(hits[1].target, "Human alpha-Thrombin");

        let hits = db.search_by_target("Alpha Thrombin");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].sequence(), Some("AGTCCGTGGTAGGGCAGGTTGGGGTGACT"));

        assert!(db.search_by_target("lysozyme").is_empty());
    }

    #[test]
    fn test_empty_query_matches_named_rows() {
        assert_eq!(db().search_by_target("--").len(), 3);
    }

    #[test]
    fn test_record_fields() {
        let db = db();
        let atp = db.search_by_target("ATP")[0];
        assert_eq!(atp.row, 2);
        assert_eq!(atp.buffer(), Some("20 mM Tris, 300 mM NaCl, 5 mM MgCl2"));
        assert_eq!(atp.get("kd_nm"), Some("6000"));
    }

    #[test]
    fn test_row_numbers_count_blank_rows() {
        let db = AptamerDatabase::from_delimited(
            "Target,Sequence\nATP,ACGT\n,\nThrombin,GGTTGG\n".as_bytes(),
            b',',
        )
        .unwrap();
        assert_eq!(db.len(), 2);
        assert_eq!(db.records()[0].row, 1);
        assert_eq!(db.records()[1].row, 3);
    }

    #[test]
    fn test_missing_target_column() {
        let err = AptamerDatabase::from_delimited("name,sequence\nx,ACGT\n".as_bytes(), b',')
            .unwrap_err();
        assert!(matches!(err, LoadError::MissingColumn(ref c) if c == "target"));
    }

    #[test]
    fn test_tab_delimited() {
        let db = AptamerDatabase::from_delimited("Target\tSequence\nATP\tACGT\n".as_bytes(), b'\t')
            .unwrap();
        assert_eq!(db.len(), 1);
        assert_eq!(db.records()[0].sequence(), Some("ACGT"));
    }

    #[test]
    fn test_unsupported_extension() {
        assert!(matches!(
            AptamerDatabase::load("aptamers.json"),
            Err(LoadError::UnsupportedFormat(_))
        ));
    }
}
