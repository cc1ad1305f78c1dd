use crate::{SequenceInput, TableFormat};

/// Detect table format from file extension
pub fn detect_table_format(path: &str) -> TableFormat {
    let lower = path.to_lowercase();
    if lower.ends_with(".csv") {
        TableFormat::Csv
    } else if lower.ends_with(".tsv") || lower.ends_with(".tab") || lower.ends_with(".txt") {
        TableFormat::Tsv
    } else if lower.ends_with(".xlsx")
        || lower.ends_with(".xlsm")
        || lower.ends_with(".xls")
        || lower.ends_with(".ods")
    {
        TableFormat::Workbook
    } else {
        TableFormat::Unknown
    }
}

/// FASTA if the content opens with a header line, raw sequence text otherwise.
pub fn detect_sequence_input(content: &str) -> SequenceInput {
    if content.trim_start().starts_with('>') {
        SequenceInput::Fasta
    } else {
        SequenceInput::Raw
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_table_format() {
        assert_eq!(detect_table_format("aptamers.csv"), TableFormat::Csv);
        assert_eq!(detect_table_format("APTAMERS.TSV"), TableFormat::Tsv);
        assert_eq!(detect_table_format("db/Aptamers.xlsx"), TableFormat::Workbook);
        assert_eq!(detect_table_format("notes.md"), TableFormat::Unknown);
    }

    #[test]
    fn test_delimiters() {
        assert_eq!(TableFormat::Csv.delimiter(), Some(b','));
        assert_eq!(TableFormat::Tsv.delimiter(), Some(b'\t'));
        assert_eq!(TableFormat::Workbook.delimiter(), None);
    }

    #[test]
    fn test_detect_sequence_input() {
        assert_eq!(detect_sequence_input("  >apt\nACGT"), SequenceInput::Fasta);
        assert_eq!(detect_sequence_input("GGTTGGTGTGGTTGG"), SequenceInput::Raw);
    }
}
