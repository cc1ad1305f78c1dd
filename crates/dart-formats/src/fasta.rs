use dart_core::sequence::Sequence;

use crate::ParseError;

/// Parse a FASTA format string into one or more Sequences
pub fn parse(input: &str) -> Result<Vec<Sequence>, ParseError> {
    let mut sequences = Vec::new();
    let mut current_name: Option<String> = None;
    let mut current_desc: Option<String> = None;
    let mut current_seq = String::new();

    for line in input.lines() {
        let trimmed = line.trim();

        if trimmed.is_empty() {
            continue;
        }

        if let Some(header) = trimmed.strip_prefix('>') {
            if let Some(name) = current_name.take() {
                push_record(
                    &mut sequences,
                    name,
                    current_desc.take(),
                    std::mem::take(&mut current_seq),
                );
            }

            let mut parts = header.splitn(2, char::is_whitespace);
            current_name = Some(parts.next().unwrap_or_default().to_string());
            current_desc = parts.next().map(|s| s.trim().to_string());
            current_seq.clear();
        } else if trimmed.starts_with(';') {
            continue;
        } else {
            current_seq.push_str(trimmed);
        }
    }

    if let Some(name) = current_name {
        push_record(&mut sequences, name, current_desc, current_seq);
    }

    if sequences.is_empty() {
        return Err(ParseError::InvalidFormat(
            "No sequences found in FASTA input".to_string(),
        ));
    }

    Ok(sequences)
}

fn push_record(
    sequences: &mut Vec<Sequence>,
    name: String,
    description: Option<String>,
    raw: String,
) {
    // Sequence::new drops anything outside ACGTU
    let mut seq = Sequence::new(name, raw);
    if seq.is_empty() {
        return;
    }
    if let Some(desc) = description {
        seq.description = desc;
    }
    sequences.push(seq);
}

/// First record of a FASTA string.
pub fn parse_first(input: &str) -> Result<Sequence, ParseError> {
    parse(input)?
        .into_iter()
        .next()
        .ok_or(ParseError::UnexpectedEnd)
}

/// Serialize sequences to FASTA format
pub fn serialize(sequences: &[Sequence]) -> String {
    let mut out = String::new();

    for seq in sequences {
        out.push('>');
        out.push_str(&seq.name);
        if !seq.description.is_empty() {
            out.push(' ');
            out.push_str(&seq.description);
        }
        out.push('\n');

        for chunk in seq.sequence.as_bytes().chunks(80) {
            out.push_str(&String::from_utf8_lossy(chunk));
            out.push('\n');
        }
    }

    out
}
