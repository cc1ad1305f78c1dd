/// Complement a single DNA base
pub fn complement_base(base: char) -> char {
    match base.to_ascii_uppercase() {
        'A' => 'T',
        'T' | 'U' => 'A',
        'G' => 'C',
        'C' => 'G',
        'R' => 'Y',
        'Y' => 'R',
        'S' => 'S',
        'W' => 'W',
        'K' => 'M',
        'M' => 'K',
        'B' => 'V',
        'V' => 'B',
        'D' => 'H',
        'H' => 'D',
        'N' => 'N',
        other => other,
    }
}

/// Reverse complement of a DNA sequence
pub fn reverse_complement(seq: &str) -> String {
    seq.chars().rev().map(complement_base).collect()
}

/// Base of the RNA transcribed opposite a template base.
pub fn transcribe_base(base: char) -> char {
    match base.to_ascii_uppercase() {
        'A' => 'U',
        'T' | 'U' => 'A',
        'C' => 'G',
        'G' => 'C',
        other => other,
    }
}

/// RNA transcript of a template-strand DNA domain.
///
/// The polymerase reads the template 3'->5', so the transcript is the
/// reverse complement with U in place of T.
pub fn rna_transcript(template: &str) -> String {
    template.chars().rev().map(transcribe_base).collect()
}

/// Template-strand DNA that transcribes into `rna`. Inverse of [`rna_transcript`].
pub fn template_for_transcript(rna: &str) -> String {
    rna.chars().rev().map(complement_base).collect()
}

/// Calculate GC content as a fraction (0.0 to 1.0)
pub fn gc_content(seq: &str) -> f64 {
    if seq.is_empty() {
        return 0.0;
    }
    let gc_count = seq
        .chars()
        .filter(|c| matches!(c.to_ascii_uppercase(), 'G' | 'C'))
        .count();
    gc_count as f64 / seq.len() as f64
}
