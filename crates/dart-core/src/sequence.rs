use serde::{Deserialize, Serialize};

/// Nucleotide alphabet accepted anywhere in a design.
pub const NUCLEOTIDES: [char; 5] = ['A', 'T', 'C', 'G', 'U'];

/// Keep only A, T, C, G and U (upper-cased), dropping everything else.
///
/// Never fails: input made entirely of noise yields an empty string.
pub fn sanitize(raw: &str) -> String {
    raw.chars()
        .map(|c| c.to_ascii_uppercase())
        .filter(|c| NUCLEOTIDES.contains(c))
        .collect()
}

/// True if the sequence is made only of A, C, G and T (any case).
pub fn is_dna(seq: &str) -> bool {
    seq.chars()
        .all(|c| matches!(c.to_ascii_uppercase(), 'A' | 'C' | 'G' | 'T'))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Molecule {
    Dna,
    Rna,
}

impl std::fmt::Display for Molecule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Molecule::Dna => write!(f, "DNA"),
            Molecule::Rna => write!(f, "RNA"),
        }
    }
}

/// A named nucleotide sequence, sanitized on construction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sequence {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub sequence: String,
}

impl Sequence {
    pub fn new(name: impl Into<String>, sequence: impl AsRef<str>) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            sequence: sanitize(sequence.as_ref()),
        }
    }

    pub fn len(&self) -> usize {
        self.sequence.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sequence.is_empty()
    }

    /// RNA if the sequence contains U and no T, DNA otherwise.
    pub fn molecule(&self) -> Molecule {
        if self.sequence.contains('U') && !self.sequence.contains('T') {
            Molecule::Rna
        } else {
            Molecule::Dna
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_drops_noise() {
        assert_eq!(sanitize("acg t-u\nN5'"), "ACGTU");
        assert_eq!(sanitize("5'-GGG ATG-3'"), "GGGATG");
    }

    #[test]
    fn test_sanitize_all_invalid_is_empty() {
        assert_eq!(sanitize("xyz 123 !?"), "");
        assert_eq!(sanitize(""), "");
    }

    #[test]
    fn test_sanitize_properties() {
        let inputs = [
            "acgu",
            "ATCG atcg",
            "  n-n-N ggg  ",
            "GCGG AUCC\tuuaa",
            "Ünïcödé ACGT ß",
        ];
        for s in inputs {
            let once = sanitize(s);
            assert!(once.chars().all(|c| NUCLEOTIDES.contains(&c)), "{once}");
            assert_eq!(sanitize(&once), once, "idempotent for {s:?}");
            assert_eq!(sanitize(&s.to_uppercase()), once, "case-insensitive for {s:?}");
        }
    }

    #[test]
    fn test_new_sequence() {
        let seq = Sequence::new("apt", "gga cuu");
        assert_eq!(seq.name, "apt");
        assert_eq!(seq.sequence, "GGACUU");
        assert_eq!(seq.len(), 6);
        assert_eq!(seq.molecule(), Molecule::Rna);
    }

    #[test]
    fn test_alphabet_checks() {
        assert!(is_dna("acgtACGT"));
        assert!(!is_dna("ACGU"));
        assert_eq!(Sequence::new("d", "ACGT").molecule(), Molecule::Dna);
        assert_eq!(Sequence::new("m", "ACGTU").molecule(), Molecule::Dna);
    }
}
