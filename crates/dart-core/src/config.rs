//! Fixed DNA fragments and search parameters for dART design.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::fold::FoldConditions;
use crate::operations::reverse_complement;
use crate::sequence::is_dna;

/// T7 promoter, non-template strand.
pub const PROMOTER_NT: &str = "TTCTAATACGACTCACTATA";
/// T7 promoter, template strand.
pub const PROMOTER_T: &str = "TATAGTGAGTCGTATTAGAA";

pub const DEFAULT_INSULATION: (&str, &str) = ("GGGATG", "CATCCC");

pub const ALTERNATIVE_INSULATIONS: [(&str, &str); 3] = [
    ("GGGAGT", "ACTCCC"),
    ("GGGAGA", "TCTCCC"),
    ("GGGAAA", "TTTCCC"),
];

/// Second-line insulation pairs, tried in order after the alternatives.
///
/// Every comp is the reverse complement of its insulation. The published
/// table lists TGACCC for GGGACT; AGTCCC is used instead, which changes the
/// rank 10 template relative to that table.
pub const ALTERNATIVE_ALT_INSULATIONS: [(&str, &str); 43] = [
    ("GGGAAC", "GTTCCC"),
    ("GGGAAG", "CTTCCC"),
    ("GGGAAT", "ATTCCC"),
    ("GGGACA", "TGTCCC"),
    ("GGGACG", "CGTCCC"),
    ("GGGACT", "AGTCCC"), // published as TGACCC
    ("GGGAGC", "GCTCCC"),
    ("GGGAGG", "CCTCCC"),
    ("GGGATA", "TATCCC"),
    ("GGGATC", "GATCCC"),
    ("GGGATT", "AATCCC"),
    ("GGGCAA", "TTGCCC"),
    ("GGGCAC", "GTGCCC"),
    ("GGGCAG", "CTGCCC"),
    ("GGGCAT", "ATGCCC"),
    ("GGGCCA", "TGGCCC"),
    ("GGGCCC", "GGGCCC"),
    ("GGGCCG", "CGGCCC"),
    ("GGGCCT", "AGGCCC"),
    ("GGGCGA", "TCGCCC"),
    ("GGGCGC", "GCGCCC"),
    ("GGGCGG", "CCGCCC"),
    ("GGGCGT", "ACGCCC"),
    ("GGGCTA", "TAGCCC"),
    ("GGGCTC", "GAGCCC"),
    ("GGGCTG", "CAGCCC"),
    ("GGGCTT", "AAGCCC"),
    ("GGGTAA", "TTACCC"),
    ("GGGTAC", "GTACCC"),
    ("GGGTAG", "CTACCC"),
    ("GGGTAT", "ATACCC"),
    ("GGGTCA", "TGACCC"),
    ("GGGTCC", "GGACCC"),
    ("GGGTCG", "CGACCC"),
    ("GGGTCT", "AGACCC"),
    ("GGGTGA", "TCACCC"),
    ("GGGTGC", "GCACCC"),
    ("GGGTGG", "CCACCC"),
    ("GGGTGT", "ACACCC"),
    ("GGGTTA", "TAACCC"),
    ("GGGTTC", "GAACCC"),
    ("GGGTTG", "CAACCC"),
    ("GGGTTT", "AAACCC"),
];

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("{name} is not a DNA fragment: {fragment}")]
    NotDna { name: &'static str, fragment: String },
    #[error("comp {comp} is not the reverse complement of insulation {insulation}")]
    CompMismatch { insulation: String, comp: String },
    #[error("insulation {insulation} is {len} nt, expected {expected}")]
    InsulationLength {
        insulation: String,
        len: usize,
        expected: usize,
    },
    #[error("required pair count {required} exceeds window capacity {capacity}")]
    UnreachableCount { required: usize, capacity: usize },
    #[error("probability threshold must be within [0, 1), got {0}")]
    Threshold(f64),
}

/// Output domain written into the template, with both strands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputDomain {
    O1,
    /// Alternative output if O1 is not compatible with the reporter.
    O2,
    O3,
    /// Truncated O1 complement used for inverter dARTs.
    O1Inverter,
}

impl OutputDomain {
    /// Non-template strand.
    pub fn nt(&self) -> &'static str {
        match self {
            OutputDomain::O1 => "CTACATCCACATACTAATTAAC",
            OutputDomain::O2 => "CTACTTTCACTTCACAACATCA",
            OutputDomain::O3 => "TACCATCACATTCAATAATCCT",
            OutputDomain::O1Inverter => "GTTAATTAGTATGTGGAT",
        }
    }

    /// Template strand.
    pub fn t(&self) -> &'static str {
        match self {
            OutputDomain::O1 => "GTTAATTAGTATGTGGATGTAG",
            OutputDomain::O2 => "TGATGTTGTGAAGTGAAAGTAG",
            OutputDomain::O3 => "AGGATTATTGAATGTGATGGTA",
            OutputDomain::O1Inverter => "ATCCACATACTAATTAAC",
        }
    }

    pub fn all() -> [OutputDomain; 4] {
        [
            OutputDomain::O1,
            OutputDomain::O2,
            OutputDomain::O3,
            OutputDomain::O1Inverter,
        ]
    }
}

impl std::fmt::Display for OutputDomain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputDomain::O1 => write!(f, "O1"),
            OutputDomain::O2 => write!(f, "O2"),
            OutputDomain::O3 => write!(f, "O3"),
            OutputDomain::O1Inverter => write!(f, "O1c"),
        }
    }
}

/// Priority tier an insulation pair was drawn from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tier {
    Default,
    Alternative,
    AlternativeAlt,
}

/// An insulation domain and its reverse-complement partner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InsulationPair {
    pub insulation: String,
    pub comp: String,
    pub tier: Tier,
}

impl InsulationPair {
    pub fn new(insulation: impl Into<String>, comp: impl Into<String>, tier: Tier) -> Self {
        Self {
            insulation: insulation.into().to_uppercase(),
            comp: comp.into().to_uppercase(),
            tier,
        }
    }

    fn from_table(pairs: &[(&str, &str)], tier: Tier) -> Vec<Self> {
        pairs
            .iter()
            .map(|(ins, comp)| Self::new(*ins, *comp, tier))
            .collect()
    }
}

/// Index windows over the transcript's base-pair probability matrix.
///
/// Rows are `[0, start_len)`; columns are
/// `[target_offset + aptamer_len, target_offset + aptamer_len + target_len)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AcceptanceWindow {
    pub start_len: usize,
    pub target_offset: usize,
    pub target_len: usize,
}

impl AcceptanceWindow {
    pub fn start(&self) -> std::ops::Range<usize> {
        0..self.start_len
    }

    pub fn target(&self, aptamer_len: usize) -> std::ops::Range<usize> {
        let begin = self.target_offset + aptamer_len;
        begin..begin + self.target_len
    }
}

impl Default for AcceptanceWindow {
    fn default() -> Self {
        Self {
            start_len: 7,
            target_offset: 6,
            target_len: 8,
        }
    }
}

/// Everything the insulation search needs, passed in explicitly.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DesignConfig {
    pub promoter_nt: String,
    pub promoter_t: String,
    pub output: OutputDomain,
    pub default_pair: InsulationPair,
    pub alternatives: Vec<InsulationPair>,
    pub alternative_alts: Vec<InsulationPair>,
    pub conditions: FoldConditions,
    /// Probabilities must be strictly greater than this to count.
    pub threshold: f64,
    pub window: AcceptanceWindow,
    /// Exact number of qualifying pairs that accepts a candidate.
    pub required_pairs: usize,
}

impl Default for DesignConfig {
    fn default() -> Self {
        Self {
            promoter_nt: PROMOTER_NT.to_string(),
            promoter_t: PROMOTER_T.to_string(),
            output: OutputDomain::O1,
            default_pair: InsulationPair::new(
                DEFAULT_INSULATION.0,
                DEFAULT_INSULATION.1,
                Tier::Default,
            ),
            alternatives: InsulationPair::from_table(&ALTERNATIVE_INSULATIONS, Tier::Alternative),
            alternative_alts: InsulationPair::from_table(
                &ALTERNATIVE_ALT_INSULATIONS,
                Tier::AlternativeAlt,
            ),
            conditions: FoldConditions::default(),
            threshold: 0.9,
            window: AcceptanceWindow::default(),
            required_pairs: 6,
        }
    }
}

impl DesignConfig {
    pub fn with_output(mut self, output: OutputDomain) -> Self {
        self.output = output;
        self
    }

    pub fn with_conditions(mut self, conditions: FoldConditions) -> Self {
        self.conditions = conditions;
        self
    }

    /// Candidates in priority order: default, alternatives, alternative-alts.
    pub fn candidates(&self) -> impl Iterator<Item = &InsulationPair> + '_ {
        std::iter::once(&self.default_pair)
            .chain(self.alternatives.iter())
            .chain(self.alternative_alts.iter())
    }

    pub fn candidate_count(&self) -> usize {
        1 + self.alternatives.len() + self.alternative_alts.len()
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        for (name, fragment) in [
            ("promoter_nt", self.promoter_nt.as_str()),
            ("promoter_t", self.promoter_t.as_str()),
        ] {
            if !is_dna(fragment) {
                return Err(ConfigError::NotDna {
                    name,
                    fragment: fragment.to_string(),
                });
            }
        }

        for pair in self.candidates() {
            if !is_dna(&pair.insulation) || !is_dna(&pair.comp) {
                return Err(ConfigError::NotDna {
                    name: "insulation pair",
                    fragment: format!("{}/{}", pair.insulation, pair.comp),
                });
            }
            if reverse_complement(&pair.insulation) != pair.comp {
                return Err(ConfigError::CompMismatch {
                    insulation: pair.insulation.clone(),
                    comp: pair.comp.clone(),
                });
            }
            // the target window starts right after the insulation
            if pair.insulation.len() != self.window.target_offset {
                return Err(ConfigError::InsulationLength {
                    insulation: pair.insulation.clone(),
                    len: pair.insulation.len(),
                    expected: self.window.target_offset,
                });
            }
        }

        let capacity = self.window.start_len * self.window.target_len;
        if self.required_pairs > capacity {
            return Err(ConfigError::UnreachableCount {
                required: self.required_pairs,
                capacity,
            });
        }
        if !(0.0..1.0).contains(&self.threshold) {
            return Err(ConfigError::Threshold(self.threshold));
        }
        Ok(())
    }
}
