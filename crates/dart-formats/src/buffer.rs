//! Salt extraction from free-text buffer descriptions.

use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

/// Concentration assumed for phosphate-buffered saline.
pub const PBS_NACL_MM: f64 = 150.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Salt {
    NaCl,
    KCl,
    MgCl2,
    CaCl2,
}

impl Salt {
    pub fn as_str(&self) -> &'static str {
        match self {
            Salt::NaCl => "NACL",
            Salt::KCl => "KCL",
            Salt::MgCl2 => "MGCL2",
            Salt::CaCl2 => "CACL2",
        }
    }

    /// Case-insensitive lookup by chemical name.
    pub fn from_name(name: &str) -> Option<Salt> {
        match name.to_ascii_uppercase().as_str() {
            "NACL" => Some(Salt::NaCl),
            "KCL" => Some(Salt::KCl),
            "MGCL2" => Some(Salt::MgCl2),
            "CACL2" => Some(Salt::CaCl2),
            _ => None,
        }
    }

    pub fn is_divalent(&self) -> bool {
        matches!(self, Salt::MgCl2 | Salt::CaCl2)
    }
}

impl std::fmt::Display for Salt {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A recognized salt and its millimolar concentration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SaltConcentration {
    pub salt: Salt,
    pub millimolar: f64,
}

impl SaltConcentration {
    pub fn molar(&self) -> f64 {
        self.millimolar / 1000.0
    }
}

fn saline_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)\bPBS\b|SALINE").expect("valid saline pattern"))
}

fn salt_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        let salt = r"NaCl|KCl|MgCl2|CaCl2";
        let conc = r"\d+(?:\.\d*)?";
        let sep = r"\s*[,:=]?\s*";
        Regex::new(&format!(
            r"(?i)(?P<conc_first>{conc})\s*mM\s*(?P<salt_after>{salt})\b|\b(?P<salt_first>{salt}){sep}(?P<conc_after>{conc})\s*mM\b"
        ))
        .expect("valid salt pattern")
    })
}

/// Every (salt, concentration) pair mentioned in `text`, left to right.
///
/// Concentration-first and salt-first phrasings are alternatives of a single
/// scan, so neither ordering can shadow the other. Only the salt-first form
/// takes a `,`, `:` or `=` separator; `20 mM, NaCl` is two list entries.
pub fn salt_mentions(text: &str) -> Vec<SaltConcentration> {
    let text = text.replace('₂', "2");
    salt_regex()
        .captures_iter(&text)
        .filter_map(|caps| {
            let (salt, conc) = match (caps.name("salt_after"), caps.name("conc_first")) {
                (Some(salt), Some(conc)) => (salt, conc),
                _ => (caps.name("salt_first")?, caps.name("conc_after")?),
            };
            Some(SaltConcentration {
                salt: Salt::from_name(salt.as_str())?,
                millimolar: conc.as_str().parse().ok()?,
            })
        })
        .collect()
}

/// Highest-concentration salt in a buffer description.
///
/// PBS or saline maps to 150 mM NaCl and overrides any explicit salt.
/// Ties keep the first mention. `None` when nothing is recognized.
pub fn highest_salt(buffer: &str) -> Option<SaltConcentration> {
    let text = buffer.trim().replace('₂', "2");
    if saline_regex().is_match(&text) {
        return Some(SaltConcentration {
            salt: Salt::NaCl,
            millimolar: PBS_NACL_MM,
        });
    }

    salt_mentions(&text)
        .into_iter()
        .fold(None, |best: Option<SaltConcentration>, candidate| match best {
            Some(b) if b.millimolar >= candidate.millimolar => Some(b),
            _ => Some(candidate),
        })
}
