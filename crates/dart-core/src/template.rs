use serde::{Deserialize, Serialize};

use crate::config::{DesignConfig, InsulationPair};
use crate::operations::{reverse_complement, rna_transcript};

/// Template-strand domain that is transcribed:
/// `output_t + insulation + aptamer + comp`.
pub fn encoded_domain(config: &DesignConfig, aptamer: &str, pair: &InsulationPair) -> String {
    let output_t = config.output.t();
    let mut encoded = String::with_capacity(
        output_t.len() + pair.insulation.len() + aptamer.len() + pair.comp.len(),
    );
    encoded.push_str(output_t);
    encoded.push_str(&pair.insulation);
    encoded.push_str(aptamer);
    encoded.push_str(&pair.comp);
    encoded
}

/// Both strands of an assembled dART plus its transcript.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DartTemplate {
    /// Template strand: encoded domain followed by the promoter template strand.
    pub template: String,
    /// Non-template strand: promoter followed by the encoded domain's complement.
    pub non_template: String,
    pub transcript: String,
}

/// Assemble the dART template for one insulation pair.
pub fn assemble(config: &DesignConfig, aptamer: &str, pair: &InsulationPair) -> DartTemplate {
    let encoded = encoded_domain(config, aptamer, pair);
    let transcript = rna_transcript(&encoded);
    let non_template = format!("{}{}", config.promoter_nt, reverse_complement(&encoded));
    DartTemplate {
        template: format!("{}{}", encoded, config.promoter_t),
        non_template,
        transcript,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Tier;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_encoded_domain_layout() {
        let config = DesignConfig::default();
        let pair = InsulationPair::new("GGGATG", "CATCCC", Tier::Default);
        assert_eq!(
            encoded_domain(&config, "ACGT", &pair),
            "GTTAATTAGTATGTGGATGTAGGGGATGACGTCATCCC"
        );
    }

    #[test]
    fn test_assemble() {
        let config = DesignConfig::default();
        let pair = InsulationPair::new("GGGATG", "CATCCC", Tier::Default);
        let dart = assemble(&config, "ACGT", &pair);

        assert_eq!(
            dart.template,
            "GTTAATTAGTATGTGGATGTAGGGGATGACGTCATCCCTATAGTGAGTCGTATTAGAA"
        );
        assert_eq!(
            dart.non_template,
            "TTCTAATACGACTCACTATAGGGATGACGTCATCCCCTACATCCACATACTAATTAAC"
        );
        // transcript starts at the +1 G right after the promoter
        assert_eq!(dart.transcript, "GGGAUGACGUCAUCCCCUACAUCCACAUACUAAUUAAC");
        assert_eq!(dart.transcript.replace('U', "T"), &dart.non_template[20..]);
    }
}
