//! Ordered search for an insulation domain that folds the dART transcript
//! into the output-sequestering hairpin.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::config::{DesignConfig, InsulationPair, OutputDomain};
use crate::fold::{BasePairProbabilities, FoldEngine};
use crate::sequence::sanitize;
use crate::template::assemble;

/// An accepted design.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DartDesign {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
    /// Sanitized aptamer.
    pub aptamer: String,
    pub output: OutputDomain,
    pub pair: InsulationPair,
    /// 1-based position of the pair in the candidate list.
    pub rank: usize,
    /// Full DNA template strand.
    pub template: String,
    pub non_template: String,
    pub transcript: String,
    pub structure: String,
    pub energy: f64,
    pub qualifying_pairs: usize,
}

impl DartDesign {
    pub fn insulation(&self) -> &str {
        &self.pair.insulation
    }

    pub fn insulation_comp(&self) -> &str {
        &self.pair.comp
    }
}

/// One candidate tried during a search.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandidateEvaluation {
    pub rank: usize,
    pub pair: InsulationPair,
    pub qualifying_pairs: usize,
    pub accepted: bool,
}

/// Design (if any) plus every candidate evaluated to reach it.
#[derive(Debug, Clone)]
pub struct SearchTrace {
    pub design: Option<DartDesign>,
    pub evaluations: Vec<CandidateEvaluation>,
}

/// Number of probabilities in the acceptance region strictly above the threshold.
pub fn qualifying_pairs(
    config: &DesignConfig,
    probabilities: &BasePairProbabilities,
    aptamer_len: usize,
) -> usize {
    probabilities.count_above(
        config.window.start(),
        config.window.target(aptamer_len),
        config.threshold,
    )
}

/// Return the first candidate, in priority order, whose transcript has
/// exactly `required_pairs` qualifying pairs. `Ok(None)` when none does.
pub fn search<E: FoldEngine>(
    aptamer: &str,
    config: &DesignConfig,
    engine: &E,
) -> Result<Option<DartDesign>, E::Error> {
    search_with_trace(aptamer, config, engine).map(|trace| trace.design)
}

/// Same as [`search`], also returning the evaluated candidates.
pub fn search_with_trace<E: FoldEngine>(
    aptamer: &str,
    config: &DesignConfig,
    engine: &E,
) -> Result<SearchTrace, E::Error> {
    let aptamer = sanitize(aptamer);
    let mut evaluations = Vec::new();

    for (index, pair) in config.candidates().enumerate() {
        let dart = assemble(config, &aptamer, pair);
        let fold = engine.fold(&dart.transcript, &config.conditions)?;
        let count = qualifying_pairs(config, &fold.probabilities, aptamer.len());
        let accepted = count == config.required_pairs;

        evaluations.push(CandidateEvaluation {
            rank: index + 1,
            pair: pair.clone(),
            qualifying_pairs: count,
            accepted,
        });

        if accepted {
            let design = DartDesign {
                id: Uuid::new_v4(),
                created_at: Utc::now(),
                aptamer,
                output: config.output,
                pair: pair.clone(),
                rank: index + 1,
                template: dart.template,
                non_template: dart.non_template,
                transcript: dart.transcript,
                structure: fold.structure,
                energy: fold.energy,
                qualifying_pairs: count,
            };
            return Ok(SearchTrace {
                design: Some(design),
                evaluations,
            });
        }
    }

    Ok(SearchTrace {
        design: None,
        evaluations,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fold::{FoldConditions, FoldResult};
    use std::cell::RefCell;

    /// Returns `count` qualifying pairs for every transcript that starts with `hit`.
    struct PrefixEngine {
        hit: &'static str,
        count: usize,
        calls: RefCell<Vec<String>>,
    }

    impl PrefixEngine {
        fn new(hit: &'static str, count: usize) -> Self {
            Self {
                hit,
                count,
                calls: RefCell::new(Vec::new()),
            }
        }
    }

    impl FoldEngine for PrefixEngine {
        type Error = String;

        fn fold(&self, rna: &str, conditions: &FoldConditions) -> Result<FoldResult, String> {
            assert_eq!(conditions.temperature_celsius, 37.0);
            self.calls.borrow_mut().push(rna.to_string());
            let mut probabilities = BasePairProbabilities::new(rna.len());
            if rna.starts_with(self.hit) {
                let aptamer_len = rna.len() - 6 - 6 - 22;
                for k in 0..self.count {
                    probabilities.set(k, 6 + aptamer_len + k, 0.97);
                }
            }
            Ok(FoldResult {
                structure: ".".repeat(rna.len()),
                energy: -4.2,
                probabilities,
            })
        }
    }

    #[test]
    fn test_default_hit_short_circuits() {
        let engine = PrefixEngine::new("GGGAUG", 6);
        let design = search("acguacgu", &DesignConfig::default(), &engine)
            .unwrap()
            .expect("default pair accepted");
        assert_eq!(engine.calls.borrow().len(), 1);
        assert_eq!(design.insulation(), "GGGATG");
        assert_eq!(design.insulation_comp(), "CATCCC");
        assert_eq!(design.rank, 1);
        assert_eq!(design.aptamer, "ACGUACGU");
    }

    #[test]
    fn test_exact_count_required() {
        let engine = PrefixEngine::new("GGGAUG", 7);
        let trace = search_with_trace("ACGT", &DesignConfig::default(), &engine).unwrap();
        assert!(trace.design.is_none());
        assert_eq!(trace.evaluations[0].qualifying_pairs, 7);
        assert!(!trace.evaluations[0].accepted);
    }

    #[test]
    fn test_exhaustion_returns_none() {
        let engine = PrefixEngine::new("XXXX", 6);
        let config = DesignConfig::default();
        let trace = search_with_trace("ACGT", &config, &engine).unwrap();
        assert!(trace.design.is_none());
        assert_eq!(trace.evaluations.len(), config.candidate_count());
        assert_eq!(engine.calls.borrow().len(), config.candidate_count());
        assert!(trace.evaluations.iter().all(|e| !e.accepted));
    }

    #[test]
    fn test_engine_error_propagates() {
        struct Broken;
        impl FoldEngine for Broken {
            type Error = String;
            fn fold(&self, _: &str, _: &FoldConditions) -> Result<FoldResult, String> {
                Err("engine down".to_string())
            }
        }
        let result = search("ACGT", &DesignConfig::default(), &Broken);
        assert_eq!(result.unwrap_err(), "engine down");
    }
}
