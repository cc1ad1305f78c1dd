pub mod config;
pub mod fold;
pub mod insulation;
pub mod operations;
pub mod sequence;
pub mod template;

pub use config::{DesignConfig, InsulationPair, OutputDomain, Tier};
pub use fold::{BasePairProbabilities, FoldConditions, FoldEngine, FoldResult};
pub use insulation::{search, search_with_trace, CandidateEvaluation, DartDesign, SearchTrace};
pub use sequence::*;
