//! Flat, JSON-friendly views of designs and table rows.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use dart_aptamers::AptamerRecord;
use dart_core::operations::gc_content;
use dart_core::{CandidateEvaluation, DartDesign, Tier};
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordDto {
    pub row: usize,
    pub target: String,
    pub sequence: Option<String>,
    pub buffer: Option<String>,
    pub fields: BTreeMap<String, String>,
}

impl From<&AptamerRecord> for RecordDto {
    fn from(record: &AptamerRecord) -> Self {
        Self {
            row: record.row,
            target: record.target.clone(),
            sequence: record.sequence().map(String::from),
            buffer: record.buffer().map(String::from),
            fields: record.fields.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DesignDto {
    pub id: String,
    pub output: String,
    pub insulation: String,
    pub insulation_comp: String,
    pub tier: Tier,
    pub rank: usize,
    pub template: String,
    pub gc_content: f64,
    pub non_template: String,
    pub transcript: String,
    pub structure: String,
    pub energy: f64,
    pub qualifying_pairs: usize,
}

impl From<&DartDesign> for DesignDto {
    fn from(design: &DartDesign) -> Self {
        Self {
            id: design.id.to_string(),
            output: design.output.to_string(),
            insulation: design.insulation().to_string(),
            insulation_comp: design.insulation_comp().to_string(),
            tier: design.pair.tier,
            rank: design.rank,
            template: design.template.clone(),
            gc_content: gc_content(&design.template),
            non_template: design.non_template.clone(),
            transcript: design.transcript.clone(),
            structure: design.structure.clone(),
            energy: design.energy,
            qualifying_pairs: design.qualifying_pairs,
        }
    }
}

/// One aptamer's outcome.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DesignReport {
    pub name: String,
    pub aptamer: String,
    pub salt_molar: Option<f64>,
    pub found: bool,
    pub candidates_tried: usize,
    pub design: Option<DesignDto>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub evaluations: Vec<CandidateEvaluation>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportEnvelope {
    pub generated_at: DateTime<Utc>,
    pub temperature_celsius: f64,
    pub reports: Vec<DesignReport>,
}
