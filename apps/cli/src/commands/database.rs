use std::path::Path;
use std::process::ExitCode;

use anyhow::{Context, Result};
use dart_aptamers::AptamerDatabase;

use crate::dto::RecordDto;
use crate::report::Reporter;

pub fn search(table: &Path, target: &str, json: bool, reporter: &Reporter) -> Result<ExitCode> {
    let db = AptamerDatabase::load(table)
        .with_context(|| format!("Failed to load aptamer table {}", table.display()))?;
    reporter.info(format!("Loaded {} aptamers from {}", db.len(), table.display()));

    let hits = db.search_by_target(target);
    if json {
        let dtos: Vec<RecordDto> = hits.iter().map(|r| RecordDto::from(*r)).collect();
        println!("{}", serde_json::to_string_pretty(&dtos)?);
    } else {
        for record in &hits {
            println!(
                "{}\t{}\t{}",
                record.target,
                record.sequence().unwrap_or("-"),
                record.buffer().unwrap_or("-")
            );
        }
    }

    reporter.info(format!("{} rows match {:?}", hits.len(), target));
    Ok(ExitCode::SUCCESS)
}
