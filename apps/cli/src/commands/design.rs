use std::io::Read;
use std::process::ExitCode;

use anyhow::{bail, Context, Result};
use chrono::Utc;
use dart_aptamers::AptamerDatabase;
use dart_core::{search_with_trace, DesignConfig, FoldConditions, Molecule, Sequence};
use dart_formats::detect::detect_sequence_input;
use dart_formats::{fasta, highest_salt, SequenceInput};
use dart_fold::RnaFold;

use crate::dto::{DesignDto, DesignReport, ReportEnvelope};
use crate::report::Reporter;
use crate::DesignArgs;

/// An aptamer to design for, with the buffer it was selected in.
struct DesignInput {
    aptamer: Sequence,
    buffer: Option<String>,
}

pub fn run(args: &DesignArgs, reporter: &Reporter) -> Result<ExitCode> {
    let base = DesignConfig::default().with_output(args.output.into());
    base.validate().context("Invalid design configuration")?;

    let engine = match &args.rnafold {
        Some(path) => RnaFold::with_binary(path),
        None => RnaFold::new(),
    };
    reporter.detail(format!("folding with {}", engine.binary().display()));

    let inputs = collect_inputs(args, reporter)?;
    if inputs.is_empty() {
        bail!("No aptamer sequence to design for");
    }

    let mut reports = Vec::with_capacity(inputs.len());
    for input in inputs {
        let salt_molar = salt_for(args, input.buffer.as_deref(), reporter);
        let config = base.clone().with_conditions(FoldConditions {
            temperature_celsius: args.temperature,
            salt_molar,
        });

        if input.aptamer.molecule() == Molecule::Rna {
            reporter.warn(format!(
                "{} is written as RNA; U is kept as-is in the DNA template",
                input.aptamer.name
            ));
        }
        reporter.info(format!(
            "Designing {} ({} nt) against {} candidates",
            input.aptamer.name,
            input.aptamer.len(),
            config.candidate_count()
        ));

        let trace = search_with_trace(&input.aptamer.sequence, &config, &engine)
            .with_context(|| format!("Folding failed for {}", input.aptamer.name))?;

        for eval in &trace.evaluations {
            reporter.detail(format!(
                "#{:<2} {}/{} {:?}: {} pairs{}",
                eval.rank,
                eval.pair.insulation,
                eval.pair.comp,
                eval.pair.tier,
                eval.qualifying_pairs,
                if eval.accepted { " (accepted)" } else { "" }
            ));
        }

        match &trace.design {
            Some(design) => reporter.info(format!(
                "  {} accepted {} at rank {}",
                input.aptamer.name,
                design.insulation(),
                design.rank
            )),
            None => reporter.warn(format!(
                "no insulation domain folds {} into the output hairpin",
                input.aptamer.name
            )),
        }

        reports.push(DesignReport {
            name: input.aptamer.name.clone(),
            aptamer: input.aptamer.sequence.clone(),
            salt_molar,
            found: trace.design.is_some(),
            candidates_tried: trace.evaluations.len(),
            design: trace.design.as_ref().map(DesignDto::from),
            evaluations: if reporter.is_verbose() {
                trace.evaluations.clone()
            } else {
                Vec::new()
            },
        });
    }

    let all_found = reports.iter().all(|r| r.found);
    if args.json {
        let envelope = ReportEnvelope {
            generated_at: Utc::now(),
            temperature_celsius: args.temperature,
            reports,
        };
        println!("{}", serde_json::to_string_pretty(&envelope)?);
    } else {
        for report in &reports {
            print_fasta(report);
        }
    }

    Ok(if all_found {
        ExitCode::SUCCESS
    } else {
        ExitCode::from(2)
    })
}

fn collect_inputs(args: &DesignArgs, reporter: &Reporter) -> Result<Vec<DesignInput>> {
    if let Some(path) = &args.fasta {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let aptamer = fasta::parse_first(&content)
            .with_context(|| format!("Failed to parse FASTA {}", path.display()))?;
        return Ok(vec![DesignInput {
            aptamer,
            buffer: None,
        }]);
    }

    if let (Some(table), Some(target)) = (&args.database, &args.target) {
        let db = AptamerDatabase::load(table)
            .with_context(|| format!("Failed to load aptamer table {}", table.display()))?;
        let hits = db.search_by_target(target);
        reporter.info(format!(
            "{} of {} aptamers match {:?}",
            hits.len(),
            db.len(),
            target
        ));

        let mut inputs = Vec::new();
        for record in hits {
            match record.aptamer() {
                Some(aptamer) => inputs.push(DesignInput {
                    aptamer,
                    buffer: record.buffer().map(String::from),
                }),
                None => reporter.warn(format!(
                    "row {} ({}) has no sequence, skipped",
                    record.row, record.target
                )),
            }
        }
        return Ok(inputs);
    }

    let raw = match args.sequence.as_deref() {
        Some("-") => {
            let mut text = String::new();
            std::io::stdin()
                .read_to_string(&mut text)
                .context("Failed to read stdin")?;
            text
        }
        Some(seq) => seq.to_string(),
        None => bail!("Provide a sequence, --fasta, or --database with --target"),
    };

    let aptamer = match detect_sequence_input(&raw) {
        SequenceInput::Fasta => fasta::parse_first(&raw).context("Failed to parse FASTA input")?,
        SequenceInput::Raw => Sequence::new("aptamer", &raw),
    };
    if aptamer.is_empty() {
        bail!("Aptamer contains no A, C, G, T or U");
    }
    Ok(vec![DesignInput {
        aptamer,
        buffer: None,
    }])
}

/// Monovalent salt (mol/L) from `--buffer`, or from the row's buffer with
/// `--use-buffer-salt`.
fn salt_for(args: &DesignArgs, row_buffer: Option<&str>, reporter: &Reporter) -> Option<f64> {
    let text = match (&args.buffer, args.use_buffer_salt) {
        (Some(text), _) => text.as_str(),
        (None, true) => row_buffer?,
        (None, false) => return None,
    };

    let Some(found) = highest_salt(text) else {
        reporter.warn(format!("no salt recognized in buffer {text:?}"));
        return None;
    };
    if found.salt.is_divalent() {
        reporter.warn(format!(
            "{} is divalent; RNAfold's salt correction is monovalent only, ignoring",
            found.salt
        ));
        return None;
    }
    reporter.detail(format!("salt correction {} {} mM", found.salt, found.millimolar));
    Some(found.molar())
}

fn print_fasta(report: &DesignReport) {
    let Some(design) = &report.design else {
        return;
    };
    let mut template = Sequence::new(&report.name, &design.template);
    template.description = format!(
        "insulation={} comp={} tier={:?} rank={} output={} gc={:.2}",
        design.insulation,
        design.insulation_comp,
        design.tier,
        design.rank,
        design.output,
        design.gc_content
    );
    let non_template = Sequence::new(format!("{}_non_template", report.name), &design.non_template);
    print!("{}", fasta::serialize(&[template, non_template]));
}
