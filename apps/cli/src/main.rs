//! dart - insulation-domain design for aptamer dART templates.
//!
//! ## Usage
//!
//! ```bash
//! # Design a template for one aptamer
//! dart design GGTTGGTGTGGTTGG
//!
//! # Read the aptamer from FASTA, JSON report
//! dart design --fasta thrombin.fa --json
//!
//! # Design every aptamer in a table whose target matches
//! dart design --database aptamers.xlsx --target thrombin --use-buffer-salt
//!
//! # Helpers
//! dart transcript GTTAATTAGTATGTGGATGTAG
//! dart transcript --reverse CUACAUCCACAUACUAAUUAAC
//! dart salt "20 mM Tris, 150 mM NaCl, 5 mM MgCl2"
//! dart search aptamers.csv "ochratoxin a"
//! ```
//!
//! Folding runs ViennaRNA's `RNAfold`; point `DART_RNAFOLD` or `--rnafold`
//! at the executable if it is not on `PATH`.

mod commands;
mod dto;
mod report;

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::{Args, Parser, Subcommand, ValueEnum};
use dart_core::OutputDomain;

use report::Reporter;

/// Output domain choices on the command line
#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputArg {
    /// Default output domain
    O1,
    /// Alternative output domain 2
    O2,
    /// Alternative output domain 3
    O3,
    /// Truncated O1 complement for inverter dARTs
    O1Inverter,
}

impl From<OutputArg> for OutputDomain {
    fn from(arg: OutputArg) -> Self {
        match arg {
            OutputArg::O1 => OutputDomain::O1,
            OutputArg::O2 => OutputDomain::O2,
            OutputArg::O3 => OutputDomain::O3,
            OutputArg::O1Inverter => OutputDomain::O1Inverter,
        }
    }
}

/// dart - design insulated dART templates for aptamer biosensors
#[derive(Parser, Debug)]
#[command(name = "dart", version, about, long_about = None)]
struct Cli {
    /// Suppress progress messages
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Report every insulation candidate as it is folded
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Find an insulation domain and print the dART template
    Design(DesignArgs),
    /// Print the RNA transcript of a template-strand DNA domain
    Transcript {
        /// Template-strand DNA (non-ACGTU characters are ignored)
        dna: String,
        /// Treat the input as RNA and print the template that encodes it
        #[arg(long)]
        reverse: bool,
    },
    /// Report the highest-concentration salt in a buffer description
    Salt {
        /// Free-text buffer description
        buffer: String,
    },
    /// List aptamer table rows whose target matches
    Search {
        /// Aptamer table (CSV, TSV, XLSX, ODS)
        table: PathBuf,
        /// Target name (case and punctuation are ignored)
        target: String,
        /// Print matching rows as JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(Args, Debug)]
struct DesignArgs {
    /// Aptamer sequence, or "-" to read raw or FASTA text from stdin
    #[arg(required_unless_present_any = ["fasta", "database"])]
    sequence: Option<String>,

    /// Read the aptamer from the first record of a FASTA file
    #[arg(long, value_name = "FILE", conflicts_with_all = ["sequence", "database"])]
    fasta: Option<PathBuf>,

    /// Aptamer table to take sequences from
    #[arg(long, value_name = "FILE", requires = "target", conflicts_with = "sequence")]
    database: Option<PathBuf>,

    /// Target to look up in the aptamer table
    #[arg(long, requires = "database")]
    target: Option<String>,

    /// Output domain encoded upstream of the insulation
    #[arg(long, value_enum, default_value_t = OutputArg::O1)]
    output: OutputArg,

    /// Folding temperature in Celsius
    #[arg(long, default_value_t = 37.0)]
    temperature: f64,

    /// Buffer description used for the salt correction
    #[arg(long, conflicts_with = "use_buffer_salt")]
    buffer: Option<String>,

    /// Use each table row's buffer column for the salt correction
    #[arg(long, requires = "database")]
    use_buffer_salt: bool,

    /// RNAfold executable
    #[arg(long, value_name = "PATH")]
    rnafold: Option<PathBuf>,

    /// Print a JSON report instead of FASTA
    #[arg(long)]
    json: bool,
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    let reporter = Reporter::new(cli.quiet, cli.verbose);

    match cli.command {
        Command::Design(args) => commands::design::run(&args, &reporter),
        Command::Transcript { dna, reverse } => {
            commands::sequence::transcript(&dna, reverse);
            Ok(ExitCode::SUCCESS)
        }
        Command::Salt { buffer } => {
            commands::sequence::salt(&buffer);
            Ok(ExitCode::SUCCESS)
        }
        Command::Search {
            table,
            target,
            json,
        } => commands::database::search(&table, &target, json, &reporter),
    }
}
