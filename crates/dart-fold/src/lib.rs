//! ViennaRNA `RNAfold` as a [`FoldEngine`].
//!
//! Each fold runs `RNAfold -p` in a fresh scratch directory so the dot plot
//! it writes can be read back without clashing with concurrent runs.

use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use dart_core::fold::{FoldConditions, FoldEngine, FoldResult};
use dart_formats::{rnafold, ParseError};
use thiserror::Error;
use uuid::Uuid;

/// Environment variable overriding the `RNAfold` executable.
pub const RNAFOLD_ENV: &str = "DART_RNAFOLD";

#[derive(Debug, Error)]
pub enum FoldError {
    #[error("could not run {binary}: {source}")]
    Spawn {
        binary: String,
        #[source]
        source: std::io::Error,
    },
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("RNAfold exited with {status}: {stderr}")]
    Exit { status: String, stderr: String },
    #[error("could not read RNAfold output: {0}")]
    Parse(#[from] ParseError),
    #[error("RNAfold folded {got} instead of {expected}")]
    SequenceMismatch { expected: String, got: String },
}

/// Subprocess adapter around ViennaRNA's `RNAfold`.
#[derive(Debug, Clone)]
pub struct RnaFold {
    binary: PathBuf,
}

impl Default for RnaFold {
    fn default() -> Self {
        Self::new()
    }
}

impl RnaFold {
    /// `RNAfold` from `$DART_RNAFOLD`, or from `PATH`.
    pub fn new() -> Self {
        let binary = std::env::var_os(RNAFOLD_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("RNAfold"));
        Self { binary }
    }

    pub fn with_binary(binary: impl Into<PathBuf>) -> Self {
        Self {
            binary: binary.into(),
        }
    }

    pub fn binary(&self) -> &Path {
        &self.binary
    }

    fn args(conditions: &FoldConditions) -> Vec<String> {
        let mut args = vec![
            "-p".to_string(),
            "--noPS".to_string(),
            format!("--temp={}", conditions.temperature_celsius),
        ];
        if let Some(salt) = conditions.salt_molar {
            args.push(format!("--salt={salt}"));
        }
        args
    }

    fn run(&self, rna: &str, conditions: &FoldConditions) -> Result<FoldResult, FoldError> {
        let workdir = tempfile::tempdir()?;
        let id = format!("dart_{}", Uuid::new_v4().simple());

        let mut child = Command::new(&self.binary)
            .args(Self::args(conditions))
            .current_dir(workdir.path())
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|source| FoldError::Spawn {
                binary: self.binary.display().to_string(),
                source,
            })?;

        {
            let mut stdin = child.stdin.take().ok_or_else(|| {
                std::io::Error::new(std::io::ErrorKind::BrokenPipe, "RNAfold stdin unavailable")
            })?;
            writeln!(stdin, ">{id}\n{rna}")?;
        }

        let output = child.wait_with_output()?;
        if !output.status.success() {
            return Err(FoldError::Exit {
                status: output.status.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        let mfe = rnafold::parse_output(&stdout)?;
        // RNAfold reports T as U
        if mfe.sequence.replace('T', "U") != rna.to_uppercase().replace('T', "U") {
            return Err(FoldError::SequenceMismatch {
                expected: rna.to_string(),
                got: mfe.sequence,
            });
        }

        let dot_plot = std::fs::read_to_string(workdir.path().join(format!("{id}_dp.ps")))?;
        let probabilities = rnafold::parse_dot_plot(&dot_plot, rna.len())?;

        Ok(FoldResult {
            structure: mfe.structure,
            energy: mfe.mfe,
            probabilities,
        })
    }
}

impl FoldEngine for RnaFold {
    type Error = FoldError;

    fn fold(&self, rna: &str, conditions: &FoldConditions) -> Result<FoldResult, FoldError> {
        self.run(rna, conditions)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_args_default_conditions() {
        assert_eq!(
            RnaFold::args(&FoldConditions::default()),
            vec!["-p", "--noPS", "--temp=37"]
        );
    }

    #[test]
    fn test_args_with_salt() {
        let conditions = FoldConditions {
            temperature_celsius: 25.5,
            salt_molar: Some(0.15),
        };
        assert_eq!(
            RnaFold::args(&conditions),
            vec!["-p", "--noPS", "--temp=25.5", "--salt=0.15"]
        );
    }

    #[test]
    fn test_missing_binary() {
        let engine = RnaFold::with_binary("/nonexistent/RNAfold");
        let err = engine
            .fold("GGGAAAUCCC", &FoldConditions::default())
            .unwrap_err();
        assert!(matches!(err, FoldError::Spawn { .. }), "{err}");
    }
}
