//! Parsers for ViennaRNA `RNAfold -p` stdout and its PostScript dot plot.

use dart_core::fold::BasePairProbabilities;
use nom::{
    bytes::complete::{tag, take_while1},
    character::complete::{char, digit1, space0, space1},
    combinator::map_res,
    number::complete::double,
    sequence::{delimited, preceded, terminated, tuple},
    IResult,
};

use crate::ParseError;

/// What `RNAfold -p` prints for one sequence.
#[derive(Debug, Clone, PartialEq)]
pub struct RnaFoldOutput {
    pub name: Option<String>,
    pub sequence: String,
    pub structure: String,
    /// MFE in kcal/mol.
    pub mfe: f64,
    /// Free energy of the ensemble, present with `-p`.
    pub ensemble_energy: Option<f64>,
}

fn is_structure_char(c: char) -> bool {
    matches!(c, '.' | '(' | ')' | '{' | '}' | ',' | '|' | '[' | ']')
}

/// `( -3.40)`
fn paren_energy(input: &str) -> IResult<&str, f64> {
    delimited(char('('), preceded(space0, double), preceded(space0, char(')')))(input)
}

/// `[ -3.62]`
fn square_energy(input: &str) -> IResult<&str, f64> {
    delimited(char('['), preceded(space0, double), preceded(space0, char(']')))(input)
}

/// `..((...)). ( -1.20)`
fn mfe_line(input: &str) -> IResult<&str, (&str, f64)> {
    tuple((
        take_while1(|c: char| matches!(c, '.' | '(' | ')')),
        preceded(space1, paren_energy),
    ))(input)
}

/// `..{{...}}. [ -1.50]`
fn ensemble_line(input: &str) -> IResult<&str, f64> {
    preceded(
        terminated(take_while1(is_structure_char), space1),
        square_energy,
    )(input)
}

/// Parse the first record from `RNAfold` stdout.
pub fn parse_output(input: &str) -> Result<RnaFoldOutput, ParseError> {
    let mut lines = input.lines().map(str::trim).filter(|l| !l.is_empty());

    let mut first = lines.next().ok_or(ParseError::UnexpectedEnd)?;
    let name = match first.strip_prefix('>') {
        Some(header) => {
            let name = header.split_whitespace().next().unwrap_or_default().to_string();
            first = lines.next().ok_or(ParseError::UnexpectedEnd)?;
            Some(name)
        }
        None => None,
    };
    let sequence = first.to_uppercase();

    let line = lines.next().ok_or(ParseError::UnexpectedEnd)?;
    let (_, (structure, mfe)) = mfe_line(line)
        .map_err(|e| ParseError::InvalidFormat(format!("MFE line {line:?}: {e}")))?;
    if structure.len() != sequence.len() {
        return Err(ParseError::InvalidFormat(format!(
            "structure length {} does not match sequence length {}",
            structure.len(),
            sequence.len()
        )));
    }

    let ensemble_energy = lines
        .next()
        .and_then(|l| ensemble_line(l).ok())
        .map(|(_, energy)| energy);

    Ok(RnaFoldOutput {
        name,
        sequence,
        structure: structure.to_string(),
        mfe,
        ensemble_energy,
    })
}

fn position(input: &str) -> IResult<&str, usize> {
    map_res(digit1, str::parse::<usize>)(input)
}

/// `12 40 0.9876 ubox`: 1-based positions and sqrt of the pair probability.
fn ubox_line(input: &str) -> IResult<&str, (usize, usize, f64)> {
    terminated(
        tuple((
            preceded(space0, position),
            preceded(space1, position),
            preceded(space1, double),
        )),
        tuple((space1, tag("ubox"), space0)),
    )(input)
}

/// Read the pair probabilities (`ubox` entries) of a dot plot into a
/// 0-based matrix for a sequence of `len` nucleotides.
pub fn parse_dot_plot(input: &str, len: usize) -> Result<BasePairProbabilities, ParseError> {
    let mut probabilities = BasePairProbabilities::new(len);

    for line in input.lines() {
        let Ok((rest, (i, j, sqrt_p))) = ubox_line(line) else {
            continue;
        };
        if !rest.trim().is_empty() {
            continue;
        }
        if i == 0 || j == 0 || i > len || j > len {
            return Err(ParseError::InvalidLocation(format!(
                "pair ({i}, {j}) outside a {len} nt sequence"
            )));
        }
        probabilities.set(i - 1, j - 1, sqrt_p * sqrt_p);
    }

    Ok(probabilities)
}

#[cfg(test)]
mod tests {
    use super::*;

    const OUTPUT: &str = "GGGAAAUCCC\n\
        (((....))) ( -1.90)\n\
        (((....))) [ -2.13]\n\
        (((....))) { -1.90 d=0.82}\n \
        frequency of mfe structure in ensemble 0.686; ensemble diversity 1.03\n";

    #[test]
    fn test_parse_output() {
        let out = parse_output(OUTPUT).unwrap();
        assert_eq!(out.name, None);
        assert_eq!(out.sequence, "GGGAAAUCCC");
        assert_eq!(out.structure, "(((....)))");
        assert!((out.mfe + 1.9).abs() < 1e-9);
        assert_eq!(out.ensemble_energy, Some(-2.13));
    }

    #[test]
    fn test_parse_output_with_header() {
        let input = ">dart_1\nGGGAAAUCCC\n(((....)))(-12.50)\n";
        assert!(parse_output(input).is_err(), "energy needs a separating space");

        let input = ">dart_1 extra\nGGGAAAUCCC\n(((....))) (-12.50)\n";
        let out = parse_output(input).unwrap();
        assert_eq!(out.name.as_deref(), Some("dart_1"));
        assert!((out.mfe + 12.5).abs() < 1e-9);
        assert_eq!(out.ensemble_energy, None);
    }

    #[test]
    fn test_parse_output_rejects_length_mismatch() {
        let input = "GGGAAAUCCC\n(((...))) ( -1.90)\n";
        assert!(matches!(
            parse_output(input),
            Err(ParseError::InvalidFormat(_))
        ));
    }

    #[test]
    fn test_parse_output_truncated() {
        assert!(matches!(parse_output(""), Err(ParseError::UnexpectedEnd)));
        assert!(matches!(
            parse_output("GGGAAAUCCC\n"),
            Err(ParseError::UnexpectedEnd)
        ));
    }

    #[test]
    fn test_parse_dot_plot() {
        let dot_plot = "%!PS-Adobe-3.0 EPSF-3.0\n\
            /sequence { (\\\n\
            GGGAAAUCCC\\\n\
            ) } def\n\
            %start of base pair probability data\n\
            1 10 0.9899495 ubox\n\
            2 9 0.5 ubox\n\
            3 8 0.99 lbox\n\
            showpage\n";
        let bpp = parse_dot_plot(dot_plot, 10).unwrap();
        assert!((bpp.get(0, 9) - 0.98).abs() < 1e-6);
        assert!((bpp.get(9, 0) - 0.98).abs() < 1e-6);
        assert!((bpp.get(1, 8) - 0.25).abs() < 1e-9);
        // lbox entries are the MFE structure, not probabilities
        assert_eq!(bpp.get(2, 7), 0.0);
    }

    #[test]
    fn test_dot_plot_out_of_range() {
        assert!(matches!(
            parse_dot_plot("1 12 0.9 ubox\n", 10),
            Err(ParseError::InvalidLocation(_))
        ));
    }
}
