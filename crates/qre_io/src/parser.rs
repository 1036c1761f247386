//! Parser for quantities typed by users.
//!
//! Rates (physical and logical error rates) accept:
//!
//! * plain or scientific decimals: `0.001`, `1e-6`, `2.5E-4`
//! * powers of ten: `10^-6`, `10^(-6)`
//! * percentages: `0.1%`
//! * quop regime labels for logical targets: `mega`, `GigaQuop`
//!
//! Counts (qubits) accept integers, scientific notation and the SI suffixes
//! `k`, `M`, `G` and `T`: `1000`, `1e6`, `2.5M`.

use nom::IResult;
use nom::branch::alt;
use nom::bytes::complete::tag;
use nom::character::complete::{alpha1, char, one_of, space0};
use nom::combinator::{all_consuming, map, map_res, opt};
use nom::number::complete::double;
use nom::sequence::{delimited, pair, preceded, terminated};
use qre_common::quop::QuopRegime;
use thiserror::Error;

/// Failure to interpret a quantity string.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParseError {
    #[error("cannot parse `{input}` as a quantity")]
    Syntax { input: String },

    #[error("`{input}` evaluates to {value}, expected a probability in (0, 1)")]
    NotAProbability { input: String, value: f64 },

    #[error("`{input}` evaluates to {value}, expected a whole number of at least 1")]
    NotACount { input: String, value: f64 },
}

fn power_of_ten(input: &str) -> IResult<&str, f64> {
    map(
        preceded(
            tag("10^"),
            alt((delimited(char('('), double, char(')')), double)),
        ),
        |exponent| 10f64.powf(exponent),
    )(input)
}

fn percent(input: &str) -> IResult<&str, f64> {
    map(terminated(double, preceded(space0, char('%'))), |value| {
        value / 100.0
    })(input)
}

fn quop_label(input: &str) -> IResult<&str, f64> {
    map(
        map_res(alpha1, |label: &str| label.parse::<QuopRegime>()),
        QuopRegime::target_epsilon_l,
    )(input)
}

fn rate(input: &str) -> IResult<&str, f64> {
    delimited(space0, alt((power_of_ten, percent, double, quop_label)), space0)(input)
}

fn si_suffix(c: char) -> f64 {
    match c {
        'k' => 1e3,
        'M' => 1e6,
        'G' => 1e9,
        'T' => 1e12,
        _ => 1.0,
    }
}

fn count(input: &str) -> IResult<&str, f64> {
    delimited(
        space0,
        map(pair(double, opt(one_of("kMGT"))), |(value, suffix)| {
            value * suffix.map(si_suffix).unwrap_or(1.0)
        }),
        space0,
    )(input)
}

/// Parses any rate-like quantity without range checks.
pub fn parse_quantity(input: &str) -> Result<f64, ParseError> {
    match all_consuming(rate)(input) {
        Ok((_, value)) => Ok(value),
        Err(_) => Err(ParseError::Syntax {
            input: input.to_string(),
        }),
    }
}

/// Parses a probability strictly inside `(0, 1)`.
pub fn parse_probability(input: &str) -> Result<f64, ParseError> {
    let value = parse_quantity(input)?;
    if value > 0.0 && value < 1.0 {
        Ok(value)
    } else {
        Err(ParseError::NotAProbability {
            input: input.to_string(),
            value,
        })
    }
}

/// Parses a qubit count of at least one.
pub fn parse_count(input: &str) -> Result<u64, ParseError> {
    let value = match all_consuming(count)(input) {
        Ok((_, value)) => value,
        Err(_) => {
            return Err(ParseError::Syntax {
                input: input.to_string(),
            });
        }
    };

    if value.is_finite() && value >= 1.0 && value.fract() == 0.0 && value <= u64::MAX as f64 {
        Ok(value as u64)
    } else {
        Err(ParseError::NotACount {
            input: input.to_string(),
            value,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() <= b.abs() * 1e-12
    }

    #[test]
    fn decimal_and_scientific_rates() {
        assert!(close(parse_probability("0.001").unwrap(), 0.001));
        assert!(close(parse_probability("1e-6").unwrap(), 1e-6));
        assert!(close(parse_probability(" 2.5E-4 ").unwrap(), 2.5e-4));
    }

    #[test]
    fn power_of_ten_rates() {
        assert!(close(parse_probability("10^-6").unwrap(), 1e-6));
        assert!(close(parse_probability("10^(-9)").unwrap(), 1e-9));
        assert!(close(parse_probability("10^-2.5").unwrap(), 10f64.powf(-2.5)));
    }

    #[test]
    fn percent_rates() {
        assert!(close(parse_probability("0.1%").unwrap(), 0.001));
        assert!(close(parse_probability("1 %").unwrap(), 0.01));
    }

    #[test]
    fn quop_labels_map_to_targets() {
        assert_eq!(parse_probability("mega"), Ok(1e-6));
        assert_eq!(parse_probability("TeraQuop"), Ok(1e-12));
        assert!(matches!(
            parse_probability("zetta"),
            Err(ParseError::Syntax { .. })
        ));
    }

    #[test]
    fn rejects_values_outside_unit_interval() {
        assert!(matches!(
            parse_probability("1.5"),
            Err(ParseError::NotAProbability { .. })
        ));
        assert!(matches!(
            parse_probability("0"),
            Err(ParseError::NotAProbability { .. })
        ));
        assert!(matches!(
            parse_probability("-1e-3"),
            Err(ParseError::NotAProbability { .. })
        ));
        assert!(matches!(
            parse_probability("100%"),
            Err(ParseError::NotAProbability { .. })
        ));
    }

    #[test]
    fn rejects_trailing_garbage() {
        assert!(parse_quantity("1e-3x").is_err());
        assert!(parse_quantity("").is_err());
        assert!(parse_quantity("10^").is_err());
    }

    #[test]
    fn counts_with_suffixes() {
        assert_eq!(parse_count("1000"), Ok(1000));
        assert_eq!(parse_count("1e6"), Ok(1_000_000));
        assert_eq!(parse_count("2.5M"), Ok(2_500_000));
        assert_eq!(parse_count("10k"), Ok(10_000));
        assert_eq!(parse_count(" 3G "), Ok(3_000_000_000));
    }

    #[test]
    fn rejects_fractional_and_empty_counts() {
        assert!(matches!(
            parse_count("2.5"),
            Err(ParseError::NotACount { .. })
        ));
        assert!(matches!(parse_count("0"), Err(ParseError::NotACount { .. })));
        assert!(matches!(parse_count("many"), Err(ParseError::Syntax { .. })));
    }
}
