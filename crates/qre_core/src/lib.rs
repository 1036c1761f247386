//! Core resource estimation engine for quantum error correction codes.
//!
//! This crate turns empirical scaling laws from the QEC literature into
//! answers about hardware requirements: how small the logical error rate gets
//! for a given qubit budget, how many physical qubits are needed to reach a
//! target logical error rate, and how that requirement grows as the physical
//! error rate approaches each code's threshold. Every operation is pure and
//! deterministic; the only shared state is the immutable code registry.

use thiserror::Error;

/// Immutable table of supported error correction codes.
///
/// Each entry carries its noise threshold and the scaling law that relates
/// physical qubits, logical qubits, code distance and logical error rate.
/// Dispatch happens by matching on the closed set of formula variants.
pub mod code;

/// Cross-code comparison at a shared operating point.
///
/// Runs the inverse solver for every registered code so their qubit
/// requirements can be tabulated side by side.
pub mod compare;

/// Forward evaluation of a code's scaling law.
///
/// Given a physical error rate and qubit counts, computes code distance,
/// ancilla overhead and the per-cycle logical error rate.
pub mod evaluator;

/// Bijection between a linear 0..100 slider position and a logarithmic
/// numeric domain.
pub mod log_scale;

/// Input tuple shared by forward and inverse queries.
pub mod params;

/// Curve sampling of required physical qubits versus physical error rate.
///
/// Sweeps log-spaced error rates up to just below a code's threshold and
/// solves for the qubit count at each sample, truncating once the
/// requirement becomes infeasible.
pub mod sampler;

/// Inverse solver finding the qubit count that meets a target logical
/// error rate.
///
/// Uses a bounded bisection over the monotone forward formula and reports
/// the best candidate seen across all iterations.
pub mod solver;

pub use code::{CodeKind, CodeModel, Family, Formula, Registry, STANDARD_CODES, lookup_code};
pub use compare::{Comparison, cheapest, compare_codes, compare_codes_with};
pub use evaluator::{Estimate, evaluate};
pub use log_scale::{LogScale, from_log_scale, to_log_scale};
pub use params::Parameters;
pub use sampler::{
    CurvePoint, CurveSampler, SampledCurve, SamplerConfig, sample_curve, sample_curve_with,
};
pub use solver::{SolverConfig, solve_for_n, solve_for_n_with};

/// Error types returned by the estimation engine.
///
/// Failures are reported as distinguished values so callers never receive a
/// silently propagated NaN. Curve truncation is not an error; it is recorded
/// on [`SampledCurve`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum QreError {
    /// No code is registered under the requested identifier.
    #[error("unknown code id `{0}`")]
    NotFound(String),

    /// An input was non-positive, non-finite, NaN, or violated a
    /// precondition of the formula.
    ///
    /// `name` identifies the offending input and `value` carries what was
    /// supplied, so the caller can point the user at the right field.
    #[error("invalid parameter {name} = {value}: {reason}")]
    InvalidParameter {
        name: &'static str,
        value: f64,
        reason: &'static str,
    },

    /// The inverse solver could not produce a qubit count.
    ///
    /// Either the physical error rate is at or above the threshold, where no
    /// finite code suppresses errors, or the search ran past the sanity
    /// ceiling without converging.
    #[error("no solution: {0}")]
    NoSolution(NoSolutionReason),

    /// The logical error rate is below the normal `f64` range.
    ///
    /// `log10_epsilon_l` is still exact, so results past this point keep
    /// their ordering.
    #[error("logical error rate of {code} is 10^{log10_epsilon_l:.1}, below f64 range")]
    Underflow {
        code: &'static str,
        log10_epsilon_l: f64,
    },
}

impl QreError {
    pub(crate) fn invalid(name: &'static str, value: f64, reason: &'static str) -> Self {
        QreError::InvalidParameter {
            name,
            value,
            reason,
        }
    }
}

/// Why the inverse solver gave up.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum NoSolutionReason {
    /// The physical error rate is at or beyond the code's threshold.
    #[error("p = {p} is at or above the threshold {threshold}")]
    AtOrAboveThreshold { p: f64, threshold: f64 },

    /// The search lower bound passed the sanity ceiling.
    #[error("required qubit count exceeds the sanity ceiling of {ceiling:e}")]
    ExceedsCeiling { ceiling: f64 },

    /// Every candidate's logical error rate underflowed, so none could be
    /// reported.
    #[error("no candidate produced a finite logical error rate")]
    NoFiniteCandidate,
}

/// Rejects NaN, infinite and non-positive rates.
pub(crate) fn check_rate(name: &'static str, value: f64) -> Result<(), QreError> {
    if !value.is_finite() {
        return Err(QreError::invalid(name, value, "must be finite"));
    }
    if value <= 0.0 {
        return Err(QreError::invalid(name, value, "must be positive"));
    }
    Ok(())
}

/// Rejects zero qubit counts.
pub(crate) fn check_count(name: &'static str, value: u64) -> Result<(), QreError> {
    if value == 0 {
        return Err(QreError::invalid(name, 0.0, "must be at least 1"));
    }
    Ok(())
}
