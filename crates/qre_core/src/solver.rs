//! Inverse solver: smallest qubit count meeting a target logical error rate.
//!
//! The forward formulas have no closed-form inverse (distance sits inside a
//! floor and a ceiling, or the exponent is itself a power of `n`), so the
//! solver bisects over `n`. Below threshold the logical error rate is
//! non-increasing in `n`, which makes the bracket update sound.
//!
//! The returned estimate is the candidate whose logical error rate was
//! closest to the target in log space across all iterations, not the final
//! bisection bound. It is an approximation with no verified tolerance.

use crate::code::CodeModel;
use crate::evaluator::{Estimate, evaluate};
use crate::{NoSolutionReason, QreError, check_count, check_rate};
use qre_common::tunables;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

/// Search bracket and budget for the bisection.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SolverConfig {
    /// Initial lower bound on the physical qubit count.
    pub n_min: f64,

    /// Initial upper bound on the physical qubit count.
    pub n_max: f64,

    /// Fixed number of bisection steps.
    pub iterations: u32,

    /// Lower-bound value past which the search gives up as infeasible.
    pub sanity_ceiling: f64,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self::point_query()
    }
}

impl SolverConfig {
    /// Tunables for single-point queries and comparison tables.
    pub const fn point_query() -> Self {
        Self {
            n_min: tunables::N_MIN,
            n_max: tunables::N_MAX_POINT,
            iterations: tunables::POINT_ITERATIONS,
            sanity_ceiling: tunables::SANITY_CEILING,
        }
    }

    /// Tunables for curve sampling, with a wider bracket and more steps to
    /// follow the steep growth near threshold.
    pub const fn curve() -> Self {
        Self {
            n_min: tunables::N_MIN,
            n_max: tunables::N_MAX_CURVE,
            iterations: tunables::CURVE_ITERATIONS,
            sanity_ceiling: tunables::SANITY_CEILING,
        }
    }

    pub fn validate(&self) -> Result<(), QreError> {
        check_rate("n_min", self.n_min)?;
        check_rate("n_max", self.n_max)?;
        check_rate("sanity_ceiling", self.sanity_ceiling)?;
        if self.n_min > self.n_max {
            return Err(QreError::invalid("n_max", self.n_max, "must be at least n_min"));
        }
        if self.iterations == 0 {
            return Err(QreError::invalid("iterations", 0.0, "must be at least 1"));
        }
        Ok(())
    }
}

/// Solves for `n` using point-query tunables.
pub fn solve_for_n(
    code: &CodeModel,
    p: f64,
    k: u64,
    target_epsilon_l: f64,
) -> Result<Estimate, QreError> {
    solve_for_n_with(code, p, k, target_epsilon_l, &SolverConfig::point_query())
}

/// Solves for the physical qubit count at which `code` reaches
/// `target_epsilon_l`.
///
/// # Arguments
///
/// * `code` - Code whose forward formula is inverted
/// * `p` - Physical error rate; must lie strictly below the threshold
/// * `k` - Logical qubit count
/// * `target_epsilon_l` - Target logical error rate per cycle
/// * `config` - Bracket, iteration budget and sanity ceiling
///
/// # Returns
///
/// The best estimate seen, `QreError::NoSolution` when `p` is at or above
/// threshold, the lower bound runs past the sanity ceiling or every
/// candidate underflowed, or
/// `QreError::InvalidParameter` for out-of-domain inputs.
pub fn solve_for_n_with(
    code: &CodeModel,
    p: f64,
    k: u64,
    target_epsilon_l: f64,
    config: &SolverConfig,
) -> Result<Estimate, QreError> {
    config.validate()?;
    check_rate("p", p)?;
    check_count("k", k)?;
    check_rate("target_epsilon_l", target_epsilon_l)?;

    if p >= code.threshold {
        return Err(QreError::NoSolution(NoSolutionReason::AtOrAboveThreshold {
            p,
            threshold: code.threshold,
        }));
    }

    let target_log = target_epsilon_l.log10();
    let mut n_lo = config.n_min.max(code.min_qubits(k) as f64);
    let mut n_hi = config.n_max.max(n_lo);

    let mut best: Option<Estimate> = None;
    let mut best_distance = f64::INFINITY;

    for iteration in 0..config.iterations {
        let n = ((n_lo + n_hi) / 2.0).floor() as u64;
        // Underflowed candidates still steer the bracket but are never reported.
        let (log10_epsilon_l, candidate) = match evaluate(code, p, n, k) {
            Ok(estimate) => (estimate.log10_epsilon_l, Some(estimate)),
            Err(QreError::Underflow {
                log10_epsilon_l, ..
            }) => (log10_epsilon_l, None),
            Err(err) => return Err(err),
        };
        let distance = (log10_epsilon_l - target_log).abs();

        trace!(
            code = code.id(),
            iteration,
            n,
            log10_epsilon_l,
            distance,
            "bisection step"
        );

        if candidate.is_some() && distance < best_distance {
            best_distance = distance;
            best = candidate;
        }

        if log10_epsilon_l > target_log {
            n_lo = n as f64;
        } else {
            n_hi = n as f64;
        }

        if n_lo > config.sanity_ceiling {
            debug!(
                code = code.id(),
                p,
                n_lo,
                ceiling = config.sanity_ceiling,
                "search passed sanity ceiling"
            );
            return Err(QreError::NoSolution(NoSolutionReason::ExceedsCeiling {
                ceiling: config.sanity_ceiling,
            }));
        }
    }

    let best = best.ok_or(QreError::NoSolution(NoSolutionReason::NoFiniteCandidate))?;
    debug!(
        code = code.id(),
        p,
        n = best.n,
        epsilon_l = best.epsilon_l,
        log_distance = best_distance,
        "solved for n"
    );
    Ok(best)
}
