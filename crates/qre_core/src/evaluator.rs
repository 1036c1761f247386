//! Forward evaluation of code scaling laws.
//!
//! Computes the code distance (for distance-based codes), the ancilla count
//! and the per-cycle logical error rate for a given physical error rate and
//! qubit budget. The evaluator does not clamp the error rate to the code's
//! threshold: at or above threshold the formulas still produce a value, but
//! it no longer describes suppression and can diverge.

use crate::code::{CodeModel, Formula};
use crate::{QreError, check_count, check_rate};
use serde::Serialize;

/// Output record of a forward evaluation or inverse solve.
///
/// `d` and `n_ancilla` are only present for code families with an explicit
/// lattice distance.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Estimate {
    /// Identifier of the code that produced this estimate.
    pub code: &'static str,

    /// Physical error rate the estimate was computed at.
    pub p: f64,

    /// Effective code distance.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub d: Option<u64>,

    /// Physical data qubits.
    pub n: u64,

    /// Logical qubits.
    pub k: u64,

    /// Ancilla qubits used for syndrome extraction.
    ///
    /// Fractional for yoked codes, whose overhead factor is applied to the
    /// integer inner count.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub n_ancilla: Option<f64>,

    /// Logical error probability per code cycle.
    pub epsilon_l: f64,

    /// `log10(epsilon_l)` computed in log space. Stays exact where
    /// `epsilon_l` itself would leave the `f64` range.
    pub log10_epsilon_l: f64,
}

impl Estimate {
    /// Physical qubits including ancillas, when the ancilla count is known.
    pub fn total_qubits(&self) -> f64 {
        self.n as f64 + self.n_ancilla.unwrap_or(0.0)
    }

    /// Whether `p` lies strictly below the threshold of `code`, i.e. whether
    /// `epsilon_l` describes actual error suppression.
    pub fn is_below_threshold(&self, code: &CodeModel) -> bool {
        self.p < code.threshold
    }

    /// Whether the logical error rate is at or below `target`.
    pub fn meets_target(&self, target_epsilon_l: f64) -> bool {
        self.epsilon_l <= target_epsilon_l
    }
}

/// Inner patch distance `floor(sqrt(n / k))`.
pub fn inner_distance(n: u64, k: u64) -> u64 {
    (n as f64 / k as f64).sqrt().floor() as u64
}

/// Ancilla count of `k` unyoked patches of distance `d_in`:
/// `k * ((d_in - 1)^2 + 2 * (d_in - 1))`.
pub fn patch_ancillas(d_in: u64, k: u64) -> u64 {
    let edge = d_in.saturating_sub(1);
    k * (edge * edge + 2 * edge)
}

/// Evaluates the scaling law of `code` at physical error rate `p` with `n`
/// physical and `k` logical qubits.
///
/// # Arguments
///
/// * `code` - Code model whose formula is applied
/// * `p` - Physical error rate, finite and positive
/// * `n` - Physical qubit count, at least 1 (and at least `k` for
///   distance-based codes)
/// * `k` - Logical qubit count, at least 1
///
/// # Returns
///
/// The estimate, or `QreError::InvalidParameter` for out-of-domain inputs.
/// A NaN logical error rate is reported as an error rather than returned, and
/// a rate below the normal `f64` range as `QreError::Underflow` carrying its
/// exact `log10`.
pub fn evaluate(code: &CodeModel, p: f64, n: u64, k: u64) -> Result<Estimate, QreError> {
    check_rate("p", p)?;
    check_count("n", n)?;
    check_count("k", k)?;

    let ratio = p / code.threshold;

    let estimate = match code.formula {
        Formula::Distance {
            prefactor,
            exponent,
            yoke,
        } => {
            if n < k {
                return Err(QreError::invalid(
                    "n",
                    n as f64,
                    "must be at least k for distance-based codes",
                ));
            }

            let d_in = inner_distance(n, k);
            let (d, ancilla_overhead) = match yoke {
                Some(yoke) => (
                    (yoke.multiplier * d_in as f64).floor() as u64,
                    yoke.ancilla_overhead,
                ),
                None => (d_in, 1.0),
            };

            let scale = prefactor * k as f64;
            let exponent = exponent.of(d);
            Estimate {
                code: code.id(),
                p,
                d: Some(d),
                n,
                k,
                n_ancilla: Some(patch_ancillas(d_in, k) as f64 * ancilla_overhead),
                epsilon_l: scale * ratio.powf(exponent),
                log10_epsilon_l: scale.log10() + exponent * ratio.log10(),
            }
        }
        Formula::Algebraic {
            prefactor,
            coefficient,
            power,
            ..
        } => {
            let exponent = coefficient * (n as f64).powf(power);
            Estimate {
                code: code.id(),
                p,
                d: None,
                n,
                k,
                n_ancilla: None,
                epsilon_l: prefactor * ratio.powf(exponent),
                log10_epsilon_l: prefactor.log10() + exponent * ratio.log10(),
            }
        }
    };

    if estimate.epsilon_l.is_nan() {
        return Err(QreError::invalid(
            "epsilon_l",
            estimate.epsilon_l,
            "scaling law produced NaN",
        ));
    }

    // Subnormal and zero rates lose the ordering between qubit budgets.
    if estimate.epsilon_l < f64::MIN_POSITIVE {
        return Err(QreError::Underflow {
            code: estimate.code,
            log10_epsilon_l: estimate.log10_epsilon_l,
        });
    }

    Ok(estimate)
}
