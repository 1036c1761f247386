//! Query parameters shared by the forward and inverse paths.

use crate::QreError;
use crate::code::CodeModel;
use crate::evaluator::{Estimate, evaluate};
use crate::solver::solve_for_n;
use serde::{Deserialize, Serialize};

/// Operating point of a query.
///
/// When `target_epsilon_l` is set, `n` is ignored and solved for instead.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Parameters {
    /// Physical error rate.
    pub p: f64,

    /// Physical qubit budget for forward evaluation.
    pub n: u64,

    /// Logical qubits.
    pub k: u64,

    /// Target logical error rate for inverse solving.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_epsilon_l: Option<f64>,
}

impl Parameters {
    pub fn forward(p: f64, n: u64, k: u64) -> Self {
        Self {
            p,
            n,
            k,
            target_epsilon_l: None,
        }
    }

    pub fn inverse(p: f64, k: u64, target_epsilon_l: f64) -> Self {
        Self {
            p,
            n: 0,
            k,
            target_epsilon_l: Some(target_epsilon_l),
        }
    }

    /// Evaluates or solves, depending on whether a target is set.
    pub fn estimate(&self, code: &CodeModel) -> Result<Estimate, QreError> {
        match self.target_epsilon_l {
            Some(target) => solve_for_n(code, self.p, self.k, target),
            None => evaluate(code, self.p, self.n, self.k),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::code::lookup_code;

    #[test]
    fn dispatches_on_target_presence() {
        let surface = lookup_code("surface").unwrap();

        let forward = Parameters::forward(0.001, 1000, 1).estimate(surface).unwrap();
        assert_eq!(forward.n, 1000);
        assert_eq!(forward.d, Some(31));

        let inverse = Parameters::inverse(0.001, 1, 1e-6).estimate(surface).unwrap();
        assert_eq!(inverse, solve_for_n(surface, 0.001, 1, 1e-6).unwrap());
    }
}
