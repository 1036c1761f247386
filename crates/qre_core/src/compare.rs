//! Side-by-side resource requirements for every registered code.

use crate::QreError;
use crate::code::{CodeModel, Registry};
use crate::evaluator::Estimate;
use crate::solver::{SolverConfig, solve_for_n_with};

/// Outcome of the point solver for one code.
#[derive(Debug, Clone, PartialEq)]
pub struct Comparison {
    pub code: &'static CodeModel,
    pub outcome: Result<Estimate, QreError>,
}

impl Comparison {
    /// Physical qubits including ancillas, if the solve succeeded.
    pub fn total_qubits(&self) -> Option<f64> {
        self.outcome.as_ref().ok().map(Estimate::total_qubits)
    }
}

/// Solves every code in `registry` at the same operating point.
///
/// Codes whose threshold lies at or below `p` report `NoSolution` in their
/// row instead of aborting the whole table. Results follow registry order.
pub fn compare_codes(
    registry: &Registry,
    p: f64,
    k: u64,
    target_epsilon_l: f64,
) -> Vec<Comparison> {
    compare_codes_with(registry, p, k, target_epsilon_l, &SolverConfig::point_query())
}

pub fn compare_codes_with(
    registry: &Registry,
    p: f64,
    k: u64,
    target_epsilon_l: f64,
    config: &SolverConfig,
) -> Vec<Comparison> {
    registry
        .iter()
        .map(|code| Comparison {
            code,
            outcome: solve_for_n_with(code, p, k, target_epsilon_l, config),
        })
        .collect()
}

/// Index of the row needing the fewest physical qubits including ancillas.
pub fn cheapest(rows: &[Comparison]) -> Option<usize> {
    rows.iter()
        .enumerate()
        .filter_map(|(i, row)| row.total_qubits().map(|total| (i, total)))
        .min_by(|a, b| a.1.total_cmp(&b.1))
        .map(|(i, _)| i)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::NoSolutionReason;

    #[test]
    fn one_row_per_code_in_registry_order() {
        let registry = Registry::standard();
        let rows = compare_codes(&registry, 0.001, 1, 1e-6);
        let ids: Vec<_> = rows.iter().map(|row| row.code.id()).collect();
        assert_eq!(ids, registry.ids().collect::<Vec<_>>());
        assert!(rows.iter().all(|row| row.outcome.is_ok()));
    }

    #[test]
    fn codes_past_threshold_report_no_solution() {
        // Above the color code threshold, below every other one.
        let rows = compare_codes(&Registry::standard(), 0.004, 1, 1e-6);
        for row in &rows {
            if row.code.id() == "color" {
                assert!(matches!(
                    row.outcome,
                    Err(QreError::NoSolution(NoSolutionReason::AtOrAboveThreshold { .. }))
                ));
            } else {
                assert!(row.outcome.is_ok(), "{}", row.code.id());
            }
        }
    }

    #[test]
    fn cheapest_skips_failed_rows() {
        let rows = compare_codes(&Registry::standard(), 0.004, 1, 1e-6);
        let best = cheapest(&rows).unwrap();
        assert_ne!(rows[best].code.id(), "color");
        assert!(rows[best].outcome.is_ok());
    }
}
