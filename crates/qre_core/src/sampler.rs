//! Curve sampling of required physical qubits versus physical error rate.
//!
//! A curve is a lazy, finite sequence of [`CurvePoint`]s at log-spaced error
//! rates from a fixed floor up to a margin below the code's threshold. Each
//! point comes from the inverse solver. Once a point would need more qubits
//! than the sanity ceiling, sampling stops: every higher error rate would
//! need even more, so the trace is truncated instead of padded.

use crate::code::CodeModel;
use crate::log_scale::{FULL_SCALE, LogScale};
use crate::solver::{SolverConfig, solve_for_n_with};
use crate::{QreError, check_count, check_rate};
use qre_common::tunables;
use serde::{Deserialize, Serialize};
use std::iter::FusedIterator;
use tracing::debug;

/// Sampling grid and per-point solver tunables.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SamplerConfig {
    /// Number of error rates sampled when nothing truncates.
    pub samples: usize,

    /// Lowest error rate on the grid.
    pub p_floor: f64,

    /// Fraction of the threshold at which the grid ends.
    pub threshold_margin: f64,

    /// Bisection tunables for each point.
    pub solver: SolverConfig,
}

impl Default for SamplerConfig {
    fn default() -> Self {
        Self::standard()
    }
}

impl SamplerConfig {
    pub const fn standard() -> Self {
        Self {
            samples: tunables::CURVE_SAMPLES,
            p_floor: tunables::CURVE_P_FLOOR,
            threshold_margin: tunables::THRESHOLD_MARGIN,
            solver: SolverConfig::curve(),
        }
    }

    pub fn validate(&self) -> Result<(), QreError> {
        if self.samples == 0 {
            return Err(QreError::invalid("samples", 0.0, "must be at least 1"));
        }
        check_rate("p_floor", self.p_floor)?;
        check_rate("threshold_margin", self.threshold_margin)?;
        if self.threshold_margin > 1.0 {
            return Err(QreError::invalid(
                "threshold_margin",
                self.threshold_margin,
                "must not exceed 1",
            ));
        }
        self.solver.validate()
    }
}

/// One sample of a required-qubits curve.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CurvePoint {
    /// Physical error rate.
    pub p: f64,

    /// Required physical qubits.
    pub n: u64,

    /// Logical qubits: the requested count for distance-based codes, the
    /// count implied by the encoding rate for LDPC codes.
    pub k: f64,
}

/// A fully drained curve.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SampledCurve {
    pub code: &'static str,
    pub target_epsilon_l: f64,
    pub points: Vec<CurvePoint>,

    /// True when sampling stopped before the grid was exhausted because the
    /// required qubit count became infeasible.
    pub truncated: bool,
}

/// Lazy iterator over the points of a curve.
///
/// Cloning an unstarted sampler, or calling [`sample_curve`] again with the
/// same inputs, yields the identical sequence.
#[derive(Debug, Clone)]
pub struct CurveSampler<'a> {
    code: &'a CodeModel,
    target_epsilon_l: f64,
    k: u64,
    config: SamplerConfig,
    grid: LogScale,
    index: usize,
    truncated: bool,
    finished: bool,
}

/// Samples a curve with the standard grid and curve solver tunables.
pub fn sample_curve(
    code: &CodeModel,
    target_epsilon_l: f64,
    k: u64,
) -> Result<CurveSampler<'_>, QreError> {
    sample_curve_with(code, target_epsilon_l, k, &SamplerConfig::standard())
}

/// Samples a curve with explicit tunables.
///
/// Fails up front with `QreError::InvalidParameter` if the target, `k` or
/// the configuration is out of domain, or if the grid floor is not below
/// `threshold_margin * threshold`.
pub fn sample_curve_with<'a>(
    code: &'a CodeModel,
    target_epsilon_l: f64,
    k: u64,
    config: &SamplerConfig,
) -> Result<CurveSampler<'a>, QreError> {
    config.validate()?;
    check_rate("target_epsilon_l", target_epsilon_l)?;
    check_count("k", k)?;
    let grid = LogScale::new(config.p_floor, config.threshold_margin * code.threshold)?;

    Ok(CurveSampler {
        code,
        target_epsilon_l,
        k,
        config: *config,
        grid,
        index: 0,
        truncated: false,
        finished: false,
    })
}

impl CurveSampler<'_> {
    /// Whether sampling stopped early on an infeasible point.
    pub fn is_truncated(&self) -> bool {
        self.truncated
    }

    /// Error rate of grid sample `index`.
    fn grid_p(&self, index: usize) -> f64 {
        let position = if self.config.samples > 1 {
            FULL_SCALE * index as f64 / (self.config.samples - 1) as f64
        } else {
            0.0
        };
        self.grid.from_position(position)
    }

    fn truncate(&mut self) {
        self.truncated = true;
        self.finished = true;
    }

    /// Drains the remaining points into a [`SampledCurve`].
    pub fn into_curve(mut self) -> SampledCurve {
        let points: Vec<CurvePoint> = self.by_ref().collect();
        SampledCurve {
            code: self.code.id(),
            target_epsilon_l: self.target_epsilon_l,
            points,
            truncated: self.truncated,
        }
    }
}

impl Iterator for CurveSampler<'_> {
    type Item = CurvePoint;

    fn next(&mut self) -> Option<CurvePoint> {
        if self.finished || self.index >= self.config.samples {
            return None;
        }

        let p = self.grid_p(self.index);
        self.index += 1;

        if p >= self.code.threshold {
            self.finished = true;
            return None;
        }

        match solve_for_n_with(
            self.code,
            p,
            self.k,
            self.target_epsilon_l,
            &self.config.solver,
        ) {
            Ok(estimate) if estimate.n as f64 <= self.config.solver.sanity_ceiling => {
                let k = self
                    .code
                    .implied_logical_qubits(estimate.n as f64)
                    .unwrap_or(self.k as f64);
                Some(CurvePoint {
                    p,
                    n: estimate.n,
                    k,
                })
            }
            Ok(estimate) => {
                debug!(
                    code = self.code.id(),
                    p,
                    n = estimate.n,
                    sample = self.index - 1,
                    "curve truncated: required qubits above sanity ceiling"
                );
                self.truncate();
                None
            }
            Err(err) => {
                debug!(
                    code = self.code.id(),
                    p,
                    sample = self.index - 1,
                    error = %err,
                    "curve truncated"
                );
                self.truncate();
                None
            }
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        if self.finished {
            (0, Some(0))
        } else {
            (0, Some(self.config.samples - self.index))
        }
    }
}

impl FusedIterator for CurveSampler<'_> {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::code::{Registry, lookup_code};

    #[test]
    fn p_strictly_increases_and_stays_below_threshold() {
        for code in Registry::standard().iter() {
            let points: Vec<_> = sample_curve(code, 1e-6, 1).unwrap().collect();
            assert!(!points.is_empty(), "{}", code.id());
            for pair in points.windows(2) {
                assert!(pair[0].p < pair[1].p);
            }
            assert!(points.iter().all(|pt| pt.p < code.threshold));
        }
    }

    #[test]
    fn grid_starts_at_floor_and_ends_at_margin() {
        let color = lookup_code("color").unwrap();
        let sampler = sample_curve(color, 1e-3, 1).unwrap();
        assert!((sampler.grid_p(0) - 1e-6).abs() < 1e-18);
        let last = sampler.grid_p(tunables::CURVE_SAMPLES - 1);
        assert!((last - 0.99 * 0.0036).abs() < 1e-15);
    }

    #[test]
    fn repeated_sampling_is_identical() {
        let lifted = lookup_code("lifted").unwrap();
        let sampler = sample_curve(lifted, 1e-9, 1).unwrap();
        let first: Vec<_> = sampler.clone().collect();
        let second: Vec<_> = sampler.collect();
        let third: Vec<_> = sample_curve(lifted, 1e-9, 1).unwrap().collect();
        assert_eq!(first, second);
        assert_eq!(first, third);
    }

    #[test]
    fn required_qubits_grow_towards_threshold() {
        let surface = lookup_code("surface").unwrap();
        let points: Vec<_> = sample_curve(surface, 1e-6, 1).unwrap().collect();
        assert!(points.first().unwrap().n < points.last().unwrap().n);
    }

    #[test]
    fn ldpc_points_report_implied_logical_qubits() {
        let hypergraph = lookup_code("hypergraph").unwrap();
        for point in sample_curve(hypergraph, 1e-6, 1).unwrap() {
            assert!((point.k - 0.04 * point.n as f64).abs() < 1e-6);
        }

        let surface = lookup_code("surface").unwrap();
        for point in sample_curve(surface, 1e-6, 3).unwrap() {
            assert_eq!(point.k, 3.0);
        }
    }

    #[test]
    fn tight_ceiling_truncates_curve() {
        let surface = lookup_code("surface").unwrap();
        let config = SamplerConfig {
            solver: SolverConfig {
                sanity_ceiling: 1e4,
                ..SolverConfig::curve()
            },
            ..SamplerConfig::standard()
        };
        let curve = sample_curve_with(surface, 1e-12, 1, &config)
            .unwrap()
            .into_curve();
        assert!(curve.truncated);
        assert!(curve.points.len() < config.samples);
        assert!(curve.points.iter().all(|pt| pt.n as f64 <= 1e4));
    }

    #[test]
    fn truncation_is_visible_while_iterating() {
        let hypergraph = lookup_code("hypergraph").unwrap();
        let mut sampler = sample_curve(hypergraph, 1e-6, 1).unwrap();
        assert!(!sampler.is_truncated());

        let taken = sampler.by_ref().count();
        assert!(sampler.is_truncated());
        assert!(taken < tunables::CURVE_SAMPLES);
        assert_eq!(sampler.next(), None);
    }

    #[test]
    fn untruncated_curve_has_full_sample_count() {
        let yoked = lookup_code("yoked_2d").unwrap();
        let curve = sample_curve(yoked, 1e-3, 1).unwrap().into_curve();
        assert!(!curve.truncated);
        assert_eq!(curve.points.len(), tunables::CURVE_SAMPLES);
    }

    #[test]
    fn rejects_invalid_configuration() {
        let surface = lookup_code("surface").unwrap();
        assert!(sample_curve(surface, 0.0, 1).is_err());
        assert!(sample_curve(surface, 1e-6, 0).is_err());

        let floor_above_threshold = SamplerConfig {
            p_floor: 0.05,
            ..SamplerConfig::standard()
        };
        assert!(sample_curve_with(surface, 1e-6, 1, &floor_above_threshold).is_err());

        let no_samples = SamplerConfig {
            samples: 0,
            ..SamplerConfig::standard()
        };
        assert!(sample_curve_with(surface, 1e-6, 1, &no_samples).is_err());
    }
}
