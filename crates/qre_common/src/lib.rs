//! Common definitions and constants shared across the resource estimator.
//!
//! This crate holds the literal values the estimation engine is built on:
//! per-code noise thresholds, the coefficients of the empirical scaling laws,
//! the search and sampling tunables used by the inverse solver, default slider
//! bounds, and the quop regime labels. Nothing here allocates or performs
//! floating-point math, so it stays usable from `no_std` consumers.

#![no_std]

// Noise thresholds for each supported code family.
//
// These literals are the compatibility surface of the estimator: curves,
// tables and stored results all depend on them being reproduced exactly.
pub mod thresholds {
    /// Threshold of the rotated surface code under circuit-level noise.
    pub const SURFACE: f64 = 0.011;

    /// Threshold of the triangular color code.
    ///
    /// Noticeably lower than the surface code because the weight-6 stabilizers
    /// need deeper syndrome extraction circuits.
    pub const COLOR: f64 = 0.0036;

    /// Threshold of the surface code with a one-dimensional yoke.
    ///
    /// Outer parity checks do not move the threshold of the inner patches.
    pub const YOKED_1D: f64 = 0.011;

    /// Threshold of the surface code with a two-dimensional yoke.
    pub const YOKED_2D: f64 = 0.011;

    /// Threshold of the hypergraph product code family.
    pub const HYPERGRAPH: f64 = 0.006;

    /// Threshold of the lifted product code family.
    pub const LIFTED: f64 = 0.0066;
}

/// Coefficients of the empirical scaling laws.
///
/// All logical error rate formulas have the shape
/// `prefactor * (p / p_th) ^ exponent`. Distance-based codes derive the
/// exponent from the code distance; algebraic (LDPC) codes derive it from a
/// power of the physical qubit count.
pub mod formula {
    /// Prefactor of the distance-based power law, multiplied by `k`.
    pub const DISTANCE_PREFACTOR: f64 = 0.03;

    /// Distance multiplier contributed by a one-dimensional yoke.
    ///
    /// Conservative estimate of the roughly 2x distance gain.
    pub const YOKE_1D_MULTIPLIER: f64 = 1.8;

    /// Distance multiplier contributed by a two-dimensional yoke.
    ///
    /// Conservative estimate of the roughly 4x distance gain.
    pub const YOKE_2D_MULTIPLIER: f64 = 3.2;

    /// Ancilla overhead factor for the outer parity connections of a 1D yoke.
    pub const YOKE_1D_ANCILLA_OVERHEAD: f64 = 1.2;

    /// Ancilla overhead factor for the outer parity connections of a 2D yoke.
    pub const YOKE_2D_ANCILLA_OVERHEAD: f64 = 1.5;

    /// Hypergraph product: `0.07 * (p/p_th) ^ (0.47 * n^0.27)`.
    pub const HYPERGRAPH_PREFACTOR: f64 = 0.07;
    pub const HYPERGRAPH_COEFFICIENT: f64 = 0.47;
    pub const HYPERGRAPH_POWER: f64 = 0.27;

    /// Lifted product: `2.3 * (p/p_th) ^ (0.11 * n^0.60)`.
    pub const LIFTED_PREFACTOR: f64 = 2.3;
    pub const LIFTED_COEFFICIENT: f64 = 0.11;
    pub const LIFTED_POWER: f64 = 0.60;

    /// Encoding rate of the hypergraph product family: `k ≈ 0.04 * n`.
    pub const HYPERGRAPH_RATE_SCALE: f64 = 0.04;
    pub const HYPERGRAPH_RATE_POWER: f64 = 1.0;

    /// Encoding rate of the lifted product family: `k ≈ 0.38 * n^0.85`.
    pub const LIFTED_RATE_SCALE: f64 = 0.38;
    pub const LIFTED_RATE_POWER: f64 = 0.85;
}

/// Search and sampling tunables for the inverse solver and curve sampler.
///
/// These are empirically chosen rather than derived bounds. They are exposed
/// as defaults and can be overridden through the configuration file.
pub mod tunables {
    /// Smallest physical qubit count the inverse solver will consider.
    pub const N_MIN: f64 = 10.0;

    /// Upper search bound for single-point queries and comparison tables.
    pub const N_MAX_POINT: f64 = 1e6;

    /// Upper search bound while sampling curves.
    ///
    /// Larger than the point bound because required qubit counts diverge
    /// as p approaches the threshold.
    pub const N_MAX_CURVE: f64 = 1e10;

    /// Bisection iterations for single-point queries.
    pub const POINT_ITERATIONS: u32 = 20;

    /// Bisection iterations while sampling curves.
    pub const CURVE_ITERATIONS: u32 = 30;

    /// Qubit count beyond which a configuration is treated as infeasible.
    pub const SANITY_CEILING: f64 = 1e9;

    /// Number of p samples per curve.
    pub const CURVE_SAMPLES: usize = 50;

    /// Lowest physical error rate sampled on a curve.
    pub const CURVE_P_FLOOR: f64 = 1e-6;

    /// Fraction of the threshold at which curve sampling stops.
    pub const THRESHOLD_MARGIN: f64 = 0.99;
}

/// Default bounds for logarithmic input sliders.
///
/// Each pair is `(min, max)`; both ends are strictly positive.
pub mod sliders {
    /// Physical error rate slider bounds.
    pub const PHYSICAL_ERROR_RATE: (f64, f64) = (1e-6, 1e-1);

    /// Physical qubit count slider bounds.
    pub const PHYSICAL_QUBITS: (f64, f64) = (10.0, 1e10);

    /// Target logical error rate slider bounds.
    pub const LOGICAL_ERROR_RATE: (f64, f64) = (1e-18, 1e-1);
}

/// Quop regimes: eras of fault-tolerant computing named by the number of
/// logical operations they can run before one logical error is expected.
pub mod quop {
    use core::fmt;
    use core::str::FromStr;

    /// Era label tied to an order of magnitude of target logical error rate.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
    pub enum QuopRegime {
        /// Thousands of logical operations, ε_L = 1e-3.
        Kilo,
        /// Millions of logical operations, ε_L = 1e-6.
        Mega,
        /// Billions of logical operations, ε_L = 1e-9.
        Giga,
        /// Trillions of logical operations, ε_L = 1e-12.
        Tera,
        /// Quadrillions of logical operations, ε_L = 1e-15.
        Peta,
    }

    impl QuopRegime {
        /// All regimes ordered from least to most demanding.
        pub const ALL: [QuopRegime; 5] = [
            QuopRegime::Kilo,
            QuopRegime::Mega,
            QuopRegime::Giga,
            QuopRegime::Tera,
            QuopRegime::Peta,
        ];

        /// Target logical error rate per operation for this regime.
        pub const fn target_epsilon_l(self) -> f64 {
            match self {
                QuopRegime::Kilo => 1e-3,
                QuopRegime::Mega => 1e-6,
                QuopRegime::Giga => 1e-9,
                QuopRegime::Tera => 1e-12,
                QuopRegime::Peta => 1e-15,
            }
        }

        /// Display label, e.g. `MegaQuop`.
        pub const fn label(self) -> &'static str {
            match self {
                QuopRegime::Kilo => "KiloQuop",
                QuopRegime::Mega => "MegaQuop",
                QuopRegime::Giga => "GigaQuop",
                QuopRegime::Tera => "TeraQuop",
                QuopRegime::Peta => "PetaQuop",
            }
        }

        /// Returns the most demanding regime a logical error rate supports.
        ///
        /// A rate of 1e-7 supports the Mega regime but not Giga. Rates worse
        /// than the Kilo target, and non-positive or NaN rates, yield `None`.
        pub fn for_epsilon(epsilon_l: f64) -> Option<QuopRegime> {
            if epsilon_l.is_nan() || epsilon_l <= 0.0 {
                return None;
            }
            Self::ALL
                .iter()
                .rev()
                .copied()
                .find(|regime| regime.target_epsilon_l() >= epsilon_l)
        }
    }

    impl fmt::Display for QuopRegime {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str(self.label())
        }
    }

    /// Returned when a string names no known quop regime.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct UnknownRegime;

    impl fmt::Display for UnknownRegime {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("unknown quop regime (expected kilo, mega, giga, tera or peta)")
        }
    }

    impl FromStr for QuopRegime {
        type Err = UnknownRegime;

        fn from_str(s: &str) -> Result<Self, Self::Err> {
            let trimmed = s.trim();
            let suffix_at = trimmed.len().saturating_sub(4);
            let stem = match trimmed.get(suffix_at..) {
                Some(tail) if suffix_at > 0 && tail.eq_ignore_ascii_case("quop") => {
                    &trimmed[..suffix_at]
                }
                _ => trimmed,
            };

            QuopRegime::ALL
                .iter()
                .copied()
                .find(|regime| {
                    let label = regime.label();
                    stem.eq_ignore_ascii_case(&label[..label.len() - 4])
                })
                .ok_or(UnknownRegime)
        }
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[test]
        fn parses_labels_case_insensitively() {
            assert_eq!("mega".parse(), Ok(QuopRegime::Mega));
            assert_eq!("GigaQuop".parse(), Ok(QuopRegime::Giga));
            assert_eq!(" PETAQUOP ".parse(), Ok(QuopRegime::Peta));
            assert_eq!("exa".parse::<QuopRegime>(), Err(UnknownRegime));
            assert_eq!("quop".parse::<QuopRegime>(), Err(UnknownRegime));
        }

        #[test]
        fn supported_regime_follows_order_of_magnitude() {
            assert_eq!(QuopRegime::for_epsilon(1e-3), Some(QuopRegime::Kilo));
            assert_eq!(QuopRegime::for_epsilon(1e-7), Some(QuopRegime::Mega));
            assert_eq!(QuopRegime::for_epsilon(1e-20), Some(QuopRegime::Peta));
            assert_eq!(QuopRegime::for_epsilon(0.01), None);
            assert_eq!(QuopRegime::for_epsilon(f64::NAN), None);
        }

        #[test]
        fn non_positive_rates_support_no_regime() {
            assert_eq!(QuopRegime::for_epsilon(0.0), None);
            assert_eq!(QuopRegime::for_epsilon(-1e-9), None);
            assert_eq!(QuopRegime::for_epsilon(f64::NEG_INFINITY), None);
        }
    }
}
