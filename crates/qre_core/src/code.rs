//! Registry of supported quantum error correction codes.
//!
//! Each code is described by an immutable [`CodeModel`]: its identifier,
//! display name, noise threshold and the scaling law it follows. The scaling
//! laws come in two families. Topological codes tile a lattice whose distance
//! grows with `sqrt(n/k)`, and their logical error rate is a power of
//! `p/p_th` with a distance-derived exponent. LDPC codes have no tiled
//! lattice distance in this model; their exponent is itself a power of `n`.

use crate::QreError;
use crate::evaluator::{self, Estimate};
use crate::sampler::{self, CurveSampler};
use crate::solver;
use qre_common::{formula, thresholds};
use serde::Serialize;

/// Identifier of a registered code variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum CodeKind {
    #[serde(rename = "surface")]
    Surface,
    #[serde(rename = "color")]
    Color,
    #[serde(rename = "yoked_1d")]
    Yoked1d,
    #[serde(rename = "yoked_2d")]
    Yoked2d,
    #[serde(rename = "hypergraph")]
    Hypergraph,
    #[serde(rename = "lifted")]
    Lifted,
}

impl CodeKind {
    /// Stable string identifier used for lookups and serialized output.
    pub const fn id(self) -> &'static str {
        match self {
            CodeKind::Surface => "surface",
            CodeKind::Color => "color",
            CodeKind::Yoked1d => "yoked_1d",
            CodeKind::Yoked2d => "yoked_2d",
            CodeKind::Hypergraph => "hypergraph",
            CodeKind::Lifted => "lifted",
        }
    }
}

/// Broad code family, determining which result fields are meaningful.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Family {
    /// Lattice codes with an explicit distance and ancilla count.
    Topological,
    /// Algebraic codes with no tiled-lattice distance.
    Ldpc,
}

/// How a distance-based law turns the code distance into an exponent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DistanceExponent {
    /// `d / 2`, allowing half-integer exponents.
    Half,
    /// `ceil(d / 2)`.
    CeilHalf,
}

impl DistanceExponent {
    pub fn of(self, d: u64) -> f64 {
        let half = d as f64 / 2.0;
        match self {
            DistanceExponent::Half => half,
            DistanceExponent::CeilHalf => half.ceil(),
        }
    }
}

/// Outer parity checks layered over surface code patches.
///
/// A yoke multiplies the effective distance of the inner patches and costs
/// extra ancillas for the outer parity connections.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Yoke {
    /// Factor applied to the inner patch distance before flooring.
    pub multiplier: f64,
    /// Factor applied to the inner ancilla count.
    pub ancilla_overhead: f64,
}

/// Encoding-rate relation `k ≈ scale * n^power` for LDPC families.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EncodingRate {
    pub scale: f64,
    pub power: f64,
}

impl EncodingRate {
    /// Logical qubits implied by `n` physical qubits.
    pub fn logical_qubits(&self, n: f64) -> f64 {
        self.scale * n.powf(self.power)
    }
}

/// Scaling law of a code, as a closed set of formula variants.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Formula {
    /// `prefactor * k * (p/p_th) ^ exponent(d)` with `d` derived from
    /// `floor(sqrt(n/k))`, optionally boosted by a yoke.
    Distance {
        prefactor: f64,
        exponent: DistanceExponent,
        yoke: Option<Yoke>,
    },
    /// `prefactor * (p/p_th) ^ (coefficient * n^power)`.
    Algebraic {
        prefactor: f64,
        coefficient: f64,
        power: f64,
        rate: EncodingRate,
    },
}

/// Immutable descriptor of one code variant.
#[derive(Debug, Clone, PartialEq)]
pub struct CodeModel {
    /// Variant tag, also the source of the string identifier.
    pub kind: CodeKind,

    /// Human-readable name for tables and legends.
    pub display_name: &'static str,

    /// Physical error rate above which growing the code stops helping.
    pub threshold: f64,

    /// Scaling law used by the forward evaluator.
    pub formula: Formula,
}

impl CodeModel {
    pub fn id(&self) -> &'static str {
        self.kind.id()
    }

    pub fn family(&self) -> Family {
        match self.formula {
            Formula::Distance { .. } => Family::Topological,
            Formula::Algebraic { .. } => Family::Ldpc,
        }
    }

    /// Smallest physical qubit count for which the formula is defined.
    ///
    /// Distance-based codes need at least one physical qubit per logical
    /// qubit, otherwise the inner distance collapses to zero.
    pub fn min_qubits(&self, k: u64) -> u64 {
        match self.formula {
            Formula::Distance { .. } => k.max(1),
            Formula::Algebraic { .. } => 1,
        }
    }

    /// Logical qubits implied by the encoding rate of an LDPC family.
    ///
    /// Returns `None` for distance-based codes, whose `k` is an input.
    pub fn implied_logical_qubits(&self, n: f64) -> Option<f64> {
        match self.formula {
            Formula::Distance { .. } => None,
            Formula::Algebraic { rate, .. } => Some(rate.logical_qubits(n)),
        }
    }

    /// Forward evaluation of this code's scaling law.
    pub fn forward_evaluate(&self, p: f64, n: u64, k: u64) -> Result<Estimate, QreError> {
        evaluator::evaluate(self, p, n, k)
    }
}

const fn distance_code(
    kind: CodeKind,
    display_name: &'static str,
    threshold: f64,
    exponent: DistanceExponent,
    yoke: Option<Yoke>,
) -> CodeModel {
    CodeModel {
        kind,
        display_name,
        threshold,
        formula: Formula::Distance {
            prefactor: formula::DISTANCE_PREFACTOR,
            exponent,
            yoke,
        },
    }
}

/// The standard code table, in presentation order.
pub static STANDARD_CODES: [CodeModel; 6] = [
    distance_code(
        CodeKind::Surface,
        "Surface Code",
        thresholds::SURFACE,
        DistanceExponent::Half,
        None,
    ),
    distance_code(
        CodeKind::Color,
        "Color Code",
        thresholds::COLOR,
        DistanceExponent::CeilHalf,
        None,
    ),
    distance_code(
        CodeKind::Yoked1d,
        "1D Yoked Surface Code",
        thresholds::YOKED_1D,
        DistanceExponent::CeilHalf,
        Some(Yoke {
            multiplier: formula::YOKE_1D_MULTIPLIER,
            ancilla_overhead: formula::YOKE_1D_ANCILLA_OVERHEAD,
        }),
    ),
    distance_code(
        CodeKind::Yoked2d,
        "2D Yoked Surface Code",
        thresholds::YOKED_2D,
        DistanceExponent::CeilHalf,
        Some(Yoke {
            multiplier: formula::YOKE_2D_MULTIPLIER,
            ancilla_overhead: formula::YOKE_2D_ANCILLA_OVERHEAD,
        }),
    ),
    CodeModel {
        kind: CodeKind::Hypergraph,
        display_name: "Hypergraph Product Code",
        threshold: thresholds::HYPERGRAPH,
        formula: Formula::Algebraic {
            prefactor: formula::HYPERGRAPH_PREFACTOR,
            coefficient: formula::HYPERGRAPH_COEFFICIENT,
            power: formula::HYPERGRAPH_POWER,
            rate: EncodingRate {
                scale: formula::HYPERGRAPH_RATE_SCALE,
                power: formula::HYPERGRAPH_RATE_POWER,
            },
        },
    },
    CodeModel {
        kind: CodeKind::Lifted,
        display_name: "Lifted Product Code",
        threshold: thresholds::LIFTED,
        formula: Formula::Algebraic {
            prefactor: formula::LIFTED_PREFACTOR,
            coefficient: formula::LIFTED_COEFFICIENT,
            power: formula::LIFTED_POWER,
            rate: EncodingRate {
                scale: formula::LIFTED_RATE_SCALE,
                power: formula::LIFTED_RATE_POWER,
            },
        },
    },
];

/// Read-only view over a table of code models.
///
/// Cheap to copy; pass it by value or reference to anything that needs to
/// resolve code identifiers.
#[derive(Debug, Clone, Copy)]
pub struct Registry {
    codes: &'static [CodeModel],
}

impl Default for Registry {
    fn default() -> Self {
        Self::standard()
    }
}

impl Registry {
    /// Registry over the six standard codes.
    pub const fn standard() -> Self {
        Self {
            codes: &STANDARD_CODES,
        }
    }

    /// Resolves a code identifier.
    ///
    /// # Returns
    ///
    /// The matching model, or `QreError::NotFound` for unknown identifiers.
    pub fn lookup(&self, id: &str) -> Result<&'static CodeModel, QreError> {
        self.codes
            .iter()
            .find(|code| code.id() == id)
            .ok_or_else(|| QreError::NotFound(id.to_string()))
    }

    pub fn iter(&self) -> std::slice::Iter<'static, CodeModel> {
        self.codes.iter()
    }

    pub fn ids(&self) -> impl Iterator<Item = &'static str> + use<> {
        self.iter().map(CodeModel::id)
    }

    /// Forward evaluation addressed by code identifier.
    pub fn evaluate(&self, id: &str, p: f64, n: u64, k: u64) -> Result<Estimate, QreError> {
        evaluator::evaluate(self.lookup(id)?, p, n, k)
    }

    /// Inverse solve addressed by code identifier, using point-query tunables.
    pub fn solve_for_n(
        &self,
        id: &str,
        p: f64,
        k: u64,
        target_epsilon_l: f64,
    ) -> Result<Estimate, QreError> {
        solver::solve_for_n(self.lookup(id)?, p, k, target_epsilon_l)
    }

    /// Curve sampling addressed by code identifier, using default tunables.
    pub fn sample_curve(
        &self,
        id: &str,
        target_epsilon_l: f64,
        k: u64,
    ) -> Result<CurveSampler<'static>, QreError> {
        sampler::sample_curve(self.lookup(id)?, target_epsilon_l, k)
    }
}

/// Resolves a code identifier against the standard registry.
pub fn lookup_code(id: &str) -> Result<&'static CodeModel, QreError> {
    Registry::standard().lookup(id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_registry_holds_six_codes_in_order() {
        let ids: Vec<_> = Registry::standard().ids().collect();
        assert_eq!(
            ids,
            ["surface", "color", "yoked_1d", "yoked_2d", "hypergraph", "lifted"]
        );
    }

    #[test]
    fn thresholds_are_reproduced_exactly() {
        let expected = [
            ("surface", 0.011),
            ("color", 0.0036),
            ("yoked_1d", 0.011),
            ("yoked_2d", 0.011),
            ("hypergraph", 0.006),
            ("lifted", 0.0066),
        ];
        for (id, threshold) in expected {
            let code = lookup_code(id).unwrap();
            assert_eq!(code.threshold.to_bits(), f64::to_bits(threshold), "{id}");
        }
    }

    #[test]
    fn unknown_id_is_not_found() {
        assert_eq!(
            lookup_code("toric"),
            Err(QreError::NotFound("toric".to_string()))
        );
        assert!(lookup_code("Surface").is_err());
    }

    #[test]
    fn families_and_min_qubits() {
        let surface = lookup_code("surface").unwrap();
        let lifted = lookup_code("lifted").unwrap();
        assert_eq!(surface.family(), Family::Topological);
        assert_eq!(lifted.family(), Family::Ldpc);
        assert_eq!(surface.min_qubits(7), 7);
        assert_eq!(lifted.min_qubits(7), 1);
    }

    #[test]
    fn implied_logical_qubits_follow_encoding_rate() {
        let hypergraph = lookup_code("hypergraph").unwrap();
        let lifted = lookup_code("lifted").unwrap();
        let surface = lookup_code("surface").unwrap();

        let k = hypergraph.implied_logical_qubits(1000.0).unwrap();
        assert!((k - 40.0).abs() < 1e-9);

        let k = lifted.implied_logical_qubits(1000.0).unwrap();
        assert!((k - 0.38 * 1000f64.powf(0.85)).abs() < 1e-9);

        assert_eq!(surface.implied_logical_qubits(1000.0), None);
    }

    #[test]
    fn forward_evaluate_matches_free_evaluator() {
        for code in Registry::standard().iter() {
            let cases = [(0.001, 1000, 1), (0.002, 400, 4), (code.threshold * 2.0, 100, 1)];
            for (p, n, k) in cases {
                assert_eq!(
                    code.forward_evaluate(p, n, k),
                    evaluator::evaluate(code, p, n, k),
                    "{}",
                    code.id()
                );
            }
        }
        let surface = lookup_code("surface").unwrap();
        assert!(matches!(
            surface.forward_evaluate(0.0, 100, 1),
            Err(QreError::InvalidParameter { name: "p", .. })
        ));
    }

    #[test]
    fn distance_exponent_rounding() {
        assert_eq!(DistanceExponent::Half.of(31), 15.5);
        assert_eq!(DistanceExponent::CeilHalf.of(31), 16.0);
        assert_eq!(DistanceExponent::CeilHalf.of(30), 15.0);
    }
}
