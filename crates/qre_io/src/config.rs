//! Estimator configuration.
//!
//! The empirically chosen tunables (search brackets, iteration counts,
//! sanity ceiling, sampling grid) are not load-bearing invariants, so they
//! are exposed here rather than hard-wired.

use qre_common::{sliders, tunables};
use qre_core::{LogScale, QreError, SamplerConfig, SolverConfig};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors raised while loading or validating configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config file {path}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid config: {0}")]
    Syntax(#[from] toml::de::Error),

    #[error("invalid [{section}] section")]
    Invalid {
        section: &'static str,
        #[source]
        source: QreError,
    },
}

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EstimatorConfig {
    /// Point-query solver tunables.
    #[serde(default)]
    pub solver: SolverSection,

    /// Curve sampling tunables.
    #[serde(default)]
    pub curve: CurveSection,

    /// Log-slider bounds.
    #[serde(default)]
    pub sliders: SliderSection,
}

/// `[solver]`: bisection tunables for single-point queries and tables.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SolverSection {
    #[serde(default = "default_n_min")]
    pub n_min: f64,

    #[serde(default = "default_point_n_max")]
    pub n_max: f64,

    #[serde(default = "default_point_iterations")]
    pub iterations: u32,

    #[serde(default = "default_sanity_ceiling")]
    pub sanity_ceiling: f64,
}

/// `[curve]`: sampling grid plus the bisection tunables used per point.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurveSection {
    #[serde(default = "default_samples")]
    pub samples: usize,

    #[serde(default = "default_p_floor")]
    pub p_floor: f64,

    #[serde(default = "default_threshold_margin")]
    pub threshold_margin: f64,

    #[serde(default = "default_n_min")]
    pub n_min: f64,

    #[serde(default = "default_curve_n_max")]
    pub n_max: f64,

    #[serde(default = "default_curve_iterations")]
    pub iterations: u32,

    #[serde(default = "default_sanity_ceiling")]
    pub sanity_ceiling: f64,
}

/// `[sliders]`: `[min, max]` bounds of each logarithmic slider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SliderSection {
    #[serde(default = "default_physical_error_rate")]
    pub physical_error_rate: (f64, f64),

    #[serde(default = "default_physical_qubits")]
    pub physical_qubits: (f64, f64),

    #[serde(default = "default_logical_error_rate")]
    pub logical_error_rate: (f64, f64),
}

fn default_n_min() -> f64 {
    tunables::N_MIN
}

fn default_point_n_max() -> f64 {
    tunables::N_MAX_POINT
}

fn default_curve_n_max() -> f64 {
    tunables::N_MAX_CURVE
}

fn default_point_iterations() -> u32 {
    tunables::POINT_ITERATIONS
}

fn default_curve_iterations() -> u32 {
    tunables::CURVE_ITERATIONS
}

fn default_sanity_ceiling() -> f64 {
    tunables::SANITY_CEILING
}

fn default_samples() -> usize {
    tunables::CURVE_SAMPLES
}

fn default_p_floor() -> f64 {
    tunables::CURVE_P_FLOOR
}

fn default_threshold_margin() -> f64 {
    tunables::THRESHOLD_MARGIN
}

fn default_physical_error_rate() -> (f64, f64) {
    sliders::PHYSICAL_ERROR_RATE
}

fn default_physical_qubits() -> (f64, f64) {
    sliders::PHYSICAL_QUBITS
}

fn default_logical_error_rate() -> (f64, f64) {
    sliders::LOGICAL_ERROR_RATE
}

impl Default for SolverSection {
    fn default() -> Self {
        Self {
            n_min: default_n_min(),
            n_max: default_point_n_max(),
            iterations: default_point_iterations(),
            sanity_ceiling: default_sanity_ceiling(),
        }
    }
}

impl Default for CurveSection {
    fn default() -> Self {
        Self {
            samples: default_samples(),
            p_floor: default_p_floor(),
            threshold_margin: default_threshold_margin(),
            n_min: default_n_min(),
            n_max: default_curve_n_max(),
            iterations: default_curve_iterations(),
            sanity_ceiling: default_sanity_ceiling(),
        }
    }
}

impl Default for SliderSection {
    fn default() -> Self {
        Self {
            physical_error_rate: default_physical_error_rate(),
            physical_qubits: default_physical_qubits(),
            logical_error_rate: default_logical_error_rate(),
        }
    }
}

impl SliderSection {
    pub fn physical_error_rate(&self) -> Result<LogScale, QreError> {
        LogScale::new(self.physical_error_rate.0, self.physical_error_rate.1)
    }

    pub fn physical_qubits(&self) -> Result<LogScale, QreError> {
        LogScale::new(self.physical_qubits.0, self.physical_qubits.1)
    }

    pub fn logical_error_rate(&self) -> Result<LogScale, QreError> {
        LogScale::new(self.logical_error_rate.0, self.logical_error_rate.1)
    }
}

impl EstimatorConfig {
    /// Loads configuration from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
            path: path.to_owned(),
            source: e,
        })?;

        toml::from_str(&content).map_err(|e| ConfigError::Parse {
            path: path.to_owned(),
            source: e,
        })
    }

    /// Loads the file at `path` when given, defaults otherwise.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let config = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        config.validate()?;
        Ok(config)
    }

    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    pub fn solver_config(&self) -> SolverConfig {
        SolverConfig {
            n_min: self.solver.n_min,
            n_max: self.solver.n_max,
            iterations: self.solver.iterations,
            sanity_ceiling: self.solver.sanity_ceiling,
        }
    }

    pub fn sampler_config(&self) -> SamplerConfig {
        SamplerConfig {
            samples: self.curve.samples,
            p_floor: self.curve.p_floor,
            threshold_margin: self.curve.threshold_margin,
            solver: SolverConfig {
                n_min: self.curve.n_min,
                n_max: self.curve.n_max,
                iterations: self.curve.iterations,
                sanity_ceiling: self.curve.sanity_ceiling,
            },
        }
    }

    /// Checks every section, reporting the first one that is out of domain.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.solver_config().validate().map_err(invalid("solver"))?;
        self.sampler_config().validate().map_err(invalid("curve"))?;
        self.sliders
            .physical_error_rate()
            .and(self.sliders.physical_qubits())
            .and(self.sliders.logical_error_rate())
            .map_err(invalid("sliders"))?;
        Ok(())
    }
}

fn invalid(section: &'static str) -> impl FnOnce(QreError) -> ConfigError {
    move |source| ConfigError::Invalid { section, source }
}
