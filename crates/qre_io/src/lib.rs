//! Input handling for the resource estimator.
//!
//! Provides configuration loading for solver and sampler tunables, and
//! parsing of the quantities users type on the command line: error rates in
//! scientific, power-of-ten or percent notation, quop regime labels, and
//! qubit counts with SI suffixes.

/// Configuration file loading and validation.
///
/// Reads an optional TOML file whose sections override the solver, curve
/// and slider defaults. Every field falls back to the shared tunables, so an
/// empty file is a valid configuration.
pub mod config;

/// Parser for user-supplied quantities.
///
/// Accepts `1e-6`, `0.001`, `10^-6`, `0.1%` and quop labels such as `mega`
/// for rates, and `1000`, `1e6` or `2.5M` for qubit counts.
pub mod parser;
