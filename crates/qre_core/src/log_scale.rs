//! Logarithmic slider mapping.
//!
//! Maps a linear position in `[0, 100]` onto a logarithmic numeric range
//! `[min, max]` and back. Physical error rates, qubit counts and logical
//! error rates all span many orders of magnitude, so sliders over them move
//! through exponents rather than values.

use crate::{QreError, check_rate};
use serde::{Deserialize, Serialize};

/// Full-scale slider position.
pub const FULL_SCALE: f64 = 100.0;

/// Maps `value` to a slider position: `0` at `min`, `100` at `max`.
///
/// Unchecked: non-positive inputs produce non-finite output, so callers must
/// guard or use [`LogScale`].
pub fn to_log_scale(value: f64, min: f64, max: f64) -> f64 {
    (value.log10() - min.log10()) / (max.log10() - min.log10()) * FULL_SCALE
}

/// Maps a slider position back to a value in `[min, max]`.
///
/// Unchecked inverse of [`to_log_scale`].
pub fn from_log_scale(position: f64, min: f64, max: f64) -> f64 {
    let log_min = min.log10();
    10f64.powf(log_min + (position / FULL_SCALE) * (max.log10() - log_min))
}

/// Validated logarithmic range.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LogScale {
    min: f64,
    max: f64,
}

impl LogScale {
    /// Creates a range after checking `0 < min < max` with both ends finite.
    pub fn new(min: f64, max: f64) -> Result<Self, QreError> {
        check_rate("min", min)?;
        check_rate("max", max)?;
        if min >= max {
            return Err(QreError::invalid("max", max, "must exceed min"));
        }
        Ok(Self { min, max })
    }

    pub fn min(&self) -> f64 {
        self.min
    }

    pub fn max(&self) -> f64 {
        self.max
    }

    pub fn to_position(&self, value: f64) -> f64 {
        to_log_scale(value, self.min, self.max)
    }

    pub fn from_position(&self, position: f64) -> f64 {
        from_log_scale(position, self.min, self.max)
    }

    /// Whether `value` lies inside the closed range.
    pub fn contains(&self, value: f64) -> bool {
        (self.min..=self.max).contains(&value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    #[test]
    fn endpoints_map_exactly() {
        for (min, max) in [(1e-6, 1e-1), (10.0, 1e10), (1e-18, 1e-1), (0.5, 2.0)] {
            assert_eq!(to_log_scale(min, min, max), 0.0);
            assert_eq!(to_log_scale(max, min, max), 100.0);
        }
    }

    #[test]
    fn round_trip_within_relative_tolerance() {
        let mut rng = StdRng::seed_from_u64(0x5eed);
        for (min, max) in [(1e-6, 1e-1), (10.0, 1e10), (1e-18, 1e-1)] {
            let scale = LogScale::new(min, max).unwrap();
            for _ in 0..1000 {
                let exponent = rng.gen_range(min.log10()..=max.log10());
                let value = 10f64.powf(exponent).clamp(min, max);
                let back = scale.from_position(scale.to_position(value));
                assert!(
                    ((back - value) / value).abs() < 1e-9,
                    "value {value} came back as {back}"
                );
            }
        }
    }

    #[test]
    fn midpoint_is_geometric_mean() {
        let value = from_log_scale(50.0, 1e-6, 1e-2);
        assert!((value - 1e-4).abs() < 1e-4 * 1e-12);
    }

    #[test]
    fn non_positive_inputs_are_not_finite() {
        assert!(!to_log_scale(0.0, 1e-6, 1e-1).is_finite());
        assert!(to_log_scale(-1.0, 1e-6, 1e-1).is_nan());
    }

    #[test]
    fn validated_scale_rejects_bad_bounds() {
        assert!(LogScale::new(0.0, 1.0).is_err());
        assert!(LogScale::new(1.0, 1.0).is_err());
        assert!(LogScale::new(2.0, 1.0).is_err());
        assert!(LogScale::new(1e-3, f64::INFINITY).is_err());
        let scale = LogScale::new(1e-3, 1.0).unwrap();
        assert!(scale.contains(0.5));
        assert!(!scale.contains(2.0));
    }
}
