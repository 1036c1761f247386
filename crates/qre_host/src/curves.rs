use anyhow::Result;
use qre_core::{CodeModel, SampledCurve, SamplerConfig, sample_curve_with};
use rayon::prelude::*;
use std::time::Instant;
use tracing::{debug, info};

/// Samples one curve per code in parallel.
///
/// Curves come back in the order of `codes`. Each sampler is independent, so
/// codes are spread across the rayon pool with no shared state.
pub fn sample_curves(
    codes: &[&'static CodeModel],
    target_epsilon_l: f64,
    k: u64,
    config: &SamplerConfig,
) -> Result<Vec<SampledCurve>> {
    let start = Instant::now();

    let curves = codes
        .par_iter()
        .map(|code| {
            let curve = sample_curve_with(code, target_epsilon_l, k, config)?.into_curve();
            debug!(
                code = curve.code,
                points = curve.points.len(),
                truncated = curve.truncated,
                "Sampled curve"
            );
            Ok(curve)
        })
        .collect::<Result<Vec<_>, qre_core::QreError>>()?;

    let points: usize = curves.iter().map(|curve| curve.points.len()).sum();
    info!(
        curves = curves.len(),
        points,
        elapsed = ?start.elapsed(),
        "Curve sampling finished"
    );

    Ok(curves)
}

#[cfg(test)]
mod tests {
    use super::*;
    use qre_core::Registry;

    #[test]
    fn preserves_registry_order() {
        let registry = Registry::standard();
        let codes: Vec<_> = registry.iter().collect();
        let curves = sample_curves(&codes, 1e-6, 1, &SamplerConfig::standard()).unwrap();

        let ids: Vec<_> = curves.iter().map(|curve| curve.code).collect();
        assert_eq!(ids, registry.ids().collect::<Vec<_>>());
        assert!(curves.iter().all(|curve| !curve.points.is_empty()));
    }

    #[test]
    fn invalid_target_fails_the_batch() {
        let codes: Vec<_> = Registry::standard().iter().collect();
        assert!(sample_curves(&codes, -1.0, 1, &SamplerConfig::standard()).is_err());
    }
}
