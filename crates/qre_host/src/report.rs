//! Text and JSON rendering of engine results.
//!
//! Every `print_*` function writes either an aligned table to stdout or a
//! single pretty-printed JSON document, so `--json` output can be piped
//! straight into other tools while logs stay on stderr.

use anyhow::Result;
use qre_common::quop::QuopRegime;
use qre_core::{
    CodeModel, Comparison, Estimate, Family, LogScale, Registry, SampledCurve, cheapest,
};
use serde_json::json;

fn print_json(value: &serde_json::Value) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn family_label(family: Family) -> &'static str {
    match family {
        Family::Topological => "topological",
        Family::Ldpc => "ldpc",
    }
}

/// Formats a qubit count with an SI suffix: `86`, `12.4k`, `3.10M`.
pub fn format_qubits(n: f64) -> String {
    const SUFFIXES: [(f64, &str); 4] = [(1e12, "T"), (1e9, "G"), (1e6, "M"), (1e3, "k")];
    for (scale, suffix) in SUFFIXES {
        if n >= scale {
            let scaled = n / scale;
            return if scaled >= 100.0 {
                format!("{scaled:.0}{suffix}")
            } else if scaled >= 10.0 {
                format!("{scaled:.1}{suffix}")
            } else {
                format!("{scaled:.2}{suffix}")
            };
        }
    }
    format!("{n:.0}")
}

/// Names the most demanding quop regime an error rate supports.
pub fn regime_label(epsilon_l: f64) -> &'static str {
    QuopRegime::for_epsilon(epsilon_l)
        .map(QuopRegime::label)
        .unwrap_or("below KiloQuop")
}

pub fn print_codes(registry: &Registry, as_json: bool) -> Result<()> {
    if as_json {
        let codes: Vec<_> = registry
            .iter()
            .map(|code| {
                json!({
                    "id": code.id(),
                    "name": code.display_name,
                    "family": code.family(),
                    "threshold": code.threshold,
                })
            })
            .collect();
        return print_json(&json!(codes));
    }

    println!("{:<12} {:<28} {:<12} {:>9}", "id", "name", "family", "p_th");
    for code in registry.iter() {
        println!(
            "{:<12} {:<28} {:<12} {:>8.2}%",
            code.id(),
            code.display_name,
            family_label(code.family()),
            code.threshold * 100.0
        );
    }
    Ok(())
}

pub fn print_estimate(
    code: &CodeModel,
    estimate: &Estimate,
    target: Option<f64>,
    as_json: bool,
) -> Result<()> {
    if as_json {
        let mut value = json!(estimate);
        if let Some(target) = target {
            value["target_epsilon_l"] = json!(target);
            value["meets_target"] = json!(estimate.meets_target(target));
        }
        return print_json(&value);
    }

    println!("{} (p_th = {:.2}%)", code.display_name, code.threshold * 100.0);
    println!("  p          {:.3e}", estimate.p);
    println!("  n          {}", estimate.n);
    println!("  k          {}", estimate.k);
    if let Some(d) = estimate.d {
        println!("  d          {d}");
    }
    if let Some(ancilla) = estimate.n_ancilla {
        println!("  ancilla    {}", format_qubits(ancilla));
        println!("  total      {}", format_qubits(estimate.total_qubits()));
    }
    if let Some(implied) = code.implied_logical_qubits(estimate.n as f64) {
        println!("  k (rate)   {implied:.1}");
    }
    println!("  eps_L      {:.3e}", estimate.epsilon_l);
    println!("  log10 eps  {:.2}", estimate.log10_epsilon_l);
    println!("  regime     {}", regime_label(estimate.epsilon_l));
    if let Some(target) = target {
        let status = if estimate.meets_target(target) {
            "met"
        } else {
            "missed"
        };
        println!("  target     {target:.3e} ({status})");
    }
    Ok(())
}

pub fn print_curves(curves: &[SampledCurve], as_json: bool) -> Result<()> {
    if as_json {
        return print_json(&json!(curves));
    }

    for curve in curves {
        println!(
            "{} at eps_L = {:.1e}: {} points{}",
            curve.code,
            curve.target_epsilon_l,
            curve.points.len(),
            if curve.truncated { " (truncated)" } else { "" }
        );
        println!("  {:>10} {:>10} {:>10}", "p", "n", "k");
        for point in &curve.points {
            println!(
                "  {:>10.3e} {:>10} {:>10.1}",
                point.p,
                format_qubits(point.n as f64),
                point.k
            );
        }
    }
    Ok(())
}

pub fn print_table(rows: &[Comparison], p: f64, target: f64, as_json: bool) -> Result<()> {
    let best = cheapest(rows);

    if as_json {
        let rows: Vec<_> = rows
            .iter()
            .enumerate()
            .map(|(i, row)| match &row.outcome {
                Ok(estimate) => json!({
                    "code": row.code.id(),
                    "estimate": estimate,
                    "total_qubits": estimate.total_qubits(),
                    "cheapest": best == Some(i),
                }),
                Err(e) => json!({
                    "code": row.code.id(),
                    "error": e.to_string(),
                }),
            })
            .collect();
        return print_json(&json!({
            "p": p,
            "target_epsilon_l": target,
            "rows": rows,
        }));
    }

    println!("p = {p:.3e}, target eps_L = {target:.1e}");
    println!(
        "  {:<12} {:>8} {:>10} {:>6} {:>10} {:>10} {:>10}",
        "code", "p_th", "n", "d", "ancilla", "total", "eps_L"
    );
    for (i, row) in rows.iter().enumerate() {
        let marker = if best == Some(i) { "*" } else { " " };
        match &row.outcome {
            Ok(estimate) => println!(
                "{marker} {:<12} {:>7.2}% {:>10} {:>6} {:>10} {:>10} {:>10.2e}",
                row.code.id(),
                row.code.threshold * 100.0,
                format_qubits(estimate.n as f64),
                estimate.d.map_or_else(|| "-".to_string(), |d| d.to_string()),
                estimate
                    .n_ancilla
                    .map_or_else(|| "-".to_string(), format_qubits),
                format_qubits(estimate.total_qubits()),
                estimate.epsilon_l
            ),
            Err(e) => println!(
                "{marker} {:<12} {:>7.2}% {e}",
                row.code.id(),
                row.code.threshold * 100.0
            ),
        }
    }
    Ok(())
}

pub fn print_scale(
    scale: &LogScale,
    value: Option<f64>,
    position: Option<f64>,
    as_json: bool,
) -> Result<()> {
    let (value, position) = match (value, position) {
        (Some(value), _) => (value, scale.to_position(value)),
        (None, Some(position)) => (scale.from_position(position), position),
        (None, None) => anyhow::bail!("either --value or --position is required"),
    };

    if as_json {
        return print_json(&json!({
            "min": scale.min(),
            "max": scale.max(),
            "value": value,
            "position": position,
            "in_range": scale.contains(value),
        }));
    }

    println!("range    [{:e}, {:e}]", scale.min(), scale.max());
    println!("value    {value:.6e}");
    println!("position {position:.4}");
    if !scale.contains(value) {
        println!("note     value lies outside the range");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn qubit_counts_use_si_suffixes() {
        assert_eq!(format_qubits(86.0), "86");
        assert_eq!(format_qubits(999.0), "999");
        assert_eq!(format_qubits(1500.0), "1.50k");
        assert_eq!(format_qubits(12_400.0), "12.4k");
        assert_eq!(format_qubits(250_000.0), "250k");
        assert_eq!(format_qubits(3.1e6), "3.10M");
        assert_eq!(format_qubits(2e12), "2.00T");
    }

    #[test]
    fn regimes_follow_error_rate() {
        assert_eq!(regime_label(5e-7), "MegaQuop");
        assert_eq!(regime_label(1e-3), "KiloQuop");
        assert_eq!(regime_label(1e-16), "PetaQuop");
        assert_eq!(regime_label(0.05), "below KiloQuop");
    }
}
