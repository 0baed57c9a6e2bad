//! Display formatting that never shows NaN.

/// Format with `decimals` places; NaN, infinity and `None` show as zero.
#[must_use]
pub fn safe_to_fixed(value: Option<f64>, decimals: usize) -> String {
    match value {
        Some(v) if v.is_finite() => format!("{v:.decimals$}"),
        _ => format!("{:.decimals$}", 0.0),
    }
}

/// `value` if finite, else `fallback`.
#[must_use]
pub fn safe_number(value: Option<f64>, fallback: f64) -> f64 {
    value.filter(|v| v.is_finite()).unwrap_or(fallback)
}

/// Human-readable duration: minutes under an hour, else hours.
#[must_use]
pub fn format_duration(hours: f64) -> String {
    if hours < 1.0 {
        format!("{} min", (hours * 60.0).round())
    } else {
        format!("{hours:.1} hrs")
    }
}
