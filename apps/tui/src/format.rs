/// Scales `value` to units, thousands (`mil`) or millions (`milhões`) and
/// renders it with two decimals, e.g. `format_number(1500.0, "R$")` gives
/// `"R$ 1.50 mil"`.
///
/// Values under 1000 keep an empty unit label, so the output always ends
/// with the separator space: `format_number(500.0, "")` is `"500.00 "`.
/// Negative and non-finite values are never scaled.
pub fn format_number(value: f64, prefix: &str) -> String {
    let mut scaled = value;
    for unit in ["", "mil"] {
        if !scaled.is_finite() || scaled < 1000.0 {
            return with_prefix(prefix, scaled, unit);
        }
        scaled /= 1000.0;
    }
    with_prefix(prefix, scaled, "milhões")
}

/// Counts are formatted the same way as amounts, without a prefix.
#[allow(clippy::cast_precision_loss)]
pub fn format_count(count: usize) -> String {
    format_number(count as f64, "")
}

fn with_prefix(prefix: &str, value: f64, unit: &str) -> String {
    if prefix.is_empty() {
        format!("{value:.2} {unit}")
    } else {
        format!("{prefix} {value:.2} {unit}")
    }
}
