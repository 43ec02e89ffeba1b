//! Summary statistics shared by the analyzers

/// Score returned when there is not enough data to observe variability
pub const NEUTRAL_CONSISTENCY: f64 = 100.0;

/// Arithmetic mean, 0 for an empty slice or when the sum leaves the `f64` range
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let m = values.iter().sum::<f64>() / values.len() as f64;
    if m.is_finite() {
        m
    } else {
        0.0
    }
}

/// Population standard deviation, 0 for fewer than two values
pub fn std_dev(values: &[f64]) -> f64 {
    if values.len() < 2 {
        return 0.0;
    }
    let m = mean(values);
    let variance = values.iter().map(|v| (v - m).powi(2)).sum::<f64>() / values.len() as f64;
    variance.sqrt()
}

/// Inverse coefficient of variation on a 0..=100 scale.
///
/// `100 - 100 * stddev / |mean|`, floored at 0. Fewer than two values score
/// [`NEUTRAL_CONSISTENCY`]. A zero mean scores 100 when every value is equal
/// and 0 otherwise.
pub fn consistency(values: &[f64]) -> f64 {
    if values.len() < 2 {
        return NEUTRAL_CONSISTENCY;
    }

    let m = mean(values);
    let sd = std_dev(values);

    if m == 0.0 {
        return if sd == 0.0 { NEUTRAL_CONSISTENCY } else { 0.0 };
    }

    let score = 100.0 - (sd / m.abs()) * 100.0;
    if score.is_finite() {
        score.clamp(0.0, 100.0)
    } else {
        0.0
    }
}
