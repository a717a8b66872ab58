//! Scale sampled counts up to the true headcount.
//!
//! Only part of a company's workforce has a resolvable public profile. The ratio of the
//! known current total to the sampled count for the current month is applied to every
//! month as a constant correction factor.

/// Headcount estimate per month window, same order as the raw series.
pub type AdjustedSeries = Vec<u64>;

/// `adjusted[i] = floor(raw[i] * current_total / raw[0])`.
///
/// When the anchor `raw[0]` is zero there is no ratio to apply and every value is zero.
pub fn rescale(raw: &[u64], current_total: u64) -> AdjustedSeries {
    let anchor = raw.first().copied().unwrap_or(0);
    if anchor == 0 {
        return vec![0; raw.len()];
    }

    raw.iter()
        .map(|&count| {
            let scaled = u128::from(count) * u128::from(current_total) / u128::from(anchor);
            u64::try_from(scaled).unwrap_or(u64::MAX)
        })
        .collect()
}

/// Multiplier applied by [`rescale`], for reporting.
pub fn scale_factor(raw: &[u64], current_total: u64) -> Option<f64> {
    match raw.first() {
        Some(&anchor) if anchor > 0 => Some(current_total as f64 / anchor as f64),
        _ => None,
    }
}
