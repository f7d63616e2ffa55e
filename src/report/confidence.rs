use super::types::ClassifierVerdict;

/// Decimal places kept in the reported mean confidence.
const CONFIDENCE_DECIMALS: i32 = 2;

/// Mean confidence over the verdicts that actually reported a usable one.
///
/// Verdicts without a confidence, or with one that is not a finite value in `[0, 1]`, are
/// excluded from both the sum and the count. With nothing left the result is exactly `0.0`.
pub fn summarize_confidence(verdicts: &[ClassifierVerdict]) -> f64 {
    let (sum, count) = verdicts
        .iter()
        .filter_map(|v| v.confidence.filter(|c| c.is_finite() && (0.0..=1.0).contains(c)))
        .fold((0.0_f64, 0_usize), |(sum, count), c| (sum + c, count + 1));

    if count == 0 {
        return 0.0;
    }

    round_half_up(sum / count as f64, CONFIDENCE_DECIMALS)
}

/// Rounds half-up at the given number of decimals.
///
/// The scaled value is snapped to 6 decimals first so binary noise
/// (0.285 * 100 = 28.4999...) rounds the way the decimal reads.
fn round_half_up(value: f64, decimals: i32) -> f64 {
    let factor = 10_f64.powi(decimals);
    let scaled = ((value * factor) * 1e6).round() / 1e6;
    (scaled + 0.5).floor() / factor
}
