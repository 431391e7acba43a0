// =============================================================================
// Exponential Moving Average (EMA)
// =============================================================================
//
// EMA gives more weight to recent prices, making it more responsive to new
// information than the Simple Moving Average (SMA).
//
// Formula:
//   multiplier = 2 / (span + 1)
//   EMA_t      = close_t * multiplier + EMA_{t-1} * (1 - multiplier)
//
// The recursion is seeded with the very first close and starts immediately:
// there is no warm-up gap and no bias adjustment.
// =============================================================================

/// Compute the EMA series for `closes` with the given `span`.
///
/// The output is index-aligned with the input and `ema[0] == closes[0]`.
///
/// # Edge cases
/// - empty input => empty vec
/// - `span == 0` => empty vec (the multiplier would be 2 and the recursion
///   diverges)
pub fn calculate_ema(closes: &[f64], span: usize) -> Vec<f64> {
    if span == 0 {
        return Vec::new();
    }
    let Some(&seed) = closes.first() else {
        return Vec::new();
    };

    let multiplier = 2.0 / (span + 1) as f64;

    let mut result = Vec::with_capacity(closes.len());
    result.push(seed);

    let mut prev_ema = seed;
    for &close in &closes[1..] {
        let ema = close * multiplier + prev_ema * (1.0 - multiplier);
        result.push(ema);
        prev_ema = ema;
    }

    result
}
