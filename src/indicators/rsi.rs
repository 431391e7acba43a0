// =============================================================================
// Relative Strength Index (RSI): simple rolling averages
// =============================================================================
//
// RSI measures the speed and magnitude of recent price changes to evaluate
// whether an asset is overbought or oversold.
//
// Step 1 - Compute price changes (deltas) from consecutive closes.  The first
//          close has no predecessor; its delta counts as a zero move.
// Step 2 - gain_t = max(delta_t, 0), loss_t = max(-delta_t, 0).
// Step 3 - avg_gain / avg_loss = plain rolling means over `period` values
//          (not Wilder's smoothing).
// Step 4 - RS  = avg_gain / avg_loss
//          RSI = 100 - 100 / (1 + RS)
//
// Thresholds:  RSI > 70 => OVERBOUGHT,  RSI < 30 => OVERSOLD.
// =============================================================================

use super::sma::calculate_sma;

/// Compute the RSI series for `closes`, index-aligned.
///
/// The first value is available at index `period - 1`.
///
/// # Edge cases
/// - `period == 0` => every entry `None`
/// - average loss is zero, average gain positive => 100.0
/// - both averages zero (no movement in the window) => 50.0
pub fn calculate_rsi(closes: &[f64], period: usize) -> Vec<Option<f64>> {
    let (gains, losses): (Vec<f64>, Vec<f64>) = std::iter::once(0.0)
        .chain(closes.windows(2).map(|w| w[1] - w[0]))
        .take(closes.len())
        .map(|delta| (delta.max(0.0), (-delta).max(0.0)))
        .unzip();

    let avg_gains = calculate_sma(&gains, period);
    let avg_losses = calculate_sma(&losses, period);

    avg_gains
        .into_iter()
        .zip(avg_losses)
        .map(|(gain, loss)| rsi_from_averages(gain?, loss?))
        .collect()
}

/// Human-readable zone for an RSI value.
pub fn rsi_zone(value: f64) -> &'static str {
    if value > 70.0 {
        "OVERBOUGHT"
    } else if value < 30.0 {
        "OVERSOLD"
    } else {
        "NEUTRAL"
    }
}

// =============================================================================
// Internal helpers
// =============================================================================

/// Convert average gain / average loss into an RSI value in [0, 100].
///
/// - If both averages are zero, RSI is 50.0 (no movement).
/// - If average loss is zero (only gains), RSI is 100.0.
/// - Returns `None` when the result is non-finite.
fn rsi_from_averages(avg_gain: f64, avg_loss: f64) -> Option<f64> {
    let rsi = if avg_loss == 0.0 && avg_gain == 0.0 {
        50.0 // No movement at all, neutral.
    } else if avg_loss == 0.0 {
        100.0 // All gains, no losses.
    } else {
        let rs = avg_gain / avg_loss;
        100.0 - 100.0 / (1.0 + rs)
    };

    rsi.is_finite().then_some(rsi)
}
