// =============================================================================
// Simple Moving Average (SMA)
// =============================================================================
//
//   SMA_t = (x_{t-w+1} + ... + x_t) / w
//
// Defined from index `w - 1` onward.  Each window is summed directly rather
// than with a running total so that constant inputs produce exactly constant
// output (no accumulated rounding drift).
// =============================================================================

/// Rolling arithmetic mean of `values` over `period`, index-aligned.
///
/// # Edge cases
/// - `period == 0` => every entry `None`
/// - indices `< period - 1` => `None`
pub fn calculate_sma(values: &[f64], period: usize) -> Vec<Option<f64>> {
    rolling(values, period, |window| {
        Some(window.iter().sum::<f64>() / window.len() as f64)
    })
}

/// Apply `f` to every full trailing window of `period` values.
///
/// The output has one entry per input; entries whose window is incomplete are
/// `None`, as are entries for which `f` itself returns `None`.
pub(crate) fn rolling<F>(values: &[f64], period: usize, f: F) -> Vec<Option<f64>>
where
    F: Fn(&[f64]) -> Option<f64>,
{
    if period == 0 {
        return vec![None; values.len()];
    }

    (0..values.len())
        .map(|i| {
            if i + 1 < period {
                None
            } else {
                f(&values[i + 1 - period..=i])
            }
        })
        .collect()
}
