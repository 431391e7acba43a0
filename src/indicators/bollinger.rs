// =============================================================================
// Bollinger Bands
// =============================================================================
//
// Bollinger Bands consist of a middle band (SMA), an upper band (SMA + k*σ),
// and a lower band (SMA - k*σ).  σ is the *sample* standard deviation of the
// window (divisor w - 1).  Width here is the absolute distance between the
// bands: width = upper - lower = 2kσ.
// =============================================================================

use super::is_flat;
use super::sma::rolling;

/// Bands for a single index.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BollingerBand {
    pub middle: f64,
    pub std_dev: f64,
    pub upper: f64,
    pub lower: f64,
    pub width: f64,
}

/// Rolling sample standard deviation (ddof = 1), index-aligned.
///
/// A window of one value has no sample deviation, so `period < 2` yields
/// `None` everywhere.  Deviations that are pure rounding noise relative to the
/// window mean are reported as exactly `0.0`.
pub fn rolling_std(values: &[f64], period: usize) -> Vec<Option<f64>> {
    if period < 2 {
        return vec![None; values.len()];
    }

    rolling(values, period, |window| {
        let n = window.len() as f64;
        let mean = window.iter().sum::<f64>() / n;
        let variance = window.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / (n - 1.0);
        let std_dev = variance.sqrt();
        if is_flat(std_dev, mean) {
            Some(0.0)
        } else {
            Some(std_dev)
        }
    })
}

/// Calculate Bollinger Bands for every index of `closes`.
///
/// Entries before index `period - 1` are `None`.  Because σ ≥ 0 the width is
/// never negative.
pub fn calculate_bollinger(
    closes: &[f64],
    period: usize,
    num_std: f64,
) -> Vec<Option<BollingerBand>> {
    let middles = super::sma::calculate_sma(closes, period);
    let stds = rolling_std(closes, period);

    middles
        .into_iter()
        .zip(stds)
        .map(|(middle, std_dev)| {
            let (middle, std_dev) = (middle?, std_dev?);
            let upper = middle + num_std * std_dev;
            let lower = middle - num_std * std_dev;
            Some(BollingerBand {
                middle,
                std_dev,
                upper,
                lower,
                width: upper - lower,
            })
        })
        .collect()
}
