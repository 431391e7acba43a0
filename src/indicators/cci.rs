// =============================================================================
// Commodity Channel Index (CCI)
// =============================================================================
//
// CCI measures how far the typical price has moved from its rolling mean,
// normalised by the rolling *mean absolute deviation* (not the std):
//
//   TP   = (high + low + close) / 3
//   MAD  = mean(|TP_j - mean(TP)|)   over the trailing window
//   CCI  = (TP_t - SMA(TP)_t) / (0.015 * MAD_t)
//
// A flat window has MAD = 0; CCI is then undefined instead of ±∞ or NaN.
// CCI is unbounded by design.
// =============================================================================

use super::is_flat;
use super::sma::{calculate_sma, rolling};

/// Lambert's constant; scales CCI so most values land in ±100.
pub const CCI_CONSTANT: f64 = 0.015;

/// Rolling mean absolute deviation around the window mean, index-aligned.
///
/// Deviations that are pure rounding noise relative to the window mean are
/// reported as exactly `0.0`.
pub fn mean_absolute_deviation(values: &[f64], period: usize) -> Vec<Option<f64>> {
    rolling(values, period, |window| {
        let n = window.len() as f64;
        let mean = window.iter().sum::<f64>() / n;
        let mad = window.iter().map(|x| (x - mean).abs()).sum::<f64>() / n;
        if is_flat(mad, mean) {
            Some(0.0)
        } else {
            Some(mad)
        }
    })
}

/// Compute CCI over `typical_prices` for `period`.
///
/// # Edge cases
/// - indices `< period - 1` => `None`
/// - MAD == 0 (flat window) => `None`
pub fn calculate_cci(typical_prices: &[f64], period: usize) -> Vec<Option<f64>> {
    let means = calculate_sma(typical_prices, period);
    let mads = mean_absolute_deviation(typical_prices, period);

    typical_prices
        .iter()
        .zip(means)
        .zip(mads)
        .map(|((&tp, mean), mad)| {
            let (mean, mad) = (mean?, mad?);
            if mad == 0.0 {
                return None;
            }
            let cci = (tp - mean) / (CCI_CONSTANT * mad);
            cci.is_finite().then_some(cci)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mad_known_values() {
        // mean 2.5, |dev| = 1.5, 0.5, 0.5, 1.5 => MAD 1.0
        let mad = mean_absolute_deviation(&[1.0, 2.0, 3.0, 4.0], 4);
        assert_eq!(mad[3], Some(1.0));
    }

    #[test]
    fn mad_is_not_std() {
        let values = [1.0, 1.0, 1.0, 5.0];
        let mad = mean_absolute_deviation(&values, 4)[3].unwrap();
        // mean 2, deviations 1,1,1,3 => 1.5 ; sample std would be 2.0
        assert!((mad - 1.5).abs() < 1e-12);
    }

    #[test]
    fn cci_known_value() {
        // TP window [1,2,3,4]: mean 2.5, MAD 1.0, last TP 4
        // CCI = 1.5 / 0.015 = 100
        let cci = calculate_cci(&[1.0, 2.0, 3.0, 4.0], 4);
        assert!(cci[..3].iter().all(Option::is_none));
        assert!((cci[3].unwrap() - 100.0).abs() < 1e-9);
    }

    #[test]
    fn cci_flat_window_is_undefined() {
        let tp = [(80.05 + 79.95 + 80.0) / 3.0; 60];
        let cci = calculate_cci(&tp, 20);
        assert_eq!(cci.len(), 60);
        assert!(cci.iter().all(Option::is_none));
    }

    #[test]
    fn cci_sign_follows_trend() {
        let rising: Vec<f64> = (0..40).map(|i| 100.0 + i as f64).collect();
        let falling: Vec<f64> = rising.iter().rev().copied().collect();
        assert!(calculate_cci(&rising, 20)[39].unwrap() > 0.0);
        assert!(calculate_cci(&falling, 20)[39].unwrap() < 0.0);
    }

    #[test]
    fn cci_linear_trend_value() {
        // Linear window 0..19 (step 1): mean 9.5, MAD 5.0, last 19
        // CCI = 9.5 / (0.015 * 5) = 126.666...
        let values: Vec<f64> = (0..20).map(|i| i as f64).collect();
        let cci = calculate_cci(&values, 20)[19].unwrap();
        assert!((cci - 9.5 / 0.075).abs() < 1e-9);
    }
}
