// =============================================================================
// Indicator Engine: bars in, one indicator record per date out
// =============================================================================
//
// Runs every indicator over the full history and assembles the columns into
// date-keyed records.  Fields that are still warming up (or are numerically
// degenerate) are `None`; the gap filler resolves them afterwards.
// =============================================================================

use chrono::NaiveDate;
use tracing::debug;

use crate::indicators::bollinger::calculate_bollinger;
use crate::indicators::cci::calculate_cci;
use crate::indicators::ema::calculate_ema;
use crate::indicators::rsi::calculate_rsi;
use crate::indicators::sma::calculate_sma;
use crate::indicators::{
    BOLLINGER_NUM_STD, BOLLINGER_PERIOD, CCI_LONG_PERIOD, CCI_SHORT_PERIOD, EMA_SPAN,
    RSI_PERIOD, SMA_LONG_PERIOD, SMA_SHORT_PERIOD,
};
use crate::market_data::BarSeries;

/// Indicator values for a single date.
///
/// `ema10` and `typical_price` are defined from the first bar; every other
/// field may be `None`.
#[derive(Debug, Clone, PartialEq)]
pub struct IndicatorRecord {
    pub date: NaiveDate,
    pub close: f64,
    pub sma20: Option<f64>,
    pub sma50: Option<f64>,
    pub ema10: f64,
    pub middle_band: Option<f64>,
    pub std_dev20: Option<f64>,
    pub upper_band: Option<f64>,
    pub lower_band: Option<f64>,
    pub band_width: Option<f64>,
    pub typical_price: f64,
    pub cci20: Option<f64>,
    pub cci50: Option<f64>,
    pub rsi14: Option<f64>,
}

/// Records index-aligned with the source [`BarSeries`].
#[derive(Debug, Clone, Default)]
pub struct IndicatorSeries {
    records: Vec<IndicatorRecord>,
}

impl IndicatorSeries {
    pub fn records(&self) -> &[IndicatorRecord] {
        &self.records
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl From<Vec<IndicatorRecord>> for IndicatorSeries {
    fn from(records: Vec<IndicatorRecord>) -> Self {
        Self { records }
    }
}

/// Compute every indicator for `series`.
///
/// The result has exactly `series.len()` records with matching dates.
pub fn compute_indicators(series: &BarSeries) -> IndicatorSeries {
    let closes = series.closes();
    let typical = series.typical_prices();

    let sma20 = calculate_sma(&closes, SMA_SHORT_PERIOD);
    let sma50 = calculate_sma(&closes, SMA_LONG_PERIOD);
    let ema10 = calculate_ema(&closes, EMA_SPAN);
    let bands = calculate_bollinger(&closes, BOLLINGER_PERIOD, BOLLINGER_NUM_STD);
    let cci20 = calculate_cci(&typical, CCI_SHORT_PERIOD);
    let cci50 = calculate_cci(&typical, CCI_LONG_PERIOD);
    let rsi14 = calculate_rsi(&closes, RSI_PERIOD);

    let records: Vec<IndicatorRecord> = series
        .bars()
        .iter()
        .enumerate()
        .map(|(i, bar)| {
            let band = bands[i];
            IndicatorRecord {
                date: bar.date,
                close: bar.close,
                sma20: sma20[i],
                sma50: sma50[i],
                ema10: ema10[i],
                middle_band: band.map(|b| b.middle),
                std_dev20: band.map(|b| b.std_dev),
                upper_band: band.map(|b| b.upper),
                lower_band: band.map(|b| b.lower),
                band_width: band.map(|b| b.width),
                typical_price: typical[i],
                cci20: cci20[i],
                cci50: cci50[i],
                rsi14: rsi14[i],
            }
        })
        .collect();

    debug!(
        bars = records.len(),
        first_sma50 = ?first_defined(&sma50),
        first_cci20 = ?first_defined(&cci20),
        first_rsi14 = ?first_defined(&rsi14),
        "indicators computed"
    );

    IndicatorSeries { records }
}

fn first_defined(values: &[Option<f64>]) -> Option<usize> {
    values.iter().position(Option::is_some)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::market_data::bar::series_from_closes;

    fn wave(n: usize) -> Vec<f64> {
        (0..n)
            .map(|i| 80.0 + (i as f64 * 0.3).sin() * 1.5 + i as f64 * 0.02)
            .collect()
    }

    #[test]
    fn empty_series_gives_empty_indicators() {
        let out = compute_indicators(&BarSeries::default());
        assert!(out.is_empty());
    }

    #[test]
    fn output_is_date_aligned() {
        let series = series_from_closes(&wave(75), 0.1);
        let out = compute_indicators(&series);
        assert_eq!(out.records().len(), series.len());
        for (bar, rec) in series.bars().iter().zip(out.records()) {
            assert_eq!(bar.date, rec.date);
            assert_eq!(bar.close, rec.close);
        }
    }

    #[test]
    fn warm_up_boundaries() {
        let out = compute_indicators(&series_from_closes(&wave(75), 0.1));
        let recs = out.records();

        assert!(recs[18].sma20.is_none() && recs[19].sma20.is_some());
        assert!(recs[48].sma50.is_none() && recs[49].sma50.is_some());
        assert!(recs[18].band_width.is_none() && recs[19].band_width.is_some());
        assert!(recs[18].cci20.is_none() && recs[19].cci20.is_some());
        assert!(recs[48].cci50.is_none() && recs[49].cci50.is_some());
        assert!(recs[12].rsi14.is_none() && recs[13].rsi14.is_some());
    }

    #[test]
    fn ema_starts_at_first_close() {
        let closes = wave(30);
        let out = compute_indicators(&series_from_closes(&closes, 0.1));
        assert_eq!(out.records()[0].ema10, closes[0]);
    }

    #[test]
    fn middle_band_equals_sma20() {
        let out = compute_indicators(&series_from_closes(&wave(60), 0.1));
        for rec in out.records() {
            assert_eq!(rec.middle_band, rec.sma20);
        }
    }

    #[test]
    fn no_look_ahead() {
        // Appending future bars must not change any earlier record.
        let closes = wave(80);
        let short = compute_indicators(&series_from_closes(&closes[..60], 0.1));
        let long = compute_indicators(&series_from_closes(&closes, 0.1));
        assert_eq!(short.records(), &long.records()[..60]);
    }

    #[test]
    fn flat_series_has_no_cci() {
        // high 80.05, low 79.95
        let out = compute_indicators(&series_from_closes(&[80.0; 60], 0.05));
        assert!(out.records().iter().all(|r| r.cci20.is_none() && r.cci50.is_none()));
        assert!(out.records()[13..].iter().all(|r| r.rsi14 == Some(50.0)));
        assert!(out.records()[19..].iter().all(|r| r.band_width == Some(0.0)));
    }
}
