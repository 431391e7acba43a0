use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::SeriesError;

// ---------------------------------------------------------------------------
// Data types
// ---------------------------------------------------------------------------

/// A single daily OHLC bar for the tracked currency pair.
///
/// `open` and `close` are not required to sit inside `[low, high]`; real feeds
/// occasionally violate that and nothing downstream relies on it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bar {
    pub date: NaiveDate,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: Option<f64>,
}

impl Bar {
    /// (high + low + close) / 3.
    pub fn typical_price(&self) -> f64 {
        (self.high + self.low + self.close) / 3.0
    }
}

// ---------------------------------------------------------------------------
// BarSeries -- validated, date-ordered history
// ---------------------------------------------------------------------------

/// Ordered daily history with strictly increasing dates.
///
/// The only way to build one is [`BarSeries::new`], so every instance upholds
/// the ordering and finiteness invariants.  An empty series is allowed; the
/// pipeline turns it into an undetermined decision.
#[derive(Debug, Clone, Default)]
pub struct BarSeries {
    bars: Vec<Bar>,
}

impl BarSeries {
    /// Validate `bars` and wrap them.
    ///
    /// Fails on the first bar that has a non-finite field, `high < low`,
    /// `low < 0`, or a date that does not strictly follow its predecessor.
    pub fn new(bars: Vec<Bar>) -> Result<Self, SeriesError> {
        let mut previous: Option<NaiveDate> = None;

        for bar in &bars {
            let fields = [
                ("open", bar.open),
                ("high", bar.high),
                ("low", bar.low),
                ("close", bar.close),
            ];
            for (field, value) in fields {
                if !value.is_finite() {
                    return Err(SeriesError::NonFinite {
                        date: bar.date,
                        field,
                    });
                }
            }
            if let Some(volume) = bar.volume {
                if !volume.is_finite() {
                    return Err(SeriesError::NonFinite {
                        date: bar.date,
                        field: "volume",
                    });
                }
            }

            if bar.high < bar.low || bar.low < 0.0 {
                return Err(SeriesError::InvalidRange {
                    date: bar.date,
                    high: bar.high,
                    low: bar.low,
                });
            }

            if let Some(prev) = previous {
                if bar.date <= prev {
                    return Err(SeriesError::UnorderedDates {
                        previous: prev,
                        current: bar.date,
                    });
                }
            }
            previous = Some(bar.date);
        }

        Ok(Self { bars })
    }

    pub fn bars(&self) -> &[Bar] {
        &self.bars
    }

    pub fn len(&self) -> usize {
        self.bars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    /// Close prices, oldest first.
    pub fn closes(&self) -> Vec<f64> {
        self.bars.iter().map(|b| b.close).collect()
    }

    /// Typical prices, oldest first.
    pub fn typical_prices(&self) -> Vec<f64> {
        self.bars.iter().map(Bar::typical_price).collect()
    }

    pub fn last(&self) -> Option<&Bar> {
        self.bars.last()
    }
}

// ---------------------------------------------------------------------------
// Test helpers shared by the indicator and pipeline tests
// ---------------------------------------------------------------------------

/// Build a daily series from closes, using a symmetric `spread` for high/low.
#[cfg(test)]
pub fn series_from_closes(closes: &[f64], spread: f64) -> BarSeries {
    let start = NaiveDate::from_ymd_opt(2023, 1, 2).unwrap();
    let bars = closes
        .iter()
        .enumerate()
        .map(|(i, &close)| Bar {
            date: start + chrono::Duration::days(i as i64),
            open: close,
            high: close + spread,
            low: close - spread,
            close,
            volume: None,
        })
        .collect();
    BarSeries::new(bars).unwrap()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bar(day: u32, high: f64, low: f64, close: f64) -> Bar {
        Bar {
            date: NaiveDate::from_ymd_opt(2024, 3, day).unwrap(),
            open: close,
            high,
            low,
            close,
            volume: Some(1000.0),
        }
    }

    #[test]
    fn accepts_ordered_series() {
        let series = BarSeries::new(vec![bar(1, 2.0, 1.0, 1.5), bar(2, 2.5, 1.5, 2.0)]).unwrap();
        assert_eq!(series.len(), 2);
        assert_eq!(series.closes(), vec![1.5, 2.0]);
    }

    #[test]
    fn accepts_empty_series() {
        assert!(BarSeries::new(Vec::new()).unwrap().is_empty());
    }

    #[test]
    fn close_outside_range_is_allowed() {
        // Real feeds sometimes print a close above the high.
        assert!(BarSeries::new(vec![bar(1, 2.0, 1.0, 2.2)]).is_ok());
    }

    #[test]
    fn rejects_duplicate_dates() {
        let err = BarSeries::new(vec![bar(1, 2.0, 1.0, 1.5), bar(1, 2.0, 1.0, 1.5)]).unwrap_err();
        assert!(matches!(err, SeriesError::UnorderedDates { .. }));
    }

    #[test]
    fn rejects_decreasing_dates() {
        let err = BarSeries::new(vec![bar(5, 2.0, 1.0, 1.5), bar(4, 2.0, 1.0, 1.5)]).unwrap_err();
        assert!(matches!(err, SeriesError::UnorderedDates { .. }));
    }

    #[test]
    fn rejects_inverted_range() {
        let err = BarSeries::new(vec![bar(1, 1.0, 2.0, 1.5)]).unwrap_err();
        assert!(matches!(err, SeriesError::InvalidRange { .. }));
    }

    #[test]
    fn rejects_negative_low() {
        let err = BarSeries::new(vec![bar(1, 1.0, -0.5, 0.5)]).unwrap_err();
        assert!(matches!(err, SeriesError::InvalidRange { .. }));
    }

    #[test]
    fn rejects_nan_close() {
        let nan_close = Bar {
            close: f64::NAN,
            ..bar(1, 2.0, 1.0, 1.5)
        };
        let err = BarSeries::new(vec![nan_close]).unwrap_err();
        assert!(matches!(err, SeriesError::NonFinite { field: "close", .. }));
    }

    #[test]
    fn rejects_non_finite_high_and_low() {
        let nan_high = Bar {
            high: f64::NAN,
            ..bar(1, 2.0, 1.0, 1.5)
        };
        let err = BarSeries::new(vec![nan_high]).unwrap_err();
        assert!(matches!(err, SeriesError::NonFinite { field: "high", .. }));

        let inf_low = Bar {
            low: f64::INFINITY,
            ..bar(1, 2.0, 1.0, 1.5)
        };
        let err = BarSeries::new(vec![inf_low]).unwrap_err();
        assert!(matches!(err, SeriesError::NonFinite { field: "low", .. }));
    }

    #[test]
    fn rejects_nan_volume() {
        let nan_volume = Bar {
            volume: Some(f64::NAN),
            ..bar(1, 2.0, 1.0, 1.5)
        };
        let err = BarSeries::new(vec![nan_volume]).unwrap_err();
        assert!(matches!(err, SeriesError::NonFinite { field: "volume", .. }));
    }

    #[test]
    fn typical_price_is_hlc_mean() {
        let b = bar(1, 3.0, 1.0, 2.0);
        assert!((b.typical_price() - 2.0).abs() < 1e-12);
    }
}
