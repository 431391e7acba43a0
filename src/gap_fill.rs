// =============================================================================
// Gap Filler: no undefined value reaches the decision stage
// =============================================================================
//
// Each field is treated as its own column:
//   1. forward fill : copy the nearest earlier defined value forward
//   2. backward fill: the still-empty leading run takes the first defined value
//   3. fallback     : a column with no defined value at all takes a neutral
//                      per-record value (close for price levels, 0 for
//                      dispersion and CCI, 50 for RSI)
//
// The input series is left untouched; a new fully-defined series is returned.
// =============================================================================

use chrono::NaiveDate;
use serde::Serialize;
use tracing::debug;

use crate::indicator_engine::{IndicatorRecord, IndicatorSeries};

/// Neutral RSI used when a series never produces a defined RSI.
const NEUTRAL_RSI: f64 = 50.0;

/// An [`IndicatorRecord`] with every field defined.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FilledRecord {
    pub date: NaiveDate,
    pub close: f64,
    pub sma20: f64,
    pub sma50: f64,
    pub ema10: f64,
    pub middle_band: f64,
    pub std_dev20: f64,
    pub upper_band: f64,
    pub lower_band: f64,
    pub band_width: f64,
    pub typical_price: f64,
    pub cci20: f64,
    pub cci50: f64,
    pub rsi14: f64,
}

/// Gap-filled indicator history.  Immutable once built.
#[derive(Debug, Clone, Default)]
pub struct FilledSeries {
    records: Vec<FilledRecord>,
}

impl FilledSeries {
    pub fn records(&self) -> &[FilledRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Record for the most recent date.
    pub fn latest(&self) -> Option<&FilledRecord> {
        self.records.last()
    }

    /// Arithmetic mean of `band_width` over the whole series.
    pub fn mean_band_width(&self) -> Option<f64> {
        if self.is_empty() {
            return None;
        }
        let sum: f64 = self.records.iter().map(|r| r.band_width).sum();
        Some(sum / self.records.len() as f64)
    }
}

/// How a column with no defined value at all is resolved.
#[derive(Clone, Copy)]
enum Fallback {
    Close,
    Value(f64),
}

/// Forward-fill then back-fill a single column.
///
/// Returns `None` only when no entry of `column` is defined.
fn fill_column(column: &[Option<f64>]) -> Option<Vec<f64>> {
    let first = column.iter().find_map(|v| *v)?;

    let mut last = first;
    let filled = column
        .iter()
        .map(|v| {
            if let Some(v) = v {
                last = *v;
            }
            last
        })
        .collect();

    Some(filled)
}

/// Extract one field as a column and fill it, falling back when the whole
/// column is undefined.
fn fill_field<F>(
    records: &[IndicatorRecord],
    name: &'static str,
    get: F,
    fallback: Fallback,
) -> Vec<f64>
where
    F: Fn(&IndicatorRecord) -> Option<f64>,
{
    let values: Vec<Option<f64>> = records.iter().map(get).collect();
    fill_column(&values).unwrap_or_else(|| {
        debug!(field = name, "no defined value in series, using fallback");
        match fallback {
            Fallback::Close => records.iter().map(|r| r.close).collect(),
            Fallback::Value(v) => vec![v; records.len()],
        }
    })
}

/// Fill every undefined field of `series`.
///
/// After filling, every field of every record is defined; an empty input gives
/// an empty output.
pub fn fill_gaps(series: &IndicatorSeries) -> FilledSeries {
    if series.is_empty() {
        return FilledSeries::default();
    }
    let records = series.records();

    let sma20 = fill_field(records, "sma20", |r| r.sma20, Fallback::Close);
    let sma50 = fill_field(records, "sma50", |r| r.sma50, Fallback::Close);
    let middle = fill_field(records, "middle_band", |r| r.middle_band, Fallback::Close);
    let std_dev = fill_field(records, "std_dev20", |r| r.std_dev20, Fallback::Value(0.0));
    let upper = fill_field(records, "upper_band", |r| r.upper_band, Fallback::Close);
    let lower = fill_field(records, "lower_band", |r| r.lower_band, Fallback::Close);
    let width = fill_field(records, "band_width", |r| r.band_width, Fallback::Value(0.0));
    let cci20 = fill_field(records, "cci20", |r| r.cci20, Fallback::Value(0.0));
    let cci50 = fill_field(records, "cci50", |r| r.cci50, Fallback::Value(0.0));
    let rsi14 = fill_field(records, "rsi14", |r| r.rsi14, Fallback::Value(NEUTRAL_RSI));

    let filled = records
        .iter()
        .enumerate()
        .map(|(i, rec)| FilledRecord {
            date: rec.date,
            close: rec.close,
            sma20: sma20[i],
            sma50: sma50[i],
            ema10: rec.ema10,
            middle_band: middle[i],
            std_dev20: std_dev[i],
            upper_band: upper[i],
            lower_band: lower[i],
            band_width: width[i],
            typical_price: rec.typical_price,
            cci20: cci20[i],
            cci50: cci50[i],
            rsi14: rsi14[i],
        })
        .collect();

    FilledSeries { records: filled }
}
