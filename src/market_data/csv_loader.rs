use std::fs::File;
use std::io::Read;
use std::path::Path;

use chrono::NaiveDate;
use csv::{ReaderBuilder, StringRecord, Trim};
use tracing::{debug, info, warn};

use super::bar::{Bar, BarSeries};
use crate::error::SeriesError;

// ---------------------------------------------------------------------------
// Column layout
// ---------------------------------------------------------------------------

/// Positions of the price columns in the header row.
#[derive(Debug, Clone, Copy)]
struct Columns {
    open: Option<usize>,
    high: usize,
    low: usize,
    close: usize,
    volume: Option<usize>,
}

impl Columns {
    /// Locate columns by (case-insensitive) name.  The date is always column 0.
    fn from_headers(headers: &StringRecord) -> Result<Self, SeriesError> {
        let find = |name: &str| headers.iter().position(|h| h.eq_ignore_ascii_case(name));
        let require = |name: &'static str| {
            find(name).ok_or(SeriesError::MissingColumn { column: name })
        };

        Ok(Self {
            open: find("open"),
            high: require("high")?,
            low: require("low")?,
            close: require("close")?,
            volume: find("volume"),
        })
    }
}

// ---------------------------------------------------------------------------
// Loading
// ---------------------------------------------------------------------------

/// Load a daily bar history from a CSV file at `path`.
///
/// Accepts both the flat `Date,Open,High,Low,Close,...` layout and the
/// multi-index export whose header is followed by `Ticker,...` / `Date,,,`
/// rows.  The resulting series is fully validated.
pub fn load_bars(path: impl AsRef<Path>) -> Result<BarSeries, SeriesError> {
    let path = path.as_ref();
    let file = File::open(path)?;
    let series = read_bars(file)?;

    if series.is_empty() {
        warn!(path = %path.display(), "bar history is empty, decision will be undetermined");
        return Ok(series);
    }

    info!(
        path = %path.display(),
        bars = series.len(),
        first = ?series.bars().first().map(|b| b.date),
        last = ?series.last().map(|b| b.date),
        "bar history loaded"
    );

    Ok(series)
}

/// Parse bars from any CSV reader.  See [`load_bars`].
pub fn read_bars<R: Read>(reader: R) -> Result<BarSeries, SeriesError> {
    let mut rdr = ReaderBuilder::new()
        .flexible(true)
        .trim(Trim::All)
        .from_reader(reader);

    let columns = Columns::from_headers(rdr.headers()?)?;
    debug!(?columns, "csv columns resolved");

    let mut bars = Vec::new();
    let mut skipped = 0usize;

    for (i, result) in rdr.records().enumerate() {
        let record = result?;
        // Header is line 1.
        let row = i + 2;

        let Some(date) = parse_date(&record, row)? else {
            skipped += 1;
            continue;
        };

        let close = required(&record, columns.close, row, "close")?;
        let open = match columns.open {
            Some(idx) => optional(&record, idx, row, "open")?.unwrap_or(close),
            None => close,
        };

        bars.push(Bar {
            date,
            open,
            high: required(&record, columns.high, row, "high")?,
            low: required(&record, columns.low, row, "low")?,
            close,
            volume: match columns.volume {
                Some(idx) => optional(&record, idx, row, "volume")?,
                None => None,
            },
        });
    }

    if skipped > 0 {
        debug!(skipped, "non-data rows skipped");
    }

    BarSeries::new(bars)
}

/// Parse the date in column 0.
///
/// Returns `Ok(None)` for rows that are not data rows (empty first cell or one
/// that does not start with a digit, e.g. `Ticker` / `Date` sub-headers).
fn parse_date(record: &StringRecord, row: usize) -> Result<Option<NaiveDate>, SeriesError> {
    let cell = record.get(0).unwrap_or("");
    if !cell.starts_with(|c: char| c.is_ascii_digit()) {
        return Ok(None);
    }

    // Drop any time part: "2023-01-02 00:00:00+00:00" or "2023-01-02T00:00:00".
    let day = cell.split([' ', 'T']).next().unwrap_or(cell);

    NaiveDate::parse_from_str(day, "%Y-%m-%d")
        .map(Some)
        .map_err(|_| SeriesError::InvalidDate {
            row,
            value: cell.to_string(),
        })
}

fn optional(
    record: &StringRecord,
    idx: usize,
    row: usize,
    field: &'static str,
) -> Result<Option<f64>, SeriesError> {
    let cell = record.get(idx).unwrap_or("");
    if cell.is_empty() {
        return Ok(None);
    }
    cell.parse::<f64>()
        .map(Some)
        .map_err(|_| SeriesError::InvalidNumber {
            row,
            field,
            value: cell.to_string(),
        })
}

fn required(
    record: &StringRecord,
    idx: usize,
    row: usize,
    field: &'static str,
) -> Result<f64, SeriesError> {
    optional(record, idx, row, field)?.ok_or(SeriesError::MissingField { row, field })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const FLAT: &str = "\
Date,Open,High,Low,Close,Adj Close,Volume
2023-01-02,88.10,88.70,87.90,88.40,88.40,0
2023-01-03,88.40,88.90,88.00,88.05,88.05,
2023-01-04,88.05,88.30,87.50,87.60,87.60,0
";

    const MULTI_INDEX: &str = "\
Price,Close,High,Low,Open,Volume
Ticker,EURINR=X,EURINR=X,EURINR=X,EURINR=X,EURINR=X
Date,,,,,
2023-01-02 00:00:00+00:00,88.40,88.70,87.90,88.10,0
2023-01-03 00:00:00+00:00,88.05,88.90,88.00,88.40,0
";

    #[test]
    fn reads_flat_layout() {
        let series = read_bars(FLAT.as_bytes()).unwrap();
        assert_eq!(series.len(), 3);
        let first = &series.bars()[0];
        assert_eq!(first.date, NaiveDate::from_ymd_opt(2023, 1, 2).unwrap());
        assert_eq!(first.open, 88.10);
        assert_eq!(first.close, 88.40);
        assert_eq!(first.volume, Some(0.0));
        assert_eq!(series.bars()[1].volume, None);
    }

    #[test]
    fn adj_close_is_not_close() {
        let csv = "Date,High,Low,Adj Close\n2023-01-02,2,1,1.5\n";
        let err = read_bars(csv.as_bytes()).unwrap_err();
        assert!(matches!(err, SeriesError::MissingColumn { column: "close" }));
    }

    #[test]
    fn reads_multi_index_layout() {
        let series = read_bars(MULTI_INDEX.as_bytes()).unwrap();
        assert_eq!(series.len(), 2);
        let last = series.last().unwrap();
        assert_eq!(last.date, NaiveDate::from_ymd_opt(2023, 1, 3).unwrap());
        assert_eq!(last.close, 88.05);
        assert_eq!(last.open, 88.40);
    }

    #[test]
    fn missing_required_column() {
        let csv = "Date,Open,High,Close\n2023-01-02,1,2,1.5\n";
        let err = read_bars(csv.as_bytes()).unwrap_err();
        assert!(matches!(err, SeriesError::MissingColumn { column: "low" }));
    }

    #[test]
    fn missing_open_falls_back_to_close() {
        let csv = "Date,High,Low,Close\n2023-01-02,2,1,1.5\n";
        let series = read_bars(csv.as_bytes()).unwrap();
        assert_eq!(series.bars()[0].open, 1.5);
        assert_eq!(series.bars()[0].volume, None);
    }

    #[test]
    fn empty_required_cell_is_fatal() {
        let csv = "Date,High,Low,Close\n2023-01-02,2,1,1.5\n2023-01-03,2,,1.5\n";
        let err = read_bars(csv.as_bytes()).unwrap_err();
        assert!(matches!(
            err,
            SeriesError::MissingField { row: 3, field: "low" }
        ));
    }

    #[test]
    fn bad_number_is_reported() {
        let csv = "Date,High,Low,Close\n2023-01-02,2,1,abc\n";
        let err = read_bars(csv.as_bytes()).unwrap_err();
        assert!(matches!(err, SeriesError::InvalidNumber { field: "close", .. }));
    }

    #[test]
    fn bad_date_is_reported() {
        let csv = "Date,High,Low,Close\n2023-13-45,2,1,1.5\n";
        let err = read_bars(csv.as_bytes()).unwrap_err();
        assert!(matches!(err, SeriesError::InvalidDate { row: 2, .. }));
    }

    #[test]
    fn unordered_rows_are_rejected() {
        let csv = "Date,High,Low,Close\n2023-01-03,2,1,1.5\n2023-01-02,2,1,1.5\n";
        let err = read_bars(csv.as_bytes()).unwrap_err();
        assert!(matches!(err, SeriesError::UnorderedDates { .. }));
    }

    #[test]
    fn header_only_gives_empty_series() {
        let series = read_bars("Date,High,Low,Close\n".as_bytes()).unwrap();
        assert!(series.is_empty());
    }

    #[test]
    fn load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(FLAT.as_bytes()).unwrap();
        let series = load_bars(file.path()).unwrap();
        assert_eq!(series.len(), 3);
    }

    #[test]
    fn load_header_only_file_is_empty_not_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"Date,Open,High,Low,Close\n").unwrap();
        let series = load_bars(file.path()).unwrap();
        assert!(series.is_empty());
        assert!(series.last().is_none());
    }

    #[test]
    fn missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_bars(dir.path().join("nope.csv")).unwrap_err();
        assert!(matches!(err, SeriesError::Io(_)));
    }
}
