use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use tracing::info;

use crate::atomic_file::write_atomically;
use crate::gap_fill::FilledSeries;

/// Write the gap-filled series as CSV, one row per date, header included.
pub fn write_series<W: Write>(series: &FilledSeries, writer: W) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    for record in series.records() {
        wtr.serialize(record)
            .with_context(|| format!("failed to serialise record for {}", record.date))?;
    }
    wtr.flush().context("failed to flush csv writer")?;
    Ok(())
}

/// Export the gap-filled series to `path` for charting, replacing any
/// previous export atomically.
pub fn export_series(series: &FilledSeries, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    write_atomically(path, |file| write_series(series, file))?;

    info!(path = %path.display(), rows = series.len(), "indicator series exported");
    Ok(())
}
