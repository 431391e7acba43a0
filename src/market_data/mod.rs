pub mod bar;
pub mod csv_export;
pub mod csv_loader;

// Re-export for convenient access (e.g. `use crate::market_data::BarSeries`).
pub use bar::BarSeries;
