// =============================================================================
// Signal Report: auditable record of the latest indicators and the decision
// =============================================================================
//
// Every run produces exactly one report.  Scalar fields are `Option` so that a
// report for an empty history (UNDETERMINED) is still well-formed; for any
// non-empty series they are all populated.
// =============================================================================

use chrono::NaiveDate;
use serde::Serialize;

use crate::decision::{Evaluation, RuleVerdict};
use crate::gap_fill::FilledRecord;
use crate::indicators::rsi::rsi_zone;
use crate::types::Decision;

/// Latest-date indicator snapshot with the decision and rule verdicts.
#[derive(Debug, Clone, Serialize)]
pub struct SignalReport {
    /// Unique identifier for this report (UUID v4).
    pub id: String,

    /// Currency pair the report pertains to.
    pub symbol: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub as_of: Option<NaiveDate>,

    pub close: Option<f64>,
    pub sma20: Option<f64>,
    pub sma50: Option<f64>,
    pub ema10: Option<f64>,
    pub upper_band: Option<f64>,
    pub lower_band: Option<f64>,
    pub band_width: Option<f64>,
    pub mean_band_width: Option<f64>,
    pub cci20: Option<f64>,
    pub cci50: Option<f64>,
    pub rsi14: Option<f64>,

    pub decision: Decision,

    pub buy_rules: Vec<RuleVerdict>,
    pub sell_rules: Vec<RuleVerdict>,

    /// ISO 8601 timestamp of when this report was created.
    pub generated_at: String,
}

impl SignalReport {
    /// Build the report for `latest` (if any) and its evaluation.
    pub fn new(
        symbol: impl Into<String>,
        latest: Option<&FilledRecord>,
        evaluation: &Evaluation,
    ) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            symbol: symbol.into(),
            as_of: latest.map(|r| r.date),
            close: latest.map(|r| r.close),
            sma20: latest.map(|r| r.sma20),
            sma50: latest.map(|r| r.sma50),
            ema10: latest.map(|r| r.ema10),
            upper_band: latest.map(|r| r.upper_band),
            lower_band: latest.map(|r| r.lower_band),
            band_width: latest.map(|r| r.band_width),
            mean_band_width: evaluation.mean_band_width,
            cci20: latest.map(|r| r.cci20),
            cci50: latest.map(|r| r.cci50),
            rsi14: latest.map(|r| r.rsi14),
            decision: evaluation.decision,
            buy_rules: evaluation.buy_rules.clone(),
            sell_rules: evaluation.sell_rules.clone(),
            generated_at: chrono::Utc::now().to_rfc3339(),
        }
    }

    /// Human-readable block, one line per value.
    pub fn render_lines(&self) -> Vec<String> {
        let mut lines = Vec::with_capacity(16);

        match self.as_of {
            Some(date) => lines.push(format!("{} indicators on {date}", self.symbol)),
            None => lines.push(format!("{}: no data", self.symbol)),
        }

        let values = [
            ("Close Price", self.close),
            ("20-SMA", self.sma20),
            ("50-SMA", self.sma50),
            ("10-EMA", self.ema10),
            ("Bollinger Upper Band", self.upper_band),
            ("Bollinger Lower Band", self.lower_band),
            ("Bollinger Band Width", self.band_width),
            ("Mean Band Width", self.mean_band_width),
            ("CCI 20-day", self.cci20),
            ("CCI 50-day", self.cci50),
        ];
        for (label, value) in values {
            if let Some(v) = value {
                lines.push(format!("{label}: {v:.4}"));
            }
        }
        if let Some(rsi) = self.rsi14 {
            lines.push(format!("RSI: {rsi:.2} ({})", rsi_zone(rsi)));
        }

        lines.push(format!("Decision: {}", self.decision));
        lines
    }
}
