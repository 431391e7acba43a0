// =============================================================================
// Decision Engine: threshold rules on the latest indicator record
// =============================================================================
//
// BUY  requires ALL of:
//   close > ema10, close > sma20, cci20 < -100, rsi14 < 30,
//   close <= lower band, band width > mean band width
//
// SELL requires ALL of:
//   close < ema10, close < sma20, cci20 > 100, rsi14 > 70,
//   close >= upper band, band width > mean band width
//
// BUY is checked first and wins if both sets ever hold at once.  Anything
// else is NEUTRAL.  An empty series is UNDETERMINED.
// =============================================================================

use serde::Serialize;
use tracing::{debug, info};

use crate::gap_fill::{FilledRecord, FilledSeries};
use crate::types::Decision;

pub const CCI_OVERSOLD: f64 = -100.0;
pub const CCI_OVERBOUGHT: f64 = 100.0;
pub const RSI_OVERSOLD: f64 = 30.0;
pub const RSI_OVERBOUGHT: f64 = 70.0;

/// Outcome of a single predicate within a rule set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RuleVerdict {
    pub rule: &'static str,
    pub passed: bool,
}

/// Both rule sets evaluated against one record, plus the resulting decision.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Evaluation {
    pub decision: Decision,
    pub mean_band_width: Option<f64>,
    pub buy_rules: Vec<RuleVerdict>,
    pub sell_rules: Vec<RuleVerdict>,
}

impl Evaluation {
    fn undetermined() -> Self {
        Self {
            decision: Decision::Undetermined,
            mean_band_width: None,
            buy_rules: Vec::new(),
            sell_rules: Vec::new(),
        }
    }
}

fn verdict(rule: &'static str, passed: bool) -> RuleVerdict {
    RuleVerdict { rule, passed }
}

/// The six BUY predicates for `last`.
pub fn buy_rules(last: &FilledRecord, mean_band_width: f64) -> Vec<RuleVerdict> {
    vec![
        verdict("close > ema10", last.close > last.ema10),
        verdict("close > sma20", last.close > last.sma20),
        verdict("cci20 < -100", last.cci20 < CCI_OVERSOLD),
        verdict("rsi14 < 30", last.rsi14 < RSI_OVERSOLD),
        verdict("close <= lower band", last.close <= last.lower_band),
        verdict("band width > mean", last.band_width > mean_band_width),
    ]
}

/// The six SELL predicates for `last`.
pub fn sell_rules(last: &FilledRecord, mean_band_width: f64) -> Vec<RuleVerdict> {
    vec![
        verdict("close < ema10", last.close < last.ema10),
        verdict("close < sma20", last.close < last.sma20),
        verdict("cci20 > 100", last.cci20 > CCI_OVERBOUGHT),
        verdict("rsi14 > 70", last.rsi14 > RSI_OVERBOUGHT),
        verdict("close >= upper band", last.close >= last.upper_band),
        verdict("band width > mean", last.band_width > mean_band_width),
    ]
}

fn all_passed(rules: &[RuleVerdict]) -> bool {
    rules.iter().all(|r| r.passed)
}

/// Apply both rule sets to a single record.
pub fn decide_record(last: &FilledRecord, mean_band_width: f64) -> Evaluation {
    let buy = buy_rules(last, mean_band_width);
    let sell = sell_rules(last, mean_band_width);

    let decision = if all_passed(&buy) {
        Decision::Buy
    } else if all_passed(&sell) {
        Decision::Sell
    } else {
        Decision::Neutral
    };

    Evaluation {
        decision,
        mean_band_width: Some(mean_band_width),
        buy_rules: buy,
        sell_rules: sell,
    }
}

/// Decide on the most recent record of `series`.
pub fn evaluate(series: &FilledSeries) -> Evaluation {
    let (Some(last), Some(mean_width)) = (series.latest(), series.mean_band_width()) else {
        info!("empty series, decision undetermined");
        return Evaluation::undetermined();
    };

    let evaluation = decide_record(last, mean_width);

    debug!(
        buy = ?evaluation.buy_rules,
        sell = ?evaluation.sell_rules,
        "rule verdicts"
    );
    info!(
        date = %last.date,
        close = last.close,
        decision = %evaluation.decision,
        "decision made"
    );

    evaluation
}
