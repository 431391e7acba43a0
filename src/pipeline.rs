// =============================================================================
// Analysis Pipeline
// =============================================================================
//
//   bars -> indicators -> gap-filled indicators -> decision -> report
//
// A pure function of its input: the same series always yields the same
// filled series and decision.  Independent series can be analysed from
// different threads; nothing here is shared.
// =============================================================================

use crate::decision::{evaluate, Evaluation};
use crate::gap_fill::{fill_gaps, FilledSeries};
use crate::indicator_engine::compute_indicators;
use crate::market_data::BarSeries;
use crate::report::SignalReport;
use crate::types::Decision;

/// Everything a run produces.
#[derive(Debug, Clone)]
pub struct Analysis {
    pub filled: FilledSeries,
    pub evaluation: Evaluation,
    pub report: SignalReport,
}

impl Analysis {
    pub fn decision(&self) -> Decision {
        self.evaluation.decision
    }
}

/// Run the full pipeline over `series`.
pub fn analyze(symbol: &str, series: &BarSeries) -> Analysis {
    let indicators = compute_indicators(series);
    let filled = fill_gaps(&indicators);
    let evaluation = evaluate(&filled);
    let report = SignalReport::new(symbol, filled.latest(), &evaluation);

    Analysis {
        filled,
        evaluation,
        report,
    }
}
