// =============================================================================
// Technical Indicators Module
// =============================================================================
//
// Pure, side-effect-free implementations of the indicators used by the
// decision engine.  Each `calculate_*` function takes a slice of values
// (oldest first) and returns a vector of the same length, index-aligned with
// the input.  The windowed indicators (SMA, Bollinger, CCI, RSI) return
// `Option`s, where `None` marks an index whose warm-up window is not yet full
// or whose value is numerically degenerate.  EMA has no warm-up and returns
// plain `f64`s.
//
// Values at index `i` only ever depend on inputs at indices `<= i`.

pub mod bollinger;
pub mod cci;
pub mod ema;
pub mod rsi;
pub mod sma;

pub const SMA_SHORT_PERIOD: usize = 20;
pub const SMA_LONG_PERIOD: usize = 50;
pub const EMA_SPAN: usize = 10;
pub const BOLLINGER_PERIOD: usize = 20;
pub const BOLLINGER_NUM_STD: f64 = 2.0;
pub const CCI_SHORT_PERIOD: usize = 20;
pub const CCI_LONG_PERIOD: usize = 50;
pub const RSI_PERIOD: usize = 14;

/// Relative tolerance under which a dispersion measure counts as zero.
const FLAT_TOLERANCE: f64 = 1e-12;

/// True when `dispersion` (a std or mean deviation) is indistinguishable from
/// zero at the scale of `level`.
///
/// A window of identical values can still produce a dispersion of a few ULPs
/// once its mean has been rounded; this snaps those to exactly flat.
pub(crate) fn is_flat(dispersion: f64, level: f64) -> bool {
    dispersion <= FLAT_TOLERANCE * level.abs().max(1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flat_detects_rounding_noise() {
        assert!(is_flat(0.0, 80.0));
        assert!(is_flat(1e-14, 80.0));
        assert!(!is_flat(1e-6, 80.0));
    }

    #[test]
    fn flat_uses_unit_floor_for_small_levels() {
        assert!(is_flat(5e-13, 0.0));
        assert!(!is_flat(1e-9, 0.0));
    }
}
