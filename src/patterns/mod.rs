// =============================================================================
// Pattern Detection Module
// =============================================================================
//
// Candlestick, chart and moving-average patterns plus price/indicator
// divergences.  Every detector returns an empty list (never an error) when
// the input is shorter than its lookback.

pub mod candlestick;
pub mod chart;
pub mod detector;
pub mod divergence;
pub mod extrema;
pub mod moving_average;
pub mod types;

pub use detector::PatternDetector;
pub use types::{Divergence, DivergenceSource, Pattern, PatternFamily, PatternKind, TradeLevels};
