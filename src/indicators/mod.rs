// =============================================================================
// Technical Indicators Module
// =============================================================================
//
// Pure, side-effect-free implementations of the technical indicators used by
// the signal engine.  Indicator functions return trimmed `Vec`s, bar-aligned
// `Vec<Option<_>>`s or `Option<T>` so callers are forced to handle
// insufficient-data and numerical-edge-case scenarios.  `engine` ties them
// together for one timeframe.

pub mod sma;
pub mod ema;
pub mod rsi;
pub mod macd;
pub mod adx;
pub mod bollinger;
pub mod atr;
pub mod stochastic;
pub mod obv;
pub mod vwap;
pub mod ichimoku;
pub mod levels;
pub mod engine;

pub use engine::{IndicatorEngine, IndicatorOutput, IndicatorSeries, IndicatorSnapshot};
pub use levels::{FibonacciLevels, PivotLevels};
