// =============================================================================
// Multi-Timeframe Technical Signal Engine
// =============================================================================
//
// Turns OHLCV bar sequences for several timeframes into indicator snapshots,
// detected patterns, a weighted composite signal per timeframe and a
// cross-timeframe alignment score.
// =============================================================================

pub mod alignment;
pub mod analysis;
pub mod clock;
pub mod indicators;
pub mod market_data;
pub mod patterns;
pub mod runtime_config;
pub mod signals;
pub mod types;

pub use analysis::{AnalysisSettings, MultiTimeframeAnalyzer, MultiTimeframeReport, TimeframeOutcome};
pub use runtime_config::EngineConfig;
