// =============================================================================
// Signals Module
// =============================================================================
//
// Fuses one timeframe's indicator snapshot, patterns and divergences into a
// composite signal:
// - Per-indicator classification into labelled, directional components
// - ADX regime adjustment of component strengths
// - Weighted composite score with confluence bonus
// - Signal-type mapping, entry zone and risk/reward

pub mod components;
pub mod levels;
pub mod regime;
pub mod scorer;
pub mod signal_type;
pub mod weighted_score;

pub use components::{IndicatorKind, SignalComponent, SignalLabel};
pub use levels::{risk_reward, EntryZone, RiskReward};
pub use regime::{MarketCondition, Regime};
pub use scorer::{generate_signal, CompositeSignal, ScoringInput};
pub use signal_type::SignalType;
pub use weighted_score::{IndicatorWeights, ScoredComponent, WeightedScore};
