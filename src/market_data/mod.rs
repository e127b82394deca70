pub mod bar;
pub mod cache;
pub mod provider;
pub mod timeframe;

// Re-export the common types for convenient access (e.g. `use crate::market_data::Bar`).
pub use bar::{Bar, BarSeries};
pub use cache::{BarCache, BarKey, CachedBarProvider, TtlBarCache};
pub use provider::{BarProvider, InMemoryBarProvider, JsonFileBarProvider};
pub use timeframe::{Timeframe, TimeframeConfig};
