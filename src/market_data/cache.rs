// =============================================================================
// Bar Cache - TTL cache in front of a BarProvider
// =============================================================================
//
// Raw-bar caching belongs to the data side, not to the signal engine.  The
// cache is an explicit get/put/ttl abstraction with an injected clock so the
// expiry rules can be exercised without sleeping.

use std::collections::HashMap;
use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use parking_lot::RwLock;
use tracing::debug;

use super::bar::Bar;
use super::provider::BarProvider;
use super::timeframe::{Timeframe, TimeframeConfig};
use crate::clock::Clock;

/// Composite key that identifies a cached bar sequence.
#[derive(Debug, Clone, Hash, Eq, PartialEq)]
pub struct BarKey {
    pub symbol: String,
    pub timeframe: Timeframe,
}

impl BarKey {
    pub fn new(symbol: &str, timeframe: Timeframe) -> Self {
        Self {
            symbol: symbol.to_uppercase(),
            timeframe,
        }
    }
}

impl std::fmt::Display for BarKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}@{}", self.symbol, self.timeframe)
    }
}

pub trait BarCache: Send + Sync {
    /// Fresh entry for `key`, or `None` when absent or expired.
    fn get(&self, key: &BarKey) -> Option<Arc<[Bar]>>;
    fn put(&self, key: BarKey, bars: Arc<[Bar]>);
    fn ttl(&self) -> Duration;
}

// ---------------------------------------------------------------------------
// TtlBarCache
// ---------------------------------------------------------------------------

/// Thread-safe map of bar sequences, each stamped with its insertion time.
pub struct TtlBarCache {
    entries: RwLock<HashMap<BarKey, (DateTime<Utc>, Arc<[Bar]>)>>,
    ttl: Duration,
    clock: Arc<dyn Clock>,
}

impl TtlBarCache {
    pub fn new(ttl: Duration, clock: Arc<dyn Clock>) -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            ttl,
            clock,
        }
    }

    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }

    /// Drop every expired entry.  Runs on every `put`, so the map never
    /// holds more than the keys fetched within one TTL.
    pub fn purge_expired(&self) {
        let now = self.clock.now();
        let ttl = self.ttl;
        self.entries
            .write()
            .retain(|_, (stored_at, _)| now - *stored_at < ttl);
    }
}

impl BarCache for TtlBarCache {
    fn get(&self, key: &BarKey) -> Option<Arc<[Bar]>> {
        let map = self.entries.read();
        let (stored_at, bars) = map.get(key)?;
        if self.clock.now() - *stored_at < self.ttl {
            Some(Arc::clone(bars))
        } else {
            None
        }
    }

    fn put(&self, key: BarKey, bars: Arc<[Bar]>) {
        self.purge_expired();
        let now = self.clock.now();
        self.entries.write().insert(key, (now, bars));
    }

    fn ttl(&self) -> Duration {
        self.ttl
    }
}

// ---------------------------------------------------------------------------
// CachedBarProvider
// ---------------------------------------------------------------------------

/// Wraps any provider with a [`BarCache`].
pub struct CachedBarProvider {
    inner: Arc<dyn BarProvider>,
    cache: Arc<dyn BarCache>,
}

impl CachedBarProvider {
    pub fn new(inner: Arc<dyn BarProvider>, cache: Arc<dyn BarCache>) -> Self {
        Self { inner, cache }
    }
}

#[async_trait]
impl BarProvider for CachedBarProvider {
    async fn fetch_bars(&self, symbol: &str, config: &TimeframeConfig) -> Result<Vec<Bar>> {
        let key = BarKey::new(symbol, config.timeframe);
        if let Some(bars) = self.cache.get(&key) {
            debug!(key = %key, bars = bars.len(), "bar cache hit");
            return Ok(bars.to_vec());
        }

        debug!(key = %key, provider = self.inner.name(), "bar cache miss");
        let bars = self.inner.fetch_bars(symbol, config).await?;
        self.cache.put(key, bars.clone().into());
        Ok(bars)
    }

    fn name(&self) -> &'static str {
        "cached"
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
