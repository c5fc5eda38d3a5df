//! Definition snapshot caching with moka
//!
//! Holds the most recent [`DefinitionSnapshot`] as a single cache entry.
//!
//! # Behaviour
//!
//! - **Fill**: the first `get()` after start-up or invalidation fetches every
//!   definition from the provider; concurrent misses share one fetch
//! - **Invalidate**: drops the snapshot unconditionally
//! - **Errors**: a failed fetch yields an empty snapshot that is never
//!   stored, so the next `get()` tries again
//!
//! # Example
//!
//! ```rust,ignore
//! let cache = DefinitionCache::new(provider);
//! let snapshot = cache.get().await;
//! cache.invalidate();
//! ```

use std::sync::Arc;

use moka::future::Cache;
use qbo_bridge_core::DefinitionsProvider;
use qbo_bridge_domain::{BridgeError, DefinitionSnapshot};
use tracing::{info, warn};

/// Shared cache of custom field definitions
pub struct DefinitionCache {
    provider: Arc<dyn DefinitionsProvider>,
    snapshot: Cache<(), Arc<DefinitionSnapshot>>,
}

impl DefinitionCache {
    pub fn new(provider: Arc<dyn DefinitionsProvider>) -> Self {
        Self { provider, snapshot: Cache::builder().initial_capacity(1).build() }
    }

    /// Cached snapshot, filling it from the provider on a miss.
    ///
    /// Never fails: provider errors degrade to an empty snapshot.
    pub async fn get(&self) -> Arc<DefinitionSnapshot> {
        let provider = Arc::clone(&self.provider);

        let fill = async move {
            let definitions = provider.fetch_all().await?;
            let snapshot = DefinitionSnapshot::from_definitions(definitions);
            info!(definitions = snapshot.len(), "Custom field definitions cached");
            Ok::<_, BridgeError>(Arc::new(snapshot))
        };

        match self.snapshot.try_get_with((), fill).await {
            Ok(snapshot) => snapshot,
            Err(err) => {
                warn!(
                    error = %err,
                    kind = err.label(),
                    "Custom field definitions unavailable; validating against an empty set"
                );
                Arc::new(DefinitionSnapshot::default())
            }
        }
    }

    /// Discard the cached snapshot.
    pub fn invalidate(&self) {
        self.snapshot.invalidate_all();
        info!("Custom field definition cache invalidated");
    }
}
