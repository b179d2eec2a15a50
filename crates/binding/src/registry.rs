//! Resolved-shape registry
//!
//! Maps a shape type to its [`ResolvedShape`]. Lookups are concurrent and a
//! shape is resolved at most once while it stays cached: the first caller
//! computes it under the map's entry lock and everyone else gets the same
//! `Arc`. Failed resolutions are cached too, so a broken shape is reported
//! the same way every time without being re-declared.
//!
//! A process-wide registry is available through [`ShapeRegistry::global`].
//! Callers that want their own lifetime or eviction policy construct one
//! and hand it to [`TypedDatabaseSchema::with_registry`](crate::TypedDatabaseSchema::with_registry).

use crate::config::RegistryConfig;
use crate::error::Result;
use crate::shape::{ResolvedShape, TableShape};
use dashmap::DashMap;
use once_cell::sync::Lazy;
use std::any::TypeId;
use std::sync::Arc;
use tracing::{debug, trace};

type Entry = Result<Arc<ResolvedShape>>;

/// Process-wide registry used when no other is supplied
static GLOBAL: Lazy<Arc<ShapeRegistry>> = Lazy::new(|| Arc::new(ShapeRegistry::default()));

/// Concurrent memo of resolved shapes, keyed by shape type
#[derive(Debug, Default)]
pub struct ShapeRegistry {
    config: RegistryConfig,
    shapes: DashMap<TypeId, Entry>,
}

impl ShapeRegistry {
    /// Empty registry with the given settings
    pub fn new(config: RegistryConfig) -> Self {
        ShapeRegistry {
            config,
            shapes: DashMap::new(),
        }
    }

    /// The shared process-wide registry (unbounded)
    pub fn global() -> Arc<ShapeRegistry> {
        Arc::clone(&GLOBAL)
    }

    /// Settings this registry was built with
    pub fn config(&self) -> &RegistryConfig {
        &self.config
    }

    /// Resolved shape for `S`, resolving it on first use
    pub fn resolve<S: TableShape>(&self) -> Result<Arc<ResolvedShape>> {
        let key = TypeId::of::<S>();

        if let Some(hit) = self.shapes.get(&key) {
            trace!(target: "ovsdb::binding", shape = std::any::type_name::<S>(), "Shape cache hit");
            return hit.value().clone();
        }

        if let Some(max) = self.config.max_cached_shapes {
            if max == 0 {
                return ResolvedShape::resolve::<S>().map(Arc::new);
            }
            self.make_room(key, max);
        }

        // Entry API: at most one resolution per key
        self.shapes
            .entry(key)
            .or_insert_with(|| ResolvedShape::resolve::<S>().map(Arc::new))
            .value()
            .clone()
    }

    /// True if `S` currently has a cached entry
    pub fn contains<S: TableShape>(&self) -> bool {
        self.shapes.contains_key(&TypeId::of::<S>())
    }

    /// Drop the cached entry for `S`
    pub fn evict<S: TableShape>(&self) -> bool {
        self.shapes.remove(&TypeId::of::<S>()).is_some()
    }

    /// Drop every cached entry
    pub fn clear(&self) {
        self.shapes.clear();
    }

    /// Number of cached entries
    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    /// True if nothing is cached
    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    fn make_room(&self, incoming: TypeId, max: usize) {
        while self.shapes.len() >= max {
            // The iterator's shard guards are released at the end of this statement.
            let victim = self.shapes.iter().map(|e| *e.key()).find(|k| *k != incoming);
            match victim {
                Some(victim) => {
                    self.shapes.remove(&victim);
                    debug!(target: "ovsdb::binding", max, "Evicted cached shape");
                }
                None => break,
            }
        }
    }
}
