//! Read-through query cache with tag invalidation.
//!
//! Entries are keyed by the query fingerprint and carry the tags the query
//! provides. Invalidating a tag marks every entry carrying it stale, whatever
//! its parameters. Stale entries are kept until the next read of the same
//! fingerprint refetches them.
//!
//! The map holds at most `capacity` entries. Once a new fingerprint pushes it
//! over, settled entries are evicted: stale ones first, then the least
//! recently read. In-flight entries are never evicted.
//!
//! Concurrent readers of one fingerprint share a single in-flight request. The
//! entry map sits behind a short-lived lock that is never held across an
//! await point.
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use futures::future::{BoxFuture, FutureExt, Shared};
use tracing::{debug, info};

use forum_client_backend::{ApiError, ForumBackend, Query, QueryData};
use forum_client_shared::types::CacheTag;

type SharedFetch = Shared<BoxFuture<'static, Result<Arc<QueryData>, ApiError>>>;

enum Slot {
    Ready(Arc<QueryData>),
    InFlight(SharedFetch),
}

struct CacheEntry {
    tags: &'static [CacheTag],
    slot: Slot,
    stale: bool,
    /// Fetch that populated the slot. A settling fetch only writes back when
    /// the entry still belongs to it.
    generation: u64,
    last_read: u64,
}

#[derive(Default)]
struct Entries {
    by_fingerprint: HashMap<String, CacheEntry>,
    next_generation: u64,
    clock: u64,
}

impl Entries {
    fn tick(&mut self) -> u64 {
        self.clock += 1;
        self.clock
    }

    /// Evicts settled entries until the map fits `capacity`.
    fn evict_over(&mut self, capacity: usize) -> usize {
        let mut evicted = 0;
        while self.by_fingerprint.len() > capacity {
            let victim = self
                .by_fingerprint
                .iter()
                .filter(|(_, entry)| matches!(entry.slot, Slot::Ready(_)))
                .min_by_key(|(_, entry)| (!entry.stale, entry.last_read))
                .map(|(fingerprint, _)| fingerprint.clone());

            match victim {
                Some(fingerprint) => {
                    self.by_fingerprint.remove(&fingerprint);
                    evicted += 1;
                }
                None => break,
            }
        }
        evicted
    }
}

enum Checkout {
    Hit(Arc<QueryData>),
    Wait { fetch: SharedFetch, generation: u64 },
}

/// Default bound on the number of cached fingerprints.
pub const DEFAULT_CACHE_CAPACITY: usize = 256;

/// Process-wide cache of backend reads.
pub struct QueryCache {
    backend: Arc<dyn ForumBackend>,
    entries: Mutex<Entries>,
    capacity: usize,
}

impl QueryCache {
    pub fn new(backend: Arc<dyn ForumBackend>) -> Self {
        Self::with_capacity(backend, DEFAULT_CACHE_CAPACITY)
    }

    /// Creates a cache holding at most `capacity` entries, never fewer than one.
    pub fn with_capacity(backend: Arc<dyn ForumBackend>, capacity: usize) -> Self {
        Self {
            backend,
            entries: Mutex::new(Entries::default()),
            capacity: capacity.max(1),
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    fn entries(&self) -> MutexGuard<'_, Entries> {
        self.entries
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Returns the cached result of `query`, fetching it when missing or stale.
    ///
    /// Failed fetches are not cached: every waiter receives the error and the
    /// next read retries.
    pub async fn read(&self, query: &Query) -> Result<Arc<QueryData>, ApiError> {
        let fingerprint = query.fingerprint();

        let (fetch, generation) = match self.checkout(query, &fingerprint) {
            Checkout::Hit(data) => return Ok(data),
            Checkout::Wait { fetch, generation } => (fetch, generation),
        };

        let result = fetch.await;
        self.settle(&fingerprint, generation, &result);
        result
    }

    fn checkout(&self, query: &Query, fingerprint: &str) -> Checkout {
        let mut entries = self.entries();
        let now = entries.tick();

        if let Some(entry) = entries.by_fingerprint.get_mut(fingerprint) {
            if !entry.stale {
                entry.last_read = now;
                return match &entry.slot {
                    Slot::Ready(data) => {
                        debug!(fingerprint, "Cache hit");
                        Checkout::Hit(data.clone())
                    }
                    Slot::InFlight(fetch) => {
                        debug!(fingerprint, "Joining in-flight fetch");
                        Checkout::Wait {
                            fetch: fetch.clone(),
                            generation: entry.generation,
                        }
                    }
                };
            }
        }

        entries.next_generation += 1;
        let generation = entries.next_generation;

        let backend = self.backend.clone();
        let owned_query = query.clone();
        let fetch = async move { backend.fetch(&owned_query).await.map(Arc::new) }
            .boxed()
            .shared();

        debug!(fingerprint, generation, "Cache miss, fetching");
        entries.by_fingerprint.insert(
            fingerprint.to_string(),
            CacheEntry {
                tags: query.provides(),
                slot: Slot::InFlight(fetch.clone()),
                stale: false,
                generation,
                last_read: now,
            },
        );

        let evicted = entries.evict_over(self.capacity);
        if evicted > 0 {
            debug!(evicted, capacity = self.capacity, "Evicted cache entries");
        }

        Checkout::Wait { fetch, generation }
    }

    fn settle(
        &self,
        fingerprint: &str,
        generation: u64,
        result: &Result<Arc<QueryData>, ApiError>,
    ) {
        let mut entries = self.entries();

        let owned = matches!(
            entries.by_fingerprint.get(fingerprint),
            Some(entry) if entry.generation == generation && matches!(entry.slot, Slot::InFlight(_))
        );
        if !owned {
            return;
        }

        match result {
            Ok(data) => {
                if let Some(entry) = entries.by_fingerprint.get_mut(fingerprint) {
                    entry.slot = Slot::Ready(data.clone());
                }
            }
            Err(error) => {
                debug!(fingerprint, error = %error, "Fetch failed, dropping entry");
                entries.by_fingerprint.remove(fingerprint);
            }
        }
    }

    /// Marks every entry carrying any of `tags` stale and returns how many
    /// entries were affected. In-flight entries are marked too: their result
    /// is still stored, but the next read refetches.
    pub fn invalidate(&self, tags: &[CacheTag]) -> usize {
        if tags.is_empty() {
            return 0;
        }

        let mut entries = self.entries();
        let mut invalidated = 0;
        for entry in entries.by_fingerprint.values_mut() {
            if entry.tags.iter().any(|tag| tags.contains(tag)) {
                entry.stale = true;
                invalidated += 1;
            }
        }

        info!(tags = ?tags, invalidated, "Invalidated cache tags");
        invalidated
    }

    /// Staleness of the entry for `query`, or `None` when nothing is cached.
    pub fn is_stale(&self, query: &Query) -> Option<bool> {
        self.entries()
            .by_fingerprint
            .get(&query.fingerprint())
            .map(|entry| entry.stale)
    }

    pub fn len(&self) -> usize {
        self.entries().by_fingerprint.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use forum_client_backend::MockForumBackend;

    fn tags_data() -> QueryData {
        QueryData::Tags(vec!["rust".to_string()])
    }

    #[tokio::test]
    async fn test_second_read_is_served_from_cache() {
        let backend = Arc::new(MockForumBackend::new());
        backend.register(&Query::Tags, tags_data());
        let cache = QueryCache::new(backend.clone());

        cache.read(&Query::Tags).await.unwrap();
        let data = cache.read(&Query::Tags).await.unwrap();

        assert_eq!(*data, tags_data());
        assert_eq!(backend.fetch_count(&Query::Tags), 1);
    }

    #[tokio::test]
    async fn test_untagged_entries_survive_invalidation() {
        let backend = Arc::new(MockForumBackend::new());
        backend.register(&Query::Tags, tags_data());
        let cache = QueryCache::new(backend.clone());

        cache.read(&Query::Tags).await.unwrap();
        assert_eq!(cache.invalidate(&[CacheTag::Post, CacheTag::Comment]), 0);
        assert_eq!(cache.is_stale(&Query::Tags), Some(false));
    }

    #[tokio::test]
    async fn test_failed_fetch_is_not_cached() {
        let backend = Arc::new(MockForumBackend::new());
        let cache = QueryCache::new(backend.clone());

        assert!(cache.read(&Query::Tags).await.is_err());
        assert!(cache.is_empty());

        backend.register(&Query::Tags, tags_data());
        assert!(cache.read(&Query::Tags).await.is_ok());
        assert_eq!(backend.fetch_count(&Query::Tags), 2);
    }

    #[tokio::test]
    async fn test_eviction_prefers_stale_then_least_recently_read() {
        let backend = Arc::new(MockForumBackend::new());
        let posts = Query::CommentsByPost("p1".to_string());
        let other = Query::CommentsByPost("p2".to_string());
        backend.register(&Query::Tags, tags_data());
        backend.register(&posts, QueryData::Comments(vec![]));
        backend.register(&other, QueryData::Comments(vec![]));
        let cache = QueryCache::with_capacity(backend.clone(), 2);

        cache.read(&posts).await.unwrap();
        cache.read(&Query::Tags).await.unwrap();
        cache.read(&posts).await.unwrap();
        cache.invalidate(&[CacheTag::Comment]);

        // The stale comment list goes first even though it was read last.
        cache.read(&other).await.unwrap();
        assert_eq!(cache.len(), 2);
        assert_eq!(cache.is_stale(&posts), None);
        assert_eq!(cache.is_stale(&Query::Tags), Some(false));

        // With nothing stale, the least recently read entry goes.
        cache.read(&posts).await.unwrap();
        assert_eq!(cache.len(), 2);
        assert_eq!(cache.is_stale(&Query::Tags), None);
        assert_eq!(cache.is_stale(&other), Some(false));
    }

    #[test]
    fn test_zero_capacity_keeps_one_entry() {
        let cache = QueryCache::with_capacity(Arc::new(MockForumBackend::new()), 0);
        assert_eq!(cache.capacity(), 1);
    }
}
