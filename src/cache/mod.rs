use crate::model::GenerationRequest;
use chrono::{DateTime, Utc};
use moka::future::Cache;
use std::time::Duration;

/// One cached upstream result. `fetched_at` records when the upstream call
/// completed, not when the entry was last read.
#[derive(Debug, Clone)]
pub struct CachedParagraphs {
    pub paragraphs: Vec<String>,
    pub fetched_at: DateTime<Utc>,
}

/// Derives the cache key for a request. Pure and stable across restarts:
/// all three fields feed the digest, so varying any one of them changes
/// the key. Hits return stored values verbatim, which makes a collision a
/// correctness bug rather than a performance wrinkle.
pub fn derive_key(req: &GenerationRequest) -> String {
    let canonical = format!(
        "{}|{}|{}",
        req.meat_type.as_str(),
        req.paras,
        if req.start_with_lorem { "lorem" } else { "no_lorem" }
    );
    blake3::hash(canonical.as_bytes()).to_hex().to_string()
}

/// TTL-expiring store for generated paragraphs, keyed by `derive_key`.
/// Concurrent readers and writers are safe; concurrent misses for the same
/// key are not coalesced, so each may fetch upstream independently.
#[derive(Clone)]
pub struct ParagraphCache {
    inner: Cache<String, CachedParagraphs>,
}

impl ParagraphCache {
    pub fn new(max_capacity: u64, ttl: Duration) -> Self {
        let inner = Cache::builder()
            .max_capacity(max_capacity)
            .time_to_live(ttl)
            .build();
        Self { inner }
    }

    /// Returns a miss once the TTL has elapsed or after invalidation.
    pub async fn get(&self, req: &GenerationRequest) -> Option<CachedParagraphs> {
        self.inner.get(&derive_key(req)).await
    }

    /// Overwrites any existing entry for the same key.
    pub async fn put(&self, req: &GenerationRequest, paragraphs: Vec<String>) {
        let entry = CachedParagraphs {
            paragraphs,
            fetched_at: Utc::now(),
        };
        self.inner.insert(derive_key(req), entry).await;
    }

    pub async fn invalidate(&self, req: &GenerationRequest) {
        self.inner.invalidate(&derive_key(req)).await;
    }

    /// Drops every entry.
    pub fn flush(&self) {
        self.inner.invalidate_all();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::MeatType;

    fn request(meat_type: MeatType, paras: u8, start_with_lorem: bool) -> GenerationRequest {
        GenerationRequest {
            meat_type,
            paras,
            start_with_lorem,
        }
    }

    fn paragraphs() -> Vec<String> {
        vec!["Bacon ipsum one.".to_string(), "Bacon ipsum two.".to_string()]
    }

    #[test]
    fn equal_requests_derive_equal_keys() {
        let a = request(MeatType::AllMeat, 2, true);
        let b = request(MeatType::AllMeat, 2, true);
        assert_eq!(derive_key(&a), derive_key(&b));
    }

    #[test]
    fn changing_any_field_changes_the_key() {
        let base = request(MeatType::AllMeat, 2, true);
        let other_type = request(MeatType::MeatAndFiller, 2, true);
        let other_paras = request(MeatType::AllMeat, 3, true);
        let other_lorem = request(MeatType::AllMeat, 2, false);

        assert_ne!(derive_key(&base), derive_key(&other_type));
        assert_ne!(derive_key(&base), derive_key(&other_paras));
        assert_ne!(derive_key(&base), derive_key(&other_lorem));
    }

    #[tokio::test]
    async fn put_then_get_returns_stored_paragraphs() {
        let cache = ParagraphCache::new(16, Duration::from_secs(3600));
        let req = request(MeatType::AllMeat, 2, true);

        assert!(cache.get(&req).await.is_none());
        cache.put(&req, paragraphs()).await;

        let entry = cache.get(&req).await.unwrap();
        assert_eq!(entry.paragraphs, paragraphs());
    }

    #[tokio::test]
    async fn entries_expire_after_ttl() {
        let cache = ParagraphCache::new(16, Duration::from_millis(50));
        let req = request(MeatType::AllMeat, 2, true);

        cache.put(&req, paragraphs()).await;
        assert!(cache.get(&req).await.is_some());

        tokio::time::sleep(Duration::from_millis(100)).await;
        assert!(cache.get(&req).await.is_none());
    }

    #[tokio::test]
    async fn invalidate_removes_one_key_and_flush_removes_all() {
        let cache = ParagraphCache::new(16, Duration::from_secs(3600));
        let a = request(MeatType::AllMeat, 2, true);
        let b = request(MeatType::MeatAndFiller, 4, false);

        cache.put(&a, paragraphs()).await;
        cache.put(&b, paragraphs()).await;

        cache.invalidate(&a).await;
        assert!(cache.get(&a).await.is_none());
        assert!(cache.get(&b).await.is_some());

        cache.flush();
        assert!(cache.get(&b).await.is_none());
    }
}
