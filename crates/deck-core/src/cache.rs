//! Fingerprint-addressed result cache using moka
//!
//! Concurrent requests for the same fingerprint share one in-flight remote
//! call. Only successes are stored; a failure is handed to every waiter of
//! that call and the next request tries again.

use deck_model::{AnalysisResult, Fingerprint};
use moka::future::Cache;
use std::future::Future;
use std::sync::Arc;

/// Statistics for cache monitoring
#[derive(Debug, Clone, Copy, Default)]
pub struct CacheStats {
    /// Number of entries in cache
    pub entry_count: u64,
}

/// Process-lifetime cache of remote results
///
/// Unbounded and without expiry. Entries are never removed.
#[derive(Debug, Clone)]
pub struct ResultCache {
    inner: Cache<Fingerprint, Arc<AnalysisResult>>,
}

impl Default for ResultCache {
    fn default() -> Self {
        Self::new()
    }
}

impl ResultCache {
    /// Create an unbounded cache
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self {
            inner: Cache::builder().build(),
        }
    }

    /// Get a cached result
    #[inline]
    pub async fn get(&self, fingerprint: &Fingerprint) -> Option<Arc<AnalysisResult>> {
        self.inner.get(fingerprint).await
    }

    /// Get a cached result or run `fetch` once for all concurrent callers
    ///
    /// # Errors
    /// Returns the error produced by the single `fetch` run; nothing is
    /// stored in that case.
    pub async fn get_or_try_fetch<F, E>(
        &self,
        fingerprint: Fingerprint,
        fetch: F,
    ) -> Result<Arc<AnalysisResult>, Arc<E>>
    where
        F: Future<Output = Result<AnalysisResult, E>>,
        E: Send + Sync + 'static,
    {
        self.inner
            .try_get_with(fingerprint, async move { fetch.await.map(Arc::new) })
            .await
    }

    /// Check if cache contains fingerprint
    #[inline]
    pub async fn contains(&self, fingerprint: &Fingerprint) -> bool {
        self.inner.get(fingerprint).await.is_some()
    }

    /// Get cache statistics
    #[inline]
    #[must_use]
    pub fn stats(&self) -> CacheStats {
        CacheStats {
            entry_count: self.inner.entry_count(),
        }
    }

    /// Flush pending maintenance so counts are current
    pub async fn sync(&self) {
        self.inner.run_pending_tasks().await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use deck_model::{Confidence, Parameters};
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn fingerprint(topic: &str) -> Fingerprint {
        Fingerprint::compute(topic, &Parameters::new())
    }

    fn remote() -> AnalysisResult {
        AnalysisResult::remote(Vec::new(), "SELECT 1", Confidence::FALLBACK)
    }

    #[tokio::test]
    async fn fetch_runs_once_per_fingerprint() {
        let cache = ResultCache::new();
        let calls = AtomicUsize::new(0);
        let fp = fingerprint("peak_traffic_hours");

        for _ in 0..3 {
            let result = cache
                .get_or_try_fetch(fp, async {
                    calls.fetch_add(1, Ordering::SeqCst);
                    Ok::<_, String>(remote())
                })
                .await
                .unwrap();
            assert_eq!(result.generated_query_text, "SELECT 1");
        }

        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert!(cache.contains(&fp).await);
    }

    #[tokio::test]
    async fn failures_are_not_stored() {
        let cache = ResultCache::new();
        let fp = fingerprint("seasonal_trends");

        let err = cache
            .get_or_try_fetch(fp, async { Err::<AnalysisResult, _>("down".to_string()) })
            .await
            .unwrap_err();
        assert_eq!(err.as_str(), "down");
        assert!(!cache.contains(&fp).await);

        let ok = cache.get_or_try_fetch(fp, async { Ok::<_, String>(remote()) }).await;
        assert!(ok.is_ok());
    }

    #[tokio::test]
    async fn stored_result_is_never_replaced() {
        let cache = ResultCache::new();
        let fp = fingerprint("volume_analysis");
        cache.get_or_try_fetch(fp, async { Ok::<_, String>(remote()) }).await.unwrap();

        let again = cache
            .get_or_try_fetch(fp, async {
                Ok::<_, String>(AnalysisResult::remote(Vec::new(), "SELECT 2", Confidence::FALLBACK))
            })
            .await
            .unwrap();
        assert_eq!(again.generated_query_text, "SELECT 1");
        assert_eq!(cache.get(&fp).await.unwrap().generated_query_text, "SELECT 1");
    }

    #[tokio::test]
    async fn stats_count_entries() {
        let cache = ResultCache::new();
        for topic in ["a", "b", "a"] {
            cache
                .get_or_try_fetch(fingerprint(topic), async { Ok::<_, String>(remote()) })
                .await
                .unwrap();
        }
        cache
            .get_or_try_fetch(fingerprint("c"), async { Err::<AnalysisResult, _>("down".to_string()) })
            .await
            .unwrap_err();
        cache.sync().await;
        assert_eq!(cache.stats().entry_count, 2);
    }
}
