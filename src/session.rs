//! Search-as-you-type support.
//!
//! Each keystroke issues a new [`RequestToken`]; only the most recently issued
//! token may deliver results. A request that was superseded while waiting out
//! the debounce window is never dispatched, and one that was superseded while
//! in flight has its response discarded.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use log::debug;
use tokio::time::sleep;

use crate::config::FinderConfig;
use crate::{Recipe, RecipeError, RecipeFinder};

/// Default quiet period before a query is dispatched
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(300);

/// Ticket for one issued request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestToken(u64);

/// Single-slot "latest request" tracker
#[derive(Debug, Default)]
pub struct LatestRequest {
    generation: AtomicU64,
}

impl LatestRequest {
    pub fn new() -> Self {
        Self::default()
    }

    /// Issue a new token, invalidating every earlier one
    pub fn issue(&self) -> RequestToken {
        RequestToken(self.generation.fetch_add(1, Ordering::SeqCst) + 1)
    }

    pub fn is_current(&self, token: RequestToken) -> bool {
        self.generation.load(Ordering::SeqCst) == token.0
    }
}

/// What a session search produced
#[derive(Debug)]
pub enum SearchOutcome {
    /// Still the latest request when the response arrived
    Completed(Result<Vec<Recipe>, RecipeError>),
    /// A newer search was issued; this result must not be shown
    Superseded,
}

impl SearchOutcome {
    pub fn is_superseded(&self) -> bool {
        matches!(self, SearchOutcome::Superseded)
    }
}

/// Debounced searches over a shared [`RecipeFinder`]
#[derive(Clone)]
pub struct SearchSession {
    finder: Arc<RecipeFinder>,
    latest: Arc<LatestRequest>,
    debounce: Duration,
}

impl SearchSession {
    pub fn new(finder: Arc<RecipeFinder>) -> Self {
        Self::with_debounce(finder, DEFAULT_DEBOUNCE)
    }

    /// Session using the configured `debounce_ms` window
    pub fn from_config(finder: Arc<RecipeFinder>, config: &FinderConfig) -> Self {
        Self::with_debounce(finder, Duration::from_millis(config.debounce_ms))
    }

    pub fn with_debounce(finder: Arc<RecipeFinder>, debounce: Duration) -> Self {
        SearchSession {
            finder,
            latest: Arc::new(LatestRequest::new()),
            debounce,
        }
    }

    /// Search for `query` once input has been quiet for the debounce window
    pub async fn search(&self, query: &str) -> SearchOutcome {
        let token = self.latest.issue();

        sleep(self.debounce).await;
        if !self.latest.is_current(token) {
            debug!("Query '{}' superseded before dispatch", query);
            return SearchOutcome::Superseded;
        }

        let result = self.finder.search_recipes(query).await;
        if !self.latest.is_current(token) {
            debug!("Discarding stale results for '{}'", query);
            return SearchOutcome::Superseded;
        }

        SearchOutcome::Completed(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::providers::{RecipeSource, StaticSource};
    use async_trait::async_trait;
    use std::sync::atomic::AtomicUsize;

    /// Static source whose answers take a query-dependent amount of time
    struct SlowSource {
        inner: StaticSource,
        calls: Arc<AtomicUsize>,
    }

    #[async_trait]
    impl RecipeSource for SlowSource {
        fn provider_name(&self) -> &str {
            "slow"
        }

        async fn search(&self, query: &str) -> Result<Vec<Recipe>, RecipeError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            // "curry" answers fast, everything else slowly
            let delay = if query.contains("curry") { 10 } else { 1000 };
            sleep(Duration::from_millis(delay)).await;
            self.inner.search(query).await
        }

        async fn lookup(&self, id: &str) -> Result<Option<Recipe>, RecipeError> {
            self.inner.lookup(id).await
        }
    }

    fn slow_finder() -> (Arc<RecipeFinder>, Arc<AtomicUsize>) {
        let calls = Arc::new(AtomicUsize::new(0));
        let source = SlowSource {
            inner: StaticSource::new(),
            calls: calls.clone(),
        };
        (Arc::new(RecipeFinder::new(Box::new(source))), calls)
    }

    fn session() -> (SearchSession, Arc<AtomicUsize>) {
        let (finder, calls) = slow_finder();
        (SearchSession::new(finder), calls)
    }

    #[test]
    fn test_latest_request_token() {
        let latest = LatestRequest::new();
        let first = latest.issue();
        assert!(latest.is_current(first));
        let second = latest.issue();
        assert!(!latest.is_current(first));
        assert!(latest.is_current(second));
    }

    #[tokio::test(start_paused = true)]
    async fn test_typing_burst_dispatches_once() {
        let (session, calls) = session();

        let a = session.clone();
        let first = tokio::spawn(async move { a.search("c").await });
        sleep(Duration::from_millis(100)).await;
        let b = session.clone();
        let second = tokio::spawn(async move { b.search("cu").await });
        sleep(Duration::from_millis(100)).await;
        let last = session.search("curry").await;

        assert!(first.await.unwrap().is_superseded());
        assert!(second.await.unwrap().is_superseded());
        match last {
            SearchOutcome::Completed(Ok(recipes)) => {
                assert_eq!(recipes.len(), 1);
                assert_eq!(recipes[0].id, "veggie-curry");
            }
            other => panic!("unexpected outcome: {:?}", other),
        }
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_last_issued_wins_over_last_to_arrive() {
        let (session, calls) = session();

        // slow request already in flight when the fast one is issued
        let a = session.clone();
        let slow = tokio::spawn(async move { a.search("spaghetti").await });
        sleep(Duration::from_millis(400)).await;
        let fast = session.search("curry").await;

        assert!(matches!(fast, SearchOutcome::Completed(Ok(ref r)) if r.len() == 1));
        assert!(slow.await.unwrap().is_superseded());
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_configured_debounce_window() {
        let (finder, calls) = slow_finder();
        let config = FinderConfig {
            debounce_ms: 50,
            ..FinderConfig::default()
        };
        let session = SearchSession::from_config(finder, &config);

        // 100ms gap is longer than the 50ms window, so "curry" is dispatched
        let a = session.clone();
        let first = tokio::spawn(async move { a.search("curry").await });
        sleep(Duration::from_millis(100)).await;
        let b = session.clone();
        let second = tokio::spawn(async move { b.search("carbonara").await });

        match first.await.unwrap() {
            SearchOutcome::Completed(Ok(recipes)) => assert_eq!(recipes[0].id, "veggie-curry"),
            other => panic!("unexpected outcome: {:?}", other),
        }
        assert!(!second.await.unwrap().is_superseded());
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_default_window_from_config() {
        let (finder, calls) = slow_finder();
        let session = SearchSession::from_config(finder, &FinderConfig::default());

        // same 100ms gap falls inside the default 300ms window
        let a = session.clone();
        let first = tokio::spawn(async move { a.search("curry").await });
        sleep(Duration::from_millis(100)).await;
        let second = session.search("carbonara").await;

        assert!(first.await.unwrap().is_superseded());
        assert!(!second.is_superseded());
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_blank_query_completes_empty() {
        let (session, calls) = session();
        match session.search("   ").await {
            SearchOutcome::Completed(Ok(recipes)) => assert!(recipes.is_empty()),
            other => panic!("unexpected outcome: {:?}", other),
        }
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }
}
