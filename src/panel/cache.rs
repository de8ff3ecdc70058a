use std::collections::HashMap;
use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use futures_util::future::{BoxFuture, FutureExt, Shared};
use tokio::time::Instant;
use tracing::{debug, warn};

use super::client::FetchError;

type SharedFetch<T> = Shared<BoxFuture<'static, Result<T, FetchError>>>;

/// Per-source request behavior
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchPolicy {
    /// Extra attempts after the first failure
    pub retry_count: u32,
    pub retry_interval: Duration,
    /// Data younger than this is served without a request
    pub dedupe_interval: Duration,
    /// Background polling period
    pub refresh_interval: Option<Duration>,
    pub revalidate_on_focus: bool,
    pub revalidate_on_reconnect: bool,
    /// Once loaded, never fetched again
    pub immutable: bool,
}

impl FetchPolicy {
    pub const USER_INFO: FetchPolicy = FetchPolicy {
        retry_count: 3,
        retry_interval: Duration::from_secs(2),
        dedupe_interval: Duration::from_secs(5),
        refresh_interval: Some(Duration::from_secs(30)),
        revalidate_on_focus: true,
        revalidate_on_reconnect: true,
        immutable: false,
    };

    pub const CONFIG_LINKS: FetchPolicy = FetchPolicy {
        retry_count: 2,
        retry_interval: Duration::from_secs(3),
        dedupe_interval: Duration::from_secs(30),
        refresh_interval: None,
        revalidate_on_focus: false,
        revalidate_on_reconnect: true,
        immutable: false,
    };

    pub const USAGE_CHART: FetchPolicy = FetchPolicy {
        retry_count: 2,
        retry_interval: Duration::from_secs(2),
        dedupe_interval: Duration::from_secs(5),
        refresh_interval: Some(Duration::from_secs(60)),
        revalidate_on_focus: false,
        revalidate_on_reconnect: true,
        immutable: false,
    };

    pub const APPS: FetchPolicy = FetchPolicy {
        retry_count: 2,
        retry_interval: Duration::from_secs(3),
        dedupe_interval: Duration::from_secs(60),
        refresh_interval: None,
        revalidate_on_focus: false,
        revalidate_on_reconnect: false,
        immutable: true,
    };
}

struct InFlight<T> {
    id: u64,
    request: SharedFetch<T>,
}

struct CacheEntry<T> {
    in_flight: Option<InFlight<T>>,
    data: Option<T>,
    error: Option<FetchError>,
    fetched_at: Option<Instant>,
    seeded: bool,
}

impl<T> Default for CacheEntry<T> {
    fn default() -> Self {
        Self {
            in_flight: None,
            data: None,
            error: None,
            fetched_at: None,
            seeded: false,
        }
    }
}

impl<T: Clone> CacheEntry<T> {
    fn fresh_data(&self, policy: &FetchPolicy) -> Option<T> {
        let data = self.data.as_ref()?;
        if policy.immutable {
            return Some(data.clone());
        }
        let fetched_at = self.fetched_at?;
        (fetched_at.elapsed() < policy.dedupe_interval).then(|| data.clone())
    }
}

/// Point-in-time view of one cache key
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot<T> {
    pub data: Option<T>,
    pub error: Option<FetchError>,
    pub is_validating: bool,
    pub seeded: bool,
}

/// Keyed request cache: one in-flight request per key, last good value kept
/// when a refresh fails.
pub struct RequestCache<T> {
    entries: Arc<Mutex<HashMap<String, CacheEntry<T>>>>,
    next_request: Arc<AtomicU64>,
}

impl<T> Clone for RequestCache<T> {
    fn clone(&self) -> Self {
        Self {
            entries: Arc::clone(&self.entries),
            next_request: Arc::clone(&self.next_request),
        }
    }
}

impl<T> Default for RequestCache<T> {
    fn default() -> Self {
        Self {
            entries: Arc::new(Mutex::new(HashMap::new())),
            next_request: Arc::new(AtomicU64::new(0)),
        }
    }
}

fn lock<T>(entries: &Mutex<HashMap<String, CacheEntry<T>>>) -> MutexGuard<'_, HashMap<String, CacheEntry<T>>> {
    entries.lock().unwrap_or_else(PoisonError::into_inner)
}

impl<T> RequestCache<T>
where
    T: Clone + Send + Sync + 'static,
{
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a value as freshly fetched so the first lookup needs no request.
    pub fn seed(&self, key: &str, value: T) {
        let mut entries = lock(&self.entries);
        let entry = entries.entry(key.to_string()).or_default();
        entry.data = Some(value);
        entry.error = None;
        entry.fetched_at = Some(Instant::now());
        entry.seeded = true;
    }

    pub fn snapshot(&self, key: &str) -> Snapshot<T> {
        let entries = lock(&self.entries);
        match entries.get(key) {
            Some(entry) => Snapshot {
                data: entry.data.clone(),
                error: entry.error.clone(),
                is_validating: entry.in_flight.is_some(),
                seeded: entry.seeded,
            },
            None => Snapshot {
                data: None,
                error: None,
                is_validating: false,
                seeded: false,
            },
        }
    }

    pub fn data(&self, key: &str) -> Option<T> {
        lock(&self.entries).get(key).and_then(|e| e.data.clone())
    }

    /// Forget `key`. A request still in flight for it resolves for its
    /// waiters but no longer writes back.
    pub fn remove(&self, key: &str) {
        if lock(&self.entries).remove(key).is_some() {
            debug!(%key, "evicted");
        }
    }

    /// Resolve `key`: join an in-flight request, serve fresh data, or start a
    /// new request (retried per `policy`). `force` skips the freshness check
    /// but still joins an in-flight request.
    pub async fn fetch<F, Fut>(
        &self,
        key: &str,
        policy: &FetchPolicy,
        force: bool,
        fetcher: F,
    ) -> Result<T, FetchError>
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<T, FetchError>> + Send + 'static,
    {
        let shared = {
            let mut entries = lock(&self.entries);
            let entry = entries.entry(key.to_string()).or_default();

            if let Some(in_flight) = &entry.in_flight {
                debug!(%key, "joining in-flight request");
                in_flight.request.clone()
            } else {
                let immutable_hit = policy.immutable && entry.data.is_some();
                if !force || immutable_hit {
                    if let Some(data) = entry.fresh_data(policy) {
                        debug!(%key, "serving cached data");
                        return Ok(data);
                    }
                }

                let id = self.next_request.fetch_add(1, Ordering::Relaxed);
                let request = self.spawn_request(key.to_string(), id, *policy, fetcher);
                entry.in_flight = Some(InFlight {
                    id,
                    request: request.clone(),
                });
                request
            }
        };

        shared.await
    }

    fn spawn_request<F, Fut>(
        &self,
        key: String,
        id: u64,
        policy: FetchPolicy,
        fetcher: F,
    ) -> SharedFetch<T>
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<T, FetchError>> + Send + 'static,
    {
        let entries = Arc::clone(&self.entries);

        // Runs to completion even if every waiter goes away, so the
        // in-flight slot is always cleared
        let handle = tokio::spawn(async move {
            let result = fetch_with_retry(&key, &policy, &fetcher).await;

            let mut entries = lock(&entries);
            // The key may have been removed, or removed and fetched anew
            let owned = entries
                .get_mut(&key)
                .filter(|entry| entry.in_flight.as_ref().is_some_and(|f| f.id == id));
            if let Some(entry) = owned {
                entry.in_flight = None;
                match &result {
                    Ok(value) => {
                        entry.data = Some(value.clone());
                        entry.error = None;
                        entry.fetched_at = Some(Instant::now());
                    }
                    Err(err) => entry.error = Some(err.clone()),
                }
            }
            result
        });

        async move { handle.await.unwrap_or(Err(FetchError::Cancelled)) }
            .boxed()
            .shared()
    }
}

async fn fetch_with_retry<T, F, Fut>(key: &str, policy: &FetchPolicy, fetcher: &F) -> Result<T, FetchError>
where
    F: Fn() -> Fut,
    Fut: Future<Output = Result<T, FetchError>>,
{
    let mut attempt = 0;
    loop {
        match fetcher().await {
            Ok(value) => return Ok(value),
            Err(err) if attempt < policy.retry_count => {
                attempt += 1;
                warn!(%key, attempt, error = %err, "request failed, retrying");
                tokio::time::sleep(policy.retry_interval).await;
            }
            Err(err) => {
                warn!(%key, error = %err, "request failed");
                return Err(err);
            }
        }
    }
}
