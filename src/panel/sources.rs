use std::future::Future;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, SecondsFormat, Utc};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info, warn};

use super::cache::{FetchPolicy, RequestCache};
use super::client::{FetchError, PanelClient};
use super::types::{AppClient, ChartData, InitialData, UserInfo};
use crate::app::time_range::{TimeRange, UsagePeriod};
use crate::links::{filter_config_links, links_from_text};

const USER_INFO_KEY: &str = "user-info";
const CONFIG_LINKS_KEY: &str = "config-links";
const APPS_KEY: &str = "apps";

/// Identity of one usage request; results for any other key are stale
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct UsageKey {
    pub start: DateTime<Utc>,
    pub period: UsagePeriod,
}

impl UsageKey {
    pub fn new(range: TimeRange, now: DateTime<Utc>) -> Self {
        let (start, period) = range.window(now);
        Self { start, period }
    }

    fn cache_key(&self) -> String {
        format!(
            "usage:{}:{}",
            self.start.to_rfc3339_opts(SecondsFormat::Millis, true),
            self.period.as_str()
        )
    }
}

/// Fetch outcomes delivered to the UI loop
#[derive(Debug, Clone)]
pub enum DataEvent {
    UserInfo {
        result: Result<UserInfo, FetchError>,
        /// Completion of a user-requested refresh
        manual: bool,
    },
    ConfigLinks(Result<Vec<String>, FetchError>),
    Usage {
        key: UsageKey,
        result: Result<ChartData, FetchError>,
    },
    Apps(Result<Vec<AppClient>, FetchError>),
    /// First success after a network failure
    Reconnected,
}

/// Tracks whether the panel was last seen unreachable
#[derive(Debug, Clone, Default)]
pub struct Connectivity {
    offline: Arc<AtomicBool>,
}

impl Connectivity {
    /// Record a request outcome. Returns true when this success ends an outage.
    pub fn record<T>(&self, result: &Result<T, FetchError>) -> bool {
        match result {
            Ok(_) => self.offline.swap(false, Ordering::SeqCst),
            Err(err) if err.is_transport() => {
                self.offline.store(true, Ordering::SeqCst);
                false
            }
            Err(_) => false,
        }
    }

    pub fn is_offline(&self) -> bool {
        self.offline.load(Ordering::SeqCst)
    }
}

#[derive(Clone)]
struct Loader {
    client: PanelClient,
    user: RequestCache<UserInfo>,
    links: RequestCache<Vec<String>>,
    usage: RequestCache<ChartData>,
    apps: RequestCache<Vec<AppClient>>,
    connectivity: Connectivity,
    tx: mpsc::UnboundedSender<DataEvent>,
}

impl Loader {
    fn send(&self, event: DataEvent) {
        // Receiver is gone only while the UI is shutting down
        let _ = self.tx.send(event);
    }

    fn observe<T>(&self, source: &str, result: &Result<T, FetchError>) {
        if let Err(err) = result {
            warn!(source, error = %err, "fetch failed");
        }
        if self.connectivity.record(result) {
            info!("panel reachable again");
            self.send(DataEvent::Reconnected);
        }
    }

    async fn load_user(&self, force: bool, manual: bool) {
        let client = self.client.clone();
        let result = self
            .user
            .fetch(USER_INFO_KEY, &FetchPolicy::USER_INFO, force, move || {
                let client = client.clone();
                async move { client.get_user_info().await }
            })
            .await;
        self.observe("user-info", &result);
        self.send(DataEvent::UserInfo { result, manual });
    }

    async fn load_links(&self, force: bool) {
        let client = self.client.clone();
        let result = self
            .links
            .fetch(CONFIG_LINKS_KEY, &FetchPolicy::CONFIG_LINKS, force, move || {
                let client = client.clone();
                async move {
                    client
                        .get_links_text()
                        .await
                        .map(|body| links_from_text(&body))
                }
            })
            .await;
        self.observe("config-links", &result);
        self.send(DataEvent::ConfigLinks(result));
    }

    async fn load_usage(&self, key: UsageKey, force: bool) {
        let client = self.client.clone();
        let result = self
            .usage
            .fetch(&key.cache_key(), &FetchPolicy::USAGE_CHART, force, move || {
                let client = client.clone();
                async move { client.get_usage(key.start, key.period).await }
            })
            .await;
        self.observe("usage", &result);
        self.send(DataEvent::Usage { key, result });
    }

    async fn load_apps(&self) {
        let client = self.client.clone();
        let result = self
            .apps
            .fetch(APPS_KEY, &FetchPolicy::APPS, false, move || {
                let client = client.clone();
                async move { client.get_apps().await }
            })
            .await;
        self.observe("apps", &result);
        self.send(DataEvent::Apps(result));
    }
}

fn spawn_poller<F, Fut>(every: Duration, tick: F) -> JoinHandle<()>
where
    F: Fn() -> Fut + Send + 'static,
    Fut: Future<Output = ()> + Send + 'static,
{
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(every);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
        // First tick fires immediately; the initial load is done elsewhere
        interval.tick().await;
        loop {
            interval.tick().await;
            tick().await;
        }
    })
}

/// The four dashboard data sources. Every fetch runs on its own task and
/// reports back through the event channel; pollers stop when this is dropped.
pub struct DataSources {
    loader: Loader,
    seeded_links: Option<Vec<String>>,
    usage_key: Option<UsageKey>,
    user_poller: Option<JoinHandle<()>>,
    usage_poller: Option<JoinHandle<()>>,
}

impl DataSources {
    pub fn new(
        client: PanelClient,
        initial: InitialData,
        tx: mpsc::UnboundedSender<DataEvent>,
    ) -> Self {
        let loader = Loader {
            client,
            user: RequestCache::new(),
            links: RequestCache::new(),
            usage: RequestCache::new(),
            apps: RequestCache::new(),
            connectivity: Connectivity::default(),
            tx,
        };

        if let Some(user) = initial.user {
            debug!("seeding user info");
            loader.user.seed(USER_INFO_KEY, user);
        }
        if let Some(apps) = initial.apps.filter(|apps| !apps.is_empty()) {
            debug!(count = apps.len(), "seeding app catalog");
            loader.apps.seed(APPS_KEY, apps);
        }
        let seeded_links = initial
            .links
            .map(filter_config_links)
            .filter(|links| !links.is_empty());

        Self {
            loader,
            seeded_links,
            usage_key: None,
            user_poller: None,
            usage_poller: None,
        }
    }

    /// Last user info held by the cache, seeded or fetched
    pub fn cached_user_info(&self) -> Option<UserInfo> {
        self.loader.user.data(USER_INFO_KEY)
    }

    pub fn active_usage_key(&self) -> Option<UsageKey> {
        self.usage_key
    }

    /// Kick off every source and the background pollers.
    pub fn start(&mut self, usage: UsageKey) {
        self.fetch_user_info();
        self.fetch_config_links();
        self.fetch_apps();
        self.fetch_usage_chart(usage);

        if let Some(every) = FetchPolicy::USER_INFO.refresh_interval {
            if let Some(handle) = self.user_poller.take() {
                handle.abort();
            }
            let loader = self.loader.clone();
            self.user_poller = Some(spawn_poller(every, move || {
                let loader = loader.clone();
                async move { loader.load_user(false, false).await }
            }));
        }
    }

    pub fn fetch_user_info(&self) {
        let loader = self.loader.clone();
        tokio::spawn(async move { loader.load_user(false, false).await });
    }

    /// Forced re-fetch; the resulting event has `manual` set.
    pub fn refresh_user_info(&self) {
        let loader = self.loader.clone();
        tokio::spawn(async move { loader.load_user(true, true).await });
    }

    pub fn fetch_config_links(&self) {
        if let Some(links) = &self.seeded_links {
            self.loader.send(DataEvent::ConfigLinks(Ok(links.clone())));
            return;
        }
        let loader = self.loader.clone();
        tokio::spawn(async move { loader.load_links(false).await });
    }

    /// Switch the active usage window, fetch it, and poll it from now on.
    /// The previous window's cached chart is dropped.
    pub fn fetch_usage_chart(&mut self, key: UsageKey) {
        if let Some(previous) = self.usage_key.replace(key) {
            if previous != key {
                self.loader.usage.remove(&previous.cache_key());
            }
        }

        let loader = self.loader.clone();
        tokio::spawn(async move { loader.load_usage(key, false).await });

        if let Some(handle) = self.usage_poller.take() {
            handle.abort();
        }
        if let Some(every) = FetchPolicy::USAGE_CHART.refresh_interval {
            let loader = self.loader.clone();
            self.usage_poller = Some(spawn_poller(every, move || {
                let loader = loader.clone();
                async move { loader.load_usage(key, false).await }
            }));
        }
    }

    pub fn fetch_apps(&self) {
        let loader = self.loader.clone();
        tokio::spawn(async move { loader.load_apps().await });
    }

    /// Terminal regained focus
    pub fn on_focus(&self) {
        if FetchPolicy::USER_INFO.revalidate_on_focus {
            self.fetch_user_info();
        }
        if FetchPolicy::CONFIG_LINKS.revalidate_on_focus && self.seeded_links.is_none() {
            self.fetch_config_links();
        }
        if FetchPolicy::USAGE_CHART.revalidate_on_focus {
            self.revalidate_usage(false);
        }
    }

    /// Panel answered again after a network failure
    pub fn on_reconnect(&self) {
        if FetchPolicy::USER_INFO.revalidate_on_reconnect {
            let loader = self.loader.clone();
            tokio::spawn(async move { loader.load_user(true, false).await });
        }
        if FetchPolicy::CONFIG_LINKS.revalidate_on_reconnect && self.seeded_links.is_none() {
            let loader = self.loader.clone();
            tokio::spawn(async move { loader.load_links(true).await });
        }
        if FetchPolicy::USAGE_CHART.revalidate_on_reconnect {
            self.revalidate_usage(true);
        }
    }

    fn revalidate_usage(&self, force: bool) {
        if let Some(key) = self.usage_key {
            let loader = self.loader.clone();
            tokio::spawn(async move { loader.load_usage(key, force).await });
        }
    }

    pub fn is_polling(&self) -> bool {
        self.user_poller.is_some() || self.usage_poller.is_some()
    }

    pub fn stop(&mut self) {
        for handle in [self.user_poller.take(), self.usage_poller.take()]
            .into_iter()
            .flatten()
        {
            handle.abort();
        }
    }
}

impl Drop for DataSources {
    fn drop(&mut self) {
        self.stop();
    }
}
