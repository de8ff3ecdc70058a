use std::time::{Duration, Instant};

use chrono::{DateTime, Utc};
use tracing::debug;

use crate::app::platform::{download_links_for, group_apps, AppGroup, OperatingSystem};
use crate::app::time_range::TimeRange;
use crate::format::usage_percentage;
use crate::i18n::{Locale, Translate, Translator};
use crate::links::{parse_links, ParsedLink};
use crate::panel::{AppClient, ChartData, DataEvent, FetchError, UsageKey, UserInfo, UserStatus};
use crate::ui::theme::Theme;

/// Links shown before "show more"
pub const MAX_VISIBLE_LINKS: usize = 20;

/// How long a row keeps its "copied" mark
pub const COPY_RESET: Duration = Duration::from_secs(2);

const NOTIFICATION_TTL: Duration = Duration::from_secs(3);

/// Focusable dashboard panels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Panel {
    Links,
    Usage,
    Apps,
}

impl Panel {
    pub fn next(&self) -> Self {
        match self {
            Panel::Links => Panel::Usage,
            Panel::Usage => Panel::Apps,
            Panel::Apps => Panel::Links,
        }
    }
}

/// A row of the link list
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkRow {
    Subscription,
    Config(usize),
}

/// What was last copied
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CopyTarget {
    Row(LinkRow),
    AllLinks,
    AppImport(usize),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    Success,
    Error,
    Info,
}

/// Transient message in the footer
#[derive(Debug, Clone, PartialEq)]
pub struct Notification {
    pub message: String,
    pub kind: NotificationKind,
    pub until: Instant,
}

/// Everything the dashboard renders
#[derive(Debug)]
pub struct AppState {
    pub translator: Translator,
    pub theme: Theme,
    pub os: OperatingSystem,
    pub subscription_url: String,

    pub user: Option<UserInfo>,
    pub user_error: Option<FetchError>,
    pub user_loading: bool,
    pub refreshing: bool,

    pub links: Vec<String>,
    pub parsed_links: Vec<ParsedLink>,
    pub links_error: Option<FetchError>,
    pub show_all_links: bool,
    pub selected_row: usize,

    pub time_range: TimeRange,
    pub usage_key: Option<UsageKey>,
    pub chart: Option<ChartData>,
    pub chart_loading: bool,
    pub chart_error: Option<FetchError>,

    pub apps: Vec<AppClient>,
    pub apps_loading: bool,
    pub apps_error: Option<FetchError>,
    pub selected_app: usize,

    pub focus: Panel,
    pub qr_row: Option<LinkRow>,
    pub copied: Option<(CopyTarget, Instant)>,
    pub notification: Option<Notification>,
}

impl AppState {
    pub fn new(
        translator: Translator,
        theme: Theme,
        subscription_url: String,
        time_range: TimeRange,
        seeded_user: Option<UserInfo>,
    ) -> Self {
        let user_loading = seeded_user.is_none();
        Self {
            translator,
            theme,
            os: OperatingSystem::detect(),
            subscription_url,
            user: seeded_user,
            user_error: None,
            user_loading,
            refreshing: false,
            links: Vec::new(),
            parsed_links: Vec::new(),
            links_error: None,
            show_all_links: false,
            selected_row: 0,
            time_range,
            usage_key: None,
            chart: None,
            chart_loading: true,
            chart_error: None,
            apps: Vec::new(),
            apps_loading: true,
            apps_error: None,
            selected_app: 0,
            focus: Panel::Links,
            qr_row: None,
            copied: None,
            notification: None,
        }
    }

    pub fn locale(&self) -> Locale {
        self.translator.locale
    }

    pub fn t(&self, key: &str) -> String {
        self.translator.t(key)
    }

    /// Fold one fetch outcome into the state.
    pub fn apply(&mut self, event: DataEvent, now: Instant) {
        match event {
            DataEvent::UserInfo { result, manual } => {
                self.user_loading = false;
                let ok = result.is_ok();
                match result {
                    Ok(user) => {
                        self.user = Some(user);
                        self.user_error = None;
                    }
                    Err(err) => self.user_error = Some(err),
                }
                if manual {
                    self.refreshing = false;
                    if ok {
                        self.notify(self.t("refresh.done"), NotificationKind::Success, now);
                    } else {
                        self.notify(self.t("common.error"), NotificationKind::Error, now);
                    }
                }
            }
            DataEvent::ConfigLinks(result) => match result {
                Ok(links) => self.set_links(links),
                Err(err) => self.links_error = Some(err),
            },
            DataEvent::Usage { key, result } => {
                if self.usage_key != Some(key) {
                    debug!(?key, "dropping usage result for inactive range");
                    return;
                }
                self.chart_loading = false;
                match result {
                    Ok(chart) => {
                        self.chart = Some(chart);
                        self.chart_error = None;
                    }
                    Err(err) => self.chart_error = Some(err),
                }
            }
            DataEvent::Apps(result) => {
                self.apps_loading = false;
                match result {
                    Ok(apps) => {
                        self.apps = apps;
                        self.apps_error = None;
                        self.selected_app = self
                            .selected_app
                            .min(self.displayed_app_count().saturating_sub(1));
                    }
                    Err(err) => self.apps_error = Some(err),
                }
            }
            DataEvent::Reconnected => {}
        }
    }

    pub fn set_links(&mut self, links: Vec<String>) {
        self.parsed_links = parse_links(&links);
        self.links = links;
        self.links_error = None;
        self.selected_row = self.selected_row.min(self.row_count().saturating_sub(1));
    }

    /// Select a new chart window. Returns the key to fetch.
    pub fn set_time_range(&mut self, range: TimeRange, now: DateTime<Utc>) -> UsageKey {
        self.time_range = range;
        self.activate_usage_key(UsageKey::new(range, now))
    }

    pub fn activate_usage_key(&mut self, key: UsageKey) -> UsageKey {
        if self.usage_key != Some(key) {
            self.usage_key = Some(key);
            self.chart = None;
            self.chart_error = None;
            self.chart_loading = true;
        }
        key
    }

    pub fn status(&self) -> Option<UserStatus> {
        self.user.as_ref().map(|u| u.status)
    }

    pub fn is_disabled(&self) -> bool {
        matches!(
            self.status(),
            Some(UserStatus::Disabled) | Some(UserStatus::Unknown)
        )
    }

    pub fn can_refresh(&self) -> bool {
        !self.refreshing && !self.is_disabled()
    }

    /// Mark a manual refresh as started. False when refresh is unavailable.
    pub fn begin_refresh(&mut self) -> bool {
        if !self.can_refresh() {
            return false;
        }
        self.refreshing = true;
        true
    }

    pub fn usage_percentage(&self) -> f64 {
        self.user
            .as_ref()
            .map(|u| usage_percentage(u.used_traffic, u.data_limit))
            .unwrap_or(0.0)
    }

    /// Error page replaces the dashboard
    pub fn show_error_page(&self) -> bool {
        self.user.is_none() && self.user_error.is_some()
    }

    pub fn show_loading_page(&self) -> bool {
        self.user.is_none() && self.user_loading
    }

    pub fn visible_links(&self) -> &[ParsedLink] {
        if self.show_all_links {
            &self.parsed_links
        } else {
            &self.parsed_links[..self.parsed_links.len().min(MAX_VISIBLE_LINKS)]
        }
    }

    /// Links beyond the collapsed limit
    pub fn overflow_count(&self) -> usize {
        self.parsed_links.len().saturating_sub(MAX_VISIBLE_LINKS)
    }

    pub fn toggle_show_all(&mut self) {
        if self.overflow_count() == 0 {
            return;
        }
        self.show_all_links = !self.show_all_links;
        self.selected_row = self.selected_row.min(self.row_count().saturating_sub(1));
    }

    /// Subscription row plus visible links
    pub fn row_count(&self) -> usize {
        1 + self.visible_links().len()
    }

    pub fn selected_link_row(&self) -> LinkRow {
        match self.selected_row {
            0 => LinkRow::Subscription,
            n => LinkRow::Config(n - 1),
        }
    }

    pub fn select_next(&mut self) {
        match self.focus {
            Panel::Links => {
                if self.selected_row + 1 < self.row_count() {
                    self.selected_row += 1;
                }
            }
            Panel::Apps => {
                if self.selected_app + 1 < self.displayed_app_count() {
                    self.selected_app += 1;
                }
            }
            Panel::Usage => {}
        }
    }

    pub fn select_prev(&mut self) {
        match self.focus {
            Panel::Links => self.selected_row = self.selected_row.saturating_sub(1),
            Panel::Apps => self.selected_app = self.selected_app.saturating_sub(1),
            Panel::Usage => {}
        }
    }

    pub fn row_text(&self, row: LinkRow) -> Option<&str> {
        match row {
            LinkRow::Subscription => Some(self.subscription_url.as_str()),
            LinkRow::Config(i) => self.parsed_links.get(i).map(|l| l.raw.as_str()),
        }
    }

    /// Display name for a row
    pub fn row_label(&self, row: LinkRow) -> String {
        match row {
            LinkRow::Subscription => self.t("config.subscriptionLink"),
            LinkRow::Config(i) => self
                .parsed_links
                .get(i)
                .map(|l| l.name.clone())
                .unwrap_or_default(),
        }
    }

    /// Raw links separated by a blank line
    pub fn copy_all_text(&self) -> Option<String> {
        if self.links.is_empty() {
            None
        } else {
            Some(self.links.join("\n\n"))
        }
    }

    /// Apps in display order, grouped by platform
    pub fn app_groups(&self) -> Vec<AppGroup> {
        group_apps(&self.apps, self.os)
    }

    fn displayed_app_count(&self) -> usize {
        self.app_groups().iter().map(|g| g.apps.len()).sum()
    }

    pub fn selected_app_entry(&self) -> Option<AppClient> {
        self.app_groups()
            .into_iter()
            .flat_map(|g| g.apps)
            .nth(self.selected_app)
    }

    /// Import URL of the selected app, else its first download link
    pub fn selected_app_link(&self) -> Option<String> {
        let app = self.selected_app_entry()?;
        if !app.import_url.is_empty() {
            return Some(app.import_url);
        }
        download_links_for(&app, self.locale())
            .first()
            .map(|link| link.url.clone())
    }

    pub fn open_qr(&mut self) {
        let row = self.selected_link_row();
        if self.row_text(row).is_some() {
            self.qr_row = Some(row);
        }
    }

    pub fn close_qr(&mut self) {
        self.qr_row = None;
    }

    pub fn mark_copied(&mut self, target: CopyTarget, now: Instant) {
        self.copied = Some((target, now + COPY_RESET));
    }

    pub fn is_copied(&self, target: CopyTarget) -> bool {
        matches!(self.copied, Some((copied, _)) if copied == target)
    }

    pub fn notify(&mut self, message: String, kind: NotificationKind, now: Instant) {
        self.notification = Some(Notification {
            message,
            kind,
            until: now + NOTIFICATION_TTL,
        });
    }

    /// Expire copy marks and notifications whose deadline has passed.
    pub fn tick(&mut self, now: Instant) {
        if matches!(self.copied, Some((_, until)) if now >= until) {
            self.copied = None;
        }
        if matches!(&self.notification, Some(n) if now >= n.until) {
            self.notification = None;
        }
    }

    pub fn cycle_locale(&mut self) {
        self.translator.locale = self.translator.locale.next();
    }

    pub fn cycle_theme(&mut self) {
        self.theme = self.theme.next();
    }
}
