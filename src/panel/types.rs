use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize};

use crate::format::Timestamp;

/// The panel sends `null` for unset numbers, strings and lists
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

/// Subscription status
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum UserStatus {
    Active,
    Disabled,
    Limited,
    Expired,
    OnHold,
    #[serde(other)]
    Unknown,
}

impl UserStatus {
    /// Translation key suffix under `status.`
    pub fn as_str(&self) -> &'static str {
        match self {
            UserStatus::Active => "active",
            UserStatus::Disabled => "disabled",
            UserStatus::Limited => "limited",
            UserStatus::Expired => "expired",
            UserStatus::OnHold => "on_hold",
            // Rendered like a disabled account
            UserStatus::Unknown => "disabled",
        }
    }
}

impl Default for UserStatus {
    fn default() -> Self {
        UserStatus::Unknown
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VmessSettings {
    pub id: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VlessSettings {
    pub id: String,
    #[serde(default)]
    pub flow: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TrojanSettings {
    pub password: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ShadowsocksSettings {
    pub password: String,
    #[serde(default)]
    pub method: String,
}

/// Per-protocol credentials attached to the user
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProxySettings {
    pub vmess: Option<VmessSettings>,
    pub vless: Option<VlessSettings>,
    pub trojan: Option<TrojanSettings>,
    pub shadowsocks: Option<ShadowsocksSettings>,
}

/// Plan applied once the current one runs out
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NextPlan {
    pub user_template_id: Option<i64>,
    #[serde(deserialize_with = "null_as_default")]
    pub data_limit: u64,
    pub expire: Option<Timestamp>,
    #[serde(deserialize_with = "null_as_default")]
    pub add_remaining_traffic: bool,
}

/// User info from GET {base}/info
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UserInfo {
    #[serde(deserialize_with = "null_as_default")]
    pub id: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub username: String,
    #[serde(deserialize_with = "null_as_default")]
    pub status: UserStatus,
    #[serde(deserialize_with = "null_as_default")]
    pub proxy_settings: ProxySettings,
    pub expire: Option<Timestamp>,
    /// Bytes; 0 means unlimited
    #[serde(deserialize_with = "null_as_default")]
    pub data_limit: u64,
    #[serde(deserialize_with = "null_as_default")]
    pub data_limit_reset_strategy: String,
    /// Seconds of validity granted once an on-hold account first connects
    pub on_hold_expire_duration: Option<u64>,
    pub on_hold_timeout: Option<Timestamp>,
    #[serde(deserialize_with = "null_as_default")]
    pub group_ids: Vec<i64>,
    pub next_plan: Option<NextPlan>,
    #[serde(deserialize_with = "null_as_default")]
    pub used_traffic: u64,
    #[serde(deserialize_with = "null_as_default")]
    pub lifetime_used_traffic: u64,
    pub created_at: Option<Timestamp>,
    pub edit_at: Option<Timestamp>,
    pub online_at: Option<Timestamp>,
}

impl UserInfo {
    pub fn is_unlimited_traffic(&self) -> bool {
        self.data_limit == 0
    }

    pub fn remaining_traffic(&self) -> Option<u64> {
        if self.is_unlimited_traffic() {
            None
        } else {
            Some(self.data_limit.saturating_sub(self.used_traffic))
        }
    }

    pub fn has_expiry(&self) -> bool {
        self.expire.as_ref().is_some_and(|e| !e.is_unset())
    }
}

/// One usage bucket
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UsageDataPoint {
    #[serde(default, deserialize_with = "null_as_default")]
    pub total_traffic: u64,
    pub period_start: String,
}

/// Usage series from GET {base}/usage
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartData {
    #[serde(deserialize_with = "null_as_default")]
    pub period: String,
    #[serde(deserialize_with = "null_as_default")]
    pub start: String,
    #[serde(deserialize_with = "null_as_default")]
    pub end: String,
    /// Series in server order; the first one is displayed
    #[serde(deserialize_with = "null_as_default")]
    pub stats: IndexMap<String, Vec<UsageDataPoint>>,
}

impl ChartData {
    pub fn primary_series(&self) -> &[UsageDataPoint] {
        self.stats
            .first()
            .map(|(_, points)| points.as_slice())
            .unwrap_or_default()
    }

    pub fn total_traffic(&self) -> u64 {
        self.primary_series().iter().map(|p| p.total_traffic).sum()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DownloadLink {
    pub name: String,
    pub url: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub language: String,
}

/// Client application entry from GET {base}/apps
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppClient {
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub icon_url: String,
    #[serde(deserialize_with = "null_as_default")]
    pub import_url: String,
    #[serde(deserialize_with = "null_as_default")]
    pub description: IndexMap<String, String>,
    #[serde(deserialize_with = "null_as_default")]
    pub recommended: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub platform: String,
    #[serde(deserialize_with = "null_as_default")]
    pub download_links: Vec<DownloadLink>,
}

/// Snapshot embedded by the panel so the first render needs no round trip
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InitialData {
    pub user: Option<UserInfo>,
    pub links: Option<Vec<String>>,
    pub apps: Option<Vec<AppClient>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_info_from_panel_payload() {
        let body = r#"{
            "proxy_settings": {"vless": {"id": "abc", "flow": ""}},
            "expire": "2026-01-01T00:00:00",
            "data_limit": 107374182400,
            "data_limit_reset_strategy": "no_reset",
            "on_hold_expire_duration": 0,
            "on_hold_timeout": null,
            "group_ids": [1],
            "next_plan": null,
            "id": 7,
            "username": "alice",
            "status": "on_hold",
            "used_traffic": 5368709120,
            "lifetime_used_traffic": 10737418240,
            "created_at": "2025-01-01T00:00:00",
            "edit_at": null,
            "online_at": null
        }"#;
        let user: UserInfo = serde_json::from_str(body).unwrap();

        assert_eq!(user.status, UserStatus::OnHold);
        assert_eq!(user.username, "alice");
        assert!(user.has_expiry());
        assert_eq!(user.remaining_traffic(), Some(107374182400 - 5368709120));
        assert_eq!(user.proxy_settings.vless.unwrap().id, "abc");
        assert!(user.online_at.is_none());
    }

    #[test]
    fn test_unknown_status_and_missing_fields() {
        let user: UserInfo = serde_json::from_str(r#"{"status": "suspended"}"#).unwrap();
        assert_eq!(user.status, UserStatus::Unknown);
        assert_eq!(user.status.as_str(), "disabled");
        assert!(user.is_unlimited_traffic());
        assert_eq!(user.remaining_traffic(), None);
        assert!(!user.has_expiry());
    }

    #[test]
    fn test_null_fields_read_as_defaults() {
        let body = r#"{
            "id": 3,
            "username": "carol",
            "status": "active",
            "proxy_settings": null,
            "expire": null,
            "data_limit": null,
            "data_limit_reset_strategy": null,
            "on_hold_expire_duration": null,
            "group_ids": null,
            "next_plan": null,
            "used_traffic": null,
            "lifetime_used_traffic": null,
            "online_at": null
        }"#;
        let user: UserInfo = serde_json::from_str(body).unwrap();

        assert_eq!(user.username, "carol");
        assert_eq!(user.status, UserStatus::Active);
        assert!(user.is_unlimited_traffic());
        assert_eq!(user.remaining_traffic(), None);
        assert_eq!(user.used_traffic, 0);
        assert_eq!(user.lifetime_used_traffic, 0);
        assert!(user.data_limit_reset_strategy.is_empty());
        assert!(user.group_ids.is_empty());
        assert!(!user.has_expiry());
    }

    #[test]
    fn test_app_with_null_fields() {
        let body = r#"[{
            "name": "Hiddify",
            "icon_url": null,
            "import_url": null,
            "description": null,
            "recommended": null,
            "platform": "android",
            "download_links": [
                {"name": "Play Store", "url": "https://example.com/a", "language": null}
            ]
        }]"#;
        let apps: Vec<AppClient> = serde_json::from_str(body).unwrap();

        assert_eq!(apps[0].name, "Hiddify");
        assert!(apps[0].icon_url.is_empty());
        assert!(apps[0].import_url.is_empty());
        assert!(apps[0].description.is_empty());
        assert!(!apps[0].recommended);
        assert_eq!(apps[0].download_links[0].language, "");
    }

    #[test]
    fn test_chart_data_keeps_series_order() {
        let body = r#"{
            "period": "day",
            "start": "2025-01-01T00:00:00Z",
            "end": "2025-01-03T00:00:00Z",
            "stats": {
                "zeta": [{"period_start": "2025-01-01T00:00:00Z", "total_traffic": 10}],
                "alpha": [{"period_start": "2025-01-01T00:00:00Z", "total_traffic": 99}]
            }
        }"#;
        let chart: ChartData = serde_json::from_str(body).unwrap();
        assert_eq!(chart.primary_series().len(), 1);
        assert_eq!(chart.total_traffic(), 10);

        assert!(ChartData::default().primary_series().is_empty());
    }
}
