use anyhow::{Context, Result};
use chrono::{DateTime, SecondsFormat, Utc};
use url::Url;

use crate::app::time_range::UsagePeriod;

/// Resolved panel URLs for one subscription
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    /// `scheme://host[:port]`, no trailing slash
    base: String,
    /// Subscription path without a trailing slash or `/info`
    path: String,
}

impl Endpoints {
    /// Resolve from the subscription URL the user was given. A configured
    /// panel domain replaces the URL's origin.
    pub fn from_subscription_url(subscription_url: &str, panel_domain: Option<&str>) -> Result<Self> {
        let url = Url::parse(subscription_url.trim())
            .with_context(|| format!("Invalid subscription URL: {}", subscription_url))?;
        if !matches!(url.scheme(), "http" | "https") {
            anyhow::bail!("Subscription URL must be http(s): {}", subscription_url);
        }

        let base = match panel_domain.map(str::trim).filter(|d| !d.is_empty()) {
            Some(domain) => {
                let domain_url = Url::parse(domain)
                    .with_context(|| format!("Invalid panel domain: {}", domain))?;
                domain_url.origin().ascii_serialization()
            }
            None => url.origin().ascii_serialization(),
        };

        let path = url.path().trim_end_matches('/');
        let path = path.strip_suffix("/info").unwrap_or(path).to_string();

        Ok(Self { base, path })
    }

    pub fn base(&self) -> &str {
        &self.base
    }

    /// Link handed to client apps
    pub fn subscription_url(&self) -> String {
        format!("{}{}", self.base, self.path)
    }

    pub fn info_url(&self) -> String {
        format!("{}{}/info", self.base, self.path)
    }

    pub fn links_url(&self) -> String {
        format!("{}{}/links", self.base, self.path)
    }

    pub fn usage_url(&self, start: DateTime<Utc>, period: UsagePeriod) -> String {
        let query = url::form_urlencoded::Serializer::new(String::new())
            .append_pair("start", &start.to_rfc3339_opts(SecondsFormat::Millis, true))
            .append_pair("period", period.as_str())
            .finish();
        format!("{}{}/usage?{}", self.base, self.path, query)
    }

    pub fn apps_url(&self) -> String {
        format!("{}{}/apps", self.base, self.path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_origin_and_path() {
        let endpoints =
            Endpoints::from_subscription_url("https://panel.example.com/sub/abc123", None).unwrap();
        assert_eq!(endpoints.base(), "https://panel.example.com");
        assert_eq!(
            endpoints.subscription_url(),
            "https://panel.example.com/sub/abc123"
        );
        assert_eq!(
            endpoints.info_url(),
            "https://panel.example.com/sub/abc123/info"
        );
        assert_eq!(
            endpoints.links_url(),
            "https://panel.example.com/sub/abc123/links"
        );
        assert_eq!(
            endpoints.apps_url(),
            "https://panel.example.com/sub/abc123/apps"
        );
    }

    #[test]
    fn test_info_suffix_and_trailing_slash_are_stripped() {
        let endpoints =
            Endpoints::from_subscription_url("https://panel.example.com:8443/sub/abc/info/", None)
                .unwrap();
        assert_eq!(
            endpoints.subscription_url(),
            "https://panel.example.com:8443/sub/abc"
        );
    }

    #[test]
    fn test_panel_domain_overrides_origin() {
        let endpoints = Endpoints::from_subscription_url(
            "http://10.0.0.1:8000/sub/abc",
            Some("https://cdn.example.org/"),
        )
        .unwrap();
        assert_eq!(endpoints.info_url(), "https://cdn.example.org/sub/abc/info");
    }

    #[test]
    fn test_usage_url_query() {
        let endpoints =
            Endpoints::from_subscription_url("https://panel.example.com/sub/abc", None).unwrap();
        let start = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap();
        assert_eq!(
            endpoints.usage_url(start, UsagePeriod::Hour),
            "https://panel.example.com/sub/abc/usage?start=2025-01-01T00%3A00%3A00.000Z&period=hour"
        );
    }

    #[test]
    fn test_rejects_bad_urls() {
        assert!(Endpoints::from_subscription_url("not a url", None).is_err());
        assert!(Endpoints::from_subscription_url("ftp://host/sub", None).is_err());
        assert!(
            Endpoints::from_subscription_url("https://host/sub", Some("::nope::")).is_err()
        );
    }
}
