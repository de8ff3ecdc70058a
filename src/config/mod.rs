use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::app::time_range::TimeRange;
use crate::i18n::{Locale, Translator};
use crate::panel::InitialData;
use crate::ui::theme::Theme;

/// subdash configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Subscription URL handed out by the panel
    #[serde(default)]
    pub subscription_url: Option<String>,

    /// Replaces the subscription URL's origin for API calls
    #[serde(default)]
    pub panel_domain: Option<String>,

    /// UI language; detected from the environment when unset
    #[serde(default)]
    pub locale: Option<Locale>,

    /// Language used for untranslated strings
    #[serde(default)]
    pub fallback_locale: Locale,

    #[serde(default)]
    pub theme: Theme,

    /// Initial usage chart window
    #[serde(default)]
    pub time_range: TimeRange,

    /// JSON snapshot `{ user, links, apps }` rendered before the first fetch
    #[serde(default)]
    pub initial_data_path: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            subscription_url: None,
            panel_domain: None,
            locale: None,
            fallback_locale: Locale::Fa,
            theme: Theme::default(),
            time_range: TimeRange::D7,
            initial_data_path: None,
        }
    }
}

/// Values given on the command line; `None` keeps the stored value
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub subscription_url: Option<String>,
    pub panel_domain: Option<String>,
    pub locale: Option<Locale>,
    pub theme: Option<Theme>,
    pub time_range: Option<TimeRange>,
    pub initial_data_path: Option<PathBuf>,
}

impl AppConfig {
    /// Get the default config file path
    pub fn default_path() -> Result<PathBuf> {
        let config_dir =
            dirs::config_dir().ok_or_else(|| anyhow::anyhow!("Could not find config directory"))?;

        Ok(config_dir.join("subdash").join("config.yaml"))
    }

    pub fn load() -> Result<Self> {
        Self::load_from(&Self::default_path()?)
    }

    /// Load from `path`, or defaults when the file does not exist
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let config: AppConfig = serde_yaml::from_str(&contents)
            .with_context(|| format!("Invalid config file {}", path.display()))?;
        Ok(config)
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::default_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let contents = serde_yaml::to_string(self)?;
        fs::write(path, contents)
            .with_context(|| format!("Failed to write {}", path.display()))?;

        Ok(())
    }

    /// Merge command line arguments into config
    pub fn merge_cli(&mut self, cli: CliOverrides) {
        if let Some(url) = cli.subscription_url {
            self.subscription_url = Some(url);
        }
        if let Some(domain) = cli.panel_domain {
            self.panel_domain = Some(domain).filter(|d| !d.trim().is_empty());
        }
        if let Some(locale) = cli.locale {
            self.locale = Some(locale);
        }
        if let Some(theme) = cli.theme {
            self.theme = theme;
        }
        if let Some(range) = cli.time_range {
            self.time_range = range;
        }
        if let Some(path) = cli.initial_data_path {
            self.initial_data_path = Some(path);
        }
    }

    /// Configured locale, else `LC_ALL` / `LANG`, else the fallback
    pub fn resolve_locale(&self) -> Locale {
        self.locale
            .or_else(|| {
                ["LC_ALL", "LC_MESSAGES", "LANG"]
                    .iter()
                    .filter_map(|var| std::env::var(var).ok())
                    .find_map(|value| Locale::from_str(&value))
            })
            .unwrap_or(self.fallback_locale)
    }

    pub fn translator(&self) -> Translator {
        Translator::new(self.resolve_locale(), self.fallback_locale)
    }

    /// Read the initial payload, if one is configured
    pub fn load_initial_data(&self) -> Result<InitialData> {
        match &self.initial_data_path {
            Some(path) => load_initial_data(path),
            None => Ok(InitialData::default()),
        }
    }
}

pub fn load_initial_data(path: &Path) -> Result<InitialData> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("Failed to read initial data {}", path.display()))?;
    let data = serde_json::from_str(&contents)
        .with_context(|| format!("Invalid initial data in {}", path.display()))?;
    Ok(data)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch_path(name: &str) -> PathBuf {
        std::env::temp_dir()
            .join(format!("subdash-test-{}", std::process::id()))
            .join(name)
    }

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.fallback_locale, Locale::Fa);
        assert_eq!(config.time_range, TimeRange::D7);
        assert_eq!(config.theme, Theme::Dark);
        assert!(config.subscription_url.is_none());
    }

    #[test]
    fn test_partial_yaml_fills_defaults() {
        let config: AppConfig = serde_yaml::from_str(
            "subscription_url: https://p.example.com/sub/x\nlocale: ru\ntime_range: 30d\n",
        )
        .unwrap();
        assert_eq!(
            config.subscription_url.as_deref(),
            Some("https://p.example.com/sub/x")
        );
        assert_eq!(config.locale, Some(Locale::Ru));
        assert_eq!(config.resolve_locale(), Locale::Ru);
        assert_eq!(config.time_range, TimeRange::D30);
        assert_eq!(config.fallback_locale, Locale::Fa);
    }

    #[test]
    fn test_save_and_load() {
        let path = scratch_path("config.yaml");
        let config = AppConfig {
            subscription_url: Some("https://p.example.com/sub/x".to_string()),
            theme: Theme::Nord,
            ..AppConfig::default()
        };
        config.save_to(&path).unwrap();
        assert_eq!(AppConfig::load_from(&path).unwrap(), config);

        let missing = scratch_path("missing.yaml");
        assert_eq!(AppConfig::load_from(&missing).unwrap(), AppConfig::default());
    }

    #[test]
    fn test_merge_cli() {
        let mut config = AppConfig {
            panel_domain: Some("https://old.example.com".to_string()),
            ..AppConfig::default()
        };
        config.merge_cli(CliOverrides {
            locale: Some(Locale::Zh),
            panel_domain: Some("".to_string()),
            time_range: Some(TimeRange::H24),
            ..CliOverrides::default()
        });
        assert_eq!(config.locale, Some(Locale::Zh));
        assert_eq!(config.panel_domain, None);
        assert_eq!(config.time_range, TimeRange::H24);
        assert_eq!(config.theme, Theme::Dark);
    }

    #[test]
    fn test_load_initial_data() {
        let path = scratch_path("initial.json");
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(
            &path,
            r#"{"user": {"username": "alice", "status": "active"}, "links": ["vless://a@h:1"]}"#,
        )
        .unwrap();

        let config = AppConfig {
            initial_data_path: Some(path),
            ..AppConfig::default()
        };
        let data = config.load_initial_data().unwrap();
        assert_eq!(data.user.unwrap().username, "alice");
        assert_eq!(data.links.unwrap().len(), 1);
        assert!(data.apps.is_none());

        assert!(AppConfig::default().load_initial_data().unwrap().user.is_none());
    }
}
