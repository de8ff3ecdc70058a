use indexmap::IndexMap;

use crate::i18n::Locale;
use crate::panel::{AppClient, DownloadLink};

/// Host operating system
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperatingSystem {
    Windows,
    MacOs,
    Linux,
    Android,
    Ios,
    Unknown,
}

impl OperatingSystem {
    pub fn detect() -> Self {
        Self::from_target(std::env::consts::OS)
    }

    /// Map a Rust target OS name (`std::env::consts::OS`)
    pub fn from_target(os: &str) -> Self {
        match os {
            "windows" => OperatingSystem::Windows,
            "macos" => OperatingSystem::MacOs,
            "ios" => OperatingSystem::Ios,
            "android" => OperatingSystem::Android,
            "linux" | "freebsd" | "openbsd" | "netbsd" | "dragonfly" => OperatingSystem::Linux,
            _ => OperatingSystem::Unknown,
        }
    }

    /// Platform key used by the app catalog. macOS shares the iOS apps.
    pub fn platform(&self) -> &'static str {
        match self {
            OperatingSystem::Windows => "windows",
            OperatingSystem::MacOs | OperatingSystem::Ios => "ios",
            OperatingSystem::Android => "android",
            OperatingSystem::Linux => "linux",
            OperatingSystem::Unknown => "other",
        }
    }
}

const BASE_ORDER: [&str; 5] = ["ios", "android", "windows", "linux", "other"];

/// Catalog platforms in display order, the host's platform first
pub fn platform_priority(os: OperatingSystem) -> Vec<&'static str> {
    let current = os.platform();
    std::iter::once(current)
        .chain(BASE_ORDER.into_iter().filter(|p| *p != current))
        .collect()
}

/// Apps of one platform, ready for display
#[derive(Debug, Clone, PartialEq)]
pub struct AppGroup {
    pub platform: &'static str,
    pub is_current: bool,
    pub apps: Vec<AppClient>,
}

/// Group apps by lowercase platform (`other` when missing) and order the
/// groups by [`platform_priority`]. Platforms outside the known set are not
/// shown.
pub fn group_apps(apps: &[AppClient], os: OperatingSystem) -> Vec<AppGroup> {
    let mut groups: IndexMap<String, Vec<AppClient>> = IndexMap::new();
    for app in apps {
        let key = if app.platform.trim().is_empty() {
            "other".to_string()
        } else {
            app.platform.trim().to_lowercase()
        };
        groups.entry(key).or_default().push(app.clone());
    }

    let current = os.platform();
    platform_priority(os)
        .into_iter()
        .filter_map(|platform| {
            let apps = groups.shift_remove(platform)?;
            Some(AppGroup {
                platform,
                is_current: platform == current,
                apps,
            })
        })
        .collect()
}

/// Description in the UI language, English otherwise, empty if neither
pub fn app_description(app: &AppClient, locale: Locale) -> &str {
    app.description
        .get(locale.as_str())
        .filter(|d| !d.is_empty())
        .or_else(|| app.description.get("en"))
        .map(String::as_str)
        .unwrap_or_default()
}

/// Download links for the UI language, then English, then everything
pub fn download_links_for(app: &AppClient, locale: Locale) -> Vec<&DownloadLink> {
    let matching = |lang: &str| -> Vec<&DownloadLink> {
        app.download_links
            .iter()
            .filter(|link| link.language == lang)
            .collect()
    };

    let current = matching(locale.as_str());
    if !current.is_empty() {
        return current;
    }
    let english = matching("en");
    if !english.is_empty() {
        return english;
    }
    app.download_links.iter().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn app(name: &str, platform: &str) -> AppClient {
        AppClient {
            name: name.to_string(),
            platform: platform.to_string(),
            ..AppClient::default()
        }
    }

    fn link(name: &str, language: &str) -> DownloadLink {
        DownloadLink {
            name: name.to_string(),
            url: format!("https://dl.example.com/{}", name),
            language: language.to_string(),
        }
    }

    #[test]
    fn test_platform_mapping() {
        assert_eq!(OperatingSystem::from_target("macos").platform(), "ios");
        assert_eq!(OperatingSystem::from_target("linux").platform(), "linux");
        assert_eq!(OperatingSystem::from_target("windows").platform(), "windows");
        assert_eq!(OperatingSystem::from_target("haiku").platform(), "other");
    }

    #[test]
    fn test_priority_puts_current_first() {
        assert_eq!(
            platform_priority(OperatingSystem::Windows),
            vec!["windows", "ios", "android", "linux", "other"]
        );
        assert_eq!(
            platform_priority(OperatingSystem::Unknown),
            vec!["other", "ios", "android", "windows", "linux"]
        );
        assert_eq!(platform_priority(OperatingSystem::Ios), BASE_ORDER.to_vec());
    }

    #[test]
    fn test_group_apps() {
        let apps = vec![
            app("v2rayNG", "Android"),
            app("Hiddify", ""),
            app("Streisand", "ios"),
            app("NekoRay", "linux"),
            app("Husi", "android"),
            app("Odd", "playstation"),
        ];

        let groups = group_apps(&apps, OperatingSystem::Linux);
        let order: Vec<_> = groups.iter().map(|g| g.platform).collect();
        assert_eq!(order, vec!["linux", "ios", "android", "other"]);
        assert!(groups[0].is_current);
        assert!(!groups[1].is_current);

        let android: Vec<_> = groups[2].apps.iter().map(|a| a.name.as_str()).collect();
        assert_eq!(android, vec!["v2rayNG", "Husi"]);
        assert_eq!(groups[3].apps[0].name, "Hiddify");
    }

    #[test]
    fn test_description_fallback() {
        let mut app = app("Hiddify", "android");
        app.description.insert("en".to_string(), "Multi-core client".to_string());
        app.description.insert("fa".to_string(), "کلاینت".to_string());

        assert_eq!(app_description(&app, Locale::Fa), "کلاینت");
        assert_eq!(app_description(&app, Locale::Ru), "Multi-core client");
        assert_eq!(app_description(&AppClient::default(), Locale::En), "");
    }

    #[test]
    fn test_download_link_language_fallback() {
        let mut app = app("Hiddify", "android");
        app.download_links = vec![link("apk", "en"), link("bazaar", "fa"), link("rustore", "ru")];

        let names = |links: Vec<&DownloadLink>| -> Vec<String> {
            links.into_iter().map(|l| l.name.clone()).collect()
        };
        assert_eq!(names(download_links_for(&app, Locale::Fa)), vec!["bazaar"]);
        assert_eq!(names(download_links_for(&app, Locale::Zh)), vec!["apk"]);

        app.download_links = vec![link("a", "de"), link("b", "fr")];
        assert_eq!(names(download_links_for(&app, Locale::Zh)), vec!["a", "b"]);
    }
}
