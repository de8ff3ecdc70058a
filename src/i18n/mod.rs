mod en;
mod fa;
mod ru;
mod zh;

use serde::{Deserialize, Serialize};

/// Key → localized text lookup handed to the formatters
pub trait Translate {
    fn t(&self, key: &str) -> String;
}

impl<F> Translate for F
where
    F: Fn(&str) -> String,
{
    fn t(&self, key: &str) -> String {
        self(key)
    }
}

/// Supported UI locales
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    En,
    Fa,
    Ru,
    Zh,
}

impl Locale {
    pub fn all() -> [Locale; 4] {
        [Locale::En, Locale::Fa, Locale::Ru, Locale::Zh]
    }

    /// Accepts bare tags and region/encoding suffixed forms ("fa-IR", "en_US.UTF-8").
    pub fn from_str(s: &str) -> Option<Self> {
        let lower = s.trim().to_lowercase();
        let lang = lower
            .split(['-', '_', '.'])
            .next()
            .unwrap_or_default();
        match lang {
            "en" => Some(Locale::En),
            "fa" => Some(Locale::Fa),
            "ru" => Some(Locale::Ru),
            "zh" => Some(Locale::Zh),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Locale::En => "en",
            Locale::Fa => "fa",
            Locale::Ru => "ru",
            Locale::Zh => "zh",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Locale::En => "English",
            Locale::Fa => "فارسی",
            Locale::Ru => "Русский",
            Locale::Zh => "中文",
        }
    }

    /// Tag used to pick a date formatting strategy
    pub fn date_tag(&self) -> &'static str {
        match self {
            Locale::Fa => "fa-IR",
            other => other.as_str(),
        }
    }

    pub fn is_rtl(&self) -> bool {
        matches!(self, Locale::Fa)
    }

    pub fn next(&self) -> Self {
        match self {
            Locale::En => Locale::Fa,
            Locale::Fa => Locale::Ru,
            Locale::Ru => Locale::Zh,
            Locale::Zh => Locale::En,
        }
    }

    fn lookup(&self, key: &str) -> Option<&'static str> {
        match self {
            Locale::En => en::lookup(key),
            Locale::Fa => fa::lookup(key),
            Locale::Ru => ru::lookup(key),
            Locale::Zh => zh::lookup(key),
        }
    }
}

impl Default for Locale {
    fn default() -> Self {
        Locale::Fa
    }
}

/// Active locale plus the locale consulted for missing keys
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Translator {
    pub locale: Locale,
    pub fallback: Locale,
}

impl Translator {
    pub fn new(locale: Locale, fallback: Locale) -> Self {
        Self { locale, fallback }
    }
}

impl Default for Translator {
    fn default() -> Self {
        Self::new(Locale::default(), Locale::default())
    }
}

impl Translate for Translator {
    fn t(&self, key: &str) -> String {
        self.locale
            .lookup(key)
            .or_else(|| self.fallback.lookup(key))
            .map(str::to_string)
            .unwrap_or_else(|| key.to_string())
    }
}

impl Translate for Locale {
    fn t(&self, key: &str) -> String {
        Translator::new(*self, Locale::default()).t(key)
    }
}

/// Keys every locale table is expected to cover
#[cfg(test)]
pub(crate) const REQUIRED_KEYS: &[&str] = &[
    "dashboard.title",
    "expires",
    "expired",
    "online",
    "notConnectedYet",
    "time.year",
    "time.years",
    "time.month",
    "time.months",
    "time.day",
    "time.days",
    "time.hour",
    "time.hours",
    "time.min",
    "time.mins",
    "time.second",
    "time.seconds",
    "time.ago",
    "userInfo.unlimited",
    "userInfo.available",
    "userInfo.duration",
    "userInfo.expiryDate",
    "userInfo.used",
    "userInfo.total",
    "userInfo.remaining",
    "userInfo.lifetime",
    "userInfo.lastOnline",
    "status.active",
    "status.disabled",
    "status.limited",
    "status.expired",
    "status.on_hold",
    "config.title",
    "config.subscriptionLink",
    "config.showMore",
    "config.showLess",
    "config.more",
    "config.hidden",
    "qr.title",
    "qr.tooLong",
    "apps.title",
    "apps.currentOS",
    "apps.recommended",
    "apps.import",
    "apps.copyAll",
    "apps.copyAllSuccess",
    "apps.platform.ios",
    "apps.platform.android",
    "apps.platform.windows",
    "apps.platform.linux",
    "apps.platform.other",
    "usage.title",
    "usage.totalUsage",
    "usage.noData",
    "common.loading",
    "common.error",
    "clipboard.copied",
    "clipboard.failed",
    "clipboard.notSupported",
    "common.retry",
    "refresh.refreshing",
    "refresh.disabled",
    "refresh.done",
    "help.quit",
    "help.refresh",
    "help.copy",
    "help.qr",
    "help.more",
    "help.range",
    "help.language",
    "help.theme",
    "help.tab",
    "help.close",
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_locale_from_str() {
        assert_eq!(Locale::from_str("en"), Some(Locale::En));
        assert_eq!(Locale::from_str("fa-IR"), Some(Locale::Fa));
        assert_eq!(Locale::from_str("ru_RU.UTF-8"), Some(Locale::Ru));
        assert_eq!(Locale::from_str("ZH"), Some(Locale::Zh));
        assert_eq!(Locale::from_str("de"), None);
    }

    #[test]
    fn test_persian_is_default_and_rtl() {
        assert_eq!(Locale::default(), Locale::Fa);
        assert!(Locale::Fa.is_rtl());
        assert!(!Locale::En.is_rtl());
        assert_eq!(Locale::Fa.date_tag(), "fa-IR");
        assert_eq!(Locale::Ru.date_tag(), "ru");
    }

    #[test]
    fn test_every_locale_covers_required_keys() {
        for locale in Locale::all() {
            for key in REQUIRED_KEYS {
                assert!(
                    locale.lookup(key).is_some(),
                    "{} is missing {}",
                    locale.as_str(),
                    key
                );
            }
        }
    }

    #[test]
    fn test_translator_fallback_chain() {
        let translator = Translator::new(Locale::En, Locale::Fa);
        assert_eq!(translator.t("time.ago"), "ago");
        assert_eq!(translator.t("no.such.key"), "no.such.key");
    }

    #[test]
    fn test_closure_translate() {
        let t = |key: &str| format!("<{}>", key);
        assert_eq!(t.t("online"), "<online>");
    }

    #[test]
    fn test_locale_cycle() {
        let mut locale = Locale::En;
        for _ in 0..4 {
            locale = locale.next();
        }
        assert_eq!(locale, Locale::En);
    }
}
