use ratatui::style::{Color, Modifier, Style};
use serde::{Deserialize, Serialize};

use crate::links::Protocol;
use crate::panel::UserStatus;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Dark,
    Light,
    Dracula,
    Nord,
}

/// Resolved colors for one theme
#[derive(Debug, Clone, Copy)]
pub struct Palette {
    pub accent: Color,
    pub text: Color,
    pub muted: Color,
    pub border: Color,
    pub selection: Color,
    pub good: Color,
    pub warn: Color,
    pub bad: Color,
}

const DARK: Palette = Palette {
    accent: Color::Cyan,
    text: Color::White,
    muted: Color::Gray,
    border: Color::DarkGray,
    selection: Color::Cyan,
    good: Color::Green,
    warn: Color::Yellow,
    bad: Color::Red,
};

const LIGHT: Palette = Palette {
    accent: Color::Blue,
    text: Color::Black,
    muted: Color::DarkGray,
    border: Color::Gray,
    selection: Color::Blue,
    good: Color::Green,
    warn: Color::Rgb(181, 118, 20),
    bad: Color::Red,
};

const DRACULA: Palette = Palette {
    accent: Color::Rgb(189, 147, 249),
    text: Color::Rgb(248, 248, 242),
    muted: Color::Rgb(98, 114, 164),
    border: Color::Rgb(68, 71, 90),
    selection: Color::Rgb(255, 121, 198),
    good: Color::Rgb(80, 250, 123),
    warn: Color::Rgb(241, 250, 140),
    bad: Color::Rgb(255, 85, 85),
};

const NORD: Palette = Palette {
    accent: Color::Rgb(136, 192, 208),
    text: Color::Rgb(236, 239, 244),
    muted: Color::Rgb(129, 161, 193),
    border: Color::Rgb(76, 86, 106),
    selection: Color::Rgb(143, 188, 187),
    good: Color::Rgb(163, 190, 140),
    warn: Color::Rgb(235, 203, 139),
    bad: Color::Rgb(191, 97, 106),
};

impl Theme {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "dark" => Some(Theme::Dark),
            "light" => Some(Theme::Light),
            "dracula" => Some(Theme::Dracula),
            "nord" => Some(Theme::Nord),
            _ => None,
        }
    }

    pub fn next(&self) -> Self {
        match self {
            Theme::Dark => Theme::Light,
            Theme::Light => Theme::Dracula,
            Theme::Dracula => Theme::Nord,
            Theme::Nord => Theme::Dark,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Theme::Dark => "Dark",
            Theme::Light => "Light",
            Theme::Dracula => "Dracula",
            Theme::Nord => "Nord",
        }
    }

    pub fn palette(&self) -> &'static Palette {
        match self {
            Theme::Dark => &DARK,
            Theme::Light => &LIGHT,
            Theme::Dracula => &DRACULA,
            Theme::Nord => &NORD,
        }
    }

    pub fn text(&self) -> Style {
        Style::default().fg(self.palette().text)
    }

    pub fn muted(&self) -> Style {
        Style::default().fg(self.palette().muted)
    }

    pub fn title(&self) -> Style {
        Style::default()
            .fg(self.palette().accent)
            .add_modifier(Modifier::BOLD)
    }

    pub fn border(&self, focused: bool) -> Style {
        let palette = self.palette();
        Style::default().fg(if focused {
            palette.accent
        } else {
            palette.border
        })
    }

    pub fn selected(&self) -> Style {
        Style::default()
            .fg(self.palette().selection)
            .add_modifier(Modifier::BOLD | Modifier::REVERSED)
    }

    pub fn status(&self, status: UserStatus) -> Color {
        let palette = self.palette();
        match status {
            UserStatus::Active => palette.good,
            UserStatus::OnHold => palette.accent,
            UserStatus::Limited | UserStatus::Expired => palette.warn,
            UserStatus::Disabled | UserStatus::Unknown => palette.bad,
        }
    }

    /// Gauge color by share of the data limit used
    pub fn usage(&self, percentage: f64) -> Color {
        let palette = self.palette();
        if percentage >= 90.0 {
            palette.bad
        } else if percentage >= 70.0 {
            palette.warn
        } else {
            palette.good
        }
    }

    pub fn protocol(&self, protocol: Protocol) -> Color {
        match protocol {
            Protocol::Vless => Color::Magenta,
            Protocol::Vmess => Color::Blue,
            Protocol::Trojan => Color::Red,
            Protocol::Shadowsocks => Color::Green,
            Protocol::Unknown => self.palette().muted,
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Theme::Dark
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_theme_cycle_and_parse() {
        let mut theme = Theme::default();
        for _ in 0..4 {
            theme = theme.next();
        }
        assert_eq!(theme, Theme::Dark);
        assert_eq!(Theme::from_str("NORD"), Some(Theme::Nord));
        assert_eq!(Theme::from_str("solarized"), None);
    }

    #[test]
    fn test_usage_thresholds() {
        let theme = Theme::Dark;
        assert_eq!(theme.usage(10.0), Color::Green);
        assert_eq!(theme.usage(75.0), Color::Yellow);
        assert_eq!(theme.usage(100.0), Color::Red);
    }
}
