use chrono::{DateTime, Local, Utc};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, Paragraph, Wrap},
    Frame,
};

use crate::app::AppState;
use crate::format::{
    format_bytes, format_date, format_relative_expiry, format_time_ago, on_hold_expiry, Timestamp,
};
use crate::panel::{UserInfo, UserStatus};

/// Status card: badge, usage gauge, traffic and dates
pub fn render_status(f: &mut Frame, area: Rect, state: &AppState) {
    let Some(user) = state.user.as_ref() else {
        return;
    };
    let theme = state.theme;
    let now = Utc::now();

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme.border(false))
        .title(Span::styled(format!(" {} ", user.username), theme.title()));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Badges
            Constraint::Length(1), // Gauge
            Constraint::Min(0),    // Details
        ])
        .split(inner);

    // Badges
    let status_text = state.t(&format!("status.{}", user.status.as_str()));
    let last_seen = format_time_ago(user.online_at.as_ref(), now, &state.translator);
    let online_color = if last_seen.is_online {
        theme.palette().good
    } else {
        theme.palette().muted
    };
    let badges = Line::from(vec![
        Span::styled(
            format!(" {} ", status_text),
            Style::default()
                .fg(theme.status(user.status))
                .add_modifier(Modifier::BOLD | Modifier::REVERSED),
        ),
        Span::raw("  "),
        Span::styled("● ", Style::default().fg(online_color)),
        Span::styled(last_seen.text, theme.text()),
    ]);
    f.render_widget(Paragraph::new(badges), chunks[0]);

    // Gauge
    let percentage = state.usage_percentage();
    let limit_text = if user.is_unlimited_traffic() {
        state.t("userInfo.unlimited")
    } else {
        format_bytes(user.data_limit as f64)
    };
    let gauge = Gauge::default()
        .gauge_style(Style::default().fg(theme.usage(percentage)))
        .ratio((percentage / 100.0).clamp(0.0, 1.0))
        .label(format!(
            "{} / {}  ({:.1}%)",
            format_bytes(user.used_traffic as f64),
            limit_text,
            percentage
        ));
    f.render_widget(gauge, chunks[1]);

    let details = Paragraph::new(detail_lines(state, user, now)).wrap(Wrap { trim: true });
    f.render_widget(details, chunks[2]);
}

fn detail_lines(state: &AppState, user: &UserInfo, now: DateTime<Utc>) -> Vec<Line<'static>> {
    let theme = state.theme;
    let tag = state.locale().date_tag();
    let row = |label: String, value: String| {
        Line::from(vec![
            Span::styled(format!("{}: ", label), theme.muted()),
            Span::styled(value, theme.text()),
        ])
    };

    let remaining = user
        .remaining_traffic()
        .map(|bytes| format_bytes(bytes as f64))
        .unwrap_or_else(|| "∞".to_string());
    let total = if user.is_unlimited_traffic() {
        state.t("userInfo.unlimited")
    } else {
        format_bytes(user.data_limit as f64)
    };

    let mut lines = vec![
        row(
            state.t("userInfo.used"),
            format_bytes(user.used_traffic as f64),
        ),
        row(state.t("userInfo.total"), total),
        row(state.t("userInfo.remaining"), remaining),
        row(
            state.t("userInfo.lifetime"),
            format_bytes(user.lifetime_used_traffic as f64),
        ),
    ];

    let expiry = if user.status == UserStatus::OnHold {
        on_hold_expiry(user.on_hold_expire_duration, &state.translator)
    } else {
        format_relative_expiry(
            user.expire.as_ref().filter(|e| !e.is_unset()),
            now,
            &state.translator,
        )
    };
    let expiry_style = if expiry.is_expired {
        Style::default().fg(theme.palette().bad)
    } else {
        theme.text()
    };
    lines.push(Line::from(vec![
        Span::styled(format!("{}: ", expiry.status), theme.muted()),
        Span::styled(expiry.time, expiry_style),
    ]));

    if user.status != UserStatus::OnHold {
        if let Some(date) = local_date(user.expire.as_ref(), tag) {
            lines.push(row(state.t("userInfo.expiryDate"), date));
        }
    }
    if let Some(date) = local_date(user.online_at.as_ref(), tag) {
        lines.push(row(state.t("userInfo.lastOnline"), date));
    }

    lines
}

fn local_date(stamp: Option<&Timestamp>, tag: &str) -> Option<String> {
    let when = stamp.filter(|s| !s.is_unset())?.to_utc()?;
    Some(format_date(&when.with_timezone(&Local), tag))
}

pub fn render_loading(f: &mut Frame, area: Rect, state: &AppState) {
    let loading = Paragraph::new(state.t("common.loading"))
        .style(state.theme.muted())
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(state.theme.border(false)),
        );
    f.render_widget(loading, area);
}

/// Shown instead of the dashboard when user info never loaded
pub fn render_error(f: &mut Frame, area: Rect, state: &AppState) {
    let theme = state.theme;
    let detail = state
        .user_error
        .as_ref()
        .map(|e| e.to_string())
        .unwrap_or_default();

    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            format!("⚠ {}", state.t("common.error")),
            Style::default()
                .fg(theme.palette().bad)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled(detail, theme.muted())),
        Line::from(""),
        Line::from(Span::styled(state.t("common.retry"), theme.text())),
    ];

    let error = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(theme.palette().bad)),
        );
    f.render_widget(error, area);
}
