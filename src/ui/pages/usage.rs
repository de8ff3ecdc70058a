use chrono::Local;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Bar, BarChart, BarGroup, Block, Borders, Paragraph},
    Frame,
};

use crate::app::time_range::{TimeRange, UsagePeriod};
use crate::app::{AppState, Panel};
use crate::format::{format_bytes, format_day_label, parse_timestamp};
use crate::panel::UsageDataPoint;

const BAR_WIDTH: u16 = 5;
const BAR_GAP: u16 = 1;

pub fn render(f: &mut Frame, area: Rect, state: &AppState) {
    let theme = state.theme;
    let focused = state.focus == Panel::Usage;

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme.border(focused))
        .title(Span::styled(format!(" {} ", state.t("usage.title")), theme.title()));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Range selector + total
            Constraint::Min(0),    // Chart
        ])
        .split(inner);

    f.render_widget(Paragraph::new(range_line(state)), chunks[0]);

    let series = state
        .chart
        .as_ref()
        .map(|c| c.primary_series())
        .unwrap_or_default();

    let message = if state.chart_loading && state.chart.is_none() {
        Some((state.t("common.loading"), theme.muted()))
    } else if state.chart.is_none() && state.chart_error.is_some() {
        Some((
            state.t("common.error"),
            Style::default().fg(theme.palette().bad),
        ))
    } else if series.is_empty() {
        Some((state.t("usage.noData"), theme.muted()))
    } else {
        None
    };

    if let Some((text, style)) = message {
        let paragraph = Paragraph::new(text)
            .style(style)
            .alignment(Alignment::Center);
        f.render_widget(paragraph, chunks[1]);
        return;
    }

    let period = state
        .usage_key
        .map(|k| k.period)
        .unwrap_or_else(|| state.time_range.period());
    let fits = (chunks[1].width / (BAR_WIDTH + BAR_GAP)).max(1) as usize;
    let shown = &series[series.len().saturating_sub(fits)..];
    let tag = state.locale().date_tag();

    let bars: Vec<Bar> = shown
        .iter()
        .map(|point| {
            Bar::default()
                .value(point.total_traffic)
                .label(Line::from(bar_label(point, period, tag)))
                .text_value(short_bytes(point.total_traffic))
                .style(Style::default().fg(theme.palette().accent))
        })
        .collect();

    let chart = BarChart::default()
        .data(BarGroup::default().bars(&bars))
        .bar_width(BAR_WIDTH)
        .bar_gap(BAR_GAP)
        .value_style(theme.text().add_modifier(Modifier::BOLD));
    f.render_widget(chart, chunks[1]);
}

fn range_line(state: &AppState) -> Line<'static> {
    let theme = state.theme;
    let mut spans = Vec::new();
    for range in TimeRange::all() {
        let style = if range == state.time_range {
            theme.selected()
        } else {
            theme.muted()
        };
        spans.push(Span::styled(format!(" {} ", range.as_str()), style));
        spans.push(Span::raw(" "));
    }

    if let Some(chart) = &state.chart {
        spans.push(Span::styled(
            format!("  {}: ", state.t("usage.totalUsage")),
            theme.muted(),
        ));
        spans.push(Span::styled(
            format_bytes(chart.total_traffic() as f64),
            theme.text().add_modifier(Modifier::BOLD),
        ));
    }
    if state.chart_error.is_some() && state.chart.is_some() {
        spans.push(Span::styled(" ⚠", Style::default().fg(theme.palette().warn)));
    }

    Line::from(spans)
}

fn bar_label(point: &UsageDataPoint, period: UsagePeriod, tag: &str) -> String {
    let Some(when) = parse_timestamp(&point.period_start) else {
        return String::new();
    };
    let local = when.with_timezone(&Local);
    match period {
        UsagePeriod::Hour => local.format("%H:%M").to_string(),
        UsagePeriod::Day => format_day_label(&local, tag),
    }
}

/// Bar caption narrow enough for the bar width, e.g. `1.5G`
fn short_bytes(bytes: u64) -> String {
    let formatted = format_bytes(bytes as f64);
    let mut parts = formatted.split(' ');
    let value: f64 = parts
        .next()
        .and_then(|v| v.parse().ok())
        .unwrap_or_default();
    let unit = parts
        .next()
        .and_then(|u| u.chars().next())
        .unwrap_or('B');
    if value >= 100.0 {
        format!("{:.0}{}", value, unit)
    } else {
        format!("{:.1}{}", value, unit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_bytes() {
        assert_eq!(short_bytes(0), "0.0B");
        assert_eq!(short_bytes(1536), "1.5K");
        assert_eq!(short_bytes(300 * 1024 * 1024), "300M");
    }

    #[test]
    fn test_bar_label_unparseable() {
        let point = UsageDataPoint {
            total_traffic: 1,
            period_start: "garbage".to_string(),
        };
        assert_eq!(bar_label(&point, UsagePeriod::Day, "en"), "");
    }
}
