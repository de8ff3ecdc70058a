use ratatui::{
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use crate::app::platform::{app_description, download_links_for};
use crate::app::{AppState, CopyTarget, Panel};

pub fn render(f: &mut Frame, area: Rect, state: &AppState) {
    let theme = state.theme;
    let focused = state.focus == Panel::Apps;

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme.border(focused))
        .title(Span::styled(format!(" {} ", state.t("apps.title")), theme.title()));

    if state.apps_loading && state.apps.is_empty() {
        let loading = Paragraph::new(state.t("common.loading"))
            .style(theme.muted())
            .alignment(Alignment::Center)
            .block(block);
        f.render_widget(loading, area);
        return;
    }
    if state.apps_error.is_some() && state.apps.is_empty() {
        let error = Paragraph::new(state.t("common.error"))
            .style(Style::default().fg(theme.palette().bad))
            .alignment(Alignment::Center)
            .block(block);
        f.render_widget(error, area);
        return;
    }

    let locale = state.locale();
    let mut lines: Vec<Line> = Vec::new();
    let mut selected_line = 0usize;
    let mut flat_index = 0usize;

    for group in state.app_groups() {
        let mut header = vec![Span::styled(
            state.t(&format!("apps.platform.{}", group.platform)),
            theme.title(),
        )];
        if group.is_current {
            header.push(Span::styled(
                format!("  ({})", state.t("apps.currentOS")),
                Style::default().fg(theme.palette().good),
            ));
        }
        lines.push(Line::from(header));

        for app in &group.apps {
            let is_selected = focused && flat_index == state.selected_app;
            if is_selected {
                selected_line = lines.len();
            }

            let marker = if is_selected { "▶ " } else { "  " };
            let mut name_line = vec![
                Span::styled(marker, theme.title()),
                Span::styled(
                    app.name.clone(),
                    if is_selected {
                        theme.selected()
                    } else {
                        theme.text().add_modifier(Modifier::BOLD)
                    },
                ),
            ];
            if app.recommended {
                name_line.push(Span::styled(
                    format!("  ★ {}", state.t("apps.recommended")),
                    Style::default().fg(theme.palette().warn),
                ));
            }
            if state.is_copied(CopyTarget::AppImport(flat_index)) {
                name_line.push(Span::styled(
                    " ✓",
                    Style::default().fg(theme.palette().good),
                ));
            }
            lines.push(Line::from(name_line));

            let description = app_description(app, locale);
            if !description.is_empty() {
                lines.push(Line::from(Span::styled(
                    format!("    {}", description),
                    theme.muted(),
                )));
            }
            for link in download_links_for(app, locale) {
                lines.push(Line::from(vec![
                    Span::styled(format!("    ↓ {}: ", link.name), theme.muted()),
                    Span::styled(link.url.clone(), theme.text()),
                ]));
            }
            if !app.import_url.is_empty() {
                lines.push(Line::from(vec![
                    Span::styled(format!("    ⇪ {}: ", state.t("apps.import")), theme.muted()),
                    Span::styled(app.import_url.clone(), theme.text()),
                ]));
            }

            flat_index += 1;
        }
        lines.push(Line::from(""));
    }

    // Keep the selected app in view
    let visible = area.height.saturating_sub(2) as usize;
    let scroll = selected_line.saturating_sub(visible.saturating_sub(4)) as u16;

    let paragraph = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .scroll((scroll, 0))
        .block(block);
    f.render_widget(paragraph, area);
}
