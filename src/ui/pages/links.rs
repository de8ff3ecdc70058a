use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
    Frame,
};

use crate::app::{AppState, CopyTarget, LinkRow, Panel};
use crate::links::ParsedLink;

pub fn render(f: &mut Frame, area: Rect, state: &AppState) {
    let theme = state.theme;
    let focused = state.focus == Panel::Links;

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme.border(focused))
        .title(Span::styled(
            format!(" {} ({}) ", state.t("config.title"), state.parsed_links.len()),
            theme.title(),
        ));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let overflow = state.overflow_count();
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(if overflow > 0 {
            vec![Constraint::Min(0), Constraint::Length(1)]
        } else {
            vec![Constraint::Min(0)]
        })
        .split(inner);

    let mut items = vec![subscription_item(state)];
    items.extend(
        state
            .visible_links()
            .iter()
            .enumerate()
            .map(|(i, link)| link_item(state, i, link)),
    );

    let list = List::new(items).highlight_style(if focused {
        theme.selected()
    } else {
        Style::default()
    });
    let mut list_state = ListState::default();
    list_state.select(Some(state.selected_row));
    f.render_stateful_widget(list, chunks[0], &mut list_state);

    if overflow > 0 {
        let toggle = if state.show_all_links {
            format!(
                "▲ {} ({} {})",
                state.t("config.showLess"),
                overflow,
                state.t("config.hidden")
            )
        } else {
            format!(
                "▼ {} ({} {})",
                state.t("config.showMore"),
                overflow,
                state.t("config.more")
            )
        };
        f.render_widget(Paragraph::new(Span::styled(toggle, theme.muted())), chunks[1]);
    }
}

fn copied_mark(state: &AppState, row: LinkRow) -> Span<'static> {
    if state.is_copied(CopyTarget::Row(row)) || state.is_copied(CopyTarget::AllLinks) {
        Span::styled(" ✓", Style::default().fg(state.theme.palette().good))
    } else {
        Span::raw("")
    }
}

fn subscription_item(state: &AppState) -> ListItem<'static> {
    let theme = state.theme;
    ListItem::new(Line::from(vec![
        Span::styled("🔗 ", theme.text()),
        Span::styled(state.t("config.subscriptionLink"), theme.title()),
        Span::styled(format!("  {}", state.subscription_url), theme.muted()),
        copied_mark(state, LinkRow::Subscription),
    ]))
}

fn link_item(state: &AppState, index: usize, link: &ParsedLink) -> ListItem<'static> {
    let theme = state.theme;
    let mut spans = Vec::new();

    if let Some(emoji) = &link.emoji {
        spans.push(Span::raw(format!("{} ", emoji)));
    }
    spans.push(Span::styled(link.name.clone(), theme.text()));
    spans.push(Span::styled(
        format!("  [{}]", link.protocol.as_str()),
        Style::default().fg(theme.protocol(link.protocol)),
    ));
    if let Some(server) = &link.server {
        let endpoint = match &link.port {
            Some(port) => format!("  {}:{}", server, port),
            None => format!("  {}", server),
        };
        spans.push(Span::styled(endpoint, theme.muted()));
    }
    spans.push(copied_mark(state, LinkRow::Config(index)));

    ListItem::new(Line::from(spans))
}
