pub mod pages;
pub mod theme;

use std::io;
use std::time::{Duration, Instant};

use anyhow::Result;
use chrono::Utc;
use crossterm::{
    event::{
        self, DisableFocusChange, EnableFocusChange, Event, KeyCode, KeyEvent, KeyEventKind,
        KeyModifiers,
    },
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame, Terminal,
};
use tokio::sync::mpsc;
use tracing::{info, warn};

use crate::app::clipboard::{self, ClipboardError};
use crate::app::{AppState, CopyTarget, NotificationKind, Panel};
use crate::config::AppConfig;
use crate::format::format_time_ago;
use crate::panel::{DataEvent, DataSources, InitialData, PanelClient};

const TICK: Duration = Duration::from_millis(100);

/// What the loop should do after a key press
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Action {
    None,
    Quit,
}

pub async fn run(config: &mut AppConfig, client: PanelClient, initial: InitialData) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableFocusChange)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let subscription_url = client.endpoints().subscription_url();
    let (tx, mut rx) = mpsc::unbounded_channel();
    let mut sources = DataSources::new(client, initial, tx);
    let mut state = AppState::new(
        config.translator(),
        config.theme,
        subscription_url,
        config.time_range,
        sources.cached_user_info(),
    );

    let key = state.set_time_range(config.time_range, Utc::now());
    sources.start(key);

    let result = run_app(&mut terminal, &mut state, &mut sources, &mut rx).await;

    // Stop pollers before the terminal is restored
    drop(sources);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen, DisableFocusChange)?;
    terminal.show_cursor()?;

    config.locale = Some(state.locale());
    config.theme = state.theme;
    config.time_range = state.time_range;
    if let Err(err) = config.save() {
        warn!(error = %err, "failed to save config");
    }

    result
}

async fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    state: &mut AppState,
    sources: &mut DataSources,
    rx: &mut mpsc::UnboundedReceiver<DataEvent>,
) -> Result<()> {
    let mut show_quit_confirmation = false;

    loop {
        let now = Instant::now();
        while let Ok(event) = rx.try_recv() {
            if matches!(event, DataEvent::Reconnected) {
                sources.on_reconnect();
            }
            state.apply(event, now);
        }
        state.tick(now);

        terminal.draw(|f| draw(f, state, show_quit_confirmation))?;

        if !event::poll(TICK)? {
            continue;
        }
        match event::read()? {
            Event::FocusGained => sources.on_focus(),
            Event::Key(key) if key.kind == KeyEventKind::Press => {
                if show_quit_confirmation {
                    match key.code {
                        KeyCode::Char('y') | KeyCode::Char('Y') => return Ok(()),
                        KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
                            show_quit_confirmation = false;
                        }
                        _ => {}
                    }
                    continue;
                }

                if handle_key(state, sources, key, Instant::now()) == Action::Quit {
                    show_quit_confirmation = true;
                }
            }
            _ => {}
        }
    }
}

fn handle_key(
    state: &mut AppState,
    sources: &mut DataSources,
    key: KeyEvent,
    now: Instant,
) -> Action {
    if state.qr_row.is_some() {
        match key.code {
            KeyCode::Esc | KeyCode::Enter | KeyCode::Char('v') | KeyCode::Char('q') => {
                state.close_qr()
            }
            KeyCode::Char('c') => {
                if let Some(row) = state.qr_row {
                    if let Some(text) = state.row_text(row).map(str::to_string) {
                        copy_text(state, &text, CopyTarget::Row(row), now);
                    }
                }
            }
            _ => {}
        }
        return Action::None;
    }

    match key.code {
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => Action::Quit,
        KeyCode::Char('q') | KeyCode::Esc => Action::Quit,
        KeyCode::Char('r') => {
            if state.begin_refresh() {
                info!("manual refresh");
                sources.refresh_user_info();
                state.notify(state.t("refresh.refreshing"), NotificationKind::Info, now);
            } else if state.is_disabled() {
                state.notify(state.t("refresh.disabled"), NotificationKind::Error, now);
            }
            Action::None
        }
        KeyCode::Tab => {
            state.focus = state.focus.next();
            Action::None
        }
        KeyCode::Down | KeyCode::Char('j') => {
            state.select_next();
            Action::None
        }
        KeyCode::Up | KeyCode::Char('k') => {
            state.select_prev();
            Action::None
        }
        KeyCode::Char('c') => {
            match state.focus {
                Panel::Links => {
                    let row = state.selected_link_row();
                    if let Some(text) = state.row_text(row).map(str::to_string) {
                        copy_text(state, &text, CopyTarget::Row(row), now);
                    }
                }
                Panel::Apps => {
                    if let Some(text) = state.selected_app_link() {
                        let target = CopyTarget::AppImport(state.selected_app);
                        copy_text(state, &text, target, now);
                    }
                }
                Panel::Usage => {}
            }
            Action::None
        }
        KeyCode::Char('a') => {
            if let Some(text) = state.copy_all_text() {
                copy_text(state, &text, CopyTarget::AllLinks, now);
            }
            Action::None
        }
        KeyCode::Enter | KeyCode::Char('v') => {
            if state.focus == Panel::Links {
                state.open_qr();
            }
            Action::None
        }
        KeyCode::Char('m') => {
            state.toggle_show_all();
            Action::None
        }
        KeyCode::Char(']') | KeyCode::Right => {
            let key = state.set_time_range(state.time_range.next(), Utc::now());
            sources.fetch_usage_chart(key);
            Action::None
        }
        KeyCode::Char('[') | KeyCode::Left => {
            let key = state.set_time_range(state.time_range.prev(), Utc::now());
            sources.fetch_usage_chart(key);
            Action::None
        }
        KeyCode::Char('l') => {
            state.cycle_locale();
            Action::None
        }
        KeyCode::Char('t') => {
            state.cycle_theme();
            Action::None
        }
        _ => Action::None,
    }
}

fn copy_text(state: &mut AppState, text: &str, target: CopyTarget, now: Instant) {
    match clipboard::copy(text) {
        Ok(()) => {
            state.mark_copied(target, now);
            let key = if target == CopyTarget::AllLinks {
                "apps.copyAllSuccess"
            } else {
                "clipboard.copied"
            };
            state.notify(state.t(key), NotificationKind::Success, now);
        }
        Err(ClipboardError::NotSupported) => {
            state.notify(
                state.t("clipboard.notSupported"),
                NotificationKind::Error,
                now,
            );
        }
        Err(err) => {
            warn!(error = %err, "clipboard write failed");
            state.notify(state.t("clipboard.failed"), NotificationKind::Error, now);
        }
    }
}

fn draw(f: &mut Frame, state: &AppState, show_quit_confirmation: bool) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(0),    // Content
            Constraint::Length(1), // Footer
        ])
        .split(f.size());

    render_header(f, chunks[0], state);

    if state.show_error_page() {
        pages::render_error(f, chunks[1], state);
    } else if state.show_loading_page() {
        pages::render_loading(f, chunks[1], state);
    } else {
        render_dashboard(f, chunks[1], state);
    }

    render_footer(f, chunks[2], state);

    if let Some(row) = state.qr_row {
        pages::render_qr(f, f.size(), state, row);
    }
    if show_quit_confirmation {
        render_quit_confirmation(f, f.size(), state);
    }
}

fn render_dashboard(f: &mut Frame, area: Rect, state: &AppState) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    let left = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(11), Constraint::Min(0)])
        .split(columns[0]);
    let right = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(12), Constraint::Min(0)])
        .split(columns[1]);

    pages::render_status(f, left[0], state);
    pages::render_links(f, left[1], state);
    pages::render_usage(f, right[0], state);
    pages::render_apps(f, right[1], state);
}

fn render_header(f: &mut Frame, area: Rect, state: &AppState) {
    let theme = state.theme;
    let mut spans = vec![Span::styled(state.t("dashboard.title"), theme.title())];

    if let Some(user) = &state.user {
        let last_seen = format_time_ago(user.online_at.as_ref(), Utc::now(), &state.translator);
        if last_seen.is_online {
            spans.push(Span::styled(
                format!("  ● {}", last_seen.text),
                Style::default().fg(theme.palette().good),
            ));
        }
    }

    if state.refreshing {
        spans.push(Span::styled(
            format!("  ⟳ {}", state.t("refresh.refreshing")),
            Style::default().fg(theme.palette().warn),
        ));
    } else if state.is_disabled() {
        spans.push(Span::styled(
            format!("  ⟳ {}", state.t("refresh.disabled")),
            theme.muted(),
        ));
    }

    spans.push(Span::styled(
        format!("  [{}] [{}]", state.locale().name(), theme.name()),
        theme.muted(),
    ));

    let header = Paragraph::new(Line::from(spans))
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(theme.border(false)),
        );
    f.render_widget(header, area);
}

fn render_footer(f: &mut Frame, area: Rect, state: &AppState) {
    let theme = state.theme;

    if let Some(notification) = &state.notification {
        let color = match notification.kind {
            NotificationKind::Success => theme.palette().good,
            NotificationKind::Error => theme.palette().bad,
            NotificationKind::Info => theme.palette().accent,
        };
        let message = Paragraph::new(Span::styled(
            notification.message.clone(),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        ))
        .alignment(Alignment::Center);
        f.render_widget(message, area);
        return;
    }

    let key = |k: &str| Span::styled(k.to_string(), Style::default().fg(theme.palette().warn));
    let label = |l: String| Span::styled(format!(" {}  ", l), theme.muted());
    let help = Paragraph::new(Line::from(vec![
        key("q"),
        label(state.t("help.quit")),
        key("r"),
        label(state.t("help.refresh")),
        key("Tab"),
        label(state.t("help.tab")),
        key("c"),
        label(state.t("help.copy")),
        key("a"),
        label(state.t("apps.copyAll")),
        key("Enter"),
        label(state.t("help.qr")),
        key("m"),
        label(state.t("help.more")),
        key("[ ]"),
        label(state.t("help.range")),
        key("l"),
        label(state.t("help.language")),
        key("t"),
        label(state.t("help.theme")),
    ]))
    .alignment(Alignment::Center);
    f.render_widget(help, area);
}

fn render_quit_confirmation(f: &mut Frame, area: Rect, state: &AppState) {
    let dialog_width = 40.min(area.width);
    let dialog_height = 5.min(area.height);
    let dialog_area = Rect {
        x: area.x + (area.width.saturating_sub(dialog_width)) / 2,
        y: area.y + (area.height.saturating_sub(dialog_height)) / 2,
        width: dialog_width,
        height: dialog_height,
    };

    f.render_widget(Clear, dialog_area);

    let prompt = Paragraph::new(vec![
        Line::from(""),
        Line::from(vec![
            Span::styled(
                "Y",
                Style::default()
                    .fg(Color::Green)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw("es / "),
            Span::styled(
                "N",
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            ),
            Span::raw("o"),
        ]),
    ])
    .alignment(Alignment::Center)
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Yellow))
            .title(Span::styled(
                format!(" {}? ", state.t("help.quit")),
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            )),
    );
    f.render_widget(prompt, dialog_area);
}
