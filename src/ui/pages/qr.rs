use qrcode::render::unicode::Dense1x2;
use qrcode::{EcLevel, QrCode};
use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use crate::app::{AppState, LinkRow};

/// Longest payload encoded at level L
const MAX_QR_LEN: usize = 2900;

/// Half-block rows of a QR code, or `None` when the text cannot be encoded
pub fn qr_lines(text: &str) -> Option<Vec<String>> {
    if text.is_empty() || text.len() > MAX_QR_LEN {
        return None;
    }
    let code = QrCode::with_error_correction_level(text.as_bytes(), EcLevel::L).ok()?;
    let rendered = code
        .render::<Dense1x2>()
        .dark_color(Dense1x2::Light)
        .light_color(Dense1x2::Dark)
        .quiet_zone(true)
        .build();
    Some(rendered.lines().map(str::to_string).collect())
}

fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

pub fn render(f: &mut Frame, area: Rect, state: &AppState, row: LinkRow) {
    let theme = state.theme;
    let Some(text) = state.row_text(row) else {
        return;
    };

    let mut title = state.row_label(row);
    if let LinkRow::Config(i) = row {
        if let Some(emoji) = state.parsed_links.get(i).and_then(|l| l.emoji.as_ref()) {
            title = format!("{} {}", emoji, title);
        }
    }

    let (lines, width) = match qr_lines(text) {
        Some(rows) => {
            let width = rows
                .iter()
                .map(|r| r.chars().count())
                .max()
                .unwrap_or_default() as u16;
            let lines: Vec<Line> = rows
                .into_iter()
                .map(|r| Line::from(Span::styled(r, Style::default().fg(Color::White).bg(Color::Black))))
                .collect();
            (lines, width)
        }
        None => (
            vec![Line::from(Span::styled(
                state.t("qr.tooLong"),
                Style::default().fg(theme.palette().warn),
            ))],
            40,
        ),
    };

    let height = lines.len() as u16 + 4;
    let modal = centered(area, width.max(title.chars().count() as u16) + 4, height);

    let mut body = lines;
    body.push(Line::from(""));
    body.push(Line::from(Span::styled(
        format!("Esc {}", state.t("help.close")),
        theme.muted(),
    )));

    f.render_widget(Clear, modal);
    let paragraph = Paragraph::new(body)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: false })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(theme.border(true))
                .title(Span::styled(
                    format!(" {} · {} ", state.t("qr.title"), title),
                    theme.title(),
                )),
        );
    f.render_widget(paragraph, modal);
}
