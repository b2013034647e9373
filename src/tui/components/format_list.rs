use ratatui::{
    layout::Constraint,
    prelude::Rect,
    style::{Modifier, Style},
    widgets::{Block, BorderType, Borders, Cell, Row, Table, TableState},
};

use super::theme::{THEME_ACCENT, THEME_BG, THEME_BORDER, THEME_FG, THEME_HIGHLIGHT};
use crate::app::{App, PaneFocus};
use crate::model::MediaKind;

pub fn render_format_pane(f: &mut ratatui::Frame, app: &App, kind: MediaKind, area: Rect) {
    let (title, filter_label, cursor, focused) = match kind {
        MediaKind::Video => (
            " Video Formats ",
            app.catalog.video_filter.label(),
            app.video_cursor,
            app.focus == PaneFocus::Video,
        ),
        MediaKind::Audio => (
            " Audio Formats ",
            app.catalog.audio_filter.label(),
            app.audio_cursor,
            app.focus == PaneFocus::Audio,
        ),
    };

    let formats = app.catalog.visible(kind);
    let selected_id = app
        .catalog
        .current_selection()
        .filter(|sel| sel.kind == kind)
        .map(|sel| sel.id.clone());

    let block = Block::default()
        .title(format!("{}[{}] ", title, filter_label))
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(if focused { THEME_HIGHLIGHT } else { THEME_BORDER }))
        .style(Style::default().bg(THEME_BG));

    if formats.is_empty() {
        let empty = ratatui::widgets::Paragraph::new("  No formats match this filter.")
            .style(Style::default().fg(THEME_FG))
            .block(block);
        f.render_widget(empty, area);
        return;
    }

    let header = Row::new(vec![
        Cell::from("  "),
        Cell::from("QUALITY"),
        Cell::from("FORMAT"),
        Cell::from("SIZE"),
    ])
    .style(
        Style::default()
            .fg(THEME_ACCENT)
            .add_modifier(Modifier::BOLD),
    )
    .height(1)
    .bottom_margin(1);

    let rows: Vec<Row> = formats
        .iter()
        .map(|fmt| {
            let marker = if selected_id.as_deref() == Some(fmt.id.as_str()) {
                "●"
            } else {
                " "
            };
            Row::new(vec![
                Cell::from(format!(" {}", marker)),
                Cell::from(fmt.display_quality(kind)),
                Cell::from(fmt.display_ext()),
                Cell::from(fmt.display_size()),
            ])
            .style(Style::default().fg(THEME_FG))
            .height(1)
        })
        .collect();

    let table = Table::new(
        rows,
        [
            Constraint::Length(3),
            Constraint::Percentage(45),
            Constraint::Percentage(20),
            Constraint::Percentage(30),
        ],
    )
    .header(header)
    .block(block)
    .row_highlight_style(
        Style::default()
            .bg(THEME_HIGHLIGHT)
            .fg(THEME_FG)
            .add_modifier(Modifier::BOLD),
    )
    .highlight_symbol("┃ ");

    let mut state = TableState::default();
    if focused {
        state.select(Some(cursor));
    }

    f.render_stateful_widget(table, area, &mut state);
}
