use ratatui::{
    prelude::Rect,
    style::{Modifier, Style},
    widgets::{Block, BorderType, Borders, Paragraph},
};

use super::theme::{THEME_ACCENT, THEME_BORDER, THEME_ERROR, THEME_FG, THEME_HIGHLIGHT};
use crate::app::{App, InputMode};

pub fn render_url_bar(f: &mut ratatui::Frame, app: &App, area: Rect) {
    let width = (area.width as usize).saturating_sub(2);
    let scroll = app.cursor_position.saturating_sub(width.saturating_sub(1));
    let display_url: String = app.url_input.chars().skip(scroll).take(width).collect();

    let title = if app.url_error {
        " Video URL - invalid or unsupported "
    } else {
        " Video URL "
    };

    let border_color = if app.url_error {
        THEME_ERROR
    } else if app.input_mode == InputMode::Editing {
        THEME_ACCENT
    } else {
        THEME_BORDER
    };

    let input = Paragraph::new(display_url.as_str())
        .style(match app.input_mode {
            InputMode::Normal => Style::default().fg(THEME_FG),
            InputMode::Editing => Style::default()
                .fg(THEME_ACCENT)
                .add_modifier(Modifier::BOLD),
            InputMode::Loading => Style::default().fg(THEME_HIGHLIGHT),
        })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(Style::default().fg(border_color))
                .title(title),
        );
    f.render_widget(input, area);

    if app.input_mode == InputMode::Editing {
        f.set_cursor_position((
            area.x + (app.cursor_position.saturating_sub(scroll)) as u16 + 1,
            area.y + 1,
        ));
    }
}
