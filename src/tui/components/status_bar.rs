use ratatui::{
    prelude::Rect,
    style::Style,
    widgets::{Block, BorderType, Borders, Paragraph},
};

use super::theme::{THEME_ACCENT, THEME_BORDER};
use crate::app::{App, InputMode};

pub fn render_status_bar(f: &mut ratatui::Frame, app: &App, area: Rect) {
    let mode_str = match app.input_mode {
        InputMode::Normal => "NORMAL",
        InputMode::Editing => "EDITING",
        InputMode::Loading => "LOADING",
    };

    let key_hints = match app.input_mode {
        InputMode::Normal => {
            if app.video.is_some() {
                "q: Quit | e: Edit URL | Tab: Pane | j/k: Nav | f: Filter | Enter: Pick | d: Download | c: Copy | o: Preview | r: Reset"
            } else {
                "q: Quit | e: Edit URL | r: Reset"
            }
        }
        InputMode::Editing => "Esc: Normal Mode | Enter: Fetch",
        InputMode::Loading => "Please wait...",
    };

    let status_msg = app.status_message.as_deref().unwrap_or("");
    let text = if status_msg.is_empty() {
        format!(" [{}] {} ", mode_str, key_hints)
    } else {
        format!(" [{}] {} | {} ", mode_str, key_hints, status_msg)
    };

    let p = Paragraph::new(text)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(Style::default().fg(THEME_BORDER)),
        )
        .style(Style::default().fg(THEME_ACCENT));
    f.render_widget(p, area);
}
