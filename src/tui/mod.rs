use crate::app::{App, InputMode};
use crate::model::MediaKind;
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::*,
};
use ratatui_image::picker::Picker;

pub mod components;

use components::format_list::render_format_pane;
use components::search_bar::render_url_bar;
use components::status_bar::render_status_bar;
use components::theme::{THEME_ACCENT, THEME_BG, THEME_BORDER, THEME_ERROR, THEME_FG};
use components::video_info::render_video_info;
use components::widgets::centered_rect;

pub fn ui(f: &mut Frame, app: &mut App, picker: &mut Picker) {
    let main_layout = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(3), // URL bar
            Constraint::Min(1),    // Main content
            Constraint::Length(3), // Status bar
        ])
        .split(f.area());

    f.render_widget(
        Block::default().style(Style::default().bg(THEME_BG)),
        f.area(),
    );

    render_url_bar(f, app, main_layout[0]);
    render_main_area(f, app, main_layout[1], picker);
    render_status_bar(f, app, main_layout[2]);

    if app.input_mode == InputMode::Loading {
        render_loading(f, main_layout[1]);
    }
}

fn render_main_area(f: &mut Frame, app: &mut App, area: Rect, picker: &mut Picker) {
    if let Some(message) = app.fetch_error.clone() {
        render_error_panel(f, &message, area);
        return;
    }

    let Some(info) = app.video.clone() else {
        render_welcome(f, area);
        return;
    };

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(38), Constraint::Percentage(62)])
        .split(area);

    render_video_info(f, app, &info, columns[0], picker);

    let panes = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(columns[1]);

    render_format_pane(f, app, MediaKind::Video, panes[0]);
    render_format_pane(f, app, MediaKind::Audio, panes[1]);
}

fn render_welcome(f: &mut Frame, area: Rect) {
    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            "vidfetch",
            Style::default().fg(THEME_ACCENT).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled(
            "Paste a video URL above and press Enter to list the available formats.",
            Style::default().fg(THEME_FG),
        )),
        Line::from(Span::styled(
            "The backend extracts and merges the streams; this client only picks one.",
            Style::default().fg(THEME_BORDER),
        )),
    ];
    let p = Paragraph::new(lines)
        .alignment(ratatui::layout::Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(Style::default().fg(THEME_BORDER)),
        );
    f.render_widget(p, area);
}

fn render_error_panel(f: &mut Frame, message: &str, area: Rect) {
    let p = Paragraph::new(vec![
        Line::from(""),
        Line::from(Span::styled(message.to_string(), Style::default().fg(THEME_FG))),
        Line::from(""),
        Line::from(Span::styled(
            "e: edit URL and retry | r: reset",
            Style::default().fg(THEME_BORDER),
        )),
    ])
    .wrap(Wrap { trim: true })
    .alignment(ratatui::layout::Alignment::Center)
    .block(
        Block::default()
            .title(" Error Fetching Video ")
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(THEME_ERROR)),
    );
    f.render_widget(p, area);
}

fn render_loading(f: &mut Frame, area: Rect) {
    let popup = centered_rect(40, 20, area);
    f.render_widget(Clear, popup);
    let p = Paragraph::new("\nFetching formats from backend...")
        .alignment(ratatui::layout::Alignment::Center)
        .style(Style::default().fg(THEME_ACCENT))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(Style::default().fg(THEME_ACCENT))
                .style(Style::default().bg(THEME_BG)),
        );
    f.render_widget(p, popup);
}
