use ratatui::{
    layout::{Constraint, Direction, Layout},
    prelude::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph, Wrap},
};
use ratatui_image::picker::Picker;

use super::theme::{THEME_ACCENT, THEME_BG, THEME_BORDER, THEME_FG};
use super::widgets::truncate_str;
use crate::app::App;
use crate::model::VideoInfo;
use crate::sys::api::{format_duration, format_views};

pub fn render_video_info(
    f: &mut ratatui::Frame,
    app: &App,
    info: &VideoInfo,
    area: Rect,
    picker: &mut Picker,
) {
    let block = Block::default()
        .title(" Video ")
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(THEME_BORDER))
        .style(Style::default().bg(THEME_BG));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(6), Constraint::Length(6)])
        .split(inner);

    if let Some(img) = &app.thumbnail {
        let mut protocol = picker.new_resize_protocol(img.clone());
        let image = ratatui_image::StatefulImage::new();
        f.render_stateful_widget(image, layout[0], &mut protocol);
    } else {
        let placeholder = Paragraph::new("\n[ no thumbnail ]")
            .style(Style::default().fg(THEME_BORDER))
            .alignment(ratatui::layout::Alignment::Center);
        f.render_widget(placeholder, layout[0]);
    }

    let title_width = inner.width.saturating_sub(2) as usize;
    let selected_line = match app.catalog.selected_format() {
        Some(fmt) => {
            let sel = app.catalog.current_selection();
            let kind = sel.map(|s| s.kind).unwrap_or(crate::model::MediaKind::Video);
            let kind_text = match kind {
                crate::model::MediaKind::Video => "Video",
                crate::model::MediaKind::Audio => "Audio",
            };
            Line::from(vec![
                Span::styled("Selected: ", Style::default().fg(THEME_ACCENT)),
                Span::styled(
                    format!(
                        "{}: {} ({}, {})",
                        kind_text,
                        fmt.display_quality(kind),
                        fmt.display_ext(),
                        fmt.display_size()
                    ),
                    Style::default().fg(THEME_FG).add_modifier(Modifier::BOLD),
                ),
            ])
        }
        None => Line::from(Span::styled(
            "No format selected",
            Style::default().fg(THEME_BORDER),
        )),
    };

    let lines = vec![
        Line::from(Span::styled(
            truncate_str(&info.title, title_width),
            Style::default().fg(THEME_FG).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            format!("by {}", info.uploader),
            Style::default().fg(THEME_ACCENT),
        )),
        Line::from(Span::styled(
            format!(
                "{} | {}",
                format_duration(info.duration),
                format_views(info.view_count)
            ),
            Style::default().fg(THEME_FG),
        )),
        selected_line,
    ];

    let details = Paragraph::new(lines).wrap(Wrap { trim: true });
    f.render_widget(details, layout[1]);
}
