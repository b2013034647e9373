use super::{App, DownloadRequest, InputMode, PaneFocus};
use crate::app::catalog::FormatCatalog;
use crate::model::MediaKind;
use crate::sys::{api, download, url as sys_url};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

pub fn handle_key_event(app: &mut App, key: KeyEvent) {
    // A pending fetch disables everything except quitting. Raw mode turns
    // Ctrl+C into an ordinary key event, so it must be handled here too.
    if app.input_mode == InputMode::Loading {
        let ctrl_c =
            key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL);
        if matches!(key.code, KeyCode::Char('q') | KeyCode::Esc) || ctrl_c {
            app.running = false;
        }
        return;
    }

    match app.input_mode {
        InputMode::Editing => match key.code {
            KeyCode::Enter => start_fetch(app),
            KeyCode::Char(c) => {
                app.url_input.insert(app.cursor_position, c);
                app.cursor_position += c.len_utf8();
                app.url_error = false;
            }
            KeyCode::Backspace => {
                if app.cursor_position > 0 {
                    let prev = prev_char_boundary(&app.url_input, app.cursor_position);
                    app.url_input.remove(prev);
                    app.cursor_position = prev;
                    app.url_error = false;
                }
            }
            KeyCode::Left => {
                if app.cursor_position > 0 {
                    app.cursor_position = prev_char_boundary(&app.url_input, app.cursor_position);
                }
            }
            KeyCode::Right => {
                if app.cursor_position < app.url_input.len() {
                    app.cursor_position = next_char_boundary(&app.url_input, app.cursor_position);
                }
            }
            KeyCode::Esc => {
                app.input_mode = InputMode::Normal;
            }
            _ => {}
        },
        InputMode::Normal => match key.code {
            KeyCode::Char('q') => {
                app.running = false;
            }
            KeyCode::Char('/') | KeyCode::Char('e') => {
                app.input_mode = InputMode::Editing;
            }
            KeyCode::Char('r') => reset(app),
            KeyCode::Tab => {
                app.focus = match app.focus {
                    PaneFocus::Video => PaneFocus::Audio,
                    PaneFocus::Audio => PaneFocus::Video,
                };
            }
            KeyCode::Down | KeyCode::Char('j') => move_cursor(app, 1),
            KeyCode::Up | KeyCode::Char('k') => move_cursor(app, -1),
            KeyCode::Char('f') => cycle_filter(app),
            KeyCode::Enter => select_under_cursor(app),
            KeyCode::Char('d') => start_download(app),
            KeyCode::Char('c') => copy_info(app),
            KeyCode::Char('o') => open_preview(app),
            _ => {}
        },
        InputMode::Loading => {}
    }
}

pub fn handle_paste(app: &mut App, text: String) {
    if app.input_mode != InputMode::Editing {
        return;
    }
    let clean: String = text.chars().filter(|c| !c.is_control()).collect();
    app.url_input.insert_str(app.cursor_position, &clean);
    app.cursor_position += clean.len();
    app.url_error = false;
}

/// Validates the input and hands it to the fetch worker. Invalid input is
/// flagged inline and no request leaves the client.
pub fn start_fetch(app: &mut App) {
    let url = app.url_input.trim().to_string();
    if !sys_url::is_supported_url(&url) {
        app.url_error = true;
        return;
    }
    app.url_error = false;
    app.fetch_error = None;
    // Selection dies at the start of a fetch cycle; the stale catalog stays
    // queryable until the response replaces it.
    app.catalog.clear_selection();
    app.input_mode = InputMode::Loading;
    app.status_message = Some("Fetching formats...".to_string());
    log::info!("Fetch requested for {}", url);
    let _ = app.fetch_tx.send(url);
}

fn reset(app: &mut App) {
    app.video = None;
    app.catalog = FormatCatalog::default();
    app.fetch_error = None;
    app.thumbnail = None;
    app.video_cursor = 0;
    app.audio_cursor = 0;
    app.focus = PaneFocus::Video;
    app.status_message = None;
    app.input_mode = InputMode::Editing;
}

fn focused_kind(app: &App) -> MediaKind {
    match app.focus {
        PaneFocus::Video => MediaKind::Video,
        PaneFocus::Audio => MediaKind::Audio,
    }
}

fn move_cursor(app: &mut App, delta: i32) {
    let kind = focused_kind(app);
    let len = app.catalog.visible(kind).len();
    if len == 0 {
        return;
    }
    let cursor = match app.focus {
        PaneFocus::Video => &mut app.video_cursor,
        PaneFocus::Audio => &mut app.audio_cursor,
    };
    *cursor = if delta > 0 {
        (*cursor + delta as usize).min(len - 1)
    } else {
        cursor.saturating_sub(delta.unsigned_abs() as usize)
    };
}

fn cycle_filter(app: &mut App) {
    match app.focus {
        PaneFocus::Video => {
            let next = app.catalog.video_filter.next();
            app.catalog.set_video_filter(next);
            app.status_message = Some(format!("Video filter: {}", next.label()));
        }
        PaneFocus::Audio => {
            let next = app.catalog.audio_filter.next();
            app.catalog.set_audio_filter(next);
            app.status_message = Some(format!("Audio filter: {}", next.label()));
        }
    }
    clamp_cursors(app);
}

pub fn clamp_cursors(app: &mut App) {
    let video_len = app.catalog.visible(MediaKind::Video).len();
    let audio_len = app.catalog.visible(MediaKind::Audio).len();
    app.video_cursor = app.video_cursor.min(video_len.saturating_sub(1));
    app.audio_cursor = app.audio_cursor.min(audio_len.saturating_sub(1));
}

fn select_under_cursor(app: &mut App) {
    let kind = focused_kind(app);
    let cursor = match app.focus {
        PaneFocus::Video => app.video_cursor,
        PaneFocus::Audio => app.audio_cursor,
    };
    let id = app
        .catalog
        .visible(kind)
        .get(cursor)
        .map(|f| f.id.to_string());
    if let Some(id) = id {
        app.catalog.select(&id, kind);
    }
}

fn start_download(app: &mut App) {
    if app.download_in_progress {
        return;
    }
    let Some(video) = app.video.clone() else {
        return;
    };
    let Some(fmt) = app.catalog.selected_format() else {
        app.status_message = Some("No format selected.".to_string());
        return;
    };
    let filename = download::build_filename(&video.title, fmt.ext.as_deref());
    let request = DownloadRequest {
        video_url: video.source_url,
        format_id: fmt.id.clone(),
        filename: filename.clone(),
    };
    app.download_in_progress = true;
    app.status_message = Some(format!("Processing {} on server...", filename));
    let _ = app.download_tx.send(request);
}

fn copy_info(app: &mut App) {
    let Some(video) = &app.video else {
        app.status_message = Some("No video info loaded to copy.".to_string());
        return;
    };
    let text = format!(
        "{} - by {} ({})\nURL: {}",
        video.title,
        video.uploader,
        api::format_duration(video.duration),
        video.source_url
    );
    match arboard::Clipboard::new().and_then(|mut clipboard| clipboard.set_text(text)) {
        Ok(()) => app.status_message = Some("Copied video info.".to_string()),
        Err(e) => app.status_message = Some(format!("Failed to copy info: {}", e)),
    }
}

fn open_preview(app: &mut App) {
    let Some(id) = app.video.as_ref().and_then(|v| v.video_id.clone()) else {
        app.status_message = Some("No video id available for preview.".to_string());
        return;
    };
    match webbrowser::open(&sys_url::watch_url(&id)) {
        Ok(()) => app.status_message = Some("Opened preview in browser.".to_string()),
        Err(e) => app.status_message = Some(format!("Failed to open preview: {}", e)),
    }
}

fn prev_char_boundary(s: &str, idx: usize) -> usize {
    let mut i = idx.saturating_sub(1);
    while i > 0 && !s.is_char_boundary(i) {
        i -= 1;
    }
    i
}

fn next_char_boundary(s: &str, idx: usize) -> usize {
    let mut i = idx + 1;
    while i < s.len() && !s.is_char_boundary(i) {
        i += 1;
    }
    i
}
