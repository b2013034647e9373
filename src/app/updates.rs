use super::{App, DownloadEvent, InputMode, PaneFocus};
use crate::app::handlers;

pub fn on_tick(app: &mut App) {
    // Fetch results. A late-arriving response simply replaces the catalog;
    // a failed one leaves it untouched.
    while let Ok(result) = app.fetch_rx.try_recv() {
        match result {
            Ok(fetched) => {
                app.input_mode = InputMode::Normal;
                app.fetch_error = None;
                app.thumbnail = None;
                if let Some(url) = &fetched.info.thumbnail_url {
                    let _ = app.image_tx.send(url.clone());
                }
                app.catalog.load(fetched.video_formats, fetched.audio_formats);
                app.video = Some(fetched.info);
                app.video_cursor = 0;
                app.audio_cursor = 0;
                app.focus = PaneFocus::Video;
                handlers::clamp_cursors(app);
                app.status_message = Some("Formats loaded. Enter: pick | d: download".to_string());
            }
            Err(e) => {
                app.input_mode = InputMode::Normal;
                log::warn!("Fetch failed: {}", e);
                app.fetch_error = Some(e);
            }
        }
    }

    // A slow thumbnail from an earlier fetch can land after a new video has
    // loaded; only the one matching the current video is kept.
    while let Ok((url, img)) = app.image_rx.try_recv() {
        let current = app.video.as_ref().and_then(|v| v.thumbnail_url.as_deref());
        if current == Some(url.as_str()) {
            app.thumbnail = Some(img);
        }
    }

    while let Ok(event) = app.download_rx.try_recv() {
        app.download_in_progress = false;
        match event {
            DownloadEvent::Finished(path) => {
                app.status_message = Some(format!("Saved to {}", path.display()));
            }
            DownloadEvent::Error(e) => {
                app.status_message = Some(format!("Download failed: {}", e));
            }
        }
    }
}
