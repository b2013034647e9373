use crate::app::catalog::FormatCatalog;
use crate::model::{FetchedVideo, VideoInfo};
use crate::sys::config::Config;
use crate::sys::{api, download, image as sys_image};
use anyhow::Result;
use image::DynamicImage;
use std::time::Duration;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

use super::{DownloadEvent, DownloadRequest, InputMode, PaneFocus};

pub struct App {
    pub running: bool,
    pub input_mode: InputMode,
    pub focus: PaneFocus,

    // URL input
    pub url_input: String,
    pub cursor_position: usize,
    pub url_error: bool,

    // Loaded video
    pub video: Option<VideoInfo>,
    pub catalog: FormatCatalog,
    pub fetch_error: Option<String>,
    pub thumbnail: Option<DynamicImage>,

    // Per-pane list cursors over the visible formats
    pub video_cursor: usize,
    pub audio_cursor: usize,

    // Async communication
    pub fetch_tx: UnboundedSender<String>,
    pub fetch_rx: UnboundedReceiver<Result<FetchedVideo, String>>,
    pub image_tx: UnboundedSender<String>,
    pub image_rx: UnboundedReceiver<(String, DynamicImage)>,
    pub download_tx: UnboundedSender<DownloadRequest>,
    pub download_rx: UnboundedReceiver<DownloadEvent>,
    pub download_in_progress: bool,

    pub status_message: Option<String>,
    pub config: Config,
}

impl App {
    pub fn new(config: Config) -> Result<Self> {
        let client = reqwest::Client::builder()
            .connect_timeout(Duration::from_secs(15))
            .build()?;
        // Format fetches get a total deadline so a backend that accepts the
        // connection but never answers still releases the UI through the
        // normal error path. Downloads keep the unbounded client.
        let fetch_client = reqwest::Client::builder()
            .connect_timeout(Duration::from_secs(15))
            .timeout(Duration::from_secs(120))
            .build()?;

        let (fetch_tx, mut fetch_req_rx) = mpsc::unbounded_channel::<String>();
        let (fetch_res_tx, fetch_rx) = mpsc::unbounded_channel();

        let backend_url = config.backend_url.clone();
        tokio::spawn(async move {
            while let Some(url) = fetch_req_rx.recv().await {
                match api::fetch_formats(&fetch_client, &backend_url, &url).await {
                    Ok(fetched) => {
                        let _ = fetch_res_tx.send(Ok(fetched));
                    }
                    Err(e) => {
                        let _ = fetch_res_tx.send(Err(e.to_string()));
                    }
                }
            }
        });

        let (image_tx, mut image_cmd_rx) = mpsc::unbounded_channel::<String>();
        let (image_res_tx, image_rx) = mpsc::unbounded_channel();

        let image_client = client.clone();
        tokio::spawn(async move {
            while let Some(url) = image_cmd_rx.recv().await {
                if let Ok(img) = sys_image::download_thumbnail(&image_client, &url).await {
                    // Tagged with the requested URL so stale responses can
                    // be told apart from the current video's thumbnail.
                    let _ = image_res_tx.send((url, img));
                }
            }
        });

        let (download_tx, mut download_cmd_rx) = mpsc::unbounded_channel::<DownloadRequest>();
        let (download_event_tx, download_rx) = mpsc::unbounded_channel();

        let download_client = client.clone();
        let backend_url = config.backend_url.clone();
        let download_dir = std::path::PathBuf::from(&config.download_directory);
        tokio::spawn(async move {
            while let Some(req) = download_cmd_rx.recv().await {
                let url = api::download_url(
                    &backend_url,
                    &req.video_url,
                    &req.format_id,
                    &req.filename,
                );
                match download::fetch_to_file(&download_client, &url, &download_dir, &req.filename)
                    .await
                {
                    Ok(path) => {
                        let _ = download_event_tx.send(DownloadEvent::Finished(path));
                    }
                    Err(e) => {
                        log::error!("Download failed: {}", e);
                        let _ = download_event_tx.send(DownloadEvent::Error(e.to_string()));
                    }
                }
            }
        });

        Ok(Self {
            running: true,
            input_mode: InputMode::Editing,
            focus: PaneFocus::Video,
            url_input: String::new(),
            cursor_position: 0,
            url_error: false,
            video: None,
            catalog: FormatCatalog::default(),
            fetch_error: None,
            thumbnail: None,
            video_cursor: 0,
            audio_cursor: 0,
            fetch_tx,
            fetch_rx,
            image_tx,
            image_rx,
            download_tx,
            download_rx,
            download_in_progress: false,
            status_message: None,
            config,
        })
    }
}
