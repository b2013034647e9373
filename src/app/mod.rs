use std::path::PathBuf;

pub mod app;
pub mod catalog;
pub mod handlers;
pub mod updates;

pub use app::App;

#[derive(Debug, PartialEq, Eq)]
pub enum InputMode {
    Normal,
    Editing,
    Loading,
}

/// Which of the two format panes has keyboard focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaneFocus {
    Video,
    Audio,
}

/// Request handed to the background download worker.
#[derive(Debug)]
pub struct DownloadRequest {
    pub video_url: String,
    pub format_id: String,
    pub filename: String,
}

#[derive(Debug)]
pub enum DownloadEvent {
    Finished(PathBuf),
    Error(String),
}
