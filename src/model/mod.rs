use serde::{Deserialize, Serialize};

/// One downloadable stream variant as reported by the backend.
///
/// The backend already formats `size` for display; everything except `id`
/// may be missing and the UI substitutes placeholders.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Format {
    pub id: String,
    #[serde(default)]
    pub quality: Option<String>,
    #[serde(default)]
    pub ext: Option<String>,
    #[serde(default)]
    pub size: Option<String>,
    #[serde(default)]
    pub resolution: Option<String>,
    #[serde(default)]
    pub height: Option<u32>,
    #[serde(default)]
    pub fps: Option<f64>,
    #[serde(default)]
    pub abr: Option<f64>,
    #[serde(default)]
    pub protocol: Option<String>,
    #[serde(default)]
    pub vcodec: Option<String>,
    #[serde(default)]
    pub acodec: Option<String>,
    #[serde(default)]
    pub filesize: Option<u64>,
}

impl Format {
    /// Display label for a format row, e.g. "1080p (60fps)" or "medium (~128kbps)".
    pub fn display_quality(&self, kind: MediaKind) -> String {
        let mut label = self
            .quality
            .clone()
            .unwrap_or_else(|| "Unknown".to_string());
        match kind {
            MediaKind::Video => {
                if let Some(fps) = self.fps {
                    if fps > 30.0 {
                        label.push_str(&format!(" ({}fps)", fps.round() as u32));
                    }
                }
            }
            MediaKind::Audio => {
                if let Some(abr) = self.abr {
                    if !label.contains("kbps") {
                        label.push_str(&format!(" (~{}kbps)", abr.round() as u32));
                    }
                }
            }
        }
        label
    }

    pub fn display_ext(&self) -> String {
        self.ext
            .as_deref()
            .map(|e| e.to_uppercase())
            .unwrap_or_else(|| "?".to_string())
    }

    pub fn display_size(&self) -> String {
        self.size.clone().unwrap_or_else(|| "N/A".to_string())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MediaKind {
    Video,
    Audio,
}

/// Metadata of the currently loaded video.
#[derive(Debug, Clone)]
pub struct VideoInfo {
    pub title: String,
    pub uploader: String,
    pub duration: Option<f64>,
    pub view_count: Option<u64>,
    pub thumbnail_url: Option<String>,
    /// The URL the user entered, as sent to the backend.
    pub source_url: String,
    /// Extracted 11-character video id, when the URL pattern yields one.
    pub video_id: Option<String>,
}

/// A successful `/api/get-formats` response, split into metadata and the
/// two per-kind format lists.
#[derive(Debug, Clone)]
pub struct FetchedVideo {
    pub info: VideoInfo,
    pub video_formats: Vec<Format>,
    pub audio_formats: Vec<Format>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fmt(quality: Option<&str>) -> Format {
        Format {
            id: "f1".to_string(),
            quality: quality.map(|s| s.to_string()),
            ext: None,
            size: None,
            resolution: None,
            height: None,
            fps: None,
            abr: None,
            protocol: None,
            vcodec: None,
            acodec: None,
            filesize: None,
        }
    }

    #[test]
    fn missing_fields_render_placeholders() {
        let f = fmt(None);
        assert_eq!(f.display_quality(MediaKind::Video), "Unknown");
        assert_eq!(f.display_ext(), "?");
        assert_eq!(f.display_size(), "N/A");
    }

    #[test]
    fn high_fps_is_appended_for_video() {
        let mut f = fmt(Some("1080p"));
        f.fps = Some(60.0);
        assert_eq!(f.display_quality(MediaKind::Video), "1080p (60fps)");
        f.fps = Some(30.0);
        assert_eq!(f.display_quality(MediaKind::Video), "1080p");
    }

    #[test]
    fn bitrate_is_appended_once_for_audio() {
        let mut f = fmt(Some("medium"));
        f.abr = Some(129.5);
        assert_eq!(f.display_quality(MediaKind::Audio), "medium (~130kbps)");
        let mut f = fmt(Some("~128kbps"));
        f.abr = Some(128.0);
        assert_eq!(f.display_quality(MediaKind::Audio), "~128kbps");
    }
}
