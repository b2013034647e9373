use crate::model::{FetchedVideo, Format, VideoInfo};
use crate::sys::url::extract_video_id;
use anyhow::{Context, Result, bail};
use serde::Deserialize;

#[derive(Debug, Default, Deserialize)]
struct FormatLists {
    #[serde(default)]
    video: Vec<Format>,
    #[serde(default)]
    audio: Vec<Format>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct FormatsResponse {
    success: bool,
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    video_title: Option<String>,
    #[serde(default)]
    thumbnail_url: Option<String>,
    #[serde(default)]
    duration: Option<f64>,
    #[serde(default)]
    uploader: Option<String>,
    #[serde(default)]
    view_count: Option<u64>,
    #[serde(default)]
    formats: FormatLists,
}

#[derive(Debug, Deserialize)]
struct HealthResponse {
    #[serde(default)]
    status: String,
}

fn formats_endpoint(backend_url: &str, video_url: &str) -> String {
    format!(
        "{}/api/get-formats?url={}",
        backend_url.trim_end_matches('/'),
        urlencoding::encode(video_url)
    )
}

/// Query for the `/api/download` trigger. The backend does the actual
/// fetch/merge and streams a file back.
pub fn download_url(backend_url: &str, video_url: &str, format_id: &str, filename: &str) -> String {
    format!(
        "{}/api/download?url={}&format_id={}&filename={}",
        backend_url.trim_end_matches('/'),
        urlencoding::encode(video_url),
        urlencoding::encode(format_id),
        urlencoding::encode(filename)
    )
}

/// Fetches the format catalog for `video_url` from the backend.
///
/// Non-2xx responses surface the server's error message when the body still
/// parses as a payload, otherwise a generic "Server Error (status)". A 2xx
/// body with `success: false` surfaces its error field.
pub async fn fetch_formats(
    client: &reqwest::Client,
    backend_url: &str,
    video_url: &str,
) -> Result<FetchedVideo> {
    let endpoint = formats_endpoint(backend_url, video_url);
    log::info!("Fetching formats from {}", endpoint);

    let resp = client
        .get(&endpoint)
        .send()
        .await
        .context("Failed to reach backend")?;

    let status = resp.status();
    if !status.is_success() {
        let msg = resp
            .json::<FormatsResponse>()
            .await
            .ok()
            .and_then(|r| r.error)
            .unwrap_or_else(|| format!("Server Error ({})", status.as_u16()));
        bail!(msg);
    }

    let data: FormatsResponse = resp
        .json()
        .await
        .context("Failed to parse backend response")?;
    if !data.success {
        bail!(data.error.unwrap_or_else(|| "Backend error.".to_string()));
    }

    log::info!(
        "Backend returned {} video / {} audio formats",
        data.formats.video.len(),
        data.formats.audio.len()
    );

    Ok(FetchedVideo {
        info: VideoInfo {
            title: data.video_title.unwrap_or_else(|| "N/A".to_string()),
            uploader: data.uploader.unwrap_or_else(|| "Unknown".to_string()),
            duration: data.duration,
            view_count: data.view_count,
            thumbnail_url: data.thumbnail_url.filter(|u| !u.is_empty()),
            source_url: video_url.to_string(),
            video_id: extract_video_id(video_url),
        },
        video_formats: data.formats.video,
        audio_formats: data.formats.audio,
    })
}

/// Startup probe against `/api/health`.
pub async fn check_backend(client: &reqwest::Client, backend_url: &str) -> Result<()> {
    let endpoint = format!("{}/api/health", backend_url.trim_end_matches('/'));
    let resp = client
        .get(&endpoint)
        .send()
        .await
        .context("Backend is unreachable")?;
    if !resp.status().is_success() {
        bail!("Backend health check failed ({})", resp.status().as_u16());
    }
    let health: HealthResponse = resp.json().await.unwrap_or(HealthResponse {
        status: String::new(),
    });
    if health.status != "healthy" {
        bail!("Backend reported status '{}'", health.status);
    }
    Ok(())
}

pub fn format_duration(seconds: Option<f64>) -> String {
    let secs = match seconds {
        Some(s) if s >= 0.0 => s as u64,
        _ => return "0:00".to_string(),
    };
    let h = secs / 3600;
    let m = (secs % 3600) / 60;
    let s = secs % 60;
    if h > 0 {
        format!("{}:{:02}:{:02}", h, m, s)
    } else {
        format!("{}:{:02}", m, s)
    }
}

pub fn format_views(count: Option<u64>) -> String {
    match count {
        None => "N/A views".to_string(),
        Some(c) if c >= 1_000_000_000 => format!("{:.1}B views", c as f64 / 1e9),
        Some(c) if c >= 1_000_000 => format!("{:.1}M views", c as f64 / 1e6),
        Some(c) if c >= 1_000 => format!("{:.0}K views", c as f64 / 1e3),
        Some(c) => format!("{} views", c),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_full_payload() {
        let body = r#"{
            "success": true,
            "videoTitle": "A Video",
            "thumbnailUrl": "https://i.ytimg.com/vi/x/hq720.jpg",
            "duration": 213.0,
            "uploader": "Someone",
            "viewCount": 1234567,
            "formats": {
                "video": [
                    {"id": "137", "quality": "1080p", "ext": "mp4", "size": "45.10 MB",
                     "height": 1080, "fps": 30, "protocol": "https", "vcodec": "avc1", "acodec": "none"}
                ],
                "audio": [
                    {"id": "140", "quality": "~128kbps", "ext": "m4a", "size": "3.40 MB", "abr": 128.0}
                ]
            }
        }"#;
        let parsed: FormatsResponse = serde_json::from_str(body).unwrap();
        assert!(parsed.success);
        assert_eq!(parsed.video_title.as_deref(), Some("A Video"));
        assert_eq!(parsed.formats.video.len(), 1);
        assert_eq!(parsed.formats.video[0].height, Some(1080));
        assert_eq!(parsed.formats.audio[0].abr, Some(128.0));
    }

    #[test]
    fn parses_error_payload_without_formats() {
        let body = r#"{"success": false, "error": "This video is unavailable."}"#;
        let parsed: FormatsResponse = serde_json::from_str(body).unwrap();
        assert!(!parsed.success);
        assert_eq!(parsed.error.as_deref(), Some("This video is unavailable."));
        assert!(parsed.formats.video.is_empty());
    }

    #[test]
    fn tolerates_malformed_format_entries() {
        // Only the id is required; everything else falls back to None.
        let body = r#"{"success": true, "formats": {"video": [{"id": "x"}], "audio": []}}"#;
        let parsed: FormatsResponse = serde_json::from_str(body).unwrap();
        let f = &parsed.formats.video[0];
        assert!(f.quality.is_none());
        assert!(f.protocol.is_none());
    }

    #[test]
    fn download_url_encodes_parameters() {
        let url = download_url(
            "https://backend.example/",
            "https://youtu.be/dQw4w9WgXcQ",
            "137+140",
            "My Video.mp4",
        );
        assert_eq!(
            url,
            "https://backend.example/api/download?url=https%3A%2F%2Fyoutu.be%2FdQw4w9WgXcQ&format_id=137%2B140&filename=My%20Video.mp4"
        );
    }

    #[test]
    fn formats_endpoint_encodes_video_url() {
        let url = formats_endpoint("https://backend.example", "https://youtube.com/watch?v=a&t=1");
        assert_eq!(
            url,
            "https://backend.example/api/get-formats?url=https%3A%2F%2Fyoutube.com%2Fwatch%3Fv%3Da%26t%3D1"
        );
    }

    #[test]
    fn duration_formatting() {
        assert_eq!(format_duration(None), "0:00");
        assert_eq!(format_duration(Some(-5.0)), "0:00");
        assert_eq!(format_duration(Some(59.0)), "0:59");
        assert_eq!(format_duration(Some(213.0)), "3:33");
        assert_eq!(format_duration(Some(3661.0)), "1:01:01");
    }

    #[test]
    fn view_count_formatting() {
        assert_eq!(format_views(None), "N/A views");
        assert_eq!(format_views(Some(999)), "999 views");
        assert_eq!(format_views(Some(15_300)), "15K views");
        assert_eq!(format_views(Some(1_500_000)), "1.5M views");
        assert_eq!(format_views(Some(2_100_000_000)), "2.1B views");
    }
}
