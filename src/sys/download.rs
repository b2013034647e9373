use anyhow::{Context, Result, bail};
use std::path::{Path, PathBuf};
use tokio::io::AsyncWriteExt;

const MAX_BASENAME_LEN: usize = 100;

/// Builds the filename sent to the download trigger: sanitized title plus
/// the chosen format's extension, "mp4" when the format has none.
pub fn build_filename(title: &str, ext: Option<&str>) -> String {
    let safe = sanitize_filename::sanitize(title);
    let mut base: String = safe.chars().take(MAX_BASENAME_LEN).collect();
    base = base.trim().trim_matches('.').to_string();
    if base.is_empty() {
        base = "video".to_string();
    }
    format!("{}.{}", base, ext.unwrap_or("mp4"))
}

/// Streams the backend's download response into `dir/filename`. The server
/// does the fetch/transcode/merge; this just sinks the body to disk.
pub async fn fetch_to_file(
    client: &reqwest::Client,
    url: &str,
    dir: &Path,
    filename: &str,
) -> Result<PathBuf> {
    tokio::fs::create_dir_all(dir)
        .await
        .context("Failed to create download directory")?;
    let path = dir.join(filename);
    let part = dir.join(format!("{}.part", filename));

    log::info!("Requesting download: {} -> {}", url, path.display());

    let mut resp = client.get(url).send().await.context("Download request failed")?;
    let status = resp.status();
    if !status.is_success() {
        bail!("Server Error ({})", status.as_u16());
    }

    // The body is staged under a .part name; an interrupted stream removes
    // it instead of leaving a half-written file at the final path.
    if let Err(e) = sink_body(&mut resp, &part).await {
        let _ = tokio::fs::remove_file(&part).await;
        return Err(e);
    }
    tokio::fs::rename(&part, &path)
        .await
        .with_context(|| format!("Failed to move {} into place", part.display()))?;

    log::info!("Download finished: {}", path.display());
    Ok(path)
}

async fn sink_body(resp: &mut reqwest::Response, part: &Path) -> Result<()> {
    let mut file = tokio::fs::File::create(part)
        .await
        .with_context(|| format!("Failed to create {}", part.display()))?;
    while let Some(chunk) = resp.chunk().await.context("Download stream failed")? {
        file.write_all(&chunk).await?;
    }
    file.flush().await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filename_keeps_ext_and_strips_invalid_chars() {
        let name = build_filename("My / Video: Part 1?", Some("mkv"));
        assert!(name.ends_with(".mkv"));
        assert!(!name.contains('/'));
        assert!(!name.contains(':'));
        assert!(!name.contains('?'));
    }

    #[test]
    fn filename_falls_back_to_mp4() {
        assert_eq!(build_filename("clip", None), "clip.mp4");
    }

    #[test]
    fn empty_title_gets_default_base() {
        assert_eq!(build_filename("///", Some("m4a")), "video.m4a");
        assert_eq!(build_filename("", None), "video.mp4");
    }

    #[test]
    fn long_titles_are_truncated() {
        let long = "x".repeat(500);
        let name = build_filename(&long, Some("mp4"));
        assert_eq!(name.len(), MAX_BASENAME_LEN + ".mp4".len());
    }

    #[tokio::test]
    async fn interrupted_stream_leaves_no_partial_file() {
        use tokio::io::AsyncWriteExt as _;

        // A server that promises 100 bytes, sends 7, then drops the
        // connection, which surfaces as a stream error on the client.
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let (mut sock, _) = listener.accept().await.unwrap();
            sock.write_all(b"HTTP/1.1 200 OK\r\nContent-Length: 100\r\n\r\npartial")
                .await
                .unwrap();
            sock.shutdown().await.unwrap();
        });

        let dir = std::env::temp_dir().join(format!("vidfetch-cut-{}", std::process::id()));
        let client = reqwest::Client::new();
        let result =
            fetch_to_file(&client, &format!("http://{}/clip", addr), &dir, "clip.mp4").await;

        assert!(result.is_err());
        assert!(!dir.join("clip.mp4").exists());
        assert!(!dir.join("clip.mp4.part").exists());
        let _ = std::fs::remove_dir_all(&dir);
    }

    #[tokio::test]
    async fn unreachable_server_creates_no_files() {
        let dir = std::env::temp_dir().join(format!("vidfetch-refused-{}", std::process::id()));
        let client = reqwest::Client::new();
        let result = fetch_to_file(&client, "http://127.0.0.1:9/clip", &dir, "clip.mp4").await;

        assert!(result.is_err());
        assert!(!dir.join("clip.mp4").exists());
        assert!(!dir.join("clip.mp4.part").exists());
        let _ = std::fs::remove_dir_all(&dir);
    }
}
