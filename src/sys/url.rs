use regex::Regex;
use std::sync::LazyLock;
use url::Url;

const SUPPORTED_HOSTS: [&str; 6] = [
    "youtube.com",
    "youtu.be",
    "m.youtube.com",
    "www.youtube.com",
    "youtube-nocookie.com",
    "www.youtube-nocookie.com",
];

static ID_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    vec![
        Regex::new(
            r"(?:https?://)?(?:www\.|m\.)?youtube\.com/(?:embed/|v/|watch\?v=|watch\?.+&v=)([^#&?/]+)",
        )
        .unwrap(),
        Regex::new(r"(?:https?://)?(?:www\.)?youtu\.be/([^#&?/]+)").unwrap(),
        Regex::new(r"(?:https?://)?(?:www\.)?youtube-nocookie\.com/embed/([^#&?/]+)").unwrap(),
        // Last-resort shapes: /v/ and /u/<x>/ paths, and a v= parameter
        // that is not the first in the query string.
        Regex::new(r"(?:/v/|/u/\w/|&v=)([^#&?/]+)").unwrap(),
    ]
});

/// Whether the pasted text looks like a URL on a supported video host.
/// Scheme-less input is treated as https.
pub fn is_supported_url(input: &str) -> bool {
    let input = input.trim();
    if input.is_empty() {
        return false;
    }
    let full = if input.starts_with("http://") || input.starts_with("https://") {
        input.to_string()
    } else {
        format!("https://{}", input)
    };
    let Ok(parsed) = Url::parse(&full) else {
        return false;
    };
    let Some(host) = parsed.host_str() else {
        return false;
    };
    let host = host.to_ascii_lowercase();
    SUPPORTED_HOSTS
        .iter()
        .any(|s| host == *s || host.ends_with(&format!(".{}", s)))
}

/// Extracts the 11-character video id from the known watch/embed/short-link
/// URL shapes. Returns None when no pattern yields an id of that length.
pub fn extract_video_id(input: &str) -> Option<String> {
    for re in ID_PATTERNS.iter() {
        if let Some(caps) = re.captures(input) {
            let id = &caps[1];
            if id.len() == 11 {
                return Some(id.to_string());
            }
        }
    }
    None
}

/// Canonical watch URL used for the browser preview.
pub fn watch_url(video_id: &str) -> String {
    format!("https://www.youtube.com/watch?v={}", video_id)
}
