use crate::model::{Format, MediaKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum VideoFilter {
    #[default]
    All,
    HdAndUp,
    FourKAndUp,
}

impl VideoFilter {
    pub fn label(&self) -> &'static str {
        match self {
            VideoFilter::All => "All",
            VideoFilter::HdAndUp => "HD+",
            VideoFilter::FourKAndUp => "4K+",
        }
    }

    pub fn next(&self) -> Self {
        match self {
            VideoFilter::All => VideoFilter::HdAndUp,
            VideoFilter::HdAndUp => VideoFilter::FourKAndUp,
            VideoFilter::FourKAndUp => VideoFilter::All,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AudioFilter {
    #[default]
    All,
    HighBitrate,
}

impl AudioFilter {
    pub fn label(&self) -> &'static str {
        match self {
            AudioFilter::All => "All",
            AudioFilter::HighBitrate => "128kbps+",
        }
    }

    pub fn next(&self) -> Self {
        match self {
            AudioFilter::All => AudioFilter::HighBitrate,
            AudioFilter::HighBitrate => AudioFilter::All,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    pub id: String,
    pub kind: MediaKind,
}

/// Segmented/adaptive delivery cannot be served as a single direct file, so
/// these formats are dropped before any user filter is applied.
pub fn is_adaptive(format: &Format) -> bool {
    format
        .protocol
        .as_deref()
        .is_some_and(|p| p.contains("m3u8") || p.contains("dash"))
}

const HD_TOKENS: [&str; 5] = ["720", "1080", "1440", "2160", "4k"];
const UHD_TOKENS: [&str; 2] = ["2160", "4k"];

// Quality labels are free-form backend text, so the tier match on them is a
// heuristic token scan, same as the height threshold's textual fallback.
fn label_matches(quality: Option<&str>, tokens: &[&str]) -> bool {
    quality.is_some_and(|q| {
        let q = q.to_ascii_lowercase();
        tokens.iter().any(|t| q.contains(t))
    })
}

pub fn passes_video_filter(format: &Format, filter: VideoFilter) -> bool {
    match filter {
        VideoFilter::All => true,
        VideoFilter::HdAndUp => {
            format.height.is_some_and(|h| h >= 720)
                || label_matches(format.quality.as_deref(), &HD_TOKENS)
        }
        VideoFilter::FourKAndUp => {
            format.height.is_some_and(|h| h >= 2160)
                || label_matches(format.quality.as_deref(), &UHD_TOKENS)
        }
    }
}

pub fn passes_audio_filter(format: &Format, filter: AudioFilter) -> bool {
    match filter {
        AudioFilter::All => true,
        AudioFilter::HighBitrate => format.abr.is_some_and(|abr| abr >= 128.0),
    }
}

/// Holds the format lists of the loaded video, the active per-kind filters,
/// and the single selected format.
///
/// Invariant: the selection always refers to an entry that is currently
/// visible under the active filters; every mutation re-establishes this.
#[derive(Debug, Default)]
pub struct FormatCatalog {
    video: Vec<Format>,
    audio: Vec<Format>,
    pub video_filter: VideoFilter,
    pub audio_filter: AudioFilter,
    selection: Option<Selection>,
}

impl FormatCatalog {
    /// Replaces both format lists wholesale and drops any prior selection.
    pub fn load(&mut self, video: Vec<Format>, audio: Vec<Format>) {
        self.video = video;
        self.audio = audio;
        self.selection = None;
    }

    pub fn is_empty(&self) -> bool {
        self.video.is_empty() && self.audio.is_empty()
    }

    /// The filtered, order-preserving view used for rendering.
    pub fn visible(&self, kind: MediaKind) -> Vec<&Format> {
        match kind {
            MediaKind::Video => self
                .video
                .iter()
                .filter(|f| !is_adaptive(f))
                .filter(|f| passes_video_filter(f, self.video_filter))
                .collect(),
            MediaKind::Audio => self
                .audio
                .iter()
                .filter(|f| !is_adaptive(f))
                .filter(|f| passes_audio_filter(f, self.audio_filter))
                .collect(),
        }
    }

    pub fn set_video_filter(&mut self, filter: VideoFilter) {
        self.video_filter = filter;
        self.revalidate_selection();
    }

    pub fn set_audio_filter(&mut self, filter: AudioFilter) {
        self.audio_filter = filter;
        self.revalidate_selection();
    }

    /// Silent no-op when `id` is not currently visible for `kind`.
    pub fn select(&mut self, id: &str, kind: MediaKind) {
        if self.visible(kind).iter().any(|f| f.id == id) {
            self.selection = Some(Selection {
                id: id.to_string(),
                kind,
            });
        }
    }

    pub fn clear_selection(&mut self) {
        self.selection = None;
    }

    pub fn current_selection(&self) -> Option<&Selection> {
        self.selection.as_ref()
    }

    /// Resolves the selection back to its format entry.
    pub fn selected_format(&self) -> Option<&Format> {
        let sel = self.selection.as_ref()?;
        let list = match sel.kind {
            MediaKind::Video => &self.video,
            MediaKind::Audio => &self.audio,
        };
        list.iter().find(|f| f.id == sel.id)
    }

    // Runs after every filter change, for either kind. A selection can only
    // be invalidated by its own kind's visibility list.
    fn revalidate_selection(&mut self) {
        if let Some(sel) = &self.selection {
            if !self.visible(sel.kind).iter().any(|f| f.id == sel.id) {
                self.selection = None;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn video_fmt(id: &str, height: Option<u32>, quality: &str, protocol: Option<&str>) -> Format {
        Format {
            id: id.to_string(),
            quality: Some(quality.to_string()),
            ext: Some("mp4".to_string()),
            size: None,
            resolution: None,
            height,
            fps: None,
            abr: None,
            protocol: protocol.map(|s| s.to_string()),
            vcodec: Some("avc1".to_string()),
            acodec: None,
            filesize: None,
        }
    }

    fn audio_fmt(id: &str, abr: Option<f64>) -> Format {
        Format {
            id: id.to_string(),
            quality: Some("audio".to_string()),
            ext: Some("m4a".to_string()),
            size: None,
            resolution: None,
            height: None,
            fps: None,
            abr,
            protocol: None,
            vcodec: None,
            acodec: Some("mp4a".to_string()),
            filesize: None,
        }
    }

    fn sample_catalog() -> FormatCatalog {
        let mut catalog = FormatCatalog::default();
        catalog.load(
            vec![
                video_fmt("v1", Some(480), "480p", None),
                video_fmt("v2", Some(1080), "1080p", Some("dash")),
                video_fmt("v3", Some(720), "720p", None),
            ],
            vec![audio_fmt("a1", Some(64.0)), audio_fmt("a2", Some(160.0))],
        );
        catalog
    }

    fn visible_ids(catalog: &FormatCatalog, kind: MediaKind) -> Vec<String> {
        catalog
            .visible(kind)
            .iter()
            .map(|f| f.id.clone())
            .collect()
    }

    #[test]
    fn adaptive_formats_are_never_visible() {
        let mut catalog = sample_catalog();
        for filter in [VideoFilter::All, VideoFilter::HdAndUp, VideoFilter::FourKAndUp] {
            catalog.set_video_filter(filter);
            assert!(
                !visible_ids(&catalog, MediaKind::Video).contains(&"v2".to_string()),
                "dash format leaked through filter {:?}",
                filter
            );
        }
    }

    #[test]
    fn hd_filter_keeps_only_hd_entries() {
        let mut catalog = sample_catalog();
        catalog.set_video_filter(VideoFilter::HdAndUp);
        // v1 fails the height/label test, v2 is adaptive regardless of filter.
        assert_eq!(visible_ids(&catalog, MediaKind::Video), vec!["v3"]);
    }

    #[test]
    fn label_tokens_count_when_height_is_missing() {
        let f = video_fmt("x", None, "1080p60 HDR", None);
        assert!(passes_video_filter(&f, VideoFilter::HdAndUp));
        assert!(!passes_video_filter(&f, VideoFilter::FourKAndUp));

        let f = video_fmt("x", None, "4K", None);
        assert!(passes_video_filter(&f, VideoFilter::FourKAndUp));

        let f = video_fmt("x", None, "medium", None);
        assert!(!passes_video_filter(&f, VideoFilter::HdAndUp));
    }

    #[test]
    fn four_k_filter_requires_2160() {
        let f = video_fmt("x", Some(2160), "hi", None);
        assert!(passes_video_filter(&f, VideoFilter::FourKAndUp));
        let f = video_fmt("x", Some(1440), "1440p", None);
        assert!(!passes_video_filter(&f, VideoFilter::FourKAndUp));
    }

    #[test]
    fn audio_high_bitrate_needs_abr() {
        assert!(passes_audio_filter(&audio_fmt("a", Some(128.0)), AudioFilter::HighBitrate));
        assert!(!passes_audio_filter(&audio_fmt("a", Some(127.9)), AudioFilter::HighBitrate));
        assert!(!passes_audio_filter(&audio_fmt("a", None), AudioFilter::HighBitrate));
        assert!(passes_audio_filter(&audio_fmt("a", None), AudioFilter::All));
    }

    #[test]
    fn is_adaptive_matches_protocol_substrings() {
        assert!(is_adaptive(&video_fmt("x", None, "q", Some("m3u8_native"))));
        assert!(is_adaptive(&video_fmt("x", None, "q", Some("http_dash_segments"))));
        assert!(!is_adaptive(&video_fmt("x", None, "q", Some("https"))));
        assert!(!is_adaptive(&video_fmt("x", None, "q", None)));
    }

    #[test]
    fn select_hidden_id_is_a_no_op() {
        let mut catalog = sample_catalog();
        catalog.set_video_filter(VideoFilter::HdAndUp);
        catalog.select("v3", MediaKind::Video);
        assert_eq!(catalog.current_selection().unwrap().id, "v3");

        // v1 is filtered out, v2 is adaptive, "zz" does not exist.
        catalog.select("v1", MediaKind::Video);
        assert_eq!(catalog.current_selection().unwrap().id, "v3");
        catalog.select("v2", MediaKind::Video);
        assert_eq!(catalog.current_selection().unwrap().id, "v3");
        catalog.select("zz", MediaKind::Video);
        assert_eq!(catalog.current_selection().unwrap().id, "v3");
    }

    #[test]
    fn selection_survives_widening_filter() {
        let mut catalog = sample_catalog();
        catalog.set_video_filter(VideoFilter::HdAndUp);
        catalog.select("v3", MediaKind::Video);
        catalog.set_video_filter(VideoFilter::All);
        let sel = catalog.current_selection().unwrap();
        assert_eq!(sel.id, "v3");
        assert_eq!(sel.kind, MediaKind::Video);
    }

    #[test]
    fn selection_cleared_when_filter_hides_it() {
        let mut catalog = sample_catalog();
        catalog.select("v3", MediaKind::Video);
        catalog.set_video_filter(VideoFilter::FourKAndUp);
        assert!(catalog.current_selection().is_none());
    }

    #[test]
    fn cross_kind_filter_change_keeps_selection() {
        let mut catalog = sample_catalog();
        catalog.select("v3", MediaKind::Video);
        // Audio filter changes run the check but only the selection's own
        // kind can invalidate it.
        catalog.set_audio_filter(AudioFilter::HighBitrate);
        assert_eq!(catalog.current_selection().unwrap().id, "v3");
    }

    #[test]
    fn load_clears_selection_even_with_same_ids() {
        let mut catalog = sample_catalog();
        catalog.select("v1", MediaKind::Video);
        catalog.load(
            vec![video_fmt("v1", Some(480), "480p", None)],
            Vec::new(),
        );
        assert!(catalog.current_selection().is_none());
    }

    #[test]
    fn set_filter_is_idempotent() {
        let mut catalog = sample_catalog();
        catalog.set_video_filter(VideoFilter::HdAndUp);
        let once = visible_ids(&catalog, MediaKind::Video);
        catalog.set_video_filter(VideoFilter::HdAndUp);
        assert_eq!(once, visible_ids(&catalog, MediaKind::Video));
    }

    #[test]
    fn new_selection_replaces_previous_across_kinds() {
        let mut catalog = sample_catalog();
        catalog.select("v1", MediaKind::Video);
        catalog.select("a2", MediaKind::Audio);
        let sel = catalog.current_selection().unwrap();
        assert_eq!(sel.id, "a2");
        assert_eq!(sel.kind, MediaKind::Audio);
    }

    #[test]
    fn selected_format_resolves_entry() {
        let mut catalog = sample_catalog();
        catalog.select("a2", MediaKind::Audio);
        let f = catalog.selected_format().unwrap();
        assert_eq!(f.id, "a2");
        assert_eq!(f.abr, Some(160.0));
    }

    #[test]
    fn visible_preserves_catalog_order() {
        let catalog = sample_catalog();
        assert_eq!(visible_ids(&catalog, MediaKind::Video), vec!["v1", "v3"]);
        assert_eq!(visible_ids(&catalog, MediaKind::Audio), vec!["a1", "a2"]);
    }
}
