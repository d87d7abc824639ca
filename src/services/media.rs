use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

use crate::db::models::Video;

// Tried in order; the first pattern that matches wins.
static VIDEO_ID_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        r"(?:youtube\.com/watch\?v=|youtu\.be/|youtube\.com/embed/)([^&\n?#]+)",
        r"youtube\.com/watch\?.*v=([^&\n?#]+)",
    ]
    .iter()
    .map(|p| Regex::new(p).expect("valid video id pattern"))
    .collect()
});

static ISO_DURATION: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^P(?:(\d+)D)?(?:T(?:(\d+)H)?(?:(\d+)M)?(?:(\d+)S)?)?$")
        .expect("valid duration pattern")
});

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Provider {
    YouTube,
    Other,
}

pub fn extract_video_id(url: &str) -> Option<String> {
    VIDEO_ID_PATTERNS
        .iter()
        .find_map(|re| re.captures(url))
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}

pub fn provider(url: &str) -> Provider {
    if extract_video_id(url).is_some() {
        Provider::YouTube
    } else {
        Provider::Other
    }
}

/// Player URL for embedding; unknown URLs pass through unchanged.
pub fn embed_url(url: &str) -> String {
    match extract_video_id(url) {
        Some(id) => format!("https://www.youtube.com/embed/{}", id),
        None => url.to_string(),
    }
}

pub fn thumbnail_url(video: &Video) -> Option<String> {
    if let Some(thumbnail) = video.thumbnail.as_ref().filter(|t| !t.is_empty()) {
        return Some(thumbnail.clone());
    }
    extract_video_id(&video.video_url)
        .map(|id| format!("https://img.youtube.com/vi/{}/maxresdefault.jpg", id))
}

/// Renders an ISO-8601 duration (`PT1H2M3S`) as `1:02:03`, or `M:SS` under
/// an hour. Hour counts that do not fit a `u64` yield `None`.
pub fn format_duration(iso: &str) -> Option<String> {
    let caps = ISO_DURATION.captures(iso.trim())?;
    let part = |i: usize| -> u64 {
        caps.get(i)
            .and_then(|m| m.as_str().parse().ok())
            .unwrap_or(0)
    };

    let hours = part(1).checked_mul(24)?.checked_add(part(2))?;
    let minutes = part(3);
    let seconds = part(4);

    if hours > 0 {
        Some(format!("{}:{:02}:{:02}", hours, minutes, seconds))
    } else {
        Some(format!("{}:{:02}", minutes, seconds))
    }
}
