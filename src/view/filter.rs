use serde::{Deserialize, Serialize};

use crate::db::models::Video;
use crate::services::categories::Category;

/// Search text plus selected category.
///
/// Both narrow the list and are AND-combined, so their order of application
/// does not matter. Results keep the input order; there is no relevance
/// ranking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Filter {
    pub search: String,
    pub category: String,
}

impl Default for Filter {
    fn default() -> Self {
        Self {
            search: String::new(),
            category: Category::All.as_str().to_string(),
        }
    }
}

impl Filter {
    pub fn new(search: impl Into<String>, category: impl Into<String>) -> Self {
        Self {
            search: search.into(),
            category: category.into(),
        }
    }

    pub fn search(search: impl Into<String>) -> Self {
        Self {
            search: search.into(),
            ..Default::default()
        }
    }

    /// Whether a concrete category (not the catch-all) is selected.
    pub fn category_active(&self) -> bool {
        !self.category.is_empty() && self.category != Category::All.as_str()
    }

    pub fn matches_category(&self, video: &Video) -> bool {
        !self.category_active() || video.category == self.category
    }

    pub fn matches_text(&self, video: &Video) -> bool {
        let term = self.search.trim();
        if term.is_empty() {
            return true;
        }
        let term = term.to_lowercase();
        video.title.to_lowercase().contains(&term)
            || video.description.to_lowercase().contains(&term)
            || video.tags.iter().any(|t| t.to_lowercase().contains(&term))
    }

    pub fn matches(&self, video: &Video) -> bool {
        self.matches_category(video) && self.matches_text(video)
    }

    pub fn apply<'a>(&self, videos: &'a [Video]) -> Vec<&'a Video> {
        videos.iter().filter(|v| self.matches(v)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn video(title: &str, description: &str, category: &str, tags: &[&str]) -> Video {
        Video {
            id: Uuid::new_v4(),
            title: title.to_string(),
            description: description.to_string(),
            video_url: "https://youtu.be/abc123".to_string(),
            category: category.to_string(),
            tags: tags.iter().map(|t| t.to_string()).collect(),
            thumbnail: None,
            duration: None,
            view_count: None,
            created_at: None,
            updated_at: None,
        }
    }

    fn sample() -> Vec<Video> {
        vec![
            video("Live at Wembley", "full concert", "Music", &["Music"]),
            video("Cup final", "highlights", "Sports", &["Sports", "News"]),
            video("Morning briefing", "Headlines of the day", "News", &["News"]),
            video("Guitar lesson", "learn chords", "Education", &["Education", "Music"]),
        ]
    }

    fn titles(found: Vec<&Video>) -> Vec<&str> {
        found.into_iter().map(|v| v.title.as_str()).collect()
    }

    #[test]
    fn category_keeps_exact_matches_only() {
        let videos = sample();
        let found = Filter::new("", "Music").apply(&videos);
        assert_eq!(titles(found), vec!["Live at Wembley"]);
    }

    #[test]
    fn catch_all_bypasses_category() {
        let videos = sample();
        assert_eq!(Filter::default().apply(&videos).len(), videos.len());
        assert_eq!(Filter::new("", "").apply(&videos).len(), videos.len());
    }

    #[test]
    fn search_hits_title_description_or_tag() {
        let videos = sample();
        assert_eq!(titles(Filter::search("WEMBLEY").apply(&videos)), vec!["Live at Wembley"]);
        assert_eq!(titles(Filter::search("headlines").apply(&videos)), vec!["Morning briefing"]);
        assert_eq!(
            titles(Filter::search("news").apply(&videos)),
            vec!["Cup final", "Morning briefing"]
        );
    }

    #[test]
    fn blank_search_is_unfiltered() {
        let videos = sample();
        assert_eq!(Filter::search("   ").apply(&videos).len(), videos.len());
        assert_eq!(
            titles(Filter::new("  ", "Sports").apply(&videos)),
            vec!["Cup final"]
        );
    }

    #[test]
    fn search_term_is_trimmed() {
        let videos = sample();
        assert_eq!(titles(Filter::search("  chords ").apply(&videos)), vec!["Guitar lesson"]);
    }

    #[test]
    fn combined_filter_equals_either_order() {
        let videos = sample();
        let filter = Filter::new("music", "Education");

        let combined = titles(filter.apply(&videos));
        let category_first: Vec<&str> = videos
            .iter()
            .filter(|v| filter.matches_category(v))
            .filter(|v| filter.matches_text(v))
            .map(|v| v.title.as_str())
            .collect();
        let text_first: Vec<&str> = videos
            .iter()
            .filter(|v| filter.matches_text(v))
            .filter(|v| filter.matches_category(v))
            .map(|v| v.title.as_str())
            .collect();

        assert_eq!(combined, vec!["Guitar lesson"]);
        assert_eq!(combined, category_first);
        assert_eq!(combined, text_first);
    }
}
