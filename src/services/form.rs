use serde::{Deserialize, Serialize};

use crate::db::models::{NewVideo, Video, VideoChanges};
use crate::errors::AppError;
use crate::services::categories::{detect_categories, Category};
use crate::services::media::extract_video_id;
use crate::services::youtube::{MetadataSource, VideoMetadata};

const DESCRIPTION_LIMIT: usize = 500;

/// Deduplicates a selection, drops the catch-all next to concrete
/// categories and falls back to the catch-all when nothing is left.
fn normalize(categories: &[Category]) -> Vec<Category> {
    let mut selected = Vec::with_capacity(categories.len());
    for c in categories {
        if !selected.contains(c) {
            selected.push(*c);
        }
    }
    if selected.len() > 1 {
        selected.retain(|c| !c.is_catch_all());
    }
    if selected.is_empty() {
        selected.push(Category::All);
    }
    selected
}

/// Admin add/edit form.
///
/// Categories are multi-select: the first selection becomes the record's
/// `category` and the whole selection becomes its `tags`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct VideoForm {
    pub title: String,
    pub description: String,
    pub video_url: String,
    pub thumbnail: String,
    pub duration: Option<String>,
    pub view_count: Option<i64>,
    pub categories: Vec<Category>,
    /// Set only while a lookup is in flight; never sent over the wire.
    #[serde(skip)]
    pub loading_metadata: bool,
}

impl Default for VideoForm {
    fn default() -> Self {
        Self {
            title: String::new(),
            description: String::new(),
            video_url: String::new(),
            thumbnail: String::new(),
            duration: None,
            view_count: None,
            categories: vec![Category::All],
            loading_metadata: false,
        }
    }
}

impl VideoForm {
    pub fn for_new() -> Self {
        Self::default()
    }

    /// Prefills the form from a stored record. Unknown labels in `tags` are
    /// dropped from the selection.
    pub fn for_edit(video: &Video) -> Self {
        let mut form = Self {
            title: video.title.clone(),
            description: video.description.clone(),
            video_url: video.video_url.clone(),
            thumbnail: video.thumbnail.clone().unwrap_or_default(),
            duration: video.duration.clone(),
            view_count: video.view_count,
            categories: video.tags.iter().filter_map(|t| t.parse().ok()).collect(),
            loading_metadata: false,
        };
        form.normalize_categories();
        form
    }

    fn normalize_categories(&mut self) {
        self.categories = normalize(&self.categories);
    }

    pub fn toggle_category(&mut self, category: Category, checked: bool) {
        if checked {
            if !self.categories.contains(&category) {
                self.categories.push(category);
            }
        } else {
            self.categories.retain(|c| *c != category);
        }
        self.normalize_categories();
    }

    /// Stores the URL and returns the provider id to enrich with, if the
    /// URL has a recognizable shape.
    pub fn set_video_url(&mut self, url: impl Into<String>) -> Option<String> {
        self.video_url = url.into();
        extract_video_id(&self.video_url)
    }

    /// Fills empty text fields from fetched metadata. Text the user already
    /// entered is never overwritten.
    pub fn apply_metadata(&mut self, meta: &VideoMetadata) {
        if self.title.is_empty() {
            self.title = meta.title.clone();
        }
        if self.description.is_empty() {
            self.description = meta.description.chars().take(DESCRIPTION_LIMIT).collect();
        }
        if self.thumbnail.is_empty() {
            if let Some(thumbnail) = &meta.thumbnail {
                self.thumbnail = thumbnail.clone();
            }
        }
        if meta.duration.is_some() {
            self.duration = meta.duration.clone();
        }
        if meta.view_count.is_some() {
            self.view_count = meta.view_count;
        }
        self.categories = detect_categories(&meta.title, &meta.description);
        self.normalize_categories();
    }

    /// Looks up metadata for the current URL and applies it. Any failure is
    /// logged and leaves the form as it was. Returns whether anything was
    /// applied.
    pub async fn enrich(&mut self, source: &dyn MetadataSource) -> bool {
        let Some(video_id) = extract_video_id(&self.video_url) else {
            log::debug!("No video id in {:?}; skipping metadata lookup", self.video_url);
            return false;
        };

        self.loading_metadata = true;
        let result = source.fetch(&video_id).await;
        self.loading_metadata = false;

        match result {
            Ok(Some(meta)) => {
                self.apply_metadata(&meta);
                true
            }
            Ok(None) => {
                log::warn!("No metadata found for video {}", video_id);
                false
            }
            Err(e) => {
                log::error!("Error loading metadata for video {}: {}", video_id, e);
                false
            }
        }
    }

    fn check_required(&self) -> Result<(), AppError> {
        if self.title.trim().is_empty() || self.video_url.trim().is_empty() {
            return Err(AppError::Validation(
                "Please fill in all required fields".into(),
            ));
        }
        Ok(())
    }

    fn thumbnail(&self) -> Option<String> {
        Some(self.thumbnail.clone()).filter(|t| !t.is_empty())
    }

    pub fn validate(&self) -> Result<NewVideo, AppError> {
        self.check_required()?;
        let categories = normalize(&self.categories);
        Ok(NewVideo {
            title: self.title.trim().to_string(),
            description: self.description.clone(),
            video_url: self.video_url.trim().to_string(),
            category: categories[0].to_string(),
            tags: categories.iter().map(|c| c.to_string()).collect(),
            thumbnail: self.thumbnail(),
            duration: self.duration.clone(),
            view_count: self.view_count,
            created_at: None,
            updated_at: None,
        })
    }

    /// Full-field overwrite for an edit submission. Optional fields left
    /// blank clear what was stored.
    pub fn validate_changes(&self) -> Result<VideoChanges, AppError> {
        let video = self.validate()?;
        Ok(VideoChanges {
            title: Some(video.title),
            description: Some(video.description),
            video_url: Some(video.video_url),
            category: Some(video.category),
            tags: Some(video.tags),
            thumbnail: Some(video.thumbnail),
            duration: Some(video.duration),
            view_count: Some(video.view_count),
            updated_at: None,
        })
    }
}
