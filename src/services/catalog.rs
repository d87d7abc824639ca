use std::cmp::Reverse;
use std::sync::Arc;

use chrono::Utc;
use futures::future::try_join_all;
use serde::Serialize;
use uuid::Uuid;

use crate::api::shared::Notice;
use crate::db::models::{NewVideo, Video, VideoChanges};
use crate::db::CatalogStore;
use crate::errors::AppError;

/// Result of a read that fails open.
#[derive(Debug, Serialize)]
pub struct Loaded {
    pub videos: Vec<Video>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notice: Option<Notice>,
}

#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct Migration {
    pub updated: usize,
    pub message: String,
}

/// Data-access layer between handlers and the catalog store.
#[derive(Clone)]
pub struct Catalog {
    store: Arc<dyn CatalogStore>,
}

fn newest_first(videos: &mut [Video]) {
    // Records without a creation stamp sort as the oldest.
    videos.sort_by_key(|v| Reverse(v.created_at));
}

fn require(field: &str, value: &str) -> Result<(), AppError> {
    if value.trim().is_empty() {
        return Err(AppError::Validation(format!("{} is required", field)));
    }
    Ok(())
}

fn validate_new(video: &NewVideo) -> Result<(), AppError> {
    require("title", &video.title)?;
    require("videoUrl", &video.video_url)?;
    require("category", &video.category)?;
    if video.tags.is_empty() {
        return Err(AppError::Validation(
            "at least one category must be selected".into(),
        ));
    }
    Ok(())
}

fn validate_changes(changes: &VideoChanges) -> Result<(), AppError> {
    if let Some(title) = &changes.title {
        require("title", title)?;
    }
    if let Some(video_url) = &changes.video_url {
        require("videoUrl", video_url)?;
    }
    if let Some(category) = &changes.category {
        require("category", category)?;
    }
    if changes.tags.as_ref().is_some_and(|t| t.is_empty()) {
        return Err(AppError::Validation(
            "at least one category must be selected".into(),
        ));
    }
    Ok(())
}

impl Catalog {
    pub fn new(store: Arc<dyn CatalogStore>) -> Self {
        Self { store }
    }

    fn fail_open(result: anyhow::Result<Vec<Video>>, what: &str) -> Loaded {
        match result {
            Ok(mut videos) => {
                newest_first(&mut videos);
                Loaded {
                    videos,
                    notice: None,
                }
            }
            Err(e) => {
                log::error!("Error getting {}: {:#}", what, e);
                Loaded {
                    videos: Vec::new(),
                    notice: Some(Notice::error("Failed to load videos")),
                }
            }
        }
    }

    pub async fn list_all(&self) -> Loaded {
        Self::fail_open(self.store.fetch_all().await, "videos")
    }

    pub async fn list_by_category(&self, category: &str) -> Loaded {
        Self::fail_open(
            self.store.fetch_by_category(category).await,
            "videos by category",
        )
    }

    /// Missing records and store failures both come back as `None`.
    pub async fn get(&self, id: Uuid) -> Option<Video> {
        match self.store.fetch(id).await {
            Ok(video) => video,
            Err(e) => {
                log::error!("Error getting video {}: {:#}", id, e);
                None
            }
        }
    }

    pub async fn create(&self, mut video: NewVideo) -> Result<Uuid, AppError> {
        validate_new(&video)?;
        let now = Utc::now().naive_utc();
        video.created_at = Some(now);
        video.updated_at = Some(now);

        let id = self.store.insert(video).await.map_err(|e| {
            log::error!("Error adding video: {:#}", e);
            AppError::store(e)
        })?;
        log::info!("Added video {}", id);
        Ok(id)
    }

    /// Returns `false` when no record has this id.
    pub async fn update(&self, id: Uuid, mut changes: VideoChanges) -> Result<bool, AppError> {
        validate_changes(&changes)?;
        changes.updated_at = Some(Utc::now().naive_utc());

        let found = self.store.update(id, changes).await.map_err(|e| {
            log::error!("Error updating video {}: {:#}", id, e);
            AppError::store(e)
        })?;
        if !found {
            log::warn!("Update skipped: no video {}", id);
        }
        Ok(found)
    }

    /// Callers must have obtained explicit confirmation first.
    pub async fn delete(&self, id: Uuid) -> Result<bool, AppError> {
        let found = self.store.delete(id).await.map_err(|e| {
            log::error!("Error deleting video {}: {:#}", id, e);
            AppError::store(e)
        })?;
        if found {
            log::info!("Deleted video {}", id);
        }
        Ok(found)
    }

    /// One-off relabeling of a category value, e.g. "Tech News" to "News".
    pub async fn migrate_label(&self, from: &str, to: &str) -> Result<Migration, AppError> {
        require("from", from)?;
        require("to", to)?;

        let matching = self.store.fetch_by_category(from).await.map_err(|e| {
            log::error!("Error migrating {} to {}: {:#}", from, to, e);
            AppError::store(e)
        })?;

        let now = Utc::now().naive_utc();
        let updates = matching.iter().map(|video| {
            let tags = if video.tags.is_empty() {
                vec![to.to_string()]
            } else {
                video
                    .tags
                    .iter()
                    .map(|t| if t == from { to.to_string() } else { t.clone() })
                    .collect()
            };
            let changes = VideoChanges {
                category: Some(to.to_string()),
                tags: Some(tags),
                updated_at: Some(now),
                ..Default::default()
            };
            self.store.update(video.id, changes)
        });

        try_join_all(updates).await.map_err(|e| {
            log::error!("Error migrating {} to {}: {:#}", from, to, e);
            AppError::store(e)
        })?;

        let updated = matching.len();
        log::info!("Migrated {} videos from {:?} to {:?}", updated, from, to);
        Ok(Migration {
            updated,
            message: format!(
                "Successfully updated {} videos from \"{}\" to \"{}\"",
                updated, from, to
            ),
        })
    }

    /// Number of documents in the store; used to report connectivity.
    pub async fn check_connection(&self) -> Result<i64, AppError> {
        self.store.count().await.map_err(AppError::store)
    }
}
