use anyhow::Result;
use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::models::{NewVideo, Video, VideoChanges};
use super::store::CatalogStore;

/// In-process store, used for local runs without Postgres and in tests.
#[derive(Default)]
pub struct MemoryCatalog {
    videos: RwLock<Vec<Video>>,
}

impl MemoryCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds records as-is, keeping whatever ids and timestamps they carry.
    pub fn with_videos(videos: Vec<Video>) -> Self {
        Self {
            videos: RwLock::new(videos),
        }
    }
}

#[async_trait]
impl CatalogStore for MemoryCatalog {
    async fn fetch_all(&self) -> Result<Vec<Video>> {
        Ok(self.videos.read().await.clone())
    }

    async fn fetch_by_category(&self, category: &str) -> Result<Vec<Video>> {
        Ok(self
            .videos
            .read()
            .await
            .iter()
            .filter(|v| v.category == category)
            .cloned()
            .collect())
    }

    async fn fetch(&self, id: Uuid) -> Result<Option<Video>> {
        Ok(self.videos.read().await.iter().find(|v| v.id == id).cloned())
    }

    async fn insert(&self, video: NewVideo) -> Result<Uuid> {
        let id = Uuid::new_v4();
        self.videos.write().await.push(Video::from_new(id, video));
        Ok(id)
    }

    async fn update(&self, id: Uuid, changes: VideoChanges) -> Result<bool> {
        let mut videos = self.videos.write().await;
        match videos.iter_mut().find(|v| v.id == id) {
            Some(video) => {
                video.apply(&changes);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete(&self, id: Uuid) -> Result<bool> {
        let mut videos = self.videos.write().await;
        let before = videos.len();
        videos.retain(|v| v.id != id);
        Ok(videos.len() != before)
    }

    async fn count(&self) -> Result<i64> {
        Ok(self.videos.read().await.len() as i64)
    }
}
