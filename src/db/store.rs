use anyhow::Result;
use async_trait::async_trait;
use uuid::Uuid;

use super::models::{NewVideo, Video, VideoChanges};

/// The document store holding video records.
///
/// Implementations only move records in and out; timestamps, ordering and
/// validation belong to `services::catalog::Catalog`.
#[async_trait]
pub trait CatalogStore: Send + Sync {
    async fn fetch_all(&self) -> Result<Vec<Video>>;

    /// Equality filter on `category`.
    async fn fetch_by_category(&self, category: &str) -> Result<Vec<Video>>;

    async fn fetch(&self, id: Uuid) -> Result<Option<Video>>;

    /// Persists the record and returns the id the store assigned to it.
    async fn insert(&self, video: NewVideo) -> Result<Uuid>;

    /// Returns `false` when no record has this id.
    async fn update(&self, id: Uuid, changes: VideoChanges) -> Result<bool>;

    /// Returns `false` when no record has this id.
    async fn delete(&self, id: Uuid) -> Result<bool>;

    async fn count(&self) -> Result<i64>;
}
