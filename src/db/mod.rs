pub mod memory;
pub mod models;
pub mod schema;
pub mod store;

use anyhow::{Context, Result};
use async_trait::async_trait;
use diesel::{ExpressionMethods, OptionalExtension, QueryDsl, SelectableHelper};
use diesel_async::pooled_connection::deadpool::Pool;
use diesel_async::pooled_connection::AsyncDieselConnectionManager;
use diesel_async::{AsyncPgConnection, RunQueryDsl};
use uuid::Uuid;

use self::models::{NewVideo, Video, VideoChanges};
use self::schema::videos;
pub use self::memory::MemoryCatalog;
pub use self::store::CatalogStore;

pub type DbPool = deadpool::managed::Pool<AsyncDieselConnectionManager<AsyncPgConnection>>;

pub fn create_pool(database_url: &str, max_connections: usize) -> Result<DbPool> {
    let config = AsyncDieselConnectionManager::<AsyncPgConnection>::new(database_url);
    Pool::builder(config)
        .max_size(max_connections)
        .build()
        .context("Failed to create database pool")
}

/// Catalog store backed by the `videos` table.
pub struct PgCatalog {
    pool: DbPool,
}

impl PgCatalog {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CatalogStore for PgCatalog {
    async fn fetch_all(&self) -> Result<Vec<Video>> {
        let mut conn = self.pool.get().await.context("Failed to get DB connection")?;
        videos::table
            .select(Video::as_select())
            .load::<Video>(&mut conn)
            .await
            .context("Error loading videos")
    }

    async fn fetch_by_category(&self, category: &str) -> Result<Vec<Video>> {
        let mut conn = self.pool.get().await.context("Failed to get DB connection")?;
        videos::table
            .filter(videos::category.eq(category))
            .select(Video::as_select())
            .load::<Video>(&mut conn)
            .await
            .with_context(|| format!("Error loading videos in category {}", category))
    }

    async fn fetch(&self, id: Uuid) -> Result<Option<Video>> {
        let mut conn = self.pool.get().await.context("Failed to get DB connection")?;
        videos::table
            .find(id)
            .select(Video::as_select())
            .first::<Video>(&mut conn)
            .await
            .optional()
            .with_context(|| format!("Error loading video {}", id))
    }

    async fn insert(&self, video: NewVideo) -> Result<Uuid> {
        let mut conn = self.pool.get().await.context("Failed to get DB connection")?;
        diesel::insert_into(videos::table)
            .values(&video)
            .returning(videos::id)
            .get_result::<Uuid>(&mut conn)
            .await
            .context("Error inserting video")
    }

    async fn update(&self, id: Uuid, changes: VideoChanges) -> Result<bool> {
        let mut conn = self.pool.get().await.context("Failed to get DB connection")?;
        let rows = diesel::update(videos::table.find(id))
            .set(&changes)
            .execute(&mut conn)
            .await
            .with_context(|| format!("Error updating video {}", id))?;
        Ok(rows > 0)
    }

    async fn delete(&self, id: Uuid) -> Result<bool> {
        let mut conn = self.pool.get().await.context("Failed to get DB connection")?;
        let rows = diesel::delete(videos::table.find(id))
            .execute(&mut conn)
            .await
            .with_context(|| format!("Error deleting video {}", id))?;
        Ok(rows > 0)
    }

    async fn count(&self) -> Result<i64> {
        let mut conn = self.pool.get().await.context("Failed to get DB connection")?;
        videos::table
            .count()
            .get_result::<i64>(&mut conn)
            .await
            .context("Error counting videos")
    }
}
