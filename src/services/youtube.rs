use async_trait::async_trait;
use reqwest::Client;
use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;

/// What the enricher knows about a hosted video.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoMetadata {
    pub title: String,
    pub description: String,
    pub thumbnail: Option<String>,
    pub duration: Option<String>,
    pub view_count: Option<i64>,
}

#[async_trait]
pub trait MetadataSource: Send + Sync {
    /// `Ok(None)` when the provider has no video with this id.
    async fn fetch(&self, video_id: &str) -> Result<Option<VideoMetadata>, AppError>;
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct VideoListResponse {
    #[serde(default)]
    items: Vec<VideoItem>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct VideoItem {
    snippet: Option<Snippet>,
    content_details: Option<ContentDetails>,
    statistics: Option<Statistics>,
}

#[derive(Debug, Deserialize)]
struct Snippet {
    title: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    thumbnails: Thumbnails,
}

#[derive(Debug, Default, Deserialize)]
struct Thumbnails {
    default: Option<Thumbnail>,
    medium: Option<Thumbnail>,
    high: Option<Thumbnail>,
    standard: Option<Thumbnail>,
    maxres: Option<Thumbnail>,
}

#[derive(Debug, Deserialize)]
struct Thumbnail {
    url: String,
}

#[derive(Debug, Deserialize)]
struct ContentDetails {
    duration: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Statistics {
    view_count: Option<String>,
}

impl Thumbnails {
    // Highest resolution first.
    fn best(self) -> Option<String> {
        [self.maxres, self.high, self.medium, self.standard, self.default]
            .into_iter()
            .flatten()
            .map(|t| t.url)
            .next()
    }
}

impl VideoListResponse {
    fn into_metadata(self) -> Option<VideoMetadata> {
        let item = self.items.into_iter().next()?;
        let snippet = item.snippet?;
        Some(VideoMetadata {
            title: snippet.title,
            description: snippet.description,
            thumbnail: snippet.thumbnails.best(),
            duration: item.content_details.and_then(|cd| cd.duration),
            view_count: item
                .statistics
                .and_then(|s| s.view_count)
                .and_then(|v| v.parse().ok()),
        })
    }
}

/// YouTube Data API v3 `videos.list` client.
pub struct YouTubeClient {
    http_client: Client,
    api_url: String,
    api_key: Secret<String>,
}

impl YouTubeClient {
    pub fn new(http_client: Client, api_url: impl Into<String>, api_key: Secret<String>) -> Self {
        Self {
            http_client,
            api_url: api_url.into(),
            api_key,
        }
    }
}

#[async_trait]
impl MetadataSource for YouTubeClient {
    async fn fetch(&self, video_id: &str) -> Result<Option<VideoMetadata>, AppError> {
        let response = self
            .http_client
            .get(&self.api_url)
            .query(&[
                ("id", video_id),
                ("key", self.api_key.expose_secret().as_str()),
                ("part", "snippet,contentDetails,statistics"),
            ])
            .send()
            .await
            .map_err(|e| {
                log::error!("HTTP error fetching video {}: {:?}", video_id, e);
                AppError::from(e)
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            log::error!("YouTube API error ({}): {}", status, error_text);
            return Err(AppError::ExternalService(anyhow::anyhow!(
                "YouTube API returned {}",
                status
            )));
        }

        let data: VideoListResponse = response.json().await.map_err(|e| {
            log::error!("Failed to parse videos response: {:?}", e);
            AppError::from(e)
        })?;

        Ok(data.into_metadata())
    }
}

/// Used when no API key is configured: every lookup fails.
pub struct DisabledMetadata;

#[async_trait]
impl MetadataSource for DisabledMetadata {
    async fn fetch(&self, _video_id: &str) -> Result<Option<VideoMetadata>, AppError> {
        Err(AppError::ExternalService(anyhow::anyhow!(
            "metadata lookups are disabled: no YouTube API key configured"
        )))
    }
}
