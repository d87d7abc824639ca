use chrono::NaiveDateTime;
use diesel::prelude::*;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Serialize, Deserialize, Queryable, Selectable, Clone, PartialEq)]
#[diesel(table_name = crate::db::schema::videos)]
#[serde(rename_all = "camelCase")]
pub struct Video {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub video_url: String,
    pub category: String,
    pub tags: Vec<String>,
    pub thumbnail: Option<String>,
    pub duration: Option<String>,
    pub view_count: Option<i64>,
    pub created_at: Option<NaiveDateTime>,
    pub updated_at: Option<NaiveDateTime>,
}

/// A record before the store has assigned it an id.
#[derive(Debug, Serialize, Deserialize, Insertable, Clone, PartialEq)]
#[diesel(table_name = crate::db::schema::videos)]
#[serde(rename_all = "camelCase")]
pub struct NewVideo {
    pub title: String,
    pub description: String,
    pub video_url: String,
    pub category: String,
    pub tags: Vec<String>,
    pub thumbnail: Option<String>,
    pub duration: Option<String>,
    pub view_count: Option<i64>,
    #[serde(skip)]
    pub created_at: Option<NaiveDateTime>,
    #[serde(skip)]
    pub updated_at: Option<NaiveDateTime>,
}

/// Merge-write payload: `None` fields are left as stored. Nullable columns
/// take `Some(None)` to clear the stored value.
#[derive(Debug, Default, Deserialize, AsChangeset, Clone, PartialEq)]
#[diesel(table_name = crate::db::schema::videos)]
#[serde(rename_all = "camelCase")]
pub struct VideoChanges {
    pub title: Option<String>,
    pub description: Option<String>,
    pub video_url: Option<String>,
    pub category: Option<String>,
    pub tags: Option<Vec<String>>,
    pub thumbnail: Option<Option<String>>,
    pub duration: Option<Option<String>>,
    pub view_count: Option<Option<i64>>,
    #[serde(skip)]
    pub updated_at: Option<NaiveDateTime>,
}

impl Video {
    pub fn from_new(id: Uuid, new: NewVideo) -> Self {
        Self {
            id,
            title: new.title,
            description: new.description,
            video_url: new.video_url,
            category: new.category,
            tags: new.tags,
            thumbnail: new.thumbnail,
            duration: new.duration,
            view_count: new.view_count,
            created_at: new.created_at,
            updated_at: new.updated_at,
        }
    }

    pub fn apply(&mut self, changes: &VideoChanges) {
        if let Some(title) = &changes.title {
            self.title = title.clone();
        }
        if let Some(description) = &changes.description {
            self.description = description.clone();
        }
        if let Some(video_url) = &changes.video_url {
            self.video_url = video_url.clone();
        }
        if let Some(category) = &changes.category {
            self.category = category.clone();
        }
        if let Some(tags) = &changes.tags {
            self.tags = tags.clone();
        }
        if let Some(thumbnail) = &changes.thumbnail {
            self.thumbnail = thumbnail.clone();
        }
        if let Some(duration) = &changes.duration {
            self.duration = duration.clone();
        }
        if let Some(view_count) = changes.view_count {
            self.view_count = view_count;
        }
        if let Some(updated_at) = changes.updated_at {
            self.updated_at = Some(updated_at);
        }
    }
}
