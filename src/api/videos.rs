use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};
use serde_json::json;
use uuid::Uuid;

use crate::api::session::reload_view;
use crate::api::shared::{Notice, ResponseType};
use crate::db::models::Video;
use crate::errors::AppError;
use crate::services::catalog::Catalog;
use crate::services::form::VideoForm;
use crate::services::identity::{Session, Sessions};
use crate::services::media::{self, Provider};
use crate::view::Filter;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/videos")
            .route("", web::get().to(list_videos))
            .route("", web::post().to(create_video))
            .route("/migrate-label", web::post().to(migrate_label))
            .route("/form", web::get().to(new_form))
            .route("/{id}", web::get().to(get_video))
            .route("/{id}/form", web::get().to(edit_form))
            .route("/{id}", web::put().to(update_video))
            .route("/{id}", web::delete().to(delete_video)),
    );
}

#[derive(Debug, Deserialize)]
pub struct ListQueryParams {
    pub search: Option<String>,
    pub category: Option<String>,
}

pub async fn list_videos(
    _session: Session,
    query: web::Query<ListQueryParams>,
    catalog: web::Data<Catalog>,
) -> Result<HttpResponse, AppError> {
    let query = query.into_inner();
    let filter = Filter {
        search: query.search.unwrap_or_default(),
        category: query.category.unwrap_or_else(|| Filter::default().category),
    };

    let loaded = if filter.category_active() {
        catalog.list_by_category(&filter.category).await
    } else {
        catalog.list_all().await
    };
    let total = loaded.videos.len();
    let videos: Vec<&Video> = filter.apply(&loaded.videos);

    Ok(HttpResponse::Ok().json(ResponseType::ok(json!({
        "videos": videos,
        "notice": loaded.notice,
        "meta": {
            "total": total,
            "matched": videos.len(),
            "search": filter.search,
            "category": filter.category,
        }
    }))))
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoDetails {
    #[serde(flatten)]
    pub video: Video,
    pub provider: Provider,
    pub embed_url: String,
    pub thumbnail_url: Option<String>,
    pub formatted_duration: Option<String>,
}

impl From<Video> for VideoDetails {
    fn from(video: Video) -> Self {
        Self {
            provider: media::provider(&video.video_url),
            embed_url: media::embed_url(&video.video_url),
            thumbnail_url: media::thumbnail_url(&video),
            formatted_duration: video.duration.as_deref().and_then(media::format_duration),
            video,
        }
    }
}

pub async fn get_video(
    _session: Session,
    path: web::Path<Uuid>,
    catalog: web::Data<Catalog>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    let video = catalog
        .get(id)
        .await
        .ok_or_else(|| AppError::NotFound(format!("video {}", id)))?;

    Ok(HttpResponse::Ok().json(ResponseType::ok(VideoDetails::from(video))))
}

/// Blank form for adding a video.
pub async fn new_form(_session: Session) -> HttpResponse {
    HttpResponse::Ok().json(ResponseType::ok(VideoForm::for_new()))
}

/// Form prefilled from a stored record, for editing.
pub async fn edit_form(
    _session: Session,
    path: web::Path<Uuid>,
    catalog: web::Data<Catalog>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    let video = catalog
        .get(id)
        .await
        .ok_or_else(|| AppError::NotFound(format!("video {}", id)))?;

    Ok(HttpResponse::Ok().json(ResponseType::ok(VideoForm::for_edit(&video))))
}

pub async fn create_video(
    session: Session,
    form: web::Json<VideoForm>,
    catalog: web::Data<Catalog>,
    sessions: web::Data<Sessions>,
) -> Result<HttpResponse, AppError> {
    let video = form.validate()?;
    let id = catalog.create(video).await?;
    reload_view(&catalog, &sessions, session).await?;

    Ok(HttpResponse::Created().json(ResponseType::ok(json!({
        "id": id,
        "notice": Notice::success("Video added successfully"),
    }))))
}

pub async fn update_video(
    session: Session,
    path: web::Path<Uuid>,
    form: web::Json<VideoForm>,
    catalog: web::Data<Catalog>,
    sessions: web::Data<Sessions>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    let changes = form.validate_changes()?;
    if !catalog.update(id, changes).await? {
        return Err(AppError::NotFound(format!("video {}", id)));
    }
    reload_view(&catalog, &sessions, session).await?;

    Ok(HttpResponse::Ok().json(ResponseType::ok(json!({
        "id": id,
        "notice": Notice::success("Video updated successfully"),
    }))))
}

#[derive(Debug, Deserialize)]
pub struct DeleteParams {
    #[serde(default)]
    pub confirm: bool,
}

pub async fn delete_video(
    session: Session,
    path: web::Path<Uuid>,
    params: web::Query<DeleteParams>,
    catalog: web::Data<Catalog>,
    sessions: web::Data<Sessions>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    if !params.confirm {
        return Err(AppError::ConfirmationRequired(format!(
            "deleting video {} requires confirm=true",
            id
        )));
    }

    catalog.delete(id).await?;
    reload_view(&catalog, &sessions, session).await?;

    Ok(HttpResponse::NoContent().finish())
}

#[derive(Debug, Deserialize)]
pub struct MigrateLabel {
    pub from: String,
    pub to: String,
}

pub async fn migrate_label(
    session: Session,
    body: web::Json<MigrateLabel>,
    catalog: web::Data<Catalog>,
    sessions: web::Data<Sessions>,
) -> Result<HttpResponse, AppError> {
    let result = catalog.migrate_label(&body.from, &body.to).await?;
    reload_view(&catalog, &sessions, session).await?;

    Ok(HttpResponse::Ok().json(ResponseType::ok(result)))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use actix_web::http::StatusCode;
    use actix_web::{test, App};
    use serde_json::Value;

    use super::*;
    use crate::api::testing::{state, video};
    use crate::services::identity::SESSION_HEADER;
    use crate::services::youtube::DisabledMetadata;

    macro_rules! app {
        ($state:expr) => {
            test::init_service(
                App::new()
                    .app_data($state.catalog.clone())
                    .app_data($state.sessions.clone())
                    .app_data($state.metadata.clone())
                    .configure(crate::api::configure),
            )
            .await
        };
    }

    fn seed() -> Vec<Video> {
        vec![
            video("Jazz night", "Music", "2025-01-01 10:00:00"),
            video("Derby day", "Sports", "2025-03-01 10:00:00"),
            video("Piano basics", "Education", "2025-02-01 10:00:00"),
        ]
    }

    #[actix_web::test]
    async fn data_routes_require_a_session() {
        let state = state(seed(), Arc::new(DisabledMetadata));
        let app = app!(state);

        let req = test::TestRequest::get().uri("/api/v1/videos").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

        let req = test::TestRequest::get()
            .uri("/api/v1/videos")
            .insert_header((SESSION_HEADER, Uuid::new_v4().to_string()))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    }

    #[actix_web::test]
    async fn lists_filtered_newest_first() {
        let state = state(seed(), Arc::new(DisabledMetadata));
        let session = state.sessions.sign_in_anonymously().await;
        let app = app!(state);

        let req = test::TestRequest::get()
            .uri("/api/v1/videos")
            .insert_header((SESSION_HEADER, session.to_string()))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        let titles: Vec<&str> = body["data"]["videos"]
            .as_array()
            .unwrap()
            .iter()
            .map(|v| v["title"].as_str().unwrap())
            .collect();
        assert_eq!(titles, vec!["Derby day", "Piano basics", "Jazz night"]);

        let req = test::TestRequest::get()
            .uri("/api/v1/videos?category=Music&search=JAZZ")
            .insert_header((SESSION_HEADER, session.to_string()))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["data"]["meta"]["matched"], 1);
        assert_eq!(body["data"]["videos"][0]["videoUrl"], "https://youtu.be/abc123");
    }

    #[actix_web::test]
    async fn create_then_fetch_details() {
        let state = state(Vec::new(), Arc::new(DisabledMetadata));
        let session = state.sessions.sign_in_anonymously().await;
        let app = app!(state);

        let req = test::TestRequest::post()
            .uri("/api/v1/videos")
            .insert_header((SESSION_HEADER, session.to_string()))
            .set_json(json!({
                "title": "Test",
                "videoUrl": "https://youtu.be/abc123",
                "categories": ["Music"],
                "duration": "PT1H2M3S"
            }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::CREATED);
        let body: Value = test::read_body_json(resp).await;
        let id = body["data"]["id"].as_str().unwrap().to_string();

        let req = test::TestRequest::get()
            .uri(&format!("/api/v1/videos/{}", id))
            .insert_header((SESSION_HEADER, session.to_string()))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        let data = &body["data"];
        assert_eq!(data["title"], "Test");
        assert_eq!(data["category"], "Music");
        assert_eq!(data["tags"], json!(["Music"]));
        assert_eq!(data["embedUrl"], "https://www.youtube.com/embed/abc123");
        assert_eq!(
            data["thumbnailUrl"],
            "https://img.youtube.com/vi/abc123/maxresdefault.jpg"
        );
        assert_eq!(data["formattedDuration"], "1:02:03");
        assert!(data["createdAt"].is_string());
    }

    #[actix_web::test]
    async fn serves_blank_and_prefilled_forms() {
        let videos = seed();
        let target = videos[1].id;
        let state = state(videos, Arc::new(DisabledMetadata));
        let session = state.sessions.sign_in_anonymously().await;
        let app = app!(state);

        let req = test::TestRequest::get()
            .uri("/api/v1/videos/form")
            .insert_header((SESSION_HEADER, session.to_string()))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["data"]["title"], "");
        assert_eq!(body["data"]["categories"], json!(["All"]));

        let req = test::TestRequest::get()
            .uri(&format!("/api/v1/videos/{}/form", target))
            .insert_header((SESSION_HEADER, session.to_string()))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["data"]["title"], "Derby day");
        assert_eq!(body["data"]["categories"], json!(["Sports"]));
    }

    #[actix_web::test]
    async fn create_rejects_missing_fields() {
        let state = state(Vec::new(), Arc::new(DisabledMetadata));
        let session = state.sessions.sign_in_anonymously().await;
        let app = app!(state);

        let req = test::TestRequest::post()
            .uri("/api/v1/videos")
            .insert_header((SESSION_HEADER, session.to_string()))
            .set_json(json!({ "title": "No url" }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["error"]["cause"], "validation");
    }

    #[actix_web::test]
    async fn update_and_delete_missing_ids_fail_visibly() {
        let state = state(seed(), Arc::new(DisabledMetadata));
        let session = state.sessions.sign_in_anonymously().await;
        let app = app!(state);
        let missing = Uuid::new_v4();

        let req = test::TestRequest::put()
            .uri(&format!("/api/v1/videos/{}", missing))
            .insert_header((SESSION_HEADER, session.to_string()))
            .set_json(json!({
                "title": "x",
                "videoUrl": "https://youtu.be/abc123",
                "categories": ["Music"]
            }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);

        let req = test::TestRequest::delete()
            .uri(&format!("/api/v1/videos/{}?confirm=true", missing))
            .insert_header((SESSION_HEADER, session.to_string()))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NO_CONTENT);
    }

    #[actix_web::test]
    async fn delete_requires_confirmation() {
        let videos = seed();
        let target = videos[0].id;
        let state = state(videos, Arc::new(DisabledMetadata));
        let session = state.sessions.sign_in_anonymously().await;
        let catalog = state.catalog.clone();
        let app = app!(state);

        let req = test::TestRequest::delete()
            .uri(&format!("/api/v1/videos/{}", target))
            .insert_header((SESSION_HEADER, session.to_string()))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        assert!(catalog.get(target).await.is_some());

        let req = test::TestRequest::delete()
            .uri(&format!("/api/v1/videos/{}?confirm=true", target))
            .insert_header((SESSION_HEADER, session.to_string()))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NO_CONTENT);
        assert!(catalog.get(target).await.is_none());
    }

    #[actix_web::test]
    async fn migrates_labels_over_http() {
        let mut videos = seed();
        videos[0].category = "Tech News".into();
        videos[0].tags = vec!["Tech News".into()];
        let state = state(videos, Arc::new(DisabledMetadata));
        let session = state.sessions.sign_in_anonymously().await;
        let app = app!(state);

        let req = test::TestRequest::post()
            .uri("/api/v1/videos/migrate-label")
            .insert_header((SESSION_HEADER, session.to_string()))
            .set_json(json!({ "from": "Tech News", "to": "News" }))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["data"]["updated"], 1);
    }
}
