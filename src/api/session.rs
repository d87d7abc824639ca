use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};
use serde_json::json;
use uuid::Uuid;

use crate::api::shared::{Notice, ResponseType};
use crate::db::models::Video;
use crate::errors::AppError;
use crate::services::catalog::Catalog;
use crate::services::identity::{Session, Sessions};
use crate::view::directory::Reorder;
use crate::view::{DirectoryView, DragState, Filter};

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/session").route(web::post().to(sign_in)))
        .service(
            web::scope("/session/view")
                .route("", web::get().to(get_view))
                .route("/filter", web::put().to(set_filter))
                .route("/reload", web::post().to(reload))
                .route("/drag-start", web::post().to(drag_start))
                .route("/drag-end", web::post().to(drag_end))
                .route("/drag-cancel", web::post().to(drag_cancel)),
        );
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewSnapshot {
    pub filter: Filter,
    pub drag: DragState,
    pub total: usize,
    pub videos: Vec<Video>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notice: Option<Notice>,
}

impl ViewSnapshot {
    fn of(view: &DirectoryView) -> Self {
        Self {
            filter: view.filter().clone(),
            drag: view.drag_state(),
            total: view.videos().len(),
            videos: view.filtered().into_iter().cloned().collect(),
            notice: None,
        }
    }
}

/// Loads the full catalog into the session's view, discarding any manual
/// ordering.
pub(crate) async fn reload_view(
    catalog: &Catalog,
    sessions: &Sessions,
    session: Session,
) -> Result<Option<Notice>, AppError> {
    let loaded = catalog.list_all().await;
    let notice = loaded.notice.clone();
    sessions
        .with_view(session.0, move |view| view.load(loaded.videos))
        .await?;
    Ok(notice)
}

async fn sign_in(
    catalog: web::Data<Catalog>,
    sessions: web::Data<Sessions>,
) -> Result<HttpResponse, AppError> {
    let id = sessions.sign_in_anonymously().await;
    let notice = reload_view(&catalog, &sessions, Session(id)).await?;

    Ok(HttpResponse::Created().json(ResponseType::ok(json!({
        "sessionId": id,
        "notice": notice,
    }))))
}

async fn get_view(
    session: Session,
    sessions: web::Data<Sessions>,
) -> Result<HttpResponse, AppError> {
    let snapshot = sessions.with_view(session.0, |view| ViewSnapshot::of(view)).await?;
    Ok(HttpResponse::Ok().json(ResponseType::ok(snapshot)))
}

async fn set_filter(
    session: Session,
    filter: web::Json<Filter>,
    sessions: web::Data<Sessions>,
) -> Result<HttpResponse, AppError> {
    let filter = filter.into_inner();
    let snapshot = sessions
        .with_view(session.0, move |view| {
            view.set_filter(filter);
            ViewSnapshot::of(view)
        })
        .await?;
    Ok(HttpResponse::Ok().json(ResponseType::ok(snapshot)))
}

async fn reload(
    session: Session,
    catalog: web::Data<Catalog>,
    sessions: web::Data<Sessions>,
) -> Result<HttpResponse, AppError> {
    let notice = reload_view(&catalog, &sessions, session).await?;
    let mut snapshot = sessions.with_view(session.0, |view| ViewSnapshot::of(view)).await?;
    snapshot.notice = notice;
    Ok(HttpResponse::Ok().json(ResponseType::ok(snapshot)))
}

#[derive(Debug, Deserialize)]
pub struct DragStart {
    pub id: Uuid,
}

async fn drag_start(
    session: Session,
    body: web::Json<DragStart>,
    sessions: web::Data<Sessions>,
) -> Result<HttpResponse, AppError> {
    let id = body.id;
    let started = sessions.with_view(session.0, |view| view.drag_start(id)).await?;
    if !started {
        return Err(AppError::Validation(format!(
            "video {} is not in the current view",
            id
        )));
    }
    Ok(HttpResponse::Ok().json(ResponseType::ok(DragState::Dragging(id))))
}

#[derive(Debug, Deserialize)]
pub struct DragEnd {
    pub over: Option<Uuid>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct DropResult {
    moved: Option<Reorder>,
    view: ViewSnapshot,
}

async fn drag_end(
    session: Session,
    body: web::Json<DragEnd>,
    sessions: web::Data<Sessions>,
) -> Result<HttpResponse, AppError> {
    let over = body.over;
    let result = sessions
        .with_view(session.0, move |view| DropResult {
            moved: view.drag_end(over),
            view: ViewSnapshot::of(view),
        })
        .await?;
    Ok(HttpResponse::Ok().json(ResponseType::ok(result)))
}

async fn drag_cancel(
    session: Session,
    sessions: web::Data<Sessions>,
) -> Result<HttpResponse, AppError> {
    sessions.with_view(session.0, |view| view.drag_cancel()).await?;
    Ok(HttpResponse::Ok().json(ResponseType::ok(DragState::Idle)))
}
