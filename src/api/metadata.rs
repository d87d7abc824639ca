use actix_web::{web, HttpResponse};
use serde::Serialize;

use crate::api::shared::{Notice, ResponseType};
use crate::errors::AppError;
use crate::services::form::VideoForm;
use crate::services::identity::Session;
use crate::services::media::extract_video_id;
use crate::services::youtube::MetadataSource;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/metadata").route(web::post().to(enrich_form)));
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct Enriched {
    video_id: Option<String>,
    applied: bool,
    form: VideoForm,
    #[serde(skip_serializing_if = "Option::is_none")]
    notice: Option<Notice>,
}

/// Fills the submitted draft from the enricher. Lookup failures are not
/// errors: the draft comes back unchanged with `applied: false`.
async fn enrich_form(
    _session: Session,
    form: web::Json<VideoForm>,
    source: web::Data<dyn MetadataSource>,
) -> Result<HttpResponse, AppError> {
    let mut form = form.into_inner();
    let video_id = extract_video_id(&form.video_url);
    let applied = form.enrich(source.get_ref()).await;

    Ok(HttpResponse::Ok().json(ResponseType::ok(Enriched {
        video_id,
        applied,
        notice: applied.then(|| Notice::success("YouTube video data loaded automatically")),
        form,
    })))
}
