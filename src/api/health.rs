use actix_web::{web, HttpResponse};

use crate::services::catalog::Catalog;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/health").route(web::get().to(health_check)));
}

async fn health_check(catalog: web::Data<Catalog>) -> HttpResponse {
    let documents = match catalog.check_connection().await {
        Ok(count) => Some(count),
        Err(e) => {
            log::error!("Catalog connection test failed: {}", e);
            None
        }
    };

    HttpResponse::Ok().json(serde_json::json!({
        "status": "ok",
        "timestamp": chrono::Utc::now().to_rfc3339(),
        "catalog": {
            "reachable": documents.is_some(),
            "documents": documents,
        }
    }))
}
