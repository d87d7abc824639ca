pub mod health;
pub mod metadata;
pub mod session;
pub mod shared;
pub mod videos;

use actix_web::web;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1")
            .configure(videos::configure)
            .configure(session::configure)
            .configure(metadata::configure)
            .configure(health::configure),
    );
}
