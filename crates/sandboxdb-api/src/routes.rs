//! API routes configuration.
//!
//! - `POST /api/workspaces` - create + materialize
//! - `GET  /api/workspaces/{id}` - fetch persisted definition
//! - `POST /api/workspaces/{id}/load` - destructive rebuild
//! - `POST /api/workspaces/{id}/save` - merge-on-save
//! - `POST /api/execute` - run SQL inside a workspace namespace
//! - `GET  /api/healthcheck`

use crate::handlers;
use actix_web::{web, HttpResponse};
use serde_json::json;

/// Registers every API route on the application.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            .service(handlers::create_workspace)
            .service(handlers::get_workspace)
            .service(handlers::load_workspace)
            .service(handlers::save_workspace)
            .service(handlers::execute_sql)
            .route("/healthcheck", web::get().to(healthcheck_handler)),
    );
}

async fn healthcheck_handler() -> HttpResponse {
    HttpResponse::Ok().json(json!({
        "status": "healthy",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}
