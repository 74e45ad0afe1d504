//! HTTP handlers.

mod execute;
mod workspace;

pub use execute::execute_sql;
pub use workspace::{create_workspace, get_workspace, load_workspace, save_workspace};

use crate::models::ErrorResponse;
use actix_web::HttpResponse;
use sandboxdb_core::CoreError;

/// Maps the core error taxonomy onto HTTP. Client errors are the caller's
/// fault (400, or 404 for a missing workspace); introspection and
/// persistence failures are system faults (500) and get logged here, at the
/// operation boundary.
pub(crate) fn error_response(err: &CoreError) -> HttpResponse {
    let body = ErrorResponse::from_core(err);
    match err {
        CoreError::NotFound(_) => HttpResponse::NotFound().json(body),
        e if e.is_client_error() => HttpResponse::BadRequest().json(body),
        e => {
            log::error!("workspace operation failed: {}", e);
            HttpResponse::InternalServerError().json(body)
        }
    }
}

/// A blocking-pool failure never carries request detail; report it
/// generically without leaking internals.
pub(crate) fn blocking_error() -> HttpResponse {
    HttpResponse::InternalServerError().json(ErrorResponse::new(
        "INTERNAL_ERROR",
        "internal server error",
    ))
}
