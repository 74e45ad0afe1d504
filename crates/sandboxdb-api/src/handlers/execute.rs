//! SQL execution handler.

use super::{blocking_error, error_response};
use crate::models::{ExecuteRequest, ExecuteResponse};
use actix_web::{post, web, HttpResponse, Responder};
use sandboxdb_core::{CoreError, WorkspaceService};
use std::sync::Arc;

/// POST /api/execute - run one SQL statement (or batch) inside a workspace
/// namespace.
///
/// # Example Request
/// ```json
/// { "workspaceId": "ws1", "sql": "SELECT * FROM users" }
/// ```
///
/// A statement the engine rejects comes back as HTTP 400 with the engine's
/// error code; it never ran for effect. Mutating statements additionally
/// resynchronize the persisted definition before the response is sent.
#[post("/execute")]
pub async fn execute_sql(
    service: web::Data<Arc<WorkspaceService>>,
    body: web::Json<ExecuteRequest>,
) -> impl Responder {
    let body = body.into_inner();

    let workspace_id = match body.workspace_id.filter(|id| !id.is_empty()) {
        Some(id) => id,
        None => return error_response(&CoreError::validation("workspaceId is required")),
    };
    let sql = match body.sql.filter(|s| !s.trim().is_empty()) {
        Some(sql) => sql,
        None => {
            return error_response(&CoreError::validation(
                "sql is required and must be a non-empty string",
            ))
        }
    };

    let result = web::block(move || service.execute(&workspace_id, &sql)).await;

    match result {
        Ok(Ok(outcome)) => HttpResponse::Ok().json(ExecuteResponse::from(outcome)),
        Ok(Err(err)) => error_response(&err),
        Err(_) => blocking_error(),
    }
}
