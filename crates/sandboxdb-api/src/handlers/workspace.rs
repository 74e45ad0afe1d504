//! Workspace lifecycle handlers: create, fetch, load, save.

use super::{blocking_error, error_response};
use crate::models::{
    CreateWorkspaceRequest, CreateWorkspaceResponse, LoadWorkspaceResponse, SaveWorkspaceRequest,
    WorkspaceResponse,
};
use actix_web::{get, post, web, HttpResponse, Responder};
use sandboxdb_core::WorkspaceService;
use std::sync::Arc;

/// POST /api/workspaces - materialize the initial definition and persist it.
#[post("/workspaces")]
pub async fn create_workspace(
    service: web::Data<Arc<WorkspaceService>>,
    body: web::Json<CreateWorkspaceRequest>,
) -> impl Responder {
    let body = body.into_inner();
    let workspace_id = match body.workspace_id {
        Some(id) => id,
        None => {
            return error_response(&sandboxdb_core::CoreError::validation(
                "workspaceId is required",
            ))
        }
    };

    let result = web::block(move || {
        service.create_workspace(&workspace_id, body.name.as_deref(), body.tables)
    })
    .await;

    match result {
        Ok(Ok((doc, namespace))) => HttpResponse::Ok().json(CreateWorkspaceResponse {
            ok: true,
            workspace_id: doc.workspace_id.as_str().to_string(),
            namespace: namespace.as_str().to_string(),
        }),
        Ok(Err(err)) => error_response(&err),
        Err(_) => blocking_error(),
    }
}

/// GET /api/workspaces/{workspace_id}
#[get("/workspaces/{workspace_id}")]
pub async fn get_workspace(
    service: web::Data<Arc<WorkspaceService>>,
    path: web::Path<String>,
) -> impl Responder {
    let workspace_id = path.into_inner();
    let result = web::block(move || service.get_workspace(&workspace_id)).await;

    match result {
        Ok(Ok(doc)) => HttpResponse::Ok().json(WorkspaceResponse::new(doc)),
        Ok(Err(err)) => error_response(&err),
        Err(_) => blocking_error(),
    }
}

/// POST /api/workspaces/{workspace_id}/load - destructive rebuild of the
/// live namespace from the persisted definition.
#[post("/workspaces/{workspace_id}/load")]
pub async fn load_workspace(
    service: web::Data<Arc<WorkspaceService>>,
    path: web::Path<String>,
) -> impl Responder {
    let workspace_id = path.into_inner();
    let result = web::block(move || service.load_workspace(&workspace_id)).await;

    match result {
        Ok(Ok(namespace)) => HttpResponse::Ok().json(LoadWorkspaceResponse {
            ok: true,
            namespace: namespace.as_str().to_string(),
        }),
        Ok(Err(err)) => error_response(&err),
        Err(_) => blocking_error(),
    }
}

/// POST /api/workspaces/{workspace_id}/save - merge-on-save upsert.
#[post("/workspaces/{workspace_id}/save")]
pub async fn save_workspace(
    service: web::Data<Arc<WorkspaceService>>,
    path: web::Path<String>,
    body: web::Json<SaveWorkspaceRequest>,
) -> impl Responder {
    let workspace_id = path.into_inner();
    let body = body.into_inner();
    let result = web::block(move || {
        service.save_workspace(&workspace_id, body.name.as_deref(), body.tables)
    })
    .await;

    match result {
        Ok(Ok(doc)) => HttpResponse::Ok().json(WorkspaceResponse::new(doc)),
        Ok(Err(err)) => error_response(&err),
        Err(_) => blocking_error(),
    }
}
