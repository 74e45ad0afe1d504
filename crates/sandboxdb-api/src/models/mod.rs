//! Request and response models for the HTTP API.

mod requests;
mod responses;

pub use requests::{CreateWorkspaceRequest, ExecuteRequest, SaveWorkspaceRequest};
pub use responses::{
    ColumnInfo, CreateWorkspaceResponse, ErrorResponse, ExecuteResponse, LoadWorkspaceResponse,
    WorkspaceResponse,
};
