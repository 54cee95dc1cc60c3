//! Roster controllers: pull `name` / body out of the request, call one
//! service method, answer with the envelope and its status code.

use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Query, State,
    },
    Json,
};
use serde::Deserialize;
use tracing::{error, info};

use service::pal::domain::{DeleteResult, Pal, PalInput, PalPatch};
use service::response::ApiResponse;

use crate::routes::ServerState;

#[derive(Debug, Deserialize, utoipa::IntoParams)]
#[into_params(parameter_in = Query)]
pub struct NameQuery {
    /// Exact username, e.g. `tkubm1760`
    pub name: Option<String>,
}

impl NameQuery {
    fn required<T>(self) -> Result<String, ApiResponse<T>> {
        match self.name {
            Some(n) if !n.trim().is_empty() => Ok(n),
            _ => Err(ApiResponse::fail(403, "name query parameter is required")),
        }
    }
}

/// A query string that does not deserialize is answered like a missing name.
fn required_name<T>(query: Result<Query<NameQuery>, QueryRejection>) -> Result<String, ApiResponse<T>> {
    match query {
        Ok(Query(q)) => q.required(),
        Err(rejection) => Err(ApiResponse::fail(403, rejection.body_text())),
    }
}

fn bad_body<T>(rejection: JsonRejection) -> ApiResponse<T> {
    ApiResponse::fail(403, rejection.body_text())
}

#[utoipa::path(
    get, path = "/api/v1/pals/findAll", tag = "pals",
    responses(
        (status = 200, description = "All records", body = crate::openapi::PalListEnvelopeDoc),
        (status = 500, description = "Server error")
    )
)]
pub async fn find_all(State(state): State<ServerState>) -> ApiResponse<Vec<Pal>> {
    match state.pals.list_all().await {
        Ok(list) => {
            info!(count = list.len(), "list pals");
            ApiResponse::ok("find success", list)
        }
        Err(e) => {
            error!(err = %e, "list pals failed");
            ApiResponse::server_error()
        }
    }
}

#[utoipa::path(
    post, path = "/api/v1/pals/insertOne", tag = "pals",
    request_body = crate::openapi::PalInputDoc,
    responses(
        (status = 200, description = "Inserted", body = crate::openapi::PalEnvelopeDoc),
        (status = 403, description = "Invalid username or roster full"),
        (status = 500, description = "Server error")
    )
)]
pub async fn insert_one(
    State(state): State<ServerState>,
    payload: Result<Json<PalInput>, JsonRejection>,
) -> ApiResponse<Pal> {
    match payload {
        Ok(Json(input)) => state.pals.insert_one(input).await,
        Err(rejection) => bad_body(rejection),
    }
}

#[utoipa::path(
    delete, path = "/api/v1/pals/deleteByName", tag = "pals",
    params(NameQuery),
    responses(
        (status = 200, description = "Deleted"),
        (status = 404, description = "Not Found"),
        (status = 500, description = "Server error")
    )
)]
pub async fn delete_by_name(
    State(state): State<ServerState>,
    query: Result<Query<NameQuery>, QueryRejection>,
) -> ApiResponse<DeleteResult> {
    match required_name(query) {
        Ok(name) => state.pals.delete_by_name(&name).await,
        Err(resp) => resp,
    }
}

#[utoipa::path(
    put, path = "/api/v1/pals/updateByName", tag = "pals",
    params(NameQuery),
    request_body = crate::openapi::PalPatchDoc,
    responses(
        (status = 200, description = "Updated", body = crate::openapi::PalEnvelopeDoc),
        (status = 403, description = "Invalid new name"),
        (status = 404, description = "Not Found"),
        (status = 500, description = "Server error")
    )
)]
pub async fn update_by_name(
    State(state): State<ServerState>,
    query: Result<Query<NameQuery>, QueryRejection>,
    payload: Result<Json<PalPatch>, JsonRejection>,
) -> ApiResponse<Pal> {
    let name = match required_name(query) {
        Ok(name) => name,
        Err(resp) => return resp,
    };
    match payload {
        Ok(Json(patch)) => state.pals.update_by_name(&name, patch).await,
        Err(rejection) => bad_body(rejection),
    }
}

#[utoipa::path(
    get, path = "/api/v1/pals/findByName", tag = "pals",
    params(NameQuery),
    responses(
        (status = 200, description = "Found", body = crate::openapi::PalEnvelopeDoc),
        (status = 404, description = "Not Found")
    )
)]
pub async fn find_by_name(
    State(state): State<ServerState>,
    query: Result<Query<NameQuery>, QueryRejection>,
) -> ApiResponse<Pal> {
    match required_name(query) {
        Ok(name) => state.pals.find_by_name(&name).await,
        Err(resp) => resp,
    }
}
