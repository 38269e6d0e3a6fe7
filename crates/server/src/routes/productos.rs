use axum::{
    extract::{rejection::{JsonRejection, PathRejection}, Path, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use tracing::{error, info, warn};

use models::producto::{is_valid_nombre, is_valid_precio};
use service::producto::{Draft, Producto};

use crate::{errors::ApiError, routes::ServerState};

#[derive(Debug, Deserialize)]
pub struct CreateProductoInput {
    pub nombre: Option<String>,
    pub precio: Option<f64>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateProductoInput {
    pub nombre: Option<String>,
    pub precio: Option<f64>,
}

fn path_id(path: Result<Path<i64>, PathRejection>) -> Result<i64, ApiError> {
    path.map(|Path(id)| id).map_err(|e| {
        warn!(err = %e, "invalid producto id");
        ApiError::BadRequest
    })
}

fn body<T>(body: Result<Json<T>, JsonRejection>) -> Result<T, ApiError> {
    body.map(|Json(v)| v).map_err(|e| {
        warn!(err = %e, "invalid producto body");
        ApiError::BadRequest
    })
}

#[utoipa::path(
    get, path = "/api/productos", tag = "productos",
    responses(
        (status = 200, description = "All productos", body = [crate::openapi::ProductoDoc]),
        (status = 500, description = "List Failed")
    )
)]
pub async fn list(State(state): State<ServerState>) -> Result<Json<Vec<Producto>>, ApiError> {
    match state.productos.find_all().await {
        Ok(list) => { info!(count = list.len(), "list productos"); Ok(Json(list)) }
        Err(e) => { error!(err = %e, "list productos failed"); Err(ApiError::Internal) }
    }
}

#[utoipa::path(
    get, path = "/api/productos/{id}", tag = "productos",
    params(("id" = i64, Path, description = "Producto ID")),
    responses(
        (status = 200, description = "OK", body = crate::openapi::ProductoDoc),
        (status = 404, description = "Not Found")
    )
)]
pub async fn get(State(state): State<ServerState>, id: Result<Path<i64>, PathRejection>) -> Result<Json<Producto>, ApiError> {
    let id = path_id(id)?;
    match state.productos.find_by_id(id).await {
        Ok(Some(p)) => Ok(Json(p)),
        Ok(None) => Err(ApiError::NotFound),
        Err(e) => { error!(err = %e, id, "get producto failed"); Err(ApiError::Internal) }
    }
}

#[utoipa::path(
    post, path = "/api/productos", tag = "productos",
    request_body = crate::openapi::CreateProductoInputDoc,
    responses(
        (status = 201, description = "Created", body = crate::openapi::ProductoDoc),
        (status = 400, description = "Validation Error"),
        (status = 500, description = "Create Failed")
    )
)]
pub async fn create(
    State(state): State<ServerState>,
    input: Result<Json<CreateProductoInput>, JsonRejection>,
) -> Result<(StatusCode, Json<Producto>), ApiError> {
    let input = body(input)?;

    // nombre is checked before precio
    let Some(nombre) = input.nombre.filter(|n| is_valid_nombre(Some(n.as_str()))) else {
        return Err(ApiError::BadRequest);
    };
    let Some(precio) = input.precio.filter(|p| is_valid_precio(Some(*p))) else {
        return Err(ApiError::BadRequest);
    };

    match state.productos.save(Draft::new(nombre, precio)).await {
        Ok(p) => { info!(id = p.id, nombre = %p.nombre, precio = p.precio, "created producto"); Ok((StatusCode::CREATED, Json(p))) }
        Err(e) => { error!(err = %e, "create producto failed"); Err(ApiError::Internal) }
    }
}

/// Field-wise update: invalid or missing fields keep their stored value, and a
/// found id always answers 200 even when nothing changed.
#[utoipa::path(
    put, path = "/api/productos/{id}", tag = "productos",
    params(("id" = i64, Path, description = "Producto ID")),
    request_body = crate::openapi::UpdateProductoInputDoc,
    responses(
        (status = 200, description = "Updated", body = crate::openapi::ProductoDoc),
        (status = 404, description = "Not Found"),
        (status = 500, description = "Update Failed")
    )
)]
pub async fn update(
    State(state): State<ServerState>,
    id: Result<Path<i64>, PathRejection>,
    input: Result<Json<UpdateProductoInput>, JsonRejection>,
) -> Result<Json<Producto>, ApiError> {
    let id = path_id(id)?;
    let input = body(input)?;

    let existing = match state.productos.find_by_id(id).await {
        Ok(Some(p)) => p,
        Ok(None) => return Err(ApiError::NotFound),
        Err(e) => { error!(err = %e, id, "update producto failed"); return Err(ApiError::Internal); }
    };

    let mut draft: Draft = existing.into();
    if let Some(n) = input.nombre.filter(|n| is_valid_nombre(Some(n.as_str()))) { draft.nombre = n; }
    if let Some(p) = input.precio.filter(|p| is_valid_precio(Some(*p))) { draft.precio = p; }

    match state.productos.save(draft).await {
        Ok(p) => { info!(id = p.id, "updated producto"); Ok(Json(p)) }
        Err(e) => { error!(err = %e, id, "update producto failed"); Err(ApiError::Internal) }
    }
}

#[utoipa::path(
    delete, path = "/api/productos/{id}", tag = "productos",
    params(("id" = i64, Path, description = "Producto ID")),
    responses(
        (status = 204, description = "Deleted"),
        (status = 404, description = "Not Found"),
        (status = 500, description = "Delete Failed")
    )
)]
pub async fn delete(State(state): State<ServerState>, id: Result<Path<i64>, PathRejection>) -> Result<StatusCode, ApiError> {
    let id = path_id(id)?;
    match state.productos.exists_by_id(id).await {
        Ok(true) => {}
        Ok(false) => return Err(ApiError::NotFound),
        Err(e) => { error!(err = %e, id, "delete producto failed"); return Err(ApiError::Internal); }
    }
    match state.productos.delete_by_id(id).await {
        Ok(()) => { info!(id, "deleted producto"); Ok(StatusCode::NO_CONTENT) }
        Err(e) => { error!(err = %e, id, "delete producto failed"); Err(ApiError::Internal) }
    }
}
