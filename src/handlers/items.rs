//! Item CRUD handlers. Extractor rejections are reported as validation errors.

use crate::error::AppError;
use crate::model::{Item, ItemChanges, ListParams, NewItem};
use crate::response::{cleared, deleted, Cleared, Deleted};
use crate::state::AppState;
use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection, QueryRejection},
        Path, Query, State,
    },
    Json,
};

pub async fn create(
    State(state): State<AppState>,
    body: Result<Json<NewItem>, JsonRejection>,
) -> Result<Json<Item>, AppError> {
    let Json(item) = body?;
    Ok(Json(state.items.create(item).await?))
}

pub async fn list(
    State(state): State<AppState>,
    params: Result<Query<ListParams>, QueryRejection>,
) -> Result<Json<Vec<Item>>, AppError> {
    let Query(params) = params?;
    Ok(Json(state.items.list(&params).await?))
}

pub async fn read(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<Json<Item>, AppError> {
    let Path(id) = id?;
    Ok(Json(state.items.get(id).await?))
}

pub async fn update(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
    body: Result<Json<ItemChanges>, JsonRejection>,
) -> Result<Json<Item>, AppError> {
    let Path(id) = id?;
    let Json(changes) = body?;
    Ok(Json(state.items.update(id, changes).await?))
}

pub async fn delete(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<Json<Deleted>, AppError> {
    let Path(id) = id?;
    state.items.delete(id).await?;
    Ok(Json(deleted()))
}

pub async fn delete_all(State(state): State<AppState>) -> Result<Json<Cleared>, AppError> {
    state.items.delete_all().await?;
    Ok(Json(cleared()))
}
