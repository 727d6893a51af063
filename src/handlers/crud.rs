use axum::extract::State;
use tracing::instrument;

use crate::api::Identified;
use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult, RecordId, ValidJson};
use crate::services::{CrudService, Resource};
use crate::types::Operation;

use super::AppState;

fn failure<R: Resource>(operation: Operation) -> String {
    operation.failure_message(R::NAME, R::PLURAL)
}

fn not_found<R: Resource>(id: i64) -> ApiError {
    ApiError::not_found(format!("{} {} not found", R::NAME, id))
}

/// GET /api/{resource}
#[instrument(skip_all, fields(resource = R::NAME))]
pub async fn list<R: Resource>(State(state): State<AppState>) -> ApiResult<Vec<R::Dto>> {
    let service = CrudService::<R>::new(state.pool);
    let items = service
        .list_all()
        .await
        .map_err(|e| ApiError::from_service(e, failure::<R>(Operation::List)))?;

    Ok(ApiResponse::success(items))
}

/// GET /api/{resource}/{id}
#[instrument(skip_all, fields(resource = R::NAME, id))]
pub async fn get<R: Resource>(
    State(state): State<AppState>,
    RecordId(id): RecordId,
) -> ApiResult<R::Dto> {
    tracing::Span::current().record("id", id);
    let service = CrudService::<R>::new(state.pool);
    match service
        .get_by_id(id)
        .await
        .map_err(|e| ApiError::from_service(e, failure::<R>(Operation::Get)))?
    {
        Some(dto) => Ok(ApiResponse::success(dto)),
        None => Err(not_found::<R>(id)),
    }
}

/// POST /api/{resource} - 201 with a Location pointing at the new row
#[instrument(skip_all, fields(resource = R::NAME))]
pub async fn create<R: Resource>(
    State(state): State<AppState>,
    ValidJson(payload): ValidJson<R::Payload>,
) -> ApiResult<R::Dto> {
    let service = CrudService::<R>::new(state.pool);
    let dto = service
        .create(payload)
        .await
        .map_err(|e| ApiError::from_service(e, failure::<R>(Operation::Create)))?;

    let location = format!("/api/{}/{}", R::NAME, dto.id());
    Ok(ApiResponse::created(dto, location))
}

/// PUT /api/{resource}/{id} - body id must match the path
#[instrument(skip_all, fields(resource = R::NAME, id))]
pub async fn update<R: Resource>(
    State(state): State<AppState>,
    RecordId(id): RecordId,
    ValidJson(payload): ValidJson<R::Payload>,
) -> ApiResult<R::Dto> {
    tracing::Span::current().record("id", id);
    let service = CrudService::<R>::new(state.pool);
    match service
        .update(id, payload)
        .await
        .map_err(|e| ApiError::from_service(e, failure::<R>(Operation::Update)))?
    {
        Some(dto) => Ok(ApiResponse::success(dto)),
        None => Err(not_found::<R>(id)),
    }
}

/// DELETE /api/{resource}/{id}
#[instrument(skip_all, fields(resource = R::NAME, id))]
pub async fn delete<R: Resource>(
    State(state): State<AppState>,
    RecordId(id): RecordId,
) -> ApiResult<()> {
    tracing::Span::current().record("id", id);
    let service = CrudService::<R>::new(state.pool);
    let deleted = service
        .delete(id)
        .await
        .map_err(|e| ApiError::from_service(e, failure::<R>(Operation::Delete)))?;

    if deleted {
        Ok(ApiResponse::no_content())
    } else {
        Err(not_found::<R>(id))
    }
}
