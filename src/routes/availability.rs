use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json},
    Extension,
};
use uuid::Uuid;

use crate::{
    dto::availability_dto::{AvailabilityListQuery, CreateAvailabilityPayload},
    error::Result,
    middleware::auth::AuthUser,
    AppState,
};

#[utoipa::path(
    get,
    path = "/api/availability",
    params(
        ("recruiterId" = Option<Uuid>, Query, description = "Recruiter to list windows for; defaults to the caller")
    ),
    responses(
        (status = 200, description = "Active availability windows ordered by day of week"),
        (status = 401, description = "Missing or invalid token")
    )
)]
#[axum::debug_handler]
pub async fn list_availability(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Query(query): Query<AvailabilityListQuery>,
) -> Result<impl IntoResponse> {
    let recruiter_id = query.recruiter_id.unwrap_or(user.id);
    let windows = state.availability_service.list_active(recruiter_id).await?;
    Ok(Json(windows))
}

#[utoipa::path(
    post,
    path = "/api/availability",
    request_body = CreateAvailabilityPayload,
    responses(
        (status = 201, description = "Window created"),
        (status = 400, description = "Invalid day of week, time format, or ordering"),
        (status = 401, description = "Missing or invalid token")
    )
)]
#[axum::debug_handler]
pub async fn create_availability(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Json(payload): Json<CreateAvailabilityPayload>,
) -> Result<impl IntoResponse> {
    let window = state
        .availability_service
        .create(
            user.id,
            payload.day_of_week,
            &payload.start_time,
            &payload.end_time,
        )
        .await?;
    Ok((StatusCode::CREATED, Json(window)))
}

#[utoipa::path(
    delete,
    path = "/api/availability/{id}",
    params(
        ("id" = Uuid, Path, description = "Window ID")
    ),
    responses(
        (status = 204, description = "Window deactivated"),
        (status = 404, description = "No active window with this id owned by the caller")
    )
)]
#[axum::debug_handler]
pub async fn deactivate_availability(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse> {
    state.availability_service.deactivate(id, user.id).await?;
    Ok(StatusCode::NO_CONTENT)
}
