use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json},
    Extension,
};
use chrono::NaiveDate;
use serde_json::json;
use uuid::Uuid;

use crate::{
    dto::interview_dto::{
        BookingListQuery, ConflictCheckPayload, CreateInvitationPayload, RespondInvitationPayload,
        SlotQuery, UpdateBookingPayload,
    },
    error::{Error, Result},
    middleware::auth::AuthUser,
    models::user::Role,
    AppState,
};

#[utoipa::path(
    get,
    path = "/api/interviews/available-slots",
    params(
        ("recruiterId" = Uuid, Query, description = "Recruiter whose calendar to inspect"),
        ("date" = String, Query, description = "Calendar date, YYYY-MM-DD")
    ),
    responses(
        (status = 200, description = "Bookable slots in chronological order"),
        (status = 400, description = "Missing recruiterId or unparseable date")
    )
)]
#[axum::debug_handler]
pub async fn available_slots(
    State(state): State<AppState>,
    Query(query): Query<SlotQuery>,
) -> Result<impl IntoResponse> {
    let recruiter_id = query
        .recruiter_id
        .ok_or_else(|| Error::BadRequest("recruiterId is required".to_string()))?;
    let raw_date = query
        .date
        .ok_or_else(|| Error::BadRequest("date is required".to_string()))?;
    let date = NaiveDate::parse_from_str(&raw_date, "%Y-%m-%d")
        .map_err(|_| Error::BadRequest("Invalid date. Use YYYY-MM-DD.".to_string()))?;

    let slots = state.slot_service.available_slots(recruiter_id, date).await?;
    Ok(Json(slots))
}

#[utoipa::path(
    get,
    path = "/api/interviews/bookings",
    params(
        ("recruiterId" = Option<Uuid>, Query, description = "Recruiter to list; defaults to the caller")
    ),
    responses(
        (status = 200, description = "Scheduled bookings"),
        (status = 403, description = "Cross-recruiter access without the admin role")
    )
)]
#[axum::debug_handler]
pub async fn list_bookings(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Query(query): Query<BookingListQuery>,
) -> Result<impl IntoResponse> {
    let recruiter_id = query.recruiter_id.unwrap_or(user.id);
    if recruiter_id != user.id && !user.is_admin() {
        return Err(Error::Forbidden(
            "Cannot view another recruiter's bookings".to_string(),
        ));
    }
    let bookings = state.booking_service.list_scheduled(recruiter_id).await?;
    Ok(Json(bookings))
}

#[utoipa::path(
    post,
    path = "/api/interviews/conflicts",
    request_body = ConflictCheckPayload,
    responses(
        (status = 200, description = "Advisory list of upcoming scheduled bookings for either party"),
        (status = 400, description = "Missing recruiterId, or neither profileId nor userId+userRole")
    )
)]
#[axum::debug_handler]
pub async fn check_conflicts(
    State(state): State<AppState>,
    Json(payload): Json<ConflictCheckPayload>,
) -> Result<impl IntoResponse> {
    let recruiter_id = payload
        .recruiter_id
        .ok_or_else(|| Error::BadRequest("recruiterId is required".to_string()))?;

    let profile_ids = if let Some(profile_id) = payload.profile_id {
        vec![profile_id]
    } else if let (Some(user_id), Some(raw_role)) = (payload.user_id, payload.user_role.as_deref())
    {
        let role = Role::parse(raw_role)
            .ok_or_else(|| Error::BadRequest(format!("Invalid userRole: {}", raw_role)))?;
        state.booking_service.resolve_profile_ids(user_id, role).await?
    } else {
        return Err(Error::BadRequest(
            "profileId or userId and userRole are required".to_string(),
        ));
    };

    let conflicts = state
        .booking_service
        .upcoming_for_parties(recruiter_id, &profile_ids)
        .await?;
    Ok(Json(conflicts))
}

#[utoipa::path(
    post,
    path = "/api/interviews/create-invitation",
    request_body = CreateInvitationPayload,
    responses(
        (status = 201, description = "Pending invitation created"),
        (status = 400, description = "Invalid payload")
    )
)]
#[axum::debug_handler]
pub async fn create_invitation(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Json(payload): Json<CreateInvitationPayload>,
) -> Result<impl IntoResponse> {
    crate::utils::validation::validate(&payload)?;
    let invitation = state.invitation_service.create(user.id, payload).await?;
    Ok((StatusCode::CREATED, Json(invitation)))
}

#[utoipa::path(
    get,
    path = "/api/interviews/invitations/{id}",
    params(
        ("id" = Uuid, Path, description = "Invitation ID")
    ),
    responses(
        (status = 200, description = "Invitation with joined job, recruiter and profile"),
        (status = 404, description = "Invitation not found")
    )
)]
#[axum::debug_handler]
pub async fn get_invitation(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse> {
    let details = state.invitation_service.get_details(id).await?;
    Ok(Json(details))
}

#[utoipa::path(
    post,
    path = "/api/interviews/invitations/{id}/respond",
    params(
        ("id" = Uuid, Path, description = "Invitation ID")
    ),
    request_body = RespondInvitationPayload,
    responses(
        (status = 200, description = "Invitation confirmed (with booking) or declined"),
        (status = 400, description = "Invalid action, missing scheduledAt, or invitation no longer pending"),
        (status = 404, description = "Invitation not found, or not addressed to the caller's profile")
    )
)]
#[axum::debug_handler]
pub async fn respond_invitation(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<Uuid>,
    Json(payload): Json<RespondInvitationPayload>,
) -> Result<impl IntoResponse> {
    // Non-admin callers may only respond to invitations addressed to a
    // profile they own.
    let candidate_scope = if user.is_admin() { None } else { Some(user.id) };
    match payload.action.as_str() {
        "confirm" => {
            let scheduled_at = payload.scheduled_at.ok_or_else(|| {
                Error::BadRequest("scheduledAt is required to confirm".to_string())
            })?;
            let (invitation, booking) = state
                .invitation_service
                .confirm(id, candidate_scope, scheduled_at, &state.booking_service)
                .await?;
            Ok(Json(json!({ "invitation": invitation, "booking": booking })))
        }
        "decline" => {
            let invitation = state
                .invitation_service
                .decline(id, candidate_scope)
                .await?;
            Ok(Json(json!({ "invitation": invitation })))
        }
        other => Err(Error::BadRequest(format!("Invalid action: {}", other))),
    }
}

#[utoipa::path(
    patch,
    path = "/api/interviews/{id}",
    params(
        ("id" = Uuid, Path, description = "Booking ID")
    ),
    request_body = UpdateBookingPayload,
    responses(
        (status = 200, description = "Booking updated; a reschedule history entry is appended when scheduledAt is present"),
        (status = 404, description = "Booking not found")
    )
)]
#[axum::debug_handler]
pub async fn update_booking(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateBookingPayload>,
) -> Result<impl IntoResponse> {
    let booking = state.booking_service.update(id, payload, user.id).await?;
    Ok(Json(booking))
}

#[utoipa::path(
    get,
    path = "/api/interviews/{id}/history",
    params(
        ("id" = Uuid, Path, description = "Booking ID")
    ),
    responses(
        (status = 200, description = "Reschedule history entries, oldest first")
    )
)]
#[axum::debug_handler]
pub async fn booking_history(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse> {
    let entries = state.booking_service.reschedule_history(id).await?;
    Ok(Json(entries))
}

#[utoipa::path(
    delete,
    path = "/api/interviews/{id}",
    params(
        ("id" = Uuid, Path, description = "Booking ID")
    ),
    responses(
        (status = 200, description = "Booking cancelled (idempotent)"),
        (status = 404, description = "Booking not found")
    )
)]
#[axum::debug_handler]
pub async fn cancel_booking(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse> {
    let booking = state.booking_service.cancel(id).await?;
    Ok(Json(booking))
}
