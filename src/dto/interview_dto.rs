use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

/// A bookable 30-minute-aligned interview start time derived from an
/// availability window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Slot {
    pub starts_at: DateTime<Utc>,
    pub label: String,
    pub available: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default, rename_all = "camelCase")]
pub struct SlotQuery {
    pub recruiter_id: Option<Uuid>,
    pub date: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default, rename_all = "camelCase")]
pub struct BookingListQuery {
    pub recruiter_id: Option<Uuid>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, ToSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct ConflictCheckPayload {
    pub recruiter_id: Option<Uuid>,
    pub profile_id: Option<Uuid>,
    pub user_id: Option<Uuid>,
    pub user_role: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateInvitationPayload {
    pub candidate_profile_id: Uuid,
    pub job_post_id: Uuid,
    pub interview_type: String,
    #[serde(default)]
    pub proposed_slots: Vec<DateTime<Utc>>,
    #[validate(url)]
    pub meeting_link: Option<String>,
    #[validate(length(max = 2000))]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RespondInvitationPayload {
    pub action: String,
    pub scheduled_at: Option<DateTime<Utc>>,
}

/// Partial update: only the fields present in the request are applied.
#[derive(Debug, Clone, Serialize, Deserialize, Default, ToSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct UpdateBookingPayload {
    pub scheduled_at: Option<DateTime<Utc>>,
    pub duration_minutes: Option<i32>,
    pub status: Option<String>,
    pub recruiter_notes: Option<String>,
    pub candidate_notes: Option<String>,
    pub recruiter_feedback: Option<String>,
    pub candidate_feedback: Option<String>,
    pub rating: Option<i32>,
    pub reschedule_reason: Option<String>,
}

/// Invitation joined with the job post, recruiter and candidate profile.
/// `duration_minutes` is derived from the interview type after the fetch.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct InvitationDetails {
    pub id: Uuid,
    pub candidate_profile_id: Uuid,
    pub job_post_id: Uuid,
    pub recruiter_id: Uuid,
    pub interview_type: String,
    pub proposed_slots: Vec<DateTime<Utc>>,
    pub meeting_link: Option<String>,
    pub notes: Option<String>,
    pub status: String,
    pub confirmed_at: Option<DateTime<Utc>>,
    pub created_at: Option<DateTime<Utc>>,
    pub job_title: String,
    pub company: String,
    pub recruiter_name: String,
    pub candidate_headline: Option<String>,
    #[sqlx(default)]
    pub duration_minutes: i32,
}
