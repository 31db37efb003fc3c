use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BookingStatus {
    Scheduled,
    Cancelled,
    Completed,
}

impl BookingStatus {
    pub fn parse(raw: &str) -> Option<BookingStatus> {
        match raw {
            "scheduled" => Some(BookingStatus::Scheduled),
            "cancelled" => Some(BookingStatus::Cancelled),
            "completed" => Some(BookingStatus::Completed),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            BookingStatus::Scheduled => "scheduled",
            BookingStatus::Cancelled => "cancelled",
            BookingStatus::Completed => "completed",
        }
    }

    pub fn is_terminal(&self) -> bool {
        !matches!(self, BookingStatus::Scheduled)
    }
}

/// A confirmed interview occupying [scheduled_at, scheduled_at + duration).
/// Rows are never hard-deleted; cancellation is a status transition and
/// deleted_at marks soft deletion.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    pub id: Uuid,
    pub recruiter_id: Uuid,
    pub candidate_profile_id: Uuid,
    pub scheduled_at: DateTime<Utc>,
    pub duration_minutes: i32,
    pub status: String,
    pub recruiter_notes: Option<String>,
    pub candidate_notes: Option<String>,
    pub recruiter_feedback: Option<String>,
    pub candidate_feedback: Option<String>,
    pub rating: Option<i32>,
    pub deleted_at: Option<DateTime<Utc>>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

/// Append-only record of a booking's time change. Written exactly once per
/// reschedule, immutable thereafter.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RescheduleHistoryEntry {
    pub id: Uuid,
    pub booking_id: Uuid,
    pub previous_at: DateTime<Utc>,
    pub new_at: DateTime<Utc>,
    pub reason: Option<String>,
    pub actor_id: Uuid,
    pub created_at: Option<DateTime<Utc>>,
}
