use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

/// Recurring weekly window during which a recruiter accepts interviews.
/// Times are "HH:MM" 24-hour strings; day_of_week is 0-6 with 0=Sunday.
/// Windows are deactivated, never deleted, so booking history stays valid.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AvailabilityWindow {
    pub id: Uuid,
    pub recruiter_id: Uuid,
    pub day_of_week: i32,
    pub start_time: String,
    pub end_time: String,
    pub is_active: bool,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}
