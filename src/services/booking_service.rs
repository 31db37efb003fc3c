use chrono::{DateTime, Duration, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::dto::interview_dto::UpdateBookingPayload;
use crate::error::{Error, Result};
use crate::models::booking::{Booking, BookingStatus, RescheduleHistoryEntry};
use crate::models::user::Role;

const BOOKING_COLUMNS: &str = "id, recruiter_id, candidate_profile_id, scheduled_at, \
     duration_minutes, status, recruiter_notes, candidate_notes, recruiter_feedback, \
     candidate_feedback, rating, deleted_at, created_at, updated_at";

#[derive(Clone)]
pub struct BookingService {
    pool: PgPool,
}

impl BookingService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(
        &self,
        recruiter_id: Uuid,
        candidate_profile_id: Uuid,
        scheduled_at: DateTime<Utc>,
        duration_minutes: i32,
    ) -> Result<Booking> {
        self.create_in(
            &self.pool,
            recruiter_id,
            candidate_profile_id,
            scheduled_at,
            duration_minutes,
        )
        .await
    }

    /// Insert against an explicit executor so callers can compose the write
    /// into a transaction (invitation confirmation commits the booking and
    /// the status transition together).
    pub async fn create_in<'e, E>(
        &self,
        executor: E,
        recruiter_id: Uuid,
        candidate_profile_id: Uuid,
        scheduled_at: DateTime<Utc>,
        duration_minutes: i32,
    ) -> Result<Booking>
    where
        E: sqlx::PgExecutor<'e>,
    {
        let booking = sqlx::query_as::<_, Booking>(&format!(
            r#"
            INSERT INTO bookings (recruiter_id, candidate_profile_id, scheduled_at, duration_minutes)
            VALUES ($1, $2, $3, $4)
            RETURNING {BOOKING_COLUMNS}
            "#,
        ))
        .bind(recruiter_id)
        .bind(candidate_profile_id)
        .bind(scheduled_at)
        .bind(duration_minutes)
        .fetch_one(executor)
        .await?;
        Ok(booking)
    }

    pub async fn list_scheduled(&self, recruiter_id: Uuid) -> Result<Vec<Booking>> {
        let bookings = sqlx::query_as::<_, Booking>(&format!(
            r#"
            SELECT {BOOKING_COLUMNS}
            FROM bookings
            WHERE recruiter_id = $1 AND status = 'scheduled' AND deleted_at IS NULL
            ORDER BY scheduled_at
            "#,
        ))
        .bind(recruiter_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(bookings)
    }

    /// Advisory conflict report: every scheduled, not-soft-deleted, upcoming
    /// booking involving the recruiter or any of the candidate profiles. The
    /// caller interprets overlap against the prospective duration; nothing is
    /// rejected here.
    pub async fn upcoming_for_parties(
        &self,
        recruiter_id: Uuid,
        profile_ids: &[Uuid],
    ) -> Result<Vec<Booking>> {
        let bookings = sqlx::query_as::<_, Booking>(&format!(
            r#"
            SELECT {BOOKING_COLUMNS}
            FROM bookings
            WHERE status = 'scheduled'
              AND deleted_at IS NULL
              AND scheduled_at >= NOW()
              AND (recruiter_id = $1 OR candidate_profile_id = ANY($2))
            ORDER BY scheduled_at
            "#,
        ))
        .bind(recruiter_id)
        .bind(profile_ids.to_vec())
        .fetch_all(&self.pool)
        .await?;
        Ok(bookings)
    }

    /// Resolves a (user, role) pair to candidate profile ids. Only job
    /// seekers own profiles; other roles resolve to none.
    pub async fn resolve_profile_ids(&self, user_id: Uuid, role: Role) -> Result<Vec<Uuid>> {
        if role != Role::JobSeeker {
            return Ok(Vec::new());
        }
        let ids = sqlx::query_scalar::<_, Uuid>(
            "SELECT id FROM jobseeker_profiles WHERE user_id = $1",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(ids)
    }

    /// Partial update. When a new scheduled time is present the current one
    /// is read first and a reschedule history entry appended before the
    /// write. There is deliberately no version guard: concurrent reschedules
    /// are last-writer-wins and each logs the previous value it observed.
    pub async fn update(
        &self,
        booking_id: Uuid,
        payload: UpdateBookingPayload,
        actor_id: Uuid,
    ) -> Result<Booking> {
        if let Some(ref status) = payload.status {
            if BookingStatus::parse(status).is_none() {
                return Err(Error::BadRequest(format!("Invalid status: {}", status)));
            }
        }

        if let Some(new_at) = payload.scheduled_at {
            let previous: Option<DateTime<Utc>> =
                sqlx::query_scalar("SELECT scheduled_at FROM bookings WHERE id = $1")
                    .bind(booking_id)
                    .fetch_optional(&self.pool)
                    .await?;
            // A missing row skips the log; the zero-row update below becomes
            // the not-found signal.
            if let Some(previous_at) = previous {
                self.log_reschedule(
                    booking_id,
                    previous_at,
                    new_at,
                    payload.reschedule_reason.clone(),
                    actor_id,
                )
                .await?;
            }
        }

        let booking = sqlx::query_as::<_, Booking>(&format!(
            r#"
            UPDATE bookings
            SET
                scheduled_at = COALESCE($2, scheduled_at),
                duration_minutes = COALESCE($3, duration_minutes),
                status = COALESCE($4, status),
                recruiter_notes = COALESCE($5, recruiter_notes),
                candidate_notes = COALESCE($6, candidate_notes),
                recruiter_feedback = COALESCE($7, recruiter_feedback),
                candidate_feedback = COALESCE($8, candidate_feedback),
                rating = COALESCE($9, rating),
                updated_at = NOW()
            WHERE id = $1
            RETURNING {BOOKING_COLUMNS}
            "#,
        ))
        .bind(booking_id)
        .bind(payload.scheduled_at)
        .bind(payload.duration_minutes)
        .bind(payload.status)
        .bind(payload.recruiter_notes)
        .bind(payload.candidate_notes)
        .bind(payload.recruiter_feedback)
        .bind(payload.candidate_feedback)
        .bind(payload.rating)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| Error::NotFound("Interview not found".to_string()))?;

        Ok(booking)
    }

    /// Soft-cancel: a status assignment, idempotent, never a row removal.
    pub async fn cancel(&self, booking_id: Uuid) -> Result<Booking> {
        let booking = sqlx::query_as::<_, Booking>(&format!(
            r#"
            UPDATE bookings
            SET status = 'cancelled', updated_at = NOW()
            WHERE id = $1
            RETURNING {BOOKING_COLUMNS}
            "#,
        ))
        .bind(booking_id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| Error::NotFound("Interview not found".to_string()))?;
        Ok(booking)
    }

    pub async fn reschedule_history(&self, booking_id: Uuid) -> Result<Vec<RescheduleHistoryEntry>> {
        let entries = sqlx::query_as::<_, RescheduleHistoryEntry>(
            r#"
            SELECT id, booking_id, previous_at, new_at, reason, actor_id, created_at
            FROM reschedule_history
            WHERE booking_id = $1
            ORDER BY created_at
            "#,
        )
        .bind(booking_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(entries)
    }

    async fn log_reschedule(
        &self,
        booking_id: Uuid,
        previous_at: DateTime<Utc>,
        new_at: DateTime<Utc>,
        reason: Option<String>,
        actor_id: Uuid,
    ) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO reschedule_history (booking_id, previous_at, new_at, reason, actor_id)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(booking_id)
        .bind(previous_at)
        .bind(new_at)
        .bind(reason)
        .bind(actor_id)
        .execute(&self.pool)
        .await?;
        Ok(())
    }
}

/// Half-open interval overlap for two prospective or existing bookings.
pub fn overlaps(
    a_start: DateTime<Utc>,
    a_minutes: i32,
    b_start: DateTime<Utc>,
    b_minutes: i32,
) -> bool {
    let a_end = a_start + Duration::minutes(a_minutes as i64);
    let b_end = b_start + Duration::minutes(b_minutes as i64);
    a_start < b_end && b_start < a_end
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(hour: u32, minute: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 2, hour, minute, 0).unwrap()
    }

    #[test]
    fn overlapping_intervals_are_detected() {
        assert!(overlaps(at(9, 0), 60, at(9, 30), 30));
        assert!(overlaps(at(9, 30), 30, at(9, 0), 60));
        assert!(overlaps(at(9, 0), 30, at(9, 0), 30));
    }

    #[test]
    fn touching_intervals_do_not_overlap() {
        assert!(!overlaps(at(9, 0), 30, at(9, 30), 30));
        assert!(!overlaps(at(9, 30), 30, at(9, 0), 30));
    }

    #[test]
    fn disjoint_intervals_do_not_overlap() {
        assert!(!overlaps(at(9, 0), 30, at(14, 0), 60));
    }
}
