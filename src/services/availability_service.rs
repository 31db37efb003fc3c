use crate::error::{Error, Result};
use crate::models::availability::AvailabilityWindow;
use crate::utils::time::parse_hhmm;
use sqlx::PgPool;
use uuid::Uuid;

#[derive(Clone)]
pub struct AvailabilityService {
    pool: PgPool,
}

impl AvailabilityService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn list_active(&self, recruiter_id: Uuid) -> Result<Vec<AvailabilityWindow>> {
        let windows = sqlx::query_as::<_, AvailabilityWindow>(
            r#"
            SELECT id, recruiter_id, day_of_week, start_time, end_time, is_active, created_at, updated_at
            FROM availability_windows
            WHERE recruiter_id = $1 AND is_active
            ORDER BY day_of_week, start_time
            "#,
        )
        .bind(recruiter_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(windows)
    }

    pub async fn create(
        &self,
        recruiter_id: Uuid,
        day_of_week: i32,
        start_time: &str,
        end_time: &str,
    ) -> Result<AvailabilityWindow> {
        if !(0..=6).contains(&day_of_week) {
            return Err(Error::BadRequest(
                "Invalid dayOfWeek. Must be 0-6.".to_string(),
            ));
        }
        let (Some(start), Some(end)) = (parse_hhmm(start_time), parse_hhmm(end_time)) else {
            return Err(Error::BadRequest(
                "Invalid time format. Use HH:MM (24-hour).".to_string(),
            ));
        };
        if start >= end {
            return Err(Error::BadRequest(
                "startTime must be before endTime.".to_string(),
            ));
        }

        let window = sqlx::query_as::<_, AvailabilityWindow>(
            r#"
            INSERT INTO availability_windows (recruiter_id, day_of_week, start_time, end_time)
            VALUES ($1, $2, $3, $4)
            RETURNING id, recruiter_id, day_of_week, start_time, end_time, is_active, created_at, updated_at
            "#,
        )
        .bind(recruiter_id)
        .bind(day_of_week)
        .bind(start_time)
        .bind(end_time)
        .fetch_one(&self.pool)
        .await?;
        Ok(window)
    }

    /// Deactivation is scoped by id AND owner AND active flag, so a foreign
    /// or already-inactive window reads as not found.
    pub async fn deactivate(&self, window_id: Uuid, recruiter_id: Uuid) -> Result<()> {
        let result = sqlx::query(
            r#"
            UPDATE availability_windows
            SET is_active = FALSE, updated_at = NOW()
            WHERE id = $1 AND recruiter_id = $2 AND is_active
            "#,
        )
        .bind(window_id)
        .bind(recruiter_id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(Error::NotFound(
                "Availability window not found".to_string(),
            ));
        }
        Ok(())
    }
}
