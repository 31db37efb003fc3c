use chrono::{DateTime, Datelike, NaiveDate, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::dto::interview_dto::Slot;
use crate::error::Result;
use crate::models::availability::AvailabilityWindow;
use crate::utils::time::{day_bounds, instant_at, now, parse_hhmm};

pub const SLOT_INTERVAL_MINUTES: u32 = 30;

#[derive(Clone)]
pub struct SlotService {
    pool: PgPool,
}

impl SlotService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Bookable slots for a recruiter on a calendar date: the recruiter's
    /// active windows for that day-of-week, minus instants already taken by
    /// scheduled bookings, minus anything not strictly in the future.
    pub async fn available_slots(&self, recruiter_id: Uuid, date: NaiveDate) -> Result<Vec<Slot>> {
        let day_of_week = date.weekday().num_days_from_sunday() as i32;

        let windows = sqlx::query_as::<_, AvailabilityWindow>(
            r#"
            SELECT id, recruiter_id, day_of_week, start_time, end_time, is_active, created_at, updated_at
            FROM availability_windows
            WHERE recruiter_id = $1 AND day_of_week = $2 AND is_active
            ORDER BY start_time
            "#,
        )
        .bind(recruiter_id)
        .bind(day_of_week)
        .fetch_all(&self.pool)
        .await?;

        if windows.is_empty() {
            return Ok(Vec::new());
        }

        let (start_of_day, end_of_day) = day_bounds(date);
        let booked: Vec<DateTime<Utc>> = sqlx::query_scalar(
            r#"
            SELECT scheduled_at
            FROM bookings
            WHERE recruiter_id = $1
              AND status = 'scheduled'
              AND deleted_at IS NULL
              AND scheduled_at BETWEEN $2 AND $3
            "#,
        )
        .bind(recruiter_id)
        .bind(start_of_day)
        .bind(end_of_day)
        .fetch_all(&self.pool)
        .await?;

        Ok(generate_slots(&windows, &booked, date, now()))
    }
}

/// Walks each window from its start in 30-minute steps while strictly before
/// the window end, suppressing instants that match an existing booking or are
/// not strictly in the future. Windows for one day are assumed
/// non-overlapping; overlap would produce duplicate slots.
pub fn generate_slots(
    windows: &[AvailabilityWindow],
    booked: &[DateTime<Utc>],
    date: NaiveDate,
    now: DateTime<Utc>,
) -> Vec<Slot> {
    let mut slots = Vec::new();
    for window in windows {
        let (Some(start), Some(end)) = (parse_hhmm(&window.start_time), parse_hhmm(&window.end_time))
        else {
            // Persisted times are validated on create; skip anything malformed.
            continue;
        };
        let mut current = start;
        while current < end {
            let starts_at = instant_at(date, current);
            if starts_at > now && !booked.contains(&starts_at) {
                slots.push(Slot {
                    starts_at,
                    label: format!("{:02}:{:02}", current / 60, current % 60),
                    available: true,
                });
            }
            current += SLOT_INTERVAL_MINUTES;
        }
    }
    slots.sort_by_key(|slot| slot.starts_at);
    slots
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn window(day_of_week: i32, start: &str, end: &str) -> AvailabilityWindow {
        AvailabilityWindow {
            id: Uuid::new_v4(),
            recruiter_id: Uuid::new_v4(),
            day_of_week,
            start_time: start.to_string(),
            end_time: end.to_string(),
            is_active: true,
            created_at: None,
            updated_at: None,
        }
    }

    fn monday() -> NaiveDate {
        // 2026-03-02 is a Monday.
        NaiveDate::from_ymd_opt(2026, 3, 2).unwrap()
    }

    fn midnight_before(date: NaiveDate) -> DateTime<Utc> {
        Utc.from_utc_datetime(&date.and_hms_opt(0, 0, 0).unwrap()) - chrono::Duration::hours(1)
    }

    #[test]
    fn no_windows_means_no_slots() {
        let slots = generate_slots(&[], &[], monday(), midnight_before(monday()));
        assert!(slots.is_empty());
    }

    #[test]
    fn one_hour_window_yields_two_slots_excluding_the_end() {
        let windows = vec![window(1, "09:00", "10:00")];
        let slots = generate_slots(&windows, &[], monday(), midnight_before(monday()));
        let labels: Vec<&str> = slots.iter().map(|s| s.label.as_str()).collect();
        assert_eq!(labels, vec!["09:00", "09:30"]);
        assert!(slots.iter().all(|s| s.available));
    }

    #[test]
    fn partial_trailing_increment_is_never_emitted() {
        let windows = vec![window(1, "09:00", "09:45")];
        let slots = generate_slots(&windows, &[], monday(), midnight_before(monday()));
        let labels: Vec<&str> = slots.iter().map(|s| s.label.as_str()).collect();
        assert_eq!(labels, vec!["09:00", "09:30"]);
    }

    #[test]
    fn booked_instants_are_suppressed() {
        let windows = vec![window(1, "09:00", "10:30")];
        let booked = vec![instant_at(monday(), 9 * 60 + 30)];
        let slots = generate_slots(&windows, &booked, monday(), midnight_before(monday()));
        let labels: Vec<&str> = slots.iter().map(|s| s.label.as_str()).collect();
        assert_eq!(labels, vec!["09:00", "10:00"]);
    }

    #[test]
    fn only_strictly_future_slots_are_emitted() {
        let windows = vec![window(1, "09:00", "10:00")];
        // Generation at exactly 09:00 excludes the 09:00 slot itself.
        let now = instant_at(monday(), 9 * 60);
        let slots = generate_slots(&windows, &[], monday(), now);
        let labels: Vec<&str> = slots.iter().map(|s| s.label.as_str()).collect();
        assert_eq!(labels, vec!["09:30"]);
    }

    #[test]
    fn slots_from_multiple_windows_come_out_chronological() {
        let windows = vec![window(1, "14:00", "15:00"), window(1, "09:00", "10:00")];
        let slots = generate_slots(&windows, &[], monday(), midnight_before(monday()));
        let labels: Vec<&str> = slots.iter().map(|s| s.label.as_str()).collect();
        assert_eq!(labels, vec!["09:00", "09:30", "14:00", "14:30"]);
    }

    #[test]
    fn slot_instants_stay_inside_the_window() {
        let windows = vec![window(1, "09:00", "11:00")];
        let now = midnight_before(monday());
        let slots = generate_slots(&windows, &[], monday(), now);
        let end = instant_at(monday(), 11 * 60);
        for slot in &slots {
            assert!(slot.starts_at > now);
            assert!(slot.starts_at < end);
        }
    }
}
