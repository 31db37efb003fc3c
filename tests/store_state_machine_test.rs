//! Store-backed state-machine tests. These run against a provisioned
//! Postgres (DATABASE_URL, as for the server itself) and are ignored by
//! default; run them with `cargo test -- --ignored`.

use std::env;

use chrono::{DateTime, TimeZone, Utc};
use scheduling_backend::dto::interview_dto::{CreateInvitationPayload, UpdateBookingPayload};
use scheduling_backend::error::Error;
use scheduling_backend::AppState;
use sqlx::PgPool;
use uuid::Uuid;

async fn setup() -> AppState {
    dotenvy::dotenv().ok();
    env::set_var("SERVER_ADDRESS", "127.0.0.1:0");
    env::set_var("JWT_SECRET", "test_secret_key");
    env::set_var("API_RPS", "100");
    let _ = scheduling_backend::config::init_config();

    let pool = scheduling_backend::database::pool::create_pool()
        .await
        .expect("pool");
    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("migrations");
    AppState::new(pool)
}

async fn seed_user(pool: &PgPool, role: &str) -> Uuid {
    sqlx::query_scalar::<_, Uuid>(
        "INSERT INTO users (email, name, role) VALUES ($1, $2, $3) RETURNING id",
    )
    .bind(format!("user_{}@example.com", Uuid::new_v4()))
    .bind("Test User")
    .bind(role)
    .fetch_one(pool)
    .await
    .expect("seed user")
}

async fn seed_profile(pool: &PgPool, user_id: Uuid) -> Uuid {
    sqlx::query_scalar::<_, Uuid>(
        "INSERT INTO jobseeker_profiles (user_id, headline) VALUES ($1, $2) RETURNING id",
    )
    .bind(user_id)
    .bind("Backend engineer")
    .fetch_one(pool)
    .await
    .expect("seed profile")
}

async fn seed_job(pool: &PgPool, recruiter_id: Uuid) -> Uuid {
    sqlx::query_scalar::<_, Uuid>(
        "INSERT INTO job_posts (recruiter_id, title, company) VALUES ($1, $2, $3) RETURNING id",
    )
    .bind(recruiter_id)
    .bind("Backend Engineer")
    .bind("Acme")
    .fetch_one(pool)
    .await
    .expect("seed job")
}

// Whole-second future instants so values round-trip the store untruncated.
fn future_instant(hour: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2027, 3, 1, hour, 0, 0).unwrap()
}

#[tokio::test]
#[ignore = "requires a provisioned Postgres"]
async fn second_deactivate_reports_not_found() {
    let state = setup().await;
    let recruiter = seed_user(&state.pool, "recruiter").await;

    let window = state
        .availability_service
        .create(recruiter, 1, "09:00", "10:00")
        .await
        .expect("create window");

    state
        .availability_service
        .deactivate(window.id, recruiter)
        .await
        .expect("first deactivate");

    let err = state
        .availability_service
        .deactivate(window.id, recruiter)
        .await
        .expect_err("second deactivate");
    assert!(matches!(err, Error::NotFound(_)));
}

#[tokio::test]
#[ignore = "requires a provisioned Postgres"]
async fn foreign_recruiter_cannot_deactivate_a_window() {
    let state = setup().await;
    let owner = seed_user(&state.pool, "recruiter").await;
    let other = seed_user(&state.pool, "recruiter").await;

    let window = state
        .availability_service
        .create(owner, 2, "10:00", "12:00")
        .await
        .expect("create window");

    let err = state
        .availability_service
        .deactivate(window.id, other)
        .await
        .expect_err("foreign deactivate");
    assert!(matches!(err, Error::NotFound(_)));

    // The row is untouched: the owner can still deactivate it.
    state
        .availability_service
        .deactivate(window.id, owner)
        .await
        .expect("owner deactivate");
}

#[tokio::test]
#[ignore = "requires a provisioned Postgres"]
async fn reschedule_appends_exactly_one_history_entry() {
    let state = setup().await;
    let recruiter = seed_user(&state.pool, "recruiter").await;
    let candidate = seed_user(&state.pool, "jobseeker").await;
    let profile = seed_profile(&state.pool, candidate).await;

    let t1 = future_instant(9);
    let t2 = future_instant(14);
    let booking = state
        .booking_service
        .create(recruiter, profile, t1, 60)
        .await
        .expect("create booking");

    let updated = state
        .booking_service
        .update(
            booking.id,
            UpdateBookingPayload {
                scheduled_at: Some(t2),
                reschedule_reason: Some("candidate request".to_string()),
                ..Default::default()
            },
            recruiter,
        )
        .await
        .expect("reschedule");
    assert_eq!(updated.scheduled_at, t2);

    let history = state
        .booking_service
        .reschedule_history(booking.id)
        .await
        .expect("history");
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].previous_at, t1);
    assert_eq!(history[0].new_at, t2);
    assert_eq!(history[0].actor_id, recruiter);
}

#[tokio::test]
#[ignore = "requires a provisioned Postgres"]
async fn cancel_is_a_no_op_on_a_cancelled_booking() {
    let state = setup().await;
    let recruiter = seed_user(&state.pool, "recruiter").await;
    let candidate = seed_user(&state.pool, "jobseeker").await;
    let profile = seed_profile(&state.pool, candidate).await;

    let booking = state
        .booking_service
        .create(recruiter, profile, future_instant(11), 30)
        .await
        .expect("create booking");

    let cancelled = state
        .booking_service
        .cancel(booking.id)
        .await
        .expect("first cancel");
    assert_eq!(cancelled.status, "cancelled");

    let cancelled_again = state
        .booking_service
        .cancel(booking.id)
        .await
        .expect("second cancel");
    assert_eq!(cancelled_again.status, "cancelled");
}

#[tokio::test]
#[ignore = "requires a provisioned Postgres"]
async fn respond_is_scoped_to_the_invited_candidate() {
    let state = setup().await;
    let recruiter = seed_user(&state.pool, "recruiter").await;
    let invited = seed_user(&state.pool, "jobseeker").await;
    let profile = seed_profile(&state.pool, invited).await;
    let outsider = seed_user(&state.pool, "jobseeker").await;
    seed_profile(&state.pool, outsider).await;
    let job = seed_job(&state.pool, recruiter).await;

    let invitation = state
        .invitation_service
        .create(
            recruiter,
            CreateInvitationPayload {
                candidate_profile_id: profile,
                job_post_id: job,
                interview_type: "phone_screen".to_string(),
                proposed_slots: vec![future_instant(10)],
                meeting_link: None,
                notes: None,
            },
        )
        .await
        .expect("create invitation");

    let err = state
        .invitation_service
        .decline(invitation.id, Some(outsider))
        .await
        .expect_err("outsider decline");
    assert!(matches!(err, Error::NotFound(_)));

    let declined = state
        .invitation_service
        .decline(invitation.id, Some(invited))
        .await
        .expect("invited decline");
    assert_eq!(declined.status, "declined");
}

#[tokio::test]
#[ignore = "requires a provisioned Postgres"]
async fn confirm_creates_one_booking_and_is_terminal() {
    let state = setup().await;
    let recruiter = seed_user(&state.pool, "recruiter").await;
    let invited = seed_user(&state.pool, "jobseeker").await;
    let profile = seed_profile(&state.pool, invited).await;
    let job = seed_job(&state.pool, recruiter).await;

    let slot = future_instant(10);
    let invitation = state
        .invitation_service
        .create(
            recruiter,
            CreateInvitationPayload {
                candidate_profile_id: profile,
                job_post_id: job,
                interview_type: "phone_screen".to_string(),
                proposed_slots: vec![slot],
                meeting_link: None,
                notes: None,
            },
        )
        .await
        .expect("create invitation");

    let (confirmed, booking) = state
        .invitation_service
        .confirm(invitation.id, Some(invited), slot, &state.booking_service)
        .await
        .expect("confirm");
    assert_eq!(confirmed.status, "confirmed");
    assert_eq!(confirmed.confirmed_at, Some(slot));
    assert_eq!(booking.scheduled_at, slot);
    assert_eq!(booking.duration_minutes, 30);
    assert_eq!(booking.status, "scheduled");

    let err = state
        .invitation_service
        .confirm(invitation.id, Some(invited), slot, &state.booking_service)
        .await
        .expect_err("second confirm");
    assert!(matches!(err, Error::BadRequest(_)));

    let bookings = state
        .booking_service
        .list_scheduled(recruiter)
        .await
        .expect("list bookings");
    assert_eq!(bookings.len(), 1);
}
