use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::dto::interview_dto::{CreateInvitationPayload, InvitationDetails};
use crate::error::{Error, Result};
use crate::models::booking::Booking;
use crate::models::invitation::{duration_for_type, InterviewInvitation, InvitationStatus};
use crate::services::booking_service::BookingService;

const INVITATION_COLUMNS: &str = "id, candidate_profile_id, job_post_id, recruiter_id, \
     interview_type, proposed_slots, meeting_link, notes, status, confirmed_at, \
     created_at, updated_at";

#[derive(Clone)]
pub struct InvitationService {
    pool: PgPool,
}

impl InvitationService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(
        &self,
        recruiter_id: Uuid,
        payload: CreateInvitationPayload,
    ) -> Result<InterviewInvitation> {
        let invitation = sqlx::query_as::<_, InterviewInvitation>(&format!(
            r#"
            INSERT INTO interview_invitations
                (candidate_profile_id, job_post_id, recruiter_id, interview_type,
                 proposed_slots, meeting_link, notes)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING {INVITATION_COLUMNS}
            "#,
        ))
        .bind(payload.candidate_profile_id)
        .bind(payload.job_post_id)
        .bind(recruiter_id)
        .bind(payload.interview_type)
        .bind(payload.proposed_slots)
        .bind(payload.meeting_link)
        .bind(payload.notes)
        .fetch_one(&self.pool)
        .await?;
        Ok(invitation)
    }

    pub async fn get_details(&self, id: Uuid) -> Result<InvitationDetails> {
        let mut details = sqlx::query_as::<_, InvitationDetails>(
            r#"
            SELECT
                i.id, i.candidate_profile_id, i.job_post_id, i.recruiter_id,
                i.interview_type, i.proposed_slots, i.meeting_link, i.notes,
                i.status, i.confirmed_at, i.created_at,
                j.title AS job_title, j.company,
                u.name AS recruiter_name,
                p.headline AS candidate_headline
            FROM interview_invitations i
            JOIN job_posts j ON j.id = i.job_post_id
            JOIN users u ON u.id = i.recruiter_id
            JOIN jobseeker_profiles p ON p.id = i.candidate_profile_id
            WHERE i.id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| Error::NotFound("Invitation not found".to_string()))?;

        details.duration_minutes = duration_for_type(&details.interview_type);
        Ok(details)
    }

    /// Confirms a pending invitation at the chosen instant, creating the
    /// descendant booking and marking the invitation confirmed in one
    /// transaction, so a lost race leaves neither an orphan booking nor a
    /// half-applied transition. Confirmed and declined invitations are
    /// immutable. `candidate_scope` restricts the operation to invitations
    /// whose profile the given user owns; `None` skips the check (admins).
    pub async fn confirm(
        &self,
        id: Uuid,
        candidate_scope: Option<Uuid>,
        scheduled_at: DateTime<Utc>,
        bookings: &BookingService,
    ) -> Result<(InterviewInvitation, Booking)> {
        let invitation = self.get_pending(id).await?;
        self.ensure_candidate_scope(&invitation, candidate_scope)
            .await?;
        let duration = duration_for_type(&invitation.interview_type);

        let mut tx = self.pool.begin().await?;
        let booking = bookings
            .create_in(
                &mut *tx,
                invitation.recruiter_id,
                invitation.candidate_profile_id,
                scheduled_at,
                duration,
            )
            .await?;
        let invitation = self
            .transition_in(&mut *tx, id, InvitationStatus::Confirmed, Some(scheduled_at))
            .await?;
        tx.commit().await?;
        Ok((invitation, booking))
    }

    pub async fn decline(
        &self,
        id: Uuid,
        candidate_scope: Option<Uuid>,
    ) -> Result<InterviewInvitation> {
        let invitation = self.get_pending(id).await?;
        self.ensure_candidate_scope(&invitation, candidate_scope)
            .await?;
        self.transition_in(&self.pool, id, InvitationStatus::Declined, None)
            .await
    }

    /// Expires pending invitations whose proposed slots have all passed.
    /// Returns the number of rows transitioned.
    pub async fn expire_stale(&self) -> Result<u64> {
        let result = sqlx::query(
            r#"
            UPDATE interview_invitations
            SET status = 'expired', updated_at = NOW()
            WHERE status = 'pending'
              AND proposed_slots <> '{}'
              AND (SELECT MAX(s) FROM unnest(proposed_slots) AS s) < NOW()
            "#,
        )
        .execute(&self.pool)
        .await?;
        Ok(result.rows_affected())
    }

    async fn get_pending(&self, id: Uuid) -> Result<InterviewInvitation> {
        let invitation = sqlx::query_as::<_, InterviewInvitation>(&format!(
            "SELECT {INVITATION_COLUMNS} FROM interview_invitations WHERE id = $1",
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| Error::NotFound("Invitation not found".to_string()))?;

        if invitation.status != InvitationStatus::Pending.as_str() {
            return Err(Error::BadRequest(
                "Invitation is no longer pending".to_string(),
            ));
        }
        Ok(invitation)
    }

    /// A caller acting for a candidate may only touch invitations addressed
    /// to a profile they own; anything else reads as not found (fail closed).
    async fn ensure_candidate_scope(
        &self,
        invitation: &InterviewInvitation,
        candidate_scope: Option<Uuid>,
    ) -> Result<()> {
        let Some(user_id) = candidate_scope else {
            return Ok(());
        };
        let owned: bool = sqlx::query_scalar(
            "SELECT EXISTS(SELECT 1 FROM jobseeker_profiles WHERE id = $1 AND user_id = $2)",
        )
        .bind(invitation.candidate_profile_id)
        .bind(user_id)
        .fetch_one(&self.pool)
        .await?;
        if !owned {
            return Err(Error::NotFound("Invitation not found".to_string()));
        }
        Ok(())
    }

    async fn transition_in<'e, E>(
        &self,
        executor: E,
        id: Uuid,
        status: InvitationStatus,
        confirmed_at: Option<DateTime<Utc>>,
    ) -> Result<InterviewInvitation>
    where
        E: sqlx::PgExecutor<'e>,
    {
        let invitation = sqlx::query_as::<_, InterviewInvitation>(&format!(
            r#"
            UPDATE interview_invitations
            SET status = $2, confirmed_at = COALESCE($3, confirmed_at), updated_at = NOW()
            WHERE id = $1 AND status = 'pending'
            RETURNING {INVITATION_COLUMNS}
            "#,
        ))
        .bind(id)
        .bind(status.as_str())
        .bind(confirmed_at)
        .fetch_optional(executor)
        .await?
        .ok_or_else(|| Error::BadRequest("Invitation is no longer pending".to_string()))?;
        Ok(invitation)
    }
}
