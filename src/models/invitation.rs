use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

pub const DEFAULT_INTERVIEW_DURATION_MINUTES: i32 = 30;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InterviewType {
    PhoneScreen,
    Technical,
    Behavioral,
    FinalRound,
    HrRound,
    TeamMeet,
}

impl InterviewType {
    pub fn parse(raw: &str) -> Option<InterviewType> {
        match raw {
            "phone_screen" => Some(InterviewType::PhoneScreen),
            "technical" => Some(InterviewType::Technical),
            "behavioral" => Some(InterviewType::Behavioral),
            "final_round" => Some(InterviewType::FinalRound),
            "hr_round" => Some(InterviewType::HrRound),
            "team_meet" => Some(InterviewType::TeamMeet),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            InterviewType::PhoneScreen => "phone_screen",
            InterviewType::Technical => "technical",
            InterviewType::Behavioral => "behavioral",
            InterviewType::FinalRound => "final_round",
            InterviewType::HrRound => "hr_round",
            InterviewType::TeamMeet => "team_meet",
        }
    }

    pub fn default_duration_minutes(&self) -> i32 {
        match self {
            InterviewType::PhoneScreen => 30,
            InterviewType::Technical => 60,
            InterviewType::Behavioral => 45,
            InterviewType::FinalRound => 90,
            InterviewType::HrRound => 30,
            InterviewType::TeamMeet => 45,
        }
    }
}

/// Duration for a raw interview-type string; unrecognized types fall back
/// to the 30-minute default.
pub fn duration_for_type(raw: &str) -> i32 {
    InterviewType::parse(raw)
        .map(|t| t.default_duration_minutes())
        .unwrap_or(DEFAULT_INTERVIEW_DURATION_MINUTES)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InvitationStatus {
    Pending,
    Confirmed,
    Declined,
    Expired,
}

impl InvitationStatus {
    pub fn parse(raw: &str) -> Option<InvitationStatus> {
        match raw {
            "pending" => Some(InvitationStatus::Pending),
            "confirmed" => Some(InvitationStatus::Confirmed),
            "declined" => Some(InvitationStatus::Declined),
            "expired" => Some(InvitationStatus::Expired),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            InvitationStatus::Pending => "pending",
            InvitationStatus::Confirmed => "confirmed",
            InvitationStatus::Declined => "declined",
            InvitationStatus::Expired => "expired",
        }
    }

    pub fn is_terminal(&self) -> bool {
        !matches!(self, InvitationStatus::Pending)
    }
}

/// A recruiter-proposed set of candidate time options awaiting confirmation.
/// Pre-commitment counterpart of a Booking: exactly zero or one booking
/// descends from a confirmed invitation.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct InterviewInvitation {
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
    pub updated_at: Option<DateTime<Utc>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_types_have_fixed_durations() {
        assert_eq!(duration_for_type("phone_screen"), 30);
        assert_eq!(duration_for_type("technical"), 60);
        assert_eq!(duration_for_type("behavioral"), 45);
        assert_eq!(duration_for_type("final_round"), 90);
        assert_eq!(duration_for_type("hr_round"), 30);
        assert_eq!(duration_for_type("team_meet"), 45);
    }

    #[test]
    fn unknown_type_falls_back_to_default() {
        assert_eq!(duration_for_type("pair_programming"), 30);
        assert_eq!(duration_for_type(""), 30);
    }

    #[test]
    fn pending_is_the_only_non_terminal_status() {
        assert!(!InvitationStatus::Pending.is_terminal());
        assert!(InvitationStatus::Confirmed.is_terminal());
        assert!(InvitationStatus::Declined.is_terminal());
        assert!(InvitationStatus::Expired.is_terminal());
    }
}
