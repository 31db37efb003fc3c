use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Closed set of roles. Role strings coming from tokens or request bodies
/// are resolved to this enum once at the authorization boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    JobSeeker,
    Recruiter,
    Admin,
}

impl Role {
    pub fn parse(raw: &str) -> Option<Role> {
        match raw.to_ascii_lowercase().as_str() {
            "jobseeker" | "job_seeker" => Some(Role::JobSeeker),
            "recruiter" => Some(Role::Recruiter),
            "admin" => Some(Role::Admin),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::JobSeeker => "jobseeker",
            Role::Recruiter => "recruiter",
            Role::Admin => "admin",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: Uuid,
    pub email: String,
    pub name: String,
    pub role: String,
    pub is_active: bool,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct JobseekerProfile {
    pub id: Uuid,
    pub user_id: Uuid,
    pub headline: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}
