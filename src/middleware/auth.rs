use axum::{
    extract::Request,
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Json, Response},
};
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use serde::{Deserialize, Serialize};
use serde_json::json;
use uuid::Uuid;

use crate::models::user::Role;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub exp: usize,
    pub role: Option<String>,
}

/// Identity resolved once at the boundary: subject parsed to a Uuid and the
/// role string mapped into the closed Role set. Handlers read this from
/// request extensions instead of re-interpreting raw claims.
#[derive(Debug, Clone, Copy)]
pub struct AuthUser {
    pub id: Uuid,
    pub role: Role,
}

impl AuthUser {
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}

fn unauthorized(code: &str) -> Response {
    (StatusCode::UNAUTHORIZED, Json(json!({"error": code}))).into_response()
}

pub async fn require_auth(mut req: Request, next: Next) -> Response {
    let Some(auth_header) = req.headers().get(axum::http::header::AUTHORIZATION) else {
        return unauthorized("missing_authorization");
    };
    let Ok(auth_str) = auth_header.to_str() else {
        return unauthorized("bad_authorization");
    };
    let Some(token) = auth_str.strip_prefix("Bearer ") else {
        return unauthorized("unsupported_scheme");
    };

    let config = crate::config::get_config();
    let mut validation = Validation::new(Algorithm::HS256);
    validation.validate_exp = true;
    let data = match decode::<Claims>(
        token,
        &DecodingKey::from_secret(config.jwt_secret.as_bytes()),
        &validation,
    ) {
        Ok(data) => data,
        Err(_) => return unauthorized("invalid_token"),
    };

    let Ok(user_id) = Uuid::parse_str(&data.claims.sub) else {
        return unauthorized("invalid_subject");
    };
    let Some(role) = data.claims.role.as_deref().and_then(Role::parse) else {
        return unauthorized("unknown_role");
    };

    req.extensions_mut().insert(AuthUser { id: user_id, role });
    next.run(req).await
}
