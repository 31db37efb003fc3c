use axum::response::{IntoResponse, Json};

use crate::{error::Result, services::reference_service};

#[utoipa::path(
    get,
    path = "/api/reference/countries",
    responses(
        (status = 200, description = "Country reference list, cached for the process lifetime")
    )
)]
#[axum::debug_handler]
pub async fn list_countries() -> Result<impl IntoResponse> {
    let countries = reference_service::countries()?;
    Ok(Json((*countries).clone()))
}
