// src/handlers/production.rs

use axum::{
    extract::{OriginalUri, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};

use crate::{
    common::error::ApiError,
    config::AppState,
    middleware::i18n::Locale,
    models::production::SuggestionResult,
};

// GET /production/suggestions
#[utoipa::path(
    get,
    path = "/production/suggestions",
    tag = "Production",
    responses(
        (status = 200, description = "O que produzir com o estoque atual, do produto mais caro ao mais barato", body = SuggestionResult)
    )
)]
pub async fn get_suggestions(
    State(app_state): State<AppState>,
    locale: Locale,
    OriginalUri(uri): OriginalUri,
) -> Result<impl IntoResponse, ApiError> {

    let suggestion = app_state
        .production_service
        .suggest()
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, uri.path()))?;

    Ok((StatusCode::OK, Json(suggestion)))
}
