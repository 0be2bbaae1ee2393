// src/handlers/raw_materials.rs

use axum::{
    extract::{OriginalUri, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use rust_decimal::Decimal;
use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::error::{ApiError, AppError},
    config::AppState,
    handlers::{
        extract::{ApiJson, ApiPath},
        validation::{validate_not_blank, validate_stock_quantity},
    },
    middleware::i18n::Locale,
    models::raw_material::RawMaterial,
};

// ---
// Payloads
// ---
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateRawMaterialPayload {
    #[validate(
        required(code = "required"),
        custom(function = "validate_not_blank"),
        length(max = 64, code = "too_long")
    )]
    #[schema(example = "RM001")]
    pub code: Option<String>,

    #[validate(
        required(code = "required"),
        custom(function = "validate_not_blank"),
        length(max = 255, code = "too_long")
    )]
    #[schema(example = "Aço carbono")]
    pub name: Option<String>,

    // Saldo inicial; zero é permitido.
    #[validate(required(code = "required"), custom(function = "validate_stock_quantity"))]
    #[schema(example = 125.5)]
    pub stock_quantity: Option<Decimal>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateRawMaterialPayload {
    #[validate(
        required(code = "required"),
        custom(function = "validate_not_blank"),
        length(max = 255, code = "too_long")
    )]
    pub name: Option<String>,

    #[validate(required(code = "required"), custom(function = "validate_stock_quantity"))]
    #[schema(example = 80.25)]
    pub stock_quantity: Option<Decimal>,
}

// ---
// Handlers
// ---

// POST /raw-materials
#[utoipa::path(
    post,
    path = "/raw-materials",
    tag = "Raw Materials",
    request_body = CreateRawMaterialPayload,
    responses(
        (status = 201, description = "Matéria-prima cadastrada", body = RawMaterial),
        (status = 400, description = "Dados inválidos", body = ApiError),
        (status = 409, description = "Código já existe", body = ApiError)
    )
)]
pub async fn create_raw_material(
    State(app_state): State<AppState>,
    locale: Locale,
    OriginalUri(uri): OriginalUri,
    ApiJson(payload): ApiJson<CreateRawMaterialPayload>,
) -> Result<impl IntoResponse, ApiError> {

    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale, uri.path()))?;

    let material = app_state
        .raw_material_service
        .create(
            payload.code.as_deref().unwrap_or_default().trim(),
            payload.name.as_deref().unwrap_or_default().trim(),
            payload.stock_quantity.unwrap_or_default(),
        )
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, uri.path()))?;

    Ok((StatusCode::CREATED, Json(material)))
}

// GET /raw-materials
#[utoipa::path(
    get,
    path = "/raw-materials",
    tag = "Raw Materials",
    responses(
        (status = 200, description = "Todas as matérias-primas, por código", body = Vec<RawMaterial>)
    )
)]
pub async fn get_all_raw_materials(
    State(app_state): State<AppState>,
    locale: Locale,
    OriginalUri(uri): OriginalUri,
) -> Result<impl IntoResponse, ApiError> {

    let materials = app_state
        .raw_material_service
        .get_all()
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, uri.path()))?;

    Ok((StatusCode::OK, Json(materials)))
}

// GET /raw-materials/{id}
#[utoipa::path(
    get,
    path = "/raw-materials/{id}",
    tag = "Raw Materials",
    params(("id" = Uuid, Path, description = "ID da matéria-prima")),
    responses(
        (status = 200, description = "Matéria-prima encontrada", body = RawMaterial),
        (status = 404, description = "Matéria-prima não encontrada", body = ApiError)
    )
)]
pub async fn get_raw_material(
    State(app_state): State<AppState>,
    locale: Locale,
    OriginalUri(uri): OriginalUri,
    ApiPath(id): ApiPath<Uuid>,
) -> Result<impl IntoResponse, ApiError> {

    let material = app_state
        .raw_material_service
        .get_by_id(id)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, uri.path()))?;

    Ok((StatusCode::OK, Json(material)))
}

// PUT /raw-materials/{id}
#[utoipa::path(
    put,
    path = "/raw-materials/{id}",
    tag = "Raw Materials",
    params(("id" = Uuid, Path, description = "ID da matéria-prima")),
    request_body = UpdateRawMaterialPayload,
    responses(
        (status = 200, description = "Matéria-prima atualizada", body = RawMaterial),
        (status = 400, description = "Dados inválidos", body = ApiError),
        (status = 404, description = "Matéria-prima não encontrada", body = ApiError)
    )
)]
pub async fn update_raw_material(
    State(app_state): State<AppState>,
    locale: Locale,
    OriginalUri(uri): OriginalUri,
    ApiPath(id): ApiPath<Uuid>,
    ApiJson(payload): ApiJson<UpdateRawMaterialPayload>,
) -> Result<impl IntoResponse, ApiError> {

    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale, uri.path()))?;

    let material = app_state
        .raw_material_service
        .update(
            id,
            payload.name.as_deref().unwrap_or_default().trim(),
            payload.stock_quantity.unwrap_or_default(),
        )
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, uri.path()))?;

    Ok((StatusCode::OK, Json(material)))
}

// DELETE /raw-materials/{id}
#[utoipa::path(
    delete,
    path = "/raw-materials/{id}",
    tag = "Raw Materials",
    params(("id" = Uuid, Path, description = "ID da matéria-prima")),
    responses(
        (status = 204, description = "Matéria-prima removida"),
        (status = 404, description = "Matéria-prima não encontrada", body = ApiError),
        (status = 409, description = "Ainda usada em alguma ficha técnica", body = ApiError)
    )
)]
pub async fn delete_raw_material(
    State(app_state): State<AppState>,
    locale: Locale,
    OriginalUri(uri): OriginalUri,
    ApiPath(id): ApiPath<Uuid>,
) -> Result<impl IntoResponse, ApiError> {

    app_state
        .raw_material_service
        .delete(id)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, uri.path()))?;

    Ok(StatusCode::NO_CONTENT)
}
