// src/handlers/products.rs

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
        validation::{validate_not_blank, validate_price},
    },
    middleware::i18n::Locale,
    models::product::Product,
};

// ---
// Payloads
// ---
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateProductPayload {
    #[validate(
        required(code = "required"),
        custom(function = "validate_not_blank"),
        length(max = 64, code = "too_long")
    )]
    #[schema(example = "P001")]
    pub code: Option<String>,

    #[validate(
        required(code = "required"),
        custom(function = "validate_not_blank"),
        length(max = 255, code = "too_long")
    )]
    #[schema(example = "Cadeira de escritório")]
    pub name: Option<String>,

    // NUMERIC(12, 2): no máximo duas casas decimais
    #[validate(required(code = "required"), custom(function = "validate_price"))]
    #[schema(example = 349.90)]
    pub price: Option<Decimal>,
}

// O código não muda depois de criado.
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProductPayload {
    #[validate(
        required(code = "required"),
        custom(function = "validate_not_blank"),
        length(max = 255, code = "too_long")
    )]
    pub name: Option<String>,

    #[validate(required(code = "required"), custom(function = "validate_price"))]
    #[schema(example = 329.90)]
    pub price: Option<Decimal>,
}

// ---
// Handlers
// ---

// POST /products
#[utoipa::path(
    post,
    path = "/products",
    tag = "Products",
    request_body = CreateProductPayload,
    responses(
        (status = 201, description = "Produto cadastrado", body = Product),
        (status = 400, description = "Dados inválidos", body = ApiError),
        (status = 409, description = "Código já existe", body = ApiError)
    )
)]
pub async fn create_product(
    State(app_state): State<AppState>,
    locale: Locale,
    OriginalUri(uri): OriginalUri,
    ApiJson(payload): ApiJson<CreateProductPayload>,
) -> Result<impl IntoResponse, ApiError> {

    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale, uri.path()))?;

    let product = app_state
        .product_service
        .create(
            payload.code.as_deref().unwrap_or_default().trim(),
            payload.name.as_deref().unwrap_or_default().trim(),
            payload.price.unwrap_or_default(),
        )
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, uri.path()))?;

    Ok((StatusCode::CREATED, Json(product)))
}

// GET /products
#[utoipa::path(
    get,
    path = "/products",
    tag = "Products",
    responses(
        (status = 200, description = "Todos os produtos, por código", body = Vec<Product>)
    )
)]
pub async fn get_all_products(
    State(app_state): State<AppState>,
    locale: Locale,
    OriginalUri(uri): OriginalUri,
) -> Result<impl IntoResponse, ApiError> {

    let products = app_state
        .product_service
        .get_all()
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, uri.path()))?;

    Ok((StatusCode::OK, Json(products)))
}

// GET /products/{id}
#[utoipa::path(
    get,
    path = "/products/{id}",
    tag = "Products",
    params(("id" = Uuid, Path, description = "ID do produto")),
    responses(
        (status = 200, description = "Produto encontrado", body = Product),
        (status = 404, description = "Produto não encontrado", body = ApiError)
    )
)]
pub async fn get_product(
    State(app_state): State<AppState>,
    locale: Locale,
    OriginalUri(uri): OriginalUri,
    ApiPath(id): ApiPath<Uuid>,
) -> Result<impl IntoResponse, ApiError> {

    let product = app_state
        .product_service
        .get_by_id(id)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, uri.path()))?;

    Ok((StatusCode::OK, Json(product)))
}

// PUT /products/{id}
#[utoipa::path(
    put,
    path = "/products/{id}",
    tag = "Products",
    params(("id" = Uuid, Path, description = "ID do produto")),
    request_body = UpdateProductPayload,
    responses(
        (status = 200, description = "Produto atualizado", body = Product),
        (status = 400, description = "Dados inválidos", body = ApiError),
        (status = 404, description = "Produto não encontrado", body = ApiError)
    )
)]
pub async fn update_product(
    State(app_state): State<AppState>,
    locale: Locale,
    OriginalUri(uri): OriginalUri,
    ApiPath(id): ApiPath<Uuid>,
    ApiJson(payload): ApiJson<UpdateProductPayload>,
) -> Result<impl IntoResponse, ApiError> {

    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale, uri.path()))?;

    let product = app_state
        .product_service
        .update(
            id,
            payload.name.as_deref().unwrap_or_default().trim(),
            payload.price.unwrap_or_default(),
        )
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, uri.path()))?;

    Ok((StatusCode::OK, Json(product)))
}

// DELETE /products/{id}
#[utoipa::path(
    delete,
    path = "/products/{id}",
    tag = "Products",
    params(("id" = Uuid, Path, description = "ID do produto")),
    responses(
        (status = 204, description = "Produto removido junto com sua ficha técnica"),
        (status = 404, description = "Produto não encontrado", body = ApiError)
    )
)]
pub async fn delete_product(
    State(app_state): State<AppState>,
    locale: Locale,
    OriginalUri(uri): OriginalUri,
    ApiPath(id): ApiPath<Uuid>,
) -> Result<impl IntoResponse, ApiError> {

    app_state
        .product_service
        .delete(id)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, uri.path()))?;

    Ok(StatusCode::NO_CONTENT)
}
