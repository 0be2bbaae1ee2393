// src/handlers/product_materials.rs

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
        validation::validate_required_quantity,
    },
    middleware::i18n::Locale,
    models::bom::ProductMaterial,
};

// ---
// Payloads
// ---
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AddProductMaterialPayload {
    #[validate(required(code = "required"))]
    pub raw_material_id: Option<Uuid>,

    // Consumo por UMA unidade do produto, NUMERIC(18, 3)
    #[validate(required(code = "required"), custom(function = "validate_required_quantity"))]
    #[schema(example = 2.5)]
    pub required_quantity: Option<Decimal>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProductMaterialPayload {
    #[validate(required(code = "required"), custom(function = "validate_required_quantity"))]
    #[schema(example = 3.0)]
    pub required_quantity: Option<Decimal>,
}

// ---
// Handlers
// ---

// POST /products/{product_id}/materials
#[utoipa::path(
    post,
    path = "/products/{product_id}/materials",
    tag = "Bill of Materials",
    params(("product_id" = Uuid, Path, description = "ID do produto")),
    request_body = AddProductMaterialPayload,
    responses(
        (status = 201, description = "Matéria-prima adicionada à ficha técnica", body = ProductMaterial),
        (status = 400, description = "Dados inválidos", body = ApiError),
        (status = 404, description = "Produto ou matéria-prima não encontrados", body = ApiError),
        (status = 409, description = "Matéria-prima já faz parte do produto", body = ApiError)
    )
)]
pub async fn add_product_material(
    State(app_state): State<AppState>,
    locale: Locale,
    OriginalUri(uri): OriginalUri,
    ApiPath(product_id): ApiPath<Uuid>,
    ApiJson(payload): ApiJson<AddProductMaterialPayload>,
) -> Result<impl IntoResponse, ApiError> {

    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale, uri.path()))?;

    let line = app_state
        .product_material_service
        .add_to_product(
            product_id,
            payload.raw_material_id.unwrap_or_default(),
            payload.required_quantity.unwrap_or_default(),
        )
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, uri.path()))?;

    Ok((StatusCode::CREATED, Json(line)))
}

// GET /products/{product_id}/materials
#[utoipa::path(
    get,
    path = "/products/{product_id}/materials",
    tag = "Bill of Materials",
    params(("product_id" = Uuid, Path, description = "ID do produto")),
    responses(
        (status = 200, description = "Ficha técnica do produto", body = Vec<ProductMaterial>),
        (status = 404, description = "Produto não encontrado", body = ApiError)
    )
)]
pub async fn list_product_materials(
    State(app_state): State<AppState>,
    locale: Locale,
    OriginalUri(uri): OriginalUri,
    ApiPath(product_id): ApiPath<Uuid>,
) -> Result<impl IntoResponse, ApiError> {

    let lines = app_state
        .product_material_service
        .list_by_product(product_id)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, uri.path()))?;

    Ok((StatusCode::OK, Json(lines)))
}

// PUT /products/{product_id}/materials/{product_material_id}
#[utoipa::path(
    put,
    path = "/products/{product_id}/materials/{product_material_id}",
    tag = "Bill of Materials",
    params(
        ("product_id" = Uuid, Path, description = "ID do produto"),
        ("product_material_id" = Uuid, Path, description = "ID da linha da ficha técnica")
    ),
    request_body = UpdateProductMaterialPayload,
    responses(
        (status = 200, description = "Consumo atualizado", body = ProductMaterial),
        (status = 400, description = "Dados inválidos", body = ApiError),
        (status = 404, description = "Linha não encontrada neste produto", body = ApiError)
    )
)]
pub async fn update_product_material(
    State(app_state): State<AppState>,
    locale: Locale,
    OriginalUri(uri): OriginalUri,
    ApiPath((product_id, product_material_id)): ApiPath<(Uuid, Uuid)>,
    ApiJson(payload): ApiJson<UpdateProductMaterialPayload>,
) -> Result<impl IntoResponse, ApiError> {

    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale, uri.path()))?;

    let line = app_state
        .product_material_service
        .update_required_quantity(
            product_id,
            product_material_id,
            payload.required_quantity.unwrap_or_default(),
        )
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, uri.path()))?;

    Ok((StatusCode::OK, Json(line)))
}

// DELETE /products/{product_id}/materials/{product_material_id}
#[utoipa::path(
    delete,
    path = "/products/{product_id}/materials/{product_material_id}",
    tag = "Bill of Materials",
    params(
        ("product_id" = Uuid, Path, description = "ID do produto"),
        ("product_material_id" = Uuid, Path, description = "ID da linha da ficha técnica")
    ),
    responses(
        (status = 204, description = "Linha removida"),
        (status = 404, description = "Linha não encontrada neste produto", body = ApiError)
    )
)]
pub async fn remove_product_material(
    State(app_state): State<AppState>,
    locale: Locale,
    OriginalUri(uri): OriginalUri,
    ApiPath((product_id, product_material_id)): ApiPath<(Uuid, Uuid)>,
) -> Result<impl IntoResponse, ApiError> {

    app_state
        .product_material_service
        .remove_from_product(product_id, product_material_id)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, uri.path()))?;

    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn raw_material_and_quantity_are_required() {
        let payload: AddProductMaterialPayload = serde_json::from_str("{}").unwrap();

        let errors = payload.validate().unwrap_err();
        let fields = errors.field_errors();
        assert_eq!(fields["raw_material_id"][0].code, "required");
        assert_eq!(fields["required_quantity"][0].code, "required");
    }

    #[test]
    fn zero_requirement_is_rejected_on_write() {
        let payload = UpdateProductMaterialPayload { required_quantity: Some(Decimal::ZERO) };

        let errors = payload.validate().unwrap_err();
        assert_eq!(errors.field_errors()["required_quantity"][0].code, "positive");
    }

    #[test]
    fn fractional_requirement_is_accepted() {
        let payload: AddProductMaterialPayload = serde_json::from_str(
            r#"{ "rawMaterialId": "6f1c8f55-2b7e-4a43-9b9e-1c0f0b7e3a10", "requiredQuantity": 0.125 }"#,
        )
        .unwrap();

        assert!(payload.validate().is_ok());
    }

    #[test]
    fn requirement_that_rounds_to_zero_is_rejected() {
        let payload: UpdateProductMaterialPayload =
            serde_json::from_str(r#"{ "requiredQuantity": 0.0004 }"#).unwrap();

        let errors = payload.validate().unwrap_err();
        assert_eq!(errors.field_errors()["required_quantity"][0].code, "too_many_decimals");
    }
}
