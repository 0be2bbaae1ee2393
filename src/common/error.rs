// src/common/error.rs

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use chrono::{DateTime, Utc};
use serde::Serialize;
use thiserror::Error;
use utoipa::ToSchema;

use crate::common::i18n::translate;
use crate::middleware::i18n::Locale;

// Erros de domínio e de infraestrutura. Os handlers convertem em `ApiError`
// (corpo JSON traduzido) via `to_api_error`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Erro de validação")]
    ValidationError(#[from] validator::ValidationErrors),

    // Corpo JSON ilegível ou parâmetro de rota inválido (ex: UUID malformado)
    #[error("Requisição malformada: {0}")]
    InvalidRequest(String),

    #[error("Produto não encontrado")]
    ProductNotFound,

    #[error("Matéria-prima não encontrada")]
    RawMaterialNotFound,

    #[error("Item da ficha técnica não encontrado")]
    ProductMaterialNotFound,

    #[error("Código de produto já existe: {0}")]
    ProductCodeAlreadyExists(String),

    #[error("Código de matéria-prima já existe: {0}")]
    RawMaterialCodeAlreadyExists(String),

    #[error("Matéria-prima já vinculada ao produto")]
    MaterialAlreadyInBom,

    // CHECK ou NUMERIC(p, s) recusados pelo banco depois de passar pela validação
    #[error("Valor fora dos limites da coluna: {0}")]
    ValueOutOfRange(String),

    #[error("Matéria-prima em uso por uma ficha técnica")]
    RawMaterialInUse,

    #[error("Erro de banco de dados: {0}")]
    DatabaseError(#[from] sqlx::Error),

    #[error("Erro interno do servidor: {0}")]
    InternalServerError(#[from] anyhow::Error),
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::ValidationError(_)
            | AppError::InvalidRequest(_)
            | AppError::ValueOutOfRange(_) => StatusCode::BAD_REQUEST,
            AppError::ProductNotFound
            | AppError::RawMaterialNotFound
            | AppError::ProductMaterialNotFound => StatusCode::NOT_FOUND,
            AppError::ProductCodeAlreadyExists(_)
            | AppError::RawMaterialCodeAlreadyExists(_)
            | AppError::MaterialAlreadyInBom
            | AppError::RawMaterialInUse => StatusCode::CONFLICT,
            AppError::DatabaseError(_) | AppError::InternalServerError(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Chave do catálogo de mensagens (`common::i18n`).
    fn message_key(&self) -> &'static str {
        match self {
            AppError::ValidationError(_) => "validation.failed",
            AppError::InvalidRequest(_) => "request.invalid",
            AppError::ValueOutOfRange(_) => "value.out_of_range",
            AppError::ProductNotFound => "product.not_found",
            AppError::RawMaterialNotFound => "raw_material.not_found",
            AppError::ProductMaterialNotFound => "product_material.not_found",
            AppError::ProductCodeAlreadyExists(_) => "product.code_exists",
            AppError::RawMaterialCodeAlreadyExists(_) => "raw_material.code_exists",
            AppError::MaterialAlreadyInBom => "product_material.exists",
            AppError::RawMaterialInUse => "raw_material.in_use",
            AppError::DatabaseError(_) | AppError::InternalServerError(_) => "internal",
        }
    }

    pub fn to_api_error(&self, locale: &Locale, path: &str) -> ApiError {
        let status = self.status_code();

        // O detalhe de erros internos fica só no log.
        if status.is_server_error() {
            tracing::error!("Erro Interno do Servidor em {}: {}", path, self);
        }

        let mut message = translate(&locale.0, self.message_key())
            .unwrap_or(self.message_key())
            .to_string();

        if let AppError::InvalidRequest(detail) = self {
            message = format!("{message} {detail}");
        }

        let field_errors = match self {
            AppError::ValidationError(errors) => Some(field_error_items(errors, locale)),
            _ => None,
        };

        ApiError {
            timestamp: Utc::now(),
            status: status.as_u16(),
            error: status.canonical_reason().unwrap_or_default().to_string(),
            message,
            path: path.to_string(),
            field_errors,
        }
    }
}

// ---
// Corpo de erro devolvido pela API
// ---
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ApiError {
    pub timestamp: DateTime<Utc>,

    #[schema(example = 404)]
    pub status: u16,

    #[schema(example = "Not Found")]
    pub error: String,

    #[schema(example = "Product not found.")]
    pub message: String,

    #[schema(example = "/products/6f1c8f55-2b7e-4a43-9b9e-1c0f0b7e3a10")]
    pub path: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub field_errors: Option<Vec<FieldErrorItem>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FieldErrorItem {
    #[schema(example = "stockQuantity")]
    pub field: String,

    #[schema(example = "must be greater than or equal to 0")]
    pub message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status =
            StatusCode::from_u16(self.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (status, Json(self)).into_response()
    }
}

fn field_error_items(errors: &validator::ValidationErrors, locale: &Locale) -> Vec<FieldErrorItem> {
    let mut items: Vec<FieldErrorItem> = errors
        .field_errors()
        .into_iter()
        .flat_map(|(field, field_errors)| {
            let field = to_camel_case(&field);
            field_errors.iter().map(move |e| FieldErrorItem {
                field: field.clone(),
                message: translate(&locale.0, &e.code)
                    .map(str::to_string)
                    .or_else(|| e.message.as_ref().map(|m| m.to_string()))
                    .unwrap_or_else(|| e.code.to_string()),
            })
        })
        .collect();

    // HashMap não tem ordem; ordenamos para a resposta ser estável.
    items.sort_by(|a, b| a.field.cmp(&b.field).then_with(|| a.message.cmp(&b.message)));
    items
}

// "stock_quantity" -> "stockQuantity", para casar com o JSON da API.
fn to_camel_case(field: &str) -> String {
    let mut out = String::with_capacity(field.len());
    let mut upper_next = false;
    for c in field.chars() {
        if c == '_' {
            upper_next = true;
        } else if upper_next {
            out.extend(c.to_uppercase());
            upper_next = false;
        } else {
            out.push(c);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::{ValidationError, ValidationErrors};

    fn english() -> Locale {
        Locale("en".into())
    }

    #[test]
    fn maps_domain_errors_to_status_codes() {
        assert_eq!(AppError::ProductNotFound.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(AppError::RawMaterialNotFound.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(AppError::ProductMaterialNotFound.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(
            AppError::ProductCodeAlreadyExists("P001".into()).status_code(),
            StatusCode::CONFLICT
        );
        assert_eq!(AppError::MaterialAlreadyInBom.status_code(), StatusCode::CONFLICT);
        assert_eq!(AppError::RawMaterialInUse.status_code(), StatusCode::CONFLICT);
        assert_eq!(
            AppError::DatabaseError(sqlx::Error::RowNotFound).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn not_found_body_carries_path_and_reason() {
        let body = AppError::ProductNotFound.to_api_error(&english(), "/products/1");

        assert_eq!(body.status, 404);
        assert_eq!(body.error, "Not Found");
        assert_eq!(body.message, "Product not found.");
        assert_eq!(body.path, "/products/1");
        assert!(body.field_errors.is_none());
    }

    #[test]
    fn messages_follow_locale() {
        let body = AppError::RawMaterialCodeAlreadyExists("RM001".into())
            .to_api_error(&Locale("pt".into()), "/raw-materials");

        assert_eq!(body.status, 409);
        assert_eq!(body.message, "Já existe uma matéria-prima com este código.");
    }

    #[test]
    fn internal_errors_hide_details() {
        let err = AppError::InternalServerError(anyhow::anyhow!("connection reset by peer"));
        let body = err.to_api_error(&english(), "/production/suggestions");

        assert_eq!(body.status, 500);
        assert_eq!(body.message, "Unexpected error.");
    }

    #[test]
    fn validation_errors_list_fields_in_camel_case() {
        let mut errors = ValidationErrors::new();
        errors.add("stock_quantity", ValidationError::new("not_negative"));
        errors.add("code", ValidationError::new("required"));

        let body = AppError::ValidationError(errors).to_api_error(&english(), "/raw-materials");

        assert_eq!(body.status, 400);
        assert_eq!(body.message, "Validation failed.");
        assert_eq!(
            body.field_errors.unwrap(),
            vec![
                FieldErrorItem { field: "code".into(), message: "must not be blank".into() },
                FieldErrorItem {
                    field: "stockQuantity".into(),
                    message: "must be greater than or equal to 0".into()
                },
            ]
        );
    }

    #[test]
    fn invalid_request_keeps_detail() {
        let body = AppError::InvalidRequest("Invalid URL: UUID parsing failed".into())
            .to_api_error(&english(), "/products/abc");

        assert_eq!(body.status, 400);
        assert_eq!(body.message, "Malformed request. Invalid URL: UUID parsing failed");
    }

    #[test]
    fn out_of_range_values_are_client_errors() {
        let err = AppError::ValueOutOfRange("products_price_positive".into());
        let body = err.to_api_error(&english(), "/products");

        assert_eq!(body.status, 400);
        assert_eq!(body.message, "One or more values are outside the accepted limits.");
    }

    #[test]
    fn camel_case_conversion() {
        assert_eq!(to_camel_case("raw_material_id"), "rawMaterialId");
        assert_eq!(to_camel_case("name"), "name");
    }

    #[test]
    fn serialized_body_omits_empty_field_errors() {
        let body = AppError::ProductNotFound.to_api_error(&english(), "/products/1");
        let json = serde_json::to_value(&body).unwrap();

        assert_eq!(json["status"], 404);
        assert!(json.get("fieldErrors").is_none());
        assert!(json.get("timestamp").is_some());
    }
}
