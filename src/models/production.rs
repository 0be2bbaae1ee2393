// src/models/production.rs

use rust_decimal::Decimal;
use serde::Serialize;
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

// ---
// Entradas do motor de alocação (snapshot somente leitura)
// ---

/// Saldo de uma matéria-prima no momento da leitura.
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct RawMaterialStock {
    pub raw_material_id: Uuid,
    pub stock_quantity: Decimal,
}

/// Produto candidato à produção, já na ordem de prioridade do catálogo.
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct ProductCandidate {
    pub product_id: Uuid,
    pub code: String,
    pub name: String,
    pub price: Decimal,
}

/// Consumo por unidade de uma matéria-prima para um produto.
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct BomRequirement {
    pub product_id: Uuid,
    pub raw_material_id: Uuid,
    pub required_quantity: Decimal,
}

// ---
// Saída (GET /production/suggestions)
// ---

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SuggestionItem {
    pub product_id: Uuid,

    #[schema(example = "P001")]
    pub product_code: String,

    #[schema(example = "Cadeira de escritório")]
    pub product_name: String,

    #[schema(example = 1000.0)]
    pub unit_price: Decimal,

    // Sempre >= 1: produtos sem produção possível não entram na lista.
    #[schema(example = 5)]
    pub producible_quantity: i64,

    #[schema(example = 5000.0)]
    pub total_value: Decimal,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SuggestionResult {
    pub items: Vec<SuggestionItem>,

    #[schema(example = 5000.0)]
    pub total_value: Decimal,
}
