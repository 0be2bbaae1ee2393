// src/models/bom.rs

use rust_decimal::Decimal;
use serde::Serialize;
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

// --- Linha da ficha técnica (BOM) ---
// Quanto de uma matéria-prima é consumido para fabricar UMA unidade do produto.
// Vem de um JOIN com raw_materials para já devolver código e nome.
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProductMaterial {
    pub id: Uuid,
    pub product_id: Uuid,
    pub raw_material_id: Uuid,

    #[schema(example = "RM001")]
    pub raw_material_code: String,

    #[schema(example = "Aço carbono")]
    pub raw_material_name: String,

    #[schema(example = 2.5)]
    pub required_quantity: Decimal,
}
