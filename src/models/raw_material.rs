// src/models/raw_material.rs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

// --- Matéria-prima ---
// O saldo é fracionado (kg, L, m), por isso NUMERIC(18,3) no banco.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RawMaterial {
    pub id: Uuid,

    #[schema(example = "RM001")]
    pub code: String,

    #[schema(example = "Aço carbono")]
    pub name: String,

    #[schema(example = 125.5)]
    pub stock_quantity: Decimal,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
