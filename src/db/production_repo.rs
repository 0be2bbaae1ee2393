// src/db/production_repo.rs

use sqlx::{Executor, Postgres};

use crate::{
    common::error::AppError,
    models::production::{BomRequirement, ProductCandidate, RawMaterialStock},
};

// Leituras usadas para montar o snapshot da sugestão de produção.
// Devem rodar na MESMA transação (ver `db_utils::begin_snapshot`).
#[derive(Clone, Default)]
pub struct ProductionRepository;

impl ProductionRepository {
    pub fn new() -> Self {
        Self
    }

    pub async fn get_raw_material_stock<'e, E>(
        &self,
        executor: E,
    ) -> Result<Vec<RawMaterialStock>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let stock = sqlx::query_as::<_, RawMaterialStock>(
            "SELECT id AS raw_material_id, stock_quantity FROM raw_materials",
        )
            .fetch_all(executor)
            .await?;
        Ok(stock)
    }

    /// Do mais caro para o mais barato; empates pela ordem de cadastro.
    pub async fn get_products_by_price_desc<'e, E>(
        &self,
        executor: E,
    ) -> Result<Vec<ProductCandidate>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let products = sqlx::query_as::<_, ProductCandidate>(
            r#"
            SELECT id AS product_id, code, name, price
            FROM products
            ORDER BY price DESC, created_at ASC, id ASC
            "#,
        )
            .fetch_all(executor)
            .await?;
        Ok(products)
    }

    /// Todas as fichas técnicas numa única consulta (sem N+1 por produto).
    pub async fn get_all_bom_requirements<'e, E>(
        &self,
        executor: E,
    ) -> Result<Vec<BomRequirement>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let lines = sqlx::query_as::<_, BomRequirement>(
            r#"
            SELECT product_id, raw_material_id, required_quantity
            FROM product_materials
            ORDER BY product_id ASC, created_at ASC, id ASC
            "#,
        )
            .fetch_all(executor)
            .await?;
        Ok(lines)
    }
}
