// src/db/product_material_repo.rs

use rust_decimal::Decimal;
use sqlx::{Executor, Postgres};
use uuid::Uuid;

use crate::{
    common::{
        db_utils::{constraint_violation, write_error, ConstraintViolation},
        error::AppError,
    },
    models::bom::ProductMaterial,
};

// Todas as leituras devolvem a linha já "enriquecida" com código e nome da
// matéria-prima, por isso as escritas usam CTE + JOIN.
const SELECT_COLUMNS: &str = r#"
    pm.id,
    pm.product_id,
    pm.raw_material_id,
    rm.code AS raw_material_code,
    rm.name AS raw_material_name,
    pm.required_quantity
"#;

#[derive(Clone, Default)]
pub struct ProductMaterialRepository;

impl ProductMaterialRepository {
    pub fn new() -> Self {
        Self
    }

    pub async fn list_by_product<'e, E>(
        &self,
        executor: E,
        product_id: Uuid,
    ) -> Result<Vec<ProductMaterial>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let sql = format!(
            r#"
            SELECT {SELECT_COLUMNS}
            FROM product_materials pm
            JOIN raw_materials rm ON rm.id = pm.raw_material_id
            WHERE pm.product_id = $1
            ORDER BY rm.code ASC
            "#
        );

        let lines = sqlx::query_as::<_, ProductMaterial>(&sql)
            .bind(product_id)
            .fetch_all(executor)
            .await?;
        Ok(lines)
    }

    pub async fn create<'e, E>(
        &self,
        executor: E,
        product_id: Uuid,
        raw_material_id: Uuid,
        required_quantity: Decimal,
    ) -> Result<ProductMaterial, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let sql = format!(
            r#"
            WITH pm AS (
                INSERT INTO product_materials (product_id, raw_material_id, required_quantity)
                VALUES ($1, $2, $3)
                RETURNING *
            )
            SELECT {SELECT_COLUMNS}
            FROM pm
            JOIN raw_materials rm ON rm.id = pm.raw_material_id
            "#
        );

        sqlx::query_as::<_, ProductMaterial>(&sql)
            .bind(product_id)
            .bind(raw_material_id)
            .bind(required_quantity)
            .fetch_one(executor)
            .await
            .map_err(|e| match constraint_violation(&e) {
                Some(ConstraintViolation::Unique(_)) => AppError::MaterialAlreadyInBom,
                Some(ConstraintViolation::ForeignKey(constraint))
                    if constraint.contains("raw_material") =>
                {
                    AppError::RawMaterialNotFound
                }
                Some(ConstraintViolation::ForeignKey(_)) => AppError::ProductNotFound,
                _ => write_error(e),
            })
    }

    /// Atualiza a quantidade de uma linha que PERTENCE ao produto informado.
    pub async fn update_required_quantity<'e, E>(
        &self,
        executor: E,
        product_id: Uuid,
        product_material_id: Uuid,
        required_quantity: Decimal,
    ) -> Result<Option<ProductMaterial>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let sql = format!(
            r#"
            WITH pm AS (
                UPDATE product_materials
                SET required_quantity = $3, updated_at = NOW()
                WHERE id = $2 AND product_id = $1
                RETURNING *
            )
            SELECT {SELECT_COLUMNS}
            FROM pm
            JOIN raw_materials rm ON rm.id = pm.raw_material_id
            "#
        );

        let line = sqlx::query_as::<_, ProductMaterial>(&sql)
            .bind(product_id)
            .bind(product_material_id)
            .bind(required_quantity)
            .fetch_optional(executor)
            .await
            .map_err(write_error)?;
        Ok(line)
    }

    pub async fn delete<'e, E>(
        &self,
        executor: E,
        product_id: Uuid,
        product_material_id: Uuid,
    ) -> Result<u64, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let result = sqlx::query("DELETE FROM product_materials WHERE id = $1 AND product_id = $2")
            .bind(product_material_id)
            .bind(product_id)
            .execute(executor)
            .await?;
        Ok(result.rows_affected())
    }
}
