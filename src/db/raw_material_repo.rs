// src/db/raw_material_repo.rs

use rust_decimal::Decimal;
use sqlx::{Executor, Postgres};
use uuid::Uuid;

use crate::{
    common::{
        db_utils::{constraint_violation, write_error, ConstraintViolation},
        error::AppError,
    },
    models::raw_material::RawMaterial,
};

// Acesso à tabela 'raw_materials'. Sem estado: quem chama decide o executor
// (pool ou transação).
#[derive(Clone, Default)]
pub struct RawMaterialRepository;

impl RawMaterialRepository {
    pub fn new() -> Self {
        Self
    }

    pub async fn get_all<'e, E>(&self, executor: E) -> Result<Vec<RawMaterial>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let materials = sqlx::query_as::<_, RawMaterial>(
            "SELECT * FROM raw_materials ORDER BY code ASC",
        )
            .fetch_all(executor)
            .await?;
        Ok(materials)
    }

    pub async fn find_by_id<'e, E>(
        &self,
        executor: E,
        id: Uuid,
    ) -> Result<Option<RawMaterial>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let material = sqlx::query_as::<_, RawMaterial>("SELECT * FROM raw_materials WHERE id = $1")
            .bind(id)
            .fetch_optional(executor)
            .await?;
        Ok(material)
    }

    pub async fn create<'e, E>(
        &self,
        executor: E,
        code: &str,
        name: &str,
        stock_quantity: Decimal,
    ) -> Result<RawMaterial, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query_as::<_, RawMaterial>(
            r#"
            INSERT INTO raw_materials (code, name, stock_quantity)
            VALUES ($1, $2, $3)
            RETURNING *
            "#,
        )
            .bind(code)
            .bind(name)
            .bind(stock_quantity)
            .fetch_one(executor)
            .await
            .map_err(|e| match constraint_violation(&e) {
                Some(ConstraintViolation::Unique(_)) => {
                    AppError::RawMaterialCodeAlreadyExists(code.to_string())
                }
                _ => write_error(e),
            })
    }

    /// O código é imutável: só nome e saldo mudam. `None` se o id não existe.
    pub async fn update<'e, E>(
        &self,
        executor: E,
        id: Uuid,
        name: &str,
        stock_quantity: Decimal,
    ) -> Result<Option<RawMaterial>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let material = sqlx::query_as::<_, RawMaterial>(
            r#"
            UPDATE raw_materials
            SET name = $2, stock_quantity = $3, updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
            .bind(id)
            .bind(name)
            .bind(stock_quantity)
            .fetch_optional(executor)
            .await
            .map_err(write_error)?;
        Ok(material)
    }

    /// Retorna quantas linhas foram apagadas (0 ou 1).
    pub async fn delete<'e, E>(&self, executor: E, id: Uuid) -> Result<u64, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let result = sqlx::query("DELETE FROM raw_materials WHERE id = $1")
            .bind(id)
            .execute(executor)
            .await
            .map_err(|e| match constraint_violation(&e) {
                // ON DELETE RESTRICT em product_materials
                Some(ConstraintViolation::ForeignKey(_)) => AppError::RawMaterialInUse,
                _ => AppError::from(e),
            })?;
        Ok(result.rows_affected())
    }
}
