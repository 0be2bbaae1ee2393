// src/services/raw_material_service.rs

use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::RawMaterialRepository,
    models::raw_material::RawMaterial,
};

#[derive(Clone)]
pub struct RawMaterialService {
    pool: PgPool,
    repo: RawMaterialRepository,
}

impl RawMaterialService {
    pub fn new(repo: RawMaterialRepository, pool: PgPool) -> Self {
        Self { pool, repo }
    }

    pub async fn create(
        &self,
        code: &str,
        name: &str,
        stock_quantity: Decimal,
    ) -> Result<RawMaterial, AppError> {
        let material = self.repo.create(&self.pool, code, name, stock_quantity).await?;
        tracing::info!(id = %material.id, code = %material.code, "Matéria-prima cadastrada");
        Ok(material)
    }

    pub async fn get_all(&self) -> Result<Vec<RawMaterial>, AppError> {
        self.repo.get_all(&self.pool).await
    }

    pub async fn get_by_id(&self, id: Uuid) -> Result<RawMaterial, AppError> {
        self.repo
            .find_by_id(&self.pool, id)
            .await?
            .ok_or(AppError::RawMaterialNotFound)
    }

    pub async fn update(
        &self,
        id: Uuid,
        name: &str,
        stock_quantity: Decimal,
    ) -> Result<RawMaterial, AppError> {
        let material = self
            .repo
            .update(&self.pool, id, name, stock_quantity)
            .await?
            .ok_or(AppError::RawMaterialNotFound)?;

        tracing::info!(id = %material.id, stock = %material.stock_quantity, "Matéria-prima atualizada");
        Ok(material)
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), AppError> {
        if self.repo.delete(&self.pool, id).await? == 0 {
            return Err(AppError::RawMaterialNotFound);
        }
        tracing::info!(%id, "Matéria-prima removida");
        Ok(())
    }
}
