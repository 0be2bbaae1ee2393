// src/services/product_material_service.rs

use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::{ProductMaterialRepository, ProductRepository, RawMaterialRepository},
    models::bom::ProductMaterial,
};

// Ficha técnica (BOM): liga produtos às matérias-primas que consomem.
#[derive(Clone)]
pub struct ProductMaterialService {
    pool: PgPool,
    product_material_repo: ProductMaterialRepository,
    product_repo: ProductRepository,
    raw_material_repo: RawMaterialRepository,
}

impl ProductMaterialService {
    pub fn new(
        product_material_repo: ProductMaterialRepository,
        product_repo: ProductRepository,
        raw_material_repo: RawMaterialRepository,
        pool: PgPool,
    ) -> Self {
        Self { pool, product_material_repo, product_repo, raw_material_repo }
    }

    pub async fn add_to_product(
        &self,
        product_id: Uuid,
        raw_material_id: Uuid,
        required_quantity: Decimal,
    ) -> Result<ProductMaterial, AppError> {
        let mut tx = self.pool.begin().await?;

        // 1. Valida as duas pontas antes de inserir (404 claro em vez de erro de FK)
        if !self.product_repo.exists(&mut *tx, product_id).await? {
            return Err(AppError::ProductNotFound);
        }
        self.raw_material_repo
            .find_by_id(&mut *tx, raw_material_id)
            .await?
            .ok_or(AppError::RawMaterialNotFound)?;

        // 2. Insere (o UNIQUE (product_id, raw_material_id) vira 409)
        let line = self
            .product_material_repo
            .create(&mut *tx, product_id, raw_material_id, required_quantity)
            .await?;

        tx.commit().await?;

        tracing::info!(
            %product_id,
            raw_material = %line.raw_material_code,
            required = %line.required_quantity,
            "Matéria-prima adicionada à ficha técnica"
        );
        Ok(line)
    }

    pub async fn list_by_product(&self, product_id: Uuid) -> Result<Vec<ProductMaterial>, AppError> {
        if !self.product_repo.exists(&self.pool, product_id).await? {
            return Err(AppError::ProductNotFound);
        }

        self.product_material_repo
            .list_by_product(&self.pool, product_id)
            .await
    }

    pub async fn update_required_quantity(
        &self,
        product_id: Uuid,
        product_material_id: Uuid,
        required_quantity: Decimal,
    ) -> Result<ProductMaterial, AppError> {
        let line = self
            .product_material_repo
            .update_required_quantity(&self.pool, product_id, product_material_id, required_quantity)
            .await?
            .ok_or(AppError::ProductMaterialNotFound)?;

        tracing::info!(%product_id, id = %line.id, required = %line.required_quantity, "Ficha técnica atualizada");
        Ok(line)
    }

    pub async fn remove_from_product(
        &self,
        product_id: Uuid,
        product_material_id: Uuid,
    ) -> Result<(), AppError> {
        let removed = self
            .product_material_repo
            .delete(&self.pool, product_id, product_material_id)
            .await?;

        if removed == 0 {
            return Err(AppError::ProductMaterialNotFound);
        }
        tracing::info!(%product_id, id = %product_material_id, "Matéria-prima removida da ficha técnica");
        Ok(())
    }
}
