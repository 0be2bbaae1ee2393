// src/services/product_service.rs

use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use crate::{common::error::AppError, db::ProductRepository, models::product::Product};

#[derive(Clone)]
pub struct ProductService {
    pool: PgPool,
    repo: ProductRepository,
}

impl ProductService {
    pub fn new(repo: ProductRepository, pool: PgPool) -> Self {
        Self { pool, repo }
    }

    pub async fn create(&self, code: &str, name: &str, price: Decimal) -> Result<Product, AppError> {
        let product = self.repo.create(&self.pool, code, name, price).await?;
        tracing::info!(id = %product.id, code = %product.code, "Produto cadastrado");
        Ok(product)
    }

    pub async fn get_all(&self) -> Result<Vec<Product>, AppError> {
        self.repo.get_all(&self.pool).await
    }

    pub async fn get_by_id(&self, id: Uuid) -> Result<Product, AppError> {
        self.repo
            .find_by_id(&self.pool, id)
            .await?
            .ok_or(AppError::ProductNotFound)
    }

    pub async fn update(&self, id: Uuid, name: &str, price: Decimal) -> Result<Product, AppError> {
        let product = self
            .repo
            .update(&self.pool, id, name, price)
            .await?
            .ok_or(AppError::ProductNotFound)?;

        tracing::info!(id = %product.id, price = %product.price, "Produto atualizado");
        Ok(product)
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), AppError> {
        if self.repo.delete(&self.pool, id).await? == 0 {
            return Err(AppError::ProductNotFound);
        }
        tracing::info!(%id, "Produto removido (com sua ficha técnica)");
        Ok(())
    }
}
