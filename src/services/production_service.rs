// src/services/production_service.rs

use sqlx::PgPool;

use crate::{
    common::{db_utils::begin_snapshot, error::AppError},
    db::ProductionRepository,
    models::production::SuggestionResult,
    services::allocation::{AllocationEngine, ProductionSnapshot},
};

#[derive(Clone)]
pub struct ProductionService {
    pool: PgPool,
    repo: ProductionRepository,
    engine: AllocationEngine,
}

impl ProductionService {
    pub fn new(repo: ProductionRepository, pool: PgPool) -> Self {
        Self { pool, repo, engine: AllocationEngine::new() }
    }

    /// Lê estoque, produtos e fichas técnicas num único snapshot e roda o motor.
    /// A sugestão é apenas consultiva: nada é gravado e nenhum saldo é travado.
    pub async fn suggest(&self) -> Result<SuggestionResult, AppError> {
        let snapshot = self.load_snapshot().await?;
        Ok(self.engine.suggest(&snapshot))
    }

    async fn load_snapshot(&self) -> Result<ProductionSnapshot, AppError> {
        let mut tx = begin_snapshot(&self.pool).await?;

        let stock = self.repo.get_raw_material_stock(&mut *tx).await?;
        let products = self.repo.get_products_by_price_desc(&mut *tx).await?;
        let bom_lines = self.repo.get_all_bom_requirements(&mut *tx).await?;

        tx.commit().await?;

        tracing::debug!(
            raw_materials = stock.len(),
            products = products.len(),
            bom_lines = bom_lines.len(),
            "Snapshot de produção carregado"
        );

        Ok(ProductionSnapshot::new(stock, products, bom_lines))
    }
}
