// src/config.rs

use anyhow::Context;
use sqlx::{postgres::PgPoolOptions, PgPool};
use std::{env, net::SocketAddr, time::Duration};

use crate::{
    db::{ProductMaterialRepository, ProductRepository, ProductionRepository, RawMaterialRepository},
    services::{ProductMaterialService, ProductService, ProductionService, RawMaterialService},
};

// ---
// Configurações lidas do ambiente (.env via dotenvy)
// ---
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub database_url: String,
    pub server_addr: SocketAddr,
    pub db_max_connections: u32,
    pub db_acquire_timeout: Duration,
    // None = qualquer origem (útil em desenvolvimento)
    pub cors_allowed_origin: Option<String>,
}

impl Settings {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Monta as configurações a partir de uma função de busca (env ou testes).
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let database_url = lookup("DATABASE_URL").context("DATABASE_URL deve ser definida")?;

        let server_addr = lookup("SERVER_ADDR")
            .unwrap_or_else(|| "0.0.0.0:8080".to_string())
            .parse::<SocketAddr>()
            .context("SERVER_ADDR inválido (esperado host:porta)")?;

        let db_max_connections = match lookup("DB_MAX_CONNECTIONS") {
            Some(raw) => raw.parse::<u32>().context("DB_MAX_CONNECTIONS deve ser um inteiro")?,
            None => 5,
        };

        let acquire_secs: u64 = match lookup("DB_ACQUIRE_TIMEOUT_SECS") {
            Some(raw) => raw.parse::<u64>().context("DB_ACQUIRE_TIMEOUT_SECS deve ser um inteiro")?,
            None => 3,
        };

        let cors_allowed_origin = lookup("CORS_ALLOWED_ORIGIN").filter(|origin| !origin.trim().is_empty());

        Ok(Self {
            database_url,
            server_addr,
            db_max_connections,
            db_acquire_timeout: Duration::from_secs(acquire_secs),
            cors_allowed_origin,
        })
    }

    pub fn pool_options(&self) -> PgPoolOptions {
        PgPoolOptions::new()
            .max_connections(self.db_max_connections)
            .acquire_timeout(self.db_acquire_timeout)
    }
}

// ---
// Estado compartilhado da aplicação
// ---
#[derive(Clone)]
pub struct AppState {
    pub db_pool: PgPool,
    pub settings: Settings,
    pub product_service: ProductService,
    pub raw_material_service: RawMaterialService,
    pub product_material_service: ProductMaterialService,
    pub production_service: ProductionService,
}

impl AppState {
    pub async fn new(settings: Settings) -> anyhow::Result<Self> {
        let db_pool = settings
            .pool_options()
            .connect(&settings.database_url)
            .await
            .context("Falha ao conectar ao banco de dados")?;

        tracing::info!("✅ Conexão com o banco de dados estabelecida com sucesso!");

        Ok(Self::with_pool(db_pool, settings))
    }

    // --- Monta o gráfico de dependências ---
    pub fn with_pool(db_pool: PgPool, settings: Settings) -> Self {
        let product_repo = ProductRepository::new();
        let raw_material_repo = RawMaterialRepository::new();

        Self {
            product_service: ProductService::new(product_repo.clone(), db_pool.clone()),
            raw_material_service: RawMaterialService::new(raw_material_repo.clone(), db_pool.clone()),
            product_material_service: ProductMaterialService::new(
                ProductMaterialRepository::new(),
                product_repo,
                raw_material_repo,
                db_pool.clone(),
            ),
            production_service: ProductionService::new(ProductionRepository::new(), db_pool.clone()),
            db_pool,
            settings,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn applies_defaults() {
        let settings =
            Settings::from_lookup(lookup_from(&[("DATABASE_URL", "postgres://localhost/db")])).unwrap();

        assert_eq!(settings.database_url, "postgres://localhost/db");
        assert_eq!(settings.server_addr, "0.0.0.0:8080".parse::<SocketAddr>().unwrap());
        assert_eq!(settings.db_max_connections, 5);
        assert_eq!(settings.db_acquire_timeout, Duration::from_secs(3));
        assert_eq!(settings.cors_allowed_origin, None);
    }

    #[test]
    fn reads_overrides() {
        let settings = Settings::from_lookup(lookup_from(&[
            ("DATABASE_URL", "postgres://db/app"),
            ("SERVER_ADDR", "127.0.0.1:3000"),
            ("DB_MAX_CONNECTIONS", "12"),
            ("DB_ACQUIRE_TIMEOUT_SECS", "10"),
            ("CORS_ALLOWED_ORIGIN", "http://localhost:5173"),
        ]))
        .unwrap();

        assert_eq!(settings.server_addr, "127.0.0.1:3000".parse::<SocketAddr>().unwrap());
        assert_eq!(settings.db_max_connections, 12);
        assert_eq!(settings.db_acquire_timeout, Duration::from_secs(10));
        assert_eq!(settings.cors_allowed_origin.as_deref(), Some("http://localhost:5173"));
    }

    #[test]
    fn database_url_is_required() {
        let err = Settings::from_lookup(lookup_from(&[])).unwrap_err();
        assert!(err.to_string().contains("DATABASE_URL"));
    }

    #[test]
    fn rejects_malformed_numbers() {
        let err = Settings::from_lookup(lookup_from(&[
            ("DATABASE_URL", "postgres://db/app"),
            ("DB_MAX_CONNECTIONS", "many"),
        ]))
        .unwrap_err();
        assert!(err.to_string().contains("DB_MAX_CONNECTIONS"));
    }

    #[test]
    fn blank_cors_origin_means_any() {
        let settings = Settings::from_lookup(lookup_from(&[
            ("DATABASE_URL", "postgres://db/app"),
            ("CORS_ALLOWED_ORIGIN", "  "),
        ]))
        .unwrap();
        assert_eq!(settings.cors_allowed_origin, None);
    }
}
