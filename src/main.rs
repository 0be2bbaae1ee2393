//src/main.rs

use anyhow::Context;
use axum::{
    http::HeaderValue,
    routing::{get, post, put},
    Json, Router,
};
use tokio::net::TcpListener;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing_subscriber::EnvFilter;
use utoipa::OpenApi;

mod common;
mod config;
mod db;
mod docs;
mod handlers;
mod middleware;
mod models;
mod services;

use crate::config::{AppState, Settings};
use crate::docs::ApiDoc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // RUST_LOG controla o nível; sem ele, "info".
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .init();

    // Se a configuração falhar, a aplicação não deve iniciar.
    let settings = Settings::from_env()?;
    let app_state = AppState::new(settings.clone()).await?;

    sqlx::migrate!()
        .run(&app_state.db_pool)
        .await
        .context("Falha ao rodar as migrações do banco de dados")?;

    tracing::info!("✅ Migrações do banco de dados executadas com sucesso!");

    let app = build_router(app_state)?;

    let listener = TcpListener::bind(settings.server_addr)
        .await
        .context("Falha ao iniciar o listener TCP")?;
    tracing::info!("🚀 Servidor escutando em {}", listener.local_addr()?);

    axum::serve(listener, app).await.context("Erro no servidor Axum")?;
    Ok(())
}

fn cors_layer(settings: &Settings) -> anyhow::Result<CorsLayer> {
    let cors = CorsLayer::new().allow_methods(Any).allow_headers(Any);

    let cors = match settings.cors_allowed_origin.as_deref() {
        Some(origin) => {
            let origin = origin
                .parse::<HeaderValue>()
                .context("CORS_ALLOWED_ORIGIN inválido")?;
            cors.allow_origin(origin)
        }
        // Desenvolvimento: qualquer origem
        None => cors.allow_origin(Any),
    };

    Ok(cors)
}

fn build_router(app_state: AppState) -> anyhow::Result<Router> {
    let cors = cors_layer(&app_state.settings)?;

    let product_routes = Router::new()
        .route("/"
               ,post(handlers::products::create_product)
               .get(handlers::products::get_all_products)
        )
        .route("/{id}"
               ,get(handlers::products::get_product)
               .put(handlers::products::update_product)
               .delete(handlers::products::delete_product)
        )
        // Ficha técnica (BOM) do produto
        .route("/{product_id}/materials"
               ,post(handlers::product_materials::add_product_material)
               .get(handlers::product_materials::list_product_materials)
        )
        .route("/{product_id}/materials/{product_material_id}"
               ,put(handlers::product_materials::update_product_material)
               .delete(handlers::product_materials::remove_product_material)
        );

    let raw_material_routes = Router::new()
        .route("/"
               ,post(handlers::raw_materials::create_raw_material)
               .get(handlers::raw_materials::get_all_raw_materials)
        )
        .route("/{id}"
               ,get(handlers::raw_materials::get_raw_material)
               .put(handlers::raw_materials::update_raw_material)
               .delete(handlers::raw_materials::delete_raw_material)
        );

    let app = Router::new()
        .route("/health", get(|| async { "OK" }))
        .route("/api-docs/openapi.json", get(|| async { Json(ApiDoc::openapi()) }))
        .route("/production/suggestions", get(handlers::production::get_suggestions))
        .nest("/products", product_routes)
        .nest("/raw-materials", raw_material_routes)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(app_state);

    Ok(app)
}
