// src/docs.rs

use utoipa::OpenApi;
use crate::common::error;
use crate::handlers;
use crate::models;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Production Planner API",
        description = "Cadastro de produtos, matérias-primas e fichas técnicas, e sugestão de produção pelo estoque atual."
    ),
    paths(
        // --- Products ---
        handlers::products::create_product,
        handlers::products::get_all_products,
        handlers::products::get_product,
        handlers::products::update_product,
        handlers::products::delete_product,

        // --- Raw Materials ---
        handlers::raw_materials::create_raw_material,
        handlers::raw_materials::get_all_raw_materials,
        handlers::raw_materials::get_raw_material,
        handlers::raw_materials::update_raw_material,
        handlers::raw_materials::delete_raw_material,

        // --- BOM ---
        handlers::product_materials::add_product_material,
        handlers::product_materials::list_product_materials,
        handlers::product_materials::update_product_material,
        handlers::product_materials::remove_product_material,

        // --- PRODUCTION ---
        handlers::production::get_suggestions,
    ),
    components(
        schemas(
            models::product::Product,
            models::raw_material::RawMaterial,
            models::bom::ProductMaterial,
            models::production::SuggestionItem,
            models::production::SuggestionResult,

            // --- Payloads ---
            handlers::products::CreateProductPayload,
            handlers::products::UpdateProductPayload,
            handlers::raw_materials::CreateRawMaterialPayload,
            handlers::raw_materials::UpdateRawMaterialPayload,
            handlers::product_materials::AddProductMaterialPayload,
            handlers::product_materials::UpdateProductMaterialPayload,

            // --- Erros ---
            error::ApiError,
            error::FieldErrorItem,
        )
    ),
    tags(
        (name = "Products", description = "Produtos acabados e seus preços"),
        (name = "Raw Materials", description = "Matérias-primas e estoque"),
        (name = "Bill of Materials", description = "Ficha técnica: consumo de matéria-prima por unidade de produto"),
        (name = "Production", description = "Sugestão de produção gulosa por preço")
    )
)]
pub struct ApiDoc;
