pub mod allocation;
pub mod product_material_service;
pub mod product_service;
pub mod production_service;
pub mod raw_material_service;

pub use product_material_service::ProductMaterialService;
pub use product_service::ProductService;
pub use production_service::ProductionService;
pub use raw_material_service::RawMaterialService;
