pub mod product_repo;
pub use product_repo::ProductRepository;
pub mod raw_material_repo;
pub use raw_material_repo::RawMaterialRepository;
pub mod product_material_repo;
pub use product_material_repo::ProductMaterialRepository;
pub mod production_repo;
pub use production_repo::ProductionRepository;
