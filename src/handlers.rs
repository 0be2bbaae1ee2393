pub mod extract;
pub mod product_materials;
pub mod production;
pub mod products;
pub mod raw_materials;
pub mod validation;
