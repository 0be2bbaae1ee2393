pub mod bom;
pub mod product;
pub mod production;
pub mod raw_material;
