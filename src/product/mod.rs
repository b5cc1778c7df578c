pub mod product_models;
pub mod product_repository;

pub use product_models::Product;
pub use product_repository::ProductRepository;
