pub mod user_models;
pub mod user_repository;
pub mod user_handlers;
pub mod routes;

pub use user_models::UserSummary;
pub use user_repository::UserRepository;
