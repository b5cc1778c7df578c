pub mod message_models;
pub mod message_dto;
pub mod message_repository;
pub mod message_service;
pub mod message_handlers;
pub mod routes;

pub use message_models::{ConversationSummary, MessageDetails, MessageResponse};
pub use message_dto::SendMessageRequest;
pub use message_repository::MessageRepository;
pub use message_service::MessageService;
