use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

use crate::error::{AppError, Result};

/// Fields are optional so a missing one is reported as such rather than as
/// a generic deserialization failure.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct SendMessageRequest {
    pub receiver_id: Option<Uuid>,
    pub product_id: Option<Uuid>,
    pub content: Option<String>,
}

/// A message that passed every check that does not need the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewMessage {
    pub sender_id: Uuid,
    pub receiver_id: Uuid,
    pub product_id: Uuid,
    pub content: String,
}

impl SendMessageRequest {
    pub fn into_new_message(self, sender_id: Uuid) -> Result<NewMessage> {
        let (Some(receiver_id), Some(product_id), Some(content)) =
            (self.receiver_id, self.product_id, self.content)
        else {
            return Err(AppError::Validation(
                "receiver_id, product_id and content are required".to_string(),
            ));
        };

        let content = content.trim();
        if content.is_empty() {
            return Err(AppError::Validation("Message content cannot be empty".to_string()));
        }

        if sender_id == receiver_id {
            return Err(AppError::Validation(
                "You cannot send a message to yourself".to_string(),
            ));
        }

        Ok(NewMessage {
            sender_id,
            receiver_id,
            product_id,
            content: content.to_string(),
        })
    }
}

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ThreadQuery {
    /// The other participant of the conversation
    pub counterpart_id: Option<Uuid>,
    /// The listing the conversation is about
    pub product_id: Option<Uuid>,
}

impl ThreadQuery {
    pub fn required(self) -> Result<(Uuid, Uuid)> {
        match (self.counterpart_id, self.product_id) {
            (Some(counterpart_id), Some(product_id)) => Ok((counterpart_id, product_id)),
            _ => Err(AppError::BadRequest(
                "counterpart_id and product_id are required".to_string(),
            )),
        }
    }
}
