use std::sync::Arc;
use uuid::Uuid;

use crate::{
    error::{AppError, Result},
    notification::{notification_models::NewNotification, notification_repository::NotificationSink},
    product::{product_models::ProductSummary, product_repository::Catalog},
    user::user_repository::UserDirectory,
};
use super::{
    message_dto::SendMessageRequest,
    message_models::{ConversationSummary, Message, MessageDetails, ParticipantPair},
    message_repository::MessageStore,
};

#[derive(Clone)]
pub struct MessageService {
    store: Arc<dyn MessageStore>,
    users: Arc<dyn UserDirectory>,
    catalog: Arc<dyn Catalog>,
    notifications: Arc<dyn NotificationSink>,
}

impl MessageService {
    pub fn new(
        store: Arc<dyn MessageStore>,
        users: Arc<dyn UserDirectory>,
        catalog: Arc<dyn Catalog>,
        notifications: Arc<dyn NotificationSink>,
    ) -> Self {
        Self {
            store,
            users,
            catalog,
            notifications,
        }
    }

    /// Validates, stores the message in its conversation and notifies the
    /// recipient. A failed notification does not fail the send.
    pub async fn send_message(
        &self,
        sender_id: Uuid,
        payload: SendMessageRequest,
    ) -> Result<Message> {
        let new_message = payload.into_new_message(sender_id)?;

        self.users
            .find_user(new_message.receiver_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Recipient not found".to_string()))?;

        let product = self
            .catalog
            .find_product(new_message.product_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Product not found".to_string()))?;

        let (conversation, message) = self.store.append(&new_message).await?;
        debug_assert!(
            conversation.pair().contains(message.sender_id)
                && conversation.pair().contains(message.receiver_id)
        );

        tracing::info!(
            conversation_id = %conversation.id,
            message_id = %message.id,
            "message stored"
        );

        self.notify_recipient(&message, &product).await;

        Ok(message)
    }

    async fn notify_recipient(&self, message: &Message, product: &ProductSummary) {
        let sender_name = match self.users.find_user(message.sender_id).await {
            Ok(Some(sender)) => sender.username,
            Ok(None) => "Someone".to_string(),
            Err(e) => {
                tracing::warn!("Could not load sender {}: {:?}", message.sender_id, e);
                "Someone".to_string()
            }
        };

        let notification = NewNotification::new_message(
            message.receiver_id,
            message.sender_id,
            &sender_name,
            product.id,
            &product.title,
        );

        if let Err(e) = self.notifications.notify(notification).await {
            tracing::warn!(
                message_id = %message.id,
                "Failed to notify recipient {}: {:?}",
                message.receiver_id,
                e
            );
        }
    }

    pub async fn list_conversations(&self, user_id: Uuid) -> Result<Vec<ConversationSummary>> {
        self.store.conversation_summaries(user_id).await
    }

    /// Messages exchanged with `counterpart_id` about `product_id`, oldest
    /// first. No conversation yet means an empty thread.
    pub async fn get_thread(
        &self,
        user_id: Uuid,
        counterpart_id: Uuid,
        product_id: Uuid,
    ) -> Result<Vec<Message>> {
        let pair = ParticipantPair::new(user_id, counterpart_id)?;

        match self.store.find_conversation(pair, product_id).await? {
            Some(conversation) => self.store.thread(conversation.id).await,
            None => Ok(Vec::new()),
        }
    }

    pub async fn list_messages(&self, user_id: Uuid) -> Result<Vec<MessageDetails>> {
        self.store.messages_for_user(user_id).await
    }
}
