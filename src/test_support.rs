//! In-memory stand-ins for the Postgres repositories, shared by unit and
//! router tests.

use async_trait::async_trait;
use chrono::Utc;
use std::{
    collections::HashMap,
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc, Mutex,
    },
};
use uuid::Uuid;

use crate::{
    error::{AppError, Result},
    message::{
        message_dto::NewMessage,
        message_models::{Conversation, ConversationSummary, Message, MessageDetails, ParticipantPair},
        message_repository::MessageStore,
        message_service::MessageService,
    },
    notification::{
        notification_models::{NewNotification, Notification},
        notification_repository::NotificationSink,
    },
    product::{product_models::ProductSummary, product_repository::Catalog},
    user::{user_models::UserSummary, user_repository::UserDirectory},
};

#[derive(Default)]
struct Tables {
    users: HashMap<Uuid, UserSummary>,
    products: HashMap<Uuid, ProductSummary>,
    conversations: Vec<Conversation>,
    messages: Vec<Message>,
    notifications: Vec<Notification>,
    next_seq: i64,
}

#[derive(Default)]
pub struct InMemoryMarketplace {
    tables: Mutex<Tables>,
    fail_notifications: AtomicBool,
}

impl InMemoryMarketplace {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn service(self: &Arc<Self>) -> MessageService {
        MessageService::new(self.clone(), self.clone(), self.clone(), self.clone())
    }

    pub fn add_user(&self, username: &str) -> Uuid {
        let id = Uuid::new_v4();
        self.tables.lock().unwrap().users.insert(
            id,
            UserSummary {
                id,
                username: username.to_string(),
                avatar_url: None,
            },
        );
        id
    }

    pub fn add_product(&self, title: &str, images: Vec<&str>) -> Uuid {
        let id = Uuid::new_v4();
        self.tables.lock().unwrap().products.insert(
            id,
            ProductSummary {
                id,
                title: title.to_string(),
                thumbnail: images.first().map(|s| s.to_string()),
            },
        );
        id
    }

    pub fn fail_notifications(&self) {
        self.fail_notifications.store(true, Ordering::SeqCst);
    }

    pub fn conversation_count(&self) -> usize {
        self.tables.lock().unwrap().conversations.len()
    }

    pub fn message_count(&self) -> usize {
        self.tables.lock().unwrap().messages.len()
    }

    pub fn notifications(&self) -> Vec<Notification> {
        self.tables.lock().unwrap().notifications.clone()
    }
}

#[async_trait]
impl UserDirectory for InMemoryMarketplace {
    async fn find_user(&self, user_id: Uuid) -> Result<Option<UserSummary>> {
        Ok(self.tables.lock().unwrap().users.get(&user_id).cloned())
    }
}

#[async_trait]
impl Catalog for InMemoryMarketplace {
    async fn find_product(&self, product_id: Uuid) -> Result<Option<ProductSummary>> {
        Ok(self.tables.lock().unwrap().products.get(&product_id).cloned())
    }
}

#[async_trait]
impl NotificationSink for InMemoryMarketplace {
    async fn notify(&self, notification: NewNotification) -> Result<Notification> {
        if self.fail_notifications.load(Ordering::SeqCst) {
            return Err(AppError::InternalError);
        }

        let stored = Notification {
            id: Uuid::new_v4(),
            user_id: notification.user_id,
            kind: notification.kind,
            title: notification.title,
            body: notification.body,
            icon: notification.icon,
            target_route: notification.target_route,
            is_read: false,
            created_at: Utc::now(),
        };
        self.tables.lock().unwrap().notifications.push(stored.clone());
        Ok(stored)
    }
}

#[async_trait]
impl MessageStore for InMemoryMarketplace {
    async fn append(&self, new_message: &NewMessage) -> Result<(Conversation, Message)> {
        let pair = ParticipantPair::new(new_message.sender_id, new_message.receiver_id)?;
        let mut tables = self.tables.lock().unwrap();

        let existing = tables
            .conversations
            .iter()
            .position(|c| c.pair() == pair && c.product_id == new_message.product_id);

        let index = match existing {
            Some(index) => index,
            None => {
                let now = Utc::now();
                tables.conversations.push(Conversation {
                    id: Uuid::new_v4(),
                    participant_low: pair.low(),
                    participant_high: pair.high(),
                    product_id: new_message.product_id,
                    last_activity: now,
                    created_at: now,
                });
                tables.conversations.len() - 1
            }
        };

        tables.next_seq += 1;
        let message = Message {
            id: Uuid::new_v4(),
            seq: tables.next_seq,
            conversation_id: tables.conversations[index].id,
            sender_id: new_message.sender_id,
            receiver_id: new_message.receiver_id,
            content: new_message.content.clone(),
            created_at: Utc::now().max(tables.conversations[index].last_activity),
        };
        tables.messages.push(message.clone());
        tables.conversations[index].last_activity = message.created_at;

        Ok((tables.conversations[index].clone(), message))
    }

    async fn find_conversation(
        &self,
        pair: ParticipantPair,
        product_id: Uuid,
    ) -> Result<Option<Conversation>> {
        Ok(self
            .tables
            .lock()
            .unwrap()
            .conversations
            .iter()
            .find(|c| c.pair() == pair && c.product_id == product_id)
            .cloned())
    }

    async fn thread(&self, conversation_id: Uuid) -> Result<Vec<Message>> {
        let mut messages: Vec<_> = self
            .tables
            .lock()
            .unwrap()
            .messages
            .iter()
            .filter(|m| m.conversation_id == conversation_id)
            .cloned()
            .collect();
        messages.sort_by_key(|m| (m.created_at, m.seq));
        Ok(messages)
    }

    async fn conversation_summaries(&self, user_id: Uuid) -> Result<Vec<ConversationSummary>> {
        let tables = self.tables.lock().unwrap();

        let mut rows: Vec<(ConversationSummary, i64)> = tables
            .conversations
            .iter()
            .filter_map(|c| {
                let other = c.other_participant(user_id)?;
                let participant = tables.users.get(&other)?.clone();
                let product = tables.products.get(&c.product_id)?;
                let last = tables
                    .messages
                    .iter()
                    .filter(|m| m.conversation_id == c.id)
                    .max_by_key(|m| (m.created_at, m.seq));

                let summary = ConversationSummary {
                    conversation_id: c.id,
                    product_id: c.product_id,
                    product_title: product.title.clone(),
                    product_thumbnail: product.thumbnail.clone(),
                    last_message: last.map(|m| m.content.clone()),
                    last_message_time: last.map(|m| m.created_at),
                    last_activity: c.last_activity,
                    participant,
                };
                Some((summary, last.map_or(0, |m| m.seq)))
            })
            .collect();

        rows.sort_by(|a, b| (b.0.last_activity, b.1).cmp(&(a.0.last_activity, a.1)));
        Ok(rows.into_iter().map(|(summary, _)| summary).collect())
    }

    async fn messages_for_user(&self, user_id: Uuid) -> Result<Vec<MessageDetails>> {
        let tables = self.tables.lock().unwrap();
        let name = |id: &Uuid| tables.users.get(id).map(|u| u.username.clone());

        let mut messages: Vec<(MessageDetails, i64)> = tables
            .messages
            .iter()
            .filter(|m| m.sender_id == user_id || m.receiver_id == user_id)
            .filter_map(|m| {
                let conversation = tables
                    .conversations
                    .iter()
                    .find(|c| c.id == m.conversation_id)?;
                let product = tables.products.get(&conversation.product_id);

                let details = MessageDetails {
                    id: m.id,
                    conversation_id: m.conversation_id,
                    sender_id: m.sender_id,
                    receiver_id: m.receiver_id,
                    product_id: conversation.product_id,
                    content: m.content.clone(),
                    created_at: m.created_at,
                    sender_name: name(&m.sender_id),
                    receiver_name: name(&m.receiver_id),
                    product_title: product.map(|p| p.title.clone()),
                    product_image: product.and_then(|p| p.thumbnail.clone()),
                };
                Some((details, m.seq))
            })
            .collect();

        messages.sort_by(|a, b| (b.0.created_at, b.1).cmp(&(a.0.created_at, a.1)));
        Ok(messages.into_iter().map(|(details, _)| details).collect())
    }
}
