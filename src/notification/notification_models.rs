use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

pub const MESSAGE_KIND: &str = "message";

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Notification {
    pub id: Uuid,
    pub user_id: Uuid,
    #[serde(rename = "type")]
    pub kind: String,
    pub title: String,
    pub body: String,
    pub icon: Option<String>,
    pub target_route: Option<String>,
    pub is_read: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewNotification {
    pub user_id: Uuid,
    pub kind: String,
    pub title: String,
    pub body: String,
    pub icon: Option<String>,
    pub target_route: Option<String>,
}

impl NewNotification {
    /// Notification sent to the recipient of a chat message. The route lets
    /// clients open the thread with the sender about the same listing.
    pub fn new_message(
        recipient_id: Uuid,
        sender_id: Uuid,
        sender_name: &str,
        product_id: Uuid,
        product_title: &str,
    ) -> Self {
        Self {
            user_id: recipient_id,
            kind: MESSAGE_KIND.to_string(),
            title: "New message".to_string(),
            body: format!("{} sent you a message about {}", sender_name, product_title),
            icon: Some("chat".to_string()),
            target_route: Some(format!("/messages/{}/{}", sender_id, product_id)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_notification_targets_recipient() {
        let recipient = Uuid::new_v4();
        let sender = Uuid::new_v4();
        let product = Uuid::new_v4();

        let notification =
            NewNotification::new_message(recipient, sender, "alice", product, "Vélo");

        assert_eq!(notification.user_id, recipient);
        assert_eq!(notification.kind, MESSAGE_KIND);
        assert_eq!(notification.body, "alice sent you a message about Vélo");
        assert_eq!(
            notification.target_route,
            Some(format!("/messages/{}/{}", sender, product))
        );
    }
}
