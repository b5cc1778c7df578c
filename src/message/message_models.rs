use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::{
    error::{AppError, Result},
    user::user_models::UserSummary,
};

/// Two distinct users in canonical order (`low < high`).
///
/// A conversation between X and Y is the same conversation whoever wrote
/// first, so every lookup and insert goes through this type instead of the
/// raw (sender, receiver) tuple.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ParticipantPair {
    low: Uuid,
    high: Uuid,
}

impl ParticipantPair {
    pub fn new(a: Uuid, b: Uuid) -> Result<Self> {
        match a.cmp(&b) {
            std::cmp::Ordering::Less => Ok(Self { low: a, high: b }),
            std::cmp::Ordering::Greater => Ok(Self { low: b, high: a }),
            std::cmp::Ordering::Equal => Err(AppError::Validation(
                "You cannot send a message to yourself".to_string(),
            )),
        }
    }

    pub fn low(&self) -> Uuid {
        self.low
    }

    pub fn high(&self) -> Uuid {
        self.high
    }

    pub fn contains(&self, user_id: Uuid) -> bool {
        self.low == user_id || self.high == user_id
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Conversation {
    pub id: Uuid,
    pub participant_low: Uuid,
    pub participant_high: Uuid,
    pub product_id: Uuid,
    pub last_activity: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

impl Conversation {
    pub fn pair(&self) -> ParticipantPair {
        ParticipantPair {
            low: self.participant_low,
            high: self.participant_high,
        }
    }

    /// The participant that is not `user_id`, if `user_id` takes part at all.
    pub fn other_participant(&self, user_id: Uuid) -> Option<Uuid> {
        if self.participant_low == user_id {
            Some(self.participant_high)
        } else if self.participant_high == user_id {
            Some(self.participant_low)
        } else {
            None
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Message {
    pub id: Uuid,
    /// Store-assigned, strictly increasing; breaks ties between equal timestamps.
    pub seq: i64,
    pub conversation_id: Uuid,
    pub sender_id: Uuid,
    pub receiver_id: Uuid,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct MessageResponse {
    pub id: Uuid,
    pub conversation_id: Uuid,
    pub sender_id: Uuid,
    pub receiver_id: Uuid,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

impl From<Message> for MessageResponse {
    fn from(message: Message) -> Self {
        Self {
            id: message.id,
            conversation_id: message.conversation_id,
            sender_id: message.sender_id,
            receiver_id: message.receiver_id,
            content: message.content,
            created_at: message.created_at,
        }
    }
}

/// A message joined with the names and listing it refers to.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct MessageDetails {
    pub id: Uuid,
    pub conversation_id: Uuid,
    pub sender_id: Uuid,
    pub receiver_id: Uuid,
    pub product_id: Uuid,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub sender_name: Option<String>,
    pub receiver_name: Option<String>,
    pub product_title: Option<String>,
    pub product_image: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ConversationSummary {
    pub conversation_id: Uuid,
    pub product_id: Uuid,
    pub product_title: String,
    pub product_thumbnail: Option<String>,
    pub last_message: Option<String>,
    pub last_message_time: Option<DateTime<Utc>>,
    pub last_activity: DateTime<Utc>,
    pub participant: UserSummary,
}

#[derive(Debug, FromRow)]
pub struct ConversationSummaryRow {
    pub conversation_id: Uuid,
    pub product_id: Uuid,
    pub product_title: String,
    pub product_thumbnail: Option<String>,
    pub last_message: Option<String>,
    pub last_message_time: Option<DateTime<Utc>>,
    pub last_activity: DateTime<Utc>,
    pub participant_id: Uuid,
    pub participant_name: String,
    pub participant_avatar: Option<String>,
}

impl From<ConversationSummaryRow> for ConversationSummary {
    fn from(row: ConversationSummaryRow) -> Self {
        Self {
            conversation_id: row.conversation_id,
            product_id: row.product_id,
            product_title: row.product_title,
            product_thumbnail: row.product_thumbnail,
            last_message: row.last_message,
            last_message_time: row.last_message_time,
            last_activity: row.last_activity,
            participant: UserSummary {
                id: row.participant_id,
                username: row.participant_name,
                avatar_url: row.participant_avatar,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pair_is_symmetric() {
        let a = Uuid::new_v4();
        let b = Uuid::new_v4();

        assert_eq!(
            ParticipantPair::new(a, b).unwrap(),
            ParticipantPair::new(b, a).unwrap()
        );
    }

    #[test]
    fn test_pair_is_ordered() {
        let a = Uuid::new_v4();
        let b = Uuid::new_v4();
        let pair = ParticipantPair::new(a, b).unwrap();

        assert!(pair.low() < pair.high());
        assert!(pair.contains(a) && pair.contains(b));
        assert!(!pair.contains(Uuid::new_v4()));
    }

    #[test]
    fn test_pair_rejects_self() {
        let a = Uuid::new_v4();
        assert!(matches!(
            ParticipantPair::new(a, a),
            Err(AppError::Validation(_))
        ));
    }

    #[test]
    fn test_other_participant() {
        let a = Uuid::new_v4();
        let b = Uuid::new_v4();
        let pair = ParticipantPair::new(a, b).unwrap();
        let conversation = Conversation {
            id: Uuid::new_v4(),
            participant_low: pair.low(),
            participant_high: pair.high(),
            product_id: Uuid::new_v4(),
            last_activity: Utc::now(),
            created_at: Utc::now(),
        };

        assert_eq!(conversation.other_participant(a), Some(b));
        assert_eq!(conversation.other_participant(b), Some(a));
        assert_eq!(conversation.other_participant(Uuid::new_v4()), None);
        assert_eq!(conversation.pair(), pair);
    }
}
