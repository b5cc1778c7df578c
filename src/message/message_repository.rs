use crate::error::Result;
use async_trait::async_trait;
use sqlx::{PgPool, Postgres, Transaction};
use uuid::Uuid;

use super::{
    message_dto::NewMessage,
    message_models::{
        Conversation, ConversationSummary, ConversationSummaryRow, Message, MessageDetails,
        ParticipantPair,
    },
};

/// Persistence for conversations and their messages.
#[async_trait]
pub trait MessageStore: Send + Sync {
    /// Resolves (or lazily creates) the conversation for the message's pair
    /// and product, stores the message and bumps the conversation's
    /// `last_activity`. Returns the conversation as it stands afterwards.
    async fn append(&self, message: &NewMessage) -> Result<(Conversation, Message)>;

    async fn find_conversation(
        &self,
        pair: ParticipantPair,
        product_id: Uuid,
    ) -> Result<Option<Conversation>>;

    /// Messages of one conversation, oldest first.
    async fn thread(&self, conversation_id: Uuid) -> Result<Vec<Message>>;

    /// One row per conversation `user_id` takes part in, most recently active first.
    async fn conversation_summaries(&self, user_id: Uuid) -> Result<Vec<ConversationSummary>>;

    /// Every message sent or received by `user_id`, newest first.
    async fn messages_for_user(&self, user_id: Uuid) -> Result<Vec<MessageDetails>>;
}

#[derive(Clone)]
pub struct MessageRepository {
    pool: PgPool,
}

impl MessageRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Insert-or-fetch on the (pair, product) unique key. The no-op update
    /// makes `RETURNING` yield the existing row and holds its lock until the
    /// transaction ends, so concurrent senders serialize on the row.
    async fn resolve_conversation(
        tx: &mut Transaction<'_, Postgres>,
        pair: ParticipantPair,
        product_id: Uuid,
    ) -> Result<Conversation> {
        let conversation = sqlx::query_as::<_, Conversation>(
            "INSERT INTO conversations (participant_low, participant_high, product_id)
             VALUES ($1, $2, $3)
             ON CONFLICT (participant_low, participant_high, product_id)
             DO UPDATE SET last_activity = conversations.last_activity
             RETURNING *",
        )
        .bind(pair.low())
        .bind(pair.high())
        .bind(product_id)
        .fetch_one(&mut **tx)
        .await?;

        Ok(conversation)
    }
}

#[async_trait]
impl MessageStore for MessageRepository {
    async fn append(&self, new_message: &NewMessage) -> Result<(Conversation, Message)> {
        let pair = ParticipantPair::new(new_message.sender_id, new_message.receiver_id)?;

        let mut tx = self.pool.begin().await?;

        let conversation =
            Self::resolve_conversation(&mut tx, pair, new_message.product_id).await?;

        // GREATEST keeps created_at non-decreasing within the conversation
        // even when an older transaction commits after a newer one.
        let message = sqlx::query_as::<_, Message>(
            "INSERT INTO messages (conversation_id, sender_id, receiver_id, content, created_at)
             VALUES ($1, $2, $3, $4, GREATEST(NOW(), $5))
             RETURNING *",
        )
        .bind(conversation.id)
        .bind(new_message.sender_id)
        .bind(new_message.receiver_id)
        .bind(&new_message.content)
        .bind(conversation.last_activity)
        .fetch_one(&mut *tx)
        .await?;

        let conversation = sqlx::query_as::<_, Conversation>(
            "UPDATE conversations SET last_activity = $2 WHERE id = $1 RETURNING *",
        )
        .bind(conversation.id)
        .bind(message.created_at)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok((conversation, message))
    }

    async fn find_conversation(
        &self,
        pair: ParticipantPair,
        product_id: Uuid,
    ) -> Result<Option<Conversation>> {
        let conversation = sqlx::query_as::<_, Conversation>(
            "SELECT * FROM conversations
             WHERE participant_low = $1 AND participant_high = $2 AND product_id = $3",
        )
        .bind(pair.low())
        .bind(pair.high())
        .bind(product_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(conversation)
    }

    async fn thread(&self, conversation_id: Uuid) -> Result<Vec<Message>> {
        let messages = sqlx::query_as::<_, Message>(
            "SELECT * FROM messages
             WHERE conversation_id = $1
             ORDER BY created_at ASC, seq ASC",
        )
        .bind(conversation_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(messages)
    }

    async fn conversation_summaries(&self, user_id: Uuid) -> Result<Vec<ConversationSummary>> {
        let rows = sqlx::query_as::<_, ConversationSummaryRow>(
            "SELECT
                c.id AS conversation_id,
                c.product_id,
                p.title AS product_title,
                p.images[1] AS product_thumbnail,
                lm.content AS last_message,
                lm.created_at AS last_message_time,
                c.last_activity,
                u.id AS participant_id,
                u.username AS participant_name,
                u.avatar_url AS participant_avatar
             FROM conversations c
             JOIN products p ON p.id = c.product_id
             JOIN users u ON u.id = CASE
                 WHEN c.participant_low = $1 THEN c.participant_high
                 ELSE c.participant_low
             END
             LEFT JOIN LATERAL (
                 SELECT m.content, m.created_at
                 FROM messages m
                 WHERE m.conversation_id = c.id
                 ORDER BY m.created_at DESC, m.seq DESC
                 LIMIT 1
             ) lm ON true
             WHERE c.participant_low = $1 OR c.participant_high = $1
             ORDER BY c.last_activity DESC",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(ConversationSummary::from).collect())
    }

    async fn messages_for_user(&self, user_id: Uuid) -> Result<Vec<MessageDetails>> {
        let messages = sqlx::query_as::<_, MessageDetails>(
            "SELECT
                m.id,
                m.conversation_id,
                m.sender_id,
                m.receiver_id,
                c.product_id,
                m.content,
                m.created_at,
                s.username AS sender_name,
                r.username AS receiver_name,
                p.title AS product_title,
                p.images[1] AS product_image
             FROM messages m
             JOIN conversations c ON c.id = m.conversation_id
             LEFT JOIN users s ON s.id = m.sender_id
             LEFT JOIN users r ON r.id = m.receiver_id
             LEFT JOIN products p ON p.id = c.product_id
             WHERE m.sender_id = $1 OR m.receiver_id = $1
             ORDER BY m.created_at DESC, m.seq DESC",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(messages)
    }
}
