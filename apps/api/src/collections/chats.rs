//! `chats` collection: the coach conversation log.

use chrono::Utc;

use crate::collections::{decode_all, to_fields, Collection, Direction, DocumentStore, Query, StoreError};
use crate::models::{ChatMessage, ChatRole};

pub async fn save_chat_message(
    store: &dyn DocumentStore,
    user_id: &str,
    role: ChatRole,
    content: &str,
) -> Result<ChatMessage, StoreError> {
    let mut message = ChatMessage {
        id: String::new(),
        user_id: user_id.to_string(),
        role,
        content: content.to_string(),
        timestamp: Utc::now(),
    };
    message.id = store.add(Collection::Chats, to_fields(&message)?).await?;
    Ok(message)
}

/// The latest `limit` messages, returned oldest first.
pub async fn get_chat_history(
    store: &dyn DocumentStore,
    user_id: &str,
    limit: usize,
) -> Result<Vec<ChatMessage>, StoreError> {
    let query = Query::new()
        .where_eq("userId", user_id)
        .order_by("timestamp", Direction::Descending)
        .limit(limit);
    let mut messages: Vec<ChatMessage> = decode_all(store.query(Collection::Chats, &query).await?)?;
    messages.reverse();
    Ok(messages)
}
