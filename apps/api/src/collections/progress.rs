//! `progress` collection: timestamped metric readings, optionally tied to a goal.

use chrono::Utc;
use serde::Deserialize;

use crate::collections::{decode_all, to_fields, Collection, Direction, DocumentStore, Query, StoreError};
use crate::models::ProgressEntry;

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewProgress {
    pub user_id: String,
    pub goal_id: Option<String>,
    pub metric: String,
    pub value: f64,
    pub note: Option<String>,
}

pub async fn record_progress(
    store: &dyn DocumentStore,
    new: NewProgress,
) -> Result<ProgressEntry, StoreError> {
    let mut entry = ProgressEntry {
        id: String::new(),
        user_id: new.user_id,
        goal_id: new.goal_id,
        metric: new.metric,
        value: new.value,
        note: new.note,
        recorded_at: Utc::now(),
    };
    entry.id = store.add(Collection::Progress, to_fields(&entry)?).await?;
    Ok(entry)
}

/// Readings for `user_id` (optionally one goal), oldest first.
pub async fn get_user_progress(
    store: &dyn DocumentStore,
    user_id: &str,
    goal_id: Option<&str>,
) -> Result<Vec<ProgressEntry>, StoreError> {
    let mut query = Query::new().where_eq("userId", user_id);
    if let Some(goal_id) = goal_id {
        query = query.where_eq("goalId", goal_id);
    }
    let query = query.order_by("recordedAt", Direction::Ascending);
    decode_all(store.query(Collection::Progress, &query).await?)
}
