//! `goals` collection.

use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::collections::{
    decode_all, get_required, to_fields, Collection, Direction, DocumentStore, Query, StoreError,
};
use crate::models::{Goal, GoalStatus, NewGoal};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GoalChanges {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub progress: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<GoalStatus>,
}

/// Goals for `user_id`, newest first.
pub async fn get_user_goals(
    store: &dyn DocumentStore,
    user_id: &str,
) -> Result<Vec<Goal>, StoreError> {
    let query = Query::new()
        .where_eq("userId", user_id)
        .order_by("createdAt", Direction::Descending);
    decode_all(store.query(Collection::Goals, &query).await?)
}

pub async fn add_goal(store: &dyn DocumentStore, new: NewGoal) -> Result<Goal, StoreError> {
    let now = Utc::now();
    let mut goal = Goal {
        id: String::new(),
        user_id: new.user_id,
        title: new.title,
        description: new.description,
        target_date: new.target_date,
        progress: 0,
        status: GoalStatus::NotStarted,
        created_at: now,
        updated_at: now,
    };
    goal.id = store.add(Collection::Goals, to_fields(&goal)?).await?;
    Ok(goal)
}

pub async fn update_goal(
    store: &dyn DocumentStore,
    goal_id: &str,
    changes: GoalChanges,
) -> Result<Goal, StoreError> {
    let mut fields = to_fields(&changes)?;
    if let Value::Object(map) = &mut fields {
        map.insert("updatedAt".to_string(), serde_json::to_value(Utc::now())?);
    }
    store.update(Collection::Goals, goal_id, fields).await?;
    get_required(store, Collection::Goals, goal_id).await
}

pub async fn delete_goal(store: &dyn DocumentStore, goal_id: &str) -> Result<(), StoreError> {
    store.delete(Collection::Goals, goal_id).await
}
