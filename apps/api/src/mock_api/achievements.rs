//! Achievement CRUD and its bookkeeping on the owning user.
//!
//! Points and the owner's achievement list move together: both writes happen
//! under one table lock, so no reader ever sees one without the other.

use chrono::Utc;
use tracing::{info, warn};

use crate::errors::AppError;
use crate::mock_api::{new_id, require_non_empty, MockApi};
use crate::models::{Achievement, AchievementPatch, NewAchievement, User, MAX_ACHIEVEMENT_POINTS};
use crate::stats::level_for_points;

fn check_points(points: u32) -> Result<(), AppError> {
    if points > MAX_ACHIEVEMENT_POINTS {
        return Err(AppError::Validation(format!(
            "points must be at most {MAX_ACHIEVEMENT_POINTS}, got {points}"
        )));
    }
    Ok(())
}

fn total_overflow(user_id: &str) -> AppError {
    AppError::Validation(format!("total points for user {user_id} would overflow"))
}

fn set_points(user: &mut User, total_points: u32) {
    user.total_points = total_points;
    user.level = level_for_points(total_points);
    user.updated_at = Utc::now();
}

impl MockApi {
    /// Achievements owned by `user_id`, newest first.
    pub async fn get_achievements(&self, user_id: &str) -> Result<Vec<Achievement>, AppError> {
        self.network
            .simulate(&format!("GET /achievements?userId={user_id}"))
            .await?;
        let tables = self.tables.read().await;
        let mut owned: Vec<Achievement> = tables
            .achievements
            .iter()
            .filter(|a| a.user_id == user_id)
            .cloned()
            .collect();
        owned.sort_by(|a, b| {
            b.date
                .cmp(&a.date)
                .then_with(|| b.created_at.cmp(&a.created_at))
        });
        Ok(owned)
    }

    pub async fn get_achievement(&self, id: &str) -> Result<Achievement, AppError> {
        self.network
            .simulate(&format!("GET /achievements/{id}"))
            .await?;
        let tables = self.tables.read().await;
        tables
            .achievements
            .iter()
            .find(|a| a.id == id)
            .cloned()
            .ok_or_else(|| AppError::NotFound(format!("Achievement {id} not found")))
    }

    /// Stores the achievement, credits its points to the owner and appends
    /// its id to the owner's list.
    pub async fn create_achievement(&self, new: NewAchievement) -> Result<Achievement, AppError> {
        require_non_empty("title", &new.title)?;
        if let Some(points) = new.points {
            check_points(points)?;
        }
        self.network.simulate("POST /achievements").await?;

        let mut guard = self.tables.write().await;
        let tables = &mut *guard;
        let user = tables
            .users
            .iter_mut()
            .find(|u| u.id == new.user_id)
            .ok_or_else(|| AppError::NotFound(format!("User {} not found", new.user_id)))?;

        let achievement = new.into_achievement(new_id(), Utc::now());
        let total = user
            .total_points
            .checked_add(achievement.points)
            .ok_or_else(|| total_overflow(&user.id))?;
        set_points(user, total);
        user.achievements.push(achievement.id.clone());
        tables.achievements.push(achievement.clone());

        info!(
            "Created achievement {} (+{} points) for user {}",
            achievement.id, achievement.points, achievement.user_id
        );
        Ok(achievement)
    }

    /// Applies `patch`; a points change shifts the owner's total by the delta.
    pub async fn update_achievement(
        &self,
        id: &str,
        patch: AchievementPatch,
    ) -> Result<Achievement, AppError> {
        if let Some(title) = &patch.title {
            require_non_empty("title", title)?;
        }
        if let Some(points) = patch.points {
            check_points(points)?;
        }
        self.network
            .simulate(&format!("PUT /achievements/{id}"))
            .await?;

        let mut guard = self.tables.write().await;
        let tables = &mut *guard;
        let index = tables
            .achievements
            .iter()
            .position(|a| a.id == id)
            .ok_or_else(|| AppError::NotFound(format!("Achievement {id} not found")))?;

        let owner_id = tables.achievements[index].user_id.clone();
        let old_points = tables.achievements[index].points;
        let new_points = patch.points.unwrap_or(old_points);

        // Settle the owner's new total before touching the row.
        if new_points != old_points {
            match tables.users.iter_mut().find(|u| u.id == owner_id) {
                Some(user) => {
                    let total = user
                        .total_points
                        .saturating_sub(old_points)
                        .checked_add(new_points)
                        .ok_or_else(|| total_overflow(&user.id))?;
                    set_points(user, total);
                }
                None => warn!(
                    "Achievement {id} belongs to unknown user {owner_id}; points not adjusted"
                ),
            }
        }

        let achievement = &mut tables.achievements[index];
        patch.apply(achievement);
        Ok(achievement.clone())
    }

    /// Removes the achievement and reverses its effect on the owner.
    pub async fn delete_achievement(&self, id: &str) -> Result<Achievement, AppError> {
        self.network
            .simulate(&format!("DELETE /achievements/{id}"))
            .await?;

        let mut guard = self.tables.write().await;
        let tables = &mut *guard;
        let index = tables
            .achievements
            .iter()
            .position(|a| a.id == id)
            .ok_or_else(|| AppError::NotFound(format!("Achievement {id} not found")))?;
        let removed = tables.achievements.remove(index);

        match tables.users.iter_mut().find(|u| u.id == removed.user_id) {
            Some(user) => {
                let total = user.total_points.saturating_sub(removed.points);
                set_points(user, total);
                user.achievements.retain(|a| a != &removed.id);
            }
            None => warn!(
                "Deleted achievement {id} had no owner {}; nothing to reverse",
                removed.user_id
            ),
        }

        info!(
            "Deleted achievement {} (-{} points) for user {}",
            removed.id, removed.points, removed.user_id
        );
        Ok(removed)
    }

    pub async fn like_achievement(&self, id: &str) -> Result<Achievement, AppError> {
        self.network
            .simulate(&format!("POST /achievements/{id}/like"))
            .await?;
        let mut tables = self.tables.write().await;
        let achievement = tables
            .achievements
            .iter_mut()
            .find(|a| a.id == id)
            .ok_or_else(|| AppError::NotFound(format!("Achievement {id} not found")))?;
        achievement.likes += 1;
        Ok(achievement.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock_api::test_support::instant_api;
    use crate::models::achievement::Impact;
    use crate::models::Category;

    fn draft(user_id: &str, points: Option<u32>) -> NewAchievement {
        NewAchievement {
            user_id: user_id.to_string(),
            title: "Shipped the search rewrite".to_string(),
            description: "Halved query latency".to_string(),
            category: Category::Technical,
            impact: Impact::High,
            points,
            date: None,
        }
    }

    #[tokio::test]
    async fn test_create_credits_owner() {
        let api = instant_api();
        let created = api.create_achievement(draft("1", Some(50))).await.unwrap();

        let user = api.get_user("1").await.unwrap();
        assert_eq!(user.total_points, 1300);
        assert!(user.achievements.contains(&created.id));
        assert_eq!(user.achievements.last(), Some(&created.id));
    }

    #[tokio::test]
    async fn test_create_then_delete_is_net_zero() {
        let api = instant_api();
        let before = api.get_user("1").await.unwrap();

        let created = api.create_achievement(draft("1", Some(50))).await.unwrap();
        api.delete_achievement(&created.id).await.unwrap();

        let after = api.get_user("1").await.unwrap();
        assert_eq!(after.total_points, 1250);
        assert_eq!(after.achievements, before.achievements);
        assert_eq!(after.level, before.level);
        assert!(matches!(
            api.get_achievement(&created.id).await,
            Err(AppError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_create_rejects_oversized_points() {
        let api = instant_api();
        let err = api
            .create_achievement(draft("1", Some(u32::MAX)))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));

        let user = api.get_user("1").await.unwrap();
        assert_eq!(user.total_points, 1250);
        assert_eq!(user.achievements.len(), 3);
        assert!(api.get_dashboard_stats("1").await.is_ok());
    }

    #[tokio::test]
    async fn test_net_zero_at_points_ceiling() {
        let api = instant_api();
        let created = api
            .create_achievement(draft("1", Some(MAX_ACHIEVEMENT_POINTS)))
            .await
            .unwrap();
        assert_eq!(
            api.get_user("1").await.unwrap().total_points,
            1250 + MAX_ACHIEVEMENT_POINTS
        );

        api.delete_achievement(&created.id).await.unwrap();
        assert_eq!(api.get_user("1").await.unwrap().total_points, 1250);
    }

    #[tokio::test]
    async fn test_points_default_from_impact() {
        let api = instant_api();
        let created = api.create_achievement(draft("2", None)).await.unwrap();
        assert_eq!(created.points, Impact::High.points());
        assert_eq!(api.get_user("2").await.unwrap().total_points, 640 + 50);
    }

    #[tokio::test]
    async fn test_level_follows_points() {
        let api = instant_api();
        // 1250 + 250 crosses into level 4
        api.create_achievement(draft("1", Some(250))).await.unwrap();
        assert_eq!(api.get_user("1").await.unwrap().level, 4);
    }

    #[tokio::test]
    async fn test_unknown_owner_rejected_without_side_effects() {
        let api = instant_api();
        let err = api.create_achievement(draft("ghost", None)).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
        assert!(api.get_achievements("ghost").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_empty_title_rejected() {
        let api = instant_api();
        let mut new = draft("1", None);
        new.title = "   ".to_string();
        assert!(matches!(
            api.create_achievement(new).await,
            Err(AppError::Validation(_))
        ));
    }

    #[tokio::test]
    async fn test_get_achievements_filters_by_owner() {
        let api = instant_api();
        api.create_achievement(draft("2", None)).await.unwrap();
        api.create_achievement(draft("1", None)).await.unwrap();

        for user_id in ["1", "2"] {
            let owned = api.get_achievements(user_id).await.unwrap();
            assert!(!owned.is_empty());
            assert!(owned.iter().all(|a| a.user_id == user_id));
        }
        assert_eq!(api.get_achievements("1").await.unwrap().len(), 4);
    }

    #[tokio::test]
    async fn test_update_points_shifts_total_by_delta() {
        let api = instant_api();
        // seed achievement "2" is worth 25
        let updated = api
            .update_achievement(
                "2",
                AchievementPatch {
                    points: Some(40),
                    ..AchievementPatch::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.points, 40);
        assert_eq!(api.get_user("1").await.unwrap().total_points, 1265);
    }

    #[tokio::test]
    async fn test_update_rejects_oversized_points_untouched() {
        let api = instant_api();
        let err = api
            .update_achievement(
                "2",
                AchievementPatch {
                    title: Some("Renamed".to_string()),
                    points: Some(u32::MAX),
                    ..AchievementPatch::default()
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));

        let row = api.get_achievement("2").await.unwrap();
        assert_eq!(row.points, 25);
        assert_ne!(row.title, "Renamed");
        assert_eq!(api.get_user("1").await.unwrap().total_points, 1250);
    }

    #[tokio::test]
    async fn test_update_without_points_keeps_total() {
        let api = instant_api();
        api.update_achievement(
            "1",
            AchievementPatch {
                title: Some("Led billing migration".to_string()),
                ..AchievementPatch::default()
            },
        )
        .await
        .unwrap();
        assert_eq!(api.get_user("1").await.unwrap().total_points, 1250);
    }

    #[tokio::test]
    async fn test_delete_unknown_is_not_found() {
        let api = instant_api();
        assert!(matches!(
            api.delete_achievement("nope").await,
            Err(AppError::NotFound(_))
        ));
        assert_eq!(api.get_user("1").await.unwrap().total_points, 1250);
    }

    #[tokio::test]
    async fn test_like_increments() {
        let api = instant_api();
        let liked = api.like_achievement("3").await.unwrap();
        assert_eq!(liked.likes, 3);
    }
}
