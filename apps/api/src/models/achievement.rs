use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Technical,
    Leadership,
    Collaboration,
    Innovation,
    Learning,
    Recognition,
}

/// Upper bound on the points a single achievement may carry.
pub const MAX_ACHIEVEMENT_POINTS: u32 = 10_000;

/// Coarse impact level; decides the default point value of an achievement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Impact {
    Low,
    Medium,
    High,
    Critical,
}

impl Impact {
    pub fn points(self) -> u32 {
        match self {
            Impact::Low => 10,
            Impact::Medium => 25,
            Impact::High => 50,
            Impact::Critical => 100,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Achievement {
    pub id: String,
    /// Owner reference. Not checked against the user table on read.
    pub user_id: String,
    pub title: String,
    pub description: String,
    pub category: Category,
    pub impact: Impact,
    pub points: u32,
    pub likes: u32,
    pub comments: u32,
    pub date: NaiveDate,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewAchievement {
    pub user_id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub category: Category,
    pub impact: Impact,
    /// Defaults to `impact.points()`.
    pub points: Option<u32>,
    /// Defaults to today.
    pub date: Option<NaiveDate>,
}

impl NewAchievement {
    pub fn into_achievement(self, id: String, now: DateTime<Utc>) -> Achievement {
        let points = self.points.unwrap_or_else(|| self.impact.points());
        Achievement {
            id,
            user_id: self.user_id,
            title: self.title,
            description: self.description,
            category: self.category,
            impact: self.impact,
            points,
            likes: 0,
            comments: 0,
            date: self.date.unwrap_or_else(|| now.date_naive()),
            created_at: now,
            updated_at: now,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AchievementPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub category: Option<Category>,
    pub impact: Option<Impact>,
    pub points: Option<u32>,
    pub date: Option<NaiveDate>,
}

impl AchievementPatch {
    pub fn apply(self, achievement: &mut Achievement) {
        if let Some(title) = self.title {
            achievement.title = title;
        }
        if let Some(description) = self.description {
            achievement.description = description;
        }
        if let Some(category) = self.category {
            achievement.category = category;
        }
        if let Some(impact) = self.impact {
            achievement.impact = impact;
        }
        if let Some(points) = self.points {
            achievement.points = points;
        }
        if let Some(date) = self.date {
            achievement.date = date;
        }
        achievement.updated_at = Utc::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft(points: Option<u32>) -> NewAchievement {
        NewAchievement {
            user_id: "1".to_string(),
            title: "Cut build times".to_string(),
            description: String::new(),
            category: Category::Technical,
            impact: Impact::Medium,
            points,
            date: None,
        }
    }

    #[test]
    fn test_points_default_to_impact() {
        let a = draft(None).into_achievement("a".to_string(), Utc::now());
        assert_eq!(a.points, Impact::Medium.points());
    }

    #[test]
    fn test_explicit_points_win() {
        let a = draft(Some(7)).into_achievement("a".to_string(), Utc::now());
        assert_eq!(a.points, 7);
        assert_eq!(a.likes, 0);
    }

    #[test]
    fn test_impact_points_are_ordered() {
        assert!(Impact::Low.points() < Impact::Medium.points());
        assert!(Impact::Medium.points() < Impact::High.points());
        assert!(Impact::High.points() < Impact::Critical.points());
    }

    #[test]
    fn test_wire_format_is_camel_case() {
        let a = draft(None).into_achievement("a".to_string(), Utc::now());
        let value = serde_json::to_value(&a).unwrap();
        assert_eq!(value["userId"], "1");
        assert_eq!(value["impact"], "medium");
    }
}
