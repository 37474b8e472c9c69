use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SocialLinks {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub linkedin: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub github: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub twitter: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    pub avatar: Option<String>,
    pub title: String,
    pub level: u32,
    pub total_points: u32,
    pub streak: u32,
    /// Ids of the achievements this user owns, in creation order.
    pub achievements: Vec<String>,
    pub skills: Vec<String>,
    pub goals: Vec<String>,
    #[serde(default)]
    pub social_links: SocialLinks,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Profile fields a caller may change. Points, level and the achievement
/// list only move through the achievement operations.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserPatch {
    pub name: Option<String>,
    pub email: Option<String>,
    pub avatar: Option<String>,
    pub title: Option<String>,
    pub streak: Option<u32>,
    pub skills: Option<Vec<String>>,
    pub goals: Option<Vec<String>>,
    pub social_links: Option<SocialLinks>,
}

impl UserPatch {
    pub fn apply(self, user: &mut User) {
        if let Some(name) = self.name {
            user.name = name;
        }
        if let Some(email) = self.email {
            user.email = email;
        }
        if let Some(avatar) = self.avatar {
            user.avatar = Some(avatar);
        }
        if let Some(title) = self.title {
            user.title = title;
        }
        if let Some(streak) = self.streak {
            user.streak = streak;
        }
        if let Some(skills) = self.skills {
            user.skills = skills;
        }
        if let Some(goals) = self.goals {
            user.goals = goals;
        }
        if let Some(links) = self.social_links {
            user.social_links = links;
        }
        user.updated_at = Utc::now();
    }
}
