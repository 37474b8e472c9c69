//! Aggregates derived from the user, achievement and document tables.
//!
//! Shared by the mock API (live tables) and the mock data service (fixtures),
//! so both surfaces report the same numbers for the same rows.

use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::models::{Achievement, Category, Document, DocumentKind, User};

/// Points needed to advance one level.
pub const POINTS_PER_LEVEL: u32 = 500;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LevelProgress {
    pub level: u32,
    pub total_points: u32,
    /// Percent of the way to the next level, 0 – 99.
    pub progress_percent: u32,
    pub points_to_next_level: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub user_id: String,
    pub total_achievements: usize,
    pub total_points: u32,
    /// Sum of `points` over the user's achievements. May differ from
    /// `total_points` for seed users whose history predates the tables.
    pub achievement_points: u64,
    pub total_likes: u64,
    pub achievements_this_month: usize,
    pub category_breakdown: BTreeMap<Category, usize>,
    pub documents_created: usize,
    pub resumes: usize,
    pub cover_letters: usize,
    pub total_downloads: u64,
    pub streak: u32,
    pub level: LevelProgress,
}

pub fn level_for_points(points: u32) -> u32 {
    points / POINTS_PER_LEVEL + 1
}

pub fn level_progress(total_points: u32) -> LevelProgress {
    let into_level = total_points % POINTS_PER_LEVEL;
    LevelProgress {
        level: level_for_points(total_points),
        total_points,
        progress_percent: into_level * 100 / POINTS_PER_LEVEL,
        points_to_next_level: POINTS_PER_LEVEL - into_level,
    }
}

/// Builds the dashboard for `user` from whatever rows are passed in.
/// Rows owned by other users are ignored.
pub fn compute_dashboard_stats(
    user: &User,
    achievements: &[Achievement],
    documents: &[Document],
    today: NaiveDate,
) -> DashboardStats {
    let owned: Vec<&Achievement> = achievements
        .iter()
        .filter(|a| a.user_id == user.id)
        .collect();
    let docs: Vec<&Document> = documents.iter().filter(|d| d.user_id == user.id).collect();

    let mut category_breakdown = BTreeMap::new();
    for achievement in &owned {
        *category_breakdown.entry(achievement.category).or_insert(0) += 1;
    }

    let achievements_this_month = owned
        .iter()
        .filter(|a| a.date.year() == today.year() && a.date.month() == today.month())
        .count();

    DashboardStats {
        user_id: user.id.clone(),
        total_achievements: owned.len(),
        total_points: user.total_points,
        achievement_points: owned.iter().map(|a| u64::from(a.points)).sum(),
        total_likes: owned.iter().map(|a| u64::from(a.likes)).sum(),
        achievements_this_month,
        category_breakdown,
        documents_created: docs.len(),
        resumes: docs.iter().filter(|d| d.kind == DocumentKind::Resume).count(),
        cover_letters: docs
            .iter()
            .filter(|d| d.kind == DocumentKind::CoverLetter)
            .count(),
        total_downloads: docs.iter().map(|d| u64::from(d.downloads)).sum(),
        streak: user.streak,
        level: level_progress(user.total_points),
    }
}
