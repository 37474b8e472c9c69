pub mod achievement;
pub mod coaching;
pub mod content;
pub mod document;
pub mod user;

pub use achievement::{
    Achievement, AchievementPatch, Category, NewAchievement, MAX_ACHIEVEMENT_POINTS,
};
pub use coaching::{ChatMessage, ChatRole, Goal, GoalStatus, NewGoal, ProgressEntry};
pub use content::{InterviewQuestion, NewNotification, NewStory, Notification, Story};
pub use document::{Document, DocumentKind, DocumentPatch, NewDocument};
pub use user::{User, UserPatch};
