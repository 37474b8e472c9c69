use std::path::PathBuf;

use serde::de::DeserializeOwned;
use tracing::debug;

use crate::errors::AppError;
use crate::models::{Achievement, Document, InterviewQuestion, Notification, Story, User};

/// One of the `mocked/*.json` files.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FixtureFile {
    Users,
    Achievements,
    Documents,
    Stories,
    InterviewQuestions,
    Notifications,
}

impl FixtureFile {
    pub fn file_name(self) -> &'static str {
        match self {
            FixtureFile::Users => "users.json",
            FixtureFile::Achievements => "achievements.json",
            FixtureFile::Documents => "documents.json",
            FixtureFile::Stories => "stories.json",
            FixtureFile::InterviewQuestions => "interview_questions.json",
            FixtureFile::Notifications => "notifications.json",
        }
    }

    fn embedded(self) -> &'static str {
        match self {
            FixtureFile::Users => include_str!("../../mocked/users.json"),
            FixtureFile::Achievements => include_str!("../../mocked/achievements.json"),
            FixtureFile::Documents => include_str!("../../mocked/documents.json"),
            FixtureFile::Stories => include_str!("../../mocked/stories.json"),
            FixtureFile::InterviewQuestions => {
                include_str!("../../mocked/interview_questions.json")
            }
            FixtureFile::Notifications => include_str!("../../mocked/notifications.json"),
        }
    }
}

/// Where fixtures are read from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FixtureSource {
    /// Copies compiled into the binary.
    Embedded,
    Directory(PathBuf),
}

impl FixtureSource {
    pub fn from_dir(dir: Option<PathBuf>) -> Self {
        dir.map_or(FixtureSource::Embedded, FixtureSource::Directory)
    }

    /// Reads and decodes one fixture file.
    pub async fn read<T: DeserializeOwned>(&self, file: FixtureFile) -> Result<Vec<T>, AppError> {
        match self {
            FixtureSource::Embedded => decode(file, file.embedded()),
            FixtureSource::Directory(dir) => {
                let path = dir.join(file.file_name());
                debug!("Reading fixture {}", path.display());
                let raw = tokio::fs::read_to_string(&path)
                    .await
                    .map_err(|e| AppError::Fixture(format!("{}: {e}", path.display())))?;
                decode(file, &raw)
            }
        }
    }
}

fn decode<T: DeserializeOwned>(file: FixtureFile, raw: &str) -> Result<Vec<T>, AppError> {
    serde_json::from_str(raw).map_err(|e| AppError::Fixture(format!("{}: {e}", file.file_name())))
}

/// Every fixture table, used to seed the mutable mock API.
#[derive(Debug, Clone)]
pub struct Fixtures {
    pub users: Vec<User>,
    pub achievements: Vec<Achievement>,
    pub documents: Vec<Document>,
    pub stories: Vec<Story>,
    pub interview_questions: Vec<InterviewQuestion>,
    pub notifications: Vec<Notification>,
}

impl Fixtures {
    pub fn embedded() -> Result<Self, AppError> {
        Ok(Self {
            users: decode(FixtureFile::Users, FixtureFile::Users.embedded())?,
            achievements: decode(FixtureFile::Achievements, FixtureFile::Achievements.embedded())?,
            documents: decode(FixtureFile::Documents, FixtureFile::Documents.embedded())?,
            stories: decode(FixtureFile::Stories, FixtureFile::Stories.embedded())?,
            interview_questions: decode(
                FixtureFile::InterviewQuestions,
                FixtureFile::InterviewQuestions.embedded(),
            )?,
            notifications: decode(
                FixtureFile::Notifications,
                FixtureFile::Notifications.embedded(),
            )?,
        })
    }

    pub async fn load(source: &FixtureSource) -> Result<Self, AppError> {
        Ok(Self {
            users: source.read(FixtureFile::Users).await?,
            achievements: source.read(FixtureFile::Achievements).await?,
            documents: source.read(FixtureFile::Documents).await?,
            stories: source.read(FixtureFile::Stories).await?,
            interview_questions: source.read(FixtureFile::InterviewQuestions).await?,
            notifications: source.read(FixtureFile::Notifications).await?,
        })
    }
}
