use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DocumentKind {
    Resume,
    CoverLetter,
}

/// Structured sections (resumes) or plain text (cover letters).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DocumentContent {
    Text(String),
    Structured(Map<String, Value>),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    pub id: String,
    pub user_id: String,
    #[serde(rename = "type")]
    pub kind: DocumentKind,
    pub template: String,
    pub content: DocumentContent,
    pub rating: Option<f32>,
    pub downloads: u32,
    pub based_on_achievements: u32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewDocument {
    pub user_id: String,
    #[serde(rename = "type")]
    pub kind: DocumentKind,
    pub template: String,
    pub content: DocumentContent,
    #[serde(default)]
    pub based_on_achievements: u32,
}

impl NewDocument {
    pub fn into_document(self, id: String, now: DateTime<Utc>) -> Document {
        Document {
            id,
            user_id: self.user_id,
            kind: self.kind,
            template: self.template,
            content: self.content,
            rating: None,
            downloads: 0,
            based_on_achievements: self.based_on_achievements,
            created_at: now,
            updated_at: now,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentPatch {
    pub template: Option<String>,
    pub content: Option<DocumentContent>,
    pub rating: Option<f32>,
}

impl DocumentPatch {
    pub fn apply(self, document: &mut Document) {
        if let Some(template) = self.template {
            document.template = template;
        }
        if let Some(content) = self.content {
            document.content = content;
        }
        if let Some(rating) = self.rating {
            document.rating = Some(rating);
        }
        document.updated_at = Utc::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_content_accepts_raw_text() {
        let content: DocumentContent = serde_json::from_value(json!("Dear hiring manager")).unwrap();
        assert_eq!(content, DocumentContent::Text("Dear hiring manager".to_string()));
    }

    #[test]
    fn test_content_accepts_nested_object() {
        let content: DocumentContent =
            serde_json::from_value(json!({"summary": "Engineer", "skills": ["Rust"]})).unwrap();
        assert!(matches!(content, DocumentContent::Structured(ref map) if map.contains_key("skills")));
    }

    #[test]
    fn test_kind_serializes_as_type() {
        let doc = NewDocument {
            user_id: "1".to_string(),
            kind: DocumentKind::CoverLetter,
            template: "classic".to_string(),
            content: DocumentContent::Text(String::new()),
            based_on_achievements: 2,
        }
        .into_document("d".to_string(), Utc::now());
        let value = serde_json::to_value(&doc).unwrap();
        assert_eq!(value["type"], "coverLetter");
        assert_eq!(value["basedOnAchievements"], 2);
    }
}
