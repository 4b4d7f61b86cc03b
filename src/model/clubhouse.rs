use chrono::{DateTime, Utc};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CreateEpic {
    pub description: String,
    pub name: String,
    pub external_id: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CreateTask {
    /// Jira key of the sub-task itself, kept for error reports.
    #[serde(skip)]
    pub key: String,
    pub description: String,
    /// Jira key of the owning story, matched against `CreateStory::external_id`.
    pub parent: String,
    pub complete: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CreateComment {
    pub text: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub author: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CreateAttachment {
    pub author: String,
    pub created_at: DateTime<Utc>,
    pub external_id: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CreateLabel {
    pub name: String,
}

impl CreateLabel {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CreateStory {
    pub comments: Vec<CreateComment>,
    pub created_at: DateTime<Utc>,
    pub description: String,
    pub external_id: String,
    pub labels: Vec<CreateLabel>,
    pub name: String,
    pub project_id: i64,
    pub story_type: String,
    pub epic_link: String,
    pub workflow_state_id: i64,
    /// Always serialized; Clubhouse wants `[]` rather than a missing field.
    pub owner_ids: Vec<String>,
    pub requested_by_id: String,
    pub estimate: i64,
    pub tasks: Vec<CreateTask>,
    /// Set by the uploader once the linked epic exists remotely.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub epic_id: Option<i64>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub file_ids: Vec<i64>,
    /// Shown in dry runs; the uploader takes these out and sends `file_ids` instead.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub attachments: Vec<CreateAttachment>,
}

/// Everything one migration run uploads: epics first, then stories with their tasks.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Data {
    pub epics: Vec<CreateEpic>,
    pub stories: Vec<CreateStory>,
}
