use std::sync::{Arc, Mutex};

use anyhow::Result;
use async_trait::async_trait;

use super::Destination;
use crate::config::AppConfig;
use crate::model::clubhouse::{CreateEpic, CreateStory};

/// Records every upload and hands out sequential ids.
#[derive(Default)]
pub struct MockDestination {
    pub epics: Arc<Mutex<Vec<CreateEpic>>>,
    pub stories: Arc<Mutex<Vec<CreateStory>>>,
    pub files: Arc<Mutex<Vec<(String, String, Vec<u8>)>>>,
    next_id: Mutex<i64>,
    fail_on_story: Option<String>,
}

impl MockDestination {
    pub fn new() -> Self {
        Self {
            next_id: Mutex::new(100),
            ..Default::default()
        }
    }

    pub fn failing_on_story(mut self, external_id: &str) -> Self {
        self.fail_on_story = Some(external_id.to_string());
        self
    }

    fn next(&self) -> i64 {
        let mut id = self.next_id.lock().unwrap();
        *id += 1;
        *id
    }
}

#[async_trait]
impl Destination for MockDestination {
    fn name(&self) -> &str {
        "Mock"
    }

    async fn upload_epic(&self, epic: &CreateEpic) -> Result<i64> {
        self.epics.lock().unwrap().push(epic.clone());
        Ok(self.next())
    }

    async fn upload_story(&self, story: &CreateStory) -> Result<i64> {
        if self.fail_on_story.as_deref() == Some(story.external_id.as_str()) {
            anyhow::bail!("Mock failure for {}", story.external_id);
        }
        self.stories.lock().unwrap().push(story.clone());
        Ok(self.next())
    }

    async fn upload_attachment(
        &self,
        file: Vec<u8>,
        file_name: &str,
        external_id: &str,
    ) -> Result<i64> {
        self.files
            .lock()
            .unwrap()
            .push((file_name.to_string(), external_id.to_string(), file));
        Ok(self.next())
    }
}

#[tokio::test]
async fn mock_hands_out_increasing_ids() {
    let destination = MockDestination::new();
    let first = destination
        .upload_attachment(vec![1], "a.txt", "1")
        .await
        .unwrap();
    let second = destination
        .upload_attachment(vec![2], "b.txt", "2")
        .await
        .unwrap();
    assert!(second > first);
    assert_eq!(destination.files.lock().unwrap().len(), 2);
}

#[test]
fn create_destination_requires_token() {
    if std::env::var(crate::config::TOKEN_ENV).is_ok() {
        return;
    }
    let config = AppConfig::default();
    let err = super::create_destination(&config).err().unwrap();
    assert!(err.to_string().contains("api_token"));
}

#[test]
fn create_destination_builds_clubhouse_client() {
    let config: AppConfig = toml::from_str("[clubhouse]\napi_token = \"tok\"\n").unwrap();
    let destination = super::create_destination(&config).unwrap();
    assert_eq!(destination.name(), "Clubhouse");
}
