pub mod clubhouse;

use anyhow::{Context, Result};
use async_trait::async_trait;

use crate::config::{AppConfig, TOKEN_ENV};
use crate::model::clubhouse::{CreateEpic, CreateStory};

/// Where a migration bundle is uploaded. Each call returns the remote id of what it created.
#[async_trait]
pub trait Destination: Send + Sync {
    fn name(&self) -> &str;
    async fn upload_epic(&self, epic: &CreateEpic) -> Result<i64>;
    async fn upload_story(&self, story: &CreateStory) -> Result<i64>;
    async fn upload_attachment(
        &self,
        file: Vec<u8>,
        file_name: &str,
        external_id: &str,
    ) -> Result<i64>;
}

#[cfg(test)]
pub mod tests;

pub fn create_destination(config: &AppConfig) -> Result<Box<dyn Destination>> {
    let token = config.api_token().with_context(|| {
        format!("No Clubhouse API token. Set [clubhouse] api_token or {TOKEN_ENV}")
    })?;
    Ok(Box::new(clubhouse::ClubhouseClient::new(
        config.api_url(),
        token,
    )))
}
