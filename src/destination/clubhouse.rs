use anyhow::{bail, Context, Result};
use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use serde::Deserialize;

use super::Destination;
use crate::model::clubhouse::{CreateEpic, CreateStory};

pub struct ClubhouseClient {
    base_url: String,
    token: String,
    client: reqwest::Client,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct File {
    pub id: i64,
    #[serde(default)]
    pub external_id: Option<String>,
    #[serde(default)]
    pub name: String,
}

#[derive(Deserialize)]
struct Created {
    id: i64,
}

impl ClubhouseClient {
    pub fn new(base_url: &str, token: String) -> Self {
        Self {
            base_url: format!("{}/", base_url.trim_end_matches('/')),
            token,
            client: reqwest::Client::new(),
        }
    }

    fn url(&self, resource: &str) -> String {
        format!("{}{resource}", self.base_url)
    }

    fn request(&self, method: reqwest::Method, resource: &str) -> reqwest::RequestBuilder {
        self.client
            .request(method, self.url(resource))
            .query(&[("token", &self.token)])
    }

    async fn send(&self, req: reqwest::RequestBuilder, what: &str) -> Result<reqwest::Response> {
        let resp = req
            .send()
            .await
            .with_context(|| format!("Clubhouse {what} request failed"))?;
        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            bail!("Clubhouse {what} failed ({status}): {body}");
        }
        Ok(resp)
    }

    pub async fn create_epic(&self, epic: &CreateEpic) -> Result<i64> {
        let req = self.request(reqwest::Method::POST, "epics").json(epic);
        let created: Created = self
            .send(req, "create epic")
            .await?
            .json()
            .await
            .context("Failed to parse Clubhouse epic response")?;
        Ok(created.id)
    }

    pub async fn create_story(&self, story: &CreateStory) -> Result<i64> {
        let req = self.request(reqwest::Method::POST, "stories").json(story);
        let created: Created = self
            .send(req, "create story")
            .await?
            .json()
            .await
            .context("Failed to parse Clubhouse story response")?;
        Ok(created.id)
    }

    /// Upload a file, then tag it with `external_id` when one is given.
    pub async fn create_file(
        &self,
        file: Vec<u8>,
        file_name: &str,
        external_id: &str,
    ) -> Result<File> {
        let form = Form::new().part("file", Part::bytes(file).file_name(file_name.to_string()));
        let req = self.request(reqwest::Method::POST, "files").multipart(form);
        let files: Vec<File> = self
            .send(req, "upload file")
            .await?
            .json()
            .await
            .context("Failed to parse Clubhouse file response")?;
        let uploaded = files
            .into_iter()
            .next()
            .context("Clubhouse returned no file for the upload")?;

        if external_id.is_empty() {
            return Ok(uploaded);
        }
        self.update_file(uploaded.id, external_id).await
    }

    pub async fn update_file(&self, id: i64, external_id: &str) -> Result<File> {
        let body = serde_json::json!({ "external_id": external_id });
        let req = self
            .request(reqwest::Method::PUT, &format!("files/{id}"))
            .json(&body);
        self.send(req, "update file")
            .await?
            .json()
            .await
            .context("Failed to parse Clubhouse file")
    }
}

// Housekeeping calls for files already in Clubhouse.
#[allow(dead_code)]
impl ClubhouseClient {
    pub async fn read_file(&self, id: i64) -> Result<File> {
        let req = self.request(reqwest::Method::GET, &format!("files/{id}"));
        self.send(req, "read file")
            .await?
            .json()
            .await
            .context("Failed to parse Clubhouse file")
    }

    pub async fn list_files(&self) -> Result<Vec<File>> {
        let req = self.request(reqwest::Method::GET, "files");
        self.send(req, "list files")
            .await?
            .json()
            .await
            .context("Failed to parse Clubhouse file list")
    }

    pub async fn delete_file(&self, id: i64) -> Result<()> {
        let req = self.request(reqwest::Method::DELETE, &format!("files/{id}"));
        self.send(req, "delete file").await?;
        Ok(())
    }
}

#[async_trait]
impl Destination for ClubhouseClient {
    fn name(&self) -> &str {
        "Clubhouse"
    }

    async fn upload_epic(&self, epic: &CreateEpic) -> Result<i64> {
        self.create_epic(epic).await
    }

    async fn upload_story(&self, story: &CreateStory) -> Result<i64> {
        self.create_story(story).await
    }

    async fn upload_attachment(
        &self,
        file: Vec<u8>,
        file_name: &str,
        external_id: &str,
    ) -> Result<i64> {
        Ok(self.create_file(file, file_name, external_id).await?.id)
    }
}
