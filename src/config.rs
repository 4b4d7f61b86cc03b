use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::migrate::identity::{Mappings, ProjectMap, UserMap};

pub const DEFAULT_API_URL: &str = "https://api.clubhouse.io/api/v3/";
pub const TOKEN_ENV: &str = "CLUBHOUSE_API_TOKEN";

#[derive(Debug, Deserialize, Default)]
pub struct AppConfig {
    pub clubhouse: Option<ClubhouseConfig>,
    #[serde(default)]
    pub users: Vec<UserMap>,
    #[serde(default)]
    pub projects: Vec<ProjectMap>,
    /// Directory holding Jira attachments as `<issue key>/<attachment id>`.
    pub attachments_dir: Option<PathBuf>,
}

#[derive(Debug, Deserialize)]
pub struct ClubhouseConfig {
    #[serde(default)]
    pub api_token: String,
    #[serde(default = "default_api_url")]
    pub api_url: String,
}

fn default_api_url() -> String {
    DEFAULT_API_URL.to_string()
}

impl AppConfig {
    pub fn mappings(&self) -> Mappings<'_> {
        Mappings::new(&self.users, &self.projects)
    }

    /// API token from the environment if set, else from the config file.
    pub fn api_token(&self) -> Option<String> {
        std::env::var(TOKEN_ENV)
            .ok()
            .filter(|t| !t.is_empty())
            .or_else(|| {
                self.clubhouse
                    .as_ref()
                    .map(|c| c.api_token.clone())
                    .filter(|t| !t.is_empty())
            })
    }

    pub fn api_url(&self) -> &str {
        self.clubhouse
            .as_ref()
            .map(|c| c.api_url.as_str())
            .unwrap_or(DEFAULT_API_URL)
    }
}

pub fn data_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".jira2ch")
}

pub fn default_config_path() -> PathBuf {
    data_dir().join("config.toml")
}

pub fn load_config(path: &Path) -> Result<AppConfig> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config from {}", path.display()))?;
    let config: AppConfig = toml::from_str(&contents)
        .with_context(|| format!("Failed to parse {}", path.display()))?;

    let defaults = config.users.iter().filter(|u| u.default).count();
    if defaults > 1 {
        tracing::warn!(defaults, "more than one default user mapped, the last one wins");
    }
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_config(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn loads_mappings_and_clubhouse_settings() {
        let file = write_config(
            r#"
attachments_dir = "/tmp/jira-attachments"

[clubhouse]
api_token = "secret"

[[users]]
jira_username = "alice"
clubhouse_id = "5c1a-alice"

[[users]]
jira_username = "migration-bot"
clubhouse_id = "5c1a-bot"
default = true

[[projects]]
jira_project_key = "APP"
clubhouse_project_id = 12
"#,
        );

        let config = load_config(file.path()).unwrap();
        assert_eq!(config.users.len(), 2);
        assert!(!config.users[0].default);
        assert!(config.users[1].default);
        assert_eq!(config.projects[0].clubhouse_project_id, 12);
        assert_eq!(config.api_url(), DEFAULT_API_URL);
        assert_eq!(
            config.attachments_dir.as_deref(),
            Some(Path::new("/tmp/jira-attachments"))
        );

        let mappings = config.mappings();
        assert_eq!(mappings.resolve_user("alice"), "5c1a-alice");
        assert_eq!(mappings.resolve_user("carol"), "5c1a-bot");
        assert_eq!(mappings.resolve_project("APP"), 12);
    }

    #[test]
    fn mapping_tables_are_optional() {
        let file = write_config("[clubhouse]\napi_token = \"t\"\napi_url = \"http://localhost:9/\"\n");
        let config = load_config(file.path()).unwrap();
        assert!(config.users.is_empty());
        assert!(config.projects.is_empty());
        assert_eq!(config.api_url(), "http://localhost:9/");
    }

    #[test]
    fn missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_config(&dir.path().join("absent.toml")).unwrap_err();
        assert!(err.to_string().contains("Failed to read config"));
    }

    #[test]
    fn malformed_file_is_an_error() {
        let file = write_config("[[users]]\njira_username = 3\n");
        let err = load_config(file.path()).unwrap_err();
        assert!(err.to_string().contains("Failed to parse"));
    }
}
