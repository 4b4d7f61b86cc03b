use serde::Deserialize;

/// Jira username to Clubhouse member id. At most one entry should be the default.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UserMap {
    pub jira_username: String,
    pub clubhouse_id: String,
    #[serde(default)]
    pub default: bool,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProjectMap {
    pub jira_project_key: String,
    pub clubhouse_project_id: i64,
}

/// The lookup tables one migration run resolves identities against.
#[derive(Debug, Clone, Copy)]
pub struct Mappings<'a> {
    pub users: &'a [UserMap],
    pub projects: &'a [ProjectMap],
}

impl<'a> Mappings<'a> {
    pub fn new(users: &'a [UserMap], projects: &'a [ProjectMap]) -> Self {
        Self { users, projects }
    }

    /// Clubhouse id for a Jira username.
    ///
    /// Scans in order and returns the first exact match. Without one, falls back to the
    /// last entry marked `default`, and failing that returns `""`. An empty reporter means
    /// the story must not be created; that decision is left to the uploader.
    pub fn resolve_user(&self, jira_username: &str) -> String {
        let mut default_user: &str = "";
        for user in self.users {
            if user.jira_username == jira_username {
                return user.clubhouse_id.clone();
            }
            if user.default {
                default_user = user.clubhouse_id.as_str();
            }
        }

        if default_user.is_empty() {
            tracing::warn!(
                username = jira_username,
                "unknown user and no default user mapped"
            );
        } else {
            tracing::warn!(
                username = jira_username,
                default_user,
                "unknown user, using default user"
            );
        }
        default_user.to_string()
    }

    /// Clubhouse project id for a Jira project key; `0` when unmapped.
    pub fn resolve_project(&self, jira_project_key: &str) -> i64 {
        self.projects
            .iter()
            .find(|p| p.jira_project_key == jira_project_key)
            .map(|p| p.clubhouse_project_id)
            .unwrap_or(0)
    }
}
