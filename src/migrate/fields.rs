use crate::model::jira::JiraItem;
use crate::util::html::sanitize_html;

pub const EPIC_LINK: &str = "Epic Link";
pub const EPIC_NAME: &str = "Epic Name";
pub const ACCEPTANCE_CRITERIA: &str = "Acceptance Criteria";
pub const STORY_POINTS: &str = "Story Points";
pub const SPRINT: &str = "Sprint";

const ACCEPTANCE_CRITERIA_HEADER: &str = "<br>## Acceptance Criteria<br>";

impl JiraItem {
    /// First value of a custom field, if the field exists and has one.
    pub fn custom_field(&self, name: &str) -> Option<&str> {
        self.custom_fields
            .get(name)
            .and_then(|values| values.first())
            .map(String::as_str)
    }

    /// First value of a custom field, or `""`.
    pub fn field(&self, name: &str) -> &str {
        self.custom_field(name).unwrap_or_default()
    }

    pub fn epic_link(&self) -> &str {
        self.field(EPIC_LINK)
    }

    pub fn epic_name(&self) -> &str {
        self.field(EPIC_NAME)
    }

    /// Acceptance criteria under a Markdown header, or `""` when the item has none.
    pub fn acceptance_criteria(&self) -> String {
        self.custom_field(ACCEPTANCE_CRITERIA)
            .map(|criteria| format!("{ACCEPTANCE_CRITERIA_HEADER}{criteria}"))
            .unwrap_or_default()
    }

    pub fn estimate(&self) -> i64 {
        self.custom_field(STORY_POINTS)
            .map(parse_story_points)
            .unwrap_or(0)
    }

    /// Label that groups stories of one sprint within one project,
    /// e.g. `"ACME Board Sprint 4"` in project `APP` gives `sprint_4_app`.
    pub fn sprint_tag(&self) -> String {
        let Some(sprint) = self.custom_field(SPRINT) else {
            return String::new();
        };
        let start = sprint.find(SPRINT).unwrap_or(0);
        format!("{} {}", &sprint[start..], self.project)
            .replace(' ', "_")
            .to_lowercase()
    }

    /// Description followed by the acceptance criteria block, sanitized.
    pub fn full_description(&self) -> String {
        sanitize_html(&format!("{}{}", self.description, self.acceptance_criteria()))
    }

    pub fn story_type(&self) -> &'static str {
        if self.item_type == "Bug" {
            "bug"
        } else {
            "feature"
        }
    }
}

/// Story points are floats in Jira and integers in Clubhouse; round half up.
/// Surrounding whitespace makes the value unreadable, giving 0.
pub fn parse_story_points(value: &str) -> i64 {
    match value.parse::<f64>() {
        Ok(points) if points.is_finite() => (points + 0.5) as i64,
        _ => 0,
    }
}
