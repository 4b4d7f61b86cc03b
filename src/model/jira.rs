use serde::{Deserialize, Deserializer};
use std::collections::HashMap;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct JiraExport {
    #[serde(default)]
    pub items: Vec<JiraItem>,
}

/// One issue from a Jira export. `key` is the join key for parent and epic links.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct JiraItem {
    pub key: String,
    #[serde(rename = "type")]
    pub item_type: String,
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub status: String,
    #[serde(rename = "created", default)]
    pub created_at: String,
    #[serde(default)]
    pub assignee: String,
    #[serde(default)]
    pub reporter: String,
    #[serde(default)]
    pub parent: String,
    #[serde(default)]
    pub project: String,
    #[serde(default)]
    pub labels: Vec<String>,
    /// Field name to its values. Only the first value is ever read.
    #[serde(default, deserialize_with = "fold_custom_fields")]
    pub custom_fields: HashMap<String, Vec<String>>,
    #[serde(default)]
    pub attachments: Vec<JiraAttachment>,
    #[serde(default)]
    pub comments: Vec<JiraComment>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct JiraAttachment {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub author: String,
    #[serde(rename = "created", default)]
    pub created_at: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct JiraComment {
    #[serde(default)]
    pub body: String,
    #[serde(default)]
    pub author: String,
    #[serde(rename = "created", default)]
    pub created_at: String,
}

#[derive(Deserialize)]
struct CustomField {
    name: String,
    #[serde(default)]
    values: Vec<String>,
}

// Exports list custom fields as `[{name, values}]`; a repeated name keeps its first entry.
fn fold_custom_fields<'de, D>(deserializer: D) -> Result<HashMap<String, Vec<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    let fields = Vec::<CustomField>::deserialize(deserializer)?;
    let mut map = HashMap::with_capacity(fields.len());
    for field in fields {
        map.entry(field.name).or_insert(field.values);
    }
    Ok(map)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_item_with_custom_fields() {
        let json = r#"{
            "key": "PROJ-7",
            "type": "Story",
            "summary": "Login page",
            "created": "Mon, 2 Jan 2006 15:04:05 -0700",
            "project": "PROJ",
            "custom_fields": [
                {"name": "Story Points", "values": ["5.0"]},
                {"name": "Sprint", "values": ["Board Sprint 4", "Board Sprint 5"]}
            ]
        }"#;

        let item: JiraItem = serde_json::from_str(json).unwrap();
        assert_eq!(item.key, "PROJ-7");
        assert_eq!(item.item_type, "Story");
        assert_eq!(item.created_at, "Mon, 2 Jan 2006 15:04:05 -0700");
        assert_eq!(item.custom_fields["Story Points"], vec!["5.0"]);
        assert_eq!(item.custom_fields["Sprint"].len(), 2);
        assert!(item.labels.is_empty());
        assert!(item.comments.is_empty());
    }

    #[test]
    fn repeated_custom_field_keeps_first_entry() {
        let json = r#"{
            "key": "PROJ-1",
            "type": "Bug",
            "custom_fields": [
                {"name": "Epic Link", "values": ["PROJ-100"]},
                {"name": "Epic Link", "values": ["PROJ-200"]}
            ]
        }"#;

        let item: JiraItem = serde_json::from_str(json).unwrap();
        assert_eq!(item.custom_fields["Epic Link"], vec!["PROJ-100"]);
    }

    #[test]
    fn missing_custom_fields_defaults_to_empty() {
        let item: JiraItem = serde_json::from_str(r#"{"key": "A-1", "type": "Task"}"#).unwrap();
        assert!(item.custom_fields.is_empty());
        assert_eq!(item.summary, "");
    }
}
