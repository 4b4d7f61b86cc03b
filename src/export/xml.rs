use anyhow::Result;
use serde::Deserialize;
use std::collections::HashMap;

use crate::model::jira::{JiraAttachment, JiraComment, JiraItem};

// Jira's "XML" issue search export is an RSS feed with one <item> per issue.
// Only the elements the migration reads are declared; the rest are skipped.

#[derive(Deserialize)]
struct Rss {
    channel: Channel,
}

#[derive(Deserialize)]
struct Channel {
    #[serde(rename = "item", default)]
    items: Vec<Item>,
}

/// Element text, ignoring whatever attributes Jira puts on it (`id`, `iconUrl`, ...).
#[derive(Default, Deserialize)]
struct Text {
    #[serde(rename = "$text", default)]
    value: String,
}

#[derive(Deserialize)]
struct Item {
    key: Text,
    #[serde(rename = "type")]
    item_type: Text,
    summary: Option<Text>,
    description: Option<Text>,
    status: Option<Text>,
    created: Option<Text>,
    parent: Option<Text>,
    project: Option<Project>,
    assignee: Option<User>,
    reporter: Option<User>,
    #[serde(default)]
    labels: Labels,
    #[serde(default)]
    comments: Comments,
    #[serde(default)]
    attachments: Attachments,
    #[serde(default)]
    customfields: CustomFields,
}

#[derive(Deserialize)]
struct Project {
    #[serde(rename = "@key", default)]
    key: String,
}

#[derive(Deserialize)]
struct User {
    #[serde(rename = "@username", default)]
    username: String,
}

#[derive(Default, Deserialize)]
struct Labels {
    #[serde(rename = "label", default)]
    labels: Vec<String>,
}

#[derive(Default, Deserialize)]
struct Comments {
    #[serde(rename = "comment", default)]
    comments: Vec<Comment>,
}

#[derive(Deserialize)]
struct Comment {
    #[serde(rename = "@author", default)]
    author: String,
    #[serde(rename = "@created", default)]
    created: String,
    #[serde(rename = "$text", default)]
    body: String,
}

#[derive(Default, Deserialize)]
struct Attachments {
    #[serde(rename = "attachment", default)]
    attachments: Vec<Attachment>,
}

#[derive(Deserialize)]
struct Attachment {
    #[serde(rename = "@id")]
    id: String,
    #[serde(rename = "@name")]
    name: String,
    #[serde(rename = "@author", default)]
    author: String,
    #[serde(rename = "@created", default)]
    created: String,
}

#[derive(Default, Deserialize)]
struct CustomFields {
    #[serde(rename = "customfield", default)]
    fields: Vec<CustomField>,
}

#[derive(Deserialize)]
struct CustomField {
    customfieldname: String,
    #[serde(default)]
    customfieldvalues: CustomFieldValues,
}

#[derive(Default, Deserialize)]
struct CustomFieldValues {
    #[serde(rename = "customfieldvalue", default)]
    values: Vec<Text>,
}

fn text(value: Option<Text>) -> String {
    value.map(|t| t.value).unwrap_or_default()
}

impl From<Item> for JiraItem {
    fn from(item: Item) -> Self {
        let mut custom_fields = HashMap::with_capacity(item.customfields.fields.len());
        for field in item.customfields.fields {
            let values = field
                .customfieldvalues
                .values
                .into_iter()
                .map(|v| v.value)
                .collect();
            custom_fields.entry(field.customfieldname).or_insert(values);
        }

        JiraItem {
            key: item.key.value,
            item_type: item.item_type.value,
            summary: text(item.summary),
            description: text(item.description),
            status: text(item.status),
            created_at: text(item.created),
            assignee: item.assignee.map(|u| u.username).unwrap_or_default(),
            reporter: item.reporter.map(|u| u.username).unwrap_or_default(),
            parent: text(item.parent),
            project: item.project.map(|p| p.key).unwrap_or_default(),
            labels: item.labels.labels,
            custom_fields,
            attachments: item
                .attachments
                .attachments
                .into_iter()
                .map(|a| JiraAttachment {
                    id: a.id,
                    name: a.name,
                    author: a.author,
                    created_at: a.created,
                })
                .collect(),
            comments: item
                .comments
                .comments
                .into_iter()
                .map(|c| JiraComment {
                    body: c.body,
                    author: c.author,
                    created_at: c.created,
                })
                .collect(),
        }
    }
}

pub fn parse_export(contents: &str) -> Result<Vec<JiraItem>> {
    let rss: Rss = quick_xml::de::from_str(contents)?;
    Ok(rss.channel.items.into_iter().map(JiraItem::from).collect())
}
