pub mod xml;

use anyhow::{Context, Result};
use std::path::Path;

use crate::model::jira::{JiraExport, JiraItem};

/// Read a Jira export. Files ending in `.xml` are read as Jira's RSS issue export,
/// anything else as the JSON form `{"items": [...]}`.
pub fn load_export(path: &Path) -> Result<Vec<JiraItem>> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read export from {}", path.display()))?;
    let items = if is_xml(path) {
        xml::parse_export(&contents)
    } else {
        parse_export(&contents)
    };
    items.with_context(|| format!("Failed to parse {}", path.display()))
}

fn is_xml(path: &Path) -> bool {
    path.extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("xml"))
}

pub fn parse_export(contents: &str) -> Result<Vec<JiraItem>> {
    let export: JiraExport = serde_json::from_str(contents)?;
    Ok(export.items)
}
