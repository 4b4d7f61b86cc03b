use anyhow::{Context, Result};
use std::collections::HashMap;
use std::path::Path;

use crate::destination::Destination;
use crate::model::clubhouse::{CreateAttachment, CreateStory, Data};

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct UploadReport {
    pub epics: usize,
    pub stories: usize,
    pub skipped: usize,
    pub files: usize,
}

/// Upload a bundle: every epic first, then each story with its tasks and comments.
///
/// Stories without a requester are skipped. Attachment files are read from
/// `<attachments_dir>/<story key>/<attachment id>` when a directory is given.
pub async fn upload(
    data: Data,
    destination: &dyn Destination,
    attachments_dir: Option<&Path>,
) -> Result<UploadReport> {
    let mut report = UploadReport::default();
    let mut epic_ids: HashMap<String, i64> = HashMap::new();

    for epic in &data.epics {
        let id = destination
            .upload_epic(epic)
            .await
            .with_context(|| format!("Failed to create epic {}", epic.external_id))?;
        tracing::info!(key = %epic.external_id, id, "created epic");
        epic_ids.insert(epic.external_id.clone(), id);
        report.epics += 1;
    }

    for mut story in data.stories {
        if story.requested_by_id.is_empty() {
            tracing::warn!(key = %story.external_id, "no requester could be mapped, skipping story");
            report.skipped += 1;
            continue;
        }

        if !story.epic_link.is_empty() {
            story.epic_id = epic_ids.get(&story.epic_link).copied();
            if story.epic_id.is_none() {
                tracing::warn!(
                    key = %story.external_id,
                    epic = %story.epic_link,
                    "story links an epic that was not migrated"
                );
            }
        }

        // Clubhouse only takes uploaded files by id.
        let attachments = std::mem::take(&mut story.attachments);
        if let Some(dir) = attachments_dir {
            report.files += upload_files(&mut story, &attachments, destination, dir).await?;
        }

        let id = destination
            .upload_story(&story)
            .await
            .with_context(|| format!("Failed to create story {}", story.external_id))?;
        tracing::info!(
            key = %story.external_id,
            id,
            tasks = story.tasks.len(),
            comments = story.comments.len(),
            "created story"
        );
        report.stories += 1;
    }

    Ok(report)
}

async fn upload_files(
    story: &mut CreateStory,
    attachments: &[CreateAttachment],
    destination: &dyn Destination,
    dir: &Path,
) -> Result<usize> {
    let mut uploaded = 0;
    for attachment in attachments {
        let path = dir.join(&story.external_id).join(&attachment.external_id);
        let bytes = match tokio::fs::read(&path).await {
            Ok(bytes) => bytes,
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "attachment file unreadable, skipping");
                continue;
            }
        };
        let id = destination
            .upload_attachment(bytes, &attachment.name, &attachment.external_id)
            .await
            .with_context(|| format!("Failed to upload attachment {}", attachment.name))?;
        story.file_ids.push(id);
        uploaded += 1;
    }
    Ok(uploaded)
}
