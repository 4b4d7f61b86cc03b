use super::identity::Mappings;
use super::workflow::workflow_state_id;
use crate::model::clubhouse::{
    CreateAttachment, CreateComment, CreateEpic, CreateLabel, CreateStory, CreateTask,
};
use crate::model::jira::{JiraAttachment, JiraComment, JiraItem};
use crate::util::html::sanitize_html;
use crate::util::time::parse_jira_timestamp;

/// Added to every migrated story so imports can be found later.
pub const IMPORTED_LABEL: &str = "JIRA";

const EMPTY_COMMENT: &str = "(empty)";

pub fn create_epic(item: &JiraItem) -> CreateEpic {
    tracing::debug!(key = %item.key, name = item.epic_name(), "mapping epic");

    CreateEpic {
        description: sanitize_html(&format!("{}<br><br>{}", item.summary, item.description)),
        name: sanitize_html(item.epic_name()),
        external_id: item.key.clone(),
        created_at: parse_jira_timestamp(&item.created_at),
    }
}

/// Sub-tasks are always created open; `parent` is resolved when the bundle is assembled.
pub fn create_task(item: &JiraItem) -> CreateTask {
    CreateTask {
        key: item.key.clone(),
        description: sanitize_html(&item.summary),
        parent: item.parent.clone(),
        complete: false,
    }
}

pub fn create_story(item: &JiraItem, mappings: &Mappings<'_>) -> CreateStory {
    let attachments = item
        .attachments
        .iter()
        .map(|a| create_attachment(a, mappings))
        .collect();
    let comments = item
        .comments
        .iter()
        .map(|c| create_comment(c, mappings))
        .collect();

    let mut labels: Vec<CreateLabel> = item
        .labels
        .iter()
        .map(|l| CreateLabel::new(l.to_lowercase()))
        .collect();
    labels.push(CreateLabel::new(IMPORTED_LABEL));
    let sprint = item.sprint_tag();
    if !sprint.is_empty() {
        labels.push(CreateLabel::new(sprint));
    }

    let project_id = mappings.resolve_project(&item.project);
    let owner = mappings.resolve_user(&item.assignee);
    let owner_ids = if owner.is_empty() { Vec::new() } else { vec![owner] };
    let requested_by_id = mappings.resolve_user(&item.reporter);
    let workflow_state_id = workflow_state_id(&item.status);

    let story = CreateStory {
        comments,
        created_at: parse_jira_timestamp(&item.created_at),
        description: item.full_description(),
        external_id: item.key.clone(),
        labels,
        name: sanitize_html(&item.summary),
        project_id,
        story_type: item.story_type().to_string(),
        epic_link: item.epic_link().to_string(),
        workflow_state_id,
        owner_ids,
        requested_by_id,
        estimate: item.estimate(),
        tasks: Vec::new(),
        epic_id: None,
        file_ids: Vec::new(),
        attachments,
    };

    tracing::debug!(
        key = %story.external_id,
        assignee = %item.assignee,
        project_id,
        status = %item.status,
        workflow_state_id,
        estimate = story.estimate,
        epic_link = %story.epic_link,
        "mapped story"
    );
    story
}

pub fn create_attachment(attachment: &JiraAttachment, mappings: &Mappings<'_>) -> CreateAttachment {
    CreateAttachment {
        author: mappings.resolve_user(&attachment.author),
        created_at: parse_jira_timestamp(&attachment.created_at),
        external_id: attachment.id.clone(),
        name: attachment.name.clone(),
    }
}

pub fn create_comment(comment: &JiraComment, mappings: &Mappings<'_>) -> CreateComment {
    let mut text = sanitize_html(&comment.body);
    // An empty Jira comment sanitizes to a lone newline, which Clubhouse rejects.
    if text == "\n" {
        text = EMPTY_COMMENT.to_string();
    }

    CreateComment {
        text,
        author: mappings.resolve_user(&comment.author),
        created_at: parse_jira_timestamp(&comment.created_at),
    }
}
