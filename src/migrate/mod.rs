pub mod fields;
pub mod identity;
pub mod mappers;
pub mod workflow;

use std::collections::HashMap;

use thiserror::Error;

use crate::model::clubhouse::{CreateEpic, CreateStory, CreateTask, Data};
use crate::model::jira::JiraItem;
use identity::Mappings;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum MigrateError {
    #[error("sub-task {task} references parent {parent:?}, which is not a migrated story")]
    OrphanedTask { task: String, parent: String },
}

/// Jira items split by issue type, each list in export order.
#[derive(Debug, Default)]
pub struct Classified<'a> {
    pub epics: Vec<&'a JiraItem>,
    pub tasks: Vec<&'a JiraItem>,
    pub stories: Vec<&'a JiraItem>,
}

pub fn classify(items: &[JiraItem]) -> Classified<'_> {
    let mut classified = Classified::default();
    for item in items {
        match item.item_type.as_str() {
            "Epic" => classified.epics.push(item),
            "Sub-task" => classified.tasks.push(item),
            _ => classified.stories.push(item),
        }
    }
    classified
}

/// Turn a Jira export into the bundle the uploader sends to Clubhouse.
pub fn build_bundle(items: &[JiraItem], mappings: &Mappings<'_>) -> Result<Data, MigrateError> {
    let classified = classify(items);
    tracing::info!(
        epics = classified.epics.len(),
        stories = classified.stories.len(),
        tasks = classified.tasks.len(),
        "classified export"
    );

    let epics = classified
        .epics
        .into_iter()
        .map(mappers::create_epic)
        .collect();
    let tasks = classified
        .tasks
        .into_iter()
        .map(mappers::create_task)
        .collect();
    let stories = classified
        .stories
        .into_iter()
        .map(|item| mappers::create_story(item, mappings))
        .collect();

    assemble(epics, tasks, stories)
}

/// Nest every task inside the story whose `external_id` matches the task's parent.
/// A task whose parent is not among the stories aborts the whole run.
pub fn assemble(
    epics: Vec<CreateEpic>,
    tasks: Vec<CreateTask>,
    mut stories: Vec<CreateStory>,
) -> Result<Data, MigrateError> {
    let index: HashMap<String, usize> = stories
        .iter()
        .enumerate()
        .map(|(i, story)| (story.external_id.clone(), i))
        .collect();

    for task in tasks {
        let Some(&i) = index.get(&task.parent) else {
            return Err(MigrateError::OrphanedTask {
                task: task.key,
                parent: task.parent,
            });
        };
        stories[i].tasks.push(task);
    }

    Ok(Data { epics, stories })
}
