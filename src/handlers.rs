use crate::api::TaskApi;
use crate::log::RequestLog;
use crate::models::{Task, TaskChanges, TaskDraft, TodoDraft};
use crate::notify::Notices;
use crate::state::{Backend, ConsoleState, Listing};
use crate::todos::TodoApi;
use crate::validate;

pub async fn refresh(state: &mut ConsoleState) {
    let ConsoleState { backend, log, notices, listing, .. } = &mut *state;
    match backend {
        Backend::Envelope(api) => reload_tasks(api, log, notices, listing).await,
        Backend::Plain(api) => reload_todos(api, log, notices, listing).await,
    }
}

// Validation runs before anything touches the network; a rejected draft
// never issues a request.
pub async fn create(state: &mut ConsoleState, title: &str, description: &str) {
    let ConsoleState { backend, log, notices, listing, .. } = &mut *state;
    let title = title.trim();
    let description = description.trim();

    match backend {
        Backend::Envelope(api) => {
            let errors = validate::check_task(title, description);
            if !errors.is_empty() {
                notices.warning(errors.join(", "));
                return;
            }
            let draft = TaskDraft {
                title: title.to_string(),
                description: description.to_string(),
            };
            match api.create(log, &draft).await {
                Ok(_) => {
                    notices.success("Task created successfully!");
                    reload_tasks(api, log, notices, listing).await;
                }
                Err(err) => notices.danger(format!("Failed to create task: {}", err.summary())),
            }
        }
        Backend::Plain(api) => {
            let errors = validate::check_todo(title, description);
            if !errors.is_empty() {
                notices.warning(errors.join(", "));
                return;
            }
            let draft = TodoDraft {
                label: title.to_string(),
                description: (!description.is_empty()).then(|| description.to_string()),
                done: false,
            };
            match api.add(log, &draft).await {
                Ok(_) => {
                    notices.success("Todo added successfully!");
                    reload_todos(api, log, notices, listing).await;
                }
                Err(err) => notices.danger(format!("Failed to add todo: {}", err.summary())),
            }
        }
    }
}

// PUT sends the full record; fields left out of the command fall back to
// the cached copy from the last reload.
pub async fn update(
    state: &mut ConsoleState,
    id: u64,
    title: &str,
    description: Option<&str>,
    completed: Option<bool>,
) {
    let ConsoleState { backend, log, notices, listing, .. } = &mut *state;
    let api = match backend {
        Backend::Envelope(api) => api,
        Backend::Plain(_) => {
            notices.warning("the todos backend has no update endpoint; use add and rm");
            return;
        }
    };

    let cached = match listing {
        Listing::Tasks(tasks) => tasks.iter().find(|task| task.id == id).cloned(),
        Listing::Todos(_) => None,
    };
    let Some(current) = cached else {
        notices.warning(format!("task {id} is not in the current list; run `list` first"));
        return;
    };

    let title = title.trim();
    let description = description.map(str::trim).unwrap_or(current.description.as_str());
    let errors = validate::check_task(title, description);
    if !errors.is_empty() {
        notices.warning(errors.join(", "));
        return;
    }

    let changes = TaskChanges {
        title: title.to_string(),
        description: description.to_string(),
        completed: completed.unwrap_or(current.completed),
    };
    match api.update(log, id, &changes).await {
        Ok(_) => {
            notices.success("Task updated successfully!");
            reload_tasks(api, log, notices, listing).await;
        }
        Err(err) => notices.danger(format!("Failed to update task: {}", err.summary())),
    }
}

// Fetches one record without touching the cached listing.
pub async fn show(state: &mut ConsoleState, id: u64) -> Option<Task> {
    let ConsoleState { backend, log, notices, .. } = &mut *state;
    let api = match backend {
        Backend::Envelope(api) => api,
        Backend::Plain(_) => {
            notices.warning("the todos backend has no single-item endpoint");
            return None;
        }
    };

    match api.get(log, id).await {
        Ok(task) => Some(task),
        Err(err) => {
            notices.danger(format!("Failed to load task: {}", err.summary()));
            None
        }
    }
}

pub async fn toggle(state: &mut ConsoleState, id: u64) {
    let ConsoleState { backend, log, notices, listing, .. } = &mut *state;
    let api = match backend {
        Backend::Envelope(api) => api,
        Backend::Plain(_) => {
            notices.warning("the todos backend has no toggle endpoint");
            return;
        }
    };

    match api.toggle(log, id).await {
        Ok(task) => {
            notices.success(if task.completed {
                "Task marked as completed"
            } else {
                "Task marked as incomplete"
            });
            reload_tasks(api, log, notices, listing).await;
        }
        Err(err) => notices.danger(format!("Failed to toggle task: {}", err.summary())),
    }
}

pub async fn remove(state: &mut ConsoleState, id: u64) {
    let ConsoleState { backend, log, notices, listing, .. } = &mut *state;
    match backend {
        Backend::Envelope(api) => match api.delete(log, id).await {
            Ok(()) => {
                notices.success("Task deleted successfully!");
                reload_tasks(api, log, notices, listing).await;
            }
            Err(err) => notices.danger(format!("Failed to delete task: {}", err.summary())),
        },
        Backend::Plain(api) => match api.remove(log, id as usize).await {
            Ok(()) => {
                notices.success("Todo removed successfully!");
                reload_todos(api, log, notices, listing).await;
            }
            Err(err) => notices.danger(format!("Failed to remove todo: {}", err.summary())),
        },
    }
}

pub fn clear_log(state: &mut ConsoleState) {
    state.log.clear();
    state.notices.info("Response log cleared");
}

async fn reload_tasks(
    api: &TaskApi,
    log: &mut RequestLog,
    notices: &mut Notices,
    listing: &mut Listing,
) {
    match api.list(log).await {
        Ok(tasks) => *listing = Listing::Tasks(tasks),
        Err(err) => notices.danger(format!("Failed to load tasks: {}", err.summary())),
    }
}

async fn reload_todos(
    api: &TodoApi,
    log: &mut RequestLog,
    notices: &mut Notices,
    listing: &mut Listing,
) {
    match api.list(log).await {
        Ok(todos) => *listing = Listing::Todos(todos),
        Err(err) => notices.danger(format!("Failed to load todos: {}", err.summary())),
    }
}
