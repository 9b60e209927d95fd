use crate::api::TaskApi;
use crate::log::RequestLog;
use crate::models::{Task, Todo};
use crate::notify::Notices;
use crate::todos::TodoApi;
use std::path::PathBuf;

pub enum Backend {
    Envelope(TaskApi),
    Plain(TodoApi),
}

impl Backend {
    pub fn base_url(&self) -> &str {
        match self {
            Self::Envelope(api) => api.base_url(),
            Self::Plain(api) => api.base_url(),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Envelope(_) => "envelope",
            Self::Plain(_) => "plain",
        }
    }
}

// Last listing fetched from the server. Records are replaced wholesale on
// every reload; nothing here outlives the process.
pub enum Listing {
    Tasks(Vec<Task>),
    Todos(Vec<Todo>),
}

pub struct ConsoleState {
    pub backend: Backend,
    pub log: RequestLog,
    pub notices: Notices,
    pub listing: Listing,
    pub view_path: PathBuf,
}

impl ConsoleState {
    pub fn new(backend: Backend, view_path: PathBuf) -> Self {
        let listing = match &backend {
            Backend::Envelope(_) => Listing::Tasks(Vec::new()),
            Backend::Plain(_) => Listing::Todos(Vec::new()),
        };
        Self {
            backend,
            log: RequestLog::new(),
            notices: Notices::new(),
            listing,
            view_path,
        }
    }
}
