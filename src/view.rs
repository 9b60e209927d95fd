use std::{env, path::Path, path::PathBuf};
use tokio::fs;

pub fn resolve_view_path() -> PathBuf {
    if let Ok(path) = env::var("TASK_VIEW_PATH") {
        return PathBuf::from(path);
    }

    PathBuf::from("view/tasks.html")
}

pub async fn persist_view(path: &Path, page: &str) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).await?;
        }
    }
    fs::write(path, page).await
}
