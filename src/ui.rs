use crate::log::RequestLog;
use crate::models::{Task, Todo};
use crate::notify::Notice;
use crate::state::Listing;
use chrono::Local;

// Everything user-supplied goes through here before it lands in markup.
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

pub fn render_notice(notice: &Notice) -> String {
    format!(
        "<div class=\"alert alert-{}\">{}<span class=\"dismiss\">&times;</span></div>\n",
        notice.level.css_class(),
        escape(&notice.message)
    )
}

pub fn render_notices(notices: &[Notice]) -> String {
    notices.iter().map(render_notice).collect()
}

pub fn render_task(task: &Task) -> String {
    let mut classes = String::from("task");
    if task.completed {
        classes.push_str(" done");
    }

    let badge = if task.completed {
        "<span class=\"badge\">done</span>"
    } else {
        "<span class=\"badge open\">open</span>"
    };

    let description = if task.description.is_empty() {
        String::new()
    } else {
        format!(
            "      <p class=\"description\">{}</p>\n",
            escape(&task.description)
        )
    };

    let mut meta = Vec::new();
    if let Some(created) = task.created_at {
        meta.push(format!("created {}", created.format("%Y-%m-%d %H:%M")));
    }
    if let Some(updated) = task.updated_at {
        if task.created_at != task.updated_at {
            meta.push(format!("updated {}", updated.format("%Y-%m-%d %H:%M")));
        }
    }
    let meta = if meta.is_empty() {
        String::new()
    } else {
        format!("      <p class=\"meta\">{}</p>\n", meta.join(" &middot; "))
    };

    format!(
        "    <article class=\"{classes}\">\n      <header><span class=\"id\">#{}</span> <h3>{}</h3> {badge}</header>\n{description}{meta}    </article>\n",
        task.id,
        escape(&task.title),
    )
}

pub fn render_task_list(tasks: &[Task]) -> String {
    if tasks.is_empty() {
        return "    <div class=\"empty\">No tasks found. Create a new task to get started.</div>\n"
            .to_string();
    }
    tasks.iter().map(render_task).collect()
}

pub fn render_todo(position: usize, todo: &Todo) -> String {
    let mut classes = String::from("task");
    if todo.done {
        classes.push_str(" done");
    }

    let badge = if todo.done {
        "<span class=\"badge\">done</span>"
    } else {
        "<span class=\"badge open\">open</span>"
    };

    let description = match todo.description.as_deref() {
        Some(text) if !text.is_empty() => format!(
            "      <p class=\"description\">{}</p>\n",
            escape(text)
        ),
        _ => String::new(),
    };

    format!(
        "    <article class=\"{classes}\">\n      <header><span class=\"id\">{position}</span> <h3>{}</h3> {badge}</header>\n{description}    </article>\n",
        escape(&todo.label),
    )
}

pub fn render_todo_list(todos: &[Todo]) -> String {
    if todos.is_empty() {
        return "    <div class=\"empty\">No todos yet. Add one to get started.</div>\n"
            .to_string();
    }
    todos
        .iter()
        .enumerate()
        .map(|(position, todo)| render_todo(position, todo))
        .collect()
}

pub fn render_listing(listing: &Listing) -> String {
    match listing {
        Listing::Tasks(tasks) => render_task_list(tasks),
        Listing::Todos(todos) => render_todo_list(todos),
    }
}

pub fn render_page(listing: &Listing, notices: &[Notice], log: &RequestLog) -> String {
    PAGE_HTML
        .replace("{{ALERTS}}", &render_notices(notices))
        .replace("{{LISTING}}", &render_listing(listing))
        .replace("{{LOG}}", &escape(&log.render_text()))
        .replace(
            "{{GENERATED}}",
            &Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
        )
}

// Terminal counterpart of the listing panel.
pub fn text_listing(listing: &Listing) -> String {
    let mut out = String::new();
    match listing {
        Listing::Tasks(tasks) => {
            if tasks.is_empty() {
                out.push_str("no tasks\n");
            }
            for task in tasks {
                let mark = if task.completed { 'x' } else { ' ' };
                out.push_str(&format!("#{:<4} [{mark}] {}\n", task.id, task.title));
                if !task.description.is_empty() {
                    out.push_str(&format!("          {}\n", task.description));
                }
            }
        }
        Listing::Todos(todos) => {
            if todos.is_empty() {
                out.push_str("no todos\n");
            }
            for (position, todo) in todos.iter().enumerate() {
                let mark = if todo.done { 'x' } else { ' ' };
                out.push_str(&format!("{position:<5} [{mark}] {}\n", todo.label));
                if let Some(description) = todo.description.as_deref() {
                    if !description.is_empty() {
                        out.push_str(&format!("          {description}\n"));
                    }
                }
            }
        }
    }
    out
}

const PAGE_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>Task Console</title>
  <style>
    :root {
      --bg-1: #f8f3e6;
      --bg-2: #f5d3a7;
      --ink: #2b2a28;
      --accent: #ff6b4a;
      --accent-2: #2f4858;
      --card: rgba(255, 255, 255, 0.9);
      --shadow: 0 24px 60px rgba(47, 72, 88, 0.18);
    }

    * {
      box-sizing: border-box;
    }

    body {
      margin: 0;
      min-height: 100vh;
      background: radial-gradient(circle at top, var(--bg-2), transparent 60%),
        linear-gradient(135deg, var(--bg-1), #ffe9d4 60%, #f9f2e9 100%);
      color: var(--ink);
      font-family: "Trebuchet MS", sans-serif;
      display: grid;
      place-items: start center;
      padding: 32px 18px 48px;
    }

    .app {
      width: min(760px, 100%);
      background: var(--card);
      border-radius: 24px;
      box-shadow: var(--shadow);
      padding: 32px;
      display: grid;
      gap: 22px;
    }

    h1 {
      margin: 0;
      font-size: 2rem;
      color: var(--accent-2);
    }

    .subtitle {
      margin: 0;
      color: #5f5c57;
      font-size: 0.95rem;
    }

    .alert {
      border-radius: 12px;
      padding: 10px 14px;
      display: flex;
      justify-content: space-between;
      gap: 12px;
      font-size: 0.95rem;
    }

    .alert-info { background: #e8f0fe; color: #1a4a8a; }
    .alert-success { background: #e3f6e8; color: #2d7a4b; }
    .alert-warning { background: #fdf3dc; color: #8a6313; }
    .alert-danger { background: #fdeae6; color: #c63b2b; }

    .dismiss {
      cursor: default;
      opacity: 0.5;
    }

    .task {
      background: white;
      border-radius: 16px;
      padding: 14px 18px;
      border: 1px solid rgba(47, 72, 88, 0.08);
      margin-bottom: 12px;
    }

    .task.done h3 {
      text-decoration: line-through;
      color: #2d7a4b;
    }

    .task header {
      display: flex;
      align-items: baseline;
      gap: 10px;
    }

    .task h3 {
      margin: 0;
      font-size: 1.05rem;
    }

    .task .id {
      color: #8b857d;
      font-size: 0.85rem;
    }

    .badge {
      margin-left: auto;
      font-size: 0.75rem;
      text-transform: uppercase;
      letter-spacing: 0.08em;
      color: #2d7a4b;
    }

    .badge.open {
      color: var(--accent);
    }

    .description {
      margin: 6px 0 0;
      color: #5f5c57;
      font-size: 0.92rem;
    }

    .meta {
      margin: 6px 0 0;
      color: #8b857d;
      font-size: 0.8rem;
    }

    .empty {
      text-align: center;
      color: #8b857d;
      padding: 28px 0;
    }

    h2 {
      margin: 0;
      font-size: 1.2rem;
      color: var(--accent-2);
    }

    pre.log {
      background: #2b2a28;
      color: #e8e3d8;
      border-radius: 14px;
      padding: 16px;
      font-size: 0.8rem;
      max-height: 360px;
      overflow: auto;
      white-space: pre-wrap;
      word-break: break-word;
    }

    .hint {
      margin: 0;
      color: #6f6a65;
      font-size: 0.85rem;
    }
  </style>
</head>
<body>
  <main class="app">
    <header>
      <h1>Task Console</h1>
      <p class="subtitle">Snapshot written {{GENERATED}}</p>
    </header>

    <section class="alerts">
{{ALERTS}}    </section>

    <section class="tasks">
      <h2>Tasks</h2>
{{LISTING}}    </section>

    <section class="log-panel">
      <h2>Response log</h2>
      <pre class="log">{{LOG}}</pre>
    </section>

    <p class="hint">This page is rewritten by the console after every command. Use the `log` and `clear` commands to inspect or reset the response log.</p>
  </main>
</body>
</html>
"#;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notify::{Level, Notices};

    fn task(title: &str, description: &str, completed: bool) -> Task {
        Task {
            id: 1,
            title: title.to_string(),
            description: description.to_string(),
            completed,
            created_at: None,
            updated_at: None,
        }
    }

    #[test]
    fn escape_neutralizes_markup() {
        assert_eq!(
            escape("<script>alert(\"x\")</script>"),
            "&lt;script&gt;alert(&quot;x&quot;)&lt;/script&gt;"
        );
        assert_eq!(escape("a & b's"), "a &amp; b&#39;s");
    }

    #[test]
    fn task_markup_escapes_user_text() {
        let html = render_task(&task("<b>bold</b>", "desc with <img>", false));
        assert!(!html.contains("<b>bold</b>"));
        assert!(html.contains("&lt;b&gt;bold&lt;/b&gt;"));
        assert!(html.contains("&lt;img&gt;"));
    }

    #[test]
    fn empty_list_renders_placeholder() {
        let html = render_task_list(&[]);
        assert!(html.contains("No tasks found"));
    }

    #[test]
    fn completed_task_is_marked_done() {
        let html = render_task(&task("t", "", true));
        assert!(html.contains("task done"));
        assert!(html.contains(">done</span>"));
    }

    #[test]
    fn todo_listing_is_positional() {
        let todos = vec![
            Todo { label: "first".into(), description: None, done: false },
            Todo { label: "second".into(), description: None, done: true },
        ];
        let html = render_todo_list(&todos);
        assert!(html.contains("<span class=\"id\">0</span>"));
        assert!(html.contains("<span class=\"id\">1</span>"));
    }

    #[test]
    fn page_substitutes_all_slots() {
        let mut notices = Notices::new();
        notices.push(Level::Success, "Task created successfully!");
        let mut log = RequestLog::new();
        log.record("GET", "/tasks", Some(200), None);

        let listing = Listing::Tasks(vec![task("hello", "", false)]);
        let page = render_page(&listing, notices.items(), &log);

        assert!(!page.contains("{{"));
        assert!(page.contains("alert-success"));
        assert!(page.contains("hello"));
        assert!(page.contains("GET /tasks - 200"));
    }

    #[test]
    fn log_text_is_escaped_into_the_page() {
        let mut log = RequestLog::new();
        log.record(
            "POST",
            "/tasks",
            Some(201),
            Some(serde_json::json!({ "title": "<script>" })),
        );
        let page = render_page(&Listing::Tasks(Vec::new()), &[], &log);
        assert!(!page.contains("<script>"));
    }
}
