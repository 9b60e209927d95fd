use std::env;
use std::io::Write;
use task_console::state::{Backend, ConsoleState};
use task_console::{TaskApi, TodoApi, app, view};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("info".parse()?))
        .init();

    let base_url =
        env::var("TASK_API_URL").unwrap_or_else(|_| "http://127.0.0.1:5000/api".to_string());
    let contract = env::var("TASK_API_CONTRACT").unwrap_or_else(|_| "envelope".to_string());
    let backend = match contract.as_str() {
        "envelope" => Backend::Envelope(TaskApi::new(base_url.as_str())),
        "plain" => Backend::Plain(TodoApi::new(base_url.as_str())),
        other => {
            return Err(format!("unknown contract '{other}', expected 'envelope' or 'plain'").into());
        }
    };

    let mut state = ConsoleState::new(backend, view::resolve_view_path());

    info!(
        "task console talking to {} ({} contract)",
        state.backend.base_url(),
        state.backend.name()
    );
    info!("view page: {}", state.view_path.display());

    // Initial load, the way the page loaded its list on startup.
    app::run_command(&mut state, app::Command::List).await;

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        print!("> ");
        std::io::stdout().flush()?;
        let Some(line) = lines.next_line().await? else {
            break;
        };
        if line.trim().is_empty() {
            continue;
        }
        match app::parse(&line) {
            Ok(command) => {
                if matches!(
                    app::run_command(&mut state, command).await,
                    app::Outcome::Quit
                ) {
                    break;
                }
            }
            Err(message) => println!("{message}"),
        }
    }

    Ok(())
}
