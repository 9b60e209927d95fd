use crate::state::{ConsoleState, Listing};
use crate::{handlers, ui, view};
use tracing::error;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    List,
    Show { id: u64 },
    Add { title: String, description: String },
    Edit { id: u64, title: String, description: Option<String> },
    Toggle { id: u64 },
    Remove { id: u64 },
    ShowLog,
    ClearLog,
    Help,
    Quit,
}

#[derive(Debug, PartialEq, Eq)]
pub enum Outcome {
    Continue,
    Quit,
}

pub const HELP: &str = "\
commands:
  list                              fetch and show the current list
  show <id>                         fetch one entry (envelope backend)
  add <title> [:: <description>]    create an entry
  edit <id> <title> [:: <desc>]     replace title and description (envelope backend)
  toggle <id>                       flip completion (envelope backend)
  rm <id|position>                  delete an entry
  log                               show the response log
  clear                             clear the response log
  help                              show this text
  quit                              leave the console
";

// An unparseable line never reaches the network; neither does a parseable
// one with an empty title, but that is the validator's call, not ours.
pub fn parse(line: &str) -> Result<Command, String> {
    let line = line.trim();
    let (verb, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
    let rest = rest.trim();

    match verb {
        "list" | "ls" => Ok(Command::List),
        "show" | "get" => {
            let (id, _) = split_id(rest, "show <id>")?;
            Ok(Command::Show { id })
        }
        "add" | "new" => {
            let (title, description) = split_description(rest);
            Ok(Command::Add { title, description })
        }
        "edit" | "update" => {
            let (id, rest) = split_id(rest, "edit <id> <title> [:: <description>]")?;
            let (title, description) = split_description(rest);
            let description = (!description.is_empty()).then_some(description);
            Ok(Command::Edit { id, title, description })
        }
        "toggle" | "done" => {
            let (id, _) = split_id(rest, "toggle <id>")?;
            Ok(Command::Toggle { id })
        }
        "rm" | "del" | "delete" => {
            let (id, _) = split_id(rest, "rm <id|position>")?;
            Ok(Command::Remove { id })
        }
        "log" => Ok(Command::ShowLog),
        "clear" => Ok(Command::ClearLog),
        "help" | "?" => Ok(Command::Help),
        "quit" | "exit" | "q" => Ok(Command::Quit),
        "" => Err("type `help` for the command list".to_string()),
        other => Err(format!("unknown command '{other}'; type `help`")),
    }
}

fn split_description(rest: &str) -> (String, String) {
    match rest.split_once("::") {
        Some((title, description)) => (title.trim().to_string(), description.trim().to_string()),
        None => (rest.to_string(), String::new()),
    }
}

fn split_id<'a>(rest: &'a str, usage: &str) -> Result<(u64, &'a str), String> {
    let (head, tail) = rest.split_once(char::is_whitespace).unwrap_or((rest, ""));
    head.parse::<u64>()
        .map(|id| (id, tail.trim()))
        .map_err(|_| format!("usage: {usage}"))
}

pub async fn run_command(state: &mut ConsoleState, command: Command) -> Outcome {
    match command {
        Command::Quit => return Outcome::Quit,
        Command::Help => {
            print!("{HELP}");
            return Outcome::Continue;
        }
        command => execute(state, command).await,
    }
    Outcome::Continue
}

async fn execute(state: &mut ConsoleState, command: Command) {
    state.notices.clear();
    let mut show_listing = true;

    match command {
        Command::List => handlers::refresh(state).await,
        Command::Show { id } => {
            show_listing = false;
            if let Some(task) = handlers::show(state, id).await {
                print!("{}", ui::text_listing(&Listing::Tasks(vec![task])));
            }
        }
        Command::Add { title, description } => {
            handlers::create(state, &title, &description).await
        }
        Command::Edit { id, title, description } => {
            handlers::update(state, id, &title, description.as_deref(), None).await
        }
        Command::Toggle { id } => handlers::toggle(state, id).await,
        Command::Remove { id } => handlers::remove(state, id).await,
        Command::ShowLog => {
            show_listing = false;
            if state.log.is_empty() {
                println!("log is empty");
            } else {
                print!("{}", state.log.render_text());
            }
        }
        Command::ClearLog => {
            show_listing = false;
            handlers::clear_log(state);
        }
        Command::Help | Command::Quit => {}
    }

    let page = ui::render_page(&state.listing, state.notices.items(), &state.log);
    if let Err(err) = view::persist_view(&state.view_path, &page).await {
        error!("failed to write view page: {err}");
        state.notices.danger(format!("Failed to write view page: {err}"));
    }

    for notice in state.notices.items() {
        println!("[{}] {}", notice.level.tag(), notice.message);
    }
    if show_listing {
        print!("{}", ui::text_listing(&state.listing));
    }
}
