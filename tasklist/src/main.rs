//! Line-oriented shell for the task list.
//!
//! Reads one command per line from stdin and prints the list after each
//! change. Items are addressed by their 1-based position. Type `help` for
//! the command list.

use anyhow::{Context, bail};
use std::sync::Arc;
use tasklist::{
    ItemId, Status, TaskListAction, TaskListConfig, TaskListEnvironment, TaskListReducer,
    TaskListSnapshot, TaskListState, TaskListStore, can_edit,
};
use tasklist_core::environment::{RandomIds, SystemClock};
use tasklist_runtime::Store;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const HELP: &str = "\
commands:
  add <name>          add an item
  draft <text>        set the new-item draft
  submit              add an item named after the draft
  toggle <n>          flip item n between in progress and completed
  rm <n>              remove item n
  edit <n>            start editing item n
  text <n> <name>     change the draft name of item n
  save <n>            rename item n to its draft name
  cancel <n>          stop editing item n
  list                print the list
  json                print the list as JSON
  help                print this help
  quit                exit";

/// A parsed shell line
#[derive(Debug, PartialEq, Eq)]
enum Input {
    /// Send an action built from the current state
    Command(Request),
    List,
    Json,
    Help,
    Quit,
}

/// A command whose item position still has to be resolved to an id
#[derive(Debug, PartialEq, Eq)]
enum Request {
    Add(String),
    Draft(String),
    Submit,
    Toggle(usize),
    Remove(usize),
    Edit(usize),
    Text(usize, String),
    Save(usize),
    Cancel(usize),
}

fn parse_position(arg: &str) -> anyhow::Result<usize> {
    let n: usize = arg
        .parse()
        .with_context(|| format!("expected an item number, got {arg:?}"))?;
    if n == 0 {
        bail!("item numbers start at 1");
    }
    Ok(n - 1)
}

fn parse_line(line: &str) -> anyhow::Result<Option<Input>> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }
    let (word, rest) = line.split_once(' ').unwrap_or((line, ""));
    let rest = rest.trim();

    let input = match word {
        "add" => Input::Command(Request::Add(rest.to_string())),
        "draft" => Input::Command(Request::Draft(rest.to_string())),
        "submit" => Input::Command(Request::Submit),
        "toggle" => Input::Command(Request::Toggle(parse_position(rest)?)),
        "rm" => Input::Command(Request::Remove(parse_position(rest)?)),
        "edit" => Input::Command(Request::Edit(parse_position(rest)?)),
        "text" => {
            let (n, text) = rest.split_once(' ').unwrap_or((rest, ""));
            Input::Command(Request::Text(parse_position(n)?, text.to_string()))
        },
        "save" => Input::Command(Request::Save(parse_position(rest)?)),
        "cancel" => Input::Command(Request::Cancel(parse_position(rest)?)),
        "list" | "ls" => Input::List,
        "json" => Input::Json,
        "help" | "?" => Input::Help,
        "quit" | "exit" => Input::Quit,
        other => bail!("unknown command {other:?} (try `help`)"),
    };
    Ok(Some(input))
}

fn resolve(state: &TaskListState, position: usize) -> anyhow::Result<ItemId> {
    state
        .id_at(position)
        .with_context(|| format!("there is no item {}", position + 1))
}

fn to_action(state: &TaskListState, request: Request) -> anyhow::Result<TaskListAction> {
    Ok(match request {
        Request::Add(name) => TaskListAction::Add { name },
        Request::Draft(text) => TaskListAction::SetDraft { text },
        Request::Submit => TaskListAction::SubmitDraft,
        Request::Toggle(n) => TaskListAction::ToggleStatus {
            id: resolve(state, n)?,
        },
        Request::Remove(n) => TaskListAction::Remove {
            id: resolve(state, n)?,
        },
        Request::Edit(n) => TaskListAction::BeginEdit {
            id: resolve(state, n)?,
        },
        Request::Text(n, text) => TaskListAction::EditDraft {
            id: resolve(state, n)?,
            text,
        },
        Request::Save(n) => TaskListAction::SubmitEdit {
            id: resolve(state, n)?,
        },
        Request::Cancel(n) => TaskListAction::CancelEdit {
            id: resolve(state, n)?,
        },
    })
}

fn render(state: &TaskListState) -> String {
    let snapshot: TaskListSnapshot = state.snapshot();
    let mut out = String::new();
    for (n, item) in snapshot.items.iter().enumerate() {
        let mark = if item.status == Status::Completed { "x" } else { " " };
        let line = match &item.edit_draft {
            Some(draft) => format!("{:>3}. [{mark}] {} -> {draft:?} (editing)", n + 1, item.name),
            None if can_edit(state, item.id) => format!("{:>3}. [{mark}] {}", n + 1, item.name),
            None => format!("{:>3}. [{mark}] {} (done)", n + 1, item.name),
        };
        out.push_str(&line);
        out.push('\n');
    }
    if snapshot.items.is_empty() {
        out.push_str("  (empty)\n");
    }
    if !snapshot.draft.is_empty() {
        out.push_str(&format!("  draft: {:?}\n", snapshot.draft));
    }
    if let Some(error) = &snapshot.last_error {
        out.push_str(&format!("  error: {error}\n"));
    }
    out
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "tasklist=info,tasklist_runtime=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = TaskListConfig::from_env().context("loading configuration")?;
    tracing::info!(policy = %config.name_policy, "Starting task list");

    let env = TaskListEnvironment::new(Arc::new(SystemClock), Arc::new(RandomIds))
        .with_name_rules(config.name_rules());
    let store: TaskListStore = Store::with_config(
        TaskListState::new(),
        TaskListReducer::new(),
        env,
        config.store_config(),
    );

    println!("{HELP}\n");
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let input = match parse_line(&line) {
            Ok(Some(input)) => input,
            Ok(None) => continue,
            Err(error) => {
                println!("  {error:#}");
                continue;
            },
        };

        match input {
            Input::Command(request) => {
                let action = match store.state(|s| to_action(s, request)).await {
                    Ok(action) => action,
                    Err(error) => {
                        println!("  {error:#}");
                        continue;
                    },
                };
                store.send(action).await?;
                print!("{}", store.state(render).await);
            },
            Input::List => print!("{}", store.state(render).await),
            Input::Json => {
                let snapshot = store.state(TaskListState::snapshot).await;
                println!("{}", serde_json::to_string_pretty(&snapshot)?);
            },
            Input::Help => println!("{HELP}"),
            Input::Quit => break,
        }
    }

    store.shutdown();
    Ok(())
}
