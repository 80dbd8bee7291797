//! Interactive menu
//!
//! Maps a typed command word to a handler, looked up case-insensitively,
//! with an explicit branch for unrecognized input. A background refresh is
//! started at launch; the prompt stays responsive while it runs, and every
//! handler joins the in-flight refresh before executing, so no handler
//! ever observes a half-replaced store.

use std::io::{self, Write};

use anyhow::Result;

use crate::commands;
use crate::output::Output;
use crate::App;

/// One menu selection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MenuCommand {
    List,
    Create,
    Delete,
    Properties,
    SearchName,
    SearchValue,
    Sync,
    Help,
    Quit,
}

/// Lookup table from input word to command
const COMMANDS: &[(&str, MenuCommand)] = &[
    ("list", MenuCommand::List),
    ("ls", MenuCommand::List),
    ("create", MenuCommand::Create),
    ("add", MenuCommand::Create),
    ("delete", MenuCommand::Delete),
    ("rm", MenuCommand::Delete),
    ("properties", MenuCommand::Properties),
    ("props", MenuCommand::Properties),
    ("name", MenuCommand::SearchName),
    ("value", MenuCommand::SearchValue),
    ("sync", MenuCommand::Sync),
    ("refresh", MenuCommand::Sync),
    ("help", MenuCommand::Help),
    ("quit", MenuCommand::Quit),
    ("exit", MenuCommand::Quit),
    ("q", MenuCommand::Quit),
];

/// Case-insensitive command lookup
fn lookup(input: &str) -> Option<MenuCommand> {
    COMMANDS
        .iter()
        .find(|(word, _)| word.eq_ignore_ascii_case(input))
        .map(|(_, command)| *command)
}

/// Run the interactive menu loop
pub async fn run(app: &App, output: &Output) -> Result<()> {
    // Kick off the initial load; the prompt below stays usable while it
    // runs, and each handler joins before touching the store.
    app.coordinator.start_refresh().await;

    if !output.is_quiet() {
        print_help();
    }

    loop {
        print!("trove> ");
        io::stdout().flush()?;

        let mut input = String::new();
        if io::stdin().read_line(&mut input)? == 0 {
            break; // EOF
        }
        let input = input.trim();
        if input.is_empty() {
            continue;
        }

        let Some(command) = lookup(input) else {
            println!("Unrecognized command: {}. Type 'help' for the list.", input);
            continue;
        };

        let result = match command {
            MenuCommand::List => commands::item::list(app, output).await,
            MenuCommand::Create => create_interactive(app, output).await,
            MenuCommand::Delete => delete_interactive(app, output).await,
            MenuCommand::Properties => commands::search::properties(app, output).await,
            MenuCommand::SearchName => search_name_interactive(app, output).await,
            MenuCommand::SearchValue => search_value_interactive(app, output).await,
            MenuCommand::Sync => commands::sync::run(app, output).await,
            MenuCommand::Help => {
                print_help();
                Ok(())
            }
            MenuCommand::Quit => break,
        };

        if let Err(e) = result {
            eprintln!("Error: {:#}", e);
        }
    }

    Ok(())
}

fn print_help() {
    println!();
    println!("Commands:");
    println!("  list        List all items");
    println!("  create      Create a new item");
    println!("  delete      Delete an item by id");
    println!("  properties  List all property names");
    println!("  name        Search property values by name fragment");
    println!("  value       Search items by exact property value");
    println!("  sync        Refresh from the remote source");
    println!("  help        Show this list");
    println!("  quit        Exit");
    println!();
}

/// Prompt for a single line of input
fn prompt(label: &str) -> Result<String> {
    print!("{}: ", label);
    io::stdout().flush()?;

    let mut input = String::new();
    io::stdin().read_line(&mut input)?;
    Ok(input.trim().to_string())
}

async fn create_interactive(app: &App, output: &Output) -> Result<()> {
    let name = prompt("Name")?;
    if name.is_empty() {
        println!("Cancelled.");
        return Ok(());
    }

    let mut props = Vec::new();
    loop {
        let pair = prompt("Property (name=value, empty to finish)")?;
        if pair.is_empty() {
            break;
        }
        if !pair.contains('=') {
            println!("Expected name=value");
            continue;
        }
        props.push(pair);
    }

    commands::item::create(app, name, props, output).await
}

async fn delete_interactive(app: &App, output: &Output) -> Result<()> {
    let id = prompt("Item id")?;
    if id.is_empty() {
        println!("Cancelled.");
        return Ok(());
    }

    commands::item::delete(app, id, output).await
}

async fn search_name_interactive(app: &App, output: &Output) -> Result<()> {
    let fragment = prompt("Property name fragment")?;
    commands::search::by_name(app, fragment, output).await
}

async fn search_value_interactive(app: &App, output: &Output) -> Result<()> {
    let value = prompt("Property value")?;
    commands::search::by_value(app, value, output).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_is_case_insensitive() {
        assert_eq!(lookup("list"), Some(MenuCommand::List));
        assert_eq!(lookup("LIST"), Some(MenuCommand::List));
        assert_eq!(lookup("List"), Some(MenuCommand::List));
    }

    #[test]
    fn test_lookup_aliases() {
        assert_eq!(lookup("ls"), Some(MenuCommand::List));
        assert_eq!(lookup("rm"), Some(MenuCommand::Delete));
        assert_eq!(lookup("q"), Some(MenuCommand::Quit));
        assert_eq!(lookup("refresh"), Some(MenuCommand::Sync));
    }

    #[test]
    fn test_lookup_unrecognized() {
        assert_eq!(lookup("frobnicate"), None);
        assert_eq!(lookup(""), None);
    }
}
