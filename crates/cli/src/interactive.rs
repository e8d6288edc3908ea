//! Interactive browsing of one list page.
//!
//! Plain lines are search keystrokes and go through the debouncer; lines
//! starting with `:` are commands applied immediately.

use anyhow::{Context, Result, anyhow};
use chrono::{DateTime, NaiveDate, Utc};
use colored::Colorize;
use tokio::io::{AsyncBufReadExt, BufReader};

use dashboard::{ListController, MemoryHistory, breadcrumbs};
use pipeline::filters::{DatePreset, DateRange};
use pipeline::{DEFAULT_DEBOUNCE, Debouncer};
use store::Dataset;
use views::ViewDefinition;

use crate::render;

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Raw search text, committed after the quiet period
    Search(String),
    Enum { param: String, value: String },
    Sort(String),
    Page(usize),
    Next,
    Prev,
    Limit(usize),
    Date(Option<DatePreset>),
    From(Option<NaiveDate>),
    To(Option<NaiveDate>),
    Reset,
    Export(String),
    Delete(String),
    Help,
    Quit,
}

const HELP: &str = "\
Type to search. Commands:
  :<filter> <value|all>   e.g. :status pending
  :sort <name>            :page <n>   :next   :prev   :limit <10|20|30|40|50>
  :date <today|week|month|all>        :from <YYYY-MM-DD|->   :to <YYYY-MM-DD|->
  :reset   :export <file>   :delete <id>   :help   :quit";

pub fn parse_command(line: &str) -> Result<Command> {
    let Some(rest) = line.strip_prefix(':') else {
        return Ok(Command::Search(line.to_string()));
    };

    let mut parts = rest.split_whitespace();
    let name = parts.next().unwrap_or_default().to_lowercase();
    let arg = parts.collect::<Vec<_>>().join(" ");
    let need_arg = || {
        if arg.is_empty() {
            Err(anyhow!(":{} needs an argument", name))
        } else {
            Ok(arg.clone())
        }
    };

    let command = match name.as_str() {
        "sort" => Command::Sort(need_arg()?),
        "page" => Command::Page(need_arg()?.parse().context("Page must be a number")?),
        "next" => Command::Next,
        "prev" => Command::Prev,
        "limit" => Command::Limit(need_arg()?.parse().context("Limit must be a number")?),
        "date" => match need_arg()?.as_str() {
            "all" => Command::Date(None),
            preset => Command::Date(Some(preset.parse().map_err(|e: String| anyhow!(e))?)),
        },
        "from" => Command::From(parse_bound(&need_arg()?)?),
        "to" => Command::To(parse_bound(&need_arg()?)?),
        "reset" => Command::Reset,
        "export" => Command::Export(need_arg()?),
        "delete" => Command::Delete(need_arg()?),
        "help" | "?" => Command::Help,
        "quit" | "q" | "exit" => Command::Quit,
        "" => return Err(anyhow!("Empty command")),
        _ => Command::Enum {
            param: name.clone(),
            value: need_arg()?,
        },
    };
    Ok(command)
}

fn parse_bound(arg: &str) -> Result<Option<NaiveDate>> {
    if arg == "-" {
        return Ok(None);
    }
    NaiveDate::parse_from_str(arg, "%Y-%m-%d")
        .map(Some)
        .with_context(|| format!("Invalid date '{}', expected YYYY-MM-DD", arg))
}

/// Run the interactive loop until `:quit` or end of input.
pub async fn run<V: ViewDefinition>(dataset: &mut Dataset, url: &str, now: DateTime<Utc>) -> Result<()> {
    let history = MemoryHistory::from_url(url);
    render::print_breadcrumbs(&breadcrumbs(history.path()));
    let mut controller: ListController<V, MemoryHistory> = ListController::mount(dataset, history, now);
    show(&mut controller);
    println!("{}", HELP.dimmed());

    let (mut debouncer, mut committed) = Debouncer::<String>::new(DEFAULT_DEBOUNCE);
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line.context("Failed to read input")? else {
                    // flush a search typed just before end of input
                    if debouncer.is_pending() {
                        if let Some(term) = committed.recv().await {
                            controller.set_search(&term);
                            show(&mut controller);
                        }
                    }
                    break;
                };
                match parse_command(line.trim_end()) {
                    Ok(Command::Search(text)) => debouncer.push(text),
                    Ok(Command::Quit) => break,
                    Ok(Command::Help) => println!("{}", HELP),
                    Ok(command) => {
                        match apply(&mut controller, dataset, command) {
                            Ok(()) => show(&mut controller),
                            Err(e) => eprintln!("{} {:#}", "✗".red(), e),
                        }
                    }
                    Err(e) => eprintln!("{} {:#}", "✗".red(), e),
                }
            }
            Some(term) = committed.recv() => {
                tracing::debug!("Committed search: '{}'", term);
                controller.set_search(&term);
                show(&mut controller);
            }
        }
    }

    debouncer.cancel();
    Ok(())
}

fn apply<V: ViewDefinition>(
    controller: &mut ListController<V, MemoryHistory>,
    dataset: &mut Dataset,
    command: Command,
) -> Result<()> {
    match command {
        Command::Enum { param, value } => controller.set_enum(&param, &value)?,
        Command::Sort(name) => controller.set_sort(&name)?,
        Command::Page(page) => controller.go_to_page(page)?,
        Command::Next => controller.next_page()?,
        Command::Prev => controller.prev_page()?,
        Command::Limit(size) => controller.set_page_size(size)?,
        Command::Date(preset) => {
            let range = match preset {
                Some(preset) => DateRange::preset(preset),
                None => DateRange::default(),
            };
            controller.set_date(range, Utc::now())?;
        }
        Command::From(start) => {
            let range = DateRange {
                start,
                ..controller.state().date.clone()
            };
            controller.set_date(range, Utc::now())?;
        }
        Command::To(end) => {
            let range = DateRange {
                end,
                ..controller.state().date.clone()
            };
            controller.set_date(range, Utc::now())?;
        }
        Command::Reset => controller.reset(dataset),
        Command::Export(path) => {
            let csv = controller.export_csv()?;
            std::fs::write(&path, csv).with_context(|| format!("Failed to write {}", path))?;
        }
        Command::Delete(id) => {
            controller.delete(dataset, &id);
        }
        Command::Search(_) | Command::Help | Command::Quit => {}
    }
    Ok(())
}

fn show<V: ViewDefinition>(controller: &mut ListController<V, MemoryHistory>) {
    render::print_notices(&controller.take_notices());
    render::print_page(&controller.current_page(), &controller.history().href());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_text_is_search() {
        assert_eq!(parse_command("ali").unwrap(), Command::Search("ali".to_string()));
        assert_eq!(parse_command("").unwrap(), Command::Search(String::new()));
    }

    #[test]
    fn test_commands() {
        assert_eq!(parse_command(":page 3").unwrap(), Command::Page(3));
        assert_eq!(parse_command(":date week").unwrap(), Command::Date(Some(DatePreset::Week)));
        assert_eq!(parse_command(":date all").unwrap(), Command::Date(None));
        assert_eq!(parse_command(":from -").unwrap(), Command::From(None));
        assert_eq!(
            parse_command(":status pending").unwrap(),
            Command::Enum {
                param: "status".to_string(),
                value: "pending".to_string()
            }
        );
    }

    #[test]
    fn test_bad_commands() {
        assert!(parse_command(":page two").is_err());
        assert!(parse_command(":sort").is_err());
        assert!(parse_command(":from 01/02/2024").is_err());
        assert!(parse_command(":date year").is_err());
    }
}
