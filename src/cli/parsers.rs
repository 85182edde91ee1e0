//! The place where CLI and REPL command parsers are defined.
//!
//! When the functionality becomes extensive, they will
//! each have their own files.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::cli::messages::{highlight_argument, system_message};
use crate::persistence::Field;

#[derive(Parser)]
#[command(name = "tabula")]
#[command(about = "A small in-memory tabular database", long_about = None)]
pub struct CliParser {
    /// Database file to open, overrides TABULA_DATABASE_FILE.
    #[arg(short, long, global = true)]
    pub file: Option<PathBuf>,

    /// Log filter such as `info` or `tabula_engine=debug`, overrides TABULA_LOG.
    #[arg(long, global = true)]
    pub log: Option<String>,

    #[command(subcommand)]
    pub mode: CliMode,
}

#[derive(Subcommand)]
pub enum CliMode {
    /// Start a REPL client on the database file.
    Client,

    /// List the tables of the database file.
    Tables,

    /// Print a single table.
    Show { table: String },

    /// Store the rows of LEFT that are not in RIGHT as a new table RESULT.
    Difference {
        left: String,
        right: String,
        result: String,

        /// Print the result without adding it to the database.
        #[arg(long)]
        dry_run: bool,
    },
}

/// A single REPL statement, already split into its arguments.
///
/// Values given to `insert` stay raw text here. They are converted once the
/// target table, and so the field types, are known.
#[derive(Debug, PartialEq)]
pub enum Command {
    Tables,
    Show(String),
    Create { table: String, fields: Vec<Field> },
    AddField { table: String, field: Field },
    Insert {
        table: String,
        assignments: Vec<(String, String)>,
    },
    Delete { table: String, row: usize },
    Drop(String),
    Difference {
        left: String,
        right: String,
        result: String,
    },
    Preview { left: String, right: String },
    Save,
    Load,
}

pub fn tokenize(line: &str) -> Result<Vec<String>, String> {
    //! Split a line on whitespace. Double quotes group words into a single
    //! token and are dropped, so `period="2024-01-01 - 2024-01-05"` is one
    //! token.

    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut in_token = false;
    let mut quoted = false;

    for ch in line.chars() {
        match ch {
            '"' => {
                quoted = !quoted;
                in_token = true;
            }
            ch if ch.is_whitespace() && !quoted => {
                if in_token {
                    tokens.push(std::mem::take(&mut current));
                    in_token = false;
                }
            }
            ch => {
                current.push(ch);
                in_token = true;
            }
        }
    }

    if quoted {
        return Err(system_message(
            "parser",
            "Unterminated quote in command.".to_string(),
        ));
    }
    if in_token {
        tokens.push(current);
    }

    Ok(tokens)
}

fn usage(syntax: &str) -> String {
    system_message("parser", format!("Usage: {}", highlight_argument(syntax)))
}

fn parse_field(definition: &str) -> Result<Field, String> {
    definition
        .parse()
        .map_err(|error| system_message("parser", format!("{}", error)))
}

pub fn parse_command(line: &str) -> Result<Command, String> {
    //! Parse one REPL line into a [`Command`].

    let tokens = tokenize(line)?;
    let (keyword, args) = match tokens.split_first() {
        Some((keyword, args)) => (keyword.to_lowercase(), args),
        None => {
            return Err(system_message("parser", "Empty command.".to_string()));
        }
    };

    match (keyword.as_str(), args) {
        ("tables", []) => Ok(Command::Tables),
        ("tables", _) => Err(usage("tables")),
        ("show", [table]) => Ok(Command::Show(table.clone())),
        ("show", _) => Err(usage("show <table>")),
        ("create", [table, definitions @ ..]) => Ok(Command::Create {
            table: table.clone(),
            fields: definitions
                .iter()
                .map(|definition| parse_field(definition))
                .collect::<Result<Vec<Field>, String>>()?,
        }),
        ("create", _) => Err(usage("create <table> [name:type]...")),
        ("field", [table, definition]) => Ok(Command::AddField {
            table: table.clone(),
            field: parse_field(definition)?,
        }),
        ("field", _) => Err(usage("field <table> <name:type>")),
        ("insert", [table, assignments @ ..]) => {
            let assignments = assignments
                .iter()
                .map(|assignment| match assignment.split_once('=') {
                    Some((name, value)) if !name.is_empty() => {
                        Ok((name.to_string(), value.to_string()))
                    }
                    _ => Err(usage("insert <table> [name=value]...")),
                })
                .collect::<Result<Vec<(String, String)>, String>>()?;

            Ok(Command::Insert {
                table: table.clone(),
                assignments,
            })
        }
        ("insert", _) => Err(usage("insert <table> [name=value]...")),
        ("delete", [table, row]) => {
            let row = row.parse::<usize>().map_err(|_| {
                system_message(
                    "parser",
                    format!("Invalid row number {}.", highlight_argument(row)),
                )
            })?;
            Ok(Command::Delete {
                table: table.clone(),
                row,
            })
        }
        ("delete", _) => Err(usage("delete <table> <row>")),
        ("drop", [table]) => Ok(Command::Drop(table.clone())),
        ("drop", _) => Err(usage("drop <table>")),
        ("diff", [left, right, result]) => Ok(Command::Difference {
            left: left.clone(),
            right: right.clone(),
            result: result.clone(),
        }),
        ("diff", _) => Err(usage("diff <left> <right> <result>")),
        ("preview", [left, right]) => Ok(Command::Preview {
            left: left.clone(),
            right: right.clone(),
        }),
        ("preview", _) => Err(usage("preview <left> <right>")),
        ("save", []) => Ok(Command::Save),
        ("save", _) => Err(usage("save")),
        ("load", []) => Ok(Command::Load),
        ("load", _) => Err(usage("load")),
        (other, _) => Err(system_message(
            "parser",
            format!("Unknown command {}.", highlight_argument(other)),
        )),
    }
}
