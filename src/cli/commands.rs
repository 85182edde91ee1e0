//! This module is where all the commands are executed.
//!
//! Tabula command line syntax:
//!
//! - tabula --help                      | Command Line Help
//! - tabula client                      | Run the REPL.
//! - tabula tables                      | List the tables of the database file.
//! - tabula show <table>                | Print a table.
//! - tabula difference <l> <r> <result> | Store `l` minus `r` as `result`.
//!
//! Once the user is inside the REPL, the command parser takes over with the
//! following statements.
//!
//! - tables
//! - show <table>
//! - create <table> name:type*
//! - field <table> name:type
//! - insert <table> name=value*
//! - delete <table> <row>
//! - drop <table>
//! - diff <left> <right> <result>
//! - preview <left> <right>
//! - save | load
//!
//! Here * means zero or more such values separated by whitespace.

use std::fmt::Display;

use crate::cli::messages::{engine_error, highlight_argument, system_message};
use crate::cli::parsers::Command;
use crate::persistence::{Row, Table, Value};
use crate::sessions::session::Session;

/// The executor that runs a parsed [`Command`] against a [`Session`].
pub struct CommandExecutor {
    command: Command,
}

/// After a command runs, its result may need to be displayed on the
/// terminal.
///
/// The table is a copy, so it can be printed after the session has moved on.
pub struct CommandResult {
    pub table: Option<Table>,
    pub n_rows_processed: Option<usize>,
}

impl CommandResult {
    fn empty() -> CommandResult {
        CommandResult {
            table: None,
            n_rows_processed: Some(0),
        }
    }

    fn rows(n_rows: usize) -> CommandResult {
        CommandResult {
            table: None,
            n_rows_processed: Some(n_rows),
        }
    }

    fn table(table: Table) -> CommandResult {
        let n_rows = table.row_count();
        CommandResult {
            table: Some(table),
            n_rows_processed: Some(n_rows),
        }
    }
}

impl Display for CommandResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.table {
            Some(table) => write!(f, "{}", table),
            None => Ok(()),
        }
    }
}

pub fn print_table_list(session: &Session) {
    //! List every table with its field and row count.

    let database = session.database();

    if database.is_empty() {
        println!("There are no tables in the database yet.");
        return;
    }

    println!("There are {} tables in the database.", database.len());
    for (index, table) in database.tables().enumerate() {
        println!(
            "{:5}. {:20} {} field(s), {} row(s)",
            index + 1,
            table.name(),
            table.fields().len(),
            table.row_count()
        );
    }
}

fn table_not_found(table_name: &str) -> String {
    system_message(
        "exctr",
        format!("Table {} does not exist!", highlight_argument(table_name)),
    )
}

impl CommandExecutor {
    pub fn new(command: Command) -> CommandExecutor {
        CommandExecutor { command }
    }

    fn _build_row(&self, table: &Table, assignments: &[(String, String)]) -> Result<Row, String> {
        //! Convert raw `name=value` pairs into a [`Row`] using the declared
        //! types of the table's fields.
        //!
        //! Fields that are not mentioned are left missing.

        let mut row = Row::new();

        for (name, text) in assignments {
            let field = table.field(name).ok_or_else(|| {
                system_message(
                    "exctr",
                    format!(
                        "Table {} has no field {}.",
                        highlight_argument(table.name()),
                        highlight_argument(name)
                    ),
                )
            })?;

            let value = Value::parse(text, field.data_type).map_err(engine_error)?;
            row.set(name.clone(), value);
        }

        Ok(row)
    }

    pub fn execute(&self, session: &mut Session) -> Result<CommandResult, String> {
        //! Run the assigned command against the session's database.
        //!
        //! Every command that changes the database marks the session as
        //! changed, which saves it right away when autosave is on.

        match &self.command {
            Command::Tables => {
                print_table_list(session);
                Ok(CommandResult::empty())
            }
            Command::Show(table_name) => {
                let table = session
                    .database()
                    .get_table(table_name)
                    .cloned()
                    .ok_or_else(|| table_not_found(table_name))?;

                Ok(CommandResult::table(table))
            }
            Command::Create { table, fields } => {
                let table = Table::with_fields(table.clone(), fields.clone());
                session.database_mut().add_table(table).map_err(engine_error)?;
                session.mark_changed().map_err(engine_error)?;

                Ok(CommandResult::empty())
            }
            Command::AddField { table, field } => {
                session
                    .database_mut()
                    .get_table_mut(table)
                    .ok_or_else(|| table_not_found(table))?
                    .add_field(field.clone());
                session.mark_changed().map_err(engine_error)?;

                Ok(CommandResult::empty())
            }
            Command::Insert { table, assignments } => {
                let row = {
                    let target = session
                        .database()
                        .get_table(table)
                        .ok_or_else(|| table_not_found(table))?;
                    self._build_row(target, assignments)?
                };

                session
                    .database_mut()
                    .get_table_mut(table)
                    .ok_or_else(|| table_not_found(table))?
                    .add_row(row);
                session.mark_changed().map_err(engine_error)?;

                Ok(CommandResult::rows(1))
            }
            Command::Delete { table, row } => {
                let removed = session
                    .database_mut()
                    .get_table_mut(table)
                    .ok_or_else(|| table_not_found(table))?
                    .remove_row(*row);

                if removed.is_none() {
                    return Err(system_message(
                        "exctr",
                        format!(
                            "Table {} has no row {}.",
                            highlight_argument(table),
                            highlight_argument(&row.to_string())
                        ),
                    ));
                }
                session.mark_changed().map_err(engine_error)?;

                Ok(CommandResult::rows(1))
            }
            Command::Drop(table) => {
                let dropped = session
                    .database_mut()
                    .delete_table(table)
                    .map_err(engine_error)?;
                session.mark_changed().map_err(engine_error)?;

                Ok(CommandResult::rows(dropped.row_count()))
            }
            Command::Difference {
                left,
                right,
                result,
            } => {
                let table = session
                    .database_mut()
                    .difference(left, right, result)
                    .map_err(engine_error)?
                    .clone();
                session.mark_changed().map_err(engine_error)?;

                Ok(CommandResult::table(table))
            }
            Command::Preview { left, right } => {
                let result_name = format!("{} \\ {}", left, right);
                let table = session
                    .database()
                    .difference_of(left, right, &result_name)
                    .map_err(engine_error)?;

                Ok(CommandResult::table(table))
            }
            Command::Save => {
                session.save().map_err(engine_error)?;
                println!(
                    "{}",
                    system_message(
                        "system",
                        format!(
                            "Saved to {}.",
                            highlight_argument(&session.database_file().display().to_string())
                        ),
                    )
                );

                Ok(CommandResult::empty())
            }
            Command::Load => {
                session.reload().map_err(engine_error)?;

                Ok(CommandResult::empty())
            }
        }
    }
}
