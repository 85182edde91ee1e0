use std::io::{self, Write};

use colored::Colorize;

use crate::{
    cli::{
        commands::{CommandExecutor, CommandResult, print_table_list},
        messages::{TABULA_TEAL, engine_error, highlight_argument, splash_screen, system_message},
        parsers::parse_command,
    },
    config::Config,
    sessions::session::Session,
};

pub mod commands;
mod messages;
pub mod parsers;

const DEFAULT_LAST_COMMAND_DELIMITER: &str = "!";

const TABULA_ENGINE_COMMANDS_LIST: [(&str, &str); 15] = [
    ("tables", "list all tables with their field and row counts"),
    ("show", "show <table>; print a table"),
    ("create", "create <table> [name:type]...; add a new table"),
    ("field", "field <table> <name:type>; add a field to a table"),
    ("insert", "insert <table> [name=value]...; add a row, quote values with spaces"),
    ("delete", "delete <table> <row>; remove a row by its position"),
    ("drop", "drop <table>; remove a table"),
    ("diff", "diff <left> <right> <result>; store the rows of left missing from right"),
    ("preview", "preview <left> <right>; print a difference without storing it"),
    ("save", "write the database file"),
    ("load", "read the database file again, dropping unsaved changes"),
    ("!", "execute the last command, add more to go further back"),
    ("help", "list all available commands"),
    ("history", "list command history for this session"),
    ("quit", "leave the session, 'exit' works too"),
];

pub fn run_client(config: &Config) -> Result<(), String> {
    splash_screen();

    let mut session = Session::client(config).map_err(engine_error)?;

    println!(
        "{}",
        system_message(
            "info",
            format!(
                "Opened {} with {} table(s).",
                highlight_argument(&config.database_file.display().to_string()),
                session.database().len()
            )
        )
    );

    start_repl(&mut session);
    Ok(())
}

pub fn run_tables(config: &Config) -> Result<(), String> {
    let session = Session::client(config).map_err(engine_error)?;
    print_table_list(&session);
    Ok(())
}

pub fn run_show(config: &Config, table_name: &str) -> Result<(), String> {
    let session = Session::client(config).map_err(engine_error)?;
    let table = session.database().get_table(table_name).ok_or_else(|| {
        system_message(
            "exctr",
            format!("Table {} does not exist!", highlight_argument(table_name)),
        )
    })?;

    println!("{}", table);
    Ok(())
}

pub fn run_difference(
    config: &Config,
    left: &str,
    right: &str,
    result: &str,
    dry_run: bool,
) -> Result<(), String> {
    //! Compute a difference outside of the REPL.
    //!
    //! The result is stored and the file saved, unless `dry_run` is set, in
    //! which case it is only printed.

    let mut session = Session::client(config).map_err(engine_error)?;

    let table = if dry_run {
        session
            .database()
            .difference_of(left, right, result)
            .map_err(engine_error)?
    } else {
        let table = session
            .database_mut()
            .difference(left, right, result)
            .map_err(engine_error)?
            .clone();
        session.save().map_err(engine_error)?;
        table
    };

    println!("{}", table);
    Ok(())
}

pub fn show_help() {
    println!(
        "{}",
        system_message(
            "info",
            format!(
                "Field types are {}, {} stores a null.",
                highlight_argument("string integer float boolean date interval"),
                highlight_argument("NIL")
            )
        )
    );

    println!();
    println!("{:10} {}", "COMMAND".color(TABULA_TEAL), "DETAILS");
    for (command, details) in TABULA_ENGINE_COMMANDS_LIST {
        println!("{:10} {}", command.color(TABULA_TEAL), details)
    }
}

fn start_repl(session: &mut Session) {
    println!(
        "{}",
        system_message(
            "system",
            format!(
                "Use '{}' to leave and '{}' to know all commands available.",
                highlight_argument("quit"),
                highlight_argument("help"),
            ),
        )
    );

    println!(
        "{}",
        system_message(
            "system",
            format!(
                "New session initiated at '{}'.",
                highlight_argument(&session.start_time_string())
            ),
        )
    );

    loop {
        let mut command_result: Option<CommandResult> = None;

        println!();
        print!("{:6} > ", "tabula".color(TABULA_TEAL).bold());
        if io::stdout().flush().is_err() {
            break;
        }

        let mut buffer = String::new();
        match io::stdin().read_line(&mut buffer) {
            // End of input behaves like quit.
            Ok(0) | Err(_) => break,
            Ok(_) => {}
        }

        if buffer.trim().is_empty() {
            continue;
        }

        if buffer.starts_with(DEFAULT_LAST_COMMAND_DELIMITER) {
            let last = buffer.matches(DEFAULT_LAST_COMMAND_DELIMITER).count();

            match session.get_last_command(last) {
                Some(command) => buffer = command.to_string(),
                None => {
                    println!(
                        "{}",
                        system_message(
                            "system",
                            format!(
                                "No command {} steps back.",
                                highlight_argument(&last.to_string())
                            ),
                        )
                    );
                    continue;
                }
            }
        }

        session.add_to_command_history(buffer.trim());

        match buffer.trim() {
            "history" => session.show_command_history(None),
            "help" => show_help(),
            "quit" | "exit" => break,
            line => match parse_command(line) {
                Ok(command) => {
                    let executor = CommandExecutor::new(command);
                    match executor.execute(session) {
                        Ok(result) => {
                            println!(
                                "{}",
                                system_message(
                                    "tabula",
                                    format!(
                                        "{} row(s) processed!",
                                        result.n_rows_processed.unwrap_or(0)
                                    )
                                )
                            );

                            command_result = Some(result);
                        }
                        Err(error) => println!("{}", error),
                    }
                }
                Err(error) => println!("{}", error),
            },
        }

        if let Some(result) = command_result.take() {
            if result.table.is_some() {
                print!("{}", result)
            }
        }
    }

    if session.has_unsaved_changes() {
        println!(
            "{}",
            system_message(
                "system",
                format!(
                    "Unsaved changes were dropped, use '{}' next time to keep them.",
                    highlight_argument("save")
                ),
            )
        );
    }

    println!("Goodbye!")
}
