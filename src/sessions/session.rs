//! The only point of truth for all information that is related to the
//! current user session in the engine. A session keeps the command history
//! of the client, the database that is currently open and the file it was
//! read from.
//!
//! A session starts by loading its database file (an empty database if the
//! file is not there yet) and only writes it back when asked to, or after
//! every change when autosave is on. Changes that were not saved yet are
//! tracked so the client can warn before quitting.

use std::{fmt::Display, path::PathBuf, time::SystemTime};

use chrono::{DateTime, Local};
use log::debug;

use crate::config::Config;
use crate::persistence::{Database, Result};

struct CommandHistory {
    command: String,
    command_time: SystemTime,
}

impl CommandHistory {
    pub fn command_time_string(&self) -> String {
        let datetime: DateTime<Local> = self.command_time.into();
        datetime.format("%Y-%m-%d %H:%M:%S").to_string()
    }
}

impl Display for CommandHistory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} - {}", self.command_time_string(), self.command)
    }
}

pub struct Session {
    command_history: Vec<CommandHistory>,
    start_time: SystemTime,
    database: Database,
    database_file: PathBuf,
    autosave: bool,
    unsaved_changes: bool,
}

impl Session {
    pub fn client(config: &Config) -> Result<Session> {
        //! Returns a new client session with the configured database file
        //! loaded.

        let database = Database::load_from_file(&config.database_file)?;

        Ok(Session {
            command_history: vec![],
            start_time: SystemTime::now(),
            database,
            database_file: config.database_file.clone(),
            autosave: config.autosave,
            unsaved_changes: false,
        })
    }

    pub fn database(&self) -> &Database {
        &self.database
    }

    pub fn database_mut(&mut self) -> &mut Database {
        &mut self.database
    }

    pub fn database_file(&self) -> &PathBuf {
        &self.database_file
    }

    pub fn has_unsaved_changes(&self) -> bool {
        self.unsaved_changes
    }

    pub fn mark_changed(&mut self) -> Result<()> {
        //! Record that the database was modified, saving right away when
        //! autosave is on.

        self.unsaved_changes = true;
        if self.autosave {
            self.save()?;
        }
        Ok(())
    }

    pub fn save(&mut self) -> Result<()> {
        self.database.save_to_file(&self.database_file)?;
        self.unsaved_changes = false;
        Ok(())
    }

    pub fn reload(&mut self) -> Result<()> {
        //! Throw away the in-memory state and read the database file again.

        self.database = Database::load_from_file(&self.database_file)?;
        self.unsaved_changes = false;
        debug!("reloaded {}", self.database_file.display());
        Ok(())
    }

    pub fn add_to_command_history(&mut self, command: &str) {
        self.command_history.push(CommandHistory {
            command: command.to_string(),
            command_time: SystemTime::now(),
        });
    }

    pub fn start_time_string(&self) -> String {
        //! Convert the [`SystemTime`] object into a string representation
        //! to be more readable.

        let datetime: DateTime<Local> = self.start_time.into();
        datetime.format("%Y-%m-%d %H:%M:%S").to_string()
    }

    pub fn show_command_history(&self, n_prev: Option<usize>) {
        //! Show the list of previously invoked commands.
        //! Use `n_prev` to limit the number of commands you see.

        let limit = n_prev.unwrap_or(self.command_history.len());

        for (index, command) in self.command_history.iter().rev().enumerate() {
            if index < limit {
                println!("{:3} | {}", index, command);
            }
        }
    }

    pub fn get_last_command(&self, nth_back: usize) -> Option<&str> {
        //! Gets the `nth_back`th last command from the history.

        if nth_back == 0 {
            return None;
        }

        self.command_history
            .iter()
            .nth_back(nth_back - 1)
            .map(|cmd| cmd.command.as_str())
    }
}
