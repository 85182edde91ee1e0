use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use indexmap::IndexMap;
use log::{debug, info, warn};

use super::comparer::RowEqualityComparer;
use super::document::DatabaseDocument;
use super::error::{Error, Result};
use super::table::Table;

/// The collective of multiple [`Table`] objects.
///
/// A [`Database`] keeps its tables in the order they were added and makes
/// sure no two of them share a name. Everything else about a table is left
/// to the [`Table`] itself.
///
/// The database has no internal locking. It is meant to be owned by a single
/// caller, anything sharing it across threads has to wrap the whole object
/// in a lock of its own.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Database {
    tables: IndexMap<String, Table>,
}

impl Database {
    pub fn new() -> Database {
        //! Create a new database with no tables.

        Database {
            tables: IndexMap::new(),
        }
    }

    pub fn add_table(&mut self, table: Table) -> Result<()> {
        //! Register `table` under its own name.
        //!
        //! Fails with [`Error::DuplicateName`] and leaves the database as it
        //! was when the name is already taken.

        if self.tables.contains_key(table.name()) {
            return Err(Error::DuplicateName {
                name: table.name().to_string(),
            });
        }

        info!("adding table '{}'", table.name());
        self.tables.insert(table.name().to_string(), table);
        Ok(())
    }

    pub fn delete_table(&mut self, name: &str) -> Result<Table> {
        //! Remove the table called `name` and hand it back.
        //!
        //! The remaining tables keep their order.

        let table = self.tables.shift_remove(name).ok_or_else(|| Error::NotFound {
            name: name.to_string(),
        })?;

        info!("deleted table '{}'", name);
        Ok(table)
    }

    pub fn get_table(&self, name: &str) -> Option<&Table> {
        self.tables.get(name)
    }

    pub fn get_table_mut(&mut self, name: &str) -> Option<&mut Table> {
        self.tables.get_mut(name)
    }

    pub fn contains_table(&self, name: &str) -> bool {
        self.tables.contains_key(name)
    }

    pub fn get_table_names(&self) -> Vec<String> {
        self.tables.keys().cloned().collect()
    }

    pub fn tables(&self) -> impl Iterator<Item = &Table> {
        self.tables.values()
    }

    pub fn len(&self) -> usize {
        self.tables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }

    fn _resolve_pair(&self, left: &str, right: &str) -> Result<(&Table, &Table)> {
        //! Look up both sides of a difference and check that their schemas
        //! line up, in that order.

        let left_table = self.get_table(left).ok_or_else(|| Error::NotFound {
            name: left.to_string(),
        })?;
        let right_table = self.get_table(right).ok_or_else(|| Error::NotFound {
            name: right.to_string(),
        })?;

        if let Some(mismatch) = left_table.schema_mismatch(right_table) {
            return Err(Error::SchemaMismatch(mismatch));
        }

        Ok((left_table, right_table))
    }

    fn _subtract(left: &Table, right: &Table, result_name: &str) -> Table {
        let comparer = RowEqualityComparer::new(left.fields());
        let mut result = Table::with_fields(result_name, left.fields().to_vec());

        for row in left.rows() {
            if !comparer.contains(right.rows(), row) {
                result.add_row(row.clone());
            }
        }

        debug!(
            "difference of '{}' ({} rows) and '{}' ({} rows) kept {} rows",
            left.name(),
            left.row_count(),
            right.name(),
            right.row_count(),
            result.row_count()
        );

        result
    }

    pub fn difference_of(&self, left: &str, right: &str, result_name: &str) -> Result<Table> {
        //! Compute the rows of `left` that have no equal row in `right`,
        //! without registering the result.
        //!
        //! The result carries a copy of the left table's fields. Duplicates in
        //! `left` that are absent from `right` are all kept.
        //!
        //! Fails with [`Error::NotFound`] if either table is missing and with
        //! [`Error::SchemaMismatch`] if the field lists differ in length, or in
        //! name or type at any position. No row is looked at before both
        //! checks pass.

        let (left_table, right_table) = self._resolve_pair(left, right)?;
        Ok(Self::_subtract(left_table, right_table, result_name))
    }

    pub fn difference(&mut self, left: &str, right: &str, result_name: &str) -> Result<&Table> {
        //! Like [`Database::difference_of`], but the result is also added to
        //! the database under `result_name`.
        //!
        //! A `result_name` that is already taken fails with
        //! [`Error::DuplicateName`] once both tables have been validated and
        //! before any row is compared. The database is unchanged on failure.

        let (left_table, right_table) = self._resolve_pair(left, right)?;

        if self.contains_table(result_name) {
            return Err(Error::DuplicateName {
                name: result_name.to_string(),
            });
        }

        let result = Self::_subtract(left_table, right_table, result_name);
        self.add_table(result)?;

        self.get_table(result_name).ok_or_else(|| Error::NotFound {
            name: result_name.to_string(),
        })
    }

    pub fn to_json(&self) -> Result<String> {
        //! Encode the whole database as an indented JSON document.

        let document = DatabaseDocument::encode(self);
        serde_json::to_string_pretty(&document).map_err(Error::Serialization)
    }

    pub fn from_json(json: &str) -> Result<Database> {
        let document: DatabaseDocument = serde_json::from_str(json)?;
        document.decode()
    }

    pub fn save_to_file(&self, path: impl AsRef<Path>) -> Result<()> {
        //! Write the whole database to `path`, replacing what was there.
        //!
        //! The file is written in place. A crash halfway through leaves a
        //! truncated document behind.

        let path = path.as_ref();
        let json = self.to_json()?;
        fs::write(path, json)?;

        info!("saved {} tables to {}", self.len(), path.display());
        Ok(())
    }

    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Database> {
        //! Read a database back from `path`.
        //!
        //! A path that does not exist gives an empty database. Content that
        //! does not decode fails with [`Error::Deserialization`].

        let path = path.as_ref();
        let json = match fs::read_to_string(path) {
            Ok(json) => json,
            Err(error) if error.kind() == ErrorKind::NotFound => {
                warn!("{} does not exist, starting an empty database", path.display());
                return Ok(Database::new());
            }
            Err(error) => return Err(Error::Io(error)),
        };

        let database = Database::from_json(&json)?;
        info!("loaded {} tables from {}", database.len(), path.display());
        Ok(database)
    }
}
