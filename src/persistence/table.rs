use super::error::SchemaMismatch;
use super::row::Row;
use super::schema::{Field, compare_schemas};

use std::fmt::Display;

/// An ordered list of [`Field`]s and the [`Row`]s stored against them.
///
/// The table is the dumb half of the engine, it accepts whatever it is
/// handed. Rows are not checked against the fields on insertion and field
/// names are unique by convention only. A row's identity is its position.
#[derive(Clone, Debug, PartialEq)]
pub struct Table {
    name: String,
    fields: Vec<Field>,
    rows: Vec<Row>,
}

impl Table {
    pub fn new(name: impl Into<String>) -> Table {
        Table {
            name: name.into(),
            fields: Vec::new(),
            rows: Vec::new(),
        }
    }

    pub fn with_fields(name: impl Into<String>, fields: Vec<Field>) -> Table {
        Table {
            name: name.into(),
            fields,
            rows: Vec::new(),
        }
    }

    pub(crate) fn from_parts(name: String, fields: Vec<Field>, rows: Vec<Row>) -> Table {
        Table { name, fields, rows }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    pub fn field(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|field| field.name == name)
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn add_field(&mut self, field: Field) {
        self.fields.push(field);
    }

    pub fn add_row(&mut self, row: Row) {
        self.rows.push(row);
    }

    pub fn remove_row(&mut self, index: usize) -> Option<Row> {
        //! Remove the row at `index`, shifting every later row back by one.

        if index < self.rows.len() {
            Some(self.rows.remove(index))
        } else {
            None
        }
    }

    pub fn schema_mismatch(&self, other: &Table) -> Option<SchemaMismatch> {
        //! Check whether `other` declares the same fields in the same order.
        //!
        //! Returns [`None`] when the schemas line up.

        compare_schemas(&self.fields, &other.fields)
    }
}

impl Display for Table {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let header: Vec<String> = self.fields.iter().map(|field| field.to_string()).collect();
        let rows: Vec<String> = self
            .rows
            .iter()
            .map(|row| row.display_with(&self.fields).to_string())
            .collect();

        writeln!(f, "{}", self.name)?;
        writeln!(f, "{}", header.join(" | "))?;
        for row in rows {
            writeln!(f, "{}", row)?;
        }
        Ok(())
    }
}
