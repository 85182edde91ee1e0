//! An in-memory tabular database.
//!
//! Tables are made of typed fields and rows of values, kept together in a
//! [`persistence::Database`] that is saved to and loaded from a JSON file.
//! The one operation with real logic is the difference of two tables, see
//! [`persistence::Database::difference`].

pub mod cli;
pub mod config;
pub mod logging;
pub mod persistence;
pub mod sessions;
