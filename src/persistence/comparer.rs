//! Type aware row equality.
//!
//! Two rows are compared field by field in schema order and the first field
//! that does not match settles it. Nothing in here fails. A missing value,
//! a value of the wrong variant or an interval that does not parse all just
//! make the rows unequal.

use super::row::Row;
use super::schema::{DataType, Field};
use super::temporal::{DateInterval, same_day};
use super::value::Value;

/// Decides whether two rows are the same under a given schema.
///
/// Only the fields of the schema are looked at, extra names carried by a
/// row are ignored.
pub struct RowEqualityComparer<'a> {
    fields: &'a [Field],
}

impl<'a> RowEqualityComparer<'a> {
    pub fn new(fields: &'a [Field]) -> RowEqualityComparer<'a> {
        RowEqualityComparer { fields }
    }

    pub fn equals(&self, left: &Row, right: &Row) -> bool {
        self.fields.iter().all(|field| field_equals(field, left, right))
    }

    pub fn contains(&self, rows: &[Row], row: &Row) -> bool {
        //! Whether any of `rows` compares equal to `row`.

        rows.iter().any(|candidate| self.equals(row, candidate))
    }
}

fn field_equals(field: &Field, left: &Row, right: &Row) -> bool {
    // A missing value never matches, not even another missing value.
    let (Some(left), Some(right)) = (left.get(&field.name), right.get(&field.name)) else {
        return false;
    };

    match (left.is_null(), right.is_null()) {
        (true, true) => return true,
        (true, false) | (false, true) => return false,
        (false, false) => {}
    }

    match field.data_type {
        DataType::Date => dates_equal(left, right),
        DataType::DateInterval => intervals_equal(left, right),
        DataType::String | DataType::Integer | DataType::Float | DataType::Boolean => {
            values_equal(left, right)
        }
    }
}

fn values_equal(left: &Value, right: &Value) -> bool {
    match (left, right) {
        // NaN matches NaN, otherwise a NaN row could never match itself.
        (Value::Float(left), Value::Float(right)) => {
            left == right || (left.is_nan() && right.is_nan())
        }
        _ => left == right,
    }
}

fn dates_equal(left: &Value, right: &Value) -> bool {
    match (left, right) {
        (Value::Date(left), Value::Date(right)) => same_day(left, right),
        _ => false,
    }
}

fn intervals_equal(left: &Value, right: &Value) -> bool {
    match (parse_interval(left), parse_interval(right)) {
        (Some(left), Some(right)) => left.same_days(&right),
        _ => false,
    }
}

fn parse_interval(value: &Value) -> Option<DateInterval> {
    match value {
        Value::Interval(text) | Value::String(text) => text.parse().ok(),
        _ => None,
    }
}
