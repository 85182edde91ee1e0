use std::fs;

use tabula_engine::persistence::{
    DataType, Database, Error, FORMAT_VERSION, Field, Row, Table, Value, parse_date_time,
};

fn _sample_database() -> Database {
    let mut employees = Table::with_fields(
        "Employees",
        vec![
            Field::new("Name", DataType::String),
            Field::new("Age", DataType::Integer),
            Field::new("Rating", DataType::Float),
            Field::new("Active", DataType::Boolean),
            Field::new("HireDate", DataType::Date),
            Field::new("Leave", DataType::DateInterval),
        ],
    );
    employees.add_row(
        Row::new()
            .with("Name", "Ann")
            .with("Age", 34i64)
            .with("Rating", 4.5f64)
            .with("Active", true)
            .with("HireDate", parse_date_time("2023-01-10T08:30:15").unwrap())
            .with("Leave", Value::Interval("2024-01-01 - 2024-01-05".into())),
    );
    employees.add_row(
        Row::new()
            .with("Name", "Bob")
            .with("Age", Value::Null)
            .with("Rating", 3.0f64)
            .with("Active", false)
            .with("Leave", Value::Interval("not an interval".into())),
    );

    let mut database = Database::new();
    database.add_table(employees).unwrap();
    database.add_table(Table::new("Empty")).unwrap();
    database
}

#[test]
fn storage_round_trip_through_file() {
    let directory = tempfile::tempdir().unwrap();
    let path = directory.path().join("database.json");
    let database = _sample_database();

    database.save_to_file(&path).unwrap();
    let loaded = Database::load_from_file(&path).unwrap();

    assert_eq!(loaded, database);
    assert_eq!(loaded.get_table_names(), vec!["Employees", "Empty"]);
}

#[test]
fn storage_missing_file_gives_empty_database() {
    let directory = tempfile::tempdir().unwrap();
    let path = directory.path().join("nothing-here.json");

    let database = Database::load_from_file(&path).unwrap();
    assert!(database.is_empty());
}

#[test]
fn storage_malformed_file_fails() {
    let directory = tempfile::tempdir().unwrap();
    let path = directory.path().join("broken.json");
    fs::write(&path, "{ \"tables\": [ { \"name\": ").unwrap();

    let outcome = Database::load_from_file(&path);
    assert!(matches!(outcome, Err(Error::Deserialization { .. })));
}

#[test]
fn storage_document_shape() {
    let json = _sample_database().to_json().unwrap();
    let document: serde_json::Value = serde_json::from_str(&json).unwrap();

    assert_eq!(document["version"], FORMAT_VERSION);
    let table = &document["tables"][0];
    assert_eq!(table["name"], "Employees");
    assert_eq!(table["fields"][4]["name"], "HireDate");
    assert_eq!(table["fields"][4]["type"], "date");
    assert_eq!(table["fields"][5]["type"], "interval");

    let values = &table["rows"][0]["values"];
    assert_eq!(values["Name"], "Ann");
    assert_eq!(values["Age"], 34);
    assert_eq!(values["HireDate"]["date"], "2023-01-10T08:30:15");
    assert_eq!(values["Leave"]["interval"], "2024-01-01 - 2024-01-05");
    assert!(table["rows"][1]["values"]["Age"].is_null());

    // Indented, one document per file.
    assert!(json.contains("\n  "));
}

#[test]
fn storage_reads_unversioned_documents() {
    let json = r#"{
        "tables": [
            { "name": "t",
              "fields": [ { "name": "when", "type": "date" } ],
              "rows": [ { "values": { "when": { "date": "2023-05-02T00:00:00" } } } ] }
        ]
    }"#;

    let database = Database::from_json(json).unwrap();
    let table = database.get_table("t").unwrap();
    assert_eq!(
        table.rows()[0].get("when"),
        Some(&Value::Date(parse_date_time("2023-05-02").unwrap()))
    );
}

#[test]
fn storage_rejects_future_versions() {
    let json = r#"{ "version": 99, "tables": [] }"#;

    assert!(matches!(
        Database::from_json(json),
        Err(Error::Deserialization { .. })
    ));
}

#[test]
fn storage_rejects_duplicate_table_names() {
    let json = r#"{ "version": 1, "tables": [
        { "name": "t", "fields": [], "rows": [] },
        { "name": "t", "fields": [], "rows": [] }
    ] }"#;

    assert!(matches!(
        Database::from_json(json),
        Err(Error::Deserialization { .. })
    ));
}

#[test]
fn storage_rejects_unknown_field_types() {
    let json = r#"{ "version": 1, "tables": [
        { "name": "t", "fields": [ { "name": "x", "type": "blob" } ], "rows": [] }
    ] }"#;

    assert!(matches!(
        Database::from_json(json),
        Err(Error::Deserialization { .. })
    ));
}

#[test]
fn storage_difference_survives_reload() {
    let directory = tempfile::tempdir().unwrap();
    let path = directory.path().join("database.json");
    let mut database = _sample_database();

    let mut rehired = Table::with_fields(
        "Rehired",
        database.get_table("Employees").unwrap().fields().to_vec(),
    );
    rehired.add_row(
        Row::new()
            .with("Name", "Ann")
            .with("Age", 34i64)
            .with("Rating", 4.5f64)
            .with("Active", true)
            .with("HireDate", parse_date_time("2023-01-10").unwrap())
            .with("Leave", Value::Interval("2024-01-01T09:00 - 2024-01-05".into())),
    );
    database.add_table(rehired).unwrap();
    database.save_to_file(&path).unwrap();

    let mut loaded = Database::load_from_file(&path).unwrap();
    let result = loaded.difference("Employees", "Rehired", "Left").unwrap();

    assert_eq!(result.row_count(), 1);
    assert_eq!(result.rows()[0].get("Name"), Some(&Value::from("Bob")));
}

#[test]
fn storage_keeps_non_finite_floats() {
    let fields = vec![Field::new("x", DataType::Float)];
    let mut database = Database::new();
    for name in ["a", "b"] {
        let mut table = Table::with_fields(name, fields.clone());
        table.add_row(Row::new().with("x", Value::parse("NaN", DataType::Float).unwrap()));
        table.add_row(Row::new().with("x", f64::NEG_INFINITY));
        database.add_table(table).unwrap();
    }

    let before = database.difference_of("a", "b", "r").unwrap();
    let loaded = Database::from_json(&database.to_json().unwrap()).unwrap();
    let after = loaded.difference_of("a", "b", "r").unwrap();

    assert_eq!(before.row_count(), 0);
    assert_eq!(after.row_count(), 0);

    let rows = loaded.get_table("a").unwrap().rows();
    assert!(matches!(rows[0].get("x"), Some(Value::Float(x)) if x.is_nan()));
    assert_eq!(rows[1].get("x"), Some(&Value::Float(f64::NEG_INFINITY)));
}
