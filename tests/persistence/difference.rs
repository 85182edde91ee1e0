use tabula_engine::persistence::{
    DataType, Database, Error, Field, Row, SchemaMismatch, Table, Value, parse_date_time,
};

fn date(text: &str) -> Value {
    Value::Date(parse_date_time(text).unwrap())
}

fn employee(name: &str, hired: &str) -> Row {
    Row::new().with("Name", name).with("HireDate", date(hired))
}

fn _employees(name: &str, rows: Vec<Row>) -> Table {
    let mut table = Table::with_fields(
        name,
        vec![
            Field::new("Name", DataType::String),
            Field::new("HireDate", DataType::Date),
        ],
    );
    for row in rows {
        table.add_row(row);
    }
    table
}

fn _prepare_database() -> Database {
    let mut database = Database::new();
    database
        .add_table(_employees(
            "Employees2023",
            vec![employee("Ann", "2023-01-10"), employee("Bob", "2023-05-02")],
        ))
        .unwrap();
    database
        .add_table(_employees(
            "Employees2024",
            vec![employee("Ann", "2023-01-10")],
        ))
        .unwrap();
    database
}

#[test]
fn difference_keeps_rows_missing_from_right() {
    let mut database = _prepare_database();

    let left = database
        .difference("Employees2023", "Employees2024", "Left")
        .unwrap();

    assert_eq!(left.name(), "Left");
    assert_eq!(left.fields(), database_fields().as_slice());
    assert_eq!(left.rows(), &[employee("Bob", "2023-05-02")]);
}

fn database_fields() -> Vec<Field> {
    vec![
        Field::new("Name", DataType::String),
        Field::new("HireDate", DataType::Date),
    ]
}

#[test]
fn difference_registers_result_table() {
    let mut database = _prepare_database();
    database
        .difference("Employees2023", "Employees2024", "Left")
        .unwrap();

    assert_eq!(
        database.get_table_names(),
        vec!["Employees2023", "Employees2024", "Left"]
    );
    assert_eq!(database.get_table("Left").unwrap().row_count(), 1);
}

#[test]
fn difference_is_not_symmetric() {
    let mut database = _prepare_database();

    let forward = database
        .difference("Employees2023", "Employees2024", "Forward")
        .unwrap()
        .row_count();
    let backward = database
        .difference("Employees2024", "Employees2023", "Backward")
        .unwrap()
        .row_count();

    assert_eq!(forward, 1);
    assert_eq!(backward, 0);
}

#[test]
fn difference_ignores_time_of_day() {
    let mut database = Database::new();
    database
        .add_table(_employees("a", vec![employee("Ann", "2023-01-10T09:00")]))
        .unwrap();
    database
        .add_table(_employees("b", vec![employee("Ann", "2023-01-10 17:30:00")]))
        .unwrap();

    let result = database.difference_of("a", "b", "r").unwrap();
    assert_eq!(result.row_count(), 0);
}

#[test]
fn difference_keeps_duplicates_of_left() {
    let mut database = Database::new();
    database
        .add_table(_employees(
            "a",
            vec![
                employee("Bob", "2023-05-02"),
                employee("Bob", "2023-05-02"),
                employee("Ann", "2023-01-10"),
            ],
        ))
        .unwrap();
    database
        .add_table(_employees("b", vec![employee("Ann", "2023-01-10")]))
        .unwrap();

    let result = database.difference_of("a", "b", "r").unwrap();
    assert_eq!(result.row_count(), 2);
}

#[test]
fn difference_keeps_rows_with_missing_values() {
    let mut database = Database::new();
    let partial = Row::new().with("Name", "Cid");
    database
        .add_table(_employees("a", vec![partial.clone()]))
        .unwrap();
    database
        .add_table(_employees("b", vec![partial.clone()]))
        .unwrap();

    // A missing value never compares equal, so the row survives.
    let result = database.difference_of("a", "b", "r").unwrap();
    assert_eq!(result.rows(), &[partial]);
}

#[test]
fn difference_with_empty_right_copies_left() {
    let mut database = _prepare_database();
    database.add_table(_employees("empty", vec![])).unwrap();

    let result = database.difference_of("Employees2023", "empty", "r").unwrap();
    assert_eq!(
        result.rows(),
        database.get_table("Employees2023").unwrap().rows()
    );
}

#[test]
fn difference_of_does_not_register() {
    let database = _prepare_database();

    let result = database
        .difference_of("Employees2023", "Employees2024", "Left")
        .unwrap();

    assert_eq!(result.row_count(), 1);
    assert!(!database.contains_table("Left"));
}

#[test]
fn difference_missing_table_fails() {
    let mut database = _prepare_database();

    let outcome = database.difference("Employees2023", "Employees2099", "Left");
    assert!(matches!(outcome, Err(Error::NotFound { ref name }) if name == "Employees2099"));

    let outcome = database.difference("Employees1999", "Employees2099", "Left");
    assert!(matches!(outcome, Err(Error::NotFound { ref name }) if name == "Employees1999"));

    assert!(!database.contains_table("Left"));
}

#[test]
fn difference_field_count_mismatch_fails() {
    let mut database = _prepare_database();
    let mut wider = _employees("wider", vec![]);
    wider.add_field(Field::new("Team", DataType::String));
    database.add_table(wider).unwrap();

    let outcome = database.difference("Employees2023", "wider", "Left");
    assert!(matches!(
        outcome,
        Err(Error::SchemaMismatch(SchemaMismatch::FieldCount { left: 2, right: 3 }))
    ));
    assert!(!database.contains_table("Left"));
}

#[test]
fn difference_reordered_fields_fail() {
    let mut database = _prepare_database();
    database
        .add_table(Table::with_fields(
            "reordered",
            vec![
                Field::new("HireDate", DataType::Date),
                Field::new("Name", DataType::String),
            ],
        ))
        .unwrap();

    let outcome = database.difference("Employees2023", "reordered", "Left");
    assert!(matches!(
        outcome,
        Err(Error::SchemaMismatch(SchemaMismatch::Field { index: 0, .. }))
    ));
}

#[test]
fn difference_type_mismatch_names_the_index() {
    let mut database = _prepare_database();
    database
        .add_table(Table::with_fields(
            "texted",
            vec![
                Field::new("Name", DataType::String),
                Field::new("HireDate", DataType::String),
            ],
        ))
        .unwrap();

    let error = database
        .difference("Employees2023", "texted", "Left")
        .unwrap_err();

    assert!(matches!(
        error,
        Error::SchemaMismatch(SchemaMismatch::Field { index: 1, .. })
    ));
    assert!(error.to_string().contains("index 1"));
}

#[test]
fn difference_existing_result_name_fails() {
    let mut database = _prepare_database();

    let outcome = database.difference("Employees2023", "Employees2024", "Employees2024");
    assert!(matches!(outcome, Err(Error::DuplicateName { ref name }) if name == "Employees2024"));

    // The existing table is left as it was.
    assert_eq!(database.len(), 2);
    assert_eq!(database.get_table("Employees2024").unwrap().row_count(), 1);
}

#[test]
fn difference_schema_checked_before_result_name() {
    let mut database = _prepare_database();
    database
        .add_table(Table::with_fields(
            "narrow",
            vec![Field::new("Name", DataType::String)],
        ))
        .unwrap();

    let outcome = database.difference("Employees2023", "narrow", "Employees2024");
    assert!(matches!(outcome, Err(Error::SchemaMismatch(_))));
}

#[test]
fn difference_intervals_by_day() {
    let fields = vec![
        Field::new("Project", DataType::String),
        Field::new("Period", DataType::DateInterval),
    ];
    let mut planned = Table::with_fields("planned", fields.clone());
    planned.add_row(
        Row::new()
            .with("Project", "Atlas")
            .with("Period", Value::Interval("2024-01-01 - 2024-01-05".into())),
    );
    planned.add_row(
        Row::new()
            .with("Project", "Borealis")
            .with("Period", Value::Interval("2024-02-01 - 2024-02-09".into())),
    );

    let mut done = Table::with_fields("done", fields);
    done.add_row(
        Row::new()
            .with("Project", "Atlas")
            .with("Period", Value::Interval("2024-01-01T00:00 - 2024-01-05T23:59".into())),
    );

    let mut database = Database::new();
    database.add_table(planned).unwrap();
    database.add_table(done).unwrap();

    let open = database.difference("planned", "done", "open").unwrap();
    assert_eq!(open.row_count(), 1);
    assert_eq!(
        open.rows()[0].get("Project"),
        Some(&Value::from("Borealis"))
    );
}
