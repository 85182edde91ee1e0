use tabula_engine::persistence::{DataType, Database, Error, Field, Row, Table};

fn _prepare_database() -> Database {
    Database::new()
}

fn _create_table(database: &mut Database, name: &str, rows: Vec<Row>) -> Result<(), Error> {
    let mut table = Table::with_fields(
        name,
        vec![
            Field::new("id", DataType::Integer),
            Field::new("name", DataType::String),
        ],
    );
    for row in rows {
        table.add_row(row);
    }
    database.add_table(table)
}

#[test]
fn database_add_and_get_table() {
    let mut database = _prepare_database();
    let rows = vec![
        Row::new().with("id", 1i64).with("name", "Jansen"),
        Row::new().with("id", 2i64).with("name", "Bonega"),
    ];

    _create_table(&mut database, "test_tb1", rows).unwrap();

    let table = database.get_table("test_tb1").unwrap();
    assert_eq!(table.row_count(), 2);
    assert!(database.contains_table("test_tb1"));
    assert!(database.get_table("test_tb2").is_none());
}

#[test]
fn database_add_duplicate_table_fails() {
    let mut database = _prepare_database();
    _create_table(&mut database, "test_tb1", vec![Row::new().with("id", 1i64)]).unwrap();

    let outcome = _create_table(&mut database, "test_tb1", vec![]);
    assert!(matches!(outcome, Err(Error::DuplicateName { ref name }) if name == "test_tb1"));

    // The original table is untouched.
    assert_eq!(database.len(), 1);
    assert_eq!(database.get_table("test_tb1").unwrap().row_count(), 1);
}

#[test]
fn database_delete_table() {
    let mut database = _prepare_database();
    for name in ["first", "second", "third"] {
        _create_table(&mut database, name, vec![]).unwrap();
    }

    let deleted = database.delete_table("second").unwrap();
    assert_eq!(deleted.name(), "second");
    assert_eq!(database.get_table_names(), vec!["first", "third"]);
}

#[test]
fn database_delete_missing_table_fails() {
    let mut database = _prepare_database();
    _create_table(&mut database, "first", vec![]).unwrap();

    let outcome = database.delete_table("ghost");
    assert!(matches!(outcome, Err(Error::NotFound { ref name }) if name == "ghost"));
    assert_eq!(
        outcome.unwrap_err().to_string(),
        "table 'ghost' was not found"
    );
    assert_eq!(database.len(), 1);
}

#[test]
fn database_tables_keep_insertion_order() {
    let mut database = _prepare_database();
    for name in ["zeta", "alpha", "mid"] {
        _create_table(&mut database, name, vec![]).unwrap();
    }

    let names: Vec<&str> = database.tables().map(|table| table.name()).collect();
    assert_eq!(names, vec!["zeta", "alpha", "mid"]);
}

#[test]
fn database_mutate_table_in_place() {
    let mut database = _prepare_database();
    _create_table(&mut database, "test_tb1", vec![]).unwrap();

    let table = database.get_table_mut("test_tb1").unwrap();
    table.add_field(Field::new("joined", DataType::Date));
    table.add_row(Row::new().with("id", 9i64));

    let table = database.get_table("test_tb1").unwrap();
    assert_eq!(table.fields().len(), 3);
    assert_eq!(table.row_count(), 1);
}
