use std::io::Cursor;

use bikeshare_explorer::config::ExplorerConfig;
use bikeshare_explorer::console::Console;
use bikeshare_explorer::explore::loader::{
    filter, load, DatasetRegistry, BIRTH_YEAR, DAY_OF_WEEK, MONTH_OF_YEAR, START_END_STATION,
    START_HOUR,
};
use bikeshare_explorer::resolver::{Catalogs, Resolver, ALL_DAYS, ALL_MONTHS};
use bikeshare_explorer::types::{DataSet, DataType, Value};
use bikeshare_explorer::ExplorerError;

fn fixtures() -> ExplorerConfig {
    ExplorerConfig {
        data_dir: "tests/fixtures".into(),
        ..Default::default()
    }
}

fn load_city(key: &str) -> DataSet {
    load(&fixtures(), &DatasetRegistry::default(), key, None).unwrap()
}

fn column(ds: &DataSet, name: &str) -> Vec<Value> {
    ds.column(name).unwrap().cloned().collect()
}

fn text(s: &str) -> Value {
    Value::Utf8(s.to_string())
}

#[test]
fn prompts_resolve_then_load_and_filter() {
    let catalogs = Catalogs::standard().unwrap();
    let input = "2\ny\njan\ny\nmon\ny\n";
    let mut console = Console::new(Cursor::new(input.as_bytes().to_vec()), Vec::new());

    let city = Resolver::new(&catalogs.cities, 0)
        .unwrap()
        .resolve(&mut console, "city? ")
        .unwrap();
    let month = Resolver::new(&catalogs.months, 3)
        .unwrap()
        .resolve(&mut console, "month? ")
        .unwrap();
    let day = Resolver::new(&catalogs.days, 3)
        .unwrap()
        .resolve(&mut console, "day? ")
        .unwrap();
    assert_eq!((city.as_str(), month.as_str(), day.as_str()), ("New York City", "January", "Monday"));

    let table = filter(&load_city(&city), &month, &day).unwrap();
    assert_eq!(table.row_count(), 3);
    assert!(column(&table, MONTH_OF_YEAR).iter().all(|v| *v == text("January")));
    assert!(column(&table, DAY_OF_WEEK).iter().all(|v| *v == text("Monday")));
}

#[test]
fn derived_columns_follow_start_time() {
    let table = load_city("Chicago");
    assert_eq!(
        column(&table, MONTH_OF_YEAR),
        vec![text("January"), text("January"), text("January"), text("March"), text("June")]
    );
    assert_eq!(
        column(&table, DAY_OF_WEEK),
        vec![text("Monday"), text("Monday"), text("Tuesday"), text("Monday"), text("Sunday")]
    );
    assert_eq!(
        column(&table, START_HOUR),
        vec![Value::Int64(8), Value::Int64(17), Value::Int64(8), Value::Int64(12), Value::Int64(9)]
    );
    assert_eq!(
        column(&table, START_END_STATION)[0],
        text("Canal St & Adams St - Clinton St & Madison St")
    );
}

#[test]
fn birth_year_becomes_nullable_integer() {
    let table = load_city("Chicago");
    assert_eq!(table.schema.field(BIRTH_YEAR).unwrap().data_type, DataType::Int64);
    assert_eq!(
        column(&table, BIRTH_YEAR),
        vec![Value::Int64(1985), Value::Int64(1990), Value::Null, Value::Null, Value::Int64(1971)]
    );
}

#[test]
fn sentinels_keep_the_whole_table() {
    let table = load_city("Washington");
    assert_eq!(filter(&table, ALL_MONTHS, ALL_DAYS).unwrap(), table);
}

#[test]
fn month_filter_is_idempotent() {
    let table = load_city("Chicago");
    let once = filter(&table, "January", ALL_DAYS).unwrap();
    let twice = filter(&once, "January", ALL_DAYS).unwrap();
    assert_eq!(once.row_count(), 3);
    assert_eq!(once, twice);
}

#[test]
fn day_filter_alone_spans_months() {
    let table = load_city("New York City");
    let mondays = filter(&table, ALL_MONTHS, "Monday").unwrap();
    assert_eq!(mondays.row_count(), 5);
}

#[test]
fn no_matching_rows_yields_empty_table_with_full_schema() {
    let table = load_city("Washington");
    let out = filter(&table, "December", ALL_DAYS).unwrap();
    assert!(out.is_empty());
    assert_eq!(out.schema, table.schema);
}

#[test]
fn missing_city_file_is_a_data_error() {
    let config = ExplorerConfig {
        data_dir: "tests/no_such_dir".into(),
        ..Default::default()
    };
    let err = load(&config, &DatasetRegistry::default(), "Chicago", None).unwrap_err();
    assert!(err.is_data_error(), "{err}");
}

#[test]
fn unknown_city_is_a_contract_error() {
    let err = load(&fixtures(), &DatasetRegistry::default(), "Boston", None).unwrap_err();
    assert!(matches!(err, ExplorerError::UnknownDataset { .. }));
}
