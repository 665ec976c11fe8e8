use bikeshare_explorer::config::ExplorerConfig;
use bikeshare_explorer::explore::loader::{filter, load, DatasetRegistry};
use bikeshare_explorer::explore::stats::{
    write_report, BirthYears, DurationStats, StatError, StationStats, TimeStats, UserStats,
};
use bikeshare_explorer::resolver::{ALL_DAYS, ALL_MONTHS};
use bikeshare_explorer::types::{DataSet, Value};

fn working_table(city: &str, month: &str, day: &str) -> DataSet {
    let config = ExplorerConfig {
        data_dir: "tests/fixtures".into(),
        ..Default::default()
    };
    let raw = load(&config, &DatasetRegistry::default(), city, None).unwrap();
    filter(&raw, month, day).unwrap()
}

fn report(table: &DataSet) -> String {
    let mut out = Vec::new();
    write_report(&mut out, table).unwrap();
    String::from_utf8(out).unwrap()
}

fn text(s: &str) -> Value {
    Value::Utf8(s.to_string())
}

#[test]
fn new_york_january_mondays() {
    let table = working_table("New York City", "January", "Monday");

    let time = TimeStats::compute(&table);
    assert_eq!(time.month, Ok(vec![text("January")]));
    assert_eq!(time.day_of_week, Ok(vec![text("Monday")]));
    assert_eq!(time.start_hour, Ok(vec![Value::Int64(7)]));

    let stations = StationStats::compute(&table);
    assert_eq!(stations.start, Ok(vec![text("W 52 St & 11 Ave")]));
    assert_eq!(stations.end, Ok(vec![text("Broadway & W 60 St")]));
    assert_eq!(
        stations.trip,
        Ok(vec![text("W 52 St & 11 Ave - Broadway & W 60 St")])
    );

    let durations = DurationStats::compute(&table);
    assert_eq!(durations.total_minutes, Ok(50.0));

    let users = UserStats::compute(&table);
    assert_eq!(users.user_types, Ok(vec![(text("Subscriber"), 3)]));
    assert_eq!(users.genders, Ok(vec![(text("Male"), 2), (text("Female"), 1)]));
    assert_eq!(
        users.birth_years,
        Ok(BirthYears {
            earliest: 1975,
            latest: 1988,
            most_common: vec![1988],
        })
    );
}

#[test]
fn report_text_for_new_york() {
    let out = report(&working_table("New York City", "January", "Monday"));
    assert!(out.contains("Most Common Month: January\n"));
    assert!(out.contains("Most Common Start Hour: 7\n"));
    assert!(out.contains("Total Travel Time (in Minutes): 50.00\n"));
    assert!(out.contains("Average Travel Time (in Minutes): 16.67\n"));
    assert!(out.contains("Earliest Birth Year: 1975\n"));
    assert!(out.contains("Most Common Birth Year: 1988\n"));
    assert_eq!(out.matches("This took ").count(), 4);
    assert!(!out.contains("Moving on"));
}

#[test]
fn washington_lacks_demographics_but_report_completes() {
    let table = working_table("Washington", ALL_MONTHS, ALL_DAYS);
    let users = UserStats::compute(&table);
    assert!(matches!(users.genders, Err(StatError::ColumnUnavailable { .. })));
    assert!(matches!(users.birth_years, Err(StatError::ColumnUnavailable { .. })));

    let out = report(&table);
    assert!(out.contains("Gender is not available for this given set of data."));
    assert!(out.contains("Birth Year is not available for this given set of data."));
    // Aggregates after the missing ones still ran.
    assert!(out.contains("Total Travel Time (in Minutes): 29.78\n"));
    assert!(out.contains("Subscriber    2\nCustomer      1\n"));
    assert!(!out.contains("Moving on"));
}

#[test]
fn all_null_demographics_degrade_with_a_message() {
    // Chicago in March has a single customer trip without gender or birth year.
    let table = working_table("Chicago", "March", ALL_DAYS);
    assert_eq!(table.row_count(), 1);

    let out = report(&table);
    assert!(out.contains("Error collecting gender stats. Moving on."));
    assert!(out.contains("Error collecting birth year stats. Moving on."));
    assert!(out.contains("Most Common Month: March\n"));
}

#[test]
fn empty_selection_degrades_every_aggregate() {
    let table = working_table("Chicago", "December", ALL_DAYS);
    assert!(table.is_empty());

    let durations = DurationStats::compute(&table);
    assert!(matches!(durations.total_minutes, Err(StatError::NoData { .. })));

    let out = report(&table);
    assert_eq!(out.matches("Error collecting frequency stats. Moving on.").count(), 3);
    assert_eq!(out.matches("Error collecting station stats. Moving on.").count(), 3);
    assert_eq!(out.matches("Error collecting duration stats. Moving on.").count(), 2);
}

#[test]
fn ties_are_all_reported() {
    // Chicago January: Canal St & Adams St starts two trips, nothing else starts more.
    let stations = StationStats::compute(&working_table("Chicago", "January", ALL_DAYS));
    assert_eq!(stations.start, Ok(vec![text("Canal St & Adams St")]));
    // Hours 8, 17, 8.
    let time = TimeStats::compute(&working_table("Chicago", "January", ALL_DAYS));
    assert_eq!(time.start_hour, Ok(vec![Value::Int64(8)]));

    // One trip each from three stations in Washington: all tie.
    let stations = StationStats::compute(&working_table("Washington", ALL_MONTHS, ALL_DAYS));
    assert_eq!(
        stations.start,
        Ok(vec![
            text("14th & Belmont St NW"),
            text("21st St & Pennsylvania Ave NW"),
            text("Lincoln Memorial"),
        ])
    );
}
