//! Unit tests for the trip parser and loader
//!
//! Tests column handling, derived fields, filtering and data errors

#[path = "../test_data/mod.rs"]
mod test_data;

use bikeshare_stats::analytics::UserAnalyzer;
use bikeshare_stats::filters::{DAY_NAMES, MONTH_NAMES};
use bikeshare_stats::loader::load_from_reader;
use bikeshare_stats::{BikeshareError, City, Filter, SelectionKind, TripLoader, TripParser};
use chrono::{Datelike, Timelike};
use test_data::*;

fn chicago_table() -> bikeshare_stats::TripTable {
    load_from_reader(City::Chicago, CHICAGO_CSV.as_bytes()).unwrap()
}

#[test]
fn test_load_all_keeps_every_row() {
    let dir = create_data_dir();
    let loader = TripLoader::new(dir.path());

    assert_eq!(loader.load("chicago", "all", "all").unwrap().len(), 8);
    assert_eq!(loader.load("new york city", "all", "all").unwrap().len(), 3);
    assert_eq!(loader.load("washington", "all", "all").unwrap().len(), 3);
}

#[test]
fn test_month_filter_keeps_only_that_month() {
    let dir = create_data_dir();
    let table = TripLoader::new(dir.path()).load("chicago", "june", "all").unwrap();

    assert_eq!(table.len(), 5);
    assert!(table.iter().all(|r| r.month_name == "june"));
    assert_eq!(table.filter(), Filter::new(Some("june"), None));
}

#[test]
fn test_day_filter_keeps_only_that_day() {
    let dir = create_data_dir();
    let table = TripLoader::new(dir.path()).load("chicago", "all", "monday").unwrap();

    assert_eq!(table.len(), 3);
    assert!(table.iter().all(|r| r.day_name == "monday"));
}

#[test]
fn test_month_and_day_filters_compose() {
    let dir = create_data_dir();
    let table = TripLoader::new(dir.path()).load("chicago", "june", "monday").unwrap();

    let ids: Vec<u64> = table.iter().map(|r| r.trip_id).collect();
    assert_eq!(ids, vec![4, 5]);
}

#[test]
fn test_filter_order_does_not_matter() {
    let table = chicago_table();

    let month_then_day = table.filter_month(Some("june")).filter_day(Some("monday"));
    let day_then_month = table.filter_day(Some("monday")).filter_month(Some("june"));

    assert_eq!(month_then_day, day_then_month);
}

#[test]
fn test_filter_is_idempotent() {
    let table = chicago_table();
    let filter = Filter::new(Some("june"), Some("sunday"));

    let once = table.apply(&filter);
    let twice = once.apply(&filter);

    assert_eq!(once, twice);
    assert_eq!(once.len(), 1);
}

#[test]
fn test_filtering_does_not_touch_source_table() {
    let table = chicago_table();
    let before = table.clone();

    let filtered = table.apply(&Filter::new(Some("january"), None));

    assert_eq!(filtered.len(), 2);
    assert_eq!(table, before);
    assert_eq!(table.len(), 8);
}

#[test]
fn test_filter_with_no_matches_is_empty_not_error() {
    let dir = create_data_dir();
    let table = TripLoader::new(dir.path()).load("chicago", "february", "all").unwrap();

    assert!(table.is_empty());
}

#[test]
fn test_every_month_and_day_filter_matches_rows() {
    let table = chicago_table();

    for month in MONTH_NAMES {
        for day in DAY_NAMES {
            let filtered = table.apply(&Filter::new(Some(month), Some(day)));
            assert!(filtered
                .iter()
                .all(|r| r.month_name == month && r.day_name == day));
        }
    }
}

#[test]
fn test_derived_fields_match_start_time() {
    let table = chicago_table();

    for record in table.iter() {
        assert_eq!(
            record.month_name,
            MONTH_NAMES[record.start_time.month0() as usize]
        );
        assert_eq!(
            record.day_name,
            DAY_NAMES[record.start_time.weekday().num_days_from_monday() as usize]
        );
        assert_eq!(record.start_hour, record.start_time.hour());
    }

    let first = &table.records()[0];
    assert_eq!(first.month_name, "january");
    assert_eq!(first.day_name, "sunday");
    assert_eq!(first.start_hour, 9);
}

#[test]
fn test_optional_columns_parsed() {
    let table = chicago_table();
    let first = &table.records()[0];

    assert_eq!(first.trip_id, 1);
    assert_eq!(first.trip_duration, 776.0);
    assert_eq!(first.user_type.as_deref(), Some("Subscriber"));
    assert_eq!(first.gender.as_deref(), Some("Male"));
    assert_eq!(first.birth_year, Some(1982));

    let second = &table.records()[1];
    assert_eq!(second.gender, None);
    assert_eq!(second.birth_year, None);
}

#[test]
fn test_missing_gender_and_birth_year_are_backfilled() {
    let table = load_from_reader(City::Washington, WASHINGTON_CSV.as_bytes()).unwrap();

    assert!(!table.columns().gender);
    assert!(!table.columns().birth_year);
    assert!(table.columns().user_type);
    assert!(table.iter().all(|r| r.gender.is_none() && r.birth_year.is_none()));
    assert_eq!(table.records()[2].user_type, None);
    assert_eq!(table.records()[0].trip_duration, 489.066);
}

#[test]
fn test_trip_id_falls_back_to_row_index() {
    let table = load_from_reader(City::NewYorkCity, NEW_YORK_CITY_CSV.as_bytes()).unwrap();

    assert!(!table.columns().trip_id);
    let ids: Vec<u64> = table.iter().map(|r| r.trip_id).collect();
    assert_eq!(ids, vec![0, 1, 2]);
}

#[test]
fn test_headers_are_case_insensitive() {
    let csv = "start time , END TIME,trip duration,Start station,end Station\n\
               2017-06-21 08:36:34,2017-06-21 08:44:43,489,A,B\n";
    let (records, presence) = TripParser::new("test").parse_reader(csv.as_bytes()).unwrap();

    assert_eq!(records.len(), 1);
    assert!(!presence.user_type);
    assert_eq!(records[0].user_type, None);
}

#[test]
fn test_trailing_blank_header_is_not_trip_id() {
    let csv = "Start Time,End Time,Trip Duration,Start Station,End Station,\n\
               2017-06-21 08:36:34,2017-06-21 08:44:43,489,A,B,\n\
               2017-06-22 09:00:00,2017-06-22 09:10:00,600,B,A,\n";
    let (records, presence) = TripParser::new("test").parse_reader(csv.as_bytes()).unwrap();

    assert!(!presence.trip_id);
    let ids: Vec<u64> = records.iter().map(|r| r.trip_id).collect();
    assert_eq!(ids, vec![0, 1]);
}

#[test]
fn test_unparseable_trip_id_uses_row_index() {
    let csv = ",Start Time,End Time,Trip Duration,Start Station,End Station\n\
               17,2017-06-21 08:36:34,2017-06-21 08:44:43,489,A,B\n\
               ,2017-06-22 09:00:00,2017-06-22 09:10:00,600,B,A\n\
               abc,2017-06-23 10:00:00,2017-06-23 10:10:00,600,B,A\n";
    let (records, presence) = TripParser::new("test").parse_reader(csv.as_bytes()).unwrap();

    assert!(presence.trip_id);
    let ids: Vec<u64> = records.iter().map(|r| r.trip_id).collect();
    assert_eq!(ids, vec![17, 1, 2]);
}

#[test]
fn test_unparseable_birth_year_left_unset() {
    let csv = "Start Time,End Time,Trip Duration,Start Station,End Station,Birth Year\n\
               2017-06-21 08:36:34,2017-06-21 08:44:43,489,A,B,unknown\n\
               2017-06-22 09:00:00,2017-06-22 09:10:00,600,B,A,1980\n\
               2017-06-23 10:00:00,2017-06-23 10:10:00,600,B,A,1991.5\n";
    let table = load_from_reader(City::Chicago, csv.as_bytes()).unwrap();

    assert_eq!(table.len(), 3);
    let years: Vec<Option<i32>> = table.iter().map(|r| r.birth_year).collect();
    assert_eq!(years, vec![None, Some(1980), None]);

    let stats = UserAnalyzer::new().analyze(&table).birth_years.unwrap();
    assert_eq!(stats.earliest, 1980);
    assert_eq!(stats.most_recent, 1980);
    assert_eq!(stats.most_common.count, 1);
}

#[test]
fn test_fractional_seconds_accepted() {
    let csv = "Start Time,End Time,Trip Duration,Start Station,End Station\n\
               2017-06-21 08:36:34.250,2017-06-21 08:44:43.000,489,A,B\n";
    let (records, _) = TripParser::new("test").parse_reader(csv.as_bytes()).unwrap();

    assert_eq!(records[0].start_hour, 8);
}

#[test]
fn test_unknown_city() {
    let dir = create_data_dir();
    let result = TripLoader::new(dir.path()).load("paris", "all", "all");

    match result {
        Err(BikeshareError::UnknownCity { city }) => assert_eq!(city, "paris"),
        other => panic!("expected UnknownCity, got {:?}", other),
    }
}

#[test]
fn test_invalid_month_selection() {
    let dir = create_data_dir();
    let result = TripLoader::new(dir.path()).load("chicago", "smarch", "all");

    match result {
        Err(BikeshareError::InvalidSelection { kind, value }) => {
            assert_eq!(kind, SelectionKind::Month);
            assert_eq!(value, "smarch");
        }
        other => panic!("expected InvalidSelection, got {:?}", other),
    }
}

#[test]
fn test_missing_required_column() {
    let dir = create_data_dir_with("washington.csv", MISSING_COLUMN_CSV);
    let result = TripLoader::new(dir.path()).load("washington", "all", "all");

    match result {
        Err(BikeshareError::MalformedData { city, column, line, .. }) => {
            assert_eq!(city, "washington");
            assert_eq!(column, "End Station");
            assert_eq!(line, None);
        }
        other => panic!("expected MalformedData, got {:?}", other),
    }
}

#[test]
fn test_missing_column_error_names_city_and_column() {
    let err = load_from_reader(City::Washington, MISSING_COLUMN_CSV.as_bytes()).unwrap_err();
    let message = err.to_string();

    assert!(message.contains("washington"));
    assert!(message.contains("End Station"));
}

#[test]
fn test_unparseable_timestamp() {
    let err = load_from_reader(City::Chicago, BAD_TIMESTAMP_CSV.as_bytes()).unwrap_err();

    match err {
        BikeshareError::MalformedData { column, line, .. } => {
            assert_eq!(column, "Start Time");
            assert!(line.is_some());
        }
        other => panic!("expected MalformedData, got {:?}", other),
    }
}

#[test]
fn test_negative_duration_rejected() {
    let csv = "Start Time,End Time,Trip Duration,Start Station,End Station\n\
               2017-06-21 08:36:34,2017-06-21 08:44:43,-5,A,B\n";
    let err = TripParser::new("test").parse_reader(csv.as_bytes()).unwrap_err();

    assert!(matches!(err, BikeshareError::MalformedData { ref column, .. } if column == "Trip Duration"));
}

#[test]
fn test_missing_data_file() {
    let dir = tempfile::TempDir::new().unwrap();
    let result = TripLoader::new(dir.path()).load_city(City::Chicago);

    match result {
        Err(BikeshareError::DataSource { city, path, .. }) => {
            assert_eq!(city, "chicago");
            assert!(path.ends_with("chicago.csv"));
        }
        other => panic!("expected DataSource, got {:?}", other),
    }
}

#[test]
fn test_city_names_and_files() {
    assert_eq!("New York City".parse::<City>().unwrap(), City::NewYorkCity);
    assert_eq!("new-york-city".parse::<City>().unwrap(), City::NewYorkCity);
    assert_eq!(City::Washington.data_file(), "washington.csv");
    assert_eq!(City::NewYorkCity.to_string(), "new york city");
}
