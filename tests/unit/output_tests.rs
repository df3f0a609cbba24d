//! Unit tests for output formatters
//!
//! Tests text and JSON rendering of statistics reports, including empty reports

#[path = "../test_data/mod.rs"]
mod test_data;

use bikeshare_stats::loader::load_from_reader;
use bikeshare_stats::output::format_duration;
use bikeshare_stats::{City, Filter, JsonFormatter, StatsReport, TextFormatter, TripAnalyzer};

fn chicago_report() -> StatsReport {
    let table = load_from_reader(City::Chicago, test_data::CHICAGO_CSV.as_bytes()).unwrap();
    TripAnalyzer::new().analyze(&table)
}

fn empty_report() -> StatsReport {
    let table = load_from_reader(City::Chicago, test_data::CHICAGO_CSV.as_bytes())
        .unwrap()
        .apply(&Filter::new(Some("february"), None));
    TripAnalyzer::new().analyze(&table)
}

#[test]
fn test_text_report_sections() {
    let output = TextFormatter::new().format_report(&chicago_report()).unwrap();

    assert!(output.contains("Bikeshare statistics for chicago (month: all, day: all)"));
    assert!(output.contains("Trips analyzed: 8"));
    assert!(output.contains("Calculating The Most Frequent Times of Travel..."));
    assert!(output.contains("Calculating The Most Popular Stations and Trip..."));
    assert!(output.contains("Calculating Trip Duration..."));
    assert!(output.contains("Calculating User Stats..."));
}

#[test]
fn test_text_report_values() {
    let output = TextFormatter::new().format_report(&chicago_report()).unwrap();

    assert!(output.contains("Most common month: june (5 trips)"));
    assert!(output.contains("Most common day of week: monday (3 trips)"));
    assert!(output.contains("Most common start hour: 17 (4 trips)"));
    assert!(output.contains("Most commonly used start station: Canal St & Adams St (4 trips)"));
    assert!(output.contains(
        "Most frequent trip: Canal St & Adams St to Clinton St & Madison St (3 trips)"
    ));
    assert!(output.contains("Total travel time: 9776.00 seconds (0d 02:42:56)"));
    assert!(output.contains("Mean travel time: 1222.00 seconds (0d 00:20:22)"));
    assert!(output.contains("  Subscriber: 5"));
    assert!(output.contains("  Female: 2"));
    assert!(output.contains("  (not recorded: 3)"));
    assert!(output.contains("  Earliest: 1975"));
    assert!(output.contains("  Most recent: 1990"));
    assert!(output.contains("  Most common: 1982 (2 trips)"));
}

#[test]
fn test_text_report_empty_table() {
    let output = TextFormatter::new().format_report(&empty_report()).unwrap();

    assert!(output.contains("month: february, day: all"));
    assert!(output.contains("Trips analyzed: 0"));
    assert_eq!(
        output
            .matches("No data available for the selected filters.")
            .count(),
        6
    );
    assert!(!output.contains("NaN"));
    assert!(!output.contains("null"));
}

#[test]
fn test_text_report_city_without_gender() {
    let table = load_from_reader(City::Washington, test_data::WASHINGTON_CSV.as_bytes()).unwrap();
    let report = TripAnalyzer::new().analyze(&table);
    let output = TextFormatter::new().format_report(&report).unwrap();

    assert!(output.contains("Gender data is not available for washington"));
    assert!(output.contains("  Subscriber: 2"));
    assert!(output.contains("Total travel time: 1528.87 seconds"));
}

#[test]
fn test_format_duration() {
    assert_eq!(format_duration(0.0), "0d 00:00:00");
    assert_eq!(format_duration(3661.0), "0d 01:01:01");
    assert_eq!(format_duration(90061.4), "1d 01:01:01");
    assert_eq!(format_duration(59.6), "0d 00:01:00");
}

#[test]
fn test_json_report() {
    let output = JsonFormatter::new().format_report(&chicago_report()).unwrap();
    let value: serde_json::Value = serde_json::from_str(&output).unwrap();

    assert_eq!(value["city"], "chicago");
    assert_eq!(value["filter"]["month"], serde_json::Value::Null);
    assert_eq!(value["trip_count"], 8);
    assert_eq!(value["no_data"], false);
    assert_eq!(value["time"]["most_common_month"]["value"], "june");
    assert_eq!(value["time"]["most_common_month"]["count"], 5);
    assert_eq!(
        value["stations"]["most_common_trip"]["value"]["start"],
        "Canal St & Adams St"
    );
    assert_eq!(value["durations"]["total_seconds"], 9776.0);
    assert_eq!(value["users"]["user_types"]["counts"]["Customer"], 3);
    assert_eq!(value["users"]["birth_years"]["most_common"]["value"], 1982);
    assert!(value.get("metadata").is_none());
}

#[test]
fn test_json_report_empty_table() {
    let output = JsonFormatter::new()
        .with_pretty(false)
        .format_report(&empty_report())
        .unwrap();
    let value: serde_json::Value = serde_json::from_str(&output).unwrap();

    assert!(!output.contains('\n'));
    assert_eq!(value["filter"]["month"], "february");
    assert_eq!(value["trip_count"], 0);
    assert_eq!(value["no_data"], true);
    assert!(value["durations"].is_null());
    assert!(value["time"]["most_common_month"].is_null());
}

#[test]
fn test_json_metadata() {
    let output = JsonFormatter::new()
        .with_metadata("9.9.9")
        .format_report(&chicago_report())
        .unwrap();
    let value: serde_json::Value = serde_json::from_str(&output).unwrap();

    assert_eq!(value["metadata"]["tool_version"], "9.9.9");
    assert!(value["metadata"]["generated_at"].is_string());
}
