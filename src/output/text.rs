//! Human-readable text output for trip statistics

use crate::analytics::{
    BirthYearStats, CategoryCounts, DurationStats, ModeStat, StationStats, StatsReport, TimeStats,
    UserStats,
};
use crate::Result;
use std::fmt::{Display, Write};

const RULE_WIDTH: usize = 40;
const NO_DATA: &str = "No data available for the selected filters.";

/// Text formatter for statistics reports
pub struct TextFormatter {}

impl TextFormatter {
    pub fn new() -> Self {
        Self {}
    }

    /// Format the full report: header followed by all four sections
    pub fn format_report(&self, report: &StatsReport) -> Result<String> {
        let mut output = String::new();

        writeln!(
            output,
            "Bikeshare statistics for {} ({})",
            report.city, report.filter
        )?;
        writeln!(output, "Trips analyzed: {}", report.trip_count)?;
        rule(&mut output)?;

        output.push_str(&self.format_time_stats(&report.time)?);
        output.push_str(&self.format_station_stats(&report.stations)?);
        output.push_str(&self.format_duration_stats(report.durations.as_ref())?);
        output.push_str(&self.format_user_stats(&report.users, report.city.name())?);

        Ok(output)
    }

    pub fn format_time_stats(&self, stats: &TimeStats) -> Result<String> {
        let mut output = String::new();
        section(&mut output, "Calculating The Most Frequent Times of Travel...")?;

        if stats.has_data() {
            mode_line(&mut output, "Most common month", stats.most_common_month.as_ref())?;
            mode_line(&mut output, "Most common day of week", stats.most_common_day.as_ref())?;
            mode_line(
                &mut output,
                "Most common start hour",
                stats.most_common_start_hour.as_ref(),
            )?;
        } else {
            writeln!(output, "{}", NO_DATA)?;
        }

        rule(&mut output)?;
        Ok(output)
    }

    pub fn format_station_stats(&self, stats: &StationStats) -> Result<String> {
        let mut output = String::new();
        section(&mut output, "Calculating The Most Popular Stations and Trip...")?;

        if stats.has_data() {
            mode_line(
                &mut output,
                "Most commonly used start station",
                stats.most_common_start_station.as_ref(),
            )?;
            mode_line(
                &mut output,
                "Most commonly used end station",
                stats.most_common_end_station.as_ref(),
            )?;
            mode_line(&mut output, "Most frequent trip", stats.most_common_trip.as_ref())?;
        } else {
            writeln!(output, "{}", NO_DATA)?;
        }

        rule(&mut output)?;
        Ok(output)
    }

    pub fn format_duration_stats(&self, stats: Option<&DurationStats>) -> Result<String> {
        let mut output = String::new();
        section(&mut output, "Calculating Trip Duration...")?;

        match stats {
            Some(stats) => {
                writeln!(
                    output,
                    "Total travel time: {:.2} seconds ({})",
                    stats.total_seconds,
                    format_duration(stats.total_seconds)
                )?;
                writeln!(
                    output,
                    "Mean travel time: {:.2} seconds ({})",
                    stats.mean_seconds,
                    format_duration(stats.mean_seconds)
                )?;
            }
            None => writeln!(output, "{}", NO_DATA)?,
        }

        rule(&mut output)?;
        Ok(output)
    }

    pub fn format_user_stats(&self, stats: &UserStats, city: &str) -> Result<String> {
        let mut output = String::new();
        section(&mut output, "Calculating User Stats...")?;

        category_block(
            &mut output,
            "Counts of user types",
            "User type",
            stats.user_types.as_ref(),
            city,
        )?;
        category_block(
            &mut output,
            "Counts of gender",
            "Gender",
            stats.genders.as_ref(),
            city,
        )?;
        birth_year_block(&mut output, stats.birth_years.as_ref())?;

        rule(&mut output)?;
        Ok(output)
    }
}

impl Default for TextFormatter {
    fn default() -> Self {
        Self::new()
    }
}

/// Render seconds as `<days>d HH:MM:SS`, rounded to the nearest second
pub fn format_duration(seconds: f64) -> String {
    let total = seconds.max(0.0).round() as u64;
    let days = total / 86_400;
    let hours = (total % 86_400) / 3_600;
    let minutes = (total % 3_600) / 60;
    let secs = total % 60;
    format!("{}d {:02}:{:02}:{:02}", days, hours, minutes, secs)
}

fn section(output: &mut String, title: &str) -> Result<()> {
    writeln!(output, "\n{}\n", title)?;
    Ok(())
}

fn rule(output: &mut String) -> Result<()> {
    writeln!(output, "{}", "-".repeat(RULE_WIDTH))?;
    Ok(())
}

fn mode_line<T: Display>(output: &mut String, label: &str, stat: Option<&ModeStat<T>>) -> Result<()> {
    match stat {
        Some(stat) => writeln!(output, "{}: {} ({} trips)", label, stat.value, stat.count)?,
        None => writeln!(output, "{}: no data", label)?,
    }
    Ok(())
}

fn category_block(
    output: &mut String,
    title: &str,
    column: &str,
    counts: Option<&CategoryCounts>,
    city: &str,
) -> Result<()> {
    writeln!(output, "{}:", title)?;
    match counts {
        None => writeln!(output, "  {} data is not available for {}", column, city)?,
        Some(counts) if counts.is_empty() => writeln!(output, "  {}", NO_DATA)?,
        Some(counts) => {
            for (category, count) in &counts.counts {
                writeln!(output, "  {}: {}", category, count)?;
            }
            if counts.unset > 0 {
                writeln!(output, "  (not recorded: {})", counts.unset)?;
            }
        }
    }
    Ok(())
}

fn birth_year_block(output: &mut String, stats: Option<&BirthYearStats>) -> Result<()> {
    writeln!(output, "Year of birth:")?;
    match stats {
        Some(stats) => {
            writeln!(output, "  Earliest: {}", stats.earliest)?;
            writeln!(output, "  Most recent: {}", stats.most_recent)?;
            writeln!(
                output,
                "  Most common: {} ({} trips)",
                stats.most_common.value, stats.most_common.count
            )?;
        }
        None => writeln!(output, "  {}", NO_DATA)?,
    }
    Ok(())
}
