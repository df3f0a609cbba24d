use anyhow::{bail, Context};
use bikeshare_stats::filters::{parse_city, Filter, ALL};
use bikeshare_stats::{
    BikeshareError, JsonFormatter, Prompter, Selection, StatsReport, TextFormatter, TripAnalyzer,
    TripLoader,
};
use clap::{Parser, ValueEnum};
use indicatif::{ProgressBar, ProgressStyle};
use log::{error, info, warn};
use std::io;
use std::path::PathBuf;
use std::time::{Duration, Instant};

#[derive(Debug, Parser)]
#[clap(
    name = "bikeshare-stats",
    version,
    about = "Explore US bikeshare trip data"
)]
struct Arguments {
    /// Directory containing chicago.csv, new_york_city.csv and washington.csv
    #[clap(long, value_name = "DIR", default_value = ".")]
    data_dir: PathBuf,

    /// City to analyze; skips the interactive prompts when given
    #[clap(long, value_name = "CITY")]
    city: Option<String>,

    /// Month to filter by (january..december) or "all"
    #[clap(long, value_name = "MONTH")]
    month: Option<String>,

    /// Day of week to filter by (monday..sunday) or "all"
    #[clap(long, value_name = "DAY")]
    day: Option<String>,

    /// Output format for results
    #[clap(long, value_enum, default_value = "text")]
    output_format: OutputFormat,

    /// don't show the loading spinner or the timing line
    #[clap(short = 'q', long)]
    quiet: bool,
}

#[derive(Debug, ValueEnum, Clone, Copy)]
enum OutputFormat {
    Text,
    Json,
}

fn main() -> anyhow::Result<()> {
    // Initialize logging
    env_logger::init();

    let args = Arguments::parse();
    validate_arguments(&args)?;

    let loader = TripLoader::new(&args.data_dir);

    match &args.city {
        Some(city) => {
            let selection = batch_selection(city, &args)?;
            run_once(&loader, &selection, &args)
                .with_context(|| format!("failed to analyze {}", selection.city))
        }
        None => run_interactive(&loader, &args),
    }
}

fn validate_arguments(args: &Arguments) -> anyhow::Result<()> {
    if !args.data_dir.is_dir() {
        bail!(
            "Data directory does not exist or is not a directory: {}",
            args.data_dir.display()
        );
    }

    if args.city.is_none() && (args.month.is_some() || args.day.is_some()) {
        warn!("--month and --day only apply together with --city; prompting instead");
    }

    Ok(())
}

fn batch_selection(city: &str, args: &Arguments) -> anyhow::Result<Selection> {
    let city = parse_city(city)?;
    let filter = Filter::parse(
        args.month.as_deref().unwrap_or(ALL),
        args.day.as_deref().unwrap_or(ALL),
    )?;
    Ok(Selection::new(city, filter))
}

fn run_interactive(loader: &TripLoader, args: &Arguments) -> anyhow::Result<()> {
    let stdin = io::stdin();
    let mut prompter = Prompter::new(stdin.lock(), io::stdout());

    loop {
        let selection = match prompter.get_filters() {
            Ok(selection) => selection,
            Err(BikeshareError::InputClosed) => {
                info!("Input closed, exiting");
                return Ok(());
            }
            Err(e) => return Err(e.into()),
        };

        // Data errors end this run only; the user may still restart.
        if let Err(e) = run_once(loader, &selection, args) {
            error!("Analysis of {} failed: {}", selection.city, e);
            eprintln!("Error: {}", e);
        }

        if !prompter.ask_restart()? {
            break;
        }
    }

    Ok(())
}

fn run_once(
    loader: &TripLoader,
    selection: &Selection,
    args: &Arguments,
) -> bikeshare_stats::Result<()> {
    let start_time = Instant::now();

    let spinner = if !args.quiet {
        Some(create_spinner(&format!("Loading {} trips", selection.city)))
    } else {
        None
    };

    let loaded = loader.load_selection(selection);
    if let Some(pb) = &spinner {
        pb.finish_and_clear();
    }
    let table = loaded?;

    if table.is_empty() {
        warn!(
            "No {} trips match the filter ({})",
            selection.city, selection.filter
        );
    }

    let report = TripAnalyzer::new().analyze(&table);
    output_results(&report, args)?;

    if !args.quiet {
        if let OutputFormat::Text = args.output_format {
            println!(
                "\nAnalysis completed in {:.2}s",
                start_time.elapsed().as_secs_f64()
            );
        }
    }

    Ok(())
}

fn output_results(report: &StatsReport, args: &Arguments) -> bikeshare_stats::Result<()> {
    let output = match args.output_format {
        OutputFormat::Json => JsonFormatter::new()
            .with_pretty(true)
            .with_metadata(env!("CARGO_PKG_VERSION"))
            .format_report(report)?,
        OutputFormat::Text => TextFormatter::new().format_report(report)?,
    };

    println!("{}", output);
    Ok(())
}

fn create_spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.green} [{elapsed_precise}] {msg}") {
        pb.set_style(style);
    }
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}
