//! femcycle CLI - Command-line harness for the FemCycle core
//!
//! Commands:
//! - phase: Current cycle phase from settings
//! - predict: Next period, ovulation and fertile window
//! - analyze: Cycle history and insights from stored logs
//! - calendar: Day statuses for one month
//! - record: Apply one day log to the settings
//! - validate: Validate stored logs

use chrono::{Datelike, NaiveDate};
use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;
use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use femcycle_core::calendar::month_statuses;
use femcycle_core::dates::{iso, parse_date};
use femcycle_core::schema::{LogAdapter, LogValidationError, RawDayLog};
use femcycle_core::types::{CycleAnalysis, CyclePhase, LogBook, UserSettings};
use femcycle_core::{
    compute_phase, record_day_log, upcoming, AnalysisConfig, Clock, CycleAnalyzer, CycleError,
    DayStatus, FixedClock, SystemClock, VERSION,
};

/// femcycle - Offline cycle phase, predictions and insights
#[derive(Parser)]
#[command(name = "femcycle")]
#[command(version = VERSION)]
#[command(about = "Cycle phase, predictions and insights from daily logs", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Evaluate as of this date (YYYY-MM-DD) instead of the local date
    #[arg(long, global = true, value_parser = parse_day)]
    today: Option<NaiveDate>,

    /// Output format
    #[arg(long, global = true, default_value = "json-pretty")]
    format: OutputFormat,
}

#[derive(Subcommand)]
enum Commands {
    /// Current cycle phase
    Phase {
        /// Settings file path (use - for stdin)
        #[arg(short, long)]
        settings: PathBuf,
    },

    /// Next period, ovulation and fertile window
    Predict {
        /// Settings file path (use - for stdin)
        #[arg(short, long)]
        settings: PathBuf,
    },

    /// Cycle history, statistics, anomalies and correlations
    Analyze {
        /// Settings file path
        #[arg(short, long)]
        settings: PathBuf,

        /// Logs file path (use - for stdin)
        #[arg(short, long)]
        logs: PathBuf,

        /// Logs layout
        #[arg(long, default_value = "map")]
        layout: LogLayout,

        /// Analysis thresholds (JSON, missing fields use defaults)
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Day statuses for one month
    Calendar {
        /// Settings file path
        #[arg(short, long)]
        settings: PathBuf,

        /// Logs file path (use - for stdin)
        #[arg(short, long)]
        logs: PathBuf,

        /// Logs layout
        #[arg(long, default_value = "map")]
        layout: LogLayout,

        /// Month to render (YYYY-MM)
        #[arg(long)]
        month: String,
    },

    /// Apply one day log to the settings
    Record {
        /// Settings file path
        #[arg(short, long)]
        settings: PathBuf,

        /// Day log entry with its date (use - for stdin)
        #[arg(short, long)]
        entry: PathBuf,

        /// Write updated settings here when the log starts a period
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Validate stored logs (keyed layout)
    Validate {
        /// Logs file path (use - for stdin)
        #[arg(short, long)]
        logs: PathBuf,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum LogLayout {
    /// Object keyed by ISO date
    Map,
    /// JSON array of entries carrying their own date
    Array,
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    /// Compact JSON
    Json,
    /// Pretty-printed JSON
    JsonPretty,
    /// Human-readable report
    Text,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!(
                "{}",
                serde_json::to_string(&CliError::from(e)).unwrap_or_else(|_| "Unknown error".to_string())
            );
            ExitCode::FAILURE
        }
    }
}

fn init_tracing() {
    let filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy();

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr).with_target(false))
        .with(filter)
        .init();
}

fn run(cli: Cli) -> Result<(), FemcycleCliError> {
    let clock: Box<dyn Clock> = match cli.today {
        Some(day) => Box::new(FixedClock::new(day)),
        None => Box::new(SystemClock),
    };
    let today = clock.today();
    let format = cli.format;

    match cli.command {
        Commands::Phase { settings } => cmd_phase(&settings, today, format),
        Commands::Predict { settings } => cmd_predict(&settings, today, format),
        Commands::Analyze {
            settings,
            logs,
            layout,
            config,
        } => cmd_analyze(&settings, &logs, layout, config.as_deref(), today, format),
        Commands::Calendar {
            settings,
            logs,
            layout,
            month,
        } => cmd_calendar(&settings, &logs, layout, &month, today, format),
        Commands::Record {
            settings,
            entry,
            output,
        } => cmd_record(&settings, &entry, output.as_deref(), today, format),
        Commands::Validate { logs } => cmd_validate(&logs, format),
    }
}

fn cmd_phase(settings: &Path, today: NaiveDate, format: OutputFormat) -> Result<(), FemcycleCliError> {
    let settings = load_settings(settings, today)?;
    let phase = compute_phase(today, &settings);

    emit(&phase, format, phase_text)
}

fn cmd_predict(settings: &Path, today: NaiveDate, format: OutputFormat) -> Result<(), FemcycleCliError> {
    let settings = load_settings(settings, today)?;
    let forecast = upcoming(&settings, today).ok_or_else(|| {
        CycleError::DateOutOfRange(format!(
            "forecast for a {} day cycle",
            settings.avg_cycle_length
        ))
    })?;

    emit(&forecast, format, |f| {
        format!(
            "Next period:    {}\nOvulation:      {}\nFertile window: {} to {}\n",
            f.next_period, f.ovulation, f.fertile_window.start, f.fertile_window.end
        )
    })
}

fn cmd_analyze(
    settings: &Path,
    logs: &Path,
    layout: LogLayout,
    config: Option<&Path>,
    today: NaiveDate,
    format: OutputFormat,
) -> Result<(), FemcycleCliError> {
    let settings = load_settings(settings, today)?;
    let logs = load_logs(logs, layout)?;

    let config = match config {
        Some(path) => serde_json::from_str::<AnalysisConfig>(&read_input(path)?)?,
        None => AnalysisConfig::default(),
    };

    let analysis = CycleAnalyzer::with_config(config).analyze(&logs, &settings);
    tracing::info!(
        logs = logs.len(),
        cycles = analysis.history.len(),
        "analysis finished"
    );

    emit(&analysis, format, analysis_text)
}

fn cmd_calendar(
    settings: &Path,
    logs: &Path,
    layout: LogLayout,
    month: &str,
    today: NaiveDate,
    format: OutputFormat,
) -> Result<(), FemcycleCliError> {
    let first = parse_date(&format!("{month}-01"))
        .map_err(|_| FemcycleCliError::InvalidMonth(month.to_string()))?;
    let settings = load_settings(settings, today)?;
    let logs = load_logs(logs, layout)?;

    let cells: Vec<CalendarCell> = month_statuses(first.year(), first.month(), &logs, &settings)
        .into_iter()
        .map(|(date, status)| CalendarCell { date, status })
        .collect();

    emit(&cells, format, |cells| {
        cells
            .iter()
            .map(|c| {
                let status = c.status.map(status_label).unwrap_or("-");
                format!("{}  {}\n", c.date, status)
            })
            .collect()
    })
}

fn cmd_record(
    settings: &Path,
    entry: &Path,
    output: Option<&Path>,
    today: NaiveDate,
    format: OutputFormat,
) -> Result<(), FemcycleCliError> {
    let settings = load_settings(settings, today)?;

    let raw: RawDayLog = serde_json::from_str(&read_input(entry)?)?;
    let Some(date) = raw.date else {
        return Err(CycleError::InvalidLog {
            date: "entry".to_string(),
            source: LogValidationError::MissingDate,
        }
        .into());
    };
    let log = raw
        .into_day_log(date)
        .map_err(|source| CycleError::InvalidLog {
            date: iso(date),
            source,
        })?;

    let outcome = record_day_log(&settings, &log);

    if let (Some(path), Some(updated)) = (output, outcome.settings_update.as_ref()) {
        fs::write(path, serde_json::to_string_pretty(updated)?)?;
    }

    emit(&outcome, format, |o| match &o.settings_update {
        Some(updated) => format!(
            "New period started: last period date is now {}\n",
            updated.last_period_date.map(iso).unwrap_or_default()
        ),
        None => "Settings unchanged\n".to_string(),
    })
}

fn cmd_validate(logs: &Path, format: OutputFormat) -> Result<(), FemcycleCliError> {
    let entries = LogAdapter::parse_raw_map(&read_input(logs)?)?;
    let issues = LogAdapter::validate_logs(&entries);

    let report = ValidationReport {
        total_entries: entries.len(),
        valid_entries: entries.len() - issues.len(),
        invalid_entries: issues.len(),
        errors: issues
            .into_iter()
            .map(|i| ValidationErrorDetail {
                key: i.key,
                error: i.error,
            })
            .collect(),
    };

    emit(&report, format, |r| {
        let mut out = format!(
            "Validation Report\n=================\nTotal entries:   {}\nValid entries:   {}\nInvalid entries: {}\n",
            r.total_entries, r.valid_entries, r.invalid_entries
        );
        if !r.errors.is_empty() {
            out.push_str("\nErrors:\n");
            for err in &r.errors {
                out.push_str(&format!("  - {}: {}\n", err.key, err.error));
            }
        }
        out
    })?;

    if report.invalid_entries > 0 {
        Err(FemcycleCliError::ValidationFailed(report.invalid_entries))
    } else {
        Ok(())
    }
}

// Input helpers

fn read_input(path: &Path) -> Result<String, FemcycleCliError> {
    if path.to_string_lossy() == "-" {
        let mut buffer = String::new();
        io::stdin().read_to_string(&mut buffer)?;
        Ok(buffer)
    } else {
        Ok(fs::read_to_string(path)?)
    }
}

fn load_settings(path: &Path, today: NaiveDate) -> Result<UserSettings, FemcycleCliError> {
    Ok(LogAdapter::parse_settings(&read_input(path)?, today)?)
}

fn load_logs(path: &Path, layout: LogLayout) -> Result<LogBook, FemcycleCliError> {
    let data = read_input(path)?;
    let logs = match layout {
        LogLayout::Map => LogAdapter::parse_map(&data)?,
        LogLayout::Array => LogAdapter::parse_array(&data)?,
    };
    tracing::debug!(entries = logs.len(), "loaded logs");
    Ok(logs)
}

fn parse_day(value: &str) -> Result<NaiveDate, String> {
    parse_date(value).map_err(|e| e.to_string())
}

// Output helpers

fn emit<T: Serialize>(
    value: &T,
    format: OutputFormat,
    text: impl FnOnce(&T) -> String,
) -> Result<(), FemcycleCliError> {
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string(value)?),
        OutputFormat::JsonPretty => println!("{}", serde_json::to_string_pretty(value)?),
        OutputFormat::Text => print!("{}", text(value)),
    }
    Ok(())
}

fn phase_text(phase: &CyclePhase) -> String {
    format!(
        "Phase:            {}\nDay in cycle:     {}\nNext period in:   {} days\nFertile:          {}\n",
        phase.phase,
        phase.day_in_cycle,
        phase.days_until_next_period,
        if phase.is_fertile { "yes" } else { "no" }
    )
}

fn analysis_text(analysis: &CycleAnalysis) -> String {
    let mut out = format!(
        "Cycle Analysis\n==============\nAverage cycle:   {} days\nAverage period:  {} days\nVariability:     {:.1} days\nConfidence:      {:?}\n",
        analysis.avg_length, analysis.avg_period, analysis.variability, analysis.prediction_confidence
    );

    if !analysis.history.is_empty() {
        out.push_str("\nHistory:\n");
        for item in &analysis.history {
            out.push_str(&format!(
                "  {} -> {}  {} days (period {})\n",
                item.start_date, item.end_date, item.length, item.period_length
            ));
        }
    }

    if !analysis.anomalies.is_empty() {
        out.push_str("\nAnomalies:\n");
        for anomaly in &analysis.anomalies {
            match anomaly.date {
                Some(date) => out.push_str(&format!("  - {:?} ({}): {}\n", anomaly.kind, date, anomaly.details)),
                None => out.push_str(&format!("  - {:?}: {}\n", anomaly.kind, anomaly.details)),
            }
        }
    }

    if !analysis.mood_counts.is_empty() {
        out.push_str("\nMoods:\n");
        for (mood, count) in &analysis.mood_counts {
            out.push_str(&format!("  {:?}: {}\n", mood, count));
        }
    }

    out.push_str(&format!(
        "\nSleep:  {}\nStress: {}\n",
        analysis.correlations.sleep_effect, analysis.correlations.stress_effect
    ));
    out
}

fn status_label(status: DayStatus) -> &'static str {
    match status {
        DayStatus::Period(_) => "period",
        DayStatus::Logged => "logged",
        DayStatus::PredictedPeriod => "predicted period",
        DayStatus::Ovulation => "ovulation",
        DayStatus::Fertile => "fertile",
        DayStatus::Luteal => "luteal",
        DayStatus::Follicular => "follicular",
    }
}

// Error types

#[derive(Debug)]
enum FemcycleCliError {
    Io(io::Error),
    Core(CycleError),
    Json(serde_json::Error),
    InvalidMonth(String),
    ValidationFailed(usize),
}

impl From<io::Error> for FemcycleCliError {
    fn from(e: io::Error) -> Self {
        FemcycleCliError::Io(e)
    }
}

impl From<CycleError> for FemcycleCliError {
    fn from(e: CycleError) -> Self {
        FemcycleCliError::Core(e)
    }
}

impl From<serde_json::Error> for FemcycleCliError {
    fn from(e: serde_json::Error) -> Self {
        FemcycleCliError::Json(e)
    }
}

#[derive(Serialize)]
struct CliError {
    code: String,
    message: String,
    hint: Option<String>,
}

impl From<FemcycleCliError> for CliError {
    fn from(e: FemcycleCliError) -> Self {
        match e {
            FemcycleCliError::Io(e) => CliError {
                code: "IO_ERROR".to_string(),
                message: e.to_string(),
                hint: Some("Check file paths and permissions".to_string()),
            },
            FemcycleCliError::Core(e) => {
                let (code, hint) = match &e {
                    CycleError::DateParseError(_) => ("DATE_ERROR", "Dates must be YYYY-MM-DD"),
                    CycleError::DateOutOfRange(_) => {
                        ("DATE_OUT_OF_RANGE", "Check the dates and cycle length in the input")
                    }
                    CycleError::JsonError(_) => ("JSON_ERROR", "Check JSON syntax"),
                    CycleError::ParseError(_) => ("PARSE_ERROR", "Check input format"),
                    CycleError::InvalidLog { .. } => {
                        ("INVALID_LOG", "Run 'femcycle validate' for details")
                    }
                    CycleError::InvalidSettings(_) => {
                        ("INVALID_SETTINGS", "Cycle length 21-45, period length 1-8")
                    }
                };
                CliError {
                    code: code.to_string(),
                    message: e.to_string(),
                    hint: Some(hint.to_string()),
                }
            }
            FemcycleCliError::Json(e) => CliError {
                code: "JSON_ERROR".to_string(),
                message: e.to_string(),
                hint: Some("Check JSON syntax".to_string()),
            },
            FemcycleCliError::InvalidMonth(month) => CliError {
                code: "INVALID_MONTH".to_string(),
                message: format!("Invalid month: {month}"),
                hint: Some("Use YYYY-MM".to_string()),
            },
            FemcycleCliError::ValidationFailed(count) => CliError {
                code: "VALIDATION_FAILED".to_string(),
                message: format!("{} entries failed validation", count),
                hint: Some("Fix validation errors and retry".to_string()),
            },
        }
    }
}

// Report types

#[derive(Serialize)]
struct CalendarCell {
    date: NaiveDate,
    status: Option<DayStatus>,
}

#[derive(Serialize)]
struct ValidationReport {
    total_entries: usize,
    valid_entries: usize,
    invalid_entries: usize,
    errors: Vec<ValidationErrorDetail>,
}

#[derive(Serialize)]
struct ValidationErrorDetail {
    key: String,
    error: String,
}
