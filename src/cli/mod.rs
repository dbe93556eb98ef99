//! `tresorerie_cli`: loads movement drafts from JSON and prints the cash forecast.

pub mod report;
pub mod style;
pub mod table;

use std::{
    fs,
    io::{self, Write},
    path::{Path, PathBuf},
    sync::Arc,
};

use chrono::NaiveDate;
use serde::de::DeserializeOwned;
use tracing::debug;

use treso_config::{Config, ConfigManager};
use treso_core::{
    validation::parse_date, Clock, FixedClock, ProjectionService, ProjectionSettings,
    ReconciliationService,
};
use treso_domain::{ContainerRecord, CreditNote};

use crate::{
    app::AppContext,
    errors::CliError,
    utils::{build_info, system_clock::SystemClock},
};

use report::ReportRenderer;
use style::UiStyle;

const USAGE: &str = "\
Usage: tresorerie_cli [OPTIONS] <MOVEMENTS.json>

Options:
  --today <DATE>          Reference date (YYYY-MM-DD or DD/MM/YYYY), defaults to today
  --horizon <DAYS>        Projection horizon in days (default from config, 30)
  --bucket <DAYS>         Bucket width in days (default from config, 7)
  --config <PATH>         Config file to read
  --bookings <PATH>       JSON array of container records to group by booking
  --credit-notes <PATH>   JSON array of credit notes to total
  --json                  Print the projection as JSON
  --plain                 Disable colours and decorations
  --version               Show build metadata
  --help                  Show this message";

/// Parsed command-line arguments.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CliOptions {
    pub movements: Option<PathBuf>,
    pub today: Option<NaiveDate>,
    pub horizon_days: Option<u32>,
    pub bucket_days: Option<u32>,
    pub config_path: Option<PathBuf>,
    pub bookings: Option<PathBuf>,
    pub credit_notes: Option<PathBuf>,
    pub json: bool,
    pub plain: bool,
    pub show_version: bool,
    pub show_help: bool,
}

impl CliOptions {
    pub fn parse<I, S>(args: I) -> Result<Self, CliError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut options = CliOptions::default();
        let mut args = args.into_iter().map(Into::into);
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--help" | "-h" => options.show_help = true,
                "--version" | "-V" => options.show_version = true,
                "--json" => options.json = true,
                "--plain" => options.plain = true,
                "--today" => {
                    let raw = expect_value(&mut args, &arg)?;
                    options.today = Some(parse_date(&raw)?);
                }
                "--horizon" => options.horizon_days = Some(parse_days(&mut args, &arg)?),
                "--bucket" => options.bucket_days = Some(parse_days(&mut args, &arg)?),
                "--config" => options.config_path = Some(expect_value(&mut args, &arg)?.into()),
                "--bookings" => options.bookings = Some(expect_value(&mut args, &arg)?.into()),
                "--credit-notes" => {
                    options.credit_notes = Some(expect_value(&mut args, &arg)?.into())
                }
                flag if flag.starts_with("--") => {
                    return Err(CliError::Input(format!("unknown option `{flag}`")));
                }
                _ => {
                    if options.movements.is_some() {
                        return Err(CliError::Input(format!("unexpected argument `{arg}`")));
                    }
                    options.movements = Some(PathBuf::from(&arg));
                }
            }
        }
        Ok(options)
    }
}

fn expect_value(args: &mut impl Iterator<Item = String>, flag: &str) -> Result<String, CliError> {
    args.next()
        .ok_or_else(|| CliError::Input(format!("`{flag}` expects a value")))
}

fn parse_days(args: &mut impl Iterator<Item = String>, flag: &str) -> Result<u32, CliError> {
    let raw = expect_value(args, flag)?;
    raw.trim()
        .parse::<u32>()
        .map_err(|_| CliError::Input(format!("`{flag}` expects a number of days, got `{raw}`")))
}

/// Entry point used by the binary.
pub fn run_cli() -> Result<(), CliError> {
    let options = CliOptions::parse(std::env::args().skip(1))?;
    let stdout = io::stdout();
    let mut out = stdout.lock();
    run(&options, &mut out)
}

/// Executes the parsed options, writing the report to `out`.
pub fn run(options: &CliOptions, out: &mut impl Write) -> Result<(), CliError> {
    if options.show_help {
        writeln!(out, "{USAGE}")?;
        return Ok(());
    }
    if options.show_version {
        let meta = build_info::current();
        writeln!(out, "Trésorerie {}", meta.version)?;
        for (label, value) in meta.rows() {
            writeln!(out, "{:<12}{}", label, value)?;
        }
        return Ok(());
    }

    let movements = options
        .movements
        .as_ref()
        .ok_or_else(|| CliError::Input(format!("missing movements file\n\n{USAGE}")))?;

    let mut config = match &options.config_path {
        Some(path) => ConfigManager::new(path.clone()).load()?,
        None => Config::default(),
    };
    if let Some(horizon) = options.horizon_days {
        config.horizon_days = horizon;
    }
    if let Some(bucket) = options.bucket_days {
        config.bucket_days = bucket;
    }
    let settings: ProjectionSettings = config.projection_settings()?;

    let clock: Arc<dyn Clock> = match options.today {
        Some(day) => Arc::new(FixedClock::new(day)),
        None => Arc::new(SystemClock),
    };
    let style = if options.plain {
        UiStyle::plain()
    } else {
        UiStyle::detect(config.ui_color_enabled, false)
    };
    let currency = config.currency.clone();

    let mut context = AppContext::new(config, clock)?;
    let loaded = context.load_drafts_from_path(movements)?;
    debug!(loaded, path = %movements.display(), "movements file read");

    let projection = context.projection_with(settings)?;
    if options.json {
        writeln!(out, "{}", serde_json::to_string_pretty(&projection)?)?;
        return Ok(());
    }

    let renderer = ReportRenderer::new(&style, currency);
    let entries = context.ledger().entries();
    writeln!(out, "{}", renderer.summary(&projection))?;
    writeln!(out, "{}", renderer.buckets(&projection))?;
    writeln!(
        out,
        "{}",
        renderer.statuses(&ProjectionService::status_breakdown(
            entries,
            projection.window,
            projection.today
        ))
    )?;
    write!(
        out,
        "{}",
        renderer.categories(&ProjectionService::category_breakdown(
            entries,
            projection.window
        ))
    )?;

    if let Some(path) = &options.bookings {
        let records: Vec<ContainerRecord> = read_json(path)?;
        let groups = ReconciliationService::group_by_booking(&records);
        write!(out, "\n{}", renderer.bookings(&groups))?;
    }
    if let Some(path) = &options.credit_notes {
        let notes: Vec<CreditNote> = read_json(path)?;
        let totals = ReconciliationService::credit_note_totals(&notes);
        write!(out, "\n{}", renderer.credit_notes(&totals))?;
    }
    Ok(())
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, CliError> {
    let data = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&data)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_flags_and_positional_file() {
        let options = CliOptions::parse([
            "--today",
            "2024-06-03",
            "--horizon",
            "60",
            "--plain",
            "flux.json",
        ])
        .expect("valid arguments");
        assert_eq!(options.today, NaiveDate::from_ymd_opt(2024, 6, 3));
        assert_eq!(options.horizon_days, Some(60));
        assert!(options.plain);
        assert_eq!(options.movements, Some(PathBuf::from("flux.json")));
    }

    #[test]
    fn rejects_bad_arguments() {
        assert!(matches!(
            CliOptions::parse(["--horizon", "soixante"]),
            Err(CliError::Input(_))
        ));
        assert!(matches!(CliOptions::parse(["--today"]), Err(CliError::Input(_))));
        assert!(matches!(CliOptions::parse(["--verbose"]), Err(CliError::Input(_))));
        assert!(matches!(CliOptions::parse(["a.json", "b.json"]), Err(CliError::Input(_))));
    }

    #[test]
    fn help_is_written_without_a_movements_file() {
        let options = CliOptions {
            show_help: true,
            ..CliOptions::default()
        };
        let mut buffer = Vec::new();
        run(&options, &mut buffer).expect("help");
        assert!(String::from_utf8(buffer).unwrap().contains("Usage: tresorerie_cli"));
    }
}
