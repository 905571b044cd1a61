use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::{ArgGroup, Parser, Subcommand};
use contract_periods::{AnniversaryScanner, Contract, MonthlyPeriod, Period, ScanConfig, Span};
use std::io;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Monthly contract periods and anniversary scans
#[derive(Parser)]
#[command(name = "contract-periods")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Split a contract term into monthly periods
    #[command(group(ArgGroup::new("span").required(true).args(["months", "to"])))]
    Periods {
        /// First day of the term (YYYY-MM-DD)
        #[arg(long)]
        from: NaiveDate,

        /// Number of monthly periods
        #[arg(long)]
        months: Option<u32>,

        /// Last day of the term (YYYY-MM-DD)
        #[arg(long)]
        to: Option<NaiveDate>,

        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Read contracts as CSV (id,start_date,end_date) from stdin and print
    /// the ids entering their trigger month today
    Scan {
        /// Reference date (YYYY-MM-DD)
        #[arg(long)]
        today: NaiveDate,

        /// JSON scan config file
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Overrides the config's trigger_month
        #[arg(long)]
        trigger_month: Option<u32>,

        /// Overrides the config's window_days
        #[arg(long)]
        window_days: Option<u32>,

        /// Evaluate contracts on the rayon pool
        #[arg(long)]
        parallel: bool,
    },
}

fn render_periods_as_text_table(periods: &[MonthlyPeriod]) -> String {
    let header = ["months", "from", "to"];
    let rows: Vec<[String; 3]> = periods
        .iter()
        .map(|p| [p.months.to_string(), p.from.to_string(), p.to.to_string()])
        .collect();

    let mut widths = header.map(str::len);
    for row in &rows {
        for (ci, cell) in row.iter().enumerate() {
            widths[ci] = widths[ci].max(cell.len());
        }
    }

    let mut sep = String::from("+");
    for w in &widths {
        sep.push_str(&"-".repeat(*w + 2));
        sep.push('+');
    }

    let render_row = |cells: &[&str]| {
        let mut line = String::from("|");
        for (ci, cell) in cells.iter().enumerate() {
            line.push_str(&format!(" {:<width$} |", cell, width = widths[ci]));
        }
        line
    };

    let mut out = String::new();
    out.push_str(&sep);
    out.push('\n');
    out.push_str(&render_row(&header[..]));
    out.push('\n');
    out.push_str(&sep);
    out.push('\n');
    for row in &rows {
        let cells: Vec<&str> = row.iter().map(String::as_str).collect();
        out.push_str(&render_row(&cells[..]));
        out.push('\n');
    }
    out.push_str(&sep);
    out
}

fn resolve_scan_config(
    path: Option<PathBuf>,
    trigger_month: Option<u32>,
    window_days: Option<u32>,
) -> Result<ScanConfig> {
    let mut config = match path {
        Some(path) => ScanConfig::from_json_file(&path)
            .with_context(|| format!("loading scan config {}", path.display()))?,
        None => ScanConfig {
            trigger_month: trigger_month.context("--trigger-month is required without --config")?,
            window_days: contract_periods::config::DEFAULT_WINDOW_DAYS,
        },
    };
    if let Some(trigger_month) = trigger_month {
        config.trigger_month = trigger_month;
    }
    if let Some(window_days) = window_days {
        config.window_days = window_days;
    }
    config.validate()?;
    Ok(config)
}

fn read_contracts<R: io::Read>(reader: R) -> Result<Vec<Contract>> {
    let mut csv_reader = csv::Reader::from_reader(reader);
    let mut contracts = Vec::new();
    for record in csv_reader.deserialize() {
        let contract: Contract = record.context("reading contract row")?;
        contracts.push(contract);
    }
    Ok(contracts)
}

fn run_periods(from: NaiveDate, months: Option<u32>, to: Option<NaiveDate>, json: bool) -> Result<()> {
    let span = match (months, to) {
        (Some(months), _) => Span::Months(months),
        (None, Some(to)) => Span::Until(to),
        (None, None) => anyhow::bail!("one of --months or --to is required"),
    };
    let period = Period::new(from, span)?;
    info!(%from, months = period.number_of_months(), to = %period.to(), "period built");

    if json {
        println!("{}", serde_json::to_string_pretty(period.monthly_periods())?);
    } else {
        println!("{}", render_periods_as_text_table(period.monthly_periods()));
    }
    Ok(())
}

fn run_scan(today: NaiveDate, config: ScanConfig, parallel: bool) -> Result<()> {
    let contracts = read_contracts(io::stdin().lock())?;
    info!(contracts = contracts.len(), %today, trigger_month = config.trigger_month, "scanning");

    let scanner = AnniversaryScanner::new(config)?;
    let matches = if parallel {
        scanner.scan_par(today, &contracts)?
    } else {
        scanner.scan(today, &contracts)?
    };

    for id in matches {
        println!("{id}");
    }
    Ok(())
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Periods {
            from,
            months,
            to,
            json,
        } => run_periods(from, months, to, json),
        Commands::Scan {
            today,
            config,
            trigger_month,
            window_days,
            parallel,
        } => {
            let config = resolve_scan_config(config, trigger_month, window_days)?;
            run_scan(today, config, parallel)
        }
    }
}
