use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use distro_series::config::{self, SeriesConfig};
use distro_series::os::OsFamily;
use distro_series::series::SeriesVersionCache;
use serde_json::json;

#[derive(Parser)]
#[command(name = "distro-series")]
#[command(version, about = "Resolve distribution series codenames and versions")]
struct Cli {
    /// JSON configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// distro-info CSV to read instead of the configured one
    #[arg(long, global = true)]
    source: Option<PathBuf>,

    /// Treat the host as this OS family instead of detecting it
    #[arg(long, global = true)]
    host: Option<OsFamily>,

    /// Print results as JSON
    #[arg(long, global = true)]
    json: bool,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Write logs to the data directory instead of stderr
    #[arg(long, global = true)]
    log_file: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print the version of a series (e.g. precise -> 12.04)
    Version { codename: String },
    /// Print the series released as a version (e.g. 12.04 -> precise)
    Series { version: String },
    /// List the series supported on this host
    List,
    /// Print the OS family owning a series
    Os { codename: String },
    /// Print the newest released LTS series
    LatestLts {
        /// Evaluate as of this date (YYYY-MM-DD) instead of today
        #[arg(long)]
        date: Option<NaiveDate>,
    },
    /// Print the full distro-info row of a series
    Info { codename: String },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let log_path = cli.log_file.then(config::log_path);
    let _guard = distro_series::logging::init(cli.verbose, log_path.as_deref())?;

    let series_config = match &cli.config {
        Some(path) => SeriesConfig::load(path)?,
        None => SeriesConfig::default(),
    }
    .with_overrides(cli.source, cli.host);

    let cache = SeriesVersionCache::from_config(&series_config);

    match cli.command {
        Command::Version { codename } => {
            let version = cache.lookup_version(&codename)?;
            print(cli.json, json!({ "series": codename, "version": version }), &version);
        }
        Command::Series { version } => {
            let codename = cache.series_for_version(&version)?;
            print(cli.json, json!({ "series": codename, "version": version }), &codename);
        }
        Command::List => {
            let supported = cache.list_supported()?;
            let text = supported.iter().cloned().collect::<Vec<_>>().join("\n");
            print(cli.json, json!(supported), &text);
        }
        Command::Os { codename } => {
            let family = cache.resolve_os_family(&codename)?;
            print(
                cli.json,
                json!({ "series": codename, "os": family.as_str() }),
                family.as_str(),
            );
        }
        Command::LatestLts { date } => {
            let today = date.unwrap_or_else(|| chrono::Local::now().date_naive());
            let codename = cache.latest_lts(today)?;
            print(cli.json, json!({ "series": codename }), &codename);
        }
        Command::Info { codename } => {
            let record = cache.record(&codename)?;
            let text = format!(
                "{} {}{} ({})",
                record.codename,
                record.version,
                if record.lts { " LTS" } else { "" },
                record.name
            );
            print(cli.json, serde_json::to_value(&record)?, &text);
        }
    }

    Ok(())
}

fn print(as_json: bool, value: serde_json::Value, text: &str) {
    if as_json {
        println!("{value}");
    } else if !text.is_empty() {
        println!("{text}");
    }
}
