//! CLI entry point for the route time merger.
//!
//! Fetches the route catalog and journey-time tables, merges them and
//! writes `routeTimeList.json` and `routeTimeList.min.json`.

use anyhow::Result;
use clap::Parser;
use route_time_merger::config::RunConfig;
use route_time_merger::infra::hkbus::HkbusDataClient;
use route_time_merger::output::{append_record, print_json, print_pretty, write_documents};
use route_time_merger::pipeline::build_route_time_list;
use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::{
    EnvFilter, Layer,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

#[derive(Parser)]
#[command(name = "route_time_merger")]
#[command(about = "Merge the route catalog with inter-stop journey times", long_about = None)]
struct Cli {
    /// JSON config file; flags below take precedence over it
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Directory to write routeTimeList.json and routeTimeList.min.json into
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// URL of the route/stop catalog
    #[arg(long)]
    catalog_url: Option<String>,

    /// Base URL of the journey-time tables
    #[arg(long)]
    times_base_url: Option<String>,

    /// CSV file to append a run summary row to
    #[arg(long)]
    stats_csv: Option<PathBuf>,
}

impl Cli {
    fn into_config(self) -> Result<RunConfig> {
        let mut config = match &self.config {
            Some(path) => RunConfig::load(path)?,
            None => RunConfig::default(),
        };

        if let Some(dir) = self.output_dir {
            config.output_dir = dir;
        }
        if let Some(url) = self.catalog_url {
            config.endpoints.catalog_url = url;
        }
        if let Some(url) = self.times_base_url {
            config.endpoints.times_base_url = url;
        }
        if self.stats_csv.is_some() {
            config.stats_csv = self.stats_csv;
        }

        Ok(config)
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok(); // Load .env file

    // Logging setup: colored stderr + JSON rolling log file
    let log_file_path =
        std::env::var("LOG_FILE_PATH").unwrap_or_else(|_| "logs/route_time_merger.log".to_string());
    let log_dir = Path::new(&log_file_path)
        .parent()
        .unwrap_or(Path::new("logs"));
    let log_file_name = Path::new(&log_file_path)
        .file_name()
        .unwrap_or(OsStr::new("route_time_merger.log"));

    let file_appender = tracing_appender::rolling::daily(log_dir, log_file_name);
    let (non_blocking_file, _file_guard) = tracing_appender::non_blocking(file_appender);

    let stderr_layer = fmt::layer()
        .with_target(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_ansi(true)
        .with_writer(std::io::stderr)
        .with_filter(EnvFilter::from_env("RUST_LOG").add_directive("info".parse()?));

    let json_layer = fmt::layer()
        .json()
        .with_current_span(true)
        .with_span_list(true)
        .with_writer(non_blocking_file)
        .with_filter(EnvFilter::from_env("RUST_LOG_JSON").add_directive("debug".parse()?));

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(json_layer)
        .init();

    let config = Cli::parse().into_config()?;
    info!(
        catalog_url = %config.endpoints.catalog_url,
        times_base_url = %config.endpoints.times_base_url,
        output_dir = %config.output_dir.display(),
        "Starting merge"
    );

    let client = HkbusDataClient::new(config.endpoints.clone())?;
    let (result, stats) = build_route_time_list(&client, &client).await?;

    write_documents(
        &result,
        &config.pretty_output_path(),
        &config.minified_output_path(),
    )?;

    print_pretty(&stats);
    print_json(&stats)?;
    if let Some(path) = &config.stats_csv {
        append_record(path, &stats)?;
    }

    info!(
        routes = stats.routes_retained,
        stops = stats.stops_retained,
        journey_pairs = stats.journey_pairs,
        fetch_failures = stats.fetch_failures,
        "Finished"
    );
    Ok(())
}

