use clap::{Parser, Subcommand, builder::styling};
use etl_jobs::cli::{run_consolidation_job, run_gdp_job};
use etl_jobs::config::{ConsolidationConfig, GdpConfig};
use etl_jobs::gdp::{HtmlSource, TableLocator};
use eyre::{Context, Result};
use owo_colors::OwoColorize;
use std::path::{Path, PathBuf};
use url::Url;

// CLI Styling
const STYLES: styling::Styles = styling::Styles::styled()
    .header(styling::AnsiColor::BrightWhite.on_default())
    .usage(styling::AnsiColor::BrightWhite.on_default())
    .literal(styling::AnsiColor::Green.on_default())
    .placeholder(styling::AnsiColor::Cyan.on_default());

/// Batch ETL jobs: scrape the GDP table, or consolidate person records
#[derive(Parser)]
#[command(name = "etl-jobs", version, styles = STYLES)]
struct Cli {
    /// The dotenv file to source settings from (skipped if it does not exist)
    #[arg(short, long, global = true, default_value = ".env")]
    env: String,

    /// More verbose logging
    #[arg(long, global = true)]
    debug: bool,

    /// Job to run
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Scrape countries by GDP into CSV and SQLite, then query the large economies
    Gdp {
        /// Page to scrape
        #[arg(long, conflicts_with = "html_file")]
        url: Option<Url>,

        /// Saved copy of the page to read instead of fetching
        #[arg(long)]
        html_file: Option<PathBuf>,

        /// Pick the table whose header contains this text instead of the third tbody
        #[arg(long)]
        header_text: Option<String>,

        /// CSV output file
        #[arg(long)]
        csv: Option<PathBuf>,

        /// SQLite database file
        #[arg(long)]
        db: Option<PathBuf>,

        /// Database table to replace
        #[arg(long)]
        table: Option<String>,

        /// Progress log file
        #[arg(long)]
        log: Option<PathBuf>,

        /// Lower bound (USD billions) for the final query
        #[arg(long)]
        min_billions: Option<f64>,
    },

    /// Merge CSV, JSON and XML person records into one metric CSV
    Consolidate {
        /// Directory holding the source files
        #[arg(long)]
        data_dir: Option<PathBuf>,

        /// CSV output file
        #[arg(long)]
        target: Option<PathBuf>,

        /// Progress log file
        #[arg(long)]
        log: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    if Path::new(&cli.env).exists() {
        dotenvy::from_filename(&cli.env)
            .with_context(|| format!("Failed to load dotenv file: {}", cli.env))?;
    }

    let log_level = match cli.debug {
        true => "debug",
        false => "info",
    };
    let env = env_logger::Env::default().filter_or("LOG_LEVEL", log_level);
    env_logger::Builder::from_env(env)
        .format_timestamp_millis()
        .init();

    match cli.command {
        Commands::Gdp {
            url,
            html_file,
            header_text,
            csv,
            db,
            table,
            log,
            min_billions,
        } => {
            let mut config = GdpConfig::from_env()?;
            if let Some(url) = url {
                config.source = HtmlSource::Url(url);
            }
            if let Some(path) = html_file {
                config.source = HtmlSource::File(path);
            }
            if let Some(text) = header_text {
                config.locator = TableLocator::HeaderText(text);
            }
            config.csv_path = csv.unwrap_or(config.csv_path);
            config.db_path = db.unwrap_or(config.db_path);
            config.table_name = table.unwrap_or(config.table_name);
            config.log_path = log.unwrap_or(config.log_path);
            config.min_billions = min_billions.unwrap_or(config.min_billions);

            log::info!("Scraping GDP table from {}", config.source.bright_black());
            let summary = run_gdp_job(&config).await?;
            log::info!(
                "✓ Stored {} countries in {} and {} ({} at or above {} billion)",
                summary.countries.len(),
                config.csv_path.display().bright_black(),
                config.db_path.display().bright_black(),
                summary.query_result.len().cyan(),
                config.min_billions
            );
        }
        Commands::Consolidate {
            data_dir,
            target,
            log,
        } => {
            let mut config = ConsolidationConfig::from_env();
            config.data_dir = data_dir.unwrap_or(config.data_dir);
            config.target_path = target.unwrap_or(config.target_path);
            config.log_path = log.unwrap_or(config.log_path);

            log::info!(
                "Consolidating records from {}",
                config.data_dir.display().bright_black()
            );
            let people = run_consolidation_job(&config).await?;
            log::info!(
                "✓ Wrote {} records to {}",
                people.len().cyan(),
                config.target_path.display().bright_black()
            );
        }
    }

    Ok(())
}
