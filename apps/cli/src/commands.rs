//! CLI argument definitions, tracing setup, and the scrape/enrich run.

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use color_eyre::eyre::Result;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{info, warn};

use confscrape_api::{ApiClient, ScrapeProgress, Walker};
use confscrape_enrich::{EnrichProgress, Matcher};
use confscrape_shared::Config;

// ---------------------------------------------------------------------------
// CLI structure
// ---------------------------------------------------------------------------

/// confscrape — export conference attendee profiles with LinkedIn URLs.
#[derive(Parser)]
#[command(
    name = "confscrape",
    version,
    about = "Scrape conference attendee profiles and enrich them with public LinkedIn URLs.",
    long_about = None,
)]
pub(crate) struct Cli {
    /// Output file path (JSON).
    #[arg(long, default_value = "profiles.json")]
    pub out: PathBuf,

    /// Optional input file with existing profiles; if set, scraping is
    /// skipped and only enrichment runs.
    #[arg(long = "in", value_name = "PATH")]
    pub input: Option<PathBuf>,

    /// Maximum number of pages to scrape (0 = all).
    #[arg(long, default_value_t = 0)]
    pub page_limit: u32,

    /// Number of attendees per page when calling the API.
    #[arg(long, default_value_t = 50)]
    pub page_size: u32,

    /// HTTP client timeout in seconds.
    #[arg(long, default_value_t = 30)]
    pub timeout_sec: u64,

    /// Log format: text (default) or json.
    #[arg(long, default_value = "text")]
    pub log_format: LogFormat,

    /// Verbosity level (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

/// Log output format.
#[derive(Clone, Debug, clap::ValueEnum)]
pub(crate) enum LogFormat {
    Text,
    Json,
}

// ---------------------------------------------------------------------------
// Tracing setup
// ---------------------------------------------------------------------------

/// Initialize tracing based on CLI flags.
pub(crate) fn init_tracing(cli: &Cli) {
    use tracing_subscriber::{EnvFilter, fmt};

    let filter = match cli.verbose {
        0 => "confscrape=info",
        1 => "confscrape=debug",
        _ => "confscrape=trace",
    };

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    match cli.log_format {
        LogFormat::Text => {
            fmt()
                .with_env_filter(env_filter)
                .with_target(false)
                .init();
        }
        LogFormat::Json => {
            fmt().json().with_env_filter(env_filter).init();
        }
    }
}

// ---------------------------------------------------------------------------
// Run
// ---------------------------------------------------------------------------

/// Run the scrape → enrich → persist pipeline.
pub(crate) async fn run(cli: Cli) -> Result<()> {
    let config = Config::from_env()?;
    let timeout = Duration::from_secs(cli.timeout_sec);

    let profiles = match &cli.input {
        Some(path) => {
            info!(path = %path.display(), "loading existing profiles, skipping scrape");
            confscrape_store::read_profiles(path)?
        }
        None => {
            let client = ApiClient::new(&config, timeout)?;
            let walker = Walker::new(
                &client,
                config.event_id.clone(),
                cli.page_size,
                config.request_delay,
            );

            info!(
                event_id = %config.event_id,
                page_size = cli.page_size,
                page_limit = cli.page_limit,
                "scraping attendees"
            );

            let spinner = Spinner::new();
            let profiles = walker.scrape_all(cli.page_limit, &spinner).await?;
            spinner.finish();
            profiles
        }
    };

    let matcher = Matcher::new(&config, timeout)?;
    let spinner = Spinner::new();
    let outcome = matcher.enrich_profiles(profiles, &spinner).await;
    spinner.finish();

    if let Some(err) = outcome.error {
        // Best-effort persistence of whatever was enriched before failing.
        warn!(error = %err, path = %cli.out.display(), "enrichment failed, writing partial results");
        confscrape_store::write_profiles(&cli.out, &outcome.profiles)?;
        return Err(err.into());
    }

    confscrape_store::write_profiles(&cli.out, &outcome.profiles)?;

    println!();
    println!("  Wrote {} profiles", outcome.profiles.len());
    println!("  Path: {}", cli.out.display());
    println!();

    Ok(())
}

// ---------------------------------------------------------------------------
// CLI progress reporter
// ---------------------------------------------------------------------------

/// Progress reporter using an indicatif spinner.
struct Spinner {
    spinner: ProgressBar,
}

impl Spinner {
    fn new() -> Self {
        let spinner = ProgressBar::new_spinner();
        spinner.set_style(
            ProgressStyle::with_template("{spinner:.cyan} {msg}")
                .unwrap()
                .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"]),
        );
        spinner.enable_steady_tick(std::time::Duration::from_millis(80));
        Self { spinner }
    }

    fn finish(&self) {
        self.spinner.finish_and_clear();
    }
}

impl ScrapeProgress for Spinner {
    fn page_listed(&self, page: u32, stub_count: usize) {
        self.spinner
            .set_message(format!("Page {page}: {stub_count} attendees"));
    }

    fn attendee_fetched(&self, attendee_id: &str, collected: usize) {
        self.spinner.set_message(format!(
            "Fetching attendee {attendee_id} [{collected} collected]"
        ));
    }
}

impl EnrichProgress for Spinner {
    fn profile_started(&self, name: &str, current: usize, total: usize) {
        self.spinner
            .set_message(format!("Searching [{current}/{total}] {name}"));
    }

    fn profile_matched(&self, name: &str, url: &str, alternatives: usize) {
        self.spinner
            .set_message(format!("Matched {name} -> {url} (+{alternatives})"));
    }
}
