use anyhow::{Context, Result};
use clap::Parser;
use std::fs::{File, OpenOptions};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing_subscriber::EnvFilter;
use tweetfeed::config::Config;
use tweetfeed::feeds::snapshot::SnapshotFetcher;
use tweetfeed::feeds::{FeedData, FeedFetcher};
use tweetfeed::ui::plain::render_text;
use tweetfeed::ui::widgets::MainFeedWidget;
use tweetfeed::view::{select_view, Tab};

#[derive(Parser, Debug)]
#[command(name = "tweetfeed", version, about = "Browse tweet feeds in the terminal")]
struct Cli {
    /// Path to the config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// JSON snapshot with feeds, user tweets, search results and profile
    #[arg(short, long)]
    snapshot: Option<PathBuf>,

    /// Initial tab: home, profile, user or search
    #[arg(short, long)]
    tab: Option<String>,

    /// URL query string to read the tab from, e.g. "?tab=search"
    #[arg(short, long)]
    query: Option<String>,

    /// Print the selected view as plain text and exit
    #[arg(long)]
    print: bool,

    /// Wrap width for --print
    #[arg(long, default_value_t = 80)]
    width: usize,
}

fn open_log_file(path: &Path) -> Result<File> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create log directory: {}", parent.display()))?;
    }
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("Failed to open log file: {}", path.display()))
}

/// The TUI owns the terminal, so it logs to a file. `--print` writes its
/// output to stdout and only warnings go to stderr.
fn init_logging(config: &Config, print: bool) -> Result<()> {
    if print {
        let filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("tweetfeed=warn"));
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
        return Ok(());
    }

    let log_file = open_log_file(&config.general.log_file)?;
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("tweetfeed=info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(log_file)
        .with_ansi(false)
        .init();
    Ok(())
}

fn initial_tab(cli: &Cli, config: &Config) -> Tab {
    if let Some(query) = &cli.query {
        return Tab::from_query(query);
    }
    let raw = cli.tab.as_deref().unwrap_or(&config.feed.default_tab);
    Tab::parse(raw)
}

async fn print_view(config: &Config, tab: Tab, width: usize) -> Result<()> {
    let path = config
        .feed
        .snapshot
        .clone()
        .context("No snapshot configured; pass --snapshot or set feed.snapshot")?;

    let snapshot = match SnapshotFetcher::new(path).fetch().await? {
        FeedData::Snapshot(snapshot) => snapshot,
        FeedData::Error(e) => anyhow::bail!(e),
        FeedData::Loading => anyhow::bail!("snapshot still loading"),
    };

    let view = select_view(
        tab,
        &snapshot.feeds,
        &snapshot.user_tweets,
        &snapshot.search_result,
    );
    print!("{}", render_text(&view, &snapshot.profile, width));
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = Config::load_or_default(cli.config.as_deref())?;
    if let Some(snapshot) = &cli.snapshot {
        config.feed.snapshot = Some(snapshot.clone());
    }

    init_logging(&config, cli.print)?;

    let tab = initial_tab(&cli, &config);
    tracing::info!(%tab, snapshot = ?config.feed.snapshot, "starting");

    if cli.print {
        return print_view(&config, tab, cli.width).await;
    }

    let widget = MainFeedWidget::new(config.feed.clone(), tab);
    tweetfeed::ui::run(widget, Duration::from_millis(config.general.tick_rate_ms)).await
}
