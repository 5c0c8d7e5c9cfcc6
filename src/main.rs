use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use crossterm::{
    event::{DisableFocusChange, EnableFocusChange},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use mediawarp_monitor::app::write_export;
use mediawarp_monitor::data::{format_timestamp, DashboardView, Locale};
use mediawarp_monitor::{events, ui, App, Fetcher, HttpFetcher, MonitorConfig, MonitorSnapshot, Poller};

#[derive(Parser, Debug)]
#[command(name = "mediawarp-monitor")]
#[command(about = "Terminal dashboard for monitoring MediaWarp cache, warmup and deduplication activity")]
struct Args {
    /// Path to a TOML config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Base URL of the MediaWarp server (e.g., http://127.0.0.1:8080)
    #[arg(short, long)]
    url: Option<String>,

    /// Path of the monitor data endpoint
    #[arg(long)]
    path: Option<String>,

    /// Polling interval in milliseconds
    #[arg(short, long)]
    interval: Option<u64>,

    /// Request timeout in milliseconds
    #[arg(long)]
    timeout: Option<u64>,

    /// Display language (en, zh-CN)
    #[arg(short, long)]
    locale: Option<Locale>,

    /// Write logs to this file (the TUI otherwise discards them)
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Fetch once, print the dashboard as text and exit
    #[arg(long, conflicts_with = "export")]
    once: bool,

    /// Fetch once and write the dashboard to a JSON file
    #[arg(short, long)]
    export: Option<PathBuf>,
}

impl Args {
    /// Apply command-line overrides on top of the loaded configuration.
    fn apply(&self, mut config: MonitorConfig) -> Result<MonitorConfig> {
        if let Some(ref url) = self.url {
            config.base_url = url.clone();
        }
        if let Some(ref path) = self.path {
            config.path = path.clone();
        }
        if let Some(interval) = self.interval {
            config.interval_ms = interval;
        }
        if let Some(timeout) = self.timeout {
            config.timeout_ms = timeout;
        }
        if let Some(locale) = self.locale {
            config.locale = locale;
        }
        if let Some(ref log_file) = self.log_file {
            config.log_file = Some(log_file.clone());
        }
        config.validate()?;
        Ok(config)
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    let config = MonitorConfig::load(args.config.as_deref())
        .and_then(|loaded| args.apply(loaded))
        .context("Invalid configuration")?;

    let headless = args.once || args.export.is_some();
    init_logging(headless, config.log_file.as_deref())?;

    tracing::info!(
        url = %config.endpoint_url(),
        interval_ms = config.interval_ms,
        locale = %config.locale,
        "Starting MediaWarp monitor"
    );

    let fetcher = Arc::new(HttpFetcher::new(&config)?);

    // Build a tokio runtime for the poller and HTTP client
    let rt = tokio::runtime::Runtime::new()?;

    // Handle export mode (non-interactive)
    if let Some(ref export_path) = args.export {
        return rt.block_on(export_once(&fetcher, &config, export_path));
    }

    // Handle one-shot text mode
    if args.once {
        return rt.block_on(print_once(&fetcher, &config));
    }

    // Spawned poll tasks need the runtime context while the TUI runs on this thread
    let _guard = rt.enter();
    run_tui(fetcher, &config)
}

/// Route tracing output somewhere that won't corrupt the TUI.
fn init_logging(headless: bool, log_file: Option<&Path>) -> Result<()> {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    if let Some(path) = log_file {
        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .with_context(|| format!("Failed to open log file {}", path.display()))?;
        tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer().with_writer(Mutex::new(file)).with_ansi(false))
            .try_init()?;
    } else if headless {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
            .try_init()?;
    }
    // TUI without a log file: no subscriber, events are dropped

    Ok(())
}

async fn fetch_once(fetcher: &HttpFetcher) -> Result<MonitorSnapshot> {
    fetcher.fetch().await.map_err(|e| {
        tracing::error!(kind = e.kind(), error = %e, "Error fetching monitor data");
        anyhow!("Failed to fetch {}: {}", fetcher.url(), e)
    })
}

/// Fetch once and print the dashboard as text
async fn print_once(fetcher: &HttpFetcher, config: &MonitorConfig) -> Result<()> {
    let snapshot = fetch_once(fetcher).await?;
    let view = DashboardView::render(&snapshot, true, config.locale.labels());

    println!("{}", format_timestamp(snapshot.timestamp, config.locale));
    println!();
    print!("{}", view);
    Ok(())
}

/// Fetch once and write the dashboard to a JSON file
async fn export_once(fetcher: &HttpFetcher, config: &MonitorConfig, path: &Path) -> Result<()> {
    let snapshot = fetch_once(fetcher).await?;
    let view = DashboardView::render(&snapshot, true, config.locale.labels());
    let timestamp = format_timestamp(snapshot.timestamp, config.locale);

    write_export(path, &view, &snapshot, true, Some(&timestamp))?;
    println!("Exported monitor state to: {}", path.display());
    Ok(())
}

/// Run the TUI until the user quits
fn run_tui(fetcher: Arc<HttpFetcher>, config: &MonitorConfig) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableFocusChange)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Setup panic hook to restore terminal
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen, DisableFocusChange);
        original_hook(panic);
    }));

    // Create app and start polling
    let (poller, source) = Poller::new(fetcher, config.interval());
    let mut app = App::new(poller, Box::new(source), config.locale);
    app.start();

    // Run the main loop
    let result = run_app(&mut terminal, &mut app);

    app.stop();

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen, DisableFocusChange)?;
    terminal.show_cursor()?;

    result
}

fn run_app(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, app: &mut App) -> Result<()> {
    while app.running {
        // Apply whatever the poller delivered since the last frame
        app.reload_data();

        terminal.draw(|frame| ui::draw(frame, app))?;

        // Poll for events with a short timeout
        if let Some(event) = events::poll_event(Duration::from_millis(100))? {
            events::handle_event(app, event);
        }
    }

    Ok(())
}
