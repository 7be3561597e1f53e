use std::io;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing::{info, trace};

use drowsy_dash::settings::{Overrides, Settings, ThemeChoice};
use drowsy_dash::ui::Theme;
use drowsy_dash::{events, logging, ui, App, DataSource, FileSource, StreamSource};

/// Longest gap between draws while nothing changes.
const IDLE_REDRAW: Duration = Duration::from_millis(250);

#[derive(Parser, Debug)]
#[command(name = "drowsy-dash")]
#[command(about = "Terminal dashboard for live driver-fatigue monitoring streams")]
struct Args {
    /// Connect to a TCP endpoint pushing newline-delimited JSON messages (host:port)
    #[arg(short, long, conflicts_with = "file")]
    connect: Option<String>,

    /// Poll a JSON frame file instead of connecting [default: dashboard.json]
    #[arg(short, long)]
    file: Option<PathBuf>,

    /// Settings file (TOML)
    #[arg(long)]
    config: Option<PathBuf>,

    /// How often to poll the source and redraw (e.g., "100ms", "1s")
    #[arg(short, long)]
    refresh: Option<String>,

    /// Show the link as stale after this long without a message (e.g., "2s")
    #[arg(long)]
    stale_after: Option<String>,

    /// Append logs to this file (filter with RUST_LOG)
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Color theme
    #[arg(long, value_enum)]
    theme: Option<ThemeChoice>,
}

impl Args {
    fn overrides(&self) -> Overrides {
        Overrides {
            connect: self.connect.clone(),
            file: self.file.clone(),
            refresh: self.refresh.clone(),
            stale_after: self.stale_after.clone(),
            log_file: self.log_file.clone(),
            theme: self.theme,
        }
    }
}

fn main() -> Result<()> {
    let args = Args::parse();
    let mut settings = Settings::load(args.config.as_deref(), &args.overrides())?;

    // An explicit --file beats a connect address from lower layers
    if args.file.is_some() {
        settings.connect = None;
    }

    logging::init(settings.log_file.as_deref())?;
    info!(?settings, "starting");

    if let Some(addr) = settings.connect.clone() {
        return run_with_tcp(&addr, &settings);
    }

    let source = Box::new(FileSource::new(&settings.file));
    run_tui(source, &settings)
}

/// Run with a TCP stream data source
fn run_with_tcp(addr: &str, settings: &Settings) -> Result<()> {
    // The runtime hosts the reader task for as long as the TUI runs
    let rt = tokio::runtime::Runtime::new()?;

    let source = rt.block_on(async {
        use tokio::net::TcpStream;

        println!("Connecting to {}...", addr);
        let stream = TcpStream::connect(addr)
            .await
            .with_context(|| format!("Failed to connect to {}", addr))?;
        info!(%addr, "connected");
        Ok::<_, anyhow::Error>(Box::new(StreamSource::spawn(stream, addr)) as Box<dyn DataSource>)
    })?;

    run_tui(source, settings)
}

/// Run the TUI with the given data source
fn run_tui(source: Box<dyn DataSource>, settings: &Settings) -> Result<()> {
    // Resolve the theme before raw mode; detection queries the terminal
    let theme = Theme::from_choice(settings.theme);

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Setup panic hook to restore terminal
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen, DisableMouseCapture);
        original_hook(panic);
    }));

    let mut app = App::new(source, settings.stale_after).with_theme(theme);
    app.reload_data();

    let result = run_app(&mut terminal, &mut app, settings.refresh);

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    result
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    refresh_interval: Duration,
) -> Result<()> {
    let mut last_refresh = Instant::now();
    let mut last_draw: Option<Instant> = None;
    // Input and state changes mark the screen dirty
    let mut dirty = true;
    // Input is polled at least this often even with a slow refresh
    let input_timeout = refresh_interval.min(Duration::from_millis(100));

    while app.running {
        let charts_changed = app.dashboard.take_redraw();
        // Redraw at least this often so the link status can turn stale
        let idle = last_draw.is_none_or(|at| at.elapsed() >= IDLE_REDRAW);
        if dirty || charts_changed || idle {
            terminal.draw(|frame| ui::render(frame, app))?;
            trace!(charts_changed, "drawn");
            last_draw = Some(Instant::now());
            dirty = false;
        }

        if let Some(event) = events::poll_event(input_timeout)? {
            match event {
                Event::Key(key) => events::handle_key_event(app, key),
                Event::Mouse(mouse) => events::handle_mouse_event(app, mouse),
                _ => {}
            }
            // Resizes and focus changes redraw too
            dirty = true;
        }

        if last_refresh.elapsed() >= refresh_interval {
            if app.reload_data() > 0 {
                dirty = true;
            }
            last_refresh = Instant::now();
        }
    }

    info!("quitting");
    Ok(())
}
