//! Application state and navigation logic.

use std::path::Path;
use std::time::{Duration, Instant};

use anyhow::Result;
use tracing::{debug, info};

use crate::data::Dashboard;
use crate::source::{ConnectionState, DataSource};
use crate::ui::Theme;

/// Upper bound on messages applied per poll so a flooding producer
/// cannot starve input handling.
const MAX_MESSAGES_PER_POLL: usize = 1024;

/// How long a status message stays on screen.
const STATUS_MESSAGE_TTL: Duration = Duration::from_secs(3);

/// What the header shows about the link to the producer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkStatus {
    /// Nothing received yet.
    Waiting,
    /// Messages are arriving.
    Live,
    /// Connected, but nothing has arrived for longer than the stale threshold.
    Stale,
    /// The source has ended.
    Disconnected,
}

impl LinkStatus {
    /// Returns the display label for this status.
    pub fn label(&self) -> &'static str {
        match self {
            LinkStatus::Waiting => "WAITING",
            LinkStatus::Live => "LIVE",
            LinkStatus::Stale => "STALE",
            LinkStatus::Disconnected => "DISCONNECTED",
        }
    }
}

/// Main application state.
pub struct App {
    pub running: bool,
    pub show_help: bool,

    // Data source
    source: Box<dyn DataSource>,
    pub dashboard: Dashboard,
    pub connection: ConnectionState,
    pub last_update: Option<Instant>,
    pub load_error: Option<String>,
    pub stale_after: Duration,

    // Event log scroll offset (0 = newest entry at the top)
    pub log_offset: usize,

    // UI
    pub theme: Theme,

    // Status message (temporary feedback)
    pub status_message: Option<(String, Instant)>,
}

impl App {
    /// Create a new App reading from `source`.
    pub fn new(source: Box<dyn DataSource>, stale_after: Duration) -> Self {
        let connection = source.state();
        Self {
            running: true,
            show_help: false,
            source,
            dashboard: Dashboard::new(),
            connection,
            last_update: None,
            load_error: None,
            stale_after,
            log_offset: 0,
            theme: Theme::dark(),
            status_message: None,
        }
    }

    /// Use the given theme instead of the default dark one.
    pub fn with_theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }

    /// Returns a description of the current data source.
    pub fn source_description(&self) -> &str {
        self.source.description()
    }

    /// Set a temporary status message that will be shown for a few seconds.
    pub fn set_status_message(&mut self, message: String) {
        self.status_message = Some((message, Instant::now()));
    }

    /// Get the current status message if it hasn't expired.
    pub fn get_status_message(&self) -> Option<&str> {
        if let Some((msg, time)) = &self.status_message {
            if time.elapsed() < STATUS_MESSAGE_TTL {
                return Some(msg);
            }
        }
        None
    }

    /// Drain the data source and apply each message to the dashboard in order.
    ///
    /// Returns the number of messages applied.
    pub fn reload_data(&mut self) -> usize {
        let mut applied = 0;
        while applied < MAX_MESSAGES_PER_POLL {
            let Some(message) = self.source.poll() else {
                break;
            };
            debug!(event = message.event_name(), "applying message");
            self.dashboard.apply(message);
            applied += 1;
        }

        if applied > 0 {
            self.last_update = Some(Instant::now());
        }

        let state = self.source.state();
        if state != self.connection {
            info!(source = self.source.description(), %state, "connection state changed");
            self.connection = state;
        }
        self.load_error = self.source.error();
        self.clamp_log_offset();

        applied
    }

    /// Link status as of now.
    pub fn link_status(&self) -> LinkStatus {
        self.link_status_at(Instant::now())
    }

    /// Link status as of `now`.
    pub fn link_status_at(&self, now: Instant) -> LinkStatus {
        match self.connection {
            ConnectionState::Disconnected(_) => LinkStatus::Disconnected,
            ConnectionState::Connecting => LinkStatus::Waiting,
            ConnectionState::Connected => match self.last_update {
                Some(at) if now.saturating_duration_since(at) > self.stale_after => {
                    LinkStatus::Stale
                }
                _ => LinkStatus::Live,
            },
        }
    }

    /// Scroll the event log towards older entries.
    pub fn scroll_down(&mut self, n: usize) {
        self.log_offset = self.log_offset.saturating_add(n);
        self.clamp_log_offset();
    }

    /// Scroll the event log towards newer entries.
    pub fn scroll_up(&mut self, n: usize) {
        self.log_offset = self.log_offset.saturating_sub(n);
    }

    /// Jump to the newest entry.
    pub fn scroll_to_newest(&mut self) {
        self.log_offset = 0;
    }

    /// Jump to the oldest entry.
    pub fn scroll_to_oldest(&mut self) {
        self.log_offset = self.dashboard.events().len().saturating_sub(1);
    }

    fn clamp_log_offset(&mut self) {
        let max = self.dashboard.events().len().saturating_sub(1);
        self.log_offset = self.log_offset.min(max);
    }

    /// Toggle the help overlay.
    pub fn toggle_help(&mut self) {
        self.show_help = !self.show_help;
    }

    /// Signal the application to quit.
    pub fn quit(&mut self) {
        self.running = false;
    }

    /// Export the current frame (stats plus oldest-first events) to a file.
    pub fn export_state(&self, path: &Path) -> Result<()> {
        if self.dashboard.stats().is_none() && self.dashboard.events().is_empty() {
            anyhow::bail!("No data to export");
        }

        let json = serde_json::to_string_pretty(&self.dashboard.to_frame())?;
        std::fs::write(path, json)?;
        info!(path = %path.display(), "exported dashboard");
        Ok(())
    }
}
