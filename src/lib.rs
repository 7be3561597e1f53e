//! # drowsy-dash
//!
//! A terminal dashboard for live driver-fatigue monitoring.
//!
//! A producer pushes two kinds of messages: `stats` (cumulative yawn, eye
//! closure and alert totals) and `events` (the most recent event lines,
//! oldest first). This crate mirrors them into three counters, three ring
//! charts and a newest-first event log, and renders them with ratatui.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                        Application                          │
//! │  ┌─────────┐    ┌──────────┐    ┌─────────┐    ┌─────────┐ │
//! │  │  app    │───▶│   data   │───▶│   ui    │───▶│ Terminal│ │
//! │  │ (state) │    │(Dashboard)    │(rendering)   │         │ │
//! │  └────┬────┘    └──────────┘    └─────────┘    └─────────┘ │
//! │       │                                                     │
//! │       ▼                                                     │
//! │  ┌─────────┐                                                │
//! │  │ source  │◀── StreamSource | ChannelSource | FileSource  │
//! │  │ (input) │                                                │
//! │  └─────────┘                                                │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! - **[`app`]**: Application state, link status, scrolling and export
//! - **[`source`]**: The [`DataSource`] trait, the wire [`Message`] format and
//!   implementations for TCP/byte streams, in-process channels and polled files
//! - **[`data`]**: The [`Dashboard`] context object updated by `on_stats` / `on_events`
//! - **[`ui`]**: Terminal rendering using ratatui
//! - **[`settings`]**: Layered configuration (defaults, file, env, CLI)
//!
//! ## Usage
//!
//! ### As a CLI tool
//!
//! ```bash
//! # Read the push stream from a TCP endpoint
//! drowsy-dash --connect localhost:5000
//!
//! # Poll a frame file
//! drowsy-dash --file dashboard.json
//! ```
//!
//! ### As a library
//!
//! ```
//! use drowsy_dash::{Dashboard, Message, Metric, StatsSnapshot};
//!
//! let mut dashboard = Dashboard::new();
//! dashboard.apply(Message::Stats(StatsSnapshot {
//!     yawns_total: 3,
//!     eye_closures_total: 1,
//!     alerts_total: 0,
//! }));
//! dashboard.apply(Message::Events(vec!["a".into(), "b".into(), "c".into()]));
//!
//! assert_eq!(dashboard.counter_text(Metric::Yawns), "3");
//! assert_eq!(dashboard.events(), ["c", "b", "a"]);
//! ```
//!
//! ### With a stream source
//!
//! ```no_run
//! use std::time::Duration;
//! use drowsy_dash::{App, StreamSource};
//!
//! # tokio_test::block_on(async {
//! let stream = tokio::net::TcpStream::connect("localhost:5000").await.unwrap();
//! let source = StreamSource::spawn(stream, "localhost:5000");
//! let app = App::new(Box::new(source), Duration::from_secs(2));
//! # });
//! ```

pub mod app;
pub mod data;
pub mod error;
pub mod events;
pub mod logging;
pub mod settings;
pub mod source;
pub mod ui;

// Re-export main types for convenience
pub use app::{App, LinkStatus};
pub use data::{Dashboard, DashboardFrame, Metric, RingChart, StatsSnapshot};
pub use error::ProtocolError;
pub use settings::{Settings, ThemeChoice};
pub use source::{
    ChannelSource, ConnectionState, DataSource, FileSource, Message, StreamSource,
};
