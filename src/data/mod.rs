//! Dashboard data models.
//!
//! ## Submodules
//!
//! - [`dashboard`]: The [`Dashboard`] context object with its counters, ring charts
//!   and event log, plus the [`StatsSnapshot`] and [`DashboardFrame`] payload types
//! - [`duration`]: Parsing and formatting of duration strings (e.g., "2s", "500ms")
//!
//! ## Data Flow
//!
//! ```text
//! Message (decoded by a source)
//!        │
//!        ▼
//! Dashboard::apply()
//!        │
//!        ├──▶ on_stats()  ──▶ counters + RingChart::update() x3
//!        │
//!        └──▶ on_events() ──▶ event log (newest first)
//! ```

pub mod dashboard;
pub mod duration;

pub use dashboard::{Dashboard, DashboardFrame, Metric, RingChart, StatsSnapshot};
