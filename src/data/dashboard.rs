//! Dashboard state mirrored from the push stream.
//!
//! [`Dashboard`] is the single context object the UI reads from. It is only
//! ever mutated through [`Dashboard::on_stats`] and [`Dashboard::on_events`],
//! both of which overwrite what was there before.

use serde::{Deserialize, Serialize};

use crate::source::Message;

/// Cumulative counters as of the moment the producer sent them.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatsSnapshot {
    /// Confirmed yawns since the producer started.
    pub yawns_total: u64,
    /// Prolonged eye closures since the producer started.
    pub eye_closures_total: u64,
    /// Alerts raised (eye closures plus yawn series).
    pub alerts_total: u64,
}

/// A stats snapshot paired with the event list, as polled from a file or exported.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardFrame {
    pub stats: StatsSnapshot,
    /// Oldest-first, exactly as the producer sends them.
    #[serde(default)]
    pub events: Vec<String>,
}

/// Which of the three tracked metrics a chart or counter shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Metric {
    Yawns,
    EyeClosures,
    Alerts,
}

impl Metric {
    /// All metrics in display order.
    pub const ALL: [Metric; 3] = [Metric::Yawns, Metric::EyeClosures, Metric::Alerts];

    /// Returns the display label for this metric.
    pub fn label(&self) -> &'static str {
        match self {
            Metric::Yawns => "Yawns",
            Metric::EyeClosures => "Eye closures",
            Metric::Alerts => "Alerts",
        }
    }

    /// Pick this metric's field out of a snapshot.
    pub fn value_of(&self, stats: &StatsSnapshot) -> u64 {
        match self {
            Metric::Yawns => stats.yawns_total,
            Metric::EyeClosures => stats.eye_closures_total,
            Metric::Alerts => stats.alerts_total,
        }
    }
}

/// A ring chart bound to a single-slot series.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RingChart {
    label: &'static str,
    data: [u64; 1],
    redraw_requested: bool,
}

impl RingChart {
    /// Create a chart showing zero.
    pub fn new(label: &'static str) -> Self {
        Self {
            label,
            data: [0],
            redraw_requested: false,
        }
    }

    /// Replace the series with `value` and ask for a redraw.
    pub fn update(&mut self, value: u64) {
        self.data = [value];
        self.redraw_requested = true;
    }

    pub fn label(&self) -> &'static str {
        self.label
    }

    pub fn value(&self) -> u64 {
        self.data[0]
    }

    pub fn redraw_requested(&self) -> bool {
        self.redraw_requested
    }

    fn clear_redraw(&mut self) {
        self.redraw_requested = false;
    }
}

/// Textual counters plus their charts and the event log.
#[derive(Debug, Clone)]
pub struct Dashboard {
    yawns_text: String,
    eyes_text: String,
    alerts_text: String,
    pub yawns_chart: RingChart,
    pub eyes_chart: RingChart,
    pub alerts_chart: RingChart,
    /// Newest first.
    events: Vec<String>,
    stats: Option<StatsSnapshot>,
}

impl Default for Dashboard {
    fn default() -> Self {
        Self::new()
    }
}

impl Dashboard {
    /// Create an empty dashboard. Counters read "0" until the first snapshot.
    pub fn new() -> Self {
        Self {
            yawns_text: "0".to_string(),
            eyes_text: "0".to_string(),
            alerts_text: "0".to_string(),
            yawns_chart: RingChart::new(Metric::Yawns.label()),
            eyes_chart: RingChart::new(Metric::EyeClosures.label()),
            alerts_chart: RingChart::new(Metric::Alerts.label()),
            events: Vec::new(),
            stats: None,
        }
    }

    /// Overwrite counters and charts from one snapshot.
    pub fn on_stats(&mut self, snapshot: StatsSnapshot) {
        self.yawns_text = snapshot.yawns_total.to_string();
        self.eyes_text = snapshot.eye_closures_total.to_string();
        self.alerts_text = snapshot.alerts_total.to_string();

        self.yawns_chart.update(snapshot.yawns_total);
        self.eyes_chart.update(snapshot.eye_closures_total);
        self.alerts_chart.update(snapshot.alerts_total);

        self.stats = Some(snapshot);
    }

    /// Replace the event log with `entries` (oldest-first), stored newest-first.
    pub fn on_events(&mut self, entries: Vec<String>) {
        self.events.clear();
        self.events.extend(entries.into_iter().rev());
    }

    /// Route a decoded message to its handler.
    pub fn apply(&mut self, message: Message) {
        match message {
            Message::Stats(snapshot) => self.on_stats(snapshot),
            Message::Events(entries) => self.on_events(entries),
        }
    }

    /// Returns true if any chart asked for a redraw since the last call.
    pub fn take_redraw(&mut self) -> bool {
        let mut requested = false;
        for chart in self.charts_mut() {
            requested |= chart.redraw_requested();
            chart.clear_redraw();
        }
        requested
    }

    /// Displayed text for a metric's counter.
    pub fn counter_text(&self, metric: Metric) -> &str {
        match metric {
            Metric::Yawns => &self.yawns_text,
            Metric::EyeClosures => &self.eyes_text,
            Metric::Alerts => &self.alerts_text,
        }
    }

    /// Chart bound to a metric.
    pub fn chart(&self, metric: Metric) -> &RingChart {
        match metric {
            Metric::Yawns => &self.yawns_chart,
            Metric::EyeClosures => &self.eyes_chart,
            Metric::Alerts => &self.alerts_chart,
        }
    }

    /// Event log entries, newest first.
    pub fn events(&self) -> &[String] {
        &self.events
    }

    /// The last snapshot received, if any.
    pub fn stats(&self) -> Option<StatsSnapshot> {
        self.stats
    }

    /// Current state as a frame, with events back in oldest-first order.
    pub fn to_frame(&self) -> DashboardFrame {
        DashboardFrame {
            stats: self.stats.unwrap_or_default(),
            events: self.events.iter().rev().cloned().collect(),
        }
    }

    fn charts_mut(&mut self) -> [&mut RingChart; 3] {
        [&mut self.yawns_chart, &mut self.eyes_chart, &mut self.alerts_chart]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot(yawns: u64, eyes: u64, alerts: u64) -> StatsSnapshot {
        StatsSnapshot {
            yawns_total: yawns,
            eye_closures_total: eyes,
            alerts_total: alerts,
        }
    }

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_on_stats_sets_counters_and_charts() {
        let mut dashboard = Dashboard::new();
        dashboard.on_stats(snapshot(3, 1, 0));

        assert_eq!(dashboard.counter_text(Metric::Yawns), "3");
        assert_eq!(dashboard.counter_text(Metric::EyeClosures), "1");
        assert_eq!(dashboard.counter_text(Metric::Alerts), "0");

        assert_eq!(dashboard.chart(Metric::Yawns).value(), 3);
        assert_eq!(dashboard.chart(Metric::EyeClosures).value(), 1);
        assert_eq!(dashboard.chart(Metric::Alerts).value(), 0);
    }

    #[test]
    fn test_on_stats_overwrites_previous_snapshot() {
        let mut dashboard = Dashboard::new();
        dashboard.on_stats(snapshot(10, 20, 30));
        dashboard.on_stats(snapshot(1, 2, 3));

        assert_eq!(dashboard.counter_text(Metric::Yawns), "1");
        assert_eq!(dashboard.counter_text(Metric::EyeClosures), "2");
        assert_eq!(dashboard.counter_text(Metric::Alerts), "3");
        assert_eq!(dashboard.stats(), Some(snapshot(1, 2, 3)));
    }

    #[test]
    fn test_on_events_reverses_order() {
        let mut dashboard = Dashboard::new();
        dashboard.on_events(strings(&["a", "b", "c"]));
        assert_eq!(dashboard.events(), strings(&["c", "b", "a"]).as_slice());
    }

    #[test]
    fn test_on_events_is_idempotent() {
        let mut dashboard = Dashboard::new();
        let entries = strings(&["Yawn confirmed", "Prolonged eye closure"]);
        dashboard.on_events(entries.clone());
        let once = dashboard.events().to_vec();
        dashboard.on_events(entries);
        assert_eq!(dashboard.events(), once.as_slice());
    }

    #[test]
    fn test_on_events_replaces_instead_of_appending() {
        let mut dashboard = Dashboard::new();
        dashboard.on_events(strings(&["a", "b", "c", "d"]));
        dashboard.on_events(strings(&["x"]));
        assert_eq!(dashboard.events(), strings(&["x"]).as_slice());
    }

    #[test]
    fn test_empty_events_clears_list() {
        let mut dashboard = Dashboard::new();
        dashboard.on_events(strings(&["a"]));
        dashboard.on_events(Vec::new());
        assert!(dashboard.events().is_empty());
    }

    #[test]
    fn test_take_redraw() {
        let mut dashboard = Dashboard::new();
        assert!(!dashboard.take_redraw());

        dashboard.on_stats(snapshot(1, 1, 1));
        assert!(dashboard.chart(Metric::Alerts).redraw_requested());
        assert!(dashboard.take_redraw());
        assert!(!dashboard.take_redraw());

        // Event updates do not touch the charts
        dashboard.on_events(strings(&["a"]));
        assert!(!dashboard.take_redraw());
    }

    #[test]
    fn test_apply_dispatches() {
        let mut dashboard = Dashboard::new();
        dashboard.apply(Message::Stats(snapshot(4, 5, 6)));
        dashboard.apply(Message::Events(strings(&["first", "second"])));

        assert_eq!(dashboard.counter_text(Metric::Alerts), "6");
        assert_eq!(dashboard.events()[0], "second");
    }

    #[test]
    fn test_to_frame_restores_oldest_first() {
        let mut dashboard = Dashboard::new();
        dashboard.on_stats(snapshot(2, 0, 1));
        dashboard.on_events(strings(&["a", "b"]));

        let frame = dashboard.to_frame();
        assert_eq!(frame.stats, snapshot(2, 0, 1));
        assert_eq!(frame.events, strings(&["a", "b"]));
    }

    #[test]
    fn test_deserialize_frame() {
        let json = r#"{
            "stats": {"yawns_total": 3, "eye_closures_total": 1, "alerts_total": 0},
            "events": ["Yawn confirmed"]
        }"#;
        let frame: DashboardFrame = serde_json::from_str(json).unwrap();
        assert_eq!(frame.stats.yawns_total, 3);
        assert_eq!(frame.events.len(), 1);
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        fn entries() -> impl Strategy<Value = Vec<String>> {
            prop::collection::vec(".{0,40}", 0..50)
        }

        proptest! {
            /// Counters and charts show exactly the snapshot's values.
            #[test]
            fn prop_counters_and_charts_match_input(y: u64, e: u64, a: u64) {
                let mut dashboard = Dashboard::new();
                let stats = snapshot(y, e, a);
                dashboard.on_stats(stats);

                for metric in Metric::ALL {
                    let expected = metric.value_of(&stats);
                    prop_assert_eq!(dashboard.counter_text(metric), expected.to_string());
                    prop_assert_eq!(dashboard.chart(metric).value(), expected);
                }
                prop_assert!(dashboard.take_redraw());
            }

            /// A second snapshot fully replaces the first.
            #[test]
            fn prop_later_snapshot_wins(first: (u64, u64, u64), second: (u64, u64, u64)) {
                let mut dashboard = Dashboard::new();
                dashboard.on_stats(snapshot(first.0, first.1, first.2));
                dashboard.on_stats(snapshot(second.0, second.1, second.2));

                let expected = snapshot(second.0, second.1, second.2);
                prop_assert_eq!(dashboard.stats(), Some(expected));
                for metric in Metric::ALL {
                    let value = metric.value_of(&expected);
                    prop_assert_eq!(dashboard.counter_text(metric), value.to_string());
                    prop_assert_eq!(dashboard.chart(metric).value(), value);
                }
            }

            /// The log is the input reversed, and to_frame undoes that.
            #[test]
            fn prop_events_are_reversed(input in entries()) {
                let mut dashboard = Dashboard::new();
                dashboard.on_events(input.clone());

                let reversed: Vec<String> = input.iter().rev().cloned().collect();
                prop_assert_eq!(dashboard.events(), reversed.as_slice());
                prop_assert_eq!(dashboard.to_frame().events, input);
            }

            /// Applying the same list twice changes nothing.
            #[test]
            fn prop_events_idempotent(input in entries(), earlier in entries()) {
                let mut dashboard = Dashboard::new();
                dashboard.on_events(earlier);
                dashboard.on_events(input.clone());
                let once = dashboard.events().to_vec();

                dashboard.on_events(input);
                prop_assert_eq!(dashboard.events(), once.as_slice());
            }
        }
    }
}
