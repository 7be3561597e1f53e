//! Example: Feeding the dashboard through a channel
//!
//! This example pushes synthetic `stats` and `events` messages into a
//! `ChannelSource` and applies them to a `Dashboard`, printing what the
//! TUI would show. It is the same path an embedding application uses.
//!
//! # Usage
//!
//! ```bash
//! cargo run --example channel_source
//! ```

use std::thread;
use std::time::Duration;

use drowsy_dash::{ChannelSource, Dashboard, DataSource, Message, Metric, StatsSnapshot};

fn main() {
    println!("Channel source example");
    println!("Generating synthetic fatigue data...\n");

    let (tx, mut source) = ChannelSource::create("synthetic-data");

    thread::spawn(move || {
        let mut stats = StatsSnapshot::default();
        let mut events: Vec<String> = Vec::new();

        for tick in 1u64.. {
            if tick % 3 == 0 {
                stats.yawns_total += 1;
                events.push("Yawn confirmed".to_string());
            }
            if tick % 7 == 0 {
                stats.eye_closures_total += 1;
                stats.alerts_total += 1;
                events.push("Prolonged eye closure".to_string());
            }
            // Producer keeps only the most recent entries
            if events.len() > 20 {
                events.drain(..events.len() - 20);
            }

            if tx.send(Message::Stats(stats)).is_err() {
                break; // Receiver dropped
            }
            if tx.send(Message::Events(events.clone())).is_err() {
                break;
            }

            thread::sleep(Duration::from_millis(500));
        }
    });

    println!("Receiving messages (press Ctrl+C to stop):\n");

    let mut dashboard = Dashboard::new();
    loop {
        let mut changed = false;
        while let Some(message) = source.poll() {
            dashboard.apply(message);
            changed = true;
        }

        if changed {
            for metric in Metric::ALL {
                println!("  {:<13} {}", metric.label(), dashboard.counter_text(metric));
            }
            if let Some(latest) = dashboard.events().first() {
                println!("  Latest event: {}", latest);
            }
            println!();
        }

        thread::sleep(Duration::from_millis(100));
    }
}
