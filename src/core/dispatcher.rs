use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use chrono::{DateTime, Utc};
use log::{debug, info};

use crate::core::config::Config;
use crate::core::monitor::capture_snapshot;
use crate::core::notify::{render, EventKind, StyleSheet, WebhookNotifier};
use crate::core::schedule::{parse_cron_list, CronJob};
use crate::error::{MoncordError, Result};

const POLL_INTERVAL: Duration = Duration::from_millis(500);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Idle,
    Scheduled,
    Stopped,
}

/// Owns the schedule and drives sample -> render -> deliver for every
/// lifecycle event and cron tick.
pub struct Dispatcher {
    config: Config,
    styles: StyleSheet,
    notifier: WebhookNotifier,
    jobs: Vec<CronJob>,
    shutdown: Arc<AtomicBool>,
    state: State,
}

impl Dispatcher {
    /// Registration fails fatally when no configured cron expression parses;
    /// a partially valid list runs with the survivors.
    pub fn new(config: Config, shutdown: Arc<AtomicBool>) -> Result<Self> {
        let jobs = parse_cron_list(&config.cron_expressions);
        if jobs.is_empty() {
            return Err(MoncordError::config(
                "no valid cron expressions registered",
            ));
        }

        let styles = StyleSheet::with_overrides(&config.overrides);
        let notifier = WebhookNotifier::new(&config)?;

        Ok(Dispatcher {
            config,
            styles,
            notifier,
            jobs,
            shutdown,
            state: State::Idle,
        })
    }

    /// Run until the shutdown flag is raised. Sends the startup event, then
    /// fires heartbeats per schedule, then sends one final shutdown event.
    pub fn run(&mut self) -> Result<()> {
        debug_assert_eq!(self.state, State::Idle);

        self.send_event(EventKind::Startup, &self.config.cron_display);
        self.state = State::Scheduled;
        info!("Scheduler started with {} job(s)", self.jobs.len());

        let mut next_fires: Vec<Option<DateTime<Utc>>> = self
            .jobs
            .iter()
            .map(|job| job.next_after(Utc::now()))
            .collect();

        while !self.shutdown.load(Ordering::SeqCst) {
            let now = Utc::now();
            for index in 0..self.jobs.len() {
                let due = match next_fires[index] {
                    Some(due) if due <= now => due,
                    _ => continue,
                };
                let expression = &self.jobs[index].expression;
                debug!(
                    "Dispatching heartbeat for cron '{}' due at {}",
                    expression, due
                );
                self.send_event(EventKind::Heartbeat, expression);
                // Recomputing from now coalesces any ticks missed while busy
                next_fires[index] = self.jobs[index].next_after(Utc::now());
            }
            thread::sleep(POLL_INTERVAL);
        }

        info!("Shutdown signal received; sending final notification");
        self.send_event(EventKind::Shutdown, &self.config.cron_display);
        self.state = State::Stopped;
        Ok(())
    }

    fn send_event(&self, event: EventKind, cron_display: &str) {
        debug!("Dispatching {} event", event.as_str());
        let snapshot = capture_snapshot(&self.config);
        let embed = render(event, &snapshot, &self.styles, cron_display);
        self.notifier.deliver(&embed);
    }
}
