use std::str::FromStr;

use chrono::{DateTime, Utc};
use cron::Schedule;
use log::error;

use crate::error::{MoncordError, Result};

/// One registered heartbeat schedule. Each job owns its expression string so
/// the rendered notification can name the schedule that fired it.
#[derive(Debug, Clone)]
pub struct CronJob {
    pub expression: String,
    schedule: Schedule,
}

impl CronJob {
    /// Parse a crontab expression. Five-field input gets a seconds field
    /// prepended; six- and seven-field input passes through unchanged.
    pub fn parse(expression: &str) -> Result<Self> {
        let normalized = normalize(expression);
        let schedule = Schedule::from_str(&normalized).map_err(|err| {
            MoncordError::schedule(format!("invalid cron expression '{expression}': {err}"))
        })?;
        Ok(CronJob {
            expression: expression.to_string(),
            schedule,
        })
    }

    /// Next tick strictly after `after`. Recomputing from the current time
    /// after a late wakeup coalesces any overdue ticks into one run.
    pub fn next_after(&self, after: DateTime<Utc>) -> Option<DateTime<Utc>> {
        self.schedule.after(&after).next()
    }
}

fn normalize(expression: &str) -> String {
    let fields = expression.split_whitespace().count();
    if fields == 5 {
        format!("0 {expression}")
    } else {
        expression.to_string()
    }
}

/// Parse every configured expression independently. Invalid ones are logged
/// and skipped; the caller decides whether an empty result is fatal.
pub fn parse_cron_list(expressions: &[String]) -> Vec<CronJob> {
    let mut jobs = Vec::new();
    for expression in expressions {
        match CronJob::parse(expression) {
            Ok(job) => jobs.push(job),
            Err(err) => error!("{err}"),
        }
    }
    jobs
}
