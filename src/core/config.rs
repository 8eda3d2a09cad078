use std::env;
use std::path::{Path, PathBuf};

use log::{info, warn};

use crate::error::{MoncordError, Result};

const DEFAULT_USERNAME: &str = "Moncord";
const DEFAULT_CRON: &str = "0 * * * *";
const DEFAULT_HOST_ROOT: &str = "/hostfs";

/// Per-event style overrides taken verbatim from the environment.
/// Merged into the compiled-in defaults once at startup.
#[derive(Debug, Clone, Default)]
pub struct StyleOverride {
    pub title: Option<String>,
    pub description: Option<String>,
    pub color: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct StyleOverrides {
    pub startup: StyleOverride,
    pub heartbeat: StyleOverride,
    pub shutdown: StyleOverride,
}

/// Immutable process-wide configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub webhook_url: String,
    pub username: String,
    pub avatar_url: Option<String>,
    /// Raw schedule value as configured, for display in templates.
    pub cron_display: String,
    /// Individual cron expressions split out of the raw value.
    pub cron_expressions: Vec<String>,
    pub host_label: Option<String>,
    pub host_root_path: PathBuf,
    pub disk_include: Vec<String>,
    pub disk_exclude: Vec<String>,
    pub overrides: StyleOverrides,
}

impl Config {
    /// Load configuration from process environment variables.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through an arbitrary key lookup. The seam exists
    /// so tests can feed synthetic environments without mutating process
    /// state.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let webhook_url = trimmed(&lookup, "DISCORD_WEBHOOK_URL").unwrap_or_default();
        if webhook_url.is_empty() {
            return Err(MoncordError::config(
                "DISCORD_WEBHOOK_URL environment variable is required",
            ));
        }

        let username =
            trimmed(&lookup, "DISCORD_USERNAME").unwrap_or_else(|| DEFAULT_USERNAME.to_string());
        let avatar_url = trimmed(&lookup, "DISCORD_AVATAR_URL");

        let cron_display =
            trimmed(&lookup, "MONITOR_CRON").unwrap_or_else(|| DEFAULT_CRON.to_string());
        let cron_expressions = parse_cron_entries(&cron_display);

        let host_label = trimmed(&lookup, "HOST_LABEL");
        let host_root_path = resolve_host_root(
            &trimmed(&lookup, "HOST_ROOT_PATH").unwrap_or_else(|| DEFAULT_HOST_ROOT.to_string()),
        );

        let disk_include = split_csv(lookup("DISK_INCLUDE"));
        let disk_exclude = split_csv(lookup("DISK_EXCLUDE"));

        let overrides = StyleOverrides {
            startup: style_override(&lookup, "STARTUP"),
            heartbeat: style_override(&lookup, "HEARTBEAT"),
            shutdown: style_override(&lookup, "SHUTDOWN"),
        };

        Ok(Config {
            webhook_url,
            username,
            avatar_url,
            cron_display,
            cron_expressions,
            host_label,
            host_root_path,
            disk_include,
            disk_exclude,
            overrides,
        })
    }
}

fn trimmed<F>(lookup: &F, key: &str) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(key)
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

fn style_override<F>(lookup: &F, event: &str) -> StyleOverride
where
    F: Fn(&str) -> Option<String>,
{
    StyleOverride {
        title: trimmed(lookup, &format!("TITLE_{event}")),
        description: trimmed(lookup, &format!("TEMPLATE_{event}")),
        color: trimmed(lookup, &format!("COLOR_{event}")),
    }
}

/// Split a raw schedule value into individual cron expressions.
/// Accepts semicolon- or newline-separated lists; falls back to the default
/// hourly schedule when nothing usable remains.
pub fn parse_cron_entries(raw_value: &str) -> Vec<String> {
    let fragments: Vec<String> = raw_value
        .replace(';', "\n")
        .lines()
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(str::to_string)
        .collect();

    if fragments.is_empty() {
        vec![DEFAULT_CRON.to_string()]
    } else {
        fragments
    }
}

pub fn split_csv(value: Option<String>) -> Vec<String> {
    value
        .map(|raw| {
            raw.split(',')
                .map(str::trim)
                .filter(|entry| !entry.is_empty())
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}

/// Pick the first existing host root out of the configured path and its
/// fallbacks. The container may not have the configured path mounted at all;
/// `/proc/1/root` and `/` are the usual escape hatches.
fn resolve_host_root(raw: &str) -> PathBuf {
    let explicit = PathBuf::from(raw);
    let mut candidates = vec![explicit.clone()];
    if explicit != Path::new("/proc/1/root") {
        candidates.push(PathBuf::from("/proc/1/root"));
    }
    if explicit != Path::new("/") {
        candidates.push(PathBuf::from("/"));
    }

    for candidate in candidates {
        if candidate.exists() {
            if candidate != explicit {
                info!(
                    "Host root {} not accessible; falling back to {}",
                    explicit.display(),
                    candidate.display()
                );
            }
            return candidate;
        }
    }

    warn!(
        "Could not resolve a valid host root path; using {}",
        explicit.display()
    );
    explicit
}
