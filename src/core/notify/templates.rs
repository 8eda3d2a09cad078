use std::collections::BTreeMap;

use log::warn;

use crate::core::config::{StyleOverride, StyleOverrides};

/// The three lifecycle events a notification can announce.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    Startup,
    Heartbeat,
    Shutdown,
}

impl EventKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            EventKind::Startup => "startup",
            EventKind::Heartbeat => "heartbeat",
            EventKind::Shutdown => "shutdown",
        }
    }
}

/// Title, description template and embed color for one event kind.
#[derive(Debug, Clone)]
pub struct EventStyle {
    pub title: String,
    pub description: String,
    pub color: u32,
}

const STARTUP_DEFAULT: (&str, &str, u32) = (
    "Monitoring online",
    ":white_check_mark: Monitoring online for **{hostname}** at {timestamp_local}\nCron schedule: `{cron_expression}`\nUptime: {uptime_human}",
    0x2ECC71,
);

const HEARTBEAT_DEFAULT: (&str, &str, u32) = (
    "Heartbeat report",
    ":satellite: Scheduled report for **{hostname}** at {timestamp_local}",
    0x3498DB,
);

const SHUTDOWN_DEFAULT: (&str, &str, u32) = (
    "Monitoring offline",
    ":octagonal_sign: Monitoring offline for **{hostname}** at {timestamp_local}\nLast uptime reading: {uptime_human}",
    0xE74C3C,
);

/// Per-event styles with configuration overrides already merged in.
#[derive(Debug, Clone)]
pub struct StyleSheet {
    startup: EventStyle,
    heartbeat: EventStyle,
    shutdown: EventStyle,
}

impl StyleSheet {
    pub fn with_overrides(overrides: &StyleOverrides) -> Self {
        StyleSheet {
            startup: merge(STARTUP_DEFAULT, &overrides.startup),
            heartbeat: merge(HEARTBEAT_DEFAULT, &overrides.heartbeat),
            shutdown: merge(SHUTDOWN_DEFAULT, &overrides.shutdown),
        }
    }

    pub fn style(&self, event: EventKind) -> &EventStyle {
        match event {
            EventKind::Startup => &self.startup,
            EventKind::Heartbeat => &self.heartbeat,
            EventKind::Shutdown => &self.shutdown,
        }
    }
}

impl Default for StyleSheet {
    fn default() -> Self {
        StyleSheet::with_overrides(&StyleOverrides::default())
    }
}

fn merge(default: (&str, &str, u32), over: &StyleOverride) -> EventStyle {
    let color = match over.color.as_deref() {
        Some(raw) => match parse_color(raw) {
            Some(color) => color,
            None => {
                warn!("Ignoring unparseable color override '{raw}'");
                default.2
            }
        },
        None => default.2,
    };

    EventStyle {
        title: over.title.clone().unwrap_or_else(|| default.0.to_string()),
        description: over
            .description
            .clone()
            .unwrap_or_else(|| default.1.to_string()),
        color,
    }
}

/// Parse a hex color code into the 24-bit RGB range. Accepts `#RRGGBB`,
/// `0xRRGGBB` and bare hex; values above 0xFFFFFF clamp down.
pub fn parse_color(raw: &str) -> Option<u32> {
    let hex = raw
        .trim()
        .trim_start_matches('#')
        .trim_start_matches("0x")
        .trim_start_matches("0X");
    if hex.is_empty() {
        return None;
    }
    u32::from_str_radix(hex, 16).ok().map(|v| v.min(0xFF_FF_FF))
}

/// Replace `{key}` placeholders from the context. Unknown placeholders stay
/// intact; substitution never fails.
pub fn substitute(template: &str, context: &BTreeMap<&'static str, String>) -> String {
    let mut rendered = template.to_string();
    for (key, value) in context {
        rendered = rendered.replace(&format!("{{{key}}}"), value);
    }
    rendered
}
