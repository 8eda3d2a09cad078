use std::collections::BTreeMap;

use chrono::{DateTime, Local};
use serde::Serialize;

use crate::core::monitor::metrics::{DiskSnapshot, SystemSnapshot};

use super::templates::{substitute, EventKind, StyleSheet};

/// Platform limit on the character length of a single embed field value.
pub const MAX_FIELD_CHARS: usize = 1000;

#[derive(Debug, Clone, Serialize)]
pub struct EmbedField {
    pub name: String,
    pub value: String,
    pub inline: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct EmbedFooter {
    pub text: String,
}

/// Structured notification payload for one dispatched event.
#[derive(Debug, Clone, Serialize)]
pub struct Embed {
    pub title: String,
    pub description: String,
    pub color: u32,
    pub fields: Vec<EmbedField>,
    pub timestamp: String,
    pub footer: EmbedFooter,
}

/// Format a metric the way the templates expect: whole values keep one
/// decimal (`16.0`), fractional values print their shortest form (`21.93`).
pub fn fmt_num(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{value:.1}")
    } else {
        format!("{value}")
    }
}

/// Placeholder context shared by titles and descriptions. Every key is
/// always present so templates degrade to defaults instead of failing.
pub fn build_context(
    snapshot: &SystemSnapshot,
    cron_display: &str,
) -> BTreeMap<&'static str, String> {
    let timestamp_local = DateTime::parse_from_rfc3339(&snapshot.timestamp_iso)
        .map(|ts| ts.with_timezone(&Local))
        .unwrap_or_else(|_| Local::now())
        .format("%Y-%m-%d %H:%M:%S %Z")
        .to_string();

    let mut context = BTreeMap::new();
    context.insert("hostname", snapshot.hostname.clone());
    context.insert("timestamp_iso", snapshot.timestamp_iso.clone());
    context.insert("timestamp_local", timestamp_local);
    context.insert("cron_expression", cron_display.to_string());
    context.insert("cpu_percent", fmt_num(snapshot.cpu.cpu_percent));
    context.insert("load_1", fmt_num(snapshot.cpu.load_1));
    context.insert("load_5", fmt_num(snapshot.cpu.load_5));
    context.insert("load_15", fmt_num(snapshot.cpu.load_15));
    context.insert("memory_percent", fmt_num(snapshot.memory.memory_percent));
    context.insert("memory_used_gb", fmt_num(snapshot.memory.memory_used_gb));
    context.insert("memory_total_gb", fmt_num(snapshot.memory.memory_total_gb));
    let uptime = snapshot.uptime.uptime_human.clone();
    context.insert(
        "uptime_human",
        if uptime.is_empty() {
            "n/a".to_string()
        } else {
            uptime
        },
    );
    context
}

/// Split text into chunks of at most `limit` characters. Boundaries are
/// exact character counts and may fall mid-line.
pub fn chunk_text(text: &str, limit: usize) -> Vec<String> {
    let mut chunks = Vec::new();
    let mut current = String::new();
    let mut count = 0;
    for ch in text.chars() {
        if count == limit {
            chunks.push(std::mem::take(&mut current));
            count = 0;
        }
        current.push(ch);
        count += 1;
    }
    if !current.is_empty() {
        chunks.push(current);
    }
    chunks
}

/// One field per chunk of the disk listing; an empty inventory still gets a
/// field so the notification reads complete.
pub fn build_disk_fields(disks: &[DiskSnapshot]) -> Vec<EmbedField> {
    if disks.is_empty() {
        return vec![EmbedField {
            name: "Disks".to_string(),
            value: "No eligible disks".to_string(),
            inline: false,
        }];
    }

    let listing = disks
        .iter()
        .map(|disk| {
            format!(
                "{} ({}): {}% used ({}/{} GiB)",
                disk.mount_point,
                disk.filesystem,
                fmt_num(disk.used_percent),
                fmt_num(disk.used_gb),
                fmt_num(disk.total_gb),
            )
        })
        .collect::<Vec<_>>()
        .join("\n");

    chunk_text(&listing, MAX_FIELD_CHARS)
        .into_iter()
        .enumerate()
        .map(|(index, chunk)| EmbedField {
            name: if index == 0 {
                "Disks".to_string()
            } else {
                format!("Disks ({})", index + 1)
            },
            value: chunk,
            inline: false,
        })
        .collect()
}

/// Render a snapshot into the embed payload for one event.
pub fn render(
    event: EventKind,
    snapshot: &SystemSnapshot,
    styles: &StyleSheet,
    cron_display: &str,
) -> Embed {
    let style = styles.style(event);
    let context = build_context(snapshot, cron_display);

    let mut fields = vec![
        EmbedField {
            name: "CPU".to_string(),
            value: format!(
                "Usage: {}%\nLoad: {} / {} / {}",
                fmt_num(snapshot.cpu.cpu_percent),
                fmt_num(snapshot.cpu.load_1),
                fmt_num(snapshot.cpu.load_5),
                fmt_num(snapshot.cpu.load_15),
            ),
            inline: true,
        },
        EmbedField {
            name: "Memory".to_string(),
            value: format!(
                "Usage: {}%\n{}/{} GiB",
                fmt_num(snapshot.memory.memory_percent),
                fmt_num(snapshot.memory.memory_used_gb),
                fmt_num(snapshot.memory.memory_total_gb),
            ),
            inline: true,
        },
        EmbedField {
            name: "Uptime".to_string(),
            value: snapshot.uptime.uptime_human.clone(),
            inline: true,
        },
        EmbedField {
            name: "Cron".to_string(),
            value: format!("`{cron_display}`"),
            inline: false,
        },
    ];
    fields.extend(build_disk_fields(&snapshot.disks));

    Embed {
        title: substitute(&style.title, &context),
        description: substitute(&style.description, &context),
        color: style.color,
        fields,
        timestamp: snapshot.timestamp_iso.clone(),
        footer: EmbedFooter {
            text: format!("moncord v{}", env!("CARGO_PKG_VERSION")),
        },
    }
}
