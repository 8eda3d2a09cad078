use moncord::core::monitor::metrics::{
    CpuStats, DiskSnapshot, MemoryStats, SystemSnapshot, UptimeStats,
};
use moncord::core::notify::embed::{build_disk_fields, chunk_text, fmt_num, render};
use moncord::core::notify::templates::{EventKind, StyleSheet};

fn snapshot() -> SystemSnapshot {
    SystemSnapshot {
        cpu: CpuStats {
            cpu_percent: 12.5,
            load_1: 0.42,
            load_5: 0.37,
            load_15: 0.31,
        },
        memory: MemoryStats {
            memory_percent: 21.9,
            memory_used_gb: 3.5,
            memory_total_gb: 16.0,
            memory_available_gb: 12.5,
            memory_buffers_gb: 0.25,
            memory_cached_gb: 1.75,
            memory_cache_gb: 2.0,
        },
        uptime: UptimeStats {
            boot_time_iso: "2026-08-01T00:00:00+00:00".to_string(),
            uptime_seconds: 445_500.0,
            uptime_human: "5d 3h 45m".to_string(),
        },
        hostname: "testhost".to_string(),
        timestamp_iso: "2026-08-06T12:00:00+00:00".to_string(),
        disks: Vec::new(),
    }
}

fn disk(mount_point: &str) -> DiskSnapshot {
    DiskSnapshot {
        device: "/dev/sda1".to_string(),
        mount_point: mount_point.to_string(),
        filesystem: "ext4".to_string(),
        total_gb: 100.0,
        used_gb: 42.5,
        free_gb: 57.5,
        used_percent: 42.5,
    }
}

#[test]
fn test_fmt_num_python_float_style() {
    assert_eq!(fmt_num(21.9), "21.9");
    assert_eq!(fmt_num(21.93), "21.93");
    assert_eq!(fmt_num(16.0), "16.0");
    assert_eq!(fmt_num(0.0), "0.0");
}

#[test]
fn test_memory_field_format() {
    let embed = render(
        EventKind::Heartbeat,
        &snapshot(),
        &StyleSheet::default(),
        "0 * * * *",
    );

    let memory = embed
        .fields
        .iter()
        .find(|field| field.name == "Memory")
        .expect("memory field present");
    assert_eq!(memory.value, "Usage: 21.9%\n3.5/16.0 GiB");
    assert!(memory.inline);
}

#[test]
fn test_field_order_is_fixed() {
    let embed = render(
        EventKind::Heartbeat,
        &snapshot(),
        &StyleSheet::default(),
        "0 * * * *",
    );

    let names: Vec<&str> = embed.fields.iter().map(|f| f.name.as_str()).collect();
    assert_eq!(names, vec!["CPU", "Memory", "Uptime", "Cron", "Disks"]);
}

#[test]
fn test_cron_field_is_code_formatted_block() {
    let embed = render(
        EventKind::Heartbeat,
        &snapshot(),
        &StyleSheet::default(),
        "*/5 * * * *",
    );

    let cron = embed
        .fields
        .iter()
        .find(|field| field.name == "Cron")
        .expect("cron field present");
    assert_eq!(cron.value, "`*/5 * * * *`");
    assert!(!cron.inline);
}

#[test]
fn test_empty_disk_list_renders_placeholder_field() {
    let embed = render(
        EventKind::Heartbeat,
        &snapshot(),
        &StyleSheet::default(),
        "0 * * * *",
    );

    let disk_fields: Vec<_> = embed
        .fields
        .iter()
        .filter(|field| field.name.starts_with("Disks"))
        .collect();
    assert_eq!(disk_fields.len(), 1);
    assert_eq!(disk_fields[0].value, "No eligible disks");
}

#[test]
fn test_chunk_text_exact_boundaries() {
    let text = "x".repeat(2500);
    let chunks = chunk_text(&text, 1000);

    assert_eq!(chunks.len(), 3);
    assert_eq!(chunks[0].chars().count(), 1000);
    assert_eq!(chunks[1].chars().count(), 1000);
    assert_eq!(chunks[2].chars().count(), 500);
}

#[test]
fn test_chunk_text_short_input_single_chunk() {
    let chunks = chunk_text("short", 1000);
    assert_eq!(chunks, vec!["short".to_string()]);
}

#[test]
fn test_disk_fields_chunk_naming() {
    // Enough disks that the listing spans three fields
    let disks: Vec<DiskSnapshot> = (0..60)
        .map(|i| disk(&format!("/very/long/mount/point/number/{i:04}")))
        .collect();

    let fields = build_disk_fields(&disks);

    assert!(fields.len() >= 3, "expected multiple chunks");
    assert_eq!(fields[0].name, "Disks");
    assert_eq!(fields[1].name, "Disks (2)");
    assert_eq!(fields[2].name, "Disks (3)");
    for field in &fields {
        assert!(field.value.chars().count() <= 1000);
    }
}

#[test]
fn test_disk_line_format() {
    let fields = build_disk_fields(&[disk("/data")]);

    assert_eq!(fields.len(), 1);
    assert_eq!(fields[0].value, "/data (ext4): 42.5% used (42.5/100.0 GiB)");
}

#[test]
fn test_description_substitutes_hostname() {
    let embed = render(
        EventKind::Startup,
        &snapshot(),
        &StyleSheet::default(),
        "0 * * * *",
    );

    assert!(embed.description.contains("**testhost**"));
    assert!(embed.description.contains("`0 * * * *`"));
    assert!(embed.description.contains("5d 3h 45m"));
}

#[test]
fn test_embed_carries_snapshot_timestamp() {
    let embed = render(
        EventKind::Shutdown,
        &snapshot(),
        &StyleSheet::default(),
        "0 * * * *",
    );

    assert_eq!(embed.timestamp, "2026-08-06T12:00:00+00:00");
    assert!(embed.footer.text.starts_with("moncord v"));
}
