use std::thread;
use std::time::Duration;

use chrono::{DateTime, Utc};
use sysinfo::{CpuRefreshKind, MemoryRefreshKind, RefreshKind, System};

use crate::core::config::Config;

use super::disks::build_disk_snapshots;
use super::metrics::{bytes_to_gb, round2, CpuStats, MemoryStats, SystemSnapshot, UptimeStats};
use super::mounts::read_mount_table;

/// Blocking window for the instantaneous CPU usage measurement.
const CPU_SAMPLE_WINDOW: Duration = Duration::from_millis(250);

/// Capture one complete snapshot of the monitored host. Side-effect-free
/// apart from reading OS counters; sub-probes that are unavailable on the
/// current platform degrade to zero values.
pub fn capture_snapshot(config: &Config) -> SystemSnapshot {
    let refresh_kind = RefreshKind::nothing()
        .with_cpu(CpuRefreshKind::everything())
        .with_memory(MemoryRefreshKind::everything());
    let mut system = System::new_with_specifics(refresh_kind);

    let entries = read_mount_table(&config.host_root_path);
    let disks = build_disk_snapshots(
        &entries,
        &config.host_root_path,
        &config.disk_include,
        &config.disk_exclude,
    );

    SystemSnapshot {
        cpu: capture_cpu_stats(&mut system),
        memory: capture_memory_stats(&system),
        uptime: capture_uptime_stats(),
        hostname: resolve_hostname(config),
        timestamp_iso: Utc::now().to_rfc3339(),
        disks,
    }
}

/// CPU usage needs two refreshes separated by a short window to yield a
/// non-zero instantaneous value.
pub fn capture_cpu_stats(system: &mut System) -> CpuStats {
    system.refresh_cpu_all();
    thread::sleep(CPU_SAMPLE_WINDOW.max(sysinfo::MINIMUM_CPU_UPDATE_INTERVAL));
    system.refresh_cpu_all();

    let load = System::load_average();
    CpuStats {
        cpu_percent: round2(f64::from(system.global_cpu_usage())),
        load_1: round2(load.one),
        load_5: round2(load.five),
        load_15: round2(load.fifteen),
    }
}

pub fn capture_memory_stats(system: &System) -> MemoryStats {
    let total = system.total_memory();
    let used = system.used_memory();
    let available = system.available_memory();
    let (buffers, cached) = read_cache_counters();

    let percent = if total > 0 {
        round2((total.saturating_sub(available)) as f64 / total as f64 * 100.0)
    } else {
        0.0
    };

    MemoryStats {
        memory_percent: percent,
        memory_used_gb: bytes_to_gb(used),
        memory_total_gb: bytes_to_gb(total),
        memory_available_gb: bytes_to_gb(available),
        memory_buffers_gb: bytes_to_gb(buffers),
        memory_cached_gb: bytes_to_gb(cached),
        memory_cache_gb: bytes_to_gb(buffers + cached),
    }
}

/// Buffer/cache counters exist only on Linux; elsewhere they read as zero.
#[cfg(target_os = "linux")]
fn read_cache_counters() -> (u64, u64) {
    let content = match std::fs::read_to_string("/proc/meminfo") {
        Ok(content) => content,
        Err(_) => return (0, 0),
    };
    (
        meminfo_bytes(&content, "Buffers:"),
        meminfo_bytes(&content, "Cached:"),
    )
}

#[cfg(not(target_os = "linux"))]
fn read_cache_counters() -> (u64, u64) {
    (0, 0)
}

#[cfg(target_os = "linux")]
fn meminfo_bytes(content: &str, key: &str) -> u64 {
    content
        .lines()
        .find(|line| line.starts_with(key))
        .and_then(|line| line.split_whitespace().nth(1))
        .and_then(|value| value.parse::<u64>().ok())
        .map(|kb| kb * 1024)
        .unwrap_or(0)
}

pub fn capture_uptime_stats() -> UptimeStats {
    let boot: DateTime<Utc> =
        DateTime::from_timestamp(System::boot_time() as i64, 0).unwrap_or_default();
    let now = Utc::now();
    let uptime_seconds = (now - boot).num_seconds().max(0);

    let days = uptime_seconds / 86_400;
    let hours = (uptime_seconds % 86_400) / 3_600;
    let minutes = (uptime_seconds % 3_600) / 60;
    let uptime_human = if days > 0 {
        format!("{days}d {hours}h {minutes}m")
    } else {
        format!("{hours}h {minutes}m")
    };

    UptimeStats {
        boot_time_iso: boot.to_rfc3339(),
        uptime_seconds: uptime_seconds as f64,
        uptime_human,
    }
}

pub fn resolve_hostname(config: &Config) -> String {
    config
        .host_label
        .clone()
        .or_else(System::host_name)
        .unwrap_or_else(|| "unknown".to_string())
}
