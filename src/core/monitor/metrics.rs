use serde::Serialize;

const GIB: f64 = (1024u64 * 1024 * 1024) as f64;

/// Complete point-in-time snapshot of the monitored host.
/// Built once per sampling cycle and consumed exactly once by the renderer.
#[derive(Debug, Clone, Serialize)]
pub struct SystemSnapshot {
    pub cpu: CpuStats,
    pub memory: MemoryStats,
    pub uptime: UptimeStats,
    pub hostname: String,
    pub timestamp_iso: String,
    pub disks: Vec<DiskSnapshot>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct CpuStats {
    pub cpu_percent: f64,
    pub load_1: f64,
    pub load_5: f64,
    pub load_15: f64,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct MemoryStats {
    pub memory_percent: f64,
    pub memory_used_gb: f64,
    pub memory_total_gb: f64,
    pub memory_available_gb: f64,
    pub memory_buffers_gb: f64,
    pub memory_cached_gb: f64,
    pub memory_cache_gb: f64,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct UptimeStats {
    pub boot_time_iso: String,
    pub uptime_seconds: f64,
    pub uptime_human: String,
}

/// Usage of a single host filesystem. `mount_point` holds the host's logical
/// path, already stripped of any container-side root prefix.
#[derive(Debug, Clone, Serialize)]
pub struct DiskSnapshot {
    pub device: String,
    pub mount_point: String,
    pub filesystem: String,
    pub total_gb: f64,
    pub used_gb: f64,
    pub free_gb: f64,
    pub used_percent: f64,
}

pub fn bytes_to_gb(bytes: u64) -> f64 {
    round2(bytes as f64 / GIB)
}

pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
