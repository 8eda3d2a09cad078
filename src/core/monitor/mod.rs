//! Host sampling: mount-table discovery, disk usage, CPU/memory/uptime.

pub mod collector;
pub mod disks;
pub mod metrics;
pub mod mounts;

pub use collector::capture_snapshot;
pub use disks::build_disk_snapshots;
pub use metrics::{CpuStats, DiskSnapshot, MemoryStats, SystemSnapshot, UptimeStats};
pub use mounts::{read_mount_table, MountEntry};
