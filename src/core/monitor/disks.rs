use std::path::{Path, PathBuf};

use log::debug;
use nix::sys::statvfs::statvfs;

use super::metrics::{bytes_to_gb, round2, DiskSnapshot};
use super::mounts::MountEntry;

/// Raw usage figures for one probed path, in bytes.
#[derive(Debug, Clone, Copy)]
pub struct UsageProbe {
    pub total: u64,
    pub used: u64,
    pub free: u64,
}

/// Exclude beats include; an empty include list accepts everything.
pub fn should_include(mount_point: &str, include: &[String], exclude: &[String]) -> bool {
    if exclude.iter().any(|prefix| mount_point.starts_with(prefix)) {
        return false;
    }
    if include.is_empty() {
        return true;
    }
    include.iter().any(|prefix| mount_point.starts_with(prefix))
}

/// Map a mount point from the host's table to the path it is reachable at
/// inside the container.
pub fn resolve_host_path(root: &Path, mount_point: &str) -> PathBuf {
    let root_str = root.to_string_lossy();
    // Already host-relative if the table handed us a prefixed path
    if mount_point.starts_with(root_str.as_ref()) {
        return PathBuf::from(mount_point);
    }
    if mount_point == "/" {
        return root.to_path_buf();
    }
    root.join(mount_point.trim_start_matches('/'))
}

/// Strip the host root prefix so the user sees the host's logical path.
pub fn display_mount_point(mount_point: &str, root: &Path) -> String {
    let root_str = root.to_string_lossy();
    if mount_point.starts_with(root_str.as_ref()) && mount_point != root_str {
        let stripped = &mount_point[root_str.len()..];
        return if stripped.starts_with('/') {
            stripped.to_string()
        } else {
            format!("/{stripped}")
        };
    }
    if mount_point == root_str {
        return "/".to_string();
    }
    mount_point.to_string()
}

/// Query byte totals for a path. Free space is what an unprivileged caller
/// can still allocate, so total = used + free holds exactly.
pub fn probe_usage(path: &Path) -> Option<UsageProbe> {
    let stat = statvfs(path).ok()?;
    let frsize = stat.fragment_size() as u64;
    let total = stat.blocks() as u64 * frsize;
    let free = stat.blocks_available() as u64 * frsize;
    let used = total.saturating_sub(free);
    Some(UsageProbe { total, used, free })
}

/// Convert mount entries into per-mount usage snapshots, sorted by the
/// displayed mount point. Every failure is scoped to its own entry.
pub fn build_disk_snapshots(
    entries: &[MountEntry],
    host_root: &Path,
    include: &[String],
    exclude: &[String],
) -> Vec<DiskSnapshot> {
    let root_str = host_root.to_string_lossy().to_string();
    let root_prefix = format!("{root_str}/");

    // The bare root mount duplicates a translated host-root entry
    let has_hostfs_root = entries
        .iter()
        .any(|e| e.mount_point == root_str || e.mount_point.starts_with(&root_prefix));

    let mut snapshots = Vec::new();
    for entry in entries {
        if entry.mount_point == "/" && has_hostfs_root {
            debug!("Skipping root mount / because hostfs root is present");
            continue;
        }
        if !should_include(&entry.mount_point, include, exclude) {
            debug!(
                "Skipping mount {} due to include/exclude filters",
                entry.mount_point
            );
            continue;
        }

        let host_path = resolve_host_path(host_root, &entry.mount_point);
        if !host_path.exists() {
            debug!(
                "Skipping mount {} because {} does not exist",
                entry.mount_point,
                host_path.display()
            );
            continue;
        }
        if !host_path.is_dir() {
            debug!(
                "Skipping mount {} because {} is not a directory",
                entry.mount_point,
                host_path.display()
            );
            continue;
        }

        let usage = match probe_usage(&host_path) {
            Some(usage) => usage,
            None => {
                debug!("Skipping mount {} due to usage probe error", entry.mount_point);
                continue;
            }
        };

        let used_percent = if usage.total > 0 {
            round2(usage.used as f64 / usage.total as f64 * 100.0)
        } else {
            0.0
        };

        snapshots.push(DiskSnapshot {
            device: entry.device.clone(),
            mount_point: display_mount_point(&entry.mount_point, host_root),
            filesystem: entry.fs_type.clone(),
            total_gb: bytes_to_gb(usage.total),
            used_gb: bytes_to_gb(usage.used),
            free_gb: bytes_to_gb(usage.free),
            used_percent,
        });
    }

    snapshots.sort_by(|a, b| a.mount_point.cmp(&b.mount_point));
    snapshots
}
