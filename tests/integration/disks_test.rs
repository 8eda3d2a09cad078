use std::fs;
use std::path::Path;

use moncord::core::monitor::disks::{
    build_disk_snapshots, display_mount_point, probe_usage, resolve_host_path, should_include,
};
use moncord::core::monitor::mounts::MountEntry;
use tempfile::TempDir;

fn entry(device: &str, mount_point: &str, fs_type: &str) -> MountEntry {
    MountEntry {
        device: device.to_string(),
        mount_point: mount_point.to_string(),
        fs_type: fs_type.to_string(),
    }
}

#[test]
fn test_should_include_exclude_beats_include() {
    let include = vec!["/data".to_string()];
    let exclude = vec!["/data/tmp".to_string()];

    assert!(!should_include("/data/tmp/cache", &include, &exclude));
    assert!(should_include("/data/db", &include, &exclude));
    assert!(!should_include("/var", &include, &exclude));
}

#[test]
fn test_should_include_empty_include_accepts_everything() {
    assert!(should_include("/var", &[], &[]));
    assert!(!should_include("/var", &[], &["/var".to_string()]));
}

#[test]
fn test_resolve_host_path() {
    let root = Path::new("/hostfs");

    assert_eq!(resolve_host_path(root, "/"), Path::new("/hostfs"));
    assert_eq!(resolve_host_path(root, "/var"), Path::new("/hostfs/var"));
    assert_eq!(
        resolve_host_path(root, "/hostfs/var"),
        Path::new("/hostfs/var")
    );
}

#[test]
fn test_display_mount_point_strips_host_root() {
    let root = Path::new("/hostfs");

    assert_eq!(display_mount_point("/hostfs/var", root), "/var");
    assert_eq!(display_mount_point("/hostfs", root), "/");
    assert_eq!(display_mount_point("/data", root), "/data");
}

#[test]
fn test_build_snapshots_applies_filters() {
    let dir = TempDir::new().unwrap();
    for sub in ["data/db", "data/tmp/cache", "var"] {
        fs::create_dir_all(dir.path().join(sub)).unwrap();
    }

    let entries = vec![
        entry("/dev/sda1", "/data/db", "ext4"),
        entry("/dev/sda2", "/data/tmp/cache", "ext4"),
        entry("/dev/sda3", "/var", "ext4"),
    ];
    let include = vec!["/data".to_string()];
    let exclude = vec!["/data/tmp".to_string()];

    let snapshots = build_disk_snapshots(&entries, dir.path(), &include, &exclude);

    assert_eq!(snapshots.len(), 1);
    assert_eq!(snapshots[0].mount_point, "/data/db");
    assert_eq!(snapshots[0].filesystem, "ext4");
}

#[test]
fn test_build_snapshots_suppresses_duplicate_root() {
    let dir = TempDir::new().unwrap();
    let root_str = dir.path().to_string_lossy().to_string();

    // Raw table carries both the bare root and the translated host root
    let entries = vec![
        entry("/dev/sda1", "/", "ext4"),
        entry("/dev/sda1", &root_str, "ext4"),
    ];

    let snapshots = build_disk_snapshots(&entries, dir.path(), &[], &[]);

    assert_eq!(snapshots.len(), 1);
    assert_eq!(snapshots[0].mount_point, "/");
}

#[test]
fn test_build_snapshots_skips_missing_paths() {
    let dir = TempDir::new().unwrap();
    fs::create_dir_all(dir.path().join("present")).unwrap();

    let entries = vec![
        entry("/dev/sda1", "/present", "ext4"),
        entry("/dev/sda2", "/absent", "ext4"),
    ];

    let snapshots = build_disk_snapshots(&entries, dir.path(), &[], &[]);

    assert_eq!(snapshots.len(), 1);
    assert_eq!(snapshots[0].mount_point, "/present");
}

#[test]
fn test_build_snapshots_skips_non_directories() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("file"), b"not a mount").unwrap();

    let entries = vec![entry("/dev/sda1", "/file", "ext4")];
    let snapshots = build_disk_snapshots(&entries, dir.path(), &[], &[]);

    assert!(snapshots.is_empty());
}

#[test]
fn test_build_snapshots_sorted_by_display_path() {
    let dir = TempDir::new().unwrap();
    for sub in ["zeta", "alpha"] {
        fs::create_dir_all(dir.path().join(sub)).unwrap();
    }

    let entries = vec![
        entry("/dev/sdb1", "/zeta", "xfs"),
        entry("/dev/sda1", "/alpha", "ext4"),
    ];
    let snapshots = build_disk_snapshots(&entries, dir.path(), &[], &[]);

    let mounts: Vec<&str> = snapshots.iter().map(|s| s.mount_point.as_str()).collect();
    assert_eq!(mounts, vec!["/alpha", "/zeta"]);
}

#[test]
fn test_usage_totals_are_additive() {
    let dir = TempDir::new().unwrap();
    let usage = probe_usage(dir.path()).expect("statvfs on tempdir");

    assert_eq!(usage.total, usage.used + usage.free);

    fs::create_dir_all(dir.path().join("m")).unwrap();
    let entries = vec![entry("/dev/sda1", "/m", "ext4")];
    let snapshots = build_disk_snapshots(&entries, dir.path(), &[], &[]);

    assert_eq!(snapshots.len(), 1);
    let snap = &snapshots[0];
    assert!(snap.total_gb >= 0.0 && snap.used_gb >= 0.0 && snap.free_gb >= 0.0);
    assert!((snap.total_gb - (snap.used_gb + snap.free_gb)).abs() <= 0.01);
    assert!((0.0..=100.0).contains(&snap.used_percent));
}
