use std::collections::HashSet;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::{Path, PathBuf};

use log::{debug, warn};

/// Filesystem types that never represent addressable storage.
const PSEUDO_FS_TYPES: &[&str] = &[
    "proc",
    "sysfs",
    "devtmpfs",
    "tmpfs",
    "devpts",
    "overlay",
    "squashfs",
    "mqueue",
    "hugetlbfs",
    "cgroup",
    "cgroup2",
    "autofs",
    "fusectl",
    "tracefs",
    "binfmt_misc",
    "efivarfs",
    "bpf",
    "pstore",
    "configfs",
    "debugfs",
    "securityfs",
];

/// One filesystem attachment point as read from a mount table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MountEntry {
    pub device: String,
    pub mount_point: String,
    pub fs_type: String,
}

/// Which on-disk table layout a candidate source uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableFormat {
    /// Classic `/proc/mounts`: `device mountpoint fstype ...`
    Mounts,
    /// `/proc/<pid>/mountinfo`: mount point at field 4, fstype and source
    /// trailing after the optional-fields separator.
    MountInfo,
}

/// A single candidate mount-table source tried during discovery.
#[derive(Debug, Clone)]
pub struct MountSource {
    pub path: PathBuf,
    pub format: TableFormat,
    /// True for the `<host_root>/proc/mounts` candidate; the other sources
    /// log which table ended up being used.
    pub host_root: bool,
}

fn is_pseudo_fs(fs_type: &str) -> bool {
    PSEUDO_FS_TYPES.contains(&fs_type)
}

/// Undo the octal escaping mountinfo applies to spaces and tabs inside the
/// mount-point field.
fn decode_mount_field(value: &str) -> String {
    value.replace("\\040", " ").replace("\\011", "\t")
}

/// Parse a classic mounts table. Short lines are skipped, duplicate
/// (device, mount point) pairs keep their first occurrence, pseudo
/// filesystems are dropped.
pub fn parse_mounts_table<R: BufRead>(reader: R) -> Vec<MountEntry> {
    let mut entries = Vec::new();
    let mut seen = HashSet::new();

    for line in reader.lines().map_while(Result::ok) {
        let parts: Vec<&str> = line.split_whitespace().collect();
        if parts.len() < 3 {
            continue;
        }
        let (device, mount_point, fs_type) = (parts[0], parts[1], parts[2]);
        if !seen.insert(format!("{device}:{mount_point}")) {
            continue;
        }
        if is_pseudo_fs(fs_type) {
            continue;
        }
        entries.push(MountEntry {
            device: device.to_string(),
            mount_point: mount_point.to_string(),
            fs_type: fs_type.to_string(),
        });
    }
    entries
}

/// Parse a mountinfo table. The mount point sits at field index 4 and uses
/// octal escapes; filesystem type and source trail the separator as the
/// third- and second-from-last fields.
pub fn parse_mountinfo_table<R: BufRead>(reader: R) -> Vec<MountEntry> {
    let mut entries = Vec::new();
    let mut seen = HashSet::new();

    for line in reader.lines().map_while(Result::ok) {
        let parts: Vec<&str> = line.split_whitespace().collect();
        if parts.len() < 10 {
            continue;
        }
        let mount_point = decode_mount_field(parts[4]);
        let fs_type = parts[parts.len() - 3];
        let source = parts[parts.len() - 2];
        if !seen.insert(format!("{source}:{mount_point}")) {
            continue;
        }
        if is_pseudo_fs(fs_type) {
            continue;
        }
        entries.push(MountEntry {
            device: source.to_string(),
            mount_point,
            fs_type: fs_type.to_string(),
        });
    }
    entries
}

/// Try candidate sources in order and return the first non-empty parse.
/// Missing files are skipped silently, unreadable ones with a warning; an
/// exhausted list yields an empty table and a single warning.
pub fn read_from_sources(sources: &[MountSource]) -> Vec<MountEntry> {
    for source in sources {
        let file = match File::open(&source.path) {
            Ok(file) => file,
            Err(err) if err.kind() == io::ErrorKind::NotFound => continue,
            Err(err) if err.kind() == io::ErrorKind::PermissionDenied => {
                warn!(
                    "Insufficient permission to read mount table {}",
                    source.path.display()
                );
                continue;
            }
            Err(err) => {
                warn!(
                    "Failed to open mount table {}: {}",
                    source.path.display(),
                    err
                );
                continue;
            }
        };

        let reader = BufReader::new(file);
        let entries = match source.format {
            TableFormat::Mounts => parse_mounts_table(reader),
            TableFormat::MountInfo => parse_mountinfo_table(reader),
        };

        if !entries.is_empty() {
            if !source.host_root {
                debug!(
                    "Using mount table {} for disk metrics",
                    source.path.display()
                );
            }
            return entries;
        }
    }

    warn!("No accessible mount tables found; disk metrics will be empty");
    Vec::new()
}

/// Discover the host's mount table from inside the container.
/// Never fails; total failure is an empty table.
pub fn read_mount_table(host_root: &Path) -> Vec<MountEntry> {
    let candidates = [
        MountSource {
            path: host_root.join("proc/mounts"),
            format: TableFormat::Mounts,
            host_root: true,
        },
        MountSource {
            path: PathBuf::from("/proc/1/mountinfo"),
            format: TableFormat::MountInfo,
            host_root: false,
        },
        MountSource {
            path: PathBuf::from("/proc/mounts"),
            format: TableFormat::Mounts,
            host_root: false,
        },
    ];
    read_from_sources(&candidates)
}
