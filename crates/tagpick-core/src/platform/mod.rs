#[cfg(target_os = "windows")]
pub mod windows;

use std::ffi::OsString;
use std::path::{Component, Path, PathBuf};

use crate::volume::Volume;

#[cfg(target_os = "windows")]
pub fn get_drive_letter(path: &Path) -> Option<OsString> {
    windows::get_drive_letter(path)
}

#[cfg(not(target_os = "windows"))]
pub fn get_drive_letter(_path: &Path) -> Option<OsString> {
    None
}

#[cfg(target_os = "windows")]
pub fn list_volumes() -> Vec<Volume> {
    windows::list_volumes()
}

/// Block-device mounts from `/proc/mounts`. Pseudo filesystems are skipped.
#[cfg(not(target_os = "windows"))]
pub fn list_volumes() -> Vec<Volume> {
    match std::fs::read_to_string("/proc/mounts") {
        Ok(mounts) => parse_mounts(&mounts),
        Err(e) => {
            tracing::warn!("Cannot enumerate volumes from /proc/mounts: {}", e);
            Vec::new()
        }
    }
}

#[cfg_attr(target_os = "windows", allow(dead_code))]
fn parse_mounts(mounts: &str) -> Vec<Volume> {
    let mut volumes: Vec<Volume> = Vec::new();
    for line in mounts.lines() {
        let mut fields = line.split_whitespace();
        let (Some(source), Some(target)) = (fields.next(), fields.next()) else {
            continue;
        };
        if !source.starts_with("/dev/") {
            continue;
        }
        // Octal escapes for spaces in mount points.
        let target = target.replace("\\040", " ");
        if volumes.iter().any(|v| v.root == Path::new(&target)) {
            continue;
        }
        let label = Path::new(&target)
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| "root".to_string());
        volumes.push(Volume::new(target, label));
    }
    volumes
}

/// Strip drive prefixes and the root separator, leaving a relative path.
pub fn get_path_without_root(path: &Path) -> PathBuf {
    let without_root = path
        .components()
        .skip_while(|comp| matches!(comp, Component::Prefix(_) | Component::RootDir));

    let mut result_path = PathBuf::new();
    for component in without_root {
        result_path.push(component.as_os_str());
    }
    result_path
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_path_without_root() {
        let rel = get_path_without_root(Path::new("/films/2001/a.mp4"));
        assert_eq!(rel, PathBuf::from("films").join("2001").join("a.mp4"));
    }

    #[test]
    fn test_parse_mounts_keeps_block_devices() {
        let mounts = "\
/dev/sda1 / ext4 rw,relatime 0 0
proc /proc proc rw,nosuid 0 0
tmpfs /run tmpfs rw 0 0
/dev/sdb1 /media/My\\040Films vfat rw 0 0
/dev/sda1 / ext4 rw,relatime 0 0
";
        let volumes = parse_mounts(mounts);
        assert_eq!(volumes.len(), 2);
        assert_eq!(volumes[0].label, "root");
        assert_eq!(volumes[1].root, PathBuf::from("/media/My Films"));
        assert_eq!(volumes[1].label, "My Films");
    }
}
