use std::ffi::{OsStr, OsString};
use std::os::windows::ffi::{OsStrExt, OsStringExt};
use std::path::{Component, Path};
use std::ptr::null_mut;

use winapi::shared::minwindef::{DWORD, MAX_PATH};
use winapi::um::fileapi::{GetLogicalDrives, GetVolumeInformationW};

use crate::volume::Volume;

pub fn get_drive_letter(path: &Path) -> Option<OsString> {
    for component in path.components() {
        if let Component::Prefix(prefix_comp) = component {
            match prefix_comp.kind() {
                std::path::Prefix::Disk(letter) | std::path::Prefix::VerbatimDisk(letter) => {
                    let drive_letter = (letter as char).to_string();
                    return Some(OsString::from(drive_letter));
                }
                _ => (),
            }
        }
    }
    None
}

pub fn list_volumes() -> Vec<Volume> {
    let mask = unsafe { GetLogicalDrives() };
    (0..26u32)
        .filter(|bit| mask & (1u32 << *bit) != 0)
        .map(|bit| {
            let root = format!("{}:\\", (b'A' + bit as u8) as char);
            let label = volume_label(&root).unwrap_or_default();
            Volume::new(root, label)
        })
        .collect()
}

fn volume_label(root: &str) -> Option<String> {
    let wide_root: Vec<u16> = OsStr::new(root).encode_wide().chain(Some(0)).collect();
    let mut name = [0u16; MAX_PATH + 1];
    let ok = unsafe {
        GetVolumeInformationW(
            wide_root.as_ptr(),
            name.as_mut_ptr(),
            name.len() as DWORD,
            null_mut(),
            null_mut(),
            null_mut(),
            null_mut(),
            0,
        )
    };
    if ok == 0 {
        return None;
    }
    let len = name.iter().position(|&c| c == 0).unwrap_or(name.len());
    Some(OsString::from_wide(&name[..len]).to_string_lossy().into_owned())
}
