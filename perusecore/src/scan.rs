//! Folder scanning.
//!
//! Listing never fails: a missing or unreadable folder is the same as an
//! empty one. A bad folder degrades to "no images shown", never an error.

use crate::extensions::ExtensionSet;
use log::debug;
use std::fs;
use std::path::Path;

/// File names (not paths) of the regular files directly inside `folder`
/// whose names match `rules`, in filesystem enumeration order.
///
/// The order is whatever the OS returns; callers must not assume it is
/// sorted.
pub fn list_images(folder: &Path, rules: &ExtensionSet) -> Vec<String> {
    let entries = match fs::read_dir(folder) {
        Ok(entries) => entries,
        Err(err) => {
            debug!("cannot read {}: {}", folder.display(), err);
            return Vec::new();
        }
    };

    entries
        .filter_map(|entry| entry.ok())
        .filter(|entry| {
            entry
                .file_type()
                .map(|ty| ty.is_file())
                .unwrap_or(false)
        })
        .filter_map(|entry| entry.file_name().into_string().ok())
        .filter(|name| rules.matches(name))
        .collect()
}
