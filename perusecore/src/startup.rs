//! First-run folder heuristic.
//!
//! When no valid settings document exists the browser has to point
//! somewhere. Probe the usual picture folders under the home directory;
//! if neither holds a matching image, create them and seed
//! `Pictures/Saved Pictures` from the bundled sample images.
//!
//! Every filesystem step is best-effort: a failed directory creation gives
//! up on the whole heuristic, but one sample file failing to copy does not
//! stop the rest.

use crate::extensions::ExtensionSet;
use crate::scan;
use log::{debug, warn};
use std::fs;
use std::path::{Path, PathBuf};

/// Name of the bundled sample-image folder, shipped next to the executable.
pub const SAMPLE_IMAGES_DIR: &str = "sample_images";

/// Folder the bundled samples live in: the nearest ancestor of the
/// executable that contains [`SAMPLE_IMAGES_DIR`], falling back to the
/// working directory.
pub fn install_dir() -> PathBuf {
    if let Ok(exe) = std::env::current_exe() {
        let mut dir = exe.as_path();
        for _ in 0..5 {
            dir = match dir.parent() {
                Some(parent) => parent,
                None => break,
            };
            if dir.join(SAMPLE_IMAGES_DIR).is_dir() {
                return dir.to_path_buf();
            }
        }
    }
    PathBuf::from(".")
}

/// Startup image folder for a first run, or `None` when the home directory
/// is unavailable or the fallback folders cannot be created.
pub fn pick_startup_folder(rules: &ExtensionSet, install_dir: &Path) -> Option<PathBuf> {
    let home = directories::BaseDirs::new()?.home_dir().to_path_buf();
    pick_startup_folder_in(&home, rules, install_dir)
}

/// Same heuristic against an explicit home directory.
pub fn pick_startup_folder_in(
    home: &Path,
    rules: &ExtensionSet,
    install_dir: &Path,
) -> Option<PathBuf> {
    let pictures = home.join("Pictures");
    let saved = pictures.join("Saved Pictures");

    let saved_existed = saved.is_dir();
    if saved_existed && !scan::list_images(&saved, rules).is_empty() {
        debug!("startup folder: {}", saved.display());
        return Some(saved);
    }

    if pictures.is_dir() {
        if !scan::list_images(&pictures, rules).is_empty() {
            debug!("startup folder: {}", pictures.display());
            return Some(pictures);
        }
    } else if let Err(err) = fs::create_dir(&pictures) {
        warn!("cannot create {}: {}", pictures.display(), err);
        return None;
    }

    if !saved_existed {
        if let Err(err) = fs::create_dir(&saved) {
            warn!("cannot create {}: {}", saved.display(), err);
            return None;
        }
    }

    // Seed with whatever samples we can copy; failures are logged and the
    // folder is used either way.
    let samples = install_dir.join(SAMPLE_IMAGES_DIR);
    for name in scan::list_images(&samples, rules) {
        let from = samples.join(&name);
        let to = saved.join(&name);
        match fs::copy(&from, &to) {
            Ok(_) => debug!("copied sample {}", name),
            Err(err) => warn!("cannot copy sample {}: {}", name, err),
        }
    }

    debug!("startup folder: {}", saved.display());
    Some(saved)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;

    fn rules() -> ExtensionSet {
        let mut set = ExtensionSet::new();
        set.insert("jpg", false);
        set
    }

    #[test]
    fn test_prefers_saved_pictures_with_matches() {
        let home = tempfile::tempdir().unwrap();
        let saved = home.path().join("Pictures").join("Saved Pictures");
        fs::create_dir_all(&saved).unwrap();
        File::create(saved.join("one.jpg")).unwrap();
        // Pictures itself also has a match; Saved Pictures still wins.
        File::create(home.path().join("Pictures").join("two.jpg")).unwrap();

        let install = tempfile::tempdir().unwrap();
        let picked = pick_startup_folder_in(home.path(), &rules(), install.path());
        assert_eq!(picked, Some(saved));
    }

    #[test]
    fn test_existing_folder_is_not_reseeded() {
        let home = tempfile::tempdir().unwrap();
        let saved = home.path().join("Pictures").join("Saved Pictures");
        fs::create_dir_all(&saved).unwrap();
        File::create(saved.join("mine.jpg")).unwrap();

        let install = tempfile::tempdir().unwrap();
        let samples = install.path().join(SAMPLE_IMAGES_DIR);
        fs::create_dir(&samples).unwrap();
        File::create(samples.join("sample.jpg")).unwrap();

        pick_startup_folder_in(home.path(), &rules(), install.path()).unwrap();
        assert!(!saved.join("sample.jpg").exists());
    }

    #[test]
    fn test_falls_back_to_pictures_with_matches() {
        let home = tempfile::tempdir().unwrap();
        let pictures = home.path().join("Pictures");
        fs::create_dir(&pictures).unwrap();
        File::create(pictures.join("pic.jpg")).unwrap();

        let install = tempfile::tempdir().unwrap();
        let picked = pick_startup_folder_in(home.path(), &rules(), install.path());
        assert_eq!(picked, Some(pictures));
    }

    #[test]
    fn test_creates_and_seeds_when_nothing_exists() {
        let home = tempfile::tempdir().unwrap();
        let install = tempfile::tempdir().unwrap();
        let samples = install.path().join(SAMPLE_IMAGES_DIR);
        fs::create_dir(&samples).unwrap();
        File::create(samples.join("sample.jpg")).unwrap();
        File::create(samples.join("notes.txt")).unwrap();

        let picked = pick_startup_folder_in(home.path(), &rules(), install.path()).unwrap();
        let saved = home.path().join("Pictures").join("Saved Pictures");
        assert_eq!(picked, saved);
        assert!(saved.join("sample.jpg").exists());
        assert!(!saved.join("notes.txt").exists());
    }

    #[test]
    fn test_missing_samples_still_yields_folder() {
        let home = tempfile::tempdir().unwrap();
        let install = tempfile::tempdir().unwrap();

        let picked = pick_startup_folder_in(home.path(), &rules(), install.path()).unwrap();
        assert!(picked.is_dir());
        assert!(scan::list_images(&picked, &rules()).is_empty());
    }
}
