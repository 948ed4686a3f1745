//! Per-user settings store.
//!
//! One JSON document per OS login name under the user config directory.
//! Validation is all-or-nothing by policy: a document missing any required
//! key, or carrying one of the wrong shape, is discarded entirely and the
//! full built-in defaults take its place. There is no partial-default
//! merging and no multi-process coordination; the last writer wins.
//!
//! Saving is explicit and field-masked: the caller chooses which groups of
//! live values are copied into the persisted document before the whole
//! document is written back. Write failures are logged and swallowed — the
//! UI never assumes a save succeeded.

use crate::extensions::ExtensionSet;
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// The persisted document. Every field is required; none carries a serde
/// default, so a missing or mistyped key fails the whole parse.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SettingsDoc {
    pub icon_folder: String,
    pub icon_file: String,
    pub image_folder: PathBuf,
    pub image_extensions: ExtensionSet,
    pub image_scale_index: i32,
    pub widget_font_size_index: i32,
}

impl SettingsDoc {
    /// Built-in defaults. The startup image folder comes from the caller
    /// (normally the first-run heuristic); `None` leaves it empty, which
    /// scans to an empty list.
    pub fn defaults(startup_folder: Option<PathBuf>) -> Self {
        Self {
            icon_folder: "icons".to_string(),
            icon_file: "peruse.png".to_string(),
            image_folder: startup_folder.unwrap_or_default(),
            image_extensions: ExtensionSet::default_set(),
            image_scale_index: 10,
            widget_font_size_index: 4,
        }
    }
}

/// Which field groups a save writes back. Each group is independently
/// toggled by its own "remember" menu entry.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SaveFields {
    pub folder: bool,
    pub extensions: bool,
    pub image_scale: bool,
    pub widget_font_size: bool,
}

impl SaveFields {
    pub const ALL: Self = Self {
        folder: true,
        extensions: true,
        image_scale: true,
        widget_font_size: true,
    };

    pub const FOLDER: Self = Self {
        folder: true,
        extensions: false,
        image_scale: false,
        widget_font_size: false,
    };

    pub const EXTENSIONS: Self = Self {
        folder: false,
        extensions: true,
        image_scale: false,
        widget_font_size: false,
    };

    pub const IMAGE_SCALE: Self = Self {
        folder: false,
        extensions: false,
        image_scale: true,
        widget_font_size: false,
    };

    pub const WIDGET_FONT_SIZE: Self = Self {
        folder: false,
        extensions: false,
        image_scale: false,
        widget_font_size: true,
    };
}

/// Live settings plus the persisted snapshot they were loaded from.
#[derive(Debug)]
pub struct Settings {
    path: PathBuf,
    /// Document as last loaded or written.
    saved: SettingsDoc,
    /// Values mutated during the session; persisted only on request.
    pub current: SettingsDoc,
}

/// Login name used to key the per-user document.
pub fn current_user() -> String {
    std::env::var("USER")
        .or_else(|_| std::env::var("USERNAME"))
        .unwrap_or_else(|_| "default".to_string())
}

/// `<user config dir>/peruse/<login>.json`.
pub fn default_path() -> PathBuf {
    let base = directories::BaseDirs::new()
        .map(|dirs| dirs.config_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from("."));
    base.join("peruse").join(format!("{}.json", current_user()))
}

impl Settings {
    /// Load the current user's document, falling back to full defaults.
    pub fn load(startup_folder: impl FnOnce() -> Option<PathBuf>) -> Self {
        Self::load_from(default_path(), startup_folder)
    }

    /// Load from an explicit path. `startup_folder` is only invoked when
    /// the document is absent or invalid and defaults are being built.
    pub fn load_from(path: PathBuf, startup_folder: impl FnOnce() -> Option<PathBuf>) -> Self {
        let doc = fs::read_to_string(&path)
            .ok()
            .and_then(|text| serde_json::from_str::<SettingsDoc>(&text).ok());

        let saved = match doc {
            Some(doc) => {
                debug!("settings loaded from {}", path.display());
                doc
            }
            None => {
                debug!("no usable settings at {}; using defaults", path.display());
                SettingsDoc::defaults(startup_folder())
            }
        };

        Self {
            path,
            current: saved.clone(),
            saved,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Copy the masked field groups from the live values into the persisted
    /// document, then write the whole document. Failures are swallowed.
    pub fn save(&mut self, fields: SaveFields) {
        if fields.folder {
            self.saved.image_folder = self.current.image_folder.clone();
        }
        if fields.extensions {
            self.saved.image_extensions = self.current.image_extensions.clone();
        }
        if fields.image_scale {
            self.saved.image_scale_index = self.current.image_scale_index;
        }
        if fields.widget_font_size {
            self.saved.widget_font_size_index = self.current.widget_font_size_index;
        }

        if let Some(parent) = self.path.parent() {
            if let Err(err) = fs::create_dir_all(parent) {
                warn!("cannot create {}: {}", parent.display(), err);
                return;
            }
        }
        match serde_json::to_string_pretty(&self.saved) {
            Ok(json) => {
                if let Err(err) = fs::write(&self.path, json) {
                    warn!("cannot write {}: {}", self.path.display(), err);
                }
            }
            Err(err) => warn!("cannot serialize settings: {}", err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    fn fallback() -> Option<PathBuf> {
        Some(PathBuf::from("/fallback/pictures"))
    }

    #[test]
    fn test_missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let ran = Cell::new(false);
        let settings = Settings::load_from(dir.path().join("none.json"), || {
            ran.set(true);
            fallback()
        });
        assert!(ran.get());
        assert_eq!(settings.current, SettingsDoc::defaults(fallback()));
    }

    #[test]
    fn test_valid_document_skips_heuristic() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("user.json");

        let mut first = Settings::load_from(path.clone(), fallback);
        first.current.image_folder = PathBuf::from("/chosen");
        first.save(SaveFields::ALL);

        let ran = Cell::new(false);
        let second = Settings::load_from(path, || {
            ran.set(true);
            fallback()
        });
        assert!(!ran.get());
        assert_eq!(second.current.image_folder, PathBuf::from("/chosen"));
    }

    #[test]
    fn test_one_missing_key_discards_whole_document() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("user.json");

        let doc = SettingsDoc::defaults(Some(PathBuf::from("/persisted")));
        let mut value: serde_json::Value =
            serde_json::to_value(&doc).unwrap();
        value.as_object_mut().unwrap().remove("image_scale_index");
        fs::write(&path, serde_json::to_string(&value).unwrap()).unwrap();

        let settings = Settings::load_from(path, fallback);
        // Full defaults, including a recomputed image folder.
        assert_eq!(settings.current, SettingsDoc::defaults(fallback()));
    }

    #[test]
    fn test_mistyped_key_discards_whole_document() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("user.json");

        let doc = SettingsDoc::defaults(Some(PathBuf::from("/persisted")));
        let mut value: serde_json::Value = serde_json::to_value(&doc).unwrap();
        value["widget_font_size_index"] = serde_json::json!("four");
        fs::write(&path, serde_json::to_string(&value).unwrap()).unwrap();

        let settings = Settings::load_from(path, fallback);
        assert_eq!(settings.current, SettingsDoc::defaults(fallback()));
    }

    #[test]
    fn test_garbage_document_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("user.json");
        fs::write(&path, "{ not json").unwrap();

        let settings = Settings::load_from(path, fallback);
        assert_eq!(settings.current, SettingsDoc::defaults(fallback()));
    }

    #[test]
    fn test_save_writes_only_masked_fields() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("user.json");

        let mut settings = Settings::load_from(path.clone(), fallback);
        settings.current.image_folder = PathBuf::from("/new/folder");
        settings.current.image_scale_index = 2;
        settings.save(SaveFields::FOLDER);

        let reloaded = Settings::load_from(path, fallback);
        assert_eq!(reloaded.current.image_folder, PathBuf::from("/new/folder"));
        // The unmasked scale index kept its persisted (default) value.
        assert_eq!(
            reloaded.current.image_scale_index,
            SettingsDoc::defaults(None).image_scale_index
        );
    }

    #[test]
    fn test_save_creates_config_directory() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("deep").join("down").join("user.json");

        let mut settings = Settings::load_from(path.clone(), fallback);
        settings.save(SaveFields::ALL);
        assert!(path.is_file());
    }
}
