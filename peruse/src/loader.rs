//! Image loading and conversion to egui textures.

use image::DynamicImage;
use perusecore::DisplayTransform;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("cannot read image: {0}")]
    Io(#[from] std::io::Error),
    #[error("cannot decode image: {0}")]
    Decode(#[from] image::ImageError),
}

/// A decoded image kept in memory while it is on screen.
pub struct LoadedImage {
    pub path: PathBuf,
    pub file_size: u64,
    image: DynamicImage,
}

impl LoadedImage {
    pub fn open(path: &Path) -> Result<Self, LoadError> {
        let file_size = std::fs::metadata(path).map(|m| m.len()).unwrap_or(0);
        let image = image::ImageReader::open(path)?
            .with_guessed_format()?
            .decode()?;
        Ok(Self {
            path: path.to_path_buf(),
            file_size,
            image,
        })
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    /// Pixel data with the session transform applied: flips first, then the
    /// quarter-turn rotation.
    pub fn to_color_image(&self, transform: &DisplayTransform) -> egui::ColorImage {
        let mut img = self.image.clone();
        if transform.flip_horizontal {
            img = img.fliph();
        }
        if transform.flip_vertical {
            img = img.flipv();
        }
        // quarter_turns counts counter-clockwise; rotate90 is clockwise.
        img = match transform.quarter_turns {
            1 => img.rotate270(),
            2 => img.rotate180(),
            3 => img.rotate90(),
            _ => img,
        };

        let rgba = img.to_rgba8();
        let size = [rgba.width() as usize, rgba.height() as usize];
        egui::ColorImage::from_rgba_unmultiplied(size, rgba.as_raw())
    }
}
