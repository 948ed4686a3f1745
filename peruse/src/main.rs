//! peruse — folder slideshow and image browser
//!
//! Scans one folder at a time against a configurable extension allow-list
//! and shows the matching images, by hand or as a timed slideshow.

mod app;
mod browser;
mod dialogs;
mod loader;
mod theme;

use app::PeruseApp;
use eframe::NativeOptions;
use log::debug;
use perusecore::startup;
use perusecore::{ExtensionSet, Settings};

/// Window icon from the configured icon file, best effort.
fn load_icon(settings: &Settings) -> Option<egui::IconData> {
    let path = startup::install_dir()
        .join(&settings.current.icon_folder)
        .join(&settings.current.icon_file);
    let image = image::ImageReader::open(&path)
        .ok()?
        .with_guessed_format()
        .ok()?
        .decode()
        .ok()?;
    let rgba = image.to_rgba8();
    let (width, height) = rgba.dimensions();
    debug!("window icon from {}", path.display());
    Some(egui::IconData {
        rgba: rgba.into_raw(),
        width,
        height,
    })
}

fn main() -> eframe::Result<()> {
    env_logger::init();

    let settings = Settings::load(|| {
        startup::pick_startup_folder(&ExtensionSet::default_set(), &startup::install_dir())
    });

    let mut viewport = egui::ViewportBuilder::default()
        .with_inner_size([960.0, 720.0])
        .with_title("peruse");
    if let Some(icon) = load_icon(&settings) {
        viewport = viewport.with_icon(std::sync::Arc::new(icon));
    }

    let options = NativeOptions {
        viewport,
        ..Default::default()
    };

    eframe::run_native(
        "peruse",
        options,
        Box::new(move |cc| Box::new(PeruseApp::new(cc, settings))),
    )
}
