//! peruse application
//!
//! Folder slideshow and image browser. One folder at a time is scanned
//! against the configured extension rules; navigation, autoplay, scale and
//! orientation all operate on that scanned list.

use crate::browser::{BrowserAction, FolderBrowser};
use crate::dialogs::{
    AddExtensionDialog, DialogAction, RemoveExtensionDialog, SelectExtensionsDialog,
};
use crate::loader::LoadedImage;
use crate::theme;
use egui::{Context, Key, Rect, TextureHandle, TextureOptions, Vec2};
use perusecore::autoplay::{self, Autoplay};
use perusecore::scan;
use perusecore::settings::SaveFields;
use perusecore::{DisplayTransform, Navigation, Settings};
use std::path::PathBuf;
use std::time::Instant;

/// Selectable image scales as a fraction of the window, smallest to largest.
pub const IMAGE_SCALES: [f32; 14] = [
    0.10, 0.15, 0.20, 0.25, 0.30, 0.35, 0.40, 0.45, 0.50, 0.55, 0.60, 0.65, 0.70, 0.75,
];

/// Default autoplay delay, in slider ticks.
const DEFAULT_DELAY_TICKS: u32 = 15;

/// The one open modal, if any. Keyboard shortcuts are suspended while a
/// dialog is up.
enum Dialog {
    SelectExtensions(SelectExtensionsDialog),
    AddExtension(AddExtensionDialog),
    RemoveExtension(RemoveExtensionDialog),
    PickFolder(FolderBrowser),
    ConfirmExit,
    Help,
    About,
}

pub struct PeruseApp {
    settings: Settings,
    nav: Navigation,
    autoplay: Autoplay,
    /// Autoplay delay in ticks; session-only, never persisted.
    delay_ticks: u32,
    /// Session orientation; survives navigation, cleared only by reset.
    transform: DisplayTransform,
    /// Decoded image currently on screen.
    loaded: Option<LoadedImage>,
    texture: Option<TextureHandle>,
    /// Path and transform the texture was built for.
    texture_key: Option<(PathBuf, DisplayTransform)>,
    /// Error message from the last load attempt.
    load_error: Option<String>,
    /// Font index the theme was last applied with.
    applied_font_index: i32,
    dialog: Option<Dialog>,
    /// Set once leaving is confirmed; lets the close request through.
    allow_close: bool,
}

impl PeruseApp {
    pub fn new(cc: &eframe::CreationContext<'_>, settings: Settings) -> Self {
        let mut app = Self {
            settings,
            nav: Navigation::new(),
            autoplay: Autoplay::new(),
            delay_ticks: DEFAULT_DELAY_TICKS,
            transform: DisplayTransform::new(),
            loaded: None,
            texture: None,
            texture_key: None,
            load_error: None,
            applied_font_index: i32::MIN,
            dialog: None,
            allow_close: false,
        };
        app.apply_theme(&cc.egui_ctx);
        app.rescan();
        app
    }

    fn apply_theme(&mut self, ctx: &Context) {
        theme::apply(ctx, &mut self.settings.current.widget_font_size_index);
        self.applied_font_index = self.settings.current.widget_font_size_index;
    }

    /// Re-list the folder against the current rules. Resets the position to
    /// the first image and cancels any running slideshow; the orientation is
    /// deliberately left alone.
    fn rescan(&mut self) {
        let files = scan::list_images(
            &self.settings.current.image_folder,
            &self.settings.current.image_extensions,
        );
        self.nav.rebuild(files);
        self.autoplay.stop();
        self.loaded = None;
        self.texture = None;
        self.texture_key = None;
        self.load_error = None;
    }

    fn set_folder(&mut self, folder: PathBuf) {
        self.settings.current.image_folder = folder;
        self.rescan();
    }

    fn change_scale(&mut self, delta: i32) {
        let idx = &mut self.settings.current.image_scale_index;
        *idx = (*idx + delta).clamp(0, IMAGE_SCALES.len() as i32 - 1);
    }

    fn change_font_size(&mut self, delta: i32) {
        let idx = &mut self.settings.current.widget_font_size_index;
        *idx = (*idx + delta).clamp(0, theme::WIDGET_FONT_SIZES.len() as i32 - 1);
    }

    fn toggle_autoplay(&mut self) {
        if self.nav.is_empty() {
            return;
        }
        self.autoplay.toggle(Instant::now(), self.delay_ticks);
    }

    /// Keep the decoded image and its texture in sync with the current
    /// position and orientation. A failed load leaves an error message in
    /// place of the picture.
    fn ensure_texture(&mut self, ctx: &Context) {
        let name = match self.nav.current() {
            Some(name) => name.to_string(),
            None => {
                self.loaded = None;
                self.texture = None;
                self.texture_key = None;
                self.load_error = None;
                return;
            }
        };
        let path = self.settings.current.image_folder.join(&name);
        let key = (path.clone(), self.transform);
        if self.texture_key.as_ref() == Some(&key) {
            return;
        }

        let path_changed = self
            .loaded
            .as_ref()
            .map(|img| img.path != path)
            .unwrap_or(true);
        if path_changed {
            match LoadedImage::open(&path) {
                Ok(img) => {
                    self.loaded = Some(img);
                    self.load_error = None;
                }
                Err(err) => {
                    self.loaded = None;
                    self.texture = None;
                    self.texture_key = Some(key);
                    self.load_error = Some(err.to_string());
                    return;
                }
            }
        }

        if let Some(ref img) = self.loaded {
            let color_image = img.to_color_image(&self.transform);
            self.texture = Some(ctx.load_texture("peruse_image", color_image, TextureOptions::LINEAR));
            self.texture_key = Some(key);
            self.load_error = None;
        }
    }

    fn handle_keyboard(&mut self, ctx: &Context) {
        // A modal owns the keyboard.
        if self.dialog.is_some() {
            return;
        }

        let mut advance = 0i64;
        let mut scale = 0i32;
        let mut toggle_play = false;
        let mut reset_orientation = false;

        ctx.input(|i| {
            if i.key_pressed(Key::ArrowLeft) {
                advance -= 1;
            }
            if i.key_pressed(Key::ArrowRight) {
                advance += 1;
            }
            if i.key_pressed(Key::Plus) || i.key_pressed(Key::Equals) {
                scale += 1;
            }
            if i.key_pressed(Key::Minus) {
                scale -= 1;
            }
            if i.key_pressed(Key::Space) {
                toggle_play = true;
            }
            if i.key_pressed(Key::R) {
                reset_orientation = true;
            }
        });

        if advance != 0 {
            self.nav.advance(advance);
        }
        if scale != 0 {
            self.change_scale(scale);
        }
        if toggle_play {
            self.toggle_autoplay();
        }
        if reset_orientation {
            self.transform.reset();
        }
    }

    fn render_menu_bar(&mut self, ui: &mut egui::Ui) {
        egui::menu::bar(ui, |ui| {
            ui.menu_button("folder", |ui| {
                if ui.button("select folder...").clicked() {
                    let start = if self.settings.current.image_folder.is_dir() {
                        self.settings.current.image_folder.clone()
                    } else {
                        PathBuf::from(".")
                    };
                    self.dialog = Some(Dialog::PickFolder(FolderBrowser::new(start)));
                    ui.close_menu();
                }
                if ui.button("rescan folder").clicked() {
                    self.rescan();
                    ui.close_menu();
                }
                ui.separator();
                if ui.button("remember folder").clicked() {
                    self.settings.save(SaveFields::FOLDER);
                    ui.close_menu();
                }
            });
            ui.menu_button("extensions", |ui| {
                if ui.button("select extensions...").clicked() {
                    self.dialog = Some(Dialog::SelectExtensions(SelectExtensionsDialog::new(
                        &self.settings.current.image_extensions,
                    )));
                    ui.close_menu();
                }
                if ui.button("add extension...").clicked() {
                    self.dialog = Some(Dialog::AddExtension(AddExtensionDialog::new()));
                    ui.close_menu();
                }
                if ui.button("remove extension...").clicked() {
                    self.dialog = Some(Dialog::RemoveExtension(RemoveExtensionDialog::new()));
                    ui.close_menu();
                }
                ui.separator();
                if ui.button("remember extensions").clicked() {
                    self.settings.save(SaveFields::EXTENSIONS);
                    ui.close_menu();
                }
            });
            ui.menu_button("image", |ui| {
                if ui.button("larger    +").clicked() {
                    self.change_scale(1);
                    ui.close_menu();
                }
                if ui.button("smaller   -").clicked() {
                    self.change_scale(-1);
                    ui.close_menu();
                }
                ui.separator();
                if ui.button("remember scale").clicked() {
                    self.settings.save(SaveFields::IMAGE_SCALE);
                    ui.close_menu();
                }
            });
            ui.menu_button("browse", |ui| {
                let has_images = !self.nav.is_empty();
                let play_label = if self.autoplay.is_running() {
                    "pause     Space"
                } else {
                    "play      Space"
                };
                if ui.add_enabled(has_images, egui::Button::new(play_label)).clicked() {
                    self.toggle_autoplay();
                    ui.close_menu();
                }
                ui.separator();
                let len = self.nav.len() as i64;
                if ui.add_enabled(!self.nav.at_start(), egui::Button::new("first")).clicked() {
                    self.nav.advance(-len);
                    ui.close_menu();
                }
                if ui.add_enabled(!self.nav.at_end(), egui::Button::new("last")).clicked() {
                    self.nav.advance(len);
                    ui.close_menu();
                }
                ui.separator();
                for step in [25i64, 100] {
                    if ui
                        .add_enabled(!self.nav.at_start(), egui::Button::new(format!("back {step}")))
                        .clicked()
                    {
                        self.nav.advance(-step);
                        ui.close_menu();
                    }
                    if ui
                        .add_enabled(!self.nav.at_end(), egui::Button::new(format!("ahead {step}")))
                        .clicked()
                    {
                        self.nav.advance(step);
                        ui.close_menu();
                    }
                }
            });
            ui.menu_button("display", |ui| {
                if ui.button("flip horizontal").clicked() {
                    self.transform.toggle_flip_horizontal();
                    ui.close_menu();
                }
                if ui.button("flip vertical").clicked() {
                    self.transform.toggle_flip_vertical();
                    ui.close_menu();
                }
                if ui.button("rotate left").clicked() {
                    self.transform.rotate_ccw();
                    ui.close_menu();
                }
                if ui.button("rotate right").clicked() {
                    self.transform.rotate_cw();
                    ui.close_menu();
                }
                if ui
                    .add_enabled(!self.transform.is_identity(), egui::Button::new("reset  R"))
                    .clicked()
                {
                    self.transform.reset();
                    ui.close_menu();
                }
                ui.separator();
                if ui.button("larger widgets").clicked() {
                    self.change_font_size(1);
                    ui.close_menu();
                }
                if ui.button("smaller widgets").clicked() {
                    self.change_font_size(-1);
                    ui.close_menu();
                }
                if ui.button("remember widget size").clicked() {
                    self.settings.save(SaveFields::WIDGET_FONT_SIZE);
                    ui.close_menu();
                }
            });
            ui.menu_button("misc", |ui| {
                if ui.button("help").clicked() {
                    self.dialog = Some(Dialog::Help);
                    ui.close_menu();
                }
                if ui.button("about").clicked() {
                    self.dialog = Some(Dialog::About);
                    ui.close_menu();
                }
                ui.separator();
                if ui.button("remember everything").clicked() {
                    self.settings.save(SaveFields::ALL);
                    ui.close_menu();
                }
                if ui.button("leave...").clicked() {
                    self.dialog = Some(Dialog::ConfirmExit);
                    ui.close_menu();
                }
            });
        });
    }

    fn render_controls(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            let at_start = self.nav.at_start();
            let at_end = self.nav.at_end();
            let has_images = !self.nav.is_empty();

            if ui.add_enabled(!at_start, egui::Button::new("-10<<")).clicked() {
                self.nav.advance(-10);
            }
            if ui.add_enabled(!at_start, egui::Button::new("<<")).clicked() {
                self.nav.advance(-1);
            }
            let play_label = if self.autoplay.is_running() { "pause" } else { "play" };
            if ui.add_enabled(has_images, egui::Button::new(play_label)).clicked() {
                self.toggle_autoplay();
            }
            if ui.add_enabled(!at_end, egui::Button::new(">>")).clicked() {
                self.nav.advance(1);
            }
            if ui.add_enabled(!at_end, egui::Button::new(">>+10")).clicked() {
                self.nav.advance(10);
            }

            ui.separator();
            ui.add(
                egui::Slider::new(
                    &mut self.delay_ticks,
                    autoplay::MIN_INTERVAL_TICKS..=autoplay::MAX_INTERVAL_TICKS,
                )
                .text("delay"),
            );
        });
        ui.horizontal(|ui| {
            if ui.button("(-)").clicked() {
                self.change_scale(-1);
            }
            if ui.button("leave").clicked() {
                self.dialog = Some(Dialog::ConfirmExit);
            }
            if ui.button("(+)").clicked() {
                self.change_scale(1);
            }
        });
    }

    fn render_status_bar(&mut self, ui: &mut egui::Ui) {
        let status = match (self.nav.current(), self.nav.index()) {
            (Some(name), Some(index)) => {
                let detail = match &self.loaded {
                    Some(img) => format!(
                        "  |  {}x{}  |  {}",
                        img.width(),
                        img.height(),
                        format_size(img.file_size)
                    ),
                    None => String::new(),
                };
                let playing = if self.autoplay.is_running() { "  |  playing" } else { "" };
                format!(
                    "{}  [{}/{}]{}{}",
                    name,
                    index + 1,
                    self.nav.len(),
                    detail,
                    playing
                )
            }
            _ => format!(
                "no images in {}",
                self.settings.current.image_folder.display()
            ),
        };
        ui.label(status);
    }

    fn render_content(&mut self, ui: &mut egui::Ui) {
        let rect = ui.available_rect_before_wrap();

        if self.nav.is_empty() {
            ui.vertical_centered(|ui| {
                ui.add_space(rect.height() / 3.0);
                ui.label("no images to show");
                ui.add_space(10.0);
                ui.label("pick a folder from the folder menu,");
                ui.label("or add extensions from the extensions menu");
            });
            return;
        }

        if let Some(ref err) = self.load_error {
            ui.vertical_centered(|ui| {
                ui.add_space(rect.height() / 3.0);
                ui.label(format!("cannot show this image: {}", err));
            });
            return;
        }

        if let Some(ref tex) = self.texture {
            let scale_idx = theme::normalize_index(
                &mut self.settings.current.image_scale_index,
                IMAGE_SCALES.len(),
            );
            let fraction = IMAGE_SCALES[scale_idx];

            let tex_size = tex.size_vec2();
            let fit = (rect.width() / tex_size.x).min(rect.height() / tex_size.y);
            let display_size = tex_size * fit * fraction;

            let offset = Vec2::new(
                (rect.width() - display_size.x) / 2.0,
                (rect.height() - display_size.y) / 2.0,
            );
            let img_rect = Rect::from_min_size(rect.min + offset, display_size);

            let _ = ui.allocate_rect(rect, egui::Sense::hover());
            let painter = ui.painter_at(rect);
            painter.image(
                tex.id(),
                img_rect,
                Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0)),
                egui::Color32::WHITE,
            );
        }
    }

    fn render_dialog(&mut self, ctx: &Context) {
        let dialog = match self.dialog.take() {
            Some(dialog) => dialog,
            None => return,
        };

        match dialog {
            Dialog::SelectExtensions(mut select) => {
                match select.show(ctx, &mut self.settings.current.image_extensions) {
                    DialogAction::Open => self.dialog = Some(Dialog::SelectExtensions(select)),
                    DialogAction::Cancelled => {}
                    DialogAction::Applied => self.rescan(),
                }
            }
            Dialog::AddExtension(mut add) => {
                match add.show(ctx, &mut self.settings.current.image_extensions) {
                    DialogAction::Open => self.dialog = Some(Dialog::AddExtension(add)),
                    DialogAction::Cancelled => {}
                    DialogAction::Applied => self.rescan(),
                }
            }
            Dialog::RemoveExtension(mut remove) => {
                match remove.show(ctx, &mut self.settings.current.image_extensions) {
                    DialogAction::Open => self.dialog = Some(Dialog::RemoveExtension(remove)),
                    DialogAction::Cancelled => {}
                    DialogAction::Applied => self.rescan(),
                }
            }
            Dialog::PickFolder(mut browser) => match browser.show(ctx) {
                BrowserAction::Open => self.dialog = Some(Dialog::PickFolder(browser)),
                BrowserAction::Cancelled => {}
                BrowserAction::Chosen(folder) => self.set_folder(folder),
            },
            Dialog::ConfirmExit => {
                let mut keep_open = true;
                egui::Window::new("leave peruse")
                    .collapsible(false)
                    .resizable(false)
                    .default_width(260.0)
                    .show(ctx, |ui| {
                        ui.label("leave peruse?");
                        ui.add_space(8.0);
                        ui.horizontal(|ui| {
                            if ui.button("save settings and leave").clicked() {
                                self.settings.save(SaveFields::ALL);
                                self.allow_close = true;
                                ctx.send_viewport_cmd(egui::ViewportCommand::Close);
                                keep_open = false;
                            }
                            if ui.button("leave").clicked() {
                                self.allow_close = true;
                                ctx.send_viewport_cmd(egui::ViewportCommand::Close);
                                keep_open = false;
                            }
                            if ui.button("cancel").clicked() {
                                keep_open = false;
                            }
                        });
                    });
                if keep_open {
                    self.dialog = Some(Dialog::ConfirmExit);
                }
            }
            Dialog::Help => {
                let mut keep_open = true;
                egui::Window::new("help")
                    .collapsible(false)
                    .resizable(false)
                    .default_width(300.0)
                    .show(ctx, |ui| {
                        let shortcut = |ui: &mut egui::Ui, key: &str, desc: &str| {
                            ui.horizontal(|ui| {
                                ui.monospace(format!("{:<10}", key));
                                ui.label(desc);
                            });
                        };
                        ui.strong("keyboard");
                        shortcut(ui, "← / →", "previous / next image");
                        shortcut(ui, "Space", "play / pause");
                        shortcut(ui, "+ / -", "larger / smaller image");
                        shortcut(ui, "R", "reset flips and rotation");
                        ui.add_space(6.0);
                        ui.strong("settings");
                        ui.label("nothing is saved unless a remember entry is used");
                        ui.separator();
                        if ui.button("close").clicked() {
                            keep_open = false;
                        }
                    });
                if keep_open {
                    self.dialog = Some(Dialog::Help);
                }
            }
            Dialog::About => {
                let mut keep_open = true;
                egui::Window::new("about peruse")
                    .collapsible(false)
                    .resizable(false)
                    .default_width(280.0)
                    .show(ctx, |ui| {
                        ui.vertical_centered(|ui| {
                            ui.heading("peruse");
                            ui.label(format!("version {}", env!("CARGO_PKG_VERSION")));
                            ui.add_space(8.0);
                            ui.label("folder slideshow and image browser");
                        });
                        ui.add_space(8.0);
                        ui.separator();
                        ui.label("frameworks:");
                        ui.label("  egui/eframe (MIT), image-rs (MIT)");
                        ui.add_space(8.0);
                        ui.vertical_centered(|ui| {
                            if ui.button("ok").clicked() {
                                keep_open = false;
                            }
                        });
                    });
                if keep_open {
                    self.dialog = Some(Dialog::About);
                }
            }
        }
    }
}

impl eframe::App for PeruseApp {
    fn update(&mut self, ctx: &Context, _frame: &mut eframe::Frame) {
        if self.settings.current.widget_font_size_index != self.applied_font_index {
            self.apply_theme(ctx);
        }

        // The window close button goes through the same confirmation as the
        // leave buttons.
        if ctx.input(|i| i.viewport().close_requested()) && !self.allow_close {
            ctx.send_viewport_cmd(egui::ViewportCommand::CancelClose);
            self.dialog = Some(Dialog::ConfirmExit);
        }

        self.handle_keyboard(ctx);

        // Slideshow tick. The deadline fires at most once per frame; the
        // repaint request below guarantees a frame arrives in time.
        let now = Instant::now();
        if self.nav.is_empty() {
            self.autoplay.stop();
        } else if self.autoplay.poll(now, self.delay_ticks) {
            self.nav.advance_wrapping();
        }

        self.ensure_texture(ctx);

        egui::TopBottomPanel::top("menu").show(ctx, |ui| {
            self.render_menu_bar(ui);
        });

        egui::TopBottomPanel::bottom("status").show(ctx, |ui| {
            self.render_status_bar(ui);
        });

        egui::TopBottomPanel::bottom("controls").show(ctx, |ui| {
            self.render_controls(ui);
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            self.render_content(ui);
        });

        self.render_dialog(ctx);

        if let Some(remaining) = self.autoplay.time_until(now) {
            ctx.request_repaint_after(remaining);
        }
    }
}

fn format_size(bytes: u64) -> String {
    if bytes < 1024 {
        format!("{} B", bytes)
    } else if bytes < 1024 * 1024 {
        format!("{:.1} KB", bytes as f64 / 1024.0)
    } else {
        format!("{:.1} MB", bytes as f64 / (1024.0 * 1024.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scale_table_is_ordered_and_in_range() {
        for pair in IMAGE_SCALES.windows(2) {
            assert!(pair[0] < pair[1]);
        }
        assert!(IMAGE_SCALES[0] > 0.0);
        assert!(IMAGE_SCALES[IMAGE_SCALES.len() - 1] <= 1.0);
    }

    #[test]
    fn test_format_size() {
        assert_eq!(format_size(500), "500 B");
        assert_eq!(format_size(2048), "2.0 KB");
        assert_eq!(format_size(3 * 1024 * 1024), "3.0 MB");
    }
}
