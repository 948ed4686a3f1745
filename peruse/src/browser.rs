//! In-app folder picker dialog.

use std::path::PathBuf;

/// What the picker did this frame.
pub enum BrowserAction {
    Open,
    Cancelled,
    Chosen(PathBuf),
}

/// Modal directory browser. Lists subdirectories only; the current
/// directory (or a selected subdirectory) can be chosen as the image
/// folder.
pub struct FolderBrowser {
    current_dir: PathBuf,
    entries: Vec<String>,
    selected: Option<usize>,
}

impl FolderBrowser {
    pub fn new(start: PathBuf) -> Self {
        let mut browser = Self {
            current_dir: start,
            entries: Vec::new(),
            selected: None,
        };
        browser.refresh();
        browser
    }

    fn refresh(&mut self) {
        self.selected = None;
        self.entries.clear();
        if let Ok(entries) = std::fs::read_dir(&self.current_dir) {
            for entry in entries.flatten() {
                let is_dir = entry.file_type().map(|ty| ty.is_dir()).unwrap_or(false);
                if !is_dir {
                    continue;
                }
                if let Ok(name) = entry.file_name().into_string() {
                    if !name.starts_with('.') {
                        self.entries.push(name);
                    }
                }
            }
        }
        self.entries.sort();
    }

    fn navigate_to(&mut self, dir: PathBuf) {
        self.current_dir = dir;
        self.refresh();
    }

    pub fn show(&mut self, ctx: &egui::Context) -> BrowserAction {
        let mut action = BrowserAction::Open;

        egui::Window::new("select folder")
            .collapsible(false)
            .resizable(false)
            .default_width(420.0)
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    ui.label("location:");
                    ui.label(self.current_dir.to_string_lossy().to_string());
                });
                ui.separator();

                if ui.button("up one level").clicked() {
                    if let Some(parent) = self.current_dir.parent() {
                        self.navigate_to(parent.to_path_buf());
                    }
                }

                egui::ScrollArea::vertical().max_height(280.0).show(ui, |ui| {
                    let mut clicked = None;
                    let mut descend = None;
                    for (idx, name) in self.entries.iter().enumerate() {
                        let selected = self.selected == Some(idx);
                        let response = ui.selectable_label(selected, name.as_str());
                        if response.clicked() {
                            clicked = Some(idx);
                        }
                        if response.double_clicked() {
                            descend = Some(self.current_dir.join(name));
                        }
                    }
                    if let Some(idx) = clicked {
                        self.selected = Some(idx);
                    }
                    if let Some(dir) = descend {
                        self.navigate_to(dir);
                    }
                });

                ui.separator();
                ui.horizontal(|ui| {
                    if ui.button("cancel").clicked() {
                        action = BrowserAction::Cancelled;
                    }
                    if ui.button("open").clicked() {
                        if let Some(idx) = self.selected {
                            if let Some(name) = self.entries.get(idx) {
                                self.navigate_to(self.current_dir.join(name));
                            }
                        }
                    }
                    if ui.button("choose this folder").clicked() {
                        let chosen = match self.selected.and_then(|idx| self.entries.get(idx)) {
                            Some(name) => self.current_dir.join(name),
                            None => self.current_dir.clone(),
                        };
                        action = BrowserAction::Chosen(chosen);
                    }
                });
            });

        action
    }
}
