//! Extension-set dialogs.

use perusecore::ExtensionSet;

/// What a dialog did this frame.
pub enum DialogAction {
    Open,
    Cancelled,
    /// The extension set was mutated; the caller rescans.
    Applied,
}

/// Checklist over the current extension keys. Edits are staged locally and
/// only written back through `select_only` on okay.
pub struct SelectExtensionsDialog {
    /// Key, checklist label, checked state.
    entries: Vec<(String, String, bool)>,
}

impl SelectExtensionsDialog {
    pub fn new(set: &ExtensionSet) -> Self {
        Self {
            entries: set
                .iter()
                .map(|(ext, rule)| {
                    let label = if rule.case_sensitive {
                        format!("{ext} (case-sensitive)")
                    } else {
                        ext.to_string()
                    };
                    (ext.to_string(), label, rule.selected)
                })
                .collect(),
        }
    }

    pub fn show(&mut self, ctx: &egui::Context, set: &mut ExtensionSet) -> DialogAction {
        let mut action = DialogAction::Open;

        egui::Window::new("select extensions")
            .collapsible(false)
            .resizable(false)
            .default_width(260.0)
            .show(ctx, |ui| {
                if self.entries.is_empty() {
                    ui.label("no extensions configured");
                } else {
                    egui::ScrollArea::vertical().max_height(260.0).show(ui, |ui| {
                        for (_, label, selected) in &mut self.entries {
                            ui.checkbox(selected, label.as_str());
                        }
                    });
                }
                ui.separator();
                ui.horizontal(|ui| {
                    if ui.button("select all").clicked() {
                        for (_, _, selected) in &mut self.entries {
                            *selected = true;
                        }
                    }
                    if ui.button("unselect all").clicked() {
                        for (_, _, selected) in &mut self.entries {
                            *selected = false;
                        }
                    }
                });
                ui.horizontal(|ui| {
                    if ui.button("okay").clicked() {
                        let keep: Vec<&str> = self
                            .entries
                            .iter()
                            .filter(|(_, _, selected)| *selected)
                            .map(|(ext, _, _)| ext.as_str())
                            .collect();
                        set.select_only(&keep);
                        action = DialogAction::Applied;
                    }
                    if ui.button("cancel").clicked() {
                        action = DialogAction::Cancelled;
                    }
                });
            });

        action
    }
}

/// Free-text entry of one new extension. Either insert button commits and
/// closes; a leading dot is tolerated.
#[derive(Default)]
pub struct AddExtensionDialog {
    input: String,
}

impl AddExtensionDialog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn show(&mut self, ctx: &egui::Context, set: &mut ExtensionSet) -> DialogAction {
        let mut action = DialogAction::Open;

        egui::Window::new("add extension")
            .collapsible(false)
            .resizable(false)
            .default_width(260.0)
            .show(ctx, |ui| {
                ui.label("extension:");
                ui.text_edit_singleline(&mut self.input);
                ui.separator();
                ui.horizontal(|ui| {
                    if ui.button("add").clicked() {
                        set.insert(&self.input, false);
                        action = DialogAction::Applied;
                    }
                    if ui.button("add case-sensitive").clicked() {
                        set.insert(&self.input, true);
                        action = DialogAction::Applied;
                    }
                    if ui.button("cancel").clicked() {
                        action = DialogAction::Cancelled;
                    }
                });
            });

        action
    }
}

/// Free-text removal. "remove" deletes the exact key, "remove all" every
/// casing variant of it.
#[derive(Default)]
pub struct RemoveExtensionDialog {
    input: String,
}

impl RemoveExtensionDialog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn show(&mut self, ctx: &egui::Context, set: &mut ExtensionSet) -> DialogAction {
        let mut action = DialogAction::Open;

        egui::Window::new("remove extension")
            .collapsible(false)
            .resizable(false)
            .default_width(260.0)
            .show(ctx, |ui| {
                ui.label("extension:");
                ui.text_edit_singleline(&mut self.input);
                ui.separator();
                ui.horizontal(|ui| {
                    if ui.button("remove").clicked() {
                        set.remove(self.input.trim().trim_start_matches('.'));
                        action = DialogAction::Applied;
                    }
                    if ui.button("remove all").clicked() {
                        set.remove_all(self.input.trim().trim_start_matches('.'));
                        action = DialogAction::Applied;
                    }
                    if ui.button("cancel").clicked() {
                        action = DialogAction::Cancelled;
                    }
                });
            });

        action
    }
}
