#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogTarget {
    Pointing,
    Focus,
}

impl DialogTarget {
    fn name(self) -> &'static str {
        match self {
            DialogTarget::Pointing => "Pointing",
            DialogTarget::Focus => "Focus",
        }
    }
}

#[derive(Debug, PartialEq, Eq)]
pub enum DialogAction {
    Open,
    Apply(String),
    Cancel,
}

/// Modal options window for the single-polarization tabs. Only the
/// polarization choice is live; the remaining sections mirror the planned
/// option groups and carry placeholders until those land.
#[derive(Debug)]
pub struct OptionsDialog {
    pub target: DialogTarget,
    polarization: String,
}

impl OptionsDialog {
    pub fn new(target: DialogTarget, polarization: &str) -> Self {
        OptionsDialog {
            target,
            polarization: polarization.to_string(),
        }
    }

    pub fn ui(&mut self, ctx: &egui::Context) -> DialogAction {
        let mut action = DialogAction::Open;
        let title = format!("{} Options", self.target.name());

        egui::Window::new(title)
            .collapsible(false)
            .resizable(false)
            .show(ctx, |ui| {
                ui.label(format!(
                    "Choose polarization for the {} tab:",
                    self.target.name()
                ));
                for pol in ["X", "Y"] {
                    ui.radio_value(&mut self.polarization, pol.to_string(), pol);
                }

                ui.separator();
                egui::CollapsingHeader::new("Fitting Acceptance Criteria")
                    .show(ui, |ui| {
                        ui.weak("Set fitting acceptance criteria here.");
                    });
                egui::CollapsingHeader::new("Heuristics").show(ui, |ui| {
                    ui.weak("Configure heuristics here.");
                });
                egui::CollapsingHeader::new("Processing").show(ui, |ui| {
                    ui.weak("Set processing options here.");
                });

                ui.separator();
                ui.horizontal(|ui| {
                    if ui.button("Ok").clicked() {
                        action = DialogAction::Apply(self.polarization.clone());
                    }
                    if ui.button("Cancel").clicked() {
                        action = DialogAction::Cancel;
                    }
                });
            });

        action
    }
}
