use egui::Color32;

#[derive(Debug, Clone)]
pub struct ConsoleLine {
    pub text: String,
    pub color: Option<Color32>,
}

/// The in-app message panel. Everything written here also goes to the `log`
/// channel; the color is only used for the on-screen rendering (the spectral
/// key table colors its rows to match the plotted lines).
#[derive(Debug, Default)]
pub struct Console {
    lines: Vec<ConsoleLine>,
}

impl Console {
    pub fn write(&mut self, text: impl Into<String>) {
        let text = text.into();
        log::info!("{}", text);
        self.lines.push(ConsoleLine { text, color: None });
    }

    pub fn write_colored(&mut self, text: impl Into<String>, color: Color32) {
        let text = text.into();
        log::info!("{}", text);
        self.lines.push(ConsoleLine {
            text,
            color: Some(color),
        });
    }

    pub fn write_error(&mut self, text: impl Into<String>) {
        let text = text.into();
        log::error!("{}", text);
        self.lines.push(ConsoleLine {
            text,
            color: Some(Color32::LIGHT_RED),
        });
    }

    pub fn clear(&mut self) {
        self.lines.clear();
    }

    pub fn ui(&self, ui: &mut egui::Ui) {
        egui::ScrollArea::vertical()
            .stick_to_bottom(true)
            .auto_shrink([false, false])
            .show(ui, |ui| {
                for line in &self.lines {
                    let text = egui::RichText::new(&line.text).monospace();
                    match line.color {
                        Some(color) => ui.label(text.color(color)),
                        None => ui.label(text),
                    };
                }
            });
    }
}
