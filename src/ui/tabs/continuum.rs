use crate::plot_data::PlotData;
use crate::resolver::resolve_and_fetch;
use crate::scan_data::ScanStore;
use crate::ui::console::Console;
use crate::ui::options_panel::OptionsPanel;

/// The continuum (DCR) tab: full multi-select resolution over the four
/// continuum dimensions, one plot with a line per resolved key.
#[derive(Debug, Default, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct ContinuumTab {
    #[serde(skip)]
    options: OptionsPanel,
    #[serde(skip)]
    current_scan_index: Option<usize>,
    #[serde(skip)]
    plot: Option<PlotData>,
    #[serde(skip)]
    error: Option<String>,
}

impl ContinuumTab {
    pub const LABELS: &'static [&'static str] = &["beams", "pols", "phases", "freqs"];
    pub const SCAN_TYPES: &'static [&'static str] = &["Peak", "Focus"];

    pub fn reset(&mut self) {
        self.options.clear();
        self.current_scan_index = None;
        self.plot = None;
        self.error = None;
    }

    pub fn display_scan(&mut self, store: &ScanStore, scan_index: usize, console: &mut Console) {
        self.current_scan_index = Some(scan_index);
        self.error = None;
        self.plot = None;

        let record = match store.record_by_index(scan_index) {
            Ok(record) => record,
            Err(err) => {
                self.error = Some(err.to_string());
                return;
            }
        };
        if let Err(err) = self.options.rebuild(record, Self::LABELS) {
            // Contained to this tab; the rest of the session keeps working.
            self.options.clear();
            self.error = Some(err.to_string());
            console.write_error(format!("Continuum: {}", err));
            return;
        }
        self.replot(store, console);
    }

    fn replot(&mut self, store: &ScanStore, console: &mut Console) {
        self.plot = None;
        let Some(scan_index) = self.current_scan_index else {
            return;
        };

        let selection = self.options.selection();
        let fetched = resolve_and_fetch(store, scan_index, &selection, Self::LABELS);
        if fetched.is_empty() {
            // Partial selection: quiescent, nothing to plot.
            return;
        }

        let mut labels = Vec::new();
        let mut curves = Vec::new();
        for (key, curve) in fetched {
            match curve {
                Ok(y) => {
                    labels.push(key.to_string());
                    curves.push(y);
                }
                Err(err) => console.write_error(err.to_string()),
            }
        }
        if curves.is_empty() {
            return;
        }

        let Ok(record) = store.record_by_index(scan_index) else {
            return;
        };
        self.plot = Some(PlotData::new(
            record.x.clone(),
            curves,
            Some(labels),
            "Time",
            "Power",
            &record.short_desc(),
        ));
    }

    pub fn ui(&mut self, ui: &mut egui::Ui, store: &ScanStore, console: &mut Console) {
        if let Some(error) = &self.error {
            ui.colored_label(egui::Color32::LIGHT_RED, error);
            return;
        }

        egui::SidePanel::right("continuum_options")
            .resizable(true)
            .default_width(220.0)
            .show_inside(ui, |ui| {
                ui.heading("Options");
                if self.options.ui(ui) {
                    self.replot(store, console);
                }
            });

        egui::CentralPanel::default().show_inside(ui, |ui| match &self.plot {
            Some(plot) => plot.draw(ui, "continuum_plot"),
            None => {
                ui.centered_and_justified(|ui| {
                    ui.label("Select a scan and at least one value per option row.");
                });
            }
        });
    }
}
