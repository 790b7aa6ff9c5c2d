use crate::colors::{series_color, series_color_name};
use crate::option_value::OptionKey;
use crate::plot_data::PlotData;
use crate::resolver::resolve_and_fetch;
use crate::scan_data::ScanStore;
use crate::ui::console::Console;
use crate::ui::options_panel::OptionsPanel;

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum SpectralView {
    Channels,
    Frequency,
}

/// The spectral (VEGAS) tab: multi-select resolution over the spectral
/// dimensions, an integration selector, and a channel/frequency x-axis
/// toggle. Resolved keys are echoed to the console as a color-coded table
/// matching the plotted lines.
#[derive(Debug, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct SpectralTab {
    pub view: SpectralView,
    pub integration: usize,
    pub num_integrations: usize,
    /// MHz span used for the frequency view; the archive carries channel
    /// indices only, so the mapping is linear over this range.
    pub freq_range: (f64, f64),
    #[serde(skip)]
    options: OptionsPanel,
    #[serde(skip)]
    current_scan_index: Option<usize>,
    #[serde(skip)]
    plot: Option<PlotData>,
    #[serde(skip)]
    error: Option<String>,
}

impl Default for SpectralTab {
    fn default() -> Self {
        SpectralTab {
            view: SpectralView::Channels,
            integration: 0,
            num_integrations: 3,
            freq_range: (1620.0, 1650.0),
            options: OptionsPanel::default(),
            current_scan_index: None,
            plot: None,
            error: None,
        }
    }
}

/// Map channel indices linearly onto a frequency range in MHz.
fn frequency_axis(x: &[f64], range: (f64, f64)) -> Vec<f64> {
    let x_max = x.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let x_max = if x_max > 0.0 { x_max } else { 1.0 };
    x.iter()
        .map(|&v| range.0 + (range.1 - range.0) * (v / x_max))
        .collect()
}

impl SpectralTab {
    pub const LABELS: &'static [&'static str] = &["beams", "pols", "phases", "IFs"];
    pub const SCAN_TYPES: &'static [&'static str] = &["spectral"];

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
            self.options.clear();
            self.error = Some(err.to_string());
            console.write_error(format!("Spectral: {}", err));
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
            return;
        }

        let mut keys = Vec::new();
        let mut curves = Vec::new();
        for (key, curve) in fetched {
            match curve {
                Ok(y) => {
                    keys.push(key);
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

        let (x, x_label) = match self.view {
            SpectralView::Channels => (record.x.clone(), "Channels"),
            SpectralView::Frequency => {
                // Frequency view runs high-to-low across the band.
                for y in &mut curves {
                    y.reverse();
                }
                (frequency_axis(&record.x, self.freq_range), "Frequency (MHz)")
            }
        };

        let labels: Vec<String> = keys.iter().map(OptionKey::to_string).collect();
        let title = format!("{}:{}:{}", store.project, record.scan, self.integration);
        self.plot = Some(PlotData::new(
            x,
            curves,
            Some(labels.clone()),
            x_label,
            "Counts",
            &title,
        ));

        self.write_key_table(record.scan, &labels, console);
    }

    /// Echo which key plots in which color, as an aligned table.
    fn write_key_table(&self, scan: i64, labels: &[String], console: &mut Console) {
        console.write(format!("Spectra for scan {}:", scan));
        let col_width = 12;
        let header: String = Self::LABELS
            .iter()
            .map(|l| format!("{:<col_width$}", l))
            .collect::<Vec<_>>()
            .join(" | ");
        console.write(format!("  | {} | {:<col_width$} |", header, "color"));
        for (i, label) in labels.iter().enumerate() {
            let parts: String = label
                .trim_matches(['(', ')'])
                .split(", ")
                .map(|part| format!("{:<col_width$}", part))
                .collect::<Vec<_>>()
                .join(" | ");
            console.write_colored(
                format!("  | {} | {:<col_width$} |", parts, series_color_name(i)),
                series_color(i),
            );
        }
    }

    pub fn ui(&mut self, ui: &mut egui::Ui, store: &ScanStore, console: &mut Console) {
        if let Some(error) = &self.error {
            ui.colored_label(egui::Color32::LIGHT_RED, error);
            return;
        }

        egui::SidePanel::right("spectral_options")
            .resizable(true)
            .default_width(220.0)
            .show_inside(ui, |ui| {
                ui.heading("Options");
                let mut changed = self.options.ui(ui);

                ui.separator();
                ui.horizontal(|ui| {
                    ui.label("integration");
                    let max = self.num_integrations.saturating_sub(1);
                    if ui
                        .add(egui::DragValue::new(&mut self.integration).range(0..=max))
                        .changed()
                    {
                        changed = true;
                    }
                });
                ui.horizontal(|ui| {
                    ui.label("View");
                    if ui
                        .radio_value(&mut self.view, SpectralView::Channels, "Channels")
                        .changed()
                    {
                        changed = true;
                    }
                    if ui
                        .radio_value(&mut self.view, SpectralView::Frequency, "Frequency")
                        .changed()
                    {
                        changed = true;
                    }
                });

                if changed {
                    self.replot(store, console);
                }
            });

        egui::CentralPanel::default().show_inside(ui, |ui| match &self.plot {
            Some(plot) => plot.draw(ui, "spectral_plot"),
            None => {
                ui.centered_and_justified(|ui| {
                    ui.label("Select a spectral scan and at least one value per option row.");
                });
            }
        });
    }
}
