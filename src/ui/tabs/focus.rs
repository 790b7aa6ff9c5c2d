use crate::option_index::dimension_values;
use crate::plot_data::PlotData;
use crate::scan_data::ScanStore;
use crate::ui::console::Console;
use crate::ui::tabs::key_for_polarization;

/// The focus tab: same single-polarization view as pointing, one panel.
#[derive(Debug, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct FocusTab {
    pub polarization: String,
    #[serde(skip)]
    current_scan_index: Option<usize>,
    #[serde(skip)]
    plot: Option<PlotData>,
    #[serde(skip)]
    error: Option<String>,
}

impl Default for FocusTab {
    fn default() -> Self {
        FocusTab {
            polarization: "X".to_string(),
            current_scan_index: None,
            plot: None,
            error: None,
        }
    }
}

impl FocusTab {
    pub const LABELS: &'static [&'static str] = &["beams", "pols", "phases", "freqs"];
    pub const SCAN_TYPES: &'static [&'static str] = &["Focus"];

    pub fn reset(&mut self) {
        self.current_scan_index = None;
        self.plot = None;
        self.error = None;
    }

    pub fn display_scan(&mut self, store: &ScanStore, scan_index: usize, console: &mut Console) {
        self.current_scan_index = Some(scan_index);
        self.error = None;
        self.plot = None;

        match self.resolve_scan(store, scan_index) {
            Ok(plot) => self.plot = Some(plot),
            Err(message) => {
                console.write_error(format!("Focus: {}", message));
                self.error = Some(message);
            }
        }
    }

    fn resolve_scan(&self, store: &ScanStore, scan_index: usize) -> Result<PlotData, String> {
        let record = store.record_by_index(scan_index).map_err(|e| e.to_string())?;
        let values = dimension_values(record, Self::LABELS).map_err(|e| e.to_string())?;
        let key = key_for_polarization(&values, Self::LABELS, &self.polarization)
            .ok_or_else(|| format!("No {} polarization found.", self.polarization))?;
        let y = store
            .curve_for(scan_index, &key)
            .map_err(|e| e.to_string())?;
        Ok(PlotData::new(
            record.x.clone(),
            vec![y],
            Some(vec![self.polarization.clone()]),
            "Time",
            "Power",
            &format!("Scan {} - {} Pol", record.scan, self.polarization),
        ))
    }

    pub fn set_polarization(
        &mut self,
        polarization: &str,
        store: Option<&ScanStore>,
        console: &mut Console,
    ) {
        self.polarization = polarization.to_string();
        if let (Some(store), Some(scan_index)) = (store, self.current_scan_index) {
            self.display_scan(store, scan_index, console);
        }
    }

    pub fn ui(&mut self, ui: &mut egui::Ui) {
        if let Some(error) = &self.error {
            ui.colored_label(egui::Color32::LIGHT_RED, error);
            return;
        }
        match &self.plot {
            Some(plot) => plot.draw(ui, "focus_plot"),
            None => {
                ui.centered_and_justified(|ui| {
                    ui.label("Select a focus scan to plot.");
                });
            }
        }
    }
}
