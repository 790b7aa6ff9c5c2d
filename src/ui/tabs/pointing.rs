use crate::grouping::{parse_group_slot, GroupLayoutTracker};
use crate::option_index::dimension_values;
use crate::plot_data::PlotData;
use crate::scan_data::ScanStore;
use crate::ui::console::Console;
use crate::ui::tabs::key_for_polarization;

/// The most recently displayed scan on the pointing tab. Kept separately
/// from the history so a scan without a parsable "(N of M)" description is
/// still shown (at slot 0) even though it is not stored.
#[derive(Debug)]
struct CurrentScan {
    slot: Option<usize>,
    plot: PlotData,
}

/// The pointing tab: one polarization per scan, laid out on a 2x2 grid of
/// panels. Scans that parse as "N of M" group members land on their own
/// panel and stay visible while the rest of the group arrives; the history
/// resets wholesale once a fifth group member shows up.
#[derive(Debug, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct PointingTab {
    pub polarization: String,
    #[serde(skip)]
    tracker: GroupLayoutTracker,
    #[serde(skip)]
    current: Option<CurrentScan>,
    #[serde(skip)]
    current_scan_index: Option<usize>,
    #[serde(skip)]
    error: Option<String>,
}

impl Default for PointingTab {
    fn default() -> Self {
        PointingTab {
            polarization: "X".to_string(),
            tracker: GroupLayoutTracker::default(),
            current: None,
            current_scan_index: None,
            error: None,
        }
    }
}

impl PointingTab {
    pub const LABELS: &'static [&'static str] = &["beams", "pols", "phases", "freqs"];
    pub const SCAN_TYPES: &'static [&'static str] = &["Peak"];

    pub fn reset(&mut self) {
        self.tracker.clear();
        self.current = None;
        self.current_scan_index = None;
        self.error = None;
    }

    pub fn display_scan(&mut self, store: &ScanStore, scan_index: usize, console: &mut Console) {
        self.current_scan_index = Some(scan_index);
        self.error = None;
        self.current = None;

        let plot = match self.resolve_scan(store, scan_index) {
            Ok(plot) => plot,
            Err(message) => {
                console.write_error(format!("Pointing: {}", message));
                self.error = Some(message);
                return;
            }
        };

        let record = match store.record_by_index(scan_index) {
            Ok(record) => record,
            Err(err) => {
                self.error = Some(err.to_string());
                return;
            }
        };
        let slot = parse_group_slot(&record.description);
        if let Some(slot) = slot {
            // Only slotted scans persist across selections.
            self.tracker.insert(slot, plot.clone());
        }
        self.current = Some(CurrentScan { slot, plot });
    }

    fn resolve_scan(&self, store: &ScanStore, scan_index: usize) -> Result<PlotData, String> {
        let record = store.record_by_index(scan_index).map_err(|e| e.to_string())?;
        let values =
            dimension_values(record, Self::LABELS).map_err(|e| e.to_string())?;
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
        if self.tracker.is_empty() && self.current.is_none() {
            ui.centered_and_justified(|ui| {
                ui.label("Select a pointing scan to populate the grid.");
            });
            return;
        }

        // 2x2 grid, each panel bound to a fixed group slot.
        let panel_height = (ui.available_height() / 2.0 - 30.0).max(60.0);
        for row in 0..2 {
            ui.columns(2, |columns| {
                for (col, column) in columns.iter_mut().enumerate() {
                    let slot = row * 2 + col;
                    self.panel_ui(column, slot, panel_height);
                }
            });
        }
    }

    fn panel_ui(&self, ui: &mut egui::Ui, slot: usize, height: f32) {
        // The current scan takes slot 0 when its description did not parse;
        // it is shown without being part of the history.
        let unslotted_current = self
            .current
            .as_ref()
            .filter(|c| c.slot.is_none() && slot == 0)
            .map(|c| &c.plot);
        let entry = unslotted_current.or_else(|| self.tracker.entry_for_slot(slot));

        match entry {
            Some(plot) => plot.draw_sized(ui, &format!("pointing_panel_{}", slot), height),
            None => {
                ui.add_sized(
                    [ui.available_width(), height],
                    egui::Label::new(
                        egui::RichText::new(format!("slot {} empty", slot + 1)).weak(),
                    ),
                );
            }
        }
    }
}
