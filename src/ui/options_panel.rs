use crate::error::ScanError;
use crate::option_index::dimension_values;
use crate::option_value::OptionValue;
use crate::resolver::Selection;
use crate::scan_data::ScanRecord;

/// The per-dimension checkbox panel. Rebuilt whenever the displayed scan
/// changes; each dimension starts with only its first (sorted) value checked,
/// so the initial state resolves to exactly one curve.
///
/// Checkbox labels are the display text of the dimension values; reading the
/// selection back coerces the labels, which is what guarantees the produced
/// keys equal the stored ones.
#[derive(Debug, Default, Clone)]
pub struct OptionsPanel {
    groups: Vec<DimensionGroup>,
}

#[derive(Debug, Clone)]
struct DimensionGroup {
    name: String,
    boxes: Vec<(String, bool)>,
}

impl OptionsPanel {
    pub fn rebuild(&mut self, record: &ScanRecord, labels: &[&str]) -> Result<(), ScanError> {
        let values = dimension_values(record, labels)?;
        self.groups = labels
            .iter()
            .map(|label| DimensionGroup {
                name: (*label).to_string(),
                boxes: values[*label]
                    .iter()
                    .enumerate()
                    .map(|(i, v)| (v.to_string(), i == 0))
                    .collect(),
            })
            .collect();
        Ok(())
    }

    pub fn clear(&mut self) {
        self.groups.clear();
    }

    pub fn selection(&self) -> Selection {
        self.groups
            .iter()
            .map(|group| {
                let chosen = group
                    .boxes
                    .iter()
                    .filter(|(_, checked)| *checked)
                    .map(|(label, _)| OptionValue::coerce(label))
                    .collect();
                (group.name.clone(), chosen)
            })
            .collect()
    }

    /// Draw the checkbox groups; returns true if any box was toggled.
    pub fn ui(&mut self, ui: &mut egui::Ui) -> bool {
        let mut changed = false;
        for group in &mut self.groups {
            ui.group(|ui| {
                ui.label(egui::RichText::new(&group.name).strong());
                ui.horizontal_wrapped(|ui| {
                    for (label, checked) in &mut group.boxes {
                        if ui.checkbox(checked, label.as_str()).changed() {
                            changed = true;
                        }
                    }
                });
            });
        }
        changed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record() -> ScanRecord {
        serde_json::from_value(json!({
            "scan": 1,
            "source": "3C48",
            "description": "Peak (1 of 4)",
            "scanType": "Peak",
            "x": [0.0, 1.0],
            "ydata": [
                { "key": [0, "X"], "y": [1.0, 1.0] },
                { "key": [0, "Y"], "y": [2.0, 2.0] },
                { "key": [1, "X"], "y": [3.0, 3.0] },
                { "key": [1, "Y"], "y": [4.0, 4.0] }
            ]
        }))
        .expect("valid test record")
    }

    #[test]
    fn test_initial_state_checks_first_value_only() {
        let mut panel = OptionsPanel::default();
        panel.rebuild(&record(), &["beams", "pols"]).expect("rebuild");

        let selection = panel.selection();
        assert_eq!(selection["beams"], vec![OptionValue::Int(0)]);
        assert_eq!(
            selection["pols"],
            vec![OptionValue::Text("X".to_string())]
        );
    }

    #[test]
    fn test_selection_coerces_labels_to_stored_types() {
        let mut panel = OptionsPanel::default();
        panel.rebuild(&record(), &["beams", "pols"]).expect("rebuild");

        let selection = panel.selection();
        // Stored beam components are integers; labels must read back as such.
        assert!(matches!(selection["beams"][0], OptionValue::Int(0)));
    }

    #[test]
    fn test_rebuild_propagates_schema_mismatch() {
        let mut panel = OptionsPanel::default();
        let result = panel.rebuild(&record(), &["beams", "pols", "phases", "freqs"]);
        assert!(matches!(
            result,
            Err(crate::error::ScanError::SchemaMismatch { .. })
        ));
    }
}
