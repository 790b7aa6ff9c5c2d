use fnv::FnvHashMap;

use crate::error::ScanError;
use crate::option_value::{OptionKey, OptionValue};
use crate::scan_data::ScanStore;

/// Per-dimension chosen values, in checkbox order (which follows the sorted
/// dimension value sets).
pub type Selection = FnvHashMap<String, Vec<OptionValue>>;

/// Expand a selection into the Cartesian product of option keys, iterated
/// with the first dimension as the outer loop so key order (and with it the
/// plot legend order) is stable for a given selection.
///
/// Any dimension that is absent or has an empty subset suppresses resolution
/// entirely: no keys, no plot. That is the tool's quiescent state, not an
/// error.
pub fn resolve(selection: &Selection, dimension_order: &[&str]) -> Vec<OptionKey> {
    let mut chosen: Vec<&Vec<OptionValue>> = Vec::with_capacity(dimension_order.len());
    for dim in dimension_order {
        match selection.get(*dim) {
            Some(values) if !values.is_empty() => chosen.push(values),
            _ => return Vec::new(),
        }
    }

    let mut keys: Vec<Vec<OptionValue>> = vec![Vec::new()];
    for values in chosen {
        let mut next = Vec::with_capacity(keys.len() * values.len());
        for prefix in &keys {
            for value in values {
                let mut key = prefix.clone();
                key.push(value.clone());
                next.push(key);
            }
        }
        keys = next;
    }

    keys.into_iter().map(OptionKey::new).collect()
}

/// Resolve a selection and look up every produced key. Lookups are
/// independent: a missing curve for one key is reported in its slot of the
/// result and does not abort the rest.
pub fn resolve_and_fetch(
    store: &ScanStore,
    scan_index: usize,
    selection: &Selection,
    dimension_order: &[&str],
) -> Vec<(OptionKey, Result<Vec<f64>, ScanError>)> {
    resolve(selection, dimension_order)
        .into_iter()
        .map(|key| {
            let curve = store.curve_for(scan_index, &key);
            if let Err(err) = &curve {
                log::warn!("Scan index {}: {}", scan_index, err);
            }
            (key, curve)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn selection(entries: &[(&str, &[OptionValue])]) -> Selection {
        entries
            .iter()
            .map(|(name, values)| ((*name).to_string(), values.to_vec()))
            .collect()
    }

    #[test]
    fn test_singleton_selection_resolves_to_first_key() {
        let sel = selection(&[
            ("beams", &[OptionValue::Int(0)]),
            ("pols", &[OptionValue::Text("X".to_string())]),
        ]);
        let keys = resolve(&sel, &["beams", "pols"]);
        assert_eq!(
            keys,
            vec![OptionKey::new(vec![
                OptionValue::Int(0),
                OptionValue::Text("X".to_string())
            ])]
        );
    }

    #[test]
    fn test_empty_dimension_suppresses_resolution() {
        let sel = selection(&[
            ("beams", &[]),
            (
                "pols",
                &[
                    OptionValue::Text("X".to_string()),
                    OptionValue::Text("Y".to_string()),
                ],
            ),
        ]);
        assert!(resolve(&sel, &["beams", "pols"]).is_empty());
    }

    #[test]
    fn test_missing_dimension_suppresses_resolution() {
        let sel = selection(&[("beams", &[OptionValue::Int(0)])]);
        assert!(resolve(&sel, &["beams", "pols"]).is_empty());
    }

    #[test]
    fn test_first_dimension_is_outer_loop() {
        let sel = selection(&[
            ("beams", &[OptionValue::Int(0), OptionValue::Int(1)]),
            (
                "pols",
                &[
                    OptionValue::Text("X".to_string()),
                    OptionValue::Text("Y".to_string()),
                ],
            ),
        ]);
        let keys = resolve(&sel, &["beams", "pols"]);
        let rendered: Vec<String> = keys.iter().map(|k| k.to_string()).collect();
        assert_eq!(rendered, vec!["(0, X)", "(0, Y)", "(1, X)", "(1, Y)"]);
    }

    #[test]
    fn test_fetch_is_fail_soft_per_key() {
        let records: Vec<crate::scan_data::ScanRecord> = serde_json::from_value(serde_json::json!([
            {
                "scan": 3,
                "source": "3C123",
                "description": "Peak (3 of 4)",
                "scanType": "Peak",
                "x": [0.0, 1.0],
                "ydata": [
                    { "key": [0, "X"], "y": [1.0, 2.0, 3.0] }
                ]
            }
        ]))
        .expect("valid test records");
        let store = ScanStore::from_records("TEST_01".to_string(), records);

        let sel = selection(&[
            ("beams", &[OptionValue::Int(0)]),
            (
                "pols",
                &[
                    OptionValue::Text("X".to_string()),
                    OptionValue::Text("Y".to_string()),
                ],
            ),
        ]);
        let fetched = resolve_and_fetch(&store, 0, &sel, &["beams", "pols"]);
        assert_eq!(fetched.len(), 2);
        assert!(fetched[0].1.is_ok());
        assert!(matches!(fetched[1].1, Err(ScanError::MissingCurve(_))));
    }
}
