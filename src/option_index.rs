use std::collections::BTreeSet;

use fnv::FnvHashMap;

use crate::error::ScanError;
use crate::option_value::OptionValue;
use crate::scan_data::ScanRecord;

/// Derive, for each declared dimension name, the sorted distinct values
/// observed at that dimension's position across all of a scan's option keys.
///
/// A scan with no stored keys yields empty value sets (nothing to plot, not
/// an error). A key whose arity disagrees with `dimension_names` is a schema
/// mismatch, never silently truncated or padded.
pub fn dimension_values(
    record: &ScanRecord,
    dimension_names: &[&str],
) -> Result<FnvHashMap<String, Vec<OptionValue>>, ScanError> {
    let mut collected: Vec<BTreeSet<OptionValue>> = vec![BTreeSet::new(); dimension_names.len()];

    for key in record.keys() {
        if key.arity() != dimension_names.len() {
            return Err(ScanError::SchemaMismatch {
                expected: dimension_names.len(),
                found: key.arity(),
            });
        }
        for (position, value) in key.values().iter().enumerate() {
            collected[position].insert(value.clone());
        }
    }

    Ok(dimension_names
        .iter()
        .zip(collected)
        .map(|(name, values)| ((*name).to_string(), values.into_iter().collect()))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(value: serde_json::Value) -> ScanRecord {
        serde_json::from_value(value).expect("valid test record")
    }

    fn beams_pols_record() -> ScanRecord {
        record(json!({
            "scan": 1,
            "source": "3C48",
            "description": "Peak (1 of 4)",
            "scanType": "Peak",
            "x": [0.0, 1.0],
            "ydata": [
                { "key": [1, "Y"], "y": [0.0, 0.0] },
                { "key": [0, "X"], "y": [1.0, 1.0] },
                { "key": [1, "X"], "y": [2.0, 2.0] },
                { "key": [0, "Y"], "y": [3.0, 3.0] }
            ]
        }))
    }

    #[test]
    fn test_values_are_sorted_and_distinct() {
        let record = beams_pols_record();
        let values = dimension_values(&record, &["beams", "pols"]).expect("values");
        assert_eq!(
            values["beams"],
            vec![OptionValue::Int(0), OptionValue::Int(1)]
        );
        assert_eq!(
            values["pols"],
            vec![
                OptionValue::Text("X".to_string()),
                OptionValue::Text("Y".to_string())
            ]
        );
    }

    #[test]
    fn test_derivation_is_idempotent() {
        let record = beams_pols_record();
        let first = dimension_values(&record, &["beams", "pols"]).expect("values");
        let second = dimension_values(&record, &["beams", "pols"]).expect("values");
        assert_eq!(first["beams"], second["beams"]);
        assert_eq!(first["pols"], second["pols"]);
    }

    #[test]
    fn test_cross_product_capacity_covers_stored_keys() {
        let record = beams_pols_record();
        let values = dimension_values(&record, &["beams", "pols"]).expect("values");
        let capacity: usize = ["beams", "pols"].iter().map(|d| values[*d].len()).product();
        assert!(capacity >= record.key_count());
        for key in record.keys() {
            for (name, component) in ["beams", "pols"].iter().zip(key.values()) {
                assert!(values[*name].contains(component));
            }
        }
    }

    #[test]
    fn test_arity_mismatch_is_schema_error() {
        let record = beams_pols_record();
        assert!(matches!(
            dimension_values(&record, &["beams", "pols", "phases"]),
            Err(ScanError::SchemaMismatch {
                expected: 3,
                found: 2
            })
        ));
    }

    #[test]
    fn test_zero_keys_means_empty_sets() {
        let record = record(json!({
            "scan": 2,
            "source": "idle",
            "description": "nothing recorded",
            "scanType": "Peak",
            "x": [],
            "ydata": []
        }));
        let values = dimension_values(&record, &["beams", "pols"]).expect("values");
        assert!(values["beams"].is_empty());
        assert!(values["pols"].is_empty());
    }
}
