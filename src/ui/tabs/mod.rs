pub mod continuum;
pub mod focus;
pub mod pointing;
pub mod spectral;

use fnv::FnvHashMap;

use crate::option_value::{OptionKey, OptionValue};

/// Build the option key for a single-polarization view: the requested value
/// on the polarization dimension (matched case-insensitively), the first
/// sorted value everywhere else. `None` when the scan has no polarization
/// dimension, no matching value, or an empty value set on any dimension.
pub(crate) fn key_for_polarization(
    values: &FnvHashMap<String, Vec<OptionValue>>,
    labels: &[&str],
    polarization: &str,
) -> Option<OptionKey> {
    let pol_dim = labels.iter().find(|l| l.eq_ignore_ascii_case("pols"))?;
    let mut parts = Vec::with_capacity(labels.len());
    for label in labels {
        let dim_values = values.get(*label)?;
        if label == pol_dim {
            let value = dim_values
                .iter()
                .find(|v| v.to_string().eq_ignore_ascii_case(polarization))?;
            parts.push(value.clone());
        } else {
            parts.push(dim_values.first()?.clone());
        }
    }
    Some(OptionKey::new(parts))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn values() -> FnvHashMap<String, Vec<OptionValue>> {
        let mut map = FnvHashMap::default();
        map.insert(
            "beams".to_string(),
            vec![OptionValue::Int(0), OptionValue::Int(1)],
        );
        map.insert(
            "pols".to_string(),
            vec![
                OptionValue::Text("X".to_string()),
                OptionValue::Text("Y".to_string()),
            ],
        );
        map.insert(
            "phases".to_string(),
            vec![
                OptionValue::Text("Ref".to_string()),
                OptionValue::Text("Sig".to_string()),
            ],
        );
        map.insert("freqs".to_string(), vec![OptionValue::Int(0)]);
        map
    }

    const LABELS: &[&str] = &["beams", "pols", "phases", "freqs"];

    #[test]
    fn test_key_uses_first_values_except_polarization() {
        let key = key_for_polarization(&values(), LABELS, "Y").expect("key");
        assert_eq!(key.to_string(), "(0, Y, Ref, 0)");
    }

    #[test]
    fn test_polarization_match_is_case_insensitive() {
        let key = key_for_polarization(&values(), LABELS, "y").expect("key");
        assert_eq!(key.to_string(), "(0, Y, Ref, 0)");
    }

    #[test]
    fn test_unknown_polarization_yields_no_key() {
        assert!(key_for_polarization(&values(), LABELS, "L").is_none());
    }

    #[test]
    fn test_empty_dimension_yields_no_key() {
        let mut vals = values();
        vals.insert("freqs".to_string(), Vec::new());
        assert!(key_for_polarization(&vals, LABELS, "X").is_none());
    }
}
