use std::collections::BTreeMap;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use fnv::FnvHashMap;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::error::ScanError;
use crate::option_value::OptionKey;

/// One observation as stored in the project archive. Read-only once loaded.
#[derive(Debug, Clone, serde::Deserialize)]
pub struct ScanRecord {
    pub scan: i64,
    pub source: String,
    pub description: String,
    #[serde(rename = "scanType")]
    pub scan_type: String,
    /// Sample positions shared by every curve of this scan.
    pub x: Vec<f64>,
    /// Curve storage. Older archives write this under `ys` instead of
    /// `ydata`; values are kept raw so the legacy shims stay in `curve_for`.
    #[serde(
        rename = "ydata",
        alias = "ys",
        default,
        deserialize_with = "curves_from_entries"
    )]
    curves: FnvHashMap<OptionKey, Value>,
}

impl ScanRecord {
    pub fn key_count(&self) -> usize {
        self.curves.len()
    }

    pub fn keys(&self) -> impl Iterator<Item = &OptionKey> {
        self.curves.keys()
    }

    pub fn short_desc(&self) -> String {
        format!("Scan {}: {}", self.scan, self.source)
    }
}

/// JSON objects cannot carry tuple keys, so the archive stores the curve
/// mapping as a list of `{"key": [...], "y": ...}` entries.
#[derive(serde::Deserialize)]
struct CurveEntry {
    key: OptionKey,
    y: Value,
}

fn curves_from_entries<'de, D>(deserializer: D) -> Result<FnvHashMap<OptionKey, Value>, D::Error>
where
    D: Deserializer<'de>,
{
    let entries = Vec::<CurveEntry>::deserialize(deserializer)?;
    Ok(entries.into_iter().map(|e| (e.key, e.y)).collect())
}

/// All scans of one project, immutable after load. Re-opening a project
/// replaces the whole store; nothing is patched in place.
#[derive(Debug, Default)]
pub struct ScanStore {
    pub project: String,
    records: Vec<ScanRecord>,
    index_by_scan: FnvHashMap<i64, usize>,
}

impl ScanStore {
    /// Load one project from an archive file. The archive maps project name
    /// to an ordered scan list; with `project = None` the first project in
    /// the file (by name) is taken.
    pub fn open(path: &Path, project: Option<&str>) -> Result<ScanStore, ScanError> {
        let file = File::open(path)?;
        let mut archive: BTreeMap<String, Vec<ScanRecord>> =
            serde_json::from_reader(BufReader::new(file))?;

        let name = match project {
            Some(p) => p.to_string(),
            None => archive
                .keys()
                .next()
                .cloned()
                .ok_or_else(|| ScanError::ProjectNotFound("<empty archive>".to_string()))?,
        };
        let records = archive
            .remove(&name)
            .ok_or_else(|| ScanError::ProjectNotFound(name.clone()))?;

        log::info!("Loaded project '{}' with {} scans", name, records.len());
        Ok(ScanStore::from_records(name, records))
    }

    pub fn from_records(project: String, records: Vec<ScanRecord>) -> ScanStore {
        let index_by_scan = records
            .iter()
            .enumerate()
            .map(|(i, r)| (r.scan, i))
            .collect();
        ScanStore {
            project,
            records,
            index_by_scan,
        }
    }

    pub fn scan_count(&self) -> usize {
        self.records.len()
    }

    pub fn record_by_index(&self, index: usize) -> Result<&ScanRecord, ScanError> {
        self.records.get(index).ok_or(ScanError::IndexOutOfRange {
            index,
            count: self.records.len(),
        })
    }

    /// Inverse of the load order; a miss is a normal result (stale UI state
    /// can ask for scans the current project does not have).
    pub fn index_for_scan_number(&self, scan: i64) -> Option<usize> {
        self.index_by_scan.get(&scan).copied()
    }

    /// Fetch the curve stored for `key`, normalizing legacy storage on the
    /// way out.
    pub fn curve_for(&self, scan_index: usize, key: &OptionKey) -> Result<Vec<f64>, ScanError> {
        let record = self.record_by_index(scan_index)?;
        let raw = record
            .curves
            .get(key)
            .ok_or_else(|| ScanError::MissingCurve(key.clone()))?;
        as_samples(unwrap_legacy_pair(raw)).ok_or_else(|| ScanError::MissingCurve(key.clone()))
    }
}

/// Some archives wrap a curve in a 2-element container; the curve is the
/// first element. The rule is keyed off length 2 and nothing else, so a
/// genuine 2-sample curve cannot be told apart from the wrapped form. Known
/// upstream data-production quirk; do not "improve" it here.
fn unwrap_legacy_pair(raw: &Value) -> &Value {
    match raw {
        Value::Array(items) if items.len() == 2 => &items[0],
        _ => raw,
    }
}

fn as_samples(value: &Value) -> Option<Vec<f64>> {
    match value {
        Value::Number(n) => n.as_f64().map(|v| vec![v]),
        Value::Array(items) => items.iter().map(serde_json::Value::as_f64).collect(),
        _ => None,
    }
}
