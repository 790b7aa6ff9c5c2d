use std::cmp::Ordering;
use std::fmt::Display;
use std::hash::{Hash, Hasher};

/// One component of an option key: beam number, polarization name, etc.
///
/// Archive keys are heterogeneous (integers, floats, and strings mixed in one
/// tuple), so values carry their tag and compare tag-first. Floats hash and
/// compare by bit pattern so keys stay usable in hash maps.
#[derive(Debug, Clone, serde::Deserialize, serde::Serialize)]
#[serde(untagged)]
pub enum OptionValue {
    Int(i64),
    Float(f64),
    Text(String),
}

impl OptionValue {
    /// Coerce a checkbox label back into the value it was rendered from:
    /// integer if it parses as one, else decimal, else text.
    pub fn coerce(text: &str) -> OptionValue {
        if let Ok(i) = text.parse::<i64>() {
            OptionValue::Int(i)
        } else if let Ok(f) = text.parse::<f64>() {
            OptionValue::Float(f)
        } else {
            OptionValue::Text(text.to_string())
        }
    }

    fn tag(&self) -> u8 {
        match self {
            OptionValue::Int(_) => 0,
            OptionValue::Float(_) => 1,
            OptionValue::Text(_) => 2,
        }
    }
}

impl PartialEq for OptionValue {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (OptionValue::Int(a), OptionValue::Int(b)) => a == b,
            (OptionValue::Float(a), OptionValue::Float(b)) => a.to_bits() == b.to_bits(),
            (OptionValue::Text(a), OptionValue::Text(b)) => a == b,
            _ => false,
        }
    }
}

impl Eq for OptionValue {}

impl Hash for OptionValue {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.tag().hash(state);
        match self {
            OptionValue::Int(i) => i.hash(state),
            OptionValue::Float(f) => f.to_bits().hash(state),
            OptionValue::Text(s) => s.hash(state),
        }
    }
}

impl Ord for OptionValue {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (OptionValue::Int(a), OptionValue::Int(b)) => a.cmp(b),
            (OptionValue::Float(a), OptionValue::Float(b)) => a.total_cmp(b),
            (OptionValue::Text(a), OptionValue::Text(b)) => a.cmp(b),
            _ => self.tag().cmp(&other.tag()),
        }
    }
}

impl PartialOrd for OptionValue {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Display for OptionValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OptionValue::Int(i) => write!(f, "{}", i),
            // Keep a decimal point on whole floats so the label coerces back
            // to a float, not an integer.
            OptionValue::Float(x) if x.is_finite() && x.fract() == 0.0 => write!(f, "{:.1}", x),
            OptionValue::Float(x) => write!(f, "{}", x),
            OptionValue::Text(s) => write!(f, "{}", s),
        }
    }
}

/// An ordered tuple of option values, one per dimension of the scan's option
/// space. Identifies exactly one stored curve within a scan.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Deserialize, serde::Serialize)]
#[serde(transparent)]
pub struct OptionKey(Vec<OptionValue>);

impl OptionKey {
    pub fn new(values: Vec<OptionValue>) -> Self {
        OptionKey(values)
    }

    pub fn arity(&self) -> usize {
        self.0.len()
    }

    pub fn values(&self) -> &[OptionValue] {
        &self.0
    }
}

impl Display for OptionKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "(")?;
        for (i, v) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", v)?;
        }
        write!(f, ")")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coerce_int_float_text() {
        assert_eq!(OptionValue::coerce("3"), OptionValue::Int(3));
        assert_eq!(OptionValue::coerce("-12"), OptionValue::Int(-12));
        assert_eq!(OptionValue::coerce("1.5"), OptionValue::Float(1.5));
        assert_eq!(OptionValue::coerce("X"), OptionValue::Text("X".to_string()));
    }

    #[test]
    fn test_coerce_round_trips_display_labels() {
        // A stored integer component rendered as a checkbox label must coerce
        // back to a value equal to the stored component.
        let stored = OptionValue::Int(3);
        assert_eq!(OptionValue::coerce(&stored.to_string()), stored);

        let stored = OptionValue::Float(3.0);
        assert_eq!(stored.to_string(), "3.0");
        assert_eq!(OptionValue::coerce(&stored.to_string()), stored);

        let stored = OptionValue::Text("Sig".to_string());
        assert_eq!(OptionValue::coerce(&stored.to_string()), stored);
    }

    #[test]
    fn test_coerce_is_idempotent() {
        let once = OptionValue::coerce("42");
        let twice = OptionValue::coerce(&once.to_string());
        assert_eq!(once, twice);
    }

    #[test]
    fn test_ordering_is_tag_then_value() {
        let mut vals = vec![
            OptionValue::Text("A".to_string()),
            OptionValue::Float(0.5),
            OptionValue::Int(2),
            OptionValue::Int(0),
        ];
        vals.sort();
        assert_eq!(
            vals,
            vec![
                OptionValue::Int(0),
                OptionValue::Int(2),
                OptionValue::Float(0.5),
                OptionValue::Text("A".to_string()),
            ]
        );
    }

    #[test]
    fn test_key_equality_is_structural() {
        let a = OptionKey::new(vec![OptionValue::Int(0), OptionValue::Text("X".into())]);
        let b = OptionKey::new(vec![
            OptionValue::coerce("0"),
            OptionValue::coerce("X"),
        ]);
        assert_eq!(a, b);
    }

    #[test]
    fn test_key_display() {
        let key = OptionKey::new(vec![
            OptionValue::Int(1),
            OptionValue::Text("Y".into()),
            OptionValue::Text("Ref".into()),
            OptionValue::Int(0),
        ]);
        assert_eq!(key.to_string(), "(1, Y, Ref, 0)");
    }
}
