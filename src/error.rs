use std::error::Error;
use std::fmt::Display;

use crate::option_value::OptionKey;

#[derive(Debug)]
pub enum ScanError {
    IndexOutOfRange { index: usize, count: usize },
    ScanNotFound(i64),
    SchemaMismatch { expected: usize, found: usize },
    MissingCurve(OptionKey),
    Archive(serde_json::Error),
    ProjectNotFound(String),
    File(std::io::Error),
}

impl From<std::io::Error> for ScanError {
    fn from(err: std::io::Error) -> ScanError {
        ScanError::File(err)
    }
}

impl From<serde_json::Error> for ScanError {
    fn from(err: serde_json::Error) -> ScanError {
        ScanError::Archive(err)
    }
}

impl Display for ScanError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ScanError::IndexOutOfRange { index, count } => {
                write!(f, "Scan index {} is out of range (0..{})", index, count)
            }
            ScanError::ScanNotFound(n) => write!(f, "No scan numbered {} in this project", n),
            ScanError::SchemaMismatch { expected, found } => write!(
                f,
                "Scan stores {}-part option keys but {} dimension names were given",
                found, expected
            ),
            ScanError::MissingCurve(key) => write!(f, "No curve stored for option key {}", key),
            ScanError::Archive(x) => write!(f, "Project archive could not be parsed: {}", x),
            ScanError::ProjectNotFound(p) => {
                write!(f, "Archive has no entry for project '{}'", p)
            }
            ScanError::File(x) => write!(f, "Project archive had a file I/O error: {}", x),
        }
    }
}

impl Error for ScanError {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::option_value::OptionValue;

    #[test]
    fn test_display_messages() {
        let err = ScanError::IndexOutOfRange { index: 7, count: 4 };
        assert_eq!(err.to_string(), "Scan index 7 is out of range (0..4)");

        let key = OptionKey::new(vec![OptionValue::Int(0), OptionValue::Text("X".into())]);
        let err = ScanError::MissingCurve(key);
        assert_eq!(err.to_string(), "No curve stored for option key (0, X)");
    }
}
