//! Crate-level error types.

use std::fmt;

/// Errors produced by the motion-charts crate.
#[derive(Debug)]
pub enum ChartError {
    /// Two siblings share the same caption, so identity matching would be
    /// ambiguous.
    DuplicateCaption(String),
    /// A leaf value is negative, NaN or infinite.
    InvalidValue {
        /// Caption of the offending item.
        caption: String,
        /// The rejected value.
        value: f64,
    },
    /// A color string could not be parsed as `#rgb` or `#rrggbb`.
    InvalidColor(String),
    /// A branch item carries an empty `segments` list.
    EmptyBranch(String),
    /// A leaf item carries no `value`.
    MissingValue(String),
    /// Generic I/O failure.
    Io(std::io::Error),
    /// TOML options parsing/serialization failure.
    OptionsParse(String),
    /// JSON item data parsing failure.
    DataParse(serde_json::Error),
}

impl fmt::Display for ChartError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DuplicateCaption(caption) => {
                write!(f, "duplicate caption among siblings: {caption:?}")
            }
            Self::InvalidValue { caption, value } => {
                write!(f, "invalid value {value} for item {caption:?}")
            }
            Self::InvalidColor(color) => {
                write!(f, "invalid color: {color:?}")
            }
            Self::EmptyBranch(caption) => {
                write!(f, "item {caption:?} has an empty segment list")
            }
            Self::MissingValue(caption) => {
                write!(f, "leaf item {caption:?} has no value")
            }
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::OptionsParse(msg) => {
                write!(f, "options parse error: {msg}")
            }
            Self::DataParse(e) => write!(f, "data parse error: {e}"),
        }
    }
}

impl std::error::Error for ChartError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            Self::DataParse(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for ChartError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<serde_json::Error> for ChartError {
    fn from(e: serde_json::Error) -> Self {
        Self::DataParse(e)
    }
}

#[cfg(test)]
mod tests {
    use std::error::Error;

    use super::*;

    #[test]
    fn display_names_the_caption() {
        let err = ChartError::DuplicateCaption("A".to_owned());
        assert_eq!(
            err.to_string(),
            "duplicate caption among siblings: \"A\""
        );
    }

    #[test]
    fn io_errors_keep_their_source() {
        let err = ChartError::from(std::io::Error::other("disk"));
        assert!(err.source().is_some());
        assert!(ChartError::EmptyBranch("x".to_owned()).source().is_none());
    }
}
