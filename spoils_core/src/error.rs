use thiserror::Error;

/// A fault raised by one primitive extractor.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ExtractError {
    /// A value the matcher captured could not be converted to a number.
    #[error("pattern {pattern} captured {value:?}, which is not a number")]
    Conversion { pattern: &'static str, value: String },
}

/// Failure to resolve a description key to a canonical item.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ResolveError {
    #[error("item lookup failed for description key {key}: {reason}")]
    LookupFailed { key: u64, reason: String },
}

impl ResolveError {
    #[must_use]
    pub fn lookup_failed(key: u64, reason: impl Into<String>) -> Self {
        Self::LookupFailed {
            key,
            reason: reason.into(),
        }
    }
}

/// Failure to assemble a complete aggregate for one response.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum BuildError {
    #[error(transparent)]
    Resolution(#[from] ResolveError),

    #[error("{} extractor(s) failed: {}", .0.len(), join_faults(.0))]
    Extraction(Vec<ExtractError>),
}

impl From<ExtractError> for BuildError {
    fn from(err: ExtractError) -> Self {
        Self::Extraction(vec![err])
    }
}

fn join_faults(faults: &[ExtractError]) -> String {
    faults
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Lookup of a pattern by its string key.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PatternError {
    #[error("unknown pattern: {0}")]
    Unknown(String),
}
