//! Errors surfaced by the sampling core.
//!
//! Only bad construction parameters and lookups of missing outcomes are
//! reported. Negative weights, negative curve outputs and sampling an empty
//! table are caller precondition violations and are not checked.

/// Errors that can occur while building or editing a sampler
#[derive(Debug, Clone, PartialEq)]
pub enum SamplingError {
    /// A constructor parameter makes sampling impossible
    InvalidArgument { name: &'static str, reason: String },
    /// The outcome to remove is not in the table
    NotFound,
}

impl SamplingError {
    pub(crate) fn invalid(name: &'static str, reason: impl Into<String>) -> Self {
        SamplingError::InvalidArgument {
            name,
            reason: reason.into(),
        }
    }
}

impl std::fmt::Display for SamplingError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SamplingError::InvalidArgument { name, reason } => {
                write!(f, "Invalid argument `{}`: {}", name, reason)
            }
            SamplingError::NotFound => write!(f, "Outcome not found in table"),
        }
    }
}

impl std::error::Error for SamplingError {}
