//! Error types for the contract loading boundary.

use super::diagnostic::{SourceDiagnostic, ViolationList};

/// Errors that can occur when turning caller input into a validated shape.
#[derive(Debug, thiserror::Error)]
pub enum ContractError {
    /// JSON text was malformed and never reached shape matching.
    #[error("JSON deserialization failed: {message}")]
    Deserialize {
        /// Parser message.
        message: String,
        /// Source-located diagnostic, when the parser reported a position.
        diagnostic: Option<SourceDiagnostic>,
    },

    /// The input was well-formed JSON that broke the named contract.
    #[error("{contract} rejected input: {violations}")]
    Rejected {
        /// Name of the contract that rejected the input.
        contract: &'static str,
        /// Every violation found.
        violations: ViolationList,
    },

    /// Typed input or validated output could not be encoded as JSON.
    #[error("failed to encode {contract} as JSON: {message}")]
    Encode {
        /// Name of the contract being encoded.
        contract: &'static str,
        /// Serializer message.
        message: String,
    },
}

impl ContractError {
    /// Returns the source diagnostic for malformed JSON text.
    #[must_use]
    pub const fn diagnostic(&self) -> Option<&SourceDiagnostic> {
        match self {
            Self::Deserialize { diagnostic, .. } => diagnostic.as_ref(),
            Self::Rejected { .. } | Self::Encode { .. } => None,
        }
    }

    /// Returns the collected violations when the contract rejected input.
    #[must_use]
    pub const fn violations(&self) -> Option<&ViolationList> {
        match self {
            Self::Rejected { violations, .. } => Some(violations),
            Self::Deserialize { .. } | Self::Encode { .. } => None,
        }
    }
}
