//! Error types for hwtidy-core

use thiserror::Error;

/// Structural rejection reasons for documents that are not wrapped
/// inventory output. Distinct from type defects: a rejected document is
/// skipped outright and never coerced or counted in corpus statistics.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// Root object has no `hardware` envelope
    #[error("missing 'hardware' envelope object")]
    MissingEnvelope,

    /// Envelope carries no `data` payload object
    #[error("envelope has no 'data' object")]
    MissingPayload,

    /// Payload does not look like lshw output
    #[error("inventory data is missing 'id' or 'class' fields")]
    MissingIdentity,
}

/// Result type alias for hwtidy-core operations
pub type Result<T> = std::result::Result<T, Error>;
