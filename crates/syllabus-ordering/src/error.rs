//! Error type for ordering operations.

/// Boxed error carried by [`OrderingError::Storage`].
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Error type for ordering operations.
///
/// None of these are retried internally: a shift replayed without
/// re-reading the scope could apply twice.
#[derive(Debug, thiserror::Error)]
pub enum OrderingError {
    /// The item or scope does not exist.
    #[error("{0}")]
    NotFound(String),

    /// The request cannot be applied to the scope as it currently stands.
    #[error("{0}")]
    InvalidInput(String),

    /// The storage layer failed; the transaction was rolled back.
    #[error("storage error: {0}")]
    Storage(#[source] BoxError),
}

impl OrderingError {
    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    pub fn storage<E>(err: E) -> Self
    where
        E: Into<BoxError>,
    {
        Self::Storage(err.into())
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }

    pub fn is_invalid_input(&self) -> bool {
        matches!(self, Self::InvalidInput(_))
    }

    pub fn is_storage(&self) -> bool {
        matches!(self, Self::Storage(_))
    }
}
