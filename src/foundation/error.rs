/// Convenience result type used across the crate.
pub type PhotostoryResult<T> = Result<T, PhotostoryError>;

/// Error taxonomy for layout, story parsing and planning.
///
/// Every error aborts the layout call that raised it; no partial layout is returned.
#[derive(thiserror::Error, Debug)]
pub enum PhotostoryError {
    /// Canvas width or height is not a positive finite number.
    #[error("invalid canvas: {0}")]
    InvalidCanvas(String),

    /// An operation that needs at least one element was given none.
    #[error("empty input: {0}")]
    EmptyInput(String),

    /// The packer found no valid position for a rectangle.
    #[error("placement error: {0}")]
    Placement(String),

    /// Malformed rectangles, story fields or coordinates.
    #[error("validation error: {0}")]
    Validation(String),

    /// Errors when serializing or deserializing data structures.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl PhotostoryError {
    /// Build a [`PhotostoryError::InvalidCanvas`] value.
    pub fn invalid_canvas(msg: impl Into<String>) -> Self {
        Self::InvalidCanvas(msg.into())
    }

    /// Build a [`PhotostoryError::EmptyInput`] value.
    pub fn empty_input(msg: impl Into<String>) -> Self {
        Self::EmptyInput(msg.into())
    }

    /// Build a [`PhotostoryError::Placement`] value.
    pub fn placement(msg: impl Into<String>) -> Self {
        Self::Placement(msg.into())
    }

    /// Build a [`PhotostoryError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`PhotostoryError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
