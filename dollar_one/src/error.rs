use thiserror::Error;

pub type Result<T> = std::result::Result<T, GestureError>;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum GestureError {
    #[error("a stroke needs at least 2 points, got {count}")]
    EmptyInput { count: usize },

    #[error("stroke point {index} has a non-finite coordinate")]
    NonFiniteInput { index: usize },

    #[error("stroke has a zero-size bounding box ({width} x {height}); scale is undefined")]
    DegenerateGesture { width: f64, height: f64 },

    #[error("no gesture templates stored")]
    NoTemplates,

    #[error("template resolution {found} does not match candidate resolution {expected}")]
    ResolutionMismatch { expected: usize, found: usize },

    #[error("malformed template: {reason}")]
    MalformedTemplate { reason: String },

    #[error("invalid engine configuration: {reason}")]
    InvalidConfig { reason: String },
}

impl GestureError {
    #[must_use]
    pub fn malformed(reason: impl Into<String>) -> Self {
        Self::MalformedTemplate {
            reason: reason.into(),
        }
    }
}

impl From<serde_json::Error> for GestureError {
    fn from(err: serde_json::Error) -> Self {
        Self::malformed(err.to_string())
    }
}

impl From<bincode::Error> for GestureError {
    fn from(err: bincode::Error) -> Self {
        Self::malformed(err.to_string())
    }
}
