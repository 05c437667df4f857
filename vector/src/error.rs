#[derive(thiserror::Error, Debug)]
pub enum VectorError {
    #[error("vector can't be empty")]
    Empty,

    #[error("{value} is not a valid number in a vector (got {kind})")]
    NotANumber { value: String, kind: &'static str },

    #[error("both must be vectors and have the same length ({left} != {right})")]
    ShapeMismatch { left: usize, right: usize },

    #[error("only 2d vectors can be plotted, got dimension {dimension}")]
    NotPlanar { dimension: usize },

    #[error("index {index} out of range for vector of dimension {dimension}")]
    IndexOutOfRange { index: usize, dimension: usize },

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

impl VectorError {
    /// Errors caused by a value of the wrong kind or shape.
    pub fn is_type_error(&self) -> bool {
        matches!(
            self,
            VectorError::NotANumber { .. }
                | VectorError::ShapeMismatch { .. }
                | VectorError::NotPlanar { .. }
        )
    }

    /// Errors caused by an acceptable kind of value that is out of range.
    pub fn is_value_error(&self) -> bool {
        matches!(
            self,
            VectorError::Empty | VectorError::IndexOutOfRange { .. }
        )
    }
}

#[test]
fn test_error_kinds() {
    assert!(VectorError::Empty.is_value_error());
    assert!(!VectorError::Empty.is_type_error());

    let err = VectorError::ShapeMismatch { left: 2, right: 3 };
    assert!(err.is_type_error());
    assert_eq!(
        err.to_string(),
        "both must be vectors and have the same length (2 != 3)"
    );

    let err = VectorError::NotANumber {
        value: "\"a\"".to_string(),
        kind: "string",
    };
    assert!(err.is_type_error());
    assert_eq!(
        err.to_string(),
        "\"a\" is not a valid number in a vector (got string)"
    );

    assert!(VectorError::IndexOutOfRange {
        index: 5,
        dimension: 3
    }
    .is_value_error());
}
