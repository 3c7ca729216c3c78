//! Errors reported by the recoverable operations of the crate

/// Failure of a matrix or model operation.
///
/// Out-of-range component or cell indexing is not represented here: it is a
/// programming error and panics.
#[derive(Debug, Clone, Copy, PartialEq, thiserror::Error)]
pub enum Error {
    /// The matrix has a zero determinant and therefore no inverse.
    #[error("matrix is singular (determinant is zero) and has no inverse")]
    SingularMatrix,

    /// A triangle refers to a vertex that does not exist.
    #[error("vertex index {index} is out of range for a model with {vertex_count} vertices")]
    VertexIndexOutOfRange { index: usize, vertex_count: usize },
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        assert_eq!(
            Error::SingularMatrix.to_string(),
            "matrix is singular (determinant is zero) and has no inverse"
        );
        let err = Error::VertexIndexOutOfRange {
            index: 9,
            vertex_count: 8,
        };
        assert_eq!(
            err.to_string(),
            "vertex index 9 is out of range for a model with 8 vertices"
        );
    }
}
