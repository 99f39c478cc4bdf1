use thiserror::Error;

/// Soft failures raised by buffer primitives. Callers recover locally (clamp,
/// reject, or alert); none of these are fatal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum EditError {
    /// A row or column outside the current buffer bounds.
    #[error("position {row}:{col} is out of range")]
    OutOfRange { row: usize, col: usize },
    /// Backward deletion requested at (0, 0).
    #[error("beginning of buffer")]
    AtBufferStart,
}
