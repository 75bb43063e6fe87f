//! Image reconciliation error types.

/// Kinds of reconciliation errors.
///
/// All of these are caller contract violations on the desired-order
/// permutation. They are raised before any storage side effect occurs and are
/// never retried.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum ReconcileErrorKind {
    /// The order list does not match the submitted image count
    #[display("Order length {actual} does not match submitted image count {expected}")]
    OrderLength {
        /// Number of submitted images
        expected: usize,
        /// Length of the supplied order
        actual: usize,
    },
    /// An order entry points outside the submitted image list
    #[display("Order index {index} is out of range for {len} submitted images")]
    OrderOutOfRange {
        /// The offending index value
        index: usize,
        /// Number of submitted images
        len: usize,
    },
    /// An order entry appears more than once
    #[display("Order index {index} appears more than once")]
    OrderDuplicate {
        /// The duplicated index value
        index: usize,
    },
}

/// Reconciliation error with location tracking.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Reconcile Error: {} at line {} in {}", kind, line, file)]
pub struct ReconcileError {
    /// The kind of error that occurred
    pub kind: ReconcileErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl ReconcileError {
    /// Create a new reconciliation error with automatic location tracking.
    #[track_caller]
    pub fn new(kind: ReconcileErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}
