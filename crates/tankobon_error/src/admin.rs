//! Admin service error types.

/// Kinds of admin service errors.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum AdminErrorKind {
    /// The acting user lacks a required permission
    #[display("Forbidden: {}", _0)]
    Forbidden(String),
    /// The acting user must have two-factor authentication enabled
    #[display("Two-factor authentication required")]
    TwoFactorRequired,
    /// The operation conflicts with the target's current state
    #[display("Conflict: {}", _0)]
    Conflict(String),
    /// Supplied input failed validation
    #[display("Invalid input: {}", _0)]
    Validation(String),
}

/// Admin service error with location tracking.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Admin Error: {} at line {} in {}", kind, line, file)]
pub struct AdminError {
    /// The kind of error that occurred
    pub kind: AdminErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl AdminError {
    /// Create a new admin error with automatic location tracking.
    #[track_caller]
    pub fn new(kind: AdminErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }

    /// Shorthand for a state conflict on the target entity.
    #[track_caller]
    pub fn conflict(message: impl Into<String>) -> Self {
        Self::new(AdminErrorKind::Conflict(message.into()))
    }
}
