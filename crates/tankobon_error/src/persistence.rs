//! Persistence gateway error types.

/// Kinds of persistence errors.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum PersistenceErrorKind {
    /// Entity referenced by id does not exist
    #[display("{entity} {id} not found")]
    NotFound {
        /// Entity family (manga, chapter, user, ...)
        entity: &'static str,
        /// Identifier that failed to resolve
        id: String,
    },
    /// A uniqueness or state constraint was violated
    #[display("Conflict: {}", _0)]
    Conflict(String),
    /// The backing store is unreachable
    #[display("Connection failed: {}", _0)]
    Connection(String),
}

/// Persistence error with location tracking.
///
/// # Examples
///
/// ```
/// use tankobon_error::{PersistenceError, PersistenceErrorKind};
///
/// let err = PersistenceError::new(PersistenceErrorKind::NotFound {
///     entity: "chapter",
///     id: "42".to_string(),
/// });
/// assert!(format!("{}", err).contains("chapter 42 not found"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Persistence Error: {} at line {} in {}", kind, line, file)]
pub struct PersistenceError {
    /// The kind of error that occurred
    pub kind: PersistenceErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl PersistenceError {
    /// Create a new persistence error with automatic location tracking.
    #[track_caller]
    pub fn new(kind: PersistenceErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }

    /// Shorthand for a not-found error on a named entity family.
    #[track_caller]
    pub fn not_found(entity: &'static str, id: impl ToString) -> Self {
        Self::new(PersistenceErrorKind::NotFound {
            entity,
            id: id.to_string(),
        })
    }
}
