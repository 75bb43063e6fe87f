//! Top-level error wrapper types.

use crate::{
    AdminError, AdminErrorKind, ConfigError, PersistenceError, PersistenceErrorKind,
    ReconcileError, StorageError, StorageErrorKind,
};

/// The foundation error enum for the Tankobon workspace.
///
/// # Examples
///
/// ```
/// use tankobon_error::{TankobonError, ConfigError};
///
/// let cfg_err = ConfigError::new("missing storage root");
/// let err: TankobonError = cfg_err.into();
/// assert!(format!("{}", err).contains("Config Error"));
/// ```
#[derive(Debug, derive_more::From, derive_more::Display, derive_more::Error)]
pub enum TankobonErrorKind {
    /// Object storage error
    #[from(StorageError)]
    Storage(StorageError),
    /// Image reconciliation precondition failure
    #[from(ReconcileError)]
    Reconcile(ReconcileError),
    /// Persistence gateway error
    #[from(PersistenceError)]
    Persistence(PersistenceError),
    /// Admin service error
    #[from(AdminError)]
    Admin(AdminError),
    /// Configuration error
    #[from(ConfigError)]
    Config(ConfigError),
}

/// Caller-visible failure classification.
///
/// The surrounding system renders failures in tiers: validation (422),
/// not-found (404), state conflict (406), authorization (403) and everything
/// else (500). Classification lives here so route layers never match on error
/// strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, derive_more::Display)]
pub enum FailureClass {
    /// Malformed or rejected input (422-equivalent)
    Validation,
    /// Referenced entity does not exist (404-equivalent)
    NotFound,
    /// Operation conflicts with current state (406-equivalent)
    Conflict,
    /// Actor is not allowed to perform the operation (403-equivalent)
    Forbidden,
    /// Unexpected internal failure (500-equivalent)
    Internal,
}

/// Tankobon error with kind discrimination.
///
/// # Examples
///
/// ```
/// use tankobon_error::{TankobonResult, PersistenceError};
///
/// fn load() -> TankobonResult<()> {
///     Err(PersistenceError::not_found("manga", 7))?
/// }
///
/// assert!(load().is_err());
/// ```
#[derive(Debug, derive_more::Display, derive_more::Error)]
#[display("Tankobon Error: {}", _0)]
pub struct TankobonError(Box<TankobonErrorKind>);

impl TankobonError {
    /// Create a new error from a kind.
    pub fn new(kind: TankobonErrorKind) -> Self {
        Self(Box::new(kind))
    }

    /// Get the error kind.
    pub fn kind(&self) -> &TankobonErrorKind {
        &self.0
    }

    /// Classify this error for the caller-visible response tier.
    pub fn class(&self) -> FailureClass {
        match self.kind() {
            TankobonErrorKind::Reconcile(_) => FailureClass::Validation,
            TankobonErrorKind::Storage(e) => match e.kind {
                StorageErrorKind::NotFound(_) => FailureClass::NotFound,
                _ => FailureClass::Internal,
            },
            TankobonErrorKind::Persistence(e) => match &e.kind {
                PersistenceErrorKind::NotFound { .. } => FailureClass::NotFound,
                PersistenceErrorKind::Conflict(_) => FailureClass::Conflict,
                PersistenceErrorKind::Connection(_) => FailureClass::Internal,
            },
            TankobonErrorKind::Admin(e) => match &e.kind {
                AdminErrorKind::Forbidden(_) | AdminErrorKind::TwoFactorRequired => {
                    FailureClass::Forbidden
                }
                AdminErrorKind::Conflict(_) => FailureClass::Conflict,
                AdminErrorKind::Validation(_) => FailureClass::Validation,
            },
            TankobonErrorKind::Config(_) => FailureClass::Internal,
        }
    }
}

// Generic From implementation for any type that converts to TankobonErrorKind
impl<T> From<T> for TankobonError
where
    T: Into<TankobonErrorKind>,
{
    fn from(err: T) -> Self {
        Self::new(err.into())
    }
}

/// Result type for Tankobon operations.
pub type TankobonResult<T> = std::result::Result<T, TankobonError>;
