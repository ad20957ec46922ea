//! Field-level error surface.

use thiserror::Error;

/// Error carried through a field's completion channel.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FieldError {
    /// Raised for every denied protected field. Unauthenticated callers and
    /// callers lacking the required role receive the same error, so the
    /// response never reveals where protection boundaries lie.
    #[error("You are not allowed to do this")]
    ForbiddenAccess,

    /// Failure produced by the underlying business resolver.
    #[error("{0}")]
    Resolver(String),
}

pub type FieldResult<T> = Result<T, FieldError>;
