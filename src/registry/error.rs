//! Registry error types

use thiserror::Error;

/// Errors that can occur when calling a registry operation
///
/// Every variant is a precondition violation, recoverable by the caller.
/// A failing call never mutates registry state.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegistryError {
    /// The caller is not the current admin
    #[error("caller is not the current admin")]
    NotAuthorized,

    /// The target principal is already in the verified set
    #[error("principal is already verified")]
    AlreadyVerified,

    /// The target principal is not in the verified set
    #[error("principal is not verified")]
    NotVerified,
}

impl RegistryError {
    /// Numeric code used at the boundary (see the protocol module)
    pub const fn code(&self) -> u16 {
        match self {
            RegistryError::NotAuthorized => 100,
            RegistryError::AlreadyVerified => 101,
            RegistryError::NotVerified => 102,
        }
    }

    /// Decode a boundary code back into an error
    pub fn from_code(code: u16) -> Option<Self> {
        match code {
            100 => Some(RegistryError::NotAuthorized),
            101 => Some(RegistryError::AlreadyVerified),
            102 => Some(RegistryError::NotVerified),
            _ => None,
        }
    }
}

/// Result type for registry operations
pub type RegistryResult<T> = Result<T, RegistryError>;
