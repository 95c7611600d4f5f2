//! Boundary encoding for registry calls
//!
//! Hosting environments (the CLI, the WebSocket server, anything else
//! that attributes a caller identity to requests) talk to the registry
//! through these tagged message types. A mutating call answers with a
//! bare `Ok` or an `Err` carrying a stable numeric code; the membership
//! read answers with a plain boolean and can never fail.
//!
//! Error codes:
//!
//! | Code | Meaning                                  |
//! |------|------------------------------------------|
//! | 100  | caller is not the current admin          |
//! | 101  | target already in the verified set       |
//! | 102  | target not in the verified set           |

use serde::{Deserialize, Serialize};

use crate::registry::{Principal, Registry, RegistryError};

/// A registry call with the caller identity attributed by the host
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum Call {
    /// Grant verified status to `target`
    Verify {
        /// Identity the host attributes to this call
        caller: Principal,
        /// Principal to verify
        target: Principal,
    },
    /// Revoke verified status from `target`
    Revoke {
        /// Identity the host attributes to this call
        caller: Principal,
        /// Principal to revoke
        target: Principal,
    },
    /// Read whether `target` is verified (no caller: public read)
    IsVerified {
        /// Principal to look up
        target: Principal,
    },
    /// Hand administrative privilege to `new_admin`
    TransferAdmin {
        /// Identity the host attributes to this call
        caller: Principal,
        /// Principal receiving adminship
        new_admin: Principal,
    },
}

/// The result of a registry call
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum Outcome {
    /// Mutating call succeeded (no payload)
    Ok,
    /// Answer to an `IsVerified` call
    Verified {
        /// Current membership of the queried principal
        verified: bool,
    },
    /// Call failed with one of the registry error codes
    Err {
        /// Numeric error code (100, 101, or 102)
        code: u16,
    },
}

impl From<RegistryError> for Outcome {
    fn from(err: RegistryError) -> Self {
        Outcome::Err { code: err.code() }
    }
}

/// Apply a decoded call to the registry and encode the result
///
/// The registry performs the authorization check itself; the host's only
/// duty is attributing the caller. `IsVerified` never yields `Err`.
pub fn dispatch(registry: &mut Registry, call: Call) -> Outcome {
    match call {
        Call::Verify { caller, target } => match registry.verify(&caller, target) {
            Ok(()) => Outcome::Ok,
            Err(e) => e.into(),
        },
        Call::Revoke { caller, target } => match registry.revoke(&caller, &target) {
            Ok(()) => Outcome::Ok,
            Err(e) => e.into(),
        },
        Call::IsVerified { target } => Outcome::Verified {
            verified: registry.is_verified(&target),
        },
        Call::TransferAdmin { caller, new_admin } => {
            match registry.transfer_admin(&caller, new_admin) {
                Ok(()) => Outcome::Ok,
                Err(e) => e.into(),
            }
        }
    }
}
