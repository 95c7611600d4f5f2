//! Access-controlled verification registry
//!
//! This module provides the registry core:
//! - One admin principal, the only identity allowed to mutate state
//! - One membership set of verified principals
//! - Four operations: `verify`, `revoke`, `is_verified`, `transfer_admin`
//!
//! Every mutating operation takes the caller's identity as an explicit
//! parameter, supplied by the invoking environment. The authorization
//! check always runs before any membership check, so a non-admin caller
//! is told `NotAuthorized` regardless of the target's state. A failing
//! call leaves the registry unchanged.
//!
//! # Example
//!
//! ```rust
//! use vouch::registry::{Principal, Registry};
//!
//! let admin = Principal::new("alice");
//! let mut registry = Registry::new(admin.clone());
//!
//! // Grant verified status
//! registry.verify(&admin, Principal::new("bob")).unwrap();
//! assert!(registry.is_verified(&Principal::new("bob")));
//!
//! // Revoke it again
//! registry.revoke(&admin, &Principal::new("bob")).unwrap();
//! assert!(!registry.is_verified(&Principal::new("bob")));
//!
//! // Hand off administration
//! registry.transfer_admin(&admin, Principal::new("carol")).unwrap();
//! assert!(registry.verify(&admin, Principal::new("bob")).is_err());
//! ```

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

mod error;

pub use error::{RegistryError, RegistryResult};

/// An opaque principal identifier
///
/// A principal is whatever the invoking environment uses to attribute
/// calls (an account address, a user id). The registry assumes nothing
/// about its structure beyond comparability.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Principal(String);

impl Principal {
    /// Create a principal from any string-like identifier
    pub fn new(id: impl Into<String>) -> Self {
        Principal(id.into())
    }

    /// Get the identifier as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Principal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for Principal {
    fn from(id: &str) -> Self {
        Principal::new(id)
    }
}

impl From<String> for Principal {
    fn from(id: String) -> Self {
        Principal(id)
    }
}

/// The verification registry
///
/// Holds the current admin identity and the set of verified principals.
/// All mutation goes through the admin-gated operations below; hosts that
/// need shared access wrap the registry in their own mutual exclusion.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Registry {
    /// The single principal currently authorized to mutate state
    admin: Principal,
    /// Verified principals (BTreeSet keeps snapshots deterministic)
    verified: BTreeSet<Principal>,
}

impl Registry {
    /// Create a registry with an initial admin and no verified members
    pub fn new(admin: Principal) -> Self {
        Registry {
            admin,
            verified: BTreeSet::new(),
        }
    }

    /// The current admin
    pub fn admin(&self) -> &Principal {
        &self.admin
    }

    /// Grant verified status to `target`
    ///
    /// Fails with `NotAuthorized` unless `caller` is the current admin,
    /// then with `AlreadyVerified` if `target` is already a member.
    pub fn verify(&mut self, caller: &Principal, target: Principal) -> RegistryResult<()> {
        if caller != &self.admin {
            return Err(RegistryError::NotAuthorized);
        }
        if self.verified.contains(&target) {
            return Err(RegistryError::AlreadyVerified);
        }
        self.verified.insert(target);
        Ok(())
    }

    /// Revoke verified status from `target`
    ///
    /// Fails with `NotAuthorized` unless `caller` is the current admin,
    /// then with `NotVerified` if `target` is not a member.
    pub fn revoke(&mut self, caller: &Principal, target: &Principal) -> RegistryResult<()> {
        if caller != &self.admin {
            return Err(RegistryError::NotAuthorized);
        }
        if !self.verified.contains(target) {
            return Err(RegistryError::NotVerified);
        }
        self.verified.remove(target);
        Ok(())
    }

    /// Whether `target` is currently verified
    ///
    /// Public read: no authorization, never fails, never mutates.
    pub fn is_verified(&self, target: &Principal) -> bool {
        self.verified.contains(target)
    }

    /// Hand administrative privilege to `new_admin`
    ///
    /// Only the current admin may call this. `new_admin` is accepted
    /// without validation: self-transfer is allowed, and membership in
    /// the verified set is independent of adminship.
    pub fn transfer_admin(&mut self, caller: &Principal, new_admin: Principal) -> RegistryResult<()> {
        if caller != &self.admin {
            return Err(RegistryError::NotAuthorized);
        }
        self.admin = new_admin;
        Ok(())
    }

    /// Iterate over the verified principals in sorted order
    pub fn verified(&self) -> impl Iterator<Item = &Principal> {
        self.verified.iter()
    }

    /// Number of verified principals
    pub fn verified_count(&self) -> usize {
        self.verified.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn setup() -> (Registry, Principal, Principal, Principal) {
        let admin = Principal::new("alice");
        let target = Principal::new("bob");
        let other = Principal::new("carol");
        (Registry::new(admin.clone()), admin, target, other)
    }

    #[test]
    fn test_verify_by_admin() {
        let (mut registry, admin, target, _) = setup();

        assert!(registry.verify(&admin, target.clone()).is_ok());
        assert!(registry.is_verified(&target));
        assert_eq!(registry.verified_count(), 1);
    }

    #[test]
    fn test_verify_by_non_admin_fails() {
        let (mut registry, _, target, other) = setup();
        let before = registry.clone();

        let result = registry.verify(&other, target.clone());
        assert_eq!(result, Err(RegistryError::NotAuthorized));

        // Failed call leaves state untouched
        assert!(!registry.is_verified(&target));
        assert_eq!(registry, before);
    }

    #[test]
    fn test_verify_already_verified_fails() {
        let (mut registry, admin, target, _) = setup();
        registry.verify(&admin, target.clone()).unwrap();
        let before = registry.clone();

        let result = registry.verify(&admin, target.clone());
        assert_eq!(result, Err(RegistryError::AlreadyVerified));

        // No duplicate membership, no other change
        assert_eq!(registry.verified_count(), 1);
        assert_eq!(registry, before);
    }

    #[test]
    fn test_revoke() {
        let (mut registry, admin, target, _) = setup();
        registry.verify(&admin, target.clone()).unwrap();

        assert!(registry.revoke(&admin, &target).is_ok());
        assert!(!registry.is_verified(&target));
    }

    #[test]
    fn test_revoke_unverified_fails() {
        let (mut registry, admin, target, _) = setup();
        let before = registry.clone();

        let result = registry.revoke(&admin, &target);
        assert_eq!(result, Err(RegistryError::NotVerified));
        assert_eq!(registry, before);
    }

    #[test]
    fn test_revoke_by_non_admin_fails() {
        let (mut registry, admin, target, other) = setup();
        registry.verify(&admin, target.clone()).unwrap();
        let before = registry.clone();

        let result = registry.revoke(&other, &target);
        assert_eq!(result, Err(RegistryError::NotAuthorized));

        // Target stays verified
        assert!(registry.is_verified(&target));
        assert_eq!(registry, before);
    }

    #[test]
    fn test_authorization_checked_before_membership() {
        let (mut registry, admin, target, other) = setup();
        registry.verify(&admin, target.clone()).unwrap();

        // A non-admin verifying an already-verified target is told
        // NotAuthorized, not AlreadyVerified
        assert_eq!(
            registry.verify(&other, target.clone()),
            Err(RegistryError::NotAuthorized)
        );

        // Same for revoking a never-verified target
        assert_eq!(
            registry.revoke(&other, &Principal::new("dave")),
            Err(RegistryError::NotAuthorized)
        );
    }

    #[test]
    fn test_verify_revoke_round_trip() {
        let (mut registry, admin, target, _) = setup();

        assert!(!registry.is_verified(&target));
        registry.verify(&admin, target.clone()).unwrap();
        registry.revoke(&admin, &target).unwrap();
        assert!(!registry.is_verified(&target));
        assert_eq!(registry.verified_count(), 0);
    }

    #[test]
    fn test_transfer_admin() {
        let (mut registry, admin, target, other) = setup();

        assert!(registry.transfer_admin(&admin, other.clone()).is_ok());
        assert_eq!(registry.admin(), &other);

        // Old admin is locked out
        assert_eq!(
            registry.verify(&admin, target.clone()),
            Err(RegistryError::NotAuthorized)
        );

        // New admin is empowered
        assert!(registry.verify(&other, target.clone()).is_ok());
        assert!(registry.is_verified(&target));
    }

    #[test]
    fn test_transfer_admin_by_non_admin_fails() {
        let (mut registry, admin, _, other) = setup();

        let result = registry.transfer_admin(&other, other.clone());
        assert_eq!(result, Err(RegistryError::NotAuthorized));
        assert_eq!(registry.admin(), &admin);
    }

    #[test]
    fn test_self_transfer_allowed() {
        let (mut registry, admin, _, _) = setup();

        assert!(registry.transfer_admin(&admin, admin.clone()).is_ok());
        assert_eq!(registry.admin(), &admin);

        // Admin rights are unaffected
        assert!(registry.verify(&admin, Principal::new("bob")).is_ok());
    }

    #[test]
    fn test_transfer_to_verified_principal() {
        let (mut registry, admin, target, _) = setup();
        registry.verify(&admin, target.clone()).unwrap();

        // Verified membership and adminship are independent
        assert!(registry.transfer_admin(&admin, target.clone()).is_ok());
        assert_eq!(registry.admin(), &target);
        assert!(registry.is_verified(&target));
    }

    #[test]
    fn test_is_verified_is_public_read() {
        let (mut registry, admin, target, _) = setup();
        registry.verify(&admin, target.clone()).unwrap();
        let before = registry.clone();

        // Any observer may read; reading changes nothing
        assert!(registry.is_verified(&target));
        assert!(!registry.is_verified(&Principal::new("dave")));
        assert_eq!(registry, before);
    }

    #[test]
    fn test_verified_iteration_is_sorted() {
        let (mut registry, admin, _, _) = setup();
        registry.verify(&admin, Principal::new("zed")).unwrap();
        registry.verify(&admin, Principal::new("amy")).unwrap();

        let members: Vec<&str> = registry.verified().map(|p| p.as_str()).collect();
        assert_eq!(members, vec!["amy", "zed"]);
    }

    #[test]
    fn test_snapshot_round_trip() {
        let (mut registry, admin, target, other) = setup();
        registry.verify(&admin, target.clone()).unwrap();
        registry.transfer_admin(&admin, other.clone()).unwrap();

        let json = serde_json::to_string(&registry).unwrap();
        let restored: Registry = serde_json::from_str(&json).unwrap();

        assert_eq!(restored, registry);
        assert_eq!(restored.admin(), &other);
        assert!(restored.is_verified(&target));
    }
}
