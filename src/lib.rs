//! # Vouch
//!
//! A minimal access-controlled verification registry.
//!
//! ## Features
//!
//! - **Single-admin authorization**: only the current admin may mutate state
//! - **Boolean membership**: a principal is verified or it is not
//! - **Public reads**: anyone may query verified status
//! - **Admin handoff** via `transfer_admin`
//!
//! ## Quick Start
//!
//! ```rust
//! use vouch::{Principal, Registry};
//!
//! let admin = Principal::new("alice");
//! let mut registry = Registry::new(admin.clone());
//!
//! registry.verify(&admin, Principal::new("bob")).unwrap();
//! assert!(registry.is_verified(&Principal::new("bob")));
//!
//! // Non-admin callers are refused before anything else is checked
//! let outsider = Principal::new("carol");
//! assert!(registry.verify(&outsider, Principal::new("dave")).is_err());
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │               HOST LAYER                    │
//! │   CLI (snapshot file) | WebSocket server    │
//! │   attributes a caller identity per call     │
//! └─────────────────────┬───────────────────────┘
//!                       │
//! ┌─────────────────────▼───────────────────────┐
//! │             PROTOCOL LAYER                  │
//! │   tagged Call / Outcome messages (JSON)     │
//! └─────────────────────┬───────────────────────┘
//!                       │
//! ┌─────────────────────▼───────────────────────┐
//! │              REGISTRY CORE                  │
//! │   admin cell | verified set | auth gate     │
//! └─────────────────────────────────────────────┘
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod protocol;
pub mod registry;

// Re-export main types at crate root
pub use registry::{Principal, Registry, RegistryError, RegistryResult};
