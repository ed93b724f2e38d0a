//! Auth types shared across Forkful services.
//!
//! Token issuance and validation live in the external auth gateway; this
//! crate only extracts the identity headers the gateway injects.

pub mod identity;
