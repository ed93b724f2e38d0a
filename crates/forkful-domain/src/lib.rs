//! Domain algorithms and validation rules shared across Forkful services.
//!
//! This crate contains only pure types with no framework dependencies.
//! Import in `usecase/` and `domain/` layers; never in `infra/` or `handlers/`.

pub mod data_uri;
pub mod shopping_list;
pub mod validate;
