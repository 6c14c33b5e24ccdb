//! Wire and domain types shared by the storefront client crates.

pub mod domain;
pub mod error;
pub mod protocol;
