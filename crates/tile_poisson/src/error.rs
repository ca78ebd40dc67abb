//! Error types and result alias for the crate.
//!
//! This module defines [`enum@crate::error::Error`] and the crate-wide [Result] alias.
//! Variants cover rejected sampler inputs. Broken internal invariants are not
//! reported here; they panic.
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[non_exhaustive]
#[derive(Debug, Error, PartialEq)]
pub enum Error {
    #[error("kernel has no capacity; at least one point slot is required")]
    EmptyKernel,

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}
