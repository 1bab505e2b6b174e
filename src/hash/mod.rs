//! Streaming SHA-2 Digests
//!
//! Two widths of the same contract, generated from one macro so they cannot
//! drift: absorb incrementally with `update`, take a non-destructive running
//! digest with `sum`, or `finalize` to digest-and-reset in one provider
//! call.

#[macro_use]
mod api_gen;
#[doc(hidden)]
pub mod sha256;
#[doc(hidden)]
pub mod sha512;

pub use {
    sha256::Sha256,
    sha512::Sha512
};
