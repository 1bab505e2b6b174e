//! Drop-in AES and SHA-2 primitives backed by wolfSSL's wolfcrypt.
//!
//! This crate adapts three primitive families to the familiar streaming
//! shapes while delegating every transform to wolfcrypt:
//!
//! - [`aes::AesBlock`]: the raw 16-byte block transform (AES-128/192/256).
//! - [`aes::AesCtr`]: AES in counter mode, an incremental XOR keystream.
//! - [`hash::Sha256`] / [`hash::Sha512`]: streaming digests with
//!   non-destructive [`sum`], [`reset`], and provider-native finalize.
//!
//! All state lives in exclusively owned provider contexts; nothing is global
//! and nothing blocks. Key and IV material is validated up front and zeroed
//! on drop.
//!
//! ```
//! use wolf_accel::aes::{Key, AesCtr};
//! use wolf_accel::buf::Iv;
//! use wolf_accel::hash::Sha256;
//!
//! let key = Key::new(&[7u8; 32]).unwrap();
//! let iv = Iv::new([1u8; 16]);
//!
//! let mut stream = AesCtr::new(&key, &iv).unwrap();
//! let mut msg = *b"attack at dawn!!";
//! assert!(stream.apply_keystream_in_place(&mut msg).is_ok());
//! assert_ne!(&msg, b"attack at dawn!!");
//!
//! let mut hasher = Sha256::new().unwrap();
//! assert!(hasher.try_update(&msg).is_ok());
//! let digest = hasher.try_sum().unwrap();
//! assert_eq!(digest.len(), Sha256::SIZE);
//! ```
//!
//! [`sum`]: hash::Sha256::try_sum
//! [`reset`]: hash::Sha256::reset
#![cfg_attr(docsrs, feature(doc_cfg))]
#![cfg_attr(not(any(test, feature = "std")), no_std)]
#![warn(
    clippy::pedantic,
    clippy::nursery,
    clippy::all
)]
// lengths are checked against u32::MAX before every cast
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::inline_always)]

#[cfg(any(test, feature = "alloc"))]
extern crate alloc;

#[cfg(test)]
extern crate std;

#[macro_use]
mod macros;

pub mod buf;
pub mod opaque_res;
mod error;

pub mod aes;
pub mod hash;

pub use error::KeySizeError;
pub use error::Unspecified;

#[must_use]
pub(crate) const fn const_can_cast_u32<const S: usize>() -> bool {
    S <= (u32::MAX as usize)
}

#[inline]
#[must_use]
pub(crate) const fn can_cast_u32(len: usize) -> bool {
    len <= (u32::MAX as usize)
}
