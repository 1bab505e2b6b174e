//! Advanced Encryption Standard (AES)
pub mod block;
pub mod ctr;

#[cfg(test)]
pub mod test_utils;

pub use block::AesBlock;
pub use ctr::AesCtr;

use wolf_crypto_sys::{
    Aes as AesLL,
    wc_AesInit,
    INVALID_DEVID, AES_ENCRYPTION, AES_DECRYPTION,
};

use crate::error::KeySizeError;
use crate::opaque_res::Res;
use zeroize::Zeroize;
use core::ffi::c_int;

/// The AES block size in bytes.
pub const BLOCK_SIZE: usize = 16;

/// Validated AES key material.
///
/// The variant fixes the key schedule length, so a `Key` that exists is a
/// key the provider will accept. Construct one from raw bytes with
/// [`Key::new`], or directly from a fixed-size array. Zeroed on drop.
#[cfg_attr(test, derive(Debug, Clone, PartialEq))]
pub enum Key {
    Aes256([u8; 32]),
    Aes192([u8; 24]),
    Aes128([u8; 16])
}

impl Key {
    /// Validates `key` as AES key material.
    ///
    /// Accepts 16, 24, or 32 byte slices (AES-128, AES-192, AES-256).
    ///
    /// # Errors
    ///
    /// Any other length fails with a [`KeySizeError`] carrying the rejected
    /// length.
    ///
    /// # Example
    ///
    /// ```
    /// use wolf_accel::aes::Key;
    ///
    /// assert!(Key::new(&[0u8; 24]).is_ok());
    ///
    /// let err = Key::new(&[0u8; 17]).unwrap_err();
    /// assert_eq!(err.size(), 17);
    /// ```
    pub fn new(key: &[u8]) -> Result<Self, KeySizeError> {
        match key.len() {
            16 => {
                let mut buf = [0u8; 16];
                buf.copy_from_slice(key);
                Ok(Self::Aes128(buf))
            },
            24 => {
                let mut buf = [0u8; 24];
                buf.copy_from_slice(key);
                Ok(Self::Aes192(buf))
            },
            32 => {
                let mut buf = [0u8; 32];
                buf.copy_from_slice(key);
                Ok(Self::Aes256(buf))
            },
            len => Err(KeySizeError::new(len))
        }
    }

    /// The key length in bytes.
    #[inline]
    pub const fn capacity(&self) -> usize {
        match self {
            Self::Aes256(_) => 32,
            Self::Aes192(_) => 24,
            Self::Aes128(_) => 16
        }
    }

    /// Returns the key material as a slice.
    #[inline]
    pub const fn as_slice(&self) -> &[u8] {
        match self {
            Self::Aes256(buf) => buf.as_slice(),
            Self::Aes192(buf) => buf.as_slice(),
            Self::Aes128(buf) => buf.as_slice()
        }
    }

    #[inline]
    fn as_mut_slice(&mut self) -> &mut [u8] {
        match self {
            Self::Aes256(buf) => buf.as_mut_slice(),
            Self::Aes192(buf) => buf.as_mut_slice(),
            Self::Aes128(buf) => buf.as_mut_slice()
        }
    }

    /// Zeros out the key material.
    #[inline]
    pub fn zero(&mut self) {
        self.as_mut_slice().zeroize();
    }
}

impl Drop for Key {
    fn drop(&mut self) {
        self.zero();
    }
}

impl From<[u8; 32]> for Key {
    #[inline]
    fn from(value: [u8; 32]) -> Self {
        Self::Aes256(value)
    }
}

impl From<[u8; 24]> for Key {
    #[inline]
    fn from(value: [u8; 24]) -> Self {
        Self::Aes192(value)
    }
}

impl From<[u8; 16]> for Key {
    #[inline]
    fn from(value: [u8; 16]) -> Self {
        Self::Aes128(value)
    }
}

impl<'s> TryFrom<&'s [u8]> for Key {
    type Error = KeySizeError;

    #[inline]
    fn try_from(value: &'s [u8]) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// The direction a provider context is keyed for.
#[derive(Clone, Copy)]
pub(crate) enum Direction {
    Encrypt,
    Decrypt
}

impl Direction {
    #[inline]
    pub(crate) const fn dir(self) -> c_int {
        match self {
            Self::Encrypt => AES_ENCRYPTION as c_int,
            Self::Decrypt => AES_DECRYPTION as c_int
        }
    }
}

/// Initializes a provider AES context in place.
///
/// # Safety
///
/// `aes` must point to writable memory the size of the context. On failure
/// the memory must not be treated as initialized.
#[inline]
pub(crate) unsafe fn init_aes(aes: *mut AesLL) -> Res {
    let mut res = Res::new();
    res.ensure_0(wc_AesInit(aes, core::ptr::null_mut(), INVALID_DEVID));
    res
}
