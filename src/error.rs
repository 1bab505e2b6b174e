use core::fmt;

/// The key handed to a cipher constructor was not a valid AES key size.
///
/// Valid sizes are 16, 24, and 32 bytes (AES-128, AES-192, AES-256). The
/// rejected length is carried for diagnostics; key material itself never
/// appears in an error.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct KeySizeError(usize);

impl KeySizeError {
    #[inline]
    pub(crate) const fn new(size: usize) -> Self {
        Self(size)
    }

    /// The rejected key length in bytes.
    #[inline]
    pub const fn size(&self) -> usize {
        self.0
    }
}

impl fmt::Display for KeySizeError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "invalid key size {}", self.0)
    }
}

/// An unspecified failure in a cryptographic operation.
///
/// Cryptographic APIs deliberately avoid describing why an operation failed,
/// as the reason itself can leak information. `Unspecified` is the
/// non-descriptive error surfaced for every failure that is not a
/// construction-time parameter error.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Unspecified;

impl fmt::Display for Unspecified {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("Unspecified")
    }
}

std! {
    impl std::error::Error for KeySizeError {}
    impl std::error::Error for Unspecified {}
}
