//! Fixed-Size Containers for IVs and Sensitive Bytes
use zeroize::Zeroize;
use core::convert::TryFrom;
use core::fmt;

/// Error returned when the provided slice is not the expected length.
#[derive(Debug)]
pub struct InvalidSize;

impl fmt::Display for InvalidSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("InvalidSize")
    }
}

std! {
    impl std::error::Error for InvalidSize {}
}

/// A 16 byte initialization vector, matching the AES block size.
///
/// Length is enforced structurally: an `Iv` can only be built from exactly
/// 16 bytes, so the cipher layer never needs to re-check it. The type
/// purposefully does not derive `Copy`; reusing an IV across streams must
/// be spelled out with [`copy`](Self::copy).
#[repr(transparent)]
#[cfg_attr(test, derive(Debug))]
pub struct Iv {
    inner: [u8; 16]
}

impl Iv {
    /// The IV size in bytes.
    pub const SIZE: usize = 16;

    /// Creates a new IV from exactly [`SIZE`](Self::SIZE) bytes.
    pub const fn new(inner: [u8; Iv::SIZE]) -> Self {
        Self { inner }
    }

    /// Returns the IV as a slice.
    #[inline]
    pub const fn slice(&self) -> &[u8] {
        self.inner.as_slice()
    }

    /// Zeros out the IV.
    #[inline]
    pub fn zero(&mut self) {
        self.inner.as_mut_slice().zeroize();
    }

    /// Creates a copy of this IV.
    ///
    /// A keystream is defined by (key, IV); feeding the same pair to two
    /// streams yields the same keystream. This method exists so that doing
    /// so is a visible decision.
    #[inline]
    #[must_use]
    pub const fn copy(&self) -> Self {
        Self::new(self.inner)
    }
}

impl From<[u8; Iv::SIZE]> for Iv {
    #[inline]
    fn from(value: [u8; Iv::SIZE]) -> Self {
        Self::new(value)
    }
}

impl<'s> From<&'s [u8; Iv::SIZE]> for Iv {
    #[inline]
    fn from(value: &'s [u8; Iv::SIZE]) -> Self {
        Self::new(*value)
    }
}

impl<'s> TryFrom<&'s [u8]> for Iv {
    type Error = InvalidSize;

    fn try_from(value: &'s [u8]) -> Result<Self, Self::Error> {
        match value.try_into() {
            Ok(res) => Ok(Self::new(res)),
            Err(_) => Err(InvalidSize)
        }
    }
}

#[cfg(test)]
impl proptest::arbitrary::Arbitrary for Iv {
    type Parameters = ();

    fn arbitrary_with(_args: Self::Parameters) -> Self::Strategy {
        use proptest::strategy::Strategy as _;
        proptest::arbitrary::any::<[u8; Iv::SIZE]>().prop_map(Iv::new).boxed()
    }

    type Strategy = proptest::prelude::BoxedStrategy<Self>;
}
