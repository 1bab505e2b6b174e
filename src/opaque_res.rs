//! Opaque, Accumulating Operation Results
//!
//! `Res` collapses any number of provider return codes into a single
//! success-or-failure bit without recording which call failed, keeping error
//! paths free of detail that could be observed.
use core::ffi::c_int;
use crate::error::Unspecified;

/// An opaque result accumulator.
///
/// Starts out OK; once any checked call fails it stays failed. Only the
/// final success/failure state is observable.
#[must_use = "You must handle the potential error"]
#[repr(transparent)]
pub struct Res(bool);

impl Default for Res {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl Res {
    /// A successful result.
    pub const OK: Self = Self(true);
    /// A failed result.
    pub const ERR: Self = Self(false);

    /// Creates a new accumulator in the OK state.
    #[inline]
    pub const fn new() -> Self {
        Self::OK
    }

    /// Returns `true` if no checked call has failed.
    #[inline]
    pub const fn is_ok(&self) -> bool {
        self.0
    }

    /// Returns `true` if any checked call has failed.
    #[inline]
    pub const fn is_err(&self) -> bool {
        !self.0
    }

    /// Folds a boolean condition into the accumulator.
    #[inline]
    pub fn check(&mut self, res: bool) {
        self.0 &= res;
    }

    /// Folds a C return code into the accumulator, where `0` is success.
    ///
    /// This is the convention of every wolfcrypt function this crate calls.
    #[inline]
    pub fn ensure_0(&mut self, res: c_int) {
        self.0 &= res == 0;
    }

    /// Folds another `Res` into the accumulator.
    #[inline]
    pub fn ensure(&mut self, res: Self) {
        self.0 &= res.0;
    }

    /// Converts into a `Result`, with `ok` as the success value.
    #[allow(clippy::missing_errors_doc)]
    #[inline(always)]
    pub fn unit_err<OK>(self, ok: OK) -> Result<OK, Unspecified> {
        if self.is_ok() {
            Ok(ok)
        } else {
            Err(Unspecified)
        }
    }

    /// Converts into a `Result`, computing the success value lazily.
    ///
    /// Use this when constructing the success value is only sound once the
    /// operations folded into this `Res` are known to have succeeded (for
    /// example, `assume_init` on provider contexts).
    #[allow(clippy::missing_errors_doc)]
    #[inline(always)]
    pub fn unit_err_with<F, OK>(self, ok: F) -> Result<OK, Unspecified>
        where F: FnOnce() -> OK
    {
        if self.is_ok() {
            Ok(ok())
        } else {
            Err(Unspecified)
        }
    }

    /// Panics if the accumulator is in the failed state.
    ///
    /// # Panics
    ///
    /// If any checked call failed. Intended for tests and examples.
    #[inline]
    #[track_caller]
    pub fn unwrap(self) {
        self.unit_err(()).unwrap();
    }
}
