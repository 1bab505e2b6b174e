/// Generates the full streaming API for one digest width.
///
/// Every width shares the same contract: updates absorb all input, `sum`
/// never disturbs the running state (the provider's finalize is destructive,
/// so `sum` finalizes a copy of the context), `finalize` finalizes and
/// resets in one provider call, and `reset` returns to the empty state.
macro_rules! make_api {
    (
        name: $name:ident,
        wc: $wc:ty,
        size: $size:literal,
        block_size: $block_size:literal,
        init: $init:ident,
        update: $update:ident,
        finalize: $finalize:ident,
        copy: $copy:ident,
        free: $free:ident $(,)?
    ) => {
        #[doc = concat!("The `", stringify!($name), "` streaming hasher.")]
        #[doc = ""]
        #[doc = "Absorbs input incrementally and produces the digest of"]
        #[doc = "everything written so far on demand. Summing is"]
        #[doc = "non-destructive: writes may continue afterwards and later"]
        #[doc = "sums cover the whole stream."]
        #[doc = ""]
        #[doc = "# Example"]
        #[doc = ""]
        #[doc = "```"]
        #[doc = concat!("use wolf_accel::hash::", stringify!($name), ";")]
        #[doc = ""]
        #[doc = concat!("let mut hasher = ", stringify!($name), "::new().unwrap();")]
        #[doc = "assert!(hasher.try_update(b\"hello\").is_ok());"]
        #[doc = ""]
        #[doc = "let running = hasher.try_sum().unwrap();"]
        #[doc = ""]
        #[doc = "// the running sum did not disturb the stream"]
        #[doc = "assert!(hasher.try_update(b\" world\").is_ok());"]
        #[doc = "let full = hasher.try_sum().unwrap();"]
        #[doc = ""]
        #[doc = "assert_ne!(running, full);"]
        #[doc = concat!("assert_eq!(full.len(), ", stringify!($name), "::SIZE);")]
        #[doc = "```"]
        #[repr(transparent)]
        pub struct $name {
            inner: $wc
        }

        impl $name {
            /// The digest size in bytes.
            pub const SIZE: usize = $size;
            /// The internal compression block size in bytes.
            pub const BLOCK_SIZE: usize = $block_size;

            #[doc = concat!("Creates a new `", stringify!($name), "` in the empty state.")]
            #[doc = ""]
            #[doc = "# Errors"]
            #[doc = ""]
            #[doc = concat!("If the provider's `", stringify!($init), "` fails.")]
            pub fn new() -> Result<Self, $crate::Unspecified> {
                let mut res = $crate::opaque_res::Res::new();
                let mut inner = ::core::mem::MaybeUninit::<$wc>::uninit();

                unsafe {
                    res.ensure_0($init(inner.as_mut_ptr()));
                    res.unit_err_with(|| Self { inner: inner.assume_init() })
                }
            }

            /// Reinitializes to the empty state, discarding everything
            /// written so far.
            pub fn reset(&mut self) -> $crate::opaque_res::Res {
                let mut res = $crate::opaque_res::Res::new();

                unsafe {
                    res.ensure_0($init(::core::ptr::addr_of_mut!(self.inner)));
                }

                res
            }

            /// Absorbs `data` into the running state, without any runtime
            /// checks.
            ///
            /// # Safety
            ///
            /// `data.len()` must be representable as a `u32`.
            #[inline]
            pub unsafe fn update_unchecked(&mut self, data: &[u8]) -> $crate::opaque_res::Res {
                let mut res = $crate::opaque_res::Res::new();

                res.ensure_0($update(
                    ::core::ptr::addr_of_mut!(self.inner),
                    data.as_ptr(),
                    data.len() as u32
                ));

                res
            }

            /// Absorbs all of `data` into the running state.
            ///
            /// There is no partial write; either every byte is absorbed or
            /// the state is unchanged and an error is returned.
            ///
            /// # Errors
            ///
            /// - (Unlikely) if `data.len()` is not representable as a `u32`.
            /// - If the provider fails.
            #[inline]
            pub fn try_update(&mut self, data: &[u8]) -> $crate::opaque_res::Res {
                if !$crate::can_cast_u32(data.len()) {
                    return $crate::opaque_res::Res::ERR;
                }

                unsafe {
                    // SAFETY: Cast checked above.
                    self.update_unchecked(data)
                }
            }

            /// Absorbs all of `data`, with the length check done at compile
            /// time.
            ///
            /// # Errors
            ///
            /// As [`try_update`](Self::try_update).
            #[inline]
            pub fn update_sized<const C: usize>(&mut self, data: &[u8; C]) -> $crate::opaque_res::Res {
                if !$crate::const_can_cast_u32::<{ C }>() {
                    return $crate::opaque_res::Res::ERR;
                }

                unsafe {
                    // SAFETY: Cast checked above.
                    self.update_unchecked(data)
                }
            }

            /// Absorbs all of `data`, panicking on any failure.
            ///
            /// # Panics
            ///
            /// Under the same conditions [`try_update`](Self::try_update)
            /// errors.
            #[cfg(feature = "can-panic")]
            #[track_caller]
            pub fn update(&mut self, data: &[u8]) {
                if self.try_update(data).is_err() {
                    panic!(concat!("Failed to update `", stringify!($name), "`"));
                }
            }

            #[doc = concat!(
                "Writes the digest of everything absorbed so far into ",
                "`output`, leaving the running state untouched."
            )]
            #[doc = ""]
            #[doc = concat!(
                "The provider's `", stringify!($finalize), "` destroys the ",
                "running context, so the context is first duplicated with `",
                stringify!($copy), "` and the duplicate is finalized."
            )]
            #[doc = ""]
            #[doc = "# Errors"]
            #[doc = ""]
            #[doc = "If the provider fails to copy or finalize."]
            pub fn sum_into_exact(&mut self, output: &mut [u8; $size]) -> $crate::opaque_res::Res {
                let mut res = $crate::opaque_res::Res::new();

                unsafe {
                    let mut snap = ::core::mem::MaybeUninit::<$wc>::uninit();
                    res.ensure_0($copy(
                        ::core::ptr::addr_of_mut!(self.inner),
                        snap.as_mut_ptr()
                    ));

                    if res.is_err() {
                        return res;
                    }

                    let mut snap = snap.assume_init();
                    res.ensure_0($finalize(
                        ::core::ptr::addr_of_mut!(snap),
                        output.as_mut_ptr()
                    ));
                    $free(::core::ptr::addr_of_mut!(snap));
                }

                res
            }

            /// Writes the current digest into the first
            /// [`SIZE`](Self::SIZE) bytes of `output`, leaving the running
            /// state untouched.
            ///
            /// # Errors
            ///
            /// - If `output` is shorter than [`SIZE`](Self::SIZE).
            /// - If the provider fails.
            #[inline]
            pub fn sum_into(&mut self, output: &mut [u8]) -> $crate::opaque_res::Res {
                if output.len() < Self::SIZE {
                    return $crate::opaque_res::Res::ERR;
                }

                match <&mut [u8; $size]>::try_from(&mut output[..Self::SIZE]) {
                    Ok(exact) => self.sum_into_exact(exact),
                    Err(_) => $crate::opaque_res::Res::ERR
                }
            }

            /// Returns the digest of everything absorbed so far, leaving
            /// the running state untouched.
            ///
            /// # Errors
            ///
            /// If the provider fails.
            #[inline]
            pub fn try_sum(&mut self) -> Result<[u8; $size], $crate::Unspecified> {
                let mut out = [0u8; $size];
                self.sum_into_exact(&mut out).unit_err(out)
            }

            /// Returns the digest of everything absorbed so far, panicking
            /// on any failure, leaving the running state untouched.
            ///
            /// # Panics
            ///
            /// If the provider fails.
            #[cfg(feature = "can-panic")]
            #[track_caller]
            pub fn sum(&mut self) -> [u8; $size] {
                match self.try_sum() {
                    Ok(out) => out,
                    Err(_) => panic!(concat!("Failed to sum `", stringify!($name), "`"))
                }
            }

            /// Appends the digest of everything absorbed so far to `buf`,
            /// growing it as needed.
            ///
            /// Bytes already in `buf` are left untouched and exactly
            /// [`SIZE`](Self::SIZE) bytes are appended. The running state
            /// is untouched. On error `buf` is restored to its original
            /// length.
            ///
            /// # Errors
            ///
            /// If the provider fails.
            #[cfg(any(test, feature = "alloc"))]
            #[cfg_attr(docsrs, doc(cfg(feature = "alloc")))]
            pub fn sum_append(&mut self, buf: &mut ::alloc::vec::Vec<u8>) -> $crate::opaque_res::Res {
                let start = buf.len();
                buf.resize(start + Self::SIZE, 0);

                // resize guarantees exactly SIZE bytes past start
                let res = match <&mut [u8; $size]>::try_from(&mut buf[start..]) {
                    Ok(exact) => self.sum_into_exact(exact),
                    Err(_) => $crate::opaque_res::Res::ERR
                };

                if res.is_err() {
                    buf.truncate(start);
                }

                res
            }

            #[doc = concat!(
                "Calls the provider's `", stringify!($finalize), "`, writing ",
                "the digest into `output` and resetting the running state, ",
                "without any runtime checks."
            )]
            #[doc = ""]
            #[doc = "# Safety"]
            #[doc = ""]
            #[doc = concat!(
                "`output` must hold at least [`SIZE`](Self::SIZE) (`",
                stringify!($size), "`) bytes."
            )]
            #[inline]
            pub unsafe fn finalize_unchecked(&mut self, output: &mut [u8]) -> $crate::opaque_res::Res {
                let mut res = $crate::opaque_res::Res::new();

                res.ensure_0($finalize(
                    ::core::ptr::addr_of_mut!(self.inner),
                    output.as_mut_ptr()
                ));

                res
            }

            /// Writes the digest into the first [`SIZE`](Self::SIZE) bytes
            /// of `output` and resets the running state, in one provider
            /// call.
            ///
            /// Prefer the `sum` family when the stream should continue;
            /// this is the cheaper path when the digest marks the end of a
            /// message and the instance is about to be reused.
            ///
            /// # Errors
            ///
            /// - If `output` is shorter than [`SIZE`](Self::SIZE).
            /// - If the provider fails.
            #[inline]
            pub fn finalize_into(&mut self, output: &mut [u8]) -> $crate::opaque_res::Res {
                if output.len() < Self::SIZE {
                    return $crate::opaque_res::Res::ERR;
                }

                unsafe {
                    // SAFETY: Length checked above.
                    self.finalize_unchecked(output)
                }
            }

            /// Writes the digest into `output` and resets the running
            /// state, with the size check moved to the type system.
            ///
            /// # Errors
            ///
            /// If the provider fails.
            #[inline]
            pub fn finalize_into_exact(&mut self, output: &mut [u8; $size]) -> $crate::opaque_res::Res {
                unsafe {
                    // SAFETY: Exact size by type.
                    self.finalize_unchecked(output)
                }
            }

            /// Returns the digest and resets the running state.
            ///
            /// # Errors
            ///
            /// If the provider fails.
            #[inline]
            pub fn try_finalize(&mut self) -> Result<[u8; $size], $crate::Unspecified> {
                let mut buf = [0u8; $size];
                self.finalize_into_exact(&mut buf).unit_err(buf)
            }

            /// Returns the digest and resets the running state, panicking
            /// on any failure.
            ///
            /// # Panics
            ///
            /// If the provider fails.
            #[cfg(feature = "can-panic")]
            #[track_caller]
            pub fn finalize(&mut self) -> [u8; $size] {
                match self.try_finalize() {
                    Ok(out) => out,
                    Err(_) => panic!(concat!("Failed to finalize `", stringify!($name), "`"))
                }
            }

            /// Duplicates the running state into an independent instance.
            ///
            /// The two instances share nothing afterwards; updating one
            /// never affects the other.
            ///
            /// # Errors
            ///
            /// If the provider fails to copy the context.
            pub fn try_clone(&mut self) -> Result<Self, $crate::Unspecified> {
                let mut res = $crate::opaque_res::Res::new();
                let mut inner = ::core::mem::MaybeUninit::<$wc>::uninit();

                unsafe {
                    res.ensure_0($copy(
                        ::core::ptr::addr_of_mut!(self.inner),
                        inner.as_mut_ptr()
                    ));

                    res.unit_err_with(|| Self { inner: inner.assume_init() })
                }
            }
        }

        // SAFETY:
        // Every method which mutates the underlying state requires a
        // mutable reference; obtaining one across threads requires
        // synchronization.
        unsafe impl Send for $name {}

        // SAFETY:
        // No interior mutability; all mutation goes through `&mut self`.
        unsafe impl Sync for $name {}

        impl Drop for $name {
            #[doc = concat!(
                "Releases the running context via `", stringify!($free), "`."
            )]
            #[inline]
            fn drop(&mut self) {
                unsafe { $free(::core::ptr::addr_of_mut!(self.inner)) }
            }
        }

        #[cfg(feature = "std")]
        #[cfg_attr(docsrs, doc(cfg(feature = "std")))]
        impl ::std::io::Write for $name {
            /// Absorbs the whole buffer, returning its length.
            fn write(&mut self, buf: &[u8]) -> ::std::io::Result<usize> {
                self.try_update(buf)
                    .unit_err(buf.len())
                    .map_err(::std::io::Error::other)
            }

            fn flush(&mut self) -> ::std::io::Result<()> {
                Ok(())
            }
        }


        #[cfg(test)]
        mod property_tests {
            use super::*;
            use digest::Digest;
            use crate::aes::test_utils::{AnyList, BoundList};
            use proptest::prelude::*;

            proptest! {
                #![proptest_config(ProptestConfig::with_cases(512))]

                #[test]
                fn matches_rust_crypto_single_update(
                    input in any::<BoundList<1024>>()
                ) {
                    let mut hasher = $name::new().unwrap();
                    let mut rc = sha2::$name::new();

                    prop_assert!(hasher.try_update(input.as_slice()).is_ok());
                    rc.update(input.as_slice());

                    let out = hasher.try_finalize().unwrap();
                    let rc_out = rc.finalize();

                    prop_assert_eq!(out.as_slice(), rc_out.as_slice());
                }

                #[test]
                fn matches_rust_crypto_arbitrary_updates(
                    inputs in any::<AnyList<16, BoundList<256>>>()
                ) {
                    let mut hasher = $name::new().unwrap();
                    let mut rc = sha2::$name::new();

                    for input in inputs.as_slice().iter() {
                        prop_assert!(hasher.try_update(input.as_slice()).is_ok());
                        rc.update(input.as_slice());
                    }

                    let out = hasher.try_finalize().unwrap();
                    let rc_out = rc.finalize();

                    prop_assert_eq!(out.as_slice(), rc_out.as_slice());
                }

                #[test]
                fn interleaved_sums_never_perturb_the_stream(
                    inputs in any::<AnyList<16, BoundList<256>>>()
                ) {
                    let mut hasher = $name::new().unwrap();
                    let mut rc = sha2::$name::new();
                    let mut running = sha2::$name::new();

                    for input in inputs.as_slice().iter() {
                        prop_assert!(hasher.try_update(input.as_slice()).is_ok());
                        rc.update(input.as_slice());
                        running.update(input.as_slice());

                        // a running sum after every chunk must match the
                        // reference digest of everything so far, and must
                        // not disturb what follows
                        let sum = hasher.try_sum().unwrap();
                        let expect = running.clone().finalize();
                        prop_assert_eq!(sum.as_slice(), expect.as_slice());
                    }

                    let out = hasher.try_finalize().unwrap();
                    let rc_out = rc.finalize();

                    prop_assert_eq!(out.as_slice(), rc_out.as_slice());
                }
            }
        }
    };
}
