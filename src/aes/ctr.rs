//! AES in Counter Mode, an Incremental XOR Keystream
use core::mem::MaybeUninit;
use core::ptr::addr_of_mut;
use wolf_crypto_sys::{
    Aes as AesLL,
    wc_AesSetKey, wc_AesCtrEncrypt, wc_AesFree,
};
use crate::aes::{init_aes, Direction, Key};
use crate::buf::Iv;
use crate::error::Unspecified;
use crate::opaque_res::Res;
use crate::can_cast_u32;

#[inline]
#[must_use]
const fn larger(left: usize, right: usize) -> usize {
    if left < right {
        right
    } else {
        left
    }
}

#[inline]
#[must_use]
const fn predicate(input_len: usize, output_len: usize) -> bool {
    input_len <= output_len && can_cast_u32(larger(input_len, output_len))
}

/// An AES-CTR keystream.
///
/// The stream is seeded by (key, IV) and consumed incrementally: each call
/// XORs the next keystream bytes into the output and advances the position
/// by the input length. The position and the unconsumed tail of the current
/// keystream block live inside the provider context, so output for a given
/// byte offset is identical no matter how the calls are chunked.
///
/// The stream is forward-only. There is no reset; one instance is one
/// keystream, and a fresh keystream means a fresh instance. Reusing the
/// same (key, IV) pair for two messages discloses their XOR; never do it
/// outside of decrypting what was encrypted under that pair.
///
/// Encryption and decryption are the same operation; XOR is self-inverse.
///
/// # Example
///
/// ```
/// use wolf_accel::aes::{Key, AesCtr};
/// use wolf_accel::buf::Iv;
///
/// let key = Key::new(&[7u8; 32]).unwrap();
/// let iv = Iv::new([2u8; 16]);
///
/// let msg = b"counter mode turns a block cipher into a stream cipher";
/// let mut cipher = [0u8; 54];
///
/// let mut enc = AesCtr::new(&key, &iv).unwrap();
/// assert!(enc.try_apply_keystream(msg.as_slice(), cipher.as_mut_slice()).is_ok());
/// assert_ne!(&cipher[..], &msg[..]);
///
/// // a fresh stream over the same (key, IV) produces the same keystream
/// let mut plain = [0u8; 54];
/// let mut dec = AesCtr::new(&key, &iv.copy()).unwrap();
/// assert!(dec.try_apply_keystream(cipher.as_slice(), plain.as_mut_slice()).is_ok());
/// assert_eq!(&plain[..], &msg[..]);
/// ```
pub struct AesCtr {
    inner: AesLL
}

impl AesCtr {
    /// Creates a new stream positioned at the start of the keystream for
    /// (`key`, `iv`).
    ///
    /// The IV length is fixed at the block size by the [`Iv`] type, and the
    /// key length by [`Key`]. Counter mode only ever runs the forward block
    /// transform, so the context is keyed in the encrypt direction.
    ///
    /// # Errors
    ///
    /// If the provider fails to initialize or key the context.
    pub fn new(key: &Key, iv: &Iv) -> Result<Self, Unspecified> {
        let mut inner = MaybeUninit::<AesLL>::uninit();

        unsafe {
            let mut res = init_aes(inner.as_mut_ptr());

            res.ensure_0(wc_AesSetKey(
                inner.as_mut_ptr(),
                key.as_slice().as_ptr(),
                key.capacity() as u32,
                iv.slice().as_ptr(),
                Direction::Encrypt.dir()
            ));

            res.unit_err_with(|| Self { inner: inner.assume_init() })
        }
    }

    /// Applies the keystream, without any runtime checks.
    ///
    /// # Safety
    ///
    /// - `output` must be at least as long as `input`.
    /// - `input.len()` must be representable as a `u32`.
    pub unsafe fn apply_keystream_unchecked(
        &mut self, input: &[u8], output: &mut [u8]
    ) -> Res {
        let mut res = Res::new();

        res.ensure_0(wc_AesCtrEncrypt(
            addr_of_mut!(self.inner),
            output.as_mut_ptr(),
            input.as_ptr(),
            input.len() as u32
        ));

        res
    }

    /// Applies the keystream, with buffer sizes enforced at compile time.
    ///
    /// # Errors
    ///
    /// - If the provider fails.
    /// - (Unlikely) if `S` is not representable as a `u32`.
    #[inline]
    pub fn apply_keystream_sized<const S: usize>(
        &mut self, input: &[u8; S], output: &mut [u8; S]
    ) -> Res {
        if !crate::const_can_cast_u32::<S>() {
            return Res::ERR
        }

        unsafe {
            // SAFETY: Equal sizes by type, cast checked above.
            self.apply_keystream_unchecked(input.as_slice(), output.as_mut_slice())
        }
    }

    /// Tries to apply the keystream: `output[i] = input[i] ^ keystream[i]`,
    /// advancing the stream by `input.len()` bytes.
    ///
    /// # Errors
    ///
    /// - If `output` is shorter than `input`.
    /// - (Unlikely) if either length is not representable as a `u32`.
    /// - If the provider fails.
    #[inline]
    pub fn try_apply_keystream(&mut self, input: &[u8], output: &mut [u8]) -> Res {
        if !predicate(input.len(), output.len()) {
            return Res::ERR
        }

        unsafe {
            // SAFETY: `predicate` ensures output holds input and the cast
            // does not overflow.
            self.apply_keystream_unchecked(input, output)
        }
    }

    /// Applies the keystream directly over `buf`.
    ///
    /// Stream ciphers are their own inverse, so this both encrypts and
    /// decrypts; which one depends only on what `buf` holds.
    ///
    /// # Errors
    ///
    /// (Unlikely) if `buf.len()` is not representable as a `u32`, or the
    /// provider fails.
    #[inline]
    pub fn apply_keystream_in_place(&mut self, buf: &mut [u8]) -> Res {
        if !can_cast_u32(buf.len()) {
            return Res::ERR
        }

        let mut res = Res::new();
        let ptr = buf.as_mut_ptr();

        unsafe {
            // SAFETY: The provider permits input and output to alias.
            res.ensure_0(wc_AesCtrEncrypt(
                addr_of_mut!(self.inner),
                ptr,
                ptr as *const u8,
                buf.len() as u32
            ));
        }

        res
    }

    /// Applies the keystream, panicking on any failure.
    ///
    /// # Panics
    ///
    /// - If `output` is shorter than `input`.
    /// - (Unlikely) if either length is not representable as a `u32`.
    /// - If the provider fails.
    #[cfg(feature = "can-panic")]
    #[track_caller]
    pub fn apply_keystream(&mut self, input: &[u8], output: &mut [u8]) {
        if self.try_apply_keystream(input, output).is_err() {
            panic!("Failed to apply keystream in `AesCtr`");
        }
    }
}

impl Drop for AesCtr {
    #[inline]
    fn drop(&mut self) {
        unsafe {
            // SAFETY: Drop runs once with exclusive access; freeing zeroes
            // the key schedule and counter state the provider holds.
            wc_AesFree(addr_of_mut!(self.inner));
        }
    }
}

// SAFETY:
// Every method which mutates the underlying context requires a mutable
// reference; obtaining one across threads requires synchronization.
unsafe impl Send for AesCtr {}

// SAFETY:
// No interior mutability; all mutation goes through `&mut self`.
unsafe impl Sync for AesCtr {}
