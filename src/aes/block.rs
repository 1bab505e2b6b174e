//! The Raw AES Block Transform
use core::mem::MaybeUninit;
use core::ptr::addr_of_mut;
use wolf_crypto_sys::{
    Aes as AesLL,
    wc_AesSetKey, wc_AesSetIV, wc_AesFree,
    wc_AesCbcEncrypt, wc_AesCbcDecrypt,
};
use crate::aes::{init_aes, Direction, Key, BLOCK_SIZE};
use crate::error::Unspecified;
use crate::opaque_res::Res;

// The bindings do not enable wolfcrypt's direct-block build option, so the
// raw transform is expressed through the CBC primitive over exactly one
// block with a zero IV: E(iv ^ p) == E(p) and D(c) ^ iv == D(c). The IV
// register is rezeroed before every call so consecutive blocks never chain.
const ZERO_IV: [u8; BLOCK_SIZE] = [0u8; BLOCK_SIZE];

macro_rules! impl_block_api {
    (
        field: $field:ident,
        transform: $transform:ident,
        $(#[$unchecked_meta:meta])*
        unsafe => $unchecked:ident,
        $(#[$sized_meta:meta])*
        sized => $sized:ident,
        $(#[$in_place_meta:meta])*
        in-place => $in_place:ident,
        $(#[$try_meta:meta])*
        try => $try_ident:ident,
        $(#[$panics_meta:meta])*
        panics => $panics:ident $(,)?
    ) => {
        $(#[$unchecked_meta])*
        pub unsafe fn $unchecked(&mut self, input: *const u8, output: *mut u8) -> Res {
            let mut res = Res::new();

            res.ensure_0(wc_AesSetIV(addr_of_mut!(self.$field), ZERO_IV.as_ptr()));
            res.ensure_0($transform(
                addr_of_mut!(self.$field),
                output,
                input,
                BLOCK_SIZE as u32
            ));

            res
        }

        $(#[$sized_meta])*
        #[inline]
        pub fn $sized(
            &mut self, input: &[u8; BLOCK_SIZE], output: &mut [u8; BLOCK_SIZE]
        ) -> Res {
            unsafe {
                // SAFETY: Both buffers are exactly one block by type.
                self.$unchecked(input.as_ptr(), output.as_mut_ptr())
            }
        }

        $(#[$in_place_meta])*
        #[inline]
        pub fn $in_place(&mut self, block: &mut [u8; BLOCK_SIZE]) -> Res {
            let ptr = block.as_mut_ptr();

            unsafe {
                // SAFETY: One block by type; the provider transform permits
                // input and output to alias.
                self.$unchecked(ptr as *const u8, ptr)
            }
        }

        $(#[$try_meta])*
        #[inline]
        pub fn $try_ident(&mut self, input: &[u8], output: &mut [u8]) -> Res {
            if input.len() < BLOCK_SIZE || output.len() < BLOCK_SIZE {
                return Res::ERR
            }

            unsafe {
                // SAFETY: Both buffers hold at least one block; only the
                // first block of either participates.
                self.$unchecked(input.as_ptr(), output.as_mut_ptr())
            }
        }

        #[cfg(feature = "can-panic")]
        $(#[$panics_meta])*
        #[track_caller]
        pub fn $panics(&mut self, input: &[u8], output: &mut [u8]) {
            if self.$try_ident(input, output).is_err() {
                panic!("Failed to transform block in `AesBlock`");
            }
        }
    };
}

/// One-block-at-a-time AES.
///
/// Both the encryption and decryption key schedules are derived once at
/// construction and reused for every call; a call transforms exactly one
/// 16 byte block and leaves no other observable state behind, so the same
/// input always yields the same output for the lifetime of the instance.
///
/// This is a building block. Encrypting more than one block with it is ECB,
/// which leaks the equality of plaintext blocks; almost every caller wants
/// [`AesCtr`](crate::aes::AesCtr) instead.
///
/// # Example
///
/// ```
/// use wolf_accel::aes::{Key, AesBlock};
///
/// let key = Key::new(&[0x42u8; 16]).unwrap();
/// let mut aes = AesBlock::new(&key).unwrap();
///
/// let plain = *b"sixteen exactly!";
/// let mut cipher = [0u8; 16];
/// assert!(aes.encrypt_block_sized(&plain, &mut cipher).is_ok());
/// assert_ne!(cipher, plain);
///
/// let mut round = [0u8; 16];
/// assert!(aes.decrypt_block_sized(&cipher, &mut round).is_ok());
/// assert_eq!(round, plain);
/// ```
pub struct AesBlock {
    enc: AesLL,
    dec: AesLL
}

impl AesBlock {
    /// Creates a new block cipher, deriving both key schedules from `key`.
    ///
    /// Key length was already proven by [`Key`]; this constructor performs
    /// no further validation.
    ///
    /// # Errors
    ///
    /// If the provider fails to initialize or key either context.
    ///
    /// # Note
    ///
    /// The provider copies the key material into both contexts; the copies
    /// are zeroed when the `AesBlock` is dropped. Consider zeroing the
    /// `Key` itself once no more instances will be derived from it.
    pub fn new(key: &Key) -> Result<Self, Unspecified> {
        let mut enc = MaybeUninit::<AesLL>::uninit();
        let mut dec = MaybeUninit::<AesLL>::uninit();

        unsafe {
            let mut res = init_aes(enc.as_mut_ptr());
            res.ensure(init_aes(dec.as_mut_ptr()));

            res.ensure_0(wc_AesSetKey(
                enc.as_mut_ptr(),
                key.as_slice().as_ptr(),
                key.capacity() as u32,
                core::ptr::null(),
                Direction::Encrypt.dir()
            ));
            res.ensure_0(wc_AesSetKey(
                dec.as_mut_ptr(),
                key.as_slice().as_ptr(),
                key.capacity() as u32,
                core::ptr::null(),
                Direction::Decrypt.dir()
            ));

            res.unit_err_with(|| Self {
                enc: enc.assume_init(),
                dec: dec.assume_init()
            })
        }
    }

    /// The block size in bytes (`16`).
    #[inline]
    pub const fn block_size(&self) -> usize {
        BLOCK_SIZE
    }

    impl_block_api! {
        field: enc,
        transform: wc_AesCbcEncrypt,
        /// Encrypts one block, without any runtime checks.
        ///
        /// # Safety
        ///
        /// `input` and `output` must each be valid for one block
        /// ([`BLOCK_SIZE`](crate::aes::BLOCK_SIZE) bytes). They may alias.
        unsafe => encrypt_block_unchecked,
        /// Encrypts exactly one block using the encryption schedule.
        ///
        /// Buffer sizes are enforced by the type system; the only runtime
        /// failure left is the provider itself.
        sized => encrypt_block_sized,
        /// Encrypts one block in place.
        in-place => encrypt_block_in_place,
        /// Encrypts the first block of `input` into the first block of
        /// `output`.
        ///
        /// # Errors
        ///
        /// If either slice is shorter than one block. Bytes past the first
        /// block are ignored, mirroring the relaxed contract of fixed-block
        /// cipher interfaces.
        try => try_encrypt_block,
        /// Encrypts the first block of `input` into the first block of
        /// `output`, panicking on any failure.
        ///
        /// # Panics
        ///
        /// If either slice is shorter than one block, or the provider fails.
        panics => encrypt_block,
    }

    impl_block_api! {
        field: dec,
        transform: wc_AesCbcDecrypt,
        /// Decrypts one block, without any runtime checks.
        ///
        /// # Safety
        ///
        /// `input` and `output` must each be valid for one block
        /// ([`BLOCK_SIZE`](crate::aes::BLOCK_SIZE) bytes). They may alias.
        unsafe => decrypt_block_unchecked,
        /// Decrypts exactly one block using the decryption schedule.
        sized => decrypt_block_sized,
        /// Decrypts one block in place.
        in-place => decrypt_block_in_place,
        /// Decrypts the first block of `input` into the first block of
        /// `output`.
        ///
        /// # Errors
        ///
        /// If either slice is shorter than one block.
        try => try_decrypt_block,
        /// Decrypts the first block of `input` into the first block of
        /// `output`, panicking on any failure.
        ///
        /// # Panics
        ///
        /// If either slice is shorter than one block, or the provider fails.
        panics => decrypt_block,
    }
}

impl Drop for AesBlock {
    #[inline]
    fn drop(&mut self) {
        unsafe {
            // SAFETY: Drop runs once with exclusive access; freeing zeroes
            // the key schedules the provider copied at construction.
            wc_AesFree(addr_of_mut!(self.enc));
            wc_AesFree(addr_of_mut!(self.dec));
        }
    }
}

// SAFETY:
// Every method which mutates the underlying contexts requires a mutable
// reference; obtaining one across threads requires synchronization.
unsafe impl Send for AesBlock {}

// SAFETY:
// No interior mutability; all mutation goes through `&mut self`.
unsafe impl Sync for AesBlock {}

#[cfg(test)]
mod tests {
    use super::*;
    use aes::cipher::{BlockEncrypt, BlockDecrypt, KeyInit, generic_array::GenericArray};

    #[test]
    fn round_trip_each_key_size() {
        for len in [16usize, 24, 32] {
            let key = Key::new(&vec![0x5au8; len]).unwrap();
            let mut aes = AesBlock::new(&key).unwrap();

            let plain = *b"yellow submarine";
            let mut cipher = [0u8; BLOCK_SIZE];
            aes.encrypt_block_sized(&plain, &mut cipher).unwrap();
            assert_ne!(cipher, plain);

            let mut round = [0u8; BLOCK_SIZE];
            aes.decrypt_block_sized(&cipher, &mut round).unwrap();
            assert_eq!(round, plain);
        }
    }

    #[test]
    fn repeated_calls_are_pure() {
        let key = Key::new(&[3u8; 32]).unwrap();
        let mut aes = AesBlock::new(&key).unwrap();

        let plain = [0xabu8; BLOCK_SIZE];
        let mut first = [0u8; BLOCK_SIZE];
        let mut second = [0u8; BLOCK_SIZE];

        aes.encrypt_block_sized(&plain, &mut first).unwrap();
        aes.encrypt_block_sized(&plain, &mut second).unwrap();

        assert_eq!(first, second);
    }

    #[test]
    fn in_place_matches_out_of_place() {
        let key = Key::new(&[9u8; 24]).unwrap();
        let mut aes = AesBlock::new(&key).unwrap();

        let plain = [0x17u8; BLOCK_SIZE];
        let mut out = [0u8; BLOCK_SIZE];
        aes.encrypt_block_sized(&plain, &mut out).unwrap();

        let mut buf = plain;
        aes.encrypt_block_in_place(&mut buf).unwrap();
        assert_eq!(buf, out);

        aes.decrypt_block_in_place(&mut buf).unwrap();
        assert_eq!(buf, plain);
    }

    #[test]
    fn undersized_buffers_are_rejected() {
        let key = Key::new(&[0u8; 16]).unwrap();
        let mut aes = AesBlock::new(&key).unwrap();

        let short = [0u8; BLOCK_SIZE - 1];
        let mut out = [0u8; BLOCK_SIZE];
        assert!(aes.try_encrypt_block(short.as_slice(), out.as_mut_slice()).is_err());

        let full = [0u8; BLOCK_SIZE];
        let mut short_out = [0u8; BLOCK_SIZE - 1];
        assert!(aes.try_encrypt_block(full.as_slice(), short_out.as_mut_slice()).is_err());
        assert!(aes.try_decrypt_block(short.as_slice(), out.as_mut_slice()).is_err());
    }

    #[test]
    fn only_first_block_participates() {
        let key = Key::new(&[1u8; 16]).unwrap();
        let mut aes = AesBlock::new(&key).unwrap();

        let long = [0x44u8; BLOCK_SIZE * 2];
        let mut out_long = [0u8; BLOCK_SIZE * 2];
        aes.try_encrypt_block(long.as_slice(), out_long.as_mut_slice()).unwrap();

        let mut out = [0u8; BLOCK_SIZE];
        aes.encrypt_block_sized(&[0x44u8; BLOCK_SIZE], &mut out).unwrap();

        assert_eq!(&out_long[..BLOCK_SIZE], out.as_slice());
        assert_eq!(&out_long[BLOCK_SIZE..], &[0u8; BLOCK_SIZE]);
    }

    macro_rules! with_rust_crypto_aes {
        ($key:expr, |$cipher:ident| $do:expr) => {
            match &$key {
                Key::Aes256(buf) => {
                    let $cipher = aes::Aes256::new(GenericArray::from_slice(buf.as_slice()));
                    $do
                },
                Key::Aes192(buf) => {
                    let $cipher = aes::Aes192::new(GenericArray::from_slice(buf.as_slice()));
                    $do
                },
                Key::Aes128(buf) => {
                    let $cipher = aes::Aes128::new(GenericArray::from_slice(buf.as_slice()));
                    $do
                }
            }
        };
    }

    #[test]
    fn against_rust_crypto_smoke() {
        let key = Key::new(&[7u8; 32]).unwrap();
        let mut aes = AesBlock::new(&key).unwrap();

        let plain = [0u8; BLOCK_SIZE];
        let mut out = [0u8; BLOCK_SIZE];
        aes.encrypt_block_sized(&plain, &mut out).unwrap();

        with_rust_crypto_aes!(key, |cipher| {
            let mut rc_block = GenericArray::clone_from_slice(plain.as_slice());
            cipher.encrypt_block(&mut rc_block);
            assert_eq!(out.as_slice(), rc_block.as_slice());
        });
    }

    mod property_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #![proptest_config(ProptestConfig::with_cases(2000))]

            #[test]
            fn round_trip(key in any::<Key>(), plain in any::<[u8; BLOCK_SIZE]>()) {
                let mut aes = AesBlock::new(&key).unwrap();

                let mut cipher = [0u8; BLOCK_SIZE];
                prop_assert!(aes.encrypt_block_sized(&plain, &mut cipher).is_ok());

                let mut round = [0u8; BLOCK_SIZE];
                prop_assert!(aes.decrypt_block_sized(&cipher, &mut round).is_ok());

                prop_assert_eq!(round, plain);
            }

            #[test]
            fn encrypt_matches_rust_crypto(
                key in any::<Key>(),
                plain in any::<[u8; BLOCK_SIZE]>()
            ) {
                let mut aes = AesBlock::new(&key).unwrap();

                let mut out = [0u8; BLOCK_SIZE];
                prop_assert!(aes.encrypt_block_sized(&plain, &mut out).is_ok());

                with_rust_crypto_aes!(key, |cipher| {
                    let mut rc_block = GenericArray::clone_from_slice(plain.as_slice());
                    cipher.encrypt_block(&mut rc_block);
                    prop_assert_eq!(out.as_slice(), rc_block.as_slice());
                });
            }

            #[test]
            fn decrypt_matches_rust_crypto(
                key in any::<Key>(),
                cipher_text in any::<[u8; BLOCK_SIZE]>()
            ) {
                let mut aes = AesBlock::new(&key).unwrap();

                let mut out = [0u8; BLOCK_SIZE];
                prop_assert!(aes.decrypt_block_sized(&cipher_text, &mut out).is_ok());

                with_rust_crypto_aes!(key, |cipher| {
                    let mut rc_block = GenericArray::clone_from_slice(cipher_text.as_slice());
                    cipher.decrypt_block(&mut rc_block);
                    prop_assert_eq!(out.as_slice(), rc_block.as_slice());
                });
            }
        }
    }
}
