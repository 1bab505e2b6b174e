//! Proptest strategies shared across the cipher and digest test suites.
use core::fmt;
use core::mem::MaybeUninit;
use core::ops;
use proptest::arbitrary::{any, Arbitrary};
use proptest::num::u8::Any;
use proptest::strategy::{BoxedStrategy, Strategy};
use proptest::{array, prop_oneof};
use crate::aes::Key;

/// A stack-allocated byte buffer with an arbitrary length up to `C`.
#[derive(Clone, Copy)]
pub struct BoundList<const C: usize> {
    inner: [u8; C],
    len: usize
}

impl<const C: usize> fmt::Debug for BoundList<C> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let mut dbg = f.debug_struct("BoundList");
        dbg.field("len", &self.len());

        if C <= 32 {
            dbg.field("inner", &self.as_slice());
        }

        dbg.finish()
    }
}

impl<const C: usize> BoundList<C> {
    pub const fn new_with_unchecked(inner: [u8; C], len: usize) -> Self {
        Self { inner, len }
    }

    /// A zeroed buffer with the same length as this one.
    #[inline]
    pub const fn create_self(&self) -> Self {
        Self::new_with_unchecked([0u8; C], self.len)
    }

    #[inline]
    pub const fn len(&self) -> usize {
        self.len
    }

    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[inline]
    pub fn as_slice(&self) -> &[u8] {
        &self.inner.as_slice()[..self.len()]
    }

    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [u8] {
        let len = self.len();
        &mut self.inner.as_mut_slice()[..len]
    }
}

impl<const C: usize> PartialEq for BoundList<C> {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.as_slice() == other.as_slice()
    }
}

impl<const C: usize> ops::Deref for BoundList<C> {
    type Target = [u8];

    fn deref(&self) -> &Self::Target {
        self.as_slice()
    }
}

impl<const C: usize> ops::DerefMut for BoundList<C> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.as_mut_slice()
    }
}

impl<const C: usize> Arbitrary for BoundList<C> {
    type Parameters = ();

    fn arbitrary_with(_args: Self::Parameters) -> Self::Strategy {
        (0..=C, array::uniform::<Any, C>(any::<u8>()))
            .prop_map(|(len, buf)| BoundList::new_with_unchecked(buf, len))
            .boxed()
    }

    type Strategy = BoxedStrategy<Self>;
}

/// A list of up to `C` arbitrary elements.
#[derive(Copy, Clone)]
pub struct AnyList<const C: usize, T: Copy> {
    inner: [MaybeUninit<T>; C],
    len: usize
}

impl<const C: usize, T: Copy> AnyList<C, T> {
    pub fn new_with_slice(slice: &[T]) -> Self {
        debug_assert!(slice.len() <= C);

        let mut inner = [const { MaybeUninit::<T>::uninit() }; C];
        for (dst, src) in inner.iter_mut().zip(slice) {
            dst.write(*src);
        }

        Self {
            inner,
            len: slice.len()
        }
    }

    pub const fn len(&self) -> usize {
        self.len
    }

    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[inline]
    pub fn as_slice(&self) -> &[T] {
        // SAFETY: The first `len` elements are always initialized.
        unsafe { core::mem::transmute(&self.inner[..self.len]) }
    }
}

impl<const C: usize, const B: usize> AnyList<C, BoundList<B>> {
    /// Concatenates every element into one buffer.
    pub fn join(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity((C * B) / 2);

        for e in self.as_slice() {
            out.extend_from_slice(e.as_slice());
        }

        out
    }
}

impl<const C: usize, T: Arbitrary + Copy + 'static> Arbitrary for AnyList<C, T>
    where <T as Arbitrary>::Strategy: Clone + 'static
{
    type Parameters = ();

    fn arbitrary_with(_args: Self::Parameters) -> Self::Strategy {
        (0..=C, array::uniform::<<T as Arbitrary>::Strategy, C>(any::<T>()))
            .prop_map(|(len, buf)| Self::new_with_slice(&buf.as_slice()[..len]))
            .boxed()
    }

    type Strategy = BoxedStrategy<Self>;
}

impl Arbitrary for Key {
    type Parameters = ();

    fn arbitrary_with(_args: Self::Parameters) -> Self::Strategy {
        prop_oneof![
            any::<[u8; 32]>().prop_map(Key::Aes256),
            any::<[u8; 24]>().prop_map(Key::Aes192),
            any::<[u8; 16]>().prop_map(Key::Aes128)
        ].boxed()
    }

    type Strategy = BoxedStrategy<Self>;
}
