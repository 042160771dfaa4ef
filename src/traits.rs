// (c) 2023 John A. Breaux
// This code is licensed under MIT license (see LICENSE for details)

//! Traits for reading and writing Rust primitive types to byte-addressed memory.
//!
//! Implementors only need [Grab]`<u8>`; [FallibleAutoCast]
//! for `u8` and `u16` comes for free.

use crate::error::{Error, Result};
use std::slice::SliceIndex;

/// Gets a `&[T]` at [SliceIndex] `I`.
///
/// This is the same shape as the slice method `.get(...)`
pub trait Grab<T> {
    /// Gets the slice of Self at [SliceIndex] I
    fn grab<I>(&self, index: I) -> Option<&<I as SliceIndex<[T]>>::Output>
    where
        I: SliceIndex<[T]>;

    /// Gets a mutable slice of Self at [SliceIndex] I
    fn grab_mut<I>(&mut self, index: I) -> Option<&mut <I as SliceIndex<[T]>>::Output>
    where
        I: SliceIndex<[T]>;
}

/// Read or Write a T at address `addr`, returning a [Result]
pub trait FallibleAutoCast<T>: Grab<u8> {
    /// Read a T from address `addr`
    fn read_fallible(&self, addr: impl Into<usize>) -> Result<T>;
    /// Write a T to address `addr`
    fn write_fallible(&mut self, addr: impl Into<usize>, data: T) -> Result<()>;
}

/// Implements [FallibleAutoCast] for the provided types
///
/// Relies on inherent methods of Rust numeric types:
/// - `Self::from_be_bytes`
/// - `Self::to_be_bytes`
macro_rules! impl_rw {($($t:ty) ,* $(,)?) =>{
    $(
        impl<T: Grab<u8>> FallibleAutoCast<$t> for T {
            #[inline(always)]
            fn read_fallible(&self, addr: impl Into<usize>) -> Result<$t> {
                let addr: usize = addr.into();
                let range = addr..addr + core::mem::size_of::<$t>();
                match self.grab(range.clone()) {
                    // Chip-8 is a big-endian system
                    Some(bytes) => Ok(<$t>::from_be_bytes(bytes.try_into()?)),
                    None => Err(Error::InvalidAddressRange { range }),
                }
            }
            #[inline(always)]
            fn write_fallible(&mut self, addr: impl Into<usize>, data: $t) -> Result<()> {
                let addr: usize = addr.into();
                let range = addr..addr + core::mem::size_of::<$t>();
                match self.grab_mut(range.clone()) {
                    Some(slice) => {
                        slice.copy_from_slice(&data.to_be_bytes());
                        Ok(())
                    }
                    None => Err(Error::InvalidAddressRange { range }),
                }
            }
        }
    )*
}}

impl_rw!(u8, u16);
