// FWRT - fwrt-foundation
// Module: StaticVec - Inline-storage vector
//
// Copyright (c) 2025 Ralf Anton Beier
// Licensed under the MIT license.
// SPDX-License-Identifier: MIT

//! Static vector with inline storage and compile-time capacity.
//!
//! `StaticVec<T, N>` is the container behind every fixed array of the
//! decoded module and the virtual machine stacks. All storage is an inline
//! `[T; N]`, so the vector lives wherever its owner lives and never touches
//! an allocator.
//!
//! # Characteristics
//!
//! - **Zero allocation**: storage is an inline array of `Copy` elements
//! - **Fails instead of overflowing**: every insert is capacity-checked
//! - **Const-time operations**: `push()`, `pop()` and indexing are O(1)

use core::fmt;
use core::ops::{Deref, DerefMut};

use fwrt_error::{Error, Result};

/// A vector with compile-time capacity and inline storage.
///
/// # Invariants
///
/// 1. `len <= N` always holds
/// 2. Elements at `len..N` hold `T::default()` and are never observable
///
/// # Examples
///
/// ```
/// use fwrt_foundation::collections::StaticVec;
///
/// let mut vec = StaticVec::<u32, 2>::new();
/// vec.push(1)?;
/// vec.push(2)?;
/// assert!(vec.push(3).is_err());
/// assert_eq!(vec.as_slice(), &[1, 2]);
/// # Ok::<(), fwrt_error::Error>(())
/// ```
#[derive(Clone, Copy)]
pub struct StaticVec<T, const N: usize> {
    /// Inline storage for elements
    data: [T; N],

    /// Number of elements currently in use
    /// Invariant: len <= N
    len: usize,
}

impl<T: Copy + Default, const N: usize> StaticVec<T, N> {
    /// Creates a new empty vector.
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self {
            data: [T::default(); N],
            len: 0,
        }
    }

    /// Appends an element.
    ///
    /// # Errors
    ///
    /// Returns a capacity error if the vector is full; the vector is left
    /// unchanged.
    #[inline]
    pub fn push(&mut self, value: T) -> Result<()> {
        if self.len >= N {
            return Err(Error::capacity_exceeded("StaticVec capacity exceeded"));
        }
        self.data[self.len] = value;
        self.len += 1;
        Ok(())
    }

    /// Removes and returns the last element.
    #[inline]
    pub fn pop(&mut self) -> Option<T> {
        if self.len == 0 {
            return None;
        }
        self.len -= 1;
        let value = self.data[self.len];
        self.data[self.len] = T::default();
        Some(value)
    }

    /// Checks that `additional` more elements fit without inserting any.
    ///
    /// Decoders call this with a vector length read from the input before
    /// decoding the elements, so oversized inputs fail up front.
    #[inline]
    pub fn ensure_capacity(&self, additional: usize) -> Result<()> {
        if additional > N - self.len {
            return Err(Error::capacity_exceeded(
                "Vector length exceeds the fixed capacity",
            ));
        }
        Ok(())
    }

    /// Grows the vector to `new_len` by appending copies of `value`.
    ///
    /// Shrinking is done with [`StaticVec::truncate`].
    pub fn resize(&mut self, new_len: usize, value: T) -> Result<()> {
        if new_len > N {
            return Err(Error::capacity_exceeded("StaticVec capacity exceeded"));
        }
        if new_len < self.len {
            self.truncate(new_len);
            return Ok(());
        }
        self.data[self.len..new_len].fill(value);
        self.len = new_len;
        Ok(())
    }

    /// Appends every element of `values`, or nothing if they do not all fit.
    pub fn extend_from_slice(&mut self, values: &[T]) -> Result<()> {
        self.ensure_capacity(values.len())?;
        let end = self.len + values.len();
        self.data[self.len..end].copy_from_slice(values);
        self.len = end;
        Ok(())
    }

    /// Shortens the vector to `len` elements; longer lengths are ignored.
    #[inline]
    pub fn truncate(&mut self, len: usize) {
        if len < self.len {
            self.data[len..self.len].fill(T::default());
            self.len = len;
        }
    }

    /// Removes all elements.
    #[inline]
    pub fn clear(&mut self) {
        self.truncate(0);
    }
}

impl<T, const N: usize> StaticVec<T, N> {
    /// Returns the current length.
    #[inline]
    #[must_use]
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Returns the compile-time capacity.
    #[inline]
    #[must_use]
    pub const fn capacity(&self) -> usize {
        N
    }

    /// Returns `true` if the vector is empty.
    #[inline]
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// The initialized elements.
    #[inline]
    #[must_use]
    pub fn as_slice(&self) -> &[T] {
        &self.data[..self.len]
    }

    /// The initialized elements, mutably.
    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        &mut self.data[..self.len]
    }
}

impl<T: Copy + Default, const N: usize> Default for StaticVec<T, N> {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl<T, const N: usize> Deref for StaticVec<T, N> {
    type Target = [T];

    #[inline]
    fn deref(&self) -> &[T] {
        self.as_slice()
    }
}

impl<T, const N: usize> DerefMut for StaticVec<T, N> {
    #[inline]
    fn deref_mut(&mut self) -> &mut [T] {
        self.as_mut_slice()
    }
}

impl<T: PartialEq, const N: usize> PartialEq for StaticVec<T, N> {
    fn eq(&self, other: &Self) -> bool {
        self.as_slice() == other.as_slice()
    }
}

impl<T: Eq, const N: usize> Eq for StaticVec<T, N> {}

impl<T: fmt::Debug, const N: usize> fmt::Debug for StaticVec<T, N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.as_slice()).finish()
    }
}

impl<'a, T, const N: usize> IntoIterator for &'a StaticVec<T, N> {
    type Item = &'a T;
    type IntoIter = core::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.as_slice().iter()
    }
}
