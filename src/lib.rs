//! Growable vectors built on a separated allocation and construction layer
//!
//! The crate is arranged in layers:
//!
//! - [`alloc`]: allocators which acquire and release raw storage and which
//!   construct and destroy elements within it;
//! - [`uninit`]: bulk construction of elements into raw storage;
//! - [`cursor`]: position-like cursors with statically dispatched
//!   algorithms for each movement capability;
//! - [`vec`]: the [`Vector`] container itself.
#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(test)]
#[macro_use]
extern crate std;

#[cfg(feature = "alloc")]
extern crate alloc as alloc_crate;

pub mod alloc;

pub mod cursor;

pub(crate) mod error;

pub mod index;

pub mod uninit;

pub mod vec;

#[cfg(feature = "allocator-api2")]
pub use self::alloc::ApiAlloc;
#[cfg(feature = "zeroize")]
pub use self::alloc::ZeroizingAlloc;

pub use {
    self::alloc::{Global, RawAlloc},
    self::error::{InsertionError, OutOfRange, StorageError},
    self::vec::Vector,
};
