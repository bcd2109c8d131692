#![warn(missing_docs)]
#![doc = include_str!("../README.md")]
#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

/// Pluggable memory allocation for table storage.
///
/// This module provides the `Allocator` trait used by `HashTable` for its
/// combined slot buffer, along with the `Global` default allocator.
pub mod allocator;

pub mod err;

pub mod hash_table;

/// A key-value map over the open-addressing hash table.
///
/// This module provides a `HashMap` that wraps the `HashTable` and provides
/// a standard map interface with configurable hashers.
pub mod hash_map;

pub use allocator::Allocator;
pub use allocator::Global;
pub use err::Error;
#[cfg(feature = "foldhash")]
pub use hash_map::DefaultHashBuilder;
pub use hash_map::HashMap;
pub use hash_table::HashTable;
pub use hash_table::InsertError;
