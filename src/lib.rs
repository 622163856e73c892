#![warn(missing_docs)]
#![doc = include_str!("../README.md")]
#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

/// Tuning parameters: initial capacity, neighborhood width and load factor.
pub mod config;

/// Error type shared by the map, the table and cursors.
pub mod error;

pub mod cursor;

/// A HashMap implementation on top of the neighborhood/chaining table.
///
/// This module provides a `HashMap` that wraps the `HashTable` and provides
/// a key-value map interface with configurable hashers.
pub mod hash_map;

/// The low-level table: bucket storage, placement and growth.
pub mod hash_table;

pub use config::Config;
pub use error::Error;
pub use error::Result;
pub use hash_map::Entry;
pub use hash_map::HashMap;
pub use hash_table::HashTable;

cfg_if::cfg_if! {
    if #[cfg(feature = "foldhash")] {
        /// The hasher builder used by the examples and by `HashMap::new` when
        /// no other is named: foldhash's randomly seeded fast hasher.
        pub type DefaultHashBuilder = foldhash::fast::RandomState;
    } else if #[cfg(feature = "std")] {
        /// The hasher builder used by the examples and by `HashMap::new` when
        /// no other is named: the standard library's SipHash-based hasher.
        pub type DefaultHashBuilder = std::hash::RandomState;
    }
}
