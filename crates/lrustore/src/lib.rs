//! # lrustore
//!
//! Fixed-capacity in-memory key-value store with LRU eviction.
//!
//! ## Architecture
//! - **Lookup index**: AHash map from key to list slot (O(1))
//! - **Recency list**: Slot-indexed doubly-linked list for ordering (O(1))
//! - **Eviction callback**: Optional hook fired for every entry that leaves
//!
//! The store is single-threaded. Callers that share it across threads put it
//! behind their own lock.

#![warn(missing_docs)]

mod config;
mod error;
mod list;
mod lru;
mod stats;

pub use config::{LruConfig, DEFAULT_CAPACITY};
pub use error::{Error, Result};
pub use lru::{EvictCallback, Lru};
pub use stats::CacheStats;
