//! # lrucache
//!
//! Fixed-capacity in-memory cache with least-recently-used eviction.
//!
//! ## Architecture
//! - **RecencyList**: arena-backed doubly-linked list, head = most recent (O(1))
//! - **CacheIndex**: AHash map from key to list handle (O(1))
//! - **LruCache**: keeps both in step on every get/set/evict
//! - **SharedLruCache**: one mutex around the whole cache for multi-threaded use
//!
//! ## Example
//! ```
//! use lrucache::LruCache;
//!
//! let mut cache = LruCache::new(2).unwrap();
//! cache.set("a", 1);
//! cache.set("b", 2);
//! cache.get(&"a");
//! cache.set("c", 3); // evicts "b"
//!
//! assert_eq!(cache.get(&"b"), None);
//! assert_eq!(cache.get(&"a"), Some(&1));
//! ```

#![warn(missing_docs)]

mod cache;
mod error;
mod index;
mod list;
mod shared;
mod stats;

pub use cache::LruCache;
pub use error::{Error, Result};
pub use index::CacheIndex;
pub use list::{Iter, Node, NodeHandle, RecencyList};
pub use shared::SharedLruCache;
pub use stats::{CacheStats, StatsSnapshot};
