//! chained-hashmap: a separately-chained hash map whose buckets are
//! arena-backed singly linked lists.
//!
//! Internal Design:
//!
//! Summary
//! - Goal: a hash map whose bucket management is written out by hand:
//!   hashing, collision chaining, load-factor growth and rehash.
//! - Layers:
//!   - ChainedList<K, V>: forward-linked list of key/value nodes kept in a
//!     `slotmap` arena. Positional insert/remove, search by key, and an
//!     iterator that short-circuits like any other.
//!   - ChainedHashMap<K, V, H>: `Vec<Option<ChainedList<K, V>>>` indexed by
//!     a `BucketHasher`. Lists are created lazily per bucket and dropped
//!     again when their last entry is removed.
//!
//! Constraints
//! - Single-threaded: `!Send`/`!Sync` through a `PhantomData<*mut ()>`
//!   marker; there is no internal locking.
//! - Strict tree ownership: map owns buckets, bucket owns list, list owns
//!   nodes. No shared or cyclic node ownership.
//! - Keys are unique map-wide; `set` on an existing key overwrites in place.
//!
//! Hashing
//! - Keys expose UTF-16 code units (`CodeUnits`). The default
//!   `RollingHash` folds `h = (31 * h + unit) % capacity` from a zero
//!   seed, so the result is already a bucket index.
//! - A key with no code units is blank. `set`/`get`/`get_mut` reject it
//!   with `MapError::InvalidKey`; `has`/`remove` treat it as absent.
//!
//! Growth
//! - Capacity starts at 16 and doubles, never shrinks.
//! - `set` checks `len >= capacity * 0.75` before hashing the new key and
//!   grows first, so the count never exceeds the threshold after `set`.
//! - Rehash is `set` replayed for every entry against the doubled array.
//!
//! User code
//! - The map calls user code only through `K: Eq` and `K: CodeUnits`.
//!   Mutation takes `&mut self`, so that code can only read the map it is
//!   called from; such nested reads are allowed.
//!
//! Notes and non-goals
//! - Capacity and load factor are fixed constants; the hasher is the
//!   only construction-time knob.
//! - Enumeration (`keys`/`values`/`entries`/`iter`) is bucket order, then
//!   chain order. It matches insertion order only by coincidence.

pub mod bucket_hash;
pub mod chained_hash_map;
mod chained_hash_map_proptest;
pub mod chained_list;
mod error;

// Public surface
pub use bucket_hash::{BucketHasher, CodeUnits, RollingHash};
pub use chained_hash_map::{ChainedHashMap, Entry, DEFAULT_CAPACITY, LOAD_FACTOR};
pub use chained_list::{ChainedList, Node};
pub use error::{ListError, MapError};
