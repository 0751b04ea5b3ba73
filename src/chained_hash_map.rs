//! ChainedHashMap: bucket array of lazily created `ChainedList`s.
//!
//! Every operation hashes the key against the current bucket count and
//! works inside that one bucket. Growth happens inside `set`, before the
//! new entry is hashed, so the entry count never exceeds
//! `capacity * LOAD_FACTOR` once `set` returns. Capacity starts at
//! `DEFAULT_CAPACITY`, only ever doubles, and is always a power of two.

use crate::bucket_hash::{BucketHasher, CodeUnits, RollingHash};
use crate::chained_list::{self, ChainedList};
use crate::error::MapError;
use core::borrow::Borrow;
use core::fmt;
use core::marker::PhantomData;

/// Bucket count of a fresh map.
pub const DEFAULT_CAPACITY: usize = 16;

/// Maximum ratio of entries to buckets before `set` grows the map.
pub const LOAD_FACTOR: f64 = 0.75;

type Bucket<K, V> = Option<ChainedList<K, V>>;

/// Borrowed key/value pair produced by `ChainedHashMap::entries`.
#[derive(Debug, PartialEq, Eq)]
pub struct Entry<'a, K, V> {
    pub key: &'a K,
    pub value: &'a V,
}

// Structural state; `set` -> `expand` -> `set` recursion stays in here.
struct Table<K, V, H> {
    buckets: Vec<Bucket<K, V>>,
    len: usize,
    hasher: H,
}

impl<K, V, H> Table<K, V, H>
where
    K: CodeUnits + Eq,
    H: BucketHasher,
{
    fn with_capacity(capacity: usize, hasher: H) -> Self {
        Self {
            buckets: empty_buckets(capacity),
            len: 0,
            hasher,
        }
    }

    fn index_of<Q>(&self, key: &Q) -> usize
    where
        Q: ?Sized + CodeUnits,
    {
        self.hasher.bucket(key, self.buckets.len())
    }

    fn at_threshold(&self) -> bool {
        self.len as f64 >= self.buckets.len() as f64 * LOAD_FACTOR
    }

    fn set(&mut self, key: K, value: V) {
        if self.at_threshold() {
            self.expand();
        }

        let idx = self.index_of(&key);
        match self.buckets[idx].as_mut() {
            Some(list) => match list.get_mut(&key) {
                Some(slot) => {
                    *slot = value;
                    return;
                }
                None => list.append(key, value),
            },
            None => {
                let mut list = ChainedList::new();
                list.append(key, value);
                self.buckets[idx] = Some(list);
            }
        }
        self.len += 1;
    }

    // Rehash by re-running `set` for every entry against a doubled,
    // empty bucket array.
    fn expand(&mut self) {
        let doubled = self.buckets.len() * 2;
        let old = core::mem::replace(&mut self.buckets, empty_buckets(doubled));
        let expected = self.len;
        self.len = 0;
        for (key, value) in old.into_iter().flatten().flatten() {
            self.set(key, value);
        }
        debug_assert_eq!(self.len, expected);
        debug_assert_eq!(self.len, self.counted_len());
    }

    fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: ?Sized + CodeUnits + Eq,
    {
        self.buckets[self.index_of(key)].as_ref()?.get(key)
    }

    fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: ?Sized + CodeUnits + Eq,
    {
        let idx = self.index_of(key);
        self.buckets[idx].as_mut()?.get_mut(key)
    }

    fn take<Q>(&mut self, key: &Q) -> Option<(K, V)>
    where
        K: Borrow<Q>,
        Q: ?Sized + CodeUnits + Eq,
    {
        let idx = self.index_of(key);
        let list = self.buckets[idx].as_mut()?;
        let pos = list.find(key)?;
        let pair = list.remove_at(pos)?;
        if list.is_empty() {
            self.buckets[idx] = None;
        }
        self.len -= 1;
        Some(pair)
    }

    fn clear(&mut self) {
        for bucket in &mut self.buckets {
            *bucket = None;
        }
        self.len = 0;
    }

    fn counted_len(&self) -> usize {
        self.buckets.iter().flatten().map(ChainedList::len).sum()
    }
}

fn empty_buckets<K, V>(capacity: usize) -> Vec<Bucket<K, V>> {
    core::iter::repeat_with(|| None).take(capacity).collect()
}

pub struct ChainedHashMap<K, V, H = RollingHash> {
    table: Table<K, V, H>,
    // Single-writer container with no internal locking; keep it !Send + !Sync.
    _single_thread: PhantomData<*mut ()>,
}

impl<K, V> ChainedHashMap<K, V>
where
    K: CodeUnits + Eq,
{
    pub fn new() -> Self {
        Self::with_hasher(RollingHash)
    }
}

impl<K, V, H> Default for ChainedHashMap<K, V, H>
where
    K: CodeUnits + Eq,
    H: BucketHasher + Default,
{
    fn default() -> Self {
        Self::with_hasher(H::default())
    }
}

impl<K, V, H> ChainedHashMap<K, V, H>
where
    K: CodeUnits + Eq,
    H: BucketHasher,
{
    pub fn with_hasher(hasher: H) -> Self {
        Self {
            table: Table::with_capacity(DEFAULT_CAPACITY, hasher),
            _single_thread: PhantomData,
        }
    }

    /// Number of buckets. Always a power of two, never shrinks.
    pub fn capacity(&self) -> usize {
        self.table.buckets.len()
    }

    pub fn load_factor(&self) -> f64 {
        LOAD_FACTOR
    }

    pub fn len(&self) -> usize {
        self.table.len
    }
    pub fn is_empty(&self) -> bool {
        self.table.len == 0
    }

    /// Bucket index of `key` at the current capacity.
    pub fn hash<Q>(&self, key: &Q) -> usize
    where
        Q: ?Sized + CodeUnits,
    {
        self.table.index_of(key)
    }

    /// Chain length of bucket `index`; 0 for empty or out-of-range slots.
    pub fn bucket_len(&self, index: usize) -> usize {
        self.table
            .buckets
            .get(index)
            .and_then(Option::as_ref)
            .map_or(0, ChainedList::len)
    }

    /// Insert or overwrite. Grows first when the entry count has reached
    /// the load-factor threshold, so `key` is hashed at the new capacity.
    pub fn set(&mut self, key: K, value: V) -> Result<(), MapError> {
        if key.is_blank() {
            return Err(MapError::InvalidKey);
        }
        self.table.set(key, value);
        Ok(())
    }

    /// `Ok(None)` means the key is absent; a stored value may itself be
    /// an "empty" value such as `None`.
    pub fn get<Q>(&self, key: &Q) -> Result<Option<&V>, MapError>
    where
        K: Borrow<Q>,
        Q: ?Sized + CodeUnits + Eq,
    {
        if key.is_blank() {
            return Err(MapError::InvalidKey);
        }
        Ok(self.table.get(key))
    }

    pub fn get_mut<Q>(&mut self, key: &Q) -> Result<Option<&mut V>, MapError>
    where
        K: Borrow<Q>,
        Q: ?Sized + CodeUnits + Eq,
    {
        if key.is_blank() {
            return Err(MapError::InvalidKey);
        }
        Ok(self.table.get_mut(key))
    }

    pub fn has<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized + CodeUnits + Eq,
    {
        self.table.get(key).is_some()
    }

    /// Remove `key`, handing back the stored pair.
    pub fn take<Q>(&mut self, key: &Q) -> Option<(K, V)>
    where
        K: Borrow<Q>,
        Q: ?Sized + CodeUnits + Eq,
    {
        self.table.take(key)
    }

    /// Remove `key`; returns whether an entry was removed.
    pub fn remove<Q>(&mut self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized + CodeUnits + Eq,
    {
        self.take(key).is_some()
    }

    /// Drop every bucket's list. Capacity is unchanged.
    pub fn clear(&mut self) {
        self.table.clear();
    }

    /// Double the bucket count and rehash every entry.
    pub fn expand(&mut self) {
        self.table.expand();
    }

    /// Entries in bucket order, then chain order within each bucket.
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter {
            buckets: self.table.buckets.iter(),
            chain: None,
            remaining: self.table.len,
        }
    }

    pub fn keys(&self) -> Vec<&K> {
        self.iter().map(|(k, _)| k).collect()
    }

    pub fn values(&self) -> Vec<&V> {
        self.iter().map(|(_, v)| v).collect()
    }

    pub fn entries(&self) -> Vec<Entry<'_, K, V>> {
        self.iter().map(|(key, value)| Entry { key, value }).collect()
    }
}

/// Iterator over `(&K, &V)` in bucket order.
pub struct Iter<'a, K, V> {
    buckets: core::slice::Iter<'a, Bucket<K, V>>,
    chain: Option<chained_list::Iter<'a, K, V>>,
    remaining: usize,
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);
    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(node) = self.chain.as_mut().and_then(Iterator::next) {
                self.remaining -= 1;
                return Some((node.key(), node.value()));
            }
            if let Some(list) = self.buckets.next()? {
                self.chain = Some(list.iter());
            }
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V> ExactSizeIterator for Iter<'_, K, V> {}

impl<'a, K, V, H> IntoIterator for &'a ChainedHashMap<K, V, H>
where
    K: CodeUnits + Eq,
    H: BucketHasher,
{
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<K, V, H> fmt::Debug for ChainedHashMap<K, V, H>
where
    K: CodeUnits + Eq + fmt::Debug,
    V: fmt::Debug,
    H: BucketHasher,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}
