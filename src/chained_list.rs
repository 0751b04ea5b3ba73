//! ChainedList: forward-linked key/value list stored in a generational arena.
//!
//! Nodes live in a `SlotMap` and link to their successor by key, so the
//! list has a single owner for every node and no pointer cycles. `head`,
//! `tail` and the arena length are the list's entire state:
//! - `len() == 0` iff `head` is `None` iff `tail` is `None`.
//! - Following `next` from `head` reaches `tail` in `len()` steps and
//!   `tail.next` is `None`.
//!
//! The list does not deduplicate keys; the map above it does.

use crate::error::ListError;
use core::borrow::Borrow;
use core::fmt;
use slotmap::{DefaultKey, SlotMap};

/// One key/value cell of a `ChainedList`.
#[derive(Debug)]
pub struct Node<K, V> {
    key: K,
    value: V,
    next: Option<DefaultKey>,
}

impl<K, V> Node<K, V> {
    pub fn key(&self) -> &K {
        &self.key
    }

    pub fn value(&self) -> &V {
        &self.value
    }

    pub fn value_mut(&mut self) -> &mut V {
        &mut self.value
    }

    /// Overwrite the value in place, returning the previous one.
    pub fn replace_value(&mut self, value: V) -> V {
        core::mem::replace(&mut self.value, value)
    }
}

pub struct ChainedList<K, V> {
    nodes: SlotMap<DefaultKey, Node<K, V>>,
    head: Option<DefaultKey>,
    tail: Option<DefaultKey>,
}

impl<K, V> ChainedList<K, V> {
    pub fn new() -> Self {
        Self {
            nodes: SlotMap::with_key(),
            head: None,
            tail: None,
        }
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn head(&self) -> Option<&Node<K, V>> {
        self.head.and_then(|id| self.nodes.get(id))
    }

    pub fn tail(&self) -> Option<&Node<K, V>> {
        self.tail.and_then(|id| self.nodes.get(id))
    }

    /// Add a node after the current tail. O(1).
    pub fn append(&mut self, key: K, value: V) {
        let id = self.nodes.insert(Node {
            key,
            value,
            next: None,
        });
        match self.tail {
            Some(tail) => self.nodes[tail].next = Some(id),
            None => self.head = Some(id),
        }
        self.tail = Some(id);
    }

    /// Add a node before the current head. O(1).
    pub fn prepend(&mut self, key: K, value: V) {
        let id = self.nodes.insert(Node {
            key,
            value,
            next: self.head,
        });
        self.head = Some(id);
        if self.tail.is_none() {
            self.tail = Some(id);
        }
    }

    /// Insert so the new node ends up at `index`. Valid range is `0..=len()`.
    pub fn insert_at(&mut self, index: usize, key: K, value: V) -> Result<(), ListError> {
        let len = self.len();
        if index > len {
            return Err(ListError::IndexOutOfRange { index, len });
        }
        if index == 0 {
            self.prepend(key, value);
            return Ok(());
        }
        if index == len {
            self.append(key, value);
            return Ok(());
        }

        let Some(prev) = self.id_at(index - 1) else {
            return Err(ListError::IndexOutOfRange { index, len });
        };
        let id = self.nodes.insert(Node {
            key,
            value,
            next: self.nodes[prev].next,
        });
        self.nodes[prev].next = Some(id);
        debug_assert!(self.links_consistent());
        Ok(())
    }

    /// Unlink the node at `index` and hand back its pair. Out-of-range
    /// indices and empty lists yield `None`.
    pub fn remove_at(&mut self, index: usize) -> Option<(K, V)> {
        if index >= self.len() {
            return None;
        }

        let removed = if index == 0 {
            let head = self.head?;
            let node = self.nodes.remove(head)?;
            self.head = node.next;
            if self.head.is_none() {
                self.tail = None;
            }
            node
        } else {
            let prev = self.id_at(index - 1)?;
            let target = self.nodes[prev].next?;
            let node = self.nodes.remove(target)?;
            self.nodes[prev].next = node.next;
            if self.tail == Some(target) {
                self.tail = Some(prev);
            }
            node
        };

        debug_assert!(self.links_consistent());
        Some((removed.key, removed.value))
    }

    /// Remove the last node. Links only point forward, so the new tail is
    /// found by walking from `head`. O(n).
    pub fn pop(&mut self) -> Option<(K, V)> {
        let last = self.len().checked_sub(1)?;
        self.remove_at(last)
    }

    pub fn at(&self, index: usize) -> Option<&Node<K, V>> {
        self.id_at(index).and_then(|id| self.nodes.get(id))
    }

    pub fn at_mut(&mut self, index: usize) -> Option<&mut Node<K, V>> {
        let id = self.id_at(index)?;
        self.nodes.get_mut(id)
    }

    /// Position of the first node with `key`, if any.
    pub fn find<Q>(&self, key: &Q) -> Option<usize>
    where
        K: Borrow<Q>,
        Q: ?Sized + Eq,
    {
        self.iter().position(|n| n.key.borrow() == key)
    }

    pub fn contains<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized + Eq,
    {
        self.iter().any(|n| n.key.borrow() == key)
    }

    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Eq,
    {
        self.traverse(|n| (n.key.borrow() == key).then_some(&n.value))
    }

    pub fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Eq,
    {
        let mut cur = self.head;
        while let Some(id) = cur {
            let node = self.nodes.get(id)?;
            if node.key.borrow() == key {
                return self.nodes.get_mut(id).map(|n| &mut n.value);
            }
            cur = node.next;
        }
        None
    }

    /// Visit nodes front to back; the first `Some` returned by `visitor`
    /// stops the walk and is returned.
    pub fn traverse<'a, R, F>(&'a self, visitor: F) -> Option<R>
    where
        F: FnMut(&'a Node<K, V>) -> Option<R>,
    {
        self.iter().find_map(visitor)
    }

    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter {
            nodes: &self.nodes,
            cur: self.head,
            remaining: self.len(),
        }
    }

    pub fn clear(&mut self) {
        self.nodes.clear();
        self.head = None;
        self.tail = None;
    }

    fn id_at(&self, index: usize) -> Option<DefaultKey> {
        if index >= self.len() {
            return None;
        }
        let mut cur = self.head;
        for _ in 0..index {
            cur = self.nodes.get(cur?)?.next;
        }
        cur
    }

    fn links_consistent(&self) -> bool {
        let mut steps = 0;
        let mut last = None;
        let mut cur = self.head;
        while let Some(id) = cur {
            match self.nodes.get(id) {
                Some(node) => {
                    steps += 1;
                    last = Some(id);
                    cur = node.next;
                }
                None => return false,
            }
        }
        steps == self.len() && last == self.tail
    }
}

impl<K, V> Default for ChainedList<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

/// Front-to-back iterator over the nodes of a `ChainedList`.
pub struct Iter<'a, K, V> {
    nodes: &'a SlotMap<DefaultKey, Node<K, V>>,
    cur: Option<DefaultKey>,
    remaining: usize,
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = &'a Node<K, V>;
    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        let node = self.nodes.get(self.cur?)?;
        self.cur = node.next;
        self.remaining -= 1;
        Some(node)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V> ExactSizeIterator for Iter<'_, K, V> {}

impl<'a, K, V> IntoIterator for &'a ChainedList<K, V> {
    type Item = &'a Node<K, V>;
    type IntoIter = Iter<'a, K, V>;
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Owning iterator; drains the list from the front.
pub struct IntoIter<K, V> {
    list: ChainedList<K, V>,
}

impl<K, V> Iterator for IntoIter<K, V> {
    type Item = (K, V);
    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.list.remove_at(0)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.list.len(), Some(self.list.len()))
    }
}

impl<K, V> ExactSizeIterator for IntoIter<K, V> {}

impl<K, V> IntoIterator for ChainedList<K, V> {
    type Item = (K, V);
    type IntoIter = IntoIter<K, V>;
    fn into_iter(self) -> Self::IntoIter {
        IntoIter { list: self }
    }
}

impl<K, V> FromIterator<(K, V)> for ChainedList<K, V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut list = Self::new();
        list.extend(iter);
        list
    }
}

impl<K, V> Extend<(K, V)> for ChainedList<K, V> {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (k, v) in iter {
            self.append(k, v);
        }
    }
}

/// Renders `( k1 ) => ( k2 ) => ...`; an empty list renders as nothing.
impl<K: fmt::Display, V> fmt::Display for ChainedList<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, node) in self.iter().enumerate() {
            if i > 0 {
                f.write_str(" => ")?;
            }
            write!(f, "( {} )", node.key)?;
        }
        Ok(())
    }
}

impl<K: fmt::Debug, V: fmt::Debug> fmt::Debug for ChainedList<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.iter().map(|n| (&n.key, &n.value)))
            .finish()
    }
}
