//! Key code units and the bucket hash that folds over them.
//!
//! The map never consults `core::hash::Hash`. A key is reduced to the
//! ordered sequence of its UTF-16 code units and folded with a polynomial
//! rolling hash taken modulo the current bucket count at every step, so the
//! result is always a valid bucket index.

use std::borrow::Cow;
use std::rc::Rc;

/// Multiplier of the default rolling hash.
pub const PRIME: u64 = 31;

/// A key that can be folded into a bucket index.
pub trait CodeUnits {
    /// Ordered UTF-16 code units of the key.
    fn code_units(&self) -> impl Iterator<Item = u16> + '_;

    /// A blank key yields no code units and is rejected by `set`/`get`.
    fn is_blank(&self) -> bool {
        self.code_units().next().is_none()
    }
}

impl CodeUnits for str {
    fn code_units(&self) -> impl Iterator<Item = u16> + '_ {
        self.encode_utf16()
    }
}

impl CodeUnits for String {
    fn code_units(&self) -> impl Iterator<Item = u16> + '_ {
        self.as_str().encode_utf16()
    }
}

impl CodeUnits for Cow<'_, str> {
    fn code_units(&self) -> impl Iterator<Item = u16> + '_ {
        self.as_ref().encode_utf16()
    }
}

impl CodeUnits for Box<str> {
    fn code_units(&self) -> impl Iterator<Item = u16> + '_ {
        self.as_ref().encode_utf16()
    }
}

impl CodeUnits for Rc<str> {
    fn code_units(&self) -> impl Iterator<Item = u16> + '_ {
        self.as_ref().encode_utf16()
    }
}

impl CodeUnits for char {
    fn code_units(&self) -> impl Iterator<Item = u16> + '_ {
        let mut buf = [0u16; 2];
        let len = self.encode_utf16(&mut buf).len();
        buf.into_iter().take(len)
    }
}

impl<T: CodeUnits + ?Sized> CodeUnits for &T {
    fn code_units(&self) -> impl Iterator<Item = u16> + '_ {
        (**self).code_units()
    }
}

/// Maps a key to a bucket index in `[0, capacity)`.
pub trait BucketHasher {
    fn bucket<Q>(&self, key: &Q, capacity: usize) -> usize
    where
        Q: CodeUnits + ?Sized;
}

/// `h = (31 * h + unit) mod capacity`, seeded at 0.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub struct RollingHash;

impl BucketHasher for RollingHash {
    #[inline]
    fn bucket<Q>(&self, key: &Q, capacity: usize) -> usize
    where
        Q: CodeUnits + ?Sized,
    {
        debug_assert!(capacity > 0, "bucket capacity must be non-zero");
        let cap = capacity as u64;
        key.code_units()
            .fold(0u64, |h, unit| (PRIME * h + u64::from(unit)) % cap) as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Invariant: single-unit keys land on `unit mod capacity`.
    #[test]
    fn single_char_keys() {
        assert_eq!(RollingHash.bucket("A", 16), 1);
        assert_eq!(RollingHash.bucket("B", 16), 2);
        assert_eq!(RollingHash.bucket("D", 16), 4);
        assert_eq!(RollingHash.bucket(&'C', 16), 3);
    }

    /// Invariant: the modulo is applied at every step, and the index depends
    /// on the capacity it was computed against.
    #[test]
    fn rolling_fold_known_values() {
        assert_eq!(RollingHash.bucket("apple", 16), 10);
        assert_eq!(RollingHash.bucket("apple", 32), 26);
        assert_eq!(RollingHash.bucket("banana", 64), 37);
        assert_eq!(RollingHash.bucket("Hello World", 16), 4);
        assert_eq!(RollingHash.bucket("ab", 64), 33);
        assert_eq!(RollingHash.bucket("ba", 64), 63);
    }

    /// Invariant: non-BMP characters hash as their surrogate pair.
    #[test]
    fn utf16_surrogates() {
        assert_eq!("😀".code_units().collect::<Vec<_>>(), vec![0xD83D, 0xDE00]);
        assert_eq!('😀'.code_units().collect::<Vec<_>>(), vec![0xD83D, 0xDE00]);
        assert_eq!(RollingHash.bucket("😀", 64), 35);
        assert_eq!(RollingHash.bucket("é", 16), 9);
    }

    /// Invariant: only keys without code units are blank.
    #[test]
    fn blank_keys() {
        assert!("".is_blank());
        assert!(String::new().is_blank());
        assert!(Cow::Borrowed("").is_blank());
        assert!(Box::<str>::from("").is_blank());
        assert!(!Box::<str>::from("k").is_blank());
        assert!(!" ".is_blank());
        assert!(!'x'.is_blank());
        assert!(!Rc::<str>::from("k").is_blank());
    }

    /// Invariant: the empty key folds to the seed.
    #[test]
    fn empty_key_is_seed() {
        assert_eq!(RollingHash.bucket("", 16), 0);
    }
}
