#![cfg(test)]

// Property tests for ChainedHashMap kept inside the crate so they can
// inspect capacity and bucket layout alongside the public surface.

use crate::bucket_hash::{BucketHasher, CodeUnits};
use crate::chained_hash_map::{ChainedHashMap, LOAD_FACTOR};
use crate::error::MapError;
use hashbrown::HashMap;
use proptest::prelude::*;
use std::collections::BTreeSet;

// Pool-indexed operations: indices shrink to earlier keys, the pool shrinks,
// and op lists shrink in length. Pool keys may be blank.
#[derive(Clone, Debug)]
enum OpI {
    Set(usize, Option<i32>),
    Get(usize),
    Has(String),
    Remove(usize),
    Take(usize),
    Mutate(usize, i32),
    Clear,
    Expand,
    Iterate,
}

fn arb_scenario() -> impl Strategy<Value = (Vec<String>, Vec<OpI>)> {
    proptest::collection::vec("[a-z]{0,5}", 1..=24).prop_flat_map(|pool| {
        let idxs: Vec<usize> = (0..pool.len()).collect();
        let idx = proptest::sample::select(idxs);
        let has_pool = proptest::sample::select(pool.clone());
        let op = prop_oneof![
            6 => (idx.clone(), any::<Option<i32>>()).prop_map(|(i, v)| OpI::Set(i, v)),
            2 => idx.clone().prop_map(OpI::Get),
            2 => prop_oneof![has_pool, "[a-z]{0,5}"].prop_map(OpI::Has),
            2 => idx.clone().prop_map(OpI::Remove),
            1 => idx.clone().prop_map(OpI::Take),
            1 => (idx.clone(), any::<i32>()).prop_map(|(i, d)| OpI::Mutate(i, d)),
            1 => Just(OpI::Clear),
            1 => Just(OpI::Expand),
            1 => Just(OpI::Iterate),
        ];
        proptest::collection::vec(op, 1..120).prop_map(move |ops| (pool.clone(), ops))
    })
}

fn run_scenario<H: BucketHasher>(
    mut sut: ChainedHashMap<String, Option<i32>, H>,
    pool: Vec<String>,
    ops: Vec<OpI>,
) -> Result<(), TestCaseError> {
    let mut model: HashMap<String, Option<i32>> = HashMap::new();

    for op in ops {
        let cap_before = sut.capacity();
        match op {
            OpI::Set(i, v) => {
                let k = pool[i].clone();
                let res = sut.set(k.clone(), v);
                if k.is_empty() {
                    prop_assert_eq!(res, Err(MapError::InvalidKey));
                    prop_assert_eq!(sut.capacity(), cap_before, "rejected set must not grow");
                } else {
                    prop_assert!(res.is_ok());
                    model.insert(k, v);
                }
            }
            OpI::Get(i) => {
                let k = pool[i].as_str();
                if k.is_empty() {
                    prop_assert_eq!(sut.get(k), Err(MapError::InvalidKey));
                } else {
                    prop_assert_eq!(sut.get(k), Ok(model.get(k)));
                }
            }
            OpI::Has(s) => {
                prop_assert_eq!(sut.has(s.as_str()), model.contains_key(&s));
            }
            OpI::Remove(i) => {
                let k = pool[i].as_str();
                let len_before = sut.len();
                let removed = sut.remove(k);
                prop_assert_eq!(removed, model.remove(k).is_some());
                prop_assert_eq!(sut.len(), len_before - usize::from(removed));
                prop_assert!(!sut.has(k));
            }
            OpI::Take(i) => {
                let k = pool[i].as_str();
                let expected = model.remove_entry(k);
                prop_assert_eq!(sut.take(k), expected);
            }
            OpI::Mutate(i, d) => {
                let k = pool[i].as_str();
                if let Ok(Some(v)) = sut.get_mut(k) {
                    *v = Some(v.unwrap_or(0).saturating_add(d));
                    if let Some(mv) = model.get_mut(k) {
                        *mv = Some(mv.unwrap_or(0).saturating_add(d));
                    }
                }
            }
            OpI::Clear => {
                sut.clear();
                model.clear();
                prop_assert_eq!(sut.capacity(), cap_before);
                prop_assert!(sut.keys().is_empty());
            }
            OpI::Expand => {
                sut.expand();
                prop_assert_eq!(sut.capacity(), cap_before * 2);
            }
            OpI::Iterate => {
                let s_keys: BTreeSet<_> = sut.keys().into_iter().cloned().collect();
                let m_keys: BTreeSet<_> = model.keys().cloned().collect();
                prop_assert_eq!(s_keys, m_keys);
                for e in sut.entries() {
                    prop_assert_eq!(model.get(e.key), Some(e.value));
                }
                prop_assert_eq!(sut.values().len(), model.len());
            }
        }

        // Post-conditions after each op
        prop_assert_eq!(sut.len(), model.len());
        prop_assert_eq!(sut.is_empty(), model.is_empty());
        prop_assert!(sut.capacity().is_power_of_two());
        prop_assert!(sut.capacity() >= cap_before, "capacity never shrinks");
        prop_assert!(sut.len() as f64 <= sut.capacity() as f64 * LOAD_FACTOR);
        let chained: usize = (0..sut.capacity()).map(|b| sut.bucket_len(b)).sum();
        prop_assert_eq!(chained, sut.len());
    }
    Ok(())
}

// Property: state-machine equivalence against hashbrown::HashMap.
// - `set` overwrites existing keys in place; blank keys are rejected.
// - `get`/`has`/`remove`/`take` agree with the model for every key.
// - Growth keeps len <= capacity * LOAD_FACTOR and capacity a power of two.
// - `clear` keeps capacity; `expand` doubles it without losing entries.
proptest! {
    #![proptest_config(ProptestConfig { cases: 64, .. ProptestConfig::default() })]
    #[test]
    fn prop_state_machine((pool, ops) in arb_scenario()) {
        run_scenario(ChainedHashMap::new(), pool, ops)?;
    }
}

// Collision variant: every key lands in bucket 0, so all lookups walk one chain.
#[derive(Clone, Copy, Default)]
struct SameBucket;
impl BucketHasher for SameBucket {
    fn bucket<Q>(&self, _key: &Q, _capacity: usize) -> usize
    where
        Q: ?Sized + CodeUnits,
    {
        0
    }
}

proptest! {
    #![proptest_config(ProptestConfig { cases: 64, .. ProptestConfig::default() })]
    #[test]
    fn prop_state_machine_with_collisions((pool, ops) in arb_scenario()) {
        run_scenario(ChainedHashMap::with_hasher(SameBucket), pool, ops)?;
    }
}

// Property: setting the same pair twice is idempotent.
proptest! {
    #[test]
    fn prop_set_is_idempotent(keys in proptest::collection::vec("[a-z]{1,6}", 1..40), v in any::<i32>()) {
        let mut m: ChainedHashMap<String, i32> = ChainedHashMap::new();
        for k in &keys {
            m.set(k.clone(), v).unwrap();
        }
        let len = m.len();
        for k in &keys {
            m.set(k.clone(), v).unwrap();
            prop_assert_eq!(m.get(k.as_str()), Ok(Some(&v)));
        }
        prop_assert_eq!(m.len(), len);
    }
}
