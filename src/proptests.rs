use super::*;
use crate::geometry::Geometric;
use crate::test_util::validate;

use proptest::prelude::*;
use proptest_derive::Arbitrary;
use std::collections::BTreeMap;

#[derive(Clone, Debug, Arbitrary)]
enum Op {
    Add(u8, u32),
    Remove(u8),
    Update(u8, u8, u32),
    Get(u8),
    Clear,
}

fn ops_strategy() -> impl Strategy<Value = Vec<Op>> {
    let op = prop_oneof![
        45 => any::<(u8, u32)>().prop_map(|(k, v)| Op::Add(k, v)),
        30 => any::<u8>().prop_map(Op::Remove),
        10 => any::<(u8, u8, u32)>().prop_map(|(a, b, v)| Op::Update(a, b, v)),
        14 => any::<u8>().prop_map(Op::Get),
        1 => Just(Op::Clear),
    ];
    prop::collection::vec(op, 0..=1000)
}

fn assert_ascending<'a, K: Ord + 'a>(keys: impl Iterator<Item = &'a K>) {
    let keys: Vec<&K> = keys.collect();
    assert!(keys.windows(2).all(|w| w[0] < w[1]), "keys must be strictly ascending");
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 256,
        max_shrink_iters: 10_000,
        .. ProptestConfig::default()
    })]

    #[test]
    fn prop_equivalence_btreemap(ops in ops_strategy()) {
        let mut t: AvlTree<u8, u32> = AvlTree::new();
        let mut m: BTreeMap<u8, u32> = BTreeMap::new();

        for op in ops {
            match op {
                Op::Add(key, value) => {
                    prop_assert_eq!(t.add(key, value), m.insert(key, value));
                }
                Op::Remove(key) => {
                    prop_assert_eq!(t.remove(&key), m.remove(&key));
                }
                Op::Update(old, new, value) => {
                    let removed = m.remove(&old);
                    m.insert(new, value);
                    prop_assert_eq!(t.update(&old, new, value), removed);
                }
                Op::Get(key) => {
                    prop_assert_eq!(t.get(&key), m.get(&key));
                }
                Op::Clear => {
                    t.clear();
                    m.clear();
                }
            }

            prop_assert_eq!(t.len(), m.len());
            prop_assert_eq!(validate(t.root()), m.len());
        }

        assert_ascending(t.iter().map(|(k, _)| k));
        let got: Vec<(u8, u32)> = t.iter().map(|(k, v)| (*k, *v)).collect();
        let expected: Vec<(u8, u32)> = m.into_iter().collect();
        prop_assert_eq!(got, expected);
    }

    #[test]
    fn prop_pool_equivalence(ops in prop::collection::vec(any::<Op>(), 0..=500)) {
        let pool: PoolHandle<u8, u32> = PoolHandle::with_config(PoolConfig::new().max_idle(32)).unwrap();
        let mut pooled = AvlTree::with_memory_pool(pool.clone());
        let mut plain: AvlTree<u8, u32> = AvlTree::new();

        for op in ops {
            match op {
                Op::Add(key, value) => {
                    prop_assert_eq!(pooled.add(key, value), plain.add(key, value));
                }
                Op::Remove(key) => {
                    prop_assert_eq!(pooled.remove(&key), plain.remove(&key));
                }
                Op::Update(old, new, value) => {
                    prop_assert_eq!(pooled.update(&old, new, value), plain.update(&old, new, value));
                }
                Op::Get(key) => {
                    prop_assert_eq!(pooled.get(&key), plain.get(&key));
                }
                Op::Clear => {
                    pooled.clear();
                    plain.clear();
                }
            }

            prop_assert_eq!(pooled.height(), plain.height());
            prop_assert!(pooled.iter().eq(plain.iter()));
            prop_assert!(pool.idle() <= 32);
        }

        let guard = pool.lock();
        for record in guard.idle_records() {
            prop_assert_eq!(*record.key(), 0);
            prop_assert_eq!(*record.value(), 0);
            prop_assert_eq!(record.height(), 0);
            prop_assert!(record.left().is_none() && record.right().is_none());
        }
    }

    #[test]
    fn prop_disjoint_ranges_found_by_points(
        starts in prop::collection::btree_set(0u16..1000, 1..64),
        probes in prop::collection::vec(0.0f32..2000.0, 0..64),
    ) {
        // Range i covers [2s, 2s + 1]; the half-open gaps between them hold no key.
        let mut t: UnrestrictedAvlTree<Geometric, u16> = UnrestrictedAvlTree::new();
        for &s in &starts {
            let a = f32::from(s) * 2.0;
            prop_assert_eq!(t.add(Geometric::range(a, a + 1.0).unwrap(), s).unwrap(), None);
        }
        prop_assert_eq!(validate(t.root()), starts.len());

        for x in probes {
            let expected = starts
                .iter()
                .copied()
                .find(|&s| {
                    let a = f32::from(s) * 2.0;
                    a <= x && x <= a + 1.0
                });
            let got = t.get(&Geometric::point(x)).unwrap().copied();
            prop_assert_eq!(got, expected);
        }
    }
}

fn for_each_permutation<T: Clone>(items: &[T], mut f: impl FnMut(Vec<T>)) {
    fn rec<T: Clone>(items: &[T], used: &mut [bool], out: &mut Vec<T>, f: &mut impl FnMut(Vec<T>)) {
        if out.len() == items.len() {
            f(out.clone());
            return;
        }
        for i in 0..items.len() {
            if used[i] {
                continue;
            }
            used[i] = true;
            out.push(items[i].clone());
            rec(items, used, out, f);
            out.pop();
            used[i] = false;
        }
    }

    let mut used = vec![false; items.len()];
    let mut out = Vec::with_capacity(items.len());
    rec(items, &mut used, &mut out, &mut f);
}

#[test]
fn exhaustive_insert_order_small_set() {
    let keys: Vec<u32> = (1..=7).collect();

    for_each_permutation(&keys, |perm| {
        let mut t: AvlTree<u32, u32> = AvlTree::new();
        for k in perm {
            assert_eq!(t.add(k, k), None);
            validate(t.root());
        }
        assert!(t.height() <= 4);
        assert!(t.iter().map(|(k, _)| *k).eq(1..=7));
    });
}

#[test]
fn exhaustive_remove_order_small_set() {
    let keys: Vec<u32> = (1..=6).collect();
    let base: AvlTree<u32, u32> = keys.iter().map(|&k| (k, k * 10)).collect();

    for_each_permutation(&keys, |perm| {
        let mut t = base.clone();
        let mut remaining: Vec<u32> = keys.clone();
        for k in perm {
            assert_eq!(t.remove(&k), Some(k * 10));
            remaining.retain(|&r| r != k);
            assert_eq!(validate(t.root()), remaining.len());
            assert!(t.iter().map(|(k, _)| *k).eq(remaining.iter().copied()));
        }
        assert!(t.is_empty());
        assert!(t.root().is_none());
    });
}
