use collatz_chain::{chain_length, successor, ChainCache, ChainLength, Value};
use proptest::prelude::*;
use rand::seq::SliceRandom;

fn snapshot(cache: &ChainCache) -> Vec<(Value, ChainLength)> {
    cache.iter().collect()
}

proptest! {
    #[test]
    fn length_is_one_more_than_successor(n in 2u64..200_000) {
        let mut cache = ChainCache::new();
        let here = chain_length(n, &mut cache).unwrap();
        let next = chain_length(successor(n).unwrap(), &mut cache).unwrap();
        prop_assert_eq!(here, next + 1);
    }

    #[test]
    fn second_call_is_a_pure_cache_hit(n in 1u64..200_000, warmup in prop::collection::vec(1u64..10_000, 0..20)) {
        let mut cache = ChainCache::new();
        for start in warmup {
            chain_length(start, &mut cache).unwrap();
        }
        let first = chain_length(n, &mut cache).unwrap();
        let before = snapshot(&cache);
        let second = chain_length(n, &mut cache).unwrap();
        prop_assert_eq!(first, second);
        prop_assert_eq!(before, snapshot(&cache));
    }

    #[test]
    fn keys_are_never_dropped(starts in prop::collection::vec(1u64..50_000, 1..40)) {
        let mut cache = ChainCache::new();
        let mut previous = snapshot(&cache);
        for start in starts {
            chain_length(start, &mut cache).unwrap();
            let current = snapshot(&cache);
            // insertion-ordered, so the old entries are an exact prefix
            prop_assert!(current.len() >= previous.len());
            prop_assert_eq!(&current[..previous.len()], &previous[..]);
            previous = current;
        }
    }

    #[test]
    fn one_is_always_one(starts in prop::collection::vec(1u64..10_000, 0..10)) {
        let mut cache = ChainCache::new();
        for start in starts {
            chain_length(start, &mut cache).unwrap();
        }
        prop_assert_eq!(chain_length(1, &mut cache).unwrap(), 1);
    }
}

#[test]
fn evaluation_order_does_not_change_values() {
    let mut starts: Vec<Value> = (1..2_000).collect();

    let mut ascending = ChainCache::new();
    for &start in &starts {
        chain_length(start, &mut ascending).unwrap();
    }

    let mut rng = rand::rng();
    for _ in 0..5 {
        starts.shuffle(&mut rng);
        let mut shuffled = ChainCache::new();
        for &start in &starts {
            chain_length(start, &mut shuffled).unwrap();
        }
        assert_eq!(shuffled.len(), ascending.len());
        for (value, length) in shuffled.iter() {
            assert_eq!(ascending.get(value), Some(length), "value {}", value);
        }
    }
}

#[test]
fn unseeded_cache_agrees_with_seeded() {
    let mut seeded = ChainCache::new();
    let mut unseeded = ChainCache::unseeded();
    for start in 1..500 {
        assert_eq!(
            chain_length(start, &mut seeded),
            chain_length(start, &mut unseeded)
        );
    }
    assert_eq!(seeded.len(), unseeded.len());
}
