use rand::{rngs::SmallRng, Rng, SeedableRng};
use sndloss::{LossListConfig, SeqNo, SharedLossList, SndLossList};
use std::collections::BTreeSet;

fn s(value: u32) -> SeqNo {
    SeqNo::new(value)
}

fn drain(list: &mut SndLossList) -> Vec<u32> {
    std::iter::from_fn(|| list.pop()).map(SeqNo::value).collect()
}

#[test]
fn merge_and_drain() -> anyhow::Result<()> {
    let mut list = SndLossList::new(256)?;
    assert_eq!(list.insert(s(1), s(2)), 2);
    assert_eq!(list.insert(s(4), s(4)), 1);
    assert_eq!(list.insert(s(3), s(3)), 1);
    assert_eq!(list.loss_length(), 4);

    for (seq, remaining) in [(1, 3), (2, 2), (3, 1), (4, 0)] {
        assert_eq!(list.pop(), Some(s(seq)));
        assert_eq!(list.loss_length(), remaining);
    }
    assert_eq!(list.pop(), None);
    Ok(())
}

#[test]
fn acknowledged_prefix_never_popped() -> anyhow::Result<()> {
    let mut list = SndLossList::with_config(LossListConfig::new(8)?);
    list.insert(s(1), s(8));
    list.remove(s(5));
    assert_eq!(drain(&mut list), [6, 7, 8]);
    Ok(())
}

#[test]
fn capacity_bounds_runs() -> anyhow::Result<()> {
    const CAPACITY: u32 = 32;
    let mut list = SndLossList::new(CAPACITY as usize)?;
    for i in 0..CAPACITY {
        assert_eq!(list.insert(s(i * 10), s(i * 10)), 1);
    }
    assert_eq!(list.insert(s(CAPACITY * 10), s(CAPACITY * 10)), 0);
    assert_eq!(list.loss_length(), CAPACITY as usize);

    list.remove(s(0));
    assert_eq!(list.insert(s(CAPACITY * 10), s(CAPACITY * 10)), 1);
    Ok(())
}

#[test]
fn shared_list_from_config() -> anyhow::Result<()> {
    let shared = SharedLossList::from(SndLossList::with_config(
        LossListConfig::from_flow_window(4)?,
    ));
    assert_eq!(shared.with(|list| list.capacity()), 8);
    shared.insert(s(10), s(12));
    shared.remove(s(10));
    assert_eq!(shared.pop(), Some(s(11)));
    assert_eq!(shared.loss_length(), 1);
    Ok(())
}

/// Applies random operations to a list and to a plain set of offsets from
/// `base`, checking the two always agree. The base sits just below the wrap
/// point so runs regularly straddle it.
fn check_against_model(seed: u64, capacity: usize) {
    const WINDOW: u32 = 2000;
    let base = SeqNo::MAX.sub(WINDOW / 2);
    let seq = |offset: u32| base.add(offset);

    let mut rng = SmallRng::seed_from_u64(seed);
    let mut list = SndLossList::new(capacity).unwrap();
    let mut model = BTreeSet::new();
    // Offsets at or below this have been acknowledged
    let mut acked = 0;

    for _ in 0..5000 {
        match rng.gen_range(0..10) {
            0..=5 => {
                let first = rng.gen_range(acked..WINDOW - 20);
                let last = first + rng.gen_range(0..12);
                let missing: Vec<u32> = (first..=last).filter(|o| !model.contains(o)).collect();
                let added = list.insert(seq(first), seq(last));
                if added == 0 && !missing.is_empty() {
                    // Dropped for lack of a free run slot
                    assert!(list.is_full());
                } else {
                    assert_eq!(added, missing.len());
                    model.extend(missing);
                }
            }
            6..=7 => {
                let expected = model.pop_first();
                assert_eq!(list.pop(), expected.map(seq));
            }
            _ => {
                acked = rng.gen_range(acked..=(acked + 40).min(WINDOW - 21));
                list.remove(seq(acked));
                model.retain(|&o| o > acked);
            }
        }

        assert_eq!(list.loss_length(), model.len());
        let runs: Vec<_> = list.iter().collect();
        assert_eq!(runs.len(), list.runs());
        assert!(runs.len() <= capacity);
        for pair in runs.windows(2) {
            // Disjoint and not touching
            assert!(pair[0].1.increment().precedes(pair[1].0));
        }
    }

    let expected: Vec<u32> = model.iter().map(|&o| seq(o).value()).collect();
    assert_eq!(drain(&mut list), expected);
}

#[test]
fn matches_set_model() {
    for seed in 0..8 {
        check_against_model(seed, 4096);
    }
}

#[test]
fn matches_set_model_under_pressure() {
    for seed in 0..8 {
        check_against_model(seed, 6);
    }
}
