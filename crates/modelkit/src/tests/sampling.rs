use rand::SeedableRng;
use rand::rngs::StdRng;

use super::{COLS, Col, ScriptedDraws, cols};
use crate::dense_map::{DoubleMap, IntMap};

#[test]
fn test_sample_selects_first_key_past_threshold() {
    let mut t = DoubleMap::new(cols());
    t.put(&Col::A, 2.0);
    t.put(&Col::C, 3.0);

    // total 5, draw 0.5 -> threshold 2.5 -> running sum passes it at C
    let mut service = ScriptedDraws::uniform(&[0.5]);
    assert_eq!(t.sample(&mut service, false), Some(&Col::C));

    let mut service = ScriptedDraws::uniform(&[0.0]);
    assert_eq!(t.sample(&mut service, false), Some(&Col::A));
}

#[test]
fn test_sample_never_selects_zero_valued_keys() {
    let mut t = IntMap::new(cols());
    t.put(&Col::B, 1);

    // a zero draw lands exactly on A's zero mass; strict comparison skips it
    let mut service = ScriptedDraws::uniform(&[0.0]);
    assert_eq!(t.sample(&mut service, false), Some(&Col::B));
}

#[test]
fn test_sample_allow_null_can_decline() {
    let mut t = DoubleMap::new(cols());
    t.put(&Col::A, 0.1);
    t.put(&Col::B, 0.3);

    // probability mass 0.4: a draw above it means no selection
    let mut service = ScriptedDraws::uniform(&[0.5]);
    assert_eq!(t.sample(&mut service, true), None);

    let mut service = ScriptedDraws::uniform(&[0.2]);
    assert_eq!(t.sample(&mut service, true), Some(&Col::B));
}

#[test]
fn test_sample_empty_mass_yields_none() {
    let t = DoubleMap::new(cols());
    let mut service = ScriptedDraws::uniform(&[0.7]);
    assert_eq!(t.sample(&mut service, false), None);
    let mut service = ScriptedDraws::uniform(&[0.7]);
    assert_eq!(t.sample(&mut service, true), None);
}

#[test]
fn test_sample_frequencies_track_weights() {
    let mut weights = DoubleMap::new(cols());
    weights.put(&Col::A, 1.0);
    weights.put(&Col::C, 3.0);
    weights.put(&Col::E, 6.0);

    let mut rng = StdRng::seed_from_u64(1234);
    let mut hits = IntMap::new(cols());
    let draws = 10_000;
    for _ in 0..draws {
        let key = weights.sample(&mut rng, false).expect("positive total");
        hits.increment(key);
    }

    assert_eq!(hits.get(&Col::B), 0);
    assert_eq!(hits.get(&Col::D), 0);
    assert_eq!(hits.total(), draws);
    for (key, expected_share) in [(Col::A, 0.1), (Col::C, 0.3), (Col::E, 0.6)] {
        let share = hits.get(&key) as f64 / draws as f64;
        assert!(
            (share - expected_share).abs() < 0.03,
            "share for {key:?} was {share}, expected about {expected_share}"
        );
    }
}

#[test]
fn test_sample_does_not_mutate_the_container() {
    let mut t = DoubleMap::new(cols());
    for key in COLS.iter() {
        t.put(key, 1.0);
    }
    let before = t.total();
    let mut rng = StdRng::seed_from_u64(9);
    for _ in 0..100 {
        let _ = t.sample(&mut rng, false);
    }
    assert_eq!(t.total(), before);
}
