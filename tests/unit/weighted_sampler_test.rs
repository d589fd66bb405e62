// tests/unit/weighted_sampler_test.rs

use std::collections::HashMap;

use rand::rngs::StdRng;
use rand::SeedableRng;

use alert_data_generator::service::weighted_sampler::WeightedSampler;
use alert_data_generator::{CategoricalWeights, Category, GeneratorError, Priority};

#[test]
fn category_shares_follow_configured_weights() {
    let weights = CategoricalWeights::builtin();
    let sampler = WeightedSampler::new(weights.categories.clone()).unwrap();
    let mut rng = StdRng::seed_from_u64(7);
    let draws = 50_000;

    let mut counts: HashMap<Category, u32> = HashMap::new();
    for _ in 0..draws {
        *counts.entry(*sampler.sample(&mut rng)).or_default() += 1;
    }

    for category in Category::ALL {
        let observed = counts.get(&category).copied().unwrap_or(0) as f64 / draws as f64;
        let expected = weights.category_share(category);
        assert!(
            (observed - expected).abs() < 0.02,
            "{category}: observed {observed:.4}, expected {expected:.4}"
        );
    }
}

#[test]
fn priority_shares_follow_configured_weights() {
    let weights = CategoricalWeights::builtin();
    let sampler = WeightedSampler::new(weights.priorities.clone()).unwrap();
    let mut rng = StdRng::seed_from_u64(8);
    let draws = 50_000;

    let mut counts: HashMap<Priority, u32> = HashMap::new();
    for _ in 0..draws {
        *counts.entry(*sampler.sample(&mut rng)).or_default() += 1;
    }

    for priority in Priority::ALL {
        let observed = counts.get(&priority).copied().unwrap_or(0) as f64 / draws as f64;
        let expected = weights.priority_share(priority);
        assert!((observed - expected).abs() < 0.02, "{priority}: observed {observed:.4}, expected {expected:.4}");
    }
}

#[test]
fn uniform_pool_reaches_every_item() {
    let sampler = WeightedSampler::uniform(["a", "b", "c", "d"]).unwrap();
    let mut rng = StdRng::seed_from_u64(9);

    let mut seen = HashMap::new();
    for _ in 0..1_000 {
        *seen.entry(*sampler.sample(&mut rng)).or_insert(0u32) += 1;
    }
    assert_eq!(seen.len(), 4);
}

#[test]
fn empty_or_non_positive_tables_are_rejected() {
    let empty: Vec<(&str, f64)> = Vec::new();
    assert!(matches!(
        WeightedSampler::new(empty),
        Err(GeneratorError::InvalidConfiguration { .. })
    ));
    assert!(matches!(
        WeightedSampler::new([("x", 0.0), ("y", 0.0)]),
        Err(GeneratorError::InvalidConfiguration { .. })
    ));
    assert!(matches!(
        WeightedSampler::new([("x", 1.0), ("y", -2.0)]),
        Err(GeneratorError::InvalidConfiguration { .. })
    ));
    assert!(matches!(
        WeightedSampler::new([("x", f64::NAN)]),
        Err(GeneratorError::InvalidConfiguration { .. })
    ));
}

#[test]
fn builtin_tables_validate() {
    assert!(CategoricalWeights::builtin().validate().is_ok());

    let mut broken = CategoricalWeights::builtin();
    broken.systems.clear();
    assert!(broken.validate().is_err());
}
