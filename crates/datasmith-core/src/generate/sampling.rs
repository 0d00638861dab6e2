use rand::Rng;

/// Uniform pick from a non-empty slice.
///
/// Callers guarantee `options` is non-empty; rule normalization rejects
/// empty option lists before generation starts.
pub fn uniform_pick<'a, T>(options: &'a [T], rng: &mut impl Rng) -> &'a T {
    &options[rng.random_range(0..options.len())]
}

/// Weighted random selection from an option list.
///
/// Weights are relative and need not sum to anything in particular.
/// Uses cumulative distribution for O(n) selection.
/// Edge cases:
/// - All weights zero → uniform fallback
/// - Single option → always returns it
pub fn weighted_pick<'a, T>(options: &'a [T], weights: &[u32], rng: &mut impl Rng) -> &'a T {
    if options.len() == 1 {
        return &options[0];
    }

    let total: u64 = weights.iter().map(|w| u64::from(*w)).sum();
    if total == 0 {
        return uniform_pick(options, rng);
    }

    let roll = rng.random_range(0..total);
    let mut cumulative = 0u64;
    for (option, weight) in options.iter().zip(weights) {
        cumulative += u64::from(*weight);
        if roll < cumulative {
            return option;
        }
    }

    // Only reachable if weights is shorter than options; normalization
    // rejects that, so land on the last option.
    &options[options.len() - 1]
}

/// Pick with optional weights: weighted when present, uniform otherwise.
pub fn pick<'a, T>(options: &'a [T], weights: Option<&[u32]>, rng: &mut impl Rng) -> &'a T {
    match weights {
        Some(w) => weighted_pick(options, w, rng),
        None => uniform_pick(options, rng),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_weighted_pick_converges_to_normalized_weights() {
        let options = ["a", "b", "c"];
        let weights = [25, 25, 50];
        let mut rng = StdRng::seed_from_u64(7);
        let draws = 20_000;
        let mut counts = [0usize; 3];
        for _ in 0..draws {
            let picked = weighted_pick(&options, &weights, &mut rng);
            let idx = options.iter().position(|o| o == picked).unwrap();
            counts[idx] += 1;
        }
        for (count, expected) in counts.iter().zip([0.25, 0.25, 0.5]) {
            let freq = *count as f64 / draws as f64;
            assert!(
                (freq - expected).abs() < 0.02,
                "frequency {} too far from {}",
                freq,
                expected
            );
        }
    }

    #[test]
    fn test_weighted_pick_all_zeros_uniform_fallback() {
        let options = ["a", "b", "c"];
        let mut rng = StdRng::seed_from_u64(42);
        let mut seen = std::collections::HashSet::new();
        for _ in 0..100 {
            seen.insert(*weighted_pick(&options, &[0, 0, 0], &mut rng));
        }
        assert!(seen.len() > 1, "Uniform fallback should produce variety");
    }

    #[test]
    fn test_zero_weight_never_picked() {
        let options = ["never", "always"];
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..200 {
            assert_eq!(*weighted_pick(&options, &[0, 3], &mut rng), "always");
        }
    }

    #[test]
    fn test_single_option() {
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(*pick(&["only"], None, &mut rng), "only");
        assert_eq!(*pick(&["only"], Some(&[0]), &mut rng), "only");
    }
}
