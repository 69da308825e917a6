//! Unit tests for ring-core primitives.

#[cfg(test)]
mod ids {
    use crate::AgentId;

    #[test]
    fn index_roundtrip() {
        let id = AgentId(42);
        assert_eq!(id.index(), 42);
        assert_eq!(AgentId::try_from(42usize).unwrap(), id);
    }

    #[test]
    fn ordering() {
        assert!(AgentId(0) < AgentId(1));
        assert!(AgentId(100) > AgentId(99));
    }

    #[test]
    fn display() {
        assert_eq!(AgentId(7).to_string(), "Agent(7)");
    }

    #[test]
    fn as_i64_fits_sentinel_comparisons() {
        // `highest` starts at -1, a value no real AgentId can ever equal.
        assert!(AgentId(0).as_i64() > -1);
    }
}

#[cfg(test)]
mod time {
    use crate::Tick;

    #[test]
    fn tick_arithmetic() {
        let t = Tick(10);
        assert_eq!(t + 5, Tick(15));
        assert_eq!(t.offset(3), Tick(13));
        assert_eq!(Tick(15) - Tick(10), 5u64);
    }

    #[test]
    fn display() {
        assert_eq!(Tick(3).to_string(), "T3");
    }
}

#[cfg(test)]
mod rng {
    use crate::SimRng;

    #[test]
    fn deterministic_same_seed() {
        let mut r1 = SimRng::new(12345);
        let mut r2 = SimRng::new(12345);
        for _ in 0..100 {
            let a: u32 = r1.gen_range(0..1000);
            let b: u32 = r2.gen_range(0..1000);
            assert_eq!(a, b);
        }
    }

    #[test]
    fn different_seeds_diverge() {
        let mut r0 = SimRng::new(1);
        let mut r1 = SimRng::new(2);
        let a: u64 = r0.gen_range(0..u64::MAX);
        let b: u64 = r1.gen_range(0..u64::MAX);
        assert_ne!(a, b);
    }

    #[test]
    fn choose_index_in_bounds() {
        let mut rng = SimRng::new(7);
        for _ in 0..200 {
            let i = rng.choose_index(5);
            assert!(i < 5);
        }
    }

    #[test]
    fn sample_without_replacement_is_distinct_and_in_range() {
        let mut rng = SimRng::new(99);
        let sample = rng.sample_without_replacement(10, 4);
        assert_eq!(sample.len(), 4);
        let mut seen = std::collections::HashSet::new();
        for i in &sample {
            assert!(*i < 10);
            assert!(seen.insert(*i), "duplicate index sampled");
        }
    }

    #[test]
    fn sample_zero_is_empty() {
        let mut rng = SimRng::new(1);
        assert!(rng.sample_without_replacement(10, 0).is_empty());
    }
}
