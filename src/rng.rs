use rand::Rng;
use rand_chacha::ChaCha8Rng;
use rand::SeedableRng;

/// Source of uniform random indices used by the shuffler
pub trait RandomSource {
    /// Generate a random integer in range [0, max)
    fn random_range(&mut self, max: usize) -> usize;
}

/// Seeded random number generator for reproducible simulations
#[derive(Clone)]
pub struct GameRng {
    rng: ChaCha8Rng,
    seed: u64,
}

impl GameRng {
    /// Create a new GameRng with an optional seed
    /// If seed is None, generates a random seed
    pub fn new(seed: Option<u64>) -> Self {
        let seed = seed.unwrap_or_else(|| {
            use rand::thread_rng;
            thread_rng().gen()
        });

        let rng = ChaCha8Rng::seed_from_u64(seed);
        GameRng { rng, seed }
    }

    /// Get the seed used for this RNG
    pub fn seed(&self) -> u64 {
        self.seed
    }
}

impl RandomSource for GameRng {
    fn random_range(&mut self, max: usize) -> usize {
        self.rng.gen_range(0..max)
    }
}

/// Fisher-Yates shuffle for a mutable slice
pub fn shuffle<T, R: RandomSource + ?Sized>(array: &mut [T], rng: &mut R) {
    for i in (1..array.len()).rev() {
        let j = rng.random_range(i + 1);
        array.swap(i, j);
    }
}

/// Shuffled copy of `items`; the input is left untouched
pub fn shuffled<T: Clone, R: RandomSource + ?Sized>(items: &[T], rng: &mut R) -> Vec<T> {
    let mut out = items.to_vec();
    shuffle(&mut out, rng);
    out
}

/// Replays a fixed list of picks, for tests that need an exact order.
/// Each pick is reduced modulo `max`; `usize::MAX` means "the last slot";
/// an exhausted script always returns 0.
#[cfg(test)]
pub struct ScriptedRng {
    picks: std::collections::VecDeque<usize>,
}

#[cfg(test)]
impl ScriptedRng {
    pub fn new(picks: &[usize]) -> Self {
        ScriptedRng { picks: picks.iter().copied().collect() }
    }

    /// Picks that make every swap a no-op (j == i)
    pub fn identity() -> Self {
        ScriptedRng { picks: std::iter::repeat(usize::MAX).take(4096).collect() }
    }
}

#[cfg(test)]
impl RandomSource for ScriptedRng {
    fn random_range(&mut self, max: usize) -> usize {
        match self.picks.pop_front() {
            Some(usize::MAX) => max - 1,
            Some(p) => p % max,
            None => 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn sorted<T: Ord + Clone>(v: &[T]) -> Vec<T> {
        let mut v = v.to_vec();
        v.sort();
        v
    }

    #[test]
    fn test_shuffle_reproducibility() {
        let arr = vec![1, 2, 3, 4, 5, 6, 7, 8, 9, 10];

        let mut rng1 = GameRng::new(Some(42));
        let mut rng2 = GameRng::new(Some(42));

        assert_eq!(shuffled(&arr, &mut rng1), shuffled(&arr, &mut rng2), "Same seed should produce same shuffle");
    }

    #[test]
    fn test_seed_getter() {
        let seed = 999;
        let rng = GameRng::new(Some(seed));
        assert_eq!(rng.seed(), seed);
    }

    #[test]
    fn test_random_range() {
        let mut rng = GameRng::new(Some(123));
        for _ in 0..1000 {
            let val = rng.random_range(10);
            assert!(val < 10, "random_range should be in [0, max)");
        }
    }

    #[test]
    fn test_shuffled_is_permutation_and_leaves_input() {
        let input = vec![3, 1, 1, 2, 5, 5, 5];
        let mut rng = GameRng::new(Some(7));
        for _ in 0..50 {
            let out = shuffled(&input, &mut rng);
            assert_eq!(sorted(&out), sorted(&input));
        }
        assert_eq!(input, vec![3, 1, 1, 2, 5, 5, 5]);
    }

    #[test]
    fn test_shuffled_orders_vary() {
        let input: Vec<u32> = (0..6).collect();
        let mut rng = GameRng::new(Some(2024));
        let orders: HashSet<Vec<u32>> = (0..200).map(|_| shuffled(&input, &mut rng)).collect();
        assert!(orders.len() > 50, "expected many distinct orders, got {}", orders.len());
    }

    #[test]
    fn test_shuffle_reaches_every_permutation_of_three() {
        let input = ['a', 'b', 'c'];
        let mut rng = GameRng::new(Some(11));
        let mut counts = std::collections::HashMap::new();
        let runs = 6000;
        for _ in 0..runs {
            *counts.entry(shuffled(&input, &mut rng)).or_insert(0usize) += 1;
        }
        assert_eq!(counts.len(), 6);
        for (perm, n) in counts {
            // expected 1000 each
            assert!((800..1200).contains(&n), "{:?} drawn {} times", perm, n);
        }
    }

    #[test]
    fn test_scripted_swaps() {
        // i=3 picks 0, i=2 picks 2, i=1 picks 0
        let mut rng = ScriptedRng::new(&[0, 2, 0]);
        assert_eq!(shuffled(&[1, 2, 3, 4], &mut rng), vec![2, 4, 3, 1]);
    }

    #[test]
    fn test_identity_script_keeps_order() {
        let mut rng = ScriptedRng::identity();
        assert_eq!(shuffled(&[1, 2, 3, 4, 5], &mut rng), vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_short_inputs() {
        let mut rng = GameRng::new(Some(1));
        assert!(shuffled::<u8, _>(&[], &mut rng).is_empty());
        assert_eq!(shuffled(&[9], &mut rng), vec![9]);
    }
}
