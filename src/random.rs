//! Seeded random number generation.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Creates a generator from an optional seed; `None` draws from the OS.
pub fn create_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    }
}

/// Derives an independent child generator, advancing `rng` by one draw.
pub fn fork<R: Rng>(rng: &mut R) -> StdRng {
    StdRng::seed_from_u64(rng.random())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seeded_rng_is_reproducible() {
        let mut a = create_rng(Some(7));
        let mut b = create_rng(Some(7));
        for _ in 0..5 {
            assert_eq!(a.random::<u64>(), b.random::<u64>());
        }
    }

    #[test]
    fn test_fork_differs_from_parent() {
        let mut parent = create_rng(Some(1));
        let mut child = fork(&mut parent);
        let x: u64 = parent.random();
        let y: u64 = child.random();
        assert_ne!(x, y);
    }
}
