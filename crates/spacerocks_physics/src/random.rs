//! Random helpers shared by the simulations

use rand::Rng;
use spacerocks_math::lerp;

/// Uniform value in `[0, 1)`
#[inline]
pub fn random01<R: Rng + ?Sized>(rng: &mut R) -> f32 {
    rng.gen::<f32>()
}

/// Uniform value between `a` and `b`
///
/// Unlike `gen_range`, an empty or reversed range is fine: `a == b` returns `a`.
#[inline]
pub fn random_between<R: Rng + ?Sized>(rng: &mut R, a: f32, b: f32) -> f32 {
    lerp(a, b, random01(rng))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};

    #[test]
    fn test_random_between_stays_in_range() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..1000 {
            let v = random_between(&mut rng, -2.0, 3.0);
            assert!((-2.0..3.0).contains(&v));
        }
    }

    #[test]
    fn test_degenerate_range() {
        let mut rng = StdRng::seed_from_u64(7);
        assert_eq!(random_between(&mut rng, 4.0, 4.0), 4.0);
    }
}
