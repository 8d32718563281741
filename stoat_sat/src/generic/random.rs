/*!
The pseudorandom number generator of MiniSat 2.1.

A multiplicative congruential generator over floating-point state. The
solver only needs a uniform draw from `[0, 1)` and a bounded integer draw,
both of which depend on the exact update rule for run-to-run
reproducibility, so the generator is kept verbatim rather than swapping in
a generator from [rand].

[RngCore] and [SeedableRng] are implemented on top so the same stream can
drive generic [rand] consumers (the test generators use this).
*/

use rand::SeedableRng;
use rand_core::{impls, RngCore};

pub struct MiniRng {
    state: f64,
}

impl MiniRng {
    /// A generator seeded with `seed`, which must be positive and finite.
    pub fn seed(seed: f64) -> Self {
        debug_assert!(seed > 0.0 && seed.is_finite());
        MiniRng { state: seed }
    }

    /// A uniform draw from `[0, 1)`.
    pub fn next_f64(&mut self) -> f64 {
        self.state *= 1389796.0;
        let q = (self.state / 2147483647.0) as i64;
        self.state -= q as f64 * 2147483647.0;
        self.state / 2147483647.0
    }

    /// A uniform draw from `[0, bound)`.
    pub fn below(&mut self, bound: u32) -> u32 {
        (self.next_f64() * bound as f64) as u32
    }
}

impl Default for MiniRng {
    fn default() -> Self {
        MiniRng::seed(91648253.0)
    }
}

impl RngCore for MiniRng {
    fn next_u32(&mut self) -> u32 {
        (self.next_f64() * u32::MAX as f64) as u32
    }

    fn next_u64(&mut self) -> u64 {
        // Two draws rather than a widened single draw, as the state holds
        // fewer than 64 bits of entropy.
        (self.next_u32() as u64) << 32 | self.next_u32() as u64
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        impls::fill_bytes_via_next(self, dest)
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
        self.fill_bytes(dest);
        Ok(())
    }
}

impl SeedableRng for MiniRng {
    type Seed = [u8; 8];

    fn from_seed(seed: Self::Seed) -> Self {
        match u64::from_le_bytes(seed) {
            0 => MiniRng::default(),
            n => MiniRng::seed(n as f64),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::Rng;

    #[test]
    fn deterministic_stream() {
        let mut a = MiniRng::seed(91648253.0);
        let mut b = MiniRng::seed(91648253.0);
        for _ in 0..1000 {
            assert_eq!(a.next_f64(), b.next_f64());
        }
    }

    #[test]
    fn draws_stay_in_range() {
        let mut rng = MiniRng::default();
        for _ in 0..10_000 {
            let d = rng.next_f64();
            assert!((0.0..1.0).contains(&d));
            assert!(rng.below(7) < 7);
        }
    }

    #[test]
    fn usable_through_rand() {
        let mut rng = MiniRng::default();
        let x: f64 = rng.gen_range(0.0..1.0);
        assert!((0.0..1.0).contains(&x));
    }
}
