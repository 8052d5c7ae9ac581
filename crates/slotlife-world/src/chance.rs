//! Source of randomness for the behaviour rules.

use rand::Rng;

/// The draws the simulation makes. Every [`Rng`] qualifies; tests can supply
/// scripted draws to force a particular branch.
pub trait Chance {
    /// Uniform draw in `[0, 1)`
    fn uniform(&mut self) -> f64;

    /// Uniform draw in `0..n`; `n` must be positive
    fn below(&mut self, n: u32) -> u32;
}

impl<R: Rng> Chance for R {
    fn uniform(&mut self) -> f64 {
        self.gen::<f64>()
    }

    fn below(&mut self, n: u32) -> u32 {
        self.gen_range(0..n)
    }
}
