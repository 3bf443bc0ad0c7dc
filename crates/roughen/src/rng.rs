//! Seeded random source for sketch perturbation.
//!
//! Every rough coordinate in the crate is offset by values drawn from an
//! [`Rng`]. A draw call creates one from the resolved seed and threads it
//! through the generators by `&mut`, so two calls with the same seed and the
//! same options produce bit-identical output.

/// Park-Miller modulus, 2^31 - 1.
pub const MODULUS: u64 = 2_147_483_647;

const MULTIPLIER: u64 = 48_271;

/// A deterministic multiplicative congruential generator.
///
/// `s(n+1) = s(n) * 48271 mod (2^31 - 1)`, yielding `s(n+1) / (2^31 - 1)`.
///
/// # Example
/// ```
/// use roughen::rng::Rng;
///
/// let mut rng = Rng::new(12345);
/// let value = rng.next_f64(); // Returns value in [0, 1)
/// assert!((0.0..1.0).contains(&value));
/// ```
#[derive(Debug, Clone)]
pub struct Rng {
    state: u64,
}

impl Rng {
    /// Create a new RNG with the given seed.
    ///
    /// A seed that reduces to zero has no orbit under the recurrence and
    /// starts from `MODULUS - 1` instead.
    pub fn new(seed: u64) -> Self {
        let state = match seed % MODULUS {
            0 => MODULUS - 1,
            s => s,
        };
        Self { state }
    }

    /// Get the next value in [0, 1).
    #[inline]
    pub fn next_f64(&mut self) -> f64 {
        self.state = (self.state * MULTIPLIER) % MODULUS;
        self.state as f64 / MODULUS as f64
    }

    /// Uniform value in `[min, max)` scaled by `roughness * gain`.
    #[inline]
    pub fn offset_range(&mut self, min: f64, max: f64, roughness: f64, gain: f64) -> f64 {
        roughness * gain * (self.next_f64() * (max - min) + min)
    }

    /// Uniform value in `[-x, x)` scaled by `roughness * gain`.
    #[inline]
    pub fn offset(&mut self, x: f64, roughness: f64, gain: f64) -> f64 {
        self.offset_range(-x, x, roughness, gain)
    }
}

/// A fresh seed in `[1, 2^31 - 1)`.
pub fn random_seed() -> u64 {
    rand::random_range(1..MODULUS)
}
