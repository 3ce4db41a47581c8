//! Uniform range sampling over an injected random source
//!
//! Every function that draws a random value takes the generator as a
//! parameter. Use a seeded [`rand::rngs::StdRng`] for reproducible effects:
//!
//! ```
//! use rand::{rngs::StdRng, SeedableRng};
//! use popfx::sampler::sample;
//!
//! let mut rng = StdRng::seed_from_u64(42);
//! let v = sample(&mut rng, 10.0, 20.0);
//! assert!((10.0..=20.0).contains(&v));
//! ```

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Seed used when an effect does not provide one.
pub const DEFAULT_SEED: u64 = 42;

/// Draw a value uniformly from `[min, max]`.
///
/// Returns `min` when `min >= max`: degenerate and inverted ranges are
/// defined behavior, not errors.
pub fn sample<R: Rng + ?Sized>(rng: &mut R, min: f64, max: f64) -> f64 {
    if min >= max {
        return min;
    }
    let unit: f64 = rng.gen();
    min + unit * (max - min)
}

/// Create a deterministic generator, falling back to [`DEFAULT_SEED`].
pub fn seeded(seed: Option<u64>) -> StdRng {
    StdRng::seed_from_u64(seed.unwrap_or(DEFAULT_SEED))
}
