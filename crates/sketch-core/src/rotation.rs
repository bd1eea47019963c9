//! Source of sticker rotations.
//!
//! Each sticker gets a whole-degree rotation in `0..360`, drawn once when it
//! is placed (or when a sticker is selected, for the preview) and never
//! re-drawn afterwards.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

#[derive(Debug, Clone)]
enum Inner {
    Random(StdRng),
    Fixed(f64),
}

#[derive(Debug, Clone)]
pub struct RotationSource {
    inner: Inner,
}

impl RotationSource {
    /// Deterministic sequence for a given seed.
    pub fn seeded(seed: u64) -> Self {
        Self {
            inner: Inner::Random(StdRng::seed_from_u64(seed)),
        }
    }

    /// Seeded from the system clock. Not available on `wasm32-unknown-unknown`,
    /// where the caller must supply a seed.
    pub fn from_clock() -> Self {
        let seed = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_nanos() as u64)
            .unwrap_or(0);
        log::debug!("rotation seed {seed}");
        Self::seeded(seed)
    }

    /// Always yields `degrees` (normalized into `0..360`).
    pub fn fixed(degrees: f64) -> Self {
        Self {
            inner: Inner::Fixed(degrees.rem_euclid(360.0)),
        }
    }

    pub fn next_degrees(&mut self) -> f64 {
        match &mut self.inner {
            Inner::Random(rng) => rng.gen_range(0..360u32) as f64,
            Inner::Fixed(degrees) => *degrees,
        }
    }
}
