/// Seeded random collaborator supplying positions and packed colours
use crate::constants::{COLOUR_MAX, ROOT_CELL_SIZE};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Random source for the pipeline. Positions are sampled uniformly inside
/// the cubic working volume; colours are uniform packed 24-bit RGB. A fixed
/// seed makes the whole export reproducible.
pub struct PointGenerator {
    rng: StdRng,
}

impl PointGenerator {
    /// Entropy-seeded generator for normal runs
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Reproducible generator for tests and repeatable exports
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Sample `count` positions uniformly inside the working cube.
    /// Each axis is drawn from the half-open range [-half, half).
    pub fn sample_positions(&mut self, count: usize) -> Vec<(f64, f64, f64)> {
        let half = ROOT_CELL_SIZE / 2.0;
        (0..count)
            .map(|_| {
                (
                    self.rng.gen_range(-half..half),
                    self.rng.gen_range(-half..half),
                    self.rng.gen_range(-half..half),
                )
            })
            .collect()
    }

    /// Next packed 24-bit RGB colour
    pub fn next_colour(&mut self) -> u32 {
        self.rng.gen_range(0..=COLOUR_MAX)
    }
}

impl Default for PointGenerator {
    fn default() -> Self {
        Self::new()
    }
}
