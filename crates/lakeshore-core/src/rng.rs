use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha12Rng;

/// Uniform random stream consumed by the simulation.
///
/// Every stochastic decision in a turn (heading jitter, feeding success,
/// pairing gate, offspring placement, lake sampling) draws from one of these
/// two operations, so a fixed stream fully determines a run.
pub trait RandomSource {
    /// Uniform value in `[0, 1)`.
    fn uniform(&mut self) -> f64;

    /// Uniform value between `low` and `high`.
    fn uniform_range(&mut self, low: f64, high: f64) -> f64 {
        low + (high - low) * self.uniform()
    }
}

impl RandomSource for ChaCha12Rng {
    fn uniform(&mut self) -> f64 {
        self.random::<f64>()
    }
}

/// Create a deterministic RNG from a seed.
pub fn create_rng(seed: u64) -> ChaCha12Rng {
    ChaCha12Rng::seed_from_u64(seed)
}

/// Replays a fixed sequence of draws, then a constant fallback.
#[cfg(test)]
pub(crate) struct ScriptedRng {
    values: std::collections::VecDeque<f64>,
    fallback: f64,
    pub draws: usize,
}

#[cfg(test)]
impl ScriptedRng {
    /// A fallback of 0.5 maps every symmetric `uniform_range` to its midpoint,
    /// which keeps headings and offsets unperturbed.
    pub fn new(values: impl IntoIterator<Item = f64>) -> Self {
        Self {
            values: values.into_iter().collect(),
            fallback: 0.5,
            draws: 0,
        }
    }

    pub fn constant(value: f64) -> Self {
        Self {
            values: Default::default(),
            fallback: value,
            draws: 0,
        }
    }
}

#[cfg(test)]
impl RandomSource for ScriptedRng {
    fn uniform(&mut self) -> f64 {
        self.draws += 1;
        self.values.pop_front().unwrap_or(self.fallback)
    }
}
