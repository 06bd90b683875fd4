use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

/// Source of the random draws the analysis fabricates.
///
/// Every synthetic figure (uncertainty level, quantum state, qubit noise and
/// perturbations) is pulled from here so a run can be replayed exactly.
pub trait NoiseSource {
    /// Next uniform sample in [0, 1).
    fn next_unit(&mut self) -> f64;

    /// Uniform integer in [0, n). Returns 0 when `n` is 0.
    fn next_below(&mut self, n: u32) -> u32 {
        if n == 0 {
            return 0;
        }
        let sample = (self.next_unit() * f64::from(n)).floor();
        (sample.max(0.0) as u32).min(n - 1)
    }
}

impl<N: NoiseSource + ?Sized> NoiseSource for &mut N {
    fn next_unit(&mut self) -> f64 {
        (**self).next_unit()
    }
}

/// Pseudo-random noise backed by `SmallRng`.
#[derive(Debug, Clone)]
pub struct SeededNoise {
    rng: SmallRng,
}

impl SeededNoise {
    /// Reproducible noise: the same seed yields the same analysis.
    pub fn from_seed(seed: u64) -> Self {
        Self {
            rng: SmallRng::seed_from_u64(seed),
        }
    }

    /// Noise seeded from the operating system.
    pub fn from_os() -> Self {
        Self {
            rng: SmallRng::from_os_rng(),
        }
    }

    /// Seeded if a seed is given, OS entropy otherwise.
    pub fn new(seed: Option<u64>) -> Self {
        match seed {
            Some(seed) => Self::from_seed(seed),
            None => Self::from_os(),
        }
    }
}

impl NoiseSource for SeededNoise {
    fn next_unit(&mut self) -> f64 {
        self.rng.random::<f64>()
    }
}

/// Replays a fixed list of samples, cycling when exhausted.
///
/// Samples are clamped into [0, 1). An empty script always yields 0.
#[derive(Debug, Clone)]
pub struct ScriptedNoise {
    samples: Vec<f64>,
    cursor: usize,
}

impl ScriptedNoise {
    pub fn new(samples: Vec<f64>) -> Self {
        Self { samples, cursor: 0 }
    }

    pub fn constant(sample: f64) -> Self {
        Self::new(vec![sample])
    }
}

impl NoiseSource for ScriptedNoise {
    fn next_unit(&mut self) -> f64 {
        let Some(sample) = self.samples.get(self.cursor % self.samples.len().max(1)) else {
            return 0.0;
        };
        self.cursor += 1;
        sample.clamp(0.0, 1.0 - f64::EPSILON)
    }
}
