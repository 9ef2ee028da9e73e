//! K-Fold Splitter

use crate::EvalError;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

/// Train / held-out indices of one fold
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fold {
    pub train: Vec<usize>,
    pub test: Vec<usize>,
}

/// Seeded k-fold partitioner
///
/// Indices are shuffled once, then cut into `n_splits` contiguous blocks.
/// The first `n % n_splits` blocks hold one extra sample.
#[derive(Debug, Clone, Copy)]
pub struct KFold {
    n_splits: usize,
    shuffle: bool,
    seed: u64,
}

impl KFold {
    pub fn new(n_splits: usize) -> Result<Self, EvalError> {
        if n_splits < 2 {
            return Err(EvalError::InvalidConfig(format!(
                "k-fold needs at least 2 splits, got {}",
                n_splits
            )));
        }
        Ok(Self {
            n_splits,
            shuffle: true,
            seed: 0,
        })
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_shuffle(mut self, shuffle: bool) -> Self {
        self.shuffle = shuffle;
        self
    }

    pub fn n_splits(&self) -> usize {
        self.n_splits
    }

    /// Partition `n_samples` indices; the same seed always yields the same folds
    pub fn split(&self, n_samples: usize) -> Result<Vec<Fold>, EvalError> {
        if n_samples < self.n_splits {
            return Err(EvalError::InvalidConfig(format!(
                "cannot split {} samples into {} folds",
                n_samples, self.n_splits
            )));
        }

        let mut indices: Vec<usize> = (0..n_samples).collect();
        if self.shuffle {
            let mut rng = StdRng::seed_from_u64(self.seed);
            indices.shuffle(&mut rng);
        }

        let base = n_samples / self.n_splits;
        let extra = n_samples % self.n_splits;
        let mut folds = Vec::with_capacity(self.n_splits);
        let mut start = 0;
        for fold_idx in 0..self.n_splits {
            let size = base + usize::from(fold_idx < extra);
            let end = start + size;
            let test = indices[start..end].to_vec();
            let train = indices[..start]
                .iter()
                .chain(&indices[end..])
                .copied()
                .collect();
            folds.push(Fold { train, test });
            start = end;
        }
        Ok(folds)
    }
}
