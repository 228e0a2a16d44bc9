use crate::KnnError;
use rand::{Rng, SeedableRng};
use rand_xoshiro::Xoshiro256PlusPlus;
use tabknn_helpers::{Number, Table};
use tracing::debug;

/// A table partitioned into training and test rows.
///
/// `train_indices` and `test_indices` refer to rows of the source table.
/// Together they cover every source row exactly once.
#[derive(Debug, Clone)]
pub struct TrainTestSplit<T: Number> {
    pub train: Table<T>,
    pub test: Table<T>,
    /// Source rows kept for training, in their original order.
    pub train_indices: Vec<usize>,
    /// Source rows drawn for testing, in draw order.
    pub test_indices: Vec<usize>,
}

/// Randomly moves `floor(len * test_fraction)` rows of `table` into a test
/// table and keeps the rest for training.
///
/// Each draw picks uniformly among the rows not drawn yet, so the same seed
/// always gives the same partition.
///
/// # Errors
///
/// Returns `KnnError::InvalidFraction` unless `test_fraction` lies in `[0, 1]`.
pub fn split<T: Number>(
    table: &Table<T>,
    test_fraction: f64,
    seed: u64,
) -> Result<TrainTestSplit<T>, KnnError> {
    if !(0.0..=1.0).contains(&test_fraction) {
        return Err(KnnError::InvalidFraction(test_fraction));
    }

    let n = table.len();
    let test_count = ((n as f64 * test_fraction).floor() as usize).min(n);
    let mut rng = Xoshiro256PlusPlus::seed_from_u64(seed);

    let mut pool: Vec<usize> = (0..n).collect();
    let mut test_indices = Vec::with_capacity(test_count);
    for _ in 0..test_count {
        let position = rng.random_range(0..pool.len());
        test_indices.push(pool.remove(position));
    }
    let train_indices = pool;

    debug!(
        train = train_indices.len(),
        test = test_indices.len(),
        seed,
        "split table"
    );

    Ok(TrainTestSplit {
        train: table.select_rows(&train_indices)?,
        test: table.select_rows(&test_indices)?,
        train_indices,
        test_indices,
    })
}
