use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use crate::error::IngestError;
use crate::logging::LogContext;

// ---------------------------------------------------------------------------
// Split parameters
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct SplitOptions {
    /// Proportion of rows held out for testing, strictly between 0 and 1.
    /// The test row count is rounded up.
    pub test_fraction: f64,
    pub seed: u64,
    /// When false, the last rows form the test set in their original order.
    pub shuffle: bool,
}

impl Default for SplitOptions {
    fn default() -> Self {
        Self {
            test_fraction: 0.2,
            seed: 2,
            shuffle: true,
        }
    }
}

/// Two disjoint partitions of the input rows.
#[derive(Debug, Clone, PartialEq)]
pub struct SplitResult<T> {
    pub train: Vec<T>,
    pub test: Vec<T>,
}

// ---------------------------------------------------------------------------
// Splitting
// ---------------------------------------------------------------------------

/// Number of test rows for `n` input rows.
fn test_rows(n: usize, fraction: f64) -> Result<usize, IngestError> {
    if n == 0 {
        return Err(IngestError::EmptyDataset);
    }
    if !(fraction > 0.0 && fraction < 1.0) {
        return Err(IngestError::Split(format!(
            "test fraction must be in (0, 1), got {fraction}"
        )));
    }
    let n_test = (fraction * n as f64).ceil() as usize;
    if n_test >= n {
        return Err(IngestError::Split(format!(
            "with {n} rows and test fraction {fraction} the train set would be empty"
        )));
    }
    Ok(n_test)
}

/// Partition `rows` into train and test sets.
///
/// With shuffling, row indices are permuted by a `StdRng` seeded from
/// `options.seed`; the first `n_test` permuted indices form the test set and
/// the rest the train set. The same input and options always give the same
/// split.
pub fn split<T>(
    rows: Vec<T>,
    options: &SplitOptions,
    log: &LogContext,
) -> Result<SplitResult<T>, IngestError> {
    let total = rows.len();
    let n_test = test_rows(total, options.test_fraction).inspect_err(|e| {
        log::error!(target: log.name(), "Unable to split the data: {e}");
    })?;

    let result = if options.shuffle {
        let mut order: Vec<usize> = (0..total).collect();
        let mut rng = StdRng::seed_from_u64(options.seed);
        order.shuffle(&mut rng);

        // Move rows out in permuted order without cloning.
        let mut slots: Vec<Option<T>> = rows.into_iter().map(Some).collect();
        let mut take = |i: usize| slots[i].take();
        let test: Vec<T> = order[..n_test].iter().filter_map(|&i| take(i)).collect();
        let train: Vec<T> = order[n_test..].iter().filter_map(|&i| take(i)).collect();
        SplitResult { train, test }
    } else {
        let mut train = rows;
        let test = train.split_off(total - n_test);
        SplitResult { train, test }
    };

    log::debug!(
        target: log.name(),
        "Data split: {} train, {} test (seed {}, shuffle {})",
        result.train.len(),
        result.test.len(),
        options.seed,
        options.shuffle
    );
    Ok(result)
}
