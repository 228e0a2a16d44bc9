use thiserror::Error;
use tracing::{debug, trace};
// These are the core components from our shared library.
use tabknn_helpers::{DataError, Metric, Number, Row, Table};

mod split;
mod vote;

pub use split::{TrainTestSplit, split};

/// Errors that can occur when using the k-NN classifier.
#[derive(Debug, Error)]
pub enum KnnError {
    /// k cannot be zero for a k-NN classifier
    #[error("k cannot be zero for a k-NN classifier")]
    InvalidK,
    /// Classification was attempted before `train`
    #[error("the classifier has not been trained")]
    NotTrained,
    /// Cannot predict with an empty training set
    #[error("cannot predict with an empty training set")]
    EmptyTrainingSet,
    /// Accuracy is undefined for a test table without rows
    #[error("cannot score an empty test set")]
    EmptyTestSet,
    /// The table is too narrow for the requested operation
    #[error("table needs at least {required} fields, found {found}")]
    TooFewFields { required: usize, found: usize },
    /// The table does not have the field count the model was trained on
    #[error("field count mismatch: trained on {expected} fields, got {found}")]
    FieldCountMismatch { expected: usize, found: usize },
    /// The test fraction of a random split must lie in `[0, 1]`
    #[error("test fraction must lie in [0, 1], got {0}")]
    InvalidFraction(f64),
    /// Invalid distance comparison (likely due to NaN values in data)
    #[error("invalid distance (likely due to NaN values in data)")]
    InvalidDistance,
    /// Bad index, shape or non-numeric feature in the underlying data
    #[error(transparent)]
    Data(#[from] DataError),
}

/// Which column of a table holds the class label.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ClassColumn {
    /// The last column of the table.
    #[default]
    Last,
    /// An explicit column index.
    Index(usize),
}

impl ClassColumn {
    /// Resolves to a concrete index for a table with `field_count` columns.
    ///
    /// # Errors
    ///
    /// Returns `DataError::IndexOutOfRange` if the index does not exist.
    pub fn resolve(self, field_count: usize) -> Result<usize, KnnError> {
        match self {
            ClassColumn::Last if field_count > 0 => Ok(field_count - 1),
            ClassColumn::Index(index) if index < field_count => Ok(index),
            ClassColumn::Last => Err(DataError::IndexOutOfRange { index: 0, len: 0 }.into()),
            ClassColumn::Index(index) => Err(DataError::IndexOutOfRange {
                index,
                len: field_count,
            }
            .into()),
        }
    }
}

impl From<usize> for ClassColumn {
    fn from(index: usize) -> Self {
        ClassColumn::Index(index)
    }
}

/// Settings of a [`KnnClassifier`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde_crate::Serialize, serde_crate::Deserialize),
    serde(crate = "serde_crate")
)]
pub struct KnnConfig {
    /// How training rows are ranked against a query.
    pub metric: Metric,
    /// Number of nearest neighbors that vote. Must be greater than 0.
    pub k: usize,
}

impl Default for KnnConfig {
    fn default() -> Self {
        KnnConfig {
            metric: Metric::Euclidean,
            k: 3,
        }
    }
}

impl KnnConfig {
    pub fn with_k(mut self, k: usize) -> Self {
        self.k = k;
        self
    }

    pub fn with_metric(mut self, metric: Metric) -> Self {
        self.metric = metric;
        self
    }
}

#[derive(Debug, Clone)]
struct TrainedModel<T: Number> {
    table: Table<T>,
    class_index: usize,
}

/// A k-Nearest Neighbors (k-NN) classifier over [`Table`]s.
///
/// This classifier predicts the label of a row by finding the `k` training
/// rows closest to it and taking a majority vote among their class labels.
/// Labels are compared as text, so the class column may hold numbers or
/// strings.
///
/// A classifier starts untrained; [`train`](Self::train) copies the training
/// table into the model and may be called again to replace it. Every
/// classification method fails with `KnnError::NotTrained` before that.
///
/// `train` takes `&mut self`, so a classifier shared between threads must
/// sit behind a lock (for example `RwLock`) if it is retrained while others
/// classify.
///
/// # Type Parameters
///
/// * `T`: The numeric type of the table's number cells (e.g., `f64`, `i32`).
#[derive(Debug, Clone)]
pub struct KnnClassifier<T: Number> {
    config: KnnConfig,
    model: Option<TrainedModel<T>>,
}

impl<T: Number> Default for KnnClassifier<T> {
    fn default() -> Self {
        KnnClassifier {
            config: KnnConfig::default(),
            model: None,
        }
    }
}

impl<T: Number> KnnClassifier<T> {
    /// Creates a new, untrained k-NN classifier.
    ///
    /// # Errors
    ///
    /// Returns `KnnError::InvalidK` if `config.k` is 0, as this is not a valid configuration.
    pub fn new(config: KnnConfig) -> Result<Self, KnnError> {
        if config.k == 0 {
            return Err(KnnError::InvalidK);
        }
        Ok(Self {
            config,
            model: None,
        })
    }

    pub fn config(&self) -> &KnnConfig {
        &self.config
    }

    /// Changes the number of voting neighbors. Takes effect on the next
    /// classification; the trained model is kept.
    pub fn set_k(&mut self, k: usize) -> Result<(), KnnError> {
        if k == 0 {
            return Err(KnnError::InvalidK);
        }
        self.config.k = k;
        Ok(())
    }

    pub fn set_metric(&mut self, metric: Metric) {
        self.config.metric = metric;
    }

    pub fn is_trained(&self) -> bool {
        self.model.is_some()
    }

    /// Class column index recorded by the last `train`.
    pub fn class_index(&self) -> Option<usize> {
        self.model.as_ref().map(|model| model.class_index)
    }

    /// The model's private copy of the training table.
    pub fn training_table(&self) -> Option<&Table<T>> {
        self.model.as_ref().map(|model| &model.table)
    }

    fn model(&self) -> Result<&TrainedModel<T>, KnnError> {
        self.model.as_ref().ok_or(KnnError::NotTrained)
    }

    /// Stores a copy of `table` as the training data.
    ///
    /// No distances are computed here. Later changes to `table` do not affect
    /// the trained model, and a previous model is discarded.
    ///
    /// # Errors
    ///
    /// Returns `KnnError::TooFewFields` if the table has fewer than two
    /// columns, or a `DataError::IndexOutOfRange` for a bad class column.
    pub fn train(
        &mut self,
        table: &Table<T>,
        class_column: impl Into<ClassColumn>,
    ) -> Result<(), KnnError> {
        if table.field_count() < 2 {
            return Err(KnnError::TooFewFields {
                required: 2,
                found: table.field_count(),
            });
        }
        let class_index = class_column.into().resolve(table.field_count())?;
        debug!(
            rows = table.len(),
            fields = table.field_count(),
            class_index,
            "training k-NN model"
        );
        self.model = Some(TrainedModel {
            table: table.clone(),
            class_index,
        });
        Ok(())
    }

    /// Classifies every row of `table` and returns the fraction whose
    /// prediction equals the text of its class column.
    ///
    /// # Errors
    ///
    /// Returns `KnnError::NotTrained` before training,
    /// `KnnError::FieldCountMismatch` if `table` is shaped differently from
    /// the training table, and `KnnError::EmptyTestSet` if it has no rows.
    pub fn test(
        &self,
        table: &Table<T>,
        class_column: impl Into<ClassColumn>,
    ) -> Result<f64, KnnError> {
        let model = self.model()?;
        if table.field_count() != model.table.field_count() {
            return Err(KnnError::FieldCountMismatch {
                expected: model.table.field_count(),
                found: table.field_count(),
            });
        }
        if table.is_empty() {
            return Err(KnnError::EmptyTestSet);
        }
        let class_index = class_column.into().resolve(table.field_count())?;

        let mut correct = 0usize;
        for row in table.rows() {
            let prediction = self.classify(row)?;
            if prediction == row.text(class_index)? {
                correct += 1;
            }
        }
        let accuracy = correct as f64 / table.len() as f64;
        debug!(correct, total = table.len(), accuracy, "tested k-NN model");
        Ok(accuracy)
    }

    /// Trains on `training` and scores `testing`, each with its own class
    /// column.
    pub fn train_then_test(
        &mut self,
        training: &Table<T>,
        testing: &Table<T>,
        training_class: impl Into<ClassColumn>,
        testing_class: impl Into<ClassColumn>,
    ) -> Result<f64, KnnError> {
        if training.field_count() != testing.field_count() {
            return Err(KnnError::FieldCountMismatch {
                expected: training.field_count(),
                found: testing.field_count(),
            });
        }
        self.train(training, training_class)?;
        self.test(testing, testing_class)
    }

    /// Randomly splits `table` (see [`split`]), trains on one part and
    /// returns the accuracy on the other.
    ///
    /// # Errors
    ///
    /// Returns `KnnError::TooFewFields` for tables with fewer than three
    /// columns, `KnnError::InvalidFraction` for a fraction outside `[0, 1]`
    /// and `KnnError::EmptyTestSet` if the fraction selects no rows.
    pub fn train_and_test(
        &mut self,
        table: &Table<T>,
        class_column: impl Into<ClassColumn>,
        test_fraction: f64,
        seed: u64,
    ) -> Result<f64, KnnError> {
        if table.field_count() < 3 {
            return Err(KnnError::TooFewFields {
                required: 3,
                found: table.field_count(),
            });
        }
        let class_index = class_column.into().resolve(table.field_count())?;
        let parts = split(table, test_fraction, seed)?;
        self.train(&parts.train, class_index)?;
        self.test(&parts.test, class_index)
    }

    /// Predicts the class label of `row`.
    ///
    /// A row as wide as the training table has its class column ignored;
    /// any other row is taken to be the features alone. Training rows are
    /// ranked by distance with ties kept in training order, and the `k`
    /// nearest vote. Equal vote counts go to the label seen first in that
    /// ranking.
    ///
    /// # Errors
    ///
    /// Returns `KnnError::NotTrained` before training,
    /// `KnnError::EmptyTrainingSet` if the training table has no rows, and a
    /// `DataError` if a feature is not numeric or the widths disagree.
    pub fn classify(&self, row: &Row<T>) -> Result<String, KnnError> {
        let model = self.model()?;
        if model.table.is_empty() {
            return Err(KnnError::EmptyTrainingSet);
        }
        let field_count = model.table.field_count();
        let class_index = model.class_index;

        let query = if row.len() == field_count {
            row.without_index(class_index)?
        } else {
            row.clone()
        };
        let query = query.to_array()?;

        // 1. Distance from the query to every training row, paired with its label.
        let mut distances: Vec<(f64, String)> = Vec::with_capacity(model.table.len());
        for training_row in model.table.rows() {
            let features = training_row.without_index(class_index)?.to_array()?;
            let distance = self
                .config
                .metric
                .distance(features.view(), query.view())?;
            if distance.is_nan() {
                return Err(KnnError::InvalidDistance);
            }
            distances.push((distance, training_row.text(class_index)?.into_owned()));
        }

        // 2. Stable sort, so equally distant rows keep their training order.
        distances.sort_by(|a, b| a.0.total_cmp(&b.0));

        // 3. Majority vote among the `k` nearest.
        let neighbors = distances
            .iter()
            .take(self.config.k)
            .map(|(_, label)| label.as_str());
        let label = vote::majority(neighbors).ok_or(KnnError::EmptyTrainingSet)?;
        trace!(label, nearest = distances[0].0, "classified row");
        Ok(label.to_owned())
    }

    /// Predicts the class label of a query given as plain feature values.
    pub fn classify_features(&self, features: &[T]) -> Result<String, KnnError> {
        self.classify(&Row::from_numbers(features))
    }
}
