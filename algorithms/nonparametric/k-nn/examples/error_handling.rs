//! Example demonstrating error handling with the k-NN classifier.
//!
//! Every failure mode of the classifier is reported through `KnnError`,
//! so callers can match on it instead of guarding against panics.

use k_nn::{ClassColumn, KnnClassifier, KnnConfig, KnnError};
use tabknn_helpers::{NumberFormat, Table};

const TRAINING: &str = "\
1.0,1.0,Class A
2.0,2.0,Class A
1.0,2.0,Class A
8.0,8.0,Class B
9.0,8.0,Class B
8.0,9.0,Class B
";

fn main() {
    println!("k-NN Classifier Error Handling Examples");
    println!("=======================================");

    let table: Table<f64> = match Table::from_csv_str(TRAINING, &NumberFormat::default()) {
        Ok(table) => table,
        Err(e) => {
            println!("Failed to parse training data: {}", e);
            return;
        }
    };

    // Example 1: Handle invalid k value
    println!("\n1. Handling invalid k value (k=0):");
    match KnnClassifier::<f64>::new(KnnConfig::default().with_k(0)) {
        Ok(_) => println!("   Classifier created successfully"),
        Err(KnnError::InvalidK) => println!("   ✓ Caught expected error: {}", KnnError::InvalidK),
        Err(e) => println!("   ✗ Unexpected error: {}", e),
    }

    // Example 2: Classify before training
    println!("\n2. Classifying before training:");
    let untrained = KnnClassifier::<f64>::default();
    match untrained.classify_features(&[1.0, 1.0]) {
        Ok(label) => println!("   Predicted label: {}", label),
        Err(e @ KnnError::NotTrained) => println!("   ✓ Caught expected error: {}", e),
        Err(e) => println!("   ✗ Unexpected error: {}", e),
    }

    // Example 3: Successful prediction with proper error handling
    println!("\n3. Successful prediction with error handling:");
    let mut classifier = KnnClassifier::default();
    match classifier.train(&table, ClassColumn::Last) {
        Ok(()) => {
            println!("   ✓ Classifier trained on {} rows", table.len());

            let test_points = vec![
                ([2.5, 2.5], "should be Class A"),
                ([7.5, 8.5], "should be Class B"),
            ];

            for (point, expected) in test_points {
                match classifier.classify_features(&point) {
                    Ok(predicted_label) => {
                        println!(
                            "   ✓ Prediction successful: {} ({})",
                            predicted_label, expected
                        );
                    }
                    Err(e) => {
                        println!("   ✗ Prediction failed: {}", e);
                    }
                }
            }
        }
        Err(e) => println!("   ✗ Failed to train classifier: {}", e),
    }

    // Example 4: Demonstrate error propagation in a function
    println!("\n4. Error propagation in functions:");

    fn score_split(table: &Table<f64>) -> Result<f64, KnnError> {
        let mut classifier = KnnClassifier::new(KnnConfig::default().with_k(1))?;
        classifier.train_and_test(table, ClassColumn::Last, 0.5, 7)
    }

    match score_split(&table) {
        Ok(accuracy) => println!("   ✓ Accuracy on held-out rows: {:.2}", accuracy),
        Err(e) => println!("   ✗ Evaluation failed: {}", e),
    }

    println!("\n5. Error types and their meanings:");
    println!("   - InvalidK: k cannot be zero for a k-NN classifier");
    println!("   - NotTrained: classification was attempted before training");
    println!("   - EmptyTrainingSet: Cannot predict with an empty training set");
    println!("   - EmptyTestSet: accuracy is undefined without test rows");
    println!("   - TooFewFields / FieldCountMismatch: the table has the wrong shape");
    println!("   - Data: a bad index or a non-numeric feature in the table");

    println!("\nAll examples completed successfully!");
}
