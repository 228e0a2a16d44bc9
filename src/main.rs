// This is a simple example showing how to use the tabknn library
use ndarray::array;
use tabknn::{ClassColumn, KnnClassifier, KnnConfig, Metric, NumberFormat, Row, Table};

fn main() {
    println!("tabknn library example");

    // Build a small table from CSV text
    let table: Table<f64> = match Table::from_csv_str("1,2,cat\n3,4,dog\n", &NumberFormat::default()) {
        Ok(table) => table,
        Err(e) => {
            println!("Failed to parse csv: {}", e);
            return;
        }
    };
    println!("Loaded {} rows with {} fields", table.len(), table.field_count());

    // Example of distance calculation
    let a = array![0.0, 0.0];
    let b = array![3.0, 4.0];
    match Metric::Euclidean.distance(a.view(), b.view()) {
        Ok(distance) => println!("Squared distance between {:?} and {:?}: {}", a, b, distance),
        Err(e) => println!("Distance failed: {}", e),
    }

    // Train and classify
    let mut classifier = match KnnClassifier::new(KnnConfig::default().with_k(1)) {
        Ok(classifier) => classifier,
        Err(e) => {
            println!("Invalid configuration: {}", e);
            return;
        }
    };
    let query = Row::from_numbers(&[1.0, 2.0]);
    let label = classifier
        .train(&table, ClassColumn::Last)
        .and_then(|()| classifier.classify(&query));
    match label {
        Ok(label) => println!("Query {:?} classified as {}", query.to_numbers(), label),
        Err(e) => println!("Classification failed: {}", e),
    }
}
