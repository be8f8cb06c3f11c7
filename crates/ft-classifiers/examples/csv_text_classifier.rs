use std::path::PathBuf;

use anyhow::{Context, Result};

use ft_classifiers::config::TrainOptions;
use ft_classifiers::io::read_labeled_csv;
use ft_classifiers::models::{Classifier, FtClassifier, NaiveBayesTrainer};

/// Usage: csv_text_classifier <data.csv|data.tsv> <label_column> [text_column]
///
/// Trains on the file and prints predictions and class probabilities for
/// every row. Without `text_column` the first text column is used.
fn main() -> Result<()> {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let path: PathBuf = args
        .next()
        .context("missing path to a .csv or .tsv file")?
        .into();
    let label_column = args.next().context("missing label column name")?;
    let text_column = args.next();

    let data = read_labeled_csv(&path, &label_column)?;
    println!("Loaded {} rows from {}", data.y.len(), path.display());

    let options = TrainOptions::new().with("wordNgrams", 2);
    let mut clf = match text_column {
        Some(name) => FtClassifier::col_lbl_based(NaiveBayesTrainer::new(), name, options),
        None => FtClassifier::first_obj(NaiveBayesTrainer::new(), options),
    };
    println!("Config: {}", serde_json::to_string(clf.config())?);

    clf.fit(&data.x, &data.y)?;
    let classes = clf.classes().unwrap_or_default().to_vec();
    let preds = clf.predict(&data.x)?;
    let probas = clf.predict_proba(&data.x)?;

    println!("classes: {:?}", classes);
    let mut correct = 0;
    for (row, (pred, proba)) in preds.iter().zip(&probas).enumerate() {
        if *pred == data.y[row] {
            correct += 1;
        }
        println!("row {:>4}: true={} pred={} proba={:?}", row, data.y[row], pred, proba);
    }
    println!(
        "Training accuracy: {:.3}",
        correct as f64 / preds.len().max(1) as f64
    );

    Ok(())
}
