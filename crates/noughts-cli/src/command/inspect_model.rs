use std::{io, path::Path};

use anyhow::Context as _;
use noughts_evaluator::feature::FeatureVector;
use noughts_training::model_store::ModelStore;

#[derive(Default, Debug, Clone, clap::Args)]
pub(crate) struct InspectModelArg {
    /// Print the whole model file as JSON instead of a summary
    #[arg(long)]
    json: bool,
}

pub(crate) fn run(path: &Path, arg: &InspectModelArg) -> anyhow::Result<()> {
    let model = ModelStore::new(path)
        .load()
        .with_context(|| format!("Failed to load model: {}", path.display()))?
        .with_context(|| format!("No model file at {}", path.display()))?;

    if arg.json {
        serde_json::to_writer_pretty(io::stdout().lock(), &model)
            .context("Failed to write model JSON")?;
        println!();
        return Ok(());
    }

    println!("Model:        {}", model.name);
    println!("Trained at:   {}", model.trained_at);
    println!("Examples:     {}", model.example_count);
    println!("Bias:         {:+.4}", model.classifier.bias());
    println!("Cell weights (X = +1, O = -1):");
    for row in model.classifier.weights().chunks(3) {
        let cells = row
            .iter()
            .map(|w| format!("{w:+8.4}"))
            .collect::<Vec<_>>()
            .join(" ");
        println!("  {cells}");
    }
    let empty = FeatureVector::from_values([0.0; FeatureVector::LEN]);
    println!(
        "P(O wins | empty board): {:.3}",
        model.classifier.predict_proba(&empty)
    );
    Ok(())
}
