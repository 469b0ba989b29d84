//! Trains a network on a synthetic pattern dataset and reports test accuracy.
//!
//! Usage:
//!   cargo run -- --spec model.json
//!   cargo run -- --layers 32,10 --epochs 5 --learning-rate 0.01

use anyhow::{Context, Result};
use clap::Parser;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::info;

use digit_mlp::logging::init_logging;
use digit_mlp::{test_pass, Dataset, Network, NetworkSpec, Sample, StepOutcome, TrainingDriver};

#[derive(Parser, Debug)]
#[command(name = "digit-mlp")]
#[command(about = "Train a multilayer perceptron one sample at a time")]
struct Args {
    /// JSON network spec; overrides the layer/hyperparameter flags
    #[arg(long)]
    spec: Option<String>,

    /// Neuron count per layer, comma separated
    #[arg(long, value_delimiter = ',', default_value = "32,10")]
    layers: Vec<usize>,

    #[arg(long, default_value = "0.01")]
    learning_rate: f64,

    #[arg(long, default_value = "5")]
    epochs: usize,

    /// Training samples generated per class
    #[arg(long, default_value = "40")]
    samples_per_class: usize,

    /// Write the effective spec to this path before training
    #[arg(long)]
    save_spec: Option<String>,

    #[arg(long, default_value = "info")]
    log_level: String,
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(&args.log_level);

    let spec = match &args.spec {
        Some(path) => NetworkSpec::load_json(path).with_context(|| format!("loading spec {path}"))?,
        None => {
            let mut spec = NetworkSpec::new("synthetic", args.layers.clone());
            spec.learning_rate = args.learning_rate;
            spec.epochs = args.epochs;
            spec
        }
    };
    if let Some(path) = &args.save_spec {
        spec.save_json(path).with_context(|| format!("saving spec {path}"))?;
    }

    let mut network = spec.build().context("building network")?;
    let classes = network.output_size();
    let mut rng = StdRng::seed_from_u64(spec.seed);
    let prototypes: Vec<Vec<f64>> = (0..classes)
        .map(|_| (0..network.input_size()).map(|_| if rng.gen_bool(0.2) { 1.0 } else { 0.0 }).collect())
        .collect();

    let train_set = noisy_copies(&prototypes, args.samples_per_class, &mut rng);
    let test_set = noisy_copies(&prototypes, 10, &mut rng);
    info!(train = train_set.len(), test = test_set.len(), classes, "synthetic dataset ready");

    let mut driver = TrainingDriver::with_seed(train_set, spec.seed);
    loop {
        match driver.train_step(&mut network)? {
            StepOutcome::Continue => {}
            StepOutcome::EpochDone(stats) => {
                info!(epoch = stats.epoch, loss = stats.mean_loss, "epoch done");
            }
            StepOutcome::Finished => break,
        }
    }
    if let Some(last) = driver.last_epoch() {
        info!(epochs = last.epoch, loss = last.mean_loss, "training finished");
    }

    let accuracy = test_pass(&mut network, &test_set)?;
    println!("Test accuracy: {accuracy:.2}%");

    let probe = Sample::unlabeled(prototypes[0].clone());
    let probabilities = network.forward_pass(&probe)?;
    println!("Predicted class: {}", Network::predict(&probabilities)?);
    for (class, p) in probabilities.iter().enumerate() {
        println!("  {class}: {:.2}%", p * 100.0);
    }
    Ok(())
}

/// `count` samples per class: each prototype with ~5% of its pixels flipped.
fn noisy_copies<R: Rng>(prototypes: &[Vec<f64>], count: usize, rng: &mut R) -> Dataset {
    let mut dataset = Dataset::with_capacity(prototypes.len() * count);
    for (label, prototype) in prototypes.iter().enumerate() {
        for _ in 0..count {
            let features = prototype
                .iter()
                .map(|&p| if rng.gen_bool(0.05) { 1.0 - p } else { p })
                .collect();
            dataset.push(Sample::new(label, features));
        }
    }
    dataset
}
