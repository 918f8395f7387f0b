use std::path::PathBuf;

use clap::{Parser, Subcommand};
use noughts_evaluator::move_selector::SelectorConfig;
use noughts_training::{
    model_store::{DEFAULT_MODEL_FILE, ModelStore},
    opponent::{LearningOpponent, OpponentConfig},
    trainer::TrainerConfig,
};

use self::{
    inspect_model::InspectModelArg, play::PlayArg, respond::RespondArg, self_play::SelfPlayArg,
};

mod inspect_model;
mod play;
mod respond;
mod self_play;

#[derive(Debug, Clone, Parser)]
#[command(author, version, about, long_about = None)]
pub struct CommandArgs {
    #[command(flatten)]
    engine: EngineArg,
    /// What mode to run the program in
    #[command(subcommand)]
    mode: Option<Mode>,
}

#[derive(Debug, Clone, Subcommand)]
enum Mode {
    /// Answer move requests, one JSON board per line on stdin
    Respond(#[clap(flatten)] RespondArg),
    /// Play against the engine in the terminal
    Play(#[clap(flatten)] PlayArg),
    /// Train the engine against a scripted player
    SelfPlay(#[clap(flatten)] SelfPlayArg),
    /// Show the stored model
    InspectModel(#[clap(flatten)] InspectModelArg),
}

/// Options shared by every mode that runs the engine.
#[derive(Debug, Clone, clap::Args)]
struct EngineArg {
    /// Model file to load at startup and overwrite after each retrain
    #[arg(long, global = true, default_value = DEFAULT_MODEL_FILE)]
    model: PathBuf,
    /// Seed for the engine's random tie-breaks
    #[arg(long, global = true)]
    seed: Option<u64>,
    /// Load the model file but never write it
    #[arg(long, global = true)]
    no_save: bool,
    /// Games needed before the learned scorer is consulted (exclusive)
    #[arg(long, global = true, default_value_t = SelectorConfig::default().min_examples_for_inference)]
    min_inference_examples: usize,
    /// Games needed before the classifier is refitted (exclusive)
    #[arg(long, global = true, default_value_t = TrainerConfig::default().min_examples_for_retrain)]
    min_retrain_examples: usize,
}

impl EngineArg {
    fn config(&self) -> OpponentConfig {
        OpponentConfig {
            selector: SelectorConfig {
                min_examples_for_inference: self.min_inference_examples,
            },
            trainer: TrainerConfig {
                min_examples_for_retrain: self.min_retrain_examples,
                ..TrainerConfig::default()
            },
        }
    }

    fn build(&self) -> LearningOpponent {
        let store = Some(ModelStore::new(&self.model));
        let engine = match self.seed {
            Some(seed) => LearningOpponent::with_seed(self.config(), store, seed),
            None => LearningOpponent::new(self.config(), store),
        };
        if self.no_save {
            engine.read_only()
        } else {
            engine
        }
    }
}

pub fn run() -> anyhow::Result<()> {
    let args = CommandArgs::parse();
    match args
        .mode
        .unwrap_or(Mode::Respond(RespondArg::default()))
    {
        Mode::Respond(arg) => respond::run(&mut args.engine.build(), &arg)?,
        Mode::Play(arg) => play::run(&mut args.engine.build(), &arg)?,
        Mode::SelfPlay(arg) => self_play::run(&mut args.engine.build(), &arg, args.engine.seed)?,
        Mode::InspectModel(arg) => inspect_model::run(&args.engine.model, &arg)?,
    }
    Ok(())
}
