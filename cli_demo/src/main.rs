extern crate dollar_one;
extern crate serde_derive;

mod error;
mod storage;

use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Instant;

use clap::{Parser, Subcommand};
use dollar_one::{EngineConfig, GestureEngine, DEFAULT_REFERENCE_SQUARE_LENGTH, DEFAULT_RESOLUTION};
use tracing::warn;
use tracing_subscriber::EnvFilter;

use crate::error::Result;

#[derive(Debug, Parser)]
#[command(name = "cli_demo", about = "Train and evaluate $1 gesture templates")]
struct Cli {
    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Points per normalized gesture
    #[arg(long, global = true, default_value_t = DEFAULT_RESOLUTION)]
    resolution: usize,

    /// Side of the reference square
    #[arg(long, global = true, default_value_t = DEFAULT_REFERENCE_SQUARE_LENGTH)]
    square: f64,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Normalize every sample and save it as a .gst template
    Train {
        #[arg(long)]
        templates: PathBuf,
        #[arg(long)]
        inputs: PathBuf,
    },
    /// Recognize every sample against stored templates and time it
    Eval {
        #[arg(long, conflicts_with = "bundle", required_unless_present = "bundle")]
        templates: Option<PathBuf>,
        #[arg(long)]
        bundle: Option<PathBuf>,
        #[arg(long)]
        inputs: PathBuf,
        #[arg(long, default_value_t = 1)]
        iters: usize,
        #[arg(long, default_value_t = 3)]
        top: usize,
    },
    /// Pack a template folder into one binary bundle
    Bundle {
        #[arg(long)]
        templates: PathBuf,
        #[arg(long)]
        out: PathBuf,
    },
}

fn train(engine: &GestureEngine, templates: PathBuf, inputs: PathBuf) -> Result<()> {
    let samples = storage::read_samples(&inputs)?;
    let mut saved = 0;
    for sample in &samples {
        match engine.train(&sample.stroke(), sample.label()) {
            Ok(gesture) => {
                storage::save_template(&templates, &gesture)?;
                saved += 1;
            }
            Err(err) => warn!(name = sample.label(), %err, "sample not trained"),
        }
    }
    println!("Saved {} of {} samples to {}.", saved, samples.len(), templates.display());
    Ok(())
}

fn eval(engine: &GestureEngine, templates: Option<PathBuf>, bundle: Option<PathBuf>, inputs: PathBuf, iters: usize, top: usize) -> Result<()> {
    println!("Loading templates.");
    let loaded = match (templates, bundle) {
        (_, Some(bundle)) => storage::read_bundle(engine, &bundle)?,
        (Some(dir), None) => storage::load_templates(engine, &dir)?,
        (None, None) => 0,
    };
    let samples = storage::read_samples(&inputs)?;
    let mut candidates = Vec::with_capacity(samples.len());
    for sample in &samples {
        match engine.normalize(&sample.stroke()) {
            Ok(candidate) => candidates.push((sample.label(), candidate)),
            Err(err) => warn!(name = sample.label(), %err, "sample skipped"),
        }
    }
    println!("Loaded {} templates and {} inputs; starting {} cycles of evaluation.", loaded, candidates.len(), iters);

    let start = Instant::now();
    let mut guessed = 0;
    for _ in 0..iters {
        for (label, candidate) in &candidates {
            let res = engine.recognize(candidate)?;
            if res.best_guess() == *label {
                guessed += 1;
            }
        }
    }
    let duration = start.elapsed();
    println!("Finished in {:?}. Correct guesses: {} of {}.", duration, guessed, iters * candidates.len());

    for (label, candidate) in &candidates {
        let res = engine.recognize_top(candidate, top)?;
        println!("{} (inferred angle {:.1} deg)", label, res.inferred_angle().to_degrees());
        print!("{}", res);
    }
    Ok(())
}

fn bundle(templates: PathBuf, out: PathBuf) -> Result<()> {
    let count = storage::write_bundle(&templates, &out)?;
    let check = storage::bundle_len(&out)?;
    println!("Bundled {} templates into {} ({} readable).", count, out.display(), check);
    Ok(())
}

fn run(cli: Cli) -> Result<()> {
    let engine = GestureEngine::new(EngineConfig {
        resolution: cli.resolution,
        reference_square_length: cli.square,
    })?;
    match cli.command {
        Command::Train { templates, inputs } => train(&engine, templates, inputs),
        Command::Eval {
            templates,
            bundle,
            inputs,
            iters,
            top,
        } => eval(&engine, templates, bundle, inputs, iters, top),
        Command::Bundle { templates, out } => bundle(templates, out),
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {}", err);
            ExitCode::FAILURE
        }
    }
}
