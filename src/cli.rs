//! Minimal CLI: pick a bundled model → fake JSON
use std::path::PathBuf;

use anyhow::{anyhow, Context as _, Result};
use clap::{Args, Parser, Subcommand};
use colored::Colorize;
use rayon::prelude::*;

use json_mimic::models::{self, Model};
use json_mimic::{Bounds, GenerateOptions, Node};

// ————————————————————————————————————————————————————————————————————————————
// TYPES
// ————————————————————————————————————————————————————————————————————————————

/// generate structurally valid fake JSON by driving a type's own deserializer
#[derive(Parser, Debug)]
#[command(name = "json-mimic", version)]
pub struct CommandLineInterface {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// list the bundled models
    Models,
    /// generate fake JSON for a bundled model
    Generate(GenerateOut),
}

#[derive(Args, Debug, Clone)]
struct OptionSettings {
    /// JSON file with generation options; the flags below override it
    #[arg(long)]
    config: Option<PathBuf>,

    /// element count of every variable-length array and map
    #[arg(long)]
    sequence_length: Option<usize>,

    /// string length bound, e.g. `5..200` (inclusive) or `8`
    #[arg(long)]
    string_length: Option<Bounds<usize>>,

    /// numeric bound shared by integers and floats, e.g. `-10..10`
    #[arg(long, allow_hyphen_values = true)]
    numeric_range: Option<Bounds<i64>>,

    /// strftime pattern for date fields (e.g. `%Y-%m-%d`)
    #[arg(long)]
    temporal_format: Option<String>,

    /// leave every optional field out
    #[arg(long, default_value_t = false)]
    no_optionals: bool,

    /// seed for reproducible output
    #[arg(long)]
    seed: Option<u64>,
}

#[derive(clap::Parser, Debug)]
struct GenerateOut {
    /// bundled model name (see `json-mimic models`)
    #[arg(long, short)]
    model: String,

    #[command(flatten)]
    option_settings: OptionSettings,

    /// number of documents; more than one are emitted as a JSON array
    #[arg(long, default_value_t = 1)]
    count: usize,

    /// decode every generated document back into the model before emitting
    #[arg(long, default_value_t = false)]
    verify: bool,

    /// output .json file (stdout if omitted)
    #[arg(short, long)]
    out: Option<PathBuf>,
}

// ————————————————————————————————————————————————————————————————————————————
// IMPLEMENTATION
// ————————————————————————————————————————————————————————————————————————————

impl OptionSettings {
    fn resolve(&self) -> Result<GenerateOptions> {
        let mut options = match self.config.as_ref() {
            Some(path) => GenerateOptions::load(path)
                .with_context(|| format!("failed to load options from {}", path.display()))?,
            None => GenerateOptions::default(),
        };
        if let Some(n) = self.sequence_length {
            options.sequence_length = n;
        }
        if let Some(bounds) = self.string_length {
            options.string_length = bounds;
        }
        if let Some(bounds) = self.numeric_range {
            options.numeric_range = bounds;
        }
        if let Some(format) = self.temporal_format.as_ref() {
            options.temporal_format = Some(format.clone());
        }
        if self.no_optionals {
            options.generate_optionals = false;
        }
        if let Some(seed) = self.seed {
            options.seed = Some(seed);
        }
        options.validate()?;
        Ok(options)
    }
}

impl GenerateOut {
    /// Document `index` of a run; seeded runs offset the seed per document.
    fn generate_one(&self, model: &Model, options: &GenerateOptions, index: usize) -> Result<Node> {
        let mut options = options.clone();
        options.seed = options.seed.map(|seed| seed.wrapping_add(index as u64));
        let node = model.generate(&options)?;
        if self.verify {
            let json = encode_text(&node)?;
            model
                .verify(&json)
                .with_context(|| format!("document {index} does not decode as `{}`", model.name))?;
        }
        Ok(node)
    }

    fn run(&self) -> Result<()> {
        let model = models::find(&self.model).ok_or_else(|| {
            let names = models::all().iter().map(|m| m.name).collect::<Vec<_>>().join(", ");
            anyhow!("unknown model `{}` (available: {names})", self.model)
        })?;
        let options = self.option_settings.resolve()?;
        log::debug!("options: {options:?}");

        let node = if self.count == 1 {
            self.generate_one(&model, &options, 0)?
        } else {
            let docs = (0..self.count)
                .into_par_iter()
                .map(|index| self.generate_one(&model, &options, index))
                .collect::<Result<Vec<_>>>()?;
            Node::Array(docs)
        };

        let json_src = encode_text(&node)?;
        if let Some(out) = self.out.as_ref() {
            if let Some(parent) = out.parent() {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::write(out, &json_src)
                .with_context(|| format!("failed to write {}", out.display()))?;
        } else {
            println!("{json_src}");
        }
        if self.verify {
            eprintln!("{} {} document(s) decode as `{}`", "✓".green(), self.count, model.name);
        }
        Ok(())
    }
}

impl CommandLineInterface {
    pub fn load() -> Self {
        Self::parse()
    }
    pub fn run(&self) -> Result<()> {
        match &self.cmd {
            Command::Models => {
                for model in models::all() {
                    println!("{:<12} {}", model.name.bold(), model.about);
                }
                Ok(())
            }
            Command::Generate(target) => target.run(),
        }
    }
}

// ————————————————————————————————————————————————————————————————————————————
// INTERNAL HELPERS
// ————————————————————————————————————————————————————————————————————————————

fn encode_text(node: &Node) -> Result<String> {
    let bytes = json_mimic::encode(node)?;
    Ok(String::from_utf8(bytes)?)
}
