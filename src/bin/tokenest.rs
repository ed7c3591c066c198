//! Tokenest CLI binary.
//!
//! Token estimation for LLM API payloads.
//!
//! # Commands
//!
//! - `estimate` - Estimate tokens for text or a raw payload
//! - `input` - Estimate request input including images and message overhead
//! - `compare` - Compare every strategy against a reference tokenizer
//! - `profiles` - Print the weight tables
//! - `zr-config` - Export or validate a ZR configuration document

use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::str::FromStr;

use clap::{Args, Parser, Subcommand};
use tokenest::{
    config::Config,
    profile::{Category, Profile, ZrConfigDocument, ZR_CONFIG},
    reference::compare,
    DefaultEstimator, Estimate, Estimator, ImageCounts, Options, Strategy, VERSION,
};

#[derive(Parser)]
#[command(name = "tokenest")]
#[command(version = VERSION)]
#[command(about = "Tokenest - fast token estimation for LLM API payloads", long_about = None)]
struct Cli {
    /// Config file (default: <config dir>/tokenest/config.toml if present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Estimate tokens for text or a raw payload
    Estimate {
        #[command(flatten)]
        args: EstimateArgs,

        /// Treat input as a raw payload (Auto runs UltraFast)
        #[arg(long)]
        bytes: bool,
    },

    /// Estimate request input tokens including images and message overhead
    Input {
        #[command(flatten)]
        args: EstimateArgs,

        /// Low-detail images
        #[arg(long, default_value = "0")]
        low_images: usize,

        /// High-detail images
        #[arg(long, default_value = "0")]
        high_images: usize,

        /// Images with unknown detail
        #[arg(long, default_value = "0")]
        unknown_images: usize,

        /// Number of messages in the request
        #[arg(long, default_value = "1")]
        messages: usize,
    },

    /// Compare every strategy against a reference tokenizer
    Compare {
        /// Text (or - for stdin)
        input: Option<String>,

        /// Input file path
        #[arg(short, long)]
        file: Option<PathBuf>,

        /// Model name (selects cl100k or o200k)
        #[arg(short, long)]
        model: Option<String>,

        /// Weight profile for the weighted strategy
        #[arg(short, long)]
        profile: Option<String>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print the weight tables
    Profiles {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Export the baked ZR configuration, or validate a document
    ZrConfig {
        /// Validate this document instead of exporting
        #[arg(long)]
        check: Option<PathBuf>,
    },
}

#[derive(Args)]
struct EstimateArgs {
    /// Text (or - for stdin)
    input: Option<String>,

    /// Input file path
    #[arg(short, long)]
    file: Option<PathBuf>,

    /// Strategy (auto, ultrafast, fast, weighted, zr)
    #[arg(short, long)]
    strategy: Option<String>,

    /// Profile (auto, openai, claude, gemini)
    #[arg(short, long)]
    profile: Option<String>,

    /// Model hint for profile resolution
    #[arg(short, long)]
    model: Option<String>,

    /// Provider hint for profile resolution
    #[arg(long)]
    provider: Option<String>,

    /// Global multiplier
    #[arg(long)]
    multiplier: Option<f64>,

    /// Show per-category breakdown (weighted, zr)
    #[arg(short, long)]
    explain: bool,

    /// Output as JSON
    #[arg(long)]
    json: bool,
}

impl EstimateArgs {
    /// Config defaults overridden by flags
    fn options(&self, config: &Config) -> anyhow::Result<Options> {
        let mut opts = config.estimator.options().with_explain(self.explain);
        if let Some(strategy) = &self.strategy {
            opts = opts.with_strategy(Strategy::from_str(strategy)?);
        }
        if let Some(profile) = &self.profile {
            opts = opts.with_profile(Profile::from_str(profile)?);
        }
        if let Some(model) = &self.model {
            opts = opts.with_model(model.clone());
        }
        if let Some(provider) = &self.provider {
            opts = opts.with_provider_type(provider.clone());
        }
        if let Some(multiplier) = self.multiplier {
            opts = opts.with_multiplier(multiplier);
        }
        Ok(opts)
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level)),
        )
        .init();

    let config = Config::load(cli.config.as_deref())?;

    match cli.command {
        Commands::Estimate { args, bytes } => cmd_estimate(&config, &args, bytes),

        Commands::Input {
            args,
            low_images,
            high_images,
            unknown_images,
            messages,
        } => {
            let images = ImageCounts {
                low_detail: low_images,
                high_detail: high_images,
                unknown: unknown_images,
            };
            cmd_input(&config, &args, images, messages)
        },

        Commands::Compare {
            input,
            file,
            model,
            profile,
            json,
        } => cmd_compare(&config, input, file, model, profile, json),

        Commands::Profiles { json } => cmd_profiles(json),

        Commands::ZrConfig { check } => cmd_zr_config(check.as_deref()),
    }
}

fn cmd_estimate(config: &Config, args: &EstimateArgs, bytes: bool) -> anyhow::Result<()> {
    let opts = args.options(config)?;
    let payload = read_input(args.input.clone(), args.file.clone())?;
    let estimator = config.cache.build(DefaultEstimator::new());

    let estimate = if bytes {
        estimator.estimate_bytes(&payload, &opts)
    } else {
        estimator.estimate_text(&String::from_utf8_lossy(&payload), &opts)
    };

    print_estimate(&estimate, args.json)
}

fn cmd_input(
    config: &Config,
    args: &EstimateArgs,
    images: ImageCounts,
    messages: usize,
) -> anyhow::Result<()> {
    let opts = args.options(config)?;
    let payload = read_input(args.input.clone(), args.file.clone())?;
    let estimator = config.cache.build(DefaultEstimator::new());

    let text = String::from_utf8_lossy(&payload);
    let estimate = estimator.estimate_input(&text, images, messages, &opts);

    print_estimate(&estimate, args.json)
}

fn cmd_compare(
    config: &Config,
    input: Option<String>,
    file: Option<PathBuf>,
    model: Option<String>,
    profile: Option<String>,
    json: bool,
) -> anyhow::Result<()> {
    let mut opts = config.estimator.options();
    if let Some(model) = model {
        opts = opts.with_model(model);
    }
    if let Some(profile) = profile {
        opts = opts.with_profile(Profile::from_str(&profile)?);
    }

    let payload = read_input(input, file)?;
    let report = compare(&String::from_utf8_lossy(&payload), &opts)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!("Reference ({}): {} tokens", report.encoding, report.reference);
    println!();
    println!("  {:<10} {:>10} {:>10}", "strategy", "estimate", "deviation");
    for row in &report.rows {
        println!(
            "  {:<10} {:>10} {:>9.1}%",
            row.strategy.name(),
            row.estimated,
            row.deviation_pct
        );
    }
    if let Some(best) = report.best() {
        println!();
        println!("Closest: {}", best.strategy);
    }

    Ok(())
}

fn cmd_profiles(json: bool) -> anyhow::Result<()> {
    if json {
        let mut tables = serde_json::Map::new();
        for profile in Profile::all() {
            tables.insert(
                profile.name().to_string(),
                serde_json::to_value(profile.weights())?,
            );
        }
        println!("{}", serde_json::to_string_pretty(&tables)?);
        return Ok(());
    }

    print!("  {:<12}", "category");
    for profile in Profile::all() {
        print!(" {:>8}", profile.name());
    }
    println!();
    for category in Category::ALL {
        print!("  {:<12}", category.name());
        for profile in Profile::all() {
            print!(" {:>8.2}", profile.weights().weight(category));
        }
        println!();
    }

    Ok(())
}

fn cmd_zr_config(check: Option<&Path>) -> anyhow::Result<()> {
    let Some(path) = check else {
        let doc = ZrConfigDocument::from_config(&ZR_CONFIG);
        println!("{}", doc.to_json_pretty()?);
        return Ok(());
    };

    let content = std::fs::read_to_string(path)?;
    let doc = ZrConfigDocument::from_json(&content)?;
    println!("VALID: {}", path.display());
    if doc.matches(&ZR_CONFIG) {
        println!("Matches the built-in table");
    } else {
        println!("Differs from the built-in table");
    }

    Ok(())
}

fn print_estimate(estimate: &Estimate, json: bool) -> anyhow::Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(estimate)?);
        return Ok(());
    }

    println!("{}", estimate.tokens);
    eprintln!("  Strategy: {}", estimate.strategy);
    eprintln!("  Profile:  {}", estimate.profile);

    if !estimate.breakdown.is_empty() {
        eprintln!();
        eprintln!(
            "  {:<14} {:>10} {:>8} {:>10}",
            "category", "units", "weight", "tokens"
        );
        for entry in &estimate.breakdown {
            eprintln!(
                "  {:<14} {:>10.2} {:>8.4} {:>10.2}",
                entry.category, entry.base_units, entry.weight, entry.tokens
            );
        }
    }

    Ok(())
}

fn read_input(input: Option<String>, file: Option<PathBuf>) -> anyhow::Result<Vec<u8>> {
    if let Some(path) = file {
        Ok(std::fs::read(path)?)
    } else if let Some(s) = input {
        if s == "-" {
            read_stdin()
        } else {
            Ok(s.into_bytes())
        }
    } else {
        read_stdin()
    }
}

fn read_stdin() -> anyhow::Result<Vec<u8>> {
    let mut buffer = Vec::new();
    io::stdin().read_to_end(&mut buffer)?;
    Ok(buffer)
}
