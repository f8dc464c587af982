use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use log::{error, info, warn};

use jp_token_analyzer::bias::{load_bias_ids, resolve_ids_file};
use jp_token_analyzer::core::config::DEFAULT_BIAS_LIMIT;
use jp_token_analyzer::{Category, LogitBias};

/// Turn a saved token id list into a logit bias map for generation APIs
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Token list (.txt) or analysis report (.json)
    #[arg(long)]
    ids_file: PathBuf,

    /// Category to read from a JSON report, and to look for when falling back
    #[arg(long, default_value = "contains_japanese")]
    category: Category,

    /// Model name used to find default files when --ids-file does not exist
    #[arg(long)]
    model: Option<String>,

    /// Bias added to every listed token
    #[arg(long, default_value_t = 5.0, value_parser = parse_finite)]
    bias: f32,

    /// Largest absolute bias the API accepts
    #[arg(long, default_value_t = DEFAULT_BIAS_LIMIT, value_parser = parse_finite)]
    limit: f32,
}

fn parse_finite(value: &str) -> Result<f32, String> {
    let number: f32 = value.parse().map_err(|e| format!("{value:?} is not a number: {e}"))?;
    if number.is_finite() {
        Ok(number)
    } else {
        Err(format!("{value:?} must be a finite number"))
    }
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> Result<(), Box<dyn std::error::Error>> {
    let path = resolve_ids_file(&args.ids_file, args.category, args.model.as_deref())?;
    let ids = load_bias_ids(&path, args.category)?;
    if ids.is_empty() {
        warn!("No token ids loaded from {}, the bias map is empty", path.display());
    }

    let (bias, clamped) = LogitBias::uniform(ids, args.bias).clamped(args.limit)?;
    if clamped {
        warn!("Bias {} is outside [-{limit}, {limit}], clamped", args.bias, limit = args.limit.abs());
    }
    info!("Built logit bias for {} tokens", bias.len());

    println!("{}", serde_json::to_string_pretty(&bias.to_api_map())?);
    Ok(())
}
