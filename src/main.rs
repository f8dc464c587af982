use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::Parser;
use log::{error, info};

use jp_token_analyzer::core::config::{DEFAULT_MIN_TOKEN_ID, DEFAULT_OUTPUT_DIR};
use jp_token_analyzer::report::{print_examples, print_summary, save_analysis_json, save_token_list};
use jp_token_analyzer::{AnalysisOptions, ReportOptions, analyze, load_vocabulary};

/// Classify every token of a tokenizer vocabulary by Japanese script, English, digits and symbols
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// tokenizer.json, SentencePiece .model, or a directory containing one
    #[arg(short, long)]
    model: PathBuf,

    /// Ids below this are skipped
    #[arg(long, default_value_t = DEFAULT_MIN_TOKEN_ID)]
    min_token_id: u32,

    /// Where the JSON report and id lists are written
    #[arg(short, long, default_value = DEFAULT_OUTPUT_DIR)]
    output_dir: PathBuf,

    /// Log filter (error, warn, info, debug, trace); overrides RUST_LOG
    #[arg(long)]
    log_level: Option<String>,

    /// Hide the progress bar
    #[arg(long)]
    no_progress: bool,
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_logging(args.log_level.as_deref());

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}

fn init_logging(level: Option<&str>) {
    let mut builder = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"));
    if let Some(level) = level {
        builder.parse_filters(level);
    }
    builder.init();
}

fn run(args: &Args) -> Result<(), Box<dyn std::error::Error>> {
    let vocab = load_vocabulary(&args.model)?;
    let model_id = model_id(&args.model);

    let analysis_options = AnalysisOptions {
        min_token_id: args.min_token_id,
        show_progress: !args.no_progress,
        ..AnalysisOptions::default()
    };
    let report_options = ReportOptions { output_dir: args.output_dir.clone(), ..ReportOptions::default() };

    let result = analyze(&*vocab, &model_id, &analysis_options);

    save_analysis_json(&result, &report_options)?;
    for &category in &report_options.saved_categories {
        save_token_list(result.ids(category), category, &report_options.output_dir, &model_id)?;
    }

    print_summary(&result);
    print_examples(&*vocab, &result, &report_options.example_categories);
    info!("Done. Results are in {}", report_options.output_dir.display());
    Ok(())
}

/// Name the model after its directory when given a directory or a tokenizer file inside one
fn model_id(path: &Path) -> String {
    let is_tokenizer_file = path
        .file_name()
        .and_then(|name| name.to_str())
        .is_some_and(|name| name == "tokenizer.json" || name == "tokenizer.model");
    let name = if path.is_dir() {
        path.file_name()
    } else if is_tokenizer_file {
        path.parent().and_then(Path::file_name)
    } else {
        path.file_stem()
    };
    name.and_then(|n| n.to_str())
        .map(str::to_string)
        .unwrap_or_else(|| path.display().to_string())
}
