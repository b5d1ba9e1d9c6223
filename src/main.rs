// file: src/main.rs
// description: commandline application entry point
// reference: application bootstrap and orchestration

use anyhow::{Context, Result};
use clap::{ArgAction, Parser};
use search_export::utils::logging::format_success;
use search_export::{
    Config, ExportPipeline, HttpSearchApi, JsonExporter, ProgressObserver, SilentProgress, Stage,
    TerminalProgress, Validator,
};
use std::path::PathBuf;
use tracing::{debug, error, info};

#[derive(Parser)]
#[command(name = "search_export")]
#[command(author = "cipher")]
#[command(version = "0.1.0")]
#[command(
    about = "Export synonyms, curations and search settings from a hosted search engine",
    long_about = None
)]
struct Cli {
    /// Directory receiving synonyms.json, curations.json and search_settings.json
    #[arg(short, long, value_name = "DIR", env = "OUTPUT_DIR", default_value = ".")]
    output_dir: PathBuf,

    #[arg(long, value_name = "FILE", default_value = ".env")]
    env_file: PathBuf,

    /// Run only these stages (repeatable); defaults to all of them
    #[arg(short, long = "stage", value_enum)]
    stages: Vec<Stage>,

    #[arg(long, action = ArgAction::SetTrue)]
    no_progress: bool,

    #[arg(long, default_value_t = true, action = ArgAction::Set)]
    color: bool,

    #[arg(short, long, action = ArgAction::SetTrue)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    search_export::utils::logging::init_logger(cli.color, cli.verbose);

    let config =
        Config::load(Some(cli.env_file.as_path())).context("Failed to load configuration")?;
    debug!("Loaded configuration: {:?}", config);

    Validator::validate_output_dir(&cli.output_dir)?;
    let output =
        JsonExporter::new(&cli.output_dir).context("Failed to prepare output directory")?;
    let api = HttpSearchApi::new(&config).context("Failed to create API client")?;

    let progress: Box<dyn ProgressObserver> = if cli.no_progress {
        Box::new(SilentProgress)
    } else {
        Box::new(TerminalProgress::new(cli.color))
    };

    let pipeline = ExportPipeline::new(&config, &api, &output, progress.as_ref());
    match pipeline.run(&cli.stages).await {
        Ok(stats) => {
            drop(progress);
            stats.log_summary();
            println!("{}", format_success("Done!"));
            Ok(())
        }
        Err(e) => {
            drop(progress);
            error!("{}: {}", e, e.root());
            info!("Files from completed stages were left in place");
            Err(e.into())
        }
    }
}
