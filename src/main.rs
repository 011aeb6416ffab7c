use clap::{Parser, Subcommand};
use respimg::config::{self, ConvertConfig, ProjectPaths};
use respimg::convert;
use respimg::imaging::RustBackend;
use respimg::output;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "respimg")]
#[command(about = "Convert source images into responsive WebP variants and placeholders")]
#[command(long_about = "\
Convert source images into responsive WebP variants and placeholders

Project layout (relative to --root):

  images.json                    # Optional: JSON array of file names to convert
  respimg.toml                   # Optional: overrides for sizes and qualities
  images/                        # Source images
  └── optimized/                 # Output (created if missing)
      ├── <name>-1600.webp
      ├── <name>-900.webp
      ├── <name>-placeholder.jpg
      └── manifest.json

Without images.json, every .jpg/.jpeg/.png directly inside images/ is converted.
Images are never upscaled. A file that fails to convert is reported and left
out of the manifest; the run still succeeds.

Run 'respimg gen-config' to print a documented respimg.toml.")]
#[command(version)]
struct Cli {
    /// Project root containing images/ and the optional images.json
    #[arg(long, default_value = ".", global = true)]
    root: PathBuf,

    /// Config file (defaults to <root>/respimg.toml when present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log per-output details to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Convert all images and write the manifest (default)
    Convert,
    /// Show planned outputs and dimensions without writing anything
    Check,
    /// Print a stock respimg.toml with all options documented
    GenConfig,
}

fn init_logging(verbose: bool) {
    let env_filter = std::env::var("RUST_LOG").unwrap_or_else(|_| {
        if verbose {
            "respimg=debug".to_string()
        } else {
            "respimg=info".to_string()
        }
    });

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

/// Resolve the project layout and load the run configuration.
fn load_project(
    cli: &Cli,
) -> Result<(ProjectPaths, ConvertConfig), Box<dyn std::error::Error>> {
    let root = std::path::absolute(&cli.root)?;
    let paths = ProjectPaths::new(root);
    let convert_config = config::load_config(&paths.root, cli.config.as_deref())?;
    Ok((paths, convert_config))
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command.as_ref().unwrap_or(&Command::Convert) {
        Command::Convert => {
            let (paths, convert_config) = load_project(&cli)?;
            let report =
                convert::convert_all(&RustBackend::new(), &paths, &convert_config, |outcome| {
                    output::print_outcome(outcome)
                })?;
            output::print_summary(&report, &paths);
        }
        Command::Check => {
            let (paths, convert_config) = load_project(&cli)?;
            let planned = convert::plan_all(&RustBackend::new(), &paths, &convert_config)?;
            output::print_check_output(&planned, &paths);
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}
