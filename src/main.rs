use std::fs::{self, File};
use std::io;
use std::path::PathBuf;
use std::time::Instant;

use anyhow::Context;
use clap::{Parser, Subcommand};

use cv_extract::{batch, parse_cv_bytes, segment, ParserConfig, Preset};

#[derive(Parser)]
#[command(name = "cv_extract", about = "Turn plain-text CVs into structured JSON records")]
struct Cli {
    /// Parameter preset for the output template
    #[arg(long, value_enum, default_value_t = Preset::Standard, global = true)]
    preset: Preset,
    /// TOML file overriding preset fields
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse one CV and print its record as JSON
    Parse {
        file: PathBuf,
        /// Single-line JSON instead of pretty-printed
        #[arg(long)]
        compact: bool,
    },
    /// Print the sections a CV is split into, as JSON
    Sections { file: PathBuf },
    /// Parse every .txt file in a directory into JSONL
    Batch {
        dir: PathBuf,
        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Max files to parse
        #[arg(short = 'n', long)]
        limit: Option<usize>,
    },
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with_writer(io::stderr)
        .init();

    let t0 = Instant::now();
    let cli = Cli::parse();
    let config = ParserConfig::load(cli.preset, cli.config.as_deref())?;

    match cli.command {
        Commands::Parse { file, compact } => {
            let bytes = fs::read(&file).with_context(|| format!("reading {}", file.display()))?;
            let record = parse_cv_bytes(&bytes, &config);
            let json = if compact {
                serde_json::to_string(&record)?
            } else {
                serde_json::to_string_pretty(&record)?
            };
            println!("{}", json);
        }
        Commands::Sections { file } => {
            let text = fs::read_to_string(&file)
                .with_context(|| format!("reading {}", file.display()))?;
            let segments = segment(&text, &config);
            println!("{}", serde_json::to_string_pretty(&segments)?);
        }
        Commands::Batch { dir, output, limit } => {
            let files = batch::list_inputs(&dir, limit)?;
            if files.is_empty() {
                eprintln!("No .txt files in {}.", dir.display());
                return Ok(());
            }
            let stats = match &output {
                Some(path) => {
                    let out = File::create(path)
                        .with_context(|| format!("creating {}", path.display()))?;
                    batch::run(&files, &config, out)?
                }
                None => batch::run(&files, &config, io::stdout().lock())?,
            };
            eprintln!(
                "Done: {} files ({} ok, {} errors) in {:.1}s",
                stats.total,
                stats.ok,
                stats.errors,
                t0.elapsed().as_secs_f64()
            );
        }
    }

    Ok(())
}
