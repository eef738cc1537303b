use clap::{Parser, Subcommand};
use folio_lightbox::{config, generate, output, replay, scan, script};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "folio-lightbox")]
#[command(about = "Project gallery pages with a keyboard-driven lightbox")]
#[command(long_about = "\
Project gallery pages with a keyboard-driven lightbox

Each project directory becomes a card. Activating a card opens the lightbox
on its photos; arrows and indicators navigate, Escape or the overlay closes.

Content structure:

  content/
  ├── config.toml                  # Lightbox config (optional)
  ├── 010-Villa-Ikoyi/             # Project (numbered = shown in grid)
  │   ├── project.toml             # name, category, location (optional)
  │   ├── 001-facade.jpg           # Photos, ordered by number prefix
  │   └── 010-terrace.webp         # Non-contiguous numbering OK
  ├── 030-Empty-Lot/               # No photos = inert card
  └── drafts/                      # No number prefix = hidden from grid

Replay scripts drive the generated page headlessly:

  open villa-ikoyi                 # by slug, or `open 1` by grid position
  next; next                       # `;` separates commands
  jump 1                           # indicators are 1-based
  key Escape                       # any KeyboardEvent.key name
  settle                           # let the exit transition finish

Run 'folio-lightbox gen-config' to generate a documented config.toml.")]
#[command(version)]
struct Cli {
    /// Content directory
    #[arg(long, default_value = "content", global = true)]
    source: PathBuf,

    /// Output directory
    #[arg(long, default_value = "dist", global = true)]
    output: PathBuf,

    /// Directory for intermediate files (manifest)
    #[arg(long, default_value = ".folio-lightbox-temp", global = true)]
    temp_dir: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Scan content directory into a manifest
    Scan,
    /// Produce the HTML page from the scanned manifest
    Generate,
    /// Run the full pipeline: scan → generate
    Build,
    /// Validate content and the page's lightbox markup without building
    Check,
    /// Drive the generated page with a replay script
    Replay {
        /// Script file
        script: PathBuf,
        /// Write an HTML snapshot of the final modal state
        #[arg(long)]
        snapshot: Option<PathBuf>,
    },
    /// Print a stock config.toml with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Scan => {
            let manifest = scan::scan(&cli.source)?;
            write_manifest(&manifest, &cli.temp_dir)?;
            output::print_scan_output(&manifest, &cli.source);
        }
        Command::Generate => {
            let manifest_path = cli.temp_dir.join("manifest.json");
            let summary = generate::generate(&manifest_path, &cli.source, &cli.output)?;
            output::print_generate_output(&summary, &cli.output);
        }
        Command::Build => {
            println!("==> Stage 1: Scanning {}", cli.source.display());
            let manifest = scan::scan(&cli.source)?;
            let manifest_path = write_manifest(&manifest, &cli.temp_dir)?;
            output::print_scan_output(&manifest, &cli.source);

            println!("==> Stage 2: Generating HTML → {}", cli.output.display());
            let summary = generate::generate(&manifest_path, &cli.source, &cli.output)?;
            output::print_generate_output(&summary, &cli.output);

            println!("==> Build complete: {}", cli.output.display());
        }
        Command::Check => {
            println!("==> Checking {}", cli.source.display());
            let manifest = scan::scan(&cli.source)?;
            let report = replay::check(&manifest)?;
            output::print_check_output(&report);
            println!("==> Content is valid");
        }
        Command::Replay {
            script: script_path,
            snapshot,
        } => {
            let steps = script::parse_script(&std::fs::read_to_string(&script_path)?)
                .map_err(|e| format!("{}: {e}", script_path.display()))?;
            let manifest = scan::scan(&cli.source)?;
            let result = replay::replay(&manifest, &steps)?;
            output::print_replay_output(&result);
            if let Some(path) = snapshot {
                let html = generate::render_modal(&manifest.config, Some(&result.view));
                std::fs::write(&path, html.into_string())?;
                println!("Snapshot written to {}", path.display());
            }
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}

/// Write the scan manifest where `generate` expects it.
fn write_manifest(
    manifest: &scan::Manifest,
    temp_dir: &Path,
) -> Result<PathBuf, Box<dyn std::error::Error>> {
    std::fs::create_dir_all(temp_dir)?;
    let manifest_path = temp_dir.join("manifest.json");
    std::fs::write(&manifest_path, serde_json::to_string_pretty(manifest)?)?;
    Ok(manifest_path)
}
