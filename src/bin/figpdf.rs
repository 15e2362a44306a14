//! CLI binary for figpdf.
//!
//! A thin shim over the library crate that maps CLI flags to `RunConfig`,
//! drives the interactive marker-name disambiguation, and prints results.

use anyhow::{Context, Result};
use clap::Parser;
use figpdf::{
    generate, inspect, AbortReason, RenderProgress, RunConfig, RunOutcome,
};
use indicatif::{ProgressBar, ProgressStyle};
use std::io::{self, BufRead, IsTerminal, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

// ── ANSI colour helpers (no extra deps) ──────────────────────────────────────

fn green(s: &str) -> String {
    format!("\x1b[32m{s}\x1b[0m")
}
fn yellow(s: &str) -> String {
    format!("\x1b[33m{s}\x1b[0m")
}
fn dim(s: &str) -> String {
    format!("\x1b[2m{s}\x1b[0m")
}
fn bold(s: &str) -> String {
    format!("\x1b[1m{s}\x1b[0m")
}

// ── CLI progress callback using indicatif ────────────────────────────────────

/// Terminal progress callback: one bar tick per rendered page. The bar hits
/// 100 % once the last page has rendered, while the PDF itself is still
/// being written; `on_run_complete` clears it after the save.
struct CliProgress {
    bar: ProgressBar,
}

impl CliProgress {
    /// Create a callback whose bar length is set by `on_run_start`.
    fn new_dynamic() -> Arc<Self> {
        let bar = ProgressBar::new(0);

        let spinner_style = ProgressStyle::with_template("{spinner:.cyan} {prefix:.bold}  {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner());
        bar.set_style(spinner_style);
        bar.set_prefix("Scanning");
        bar.enable_steady_tick(Duration::from_millis(80));

        Arc::new(Self { bar })
    }
}

impl RenderProgress for CliProgress {
    fn on_run_start(&self, total_pages: usize) {
        let progress_style = ProgressStyle::with_template(
            "{spinner:.cyan} {prefix:.bold}  [{bar:42.green/238}] {pos:>3}/{len} pages  {msg}",
        )
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▉▊▋▌▍▎▏  ");

        self.bar.set_length(total_pages as u64);
        self.bar.set_style(progress_style);
        self.bar.set_prefix("Rendering");
    }

    fn on_page_rendered(&self, page_num: usize, _total_pages: usize) {
        self.bar.set_message(format!("page {page_num}"));
        self.bar.inc(1);
    }

    fn on_run_complete(&self, _total_pages: usize, _output_path: &Path) {
        self.bar.finish_and_clear();
    }
}

const AFTER_HELP: &str = r#"EXAMPLES:
  # Generate <marker>.pdf from the images of a project directory
  figpdf ~/projects/poster

  # Include images in subdirectories
  figpdf --recurse ~/projects/poster

  # Only PNG files
  figpdf --types png ~/projects/poster

  # Several .fig files: pick the output name explicitly
  figpdf --name draft ~/projects/poster

  # See what a run would do without writing anything
  figpdf --inspect-only ~/projects/poster

  # Machine-readable summary
  figpdf --json ~/projects/poster

DIRECTORY LAYOUT:
  A project directory holds one marker file and the images to bind:

    poster/
    ├── poster.fig      ← marker: names the output (poster.pdf)
    ├── 01-front.jpg    ← page 1
    ├── 02-back.jpg     ← page 2
    └── sketch.png      ← page 3

  The output PDF is written next to the marker file and replaced on
  every run.

EXIT STATUS:
  0  document written, or run ended as a deliberate no-op
  1  preconditions unmet (warnings printed), or a fatal error
"#;

/// Bind a project directory's images into one captioned PDF.
#[derive(Parser, Debug)]
#[command(
    name = "figpdf",
    version,
    about = "Bind a project directory's images into one captioned, multi-page PDF",
    long_about = "Scan a directory for a .fig marker file and a set of images, annotate every \
image with its file name, and bind the annotated pages into <marker>.pdf inside the same \
directory.",
    arg_required_else_help = true,
    color = clap::ColorChoice::Auto,
    after_long_help = AFTER_HELP
)]
struct Cli {
    /// Project directory containing the .fig marker and the images.
    directory: PathBuf,

    /// Also include images found in subdirectories.
    #[arg(short, long, env = "FIGPDF_RECURSE")]
    recurse: bool,

    /// Comma-separated image extensions to include.
    #[arg(long, env = "FIGPDF_TYPES", default_value = "jpg,jpeg,png")]
    types: String,

    /// Output base name; required only when several .fig files exist.
    #[arg(short, long, env = "FIGPDF_NAME")]
    name: Option<String>,

    /// Output resolution for page geometry (72–600).
    #[arg(long, env = "FIGPDF_DPI", default_value_t = 300,
          value_parser = clap::value_parser!(u32).range(72..=600))]
    dpi: u32,

    /// JPEG quality of the embedded pages (1–100).
    #[arg(long, env = "FIGPDF_QUALITY", default_value_t = 95,
          value_parser = clap::value_parser!(u8).range(1..=100))]
    quality: u8,

    /// Preferred caption font file (.ttf/.otf); bundled default otherwise.
    #[arg(long, env = "FIGPDF_FONT")]
    font: Option<PathBuf>,

    /// Print what a run would do, then exit without writing.
    #[arg(long)]
    inspect_only: bool,

    /// Output a structured JSON summary instead of human-readable text.
    #[arg(long, env = "FIGPDF_JSON")]
    json: bool,

    /// Disable the progress bar.
    #[arg(long, env = "FIGPDF_NO_PROGRESS")]
    no_progress: bool,

    /// Suppress all output except errors.
    #[arg(short, long, env = "FIGPDF_QUIET")]
    quiet: bool,

    /// Enable DEBUG-level tracing logs.
    #[arg(short, long, env = "FIGPDF_VERBOSE")]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // ── Logging setup ────────────────────────────────────────────────────
    // Suppress INFO-level library logs when the progress bar is active; the
    // bar provides all the feedback that matters to the user.
    let show_progress = !cli.quiet && !cli.no_progress && !cli.json;
    let filter = if cli.verbose {
        "debug"
    } else if cli.quiet || show_progress {
        "error"
    } else {
        "info"
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_writer(io::stderr)
        .init();

    // ── Inspect-only mode ────────────────────────────────────────────────
    if cli.inspect_only {
        let config = build_config(&cli, None)?;
        let report = inspect(&config).context("Failed to inspect directory")?;

        if cli.json {
            println!(
                "{}",
                serde_json::to_string_pretty(&report).context("Failed to serialise report")?
            );
        } else {
            println!("Directory:  {}", cli.directory.display());
            match report.marker_candidates.len() {
                0 => println!("Marker:     {}", yellow("none found")),
                1 => println!("Marker:     {}", report.marker_candidates[0]),
                _ => println!("Markers:    {}", report.marker_candidates.join(", ")),
            }
            for m in &report.matches {
                println!("  .{:<6}  {} file(s)", m.extension, m.count);
            }
            println!("Pages:      {}", report.total_images);
        }
        return Ok(());
    }

    // ── Run generation ───────────────────────────────────────────────────
    let mut explicit_name = cli.name.clone();
    loop {
        let progress = if show_progress {
            Some(CliProgress::new_dynamic() as Arc<dyn RenderProgress>)
        } else {
            None
        };
        let config = build_config_with_name(&cli, progress, explicit_name.clone())?;

        match generate(&config).context("Generation failed")? {
            RunOutcome::Completed(summary) => {
                if cli.json {
                    println!("{}", serde_json::to_string_pretty(&summary)?);
                } else if !cli.quiet {
                    eprintln!(
                        "{} {} pages  {}ms  →  {}",
                        green("✔"),
                        bold(&summary.page_count.to_string()),
                        summary.total_duration_ms,
                        bold(&summary.output_path.display().to_string()),
                    );
                }
                return Ok(());
            }
            RunOutcome::Invalid { warnings } => {
                if cli.json {
                    println!(
                        "{}",
                        serde_json::to_string_pretty(&RunOutcome::Invalid {
                            warnings: warnings.clone()
                        })?
                    );
                } else {
                    for w in &warnings {
                        eprintln!("{} {}", yellow("⚠"), w);
                    }
                }
                std::process::exit(1);
            }
            RunOutcome::Aborted {
                reason: AbortReason::MarkerUnresolved { candidates },
            } => {
                // Several marker files: ask, unless nobody is listening.
                let interactive =
                    io::stdin().is_terminal() && !cli.quiet && !cli.json;
                if interactive {
                    if let Some(name) = prompt_marker_name(&candidates)? {
                        explicit_name = Some(name);
                        continue;
                    }
                }
                if !cli.quiet && !cli.json {
                    eprintln!(
                        "{}",
                        dim(&format!(
                            "Several marker files found ({}); no name chosen — nothing written.",
                            candidates.join(", ")
                        ))
                    );
                }
                return Ok(());
            }
        }
    }
}

/// Ask the user to choose among the marker base names.
///
/// Re-prompts on an invalid choice; an empty line cancels. Returns `None`
/// on cancel or end of input.
fn prompt_marker_name(candidates: &[String]) -> Result<Option<String>> {
    let stdin = io::stdin();
    eprintln!("Several marker files found:");
    for c in candidates {
        eprintln!("  {c}");
    }
    loop {
        eprint!("Output name (empty to cancel): ");
        io::stderr().flush().ok();

        let mut line = String::new();
        if stdin.lock().read_line(&mut line).context("Failed to read input")? == 0 {
            return Ok(None);
        }
        let choice = line.trim();
        if choice.is_empty() {
            return Ok(None);
        }
        if candidates.iter().any(|c| c == choice) {
            return Ok(Some(choice.to_string()));
        }
        eprintln!(
            "{} '{}' is not one of: {}",
            yellow("⚠"),
            choice,
            candidates.join(", ")
        );
    }
}

/// Map CLI args to `RunConfig`.
fn build_config(cli: &Cli, progress: Option<Arc<dyn RenderProgress>>) -> Result<RunConfig> {
    build_config_with_name(cli, progress, cli.name.clone())
}

fn build_config_with_name(
    cli: &Cli,
    progress: Option<Arc<dyn RenderProgress>>,
    name: Option<String>,
) -> Result<RunConfig> {
    let mut builder = RunConfig::builder(&cli.directory)
        .recurse(cli.recurse)
        .extensions(cli.types.split(','))
        .dpi(cli.dpi)
        .jpeg_quality(cli.quality);

    if let Some(name) = name {
        builder = builder.marker_name(name);
    }
    if let Some(ref font) = cli.font {
        builder = builder.font_path(font);
    }
    if let Some(cb) = progress {
        builder = builder.progress(cb);
    }

    builder.build().context("Invalid configuration")
}
