mod logger;

use anyhow::{Context, Result, bail};
use clap::{Args, Parser, Subcommand, ValueEnum};
use pdf_planche::{PdfiumRasterizer, PlancheOptions};
use pdf_planche_runtime::{PlancheCommand, PlancheUpdate, worker_task};
use std::path::{Path, PathBuf};
use tokio::sync::mpsc;

#[derive(Parser)]
#[command(name = "planche", about = "Crop PDF pages and stack them onto print sheets", version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    #[command(flatten)]
    options: OptionArgs,

    /// Increase log output (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Crop every page to the centered crop window
    Crop {
        /// Input PDF file
        #[arg(short, long)]
        input: PathBuf,

        /// Output PDF file
        #[arg(short, long)]
        output: PathBuf,
    },

    /// Stack the pages of an already cropped PDF onto sheets
    Compose {
        /// Cropped input PDF file
        #[arg(short, long)]
        input: PathBuf,

        /// Output PDF file (defaults to <base>-planche.pdf next to the input)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Base name of the output file, used as given
        #[arg(long)]
        base_name: Option<String>,
    },

    /// Crop and compose in one go
    Run {
        /// Input PDF file
        #[arg(short, long)]
        input: PathBuf,

        /// Directory receiving the planche (defaults to the input's directory)
        #[arg(long)]
        out_dir: Option<PathBuf>,

        /// Base name of the output file (defaults to the input file stem)
        #[arg(long)]
        base_name: Option<String>,
    },

    /// Show planche statistics without rendering anything
    Stats {
        /// Input PDF file
        #[arg(short, long)]
        input: PathBuf,
    },

    /// Write the effective options as JSON
    Config {
        /// Destination JSON file
        #[arg(long)]
        write: PathBuf,
    },
}

/// Overrides applied on top of the defaults or the `--config` file
#[derive(Args)]
struct OptionArgs {
    /// Options JSON file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Crop window width in mm
    #[arg(long, global = true)]
    crop_width_mm: Option<f32>,

    /// Crop window height in mm
    #[arg(long, global = true)]
    crop_height_mm: Option<f32>,

    /// Output paper size
    #[arg(long, value_enum, global = true)]
    paper: Option<PaperArg>,

    /// Output orientation
    #[arg(long, value_enum, global = true)]
    orientation: Option<OrientationArg>,

    /// Vertical gap between slots in points
    #[arg(long, global = true)]
    gap_pt: Option<f32>,

    /// Pages stacked on each sheet
    #[arg(long, global = true)]
    slots: Option<usize>,

    /// Rasterization resolution
    #[arg(long, global = true)]
    dpi: Option<f32>,

    /// Directory containing the Pdfium shared library
    #[arg(long, global = true)]
    pdfium_dir: Option<PathBuf>,
}

#[derive(Clone, Copy, ValueEnum)]
enum PaperArg {
    A3,
    A4,
    A5,
    Letter,
    Legal,
    Tabloid,
}

#[derive(Clone, Copy, ValueEnum)]
enum OrientationArg {
    Portrait,
    Landscape,
}

impl From<PaperArg> for pdf_planche::PaperSize {
    fn from(arg: PaperArg) -> Self {
        match arg {
            PaperArg::A3 => Self::A3,
            PaperArg::A4 => Self::A4,
            PaperArg::A5 => Self::A5,
            PaperArg::Letter => Self::Letter,
            PaperArg::Legal => Self::Legal,
            PaperArg::Tabloid => Self::Tabloid,
        }
    }
}

impl From<OrientationArg> for pdf_planche::Orientation {
    fn from(arg: OrientationArg) -> Self {
        match arg {
            OrientationArg::Portrait => Self::Portrait,
            OrientationArg::Landscape => Self::Landscape,
        }
    }
}

impl OptionArgs {
    async fn resolve(&self) -> Result<PlancheOptions> {
        let mut options = match &self.config {
            Some(path) => PlancheOptions::load(path)
                .await
                .with_context(|| format!("Failed to load {}", path.display()))?,
            None => PlancheOptions::default(),
        };

        if let Some(width) = self.crop_width_mm {
            options.crop_width_mm = width;
        }
        if let Some(height) = self.crop_height_mm {
            options.crop_height_mm = height;
        }
        if let Some(paper) = self.paper {
            options.sheet_size = paper.into();
        }
        if let Some(orientation) = self.orientation {
            options.orientation = orientation.into();
        }
        if let Some(gap) = self.gap_pt {
            options.gap_pt = gap;
        }
        if let Some(slots) = self.slots {
            options.slots_per_sheet = slots;
        }
        if let Some(dpi) = self.dpi {
            options.dpi = dpi;
        }

        options.validate()?;
        Ok(options)
    }

    fn rasterizer(&self) -> Result<PdfiumRasterizer> {
        let rasterizer = match &self.pdfium_dir {
            Some(dir) => PdfiumRasterizer::with_library_dir(dir),
            None => PdfiumRasterizer::new(),
        };
        rasterizer.check()?;
        Ok(rasterizer)
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    logger::CliLogger::from_verbosity(cli.verbose).init()?;

    let options = cli.options.resolve().await?;

    match cli.command {
        Commands::Crop { input, output } => {
            pdf_planche::crop_file(&input, &output, &options).await?;
            println!(
                "Cropped to {} x {} mm → {}",
                options.crop_width_mm,
                options.crop_height_mm,
                output.display()
            );
        }

        Commands::Compose {
            input,
            output,
            base_name,
        } => {
            let rasterizer = cli.options.rasterizer()?;
            let progress = |done: usize, total: usize| {
                log::info!("Placed page {}/{}", done, total);
            };
            let written = pdf_planche::compose_file(
                &input,
                output.as_deref(),
                base_name.as_deref(),
                &options,
                rasterizer,
                progress,
            )
            .await?;
            println!("Composed → {}", written.display());
        }

        Commands::Run {
            input,
            out_dir,
            base_name,
        } => {
            let rasterizer = cli.options.rasterizer()?;
            let destination_dir = match out_dir {
                Some(dir) => dir,
                None => input_dir(&input),
            };
            let file_name = match base_name {
                Some(base) => format!("{}.pdf", base),
                None => input
                    .file_name()
                    .map(|name| name.to_string_lossy().into_owned())
                    .context("Input path has no file name")?,
            };
            let source_bytes = tokio::fs::read(&input)
                .await
                .with_context(|| format!("Failed to read {}", input.display()))?;

            let (path, sheets) = run_job(
                rasterizer,
                PlancheCommand::Generate {
                    source_bytes,
                    file_name,
                    destination_dir,
                    options,
                },
            )
            .await?;
            println!("Generated {} planche(s) → {}", sheets, path.display());
        }

        Commands::Stats { input } => {
            let document = pdf_planche::load_pdf(&input).await?;
            let stats = pdf_planche::calculate_statistics(&document, &options)?;
            println!("Planche Statistics:");
            println!("  Source pages: {}", stats.source_pages);
            println!("  Output sheets: {}", stats.output_sheets);
            println!("  Slots per sheet: {}", stats.slots_per_sheet);
            println!("  Empty slots: {}", stats.empty_slots);
            println!(
                "  Raster size: {} x {} px",
                stats.raster_pixels.0, stats.raster_pixels.1
            );
            if stats.overflows_sheet {
                println!("  Warning: the slot stack does not fit on the sheet");
            }
        }

        Commands::Config { write } => {
            options.save(&write).await?;
            println!("Options → {}", write.display());
        }
    }

    Ok(())
}

/// Hand one command to a worker and wait for its outcome
async fn run_job(
    rasterizer: PdfiumRasterizer,
    command: PlancheCommand,
) -> Result<(PathBuf, usize)> {
    let (command_tx, command_rx) = mpsc::unbounded_channel();
    let (update_tx, mut update_rx) = mpsc::unbounded_channel();
    let worker = tokio::spawn(worker_task(rasterizer, command_rx, update_tx));

    command_tx.send(command)?;
    drop(command_tx);

    let mut outcome = None;
    while let Some(update) = update_rx.recv().await {
        match update {
            PlancheUpdate::Progress {
                operation,
                current,
                total,
            } => log::info!("{}: {}/{}", operation, current, total),
            PlancheUpdate::Complete { path, sheets } => outcome = Some(Ok((path, sheets))),
            PlancheUpdate::Error { message } => outcome = Some(Err(message)),
            PlancheUpdate::StatsCalculated { .. } => {}
        }
    }
    worker.await?;

    match outcome {
        Some(Ok(result)) => Ok(result),
        Some(Err(message)) => bail!(message),
        None => bail!("Worker exited without a result"),
    }
}

fn input_dir(input: &Path) -> PathBuf {
    match input.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir.to_owned(),
        _ => PathBuf::from("."),
    }
}
