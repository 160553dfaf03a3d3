use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use label_export::{ExportFormat, LabelJob};
use label_layout::{Alignment, FontFamily, LabelSpec, LayoutSummary, PreviewGrid};
use std::num::NonZeroU32;
use std::path::PathBuf;

mod logger;

#[derive(Parser)]
#[command(name = "labelt", about = "Label sheet layout CLI", version)]
struct Cli {
    /// Increase log output (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check a label spec and show how it packs onto A4
    Layout {
        #[command(flatten)]
        spec: SpecArgs,

        /// Also draw the page grid
        #[arg(long)]
        grid: bool,
    },

    /// Generate a PDF label sheet
    Pdf {
        #[command(flatten)]
        spec: SpecArgs,

        /// Output PDF file
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Generate a Word (.docx) label sheet
    Word {
        #[command(flatten)]
        spec: SpecArgs,

        /// Output DOCX file
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[derive(Args)]
struct SpecArgs {
    /// JSON label spec to start from; flags below override its fields
    #[arg(long)]
    spec: Option<PathBuf>,

    /// Label width in mm
    #[arg(long)]
    width: Option<f32>,

    /// Label height in mm
    #[arg(long)]
    height: Option<f32>,

    /// A line of label text (repeat for more lines)
    #[arg(short, long = "line")]
    lines: Vec<String>,

    /// Maximum lines printed per label [default: number of --line values]
    #[arg(long)]
    max_lines: Option<usize>,

    /// Font (Helvetica/Arial, Times/Times New Roman, Courier/Courier New)
    #[arg(long)]
    font: Option<FontFamily>,

    /// Font size in points
    #[arg(long)]
    font_size: Option<f32>,

    /// Line height multiplier
    #[arg(long)]
    line_height: Option<f32>,

    /// Text alignment within each label
    #[arg(long, value_enum)]
    align: Option<AlignArg>,

    /// Number of labels to produce
    #[arg(short = 'n', long)]
    count: Option<NonZeroU32>,

    /// Page margin in mm (uniform on all sides)
    #[arg(long)]
    margin: Option<f32>,

    #[arg(long)]
    margin_top: Option<f32>,

    #[arg(long)]
    margin_right: Option<f32>,

    #[arg(long)]
    margin_bottom: Option<f32>,

    #[arg(long)]
    margin_left: Option<f32>,
}

#[derive(Clone, Copy, ValueEnum)]
enum AlignArg {
    Left,
    Center,
    Right,
}

impl From<AlignArg> for Alignment {
    fn from(arg: AlignArg) -> Self {
        match arg {
            AlignArg::Left => Self::Left,
            AlignArg::Center => Self::Center,
            AlignArg::Right => Self::Right,
        }
    }
}

impl SpecArgs {
    async fn into_spec(self) -> Result<LabelSpec> {
        let mut spec = match &self.spec {
            Some(path) => LabelSpec::load(path)
                .await
                .with_context(|| format!("Failed to load {}", path.display()))?,
            None => LabelSpec::default(),
        };

        if let Some(width) = self.width {
            spec.label_size.width_mm = width;
        }
        if let Some(height) = self.height {
            spec.label_size.height_mm = height;
        }
        if !self.lines.is_empty() {
            spec.max_lines = self.lines.len();
            spec.content = self.lines.join("\n");
        }
        if let Some(max_lines) = self.max_lines {
            spec.max_lines = max_lines;
        }
        if let Some(font) = self.font {
            spec.font = font;
        }
        if let Some(font_size) = self.font_size {
            spec.font_size_pt = font_size;
        }
        if let Some(line_height) = self.line_height {
            spec.line_height = line_height;
        }
        if let Some(align) = self.align {
            spec.alignment = align.into();
        }
        if let Some(count) = self.count {
            spec.count = count;
        }
        if let Some(margin) = self.margin {
            spec.margins = label_layout::Margins::uniform(margin);
        }
        let margins = &mut spec.margins;
        for (value, field) in [
            (self.margin_top, &mut margins.top_mm),
            (self.margin_right, &mut margins.right_mm),
            (self.margin_bottom, &mut margins.bottom_mm),
            (self.margin_left, &mut margins.left_mm),
        ] {
            if let Some(value) = value {
                *field = value;
            }
        }

        Ok(spec)
    }
}

fn print_summary(summary: LayoutSummary) {
    println!("Label Layout:");
    for line in summary.to_string().lines() {
        println!("  {}", line);
    }
}

async fn export(spec: SpecArgs, output: Option<PathBuf>, format: ExportFormat) -> Result<()> {
    let mut job = LabelJob::new(spec.into_spec().await?);
    print_summary(LayoutSummary::from(job.preview()?));

    let bytes = job.export(format).await?;
    let output = output.unwrap_or_else(|| PathBuf::from(format.default_file_name()));
    tokio::fs::write(&output, &bytes)
        .await
        .with_context(|| format!("Failed to write {}", output.display()))?;

    println!(
        "Generated {} labels → {}",
        job.spec().count,
        output.display()
    );
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    logger::CliLogger::new(cli.verbose).init()?;

    match cli.command {
        Commands::Layout { spec, grid } => {
            let mut job = LabelJob::new(spec.into_spec().await?);
            let layout = job.preview()?;
            print_summary(LayoutSummary::from(layout));

            if grid {
                println!();
                println!("{}", PreviewGrid::new(layout, 1.0).to_ascii());
            }
        }

        Commands::Pdf { spec, output } => export(spec, output, ExportFormat::Pdf).await?,

        Commands::Word { spec, output } => export(spec, output, ExportFormat::Docx).await?,
    }

    Ok(())
}
