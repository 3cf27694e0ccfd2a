use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "crayon-diary", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Turn a photo into a crayon drawing.
    Stylize(StylizeArgs),
    /// Compose a drawing and diary text into an exported page.
    Export(ExportArgs),
    /// Print the character grid for some text.
    Grid(GridArgs),
}

#[derive(Parser, Debug)]
struct StylizeArgs {
    /// Input image (any format the `image` crate decodes).
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,

    /// Seed for the paper-grain noise.
    #[arg(long)]
    seed: Option<u64>,

    /// Skip the paper-grain noise layer.
    #[arg(long, default_value_t = false)]
    no_noise: bool,

    /// Config JSON overriding the defaults.
    #[arg(long)]
    config: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct ExportArgs {
    /// The drawing to place on the page.
    #[arg(long)]
    canvas: PathBuf,

    /// Directory the page is written to, as `diary_<date>.png`.
    #[arg(long)]
    out_dir: PathBuf,

    #[arg(long)]
    date: Option<String>,

    /// One of sunny, cloudy, rainy, snowy, windy.
    #[arg(long, default_value = "sunny")]
    weather: crayon_diary::Weather,

    /// Diary text.
    #[arg(long, conflicts_with = "text_file")]
    text: Option<String>,

    /// File holding the diary text.
    #[arg(long)]
    text_file: Option<PathBuf>,

    /// Font for the header and grid text; overrides the config.
    #[arg(long)]
    font: Option<PathBuf>,

    /// Config JSON overriding the defaults.
    #[arg(long)]
    config: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct GridArgs {
    /// Columns per row.
    #[arg(long, default_value_t = 13)]
    cols: u32,

    text: String,
}

fn main() -> anyhow::Result<()> {
    init_logging();
    let cli = Cli::parse();
    match cli.cmd {
        Command::Stylize(args) => cmd_stylize(args),
        Command::Export(args) => cmd_export(args),
        Command::Grid(args) => cmd_grid(args),
    }
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn load_config(path: Option<&Path>) -> anyhow::Result<crayon_diary::DiaryConfig> {
    match path {
        Some(p) => Ok(crayon_diary::DiaryConfig::load(p)?),
        None => Ok(crayon_diary::DiaryConfig::default()),
    }
}

fn read_image(path: &Path) -> anyhow::Result<crayon_diary::Surface> {
    let bytes = std::fs::read(path).with_context(|| format!("read image '{}'", path.display()))?;
    crayon_diary::decode_image(&bytes).with_context(|| format!("decode image '{}'", path.display()))
}

fn write_file(path: &Path, bytes: &[u8]) -> anyhow::Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    std::fs::write(path, bytes).with_context(|| format!("write '{}'", path.display()))
}

fn cmd_stylize(args: StylizeArgs) -> anyhow::Result<()> {
    let mut config = load_config(args.config.as_deref())?;
    if args.seed.is_some() {
        config.noise.seed = args.seed;
    }
    if args.no_noise {
        config.noise.probability = 0.0;
    }

    let source = read_image(&args.in_path)?;
    let out = crayon_diary::stylize(&source, &config)?;
    write_file(&args.out, &out.to_png()?)?;

    eprintln!("wrote {} ({}x{})", args.out.display(), out.width(), out.height());
    Ok(())
}

fn cmd_export(args: ExportArgs) -> anyhow::Result<()> {
    let mut config = load_config(args.config.as_deref())?;
    if args.font.is_some() {
        config.export.font_path = args.font;
    }

    let body = match (&args.text, &args.text_file) {
        (Some(text), _) => text.clone(),
        (None, Some(path)) => std::fs::read_to_string(path)
            .with_context(|| format!("read text '{}'", path.display()))?,
        (None, None) => String::new(),
    };
    let entry = crayon_diary::DiaryEntry {
        date: args.date,
        weather: args.weather,
        body,
    };

    let mut painter = match &config.export.font_path {
        Some(path) => Some(crayon_diary::TextPainter::load(path)?),
        None => None,
    };
    let drawing = read_image(&args.canvas)?;
    let page = crayon_diary::export_diary(&drawing, &entry, &config, painter.as_mut())?;

    let out = args.out_dir.join(&page.file_name);
    write_file(&out, &page.png)?;
    eprintln!("wrote {} ({}x{})", out.display(), page.width, page.height);
    Ok(())
}

fn cmd_grid(args: GridArgs) -> anyhow::Result<()> {
    let cells = crayon_diary::layout(&args.text, args.cols)?;
    let mut line = String::new();
    for cell in &cells {
        line.push_str(cell.glyph().unwrap_or("."));
        if cell.col + 1 == args.cols {
            println!("{line}");
            line.clear();
        }
    }
    Ok(())
}
