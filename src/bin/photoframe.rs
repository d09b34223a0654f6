use std::{
    fs::File,
    io::BufReader,
    path::{Path, PathBuf},
};

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand, ValueEnum};

#[derive(Parser, Debug)]
#[command(name = "photoframe", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Export the composite at full resolution.
    Export(ExportArgs),
    /// Render the live preview surface as a PNG.
    Preview(PreviewArgs),
}

#[derive(Parser, Debug)]
struct ExportArgs {
    /// Photo placed behind the overlay.
    #[arg(long)]
    image: PathBuf,

    /// Decorative overlay stretched over the whole frame.
    #[arg(long)]
    overlay: Option<PathBuf>,

    /// Output resolution preset (1024, 2048 or 4096).
    #[arg(long, default_value_t = 1024, value_parser = parse_preset)]
    size: u32,

    /// Any positive output resolution; overrides `--size`.
    #[arg(long)]
    size_px: Option<u32>,

    /// Output format.
    #[arg(long, value_enum, default_value_t = FormatChoice::Png)]
    format: FormatChoice,

    #[command(flatten)]
    transform: TransformArgs,

    /// Width of the preview container the transform was captured against.
    #[arg(long)]
    preview_width: Option<u32>,

    /// Output path (defaults to `profile-overlay.<ext>`).
    #[arg(long)]
    out: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct PreviewArgs {
    /// Photo placed behind the overlay.
    #[arg(long)]
    image: PathBuf,

    /// Decorative overlay stretched over the whole frame.
    #[arg(long)]
    overlay: Option<PathBuf>,

    /// Preview side length in pixels.
    #[arg(long, default_value_t = 500)]
    size: u32,

    #[command(flatten)]
    transform: TransformArgs,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,
}

#[derive(Args, Debug)]
struct TransformArgs {
    /// Zoom factor relative to the fitted image.
    #[arg(long, default_value_t = 1.0)]
    scale: f64,

    /// Horizontal offset in pixels.
    #[arg(long, default_value_t = 0.0, allow_hyphen_values = true)]
    x: f64,

    /// Vertical offset in pixels.
    #[arg(long, default_value_t = 0.0, allow_hyphen_values = true)]
    y: f64,

    /// JSON file with `{"scale": .., "x": .., "y": ..}`; overrides the flags above.
    #[arg(long)]
    transform_json: Option<PathBuf>,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum FormatChoice {
    Png,
    Jpeg,
}

impl From<FormatChoice> for photoframe::ExportFormat {
    fn from(choice: FormatChoice) -> Self {
        match choice {
            FormatChoice::Png => Self::Png,
            FormatChoice::Jpeg => Self::Jpeg,
        }
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Export(args) => cmd_export(args),
        Command::Preview(args) => cmd_preview(args),
    }
}

fn parse_preset(s: &str) -> Result<u32, String> {
    let px: u32 = s.parse().map_err(|_| format!("'{s}' is not a number"))?;
    photoframe::ExportSize::from_px(px)
        .map(photoframe::ExportSize::px)
        .ok_or_else(|| format!("{px} is not one of 1024, 2048, 4096 (use --size-px)"))
}

fn read_transform(args: &TransformArgs) -> anyhow::Result<photoframe::Transform> {
    let t = match &args.transform_json {
        Some(path) => {
            let f = File::open(path)
                .with_context(|| format!("open transform '{}'", path.display()))?;
            serde_json::from_reader(BufReader::new(f))
                .with_context(|| "parse transform JSON")?
        }
        None => photoframe::Transform {
            scale: args.scale,
            x: args.x,
            y: args.y,
        },
    };
    t.validate()?;
    Ok(t)
}

fn write_output(path: &Path, bytes: &[u8]) -> anyhow::Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    std::fs::write(path, bytes).with_context(|| format!("write '{}'", path.display()))?;
    Ok(())
}

fn cmd_export(args: ExportArgs) -> anyhow::Result<()> {
    let transform = read_transform(&args.transform)?;
    let base = photoframe::ImageSource::from_path(&args.image);
    let overlay = args.overlay.as_ref().map(photoframe::ImageSource::from_path);
    let preview_frame = args
        .preview_width
        .map(photoframe::PreviewFrame::square)
        .transpose()?;

    let req = photoframe::ExportRequest {
        base: Some(&base),
        overlay: overlay.as_ref(),
        transform,
        output_size: args.size_px.unwrap_or(args.size),
        format: args.format.into(),
        preview_frame,
    };

    let settings = photoframe::ExportSettings::from_env();
    let Some(result) = photoframe::export_with_settings(&req, &settings)? else {
        anyhow::bail!("export produced no output");
    };

    let out = args
        .out
        .unwrap_or_else(|| PathBuf::from(result.file_name("profile-overlay")));
    write_output(&out, &result.bytes)?;

    eprintln!("wrote {} ({}x{})", out.display(), result.size, result.size);
    Ok(())
}

fn cmd_preview(args: PreviewArgs) -> anyhow::Result<()> {
    let transform = read_transform(&args.transform)?;
    let base = photoframe::load(&photoframe::ImageSource::from_path(&args.image))?;
    let overlay = args
        .overlay
        .as_ref()
        .map(|p| photoframe::load(&photoframe::ImageSource::from_path(p)))
        .transpose()?;

    let surface =
        photoframe::render_preview(args.size, Some(&base), overlay.as_ref(), &transform)?;
    let result = photoframe::encode_surface(
        &surface,
        photoframe::ExportFormat::Png,
        photoframe::export::DEFAULT_JPEG_QUALITY,
    )?;
    write_output(&args.out, &result.bytes)?;

    eprintln!("wrote {}", args.out.display());
    Ok(())
}
