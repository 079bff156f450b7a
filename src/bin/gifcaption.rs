use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "gifcaption", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Caption every frame of a GIF and write a new GIF.
    Caption(CaptionArgs),
    /// Caption a single frame and write it as a PNG preview.
    Frame(FrameArgs),
}

#[derive(Args, Debug)]
struct TextArgs {
    /// Caption text. When omitted, a phrase is generated from `--seed`.
    #[arg(long)]
    text: Option<String>,

    /// Seed for the generated phrase.
    #[arg(long, default_value_t = 0)]
    seed: u64,

    /// JSON style file; omitted fields use the defaults.
    #[arg(long)]
    style: Option<PathBuf>,

    /// Font file, overriding the style's `font_path`.
    #[arg(long)]
    font: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct CaptionArgs {
    /// Input GIF.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Output GIF path.
    #[arg(long)]
    out: PathBuf,

    #[command(flatten)]
    text: TextArgs,
}

#[derive(Parser, Debug)]
struct FrameArgs {
    /// Input GIF.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Frame index (0-based).
    #[arg(long)]
    frame: usize,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,

    #[command(flatten)]
    text: TextArgs,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Caption(args) => cmd_caption(args),
        Command::Frame(args) => cmd_frame(args),
    }
}

fn resolve(args: &TextArgs) -> anyhow::Result<(gifcaption::RenderStyle, String)> {
    let mut style = match &args.style {
        Some(p) => gifcaption::RenderStyle::from_json_file(p)?,
        None => gifcaption::RenderStyle::default(),
    };
    if let Some(font) = &args.font {
        style.font_path = font.clone();
    }
    let text = match &args.text {
        Some(t) => t.clone(),
        None => gifcaption::CaptionVariants::default().pick(args.seed),
    };
    Ok((style, text))
}

fn read_input(path: &Path) -> anyhow::Result<Vec<u8>> {
    std::fs::read(path).with_context(|| format!("read input '{}'", path.display()))
}

fn report_diagnostics(report: &gifcaption::ProcessReport) {
    for d in &report.diagnostics {
        eprintln!("frame {}: {}", d.index, d.error);
    }
}

fn cmd_caption(args: CaptionArgs) -> anyhow::Result<()> {
    let (style, text) = resolve(&args.text)?;
    let input = read_input(&args.in_path)?;

    let report = gifcaption::CaptionPipeline::new(style).run_to_file(&input, &text, &args.out)?;
    report_diagnostics(&report);

    eprintln!(
        "wrote {} ({} frames captioned)",
        args.out.display(),
        report.frames_rendered
    );
    Ok(())
}

fn cmd_frame(args: FrameArgs) -> anyhow::Result<()> {
    let (style, text) = resolve(&args.text)?;
    let input = read_input(&args.in_path)?;

    let sequence = gifcaption::decode_gif(&input)?;
    let n = sequence.len();
    let frame = sequence
        .frames()
        .get(args.frame)
        .cloned()
        .with_context(|| format!("frame {} out of range (sequence has {n})", args.frame))?;
    let meta = sequence.meta()[args.frame];

    let mut single = gifcaption::Sequence::new(sequence.width(), sequence.height())
        .with_global_palette(sequence.global_palette().cloned());
    single.push_frame(frame, meta)?;

    let mut processor =
        gifcaption::SequenceProcessor::new(gifcaption::FrameCompositor::new(style)?);
    let report = processor.process_all(&mut single, &text)?;
    report_diagnostics(&report);

    let raster = single.raster(0)?;
    gifcaption::ensure_parent_dir(&args.out)?;
    image::save_buffer_with_format(
        &args.out,
        &raster.to_straight_rgba8(),
        raster.width(),
        raster.height(),
        image::ColorType::Rgba8,
        image::ImageFormat::Png,
    )
    .with_context(|| format!("write png '{}'", args.out.display()))?;

    eprintln!("wrote {}", args.out.display());
    Ok(())
}
