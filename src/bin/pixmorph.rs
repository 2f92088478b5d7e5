use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "pixmorph", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render the frame at one playhead position as a PNG.
    Frame(FrameArgs),
    /// Export the whole timeline as a numbered PNG sequence.
    Render(RenderArgs),
    /// Print which image pair is active at a playhead position.
    Timeline(TimelineArgs),
}

#[derive(Args, Debug)]
struct InputArgs {
    /// Settings JSON; defaults apply when omitted.
    #[arg(long)]
    settings: Option<PathBuf>,

    /// Images in timeline order.
    #[arg(required = true)]
    images: Vec<PathBuf>,
}

#[derive(Args, Debug)]
struct OutputSize {
    /// Output width in pixels.
    #[arg(long, default_value_t = 960)]
    width: u32,

    /// Output height in pixels.
    #[arg(long, default_value_t = 960)]
    height: u32,
}

#[derive(Parser, Debug)]
struct FrameArgs {
    #[command(flatten)]
    input: InputArgs,

    #[command(flatten)]
    size: OutputSize,

    /// Playhead in seconds.
    #[arg(long, default_value_t = 0.0)]
    time: f64,

    /// Treat playback as running (enables idle motion).
    #[arg(long, default_value_t = false)]
    playing: bool,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,
}

#[derive(Parser, Debug)]
struct RenderArgs {
    #[command(flatten)]
    input: InputArgs,

    #[command(flatten)]
    size: OutputSize,

    /// Output directory.
    #[arg(long)]
    out_dir: PathBuf,

    /// First frame to export.
    #[arg(long, default_value_t = 0)]
    start: u64,

    /// Frame to stop before; defaults to the end of the timeline.
    #[arg(long)]
    end: Option<u64>,

    /// Override rayon worker threads for frame evaluation.
    #[arg(long)]
    threads: Option<usize>,
}

#[derive(Parser, Debug)]
struct TimelineArgs {
    /// Settings JSON; defaults apply when omitted.
    #[arg(long)]
    settings: Option<PathBuf>,

    /// Number of images on the timeline.
    #[arg(long)]
    images: usize,

    /// Playhead in seconds.
    #[arg(long)]
    time: f64,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Frame(args) => cmd_frame(args),
        Command::Render(args) => cmd_render(args),
        Command::Timeline(args) => cmd_timeline(args),
    }
}

fn load_settings(path: Option<&Path>) -> anyhow::Result<pixmorph::Settings> {
    let settings = match path {
        Some(p) => pixmorph::Settings::from_path(p)?,
        None => pixmorph::Settings::default(),
    };
    settings.validate()?;
    Ok(settings)
}

fn load_driver(input: &InputArgs) -> anyhow::Result<pixmorph::FrameDriver> {
    let settings = load_settings(input.settings.as_deref())?;
    let mut library = pixmorph::AssetLibrary::new(settings.sampler_opts());
    // Ids carry the position so a file listed twice stays on the timeline twice.
    for (i, path) in input.images.iter().enumerate() {
        let bytes =
            std::fs::read(path).with_context(|| format!("read image '{}'", path.display()))?;
        library.add(pixmorph::AssetSource::new(
            format!("{i}:{}", path.display()),
            bytes,
        ));
    }
    library.sample_pending_blocking();

    let mut driver = pixmorph::FrameDriver::new(settings)?;
    driver.sync_library(&library);
    if driver.images().is_empty() {
        anyhow::bail!("none of the {} input images could be decoded", input.images.len());
    }
    Ok(driver)
}

fn cmd_frame(args: FrameArgs) -> anyhow::Result<()> {
    let mut driver = load_driver(&args.input)?;
    let raster =
        pixmorph::RasterOpts::from_settings(driver.settings(), args.size.width, args.size.height)?;

    driver.seek(args.time);
    if args.playing {
        driver.play();
    }
    let time = driver.time();
    let frame = driver.render_current()?;
    let rgba = pixmorph::rasterize(frame, time, &raster)?;

    if let Some(parent) = args.out.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    pixmorph::encode::png::write_png(&args.out, &rgba)?;

    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_render(args: RenderArgs) -> anyhow::Result<()> {
    let driver = load_driver(&args.input)?;
    let raster =
        pixmorph::RasterOpts::from_settings(driver.settings(), args.size.width, args.size.height)?;
    let mut driver = driver.with_threading(pixmorph::EvalThreading::default(), args.threads)?;

    let mut sink = pixmorph::PngSequenceSink::new(pixmorph::PngSequenceOpts {
        dir: args.out_dir.clone(),
        prefix: "frame".to_string(),
        raster,
    });
    let range = pixmorph::ExportRange {
        start: args.start,
        end: args.end,
    };
    let stats = pixmorph::render_sequence(&mut driver, &mut sink, range)?;

    eprintln!(
        "wrote {} frames to {}",
        stats.frames_rendered,
        args.out_dir.display()
    );
    Ok(())
}

fn cmd_timeline(args: TimelineArgs) -> anyhow::Result<()> {
    let settings = load_settings(args.settings.as_deref())?;
    let state = pixmorph::TimelineState {
        duration: settings.duration,
        current_time: args.time,
        image_count: args.images,
    };
    let pos = state.position();
    let out = serde_json::json!({
        "current": pos.current,
        "next": pos.next,
        "progress": pos.progress,
        "eased": settings.easing.apply(pos.progress),
        "transition_duration": state.transition_duration(),
    });
    println!("{}", serde_json::to_string_pretty(&out)?);
    Ok(())
}
