use std::{
    io::Write as _,
    path::{Path, PathBuf},
    time::Duration,
};

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "xrouter-hero", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Write the landing page HTML document.
    Page(PageArgs),
    /// Render a single frame as PNG or SVG (chosen by the output extension).
    Frame(FrameArgs),
    /// Render a PNG sequence.
    Frames(FramesArgs),
    /// Print the evaluated hero state at a point in time as JSON.
    Eval(EvalArgs),
}

#[derive(Args, Debug)]
struct ConfigArg {
    /// Hero configuration JSON. Defaults apply to missing fields.
    #[arg(long)]
    config: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct PageArgs {
    #[command(flatten)]
    cfg: ConfigArg,

    /// Output HTML path.
    #[arg(long)]
    out: PathBuf,
}

#[derive(Args, Debug)]
struct FrameArgs {
    #[command(flatten)]
    cfg: ConfigArg,

    /// Seconds since mount.
    #[arg(long, default_value_t = 0.0)]
    time: f64,

    /// Output path (.png or .svg).
    #[arg(long)]
    out: PathBuf,
}

#[derive(Args, Debug)]
struct FramesArgs {
    #[command(flatten)]
    cfg: ConfigArg,

    /// First frame index (0-based).
    #[arg(long, default_value_t = 0)]
    from: u64,

    /// Number of frames.
    #[arg(long)]
    count: u64,

    /// Output directory for `frame_NNNNN.png` files.
    #[arg(long)]
    out_dir: PathBuf,
}

#[derive(Args, Debug)]
struct EvalArgs {
    #[command(flatten)]
    cfg: ConfigArg,

    /// Seconds since mount.
    #[arg(long, default_value_t = 0.0)]
    time: f64,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Page(args) => cmd_page(args),
        Command::Frame(args) => cmd_frame(args),
        Command::Frames(args) => cmd_frames(args),
        Command::Eval(args) => cmd_eval(args),
    }
}

fn load_config(arg: &ConfigArg) -> anyhow::Result<xrouter_hero::HeroConfig> {
    match &arg.config {
        Some(path) => xrouter_hero::HeroConfig::from_json_path(path)
            .with_context(|| format!("load config '{}'", path.display())),
        None => Ok(xrouter_hero::HeroConfig::default()),
    }
}

fn secs(time: f64) -> anyhow::Result<Duration> {
    anyhow::ensure!(
        time.is_finite() && time >= 0.0,
        "time must be a finite, non-negative number of seconds"
    );
    Duration::try_from_secs_f64(time).context("time out of range")
}

fn cmd_page(args: PageArgs) -> anyhow::Result<()> {
    let cfg = load_config(&args.cfg)?;
    xrouter_hero::write_document(&cfg, &args.out)?;
    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_frame(args: FrameArgs) -> anyhow::Result<()> {
    let cfg = load_config(&args.cfg)?;
    let hero = xrouter_hero::evaluate_at(&cfg, secs(args.time)?)?;
    let svg = xrouter_hero::render_frame_svg(&hero, &cfg);

    let is_svg = args
        .out
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("svg"));
    if is_svg {
        write_text(&args.out, &svg)?;
    } else {
        let raster = xrouter_hero::Rasterizer::with_system_fonts();
        let frame = raster.rasterize(&svg, cfg.canvas)?;
        xrouter_hero::write_png(&frame, &args.out)?;
    }

    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_frames(args: FramesArgs) -> anyhow::Result<()> {
    let cfg = load_config(&args.cfg)?;
    let scheduler = xrouter_hero::Scheduler::new();
    let scene = xrouter_hero::HeroScene::mount(cfg.clone(), &scheduler)?;
    let raster = xrouter_hero::Rasterizer::with_system_fonts();

    std::fs::create_dir_all(&args.out_dir)
        .with_context(|| format!("create output dir '{}'", args.out_dir.display()))?;

    for f in args.from..args.from.saturating_add(args.count) {
        let now = cfg.fps.frame_time(xrouter_hero::FrameIndex(f))?;
        scheduler.advance_to(now);
        let hero = scene.evaluate(now);
        let svg = xrouter_hero::render_frame_svg(&hero, &cfg);
        let frame = raster
            .rasterize(&svg, cfg.canvas)
            .with_context(|| format!("rasterize frame {f}"))?;
        let out = args.out_dir.join(format!("frame_{f:05}.png"));
        xrouter_hero::write_png(&frame, &out)?;
        tracing::debug!(frame = f, path = %out.display(), "frame written");
    }
    scene.unmount();

    eprintln!("wrote {} frames to {}", args.count, args.out_dir.display());
    Ok(())
}

fn cmd_eval(args: EvalArgs) -> anyhow::Result<()> {
    let cfg = load_config(&args.cfg)?;
    let hero = xrouter_hero::evaluate_at(&cfg, secs(args.time)?)?;
    let mut stdout = std::io::stdout().lock();
    serde_json::to_writer_pretty(&mut stdout, &hero).context("serialize evaluated hero")?;
    writeln!(stdout)?;
    Ok(())
}

fn write_text(path: &Path, text: &str) -> anyhow::Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    std::fs::write(path, text).with_context(|| format!("write '{}'", path.display()))
}
