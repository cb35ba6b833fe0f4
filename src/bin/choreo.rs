use std::{
    collections::BTreeMap,
    io::Write as _,
    path::{Path, PathBuf},
};

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use serde::Serialize;

#[derive(Parser, Debug)]
#[command(name = "choreo", version)]
struct Cli {
    /// Log at DEBUG level on stderr.
    #[arg(long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Mount a page, scroll it and print the resolved target states as JSON.
    Simulate(SimulateArgs),
    /// Rasterize text into a glyph point cloud.
    Rasterize(RasterizeArgs),
    /// Run a swarm formation and print its phase at sample times.
    Swarm(SwarmArgs),
}

#[derive(Parser, Debug)]
struct SimulateArgs {
    /// Input page JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Engine config JSON (defaults when omitted).
    #[arg(long)]
    config: Option<PathBuf>,

    /// Viewport width in pixels.
    #[arg(long, default_value_t = 1440.0)]
    width: f64,

    /// Viewport height in pixels.
    #[arg(long, default_value_t = 900.0)]
    height: f64,

    /// Scroll offsets to visit, in order.
    #[arg(long, value_delimiter = ',', required = true)]
    scroll: Vec<f64>,

    /// Wall-clock time spent at each offset before sampling.
    #[arg(long, default_value_t = 2000.0)]
    settle_ms: f64,

    /// Frame interval.
    #[arg(long, default_value_t = 16.0)]
    frame_ms: f64,
}

#[derive(Parser, Debug)]
struct RasterizeArgs {
    /// Text to rasterize.
    #[arg(long)]
    text: String,

    #[arg(long, default_value_t = 800)]
    width: u32,

    #[arg(long, default_value_t = 400)]
    height: u32,

    /// Jitter seed.
    #[arg(long, default_value_t = 1)]
    seed: u64,

    /// Skip system fonts and draw with the built-in block font.
    #[arg(long)]
    block_font: bool,

    /// Write the sampled points as a grayscale PNG.
    #[arg(long)]
    png: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct SwarmArgs {
    /// Text to form.
    #[arg(long)]
    text: String,

    #[arg(long, default_value_t = 1440.0)]
    width: f64,

    #[arg(long, default_value_t = 900.0)]
    height: f64,

    /// Engine config JSON (defaults when omitted).
    #[arg(long)]
    config: Option<PathBuf>,

    /// Skip system fonts and draw with the built-in block font.
    #[arg(long)]
    block_font: bool,

    /// Sample times in milliseconds after the trigger.
    #[arg(long, value_delimiter = ',', default_value = "0,300,1200,3000,4400")]
    at: Vec<f64>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    match cli.cmd {
        Command::Simulate(args) => cmd_simulate(args),
        Command::Rasterize(args) => cmd_rasterize(args),
        Command::Swarm(args) => cmd_swarm(args),
    }
}

fn init_tracing(verbose: bool) {
    let level = if verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::WARN
    };
    let _ = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .try_init();
}

fn read_config(path: Option<&Path>) -> anyhow::Result<choreo::EngineConfig> {
    let cfg = match path {
        Some(p) => choreo::EngineConfig::from_path(p)?,
        None => choreo::EngineConfig::default(),
    };
    cfg.validate().context("validate engine config")?;
    Ok(cfg)
}

#[derive(Serialize)]
struct SimulateSample {
    scroll: f64,
    progress: BTreeMap<choreo::SectionId, Option<f64>>,
    pins: BTreeMap<choreo::SectionId, choreo::PinState>,
    targets: BTreeMap<choreo::TargetId, choreo::VisualState>,
}

#[derive(Serialize)]
struct SimulateReport {
    viewport: choreo::Viewport,
    class: choreo::DeviceClass,
    samples: Vec<SimulateSample>,
}

fn cmd_simulate(args: SimulateArgs) -> anyhow::Result<()> {
    let cfg = read_config(args.config.as_deref())?;
    let page = choreo::Page::from_path(&args.in_path)?;
    let sections = page
        .sections(&cfg)
        .with_context(|| format!("build page '{}'", args.in_path.display()))?;
    if args.frame_ms.is_nan() || args.frame_ms <= 0.0 {
        anyhow::bail!("--frame-ms must be > 0");
    }

    let viewport = choreo::Viewport::new(args.width, args.height)?;
    let mut host = choreo::MemoryHost::new();
    host.attach(cfg.theme.target.clone());
    for s in &sections {
        for t in s.targets() {
            host.attach(t);
        }
    }

    let mut stage = choreo::Stage::new(cfg, viewport)?;
    let mut now = choreo::TimeMs(0.0);
    let mut disposers = Vec::with_capacity(sections.len());
    for s in sections {
        let id = s.id().clone();
        let d = stage
            .mount(s, now, &mut host)
            .with_context(|| format!("mount section '{id}'"))?;
        disposers.push(d);
    }

    let ids: Vec<choreo::SectionId> = stage.mounted_sections().cloned().collect();
    let mut samples = Vec::with_capacity(args.scroll.len());
    for &scroll in &args.scroll {
        stage.on_scroll(scroll, now);
        let until = now.after(args.settle_ms.max(0.0));
        loop {
            stage.frame(now, &mut host);
            if now.0 >= until.0 {
                break;
            }
            now = now.after(args.frame_ms);
        }
        samples.push(SimulateSample {
            scroll,
            progress: ids.iter().map(|id| (id.clone(), stage.progress(id))).collect(),
            pins: ids
                .iter()
                .filter_map(|id| stage.pin_state(id).map(|p| (id.clone(), p)))
                .collect(),
            targets: host.snapshot().clone(),
        });
    }

    let report = SimulateReport {
        viewport,
        class: stage.device_class(),
        samples,
    };
    for mut d in disposers {
        d.dispose(&mut stage, choreo::Teardown::Keep, &mut host);
    }

    let mut out = std::io::stdout().lock();
    serde_json::to_writer_pretty(&mut out, &report).context("write simulation JSON")?;
    writeln!(out)?;
    Ok(())
}

fn cmd_rasterize(args: RasterizeArgs) -> anyhow::Result<()> {
    let params = choreo::RasterParams::default();
    let rasterizer = if args.block_font {
        choreo::GlyphRasterizer::block_only(params)
    } else {
        choreo::GlyphRasterizer::new(params)
    };
    let mut rng = choreo::Rng64::new(args.seed);
    let points = rasterizer.rasterize(
        &args.text,
        f64::from(args.width),
        f64::from(args.height),
        &mut rng,
    );
    println!("{} points", points.len());

    if let Some(path) = args.png {
        let (w, h) = (args.width as usize, args.height as usize);
        let mut buf = vec![0u8; w * h];
        for p in &points {
            let (x, y) = (p.x.round(), p.y.round());
            if x >= 0.0 && y >= 0.0 && (x as usize) < w && (y as usize) < h {
                buf[y as usize * w + x as usize] = 255;
            }
        }
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("create output dir '{}'", parent.display()))?;
        }
        image::save_buffer_with_format(
            &path,
            &buf,
            args.width,
            args.height,
            image::ColorType::L8,
            image::ImageFormat::Png,
        )
        .with_context(|| format!("write png '{}'", path.display()))?;
        eprintln!("wrote {}", path.display());
    }
    Ok(())
}

#[derive(Serialize)]
struct SwarmSample {
    at_ms: f64,
    phase: choreo::SwarmPhase,
    particles: usize,
    visible: usize,
}

fn cmd_swarm(args: SwarmArgs) -> anyhow::Result<()> {
    let cfg = read_config(args.config.as_deref())?;
    let rasterizer = if args.block_font {
        choreo::GlyphRasterizer::block_only(cfg.raster)
    } else {
        choreo::GlyphRasterizer::new(cfg.raster)
    };
    let viewport = choreo::Viewport::new(args.width, args.height)?;
    let origin = choreo::Point::new(viewport.width / 2.0, viewport.height / 2.0);

    let mut swarm = choreo::SwarmController::new(rasterizer, cfg.swarm);
    let start = choreo::TimeMs(0.0);
    let n = swarm.trigger_formation(origin, &args.text, viewport, start);
    eprintln!("formed '{}' from {n} particles", args.text);

    let mut at = args.at;
    at.sort_by(f64::total_cmp);
    let mut out = std::io::stdout().lock();
    for ms in at {
        let now = start.after(ms);
        let phase = swarm.tick(now);
        let samples = swarm.sample(now);
        let line = SwarmSample {
            at_ms: ms,
            phase,
            particles: samples.len(),
            visible: samples.iter().filter(|s| s.opacity > 0.0).count(),
        };
        serde_json::to_writer(&mut out, &line).context("write swarm sample")?;
        writeln!(out)?;
    }
    Ok(())
}
