use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::Context as _;
use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "framepace", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Play the streams described by a config file.
    Play(PlayArgs),
    /// Play two synthetic streams (640x480 and 320x240).
    Demo(DemoArgs),
}

#[derive(Parser, Debug)]
struct PlayArgs {
    /// Playback config JSON.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Renderer: direct, scene-graph, or optimized.
    #[arg(long)]
    renderer: Option<String>,

    /// Image-sequence directory; repeat once per stream. Replaces the config's streams.
    #[arg(long = "stream")]
    streams: Vec<PathBuf>,

    /// Pacing for `--stream` directories, in frames per second.
    #[arg(long)]
    fps: Option<f64>,

    /// Display refresh rate.
    #[arg(long)]
    refresh_hz: Option<u32>,

    /// Stop after this many display ticks.
    #[arg(long)]
    max_ticks: Option<u64>,

    /// Write the final composite as a PNG.
    #[arg(long)]
    out: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct DemoArgs {
    /// Renderer: direct, scene-graph, or optimized.
    #[arg(long)]
    renderer: String,

    /// Frames per synthetic stream.
    #[arg(long, default_value_t = 30)]
    frames: usize,

    /// Write the final composite as a PNG.
    #[arg(long)]
    out: Option<PathBuf>,
}

/// Startup failure that was already reported as an `ERROR` event.
#[derive(Debug, thiserror::Error)]
#[error("playback startup failed")]
struct AlreadyLogged;

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let result = match cli.cmd {
        Command::Play(args) => cmd_play(args),
        Command::Demo(args) => cmd_demo(args),
    };
    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) if err.is::<AlreadyLogged>() => ExitCode::FAILURE,
        Err(err) => {
            eprintln!("Error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn cmd_play(args: PlayArgs) -> anyhow::Result<()> {
    let mut config = match &args.config {
        Some(path) => framepace::PlaybackConfig::from_json_file(path)?,
        None => framepace::PlaybackConfig::default(),
    }
    .with_env_overrides();

    if args.renderer.is_some() {
        config.renderer = args.renderer;
    }
    if !args.streams.is_empty() {
        config.streams = args
            .streams
            .into_iter()
            .map(|dir| framepace::StreamSpec::ImageSequence { dir, fps: args.fps })
            .collect();
    }
    if let Some(hz) = args.refresh_hz {
        config.refresh_hz = hz;
    }
    if args.max_ticks.is_some() {
        config.max_ticks = args.max_ticks;
    }

    play(&config, args.out.as_deref())
}

fn cmd_demo(args: DemoArgs) -> anyhow::Result<()> {
    let frames = args.frames;
    let config = framepace::PlaybackConfig {
        renderer: Some(args.renderer),
        streams: vec![
            framepace::StreamSpec::TestPattern {
                width: 640,
                height: 480,
                frames,
                fps: Some(30.0),
            },
            framepace::StreamSpec::TestPattern {
                width: 320,
                height: 240,
                frames,
                fps: Some(24.0),
            },
        ],
        ..framepace::PlaybackConfig::default()
    }
    .with_env_overrides();

    play(&config, args.out.as_deref())
}

fn play(config: &framepace::PlaybackConfig, out: Option<&Path>) -> anyhow::Result<()> {
    let mut registry = framepace::SurfaceRegistry::new();
    registry.insert(
        config.surface_id.clone(),
        framepace::Surface::new(config.surface_size())?,
    );

    let launched = framepace::launch(
        config,
        &mut registry,
        Box::new(framepace::TracingStatusSink),
        || config.sources(),
    )
    .map_err(|_| AlreadyLogged)?;
    let report = launched.run()?;

    eprintln!(
        "ticks={} renders={} received={} superseded={} discarded={} draw_errors={}",
        report.display_ticks,
        report.stats.renders,
        report.frames_received,
        report.stats.frames_superseded,
        report.frames_discarded,
        report.stats.draw_errors,
    );

    if let Some(out) = out {
        write_png(out, &report.final_frame)?;
        eprintln!("wrote {}", out.display());
    }
    Ok(())
}

fn write_png(path: &Path, frame: &framepace::FrameRGBA) -> anyhow::Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    image::save_buffer_with_format(
        path,
        &frame.data,
        frame.width,
        frame.height,
        image::ColorType::Rgba8,
        image::ImageFormat::Png,
    )
    .with_context(|| format!("write png '{}'", path.display()))
}
