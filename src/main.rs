//! Jay2D headless runner
//!
//! Drives the demo scene for a fixed number of frames with scripted input and
//! logs the player state, the way the debug overlay of the demo shows it.

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;

use jay2d::Settings;
use jay2d::sim::{GravityCadence, RenderItem, TickInput, World, tick};

/// Command-line options
#[derive(Debug, Parser)]
#[command(name = "jay2d", about = "Run the Jay2D physics demo without a renderer")]
struct Args {
    /// Settings file (JSON); defaults are used when omitted
    #[arg(long)]
    config: Option<PathBuf>,

    /// Number of frames to simulate
    #[arg(long, default_value_t = 600)]
    ticks: u64,

    /// Frame delta in milliseconds (overrides the settings value)
    #[arg(long)]
    frame_ms: Option<f32>,

    /// Gravity gating: `frame-modulo` or `fixed-step`
    #[arg(long, value_parser = parse_cadence)]
    cadence: Option<GravityCadence>,

    /// Hold move-left for the whole run
    #[arg(long)]
    left: bool,

    /// Hold move-right for the whole run
    #[arg(long)]
    right: bool,

    /// Hold jump for the first N frames
    #[arg(long, default_value_t = 0)]
    jump_frames: u64,

    /// Log the player state every N frames
    #[arg(long, default_value_t = 5)]
    report_every: u64,

    /// Print the final render view as JSON
    #[arg(long)]
    snapshot: bool,
}

fn parse_cadence(s: &str) -> Result<GravityCadence, String> {
    match s.to_lowercase().as_str() {
        "frame-modulo" | "frame_modulo" | "modulo" => Ok(GravityCadence::FrameModulo),
        "fixed-step" | "fixed_step" | "fixed" => Ok(GravityCadence::FixedStep),
        other => Err(format!("unknown cadence `{other}`")),
    }
}

/// Runner state: the world plus frame-rate bookkeeping
struct Runner {
    world: World,
    frame_ms: f32,
    /// Simulated time of the last 60 frames, for the FPS readout
    frame_times: [f64; 60],
    frame_index: usize,
    elapsed_ms: f64,
    fps: u32,
}

impl Runner {
    fn new(world: World, frame_ms: f32) -> Self {
        Self {
            world,
            frame_ms,
            frame_times: [0.0; 60],
            frame_index: 0,
            elapsed_ms: 0.0,
            fps: 0,
        }
    }

    fn update(&mut self, input: &TickInput) {
        tick(&mut self.world, input, self.frame_ms);
        self.elapsed_ms += f64::from(self.frame_ms);

        self.frame_times[self.frame_index] = self.elapsed_ms;
        self.frame_index = (self.frame_index + 1) % 60;
        let oldest = self.frame_times[self.frame_index];
        if oldest > 0.0 {
            let span = self.elapsed_ms - oldest;
            if span > 0.0 {
                self.fps = (59_000.0 / span).round() as u32;
            }
        }
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let args = Args::parse();
    let mut settings = match &args.config {
        Some(path) => Settings::load_from_file(path)
            .with_context(|| format!("loading settings from {}", path.display()))?,
        None => {
            log::info!("Using default settings");
            Settings::default()
        }
    };
    if let Some(frame_ms) = args.frame_ms {
        settings.frame_delta_ms = frame_ms;
    }
    if let Some(cadence) = args.cadence {
        settings.physics.cadence = cadence;
    }

    let world = World::demo(&settings).context("building demo scene")?;
    let mut runner = Runner::new(world, settings.frame_delta_ms);
    log::info!(
        "Jay2D running {} frames at {:.2} ms ({:?} gravity)",
        args.ticks,
        settings.frame_delta_ms,
        settings.physics.cadence
    );

    for frame in 0..args.ticks {
        let input = TickInput {
            move_left: args.left,
            move_right: args.right,
            jump: frame < args.jump_frames,
            pause: false,
        };
        runner.update(&input);

        if args.report_every > 0 && frame % args.report_every == 0 {
            log::info!("FPS: {} {}", runner.fps, runner.world.debug_line());
        }
    }

    log::info!("Finished: {}", runner.world.debug_line());

    if args.snapshot {
        let items: Vec<RenderItem> = runner.world.render_items().collect();
        println!("{}", serde_json::to_string_pretty(&items)?);
    }

    Ok(())
}
