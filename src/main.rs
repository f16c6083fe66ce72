//! Headless demo: drives the tree scene from a scripted gesture session
//! and logs what a renderer and audio host would receive.

use std::io::Write;
use std::path::PathBuf;

use clap::Parser;
use grove::engine::command::Notification;
use grove::gesture::{
    GestureController, GestureScript, ScriptedCamera, ScriptedClassifier,
};
use grove::util::frame_timing::FrameTiming;
use grove::{GroveError, Options, TreeEngine};

/// Camera frame rate of the scripted session.
const CAMERA_FPS: u32 = 30;

#[derive(Parser, Debug)]
#[command(name = "grove", about = "Gesture-driven tree scene, headless")]
struct Args {
    /// Options preset (TOML). Defaults are used when omitted.
    #[arg(long)]
    options: Option<PathBuf>,

    /// Gesture script (TOML). A built-in demo script is used when omitted.
    #[arg(long)]
    script: Option<PathBuf>,

    /// Seconds to run; defaults to the end of the script plus one second.
    #[arg(long)]
    seconds: Option<f32>,

    /// Display frame rate.
    #[arg(long, default_value_t = 60)]
    fps: u32,

    /// Seed for entity placement.
    #[arg(long)]
    seed: Option<u64>,

    /// Print the options JSON schema and exit.
    #[arg(long)]
    print_schema: bool,
}

fn main() {
    env_logger::init();
    let args = Args::parse();
    if let Err(e) = run(&args) {
        log::error!("{e}");
        std::process::exit(1);
    }
}

fn run(args: &Args) -> Result<(), GroveError> {
    if args.print_schema {
        let schema = serde_json::to_string_pretty(&Options::json_schema())
            .map_err(|e| GroveError::OptionsParse(e.to_string()))?;
        let mut out = std::io::stdout().lock();
        return writeln!(out, "{schema}").map_err(GroveError::Io);
    }

    let mut options = match &args.options {
        Some(path) => Options::load(path)?,
        None => Options::default(),
    };
    if args.seed.is_some() {
        options.formation.seed = args.seed;
    }
    let script = match &args.script {
        Some(path) => GestureScript::load(path)?,
        None => GestureScript::demo(),
    };
    let run_ms = args
        .seconds
        .map_or(script.end_ms() + 1000, |s| (s.max(0.0) * 1000.0) as u64);

    let mut engine = TreeEngine::new(options);
    let controller = GestureController::start(
        engine.options().gesture.clone(),
        engine.options().gallery.page_count,
        ScriptedCamera::new(CAMERA_FPS, Some(run_ms), true),
        move |max_hands| Ok(ScriptedClassifier::new(script, max_hands)),
    )?;
    engine.attach_controller(controller);

    let mut timing = FrameTiming::new(args.fps);
    let mut frames = 0_u64;
    while engine.clock_ms() < run_ms {
        std::thread::sleep(timing.time_until_next_frame());
        engine.update(timing.end_frame());
        let geometry = engine.frame_geometry();
        frames += 1;

        for note in engine.drain_notifications() {
            match note {
                Notification::TriggerSound => log::info!("play trigger sound"),
                Notification::Status(status) => log::info!("status: {status}"),
                Notification::ThemeChanged(index) => {
                    log::info!("theme {index}: {}", engine.theme().name);
                }
                Notification::SnowChanged(on) => log::info!("snow: {on}"),
                Notification::FireworksChanged(on) => {
                    log::info!("fireworks: {on}");
                }
            }
        }
        if frames % u64::from(args.fps.max(1)) == 0 {
            log::debug!(
                "t={:.1}s fps={:.0} instances={} progress={:.2} gallery={}",
                engine.clock_ms() as f32 / 1000.0,
                timing.fps(),
                geometry.instance_count(),
                engine.formation_progress(),
                engine.gallery().frames().len(),
            );
        }
    }

    engine.shutdown();
    log::info!("rendered {frames} frames");
    Ok(())
}
