//! Gesture control demo: drives the full pipeline with synthetic camera frames.

use std::thread;
use std::time::{Duration, Instant};

use anyhow::Result;
use clap::Parser;
use gesture_control::{
    admission::{Frame, FrameSink},
    app::GestureApp,
    config::{Config, EXAMPLE_CONFIG},
    cursor_control::X11Effector,
    detector::{ScriptedDetector, SyntheticImage},
    effector::{InputEffector, LogEffector},
    overlay::OverlayAction,
    synthetic::Scenario,
};
use log::{info, warn};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to configuration file (YAML format)
    #[arg(short = 'C', long)]
    config: Option<String>,

    /// Input backend (log, x11); overrides the configuration
    #[arg(short, long)]
    effector: Option<String>,

    /// Scenario to play (palm-sweep, scroll, pinch, navigate, all)
    #[arg(short, long, default_value = "all")]
    scenario: String,

    /// Synthetic camera frame rate
    #[arg(long, default_value = "30")]
    fps: f64,

    /// Simulated detector latency in milliseconds
    #[arg(long, default_value = "20")]
    latency_ms: u64,

    /// Print an example configuration file and exit
    #[arg(long)]
    print_config: bool,

    /// Enable debug output
    #[arg(short, long)]
    debug: bool,
}

fn parse_scenarios(name: &str) -> Option<Vec<Scenario>> {
    match name {
        "all" => Some(Scenario::ALL.to_vec()),
        "palm-sweep" => Some(vec![Scenario::PalmSweep]),
        "scroll" => Some(vec![Scenario::Scroll]),
        "pinch" => Some(vec![Scenario::Pinch]),
        "navigate" => Some(vec![Scenario::Navigate]),
        _ => None,
    }
}

fn create_effector(backend: &str) -> Box<dyn InputEffector> {
    match backend {
        "x11" => match X11Effector::new() {
            Ok(effector) => {
                info!("X11 input effector initialized");
                Box::new(effector)
            }
            Err(e) => {
                warn!("Failed to initialize X11 input: {}. Logging actions instead.", e);
                Box::new(LogEffector::new())
            }
        },
        _ => Box::new(LogEffector::new()),
    }
}

/// Feed one scenario into the sink at `fps`, starting at session time `start`
fn play(
    sink: &impl FrameSink<SyntheticImage>,
    scenario: Scenario,
    fps: f64,
    start: f64,
    confidence: f32,
) -> u64 {
    let interval = Duration::from_secs_f64(1.0 / fps);
    let mut frame_id: u32 = 0;
    let mut t = 0.0;
    while t < scenario.duration() {
        let id = u64::from(frame_id);
        let image = scenario.hand_at(t).map_or_else(
            || SyntheticImage::empty(id),
            |hand| SyntheticImage::with_hand(id, &hand, confidence),
        );
        sink.submit(Frame::new(image, start + t));
        frame_id = frame_id.saturating_add(1);
        t = f64::from(frame_id) / fps;
        thread::sleep(interval);
    }
    u64::from(frame_id)
}

fn main() -> Result<()> {
    // Parse command line arguments
    let args = Args::parse();

    // Initialize logger
    if args.debug {
        env_logger::init_from_env(env_logger::Env::new().default_filter_or("debug"));
    } else {
        env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));
    }

    if args.print_config {
        print!("{EXAMPLE_CONFIG}");
        return Ok(());
    }

    info!("Gesture Control - synthetic demo");

    // Load configuration if provided
    let mut config = if let Some(config_path) = &args.config {
        info!("Loading configuration from: {}", config_path);
        match Config::from_file(config_path).and_then(|cfg| cfg.validate().map(|()| cfg)) {
            Ok(cfg) => cfg,
            Err(e) => {
                warn!("Failed to load config file: {}. Using defaults.", e);
                Config::default()
            }
        }
    } else {
        Config::default()
    };
    if let Some(backend) = args.effector {
        config.effector.backend = backend;
    }

    let Some(scenarios) = parse_scenarios(&args.scenario) else {
        anyhow::bail!("Unknown scenario: {}", args.scenario);
    };
    if !(args.fps.is_finite() && args.fps > 0.0) {
        anyhow::bail!("Frame rate must be positive");
    }

    let detector = ScriptedDetector::new(config.detector.min_confidence)
        .with_latency(Duration::from_millis(args.latency_ms));
    let effector = create_effector(&config.effector.backend);
    let mut app = GestureApp::new(&config, detector, effector)?;

    let mut session_time = 0.0;

    for scenario in scenarios {
        info!("Playing {:?}", scenario);
        // Fresh session per scenario
        app.enable();

        let capture = {
            let sink = app.submitter();
            let fps = args.fps;
            let start = session_time;
            thread::spawn(move || play(&sink, scenario, fps, start, 0.9))
        };

        let started = Instant::now();
        let mut last_action = OverlayAction::Idle;
        while !capture.is_finished() {
            let state = app.snapshot();
            if state.overlay.action != last_action {
                info!(
                    "Overlay: {} at {:?}",
                    state.overlay.action.title(),
                    state.overlay.hand_point
                );
                last_action = state.overlay.action;
            }
            thread::sleep(Duration::from_millis(10));
        }

        let submitted = capture
            .join()
            .map_err(|_| anyhow::anyhow!("Capture thread panicked"))?;
        app.wait_idle(Duration::from_secs(1));
        let state = app.snapshot();
        info!(
            "{:?}: {} frames submitted, {} processed in {:.2}s",
            scenario,
            submitted,
            state.frames_processed,
            started.elapsed().as_secs_f64()
        );

        app.disable();
        session_time += scenario.duration() + 1.0;
    }

    app.shutdown();
    info!("Application shutting down");
    Ok(())
}
