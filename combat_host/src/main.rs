//! Standalone host binary.
//!
//! Usage:
//!   cargo run -p combat_host -- [--config tuning.json] [--script input.json | --mash SEED]
//!                               [--ticks 600] [--tick-hz 60] [--headless] [--dump]
//!
//! The host spawns one character, feeds it scripted or randomized input at a
//! fixed tick rate, and logs what the character publishes each frame.
//! `--dump` writes every frame as a JSON line to stdout.

use std::env;
use std::io::Write;
use std::path::PathBuf;

use anyhow::Context;
use combat_host::{
    masher::ButtonMasher,
    script::InputScript,
    Host, InputSource, Pacing,
};
use combat_shared::{config::ControllerConfig, movement::MovementIntegrator};
use tracing::{info, warn};

/// Command line options.
#[derive(Debug, Clone)]
struct HostArgs {
    config: Option<PathBuf>,
    script: Option<PathBuf>,
    mash_seed: Option<u64>,
    ticks: u32,
    tick_hz: u32,
    headless: bool,
    dump: bool,
}

impl Default for HostArgs {
    fn default() -> Self {
        Self {
            config: None,
            script: None,
            mash_seed: None,
            ticks: 600,
            tick_hz: 60,
            headless: false,
            dump: false,
        }
    }
}

fn parse_args() -> HostArgs {
    let mut out = HostArgs::default();
    let args: Vec<String> = env::args().collect();
    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--config" if i + 1 < args.len() => {
                out.config = Some(PathBuf::from(&args[i + 1]));
                i += 2;
            }
            "--script" if i + 1 < args.len() => {
                out.script = Some(PathBuf::from(&args[i + 1]));
                i += 2;
            }
            "--mash" if i + 1 < args.len() => {
                out.mash_seed = args[i + 1].parse().ok();
                i += 2;
            }
            "--ticks" if i + 1 < args.len() => {
                out.ticks = args[i + 1].parse().unwrap_or(600);
                i += 2;
            }
            "--tick-hz" if i + 1 < args.len() => {
                out.tick_hz = args[i + 1].parse().unwrap_or(60).max(1);
                i += 2;
            }
            "--headless" => {
                out.headless = true;
                i += 1;
            }
            "--dump" => {
                out.dump = true;
                i += 1;
            }
            other => {
                warn!(arg = %other, "Ignoring unknown argument");
                i += 1;
            }
        }
    }
    out
}

fn load_config(path: Option<&PathBuf>) -> anyhow::Result<ControllerConfig> {
    let Some(path) = path else {
        return Ok(ControllerConfig::default());
    };
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("read config {}", path.display()))?;
    ControllerConfig::from_json_str(&text).with_context(|| format!("load config {}", path.display()))
}

fn load_source(args: &HostArgs) -> anyhow::Result<InputSource> {
    if let Some(path) = &args.script {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("read script {}", path.display()))?;
        let script = InputScript::from_json_str(&text)
            .with_context(|| format!("load script {}", path.display()))?;
        info!(entries = script.len(), last_tick = ?script.last_tick(), "Input script loaded");
        return Ok(InputSource::Script(script));
    }
    if let Some(seed) = args.mash_seed {
        info!(seed, "Using button masher");
        return Ok(InputSource::Masher(ButtonMasher::new(seed)));
    }
    Ok(InputSource::Idle)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = parse_args();
    info!(ticks = args.ticks, tick_hz = args.tick_hz, headless = args.headless, "Starting host");

    let config = load_config(args.config.as_ref()).context("config")?;
    let source = load_source(&args).context("input source")?;
    let mut host = Host::new(config, source).context("create host")?;

    let pacing = if args.headless {
        Pacing::Headless
    } else {
        Pacing::RealTime
    };
    let tick_hz = args.tick_hz;
    let dump = args.dump;
    let mut stdout = std::io::stdout();

    host.run_for_ticks(args.ticks, tick_hz, pacing, |host, frame| {
        if dump {
            serde_json::to_writer(&mut stdout, frame).context("write frame")?;
            writeln!(stdout).context("write frame")?;
        }

        // Print status occasionally, with the pose a renderer would show
        // halfway to the next tick.
        if host.tick() % tick_hz == 0 {
            let render_arm = host
                .history
                .interp_camera(0.5)
                .map_or(frame.camera.arm_length, |pose| pose.arm_length);
            info!(
                tick = host.tick(),
                action = %frame.action,
                arm = frame.camera.arm_length,
                render_arm,
                speed = host.mover.velocity().len(),
                "Status"
            );
        }
        Ok(())
    })
    .await
    .context("host run")?;

    Ok(())
}
