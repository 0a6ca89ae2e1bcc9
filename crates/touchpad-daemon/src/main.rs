//! Touchscreen controller daemon entry point.
//!
//! Loads the configuration, creates the key emulator, and runs the record
//! pipeline on a dedicated thread until the stream ends, a fatal error occurs,
//! or Ctrl-C is received.
//!
//! # Architecture
//!
//! ```text
//! main()
//!  └─ load_config()               -- TOML, CLI overrides
//!  └─ build_emulator()            -- uinput, or recording for --dry-run
//!  └─ "touch-pipeline" thread
//!       └─ DeviceReader ─► TouchPipeline::run()   (blocking reads)
//!  └─ select! { ctrl_c, pipeline finished }
//!  └─ wait up to SHUTDOWN_GRACE for the pipeline after Ctrl-C
//!  └─ release_all()               -- best-effort release of held keys
//! ```
//!
//! The pipeline blocks in `read(2)` while the screen is idle, so it runs on a
//! plain OS thread.  On Ctrl-C the main task clears the running flag and gives
//! the thread `SHUTDOWN_GRACE` to finish its current pass, so `release_all`
//! does not interleave with a press.  A thread still blocked in `read` after
//! that cannot press anything: it drops whatever record it reads once the flag
//! is cleared.  Any key still down when the process exits is released by the
//! kernel when the uinput device is destroyed.

use std::path::{Path, PathBuf};
use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};
use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use tokio::sync::oneshot;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;
use touchpad_core::{GeometryTable, RecordLayout};

use touchpad_daemon::application::process_events::{RunSummary, TouchPipeline};
use touchpad_daemon::application::translate_keys::{
    release_all, KeyActionTranslator, KeyEmulator, SlidePolicy,
};
use touchpad_daemon::infrastructure::device::DeviceReader;
use touchpad_daemon::infrastructure::input_emulation::mock::MockKeyEmulator;
use touchpad_daemon::infrastructure::storage::config::{
    config_file_path, load_config, load_config_from, save_config_to, AppConfig,
};

/// How long to wait after Ctrl-C for the pipeline thread to finish a pass.
const SHUTDOWN_GRACE: Duration = Duration::from_millis(250);

#[derive(Debug, Parser)]
#[command(
    name = "touchpad-daemon",
    version,
    about = "Maps touchscreen button regions to key presses"
)]
struct Cli {
    /// Config file (default: $XDG_CONFIG_HOME/touchpad/config.toml)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Event device to read, overriding `device.path`
    #[arg(short, long)]
    device: Option<PathBuf>,

    /// Log key actions instead of creating a uinput keyboard
    #[arg(long)]
    dry_run: bool,

    /// Write a config file with the built-in button layout and exit
    #[arg(long)]
    init_config: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => load_config_from(path),
        None => load_config(),
    }
    .context("failed to load configuration")?;

    // Initialise structured logging.  Level is overridden by `RUST_LOG`.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.log.level)),
        )
        .init();

    if cli.init_config {
        let path = match cli.config {
            Some(path) => path,
            None => config_file_path()?,
        };
        save_config_to(&path, &AppConfig::with_builtin_buttons())?;
        info!("wrote default configuration to {}", path.display());
        return Ok(());
    }

    info!("touchpad daemon starting");

    let table = config.geometry_table()?;
    let emulator = build_emulator(&table, cli.dry_run)?;
    let device = cli.device.unwrap_or_else(|| config.device.path.clone());
    let layout = config.device.layout;
    let policy = config.translator.slide_policy;

    info!(
        buttons = table.len(),
        ?layout,
        ?policy,
        dry_run = cli.dry_run,
        "reading {}",
        device.display()
    );

    // Shutdown flag checked by the pipeline between records.
    let running = Arc::new(AtomicBool::new(true));

    // ── Pipeline thread ───────────────────────────────────────────────────────
    let (done_tx, mut done_rx) = oneshot::channel();
    {
        let running = Arc::clone(&running);
        let emulator = Arc::clone(&emulator);
        let table = table.clone();
        std::thread::Builder::new()
            .name("touch-pipeline".into())
            .spawn(move || {
                let result = run_pipeline(&device, layout, table, emulator, policy, &running);
                let _ = done_tx.send(result);
            })
            .context("failed to spawn pipeline thread")?;
    }

    // ── Wait for Ctrl-C or pipeline exit ──────────────────────────────────────
    let finished = tokio::select! {
        signal = tokio::signal::ctrl_c() => {
            if let Err(e) = signal {
                warn!("failed to listen for Ctrl-C: {e}");
            }
            info!("shutdown signal received");
            running.store(false, Ordering::Relaxed);
            match tokio::time::timeout(SHUTDOWN_GRACE, &mut done_rx).await {
                Ok(finished) => Some(finished),
                Err(_) => {
                    info!("pipeline still blocked on read; releasing keys without it");
                    None
                }
            }
        }
        finished = &mut done_rx => Some(finished),
    };

    let outcome: anyhow::Result<()> = match finished {
        Some(Ok(Ok(summary))) => {
            info!(
                records = summary.records,
                presses = summary.presses,
                releases = summary.releases,
                "pipeline finished"
            );
            Ok(())
        }
        Some(Ok(Err(e))) => Err(e),
        Some(Err(_)) => Err(anyhow::anyhow!("pipeline thread exited without a result")),
        None => Ok(()),
    };

    // ── Best-effort release of held keys ──────────────────────────────────────
    let (released, errors) = release_all(emulator.as_ref(), &table);
    if !released.is_empty() {
        info!(?released, "released held keys on shutdown");
    }
    for e in errors {
        warn!("failed to release key on shutdown: {e}");
    }

    if let Err(e) = &outcome {
        error!("{e:#}");
    }
    info!("touchpad daemon stopped");
    outcome
}

fn run_pipeline(
    device: &Path,
    layout: RecordLayout,
    table: GeometryTable,
    emulator: Arc<dyn KeyEmulator>,
    policy: SlidePolicy,
    running: &AtomicBool,
) -> anyhow::Result<RunSummary> {
    let mut reader = DeviceReader::open(device, layout)
        .with_context(|| format!("failed to open {}", device.display()))?;
    info!("opened {}", device.display());

    let translator = KeyActionTranslator::new(table, emulator, policy);
    let mut pipeline = TouchPipeline::new(translator);
    Ok(pipeline.run(&mut reader, running)?)
}

fn build_emulator(table: &GeometryTable, dry_run: bool) -> anyhow::Result<Arc<dyn KeyEmulator>> {
    if dry_run {
        return Ok(Arc::new(MockKeyEmulator::dry_run()));
    }

    #[cfg(target_os = "linux")]
    {
        use touchpad_daemon::infrastructure::input_emulation::linux::LinuxUinputEmulator;
        let emulator = LinuxUinputEmulator::new(table).context("failed to create uinput keyboard")?;
        Ok(Arc::new(emulator))
    }

    #[cfg(not(target_os = "linux"))]
    {
        let _ = table;
        anyhow::bail!("key emulation needs Linux uinput; run with --dry-run")
    }
}
