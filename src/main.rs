use color_eyre::{eyre::eyre, Result};
use padshim::clock::{Clock, InstantTicks};
use padshim::config::ShimConfig;
use padshim::console::{CommandQueue, TracingConsole};
use padshim::controller::PadSource;
use padshim::input::InputSystem;
use padshim::main_loop::MainLoop;
use padshim::platform;
use tracing::{debug, error, info, Level};
use tracing_subscriber::FmtSubscriber;

const STATS_INTERVAL_SECS: f64 = 10.0;

#[tokio::main]
async fn main() -> Result<()> {
    setup()?;

    let config = ShimConfig::load_default().map_err(|e| eyre!("Failed to load config: {}", e))?;
    info!("Configuration loaded: {:?}", config);

    let (commands, mut command_rx) = CommandQueue::channel(config.commands.queue_capacity);

    // The engine's command interpreter lives on the async side
    let _interpreter = tokio::spawn(async move {
        while let Some(command) = command_rx.recv().await {
            info!("Executing command: {}", command);
        }
        debug!("Command channel closed");
    });

    // The frame loop never yields, so it gets a blocking thread of its own
    let host = tokio::task::spawn_blocking(move || {
        run_host(config, commands);
    });

    let exit_code = tokio::select! {
        signal = tokio::signal::ctrl_c() => {
            signal?;
            info!("Exit requested by platform");
            0
        }
        joined = host => {
            error!("Host thread stopped unexpectedly: {:?}", joined);
            1
        }
    };
    std::process::exit(exit_code)
}

fn setup() -> Result<()> {
    if std::env::var("RUST_LIB_BACKTRACE").is_err() {
        std::env::set_var("RUST_LIB_BACKTRACE", "0")
    }
    color_eyre::install()?;
    if std::env::var("RUST_LOG").is_err() {
        std::env::set_var("RUST_LOG", "info")
    }
    setup_logging_env();
    Ok(())
}

fn setup_logging_env() {
    FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .with_target(false)
        .with_thread_ids(true)
        .with_file(true)
        .with_line_number(true)
        .pretty()
        .init();
}

fn run_host(config: ShimConfig, mut commands: CommandQueue) -> ! {
    let clock = match Clock::create(InstantTicks::new()).initialize() {
        Ok(clock) => clock,
        Err(e) => platform::fatal(&e.to_string()),
    };
    let bindings = match config.command_bindings() {
        Ok(bindings) => bindings,
        Err(e) => platform::fatal(&e.to_string()),
    };

    let mut console = TracingConsole;
    let mut input = InputSystem::new(
        pad_source(),
        config.movement_settings(),
        bindings,
        &mut console,
    );
    for device in input.enumerate_devices() {
        info!("  [{}] {} ({})", device.id, device.name, device.kind);
    }

    let mut frames: u64 = 0;
    let mut since_report = 0.0;

    MainLoop::new(clock).run(move |delta: f64| {
        let movement = input.tick(&mut console, &mut commands);
        if !movement.is_idle() {
            debug!("Movement: {:?}", movement);
        }

        frames += 1;
        since_report += delta;
        if since_report >= STATS_INTERVAL_SECS {
            info!(
                "Main loop stats: {} frames in last {:.1} seconds (avg {:.0}/sec), {} pads connected",
                frames,
                since_report,
                frames as f64 / since_report,
                input.poller().connected_count()
            );
            frames = 0;
            since_report = 0.0;
        }
    })
}

#[cfg(feature = "gilrs")]
fn pad_source() -> Box<dyn PadSource> {
    use padshim::controller::gilrs_source::GilrsSource;
    use padshim::controller::NullSource;

    match GilrsSource::new() {
        Ok(source) => Box::new(source),
        Err(e) => {
            tracing::warn!("{}, continuing without controllers", e);
            Box::new(NullSource)
        }
    }
}

#[cfg(not(feature = "gilrs"))]
fn pad_source() -> Box<dyn PadSource> {
    info!("Built without gilrs, no controller backend available");
    Box::new(padshim::controller::NullSource)
}
