//! pasuspend-gpio daemon entry point

use std::process::ExitCode;

use pasuspend_gpio::{
    Result,
    cli::{Backend, Cli},
    config::Config,
    gpio::{CdevV1Gpio, CdevV2Gpio, SysfsGpio},
    services::pulse::PulseConnector,
    shutdown::ShutdownController,
    supervisor::Supervisor,
    tracing_config,
};
use tracing::{error, info};

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = match Cli::parse_args(std::env::args_os()) {
        Ok(cli) => cli,
        Err(exit) => {
            eprint!("{}", exit.message);
            return exit.exit_code();
        }
    };

    let config = match Config::load_or_default(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("pasuspend-gpio: {e}");
            return ExitCode::FAILURE;
        }
    };

    if let Err(e) = tracing_config::init(&config.general, cli.quiet) {
        eprintln!("pasuspend-gpio: failed to initialize logging: {e}");
        return ExitCode::FAILURE;
    }

    match run(cli.backend, config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "Exiting");
            ExitCode::FAILURE
        }
    }
}

async fn run(backend: Backend, config: Config) -> Result<()> {
    let server = backend
        .server()
        .map(str::to_string)
        .or(config.pulse.server);
    let connector = PulseConnector::new(config.pulse.client_name, server);
    let shutdown = ShutdownController::with_signals();

    info!(sink = backend.sink(), "Starting");

    match backend {
        Backend::Sysfs { gpio, sink, .. } => {
            Supervisor::new(SysfsGpio::with_root(config.gpio.sysfs_root, gpio), sink)
                .run(connector, shutdown)
                .await
        }
        Backend::CdevV1 {
            chip, gpio, sink, ..
        } => {
            Supervisor::new(CdevV1Gpio::new(chip, gpio, config.gpio.consumer), sink)
                .run(connector, shutdown)
                .await
        }
        Backend::CdevV2 {
            chip, gpio, sink, ..
        } => {
            Supervisor::new(CdevV2Gpio::new(chip, gpio, config.gpio.consumer), sink)
                .run(connector, shutdown)
                .await
        }
    }
}
