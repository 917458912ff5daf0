// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! oemtunneld: announces telephony UI readiness to the vendor radio stack.
//!
//! Bridges two services: the vendor OEM hook socket and ofono on the system
//! bus. Once connected, registered and watching an unlocked SIM, it sends
//! the readiness record; every lost precondition re-arms the announcement.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use oemtunnel_core::Event;
use oemtunnel_daemon::adapters::{
    spawn_appearance_watcher, watch_bus, BusAdapter, OfonoBus, SocketHookAdapter,
};
use oemtunnel_daemon::engine::{Runtime, RuntimeConfig};
use oemtunnel_daemon::env::{DEFAULT_DEVICE, DEFAULT_INTERFACE};
use oemtunnel_daemon::exit::{ExitError, EXIT_ERROR, EXIT_NOT_FOUND, EXIT_OK};
use tokio::signal::unix::{signal, SignalKind};
use tokio::sync::mpsc;
use tracing::{debug, error, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "oemtunneld", version, about = "Vendor radio readiness bridge")]
struct Cli {
    /// Hook service socket path
    #[arg(long, default_value = DEFAULT_DEVICE)]
    device: PathBuf,

    /// Hook interface name; callback endpoint names derive from it
    #[arg(long, default_value = DEFAULT_INTERFACE)]
    interface: String,

    /// SIM slot to monitor, zero-based
    #[arg(long, default_value_t = 0)]
    slot: u32,

    /// Increase log verbosity (-v: debug, -vv: trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    match run(cli) {
        Ok(()) => ExitCode::from(EXIT_OK),
        Err(e) => {
            error!("{e}");
            ExitCode::from(e.code)
        }
    }
}

fn init_tracing(verbose: u8) {
    let default = match verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt().with_env_filter(filter).with_writer(std::io::stderr).init();
}

#[tokio::main(flavor = "current_thread")]
async fn run(cli: Cli) -> Result<(), ExitError> {
    // No system bus means nothing to bridge; this is the only fatal setup
    // error besides an unwatchable socket directory.
    let bus = OfonoBus::system()
        .await
        .map_err(|e| ExitError::new(EXIT_ERROR, format!("system bus unavailable: {e}")))?;

    // Fail fast on a slot that cannot exist right now. When ofono is not up
    // yet the check is deferred to the appearance event.
    let bus_present = bus.service_present().await.unwrap_or(false);
    if bus_present {
        match bus.modem_paths().await {
            Ok(paths) if (cli.slot as usize) >= paths.len() => {
                return Err(ExitError::new(
                    EXIT_NOT_FOUND,
                    format!("slot {} not available, {} modem(s) present", cli.slot, paths.len()),
                ));
            }
            Ok(_) => {}
            Err(e) => debug!(error = %e, "modem enumeration failed, continuing"),
        }
    }

    let (event_tx, mut event_rx) = mpsc::channel::<Event>(64);

    let watcher = spawn_appearance_watcher(&cli.device, event_tx.clone()).map_err(|e| {
        ExitError::new(EXIT_ERROR, format!("cannot watch {}: {e}", cli.device.display()))
    })?;
    let bus_task = tokio::spawn(watch_bus(bus.connection().clone(), event_tx.clone()));

    let hook = SocketHookAdapter::new(cli.device.clone(), event_tx.clone());
    let config = RuntimeConfig {
        resp_iface: format!("{}Response", cli.interface),
        ind_iface: format!("{}Indication", cli.interface),
        slot: cli.slot,
    };
    let mut runtime = Runtime::new(hook, bus, config);

    runtime.start().await;
    if bus_present {
        runtime.handle_event(Event::BusAppeared).await;
    }
    // initial connect attempt; NotFound leaves us waiting for the watcher
    runtime.handle_event(Event::ServiceAppeared).await;

    let mut sigint = signal(SignalKind::interrupt())
        .map_err(|e| ExitError::new(EXIT_ERROR, format!("signal handler: {e}")))?;
    let mut sigterm = signal(SignalKind::terminate())
        .map_err(|e| ExitError::new(EXIT_ERROR, format!("signal handler: {e}")))?;

    info!(device = %cli.device.display(), slot = cli.slot, "oemtunneld running");
    loop {
        tokio::select! {
            _ = sigint.recv() => {
                info!("SIGINT received, shutting down");
                break;
            }
            _ = sigterm.recv() => {
                info!("SIGTERM received, shutting down");
                break;
            }
            event = event_rx.recv() => {
                let Some(event) = event else { break };
                runtime.handle_event(event).await;
            }
        }
    }

    runtime.shutdown().await;
    bus_task.abort();
    drop(watcher);
    Ok(())
}
