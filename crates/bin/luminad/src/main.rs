//! # luminad — lumina daemon
//!
//! Composition root that wires all adapters together and starts the server.
//!
//! ## Responsibilities
//! - Load configuration (config file, env vars)
//! - Initialize `tracing` with the configured filter
//! - Pick the controller adapters (RPC over the network, or in-memory on dry run)
//! - Build one decision core per configured light and spawn its event loop
//! - Install the schedule slots of every outdoor light, one controller at a time
//! - Build the axum router, bind to a TCP port and serve
//! - Handle graceful shutdown (SIGINT)
//!
//! ## Dependency rule
//! This is the **only** crate that depends on all other crates.
//! It is the wiring layer — no domain logic belongs here.

mod config;

use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use lumina_adapter_http_axum::state::AppState;
use lumina_adapter_rpc::{RpcActuator, RpcClient, RpcScheduleStore};
use lumina_adapter_virtual::{VirtualActuator, VirtualScheduleStore};
use lumina_app::decision::{IndoorCore, LightCore, OutdoorCore, RemoteCore};
use lumina_app::dispatch::SpawningDispatcher;
use lumina_app::ports::{Actuator, ScheduleStore, SystemClock};
use lumina_app::registry::LightRegistry;
use lumina_app::runtime::spawn_light;
use lumina_app::schedule_installer::ScheduleInstaller;
use lumina_app::timer_service::TokioTimerService;
use lumina_domain::schedule::ScheduleEntry;
use tracing_subscriber::EnvFilter;

use crate::config::{Config, LightSpec};

/// Schedule entries waiting to be installed, grouped by controller host.
type PendingInstalls = BTreeMap<String, Vec<(String, Vec<ScheduleEntry>)>>;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::load().context("failed to load configuration")?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_new(&config.logging.filter).unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let settle = config.controller.schedule_settle();
    let registry = if config.controller.dry_run {
        tracing::warn!("dry run, controllers are simulated in memory");
        let (registry, pending) = start_lights(&config, Arc::new(VirtualActuator::new()))?;
        install_schedules(pending, settle, |_| VirtualScheduleStore::new());
        registry
    } else {
        let client = RpcClient::new(&config.controller.rpc()).context("failed to build RPC client")?;
        let (registry, pending) = start_lights(&config, Arc::new(RpcActuator::new(client.clone())))?;
        let callback_base_url = config.server.callback_base_url.clone();
        install_schedules(pending, settle, |host| {
            RpcScheduleStore::new(client.clone(), host, callback_base_url.clone())
        });
        registry
    };
    tracing::info!(lights = registry.len(), "lights started");

    let app = lumina_adapter_http_axum::router::build(AppState::new(registry));

    let bind_addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {bind_addr}"))?;
    tracing::info!(addr = %bind_addr, "luminad listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("luminad stopped");
    Ok(())
}

/// Spawn the event loop of every configured light.
///
/// Returns the populated registry and the schedule entries of the outdoor
/// lights, still to be installed.
fn start_lights<A: Actuator + 'static>(
    config: &Config,
    actuator: Arc<A>,
) -> anyhow::Result<(LightRegistry, PendingInstalls)> {
    let capacity = config.controller.mailbox_capacity;
    let mut registry = LightRegistry::new();
    let mut pending = PendingInstalls::new();

    for light in &config.lights {
        let sink = SpawningDispatcher::new(Arc::clone(&actuator), &light.name);
        let handle = match light.spec()? {
            LightSpec::Indoor { target, config: settings } => {
                tracing::info!(light = %light.name, %target, "starting indoor light");
                spawn_light(&light.name, capacity, |timers| {
                    LightCore::Indoor(IndoorCore::new(settings, target, sink, timers, SystemClock))
                })
            }
            LightSpec::Outdoor { target, config: settings } => {
                tracing::info!(light = %light.name, %target, "starting outdoor light");
                pending
                    .entry(target.host.clone())
                    .or_default()
                    .push((light.name.clone(), settings.plan.entries()));
                spawn_light(&light.name, capacity, |timers| {
                    LightCore::Outdoor(OutdoorCore::new(settings, target, sink, timers, SystemClock))
                })
            }
            LightSpec::Remote { config: settings } => {
                tracing::info!(light = %light.name, bindings = settings.bindings.len(), "starting remote");
                spawn_light(&light.name, capacity, |_| {
                    LightCore::<_, TokioTimerService, SystemClock>::Remote(RemoteCore::new(
                        settings, sink,
                    ))
                })
            }
        };
        registry.register(handle)?;
    }

    Ok((registry, pending))
}

/// Install the pending schedule entries in the background.
///
/// Controllers are handled concurrently; the lights of one controller are
/// installed one after the other.
fn install_schedules<S, F>(pending: PendingInstalls, settle: Duration, store_for: F)
where
    S: ScheduleStore + Send + Sync + 'static,
    F: Fn(&str) -> S,
{
    for (host, lights) in pending {
        let installer = ScheduleInstaller::new(store_for(&host), settle);
        tokio::spawn(async move {
            for (light, entries) in lights {
                let report = installer.install(&light, &entries).await;
                if !report.is_complete() {
                    tracing::warn!(
                        %light,
                        %host,
                        failed = ?report.failed,
                        "some schedule slots were not installed"
                    );
                }
            }
        });
    }
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => tracing::info!("shutdown signal received"),
        Err(error) => {
            tracing::error!(?error, "failed to listen for shutdown signal");
            std::future::pending::<()>().await;
        }
    }
}
