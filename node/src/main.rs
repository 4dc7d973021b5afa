// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
use donation_node::config::NodeConfig;
use donation_node::errors::NodeResult;
use donation_node::{engine, health, integrity, server, telemetry};
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> NodeResult<()> {
    telemetry::init_telemetry();

    let cfg = NodeConfig::load()?;
    tracing::info!("Starting donation node with config: {:?}", cfg);

    // Nothing else runs until the image is trusted.
    integrity::startup_gate(&cfg)?;

    let core = engine::share(engine::open_core(&cfg)?);

    if let Some(source) = cfg.entropy_source.clone() {
        let interval = cfg.entropy_interval();
        let cutoff = cfg.repetition_cutoff;
        tokio::spawn(async move {
            if let Err(e) = health::monitor_entropy(source, interval, cutoff).await {
                tracing::error!(error = %e, "entropy monitor stopped");
            }
        });
    }

    let listener = TcpListener::bind(cfg.bind_addr).await?;
    tracing::info!("Listening on {}", cfg.bind_addr);
    server::serve(listener, core).await
}
