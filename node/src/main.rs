// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
use anyhow::{Context, Result};
use clap::Parser;
use por_kernel::{PorDb, SnapshotStore};
use por_node::config::{NodeArgs, NodeConfig};
use por_node::server::{build_router, SharedStore};
use por_node::telemetry::{init_telemetry, record_snapshot};
use std::sync::Arc;
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> Result<()> {
    let cfg = NodeConfig::from(NodeArgs::parse());
    init_telemetry();

    tracing::info!("Initializing PoR Node with config: {:?}", cfg);

    let path = cfg
        .snapshot_path
        .as_deref()
        .context("no proof-of-reserve user file given")?;
    let path = std::path::absolute(path)
        .with_context(|| format!("cannot resolve path {:?}", path))?;

    // Queries must never see a partially loaded snapshot: load fully or exit.
    let db = PorDb::load(&path)
        .with_context(|| format!("failed to load proof-of-reserve snapshot {:?}", path))?;
    tracing::info!("Loaded proof-of-reserve snapshot {:?} ({} users)", path, db.user_count());
    record_snapshot(db.user_count());

    let store: SharedStore = Arc::new(db);
    let app = build_router(store);

    let addr = cfg.bind_addr;
    tracing::info!("Listening on {}", addr);
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("cannot bind {}", addr))?;
    axum::serve(listener, app).await?;
    Ok(())
}
