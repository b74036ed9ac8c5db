// Copyright (c) 2025 Nikolay Denev <ndenev@gmail.com>
// SPDX-License-Identifier: BSD-3-Clause

mod cli;
pub mod config;
mod filter;
mod kubernetes;
mod output;
mod runner;

use anyhow::Result;
use clap::Parser;
use tracing::info;
use tracing_subscriber::prelude::*;

use cli::{Args, Command};
use config::ClusterConfigStore;
use runner::MultiClusterRunner;

/// Initialize logging to stderr; stdout is reserved for report output
fn init_logging(verbose: bool) {
    let filter = if verbose { "replist=debug" } else { "replist=info" };
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(filter));

    let stderr_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(stderr_layer)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    // Install rustls crypto provider (aws-lc-rs)
    rustls::crypto::aws_lc_rs::default_provider()
        .install_default()
        .expect("Failed to install rustls crypto provider");

    let args = Args::parse();
    init_logging(args.verbose);

    let dir = match &args.config_dir {
        Some(dir) => dir.clone(),
        None => config::default_clusters_dir()?,
    };
    let store = ClusterConfigStore::new(dir);

    let Command::Get { resource } = &args.command;

    match resource.criteria() {
        // `get cluster` lists the store itself; no cluster is contacted
        None => {
            let clusters = store.clusters()?;
            println!(
                "{}",
                output::render_cluster_list(&clusters, &args.output, args.no_headers)
            );
        }
        Some(criteria) => {
            info!("listing {}", criteria.kind_name());

            let runner = MultiClusterRunner::new(&store);
            let report = runner.run(&args.clusters, &criteria).await?;

            println!(
                "{}",
                output::render_report(&report, &args.output, args.no_headers)
            );
        }
    }

    Ok(())
}
