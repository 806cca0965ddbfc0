//! VNST staking dashboard: drives the staking contract through an EIP-1193 wallet.

use std::time::Duration;

use eframe::egui;
use eyre::WrapErr;

use vnst_dapp_adapters::{ChainAdapters, DappConfig};

mod app;
mod bridge;
mod clipboard;
mod page;
mod ui;

fn main() -> eyre::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let mut config = DappConfig::from_env();
    if let Some(url) = std::env::args().nth(1) {
        config.launch_url = Some(url);
    }
    let location = config.launch_location();
    let chain = ChainAdapters::from_config(&config);
    tracing::info!(
        page = %location.path,
        profile = ?config.profile,
        deterministic = chain.wallet.is_deterministic(),
        "Starting VNST dapp"
    );

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .thread_name("vnst-worker")
        .build()
        .wrap_err("failed to start background runtime")?;

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("VNST Staking")
            .with_inner_size([900.0, 700.0])
            .with_min_inner_size([420.0, 400.0]),
        ..Default::default()
    };

    let poll_interval = Duration::from_millis(config.event_poll_interval_ms);
    let notice_ttl = Duration::from_millis(config.notice_ttl_ms);
    eframe::run_native(
        "VNST Staking",
        native_options,
        Box::new(move |cc| {
            let page = page::PageHandle::new(location, cc.egui_ctx.clone());
            let bridge = bridge::DappBridge::new(runtime, chain, page);
            bridge.start_event_poller(poll_interval);
            Ok(Box::new(app::App::new(bridge, notice_ttl)))
        }),
    )
    .map_err(|e| eyre::eyre!("ui terminated with error: {e}"))
}
