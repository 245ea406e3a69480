use std::sync::Arc;

mod backend_bridge;
mod controller;
mod ui;

use anyhow::Context;
use clap::Parser;
use client_core::{load_settings, UserApi, UserApiClient};
use crossbeam_channel::bounded;
use eframe::egui;
use tracing_subscriber::EnvFilter;

use crate::backend_bridge::{commands::BackendCommand, runtime::spawn_backend_thread};
use crate::controller::UiEvent;
use crate::ui::{view_model::APP_TITLE, UserAdminApp};

type DynError = Box<dyn std::error::Error + Send + Sync>;

/// Desktop front end for the user-management service.
#[derive(Parser, Debug)]
struct Args {
    /// Overrides the configured API host.
    #[arg(long)]
    api_host: Option<String>,
    /// Overrides the configured API port.
    #[arg(long)]
    api_port: Option<u16>,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();
    let args = Args::parse();

    let mut settings = load_settings();
    if let Some(host) = args.api_host {
        settings.api_host = host;
    }
    if let Some(port) = args.api_port {
        settings.api_port = port;
    }
    let client = UserApiClient::from_settings(&settings).context("invalid API settings")?;
    tracing::info!(base_url = client.base_url(), "using user service");
    let api: Arc<dyn UserApi> = Arc::new(client);

    let (cmd_tx, cmd_rx) = bounded::<BackendCommand>(64);
    let (ui_tx, ui_rx) = bounded::<UiEvent>(256);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(APP_TITLE)
            .with_inner_size([960.0, 640.0])
            .with_min_inner_size([640.0, 420.0]),
        ..Default::default()
    };
    eframe::run_native(
        APP_TITLE,
        options,
        Box::new(
            move |cc: &eframe::CreationContext<'_>| -> Result<Box<dyn eframe::App>, DynError> {
                let repaint_ctx = cc.egui_ctx.clone();
                let _worker =
                    spawn_backend_thread(api, cmd_rx, ui_tx, move || repaint_ctx.request_repaint())?;
                Ok(Box::new(UserAdminApp::new(cmd_tx, ui_rx)))
            },
        ),
    )
    .map_err(|err| anyhow::anyhow!("desktop ui exited with error: {err}"))
}
