//! Top-level entry point for running the calculator as a native window.

use std::sync::Arc;

use eframe::egui;

use crate::client::{ApiClient, ClientError};
use crate::config::DistCalcConfig;
use crate::controllers::FormController;

use super::distcalc_app::DistCalcApp;

#[derive(Debug, thiserror::Error)]
pub enum RunError {
    #[error(transparent)]
    Client(#[from] ClientError),
    #[error("failed to start the request runtime: {0}")]
    Runtime(#[from] std::io::Error),
    #[error("window error: {0}")]
    Window(#[from] eframe::Error),
}

/// Launch the calculator in a native window, talking HTTP to `cfg.server`.
///
/// Blocks until the window is closed.
pub fn run_distcalc(cfg: DistCalcConfig) -> Result<(), RunError> {
    let client = ApiClient::connect(&cfg.server)?;
    run_distcalc_with_client(cfg, client)
}

/// Like [`run_distcalc`], with a caller-supplied client (e.g. a custom transport).
pub fn run_distcalc_with_client(mut cfg: DistCalcConfig, client: ApiClient) -> Result<(), RunError> {
    let controller = FormController::new(&cfg, client)?;
    let mut app = DistCalcApp::new(controller, &cfg);
    log::info!("using calculator backend at {}", cfg.server.base_url);

    let title = cfg.title.clone();
    let mut opts = cfg
        .native_options
        .take()
        .unwrap_or_else(eframe::NativeOptions::default);

    if opts.viewport.inner_size.is_none() {
        opts.viewport = opts
            .viewport
            .clone()
            .with_inner_size(egui::vec2(1200.0, 800.0));
    }

    eframe::run_native(
        &title,
        opts,
        Box::new(move |cc| {
            let mut fonts = egui::FontDefinitions::default();
            egui_phosphor::add_to_fonts(&mut fonts, egui_phosphor::Variant::Regular);
            cc.egui_ctx.set_fonts(fonts);

            // Finished requests wake the UI.
            let ctx = cc.egui_ctx.clone();
            app.controller
                .set_repaint(Arc::new(move || ctx.request_repaint()));
            Ok(Box::new(app))
        }),
    )?;
    Ok(())
}
