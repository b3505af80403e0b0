mod wiring;

use crate::{cli, commands, context, rest, sheets::GoogleSheets};
use anyhow::{Context as AnyhowContext, Result};
use tokio_util::sync::CancellationToken;
use tracing_appender::non_blocking::WorkerGuard;

pub struct App {
    pub ctx: context::Context,
    pub sheets: GoogleSheets,
    _log_guard: Option<WorkerGuard>,
}

impl App {
    pub fn from_cli() -> Result<(Self, cli::Cli)> {
        let cli = crate::cli::parse();
        let ctx = context::Context::from_cli(&cli);

        let log_guard = crate::tracing::init(ctx.log_file.as_deref());
        log::info!("🚀 Starting casesheet");
        log::info!("📄 Spreadsheet: {}", ctx.layout.spreadsheet_id);
        log::info!(
            "🗂️ Tabs: cases={} locations={}",
            ctx.layout.cases_tab,
            ctx.layout.locations_tab
        );
        log::info!("🧮 Case data start row: {}", ctx.layout.data_start_row);
        if let Some(path) = ctx.log_file.as_deref() {
            log::info!("📝 Log file: {}", path.display());
        }

        let sheets = wiring::build_sheets(&ctx).context("initializing Google Sheets client")?;
        log::info!("🔐 Service account: {}", sheets.client_email());

        Ok((
            Self {
                ctx,
                sheets,
                _log_guard: log_guard,
            },
            cli,
        ))
    }
}

pub async fn run_daemon(app: App) -> Result<()> {
    let shutdown = CancellationToken::new();

    let api_addr = app.ctx.api_listen;
    let rest_shutdown = shutdown.clone();
    let sheets = app.sheets.clone();
    let layout = app.ctx.layout.clone();

    let mut rest_handle =
        tokio::spawn(async move { rest::serve(api_addr, sheets, layout, rest_shutdown).await });

    let rest_result = tokio::select! {
        _ = shutdown_signal() => {
            log::info!("🧨 Shutdown signal received");
            shutdown.cancel();
            rest_handle.await
        }
        result = &mut rest_handle => result,
    };

    match rest_result {
        Ok(Ok(())) => {}
        Ok(Err(e)) => {
            log::error!("REST server error: {}", e);
            return Err(e);
        }
        Err(e) => {
            log::error!("REST task failed: {}", e);
            return Err(e.into());
        }
    }

    log::info!("✅ Shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            log::error!("Failed to listen for Ctrl-C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                log::error!("Failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}

pub async fn run() -> Result<()> {
    let (app, cli) = App::from_cli()?;

    if let Some(cmd) = &cli.cmd {
        // one-shot command mode
        return commands::run(cmd, &app).await;
    }

    run_daemon(app).await
}
