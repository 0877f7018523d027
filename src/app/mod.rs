mod wiring;

use crate::{context, rest, storage};
use anyhow::{Context as AnyhowContext, Result};
use tokio_util::sync::CancellationToken;

pub struct App {
    pub ctx: context::Context,
    pub storage: storage::SqliteStorage,
}

impl App {
    pub fn from_cli() -> Result<Self> {
        let cli = crate::cli::parse();
        let ctx = context::Context::from_cli(&cli);

        crate::tracing::init();
        crate::tracing::set_log_file(ctx.config.log_file.as_deref())
            .context("configuring --log-file")?;
        log::info!("🚀 Starting todos");
        log::info!("📂 Data dir: {}", ctx.config.data_dir.to_string_lossy());
        if let Some(path) = ctx.config.log_file.as_deref() {
            log::info!("📝 Log file: {}", path.to_string_lossy());
        }

        wiring::init_data_dir(&ctx).context("initializing data dir")?;
        let storage = wiring::init_storage(&ctx)?;

        Ok(Self { ctx, storage })
    }
}

pub async fn run_server(app: App) -> Result<()> {
    let shutdown = CancellationToken::new();

    let api_addr = app.ctx.config.api_listen;
    let rest_shutdown = shutdown.clone();
    let mut rest_handle =
        tokio::spawn(async move { rest::serve(api_addr, app.storage, rest_shutdown).await });

    let finished = tokio::select! {
        _ = tokio::signal::ctrl_c() => {
            log::info!("🧨 Ctrl-C received, shutting down");
            None
        }
        result = &mut rest_handle => Some(result),
    };

    shutdown.cancel();
    let rest_result = match finished {
        Some(result) => result,
        None => rest_handle.await,
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

pub async fn run() -> Result<()> {
    let app = App::from_cli()?;
    run_server(app).await
}
