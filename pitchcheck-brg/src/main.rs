use anyhow::Context;
use pitchcheck::db::{CitationStore, VerdictLog};
use pitchcheck::pipeline::SessionWorker;
use pitchcheck::Settings;
use pitchcheck_brg::{router, AppState};
use tokio::net::TcpListener;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("failed to listen for ctrl-c: {e}");
        std::future::pending::<()>().await;
    }
    info!("shutting down");
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let settings = Settings::load();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let checker = settings.fact_checker()?;
    if checker.has_remote() {
        let model = if settings.web_search {
            &settings.search_model
        } else {
            &settings.model
        };
        info!(model = %model, web_search = settings.web_search, "remote model configured");
    } else {
        warn!("OPENAI_API_KEY not set, running in pattern-matching mode");
    }

    let log = VerdictLog::open(&settings.log_file)
        .with_context(|| format!("opening verdict log {}", settings.log_file.display()))?;
    let (session, worker) = SessionWorker::new(
        checker.clone(),
        settings.session_config(),
        Some(log),
        CitationStore::new(&settings.citations_file),
    );
    let worker_task = tokio::spawn(worker.run());

    let app = router(AppState {
        checker,
        session,
        gate: settings.gate(),
        webhook_secret: settings.webhook_secret.clone(),
    });

    let listener = TcpListener::bind(&settings.addr)
        .await
        .with_context(|| format!("binding {}", settings.addr))?;
    info!("pitchcheck listening on {}", settings.addr);
    info!("webhook: POST http://{}/transcript", settings.addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    let summary = worker_task.await?;
    info!(
        total = summary.total_claims,
        alerts = summary.bullshit_claims,
        "session closed"
    );
    Ok(())
}
