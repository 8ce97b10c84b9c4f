use leetcode_stats::{
    AppState, ReqwestTransport, StatsFetcher, resolve_port, resolve_upstream, router,
};
use std::{net::SocketAddr, sync::Arc};
use tracing::{error, info};
use tracing_subscriber::{EnvFilter, fmt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("info".parse()?))
        .init();

    let upstream = resolve_upstream();
    info!(url = %upstream.request_url(), "using graphql upstream");

    let transport = ReqwestTransport::new()?;
    let state = AppState::new(StatsFetcher::new(Arc::new(transport), upstream));
    let app = router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], resolve_port()));
    info!("listening on http://{addr}");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        error!("failed to listen for shutdown signal: {err}");
        std::future::pending::<()>().await;
    }
    info!("shutting down");
}
