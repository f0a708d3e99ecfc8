use std::net::{IpAddr, SocketAddr};

use order_entry::{AppState, config, routes, services::OrderStore, telemetry};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let settings = config::load();
    telemetry::init_tracing();

    let store = OrderStore::connect(&settings).await?;
    store.ping().await?;
    store.init_schema().await?;
    tracing::info!(database_url = %settings.database_url, "order table ready");

    let state = AppState { store: store.clone() };
    let app = routes::app(state);

    let addr = SocketAddr::from((settings.host.parse::<IpAddr>()?, settings.port));
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("listening on http://{}", listener.local_addr()?);

    // Teardown runs whether the server stopped cleanly or failed.
    let served = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await;
    if let Err(e) = &served {
        tracing::error!("server error: {e}");
    }

    let torn_down = store.shutdown(settings.drop_on_shutdown).await;

    served?;
    torn_down?;
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("failed to listen for ctrl-c: {e}");
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
                tracing::error!("failed to listen for SIGTERM: {e}");
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

    tracing::info!("shutting down");
}
