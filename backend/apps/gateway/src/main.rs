mod app;
mod settings;

use anyhow::Context;
use auth::domain::{AuthEventNotifier, KeyValueStore};
use auth::infra::HttpAuthNotifier;
use auth::{MemoryStore, RedisStore, RedisStoreConfig};
use platform::http::{HttpClientConfig, build_client};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::app::{AppParts, build_app};
use crate::settings::{Settings, StoreBackend};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "gateway=info,auth=info,proxy=info,tower_http=info".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let settings = Settings::from_env()?;

    let http_client = build_client(&HttpClientConfig::default())
        .context("Failed to build outbound HTTP client")?;
    let notifier = HttpAuthNotifier::new(http_client.clone(), &settings.proxy.backend_origin);

    match settings.store.backend {
        StoreBackend::Redis => {
            let connect = |db| {
                let config = RedisStoreConfig::new(&settings.store.redis_url, db)
                    .with_op_timeout(settings.store.op_timeout);
                async move { RedisStore::connect(&config).await }
            };
            let credentials = connect(settings.store.credentials_db)
                .await
                .context("Failed to connect to credential store")?;
            let sessions = connect(settings.store.sessions_db)
                .await
                .context("Failed to connect to session store")?;
            tracing::info!(
                credentials_db = settings.store.credentials_db,
                sessions_db = settings.store.sessions_db,
                "Connected to Redis"
            );

            serve(&settings, credentials.clone(), sessions.clone(), notifier, http_client).await?;

            credentials.close();
            sessions.close();
        }
        StoreBackend::Memory => {
            tracing::warn!("Using in-memory store; accounts and sessions are lost on restart");
            serve(
                &settings,
                MemoryStore::new(),
                MemoryStore::new(),
                notifier,
                http_client,
            )
            .await?;
        }
    }

    tracing::info!("Gateway stopped");
    Ok(())
}

async fn serve<K, N>(
    settings: &Settings,
    credentials: K,
    sessions: K,
    notifier: N,
    http_client: reqwest::Client,
) -> anyhow::Result<()>
where
    K: KeyValueStore + Clone + Sync + 'static,
    N: AuthEventNotifier + Sync + 'static,
{
    let app = build_app(
        settings,
        AppParts {
            credentials,
            sessions,
            notifier,
            http_client,
        },
    );

    let listener = tokio::net::TcpListener::bind(settings.listen_addr)
        .await
        .with_context(|| format!("Failed to bind {}", settings.listen_addr))?;
    tracing::info!(
        addr = %settings.listen_addr,
        backend = %settings.proxy.backend_origin,
        session_ttl_secs = settings.auth.session_ttl.as_secs(),
        "Gateway listening"
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
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
    tracing::info!("Shutdown signal received");
}
