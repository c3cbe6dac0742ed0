//! Shop backend - catalog, cart and checkout service

use std::sync::Arc;

use anyhow::Result;
use shop_backend::services::EventPublisher;
use shop_backend::store::{MemoryStore, PgStore, ProductStore, UserStore};
use shop_backend::{router, AppState, Config};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "shop_backend=info,tower_http=debug".into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let (products, users): (Arc<dyn ProductStore>, Arc<dyn UserStore>) = match &config.database_url {
        Some(url) => {
            let store = PgStore::connect(url, config.database_max_connections).await?;
            sqlx::migrate!("./migrations").run(store.pool()).await?;
            tracing::info!("connected to PostgreSQL, migrations applied");
            let store = Arc::new(store);
            (store.clone(), store)
        }
        None => {
            tracing::warn!("DATABASE_URL not set, using the in-memory store");
            let store = Arc::new(MemoryStore::new());
            (store.clone(), store)
        }
    };

    let nats = match &config.nats_url {
        Some(url) => match async_nats::connect(url.as_str()).await {
            Ok(client) => Some(client),
            Err(e) => {
                tracing::warn!(error = %e, "NATS unavailable, domain events will not be published");
                None
            }
        },
        None => None,
    };

    let state = AppState::new(products, users, EventPublisher::new(nats), config.store_timeout);
    let app = router(state).layer(TraceLayer::new_for_http()).layer(CorsLayer::permissive());

    let addr = config.socket_addr();
    tracing::info!(%addr, "shop backend listening");
    axum::serve(tokio::net::TcpListener::bind(addr).await?, app).await?;
    Ok(())
}
