use std::net::SocketAddr;
use std::sync::Arc;

use recruitment_hub::{
    config::{get_config, init_config, StorageBackend},
    database::{memory::MemoryStore, pool::create_pool, postgres::PgStore},
    routes, AppState,
};
use tokio::net::TcpListener;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_config()?;
    let config = get_config()?;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    if config.json_logs {
        tracing_subscriber::fmt().with_env_filter(filter).json().init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }

    let app_state = match config.storage_backend {
        StorageBackend::Postgres => {
            let pool = create_pool(config).await?;
            sqlx::migrate!("./migrations").run(&pool).await?;
            info!("using postgres storage");
            AppState::new(Arc::new(PgStore::new(pool)), &config.jwt_secret)
        }
        StorageBackend::Memory => {
            info!("using in-memory storage; data is lost on restart");
            AppState::new(Arc::new(MemoryStore::new()), &config.jwt_secret)
        }
    };

    let app = routes::router(app_state)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http());

    let addr: SocketAddr = config.server_address.parse()?;
    let listener = TcpListener::bind(addr).await?;
    info!("listening on {}", addr);
    axum::serve(listener, app).await?;

    Ok(())
}
