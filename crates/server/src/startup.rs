use std::{net::SocketAddr, sync::Arc};

use axum::Router;
use configs::{AppConfig, ServerConfig};
use migration::MigratorTrait;
use tower_http::cors::CorsLayer;
use tracing::info;

use service::pal::{repo::seaorm::SeaOrmPalRepository, PalRepository, PalServiceConfig};

use crate::errors::StartupError;
use crate::routes::{self, ServerState};

fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

fn bind_addr(server: &ServerConfig) -> anyhow::Result<SocketAddr> {
    Ok(format!("{}:{}", server.host, server.port).parse()?)
}

/// Public entry: connect storage, build the app and run the HTTP server
pub async fn run(cfg: AppConfig) -> anyhow::Result<()> {
    let db = models::db::connect_with_config(&cfg.database).await?;
    if cfg.database.auto_migrate {
        migration::Migrator::up(&db, None)
            .await
            .map_err(|e| StartupError::Migration(e.to_string()))?;
        info!("database migrations applied");
    }

    let repo: Arc<dyn PalRepository> = Arc::new(SeaOrmPalRepository { db });
    let state = ServerState::new(repo, PalServiceConfig::from(&cfg.roster));

    let app: Router = routes::build_router(state, build_cors());

    let addr = bind_addr(&cfg.server)?;
    info!(%addr, capacity = cfg.roster.capacity, "starting roster server");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
