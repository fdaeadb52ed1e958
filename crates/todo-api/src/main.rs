use std::sync::Arc;

use infrastructure::{MemoryObjectStore, ObjectStore, S3ObjectStore, TodoRepository};
use shared::{Config, StoreBackend};
use todo_api::ws::BroadcastHub;
use todo_api::{app_with_state, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    shared::init_tracing().map_err(|e| anyhow::anyhow!(e))?;

    let config = Config::from_env()?;

    let store: Arc<dyn ObjectStore> = match config.store_backend {
        StoreBackend::S3 => Arc::new(S3ObjectStore::new(&config.s3_bucket).await),
        StoreBackend::Memory => {
            tracing::warn!("Using in-memory store; todo lists will not survive a restart");
            Arc::new(MemoryObjectStore::new())
        }
    };

    let state = AppState {
        repo: TodoRepository::new(store),
        hub: BroadcastHub::new(config.broadcast_capacity),
    };

    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    tracing::info!(addr = %config.bind_addr, "Todo service listening");

    axum::serve(listener, app_with_state(state)).await?;

    Ok(())
}
