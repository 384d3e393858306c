//! Service entry point.

use std::sync::Arc;

use todo_api::store::{DynamoStore, MemoryStore, TodoStore};
use todo_api::AppState;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .with(tracing_subscriber::fmt::layer())
        .init();

    // The store is created once and shared by every request.
    let store: Arc<dyn TodoStore> = match std::env::var("TABLE_NAME") {
        Ok(table_name) => {
            tracing::info!(%table_name, "using DynamoDB store");
            Arc::new(DynamoStore::new(&table_name).await)
        }
        Err(_) => {
            tracing::warn!("TABLE_NAME not set, falling back to in-memory store");
            Arc::new(MemoryStore::default())
        }
    };

    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(3000);
    let addr = std::net::SocketAddr::from(([127, 0, 0, 1], port));

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("failed to bind address");
    tracing::info!(%addr, "server starting");

    axum::serve(listener, todo_api::app(AppState::new(store)))
        .await
        .expect("server error");
}
