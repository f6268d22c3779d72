mod partner;
mod routes;
mod services;
mod sheets;
mod state;
mod table;
mod views;
mod xlsx;

use std::sync::Arc;

use sheets::config::SheetsConfig;
use sheets::google::GoogleSheetsClient;
use sheets::{MemoryStore, SheetStore};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt::init();

    let port: u16 = std::env::var("PORT")
        .unwrap_or_else(|_| "3000".into())
        .parse()
        .expect("invalid PORT");
    let config = SheetsConfig::from_env().expect("invalid sheets config");

    let store: Arc<dyn SheetStore> = match &config.google {
        Some(google) => {
            let client = GoogleSheetsClient::connect(google)
                .await
                .expect("google sheets client init failed");
            tracing::info!(spreadsheet_id = %google.spreadsheet_id, worksheet = %config.worksheet, "partner sheet connected");
            Arc::new(client)
        }
        None => {
            tracing::warn!("SHEETS_SPREADSHEET_ID not set; partner data is kept in memory only");
            Arc::new(MemoryStore::new())
        }
    };

    let sync = state::SyncSettings { worksheet: config.worksheet, init_policy: config.init_policy };
    let app = routes::app(state::AppState::new(store, sync));
    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{port}"))
        .await
        .expect("failed to bind");

    tracing::info!(%port, "brobond console listening");
    axum::serve(listener, app).await.expect("server failed");
}
