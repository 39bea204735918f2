//! Main entry point for the Anchorset server.

use std::sync::Arc;

use anchorset_server::{
    model::{AppState, Configuration},
    startup,
};
use tracing::{error, info};

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    let configuration = Configuration::new()?;
    let _logging_guard = startup::init_logging(&configuration.logging_config())?;

    let store = match startup::init_store(&configuration).await {
        Ok(store) => store,
        Err(e) => {
            error!(error = ?e, "Failed to initialize the store");
            return Err(e);
        }
    };

    let address = configuration.server_address();
    let port = configuration.server_port();
    let app_state = Arc::new(AppState::new(configuration, store));

    if app_state.admin_credentials.is_open() {
        info!("Admin credentials are not configured; the admin API is open");
    }
    info!(address = %address, port, "Starting Anchorset HTTP server");

    startup::http_server(app_state, address, port)?.await?;

    info!("Anchorset server stopped");
    Ok(())
}
