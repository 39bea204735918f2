//! Store initialization and HTTP server setup

use std::sync::Arc;

use actix_web::{App, HttpServer, dev::Server, middleware::Logger, web};
use anyhow::Context;
use tracing::{info, warn};

use anchorset_persistence::{CalculatorPersistence, SqlPersistService, bootstrap_schema};

use crate::{api, model::AppState, model::Configuration};

/// Connect the store named by `db.url`, creating missing tables when
/// `db.bootstrap_schema` is set. `None` when no URL is configured.
pub async fn init_store(
    configuration: &Configuration,
) -> anyhow::Result<Option<Arc<dyn CalculatorPersistence>>> {
    let Some(db) = configuration
        .database_connection()
        .await
        .context("Unable to connect to the database")?
    else {
        warn!("db.url is not set; serving bundled defaults and rejecting admin changes");
        return Ok(None);
    };

    if configuration.bootstrap_schema() {
        bootstrap_schema(&db)
            .await
            .context("Unable to create the database schema")?;
    }

    let store = SqlPersistService::new(db);
    info!(backend = %store.storage_backend(), "Store connected");
    Ok(Some(Arc::new(store)))
}

/// Creates and binds the HTTP server.
pub fn http_server(app_state: Arc<AppState>, address: String, port: u16) -> Result<Server, std::io::Error> {
    Ok(HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .app_data(web::Data::from(app_state.clone()))
            .configure(api::configure)
    })
    .bind((address, port))?
    .run())
}
