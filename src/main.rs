//! The todo service.

use todo_store::{
    app,
    infra::{config, database, logging},
};
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    dotenvy::dotenv().ok();
    let config = config::load_config()?;
    let _guard = logging::init_logging(&config.telemetry)?;

    let db = database::init_db(&config.database)?;
    database::init_schema(&db).await?;

    let listener =
        TcpListener::bind((config.server.http_address.as_str(), config.server.http_port)).await?;
    app::run_app(listener, db, config.server).await?;

    Ok(())
}
