//! oaf-server binary: loads the JSON config, connects, migrates, serves the API.

use oaf_server::{app, apply_migrations, config::config_path, load_config, AppState, Database};
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env()
                .add_directive("oaf_server=info".parse()?)
                .add_directive("tower_http=info".parse()?),
        )
        .init();

    let config = load_config(&config_path()).await?;
    let db = Database::connect(&config.database_connection).await?;
    apply_migrations(&db).await?;
    let state = AppState::new(db, &config.resolve_jwt_secret());

    let listener = TcpListener::bind((config.host.as_str(), config.port)).await?;
    tracing::info!("listening on {}", listener.local_addr()?);
    axum::serve(listener, app(state)).await?;
    Ok(())
}
