use anyhow::Context;
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::util::SubscriberInitExt;
use waitlist::{app::App, config::get_configuration, telemetry::get_subscriber};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = get_configuration().expect("Failed to read configuration.");

    get_subscriber(&config.log_level, std::io::stderr).init();

    let db = PgPoolOptions::new()
        .max_connections(50)
        .acquire_timeout(std::time::Duration::from_secs(2))
        .connect_lazy_with(config.database.with_db());

    let app = App::with(config).await;

    tracing::info!(port = app.port(), "starting server");
    app.serve(db).await.context("The server should be running")?;

    Ok(())
}
