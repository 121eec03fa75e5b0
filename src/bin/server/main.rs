use keepd::config::Config;
use keepd::domain::{auth, health, sync};
use keepd::inbound::http::{HttpServer, HttpServerConfig};
use keepd::outbound::sqlx::postgres::Postgres;

#[tokio::main]
async fn main() {
    match run().await {
        Ok(()) => (),
        Err(e) => {
            eprintln!("server failed to start: {e:?}");
            std::process::exit(1);
        }
    }
}

async fn run() -> anyhow::Result<()> {
    let config = Config::from_env()?;

    tracing_subscriber::fmt().with_max_level(config.rust_log).init();

    let db = Postgres::new(&config.database_url).await?;

    let auth_service = auth::services::Service::new(db.clone(), config.jwt_secret);
    let sync_service = sync::services::Service::new(db.clone());
    let health_service = health::services::Service::new(db);

    let server_config = HttpServerConfig {
        bind_address: &config.bind_address,
    };

    let http_server =
        HttpServer::new(auth_service, sync_service, health_service, server_config).await?;

    http_server.run().await
}
