use std::sync::Arc;

use actix_web::{App, HttpServer, web};
use anyhow::Context;
use dotenv::dotenv;
use tracing::info;
use tracing_subscriber::EnvFilter;

use sauna_reservation::availability::RandomAvailability;
use sauna_reservation::config::{Config, log_directive};
use sauna_reservation::mail::HttpMailDispatcher;
use sauna_reservation::routes;
use sauna_reservation::state::AppState;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(log_directive(|k| std::env::var(k).ok(), "info")))
        .init();

    let config = Config::from_env().context("loading configuration")?;
    info!("mail relay: {:?}", config.mail);

    let dispatcher = HttpMailDispatcher::from_config(&config.mail).context("setting up mail dispatcher")?;
    let state = web::Data::new(AppState::new(
        config.mail.clone(),
        Arc::new(dispatcher),
        Arc::new(RandomAvailability::default()),
    ));

    info!("listening on {}:{}", config.server.host, config.server.port);
    HttpServer::new(move || App::new().app_data(state.clone()).configure(routes::init))
        .bind((config.server.host.as_str(), config.server.port))?
        .run()
        .await?;

    Ok(())
}
