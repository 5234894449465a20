use actix_web::{App, HttpServer, middleware::Logger, web};

use crate::{config::Config, server::AppState};

mod cities;
mod config;
mod error;
mod messenger;
mod model;
mod server;
mod weather;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv::dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            log::error!("{}", e);
            std::process::exit(1);
        }
    };

    let state = web::Data::new(AppState::new(&config));

    log::info!("Weather Messenger Bot starting on {}", config.bind_addr);

    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .wrap(Logger::default())
            .configure(server::configure)
    })
    .bind(&config.bind_addr)?
    .run()
    .await
}
