mod config;
mod services;

use actix_web::{web, App, HttpServer};
use env_logger::Env;
use log::{info, warn};
use std::thread;
use std::time::Duration;

use crate::config::Config;
use crate::services::embedded::serve_embedded;
use crate::services::proxy::{self, Upstream};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init_from_env(Env::default().default_filter_or("info"));

    let config = Config::from_env().map_err(std::io::Error::other)?;
    let upstream = Upstream::new(&config.etl_api_url).map_err(std::io::Error::other)?;
    let url = config.url();

    if config.open_browser {
        let url = url.clone();
        thread::spawn(move || {
            thread::sleep(Duration::from_millis(500));
            if let Err(e) = webbrowser::open(&url) {
                warn!("Could not open the browser: {}", e);
            }
        });
    }

    info!("Console running at {}", url);
    info!("Forwarding /api to {}", config.etl_api_url);

    let max_upload = config.max_upload_bytes;
    HttpServer::new(move || {
        App::new()
            .app_data(web::PayloadConfig::new(max_upload))
            .app_data(web::Data::new(upstream.clone()))
            .service(proxy::configure_routes())
            .default_service(web::route().to(serve_embedded))
    })
    .bind((config.host.as_str(), config.port))?
    .run()
    .await
}
