mod api;
mod config;
mod data_source;
mod i18n;
mod ledger;
mod llm;

use std::io;
use std::sync::{Arc, Mutex};

use actix_web::middleware::Logger;
use actix_web::{web, App, HttpServer};
use log::info;

use crate::config::Config;
use crate::data_source::FileStore;
use crate::ledger::Ledger;
use crate::llm::{Normalizer, ProviderRegistry, ReqwestTransport};

#[actix_web::main]
async fn main() -> io::Result<()> {
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let config = Config::from_env();

    let store = FileStore::new(&config.data_dir);
    info!("Player data stored at {}", store.path().display());
    let ledger = web::Data::new(Mutex::new(Ledger::load(Box::new(store), config.language)));

    let transport = ReqwestTransport::new(config.upstream_timeout)
        .map_err(|e| io::Error::new(io::ErrorKind::Other, e.to_string()))?;
    let registry = ProviderRegistry::default();
    info!("LLM providers: {}", registry.names().join(", "));
    let normalizer = web::Data::new(Normalizer::new(registry, Arc::new(transport)));

    info!("Listening on {}:{}", config.bind, config.port);
    HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .app_data(ledger.clone())
            .app_data(normalizer.clone())
            .configure(api::configure)
    })
    .bind((config.bind.as_str(), config.port))?
    .run()
    .await
}
