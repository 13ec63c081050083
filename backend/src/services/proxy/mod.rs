//! # ETL API Proxy
//!
//! The console calls `/api/...` on its own origin. Everything under that
//! prefix is forwarded unchanged to the ETL service configured in
//! `ETL_API_URL`, so the browser never needs CORS access to it.
//!
//! ## Sub-modules:
//! - `forward`: the catch-all handler and upstream URL building.
//! - `error`: failures reported back to the console as `{"detail": ...}`.

mod error;
mod forward;

use actix_web::web::{route, scope};
use actix_web::Scope;
use reqwest::Client;

pub use error::ProxyError;

const API_PATH: &str = "/api";

/// Shared state of the proxy handler.
#[derive(Clone)]
pub struct Upstream {
    pub base_url: String,
    pub client: Client,
}

impl Upstream {
    pub fn new(base_url: &str) -> Result<Self, ProxyError> {
        let client = Client::builder()
            .connect_timeout(std::time::Duration::from_secs(10))
            .build()
            .map_err(|e| ProxyError::Unreachable(e.to_string()))?;
        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        })
    }
}

/// Registers `ANY /api/{tail}`.
pub fn configure_routes() -> Scope {
    scope(API_PATH).route("/{tail:.*}", route().to(forward::process))
}
