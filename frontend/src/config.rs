//! Build-time settings of the console.
//!
//! `VAULT_CONSOLE_API_URL` is read when the wasm bundle is compiled. Left
//! unset, the console talks to `/api` on its own origin, which the host
//! process forwards to the ETL service.

/// Base URL every API path is appended to.
pub fn api_base_url() -> &'static str {
    option_env!("VAULT_CONSOLE_API_URL").unwrap_or("/api")
}

/// Rows per page on the dashboard and log listings.
pub const PAGE_SIZE: u64 = 50;

/// `localStorage` key holding the chosen theme.
pub const THEME_STORAGE_KEY: &str = "theme";
