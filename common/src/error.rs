//! Errors raised while talking to the ETL service.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ApiError {
    /// The request never produced an HTTP response.
    #[error("falha de rede: {0}")]
    Network(String),

    /// The service answered with a non-2xx status. `detail` is the service's
    /// own message, when it sent one.
    #[error("erro do servidor ({status})")]
    Server { status: u16, detail: Option<String> },

    /// The response body did not match the expected shape.
    #[error("resposta inválida: {0}")]
    Decode(String),
}

impl ApiError {
    /// Message to show the operator: the server-provided detail when present,
    /// otherwise `fallback`.
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            ApiError::Server {
                detail: Some(detail),
                ..
            } => detail.clone(),
            _ => fallback.to_string(),
        }
    }
}
