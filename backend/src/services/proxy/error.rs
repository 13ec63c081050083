use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use serde_json::json;
use thiserror::Error;

/// Failures of the proxy itself. Errors answered by the ETL service are not
/// errors here; their status and body are passed through as they are.
#[derive(Debug, Error)]
pub enum ProxyError {
    #[error("Serviço ETL indisponível: {0}")]
    Unreachable(String),
    #[error("Método HTTP não suportado: {0}")]
    Method(String),
    #[error("Resposta inválida do serviço ETL: {0}")]
    Body(String),
}

impl ResponseError for ProxyError {
    fn status_code(&self) -> StatusCode {
        match self {
            ProxyError::Method(_) => StatusCode::METHOD_NOT_ALLOWED,
            ProxyError::Unreachable(_) | ProxyError::Body(_) => StatusCode::BAD_GATEWAY,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(json!({ "detail": self.to_string() }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::body::to_bytes;

    #[actix_web::test]
    async fn errors_render_as_detail_json() {
        let resp = ProxyError::Unreachable("connection refused".into()).error_response();
        assert_eq!(resp.status(), StatusCode::BAD_GATEWAY);
        let body = to_bytes(resp.into_body()).await.unwrap();
        let value: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(value["detail"], "Serviço ETL indisponível: connection refused");
    }
}
