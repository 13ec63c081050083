//! Wire models exchanged with the ETL service.
//!
//! Field names follow the service's JSON contract verbatim, which is why they
//! are Portuguese and snake_case.

pub mod arquivo;
pub mod config;
pub mod documento;
pub mod log;
pub mod page;
pub mod restore;
pub mod stats;
pub mod verify;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Error envelope returned by the ETL service on non-2xx responses.
///
/// `detail` is normally a plain message, but validation failures carry a list
/// of objects instead. Both shapes are accepted and flattened by [`ErrorBody::message`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub detail: Value,
}

impl ErrorBody {
    /// Returns the human readable part of `detail`, if any.
    pub fn message(&self) -> Option<String> {
        match &self.detail {
            Value::Null => None,
            Value::String(s) if s.trim().is_empty() => None,
            Value::String(s) => Some(s.clone()),
            Value::Array(items) => {
                let parts: Vec<String> = items
                    .iter()
                    .map(|item| match item.get("msg").and_then(Value::as_str) {
                        Some(msg) => msg.to_string(),
                        None => item.to_string(),
                    })
                    .collect();
                if parts.is_empty() {
                    None
                } else {
                    Some(parts.join("; "))
                }
            }
            other => Some(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detail_string_is_used_as_is() {
        let body: ErrorBody = serde_json::from_str(r#"{"detail":"Nenhum arquivo encontrado"}"#).unwrap();
        assert_eq!(body.message().as_deref(), Some("Nenhum arquivo encontrado"));
    }

    #[test]
    fn validation_list_is_flattened() {
        let body: ErrorBody = serde_json::from_str(
            r#"{"detail":[{"loc":["body","destino"],"msg":"field required"},{"msg":"value is not a valid list"}]}"#,
        )
        .unwrap();
        assert_eq!(
            body.message().as_deref(),
            Some("field required; value is not a valid list")
        );
    }

    #[test]
    fn missing_or_blank_detail_gives_none() {
        let body: ErrorBody = serde_json::from_str("{}").unwrap();
        assert!(body.message().is_none());
        let body: ErrorBody = serde_json::from_str(r#"{"detail":"  "}"#).unwrap();
        assert!(body.message().is_none());
    }
}
