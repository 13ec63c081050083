use serde::{Deserialize, Serialize};

/// One entry of the ETL operation log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EtlLog {
    pub id: i64,
    pub tipo: String,
    pub timestamp: String,
    pub detalhes: String,
    pub registros_afetados: Option<i64>,
    #[serde(default = "default_severity")]
    pub severity: String,
}

fn default_severity() -> String {
    "INFO".to_string()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Error,
    Warn,
    Info,
}

impl EtlLog {
    pub fn severity(&self) -> Severity {
        match self.severity.as_str() {
            "ERROR" => Severity::Error,
            "WARN" | "WARNING" => Severity::Warn,
            _ => Severity::Info,
        }
    }
}

impl Severity {
    pub fn css_class(self) -> &'static str {
        match self {
            Severity::Error => "severity-error",
            Severity::Warn => "severity-warn",
            Severity::Info => "severity-info",
        }
    }
}

/// Operation types the log view can filter on, as `(value, label)`.
pub const LOG_TYPES: [(&str, &str); 4] = [
    ("import", "Importação"),
    ("restore", "Restauração"),
    ("verify", "Verificação"),
    ("export", "Exportação"),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn severity_defaults_to_info() {
        let log: EtlLog = serde_json::from_str(
            r#"{"id":1,"tipo":"import","timestamp":"2024-05-01T10:00:00","detalhes":"x","registros_afetados":null}"#,
        )
        .unwrap();
        assert_eq!(log.severity(), Severity::Info);
    }

    #[test]
    fn error_and_warn_are_recognised() {
        let mut log: EtlLog = serde_json::from_str(
            r#"{"id":1,"tipo":"verify","timestamp":"t","detalhes":"x","registros_afetados":2,"severity":"ERROR"}"#,
        )
        .unwrap();
        assert_eq!(log.severity(), Severity::Error);
        log.severity = "WARN".into();
        assert_eq!(log.severity().css_class(), "severity-warn");
    }
}
