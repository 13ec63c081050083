use serde::{Deserialize, Serialize};

/// Body of `POST /verify`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VerifyRequest {
    pub arquivo_ids: Vec<i64>,
}

/// A file whose expected vault path did not exist at verification time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MissingItem {
    pub id: Option<i64>,
    pub arquivo_id: i64,
    pub caminho_estimado: Option<String>,
    pub nome_hex: Option<String>,
    pub status_resolucao: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VerifyResponse {
    pub total_verificados: u64,
    pub total_falhas: u64,
    #[serde(default)]
    pub itens_ausentes: Vec<MissingItem>,
    pub message: String,
}

impl VerifyResponse {
    pub fn report(&self) -> String {
        let mut report = format!(
            "{}\n\nVerificados: {}\nFalhas (Ausentes): {}",
            self.message, self.total_verificados, self.total_falhas
        );
        if self.total_falhas > 0 {
            report.push_str("\n\nConsulte os Logs para detalhes dos itens ausentes.");
        }
        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn report_points_to_logs_only_on_failures() {
        let mut resp: VerifyResponse = serde_json::from_str(
            r#"{"total_verificados":3,"total_falhas":0,"itens_ausentes":[],"message":"Verificação concluída. 0 arquivos ausentes."}"#,
        )
        .unwrap();
        assert!(!resp.report().contains("Consulte os Logs"));
        resp.total_falhas = 1;
        assert!(resp.report().contains("Falhas (Ausentes): 1"));
        assert!(resp.report().ends_with("Consulte os Logs para detalhes dos itens ausentes."));
    }
}
