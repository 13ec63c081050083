use serde::{Deserialize, Serialize};

/// Body of `POST /restore`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RestoreRequest {
    pub arquivo_ids: Vec<i64>,
    pub destino: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RestoreResponse {
    pub success: bool,
    pub message: String,
    pub arquivos_copiados: u64,
    #[serde(default)]
    pub erros: Vec<String>,
}

impl RestoreResponse {
    /// Text shown to the operator after a batch restore.
    pub fn report(&self) -> String {
        if self.success {
            self.message.clone()
        } else {
            format!("Erro parcial:\n{}\n\nErros:\n{}", self.message, self.erros.join("\n"))
        }
    }

    /// Text shown after restoring a single file from its details page.
    pub fn single_file_report(&self) -> String {
        if self.success {
            format!(
                "Arquivo restaurado com sucesso! {} arquivo(s) copiado(s).",
                self.arquivos_copiados
            )
        } else {
            format!("Erros encontrados: {}", self.erros.join(", "))
        }
    }
}
