use serde::{Deserialize, Serialize};

/// Totals shown on the dashboard cards.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stats {
    pub total_documentos: u64,
    pub total_arquivos: u64,
    pub total_operacoes: u64,
}
