//! Console-editable configuration kept by the ETL service.

use serde::{Deserialize, Serialize};

/// Snapshot returned by `GET /configuracoes`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Configuracoes {
    pub vault_raiz: Option<String>,
    pub destino_padrao: Option<String>,
    #[serde(default)]
    pub usar_padding_hex: bool,
    #[serde(default)]
    pub adicionar_extensao_fv: bool,
}

/// Restore destination offered when the service has none configured.
pub const DEFAULT_DESTINATION: &str = "C:\\Export";

impl Configuracoes {
    /// Destination pre-filled in restore prompts.
    pub fn restore_destination(&self) -> String {
        self.destino_padrao
            .as_deref()
            .map(str::trim)
            .filter(|d| !d.is_empty())
            .unwrap_or(DEFAULT_DESTINATION)
            .to_string()
    }

    /// The `PUT /configuracoes/{chave}` calls needed to persist this snapshot.
    pub fn updates(&self) -> Vec<(ConfigKey, String)> {
        vec![
            (ConfigKey::VaultRaiz, self.vault_raiz.clone().unwrap_or_default()),
            (ConfigKey::DestinoPadrao, self.destino_padrao.clone().unwrap_or_default()),
            (ConfigKey::UsarPaddingHex, bool_value(self.usar_padding_hex)),
            (ConfigKey::AdicionarExtensaoFv, bool_value(self.adicionar_extensao_fv)),
        ]
    }
}

fn bool_value(value: bool) -> String {
    if value { "true" } else { "false" }.to_string()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigKey {
    VaultRaiz,
    DestinoPadrao,
    UsarPaddingHex,
    AdicionarExtensaoFv,
}

impl ConfigKey {
    pub fn as_str(self) -> &'static str {
        match self {
            ConfigKey::VaultRaiz => "vault_raiz",
            ConfigKey::DestinoPadrao => "destino_padrao",
            ConfigKey::UsarPaddingHex => "usar_padding_hex",
            ConfigKey::AdicionarExtensaoFv => "adicionar_extensao_fv",
        }
    }
}

/// Full configuration row, as listed by `GET /configuracoes/todas`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConfiguracaoDetalhe {
    pub id: i64,
    pub chave: String,
    pub valor: String,
    pub descricao: Option<String>,
    pub atualizado_em: String,
}

/// Body of `PUT /configuracoes/{chave}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConfigUpdate {
    pub valor: String,
}
