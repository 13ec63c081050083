use serde::{Deserialize, Serialize};

/// An engineering document migrated from Windchill.
///
/// `(numero_doc, versao, iteracao)` identifies a document revision on the
/// service side; the console only ever reads these records.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Documento {
    pub id: i64,
    pub numero_doc: String,
    pub nome_doc: String,
    pub versao: Option<String>,
    pub iteracao: Option<i64>,
    pub estado: Option<String>,
    pub criado_por: Option<String>,
    pub data_criacao: Option<String>,
    pub data_modificacao: Option<String>,
}

impl Documento {
    /// `"A.3"` style revision label, or `"-"` when the version is unknown.
    pub fn revision_label(&self) -> String {
        match (&self.versao, self.iteracao) {
            (Some(v), Some(i)) => format!("{}.{}", v, i),
            (Some(v), None) => v.clone(),
            (None, _) => "-".to_string(),
        }
    }
}

/// Lifecycle state badge shown next to documents and files.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusBadge {
    InWork,
    Released,
    Ready,
    Error,
    Pending,
    Imported,
}

impl StatusBadge {
    /// Maps a raw `estado` value; unknown or missing states read as imported.
    pub fn from_estado(estado: Option<&str>) -> Self {
        match estado {
            Some("INWORK") => StatusBadge::InWork,
            Some("RELEASED") => StatusBadge::Released,
            Some("ready") => StatusBadge::Ready,
            Some("error") => StatusBadge::Error,
            Some("pending") => StatusBadge::Pending,
            _ => StatusBadge::Imported,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            StatusBadge::InWork => "Em Trabalho",
            StatusBadge::Released => "Liberado",
            StatusBadge::Ready => "Pronto para Carga",
            StatusBadge::Error => "Erro",
            StatusBadge::Pending => "Pendente",
            StatusBadge::Imported => "Importado",
        }
    }

    /// CSS modifier used by the console stylesheet.
    pub fn css_class(self) -> &'static str {
        match self {
            StatusBadge::InWork => "badge-gray",
            StatusBadge::Released | StatusBadge::Ready => "badge-green",
            StatusBadge::Error => "badge-red",
            StatusBadge::Pending => "badge-yellow",
            StatusBadge::Imported => "badge-blue",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_document_with_nulls() {
        let doc: Documento = serde_json::from_str(
            r#"{"id":7,"numero_doc":"0000123","nome_doc":"BRACKET","versao":"A","iteracao":3,
                "estado":null,"criado_por":null,"data_criacao":null,"data_modificacao":null}"#,
        )
        .unwrap();
        assert_eq!(doc.revision_label(), "A.3");
        assert_eq!(StatusBadge::from_estado(doc.estado.as_deref()), StatusBadge::Imported);
    }

    #[test]
    fn badge_labels_follow_state() {
        assert_eq!(StatusBadge::from_estado(Some("RELEASED")).label(), "Liberado");
        assert_eq!(StatusBadge::from_estado(Some("INWORK")).label(), "Em Trabalho");
        assert_eq!(StatusBadge::from_estado(Some("whatever")).label(), "Importado");
    }
}
