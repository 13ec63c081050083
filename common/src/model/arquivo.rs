use serde::{Deserialize, Serialize};

/// A vault file record.
///
/// `nome_hex` is the vault-internal name and `caminho_completo_estimado` the
/// path the service expects the physical file at. Both are computed by the
/// service and displayed as-is.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Arquivo {
    pub id: i64,
    pub documento_id: Option<i64>,
    pub nome_arquivo: String,
    pub nome_original: Option<String>,
    pub tamanho_mb: Option<f64>,
    pub tipo_conteudo: Option<String>,
    pub tipo_doc: Option<String>,
    pub nome_interno_app: Option<String>,
    pub seq_decimal: Option<i64>,
    pub nome_hex: Option<String>,
    pub caminho_raiz_vault: Option<String>,
    pub caminho_completo_estimado: Option<String>,
}

impl Arquivo {
    /// Original file name when known, otherwise the imported name.
    pub fn display_name(&self) -> &str {
        self.nome_original
            .as_deref()
            .filter(|n| !n.trim().is_empty())
            .unwrap_or(&self.nome_arquivo)
    }

    /// Lower-cased extension of [`Arquivo::display_name`], without the dot.
    pub fn extension(&self) -> Option<String> {
        let name = self.display_name();
        let (stem, ext) = name.rsplit_once('.')?;
        if stem.is_empty() || ext.is_empty() {
            return None;
        }
        Some(ext.to_ascii_lowercase())
    }

    pub fn size_label(&self) -> String {
        match self.tamanho_mb {
            Some(mb) if mb < 1.0 => format!("{:.0} KB", mb * 1024.0),
            Some(mb) => format!("{:.2} MB", mb),
            None => "-".to_string(),
        }
    }
}

/// Material icon name for a file extension.
pub fn icon_for_extension(ext: Option<&str>) -> &'static str {
    match ext {
        Some("prt" | "asm" | "drw" | "sldprt" | "sldasm" | "catpart" | "catproduct") => "view_in_ar",
        Some("pdf") => "picture_as_pdf",
        Some("doc" | "docx" | "txt" | "md") => "description",
        Some("xls" | "xlsx" | "csv") => "table_chart",
        Some("png" | "jpg" | "jpeg" | "tif" | "tiff") => "image",
        Some("zip" | "7z" | "rar") => "folder_zip",
        _ => "insert_drive_file",
    }
}
