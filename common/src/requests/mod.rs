//! Query parameters for the listing endpoints.
//!
//! Each query turns itself into `(name, value)` pairs with unset and blank
//! values left out, so the HTTP layer can append them verbatim.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDir {
    #[default]
    Asc,
    Desc,
}

impl SortDir {
    pub fn as_str(self) -> &'static str {
        match self {
            SortDir::Asc => "asc",
            SortDir::Desc => "desc",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            SortDir::Asc => SortDir::Desc,
            SortDir::Desc => SortDir::Asc,
        }
    }
}

/// `skip`/`limit` for a 1-based page number.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
    pub skip: u64,
    pub limit: u64,
}

impl PageWindow {
    pub fn new(page: u64, page_size: u64) -> Self {
        Self {
            skip: page.max(1).saturating_sub(1) * page_size,
            limit: page_size,
        }
    }
}

type Pairs = Vec<(&'static str, String)>;

fn push_text(pairs: &mut Pairs, name: &'static str, value: &Option<String>) {
    if let Some(v) = value.as_deref().map(str::trim).filter(|v| !v.is_empty()) {
        pairs.push((name, v.to_string()));
    }
}

fn push_num(pairs: &mut Pairs, name: &'static str, value: Option<u64>) {
    if let Some(v) = value {
        pairs.push((name, v.to_string()));
    }
}

fn push_window(pairs: &mut Pairs, window: Option<PageWindow>) {
    if let Some(w) = window {
        push_num(pairs, "skip", Some(w.skip));
        push_num(pairs, "limit", Some(w.limit));
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct DocumentoQuery {
    pub numero_doc: Option<String>,
    pub nome_doc: Option<String>,
    pub estado: Option<String>,
    pub versao: Option<String>,
    pub criado_por: Option<String>,
    /// Free-text search across number and name.
    pub busca: Option<String>,
    pub order_by: Option<String>,
    pub order_dir: Option<SortDir>,
    pub window: Option<PageWindow>,
}

impl DocumentoQuery {
    pub fn to_pairs(&self) -> Pairs {
        let mut pairs = Vec::new();
        push_text(&mut pairs, "numero_doc", &self.numero_doc);
        push_text(&mut pairs, "nome_doc", &self.nome_doc);
        push_text(&mut pairs, "estado", &self.estado);
        push_text(&mut pairs, "versao", &self.versao);
        push_text(&mut pairs, "criado_por", &self.criado_por);
        push_text(&mut pairs, "busca", &self.busca);
        push_text(&mut pairs, "order_by", &self.order_by);
        if let Some(dir) = self.order_dir {
            pairs.push(("order_dir", dir.as_str().to_string()));
        }
        push_window(&mut pairs, self.window);
        pairs
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ArquivoQuery {
    pub nome: Option<String>,
    pub nome_original: Option<String>,
    pub tipo_doc: Option<String>,
    pub nome_interno: Option<String>,
    pub nome_hex: Option<String>,
    pub order_by: Option<String>,
    pub order_dir: Option<SortDir>,
    pub window: Option<PageWindow>,
}

impl ArquivoQuery {
    pub fn to_pairs(&self) -> Pairs {
        let mut pairs = Vec::new();
        push_text(&mut pairs, "nome", &self.nome);
        push_text(&mut pairs, "nome_original", &self.nome_original);
        push_text(&mut pairs, "tipo_doc", &self.tipo_doc);
        push_text(&mut pairs, "nome_interno", &self.nome_interno);
        push_text(&mut pairs, "nome_hex", &self.nome_hex);
        push_text(&mut pairs, "order_by", &self.order_by);
        if let Some(dir) = self.order_dir {
            pairs.push(("order_dir", dir.as_str().to_string()));
        }
        push_window(&mut pairs, self.window);
        pairs
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct LogQuery {
    pub tipo: Option<String>,
    pub window: Option<PageWindow>,
}

impl LogQuery {
    pub fn to_pairs(&self) -> Pairs {
        let mut pairs = Vec::new();
        push_text(&mut pairs, "tipo", &self.tipo);
        push_window(&mut pairs, self.window);
        pairs
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_window_is_one_based() {
        assert_eq!(PageWindow::new(1, 50), PageWindow { skip: 0, limit: 50 });
        assert_eq!(PageWindow::new(3, 50), PageWindow { skip: 100, limit: 50 });
        assert_eq!(PageWindow::new(0, 50).skip, 0);
    }

    #[test]
    fn blank_values_are_left_out() {
        let query = ArquivoQuery {
            nome: Some("  ".into()),
            nome_hex: Some(" 3a9f ".into()),
            order_dir: Some(SortDir::Desc),
            window: Some(PageWindow::new(2, 25)),
            ..Default::default()
        };
        assert_eq!(
            query.to_pairs(),
            vec![
                ("nome_hex", "3a9f".to_string()),
                ("order_dir", "desc".to_string()),
                ("skip", "25".to_string()),
                ("limit", "25".to_string()),
            ]
        );
    }

    #[test]
    fn empty_queries_have_no_pairs() {
        assert!(DocumentoQuery::default().to_pairs().is_empty());
        assert!(LogQuery::default().to_pairs().is_empty());
        let logs = LogQuery {
            tipo: Some("verify".into()),
            window: None,
        };
        assert_eq!(logs.to_pairs(), vec![("tipo", "verify".to_string())]);
    }
}
