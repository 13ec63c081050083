//! Advanced filter conditions for the file listing.
//!
//! The listing endpoint only understands a handful of parameters, so
//! [`apply_to_query`] maps what it can onto [`ArquivoQuery`] and drops the rest.
//! The free-text search box is applied client side with [`matches_search`].

use crate::requests::ArquivoQuery;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterField {
    NomeArquivo,
    NomeOriginal,
    NomeInternoApp,
    NomeHex,
    TipoDoc,
    NumeroDoc,
}

impl FilterField {
    pub const ALL: [FilterField; 6] = [
        FilterField::NomeArquivo,
        FilterField::NomeOriginal,
        FilterField::NomeInternoApp,
        FilterField::NomeHex,
        FilterField::TipoDoc,
        FilterField::NumeroDoc,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            FilterField::NomeArquivo => "nome_arquivo",
            FilterField::NomeOriginal => "nome_original",
            FilterField::NomeInternoApp => "nome_interno_app",
            FilterField::NomeHex => "nome_hex",
            FilterField::TipoDoc => "tipo_doc",
            FilterField::NumeroDoc => "numero_doc",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            FilterField::NomeArquivo => "Nome Arquivo",
            FilterField::NomeOriginal => "Nome Original",
            FilterField::NomeInternoApp => "Nome Interno",
            FilterField::NomeHex => "Nome Hex (Vault)",
            FilterField::TipoDoc => "Tipo Documento",
            FilterField::NumeroDoc => "Número Documento",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.as_str() == value)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterOperator {
    Contains,
    Equals,
    StartsWith,
    EndsWith,
}

impl FilterOperator {
    pub const ALL: [FilterOperator; 4] = [
        FilterOperator::Contains,
        FilterOperator::Equals,
        FilterOperator::StartsWith,
        FilterOperator::EndsWith,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            FilterOperator::Contains => "contains",
            FilterOperator::Equals => "equals",
            FilterOperator::StartsWith => "startsWith",
            FilterOperator::EndsWith => "endsWith",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            FilterOperator::Contains => "Contém",
            FilterOperator::Equals => "Igual a",
            FilterOperator::StartsWith => "Começa com",
            FilterOperator::EndsWith => "Termina com",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|o| o.as_str() == value)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FilterLogic {
    #[default]
    And,
    Or,
}

impl FilterLogic {
    pub fn as_str(self) -> &'static str {
        match self {
            FilterLogic::And => "AND",
            FilterLogic::Or => "OR",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "AND" => Some(FilterLogic::And),
            "OR" => Some(FilterLogic::Or),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterCondition {
    pub id: u32,
    pub field: FilterField,
    pub operator: FilterOperator,
    pub value: String,
    pub logic: FilterLogic,
}

impl FilterCondition {
    fn blank(id: u32) -> Self {
        Self {
            id,
            field: FilterField::NomeArquivo,
            operator: FilterOperator::Contains,
            value: String::new(),
            logic: FilterLogic::And,
        }
    }

    pub fn is_active(&self) -> bool {
        !self.value.trim().is_empty()
    }
}

/// One edit to a condition row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConditionEdit {
    Field(FilterField),
    Operator(FilterOperator),
    Value(String),
    Logic(FilterLogic),
}

/// Editable list of condition rows. Never empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterSet {
    conditions: Vec<FilterCondition>,
    next_id: u32,
}

impl Default for FilterSet {
    fn default() -> Self {
        Self {
            conditions: vec![FilterCondition::blank(1)],
            next_id: 2,
        }
    }
}

impl FilterSet {
    /// Starts from previously applied conditions, or a single blank row.
    pub fn from_applied(applied: &[FilterCondition]) -> Self {
        if applied.is_empty() {
            return Self::default();
        }
        let next_id = applied.iter().map(|c| c.id).max().unwrap_or(0) + 1;
        Self {
            conditions: applied.to_vec(),
            next_id,
        }
    }

    pub fn conditions(&self) -> &[FilterCondition] {
        &self.conditions
    }

    pub fn add(&mut self) {
        self.conditions.push(FilterCondition::blank(self.next_id));
        self.next_id += 1;
    }

    /// Removes a row unless it is the last one.
    pub fn remove(&mut self, id: u32) {
        if self.conditions.len() > 1 {
            self.conditions.retain(|c| c.id != id);
        }
    }

    pub fn update(&mut self, id: u32, edit: ConditionEdit) {
        if let Some(cond) = self.conditions.iter_mut().find(|c| c.id == id) {
            match edit {
                ConditionEdit::Field(f) => cond.field = f,
                ConditionEdit::Operator(o) => cond.operator = o,
                ConditionEdit::Value(v) => cond.value = v,
                ConditionEdit::Logic(l) => cond.logic = l,
            }
        }
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Conditions with a non-blank value, in row order.
    pub fn active(&self) -> Vec<FilterCondition> {
        self.conditions.iter().filter(|c| c.is_active()).cloned().collect()
    }
}

/// Copies the conditions the listing endpoint supports into `query`.
/// The service matches every parameter as a case-insensitive substring, so
/// only `Contains` is forwarded; other operators would widen the result.
/// Later conditions on the same parameter win.
pub fn apply_to_query(conditions: &[FilterCondition], query: &mut ArquivoQuery) {
    for cond in conditions
        .iter()
        .filter(|c| c.is_active() && c.operator == FilterOperator::Contains)
    {
        let value = Some(cond.value.trim().to_string());
        match cond.field {
            FilterField::NomeInternoApp => query.nome_interno = value,
            FilterField::NomeArquivo => query.nome = value,
            FilterField::NomeOriginal => query.nome_original = value,
            FilterField::NomeHex => query.nome_hex = value,
            FilterField::TipoDoc => query.tipo_doc = value,
            FilterField::NumeroDoc => {}
        }
    }
}

/// Case-insensitive substring match of `term` against any of `fields`.
/// A blank term matches everything.
pub fn matches_search<'a>(term: &str, fields: impl IntoIterator<Item = Option<&'a str>>) -> bool {
    let term = term.trim().to_lowercase();
    if term.is_empty() {
        return true;
    }
    fields
        .into_iter()
        .flatten()
        .any(|f| f.to_lowercase().contains(&term))
}
