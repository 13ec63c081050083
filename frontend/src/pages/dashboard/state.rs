use common::filter::{apply_to_query, matches_search, FilterCondition};
use common::model::arquivo::Arquivo;
use common::model::config::DEFAULT_DESTINATION;
use common::model::documento::Documento;
use common::model::page::Paginated;
use common::model::stats::Stats;
use common::pagination::ListingCursor;
use common::requests::{ArquivoQuery, DocumentoQuery};
use yew::prelude::*;

use crate::api::ApiClient;
use crate::app::Page;
use crate::components::items_table::SortConfig;
use crate::config::PAGE_SIZE;

#[derive(Properties, PartialEq)]
pub struct DashboardProps {
    pub api: ApiClient,
    pub on_navigate: Callback<Page>,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Tab {
    #[default]
    Todos,
    Documentos,
    Arquivos,
}

impl Tab {
    pub fn shows_docs(self) -> bool {
        matches!(self, Tab::Todos | Tab::Documentos)
    }

    pub fn shows_files(self) -> bool {
        matches!(self, Tab::Todos | Tab::Arquivos)
    }
}

/// One answer of the listing endpoints for the current page.
#[derive(Debug, Default)]
pub struct Listing {
    pub docs: Paginated<Documento>,
    pub files: Paginated<Arquivo>,
}

pub struct Dashboard {
    pub api: ApiClient,
    pub stats: Option<Stats>,
    pub listing: Listing,
    pub loading: bool,
    pub load_seq: u64,

    pub tab: Tab,
    pub search: String,
    /// Search term last sent to the service.
    pub applied_search: String,
    pub estado: Option<String>,
    pub filters: Vec<FilterCondition>,
    pub show_filters: bool,
    pub sort: Option<SortConfig>,
    pub cursor: ListingCursor,
    pub destino: String,
    pub show_import: bool,
}

impl Dashboard {
    pub fn new(props: &DashboardProps) -> Self {
        Self {
            api: props.api.clone(),
            stats: None,
            listing: Listing::default(),
            loading: true,
            load_seq: 0,
            tab: Tab::default(),
            search: String::new(),
            applied_search: String::new(),
            estado: None,
            filters: Vec::new(),
            show_filters: false,
            sort: None,
            cursor: ListingCursor::default(),
            destino: DEFAULT_DESTINATION.to_string(),
            show_import: false,
        }
    }

    fn non_blank(value: &str) -> Option<String> {
        Some(value.trim().to_string()).filter(|v| !v.is_empty())
    }

    pub fn documento_query(&self) -> DocumentoQuery {
        DocumentoQuery {
            estado: self.estado.clone(),
            busca: Self::non_blank(&self.applied_search),
            order_by: self.sort.as_ref().map(|s| s.column.clone()),
            order_dir: self.sort.as_ref().map(|s| s.direction),
            window: Some(self.cursor.window(PAGE_SIZE)),
            ..DocumentoQuery::default()
        }
    }

    /// Advanced filters are applied after the search term, so a filter on
    /// the file name replaces the term.
    pub fn arquivo_query(&self) -> ArquivoQuery {
        let mut query = ArquivoQuery {
            nome: Self::non_blank(&self.applied_search),
            order_by: self.sort.as_ref().map(|s| s.column.clone()),
            order_dir: self.sort.as_ref().map(|s| s.direction),
            window: Some(self.cursor.window(PAGE_SIZE)),
            ..ArquivoQuery::default()
        };
        apply_to_query(&self.filters, &mut query);
        query
    }

    /// Rows of the current page matching the search box.
    pub fn visible_docs(&self) -> Vec<Documento> {
        if !self.tab.shows_docs() {
            return Vec::new();
        }
        self.listing
            .docs
            .items
            .iter()
            .filter(|d| {
                matches_search(&self.search, [Some(d.numero_doc.as_str()), Some(d.nome_doc.as_str())])
            })
            .cloned()
            .collect()
    }

    pub fn visible_files(&self) -> Vec<Arquivo> {
        if !self.tab.shows_files() {
            return Vec::new();
        }
        self.listing
            .files
            .items
            .iter()
            .filter(|a| {
                matches_search(
                    &self.search,
                    [Some(a.nome_arquivo.as_str()), a.nome_original.as_deref()],
                )
            })
            .cloned()
            .collect()
    }

    /// Item count driving the page strip. On the combined tab both listings
    /// share the same window, so the longer one decides.
    pub fn total_items(&self) -> u64 {
        match self.tab {
            Tab::Documentos => self.listing.docs.total,
            Tab::Arquivos => self.listing.files.total,
            Tab::Todos => self.listing.docs.total.max(self.listing.files.total),
        }
    }
}
