use common::error::ApiError;
use common::filter::FilterCondition;
use common::model::config::Configuracoes;
use common::model::restore::RestoreResponse;
use common::model::stats::Stats;
use common::model::verify::VerifyResponse;

use super::state::{Listing, Tab};

pub enum Msg {
    Load,
    Loaded {
        seq: u64,
        result: Result<Listing, ApiError>,
    },
    LoadStats,
    StatsLoaded(Result<Stats, ApiError>),
    LoadConfig,
    ConfigLoaded(Result<Configuracoes, ApiError>),

    SetTab(Tab),
    /// Search box edit; narrows the current page without a request.
    SearchInput(String),
    /// Enter or the search button; asks the service.
    SearchSubmit,
    SetEstado(Option<String>),
    Sort(String),
    SetPage(u64),
    ToggleFilters,
    ApplyFilters(Vec<FilterCondition>),

    SelectItem(i64, bool),
    SelectAll(bool),
    ViewItem(i64),

    Restore,
    Restored(Result<RestoreResponse, ApiError>),
    Verify,
    Verified(Result<VerifyResponse, ApiError>),

    OpenImport,
    CloseImport,
    ImportSucceeded,
}
