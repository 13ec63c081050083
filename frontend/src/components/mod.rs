pub mod advanced_filter;
pub mod import;
pub mod items_table;
pub mod navbar;
pub mod pagination;
pub mod stats_card;
pub mod status_badge;
