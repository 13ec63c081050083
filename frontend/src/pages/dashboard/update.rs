use common::error::ApiError;
use common::model::restore::RestoreRequest;
use common::model::verify::VerifyRequest;
use common::requests::{ArquivoQuery, DocumentoQuery, SortDir};
use yew::platform::spawn_local;
use yew::prelude::*;

use super::messages::Msg;
use super::state::{Dashboard, Listing, Tab};
use crate::api::ApiClient;
use crate::app::Page;
use crate::components::items_table::SortConfig;
use crate::helpers::{alert, confirm, prompt, show_toast, ToastKind};

pub fn update(dashboard: &mut Dashboard, ctx: &Context<Dashboard>, msg: Msg) -> bool {
    match msg {
        Msg::Load => {
            load(dashboard, ctx);
            true
        }

        Msg::Loaded { seq, result } => {
            if seq != dashboard.load_seq {
                return false;
            }
            dashboard.loading = false;
            match result {
                Ok(listing) => dashboard.listing = listing,
                Err(err) => {
                    gloo_console::error!(format!("falha ao carregar listagem: {}", err));
                    show_toast(&err.user_message("Erro ao carregar dados"), ToastKind::Error);
                    dashboard.listing = Listing::default();
                }
            }
            true
        }

        Msg::LoadStats => {
            let api = dashboard.api.clone();
            let link = ctx.link().clone();
            spawn_local(async move {
                link.send_message(Msg::StatsLoaded(api.stats().await));
            });
            false
        }

        Msg::StatsLoaded(result) => match result {
            Ok(stats) => {
                dashboard.stats = Some(stats);
                true
            }
            Err(err) => {
                gloo_console::error!(format!("falha ao carregar estatísticas: {}", err));
                false
            }
        },

        Msg::LoadConfig => {
            let api = dashboard.api.clone();
            let link = ctx.link().clone();
            spawn_local(async move {
                link.send_message(Msg::ConfigLoaded(api.configuracoes().await));
            });
            false
        }

        Msg::ConfigLoaded(result) => {
            match result {
                Ok(config) => dashboard.destino = config.restore_destination(),
                Err(err) => gloo_console::warn!(format!("configurações indisponíveis: {}", err)),
            }
            false
        }

        Msg::SetTab(tab) => {
            if dashboard.tab == tab {
                return false;
            }
            dashboard.tab = tab;
            dashboard.cursor.restart();
            load(dashboard, ctx);
            true
        }

        Msg::SearchInput(value) => {
            dashboard.search = value;
            true
        }

        Msg::SearchSubmit => {
            dashboard.applied_search = dashboard.search.trim().to_string();
            dashboard.cursor.restart();
            load(dashboard, ctx);
            true
        }

        Msg::SetEstado(estado) => {
            dashboard.estado = estado;
            dashboard.cursor.restart();
            load(dashboard, ctx);
            true
        }

        Msg::Sort(column) => {
            let direction = match &dashboard.sort {
                Some(sort) if sort.column == column => sort.direction.toggled(),
                _ => SortDir::Asc,
            };
            dashboard.sort = Some(SortConfig { column, direction });
            dashboard.cursor.restart();
            load(dashboard, ctx);
            true
        }

        Msg::SetPage(page) => {
            if dashboard.cursor.page() == page {
                return false;
            }
            dashboard.cursor.go_to(page);
            load(dashboard, ctx);
            true
        }

        Msg::ToggleFilters => {
            dashboard.show_filters = !dashboard.show_filters;
            true
        }

        Msg::ApplyFilters(filters) => {
            dashboard.filters = filters;
            dashboard.cursor.restart();
            load(dashboard, ctx);
            true
        }

        Msg::SelectItem(id, checked) => dashboard.cursor.select(id, checked),

        Msg::SelectAll(checked) => {
            let ids: Vec<i64> = dashboard.visible_files().iter().map(|f| f.id).collect();
            dashboard.cursor.select_all(ids, checked);
            true
        }

        Msg::ViewItem(id) => {
            ctx.props().on_navigate.emit(Page::FileDetails(id));
            false
        }

        Msg::Restore => {
            if dashboard.cursor.selected().is_empty() {
                return false;
            }
            let Some(destino) = prompt("Caminho de destino para restauração:", &dashboard.destino)
            else {
                return false;
            };
            let request = RestoreRequest {
                arquivo_ids: dashboard.cursor.selected_ids(),
                destino,
            };
            let api = dashboard.api.clone();
            let link = ctx.link().clone();
            spawn_local(async move {
                link.send_message(Msg::Restored(api.restore(&request).await));
            });
            false
        }

        Msg::Restored(result) => match result {
            Ok(response) => {
                alert(&response.report());
                if response.success {
                    dashboard.cursor.clear_selection();
                }
                true
            }
            Err(err) => {
                gloo_console::error!(format!("erro na restauração: {}", err));
                alert(&err.user_message("Falha ao iniciar restauração."));
                false
            }
        },

        Msg::Verify => {
            let count = dashboard.cursor.selected().len();
            if count == 0 {
                return false;
            }
            let question = format!(
                "Deseja verificar a integridade de {} arquivos físicos no vault?",
                count
            );
            if !confirm(&question) {
                return false;
            }
            dashboard.loading = true;
            let request = VerifyRequest {
                arquivo_ids: dashboard.cursor.selected_ids(),
            };
            let api = dashboard.api.clone();
            let link = ctx.link().clone();
            spawn_local(async move {
                link.send_message(Msg::Verified(api.verify(&request).await));
            });
            true
        }

        Msg::Verified(result) => {
            match result {
                Ok(response) => alert(&response.report()),
                Err(err) => {
                    gloo_console::error!(format!("erro na verificação: {}", err));
                    alert(&err.user_message("Falha ao executar verificação."));
                }
            }
            ctx.link().send_message(Msg::LoadStats);
            load(dashboard, ctx);
            true
        }

        Msg::OpenImport => {
            dashboard.show_import = true;
            true
        }

        Msg::CloseImport => {
            dashboard.show_import = false;
            true
        }

        Msg::ImportSucceeded => {
            show_toast("Importação concluída", ToastKind::Success);
            ctx.link().send_message(Msg::LoadStats);
            load(dashboard, ctx);
            true
        }
    }
}

/// Starts a listing request, superseding any request still in flight.
fn load(dashboard: &mut Dashboard, ctx: &Context<Dashboard>) {
    dashboard.load_seq += 1;
    dashboard.loading = true;

    let seq = dashboard.load_seq;
    let tab = dashboard.tab;
    let docs = dashboard.documento_query();
    let files = dashboard.arquivo_query();
    let api = dashboard.api.clone();
    let link = ctx.link().clone();
    spawn_local(async move {
        let result = fetch_listing(&api, tab, &docs, &files).await;
        link.send_message(Msg::Loaded { seq, result });
    });
}

async fn fetch_listing(
    api: &ApiClient,
    tab: Tab,
    docs: &DocumentoQuery,
    files: &ArquivoQuery,
) -> Result<Listing, ApiError> {
    let mut listing = Listing::default();
    if tab.shows_docs() {
        listing.docs = api.documentos(docs).await?;
    }
    if tab.shows_files() {
        listing.files = api.arquivos(files).await?;
    }
    Ok(listing)
}
