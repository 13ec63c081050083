use common::jobs::selection::{ACCEPT_ATTR, ASYNC_THRESHOLD_BYTES};
use common::jobs::session::ImportState;
use web_sys::{DragEvent, HtmlInputElement};
use yew::prelude::*;

use super::messages::Msg;
use super::state::ImportModal;

pub fn view(modal: &ImportModal, ctx: &Context<ImportModal>) -> Html {
    if !ctx.props().is_open {
        return html! {};
    }
    let link = ctx.link();
    let state = modal.session.state();
    let busy = state.is_busy();
    let locked = busy || state.awaiting_ack();

    html! {
        <div class="modal-overlay">
            <div class="modal">
                <div class="modal-header">
                    <h2>{"Importar Dados"}</h2>
                    <button class="icon-btn" onclick={link.callback(|_: MouseEvent| Msg::Close)}>
                        <span class="material-icons-outlined">{"close"}</span>
                    </button>
                </div>

                <div class="modal-body">
                    { drop_zone(modal, ctx, locked) }
                    { file_summary(modal) }
                    { async_toggle(modal, ctx, locked) }
                    { feedback(state, ctx) }
                </div>

                <div class="modal-footer">
                    <button class="btn btn-secondary" onclick={link.callback(|_: MouseEvent| Msg::Close)}>
                        { if matches!(state, ImportState::JobFailed { .. }) { "Fechar" } else { "Cancelar" } }
                    </button>
                    <button
                        class="btn btn-primary"
                        disabled={!modal.session.can_submit()}
                        onclick={link.callback(|_: MouseEvent| Msg::Submit)}
                    >
                        if busy {
                            <span class="material-icons-outlined spin">{"refresh"}</span>
                            {"Importando..."}
                        } else {
                            <span class="material-icons-outlined">{"upload"}</span>
                            {"Importar"}
                        }
                    </button>
                </div>
            </div>
        </div>
    }
}

fn drop_zone(modal: &ImportModal, ctx: &Context<ImportModal>, locked: bool) -> Html {
    let link = ctx.link();

    let on_change = link.batch_callback(|e: Event| {
        let input: HtmlInputElement = e.target_unchecked_into();
        let file = input.files().and_then(|files| files.get(0));
        // Reset so picking the same file again still fires `change`.
        input.set_value("");
        file.map(Msg::FileChosen)
    });
    let on_drag_over = link.callback(|e: DragEvent| {
        e.prevent_default();
        Msg::Dragging(true)
    });
    let on_drag_leave = link.callback(|_: DragEvent| Msg::Dragging(false));
    let on_drop = link.callback(|e: DragEvent| {
        e.prevent_default();
        match e.data_transfer().and_then(|dt| dt.files()).and_then(|f| f.get(0)) {
            Some(file) => Msg::FileChosen(file),
            None => Msg::Dragging(false),
        }
    });
    let on_click = if locked {
        Callback::noop()
    } else {
        link.callback(|_: MouseEvent| Msg::OpenFilePicker)
    };

    html! {
        <div
            class={classes!("drop-zone", modal.dragging.then_some("dragging"), locked.then_some("disabled"))}
            onclick={on_click}
            ondragover={on_drag_over}
            ondragleave={on_drag_leave}
            ondrop={on_drop}
        >
            <input
                ref={modal.file_input_ref.clone()}
                type="file"
                accept={ACCEPT_ATTR}
                class="hidden"
                onchange={on_change}
            />
            <span class="material-icons-outlined drop-icon">{"cloud_upload"}</span>
            <p>{"Arraste um arquivo aqui ou clique para selecionar"}</p>
            <p class="hint">{"Formatos aceitos: CSV, JSON, Markdown"}</p>
        </div>
    }
}

fn file_summary(modal: &ImportModal) -> Html {
    let Some(file) = modal.session.selection().file() else {
        return html! {};
    };
    let format = file
        .format()
        .map(|f| f.label())
        .unwrap_or("formato desconhecido");

    html! {
        <div class="file-summary">
            <span class="material-icons-outlined">{"description"}</span>
            <div>
                <div class="file-name">{ &file.name }</div>
                <div class="file-meta">
                    { format!("{:.2} MB · {}", file.size as f64 / 1_048_576.0, format) }
                </div>
            </div>
        </div>
    }
}

fn async_toggle(modal: &ImportModal, ctx: &Context<ImportModal>, locked: bool) -> Html {
    let on_toggle = ctx.link().callback(|e: Event| {
        let input: HtmlInputElement = e.target_unchecked_into();
        Msg::ToggleAsync(input.checked())
    });
    let threshold_mb = ASYNC_THRESHOLD_BYTES / 1_048_576;

    html! {
        <label class="async-toggle">
            <input
                type="checkbox"
                checked={modal.session.selection().async_mode()}
                disabled={locked}
                onchange={on_toggle}
            />
            <span>{"Processar em segundo plano"}</span>
            <span class="hint">
                { format!("Recomendado para arquivos acima de {} MB", threshold_mb) }
            </span>
        </label>
    }
}

fn feedback(state: &ImportState, ctx: &Context<ImportModal>) -> Html {
    if let Some(progress) = state.progress() {
        return html! {
            <div class="import-progress">
                <div class="progress-track">
                    <div class="progress-fill" style={format!("width: {:.0}%", progress.percent)} />
                </div>
                <div class="progress-caption">{ progress.caption() }</div>
                if progress.inserted > 0 {
                    <div class="progress-caption">{ format!("{} registros inseridos", progress.inserted) }</div>
                }
            </div>
        };
    }
    if let Some(message) = state.success() {
        return html! {
            <div class="alert alert-success">
                <span class="material-icons-outlined">{"check_circle"}</span>
                { message }
            </div>
        };
    }
    match state {
        ImportState::Idle { error: Some(message) } => html! {
            <div class="alert alert-error">
                <span class="material-icons-outlined">{"error"}</span>
                <span>{ message }</span>
                <button class="icon-btn" onclick={ctx.link().callback(|_: MouseEvent| Msg::DismissError)}>
                    <span class="material-icons-outlined">{"close"}</span>
                </button>
            </div>
        },
        ImportState::JobFailed { job_id, message } => html! {
            <div class="alert alert-error">
                <span class="material-icons-outlined">{"error"}</span>
                <div>
                    <div>{ message }</div>
                    <div class="hint">{ format!("Job {}", job_id) }</div>
                </div>
            </div>
        },
        _ => html! {},
    }
}
