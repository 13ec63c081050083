use common::jobs::poller::{PollEvent, PollExit};
use common::jobs::selection::SelectedFile;
use common::jobs::session::Effect;
use common::jobs::POLL_INTERVAL;
use gloo_timers::callback::Timeout;
use web_sys::HtmlInputElement;
use yew::platform::spawn_local;
use yew::prelude::*;

use super::messages::Msg;
use super::state::ImportModal;
use crate::api::GlooSleeper;

pub fn update(modal: &mut ImportModal, ctx: &Context<ImportModal>, msg: Msg) -> bool {
    match msg {
        Msg::OpenFilePicker => {
            if let Some(input) = modal.file_input_ref.cast::<HtmlInputElement>() {
                input.click();
            }
            false
        }

        Msg::FileChosen(file) => {
            modal.dragging = false;
            let selected = SelectedFile::new(file.name(), file.size() as u64);
            match modal.session.select_file(selected) {
                Ok(effects) => {
                    modal.file = Some(file);
                    run_effects(modal, ctx, effects);
                }
                Err(err) => gloo_console::debug!(format!("seleção ignorada: {:?}", err)),
            }
            true
        }

        Msg::Dragging(active) => {
            let changed = modal.dragging != active;
            modal.dragging = active;
            changed
        }

        Msg::ToggleAsync(enabled) => modal.session.set_async_mode(enabled).is_ok(),

        Msg::Submit => match modal.session.submit() {
            Ok(effect) => {
                run_effects(modal, ctx, vec![effect]);
                true
            }
            Err(err) => {
                gloo_console::debug!(format!("envio ignorado: {:?}", err));
                false
            }
        },

        Msg::Submitted { attempt, result } => {
            let effects = match result {
                Ok(response) => modal.session.submission_succeeded(attempt, response),
                Err(err) => {
                    gloo_console::error!(format!("falha no envio da importação: {}", err));
                    modal.session.submission_failed(attempt, &err);
                    Vec::new()
                }
            };
            run_effects(modal, ctx, effects);
            true
        }

        Msg::Poll { job_id, event } => match event {
            PollEvent::Update(job) => {
                let effects = modal.session.job_update(&job_id, job);
                run_effects(modal, ctx, effects);
                true
            }
            PollEvent::TransientFailure(err) => {
                gloo_console::warn!(format!("consulta do job {} falhou: {}", job_id, err));
                false
            }
        },

        Msg::PollEnded { job_id, exit } => {
            if let PollExit::Finished(status) = exit {
                gloo_console::log!(format!("job {} terminou: {:?}", job_id, status));
            }
            false
        }

        Msg::AutoClose => {
            modal.close_timer = None;
            close(modal, ctx);
            true
        }

        Msg::Close => {
            close(modal, ctx);
            true
        }

        Msg::DismissError => {
            modal.session.dismiss_error();
            true
        }
    }
}

fn close(modal: &mut ImportModal, ctx: &Context<ImportModal>) {
    let effects = modal.session.close();
    run_effects(modal, ctx, effects);
    modal.close_timer = None;
    modal.file = None;
    modal.dragging = false;
    ctx.props().on_close.emit(());
}

/// Carries out what the session asked for.
fn run_effects(modal: &mut ImportModal, ctx: &Context<ImportModal>, effects: Vec<Effect>) {
    for effect in effects {
        match effect {
            Effect::Submit { attempt, async_mode } => {
                let Some(file) = modal.file.clone() else {
                    continue;
                };
                let api = modal.api.clone();
                let link = ctx.link().clone();
                spawn_local(async move {
                    let result = api.submit_import(&file, async_mode).await;
                    link.send_message(Msg::Submitted { attempt, result });
                });
            }

            Effect::StartPolling { job_id } => {
                let link = ctx.link().clone();
                let events_id = job_id.clone();
                let on_event = move |event| {
                    link.send_message(Msg::Poll {
                        job_id: events_id.clone(),
                        event,
                    })
                };
                let run = modal.poller.arm(
                    modal.api.clone(),
                    GlooSleeper,
                    job_id.clone(),
                    POLL_INTERVAL,
                    on_event,
                );
                let link = ctx.link().clone();
                spawn_local(async move {
                    let exit = run.await;
                    link.send_message(Msg::PollEnded { job_id, exit });
                });
            }

            Effect::StopPolling => modal.poller.stop(),

            Effect::ScheduleClose(delay) => {
                ctx.props().on_success.emit(());
                let link = ctx.link().clone();
                let millis = u32::try_from(delay.as_millis()).unwrap_or(u32::MAX);
                modal.close_timer = Some(Timeout::new(millis, move || {
                    link.send_message(Msg::AutoClose)
                }));
            }
        }
    }
}
