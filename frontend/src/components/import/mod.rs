//! Import modal: uploads a CSV, JSON or Markdown batch to the ETL service.
//!
//! Small files are imported inline. Large files (or any file when the user
//! asks for it) are handed to a background job that the modal polls once per
//! second until it completes or fails. The modal owns the poller, so
//! closing it or tearing the component down always stops polling.

use yew::prelude::*;

mod messages;
mod state;
mod update;
mod view;

pub use messages::Msg;
pub use state::{ImportModal, ImportModalProps};

impl Component for ImportModal {
    type Message = Msg;
    type Properties = ImportModalProps;

    fn create(ctx: &Context<Self>) -> Self {
        ImportModal::new(ctx.props())
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        update::update(self, ctx, msg)
    }

    fn changed(&mut self, ctx: &Context<Self>, old_props: &Self::Properties) -> bool {
        let props = ctx.props();
        if props.is_open && !old_props.is_open {
            self.reopen();
        }
        self.api = props.api.clone();
        true
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        view::view(self, ctx)
    }

    fn destroy(&mut self, _ctx: &Context<Self>) {
        self.poller.stop();
        self.close_timer = None;
    }
}
