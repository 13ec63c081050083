//! Document registry: counters, the combined document/file listing and the
//! batch actions (restore, integrity check, import).
//!
//! Every listing request carries a sequence number; answers to requests that
//! were superseded by a newer one are dropped in `update`.

use yew::prelude::*;

mod messages;
mod state;
mod update;
mod view;

pub use messages::Msg;
pub use state::{Dashboard, DashboardProps};

impl Component for Dashboard {
    type Message = Msg;
    type Properties = DashboardProps;

    fn create(ctx: &Context<Self>) -> Self {
        ctx.link().send_message_batch(vec![Msg::LoadStats, Msg::LoadConfig, Msg::Load]);
        Dashboard::new(ctx.props())
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        update::update(self, ctx, msg)
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        view::view(self, ctx)
    }
}
