use common::model::documento::StatusBadge as Badge;
use yew::{classes, html, AttrValue, Component, Context, Html, Properties};

#[derive(Properties, PartialEq)]
pub struct StatusBadgeProps {
    #[prop_or_default]
    pub estado: Option<AttrValue>,
}

pub struct StatusBadge;

impl Component for StatusBadge {
    type Message = ();
    type Properties = StatusBadgeProps;

    fn create(_ctx: &Context<Self>) -> Self {
        StatusBadge
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let badge = Badge::from_estado(ctx.props().estado.as_deref());
        html! {
            <span class={classes!("status-badge", badge.css_class())}>
                <span class="status-dot" />
                { badge.label() }
            </span>
        }
    }
}
