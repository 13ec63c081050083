use yew::{classes, html, AttrValue, Component, Context, Html, Properties};

use crate::helpers::format_count;

#[derive(Properties, PartialEq)]
pub struct StatsCardProps {
    pub icon: AttrValue,
    pub label: AttrValue,
    pub value: u64,
    /// Colour modifier, `"blue"` renders as `stats-card-blue`.
    pub tone: AttrValue,
    #[prop_or_default]
    pub badge: Option<AttrValue>,
}

pub struct StatsCard;

impl Component for StatsCard {
    type Message = ();
    type Properties = StatsCardProps;

    fn create(_ctx: &Context<Self>) -> Self {
        StatsCard
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let props = ctx.props();
        html! {
            <div class={classes!("stats-card", format!("stats-card-{}", props.tone))}>
                <div class="stats-card-icon">
                    <span class="material-icons-outlined">{ props.icon.clone() }</span>
                </div>
                <div class="stats-card-body">
                    <span class="stats-card-value">{ format_count(props.value) }</span>
                    <span class="stats-card-label">{ props.label.clone() }</span>
                </div>
                if let Some(badge) = &props.badge {
                    <span class="stats-card-badge">{ badge.clone() }</span>
                }
            </div>
        }
    }
}
