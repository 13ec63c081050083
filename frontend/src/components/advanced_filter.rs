use common::filter::{ConditionEdit, FilterCondition, FilterField, FilterLogic, FilterOperator, FilterSet};
use web_sys::{HtmlInputElement, HtmlSelectElement};
use yew::html::TargetCast;
use yew::{html, Callback, Component, Context, Event, Html, InputEvent, MouseEvent, Properties};

#[derive(Properties, PartialEq)]
pub struct AdvancedFilterProps {
    /// Conditions currently applied to the listing; the panel starts from them.
    pub applied: Vec<FilterCondition>,
    pub on_apply: Callback<Vec<FilterCondition>>,
    pub on_close: Callback<()>,
}

pub enum Msg {
    Add,
    Remove(u32),
    Edit(u32, ConditionEdit),
    Clear,
    Apply,
}

/// Condition builder for the file listing.
pub struct AdvancedFilter {
    set: FilterSet,
}

impl AdvancedFilter {
    fn row(&self, ctx: &Context<Self>, index: usize, cond: &FilterCondition) -> Html {
        let id = cond.id;
        let link = ctx.link();

        let on_logic = link.callback(move |e: Event| {
            let select: HtmlSelectElement = e.target_unchecked_into();
            let logic = FilterLogic::parse(&select.value()).unwrap_or_default();
            Msg::Edit(id, ConditionEdit::Logic(logic))
        });
        let on_field = link.batch_callback(move |e: Event| {
            let select: HtmlSelectElement = e.target_unchecked_into();
            FilterField::parse(&select.value()).map(|f| Msg::Edit(id, ConditionEdit::Field(f)))
        });
        let on_operator = link.batch_callback(move |e: Event| {
            let select: HtmlSelectElement = e.target_unchecked_into();
            FilterOperator::parse(&select.value()).map(|o| Msg::Edit(id, ConditionEdit::Operator(o)))
        });
        let on_value = link.callback(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            Msg::Edit(id, ConditionEdit::Value(input.value()))
        });
        let removable = self.set.conditions().len() > 1;

        html! {
            <div class="filter-row" key={id.to_string()}>
                if index == 0 {
                    <span class="filter-where">{"Onde"}</span>
                } else {
                    <select class="filter-logic" onchange={on_logic}>
                        { for [FilterLogic::And, FilterLogic::Or].into_iter().map(|l| html! {
                            <option value={l.as_str()} selected={l == cond.logic}>{ l.as_str() }</option>
                        }) }
                    </select>
                }
                <select class="filter-field" onchange={on_field}>
                    { for FilterField::ALL.into_iter().map(|f| html! {
                        <option value={f.as_str()} selected={f == cond.field}>{ f.label() }</option>
                    }) }
                </select>
                <select class="filter-operator" onchange={on_operator}>
                    { for FilterOperator::ALL.into_iter().map(|o| html! {
                        <option value={o.as_str()} selected={o == cond.operator}>{ o.label() }</option>
                    }) }
                </select>
                <input
                    class="filter-value"
                    type="text"
                    placeholder="Valor..."
                    value={cond.value.clone()}
                    oninput={on_value}
                />
                <button
                    class="icon-btn"
                    title="Remover condição"
                    disabled={!removable}
                    onclick={link.callback(move |_: MouseEvent| Msg::Remove(id))}
                >
                    <span class="material-icons-outlined">{"delete"}</span>
                </button>
            </div>
        }
    }
}

impl Component for AdvancedFilter {
    type Message = Msg;
    type Properties = AdvancedFilterProps;

    fn create(ctx: &Context<Self>) -> Self {
        Self {
            set: FilterSet::from_applied(&ctx.props().applied),
        }
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            Msg::Add => self.set.add(),
            Msg::Remove(id) => self.set.remove(id),
            Msg::Edit(id, edit) => self.set.update(id, edit),
            Msg::Clear => {
                self.set.clear();
                ctx.props().on_apply.emit(Vec::new());
            }
            Msg::Apply => {
                ctx.props().on_apply.emit(self.set.active());
                ctx.props().on_close.emit(());
                return false;
            }
        }
        true
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let link = ctx.link();
        let on_close = ctx.props().on_close.reform(|_: MouseEvent| ());

        html! {
            <div class="filter-panel">
                <div class="filter-header">
                    <h3>{"Filtros Avançados"}</h3>
                    <button class="icon-btn" onclick={on_close}>
                        <span class="material-icons-outlined">{"close"}</span>
                    </button>
                </div>
                <div class="filter-rows">
                    { for self.set.conditions().iter().enumerate().map(|(i, c)| self.row(ctx, i, c)) }
                </div>
                <div class="filter-actions">
                    <button class="btn btn-link" onclick={link.callback(|_: MouseEvent| Msg::Add)}>
                        <span class="material-icons-outlined">{"add"}</span>
                        {"Adicionar condição"}
                    </button>
                    <div class="filter-actions-right">
                        <button class="btn btn-secondary" onclick={link.callback(|_: MouseEvent| Msg::Clear)}>
                            {"Limpar"}
                        </button>
                        <button class="btn btn-primary" onclick={link.callback(|_: MouseEvent| Msg::Apply)}>
                            {"Aplicar Filtros"}
                        </button>
                    </div>
                </div>
            </div>
        }
    }
}
