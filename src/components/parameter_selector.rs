use web_sys::HtmlSelectElement;
use yew::prelude::*;

use crate::models::options::ParameterOption;
use crate::state::OptionsState;

#[derive(Properties, PartialEq)]
pub struct ParameterSelectorProps {
    pub options: OptionsState<ParameterOption>,
    pub selected: Option<AttrValue>,
    pub on_change: Callback<String>,
}

/// Pollutant parameter dropdown
#[function_component(ParameterSelector)]
pub fn parameter_selector(props: &ParameterSelectorProps) -> Html {
    let on_change = {
        let callback = props.on_change.clone();
        Callback::from(move |e: Event| {
            let target: HtmlSelectElement = e.target_unchecked_into();
            callback.emit(target.value());
        })
    };

    let placeholder = if props.options.is_loading() {
        "Loading…"
    } else {
        "Select Parameter"
    };

    html! {
        <select
            class="parameter-selector"
            onchange={on_change}
            disabled={props.options.is_loading()}
            aria-label="Select pollutant parameter"
            title="Select pollutant parameter"
        >
            <option value="" selected={props.selected.is_none()}>{placeholder}</option>
            {
                props.options.items().iter().map(|p| {
                    let selected = props.selected.as_deref() == Some(p.name.as_str());
                    html! {
                        <option key={p.name.clone()} value={p.name.clone()} {selected}>{&p.display_name}</option>
                    }
                }).collect::<Html>()
            }
        </select>
    }
}
