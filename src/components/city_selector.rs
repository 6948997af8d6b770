use web_sys::HtmlSelectElement;
use yew::prelude::*;

use crate::models::options::{CityOption, Slot};
use crate::state::OptionsState;

#[derive(Properties, PartialEq)]
pub struct CitySelectorProps {
    pub slot: Slot,
    pub options: OptionsState<CityOption>,
    pub selected: Option<AttrValue>,
    pub on_change: Callback<(Slot, String)>,
}

/// City dropdown for one comparison slot
#[function_component(CitySelector)]
pub fn city_selector(props: &CitySelectorProps) -> Html {
    let on_change = {
        let callback = props.on_change.clone();
        let slot = props.slot;
        Callback::from(move |e: Event| {
            let target: HtmlSelectElement = e.target_unchecked_into();
            callback.emit((slot, target.value()));
        })
    };

    let label = format!("Select City {}", props.slot);
    let placeholder = if props.options.is_loading() {
        "Loading…"
    } else {
        "Select City"
    };

    html! {
        <div class="city-selector">
            <h3>{label.clone()}</h3>
            <select
                onchange={on_change}
                disabled={props.options.is_loading()}
                aria-label={label.clone()}
                title={label.clone()}
            >
                <option value="" selected={props.selected.is_none()}>{placeholder}</option>
                {
                    props.options.items().iter().map(|city| {
                        let selected = props.selected.as_deref() == Some(city.id.as_str());
                        html! {
                            <option key={city.id.clone()} value={city.id.clone()} {selected}>{&city.id}</option>
                        }
                    }).collect::<Html>()
                }
            </select>
        </div>
    }
}
