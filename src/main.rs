use yew::prelude::*;

use air_compare::components::{CitySelector, ErrorMessage, ParameterSelector, ResultCard};
use air_compare::hooks::use_comparison::use_comparison;
use air_compare::models::options::Slot;

#[function_component(App)]
fn app() -> Html {
    let handle = use_comparison();
    let state = &*handle.state;

    let onclick = {
        let compare = handle.compare.clone();
        Callback::from(move |_| compare.emit(()))
    };

    let button_label = if state.is_comparing() {
        "Comparing…"
    } else {
        "Compare"
    };

    html! {
        <div class="app-container">
            <header class="app-header">
                <h1>{"Compare Air Assessment Between Two Cities"}</h1>
            </header>

            <main class="app-main">
                <section class="city-grid">
                    {
                        Slot::all().iter().map(|&slot| html! {
                            <div class="city-column" key={slot.index()}>
                                <CitySelector
                                    {slot}
                                    options={state.cities.clone()}
                                    selected={state.selection.city(slot).map(|c| AttrValue::from(c.to_string()))}
                                    on_change={handle.select_city.clone()}
                                />
                                if let Some(measurement) = state.result_for(slot) {
                                    <ResultCard measurement={measurement.clone()} />
                                }
                            </div>
                        }).collect::<Html>()
                    }
                </section>

                <section class="controls">
                    <ParameterSelector
                        options={state.parameters.clone()}
                        selected={state.selection.parameter().map(|p| AttrValue::from(p.to_string()))}
                        on_change={handle.select_parameter.clone()}
                    />
                    <button class="compare-button" disabled={!state.can_compare()} {onclick}>
                        {button_label}
                    </button>
                </section>

                if let Some(error) = &state.error {
                    <ErrorMessage error={error.clone()} on_dismiss={handle.dismiss_error.clone()} />
                }
            </main>
        </div>
    }
}

fn main() {
    yew::Renderer::<App>::new().render();
}
