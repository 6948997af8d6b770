use gloo::console;
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use crate::services::api::{fetch_city_options, fetch_parameter_options};
use crate::state::{Action, AppState};

/// Loads the city and parameter lists once on mount.
///
/// The two requests are independent; a failure in one leaves the other list usable.
#[hook]
pub fn use_options(dispatcher: UseReducerDispatcher<AppState>) {
    use_effect_with((), move |_| {
        let cities = dispatcher.clone();
        spawn_local(async move {
            let result = fetch_city_options().await;
            match &result {
                Ok(options) => console::log!(&format!("Loaded {} cities", options.len())),
                Err(e) => console::error!(&format!("Failed to load cities: {e}")),
            }
            cities.dispatch(Action::CitiesLoaded(result));
        });

        let parameters = dispatcher;
        spawn_local(async move {
            let result = fetch_parameter_options().await;
            match &result {
                Ok(options) => console::log!(&format!("Loaded {} parameters", options.len())),
                Err(e) => console::error!(&format!("Failed to load parameters: {e}")),
            }
            parameters.dispatch(Action::ParametersLoaded(result));
        });

        || () // Cleanup
    });
}
