use gloo::console;
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use crate::hooks::use_options::use_options;
use crate::models::options::Slot;
use crate::services::compare::compare_latest;
use crate::state::{Action, AppState, BatchId};

/// Handle returned by `use_comparison` hook
#[derive(Clone)]
pub struct ComparisonHandle {
    pub state: UseReducerHandle<AppState>,
    pub select_city: Callback<(Slot, String)>,
    pub select_parameter: Callback<String>,
    pub compare: Callback<()>,
    pub dismiss_error: Callback<()>,
}

/// Owns the page state: loads options on mount and runs comparisons on demand.
#[hook]
pub fn use_comparison() -> ComparisonHandle {
    let state = use_reducer(AppState::default);
    let last_batch = use_mut_ref(BatchId::default);

    use_options(state.dispatcher());

    let select_city = {
        let dispatcher = state.dispatcher();
        Callback::from(move |(slot, city): (Slot, String)| {
            dispatcher.dispatch(Action::SelectCity(slot, city));
        })
    };

    let select_parameter = {
        let dispatcher = state.dispatcher();
        Callback::from(move |parameter: String| {
            dispatcher.dispatch(Action::SelectParameter(parameter));
        })
    };

    // Each dispatch gets a fresh batch id; the reducer drops results of superseded batches.
    // In-flight requests are not aborted.
    let compare = {
        let state = state.clone();
        Callback::from(move |()| {
            let dispatcher = state.dispatcher();

            let request = match state.selection.comparison_request() {
                Ok(request) => request,
                Err(e) => {
                    console::warn!(&format!("Comparison rejected: {e}"));
                    dispatcher.dispatch(Action::ComparisonRejected(e));
                    return;
                }
            };

            let batch = {
                let mut last = last_batch.borrow_mut();
                *last = last.next();
                *last
            };
            dispatcher.dispatch(Action::ComparisonStarted(batch));

            spawn_local(async move {
                let outcome = compare_latest(&request).await;
                match &outcome {
                    Ok(results) => console::log!(&format!(
                        "Comparison {} published {} results",
                        batch.0,
                        results.len()
                    )),
                    Err(e) => console::warn!(&format!("Comparison {} failed: {e}", batch.0)),
                }
                dispatcher.dispatch(Action::ComparisonFinished { batch, outcome });
            });
        })
    };

    let dismiss_error = {
        let dispatcher = state.dispatcher();
        Callback::from(move |()| dispatcher.dispatch(Action::DismissError))
    };

    ComparisonHandle {
        state,
        select_city,
        select_parameter,
        compare,
        dismiss_error,
    }
}
