use crate::models::measurement::MeasurementResult;
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct ResultCardProps {
    pub measurement: MeasurementResult,
}

/// Latest reading for one city, shown exactly as received
#[function_component(ResultCard)]
pub fn result_card(props: &ResultCardProps) -> Html {
    let m = &props.measurement;

    html! {
        <div class="result-card">
            <h3 class="result-city">{&m.city}</h3>
            <p class="result-value">{m.reading()}</p>
            <p class="result-parameter">{&m.parameter}</p>
            if let Some(location) = &m.location {
                <p class="result-meta">{location}</p>
            }
            if let Some(updated) = m.last_updated {
                <p class="result-meta">{format!("as of {}", updated.format("%Y-%m-%d %H:%M UTC"))}</p>
            }
        </div>
    }
}
