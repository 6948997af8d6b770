use crate::models::error::{AppError, ErrorKind};
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct ErrorMessageProps {
    pub error: AppError,
    pub on_dismiss: Callback<()>,
}

/// Page-level error line with a close button
#[function_component(ErrorMessage)]
pub fn error_message(props: &ErrorMessageProps) -> Html {
    let class = match props.error.kind() {
        ErrorKind::Validation => "error-message validation",
        ErrorKind::Transport => "error-message transport",
        ErrorKind::NoData => "error-message no-data",
    };

    let onclick = {
        let on_dismiss = props.on_dismiss.clone();
        Callback::from(move |_| on_dismiss.emit(()))
    };

    html! {
        <div class={class} role="alert">
            <button class="close" {onclick} aria-label="Dismiss" title="Dismiss">{"×"}</button>
            <p>{"❌ "}{props.error.to_string()}</p>
        </div>
    }
}
