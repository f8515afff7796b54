use collatz_chain::utils::parse_upper_bound;
use web_sys::HtmlInputElement;
use yew::prelude::*;

/// State and callbacks for the upper bound text field.
#[derive(Clone)]
pub struct UpperBoundInput {
    /// Text currently in the field.
    pub text: String,
    /// Last committed, validated bound.
    pub value: u64,
    pub error: Option<String>,
    pub on_text_input: Callback<InputEvent>,
    /// Parse the current text and commit it if valid.
    pub on_commit: Callback<()>,
    /// Commit a bound directly, bypassing the text field.
    pub set_value: Callback<u64>,
}

/// Keeps the upper bound text and its parsed value in step.
///
/// The text is only parsed on commit, so partially typed values such as
/// "1e" never reach the committed `value`.
#[hook]
pub fn use_upper_bound_input(initial_value: u64, max: u64) -> UpperBoundInput {
    let value = use_state(|| initial_value);
    let text = use_state(|| initial_value.to_string());
    let error = use_state(|| None::<String>);

    let on_text_input = {
        let text = text.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            text.set(input.value());
        })
    };

    let on_commit = {
        let value = value.clone();
        let text = text.clone();
        let error = error.clone();
        Callback::from(move |_| match parse_upper_bound(&text, max) {
            Ok(bound) => {
                value.set(bound);
                text.set(bound.to_string());
                error.set(None);
            }
            Err(msg) => error.set(Some(msg)),
        })
    };

    let set_value = {
        let value = value.clone();
        let text = text.clone();
        let error = error.clone();
        Callback::from(move |bound: u64| {
            value.set(bound);
            text.set(bound.to_string());
            error.set(None);
        })
    };

    UpperBoundInput {
        text: (*text).clone(),
        value: *value,
        error: (*error).clone(),
        on_text_input,
        on_commit,
        set_value,
    }
}
