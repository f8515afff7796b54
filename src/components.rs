//! Pure Yew view components for the Collatz chain explorer.
//!
//! Stateless pieces rendered from props or plain data; all state lives in
//! `main.rs`.

use collatz_chain::config::TRAJECTORY_PREVIEW_LEN;
use collatz_chain::utils::{format_trajectory, format_with_separators};
use collatz_chain::SolveReport;
use yew::prelude::*;

/// Renders the winning start, its chain length and the search statistics.
pub fn render_report(report: &SolveReport, chain: &[u64], from_cache: bool) -> Html {
    html! {
        <div class="results">
            <h3>{ format!("Longest chain below {}", format_with_separators(report.upper_bound)) }</h3>
            <table class="report-table">
                <tbody>
                    <tr>
                        <th>{ "Starting value" }</th>
                        <td class="answer">{ format_with_separators(report.start) }</td>
                    </tr>
                    <tr>
                        <th>{ "Chain length" }</th>
                        <td>{ format!("{} values", report.length) }</td>
                    </tr>
                    <tr>
                        <th>{ "Starts evaluated" }</th>
                        <td>{ format_with_separators(report.starts_evaluated) }</td>
                    </tr>
                    <tr>
                        <th>{ "Cache entries" }</th>
                        <td>{ format_with_separators(report.cache_entries as u64) }</td>
                    </tr>
                    <tr>
                        <th>{ "Time" }</th>
                        <td>{
                            if from_cache {
                                format!("{:.0} ms (remembered)", report.elapsed_ms)
                            } else {
                                format!("{:.0} ms", report.elapsed_ms)
                            }
                        }</td>
                    </tr>
                </tbody>
            </table>
            { render_trajectory(chain) }
        </div>
    }
}

fn render_trajectory(chain: &[u64]) -> Html {
    if chain.is_empty() {
        return html! {};
    }

    let peak = chain.iter().copied().max().unwrap_or(0);

    html! {
        <div class="trajectory">
            <div class="trajectory-peak">
                { format!("Peak value: {}", format_with_separators(peak)) }
            </div>
            <p class="trajectory-values">{ format_trajectory(chain, TRAJECTORY_PREVIEW_LEN) }</p>
        </div>
    }
}

/// Text field for the exclusive upper bound.
#[derive(Properties, PartialEq)]
pub struct BoundFieldProps {
    pub text: String,
    pub error: Option<String>,
    pub max: u64,
    pub oninput: Callback<InputEvent>,
    pub oncommit: Callback<()>,
}

#[function_component(BoundField)]
pub fn bound_field(props: &BoundFieldProps) -> Html {
    let onkeydown = {
        let commit = props.oncommit.clone();
        Callback::from(move |e: KeyboardEvent| {
            if e.key() == "Enter" {
                commit.emit(());
            }
        })
    };

    html! {
        <div class="form-group">
            <label for="upper_bound_input">{ "Upper bound (exclusive):" }</label>
            <input
                type="text"
                id="upper_bound_input"
                value={props.text.clone()}
                class={if props.error.is_some() { "invalid" } else { "" }}
                placeholder="1e6"
                oninput={props.oninput.clone()}
                onchange={props.oncommit.reform(|_| ())}
                {onkeydown}
            />
            <div class="input-hint">
                { format!("Accepts 1000000, 1_000_000, 1e6 or 10^6, up to {}", format_with_separators(props.max)) }
            </div>
            if let Some(ref err) = props.error {
                <div class="input-error">{ err }</div>
            }
        </div>
    }
}
