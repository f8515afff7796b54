//! Main module for the Collatz chain explorer using Yew.
//! Wires the upper bound input, the search worker and the results panel.

use collatz_chain::{
    config::*,
    worker_agent::{CollatzArgs, CollatzTask},
    SolveReport,
};
use gloo_timers::callback::Timeout;
use std::cell::RefCell;
use std::collections::HashMap;
use yew::prelude::*;
use yew_agent::reactor::{use_reactor_subscription, ReactorProvider};

mod components;
mod hooks;

use components::{render_report, BoundField};
use hooks::use_upper_bound_input;

// ──────────────────────────────────────────────────────────────────────────────
// Finished searches: (report, winning trajectory)
type SearchOutcome = (SolveReport, Vec<u64>);

thread_local! {
    /// Reports already computed this session, keyed by upper bound.
    /// Each search still builds and drops its own chain cache.
    static REPORT_STORE: RefCell<HashMap<u64, SearchOutcome>> =
        RefCell::new(HashMap::new());
}

// ──────────────────────────────────────────────────────────────────────────────
// Helper functions

/// Create a debounced callback that cancels any previous pending call
fn debounce_callback<T: 'static>(
    timer_handle: &UseStateHandle<Option<Timeout>>,
    callback: Callback<T>,
    value: T,
    delay_ms: u32,
) {
    // Dropping the old handle cancels it
    timer_handle.set(None);

    let timer_handle_clone = timer_handle.clone();
    let handle = Timeout::new(delay_ms, move || {
        callback.emit(value);
        timer_handle_clone.set(None);
    });
    timer_handle.set(Some(handle));
}

/// Bump the store version so the remembered-count line re-renders
fn update_store_version(store_version: &UseStateHandle<usize>) {
    store_version.set(store_version.wrapping_add(1));
}

// ──────────────────────────────────────────────────────────────────────────────

/// Primary application component wiring state, effects, and UI elements.
#[function_component(Main)]
fn main_component() -> Html {
    let bound_input = use_upper_bound_input(DEFAULT_UPPER_BOUND, MAX_BROWSER_UPPER_BOUND);
    let outcome = use_state(|| None::<SearchOutcome>);
    let calculating_bound = use_state(|| None::<u64>);
    let error_message = use_state(|| None::<String>);
    let last_from_cache = use_state(|| false);
    let store_version = use_state(|| 0usize);
    let debounce_timer = use_state(|| None::<Timeout>);
    let collatz_sub = use_reactor_subscription::<CollatzTask>();
    let handled_idx = use_mut_ref(|| 0usize); // number of messages already processed

    let calculate = {
        let collatz_sub = collatz_sub.clone();
        let outcome = outcome.clone();
        let calculating_bound = calculating_bound.clone();
        let error_message = error_message.clone();
        let last_from_cache = last_from_cache.clone();
        Callback::from(move |upper_bound: u64| {
            if let Some(remembered) =
                REPORT_STORE.with(|s| s.borrow().get(&upper_bound).cloned())
            {
                last_from_cache.set(true);
                outcome.set(Some(remembered));
                error_message.set(None);
                calculating_bound.set(None);
                return;
            }

            calculating_bound.set(Some(upper_bound));
            collatz_sub.send(CollatzArgs {
                upper_bound,
                with_trajectory: true,
            });
        })
    };

    // Search whenever the committed bound changes (including the first render)
    {
        let calculate = calculate.clone();
        let debounce_timer = debounce_timer.clone();
        use_effect_with(bound_input.value, move |&bound| {
            debounce_callback(&debounce_timer, calculate, bound, DEBOUNCE_MS);
            || ()
        });
    }

    // effect that consumes new worker messages
    {
        let collatz_sub_consumer = collatz_sub.clone();
        let handled_idx = handled_idx.clone();
        let outcome = outcome.clone();
        let calculating_bound = calculating_bound.clone();
        let error_message = error_message.clone();
        let last_from_cache = last_from_cache.clone();
        let store_version = store_version.clone();
        let current_bound = bound_input.value;
        use_effect_with(collatz_sub.len(), move |_| {
            let all = collatz_sub_consumer.iter();
            let new_total = all.len();
            for msg in all.skip(*handled_idx.borrow()) {
                match msg.as_ref() {
                    Ok((report, chain)) => {
                        REPORT_STORE.with(|s| {
                            s.borrow_mut()
                                .insert(report.upper_bound, (report.clone(), chain.clone()));
                        });
                        update_store_version(&store_version);

                        // a slower, superseded search must not replace the current one
                        if report.upper_bound == current_bound {
                            last_from_cache.set(false);
                            outcome.set(Some((report.clone(), chain.clone())));
                            error_message.set(None);
                            calculating_bound.set(None);
                        }
                    }
                    Err((bound, e)) => {
                        if *bound == current_bound {
                            outcome.set(None);
                            error_message.set(Some(e.clone()));
                            calculating_bound.set(None);
                        }
                    }
                }
            }
            *handled_idx.borrow_mut() = new_total;
            || ()
        });
    }

    // Ensure re-render on store updates
    let _ = *store_version;
    let remembered_count = REPORT_STORE.with(|s| s.borrow().len());

    let on_canonical = {
        let set_value = bound_input.set_value.clone();
        Callback::from(move |_: MouseEvent| set_value.emit(DEFAULT_UPPER_BOUND))
    };

    let on_forget = {
        let store_version = store_version.clone();
        Callback::from(move |_: MouseEvent| {
            REPORT_STORE.with(|s| s.borrow_mut().clear());
            update_store_version(&store_version);
        })
    };

    html! {
        <div class="container">
            <h1>{ "Longest Collatz Chain" }</h1>

            <div class="top-controls">
                <BoundField
                    text={bound_input.text.clone()}
                    error={bound_input.error.clone()}
                    max={MAX_BROWSER_UPPER_BOUND}
                    oninput={bound_input.on_text_input.clone()}
                    oncommit={bound_input.on_commit.clone()}
                />
                <button class="btn-secondary small" onclick={on_canonical}>
                    { "Reset to one million" }
                </button>
            </div>

            <div class="cache-stats">
                <div class="cache-status compact">
                    { format!("Remembered searches: {}", remembered_count) }
                </div>
                <button class="btn-secondary small" onclick={on_forget}>
                    { "Forget Results" }
                </button>
            </div>

            if let Some(bound) = *calculating_bound {
                <div class="calculating compact">
                    { format!("Searching below {}…", bound) }
                </div>
            }

            if let Some(err) = &*error_message {
                <div class="current-error compact">
                    { err }
                </div>
            }

            // Results section
            <div class="results-area">
                if let Some((ref report, ref chain)) = *outcome {
                    { render_report(report, chain, *last_from_cache) }
                } else if calculating_bound.is_none() {
                    <div class="no-results-message">
                        <p>{ "Enter an upper bound and press Enter to search." }</p>
                    </div>
                }
            </div>
        </div>
    }
}

/// App wrapper providing ReactorProvider for CollatzTask.
#[function_component]
pub fn App() -> Html {
    html! {
        <ReactorProvider<CollatzTask> path={WORKER_SCRIPT}>
            <Main />
        </ReactorProvider<CollatzTask>>
    }
}

/// Entry point: initializes Yew renderer for the App component.
fn main() {
    yew::Renderer::<App>::new().render();
}
