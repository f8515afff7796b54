use log::{debug, info, warn};
use std::fmt;
#[cfg(not(target_arch = "wasm32"))]
use std::time::Instant;
use wasm_bindgen::prelude::*;

pub mod cache;
pub mod config;
pub mod utils;

pub use cache::ChainCache;

/// Default calculation parameters
pub mod defaults {
    /// Canonical search limit: starts below one million.
    pub const UPPER_BOUND: u64 = 1_000_000;
    /// Emit a progress line every this many starts.
    pub const PROGRESS_INTERVAL: u64 = 100_000;
    /// Upper bound on entries reserved up front for the chain cache.
    pub const MAX_PREALLOCATED_ENTRIES: usize = 1 << 23;
    /// Observed cache entries per start evaluated (about 2.17 at one million).
    pub const CACHE_ENTRIES_PER_START: usize = 3;
}

/// A value reached by a Collatz walk.
pub type Value = u64;

/// Number of values in a chain, counting the start and the final 1.
pub type ChainLength = u32;

// Error type for chain evaluation and search
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CollatzError {
    /// Zero has no Collatz chain
    ZeroStart,
    /// `3 * value + 1` does not fit in a `u64`
    Overflow { value: Value },
    /// The range `1..upper_bound` holds no start to evaluate
    EmptyRange { upper_bound: Value },
}

impl fmt::Display for CollatzError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CollatzError::ZeroStart => write!(f, "Collatz chains start at 1, got 0"),
            CollatzError::Overflow { value } => write!(
                f,
                "Collatz step overflowed: 3 * {} + 1 exceeds {}",
                value,
                Value::MAX
            ),
            CollatzError::EmptyRange { upper_bound } => write!(
                f,
                "No starting values below {} (upper bound must be at least 2)",
                upper_bound
            ),
        }
    }
}

impl std::error::Error for CollatzError {}

/// A start paired with its chain length.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ChainRecord {
    pub start: Value,
    pub length: ChainLength,
}

/// Outcome of one search, with the numbers the front ends display.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct SolveReport {
    pub upper_bound: Value,
    /// Start below `upper_bound` with the longest chain.
    pub start: Value,
    pub length: ChainLength,
    /// Entries in the chain cache when the search finished.
    pub cache_entries: usize,
    pub starts_evaluated: u64,
    pub elapsed_ms: f64,
}

impl SolveReport {
    pub fn record(&self) -> ChainRecord {
        ChainRecord {
            start: self.start,
            length: self.length,
        }
    }
}

/// Parity test used to pick the Collatz branch.
#[inline]
pub fn is_even(n: Value) -> bool {
    n % 2 == 0
}

/// One application of the Collatz map.
pub fn successor(n: Value) -> Result<Value, CollatzError> {
    if is_even(n) {
        return Ok(n / 2);
    }
    n.checked_mul(3)
        .and_then(|tripled| tripled.checked_add(1))
        .ok_or(CollatzError::Overflow { value: n })
}

/// Returns the chain length of `n`, recording every newly visited value.
///
/// The walk follows the Collatz map until it meets a value already in
/// `cache` (or 1), then assigns lengths back up the walk. Values are recorded
/// deepest first, so insertion order matches the natural recursive
/// definition `len(n) = 1 + len(successor(n))`.
///
/// A cache hit returns immediately and leaves `cache` untouched. `1` is a
/// base case of length 1 even in an unseeded cache.
///
/// # Errors
/// * `ZeroStart` when `n == 0`
/// * `Overflow` when a step leaves the `u64` range; entries recorded by
///   earlier calls are kept and nothing from the failed walk is stored
pub fn chain_length(n: Value, cache: &mut ChainCache) -> Result<ChainLength, CollatzError> {
    if n == 0 {
        return Err(CollatzError::ZeroStart);
    }

    let mut pending: Vec<Value> = Vec::new();
    let mut current = n;
    let mut length = loop {
        if let Some(known) = cache.get(current) {
            break known;
        }
        if current == 1 {
            cache.record(1, 1);
            break 1;
        }
        pending.push(current);
        current = successor(current).map_err(|err| {
            warn!("Abandoning chain of {} after {} steps: {}", n, pending.len(), err);
            err
        })?;
    };

    for &value in pending.iter().rev() {
        length += 1;
        cache.record(value, length);
    }

    Ok(length)
}

/// The full sequence from `n` down to 1.
pub fn trajectory(n: Value) -> Result<Vec<Value>, CollatzError> {
    if n == 0 {
        return Err(CollatzError::ZeroStart);
    }
    let mut values = vec![n];
    let mut current = n;
    while current != 1 {
        current = successor(current)?;
        values.push(current);
    }
    Ok(values)
}

fn cache_capacity_for(upper_bound: Value) -> usize {
    usize::try_from(upper_bound)
        .unwrap_or(usize::MAX)
        .saturating_mul(defaults::CACHE_ENTRIES_PER_START)
        .min(defaults::MAX_PREALLOCATED_ENTRIES)
}

#[cfg(not(target_arch = "wasm32"))]
fn elapsed_ms_since(start_time: Instant) -> f64 {
    start_time.elapsed().as_secs_f64() * 1000.0
}

#[cfg(target_arch = "wasm32")]
fn elapsed_ms_since(start_time: f64) -> f64 {
    js_sys::Date::now() - start_time
}

/// Finds the start below `upper_bound` with the longest Collatz chain.
pub fn solve(upper_bound: Value) -> Result<Value, CollatzError> {
    solve_with_report(upper_bound).map(|report| report.start)
}

/// Runs the search and reports the winner along with cache statistics.
///
/// # Algorithm
/// 1. Seed a fresh cache with `1 -> 1`
/// 2. Evaluate every start in `1..upper_bound` in ascending order, keeping
///    only the cache side effects
/// 3. Scan the cache in insertion order for the first maximal entry
///
/// Every entry in the cache belongs to the chain of some start below the
/// bound, and a start's chain is strictly longer than any later value in it,
/// so the maximal entry is always a start below `upper_bound`.
pub fn solve_with_report(upper_bound: Value) -> Result<SolveReport, CollatzError> {
    if upper_bound < 2 {
        return Err(CollatzError::EmptyRange { upper_bound });
    }

    #[cfg(not(target_arch = "wasm32"))]
    let start_time = Instant::now();
    #[cfg(target_arch = "wasm32")]
    let start_time = js_sys::Date::now();

    info!("Searching for the longest Collatz chain below {}", upper_bound);

    let mut cache = ChainCache::with_capacity(cache_capacity_for(upper_bound));
    for start in 1..upper_bound {
        chain_length(start, &mut cache)?;
        if start % defaults::PROGRESS_INTERVAL == 0 {
            debug!(
                "Evaluated {}/{} starts, cache holds {} entries",
                start,
                upper_bound - 1,
                cache.len()
            );
        }
    }

    let best = cache
        .longest()
        .ok_or(CollatzError::EmptyRange { upper_bound })?;
    let elapsed_ms = elapsed_ms_since(start_time);

    info!(
        "Longest chain below {}: start {} with {} values ({} cache entries, {:.1} ms)",
        upper_bound,
        best.start,
        best.length,
        cache.len(),
        elapsed_ms
    );

    Ok(SolveReport {
        upper_bound,
        start: best.start,
        length: best.length,
        cache_entries: cache.len(),
        starts_evaluated: upper_bound - 1,
        elapsed_ms,
    })
}

/// Web worker entry point for running a search from JavaScript.
///
/// Returns the serialized `SolveReport`, or an error message string.
#[wasm_bindgen]
pub async fn worker_solve(upper_bound: u32) -> JsValue {
    match worker_solve_report(Value::from(upper_bound)) {
        Ok(report) => serde_wasm_bindgen::to_value(&report).unwrap_or(JsValue::NULL),
        Err(e) => serde_wasm_bindgen::to_value(&format!("Calculation failed: {}", e))
            .unwrap_or(JsValue::NULL),
    }
}

fn worker_solve_report(upper_bound: Value) -> Result<SolveReport, String> {
    let upper_bound = worker_agent::check_worker_bound(upper_bound)?;
    solve_with_report(upper_bound).map_err(|e| e.to_string())
}

pub mod worker_agent;
