//! Web Worker agent that runs chain searches off the UI thread.

use crate::config::{MAX_BROWSER_UPPER_BOUND, MIN_UPPER_BOUND};
use crate::utils::BoundParseError;
use crate::{solve_with_report, trajectory, SolveReport};
use futures::sink::SinkExt;
use futures::StreamExt;
use serde::{Deserialize, Serialize};
use yew_agent::reactor::{reactor, ReactorScope};

/// Arguments for a search request sent to the worker.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct CollatzArgs {
    pub upper_bound: u64,
    /// Also send back the winning start's full sequence.
    pub with_trajectory: bool,
}

/// Result of a search: the report plus the winner's trajectory (empty unless requested).
/// Failures carry the requested upper bound so the UI can drop stale ones.
pub type CollatzResult = Result<(SolveReport, Vec<u64>), (u64, String)>;

/// Rejects bounds whose chain cache would not fit in the worker's heap.
pub fn check_worker_bound(upper_bound: u64) -> Result<u64, String> {
    if upper_bound > MAX_BROWSER_UPPER_BOUND {
        return Err(BoundParseError::OutOfRange {
            min: MIN_UPPER_BOUND,
            max: MAX_BROWSER_UPPER_BOUND,
        }
        .to_string());
    }
    Ok(upper_bound)
}

/// Runs one request to completion.
pub fn run_search(args: &CollatzArgs) -> CollatzResult {
    let failed = |msg: String| (args.upper_bound, msg);

    let upper_bound = check_worker_bound(args.upper_bound).map_err(failed)?;
    let report = solve_with_report(upper_bound).map_err(|e| failed(e.to_string()))?;
    let chain = if args.with_trajectory {
        trajectory(report.start).map_err(|e| failed(e.to_string()))?
    } else {
        Vec::new()
    };
    Ok((report, chain))
}

/// Worker reactor that processes search requests in arrival order.
#[reactor]
pub async fn CollatzTask(mut scope: ReactorScope<CollatzArgs, CollatzResult>) {
    while let Some(args) = scope.next().await {
        let res = run_search(&args);

        // abort loop if all bridges dropped
        if scope.send(res).await.is_err() {
            break;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn search_with_trajectory() {
        let (report, chain) = run_search(&CollatzArgs {
            upper_bound: 10,
            with_trajectory: true,
        })
        .unwrap();
        assert_eq!(report.start, 9);
        assert_eq!(chain.len(), report.length as usize);
        assert_eq!(chain.first(), Some(&9));
        assert_eq!(chain.last(), Some(&1));
    }

    #[test]
    fn search_without_trajectory() {
        let (report, chain) = run_search(&CollatzArgs {
            upper_bound: 100,
            with_trajectory: false,
        })
        .unwrap();
        assert_eq!(report.start, 97);
        assert_eq!(report.length, 119);
        assert!(chain.is_empty());
    }

    #[test]
    fn errors_become_messages() {
        let (bound, msg) = run_search(&CollatzArgs {
            upper_bound: 1,
            with_trajectory: true,
        })
        .unwrap_err();
        assert_eq!(bound, 1);
        assert!(msg.contains("upper bound must be at least 2"));
    }

    #[test]
    fn oversized_bounds_are_refused_before_searching() {
        let requested = MAX_BROWSER_UPPER_BOUND * 10;
        let (bound, msg) = run_search(&CollatzArgs {
            upper_bound: requested,
            with_trajectory: false,
        })
        .unwrap_err();
        assert_eq!(bound, requested);
        assert_eq!(msg, "Upper bound must be between 2 and 10,000,000");
        assert!(check_worker_bound(u64::from(u32::MAX)).is_err());
        assert_eq!(check_worker_bound(MAX_BROWSER_UPPER_BOUND), Ok(MAX_BROWSER_UPPER_BOUND));
    }
}
