//! Application-level configuration constants.

use crate::defaults;

// Search limits
pub const DEFAULT_UPPER_BOUND: u64 = defaults::UPPER_BOUND;
pub const MIN_UPPER_BOUND: u64 = 2;
// The cache ends up with about 2.2 entries per start at roughly 32 bytes each
// (key, length, hash and index slot), so 10,000,000 needs about 1 GB once the
// entry vector has grown past its pre-allocated capacity.
pub const MAX_UPPER_BOUND: u64 = 10_000_000;
// Also fits the 32-bit address space of the browser build
pub const MAX_BROWSER_UPPER_BOUND: u64 = MAX_UPPER_BOUND;

// UI Behavior
pub const DEBOUNCE_MS: u32 = 300;
pub const WORKER_SCRIPT: &str = "worker.js";

// Values of the winning chain shown before the list is elided
pub const TRAJECTORY_PREVIEW_LEN: usize = 48;

// CLI
pub const UPPER_BOUND_ENV: &str = "COLLATZ_UPPER_BOUND";
pub const DEFAULT_LOG_FILTER: &str = "collatz_chain=warn";
pub const VERBOSE_LOG_FILTER: &str = "collatz_chain=info";
