//! Crate-wide constants
//!
//! Centralized location for magic values to improve maintainability.

// =============================================================================
// Pagination
// =============================================================================

/// Hard cap on list limits to prevent unbounded fetches
pub const MAX_LIST_LIMIT: u64 = 1000;

// =============================================================================
// HTTP adapter
// =============================================================================

/// Default request timeout for the HTTP adapter
pub const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 30;

/// Sub-resource the HTTP adapter queries for collection counts
pub const HTTP_COUNT_SEGMENT: &str = "count";

/// Query parameter names the HTTP adapter uses for pagination
pub const HTTP_OFFSET_PARAM: &str = "offset";
pub const HTTP_LIMIT_PARAM: &str = "limit";
