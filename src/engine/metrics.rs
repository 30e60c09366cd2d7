//! Resolution timings.
//!
//! Collected by `Resolver::resolve_verbose` and surfaced through
//! `Resolution::metrics`; the plain `resolve` path does not time anything.

use std::time::Duration;

#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct RunMetrics {
    /// Total elapsed time for one resolution.
    pub total: Duration,
    /// Time spent scoring candidates.
    pub rank: Duration,
    /// Time spent inside the selected producer.
    pub produce: Duration,
    /// Number of candidates scored.
    pub candidates: usize,
}
