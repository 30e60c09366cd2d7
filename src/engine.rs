//! Matching and resolution engine.
//!
//! The engine is split into small submodules under `src/engine/`, leaves first:
//!
//! ```text
//! similarity.rs   bigram Dice coefficient, one pair of strings
//!       │
//! ranker.rs       score a query against every key, keep the earliest best
//!       │
//! registry.rs     base + supplemental layers, merged into one ordered view
//!       │
//! resolve.rs      blank check, lowercase, rank, confidence floor, dispatch
//! ```
//!
//! A resolution therefore looks like:
//!
//! ```text
//! message ─┬─ blank? ─────────────────────────────▶ empty-message fallback
//!          └─ lowercase ─▶ rank(effective keys) ─┬─ best <= 0.3 ─▶ unsuccessful fallback
//!                                                └─ producer(original message) ─▶ text
//! ```
//!
//! `metrics.rs` holds the optional timings reported by verbose runs.
//!
//! ## Debugging
//!
//! Every stage emits `tracing` events (`debug` for decisions, `trace` for
//! producer dispatch). The CLI reads its filter from `REPLYBOT_LOG`.

#[path = "engine/metrics.rs"]
mod metrics;
#[path = "engine/ranker.rs"]
mod ranker;
#[path = "engine/registry.rs"]
mod registry;
#[path = "engine/resolve.rs"]
mod resolve;
#[path = "engine/similarity.rs"]
mod similarity;

pub use metrics::RunMetrics;
pub use ranker::{Ranking, Rating, rank};
pub use registry::{Layer, Registry, RegistryError, merge};
pub(crate) use resolve::{Selection, produce, produce_async, select};
pub use resolve::CONFIDENCE_FLOOR;
pub use similarity::similarity;
