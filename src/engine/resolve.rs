//! Match selection and producer dispatch.
//!
//! Resolution has two halves:
//!
//! ```text
//! message ──▶ select() ──┬─ Empty       (blank input, nothing ranked)
//!                        ├─ Unmatched   (best score <= CONFIDENCE_FLOOR)
//!                        └─ Matched ──▶ produce() / produce_async() ──▶ text
//! ```
//!
//! `select` is pure: it lowercases a copy of the message, ranks it against the
//! effective registry and applies the confidence floor. Only `produce` touches
//! the `Context`, and it always hands producers the original-case message.

use super::ranker::{Ranking, rank};
use super::registry::Registry;
use crate::{Context, ResponseValue};

/// Minimum best score a match needs. Scores at or below it count as noise.
pub const CONFIDENCE_FLOOR: f64 = 0.3;

/// Outcome of the matching half.
#[derive(Debug)]
pub(crate) enum Selection<'r> {
    Empty,
    Unmatched { ranking: Option<Ranking<'r>> },
    Matched { ranking: Ranking<'r>, value: &'r ResponseValue },
}

pub(crate) fn select<'r>(registry: &'r Registry, message: &str) -> Selection<'r> {
    if message.trim().is_empty() {
        tracing::debug!("empty message");
        return Selection::Empty;
    }

    let query = message.to_lowercase();
    let Some(ranking) = rank(&query, registry.effective().keys()) else {
        tracing::warn!("no candidates to rank, registry is empty");
        return Selection::Unmatched { ranking: None };
    };

    let best = ranking.best();
    tracing::debug!(key = best.target, score = best.rating, candidates = ranking.ratings.len(), "ranked");

    if best.rating <= CONFIDENCE_FLOOR {
        tracing::debug!(score = best.rating, floor = CONFIDENCE_FLOOR, "best match below confidence floor");
        return Selection::Unmatched { ranking: Some(ranking) };
    }

    match registry.get(best.target) {
        Some(value) => Selection::Matched { ranking, value },
        None => Selection::Unmatched { ranking: Some(ranking) },
    }
}

/// Turn a selected value into text.
///
/// Async producers are driven to completion on the current thread. They must
/// not depend on a runtime reactor when reached through this path.
pub(crate) fn produce(value: &ResponseValue, message: &str, context: &mut Context) -> String {
    tracing::trace!(kind = value.kind_name(), "invoking producer");
    match value {
        ResponseValue::Static(text) => text.clone(),
        ResponseValue::Computed(producer) => producer(message, context),
        ResponseValue::AsyncComputed(producer) => {
            futures::executor::block_on(producer(message.to_string(), context.fork()))
        }
    }
}

pub(crate) async fn produce_async(value: &ResponseValue, message: &str, context: &mut Context) -> String {
    tracing::trace!(kind = value.kind_name(), "invoking producer");
    match value {
        ResponseValue::Static(text) => text.clone(),
        ResponseValue::Computed(producer) => producer(message, context),
        ResponseValue::AsyncComputed(producer) => producer(message.to_string(), context.fork()).await,
    }
}
