//! Running (prefix) aggregate entropy for the current cursor.

use crate::cursor::CursorState;
use crate::error::AggregateError;
use crate::metrics::TokenMetricSet;

/// Aggregate shown for `cursor` over `set`.
///
/// With no selection this is the upstream `epr` unchanged. With `At(i)` it is
/// the plain mean of token entropies over `0..=i`. The prefix mean at the last
/// index is not reconciled with `epr`; upstream may compute them differently.
///
/// Callers gate on an active, non-empty set. Asking anyway is a precondition
/// violation and returns an error rather than a made-up number.
pub fn running_aggregate(
    set: Option<&TokenMetricSet>,
    cursor: CursorState,
) -> Result<Option<f64>, AggregateError> {
    let set = set.ok_or(AggregateError::NoActiveSet)?;
    if set.is_empty() {
        return Err(AggregateError::EmptySet);
    }
    match cursor {
        CursorState::None => Ok(set.epr()),
        CursorState::At(index) => {
            let prefix = set
                .tokens()
                .get(..=index)
                .ok_or(AggregateError::CursorOutOfRange {
                    index,
                    len: set.len(),
                })?;
            let sum: f64 = prefix.iter().map(|metric| metric.entropy).sum();
            Ok(Some(sum / prefix.len() as f64))
        }
    }
}

/// Lenient variant for render paths: on a precondition violation it logs and
/// falls back to the set's `epr` (or nothing). Debug builds panic instead.
#[must_use]
pub fn running_aggregate_or_epr(set: Option<&TokenMetricSet>, cursor: CursorState) -> Option<f64> {
    let aggregate = running_aggregate(set, cursor);
    debug_assert!(
        aggregate.is_ok(),
        "running aggregate precondition violated: {aggregate:?}"
    );
    match aggregate {
        Ok(value) => value,
        Err(err) => {
            tracing::warn!(error = %err, %cursor, "running aggregate precondition violated");
            set.and_then(TokenMetricSet::epr)
        }
    }
}
