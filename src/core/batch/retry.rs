//! Retry predicate for batch execution

use super::types::ResultSlot;

/// Returns true when at least one request of the batch failed transiently.
///
/// Permanent failures never keep a batch alive, but they do not stop the
/// transient ones from being retried either.
pub fn should_retry_batch(slots: &[ResultSlot]) -> bool {
    slots.iter().any(ResultSlot::is_transient_failure)
}

/// Number of slots eligible for resubmission
pub(crate) fn pending_count(slots: &[ResultSlot]) -> usize {
    slots.iter().filter(|slot| slot.is_pending()).count()
}
