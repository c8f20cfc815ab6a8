//! Batch scheduling.
//!
//! Identifiers are split into consecutive groups of at most `group_size`. The
//! lookups of one group run concurrently and the group is awaited as a whole
//! (no fail-fast) before the next one starts, with a short pacing delay in
//! between. Outcomes are stored by input position, so completion order inside a
//! group never affects the result order.

mod types;

use futures::future::join_all;
use log::{debug, info};
use tokio_util::sync::CancellationToken;

pub use types::{BatchResult, BatchStatus, LookupOutcome};

use crate::config::GROUP_PACING_DELAY;
use crate::error_handling::BatchError;
use crate::lookup::DetailSource;

/// Splits `identifiers` into consecutive groups of at most `group_size`.
///
/// # Errors
///
/// Returns `BatchError::InvalidGroupSize` when `group_size` is zero.
pub fn partition(identifiers: &[String], group_size: usize) -> Result<Vec<&[String]>, BatchError> {
    if group_size == 0 {
        return Err(BatchError::InvalidGroupSize);
    }
    Ok(identifiers.chunks(group_size).collect())
}

fn validate_identifiers(identifiers: &[String]) -> Result<(), BatchError> {
    match identifiers
        .iter()
        .position(|identifier| identifier.trim().is_empty())
    {
        Some(position) => Err(BatchError::InvalidIdentifier {
            position,
            value: identifiers[position].clone(),
        }),
        None => Ok(()),
    }
}

/// Looks up every identifier through `source`, `group_size` at a time.
///
/// Cancellation is checked before each group is launched; groups already in
/// flight always run to completion.
///
/// # Errors
///
/// - `BatchError::InvalidGroupSize` for a zero group size
/// - `BatchError::InvalidIdentifier` for a blank identifier
/// - `BatchError::Cancelled` with the outcomes gathered so far
///
/// Failed lookups are not errors; they appear as `LookupOutcome::Failure`.
pub async fn run_batch<S>(
    source: &S,
    identifiers: &[String],
    group_size: usize,
    cancel: &CancellationToken,
) -> Result<BatchResult, BatchError>
where
    S: DetailSource + ?Sized,
{
    validate_identifiers(identifiers)?;
    let groups = partition(identifiers, group_size)?;
    let total_groups = groups.len();
    let mut result = BatchResult::new(Vec::with_capacity(identifiers.len()));

    for (index, group) in groups.into_iter().enumerate() {
        if index > 0 {
            tokio::time::sleep(GROUP_PACING_DELAY).await;
        }
        if cancel.is_cancelled() {
            info!(
                "Batch cancelled before group {}/{} ({} of {} identifiers done)",
                index + 1,
                total_groups,
                result.len(),
                identifiers.len()
            );
            return Err(BatchError::Cancelled {
                partial: result,
                total: identifiers.len(),
            });
        }

        debug!(
            "Looking up group {}/{} ({} identifiers)",
            index + 1,
            total_groups,
            group.len()
        );
        let settled = join_all(group.iter().map(|identifier| source.fetch_details(identifier))).await;
        result.extend(
            group
                .iter()
                .zip(settled)
                .map(|(identifier, record)| LookupOutcome::from_lookup(identifier.clone(), record)),
        );
    }

    debug!(
        "Batch complete: {} succeeded, {} failed",
        result.success_count(),
        result.failure_count()
    );
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(n: usize) -> Vec<String> {
        (0..n).map(|i| format!("192.0.2.{}", i)).collect()
    }

    #[test]
    fn test_partition_seven_by_three() {
        let identifiers = ids(7);
        let sizes: Vec<usize> = partition(&identifiers, 3)
            .unwrap()
            .iter()
            .map(|g| g.len())
            .collect();
        assert_eq!(sizes, vec![3, 3, 1]);
    }

    #[test]
    fn test_partition_keeps_order() {
        let identifiers = ids(5);
        let flattened: Vec<&String> = partition(&identifiers, 2)
            .unwrap()
            .into_iter()
            .flatten()
            .collect();
        assert_eq!(flattened, identifiers.iter().collect::<Vec<_>>());
    }

    #[test]
    fn test_partition_empty() {
        assert!(partition(&[], 3).unwrap().is_empty());
    }

    #[test]
    fn test_partition_zero_group_size() {
        assert!(matches!(
            partition(&ids(3), 0),
            Err(BatchError::InvalidGroupSize)
        ));
    }

    #[test]
    fn test_blank_identifier_rejected() {
        let identifiers = vec!["1.1.1.1".to_string(), "  ".to_string()];
        match validate_identifiers(&identifiers) {
            Err(BatchError::InvalidIdentifier { position, .. }) => assert_eq!(position, 1),
            other => panic!("expected InvalidIdentifier, got {:?}", other),
        }
    }
}
