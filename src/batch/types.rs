//! Batch outcome types.

use crate::lookup::DetailRecord;

/// Result of looking up one identifier.
#[derive(Debug, Clone, PartialEq)]
pub enum LookupOutcome {
    /// Details were retrieved.
    Success {
        /// The identifier as submitted.
        identifier: String,
        /// Its details.
        record: DetailRecord,
    },
    /// The lookup failed after retries.
    Failure {
        /// The identifier as submitted.
        identifier: String,
    },
}

impl LookupOutcome {
    /// Pairs an identifier with the settled result of its lookup.
    pub fn from_lookup(identifier: String, record: Option<DetailRecord>) -> Self {
        match record {
            Some(record) => LookupOutcome::Success { identifier, record },
            None => LookupOutcome::Failure { identifier },
        }
    }

    /// Identifier this outcome belongs to.
    pub fn identifier(&self) -> &str {
        match self {
            LookupOutcome::Success { identifier, .. } | LookupOutcome::Failure { identifier } => {
                identifier
            }
        }
    }

    /// Details, for a successful lookup.
    pub fn record(&self) -> Option<&DetailRecord> {
        match self {
            LookupOutcome::Success { record, .. } => Some(record),
            LookupOutcome::Failure { .. } => None,
        }
    }

    /// True for `Success`.
    pub fn is_success(&self) -> bool {
        matches!(self, LookupOutcome::Success { .. })
    }
}

/// How a batch ended, as seen by the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BatchStatus {
    /// No identifiers were submitted.
    Empty,
    /// Every lookup succeeded.
    AllSucceeded,
    /// At least one lookup failed. Still a valid result.
    WithFailures,
}

/// Ordered outcomes of a batch: position `i` holds input identifier `i`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BatchResult {
    outcomes: Vec<LookupOutcome>,
}

impl BatchResult {
    /// Wraps outcomes already in input order.
    pub fn new(outcomes: Vec<LookupOutcome>) -> Self {
        Self { outcomes }
    }

    /// Outcomes in input order.
    pub fn outcomes(&self) -> &[LookupOutcome] {
        &self.outcomes
    }

    /// Consumes the result, returning its outcomes.
    pub fn into_outcomes(self) -> Vec<LookupOutcome> {
        self.outcomes
    }

    /// Number of outcomes.
    pub fn len(&self) -> usize {
        self.outcomes.len()
    }

    /// True when no identifier was looked up.
    pub fn is_empty(&self) -> bool {
        self.outcomes.is_empty()
    }

    /// Number of successful lookups.
    pub fn success_count(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_success()).count()
    }

    /// Number of failed lookups.
    pub fn failure_count(&self) -> usize {
        self.outcomes.len() - self.success_count()
    }

    /// Overall status of the batch.
    pub fn status(&self) -> BatchStatus {
        if self.outcomes.is_empty() {
            BatchStatus::Empty
        } else if self.failure_count() == 0 {
            BatchStatus::AllSucceeded
        } else {
            BatchStatus::WithFailures
        }
    }

    /// Identifiers in input order.
    pub fn identifiers(&self) -> impl Iterator<Item = &str> {
        self.outcomes.iter().map(LookupOutcome::identifier)
    }

    pub(crate) fn extend(&mut self, outcomes: impl IntoIterator<Item = LookupOutcome>) {
        self.outcomes.extend(outcomes);
    }
}
