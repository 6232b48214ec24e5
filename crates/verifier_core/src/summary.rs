use std::sync::Arc;

use serde::Serialize;

use crate::EmailVerificationRecord;

/// Valid/invalid counts over one record set.
///
/// Only obtainable from records, so `valid + invalid == total` always holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct HealthSummary {
    total: usize,
    valid: usize,
    invalid: usize,
}

impl HealthSummary {
    pub fn from_records(records: &[EmailVerificationRecord]) -> Self {
        let total = records.len();
        let valid = records.iter().filter(|record| record.is_valid()).count();
        Self {
            total,
            valid,
            invalid: total - valid,
        }
    }

    pub fn total(&self) -> usize {
        self.total
    }

    pub fn valid(&self) -> usize {
        self.valid
    }

    pub fn invalid(&self) -> usize {
        self.invalid
    }
}

/// An immutable record set together with its derived statistics.
///
/// Cloning shares the records; a new verification builds a new report rather
/// than touching this one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerificationReport {
    records: Arc<[EmailVerificationRecord]>,
    summary: HealthSummary,
    error_count: usize,
}

impl VerificationReport {
    pub fn records(&self) -> &[EmailVerificationRecord] {
        &self.records
    }

    pub fn summary(&self) -> HealthSummary {
        self.summary
    }

    /// Records whose verdict is not `Valid`.
    ///
    /// Failed submissions are counted separately on the app state and never
    /// leak into this number.
    pub fn error_count(&self) -> usize {
        self.error_count
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Builds the report for a freshly received record set. Records keep their
/// order; an empty set is a valid, all-zero report.
pub fn aggregate(records: Vec<EmailVerificationRecord>) -> VerificationReport {
    let summary = HealthSummary::from_records(&records);
    let error_count = records.iter().filter(|record| !record.is_valid()).count();
    VerificationReport {
        records: records.into(),
        summary,
        error_count,
    }
}
