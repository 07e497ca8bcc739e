//! # Count Verification
//!
//! After both loads finish, each store reports its per-entity counts and the
//! verifier asserts equality. A mismatch for any entity is a fatal
//! consistency failure for the run, reported and never auto-retried.

use serde::Serialize;

use crate::types::{EntityCounts, EntityKind};

/// One entity's cross-store comparison.
#[derive(Debug, Clone, Serialize)]
pub struct VerificationEntry {
    pub entity: EntityKind,
    pub relational: u64,
    pub document: u64,
    pub matched: bool,
}

/// Full cross-store verification result.
#[derive(Debug, Clone, Serialize)]
pub struct VerificationReport {
    pub entries: Vec<VerificationEntry>,
}

impl VerificationReport {
    /// Compares per-entity counts from the two stores.
    pub fn compare(relational: EntityCounts, document: EntityCounts) -> VerificationReport {
        let entries = EntityKind::ALL
            .iter()
            .map(|&entity| {
                let r = relational.get(entity);
                let d = document.get(entity);
                VerificationEntry {
                    entity,
                    relational: r,
                    document: d,
                    matched: r == d,
                }
            })
            .collect();
        VerificationReport { entries }
    }

    /// True when every entity count matches across stores.
    pub fn all_match(&self) -> bool {
        self.entries.iter().all(|e| e.matched)
    }

    /// Entities whose counts differ.
    pub fn mismatches(&self) -> Vec<&VerificationEntry> {
        self.entries.iter().filter(|e| !e.matched).collect()
    }

    /// Total records in the relational store (printed when everything
    /// matches, mirroring the populate summary line).
    pub fn total(&self) -> u64 {
        self.entries.iter().map(|e| e.relational).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn counts(order_items: u64) -> EntityCounts {
        EntityCounts {
            categories: 8,
            users: 100,
            products: 200,
            orders: 150,
            order_items,
            reviews: 80,
        }
    }

    #[test]
    fn test_matching_counts() {
        let report = VerificationReport::compare(counts(375), counts(375));
        assert!(report.all_match());
        assert!(report.mismatches().is_empty());
        assert_eq!(report.total(), 8 + 100 + 200 + 150 + 375 + 80);
    }

    #[test]
    fn test_single_entity_mismatch() {
        let report = VerificationReport::compare(counts(375), counts(374));
        assert!(!report.all_match());

        let mismatches = report.mismatches();
        assert_eq!(mismatches.len(), 1);
        assert_eq!(mismatches[0].entity, EntityKind::OrderItems);
        assert_eq!(mismatches[0].relational, 375);
        assert_eq!(mismatches[0].document, 374);
    }
}
