//! # Query Battery & Probe Vocabulary
//!
//! The fixed six-query battery and the CAP probe result shapes shared by
//! both stores and the result artifacts. Keeping these here means the two
//! store crates and the harness agree on labels and JSON keys by
//! construction.

use serde::{Deserialize, Serialize};

// =============================================================================
// Query Battery
// =============================================================================

/// The six timed queries, run identically (modulo query language) against
/// both stores.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BenchQuery {
    /// Full scan of the products table/collection.
    SelectAll,
    /// Products with price > 500.
    Filter,
    /// Orders joined to their users (JOIN vs $lookup).
    Join,
    /// Order count + total grouped by status.
    Aggregate,
    /// Orders → items → products → categories, filtered on status.
    ComplexJoin,
    /// Substring match on product name (LIKE vs regex).
    TextSearch,
}

impl BenchQuery {
    /// Battery execution order.
    pub const ALL: [BenchQuery; 6] = [
        BenchQuery::SelectAll,
        BenchQuery::Filter,
        BenchQuery::Join,
        BenchQuery::Aggregate,
        BenchQuery::ComplexJoin,
        BenchQuery::TextSearch,
    ];

    /// Human-readable label used in the comparison table and charts.
    pub const fn label(&self) -> &'static str {
        match self {
            BenchQuery::SelectAll => "Select All",
            BenchQuery::Filter => "Filter (WHERE)",
            BenchQuery::Join => "JOIN/Lookup",
            BenchQuery::Aggregate => "Aggregation",
            BenchQuery::ComplexJoin => "Complex JOIN",
            BenchQuery::TextSearch => "Text Search",
        }
    }

    /// JSON key in the relational half of the timing artifact.
    pub const fn relational_key(&self) -> &'static str {
        match self {
            BenchQuery::SelectAll => "q1_select_all",
            BenchQuery::Filter => "q2_select_where",
            BenchQuery::Join => "q3_join",
            BenchQuery::Aggregate => "q4_aggregate",
            BenchQuery::ComplexJoin => "q5_complex_join",
            BenchQuery::TextSearch => "q6_like_search",
        }
    }

    /// JSON key in the document half of the timing artifact.
    pub const fn document_key(&self) -> &'static str {
        match self {
            BenchQuery::SelectAll => "q1_find_all",
            BenchQuery::Filter => "q2_find_filter",
            BenchQuery::Join => "q3_lookup",
            BenchQuery::Aggregate => "q4_aggregate",
            BenchQuery::ComplexJoin => "q5_complex_pipeline",
            BenchQuery::TextSearch => "q6_regex_search",
        }
    }
}

// =============================================================================
// Timing
// =============================================================================

/// Rounds to 3 decimal places (milliseconds in the artifacts).
pub fn round3(value: f64) -> f64 {
    (value * 1000.0).round() / 1000.0
}

/// min/max/avg over a query's timed iterations plus the last result count.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct QueryTiming {
    pub min: f64,
    pub max: f64,
    pub avg: f64,
    pub result_count: u64,
}

impl QueryTiming {
    /// Aggregates raw per-iteration samples (milliseconds).
    ///
    /// An empty sample set yields an all-zero timing; the harness always
    /// runs at least one iteration so this is a guard, not a code path.
    pub fn from_samples(samples_ms: &[f64], result_count: u64) -> QueryTiming {
        if samples_ms.is_empty() {
            return QueryTiming {
                min: 0.0,
                max: 0.0,
                avg: 0.0,
                result_count,
            };
        }
        let min = samples_ms.iter().copied().fold(f64::INFINITY, f64::min);
        let max = samples_ms.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let avg = samples_ms.iter().sum::<f64>() / samples_ms.len() as f64;
        QueryTiming {
            min: round3(min),
            max: round3(max),
            avg: round3(avg),
            result_count,
        }
    }
}

// =============================================================================
// CAP Probe Outcomes
// =============================================================================

/// Transaction rollback probe (relational): a decremented value must be
/// restored after ROLLBACK.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct RollbackProbe {
    pub passed: bool,
    pub initial_value: i32,
    pub after_rollback: i32,
}

/// Foreign-key enforcement probe (relational): inserting an order for a
/// non-existent user must be rejected.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ConstraintProbe {
    pub passed: bool,
}

/// Atomic in-place update probe (document): `$inc` must report exactly one
/// modified document.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct AtomicUpdateProbe {
    pub passed: bool,
    pub modified_count: u64,
}

/// Acknowledged-write latency probe (document).
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct WriteLatencyProbe {
    pub passed: bool,
    pub write_time_ms: f64,
}

/// Availability probe: N sequential count queries, response-time spread.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct AvailabilityProbe {
    pub avg_response_ms: f64,
    pub max_response_ms: f64,
    pub queries_executed: u32,
}

impl AvailabilityProbe {
    pub fn from_samples(samples_ms: &[f64]) -> AvailabilityProbe {
        if samples_ms.is_empty() {
            return AvailabilityProbe {
                avg_response_ms: 0.0,
                max_response_ms: 0.0,
                queries_executed: 0,
            };
        }
        let avg = samples_ms.iter().sum::<f64>() / samples_ms.len() as f64;
        let max = samples_ms.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        AvailabilityProbe {
            avg_response_ms: round3(avg),
            max_response_ms: round3(max),
            queries_executed: samples_ms.len() as u32,
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timing_from_samples() {
        let timing = QueryTiming::from_samples(&[2.0, 1.0, 3.0, 2.0, 2.0], 200);
        assert_eq!(timing.min, 1.0);
        assert_eq!(timing.max, 3.0);
        assert_eq!(timing.avg, 2.0);
        assert_eq!(timing.result_count, 200);
        assert!(timing.min <= timing.avg && timing.avg <= timing.max);
    }

    #[test]
    fn test_timing_rounds_to_3dp() {
        let timing = QueryTiming::from_samples(&[1.23456, 1.23456], 1);
        assert_eq!(timing.avg, 1.235);
        assert_eq!(timing.min, 1.235);
    }

    #[test]
    fn test_timing_empty_samples() {
        let timing = QueryTiming::from_samples(&[], 0);
        assert_eq!(timing.avg, 0.0);
    }

    #[test]
    fn test_availability_from_samples() {
        let probe = AvailabilityProbe::from_samples(&[1.0, 2.0, 6.0]);
        assert_eq!(probe.avg_response_ms, 3.0);
        assert_eq!(probe.max_response_ms, 6.0);
        assert_eq!(probe.queries_executed, 3);
    }

    #[test]
    fn test_battery_keys_are_distinct() {
        for q in BenchQuery::ALL {
            assert!(q.relational_key().starts_with('q'));
            assert!(q.document_key().starts_with('q'));
        }
        let labels: Vec<_> = BenchQuery::ALL.iter().map(|q| q.label()).collect();
        let mut deduped = labels.clone();
        deduped.dedup();
        assert_eq!(labels, deduped);
    }
}
