//! Prometheus metrics for core components.
//!
//! This module provides metrics for:
//! - Matching (volume, distances, tie sizes)
//! - Payment gate decisions
//! - Client orchestrator attempts

use once_cell::sync::Lazy;
use prometheus::{Histogram, HistogramOpts, IntCounter, IntCounterVec, Opts};

// =============================================================================
// Matching Metrics
// =============================================================================

/// Matches computed total.
pub static MATCHES_TOTAL: Lazy<IntCounter> = Lazy::new(|| {
    IntCounter::new("spirit_matches_total", "Total name-to-animal matches computed").unwrap()
});

/// Distance of the winning animal.
pub static MATCH_DISTANCE: Lazy<Histogram> = Lazy::new(|| {
    Histogram::with_opts(
        HistogramOpts::new(
            "spirit_match_distance",
            "Letter distance between the name and the selected animal",
        )
        .buckets(vec![0.0, 1.0, 2.0, 3.0, 5.0, 8.0, 13.0, 21.0]),
    )
    .unwrap()
});

/// Size of the tie set a match was drawn from.
pub static MATCH_TIES: Lazy<Histogram> = Lazy::new(|| {
    Histogram::with_opts(
        HistogramOpts::new(
            "spirit_match_ties",
            "Number of animals sharing the minimum distance",
        )
        .buckets(vec![1.0, 2.0, 3.0, 5.0, 10.0, 25.0]),
    )
    .unwrap()
});

// =============================================================================
// Payment Metrics
// =============================================================================

/// Payment gate decisions by outcome.
pub static PAYMENT_DECISIONS: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new(
            "spirit_payment_decisions_total",
            "Payment gate decisions",
        ),
        &["outcome"], // "allowed", "required", "error"
    )
    .unwrap()
});

// =============================================================================
// Client Metrics
// =============================================================================

/// Client orchestrator request attempts by outcome.
pub static CLIENT_ATTEMPTS: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new(
            "spirit_client_attempts_total",
            "Client requests to the matching endpoint",
        ),
        &["outcome"], // "matched", "payment_required", "server_error", "format_error", "network_error"
    )
    .unwrap()
});

// =============================================================================
// Helper functions
// =============================================================================

/// Get all core metrics for registration in a registry.
pub fn all_metrics() -> Vec<Box<dyn prometheus::core::Collector>> {
    vec![
        Box::new(MATCHES_TOTAL.clone()),
        Box::new(MATCH_DISTANCE.clone()),
        Box::new(MATCH_TIES.clone()),
        Box::new(PAYMENT_DECISIONS.clone()),
        Box::new(CLIENT_ATTEMPTS.clone()),
    ]
}
