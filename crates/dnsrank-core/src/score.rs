//! Composite quality scoring for DNS benchmark results.
//!
//! Maps an aggregated [`BenchmarkResult`] to a [`ScoreResult`] on a 0-100
//! scale: four sub-scores (success rate, error rate, latency, throughput)
//! computed independently, then combined with fixed weights.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::measurement::{BenchmarkResult, LatencyStats};

// ---------------------------------------------------------------------------
// Weights and thresholds
// ---------------------------------------------------------------------------

/// Weight of the success-rate sub-score in the total (out of 100).
pub const SUCCESS_RATE_WEIGHT: f64 = 25.0;
/// Weight of the error-rate sub-score in the total (out of 100).
pub const ERROR_RATE_WEIGHT: f64 = 25.0;
/// Weight of the latency sub-score in the total (out of 100).
pub const LATENCY_WEIGHT: f64 = 40.0;
/// Weight of the throughput sub-score in the total (out of 100).
pub const QPS_WEIGHT: f64 = 10.0;

/// Mean latencies below this are treated as invalid and score 0 (ms).
pub const LATENCY_RANGE_MIN_MS: f64 = 0.1;
/// Mean latencies above this score 0 (ms).
pub const LATENCY_RANGE_MAX_MS: f64 = 1000.0;
/// Mean latencies at or below this earn the full base score (ms).
pub const LATENCY_FULL_MARK_MS: f64 = 50.0;
/// Throughput at or above this earns the full throughput score.
pub const MAX_QPS: f64 = 80.0;
/// Multiplier applied to the latency score when p95 exceeds
/// [`LATENCY_RANGE_MAX_MS`].
pub const TAIL_LATENCY_PENALTY: f64 = 0.8;

// ---------------------------------------------------------------------------
// ScoreResult
// ---------------------------------------------------------------------------

/// Composite quality score for a single benchmark result.
///
/// All fields are in [0, 100] and rounded to two decimal places. `Default`
/// is the all-zero record, which downstream consumers read as "no data to
/// score" (see [`score_or_zero`]).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreResult {
    /// Weighted combination of the four sub-scores.
    pub total: f64,
    /// Linear share of queries that succeeded.
    pub success_rate: f64,
    /// Convex penalty on the share of error and I/O failures.
    pub error_rate: f64,
    /// Mean-latency ramp discounted by stability and tail behavior.
    pub latency: f64,
    /// Linear throughput ramp, full marks at [`MAX_QPS`].
    pub qps: f64,
}

// ---------------------------------------------------------------------------
// Scoring
// ---------------------------------------------------------------------------

/// Score an aggregated benchmark result.
///
/// Returns `None` when the result contains no successful responses, since
/// there is nothing to evaluate. When `total_success_responses > 0` the
/// record must have `total_requests > 0`; well-formed runner records always
/// do (see [`crate::measurement::validate`]).
pub fn score(result: &BenchmarkResult) -> Option<ScoreResult> {
    if result.total_success_responses == 0 {
        debug!("no successful responses, nothing to score");
        return None;
    }
    debug_assert!(
        result.total_requests > 0,
        "successes recorded without requests"
    );

    let total_requests = result.total_requests as f64;

    let success = result.total_success_responses as f64 / total_requests * 100.0;
    let error = error_rate_score(result.failed_responses() as f64 / total_requests);
    let latency = latency_score(&result.latency_stats);
    let qps = qps_score(result.queries_per_second);

    let total = (success * SUCCESS_RATE_WEIGHT
        + error * ERROR_RATE_WEIGHT
        + latency * LATENCY_WEIGHT
        + qps * QPS_WEIGHT)
        / 100.0;

    debug!(
        total = format!("{:.2}", total),
        success = format!("{:.2}", success),
        error = format!("{:.2}", error),
        latency = format!("{:.2}", latency),
        qps = format!("{:.2}", qps),
        "scored benchmark result"
    );

    Some(ScoreResult {
        total: round_to(total, 2),
        success_rate: round_to(success, 2),
        error_rate: round_to(error, 2),
        latency: round_to(latency, 2),
        qps: round_to(qps, 2),
    })
}

/// Score a result, flattening the no-data case to the all-zero record.
///
/// Matches the shape the benchmark runner's consumers expect on the wire,
/// where an all-zero score record stands for "no successful requests".
pub fn score_or_zero(result: &BenchmarkResult) -> ScoreResult {
    score(result).unwrap_or_default()
}

/// Convex error penalty: small error rates cost little, the penalty
/// accelerates as errors grow.
fn error_rate_score(error_rate: f64) -> f64 {
    100.0 / (1.0 + (error_rate * 100.0).powi(2))
}

/// Mean-latency ramp (full marks at or below [`LATENCY_FULL_MARK_MS`], zero
/// at [`LATENCY_RANGE_MAX_MS`]) discounted by the relative standard
/// deviation, clamped to [0, 100]. Means outside the valid range score 0. A
/// p95 tail beyond the range cuts the clamped score further.
fn latency_score(stats: &LatencyStats) -> f64 {
    let mean_ms = stats.mean_ms;

    let raw = if mean_ms < LATENCY_RANGE_MIN_MS || mean_ms > LATENCY_RANGE_MAX_MS {
        0.0
    } else {
        let base = 100.0
            - (mean_ms - LATENCY_FULL_MARK_MS) * 100.0
                / (LATENCY_RANGE_MAX_MS - LATENCY_FULL_MARK_MS);
        let stability = 1.0 - (stats.std_ms / mean_ms).min(1.0);
        base * stability
    };

    let clamped = raw.clamp(0.0, 100.0);
    if stats.p95_ms > LATENCY_RANGE_MAX_MS {
        clamped * TAIL_LATENCY_PENALTY
    } else {
        clamped
    }
}

/// Linear throughput ramp, capped at 100 once [`MAX_QPS`] is reached.
fn qps_score(qps: f64) -> f64 {
    (qps * 100.0 / MAX_QPS).min(100.0)
}

// ---------------------------------------------------------------------------
// Rounding
// ---------------------------------------------------------------------------

/// Round `value` to `places` decimal places, halves away from zero.
pub fn round_to(value: f64, places: u32) -> f64 {
    let factor = 10f64.powi(places as i32);
    (value * factor).round() / factor
}
