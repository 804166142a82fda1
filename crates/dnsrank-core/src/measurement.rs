use serde::{Deserialize, Serialize};

use crate::error::DnsrankError;

// ---------------------------------------------------------------------------
// LatencyStats
// ---------------------------------------------------------------------------

/// Aggregate latency statistics for a completed benchmark run, in
/// milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LatencyStats {
    /// Mean latency across all queries.
    #[serde(default)]
    pub mean_ms: f64,
    /// Standard deviation of the latency distribution.
    #[serde(default)]
    pub std_ms: f64,
    /// 95th percentile latency.
    #[serde(default)]
    pub p95_ms: f64,
}

// ---------------------------------------------------------------------------
// BenchmarkResult
// ---------------------------------------------------------------------------

/// An aggregated DNS benchmark result, one per server per run.
///
/// This is the shape the benchmark runner emits. The runner serializes a
/// superset of these fields, so unknown fields are ignored on
/// deserialization and absent fields fall back to zero.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BenchmarkResult {
    /// Total number of DNS queries sent.
    #[serde(default)]
    pub total_requests: u64,
    /// Queries answered with a usable response.
    #[serde(default)]
    pub total_success_responses: u64,
    /// Queries answered with an error response (SERVFAIL, REFUSED, ...).
    #[serde(default)]
    pub total_error_responses: u64,
    /// Queries that failed at the transport level (timeouts, resets).
    #[serde(default, rename = "totalIOErrors")]
    pub total_io_errors: u64,
    /// Achieved throughput in queries per second.
    #[serde(default)]
    pub queries_per_second: f64,
    /// Latency statistics over the run.
    #[serde(default)]
    pub latency_stats: LatencyStats,
}

impl BenchmarkResult {
    /// Responses that count against the error rate: error responses plus
    /// transport-level failures.
    pub fn failed_responses(&self) -> u64 {
        self.total_error_responses + self.total_io_errors
    }
}

/// Parse a single runner-emitted JSON record.
pub fn from_json_str(content: &str) -> Result<BenchmarkResult, DnsrankError> {
    let result: BenchmarkResult = serde_json::from_str(content)?;
    Ok(result)
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

/// Validate a benchmark result, returning all findings rather than just the
/// first.
///
/// An empty `Vec` means the record is well-formed. Scoring itself does not
/// re-check its input, so callers ingesting records from an external runner
/// should reject malformed ones up front.
pub fn validate(result: &BenchmarkResult) -> Vec<DnsrankError> {
    let mut errors = Vec::new();

    if !result.queries_per_second.is_finite() || result.queries_per_second < 0.0 {
        errors.push(DnsrankError::Validation(format!(
            "queriesPerSecond must be a non-negative number (got: {})",
            result.queries_per_second
        )));
    }

    for (name, value) in [
        ("latencyStats.meanMs", result.latency_stats.mean_ms),
        ("latencyStats.stdMs", result.latency_stats.std_ms),
        ("latencyStats.p95Ms", result.latency_stats.p95_ms),
    ] {
        if !value.is_finite() || value < 0.0 {
            errors.push(DnsrankError::Validation(format!(
                "{} must be a non-negative number (got: {})",
                name, value
            )));
        }
    }

    if result.total_requests == 0 {
        if result.total_success_responses > 0 {
            errors.push(DnsrankError::Validation(format!(
                "totalRequests is 0 but totalSuccessResponses is {}",
                result.total_success_responses
            )));
        }
    } else {
        if result.total_success_responses > result.total_requests {
            errors.push(DnsrankError::Validation(format!(
                "totalSuccessResponses ({}) exceeds totalRequests ({})",
                result.total_success_responses, result.total_requests
            )));
        }
        if result.failed_responses() > result.total_requests {
            errors.push(DnsrankError::Validation(format!(
                "totalErrorResponses + totalIOErrors ({}) exceeds totalRequests ({})",
                result.failed_responses(),
                result.total_requests
            )));
        }
    }

    errors
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_result() -> BenchmarkResult {
        BenchmarkResult {
            total_requests: 100,
            total_success_responses: 95,
            total_error_responses: 4,
            total_io_errors: 1,
            queries_per_second: 42.5,
            latency_stats: LatencyStats {
                mean_ms: 23.4,
                std_ms: 8.1,
                p95_ms: 41.0,
            },
        }
    }

    // -----------------------------------------------------------------------
    // Serde
    // -----------------------------------------------------------------------

    #[test]
    fn deserializes_runner_record() {
        let json = r#"{
            "totalRequests": 1000,
            "totalSuccessResponses": 990,
            "totalErrorResponses": 8,
            "totalIOErrors": 2,
            "queriesPerSecond": 55.3,
            "latencyStats": { "meanMs": 12.5, "stdMs": 3.2, "p95Ms": 20.1 }
        }"#;
        let result: BenchmarkResult = serde_json::from_str(json).unwrap();
        assert_eq!(result.total_requests, 1000);
        assert_eq!(result.total_success_responses, 990);
        assert_eq!(result.total_error_responses, 8);
        assert_eq!(result.total_io_errors, 2);
        assert!((result.queries_per_second - 55.3).abs() < 1e-9);
        assert!((result.latency_stats.mean_ms - 12.5).abs() < 1e-9);
        assert!((result.latency_stats.p95_ms - 20.1).abs() < 1e-9);
    }

    #[test]
    fn ignores_unknown_fields() {
        let json = r#"{
            "totalRequests": 10,
            "totalSuccessResponses": 10,
            "server": "8.8.8.8:53",
            "queryType": "A",
            "latencyStats": { "meanMs": 5.0, "stdMs": 1.0, "p95Ms": 7.0, "maxMs": 9.9 }
        }"#;
        let result: BenchmarkResult = serde_json::from_str(json).unwrap();
        assert_eq!(result.total_requests, 10);
        assert!((result.latency_stats.mean_ms - 5.0).abs() < 1e-9);
    }

    #[test]
    fn missing_fields_default_to_zero() {
        let result: BenchmarkResult = serde_json::from_str("{}").unwrap();
        assert_eq!(result.total_requests, 0);
        assert_eq!(result.total_io_errors, 0);
        assert_eq!(result.queries_per_second, 0.0);
        assert_eq!(result.latency_stats.mean_ms, 0.0);
    }

    #[test]
    fn io_errors_keep_runner_field_name() {
        let json = serde_json::to_string(&make_result()).unwrap();
        assert!(json.contains("\"totalIOErrors\":1"));
        assert!(!json.contains("totalIoErrors"));
    }

    #[test]
    fn round_trips_through_json() {
        let original = make_result();
        let json = serde_json::to_string(&original).unwrap();
        let parsed: BenchmarkResult = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, original);
    }

    #[test]
    fn from_json_str_rejects_invalid_json() {
        let err = from_json_str("not json").unwrap_err();
        assert!(err.to_string().contains("Serialization error"));
    }

    // -----------------------------------------------------------------------
    // Accessors
    // -----------------------------------------------------------------------

    #[test]
    fn failed_responses_sums_errors_and_io() {
        let result = make_result();
        assert_eq!(result.failed_responses(), 5);
    }

    // -----------------------------------------------------------------------
    // Validation
    // -----------------------------------------------------------------------

    #[test]
    fn validate_accepts_well_formed_record() {
        assert!(validate(&make_result()).is_empty());
    }

    #[test]
    fn validate_accepts_empty_record() {
        assert!(validate(&BenchmarkResult::default()).is_empty());
    }

    #[test]
    fn validate_rejects_negative_qps() {
        let mut result = make_result();
        result.queries_per_second = -1.0;
        let errors = validate(&result);
        assert_eq!(errors.len(), 1);
        assert!(errors[0].to_string().contains("queriesPerSecond"));
    }

    #[test]
    fn validate_rejects_non_finite_latency() {
        let mut result = make_result();
        result.latency_stats.mean_ms = f64::NAN;
        let errors = validate(&result);
        assert_eq!(errors.len(), 1);
        assert!(errors[0].to_string().contains("latencyStats.meanMs"));
    }

    #[test]
    fn validate_rejects_successes_exceeding_requests() {
        let mut result = make_result();
        result.total_success_responses = 101;
        let errors = validate(&result);
        assert_eq!(errors.len(), 1);
        assert!(errors[0].to_string().contains("exceeds totalRequests"));
    }

    #[test]
    fn validate_rejects_successes_without_requests() {
        let mut result = make_result();
        result.total_requests = 0;
        let errors = validate(&result);
        assert!(errors
            .iter()
            .any(|e| e.to_string().contains("totalRequests is 0")));
    }

    #[test]
    fn validate_rejects_failures_exceeding_requests() {
        let mut result = make_result();
        result.total_error_responses = 80;
        result.total_io_errors = 30;
        let errors = validate(&result);
        assert_eq!(errors.len(), 1);
        assert!(errors[0].to_string().contains("totalIOErrors"));
    }

    #[test]
    fn validate_collects_multiple_findings() {
        let mut result = make_result();
        result.queries_per_second = f64::INFINITY;
        result.latency_stats.std_ms = -2.0;
        result.total_success_responses = 500;
        let errors = validate(&result);
        assert_eq!(errors.len(), 3);
    }
}
