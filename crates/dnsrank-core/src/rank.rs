//! Leaderboard construction over a labeled batch of benchmark results.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

use crate::measurement::BenchmarkResult;
use crate::score::{score, ScoreResult};

// ---------------------------------------------------------------------------
// Grade
// ---------------------------------------------------------------------------

/// Letter grade for a total score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Grade {
    #[serde(rename = "A+")]
    APlus,
    A,
    B,
    C,
    D,
    F,
}

impl Grade {
    /// Map a total score (0-100) to a letter grade.
    pub fn from_total(total: f64) -> Self {
        match total {
            t if t >= 90.0 => Grade::APlus,
            t if t >= 80.0 => Grade::A,
            t if t >= 70.0 => Grade::B,
            t if t >= 60.0 => Grade::C,
            t if t >= 50.0 => Grade::D,
            _ => Grade::F,
        }
    }
}

impl std::fmt::Display for Grade {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Grade::APlus => "A+",
            Grade::A => "A",
            Grade::B => "B",
            Grade::C => "C",
            Grade::D => "D",
            Grade::F => "F",
        };
        write!(f, "{}", s)
    }
}

// ---------------------------------------------------------------------------
// RankedServer
// ---------------------------------------------------------------------------

/// One leaderboard entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RankedServer {
    /// 1-based position in the leaderboard.
    pub rank: usize,
    /// Caller-supplied server label, typically the resolver address.
    pub server: String,
    /// Absent when the result had no successful responses to evaluate.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub grade: Option<Grade>,
    /// Absent when the result had no successful responses to evaluate.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub score: Option<ScoreResult>,
}

// ---------------------------------------------------------------------------
// RankReport
// ---------------------------------------------------------------------------

/// A complete leaderboard over one batch of benchmark results.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RankReport {
    /// Unique ID of this report.
    pub report_id: Uuid,
    /// When the report was generated.
    pub generated_at: DateTime<Utc>,
    /// Entries ordered best to worst, unscorable ones last.
    pub entries: Vec<RankedServer>,
}

impl RankReport {
    /// The best-scoring entry, if any entry was scorable.
    pub fn best(&self) -> Option<&RankedServer> {
        self.entries.iter().find(|e| e.score.is_some())
    }

    /// Number of entries that received a score.
    pub fn scored_len(&self) -> usize {
        self.entries.iter().filter(|e| e.score.is_some()).count()
    }
}

// ---------------------------------------------------------------------------
// Ranking
// ---------------------------------------------------------------------------

/// Score a labeled batch of benchmark results and build a leaderboard.
///
/// Scored entries are ordered by total score descending, with ties broken
/// by server label. Entries with nothing to evaluate sort after all scored
/// ones, also by label.
pub fn rank_results(results: &[(String, BenchmarkResult)]) -> RankReport {
    debug!(servers = results.len(), "ranking benchmark results");

    let mut scored: Vec<(String, Option<ScoreResult>)> = results
        .iter()
        .map(|(server, result)| (server.clone(), score(result)))
        .collect();

    scored.sort_by(|(server_a, a), (server_b, b)| match (a, b) {
        (Some(a), Some(b)) => b
            .total
            .total_cmp(&a.total)
            .then_with(|| server_a.cmp(server_b)),
        (Some(_), None) => std::cmp::Ordering::Less,
        (None, Some(_)) => std::cmp::Ordering::Greater,
        (None, None) => server_a.cmp(server_b),
    });

    let entries = scored
        .into_iter()
        .enumerate()
        .map(|(idx, (server, score))| RankedServer {
            rank: idx + 1,
            server,
            grade: score.map(|s| Grade::from_total(s.total)),
            score,
        })
        .collect();

    RankReport {
        report_id: Uuid::new_v4(),
        generated_at: Utc::now(),
        entries,
    }
}
