pub mod error;
pub mod measurement;
pub mod rank;
pub mod report;
pub mod score;

pub use error::DnsrankError;
pub use measurement::{BenchmarkResult, LatencyStats};
pub use rank::{Grade, RankReport, RankedServer};
pub use score::{score, score_or_zero, ScoreResult};
