use super::{parse_lines, read_log};
use crate::error::AnalyzerError;
use std::path::{Path, PathBuf};

fn parse_pair(tokens: &[&str]) -> Option<(i64, i64)> {
    match tokens {
        [x, y] => Some((x.parse().ok()?, y.parse().ok()?)),
        _ => None,
    }
}

/// `x y` integer lines, e.g. the micro benchmark size tables.
pub fn parse_pairs(path: &Path) -> Result<Vec<(i64, i64)>, AnalyzerError> {
    let content = read_log(path)?;
    Ok(parse_lines(path, &content, parse_pair))
}

/// Whole-run result of one comparison run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RunTotals {
    pub elapsed_ns: i64,
    pub transactions: i64,
}

impl RunTotals {
    /// Transactions per second over the whole run.
    pub fn rate(&self) -> f64 {
        if self.elapsed_ns <= 0 {
            return 0.0;
        }
        self.transactions as f64 / (self.elapsed_ns as f64 / 1e9)
    }
}

/// First `elapsed_ns total_txs` line of a comparison run file.
pub fn parse_run_totals(path: &Path) -> Result<RunTotals, AnalyzerError> {
    parse_pairs(path)?
        .first()
        .map(|&(elapsed_ns, transactions)| RunTotals {
            elapsed_ns,
            transactions,
        })
        .ok_or_else(|| {
            AnalyzerError::InvalidInput(format!(
                "{} has no `elapsed_ns total_txs` line",
                path.display()
            ))
        })
}

/// Zero cross-shard run with `partitions` partitions.
pub fn baseline_run_path(baseline_dir: &Path, partitions: u32) -> PathBuf {
    baseline_dir.join(format!("{partitions}p_250.txt"))
}
