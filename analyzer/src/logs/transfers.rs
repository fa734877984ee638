use super::{parse_lines, read_log};
use crate::error::AnalyzerError;
use std::collections::HashSet;
use std::path::Path;

const TRANSFER: &str = "Transfer";

/// Number of distinct sender and receiver accounts of `Transfer` lines.
pub fn count_distinct_accounts(path: &Path) -> Result<usize, AnalyzerError> {
    let content = read_log(path)?;
    let mut accounts = HashSet::new();
    let transfers = parse_lines(path, &content, |tokens| match tokens {
        [TRANSFER, _, from, _, to, ..] => Some(Some((from.to_string(), to.to_string()))),
        [TRANSFER, ..] => None,
        _ => Some(None),
    });
    for (from, to) in transfers.into_iter().flatten() {
        accounts.insert(from);
        accounts.insert(to);
    }
    Ok(accounts.len())
}
