pub mod latency;
pub mod markers;
pub mod pairs;
pub mod relocation;
pub mod throughput;
pub mod transfers;

use crate::error::AnalyzerError;
use std::fs;
use std::path::Path;
use tracing::{debug, warn};

/// Reads a whole log file; a missing primary input is fatal.
pub(crate) fn read_log(path: &Path) -> Result<String, AnalyzerError> {
    fs::read_to_string(path).map_err(|source| AnalyzerError::CannotReadLog {
        path: path.display().to_string(),
        source,
    })
}

/// Reads an auxiliary file, `None` when it does not exist.
pub(crate) fn read_optional_log(path: &Path) -> Result<Option<String>, AnalyzerError> {
    if !path.exists() {
        debug!("Auxiliary file {} not found", path.display());
        return Ok(None);
    }
    read_log(path).map(Some)
}

/// Parses every non-blank line of `content` with `parse`, which receives the
/// whitespace separated tokens. Lines it rejects are skipped and tallied.
pub(crate) fn parse_lines<T>(
    path: &Path,
    content: &str,
    mut parse: impl FnMut(&[&str]) -> Option<T>,
) -> Vec<T> {
    let mut records = Vec::new();
    let mut skipped = 0usize;
    for (index, line) in content.lines().enumerate() {
        let tokens = line.split_whitespace().collect::<Vec<_>>();
        if tokens.is_empty() {
            continue;
        }
        match parse(&tokens) {
            Some(record) => records.push(record),
            None => {
                skipped += 1;
                debug!("{}:{}: skipping line '{}'", path.display(), index + 1, line);
            }
        }
    }
    if skipped > 0 {
        warn!(
            "{}: skipped {} malformed lines, kept {}",
            path.display(),
            skipped,
            records.len()
        );
    }
    records
}

/// Integer suffix of a file stem, e.g. `3` for `tput-partition-3.txt`.
pub fn partition_from_path(path: &Path) -> Option<u32> {
    path.file_stem()?
        .to_str()?
        .rsplit('-')
        .next()?
        .parse()
        .ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn parse_lines_should_skip_blank_and_rejected_lines() {
        let content = "1 2\n\nfoo\n3 4\n";

        let pairs = parse_lines(Path::new("test.txt"), content, |tokens| {
            let first = tokens.first()?.parse::<i64>().ok()?;
            let second = tokens.get(1)?.parse::<i64>().ok()?;
            Some((first, second))
        });

        assert_eq!(pairs, vec![(1, 2), (3, 4)]);
    }

    #[test]
    fn partition_should_come_from_file_suffix() {
        assert_eq!(
            partition_from_path(&PathBuf::from("/logs/tput-partition-12.txt")),
            Some(12)
        );
        assert_eq!(
            partition_from_path(&PathBuf::from("stopped-tx-stream-partition-3")),
            Some(3)
        );
        assert_eq!(partition_from_path(&PathBuf::from("tput.txt")), None);
    }

    #[test]
    fn missing_auxiliary_file_should_be_none() {
        let dir = tempfile::tempdir().unwrap();

        let content = read_optional_log(&dir.path().join("absent.txt")).unwrap();

        assert!(content.is_none());
    }

    #[test]
    fn missing_primary_file_should_fail() {
        let dir = tempfile::tempdir().unwrap();

        let result = read_log(&dir.path().join("absent.txt"));

        assert!(matches!(result, Err(AnalyzerError::CannotReadLog { .. })));
    }
}
