use super::read_optional_log;
use crate::args::defaults::{BEGIN_EXPERIMENT_FILE, STOPPED_STREAM_PREFIX};
use crate::error::AnalyzerError;
use std::path::Path;
use tracing::{debug, warn};

fn parse_marker(path: &Path, content: &str) -> Option<i64> {
    let first = content.split_whitespace().next()?;
    match first.parse::<i64>() {
        Ok(timestamp_ns) => Some(timestamp_ns),
        Err(_) => {
            warn!("{}: '{}' is not a timestamp, ignoring marker", path.display(), first);
            None
        }
    }
}

/// Timestamp of `begin-experiment.txt` in `log_dir`, if present.
pub fn read_begin_marker(log_dir: &Path) -> Result<Option<i64>, AnalyzerError> {
    let path = log_dir.join(BEGIN_EXPERIMENT_FILE);
    let marker = read_optional_log(&path)?.and_then(|content| parse_marker(&path, &content));
    if let Some(begin_ns) = marker {
        debug!("Experiment began at {} ns", begin_ns);
    }
    Ok(marker)
}

/// Timestamp at which the replayer stopped feeding `partition`, written
/// with or without a `.txt` extension.
pub fn read_stop_marker(log_dir: &Path, partition: u32) -> Result<Option<i64>, AnalyzerError> {
    let stem = format!("{STOPPED_STREAM_PREFIX}{partition}");
    for name in [stem.clone(), format!("{stem}.txt")] {
        let path = log_dir.join(name);
        if let Some(content) = read_optional_log(&path)? {
            return Ok(parse_marker(&path, &content));
        }
    }
    Ok(None)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn begin_marker_should_be_read_from_first_line() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(BEGIN_EXPERIMENT_FILE), "1700000000000000000\n").unwrap();

        assert_eq!(
            read_begin_marker(dir.path()).unwrap(),
            Some(1_700_000_000_000_000_000)
        );
    }

    #[test]
    fn stop_marker_should_accept_both_names() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("stopped-tx-stream-partition-1"), "42\n").unwrap();
        fs::write(dir.path().join("stopped-tx-stream-partition-2.txt"), "43").unwrap();

        assert_eq!(read_stop_marker(dir.path(), 1).unwrap(), Some(42));
        assert_eq!(read_stop_marker(dir.path(), 2).unwrap(), Some(43));
        assert_eq!(read_stop_marker(dir.path(), 3).unwrap(), None);
    }

    #[test]
    fn garbage_marker_should_be_ignored() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(BEGIN_EXPERIMENT_FILE), "soon").unwrap();

        assert_eq!(read_begin_marker(dir.path()).unwrap(), None);
    }
}
