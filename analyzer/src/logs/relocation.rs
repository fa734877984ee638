use super::{parse_lines, read_optional_log};
use crate::analytics::relocation::{RelocationEvent, RelocationLog};
use crate::args::defaults::MOVED_ACCOUNTS_LOG_PREFIX;
use crate::error::AnalyzerError;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::info;

const MOVE_TO: &str = "moveTo";
const MOVE_2: &str = "move2";

pub fn moved_accounts_path(log_dir: &Path, partition: u32) -> PathBuf {
    log_dir.join(format!("{MOVED_ACCOUNTS_LOG_PREFIX}{partition}.txt"))
}

/// `movedTo moved2 timestamp` or `moved timestamp`, the counts of one line
/// are added together.
fn parse_timestamp_event(tokens: &[&str]) -> Option<RelocationEvent> {
    let numbers = tokens
        .iter()
        .map(|t| t.parse::<i64>().ok())
        .collect::<Option<Vec<_>>>()?;
    match numbers.as_slice() {
        [moved_to, moved_2, timestamp_ns] => {
            Some(RelocationEvent::at_timestamp(*timestamp_ns, moved_to + moved_2))
        }
        [moved, timestamp_ns] => Some(RelocationEvent::at_timestamp(*timestamp_ns, *moved)),
        _ => None,
    }
}

/// Timestamp keyed relocations of one partition, `None` if the log is absent.
pub fn parse_moved_accounts_log(
    path: &Path,
    partition: u32,
) -> Result<Option<RelocationLog>, AnalyzerError> {
    let Some(content) = read_optional_log(path)? else {
        return Ok(None);
    };
    let events = parse_lines(path, &content, parse_timestamp_event);
    info!(
        "Loaded {} relocation observations of partition {} from {}",
        events.len(),
        partition,
        path.display()
    );
    Ok(Some(RelocationLog::new(partition, events)))
}

/// Height keyed relocations of every partition found in a client latency
/// log, from its `client moveTo|move2 partition height ...` lines. Other
/// lines are latency records and are ignored here.
pub fn parse_client_relocations(
    path: &Path,
) -> Result<Option<BTreeMap<u32, RelocationLog>>, AnalyzerError> {
    let Some(content) = read_optional_log(path)? else {
        return Ok(None);
    };

    let mut events: BTreeMap<u32, Vec<RelocationEvent>> = BTreeMap::new();
    let moves = parse_lines(path, &content, |tokens| match tokens.get(1) {
        Some(&MOVE_TO) | Some(&MOVE_2) => {
            let partition = tokens.get(2)?.parse::<u32>().ok()?;
            let height = tokens.get(3)?.parse::<u64>().ok()?;
            Some(Some((partition, height)))
        }
        _ => Some(None),
    });
    for (partition, height) in moves.into_iter().flatten() {
        events
            .entry(partition)
            .or_default()
            .push(RelocationEvent::at_height(height, 1));
    }

    info!(
        "Loaded relocations of {} partitions from {}",
        events.len(),
        path.display()
    );
    Ok(Some(
        events
            .into_iter()
            .map(|(partition, events)| (partition, RelocationLog::new(partition, events)))
            .collect(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timestamp_events_should_sum_both_counts() {
        assert_eq!(
            parse_timestamp_event(&["2", "3", "100"]),
            Some(RelocationEvent::at_timestamp(100, 5))
        );
        assert_eq!(
            parse_timestamp_event(&["4", "100"]),
            Some(RelocationEvent::at_timestamp(100, 4))
        );
        assert_eq!(parse_timestamp_event(&["4"]), None);
        assert_eq!(parse_timestamp_event(&["a", "b", "c"]), None);
    }

    #[test]
    fn client_relocations_should_be_counted_per_partition_and_height() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("latencies.txt");
        std::fs::write(
            &path,
            "1 moveTo 2 10 0xabc\n\
             1 transfer 500 20 true false\n\
             2 move2 2 10\n\
             3 moveTo 3 12\n\
             4 moveTo 2 14\n",
        )
        .unwrap();

        let logs = parse_client_relocations(&path).unwrap().unwrap();

        let partition_2 = &logs[&2];
        assert_eq!(partition_2.cumulative_at_height(9), 0);
        assert_eq!(partition_2.cumulative_at_height(10), 2);
        assert_eq!(partition_2.cumulative_at_height(14), 3);
        assert_eq!(logs[&3].total(), 1);
        assert!(!logs.contains_key(&1));
    }

    #[test]
    fn absent_relocation_logs_should_be_none() {
        let dir = tempfile::tempdir().unwrap();

        assert!(parse_client_relocations(&dir.path().join("latencies.txt"))
            .unwrap()
            .is_none());
        assert!(parse_moved_accounts_log(&moved_accounts_path(dir.path(), 1), 1)
            .unwrap()
            .is_none());
    }
}
