use super::{parse_lines, read_log};
use crate::analytics::stream::NANOS_PER_SEC;
use crate::error::AnalyzerError;
use std::collections::BTreeMap;
use std::path::Path;
use tracing::{debug, info};

const MOVE_TO: &str = "moveTo";
const MOVE_2: &str = "move2";
const GAVE_UP: &str = "gaveUp";
const TRANSFER: &str = "transfer";
const NEW_ACCOUNT: &str = "newAccount";
const TRUE: &str = "true";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LatencyFormat {
    /// `method start_ns end_ns required_move`
    Replayer,
    /// `client method start_ns latency_ns ...`
    Client,
}

/// One completed (or abandoned) request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LatencyRecord {
    pub client_id: Option<u64>,
    pub method: String,
    pub started_at_ns: i64,
    pub latency_ns: i64,
    pub cross_shard: bool,
    pub failed: bool,
}

impl LatencyRecord {
    pub fn latency_s(&self) -> f64 {
        self.latency_ns as f64 / NANOS_PER_SEC
    }
}

/// Client logs start with a numeric client id, replayer logs with a method.
pub fn detect_format(content: &str) -> LatencyFormat {
    let first = content
        .lines()
        .find_map(|line| line.split_whitespace().next());
    match first {
        Some(token) if token.parse::<u64>().is_ok() => LatencyFormat::Client,
        _ => LatencyFormat::Replayer,
    }
}

fn parse_replayer_record(tokens: &[&str]) -> Option<LatencyRecord> {
    let method = tokens.first()?;
    let started_at_ns = tokens.get(1)?.parse::<i64>().ok()?;
    let ended_at_ns = tokens.get(2)?.parse::<i64>().ok()?;
    Some(LatencyRecord {
        client_id: None,
        method: method.to_string(),
        started_at_ns,
        latency_ns: ended_at_ns - started_at_ns,
        cross_shard: tokens.get(3).is_some_and(|t| *t == TRUE),
        failed: false,
    })
}

pub fn parse_replayer_log(path: &Path, content: &str) -> Vec<LatencyRecord> {
    parse_lines(path, content, parse_replayer_record)
}

enum ClientLine {
    Relocation,
    GaveUp { client_id: u64, at_ns: i64 },
    Request(LatencyRecord),
}

fn parse_client_line(tokens: &[&str]) -> Option<ClientLine> {
    let client_id = tokens.first()?.parse::<u64>().ok()?;
    let method = *tokens.get(1)?;
    if method == MOVE_TO || method == MOVE_2 {
        return Some(ClientLine::Relocation);
    }

    let at_ns = tokens.get(2)?.parse::<i64>().ok()?;
    if method == GAVE_UP {
        return Some(ClientLine::GaveUp { client_id, at_ns });
    }

    let latency_ns = tokens.get(3)?.parse::<i64>().ok()?;
    let (cross_shard, failed) = match method {
        TRANSFER => (
            tokens.get(4).is_some_and(|t| *t == TRUE),
            tokens.get(5).is_some_and(|t| *t == TRUE),
        ),
        NEW_ACCOUNT => (tokens.get(4).is_some_and(|t| *t == TRUE), false),
        _ => (false, tokens.len() > 4 && tokens.last() == Some(&TRUE)),
    };

    Some(ClientLine::Request(LatencyRecord {
        client_id: Some(client_id),
        method: method.to_owned(),
        started_at_ns: at_ns,
        latency_ns,
        cross_shard,
        failed,
    }))
}

/// Client latency records at or after `begin_ns`.
///
/// A request that follows a failed one of the same client is its retry: its
/// latency is added to the failed record, which takes over the new outcome.
/// `gaveUp` marks the last record of a client as failed.
pub fn parse_client_log(
    path: &Path,
    content: &str,
    begin_ns: Option<i64>,
) -> Vec<LatencyRecord> {
    let lines = parse_lines(path, content, parse_client_line);

    let mut clients: BTreeMap<u64, Vec<LatencyRecord>> = BTreeMap::new();
    let mut before_begin = 0usize;
    for line in lines {
        let (client_id, at_ns) = match &line {
            ClientLine::Relocation => continue,
            ClientLine::GaveUp { client_id, at_ns } => (*client_id, *at_ns),
            ClientLine::Request(record) => {
                (record.client_id.unwrap_or_default(), record.started_at_ns)
            }
        };
        if begin_ns.is_some_and(|begin_ns| at_ns < begin_ns) {
            before_begin += 1;
            continue;
        }

        let records = clients.entry(client_id).or_default();
        match line {
            ClientLine::GaveUp { .. } => match records.last_mut() {
                Some(last) => last.failed = true,
                None => debug!("Client {} gave up before any request", client_id),
            },
            ClientLine::Request(record) => match records.last_mut() {
                Some(last) if last.failed => {
                    last.latency_ns += record.latency_ns;
                    last.failed = record.failed;
                }
                _ => records.push(record),
            },
            ClientLine::Relocation => {}
        }
    }
    if before_begin > 0 {
        debug!("Skipped {} records before experiment begin", before_begin);
    }

    clients.into_values().flatten().collect()
}

/// Parses a latency log in the given format, detecting it when `None`.
pub fn parse_latency_log(
    path: &Path,
    format: Option<LatencyFormat>,
    begin_ns: Option<i64>,
) -> Result<(LatencyFormat, Vec<LatencyRecord>), AnalyzerError> {
    let content = read_log(path)?;
    let format = format.unwrap_or_else(|| detect_format(&content));
    let records = match format {
        LatencyFormat::Replayer => parse_replayer_log(path, &content),
        LatencyFormat::Client => parse_client_log(path, &content, begin_ns),
    };
    info!(
        "Loaded {} latency records ({:?} format) from {}",
        records.len(),
        format,
        path.display()
    );
    Ok((format, records))
}
