use super::stream::{Stream, NANOS_PER_SEC};

/// The time range covered by every stream: `[latest start, earliest end]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AlignmentWindow {
    pub start_ns: i64,
    pub end_ns: i64,
}

impl AlignmentWindow {
    /// `None` when there are no streams, one of them is empty, or the
    /// streams do not overlap at all.
    pub fn of(streams: &[Stream]) -> Option<Self> {
        if streams.is_empty() {
            return None;
        }
        let mut start_ns = i64::MIN;
        let mut end_ns = i64::MAX;
        for stream in streams {
            start_ns = start_ns.max(stream.first_timestamp()?);
            end_ns = end_ns.min(stream.last_timestamp()?);
        }
        (start_ns <= end_ns).then_some(Self { start_ns, end_ns })
    }

    #[cfg(test)]
    pub fn contains(&self, timestamp_ns: i64) -> bool {
        timestamp_ns >= self.start_ns && timestamp_ns <= self.end_ns
    }

    pub fn start_s(&self) -> f64 {
        self.start_ns as f64 / NANOS_PER_SEC
    }

    pub fn end_s(&self) -> f64 {
        self.end_ns as f64 / NANOS_PER_SEC
    }

    /// Every stream cut to the window. `None` if any of them ends up empty.
    pub fn trim(&self, streams: &[Stream]) -> Option<Vec<Stream>> {
        streams
            .iter()
            .map(|stream| {
                let trimmed = stream.trimmed(self.start_ns, self.end_ns);
                (!trimmed.is_empty()).then_some(trimmed)
            })
            .collect()
    }
}
