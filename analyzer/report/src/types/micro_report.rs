use derive_new::new;
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, new)]
pub struct SizePoint {
    pub x: u64,
    pub size_kb: f64,
}

/// Storage proof and block header sizes measured by the micro benchmarks.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
pub struct MicroReport {
    /// Storage proof size by number of 32 byte storage slots
    pub proofs: Vec<SizePoint>,

    /// Header size by number of validators
    pub headers: Vec<SizePoint>,
}
